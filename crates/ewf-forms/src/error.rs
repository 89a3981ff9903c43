use crate::post_back::PostBackId;

/// Errors raised while wiring or executing post-backs
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("A post-back with an ID of `{0}` already exists in the page")]
	DuplicatePostBackId(PostBackId),
	#[error("No post-back with an ID of `{0}` exists in the page")]
	UnknownPostBack(String),
	#[error("There is no data modification in the current form state")]
	NoDataModificationInScope,
	#[error("The page modification value has already been set during this render pass")]
	PageModificationValueAlreadySet,
	#[error("The page modification value has not been set")]
	PageModificationValueUnset,
	#[error("Data modification failed: {0}")]
	DataModification(#[source] anyhow::Error),
	#[error("Invalid submission: {0}")]
	InvalidSubmission(String),
}

pub type FormResult<T> = Result<T, FormError>;

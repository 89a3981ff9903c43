use ewf_forms::{FormError, PostBackId};

/// Errors raised while building, rendering, or handling a page
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PageError {
	#[error("A submit button already exists on the page (post-back `{existing}`)")]
	SubmitButtonAlreadyExists { existing: PostBackId },
	#[error("More than one radio button in group `{group}` is initially selected")]
	MultipleSelectedRadioButtons { group: String },
	#[error("A text control must have one or more rows")]
	InvalidRowCount,
	#[error(transparent)]
	Form(#[from] FormError),
}

pub type PageResult<T> = Result<T, PageError>;

//! Post-backs: named server round trips

use ewf_core::ResourceInfo;
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// The id of the post-back created for a page when none is specified
pub const DEFAULT_POST_BACK_ID: &str = "main";

/// The id of a post-back, unique within a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostBackId(String);

impl PostBackId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PostBackId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for PostBackId {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

impl From<String> for PostBackId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl AsRef<str> for PostBackId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for PostBackId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

/// Failure of a data modification method
#[derive(Debug, thiserror::Error)]
pub enum DataModificationError {
	/// The modification rejected the submitted data; the messages are shown to the user
	#[error("validation failed: {}", .0.join(" "))]
	Validation(Vec<String>),
	/// Any other failure; aborts the request
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl DataModificationError {
	/// A validation failure with a single message
	pub fn validation(message: impl Into<String>) -> Self {
		Self::Validation(vec![message.into()])
	}
}

/// A server-side mutation step executed as part of a post-back
pub type DataModificationMethod = Arc<dyn Fn() -> Result<(), DataModificationError> + Send + Sync>;

/// Produces the response of a post-back after its modifications succeed
pub type ActionGetter = Arc<dyn Fn() -> PostBackAction + Send + Sync>;

/// The response produced by a completed post-back
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum PostBackAction {
	/// Build and render the page again
	#[default]
	Rerender,
	/// Send the client to another URL
	Redirect(String),
}

impl PostBackAction {
	/// Redirect to a resource
	///
	/// # Examples
	///
	/// ```
	/// use ewf_core::ExternalResource;
	/// use ewf_forms::PostBackAction;
	///
	/// let home = ExternalResource::new("https://example.com/").unwrap();
	/// assert_eq!(
	///     PostBackAction::redirect(&home),
	///     PostBackAction::Redirect("https://example.com/".to_string())
	/// );
	/// ```
	pub fn redirect(resource: &dyn ResourceInfo) -> Self {
		Self::Redirect(resource.url())
	}
}

/// Whether a post-back is a full round trip or a partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostBackKind {
	Full,
	Intermediate { parent: Option<PostBackId> },
}

struct PostBackInner {
	id: PostBackId,
	kind: PostBackKind,
	first_modification: RwLock<Option<DataModificationMethod>>,
	action_getter: RwLock<Option<ActionGetter>>,
}

/// A named, idempotent server round trip
///
/// `PostBack` is a cheap handle. Clones refer to the same post-back and
/// compare equal; two separately created post-backs never do, even when they
/// share an id. Registering both on one page is an error.
///
/// The builder methods update the shared post-back in place, so handles
/// cloned earlier observe the modification and the action getter too.
#[derive(Clone)]
pub struct PostBack {
	inner: Arc<PostBackInner>,
}

impl PostBack {
	/// Create a full post-back
	///
	/// # Examples
	///
	/// ```
	/// use ewf_forms::{PostBack, PostBackAction};
	///
	/// let log_out = PostBack::create_full("ewfLogOut")
	///     .with_first_modification(|| Ok(()))
	///     .with_action_getter(|| PostBackAction::Redirect("/".to_string()));
	///
	/// assert_eq!(log_out.id().as_str(), "ewfLogOut");
	/// assert_eq!(log_out.resolve_action(), PostBackAction::Redirect("/".to_string()));
	/// ```
	pub fn create_full(id: impl Into<PostBackId>) -> Self {
		Self::with_kind(id.into(), PostBackKind::Full)
	}

	/// Create a post-back for a partial update of a single control
	pub fn create_intermediate(parent: Option<&PostBack>, id: impl Into<PostBackId>) -> Self {
		Self::with_kind(
			id.into(),
			PostBackKind::Intermediate {
				parent: parent.map(|p| p.id().clone()),
			},
		)
	}

	fn with_kind(id: PostBackId, kind: PostBackKind) -> Self {
		Self {
			inner: Arc::new(PostBackInner {
				id,
				kind,
				first_modification: RwLock::new(None),
				action_getter: RwLock::new(None),
			}),
		}
	}

	/// Set the data modification that runs first when this post-back fires
	pub fn with_first_modification<F>(self, method: F) -> Self
	where
		F: Fn() -> Result<(), DataModificationError> + Send + Sync + 'static,
	{
		*self.inner.first_modification.write() = Some(Arc::new(method));
		self
	}

	/// Set the callback that decides the response after the modifications succeed
	///
	/// Intermediate post-backs always re-render; the getter is ignored for them.
	pub fn with_action_getter<F>(self, getter: F) -> Self
	where
		F: Fn() -> PostBackAction + Send + Sync + 'static,
	{
		if self.is_intermediate() {
			tracing::warn!(
				"ignoring action getter on intermediate post-back `{}`",
				self.inner.id
			);
			return self;
		}
		*self.inner.action_getter.write() = Some(Arc::new(getter));
		self
	}

	pub fn id(&self) -> &PostBackId {
		&self.inner.id
	}

	pub fn kind(&self) -> &PostBackKind {
		&self.inner.kind
	}

	pub fn is_intermediate(&self) -> bool {
		matches!(self.inner.kind, PostBackKind::Intermediate { .. })
	}

	pub fn first_modification(&self) -> Option<DataModificationMethod> {
		self.inner.first_modification.read().clone()
	}

	/// The response of this post-back, once its modifications have succeeded
	pub fn resolve_action(&self) -> PostBackAction {
		if self.is_intermediate() {
			return PostBackAction::Rerender;
		}
		let getter = self.inner.action_getter.read().clone();
		getter.map_or(PostBackAction::Rerender, |getter| getter())
	}
}

impl PartialEq for PostBack {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl Eq for PostBack {}

impl fmt::Debug for PostBack {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PostBack")
			.field("id", &self.inner.id)
			.field("kind", &self.inner.kind)
			.field("has_first_modification", &self.inner.first_modification.read().is_some())
			.field("has_action_getter", &self.inner.action_getter.read().is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_clones_share_identity() {
		// Arrange
		let post_back = PostBack::create_full("save");

		// Act
		let clone = post_back.clone();

		// Assert
		assert_eq!(post_back, clone);
		assert_ne!(post_back, PostBack::create_full("save"));
	}

	#[rstest]
	fn test_configuring_keeps_identity_of_earlier_clones() {
		// Arrange
		let save = PostBack::create_full("save");
		let earlier = save.clone();

		// Act
		let save = save
			.with_first_modification(|| Ok(()))
			.with_action_getter(|| PostBackAction::Redirect("/saved".to_string()));

		// Assert
		assert_eq!(save, earlier);
		assert!(earlier.first_modification().is_some());
		assert_eq!(earlier.resolve_action(), PostBackAction::Redirect("/saved".to_string()));
	}

	#[rstest]
	fn test_full_post_back_defaults_to_rerender() {
		let post_back = PostBack::create_full(DEFAULT_POST_BACK_ID);

		assert_eq!(post_back.resolve_action(), PostBackAction::Rerender);
		assert!(post_back.first_modification().is_none());
	}

	#[rstest]
	fn test_intermediate_post_back_ignores_action_getter() {
		// Arrange
		let parent = PostBack::create_full("main");

		// Act
		let post_back = PostBack::create_intermediate(Some(&parent), "refresh")
			.with_action_getter(|| PostBackAction::Redirect("/elsewhere".to_string()));

		// Assert
		assert_eq!(post_back.resolve_action(), PostBackAction::Rerender);
		assert_eq!(
			post_back.kind(),
			&PostBackKind::Intermediate {
				parent: Some(PostBackId::from("main"))
			}
		);
	}

	#[rstest]
	fn test_first_modification_runs() {
		// Arrange
		let post_back = PostBack::create_full("fail")
			.with_first_modification(|| Err(DataModificationError::validation("nope")));

		// Act
		let result = post_back.first_modification().map(|method| method());

		// Assert
		assert!(matches!(
			result,
			Some(Err(DataModificationError::Validation(ref messages))) if messages == &["nope"]
		));
	}
}

use crate::error::{FormError, FormResult};
use crate::post_back::{DataModificationError, DataModificationMethod, PostBack, PostBackId};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// The post-backs registered on a page, in registration order
#[derive(Default)]
pub struct PostBackRegistry {
	post_backs: IndexMap<PostBackId, PostBack>,
	added_modifications: IndexMap<PostBackId, Vec<DataModificationMethod>>,
}

impl PostBackRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a post-back
	///
	/// Returns `Ok(true)` when the post-back was added and `Ok(false)` when it
	/// was already registered. A different post-back with the same id is an
	/// error.
	///
	/// # Examples
	///
	/// ```
	/// use ewf_forms::{PostBack, PostBackRegistry};
	///
	/// let mut registry = PostBackRegistry::new();
	/// let save = PostBack::create_full("save");
	///
	/// assert!(registry.register(&save).unwrap());
	/// assert!(!registry.register(&save.clone()).unwrap());
	/// assert!(registry.register(&PostBack::create_full("save")).is_err());
	/// ```
	pub fn register(&mut self, post_back: &PostBack) -> FormResult<bool> {
		if let Some(existing) = self.post_backs.get(post_back.id()) {
			if existing == post_back {
				return Ok(false);
			}
			return Err(FormError::DuplicatePostBackId(post_back.id().clone()));
		}
		tracing::debug!("registering post-back `{}`", post_back.id());
		self.post_backs
			.insert(post_back.id().clone(), post_back.clone());
		Ok(true)
	}

	pub fn get(&self, id: &str) -> Option<&PostBack> {
		self.post_backs.get(id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.post_backs.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.post_backs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.post_backs.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &PostBack> {
		self.post_backs.values()
	}

	/// Append a data modification to a registered post-back
	pub fn add_modification_method<F>(&mut self, id: &str, method: F) -> FormResult<()>
	where
		F: Fn() -> Result<(), DataModificationError> + Send + Sync + 'static,
	{
		let Some(post_back) = self.post_backs.get(id) else {
			return Err(FormError::UnknownPostBack(id.to_string()));
		};
		self.added_modifications
			.entry(post_back.id().clone())
			.or_default()
			.push(Arc::new(method));
		Ok(())
	}

	/// The modification methods of a post-back in execution order
	///
	/// The post-back's own first modification comes first, followed by the
	/// methods added through [`add_modification_method`](Self::add_modification_method).
	pub fn modification_methods(&self, id: &str) -> Vec<DataModificationMethod> {
		let first = self.post_backs.get(id).and_then(PostBack::first_modification);
		first
			.into_iter()
			.chain(self.added_modifications.get(id).into_iter().flatten().cloned())
			.collect()
	}
}

impl fmt::Debug for PostBackRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PostBackRegistry")
			.field("post_backs", &self.post_backs.values().collect::<Vec<_>>())
			.field(
				"added_modifications",
				&self
					.added_modifications
					.iter()
					.map(|(id, methods)| (id, methods.len()))
					.collect::<Vec<_>>(),
			)
			.finish()
	}
}

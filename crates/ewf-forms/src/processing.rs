//! Execution of a fired post-back

use crate::error::{FormError, FormResult};
use crate::post_back::{DataModificationError, PostBackAction};
use crate::post_back_values::PostBackValues;
use crate::registry::PostBackRegistry;
use crate::validation::{Validation, Validator};
use indexmap::IndexMap;
use serde::Serialize;

/// Validation messages gathered during a post-back
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
	by_element: IndexMap<String, Vec<String>>,
	page: Vec<String>,
}

impl FieldErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.by_element.is_empty() && self.page.is_empty()
	}

	pub fn add_for_element(&mut self, element_id: impl Into<String>, message: impl Into<String>) {
		self.by_element
			.entry(element_id.into())
			.or_default()
			.push(message.into());
	}

	pub fn add_page_error(&mut self, message: impl Into<String>) {
		self.page.push(message.into());
	}

	/// Messages attached to an element
	pub fn for_element(&self, element_id: &str) -> &[String] {
		self.by_element
			.get(element_id)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// Messages not attached to any element
	pub fn page_errors(&self) -> &[String] {
		&self.page
	}

	pub fn element_ids(&self) -> impl Iterator<Item = &str> {
		self.by_element.keys().map(String::as_str)
	}
}

/// The result of executing a post-back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostBackOutcome {
	/// Every validation and modification succeeded
	Completed(PostBackAction),
	/// Validation failed; the page must be rendered again with the errors
	ValidationFailed(FieldErrors),
}

/// Runs the validations and data modifications of a fired post-back
///
/// # Examples
///
/// ```
/// use ewf_forms::{PostBack, PostBackAction, PostBackOutcome, PostBackPipeline, PostBackRegistry, PostBackValues};
///
/// let mut registry = PostBackRegistry::new();
/// registry
///     .register(&PostBack::create_full("done").with_action_getter(|| PostBackAction::Redirect("/next".to_string())))
///     .unwrap();
///
/// let outcome = PostBackPipeline::new(&registry, &[])
///     .execute("done", &PostBackValues::new())
///     .unwrap();
///
/// assert_eq!(outcome, PostBackOutcome::Completed(PostBackAction::Redirect("/next".to_string())));
/// ```
pub struct PostBackPipeline<'a> {
	registry: &'a PostBackRegistry,
	validations: &'a [Validation],
}

impl<'a> PostBackPipeline<'a> {
	pub fn new(registry: &'a PostBackRegistry, validations: &'a [Validation]) -> Self {
		Self {
			registry,
			validations,
		}
	}

	/// Execute the post-back with id `post_back_id`
	///
	/// Validations bound to the post-back run first, in registration order. If
	/// any of them fails, no data modification runs and the action getter is
	/// not called. Otherwise the modification methods run in order until one
	/// reports a validation failure.
	pub fn execute(&self, post_back_id: &str, values: &PostBackValues) -> FormResult<PostBackOutcome> {
		let post_back = self
			.registry
			.get(post_back_id)
			.ok_or_else(|| FormError::UnknownPostBack(post_back_id.to_string()))?;

		let mut validator = Validator::new();
		let mut errors = FieldErrors::new();
		for validation in self.validations.iter().filter(|v| v.applies_to(post_back_id)) {
			let already_reported = validator.messages().len();
			validation.run(values, &mut validator);
			for message in &validator.messages()[already_reported..] {
				match validation.element_id() {
					Some(element_id) => errors.add_for_element(element_id, message.clone()),
					None => errors.add_page_error(message.clone()),
				}
			}
		}
		if validator.error_occurred() {
			tracing::warn!(
				"post-back `{}` failed validation with {} message(s)",
				post_back_id,
				validator.messages().len()
			);
			return Ok(PostBackOutcome::ValidationFailed(errors));
		}

		for method in self.registry.modification_methods(post_back_id) {
			match method() {
				Ok(()) => {}
				Err(DataModificationError::Validation(messages)) => {
					tracing::warn!("data modification of post-back `{}` rejected the submission", post_back_id);
					for message in messages {
						errors.add_page_error(message);
					}
					return Ok(PostBackOutcome::ValidationFailed(errors));
				}
				Err(DataModificationError::Other(error)) => {
					return Err(FormError::DataModification(error));
				}
			}
		}

		let action = post_back.resolve_action();
		tracing::info!("post-back `{}` completed with {:?}", post_back_id, action);
		Ok(PostBackOutcome::Completed(action))
	}
}

//! Validators and the validations registered by controls

use crate::post_back::PostBackId;
use crate::post_back_values::PostBackValues;
use std::fmt;

/// The outcome of the most recent check made through a [`ValidationErrorHandler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCondition {
	#[default]
	NoError,
	Empty,
	TooLong,
}

/// Describes the value being validated and records the last error condition
///
/// # Examples
///
/// ```
/// use ewf_forms::{ErrorCondition, ValidationErrorHandler, Validator};
///
/// let mut validator = Validator::new();
/// let mut handler = ValidationErrorHandler::new("name");
///
/// validator.get_string(&mut handler, "", false);
///
/// assert_eq!(handler.last_result(), ErrorCondition::Empty);
/// assert_eq!(validator.messages(), ["Please enter the name."]);
/// ```
#[derive(Debug, Clone)]
pub struct ValidationErrorHandler {
	subject: String,
	last_result: ErrorCondition,
}

impl ValidationErrorHandler {
	pub fn new(subject: impl Into<String>) -> Self {
		Self {
			subject: subject.into(),
			last_result: ErrorCondition::NoError,
		}
	}

	pub fn subject(&self) -> &str {
		&self.subject
	}

	pub fn last_result(&self) -> ErrorCondition {
		self.last_result
	}
}

/// Collects validation errors for one post-back
#[derive(Debug, Clone, Default)]
pub struct Validator {
	messages: Vec<String>,
	error_occurred: bool,
}

impl Validator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn note_error_and_add_message(&mut self, message: impl Into<String>) {
		self.error_occurred = true;
		self.messages.push(message.into());
	}

	pub fn error_occurred(&self) -> bool {
		self.error_occurred
	}

	pub fn messages(&self) -> &[String] {
		&self.messages
	}

	/// Validate a string, treating whitespace-only values as empty
	///
	/// Returns the value when it is valid and an empty string otherwise.
	pub fn get_string(&mut self, handler: &mut ValidationErrorHandler, value: &str, allow_empty: bool) -> String {
		self.get_string_with_max_length(handler, value, allow_empty, usize::MAX)
	}

	/// Validate a string that may be at most `max_length` characters long
	///
	/// Length is measured in UTF-16 code units, as the browser's `maxlength` does.
	pub fn get_string_with_max_length(
		&mut self,
		handler: &mut ValidationErrorHandler,
		value: &str,
		allow_empty: bool,
		max_length: usize,
	) -> String {
		handler.last_result = ErrorCondition::NoError;

		if value.trim().is_empty() {
			if !allow_empty {
				handler.last_result = ErrorCondition::Empty;
				self.note_error_and_add_message(format!("Please enter the {}.", handler.subject));
			}
			return String::new();
		}

		if value.encode_utf16().count() > max_length {
			handler.last_result = ErrorCondition::TooLong;
			self.note_error_and_add_message(format!(
				"The {} must be no longer than {} characters.",
				handler.subject, max_length
			));
			return String::new();
		}

		value.to_string()
	}
}

type ValidationMethod = Box<dyn Fn(&PostBackValues, &mut Validator) + Send + Sync>;

/// A validation registered during page construction
///
/// Validations run in registration order when one of the post-backs they are
/// bound to fires. Messages added while a validation runs are attributed to
/// its element, or to the page when it has none.
pub struct Validation {
	element_id: Option<String>,
	data_modifications: Vec<PostBackId>,
	method: ValidationMethod,
}

impl Validation {
	pub fn new<F>(method: F) -> Self
	where
		F: Fn(&PostBackValues, &mut Validator) + Send + Sync + 'static,
	{
		Self {
			element_id: None,
			data_modifications: Vec::new(),
			method: Box::new(method),
		}
	}

	/// Attribute the messages of this validation to an element
	pub fn for_element(mut self, element_id: impl Into<String>) -> Self {
		let element_id = element_id.into();
		self.element_id = (!element_id.is_empty()).then_some(element_id);
		self
	}

	/// Bind this validation to the post-backs it guards
	pub fn with_data_modifications(mut self, post_back_ids: Vec<PostBackId>) -> Self {
		self.data_modifications = post_back_ids;
		self
	}

	pub fn element_id(&self) -> Option<&str> {
		self.element_id.as_deref()
	}

	pub fn data_modifications(&self) -> &[PostBackId] {
		&self.data_modifications
	}

	pub fn applies_to(&self, post_back_id: &str) -> bool {
		self.data_modifications.iter().any(|id| id.as_str() == post_back_id)
	}

	pub fn run(&self, values: &PostBackValues, validator: &mut Validator) {
		(self.method)(values, validator)
	}
}

impl fmt::Debug for Validation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Validation")
			.field("element_id", &self.element_id)
			.field("data_modifications", &self.data_modifications)
			.finish_non_exhaustive()
	}
}

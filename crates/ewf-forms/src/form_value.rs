//! The bridge between a server-held value and its posted representation

use crate::error::FormResult;
use crate::page_modification_value::PageModificationValue;
use crate::post_back_values::PostBackValues;
use crate::validation::{Validation, Validator};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// The message recorded when a control's posted value cannot be interpreted
pub const MISSING_OR_INVALID_MESSAGE: &str = "The submitted value is missing or invalid.";

/// Classification of a raw posted value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostBackValueValidationResult<T> {
	Valid(T),
	Invalid,
}

impl<T> PostBackValueValidationResult<T> {
	pub fn is_valid(&self) -> bool {
		matches!(self, Self::Valid(_))
	}

	pub fn into_value(self) -> Option<T> {
		match self {
			Self::Valid(value) => Some(value),
			Self::Invalid => None,
		}
	}
}

/// A validated posted value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBackValue<T> {
	pub value: T,
	/// Whether the posted value differs from the durable value
	pub changed_on_post_back: bool,
}

type DurableGetter<T> = Box<dyn Fn() -> T + Send + Sync>;
type RawValueSelector<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;
type RawValueValidator<T> = Box<dyn Fn(Option<&str>) -> PostBackValueValidationResult<T> + Send + Sync>;
type PageModificationSetter<T> = Box<dyn Fn(&T) -> FormResult<()> + Send + Sync>;

struct Inner<T> {
	durable_getter: DurableGetter<T>,
	client_id: String,
	raw_value_selector: RawValueSelector<T>,
	validator: RawValueValidator<T>,
	page_modification_setters: Mutex<Vec<PageModificationSetter<T>>>,
}

/// The value of one interactive control
///
/// A form value knows the durable (server-held) value, the element id under
/// which the client posts it, how the durable value looks when posted, and how
/// to classify a posted raw value. An empty client id marks a read-only
/// control whose posted values are never read.
///
/// # Examples
///
/// ```
/// use ewf_forms::{FormValue, PostBackValueValidationResult, PostBackValues};
///
/// let name = FormValue::new(
///     || "Jane".to_string(),
///     "ewf1",
///     |v: &String| Some(v.clone()),
///     |raw| match raw {
///         Some(raw) => PostBackValueValidationResult::Valid(raw.to_string()),
///         None => PostBackValueValidationResult::Invalid,
///     },
/// );
///
/// let posted = PostBackValues::new().with_field("ewf1", "John");
/// assert_eq!(name.value(Some(&posted)), "John");
/// assert!(name.value_changed_on_post_back(&posted));
/// assert_eq!(name.value(None), "Jane");
/// ```
pub struct FormValue<T> {
	inner: Arc<Inner<T>>,
}

impl<T: 'static> FormValue<T> {
	pub fn new<G, S, V>(durable_getter: G, client_id: impl Into<String>, raw_value_selector: S, validator: V) -> Self
	where
		G: Fn() -> T + Send + Sync + 'static,
		S: Fn(&T) -> Option<String> + Send + Sync + 'static,
		V: Fn(Option<&str>) -> PostBackValueValidationResult<T> + Send + Sync + 'static,
	{
		Self {
			inner: Arc::new(Inner {
				durable_getter: Box::new(durable_getter),
				client_id: client_id.into(),
				raw_value_selector: Box::new(raw_value_selector),
				validator: Box::new(validator),
				page_modification_setters: Mutex::new(Vec::new()),
			}),
		}
	}

	/// The element id the client posts this value under; empty when read-only
	pub fn client_id(&self) -> &str {
		&self.inner.client_id
	}

	pub fn is_read_only(&self) -> bool {
		self.inner.client_id.is_empty()
	}

	pub fn durable_value(&self) -> T {
		(self.inner.durable_getter)()
	}

	/// The raw representation the client posts for the durable value
	pub fn durable_raw_value(&self) -> Option<String> {
		(self.inner.raw_value_selector)(&self.durable_value())
	}

	pub fn validate_raw(&self, raw: Option<&str>) -> PostBackValueValidationResult<T> {
		(self.inner.validator)(raw)
	}

	/// The posted value, or `None` when it is missing or invalid
	///
	/// Read-only values yield the durable value, unchanged.
	pub fn post_back_value(&self, values: &PostBackValues) -> Option<PostBackValue<T>> {
		if self.is_read_only() {
			return Some(PostBackValue {
				value: self.durable_value(),
				changed_on_post_back: false,
			});
		}

		let raw = values.raw(&self.inner.client_id);
		let value = self.validate_raw(raw).into_value()?;
		let changed_on_post_back = raw.map(str::to_string) != self.durable_raw_value();
		Some(PostBackValue {
			value,
			changed_on_post_back,
		})
	}

	/// The valid posted value when there is one, otherwise the durable value
	pub fn value(&self, values: Option<&PostBackValues>) -> T {
		values
			.and_then(|values| self.post_back_value(values))
			.map(|post_back_value| post_back_value.value)
			.unwrap_or_else(|| self.durable_value())
	}

	pub fn value_changed_on_post_back(&self, values: &PostBackValues) -> bool {
		self.post_back_value(values)
			.is_some_and(|post_back_value| post_back_value.changed_on_post_back)
	}

	/// Mirror this value into `page_modification_value` through `projector`
	pub fn add_page_modification_value<P, F>(&self, page_modification_value: &PageModificationValue<P>, projector: F)
	where
		P: Send + 'static,
		F: Fn(&T) -> P + Send + Sync + 'static,
	{
		let target = page_modification_value.clone();
		self.inner
			.page_modification_setters
			.lock()
			.push(Box::new(move |value| target.set_value(projector(value))));
	}

	/// Set every linked page modification value from the current value
	///
	/// Called once per render pass; each projector runs exactly once.
	pub fn set_page_modification_values(&self, values: Option<&PostBackValues>) -> FormResult<()> {
		let setters = self.inner.page_modification_setters.lock();
		if setters.is_empty() {
			return Ok(());
		}
		let value = self.value(values);
		for setter in setters.iter() {
			setter(&value)?;
		}
		Ok(())
	}
}

impl<T: Send + 'static> FormValue<T> {
	/// Create the validation for this value
	///
	/// A missing or invalid posted value records an error for the element and
	/// skips `handler`; otherwise `handler` receives the posted value.
	pub fn create_validation<H>(&self, handler: H) -> Validation
	where
		H: Fn(PostBackValue<T>, &mut Validator) + Send + Sync + 'static,
	{
		let form_value = self.clone();
		Validation::new(move |values, validator| match form_value.post_back_value(values) {
			Some(post_back_value) => handler(post_back_value, validator),
			None => validator.note_error_and_add_message(MISSING_OR_INVALID_MESSAGE),
		})
		.for_element(self.client_id())
	}
}

impl<T> Clone for FormValue<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> fmt::Debug for FormValue<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormValue")
			.field("client_id", &self.inner.client_id)
			.field(
				"page_modification_values",
				&self.inner.page_modification_setters.lock().len(),
			)
			.finish_non_exhaustive()
	}
}

/// A form value whose page modification values must be set before rendering
pub trait PageModificationValueSource: Send + Sync {
	fn set_page_modification_values(&self, values: Option<&PostBackValues>) -> FormResult<()>;
}

impl<T: 'static> PageModificationValueSource for FormValue<T> {
	fn set_page_modification_values(&self, values: Option<&PostBackValues>) -> FormResult<()> {
		FormValue::set_page_modification_values(self, values)
	}
}

/// A form value for a checkbox
///
/// Browsers omit unchecked boxes, so a missing raw value means `false`.
pub fn checkbox_form_value<G>(durable_getter: G, client_id: impl Into<String>) -> FormValue<bool>
where
	G: Fn() -> bool + Send + Sync + 'static,
{
	FormValue::new(
		durable_getter,
		client_id,
		|checked: &bool| checked.then(|| CHECKBOX_RAW_VALUE.to_string()),
		|raw| match raw {
			None => PostBackValueValidationResult::Valid(false),
			Some(CHECKBOX_RAW_VALUE) => PostBackValueValidationResult::Valid(true),
			Some(_) => PostBackValueValidationResult::Invalid,
		},
	)
}

/// A form value for a text control
///
/// A missing raw value is invalid; an empty string is a valid empty value.
pub fn text_form_value<G>(durable_getter: G, client_id: impl Into<String>) -> FormValue<String>
where
	G: Fn() -> String + Send + Sync + 'static,
{
	FormValue::new(
		durable_getter,
		client_id,
		|value: &String| Some(value.clone()),
		|raw| match raw {
			Some(raw) => PostBackValueValidationResult::Valid(raw.to_string()),
			None => PostBackValueValidationResult::Invalid,
		},
	)
}

/// The value browsers post for a checked checkbox without a `value` attribute
pub const CHECKBOX_RAW_VALUE: &str = "on";

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[rstest]
	#[case(true)]
	#[case(false)]
	fn test_checkbox_round_trip(#[case] durable: bool) {
		// Arrange
		let form_value = checkbox_form_value(move || durable, "ewf1");

		// Act
		let raw = form_value.durable_raw_value();
		let result = form_value.validate_raw(raw.as_deref());

		// Assert
		assert_eq!(result, PostBackValueValidationResult::Valid(durable));
	}

	#[rstest]
	#[case(None, PostBackValueValidationResult::Valid(false))]
	#[case(Some("on"), PostBackValueValidationResult::Valid(true))]
	#[case(Some("yes"), PostBackValueValidationResult::Invalid)]
	fn test_checkbox_raw_classification(
		#[case] raw: Option<&str>,
		#[case] expected: PostBackValueValidationResult<bool>,
	) {
		let form_value = checkbox_form_value(|| false, "ewf1");

		assert_eq!(form_value.validate_raw(raw), expected);
	}

	#[rstest]
	fn test_text_absence_is_invalid_but_empty_is_valid() {
		// Arrange
		let form_value = text_form_value(String::new, "ewf1");

		// Act
		let missing = form_value.validate_raw(None);
		let empty = form_value.validate_raw(Some(""));

		// Assert
		assert_eq!(missing, PostBackValueValidationResult::Invalid);
		assert_eq!(empty, PostBackValueValidationResult::Valid(String::new()));
	}

	#[rstest]
	fn test_read_only_value_ignores_posted_data() {
		// Arrange
		let form_value = text_form_value(|| "durable".to_string(), "");
		let values = PostBackValues::new().with_field("", "posted");

		// Act
		let post_back_value = form_value.post_back_value(&values);

		// Assert
		assert!(form_value.is_read_only());
		assert_eq!(
			post_back_value,
			Some(PostBackValue {
				value: "durable".to_string(),
				changed_on_post_back: false
			})
		);
	}

	#[rstest]
	fn test_validation_reports_missing_value_for_element() {
		// Arrange
		let form_value = text_form_value(String::new, "ewf7");
		let handled = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&handled);
		let validation = form_value.create_validation(move |_, _| {
			counter.fetch_add(1, Ordering::SeqCst);
		});
		let mut validator = Validator::new();

		// Act
		validation.run(&PostBackValues::new(), &mut validator);

		// Assert
		assert_eq!(handled.load(Ordering::SeqCst), 0);
		assert_eq!(validation.element_id(), Some("ewf7"));
		assert_eq!(validator.messages(), [MISSING_OR_INVALID_MESSAGE]);
	}

	#[rstest]
	fn test_validation_passes_changed_flag() {
		// Arrange
		let form_value = checkbox_form_value(|| true, "ewf2");
		let seen = Arc::new(Mutex::new(None));
		let sink = Arc::clone(&seen);
		let validation = form_value.create_validation(move |value, _| {
			*sink.lock() = Some(value);
		});

		// Act
		validation.run(&PostBackValues::new(), &mut Validator::new());

		// Assert
		assert_eq!(
			*seen.lock(),
			Some(PostBackValue {
				value: false,
				changed_on_post_back: true
			})
		);
	}

	#[rstest]
	fn test_projector_runs_once_per_render() {
		// Arrange
		let form_value = checkbox_form_value(|| true, "ewf3");
		let page_modification_value = PageModificationValue::new();
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		form_value.add_page_modification_value(&page_modification_value, move |checked| {
			counter.fetch_add(1, Ordering::SeqCst);
			!checked
		});

		// Act
		form_value.set_page_modification_values(None).unwrap();

		// Assert
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert!(!page_modification_value.value().unwrap());
	}

	#[rstest]
	fn test_page_modification_value_uses_posted_value() {
		// Arrange
		let form_value = text_form_value(|| "old".to_string(), "ewf4");
		let length = PageModificationValue::new();
		form_value.add_page_modification_value(&length, |value: &String| value.len());
		let values = PostBackValues::new().with_field("ewf4", "newer");

		// Act
		form_value.set_page_modification_values(Some(&values)).unwrap();

		// Assert
		assert_eq!(length.value().unwrap(), 5);
	}

	proptest! {
		#[test]
		fn test_text_round_trip(durable in ".*") {
			let expected = durable.clone();
			let form_value = text_form_value(move || durable.clone(), "ewf1");

			let raw = form_value.durable_raw_value();
			let result = form_value.validate_raw(raw.as_deref());

			prop_assert_eq!(result, PostBackValueValidationResult::Valid(expected));
		}
	}
}

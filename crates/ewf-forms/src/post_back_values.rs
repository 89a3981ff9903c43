use crate::error::{FormError, FormResult};
use indexmap::IndexMap;

/// The raw values submitted with a post-back
///
/// Field values are keyed by element id. The button value identifies which
/// post-back fired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostBackValues {
	fields: IndexMap<String, String>,
	button_value: Option<String>,
}

impl PostBackValues {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_field(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(id, value);
		self
	}

	pub fn with_button_value(mut self, value: impl Into<String>) -> Self {
		self.button_value = Some(value.into());
		self
	}

	pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
		self.fields.insert(id.into(), value.into());
	}

	/// Parse an `application/x-www-form-urlencoded` request body
	///
	/// The pair named `button_element_name` becomes the button value; every
	/// other pair is a field value.
	///
	/// # Examples
	///
	/// ```
	/// use ewf_forms::PostBackValues;
	///
	/// let values = PostBackValues::from_urlencoded("ewf3=Jane+Doe&ewfButton=save", "ewfButton").unwrap();
	///
	/// assert_eq!(values.raw("ewf3"), Some("Jane Doe"));
	/// assert_eq!(values.button_value(), Some("save"));
	/// assert_eq!(values.raw("ewf4"), None);
	/// ```
	pub fn from_urlencoded(body: &str, button_element_name: &str) -> FormResult<Self> {
		let pairs: Vec<(String, String)> =
			serde_urlencoded::from_str(body).map_err(|e| FormError::InvalidSubmission(e.to_string()))?;

		let mut values = Self::new();
		for (name, value) in pairs {
			if name == button_element_name {
				values.button_value = Some(value);
			} else {
				values.fields.insert(name, value);
			}
		}
		Ok(values)
	}

	/// The raw value posted for an element; `None` when the client sent nothing
	pub fn raw(&self, id: &str) -> Option<&str> {
		self.fields.get(id).map(String::as_str)
	}

	pub fn button_value(&self) -> Option<&str> {
		self.button_value.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_empty_value_is_distinct_from_missing() {
		// Act
		let values = PostBackValues::from_urlencoded("ewf1=&ewf2=x", "ewfButton").unwrap();

		// Assert
		assert_eq!(values.raw("ewf1"), Some(""));
		assert_eq!(values.raw("ewf3"), None);
		assert_eq!(values.button_value(), None);
	}

	#[rstest]
	fn test_percent_encoded_values_are_decoded() {
		let values = PostBackValues::from_urlencoded("ewf1=a%26b%3Dc", "ewfButton").unwrap();

		assert_eq!(values.raw("ewf1"), Some("a&b=c"));
	}
}

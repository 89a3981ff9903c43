//! Client-observable value cells

use crate::error::{FormError, FormResult};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

type ClientDependent = Arc<dyn Fn(&str) -> String + Send + Sync>;

struct State<T> {
	value: Option<T>,
	dependents: Vec<ClientDependent>,
}

/// A value that a control publishes and other controls mirror on the client
///
/// The owning [`FormValue`](crate::FormValue) sets the value once per render
/// pass. Everyone else reads it, or registers a client dependent that turns a
/// JavaScript expression for the live value into statements that update the
/// page without a round trip.
///
/// # Examples
///
/// ```
/// use ewf_forms::PageModificationValue;
///
/// let checked = PageModificationValue::<bool>::new();
/// checked.add_client_dependent(|value| format!("$( '#note' ).toggle( {value} );"));
///
/// assert!(!checked.is_set());
/// assert_eq!(
///     checked.js_modification_statements("this.checked"),
///     "$( '#note' ).toggle( this.checked );"
/// );
/// ```
pub struct PageModificationValue<T> {
	state: Arc<Mutex<State<T>>>,
}

impl<T> PageModificationValue<T> {
	pub fn new() -> Self {
		Self {
			state: Arc::new(Mutex::new(State {
				value: None,
				dependents: Vec::new(),
			})),
		}
	}

	pub fn is_set(&self) -> bool {
		self.state.lock().value.is_some()
	}

	/// Register a client expression that depends on this value
	///
	/// `dependent` receives a JavaScript expression evaluating to the new value
	/// and returns the statements that react to it.
	pub fn add_client_dependent<F>(&self, dependent: F)
	where
		F: Fn(&str) -> String + Send + Sync + 'static,
	{
		self.state.lock().dependents.push(Arc::new(dependent));
	}

	/// The statements of every client dependent, in registration order
	pub fn js_modification_statements(&self, value_expression: &str) -> String {
		let dependents = self.state.lock().dependents.clone();
		let statements: Vec<String> = dependents.iter().map(|dependent| dependent(value_expression)).collect();
		ewf_core::concatenate_with_delimiter(" ", statements.iter().map(String::as_str))
	}

	pub(crate) fn set_value(&self, value: T) -> FormResult<()> {
		let mut state = self.state.lock();
		if state.value.is_some() {
			return Err(FormError::PageModificationValueAlreadySet);
		}
		state.value = Some(value);
		Ok(())
	}
}

impl<T: Clone> PageModificationValue<T> {
	/// The value set during the current render pass
	pub fn value(&self) -> FormResult<T> {
		self.state
			.lock()
			.value
			.clone()
			.ok_or(FormError::PageModificationValueUnset)
	}
}

impl<T> Default for PageModificationValue<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Clone for PageModificationValue<T> {
	fn clone(&self) -> Self {
		Self {
			state: Arc::clone(&self.state),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for PageModificationValue<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.lock();
		f.debug_struct("PageModificationValue")
			.field("value", &state.value)
			.field("dependents", &state.dependents.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_unset_value_is_an_error() {
		let value = PageModificationValue::<String>::new();

		assert!(matches!(value.value(), Err(FormError::PageModificationValueUnset)));
	}

	#[rstest]
	fn test_value_is_set_once() {
		// Arrange
		let value = PageModificationValue::new();

		// Act
		let first = value.set_value(true);
		let second = value.clone().set_value(false);

		// Assert
		assert!(first.is_ok());
		assert!(matches!(second, Err(FormError::PageModificationValueAlreadySet)));
		assert!(value.value().unwrap());
	}

	#[rstest]
	fn test_dependents_join_with_single_space() {
		// Arrange
		let value = PageModificationValue::<String>::new();
		value.add_client_dependent(|expr| format!("a( {expr} );"));
		value.add_client_dependent(|_| String::new());
		value.add_client_dependent(|expr| format!("b( {expr} );"));

		// Act
		let statements = value.js_modification_statements("$( this ).val()");

		// Assert
		assert_eq!(statements, "a( $( this ).val() ); b( $( this ).val() );");
	}
}

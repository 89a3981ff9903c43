//! Post-backs, form state, and validation for ewf pages
//!
//! This crate holds the protocol that lets a tree of controls cooperate on a
//! single form:
//!
//! - [`PostBack`]s are named server round trips carrying data modifications
//! - [`FormAction`]s describe what happens when a control is activated
//! - [`FormState`] scopes default actions and data modifications for nested controls
//! - [`FormValue`] ties a durable value to its posted representation
//! - [`PageModificationValue`] mirrors a control's value to other controls on the client
//! - [`PostBackPipeline`] validates a submission and runs its modifications

pub mod error;
pub mod form_action;
pub mod form_state;
pub mod form_value;
pub mod page_modification_value;
pub mod post_back;
pub mod post_back_values;
pub mod processing;
pub mod registry;
pub mod validation;

pub use error::{FormError, FormResult};
pub use form_action::{CustomFormAction, FormAction, NavigationFormAction, POST_BACK_FUNCTION_NAME, PostBackFormAction};
pub use form_state::{FormState, FormStateFrame};
pub use form_value::{
	CHECKBOX_RAW_VALUE, FormValue, MISSING_OR_INVALID_MESSAGE, PageModificationValueSource, PostBackValue,
	PostBackValueValidationResult, checkbox_form_value, text_form_value,
};
pub use page_modification_value::PageModificationValue;
pub use post_back::{
	ActionGetter, DEFAULT_POST_BACK_ID, DataModificationError, DataModificationMethod, PostBack, PostBackAction,
	PostBackId, PostBackKind,
};
pub use post_back_values::PostBackValues;
pub use processing::{FieldErrors, PostBackOutcome, PostBackPipeline};
pub use registry::PostBackRegistry;
pub use validation::{ErrorCondition, Validation, ValidationErrorHandler, Validator};

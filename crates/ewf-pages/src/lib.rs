//! Server-rendered controls and page handling for ewf
//!
//! A page is built in two phases. Construction runs against a per-request
//! [`BuildContext`]: controls allocate element ids, register their post-backs
//! and validations, and return [`Component`]s. [`render`] then sets every
//! page modification value and turns the component tree into markup and
//! element initialization script.
//!
//! [`PageHandler`] ties both phases to requests: it rebuilds the page for a
//! submission, runs the fired post-back, and decides between re-rendering
//! with errors, rendering a fresh page, and redirecting.
//!
//! ## Controls
//!
//! - [`EwfButton`] and [`SubmitButton`]
//! - [`Checkbox`] and [`FlowCheckbox`]
//! - [`RadioButtonGroup`] and its [`RadioButton`]s and [`FlowRadioButton`]s
//! - [`TextControl`]
//! - [`ConfirmationDialog`]

pub mod button;
pub mod checkbox;
pub mod component;
pub mod confirmation_dialog;
pub mod context;
pub mod error;
pub mod flow;
pub mod page;
pub mod page_modification;
pub mod radio;
pub mod render;
pub mod submit_button;
pub mod text_control;

pub use button::{ButtonBehavior, ButtonSize, ButtonStyle, EwfButton};
pub use checkbox::{Checkbox, CheckboxSetup};
pub use component::{Component, DisplayableElement, ElementLocalData, IntoComponent, MarkupElement};
pub use confirmation_dialog::{ConfirmationDialog, ConfirmationDialogId};
pub use context::{BuildContext, ElementId};
pub use error::{PageError, PageResult};
pub use flow::{FlowCheckbox, FlowCheckboxSetup, FlowRadioButton, FlowRadioButtonSetup};
pub use page::{Page, PageHandler, PageResponse};
pub use page_modification::PageModificationValueExt;
pub use radio::{NO_SELECTION_MESSAGE, RadioButton, RadioButtonGroup, RadioButtonSetup};
pub use render::{ERROR_LIST_CLASS, RenderContext, RenderedPage, render};
pub use submit_button::{SubmitButton, implicit_submission_key_press_statements, key_press_handler};
pub use text_control::{TextControl, TextControlSetup, textarea_value};

//! # ewf
//!
//! A server-rendered forms framework built around post-backs.
//!
//! Pages are constructed fresh for every request. While a page builds, its
//! controls register the post-backs they can fire and the validations that
//! read their posted values. A submission rebuilds the page, validates the
//! values, and runs the fired post-back's data modifications; the page is
//! then rendered again with errors, rendered fresh, or redirected.
//!
//! Controls can also publish their live state to the browser through page
//! modification values, so other parts of the page update as the user types
//! or clicks without a round trip.
//!
//! ## Feature Flags
//!
//! - `core` - Escaping, string and resource primitives
//! - `conf` - Layered framework settings
//! - `forms` - Post-backs, form values and validation
//! - `pages` - Controls, rendering and page handling
//! - `full` (default) - All of the above
//!
//! ## Quick Example
//!
//! ```rust
//! use ewf::prelude::*;
//! use std::sync::Arc;
//!
//! let page = |ctx: &mut BuildContext| -> PageResult<Vec<Component>> {
//!     let name = TextControl::new(ctx, "", false, Some(40), TextControlSetup::create(), |_, _| {})?;
//!     let save = SubmitButton::new(ButtonStyle::standard("Save")).build(ctx)?;
//!     Ok(vec![name.into(), save])
//! };
//! let handler = PageHandler::new(Arc::new(FrameworkSettings::default()));
//!
//! let PageResponse::Html(rendered) = handler.post_urlencoded(&page, "ewf1=&ewfButton=v").unwrap() else {
//!     panic!("expected markup");
//! };
//! assert!(rendered.html.contains("Please enter the text."));
//! ```

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "pages")]
pub mod pages;

#[cfg(feature = "conf")]
pub use ewf_conf::{FrameworkSettings, ImplicitSubmissionMode, SettingsBuilder, SettingsError};

#[cfg(feature = "forms")]
pub use ewf_forms::{
	FormAction, FormError, FormResult, FormValue, PageModificationValue, PostBack, PostBackAction, PostBackValues,
	Validator,
};

#[cfg(feature = "pages")]
pub use ewf_pages::{
	BuildContext, ButtonBehavior, ButtonStyle, Checkbox, CheckboxSetup, Component, ConfirmationDialog,
	ConfirmationDialogId, EwfButton, FlowCheckbox, FlowCheckboxSetup, FlowRadioButtonSetup, Page, PageError,
	PageHandler, PageResponse, PageResult, RadioButtonGroup, RadioButtonSetup, SubmitButton, TextControl,
	TextControlSetup,
};

/// Re-exports for building pages
pub mod prelude {
	#[cfg(feature = "conf")]
	pub use crate::FrameworkSettings;

	#[cfg(feature = "forms")]
	pub use crate::{FormAction, PageModificationValue, PostBack, PostBackAction, PostBackValues, Validator};

	#[cfg(feature = "pages")]
	pub use crate::{
		BuildContext, ButtonBehavior, ButtonStyle, Checkbox, CheckboxSetup, Component, ConfirmationDialog,
		ConfirmationDialogId, EwfButton, FlowCheckbox, FlowCheckboxSetup, FlowRadioButtonSetup, Page, PageHandler,
		PageResponse, PageResult, RadioButtonGroup, RadioButtonSetup, SubmitButton, TextControl, TextControlSetup,
	};
	#[cfg(feature = "pages")]
	pub use ewf_pages::PageModificationValueExt;
}

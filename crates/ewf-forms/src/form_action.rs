//! What happens when a control is activated

use crate::error::FormResult;
use crate::post_back::PostBack;
use crate::registry::PostBackRegistry;
use ewf_core::{ResourceInfo, escape_javascript};

/// The client-side function that submits the form with a post-back id
pub const POST_BACK_FUNCTION_NAME: &str = "postBack";

/// An action that submits the page with a post-back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBackFormAction {
	post_back: PostBack,
}

impl PostBackFormAction {
	pub fn new(post_back: PostBack) -> Self {
		Self { post_back }
	}

	pub fn post_back(&self) -> &PostBack {
		&self.post_back
	}
}

/// An action that sends the browser to another URL without a round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationFormAction {
	url: String,
	opens_new_window: bool,
}

impl NavigationFormAction {
	pub fn new(resource: &dyn ResourceInfo) -> Self {
		Self {
			url: resource.url(),
			opens_new_window: false,
		}
	}

	pub fn with_new_window(mut self, opens_new_window: bool) -> Self {
		self.opens_new_window = opens_new_window;
		self
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn opens_new_window(&self) -> bool {
		self.opens_new_window
	}
}

/// An action that runs arbitrary client script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomFormAction {
	script: String,
}

impl CustomFormAction {
	pub fn new(script: impl Into<String>) -> Self {
		Self {
			script: script.into(),
		}
	}

	pub fn script(&self) -> &str {
		&self.script
	}
}

/// What happens when a control is activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
	PostBack(PostBackFormAction),
	Navigation(NavigationFormAction),
	Custom(CustomFormAction),
}

impl FormAction {
	pub fn navigation(resource: &dyn ResourceInfo) -> Self {
		Self::Navigation(NavigationFormAction::new(resource))
	}

	pub fn custom(script: impl Into<String>) -> Self {
		Self::Custom(CustomFormAction::new(script))
	}

	/// The post-back submitted by this action, if any
	pub fn post_back(&self) -> Option<&PostBack> {
		match self {
			Self::PostBack(action) => Some(action.post_back()),
			_ => None,
		}
	}

	/// The client script that triggers this action
	///
	/// # Examples
	///
	/// ```
	/// use ewf_forms::{FormAction, PostBack};
	///
	/// let action = FormAction::from(PostBack::create_full("save"));
	/// assert_eq!(action.js_statements(), "postBack( 'save' );");
	///
	/// let custom = FormAction::custom("alert( 'hi' );");
	/// assert_eq!(custom.js_statements(), "alert( 'hi' );");
	/// ```
	pub fn js_statements(&self) -> String {
		match self {
			Self::PostBack(action) => format!(
				"{}( '{}' );",
				POST_BACK_FUNCTION_NAME,
				escape_javascript(action.post_back.id().as_str())
			),
			Self::Navigation(action) if action.opens_new_window => {
				format!("window.open( '{}' );", escape_javascript(&action.url))
			}
			Self::Navigation(action) => {
				format!("window.location.href = '{}';", escape_javascript(&action.url))
			}
			Self::Custom(action) => action.script.clone(),
		}
	}

	/// Register the action's post-back with the page unless it already is
	pub fn add_to_page_if_necessary(&self, registry: &mut PostBackRegistry) -> FormResult<()> {
		if let Self::PostBack(action) = self {
			registry.register(&action.post_back)?;
		}
		Ok(())
	}

	/// Attributes that let a `<button>` trigger this action natively
	pub fn attributes(&self, button_element_name: &str) -> Vec<(String, String)> {
		match self {
			Self::PostBack(action) => vec![
				("name".to_string(), button_element_name.to_string()),
				("value".to_string(), action.post_back.id().to_string()),
			],
			Self::Navigation(_) | Self::Custom(_) => Vec::new(),
		}
	}
}

impl From<PostBack> for FormAction {
	fn from(post_back: PostBack) -> Self {
		Self::PostBack(PostBackFormAction::new(post_back))
	}
}

impl From<PostBackFormAction> for FormAction {
	fn from(action: PostBackFormAction) -> Self {
		Self::PostBack(action)
	}
}

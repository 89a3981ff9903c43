//! The settings consumed by page construction and rendering

use crate::builder::SettingsError;
use serde::{Deserialize, Serialize};

/// How Enter-key handlers are written for controls that must not rely on
/// the browser's implicit form submission
///
/// Both modes produce equivalent behavior. `Legacy` reads the global `event`
/// object and cancels by returning `false` after the action's script;
/// `Current` takes the event as a handler parameter and calls
/// `preventDefault()` before the action's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicitSubmissionMode {
	Legacy,
	#[default]
	Current,
}

impl ImplicitSubmissionMode {
	/// The name of the event object inside a key-press handler
	pub fn event_name(self) -> &'static str {
		match self {
			Self::Legacy => "event",
			Self::Current => "e",
		}
	}

	/// The parameter list of a key-press handler function
	pub fn handler_parameters(self) -> &'static str {
		match self {
			Self::Legacy => "",
			Self::Current => " e ",
		}
	}
}

/// Framework-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkSettings {
	/// The form field name that identifies which post-back fired
	pub button_element_name: String,
	/// The value posted by the page's submit button
	pub submit_button_value: String,
	/// Enter-key handler style
	pub implicit_submission: ImplicitSubmissionMode,
	/// Delay before an auto-complete request is sent
	pub auto_complete_delay_ms: u32,
	/// Minimum number of typed characters before auto-complete starts
	pub auto_complete_min_characters: u32,
	/// Prefix of generated element ids
	pub element_id_prefix: String,
}

impl Default for FrameworkSettings {
	fn default() -> Self {
		Self {
			button_element_name: "ewfButton".to_string(),
			submit_button_value: "v".to_string(),
			implicit_submission: ImplicitSubmissionMode::Current,
			auto_complete_delay_ms: 250,
			auto_complete_min_characters: 3,
			element_id_prefix: "ewf".to_string(),
		}
	}
}

impl FrameworkSettings {
	/// Check the settings for values that would produce broken markup
	///
	/// # Examples
	///
	/// ```
	/// use ewf_conf::FrameworkSettings;
	///
	/// assert!(FrameworkSettings::default().validate().is_ok());
	///
	/// let settings = FrameworkSettings {
	///     element_id_prefix: "1abc".to_string(),
	///     ..Default::default()
	/// };
	/// assert!(settings.validate().is_err());
	/// ```
	pub fn validate(&self) -> Result<(), SettingsError> {
		validate_name("button_element_name", &self.button_element_name)?;
		validate_name("submit_button_value", &self.submit_button_value)?;
		validate_name("element_id_prefix", &self.element_id_prefix)?;
		if !self
			.element_id_prefix
			.starts_with(|c: char| c.is_ascii_alphabetic())
		{
			return Err(SettingsError::InvalidValue {
				key: "element_id_prefix".to_string(),
				reason: "must start with an ASCII letter".to_string(),
			});
		}
		if self.auto_complete_min_characters == 0 {
			return Err(SettingsError::InvalidValue {
				key: "auto_complete_min_characters".to_string(),
				reason: "must be at least 1".to_string(),
			});
		}
		Ok(())
	}
}

fn validate_name(key: &str, value: &str) -> Result<(), SettingsError> {
	if value.is_empty() {
		return Err(SettingsError::InvalidValue {
			key: key.to_string(),
			reason: "must not be empty".to_string(),
		});
	}
	if value.chars().any(char::is_whitespace) {
		return Err(SettingsError::InvalidValue {
			key: key.to_string(),
			reason: "must not contain whitespace".to_string(),
		});
	}
	Ok(())
}

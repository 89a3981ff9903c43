//! Single-line and multi-line text controls

use crate::component::{Component, DisplayableElement, ElementLocalData, IntoComponent};
use crate::context::{BuildContext, ElementId};
use crate::error::{PageError, PageResult};
use crate::submit_button::implicit_submission_handler;
use ewf_core::{ResourceInfo, concatenate_with_delimiter, concatenate_with_space, escape_javascript, surround};
use ewf_forms::{
	ErrorCondition, FormAction, FormValue, PageModificationValue, ValidationErrorHandler, Validator, text_form_value,
};
use std::fmt;
use std::sync::Arc;

type ValidationPredicate = Arc<dyn Fn(bool) -> bool + Send + Sync>;
type ValidationErrorNotifier = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
struct AutoComplete {
	resource: Arc<dyn ResourceInfo>,
	triggers_action_when_item_selected: bool,
}

/// The configuration of a text control
#[derive(Clone)]
pub struct TextControlSetup {
	rows: usize,
	read_only: bool,
	classes: Vec<String>,
	placeholder: String,
	auto_fill_tokens: String,
	auto_complete: Option<AutoComplete>,
	checks_spelling_and_grammar: Option<bool>,
	action: Option<FormAction>,
	value_changed_action: Option<FormAction>,
	page_modification_value: Option<PageModificationValue<String>>,
	validation_predicate: Option<ValidationPredicate>,
	validation_error_notifier: Option<ValidationErrorNotifier>,
}

impl TextControlSetup {
	/// A standard single-line text control
	pub fn create() -> Self {
		Self {
			rows: 1,
			read_only: false,
			classes: Vec::new(),
			placeholder: String::new(),
			auto_fill_tokens: String::new(),
			auto_complete: None,
			checks_spelling_and_grammar: None,
			action: None,
			value_changed_action: None,
			page_modification_value: None,
			validation_predicate: None,
			validation_error_notifier: None,
		}
	}

	/// A text control that suggests items from `resource` while the user types
	///
	/// With `triggers_action_when_item_selected`, choosing a suggestion also
	/// runs the control's action.
	pub fn create_auto_complete(resource: Arc<dyn ResourceInfo>, triggers_action_when_item_selected: bool) -> Self {
		Self {
			auto_complete: Some(AutoComplete {
				resource,
				triggers_action_when_item_selected,
			}),
			..Self::create()
		}
	}

	pub fn create_read_only() -> Self {
		Self {
			read_only: true,
			..Self::create()
		}
	}

	/// The number of lines; more than one renders a `textarea`
	pub fn with_rows(mut self, rows: usize) -> Self {
		self.rows = rows;
		self
	}

	pub fn with_classes<I, S>(mut self, classes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.classes.extend(classes.into_iter().map(Into::into));
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	/// Auto-fill detail tokens, or `off` to ask the browser not to auto-fill
	pub fn with_auto_fill_tokens(mut self, tokens: impl Into<String>) -> Self {
		self.auto_fill_tokens = tokens.into();
		self
	}

	pub fn with_spell_check(mut self, checks_spelling_and_grammar: bool) -> Self {
		self.checks_spelling_and_grammar = Some(checks_spelling_and_grammar);
		self
	}

	/// The action run when the user presses Enter; ignored by multi-line controls
	pub fn with_action(mut self, action: FormAction) -> Self {
		self.action = Some(action);
		self
	}

	pub fn with_value_changed_action(mut self, action: FormAction) -> Self {
		self.value_changed_action = Some(action);
		self
	}

	pub fn with_page_modification_value(mut self, page_modification_value: PageModificationValue<String>) -> Self {
		self.page_modification_value = Some(page_modification_value);
		self
	}

	/// Skip validation unless `predicate` accepts the changed-on-post-back flag
	pub fn with_validation_predicate<F>(mut self, predicate: F) -> Self
	where
		F: Fn(bool) -> bool + Send + Sync + 'static,
	{
		self.validation_predicate = Some(Arc::new(predicate));
		self
	}

	/// Called when the value fails the built-in string checks
	pub fn with_validation_error_notifier<F>(mut self, notifier: F) -> Self
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.validation_error_notifier = Some(Arc::new(notifier));
		self
	}
}

impl Default for TextControlSetup {
	fn default() -> Self {
		Self::create()
	}
}

impl fmt::Debug for TextControlSetup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TextControlSetup")
			.field("rows", &self.rows)
			.field("read_only", &self.read_only)
			.field("classes", &self.classes)
			.field("auto_complete", &self.auto_complete.as_ref().map(|a| a.resource.url()))
			.field("action", &self.action)
			.field("value_changed_action", &self.value_changed_action)
			.finish_non_exhaustive()
	}
}

/// A text box
///
/// # Examples
///
/// ```
/// use ewf_conf::FrameworkSettings;
/// use ewf_pages::{BuildContext, TextControl, TextControlSetup, render};
/// use std::sync::Arc;
///
/// let mut ctx = BuildContext::new(Arc::new(FrameworkSettings::default()));
/// let control = TextControl::new(
///     &mut ctx,
///     "Jane",
///     false,
///     Some(50),
///     TextControlSetup::create_read_only(),
///     |_, _| {},
/// )
/// .unwrap();
///
/// let page = render(&ctx, vec![control.into()], None).unwrap();
/// assert_eq!(page.html, "<input type=\"text\" value=\"Jane\" disabled=\"disabled\" />");
/// assert!(ctx.validations().is_empty());
/// ```
pub struct TextControl {
	element_id: ElementId,
	setup: TextControlSetup,
	max_length: Option<usize>,
	action: Option<FormAction>,
	form_value: FormValue<String>,
	page_modification_value: PageModificationValue<String>,
}

impl TextControl {
	/// Construct a text control and register its post-backs and validation
	///
	/// `validation_method` receives the validated string. It does not run when
	/// the value is empty but must not be, or longer than `max_length`.
	pub fn new<H>(
		ctx: &mut BuildContext,
		value: impl Into<String>,
		allow_empty: bool,
		max_length: Option<usize>,
		mut setup: TextControlSetup,
		validation_method: H,
	) -> PageResult<Self>
	where
		H: Fn(String, &mut Validator) + Send + Sync + 'static,
	{
		if setup.rows == 0 {
			return Err(PageError::InvalidRowCount);
		}

		let action = setup
			.action
			.take()
			.or_else(|| ctx.current_frame().default_action().cloned());
		if !setup.read_only {
			let triggers_from_auto_complete = setup
				.auto_complete
				.as_ref()
				.is_some_and(|auto_complete| auto_complete.triggers_action_when_item_selected);
			if setup.rows == 1 || triggers_from_auto_complete {
				if let Some(action) = &action {
					ctx.add_to_page_if_necessary(action)?;
				}
			}
			if let Some(action) = &setup.value_changed_action {
				ctx.add_to_page_if_necessary(action)?;
			}
		}

		let element_id = ctx.next_element_id();
		let value = value.into();
		let client_id = if setup.read_only { "" } else { element_id.as_str() };
		let form_value = text_form_value(move || value.clone(), client_id);
		let page_modification_value = setup.page_modification_value.take().unwrap_or_default();
		form_value.add_page_modification_value(&page_modification_value, String::clone);
		ctx.register_form_value(&form_value);

		if !setup.read_only {
			let predicate = setup.validation_predicate.clone();
			let notifier = setup.validation_error_notifier.clone();
			ctx.add_validation(form_value.create_validation(move |post_back_value, validator| {
				if let Some(predicate) = &predicate {
					if !predicate(post_back_value.changed_on_post_back) {
						return;
					}
				}

				let mut handler = ValidationErrorHandler::new("text");
				let validated = match max_length {
					Some(max_length) => {
						validator.get_string_with_max_length(&mut handler, &post_back_value.value, allow_empty, max_length)
					}
					None => validator.get_string(&mut handler, &post_back_value.value, allow_empty),
				};
				if handler.last_result() != ErrorCondition::NoError {
					if let Some(notifier) = &notifier {
						notifier();
					}
					return;
				}

				validation_method(validated, validator);
			}));
		}

		Ok(Self {
			element_id,
			setup,
			max_length,
			action,
			form_value,
			page_modification_value,
		})
	}

	pub fn element_id(&self) -> &ElementId {
		&self.element_id
	}

	pub fn form_value(&self) -> &FormValue<String> {
		&self.form_value
	}

	pub fn page_modification_value(&self) -> &PageModificationValue<String> {
		&self.page_modification_value
	}
}

impl fmt::Debug for TextControl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TextControl")
			.field("element_id", &self.element_id)
			.field("setup", &self.setup)
			.field("max_length", &self.max_length)
			.field("form_value", &self.form_value)
			.finish_non_exhaustive()
	}
}

impl From<TextControl> for Component {
	fn from(control: TextControl) -> Self {
		control.into_component()
	}
}

impl IntoComponent for TextControl {
	fn into_component(self) -> Component {
		let Self {
			element_id,
			setup,
			max_length,
			action,
			form_value: _,
			page_modification_value,
		} = self;
		let single_line = setup.rows == 1;
		let classes = setup.classes.clone();
		let text_value = page_modification_value.clone();

		let element = DisplayableElement::new(element_id, move |context| {
			let id = context.element_id();
			let value = page_modification_value.value()?;

			let mut attributes = Vec::new();
			if single_line {
				attributes.push(("type".to_string(), "text".to_string()));
			} else {
				attributes.push(("rows".to_string(), setup.rows.to_string()));
			}
			if !setup.read_only {
				attributes.push(("name".to_string(), id.to_string()));
			}
			if single_line {
				attributes.push(("value".to_string(), value));
			}
			if setup.read_only {
				attributes.push(("disabled".to_string(), "disabled".to_string()));
			}
			if !setup.read_only {
				if let Some(max_length) = max_length {
					attributes.push(("maxlength".to_string(), max_length.to_string()));
				}
			}
			if !setup.placeholder.is_empty() {
				attributes.push(("placeholder".to_string(), setup.placeholder.clone()));
			}
			if !setup.auto_fill_tokens.is_empty() {
				attributes.push(("autocomplete".to_string(), setup.auto_fill_tokens.clone()));
			}
			if let Some(checks) = setup.checks_spelling_and_grammar {
				attributes.push(("spellcheck".to_string(), checks.to_string()));
			}
			if context.is_focused() {
				attributes.push(("autofocus".to_string(), "autofocus".to_string()));
			}

			let action_statements = action.as_ref().map(FormAction::js_statements).unwrap_or_default();
			let key_press = match &action {
				Some(action) if single_line && !setup.read_only => {
					implicit_submission_handler(context, action, setup.value_changed_action.is_some())
				}
				_ => String::new(),
			};
			// setTimeout keeps Enter after an edit from firing both handlers at once
			let change = match &setup.value_changed_action {
				Some(value_changed_action) => format!(
					"$( '#{}' ).change( function() {{ setTimeout( function() {{ {} }}, 0 ); }} );",
					id,
					value_changed_action.js_statements()
				),
				None => String::new(),
			};
			let input = surround(
				&page_modification_value.js_modification_statements("$( this ).val()"),
				&format!("$( '#{}' ).on( 'input', function() {{ ", id),
				" } );",
			);
			let auto_complete = setup
				.auto_complete
				.as_ref()
				.map(|auto_complete| {
					let settings = context.settings();
					let mut options = vec![
						format!("delay: {}", settings.auto_complete_delay_ms),
						format!("minLength: {}", settings.auto_complete_min_characters),
						format!("source: '{}'", escape_javascript(&auto_complete.resource.url())),
					];
					if auto_complete.triggers_action_when_item_selected {
						options.push(format!(
							"select: function( event, ui ) {{ {} }}",
							concatenate_with_space(
								&concatenate_with_space(&format!("$( '#{}' ).val( ui.item.value );", id), &action_statements),
								"return false;"
							)
						));
					}
					format!("$( '#{}' ).autocomplete( {{ {} }} );", id, options.join(", "))
				})
				.unwrap_or_default();

			let js_init_statements = if setup.read_only {
				String::new()
			} else {
				concatenate_with_delimiter(" ", [key_press.as_str(), change.as_str(), input.as_str(), auto_complete.as_str()])
			};

			Ok(ElementLocalData::new(if single_line { "input" } else { "textarea" })
				.with_attributes(attributes)
				.with_id_attribute(!js_init_statements.is_empty())
				.with_js_init_statements(js_init_statements))
		})
		.with_classes(classes);

		if single_line {
			element.into()
		} else {
			element
				.with_children([Component::deferred(move || Ok(Component::text(textarea_value(&text_value.value()?))))])
				.into()
		}
	}
}

/// The text content of a `textarea` holding `value`
///
/// Browsers drop a newline directly after the opening tag, so one is added to
/// keep a leading newline in `value`.
pub fn textarea_value(value: &str) -> String {
	format!("\n{value}")
}

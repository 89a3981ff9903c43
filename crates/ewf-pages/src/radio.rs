//! Radio button groups

use crate::component::{Component, DisplayableElement, ElementLocalData, IntoComponent};
use crate::context::{BuildContext, ElementId};
use crate::error::{PageError, PageResult};
use crate::submit_button::implicit_submission_handler;
use ewf_core::{concatenate_with_delimiter, concatenate_with_space, surround};
use ewf_forms::{
	FormAction, FormValue, MISSING_OR_INVALID_MESSAGE, PageModificationValue, PostBackValue,
	PostBackValueValidationResult, Validation, Validator,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// The message recorded when a group that requires a selection has none
pub const NO_SELECTION_MESSAGE: &str = "Please make a selection.";

#[derive(Debug)]
struct GroupButton {
	id: ElementId,
	selected: bool,
	read_only: bool,
	page_modification_value: PageModificationValue<bool>,
}

#[derive(Debug, Default)]
struct GroupState {
	buttons: Vec<GroupButton>,
	single_button_detection_disabled: bool,
}

impl GroupState {
	/// A lone button renders as a checkbox so that it can be cleared
	fn renders_as_checkbox(&self) -> bool {
		self.buttons.len() == 1 && !self.single_button_detection_disabled
	}

	fn interactive_ids(&self) -> impl Iterator<Item = &ElementId> {
		self.buttons.iter().filter(|button| !button.read_only).map(|button| &button.id)
	}

	/// A selection shown by a read-only button is never posted
	fn has_read_only_selection(&self) -> bool {
		self.buttons.iter().any(|button| button.read_only && button.selected)
	}

	/// Statements updating the page modification values of every interactive button
	///
	/// Browsers fire `change` only on the newly selected button, so each button
	/// refreshes the values of its siblings from their current checked state.
	fn modification_statements(&self) -> String {
		let statements: Vec<String> = self
			.buttons
			.iter()
			.filter(|button| !button.read_only)
			.map(|button| {
				button
					.page_modification_value
					.js_modification_statements(&format!("$( '#{}' ).prop( 'checked' )", button.id))
			})
			.collect();
		concatenate_with_delimiter(" ", statements.iter().map(String::as_str))
	}
}

/// A set of radio buttons sharing one posted name
///
/// The group posts the id of the selected button under the group name. It
/// validates the submission as a whole before the validations of its buttons
/// run.
#[derive(Debug, Clone)]
pub struct RadioButtonGroup {
	name: ElementId,
	selection_changed_action: Option<FormAction>,
	state: Arc<Mutex<GroupState>>,
}

impl RadioButtonGroup {
	/// Create a group and register its validation
	///
	/// When `allow_no_selection` is false, a submission without a selection
	/// fails unless the group consists of a single button.
	pub fn new(
		ctx: &mut BuildContext,
		allow_no_selection: bool,
		selection_changed_action: Option<FormAction>,
	) -> PageResult<Self> {
		if let Some(action) = &selection_changed_action {
			ctx.add_to_page_if_necessary(action)?;
		}

		let name = ctx.next_element_id();
		let state = Arc::new(Mutex::new(GroupState::default()));
		let group_name = name.to_string();
		let group_state = Arc::clone(&state);
		ctx.add_validation(Validation::new(move |values, validator| {
			let state = group_state.lock();
			let interactive: Vec<&ElementId> = state.interactive_ids().collect();
			if interactive.is_empty() {
				return;
			}
			match values.raw(&group_name) {
				None => {
					if !allow_no_selection && !state.renders_as_checkbox() && !state.has_read_only_selection() {
						validator.note_error_and_add_message(NO_SELECTION_MESSAGE);
					}
				}
				Some(raw) => {
					if !interactive.iter().any(|id| id.as_str() == raw) {
						validator.note_error_and_add_message(MISSING_OR_INVALID_MESSAGE);
					}
				}
			}
		}));

		Ok(Self {
			name,
			selection_changed_action,
			state,
		})
	}

	/// Always render radio buttons, even when the group has only one
	pub fn disable_single_button_detection(self) -> Self {
		self.state.lock().single_button_detection_disabled = true;
		self
	}

	/// The name the group's buttons post under
	pub fn name(&self) -> &ElementId {
		&self.name
	}

	pub fn selection_changed_action(&self) -> Option<&FormAction> {
		self.selection_changed_action.as_ref()
	}

	/// Construct a button of this group
	///
	/// At most one button of a group may be selected initially.
	pub fn create_radio_button<H>(
		&self,
		ctx: &mut BuildContext,
		value: bool,
		label: impl Into<String>,
		setup: RadioButtonSetup,
		validation_method: H,
	) -> PageResult<RadioButton>
	where
		H: Fn(PostBackValue<bool>, &mut Validator) + Send + Sync + 'static,
	{
		if value && self.state.lock().buttons.iter().any(|button| button.selected) {
			return Err(PageError::MultipleSelectedRadioButtons {
				group: self.name.to_string(),
			});
		}

		let RadioButtonSetup {
			read_only,
			classes,
			action,
			page_modification_value,
		} = setup;
		let action = action.or_else(|| ctx.current_frame().default_action().cloned());
		if !read_only {
			if let Some(action) = &action {
				ctx.add_to_page_if_necessary(action)?;
			}
		}

		let element_id = ctx.next_element_id();
		let client_id = if read_only { String::new() } else { self.name.to_string() };
		let button_id = element_id.to_string();
		let selected_id = button_id.clone();
		let form_value = FormValue::new(
			move || value,
			client_id,
			move |selected: &bool| selected.then(|| selected_id.clone()),
			move |raw| PostBackValueValidationResult::Valid(raw == Some(button_id.as_str())),
		);
		let page_modification_value = page_modification_value.unwrap_or_default();
		form_value.add_page_modification_value(&page_modification_value, |selected| *selected);
		ctx.register_form_value(&form_value);
		if !read_only {
			ctx.add_validation(form_value.create_validation(validation_method));
		}

		self.state.lock().buttons.push(GroupButton {
			id: element_id.clone(),
			selected: value,
			read_only,
			page_modification_value: page_modification_value.clone(),
		});

		Ok(RadioButton {
			element_id,
			label: label.into(),
			classes,
			action,
			group: self.clone(),
			form_value,
			page_modification_value,
		})
	}
}

/// The configuration of a radio button
#[derive(Debug, Clone, Default)]
pub struct RadioButtonSetup {
	read_only: bool,
	classes: Vec<String>,
	action: Option<FormAction>,
	page_modification_value: Option<PageModificationValue<bool>>,
}

impl RadioButtonSetup {
	pub fn create() -> Self {
		Self::default()
	}

	pub fn create_read_only() -> Self {
		Self {
			read_only: true,
			..Self::default()
		}
	}

	pub fn with_classes<I, S>(mut self, classes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.classes.extend(classes.into_iter().map(Into::into));
		self
	}

	/// The action run when the user presses Enter on the button
	pub fn with_action(mut self, action: FormAction) -> Self {
		self.action = Some(action);
		self
	}

	pub fn with_page_modification_value(mut self, page_modification_value: PageModificationValue<bool>) -> Self {
		self.page_modification_value = Some(page_modification_value);
		self
	}
}

/// A labeled button of a [`RadioButtonGroup`]
#[derive(Debug)]
pub struct RadioButton {
	element_id: ElementId,
	label: String,
	classes: Vec<String>,
	action: Option<FormAction>,
	group: RadioButtonGroup,
	form_value: FormValue<bool>,
	page_modification_value: PageModificationValue<bool>,
}

impl RadioButton {
	pub fn element_id(&self) -> &ElementId {
		&self.element_id
	}

	pub fn form_value(&self) -> &FormValue<bool> {
		&self.form_value
	}

	pub fn page_modification_value(&self) -> &PageModificationValue<bool> {
		&self.page_modification_value
	}
}

impl From<RadioButton> for Component {
	fn from(button: RadioButton) -> Self {
		button.into_component()
	}
}

impl IntoComponent for RadioButton {
	fn into_component(self) -> Component {
		let Self {
			element_id,
			label,
			classes,
			action,
			group,
			form_value,
			page_modification_value: _,
		} = self;
		let read_only = form_value.is_read_only();

		let input = DisplayableElement::new(element_id, move |context| {
			let input_type = if group.state.lock().renders_as_checkbox() {
				"checkbox"
			} else {
				"radio"
			};
			let mut attributes = vec![("type".to_string(), input_type.to_string())];
			if !read_only {
				attributes.push(("name".to_string(), group.name.to_string()));
			}
			attributes.push(("value".to_string(), context.element_id().to_string()));
			if form_value.value(context.post_back_values()) {
				attributes.push(("checked".to_string(), "checked".to_string()));
			}
			if read_only {
				attributes.push(("disabled".to_string(), "disabled".to_string()));
			}
			if context.is_focused() {
				attributes.push(("autofocus".to_string(), "autofocus".to_string()));
			}

			let js_init_statements = if read_only {
				String::new()
			} else {
				let key_press = action
					.as_ref()
					.map(|action| implicit_submission_handler(context, action, false))
					.unwrap_or_default();
				let modification_statements = group.state.lock().modification_statements();
				let change_statements = concatenate_with_space(
					&modification_statements,
					&group
						.selection_changed_action
						.as_ref()
						.map(FormAction::js_statements)
						.unwrap_or_default(),
				);
				let change = surround(
					&change_statements,
					&format!("$( '#{}' ).change( function() {{ ", context.element_id()),
					" } );",
				);
				concatenate_with_space(&key_press, &change)
			};

			Ok(ElementLocalData::new("input")
				.with_attributes(attributes)
				.with_id_attribute(!js_init_statements.is_empty())
				.with_js_init_statements(js_init_statements))
		});

		let mut wrapper = Component::markup("label");
		if !classes.is_empty() {
			wrapper = wrapper.attr("class", classes.join(" "));
		}
		wrapper.child(input).child(label).into()
	}
}

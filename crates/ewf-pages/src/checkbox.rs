//! Checkboxes

use crate::component::{Component, DisplayableElement, ElementLocalData, IntoComponent};
use crate::context::{BuildContext, ElementId};
use crate::error::PageResult;
use crate::submit_button::implicit_submission_handler;
use ewf_core::{concatenate_with_space, surround};
use ewf_forms::{FormAction, FormValue, PageModificationValue, PostBackValue, Validator, checkbox_form_value};

/// The configuration of a checkbox
#[derive(Debug, Clone, Default)]
pub struct CheckboxSetup {
	read_only: bool,
	classes: Vec<String>,
	action: Option<FormAction>,
	value_changed_action: Option<FormAction>,
	page_modification_value: Option<PageModificationValue<bool>>,
}

impl CheckboxSetup {
	/// A standard checkbox
	pub fn create() -> Self {
		Self::default()
	}

	/// A checkbox that shows its value but posts nothing
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

	/// The action run when the user presses Enter on the checkbox
	///
	/// Without one, the default action in scope at construction is used.
	pub fn with_action(mut self, action: FormAction) -> Self {
		self.action = Some(action);
		self
	}

	/// The action run when the checked state changes
	pub fn with_value_changed_action(mut self, action: FormAction) -> Self {
		self.value_changed_action = Some(action);
		self
	}

	pub fn with_page_modification_value(mut self, page_modification_value: PageModificationValue<bool>) -> Self {
		self.page_modification_value = Some(page_modification_value);
		self
	}
}

/// A labeled checkbox
///
/// # Examples
///
/// ```
/// use ewf_conf::FrameworkSettings;
/// use ewf_pages::{BuildContext, Checkbox, CheckboxSetup, render};
/// use std::sync::Arc;
///
/// let mut ctx = BuildContext::new(Arc::new(FrameworkSettings::default()));
/// let checkbox = Checkbox::new(&mut ctx, true, "Subscribe", CheckboxSetup::create_read_only(), |_, _| {}).unwrap();
///
/// let page = render(&ctx, vec![checkbox.into()], None).unwrap();
/// assert_eq!(
///     page.html,
///     "<label><input type=\"checkbox\" checked=\"checked\" disabled=\"disabled\" />Subscribe</label>"
/// );
/// ```
#[derive(Debug)]
pub struct Checkbox {
	element_id: ElementId,
	label: String,
	classes: Vec<String>,
	action: Option<FormAction>,
	value_changed_action: Option<FormAction>,
	form_value: FormValue<bool>,
	page_modification_value: PageModificationValue<bool>,
}

impl Checkbox {
	/// Construct a checkbox and register its post-backs and validation
	///
	/// `validation_method` receives the posted value when the checkbox's
	/// post-back data is valid. Read-only checkboxes register nothing.
	pub fn new<H>(
		ctx: &mut BuildContext,
		value: bool,
		label: impl Into<String>,
		setup: CheckboxSetup,
		validation_method: H,
	) -> PageResult<Self>
	where
		H: Fn(PostBackValue<bool>, &mut Validator) + Send + Sync + 'static,
	{
		let CheckboxSetup {
			read_only,
			classes,
			action,
			value_changed_action,
			page_modification_value,
		} = setup;
		let action = action.or_else(|| ctx.current_frame().default_action().cloned());

		if !read_only {
			if let Some(action) = &action {
				ctx.add_to_page_if_necessary(action)?;
			}
			if let Some(action) = &value_changed_action {
				ctx.add_to_page_if_necessary(action)?;
			}
		}

		let element_id = ctx.next_element_id();
		let client_id = if read_only { "" } else { element_id.as_str() };
		let form_value = checkbox_form_value(move || value, client_id);
		let page_modification_value = page_modification_value.unwrap_or_default();
		form_value.add_page_modification_value(&page_modification_value, |checked| *checked);
		ctx.register_form_value(&form_value);
		if !read_only {
			ctx.add_validation(form_value.create_validation(validation_method));
		}

		Ok(Self {
			element_id,
			label: label.into(),
			classes,
			action,
			value_changed_action,
			form_value,
			page_modification_value,
		})
	}

	/// The Enter-key action resolved at construction
	pub fn action(&self) -> Option<&FormAction> {
		self.action.as_ref()
	}

	pub fn form_value(&self) -> &FormValue<bool> {
		&self.form_value
	}

	pub fn page_modification_value(&self) -> &PageModificationValue<bool> {
		&self.page_modification_value
	}

	pub fn element_id(&self) -> &ElementId {
		&self.element_id
	}

	/// Build content that belongs to this checkbox
	///
	/// Inside `body` the checkbox's value-changed action, when it has one, is
	/// the default action.
	pub fn nested_content<R>(&self, ctx: &mut BuildContext, body: impl FnOnce(&mut BuildContext) -> R) -> R {
		match &self.value_changed_action {
			Some(action) => ctx.execute_with_default_action(action.clone(), body),
			None => body(ctx),
		}
	}
}

impl From<Checkbox> for Component {
	fn from(checkbox: Checkbox) -> Self {
		checkbox.into_component()
	}
}

impl IntoComponent for Checkbox {
	fn into_component(self) -> Component {
		let Self {
			element_id,
			label,
			classes,
			action,
			value_changed_action,
			form_value,
			page_modification_value,
		} = self;
		let read_only = form_value.is_read_only();

		let input = DisplayableElement::new(element_id, move |context| {
			let mut attributes = vec![("type".to_string(), "checkbox".to_string())];
			if !read_only {
				attributes.push(("name".to_string(), context.element_id().to_string()));
			}
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
				let change_statements = concatenate_with_space(
					&page_modification_value.js_modification_statements("this.checked"),
					&value_changed_action
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

//! Checkboxes and radio buttons that carry nested content
//!
//! A flow control renders inside a container block. Its nested content is
//! shown only while the control is checked, unless it is configured to be
//! always displayed, and the container can be highlighted while checked. Both
//! follow the control's page modification value, so they update on the client
//! without a post-back.

use crate::checkbox::{Checkbox, CheckboxSetup};
use crate::component::{Component, DisplayableElement, ElementLocalData, IntoComponent};
use crate::context::{BuildContext, ElementId};
use crate::error::PageResult;
use crate::radio::{RadioButton, RadioButtonGroup, RadioButtonSetup};
use ewf_forms::{PageModificationValue, PostBackValue, Validator};
use std::fmt;
use std::sync::Arc;

pub const FLOW_CONTAINER_CLASS: &str = "ewfFlowCheckbox";
pub const FLOW_CHECKED_CLASS: &str = "ewfFlowCheckboxChecked";
pub const NESTED_CONTENT_CLASS: &str = "ewfFlowCheckboxNestedContent";

type NestedContentGetter = Arc<dyn Fn(&mut BuildContext) -> PageResult<Vec<Component>> + Send + Sync>;

#[derive(Clone, Default)]
struct FlowOptions {
	highlighted_when_checked: bool,
	nested_content: Option<NestedContentGetter>,
	nested_content_always_displayed: bool,
}

impl fmt::Debug for FlowOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FlowOptions")
			.field("highlighted_when_checked", &self.highlighted_when_checked)
			.field("has_nested_content", &self.nested_content.is_some())
			.field("nested_content_always_displayed", &self.nested_content_always_displayed)
			.finish()
	}
}

macro_rules! flow_option_builders {
	() => {
		/// Highlight the container while the control is checked
		pub fn with_highlighting_when_checked(mut self) -> Self {
			self.options.highlighted_when_checked = true;
			self
		}

		/// Content built below the control
		///
		/// The getter runs during construction, after the control itself.
		pub fn with_nested_content<F>(mut self, getter: F) -> Self
		where
			F: Fn(&mut BuildContext) -> PageResult<Vec<Component>> + Send + Sync + 'static,
		{
			self.options.nested_content = Some(Arc::new(getter));
			self
		}

		/// Show the nested content whether or not the control is checked
		pub fn with_nested_content_always_displayed(mut self) -> Self {
			self.options.nested_content_always_displayed = true;
			self
		}
	};
}

/// The configuration of a [`FlowCheckbox`]
#[derive(Debug, Clone, Default)]
pub struct FlowCheckboxSetup {
	checkbox: CheckboxSetup,
	options: FlowOptions,
}

impl FlowCheckboxSetup {
	pub fn create() -> Self {
		Self::default()
	}

	/// Start from the configuration of the checkbox itself
	pub fn from_checkbox_setup(checkbox: CheckboxSetup) -> Self {
		Self {
			checkbox,
			options: FlowOptions::default(),
		}
	}

	flow_option_builders!();
}

/// The configuration of a [`FlowRadioButton`]
#[derive(Debug, Clone, Default)]
pub struct FlowRadioButtonSetup {
	radio_button: RadioButtonSetup,
	options: FlowOptions,
}

impl FlowRadioButtonSetup {
	pub fn create() -> Self {
		Self::default()
	}

	/// Start from the configuration of the radio button itself
	pub fn from_radio_button_setup(radio_button: RadioButtonSetup) -> Self {
		Self {
			radio_button,
			options: FlowOptions::default(),
		}
	}

	flow_option_builders!();
}

#[derive(Debug)]
struct NestedContent {
	id: ElementId,
	components: Vec<Component>,
	always_displayed: bool,
}

/// The container block around a flow control
#[derive(Debug)]
struct FlowLayout {
	container_id: Option<ElementId>,
	nested: Option<NestedContent>,
	checked: PageModificationValue<bool>,
}

impl FlowLayout {
	fn new(
		ctx: &mut BuildContext,
		checked: &PageModificationValue<bool>,
		options: &FlowOptions,
		nested_components: Option<Vec<Component>>,
	) -> Self {
		let nested = nested_components.map(|components| {
			let id = ctx.next_element_id();
			if !options.nested_content_always_displayed {
				let selector = id.to_string();
				checked.add_client_dependent(move |expression| format!("$( '#{selector}' ).toggle( {expression} );"));
			}
			NestedContent {
				id,
				components,
				always_displayed: options.nested_content_always_displayed,
			}
		});

		let container_id = options.highlighted_when_checked.then(|| {
			let id = ctx.next_element_id();
			let selector = id.to_string();
			checked.add_client_dependent(move |expression| {
				format!("$( '#{selector}' ).toggleClass( '{FLOW_CHECKED_CLASS}', {expression} );")
			});
			id
		});

		Self {
			container_id,
			nested,
			checked: checked.clone(),
		}
	}

	fn wrap(self, control: Component) -> Component {
		let nested = match self.nested {
			Some(NestedContent {
				id,
				components,
				always_displayed,
			}) => {
				let checked = self.checked.clone();
				DisplayableElement::new(id, move |_| {
					let mut attributes = vec![("class".to_string(), NESTED_CONTENT_CLASS.to_string())];
					if !always_displayed && !checked.value()? {
						attributes.push(("style".to_string(), "display: none".to_string()));
					}
					Ok(ElementLocalData::new("div")
						.with_attributes(attributes)
						.with_id_attribute(!always_displayed))
				})
				.with_children(components)
				.into()
			}
			None => Component::empty(),
		};

		match self.container_id {
			Some(id) => {
				let checked = self.checked;
				DisplayableElement::new(id, move |_| {
					let class = if checked.value()? {
						format!("{FLOW_CONTAINER_CLASS} {FLOW_CHECKED_CLASS}")
					} else {
						FLOW_CONTAINER_CLASS.to_string()
					};
					Ok(ElementLocalData::new("div")
						.with_attributes(vec![("class".to_string(), class)])
						.with_id_attribute(true))
				})
				.with_children([control, nested])
				.into()
			}
			None => Component::markup("div")
				.attr("class", FLOW_CONTAINER_CLASS)
				.child(control)
				.child(nested)
				.into(),
		}
	}
}

/// A checkbox in a block with optional nested content
///
/// # Examples
///
/// ```
/// use ewf_conf::FrameworkSettings;
/// use ewf_pages::{BuildContext, Component, FlowCheckbox, FlowCheckboxSetup, render};
/// use std::sync::Arc;
///
/// let mut ctx = BuildContext::new(Arc::new(FrameworkSettings::default()));
/// let setup = FlowCheckboxSetup::create().with_nested_content(|_| Ok(vec![Component::text("Weekly digest")]));
/// let checkbox = FlowCheckbox::new(&mut ctx, true, "Subscribe", setup, |_, _| {}).unwrap();
///
/// let page = render(&ctx, vec![checkbox.into()], None).unwrap();
/// assert!(page.html.ends_with("<div id=\"ewf2\" class=\"ewfFlowCheckboxNestedContent\">Weekly digest</div></div>"));
/// ```
#[derive(Debug)]
pub struct FlowCheckbox {
	checkbox: Checkbox,
	layout: FlowLayout,
}

impl FlowCheckbox {
	/// Construct the checkbox, then its nested content
	///
	/// The nested content is built with the checkbox's value-changed action,
	/// when it has one, as the default action.
	pub fn new<H>(
		ctx: &mut BuildContext,
		value: bool,
		label: impl Into<String>,
		setup: FlowCheckboxSetup,
		validation_method: H,
	) -> PageResult<Self>
	where
		H: Fn(PostBackValue<bool>, &mut Validator) + Send + Sync + 'static,
	{
		let FlowCheckboxSetup { checkbox, options } = setup;
		let checkbox = Checkbox::new(ctx, value, label, checkbox, validation_method)?;
		let nested_components = match &options.nested_content {
			Some(getter) => Some(checkbox.nested_content(ctx, |ctx| getter(ctx))?),
			None => None,
		};
		let layout = FlowLayout::new(ctx, checkbox.page_modification_value(), &options, nested_components);
		Ok(Self { checkbox, layout })
	}

	pub fn checkbox(&self) -> &Checkbox {
		&self.checkbox
	}
}

impl From<FlowCheckbox> for Component {
	fn from(checkbox: FlowCheckbox) -> Self {
		checkbox.into_component()
	}
}

impl IntoComponent for FlowCheckbox {
	fn into_component(self) -> Component {
		self.layout.wrap(self.checkbox.into_component())
	}
}

/// A radio button in a block with optional nested content
#[derive(Debug)]
pub struct FlowRadioButton {
	radio_button: RadioButton,
	layout: FlowLayout,
}

impl FlowRadioButton {
	pub fn radio_button(&self) -> &RadioButton {
		&self.radio_button
	}
}

impl From<FlowRadioButton> for Component {
	fn from(button: FlowRadioButton) -> Self {
		button.into_component()
	}
}

impl IntoComponent for FlowRadioButton {
	fn into_component(self) -> Component {
		self.layout.wrap(self.radio_button.into_component())
	}
}

impl RadioButtonGroup {
	/// Construct a button of this group with nested content
	///
	/// The nested content is built with the group's selection-changed action,
	/// when it has one, as the default action.
	pub fn create_flow_radio_button<H>(
		&self,
		ctx: &mut BuildContext,
		value: bool,
		label: impl Into<String>,
		setup: FlowRadioButtonSetup,
		validation_method: H,
	) -> PageResult<FlowRadioButton>
	where
		H: Fn(PostBackValue<bool>, &mut Validator) + Send + Sync + 'static,
	{
		let FlowRadioButtonSetup { radio_button, options } = setup;
		let radio_button = self.create_radio_button(ctx, value, label, radio_button, validation_method)?;
		let nested_components = match &options.nested_content {
			Some(getter) => Some(match self.selection_changed_action() {
				Some(action) => ctx.execute_with_default_action(action.clone(), |ctx| getter(ctx))?,
				None => getter(ctx)?,
			}),
			None => None,
		};
		let layout = FlowLayout::new(ctx, radio_button.page_modification_value(), &options, nested_components);
		Ok(FlowRadioButton { radio_button, layout })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::render;
	use ewf_conf::FrameworkSettings;
	use ewf_forms::{FormAction, PostBack};
	use parking_lot::Mutex;
	use rstest::{fixture, rstest};

	#[fixture]
	fn ctx() -> BuildContext {
		BuildContext::new(Arc::new(FrameworkSettings::default()))
	}

	fn details(_: &mut BuildContext) -> PageResult<Vec<Component>> {
		Ok(vec![Component::text("Details")])
	}

	#[rstest]
	fn test_nested_content_hidden_until_checked(mut ctx: BuildContext) {
		// Arrange
		let setup = FlowCheckboxSetup::create().with_nested_content(details);
		let checkbox = FlowCheckbox::new(&mut ctx, false, "Subscribe", setup, |_, _| {}).unwrap();

		// Act
		let page = render(&ctx, vec![checkbox.into()], None).unwrap();

		// Assert
		assert_eq!(
			page.html,
			"<div class=\"ewfFlowCheckbox\"><label><input id=\"ewf1\" type=\"checkbox\" name=\"ewf1\" />Subscribe</label>\
			 <div id=\"ewf2\" class=\"ewfFlowCheckboxNestedContent\" style=\"display: none\">Details</div></div>"
		);
		assert!(
			page.js_init_statements
				.ends_with("$( '#ewf1' ).change( function() { $( '#ewf2' ).toggle( this.checked ); } );")
		);
	}

	#[rstest]
	fn test_always_displayed_content_is_not_toggled(mut ctx: BuildContext) {
		// Arrange
		let setup = FlowCheckboxSetup::create()
			.with_nested_content(details)
			.with_nested_content_always_displayed();
		let checkbox = FlowCheckbox::new(&mut ctx, false, "Subscribe", setup, |_, _| {}).unwrap();

		// Act
		let page = render(&ctx, vec![checkbox.into()], None).unwrap();

		// Assert
		assert!(page.html.ends_with("<div class=\"ewfFlowCheckboxNestedContent\">Details</div></div>"));
		assert!(!page.js_init_statements.contains(".change("));
	}

	#[rstest]
	fn test_highlighted_container_follows_checked_state(mut ctx: BuildContext) {
		// Arrange
		let setup = FlowCheckboxSetup::create().with_highlighting_when_checked();
		let checkbox = FlowCheckbox::new(&mut ctx, true, "Subscribe", setup, |_, _| {}).unwrap();

		// Act
		let page = render(&ctx, vec![checkbox.into()], None).unwrap();

		// Assert
		assert_eq!(
			page.html,
			"<div id=\"ewf2\" class=\"ewfFlowCheckbox ewfFlowCheckboxChecked\">\
			 <label><input id=\"ewf1\" type=\"checkbox\" name=\"ewf1\" checked=\"checked\" />Subscribe</label></div>"
		);
		assert!(page.js_init_statements.ends_with(
			"$( '#ewf1' ).change( function() { $( '#ewf2' ).toggleClass( 'ewfFlowCheckboxChecked', this.checked ); } );"
		));
	}

	#[rstest]
	fn test_nested_content_uses_value_changed_action(mut ctx: BuildContext) {
		// Arrange
		let refresh = FormAction::from(PostBack::create_intermediate(None, "refresh"));
		let seen = Arc::new(Mutex::new(None));
		let sink = Arc::clone(&seen);
		let setup = FlowCheckboxSetup::from_checkbox_setup(CheckboxSetup::create().with_value_changed_action(refresh.clone()))
			.with_nested_content(move |ctx| {
				*sink.lock() = ctx.current_frame().default_action().cloned();
				Ok(Vec::new())
			});

		// Act
		FlowCheckbox::new(&mut ctx, false, "Subscribe", setup, |_, _| {}).unwrap();

		// Assert
		assert_eq!(*seen.lock(), Some(refresh));
	}

	#[rstest]
	fn test_flow_radio_button_toggles_from_sibling(mut ctx: BuildContext) {
		// Arrange
		let group = RadioButtonGroup::new(&mut ctx, false, None).unwrap();
		let first = group
			.create_flow_radio_button(
				&mut ctx,
				false,
				"First",
				FlowRadioButtonSetup::create().with_nested_content(details),
				|_, _| {},
			)
			.unwrap();
		let second = group
			.create_radio_button(&mut ctx, true, "Second", RadioButtonSetup::create(), |_, _| {})
			.unwrap();

		// Act
		let page = render(&ctx, vec![first.into(), second.into()], None).unwrap();

		// Assert
		assert!(page.html.contains("<div id=\"ewf3\" class=\"ewfFlowCheckboxNestedContent\" style=\"display: none\">"));
		assert!(page.js_init_statements.contains(
			"$( '#ewf4' ).change( function() { $( '#ewf3' ).toggle( $( '#ewf2' ).prop( 'checked' ) ); } );"
		));
	}
}

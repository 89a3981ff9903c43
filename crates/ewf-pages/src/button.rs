//! Buttons that run a form action, a post-back, or custom script

use crate::component::{Component, DisplayableElement, ElementLocalData};
use crate::context::BuildContext;
use crate::error::PageResult;
use ewf_core::surround;
use ewf_forms::{FormAction, FormError, PostBack};

/// Size of a standard button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
	ShrinkWrap,
	#[default]
	Normal,
	Large,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ButtonKind {
	Standard(ButtonSize),
	Text,
}

/// The look of a button: its label and the classes the styling layer expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonStyle {
	kind: ButtonKind,
	text: String,
	classes: Vec<String>,
}

impl ButtonStyle {
	/// A standard button
	///
	/// # Examples
	///
	/// ```
	/// use ewf_pages::{ButtonSize, ButtonStyle};
	///
	/// let style = ButtonStyle::standard("Save").with_size(ButtonSize::Large);
	/// assert_eq!(style.classes(), vec!["ewfStandardButton", "ewfButtonLarge"]);
	/// ```
	pub fn standard(text: impl Into<String>) -> Self {
		Self {
			kind: ButtonKind::Standard(ButtonSize::Normal),
			text: text.into(),
			classes: Vec::new(),
		}
	}

	/// A button that looks like a link
	pub fn text(text: impl Into<String>) -> Self {
		Self {
			kind: ButtonKind::Text,
			text: text.into(),
			classes: Vec::new(),
		}
	}

	/// Set the size of a standard button; text buttons have no size
	pub fn with_size(mut self, size: ButtonSize) -> Self {
		if let ButtonKind::Standard(current) = &mut self.kind {
			*current = size;
		}
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

	pub fn classes(&self) -> Vec<String> {
		let mut classes = match self.kind {
			ButtonKind::Standard(size) => vec![
				"ewfStandardButton".to_string(),
				match size {
					ButtonSize::ShrinkWrap => "ewfButtonShrinkWrap",
					ButtonSize::Normal => "ewfButtonNormal",
					ButtonSize::Large => "ewfButtonLarge",
				}
				.to_string(),
			],
			ButtonKind::Text => vec!["ewfTextButton".to_string()],
		};
		classes.extend(self.classes.iter().cloned());
		classes
	}

	pub fn children(&self) -> Vec<Component> {
		vec![Component::text(self.text.clone())]
	}
}

/// What a button does when clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonBehavior {
	/// Run a form action; `None` uses the current default action
	Action(Option<FormAction>),
	/// Submit a post-back; `None` uses the first data modification in scope
	PostBack(Option<PostBack>),
	/// Run client script
	Custom(String),
}

impl Default for ButtonBehavior {
	fn default() -> Self {
		Self::Action(None)
	}
}

impl ButtonBehavior {
	fn resolve(self, ctx: &BuildContext) -> PageResult<FormAction> {
		let frame = ctx.current_frame();
		let action = match self {
			Self::Action(Some(action)) => action,
			Self::Action(None) => frame
				.default_action()
				.cloned()
				.ok_or(FormError::NoDataModificationInScope)?,
			Self::PostBack(Some(post_back)) => FormAction::from(post_back),
			Self::PostBack(None) => frame
				.post_back()
				.cloned()
				.map(FormAction::from)
				.ok_or(FormError::NoDataModificationInScope)?,
			Self::Custom(script) => FormAction::custom(script),
		};
		Ok(action)
	}
}

/// A `type="button"` button
#[derive(Debug, Clone)]
pub struct EwfButton {
	style: ButtonStyle,
	behavior: ButtonBehavior,
	classes: Vec<String>,
	focused: bool,
}

impl EwfButton {
	pub fn new(style: ButtonStyle) -> Self {
		Self {
			style,
			behavior: ButtonBehavior::default(),
			classes: Vec::new(),
			focused: false,
		}
	}

	pub fn with_behavior(mut self, behavior: ButtonBehavior) -> Self {
		self.behavior = behavior;
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

	pub fn with_focus(mut self, focused: bool) -> Self {
		self.focused = focused;
		self
	}

	pub fn build(self, ctx: &mut BuildContext) -> PageResult<Component> {
		let action = self.behavior.resolve(ctx)?;
		ctx.add_to_page_if_necessary(&action)?;

		let id = ctx.next_element_id();
		if self.focused {
			ctx.set_focus(&id);
		}
		let element = DisplayableElement::new(id, move |context| {
			let mut attributes = vec![("type".to_string(), "button".to_string())];
			attributes.extend(action.attributes(&context.settings().button_element_name));
			if context.is_focused() {
				attributes.push(("autofocus".to_string(), "autofocus".to_string()));
			}
			let js_init_statements = surround(
				&action.js_statements(),
				&format!("$( '#{}' ).click( function() {{ ", context.element_id()),
				" } );",
			);
			Ok(ElementLocalData::new("button")
				.with_attributes(attributes)
				.with_id_attribute(!js_init_statements.is_empty())
				.with_js_init_statements(js_init_statements))
		})
		.with_classes(self.style.classes())
		.with_classes(self.classes)
		.with_children(self.style.children());
		Ok(element.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::render;
	use ewf_conf::FrameworkSettings;
	use rstest::{fixture, rstest};
	use std::sync::Arc;

	#[fixture]
	fn ctx() -> BuildContext {
		BuildContext::new(Arc::new(FrameworkSettings::default()))
	}

	#[rstest]
	fn test_default_behavior_uses_default_action(mut ctx: BuildContext) {
		// Arrange
		let button = EwfButton::new(ButtonStyle::text("Go")).build(&mut ctx).unwrap();

		// Act
		let page = render(&ctx, vec![button], None).unwrap();

		// Assert
		assert_eq!(
			page.html,
			"<button id=\"ewf1\" class=\"ewfTextButton\" type=\"button\" name=\"ewfButton\" value=\"main\">Go</button>"
		);
		assert_eq!(
			page.js_init_statements,
			"$( '#ewf1' ).click( function() { postBack( 'main' ); } );"
		);
		assert!(ctx.post_backs().contains("main"));
	}

	#[rstest]
	fn test_custom_behavior_registers_nothing(mut ctx: BuildContext) {
		// Arrange
		let button = EwfButton::new(ButtonStyle::standard("Close").with_size(ButtonSize::ShrinkWrap))
			.with_behavior(ButtonBehavior::Custom("close();".to_string()))
			.with_focus(true)
			.build(&mut ctx)
			.unwrap();

		// Act
		let page = render(&ctx, vec![button], None).unwrap();

		// Assert
		assert_eq!(
			page.html,
			"<button id=\"ewf1\" class=\"ewfStandardButton ewfButtonShrinkWrap\" type=\"button\" autofocus=\"autofocus\">Close</button>"
		);
		assert!(ctx.post_backs().is_empty());
	}

	#[rstest]
	fn test_post_back_behavior_uses_scope(mut ctx: BuildContext) {
		// Arrange
		let delete = PostBack::create_full("delete");

		// Act
		let result = ctx.execute_with_data_modifications_and_default_action(vec![delete], |ctx| {
			EwfButton::new(ButtonStyle::standard("Delete"))
				.with_behavior(ButtonBehavior::PostBack(None))
				.build(ctx)
		});

		// Assert
		assert!(result.is_ok());
		assert!(ctx.post_backs().contains("delete"));
	}
}

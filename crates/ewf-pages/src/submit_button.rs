//! The page's submit button and Enter-key handling for form controls

use crate::button::ButtonStyle;
use crate::component::{Component, DisplayableElement, ElementLocalData};
use crate::context::BuildContext;
use crate::error::PageResult;
use crate::render::RenderContext;
use ewf_conf::ImplicitSubmissionMode;
use ewf_core::{concatenate_with_space, prepend_delimiter, surround};
use ewf_forms::{FormAction, FormError, PostBack};

/// Key-press statements that make Enter trigger `action` on a form control
///
/// When `action` submits the submit button's post-back, the browser's
/// implicit submission already clicks the submit button, so no statements are
/// produced unless `force_js_handling` is set. Otherwise the statements check
/// for Enter (and `predicate`, if any), cancel the native submission, and run
/// the action's script.
///
/// # Examples
///
/// ```
/// use ewf_conf::ImplicitSubmissionMode;
/// use ewf_forms::{FormAction, PostBack};
/// use ewf_pages::implicit_submission_key_press_statements;
///
/// let save = PostBack::create_full("save");
/// let action = FormAction::from(save.clone());
///
/// assert_eq!(
///     implicit_submission_key_press_statements(&action, false, "", ImplicitSubmissionMode::Current, Some(&save)),
///     ""
/// );
/// assert_eq!(
///     implicit_submission_key_press_statements(&action, false, "", ImplicitSubmissionMode::Current, None),
///     "if( e.which == 13 ) { e.preventDefault(); postBack( 'save' ); }"
/// );
/// assert_eq!(
///     implicit_submission_key_press_statements(&action, true, "ready", ImplicitSubmissionMode::Legacy, Some(&save)),
///     "if( event.which == 13 && ready ) { postBack( 'save' ); return false; }"
/// );
/// ```
pub fn implicit_submission_key_press_statements(
	action: &FormAction,
	force_js_handling: bool,
	predicate: &str,
	mode: ImplicitSubmissionMode,
	submit_button_post_back: Option<&PostBack>,
) -> String {
	let submits_with_button = action
		.post_back()
		.is_some_and(|post_back| Some(post_back) == submit_button_post_back);
	if submits_with_button && !force_js_handling {
		return String::new();
	}

	let condition = format!(
		"{}.which == 13{}",
		mode.event_name(),
		prepend_delimiter(predicate, " && ")
	);
	let action_statements = action.js_statements();
	let body = match mode {
		ImplicitSubmissionMode::Legacy => concatenate_with_space(&action_statements, "return false;"),
		ImplicitSubmissionMode::Current => concatenate_with_space("e.preventDefault();", &action_statements),
	};
	format!("if( {} ) {{ {} }}", condition, body)
}

/// Wrap key-press statements in a jQuery `keypress` handler for an element
///
/// Produces nothing when `statements` is empty.
pub fn key_press_handler(element_id: &str, statements: &str, mode: ImplicitSubmissionMode) -> String {
	surround(
		statements,
		&format!(
			"$( '#{}' ).keypress( function({}) {{ ",
			element_id,
			mode.handler_parameters()
		),
		" } );",
	)
}

/// The complete Enter-key handler for the element being rendered
pub(crate) fn implicit_submission_handler(context: &RenderContext<'_>, action: &FormAction, force_js_handling: bool) -> String {
	let mode = context.implicit_submission_mode();
	let statements = implicit_submission_key_press_statements(
		action,
		force_js_handling,
		"",
		mode,
		context.submit_button_post_back(),
	);
	key_press_handler(context.element_id().as_str(), &statements, mode)
}

/// A button that submits the form natively
///
/// A page has at most one submit button; form controls whose action is the
/// submit button's post-back rely on the browser's implicit submission.
#[derive(Debug, Clone)]
pub struct SubmitButton {
	style: ButtonStyle,
	post_back: Option<PostBack>,
	classes: Vec<String>,
	focused: bool,
}

impl SubmitButton {
	pub fn new(style: ButtonStyle) -> Self {
		Self {
			style,
			post_back: None,
			classes: Vec::new(),
			focused: false,
		}
	}

	/// Submit `post_back` instead of the first data modification in scope
	pub fn with_post_back(mut self, post_back: PostBack) -> Self {
		self.post_back = Some(post_back);
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

	/// Construct the button, claiming the page's submit-button slot
	pub fn build(self, ctx: &mut BuildContext) -> PageResult<Component> {
		let post_back = match self.post_back {
			Some(post_back) => post_back,
			None => ctx
				.current_frame()
				.post_back()
				.cloned()
				.ok_or(FormError::NoDataModificationInScope)?,
		};
		ctx.add_to_page_if_necessary(&FormAction::from(post_back.clone()))?;
		ctx.claim_submit_button(&post_back)?;

		let id = ctx.next_element_id();
		if self.focused {
			ctx.set_focus(&id);
		}
		let element = DisplayableElement::new(id, |context| {
			let settings = context.settings();
			let mut attributes = vec![
				("name".to_string(), settings.button_element_name.clone()),
				("value".to_string(), settings.submit_button_value.clone()),
			];
			if context.is_focused() {
				attributes.push(("autofocus".to_string(), "autofocus".to_string()));
			}
			Ok(ElementLocalData::new("button").with_attributes(attributes))
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
	use crate::error::PageError;
	use crate::render::render;
	use ewf_conf::FrameworkSettings;
	use rstest::{fixture, rstest};
	use std::sync::Arc;

	#[fixture]
	fn ctx() -> BuildContext {
		BuildContext::new(Arc::new(FrameworkSettings::default()))
	}

	#[rstest]
	#[case(ImplicitSubmissionMode::Current, "if( e.which == 13 ) { e.preventDefault(); go(); }")]
	#[case(ImplicitSubmissionMode::Legacy, "if( event.which == 13 ) { go(); return false; }")]
	fn test_statements_for_custom_action(#[case] mode: ImplicitSubmissionMode, #[case] expected: &str) {
		// Arrange
		let action = FormAction::custom("go();");

		// Act
		let statements = implicit_submission_key_press_statements(&action, false, "", mode, None);

		// Assert
		assert_eq!(statements, expected);
	}

	#[rstest]
	fn test_other_post_back_still_gets_handler() {
		// Arrange
		let submit = PostBack::create_full("save");
		let action = FormAction::from(PostBack::create_full("search"));

		// Act
		let statements =
			implicit_submission_key_press_statements(&action, false, "", ImplicitSubmissionMode::Current, Some(&submit));

		// Assert
		assert_eq!(statements, "if( e.which == 13 ) { e.preventDefault(); postBack( 'search' ); }");
	}

	#[rstest]
	#[case(ImplicitSubmissionMode::Current, "$( '#ewf1' ).keypress( function( e ) { x(); } );")]
	#[case(ImplicitSubmissionMode::Legacy, "$( '#ewf1' ).keypress( function() { x(); } );")]
	fn test_key_press_handler(#[case] mode: ImplicitSubmissionMode, #[case] expected: &str) {
		assert_eq!(key_press_handler("ewf1", "x();", mode), expected);
		assert_eq!(key_press_handler("ewf1", "", mode), "");
	}

	#[rstest]
	fn test_submit_button_markup(mut ctx: BuildContext) {
		// Arrange
		let button = SubmitButton::new(ButtonStyle::standard("Save")).build(&mut ctx).unwrap();

		// Act
		let page = render(&ctx, vec![button], None).unwrap();

		// Assert
		assert_eq!(
			page.html,
			"<button class=\"ewfStandardButton ewfButtonNormal\" name=\"ewfButton\" value=\"v\">Save</button>"
		);
		assert_eq!(ctx.submit_button_post_back(), Some(ctx.main_post_back()));
		assert!(ctx.post_backs().contains("main"));
	}

	#[rstest]
	fn test_second_submit_button_aborts_construction(mut ctx: BuildContext) {
		// Arrange
		SubmitButton::new(ButtonStyle::standard("Save")).build(&mut ctx).unwrap();

		// Act
		let result = SubmitButton::new(ButtonStyle::standard("Save again"))
			.with_post_back(PostBack::create_full("other"))
			.build(&mut ctx);

		// Assert
		assert!(matches!(result, Err(PageError::SubmitButtonAlreadyExists { .. })));
	}

	#[rstest]
	fn test_submit_button_needs_data_modification(mut ctx: BuildContext) {
		// Act
		let result = ctx.execute_with_data_modifications_and_default_action(Vec::new(), |ctx| {
			SubmitButton::new(ButtonStyle::standard("Save")).build(ctx)
		});

		// Assert
		assert!(matches!(
			result,
			Err(PageError::Form(FormError::NoDataModificationInScope))
		));
	}
}

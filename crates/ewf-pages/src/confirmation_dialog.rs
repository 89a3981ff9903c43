//! Modal confirmation dialogs

use crate::button::{ButtonBehavior, ButtonStyle, EwfButton};
use crate::component::{Component, IntoComponent};
use crate::context::{BuildContext, ElementId};
use crate::error::PageResult;
use ewf_core::escape_javascript;
use ewf_forms::{FormAction, PostBack};

/// The id of a confirmation dialog, allocated before the dialog so that
/// controls built earlier can open it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationDialogId {
	element_id: ElementId,
}

impl ConfirmationDialogId {
	pub fn new(ctx: &mut BuildContext) -> Self {
		Self {
			element_id: ctx.next_element_id(),
		}
	}

	pub fn element_id(&self) -> &ElementId {
		&self.element_id
	}

	/// An action that shows the dialog
	///
	/// # Examples
	///
	/// ```
	/// use ewf_conf::FrameworkSettings;
	/// use ewf_pages::{BuildContext, ConfirmationDialogId};
	/// use std::sync::Arc;
	///
	/// let mut ctx = BuildContext::new(Arc::new(FrameworkSettings::default()));
	/// let id = ConfirmationDialogId::new(&mut ctx);
	///
	/// assert_eq!(id.open_action().js_statements(), "document.getElementById( 'ewf1' ).showModal();");
	/// ```
	pub fn open_action(&self) -> FormAction {
		FormAction::custom(format!(
			"document.getElementById( '{}' ).showModal();",
			escape_javascript(self.element_id.as_str())
		))
	}

	fn close_script(&self) -> String {
		format!(
			"document.getElementById( '{}' ).close();",
			escape_javascript(self.element_id.as_str())
		)
	}
}

/// A `<dialog>` asking the user to confirm a post-back
///
/// The dialog shows `content` followed by a Cancel button that closes it and
/// a Continue button that submits the post-back.
#[derive(Debug)]
pub struct ConfirmationDialog {
	id: ConfirmationDialogId,
	content: Vec<Component>,
	buttons: Vec<Component>,
}

impl ConfirmationDialog {
	/// Construct the dialog
	///
	/// Without `post_back`, Continue submits the first data modification in scope.
	pub fn new(
		ctx: &mut BuildContext,
		id: &ConfirmationDialogId,
		content: impl IntoIterator<Item = impl IntoComponent>,
		post_back: Option<PostBack>,
	) -> PageResult<Self> {
		let cancel = EwfButton::new(ButtonStyle::standard("Cancel"))
			.with_behavior(ButtonBehavior::Custom(id.close_script()))
			.build(ctx)?;
		let proceed = EwfButton::new(ButtonStyle::standard("Continue"))
			.with_behavior(ButtonBehavior::PostBack(post_back))
			.build(ctx)?;

		Ok(Self {
			id: id.clone(),
			content: content.into_iter().map(IntoComponent::into_component).collect(),
			buttons: vec![cancel, Component::text(" "), proceed],
		})
	}
}

impl From<ConfirmationDialog> for Component {
	fn from(dialog: ConfirmationDialog) -> Self {
		dialog.into_component()
	}
}

impl IntoComponent for ConfirmationDialog {
	fn into_component(self) -> Component {
		Component::markup("dialog")
			.attr("id", self.id.element_id.to_string())
			.children(self.content)
			.child(Component::markup("p").children(self.buttons))
			.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::PageError;
	use crate::render::render;
	use ewf_conf::FrameworkSettings;
	use ewf_forms::FormError;
	use rstest::{fixture, rstest};
	use std::sync::Arc;

	#[fixture]
	fn ctx() -> BuildContext {
		BuildContext::new(Arc::new(FrameworkSettings::default()))
	}

	#[rstest]
	fn test_dialog_markup_and_scripts(mut ctx: BuildContext) {
		// Arrange
		let id = ConfirmationDialogId::new(&mut ctx);
		let delete = PostBack::create_full("delete");
		let dialog = ConfirmationDialog::new(&mut ctx, &id, ["Delete this item?"], Some(delete)).unwrap();

		// Act
		let page = render(&ctx, vec![dialog.into()], None).unwrap();

		// Assert
		assert_eq!(
			page.html,
			"<dialog id=\"ewf1\">Delete this item?<p>\
			 <button id=\"ewf2\" class=\"ewfStandardButton ewfButtonNormal\" type=\"button\">Cancel</button> \
			 <button id=\"ewf3\" class=\"ewfStandardButton ewfButtonNormal\" type=\"button\" name=\"ewfButton\" value=\"delete\">Continue</button>\
			 </p></dialog>"
		);
		assert_eq!(
			page.js_init_statements,
			"$( '#ewf2' ).click( function() { document.getElementById( 'ewf1' ).close(); } ); \
			 $( '#ewf3' ).click( function() { postBack( 'delete' ); } );"
		);
		assert!(ctx.post_backs().contains("delete"));
	}

	#[rstest]
	fn test_continue_needs_data_modification(mut ctx: BuildContext) {
		// Arrange
		let id = ConfirmationDialogId::new(&mut ctx);

		// Act
		let result = ctx.execute_with_data_modifications_and_default_action(Vec::new(), |ctx| {
			ConfirmationDialog::new(ctx, &id, Vec::<Component>::new(), None)
		});

		// Assert
		assert!(matches!(
			result,
			Err(PageError::Form(FormError::NoDataModificationInScope))
		));
	}
}

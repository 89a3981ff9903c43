//! Displaying page modification values

use crate::component::{Component, DisplayableElement, ElementLocalData};
use crate::context::BuildContext;
use ewf_forms::PageModificationValue;

/// Components that show a page modification value and follow it on the client
pub trait PageModificationValueExt<T> {
	/// A `<span>` holding `value_text` of the value
	///
	/// The span's text is replaced on the client with `js_expression` of the
	/// live value whenever the owning control changes.
	///
	/// # Examples
	///
	/// ```
	/// use ewf_conf::FrameworkSettings;
	/// use ewf_forms::PageModificationValue;
	/// use ewf_pages::{BuildContext, PageModificationValueExt};
	/// use std::sync::Arc;
	///
	/// let mut ctx = BuildContext::new(Arc::new(FrameworkSettings::default()));
	/// let checked = PageModificationValue::<bool>::new();
	/// let _display = checked.to_text_container(&mut ctx, |v: bool| v.to_string(), |e| format!("{e} ? 'yes' : 'no'"));
	///
	/// assert_eq!(
	///     checked.js_modification_statements("this.checked"),
	///     "$( '#ewf1' ).text( this.checked ? 'yes' : 'no' );"
	/// );
	/// ```
	fn to_text_container<F, J>(&self, ctx: &mut BuildContext, value_text: F, js_expression: J) -> Component
	where
		F: FnOnce(T) -> String + Send + 'static,
		J: Fn(&str) -> String + Send + Sync + 'static;
}

impl<T: Clone + Send + 'static> PageModificationValueExt<T> for PageModificationValue<T> {
	fn to_text_container<F, J>(&self, ctx: &mut BuildContext, value_text: F, js_expression: J) -> Component
	where
		F: FnOnce(T) -> String + Send + 'static,
		J: Fn(&str) -> String + Send + Sync + 'static,
	{
		let id = ctx.next_element_id();
		let selector = id.to_string();
		self.add_client_dependent(move |value_expression| {
			format!("$( '#{}' ).text( {} );", selector, js_expression(value_expression))
		});

		let value = self.clone();
		DisplayableElement::new(id, |_| Ok(ElementLocalData::new("span").with_id_attribute(true)))
			.with_children([Component::deferred(move || Ok(Component::text(value_text(value.value()?))))])
			.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::checkbox::{Checkbox, CheckboxSetup};
	use crate::render::render;
	use ewf_conf::FrameworkSettings;
	use ewf_forms::{FormAction, PostBackValues};
	use rstest::rstest;
	use std::sync::Arc;

	#[rstest]
	fn test_container_follows_checkbox() {
		// Arrange
		let settings = Arc::new(FrameworkSettings::default());
		let mut ctx = BuildContext::for_post_back(settings, PostBackValues::new().with_field("ewf1", "on"));
		let checked = PageModificationValue::new();
		let checkbox = Checkbox::new(
			&mut ctx,
			false,
			"Notify me",
			CheckboxSetup::create()
				.with_action(FormAction::custom("go();"))
				.with_page_modification_value(checked.clone()),
			|_, _| {},
		)
		.unwrap();
		let display = checked.to_text_container(
			&mut ctx,
			|v: bool| String::from(if v { "True" } else { "False" }),
			|e| format!("{e} ? 'True' : 'False'"),
		);

		// Act
		let page = render(&ctx, vec![checkbox.into(), display], None).unwrap();

		// Assert
		assert_eq!(
			page.html,
			"<label><input id=\"ewf1\" type=\"checkbox\" name=\"ewf1\" checked=\"checked\" />Notify me</label>\
			 <span id=\"ewf2\">True</span>"
		);
		assert_eq!(
			page.js_init_statements,
			"$( '#ewf1' ).keypress( function( e ) { if( e.which == 13 ) { e.preventDefault(); go(); } } ); \
			 $( '#ewf1' ).change( function() { $( '#ewf2' ).text( this.checked ? 'True' : 'False' ); } );"
		);
	}
}

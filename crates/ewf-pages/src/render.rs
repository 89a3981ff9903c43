//! The render pass
//!
//! Rendering first sets every page modification value, then walks the
//! component tree once, invoking each element's local-data getter exactly
//! once.

use crate::component::Component;
use crate::context::{BuildContext, ElementId};
use crate::error::PageResult;
use ewf_conf::{FrameworkSettings, ImplicitSubmissionMode};
use ewf_core::{concatenate_with_delimiter, escape_html, escape_html_attr};
use ewf_forms::{FieldErrors, PostBack, PostBackValues};
use indexmap::IndexSet;
use std::collections::HashSet;

/// The class of rendered validation message lists
pub const ERROR_LIST_CLASS: &str = "ewfErrorMessages";

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// What an element's local-data getter may read
pub struct RenderContext<'a> {
	element_id: &'a ElementId,
	is_focused: bool,
	settings: &'a FrameworkSettings,
	submit_button_post_back: Option<&'a PostBack>,
	post_back_values: Option<&'a PostBackValues>,
}

impl<'a> RenderContext<'a> {
	pub fn element_id(&self) -> &'a ElementId {
		self.element_id
	}

	pub fn is_focused(&self) -> bool {
		self.is_focused
	}

	pub fn settings(&self) -> &'a FrameworkSettings {
		self.settings
	}

	pub fn implicit_submission_mode(&self) -> ImplicitSubmissionMode {
		self.settings.implicit_submission
	}

	pub fn submit_button_post_back(&self) -> Option<&'a PostBack> {
		self.submit_button_post_back
	}

	pub fn post_back_values(&self) -> Option<&'a PostBackValues> {
		self.post_back_values
	}
}

/// The output of the render pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedPage {
	pub html: String,
	/// Element initialization script, statements separated by single spaces
	pub js_init_statements: String,
}

/// Render a constructed page
///
/// `errors` are shown next to the elements they belong to. Page-level errors,
/// and errors for elements that were not rendered, are listed first.
pub fn render(ctx: &BuildContext, components: Vec<Component>, errors: Option<&FieldErrors>) -> PageResult<RenderedPage> {
	for form_value in ctx.form_values() {
		form_value.set_page_modification_values(ctx.post_back_values())?;
	}

	let mut renderer = Renderer {
		ctx,
		errors,
		html: String::new(),
		js_init_statements: IndexSet::new(),
		rendered_ids: HashSet::new(),
	};
	for component in components {
		renderer.render_component(component)?;
	}

	let mut top_messages: Vec<&str> = Vec::new();
	if let Some(errors) = errors {
		top_messages.extend(errors.page_errors().iter().map(String::as_str));
		for element_id in errors.element_ids() {
			if !renderer.rendered_ids.contains(element_id) {
				top_messages.extend(errors.for_element(element_id).iter().map(String::as_str));
			}
		}
	}
	let mut html = String::new();
	push_error_list(&mut html, &top_messages);
	html.push_str(&renderer.html);

	let js_init_statements = concatenate_with_delimiter(
		" ",
		renderer
			.js_init_statements
			.iter()
			.map(|(_, statements)| statements.as_str()),
	);
	tracing::debug!(
		"rendered page with {} element script(s)",
		renderer.js_init_statements.len()
	);
	Ok(RenderedPage {
		html,
		js_init_statements,
	})
}

struct Renderer<'a> {
	ctx: &'a BuildContext,
	errors: Option<&'a FieldErrors>,
	html: String,
	js_init_statements: IndexSet<(String, String)>,
	rendered_ids: HashSet<String>,
}

impl Renderer<'_> {
	fn render_component(&mut self, component: Component) -> PageResult<()> {
		match component {
			Component::Element(element) => {
				let (id, classes, local_data, children) = element.into_parts();
				let render_context = RenderContext {
					element_id: &id,
					is_focused: self.ctx.focused_element() == Some(&id),
					settings: self.ctx.settings(),
					submit_button_post_back: self.ctx.submit_button_post_back(),
					post_back_values: self.ctx.post_back_values(),
				};
				let data = local_data(&render_context)?;

				let mut attributes = Vec::new();
				if data.include_id_attribute() {
					attributes.push(("id".to_string(), id.to_string()));
				}
				if !classes.is_empty() {
					attributes.push(("class".to_string(), classes.join(" ")));
				}
				attributes.extend(data.attributes().iter().cloned());
				self.render_element(data.tag(), &attributes, children)?;

				if !data.js_init_statements().is_empty() {
					self.js_init_statements
						.insert((id.to_string(), data.js_init_statements().to_string()));
				}
				if let Some(errors) = self.errors {
					let messages: Vec<&str> = errors.for_element(id.as_str()).iter().map(String::as_str).collect();
					push_error_list(&mut self.html, &messages);
				}
				self.rendered_ids.insert(id.to_string());
			}
			Component::Markup(element) => {
				let tag = element.tag().to_string();
				let attributes = element.attributes().to_vec();
				self.render_element(&tag, &attributes, element.into_children())?;
			}
			Component::Text(text) => self.html.push_str(&escape_html(&text)),
			Component::Deferred(getter) => self.render_component(getter()?)?,
			Component::Fragment(children) => {
				for child in children {
					self.render_component(child)?;
				}
			}
			Component::Empty => {}
		}
		Ok(())
	}

	fn render_element(&mut self, tag: &str, attributes: &[(String, String)], children: Vec<Component>) -> PageResult<()> {
		self.html.push('<');
		self.html.push_str(tag);
		for (name, value) in attributes {
			self.html.push(' ');
			self.html.push_str(name);
			self.html.push_str("=\"");
			self.html.push_str(&escape_html_attr(value));
			self.html.push('"');
		}

		if VOID_ELEMENTS.contains(&tag) {
			self.html.push_str(" />");
			return Ok(());
		}

		self.html.push('>');
		for child in children {
			self.render_component(child)?;
		}
		self.html.push_str("</");
		self.html.push_str(tag);
		self.html.push('>');
		Ok(())
	}
}

fn push_error_list(html: &mut String, messages: &[&str]) {
	if messages.is_empty() {
		return;
	}
	html.push_str("<ul class=\"");
	html.push_str(ERROR_LIST_CLASS);
	html.push_str("\">");
	for message in messages {
		html.push_str("<li>");
		html.push_str(&escape_html(message));
		html.push_str("</li>");
	}
	html.push_str("</ul>");
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::{DisplayableElement, ElementLocalData};
	use ewf_forms::{FormValue, PageModificationValue, PostBackValueValidationResult};
	use rstest::{fixture, rstest};
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[fixture]
	fn ctx() -> BuildContext {
		BuildContext::new(Arc::new(FrameworkSettings::default()))
	}

	#[rstest]
	fn test_void_element_and_escaping(mut ctx: BuildContext) {
		// Arrange
		let id = ctx.next_element_id();
		let element = DisplayableElement::new(id, |_| {
			Ok(ElementLocalData::new("input")
				.with_attributes(vec![("value".to_string(), "a \"b\" <c>".to_string())])
				.with_id_attribute(true))
		})
		.with_classes(["wide", "plain"]);

		// Act
		let page = render(&ctx, vec![Component::Element(element), Component::text("x < y")], None).unwrap();

		// Assert
		assert_eq!(
			page.html,
			"<input id=\"ewf1\" class=\"wide plain\" value=\"a &quot;b&quot; &lt;c&gt;\" />x &lt; y"
		);
	}

	#[rstest]
	fn test_local_data_getter_sees_focus(mut ctx: BuildContext) {
		// Arrange
		let id = ctx.next_element_id();
		ctx.set_focus(&id);
		let element = DisplayableElement::new(id, |context| {
			let mut attributes = Vec::new();
			if context.is_focused() {
				attributes.push(("autofocus".to_string(), "autofocus".to_string()));
			}
			Ok(ElementLocalData::new("button").with_attributes(attributes))
		})
		.with_children(["Go"]);

		// Act
		let page = render(&ctx, vec![element.into()], None).unwrap();

		// Assert
		assert_eq!(page.html, "<button autofocus=\"autofocus\">Go</button>");
	}

	#[rstest]
	fn test_identical_scripts_are_emitted_once(mut ctx: BuildContext) {
		// Arrange
		let id = ctx.next_element_id();
		let script = format!("$( '#{id}' ).focus();");
		let make = |id: ElementId, script: String| {
			DisplayableElement::new(id, move |_| {
				Ok(ElementLocalData::new("span")
					.with_id_attribute(true)
					.with_js_init_statements(script))
			})
		};
		let other = ctx.next_element_id();

		// Act
		let page = render(
			&ctx,
			vec![
				make(id.clone(), script.clone()).into(),
				make(id, script.clone()).into(),
				make(other, "b();".to_string()).into(),
			],
			None,
		)
		.unwrap();

		// Assert
		assert_eq!(page.js_init_statements, format!("{script} b();"));
	}

	#[rstest]
	fn test_errors_follow_their_element_and_orphans_go_to_top(mut ctx: BuildContext) {
		// Arrange
		let id = ctx.next_element_id();
		let element = DisplayableElement::new(id.clone(), |_| Ok(ElementLocalData::new("input")));
		let mut errors = FieldErrors::new();
		errors.add_for_element(id.as_str(), "Please enter the text.");
		errors.add_for_element("ewf99", "Please make a selection.");
		errors.add_page_error("Try again.");

		// Act
		let page = render(&ctx, vec![element.into()], Some(&errors)).unwrap();

		// Assert
		assert_eq!(
			page.html,
			"<ul class=\"ewfErrorMessages\"><li>Try again.</li><li>Please make a selection.</li></ul>\
			 <input /><ul class=\"ewfErrorMessages\"><li>Please enter the text.</li></ul>"
		);
	}

	#[rstest]
	fn test_page_modification_values_are_set_before_getters_run(mut ctx: BuildContext) {
		// Arrange
		let id = ctx.next_element_id();
		let form_value = FormValue::new(|| 7_u32, id.as_str(), |v| Some(v.to_string()), |raw| match raw.and_then(|r| r.parse().ok()) {
			Some(v) => PostBackValueValidationResult::Valid(v),
			None => PostBackValueValidationResult::Invalid,
		});
		let doubled = PageModificationValue::new();
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		form_value.add_page_modification_value(&doubled, move |v| {
			counter.fetch_add(1, Ordering::SeqCst);
			v * 2
		});
		ctx.register_form_value(&form_value);
		let reader = doubled.clone();
		let element = DisplayableElement::new(id, move |_| {
			Ok(ElementLocalData::new("data").with_attributes(vec![("value".to_string(), reader.value()?.to_string())]))
		});

		// Act
		let page = render(&ctx, vec![element.into()], None).unwrap();

		// Assert
		assert_eq!(page.html, "<data value=\"14\"></data>");
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}
}

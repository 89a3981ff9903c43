//! The declarative component tree built during page construction
//!
//! Construction produces a tree of [`Component`]s whose element ids are
//! already assigned. Anything that depends on the finished page (the submit
//! button, page modification values, focus) is computed later, when the
//! render pass invokes each element's local-data getter once.

use crate::context::ElementId;
use crate::error::PageResult;
use crate::render::RenderContext;
use std::fmt;

/// The tag, attributes, and client script of a rendered element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementLocalData {
	tag: String,
	attributes: Vec<(String, String)>,
	include_id_attribute: bool,
	js_init_statements: String,
}

impl ElementLocalData {
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attributes: Vec::new(),
			include_id_attribute: false,
			js_init_statements: String::new(),
		}
	}

	pub fn with_attributes(mut self, attributes: Vec<(String, String)>) -> Self {
		self.attributes = attributes;
		self
	}

	pub fn with_id_attribute(mut self, include_id_attribute: bool) -> Self {
		self.include_id_attribute = include_id_attribute;
		self
	}

	pub fn with_js_init_statements(mut self, statements: impl Into<String>) -> Self {
		self.js_init_statements = statements.into();
		self
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn attributes(&self) -> &[(String, String)] {
		&self.attributes
	}

	pub fn include_id_attribute(&self) -> bool {
		self.include_id_attribute
	}

	pub fn js_init_statements(&self) -> &str {
		&self.js_init_statements
	}
}

type LocalDataGetter = Box<dyn FnOnce(&RenderContext<'_>) -> PageResult<ElementLocalData> + Send>;
type DeferredGetter = Box<dyn FnOnce() -> PageResult<Component> + Send>;

/// An element with an id, whose markup is produced during the render pass
pub struct DisplayableElement {
	id: ElementId,
	classes: Vec<String>,
	local_data: LocalDataGetter,
	children: Vec<Component>,
}

impl DisplayableElement {
	pub fn new<F>(id: ElementId, local_data: F) -> Self
	where
		F: FnOnce(&RenderContext<'_>) -> PageResult<ElementLocalData> + Send + 'static,
	{
		Self {
			id,
			classes: Vec::new(),
			local_data: Box::new(local_data),
			children: Vec::new(),
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

	pub fn with_children(mut self, children: impl IntoIterator<Item = impl IntoComponent>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoComponent::into_component));
		self
	}

	pub fn id(&self) -> &ElementId {
		&self.id
	}

	pub fn classes(&self) -> &[String] {
		&self.classes
	}

	pub(crate) fn into_parts(self) -> (ElementId, Vec<String>, LocalDataGetter, Vec<Component>) {
		(self.id, self.classes, self.local_data, self.children)
	}
}

impl fmt::Debug for DisplayableElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DisplayableElement")
			.field("id", &self.id)
			.field("classes", &self.classes)
			.field("children", &self.children)
			.finish_non_exhaustive()
	}
}

/// Static markup without an id
#[derive(Debug)]
pub struct MarkupElement {
	tag: String,
	attributes: Vec<(String, String)>,
	children: Vec<Component>,
}

impl MarkupElement {
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attributes: Vec::new(),
			children: Vec::new(),
		}
	}

	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push((name.into(), value.into()));
		self
	}

	pub fn child(mut self, child: impl IntoComponent) -> Self {
		self.children.push(child.into_component());
		self
	}

	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoComponent>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoComponent::into_component));
		self
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn attributes(&self) -> &[(String, String)] {
		&self.attributes
	}

	pub(crate) fn into_children(self) -> Vec<Component> {
		self.children
	}
}

/// A node of the component tree
pub enum Component {
	/// An element with an id and render-time markup
	Element(DisplayableElement),
	/// An element whose markup is known at construction
	Markup(MarkupElement),
	/// Escaped text
	Text(String),
	/// Content produced after page modification values are set
	Deferred(DeferredGetter),
	/// Several components without a wrapper element
	Fragment(Vec<Component>),
	Empty,
}

impl Component {
	pub fn text(content: impl Into<String>) -> Self {
		Self::Text(content.into())
	}

	pub fn fragment(children: impl IntoIterator<Item = impl IntoComponent>) -> Self {
		Self::Fragment(children.into_iter().map(IntoComponent::into_component).collect())
	}

	pub fn markup(tag: impl Into<String>) -> MarkupElement {
		MarkupElement::new(tag)
	}

	/// Content computed during the render pass
	pub fn deferred<F>(getter: F) -> Self
	where
		F: FnOnce() -> PageResult<Component> + Send + 'static,
	{
		Self::Deferred(Box::new(getter))
	}

	pub fn empty() -> Self {
		Self::Empty
	}
}

impl From<DisplayableElement> for Component {
	fn from(element: DisplayableElement) -> Self {
		Self::Element(element)
	}
}

impl From<MarkupElement> for Component {
	fn from(element: MarkupElement) -> Self {
		Self::Markup(element)
	}
}

impl fmt::Debug for Component {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Element(element) => f.debug_tuple("Element").field(element).finish(),
			Self::Markup(element) => f.debug_tuple("Markup").field(element).finish(),
			Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
			Self::Deferred(_) => f.write_str("Deferred"),
			Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
			Self::Empty => f.write_str("Empty"),
		}
	}
}

/// Types that can be placed in the component tree
pub trait IntoComponent {
	fn into_component(self) -> Component;
}

impl IntoComponent for Component {
	fn into_component(self) -> Component {
		self
	}
}

impl IntoComponent for DisplayableElement {
	fn into_component(self) -> Component {
		Component::Element(self)
	}
}

impl IntoComponent for MarkupElement {
	fn into_component(self) -> Component {
		Component::Markup(self)
	}
}

impl IntoComponent for String {
	fn into_component(self) -> Component {
		Component::Text(self)
	}
}

impl IntoComponent for &str {
	fn into_component(self) -> Component {
		Component::Text(self.to_string())
	}
}

impl<T: IntoComponent> IntoComponent for Option<T> {
	fn into_component(self) -> Component {
		match self {
			Some(component) => component.into_component(),
			None => Component::Empty,
		}
	}
}

impl<T: IntoComponent> IntoComponent for Vec<T> {
	fn into_component(self) -> Component {
		Component::fragment(self)
	}
}

impl IntoComponent for () {
	fn into_component(self) -> Component {
		Component::Empty
	}
}

//! View tree and the `Component` trait.
//!
//! Routes point at components; the router renders the matched component
//! into a [`View`], which is serialized to HTML for the page shell.

use std::borrow::Cow;

/// Elements written as `<tag />` with no closing tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
	/// An element with attributes and children.
	Element(ElementView),
	/// Escaped text.
	Text(Cow<'static, str>),
	/// Nothing, e.g. an outlet with no matched route.
	Empty,
}

/// An element under construction or in a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<View>,
}

impl ElementView {
	/// Starts an element with no attributes or children.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Appends an attribute. Attributes render in insertion order.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Appends a child.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Appends every child of `children`.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoView::into_view));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the value of the first attribute called `name`.
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_ref())
	}

	fn write_html(&self, out: &mut String) {
		out.push('<');
		out.push_str(&self.tag);
		for (name, value) in &self.attrs {
			out.push_str(&format!(" {}=\"{}\"", name, html_escape(value)));
		}

		if VOID_ELEMENTS.contains(&self.tag.as_ref()) {
			out.push_str(" />");
			return;
		}

		out.push('>');
		for child in &self.children {
			child.write_html(out);
		}
		out.push_str(&format!("</{}>", self.tag));
	}
}

impl View {
	/// Starts an element.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
		ElementView::new(tag)
	}

	/// Creates a text node.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Returns `true` for [`View::Empty`].
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// Depth-first search for the first element carrying `name="value"`.
	pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&ElementView> {
		let View::Element(el) = self else {
			return None;
		};
		if el.get_attr(name) == Some(value) {
			return Some(el);
		}
		el.children
			.iter()
			.find_map(|c| c.find_by_attr(name, value))
	}

	/// Serializes the tree to HTML, escaping text and attribute values.
	pub fn render_to_string(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		match self {
			View::Element(el) => el.write_html(out),
			View::Text(text) => out.push_str(&html_escape(text)),
			View::Empty => {}
		}
	}
}

/// Escapes the five HTML-significant characters.
pub fn html_escape(s: &str) -> String {
	let mut escaped = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

/// Conversion into a [`View`] node.
pub trait IntoView {
	/// Converts self into a View.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(Cow::Owned(self))
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}

/// Trait for renderable UI components.
///
/// Route targets implement this so the router can render whatever the
/// current route points at.
pub trait Component: 'static {
	/// Renders the component to a View.
	fn render(&self) -> View;

	/// Returns the component's name for debugging.
	fn name() -> &'static str
	where
		Self: Sized;
}

//! Router components for navigation.
//!
//! [`Link`] renders an anchor the router can intercept and [`RouterOutlet`]
//! renders whichever view the current route points at.

use crate::core::Router;
use crate::error::RouterError;
use crate::location::RouteLocation;
use crate::view::{Component, IntoView, View};

/// A link component that navigates without full page reload.
///
/// Renders `<a href=".." data-link="true">`; the application shell turns
/// clicks on such anchors into [`Router::push`] calls.
#[derive(Debug, Clone)]
pub struct Link {
	/// The destination `href`, base included.
	href: String,
	/// The link text.
	content: String,
	/// Additional CSS classes.
	class: Option<String>,
	/// Whether to replace the current history entry.
	replace: bool,
	/// Whether the link points at the current route.
	active: bool,
	/// Custom attributes.
	attrs: Vec<(String, String)>,
}

impl Link {
	/// Creates a new link to a literal `href`.
	pub fn new(href: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			href: href.into(),
			content: content.into(),
			class: None,
			replace: false,
			active: false,
			attrs: Vec::new(),
		}
	}

	/// Creates a link to a location as seen by `router`.
	///
	/// The `href` includes the history base and the link is marked active
	/// when it resolves to the router's current location.
	pub fn to<V: Clone + 'static>(
		router: &Router<V>,
		location: impl Into<RouteLocation>,
		content: impl Into<String>,
	) -> Result<Self, RouterError> {
		let target = router.resolve(location)?;
		let href = router.href(RouteLocation::Path(target.full_path()))?;
		let active = router.current().with(|current| {
			current.is_matched() && current.location.path == target.location.path
		});

		Ok(Self::new(href, content).active(active))
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Marks the link as pointing at the current route.
	pub fn active(mut self, active: bool) -> Self {
		self.active = active;
		self
	}

	/// Adds a custom attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Returns the destination `href`.
	pub fn href(&self) -> &str {
		&self.href
	}

	/// Returns the content.
	pub fn content(&self) -> &str {
		&self.content
	}

	/// Returns whether this is a replace navigation.
	pub fn is_replace(&self) -> bool {
		self.replace
	}

	/// Returns whether the link points at the current route.
	pub fn is_active(&self) -> bool {
		self.active
	}
}

impl Component for Link {
	fn render(&self) -> View {
		let mut el = View::element("a")
			.attr("href", self.href.clone())
			.attr("data-link", "true");

		let class = match (&self.class, self.active) {
			(Some(class), true) => Some(format!("{} active", class)),
			(Some(class), false) => Some(class.clone()),
			(None, true) => Some("active".to_string()),
			(None, false) => None,
		};
		if let Some(class) = class {
			el = el.attr("class", class);
		}
		if self.active {
			el = el.attr("aria-current", "page");
		}
		if self.replace {
			el = el.attr("data-replace", "true");
		}

		for (name, value) in &self.attrs {
			el = el.attr(name.clone(), value.clone());
		}

		el.child(self.content.clone()).into_view()
	}

	fn name() -> &'static str {
		"Link"
	}
}

/// A component that renders the matched route's content.
///
/// The outlet always renders exactly one wrapper element; it is empty when
/// no route matches.
#[derive(Debug, Clone, Default)]
pub struct RouterOutlet {
	/// The ID attribute for the outlet element.
	id: Option<String>,
	/// CSS class for the outlet element.
	class: Option<String>,
}

impl RouterOutlet {
	/// Creates a new router outlet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the ID attribute.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Renders the router's current view inside the outlet element.
	pub fn render_with<V: Clone + Component>(&self, router: &Router<V>) -> View {
		let mut el = View::element("div");

		if let Some(ref id) = self.id {
			el = el.attr("id", id.clone());
		}
		let class = match &self.class {
			Some(class) => format!("router-view {}", class),
			None => "router-view".to_string(),
		};
		el = el.attr("class", class);

		if let Some(name) = router.current().with(|c| c.name().map(str::to_string)) {
			el = el.attr("data-route", name);
		}

		el.child(router.render_current()).into_view()
	}
}

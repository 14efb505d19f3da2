//! The application shell: navigation bar plus router outlet.

use crate::routes;
use crate::settings::Settings;
use crate::views::MapView;
use mapview_router::{
	Component, IntoView, Link, NavigationOutcome, RouteLocation, Router, RouterError,
	RouterOutlet, View, strip_base,
};

/// Error type for mounting the shell into the page.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
	/// No global `window`.
	#[error("Window object not available")]
	NoWindow,

	/// The window has no document.
	#[error("Document object not available")]
	NoDocument,

	/// The mount point id is not in the document.
	#[error("No element with id '{0}'")]
	MissingElement(String),

	/// `addEventListener` rejected the named event.
	#[error("Failed to attach {0} listener")]
	Listener(&'static str),

	/// Starting or rendering the router failed.
	#[error(transparent)]
	Router(#[from] RouterError),
}

/// Owns the router and renders the page around the current view.
#[derive(Debug, Clone)]
pub struct AppShell {
	router: Router<MapView>,
	outlet: RouterOutlet,
}

impl AppShell {
	/// Takes ownership of `router`, resolves the initial location and
	/// subscribes to browser back/forward moves.
	pub fn new(router: Router<MapView>) -> Result<Self, RouterError> {
		router.start()?;
		router.setup_history_listener()?;

		Ok(Self {
			router,
			outlet: RouterOutlet::new().id("map-container"),
		})
	}

	/// Builds the router from settings and wraps it in a shell.
	pub fn from_settings(settings: &Settings) -> Result<Self, RouterError> {
		Self::new(routes::build_with(settings)?)
	}

	/// The router the shell renders.
	pub fn router(&self) -> &Router<MapView> {
		&self.router
	}

	/// One link per view, the current one marked active.
	pub fn links(&self) -> Result<Vec<Link>, RouterError> {
		MapView::ALL
			.into_iter()
			.map(|view| {
				Link::to(&self.router, RouteLocation::named(view.name()), view.name())
					.map(|link| link.class("map-nav-link"))
			})
			.collect()
	}

	/// Renders the navigation bar and the current view.
	pub fn render(&self) -> Result<View, RouterError> {
		let nav = View::element("nav")
			.attr("class", "map-nav")
			.children(self.links()?.iter().map(Component::render));

		Ok(View::element("div")
			.attr("id", "app")
			.child(nav)
			.child(self.outlet.render_with(&self.router))
			.into_view())
	}

	/// Renders the shell to an HTML string.
	pub fn render_to_string(&self) -> Result<String, RouterError> {
		Ok(self.render()?.render_to_string())
	}

	/// Follows an `href` produced by a [`Link`], base included.
	pub fn follow(&self, href: &str, replace: bool) -> Result<NavigationOutcome, RouterError> {
		let location = strip_base(&self.router.base(), href);
		if replace {
			self.router.replace(location)
		} else {
			self.router.push(location)
		}
	}

	/// Renders into the element with id `root_id` and keeps it in sync with
	/// the current route. Clicks on router links navigate in place.
	#[cfg(target_arch = "wasm32")]
	pub fn mount(self, root_id: &str) -> Result<(), MountError> {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::prelude::*;

		let window = web_sys::window().ok_or(MountError::NoWindow)?;
		let document = window.document().ok_or(MountError::NoDocument)?;
		let root = document
			.get_element_by_id(root_id)
			.ok_or_else(|| MountError::MissingElement(root_id.to_string()))?;

		root.set_inner_html(&self.render_to_string()?);

		let shell = self.clone();
		let target = root.clone();
		self.router.current().subscribe(move |_| match shell.render_to_string() {
			Ok(html) => target.set_inner_html(&html),
			Err(e) => tracing::warn!(error = %e, "Failed to render shell"),
		});

		let shell = self;
		let on_click = Closure::wrap(Box::new(move |event: web_sys::Event| {
			if let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>()
				&& (mouse.button() != 0
					|| mouse.meta_key() || mouse.ctrl_key()
					|| mouse.shift_key() || mouse.alt_key())
			{
				return;
			}
			let Some(anchor) = event
				.target()
				.and_then(|t| t.dyn_into::<web_sys::Element>().ok())
				.and_then(|el| el.closest("a[data-link]").ok().flatten())
			else {
				return;
			};
			let Some(href) = anchor.get_attribute("href") else {
				return;
			};

			event.prevent_default();
			let replace = anchor.has_attribute("data-replace");
			if let Err(e) = shell.follow(&href, replace) {
				tracing::warn!(href = %href, error = %e, "Link navigation failed");
			}
		}) as Box<dyn FnMut(_)>);

		root.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
			.map_err(|_| MountError::Listener("click"))?;
		on_click.forget();

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::settings::HistoryMode;
	use rstest::{fixture, rstest};

	#[fixture]
	fn shell() -> AppShell {
		let mut settings = Settings::default();
		settings.router.history = HistoryMode::Memory;
		AppShell::from_settings(&settings).unwrap()
	}

	#[rstest]
	fn test_initial_render_has_empty_outlet(shell: AppShell) {
		let html = shell.render_to_string().unwrap();

		assert!(html.starts_with(r#"<div id="app"><nav class="map-nav">"#));
		assert!(html.ends_with(r#"<div id="map-container" class="router-view"></div></div>"#));
		assert!(!html.contains("active"));
	}

	#[rstest]
	fn test_links_in_table_order(shell: AppShell) {
		let hrefs: Vec<String> = shell
			.links()
			.unwrap()
			.iter()
			.map(|l| l.href().to_string())
			.collect();

		assert_eq!(
			hrefs,
			vec!["/ShowLayers", "/OpenLayers", "/ShiyanMap", "/GeoServer"]
		);
	}

	#[rstest]
	fn test_follow_marks_link_active(shell: AppShell) {
		shell.follow("/OpenLayers", false).unwrap();

		let view = shell.render().unwrap();
		let active = view.find_by_attr("aria-current", "page").unwrap();
		assert_eq!(active.get_attr("href"), Some("/OpenLayers"));
		assert!(view.find_by_attr("data-view", "OpenLayers").is_some());
		assert!(view.find_by_attr("data-view", "GeoServer").is_none());
	}

	#[rstest]
	fn test_follow_strips_base() {
		let mut settings = Settings::default();
		settings.router.history = HistoryMode::Memory;
		settings.router.base = "/maps".to_string();
		let shell = AppShell::from_settings(&settings).unwrap();

		shell.follow("/maps/ShiyanMap", false).unwrap();

		assert_eq!(shell.router().current_view(), Some(MapView::ShiyanMap));
		assert_eq!(shell.links().unwrap()[2].href(), "/maps/ShiyanMap");
	}

	#[rstest]
	fn test_follow_replace(shell: AppShell) {
		shell.follow("/ShowLayers", false).unwrap();
		shell.follow("/GeoServer", true).unwrap();

		shell.router().back().unwrap();

		assert_eq!(shell.router().current_route().location.path, "/");
	}
}

//! The four map views.
//!
//! Views are a closed set, so a route can never point at a view that does
//! not exist. Each view renders a placeholder container that the map
//! library attaches to once the page is mounted.

use mapview_router::{Component, IntoView, View};
use std::fmt;
use std::str::FromStr;

/// One of the application's map views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapView {
	/// Layer list and visibility toggles.
	ShowLayers,
	/// Base OpenLayers map.
	OpenLayers,
	/// Shiyan city map.
	ShiyanMap,
	/// Layers served by GeoServer.
	GeoServer,
}

impl MapView {
	/// All views, in route table order.
	pub const ALL: [MapView; 4] = [
		MapView::ShowLayers,
		MapView::OpenLayers,
		MapView::ShiyanMap,
		MapView::GeoServer,
	];

	/// The view's name, which is also its route name.
	pub const fn name(self) -> &'static str {
		match self {
			MapView::ShowLayers => "ShowLayers",
			MapView::OpenLayers => "OpenLayers",
			MapView::ShiyanMap => "ShiyanMap",
			MapView::GeoServer => "GeoServer",
		}
	}

	/// The path the view is routed at.
	pub const fn path(self) -> &'static str {
		match self {
			MapView::ShowLayers => "/ShowLayers",
			MapView::OpenLayers => "/OpenLayers",
			MapView::ShiyanMap => "/ShiyanMap",
			MapView::GeoServer => "/GeoServer",
		}
	}

	/// Looks a view up by its exact name.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|view| view.name() == name)
	}

	/// `id` of the map container element.
	pub fn container_id(self) -> String {
		format!("map-{}", self.name())
	}
}

impl fmt::Display for MapView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Error returned when parsing an unknown view name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown map view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for MapView {
	type Err = UnknownView;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_name(s).ok_or_else(|| UnknownView(s.to_string()))
	}
}

impl Component for MapView {
	fn render(&self) -> View {
		View::element("div")
			.attr("id", self.container_id())
			.attr("class", "map-view")
			.attr("data-view", self.name())
			.into_view()
	}

	fn name() -> &'static str {
		"MapView"
	}
}

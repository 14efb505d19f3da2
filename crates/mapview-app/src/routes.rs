//! The application's route table.

use crate::settings::Settings;
use crate::views::MapView;
use mapview_router::{PatternOptions, RouteRecord, RouteTable, Router, RouterError};

/// Every navigable location of the application, in display order.
pub const ROUTES: [RouteRecord<MapView>; 4] = [
	RouteRecord::new("/ShowLayers", "ShowLayers", MapView::ShowLayers),
	RouteRecord::new("/OpenLayers", "OpenLayers", MapView::OpenLayers),
	RouteRecord::new("/ShiyanMap", "ShiyanMap", MapView::ShiyanMap),
	RouteRecord::new("/GeoServer", "GeoServer", MapView::GeoServer),
];

/// Compiles [`ROUTES`] with the default matching options.
pub fn routes() -> Result<RouteTable<MapView>, RouterError> {
	routes_with(PatternOptions::default())
}

/// Compiles [`ROUTES`] with the given matching options.
pub fn routes_with(options: PatternOptions) -> Result<RouteTable<MapView>, RouterError> {
	RouteTable::from_records(&ROUTES, options)
}

/// Builds the application router with path-based history rooted at `/`.
///
/// The router starts on its initial location only when the shell mounts
/// it, see [`crate::shell::AppShell::new`].
pub fn build() -> Result<Router<MapView>, RouterError> {
	build_with(&Settings::default())
}

/// Builds the application router from settings.
pub fn build_with(settings: &Settings) -> Result<Router<MapView>, RouterError> {
	let table = routes_with(settings.router.pattern_options())?;

	Ok(Router::builder(table)
		.boxed_history(settings.router.create_history())
		.build())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::settings::HistoryMode;
	use rstest::rstest;

	#[rstest]
	fn test_routes_match_views() {
		for record in &ROUTES {
			assert_eq!(record.path, record.view.path());
			assert_eq!(record.name, record.view.name());
		}
		let views: Vec<_> = ROUTES.iter().map(|r| r.view).collect();
		assert_eq!(views, MapView::ALL);
	}

	#[rstest]
	fn test_table_has_four_routes() {
		let table = routes().unwrap();

		assert_eq!(table.len(), 4);
		for view in MapView::ALL {
			assert!(table.has_route(view.name()));
		}
	}

	#[rstest]
	fn test_build_with_memory_history() {
		let mut settings = Settings::default();
		settings.router.history = HistoryMode::Memory;
		settings.router.base = "/maps".to_string();

		let router = build_with(&settings).unwrap();
		router.push_named("GeoServer").unwrap();

		assert_eq!(router.current_view(), Some(MapView::GeoServer));
		assert_eq!(router.href("/GeoServer").unwrap(), "/maps/GeoServer");
	}

	#[rstest]
	fn test_build_with_strict_options() {
		let mut settings = Settings::default();
		settings.router.strict = true;
		settings.router.sensitive = true;

		let router = build_with(&settings).unwrap();

		assert!(router.match_path("/OpenLayers").is_some());
		assert!(router.match_path("/OpenLayers/").is_none());
		assert!(router.match_path("/openlayers").is_none());
	}
}

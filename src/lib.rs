//! # mapview
//!
//! Client-side routing for a map-viewing web application.
//!
//! The workspace is split in two:
//!
//! - [`router`]: a generic router runtime (route tables, path-based and
//!   in-memory history, the observable current route, links and outlets)
//! - [`app`]: the application itself, four map views wired into a route
//!   table, settings, logging and the page shell
//!
//! ## Quick Start
//!
//! ```
//! use mapview::prelude::*;
//!
//! let router = build().unwrap();
//! router.push_named("GeoServer").unwrap();
//!
//! assert_eq!(router.current_view(), Some(MapView::GeoServer));
//! assert_eq!(router.current_route().location.path, "/GeoServer");
//! ```

pub use mapview_app as app;
pub use mapview_router as router;

pub use mapview_app::{AppShell, MapView, Settings, build, build_with};
pub use mapview_router::{Router, RouterError};

/// Prelude module for convenient imports
///
/// ```
/// use mapview::prelude::*;
/// ```
pub mod prelude {
	pub use mapview_app::{
		AppShell, HistoryMode, MapView, ROUTES, Settings, SettingsError, build, build_with,
		init_logging,
	};
	pub use mapview_router::{
		Component, CurrentRoute, IntoView, Link, NavigationOutcome, RouteLocation, RouteTable,
		Router, RouterError, RouterOutlet, View, create_memory_history, create_web_history,
	};
}

//! The mapview application.
//!
//! Four map views reachable by path or by name:
//!
//! | path | name |
//! |---|---|
//! | `/ShowLayers` | `ShowLayers` |
//! | `/OpenLayers` | `OpenLayers` |
//! | `/ShiyanMap` | `ShiyanMap` |
//! | `/GeoServer` | `GeoServer` |
//!
//! ## Example
//!
//! ```
//! use mapview_app::{MapView, Settings, HistoryMode, build_with};
//!
//! let mut settings = Settings::default();
//! settings.router.history = HistoryMode::Memory;
//!
//! let router = build_with(&settings).unwrap();
//! router.push("/OpenLayers").unwrap();
//! assert_eq!(router.current_view(), Some(MapView::OpenLayers));
//! ```

#![warn(missing_docs)]

pub mod logging;
pub mod routes;
pub mod settings;
pub mod shell;
pub mod views;

pub use logging::init_logging;
pub use routes::{ROUTES, build, build_with, routes, routes_with};
pub use settings::{
	BASE_URL_ENV, HistoryMode, LoggingSettings, RouterSettings, Settings, SettingsError,
};
pub use shell::{AppShell, MountError};
pub use views::{MapView, UnknownView};

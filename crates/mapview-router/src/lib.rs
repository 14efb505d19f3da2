//! Client-side routing for the mapview application.
//!
//! This crate provides the pieces a single-page application needs to map
//! URL paths to views:
//!
//! - [`RouteTable`]: an immutable, validated list of routes
//! - [`Router`]: navigation by path or by name, backed by a [`History`]
//! - [`WebHistory`] / [`MemoryHistory`]: path-based and in-memory history
//! - [`Signal`]: the observable current route
//! - [`Link`] / [`RouterOutlet`]: navigation and rendering components
//!
//! ## Example
//!
//! ```
//! use mapview_router::{Component, RouteTable, Router, View, create_memory_history};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! struct Home;
//!
//! impl Component for Home {
//!     fn render(&self) -> View {
//!         View::text("Home")
//!     }
//!
//!     fn name() -> &'static str {
//!         "Home"
//!     }
//! }
//!
//! let table = RouteTable::builder()
//!     .named_route("home", "/home", Home)
//!     .build()
//!     .unwrap();
//! let router = Router::new(table, create_memory_history("/"));
//!
//! router.push_named("home").unwrap();
//! assert_eq!(router.render_current().render_to_string(), "Home");
//! ```

pub mod components;
pub mod core;
pub mod error;
pub mod history;
pub mod location;
pub mod pattern;
pub mod route;
pub mod signal;
pub mod view;

pub use components::{Link, RouterOutlet};
pub use self::core::{
	AfterEachHook, CurrentRoute, NavigationGuard, NavigationOutcome, Router, RouterBuilder,
};
pub use error::RouterError;
pub use history::{
	History, HistoryListener, HistoryState, MemoryHistory, NavigationType, WebHistory,
	create_memory_history, create_web_history, normalize_base, strip_base,
};
pub use location::{ResolvedLocation, RouteLocation};
pub use pattern::{PatternOptions, RoutePattern};
pub use route::{Route, RouteMatch, RouteRecord, RouteTable, RouteTableBuilder};
pub use signal::{Signal, SubscriptionId};
pub use view::{Component, ElementView, IntoView, View};

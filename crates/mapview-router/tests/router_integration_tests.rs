//! Integration tests for the client-side router
//!
//! These tests verify the routing system functionality:
//! 1. Table construction and invariants
//! 2. Navigation by path and by name
//! 3. Current route observation through the signal
//! 4. History strategies and logging of unmatched locations

use mapview_router::{
	Component, CurrentRoute, History, IntoView, Link, MemoryHistory, NavigationOutcome, PatternOptions,
	RouteLocation, RouteTable, Router, RouterError, RouterOutlet, View, create_memory_history,
	create_web_history,
};
use rstest::{fixture, rstest};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
	Overview,
	Layers,
	Settings,
}

impl Component for Panel {
	fn render(&self) -> View {
		let label = match self {
			Panel::Overview => "Overview",
			Panel::Layers => "Layers",
			Panel::Settings => "Settings",
		};
		View::element("section")
			.attr("data-panel", label)
			.child(label)
			.into_view()
	}

	fn name() -> &'static str {
		"Panel"
	}
}

#[fixture]
fn table() -> RouteTable<Panel> {
	RouteTable::builder()
		.named_route("overview", "/Overview", Panel::Overview)
		.named_route("layers", "/Layers", Panel::Layers)
		.named_route("settings", "/Settings", Panel::Settings)
		.build()
		.unwrap()
}

#[rstest]
fn test_every_path_mounts_its_view(table: RouteTable<Panel>) {
	let router = Router::new(table, create_memory_history(""));

	for (path, expected) in [
		("/Overview", Panel::Overview),
		("/Layers", Panel::Layers),
		("/Settings", Panel::Settings),
	] {
		router.push(path).unwrap();
		assert_eq!(router.current_view(), Some(expected));
	}
}

#[rstest]
#[case("overview", "/Overview")]
#[case("layers", "/Layers")]
#[case("settings", "/Settings")]
fn test_name_and_path_resolve_alike(
	table: RouteTable<Panel>,
	#[case] name: &str,
	#[case] path: &str,
) {
	let router = Router::new(table, create_memory_history(""));

	let by_name = router.resolve(RouteLocation::named(name)).unwrap();
	let by_path = router.resolve(path).unwrap();

	assert_eq!(by_name.view(), by_path.view());
	assert_eq!(by_name.location.path, by_path.location.path);
}

#[rstest]
fn test_signal_notifies_subscribers(table: RouteTable<Panel>) {
	// Arrange
	let router = Router::new(table, create_memory_history(""));
	let seen: Rc<RefCell<Vec<Option<Panel>>>> = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&seen);
	router
		.current()
		.subscribe(move |route: &CurrentRoute<Panel>| sink.borrow_mut().push(route.view().copied()));

	// Act
	router.push("/Layers").unwrap();
	router.push("/Nowhere").unwrap();
	router.push_named("settings").unwrap();

	// Assert
	assert_eq!(
		*seen.borrow(),
		vec![Some(Panel::Layers), None, Some(Panel::Settings)]
	);
}

#[rstest]
fn test_two_routers_from_one_table_are_independent(table: RouteTable<Panel>) {
	let a = Router::new(table.clone(), create_memory_history(""));
	let b = Router::new(table, create_memory_history(""));

	a.push("/Layers").unwrap();

	assert_eq!(a.current_view(), Some(Panel::Layers));
	assert_eq!(b.current_view(), None);
	b.push("/Layers").unwrap();
	assert_eq!(a.current_route(), b.current_route());
}

#[rstest]
fn test_outlet_mounts_only_current_view(table: RouteTable<Panel>) {
	let router = Router::new(table, create_memory_history(""));
	router.push("/Settings").unwrap();

	let html = RouterOutlet::new().render_with(&router).render_to_string();

	assert_eq!(
		html,
		r#"<div class="router-view" data-route="settings"><section data-panel="Settings">Settings</section></div>"#
	);
}

#[rstest]
fn test_strict_sensitive_table() {
	let table = RouteTable::builder()
		.options(PatternOptions::default().sensitive(true).strict(true))
		.named_route("layers", "/Layers", Panel::Layers)
		.build()
		.unwrap();
	let router = Router::new(table, create_memory_history(""));

	assert!(router.match_path("/Layers").is_some());
	assert!(router.match_path("/layers").is_none());
	assert!(router.match_path("/Layers/").is_none());
}

#[rstest]
fn test_query_and_hash_survive_navigation(table: RouteTable<Panel>) {
	let router = Router::new(table, MemoryHistory::new(""));

	router
		.push(RouteLocation::named("layers").query("visible", "roads"))
		.unwrap();

	let current = router.current_route();
	assert_eq!(current.full_path(), "/Layers?visible=roads");
	assert_eq!(current.location.query_value("visible"), Some("roads"));

	router.push("/Overview#legend").unwrap();
	assert_eq!(router.current_route().location.hash.as_deref(), Some("legend"));
}

#[rstest]
fn test_web_history_push_writes_base_relative_entries(table: RouteTable<Panel>) {
	let router = Router::new(table, create_web_history("/maps"));
	router.start().unwrap();

	assert_eq!(router.push("/Layers").unwrap(), NavigationOutcome::Navigated);
	assert_eq!(router.href("/Layers").unwrap(), "/maps/Layers");

	router.back().unwrap();
	assert_eq!(router.current_route().location.path, "/");
}

#[rstest]
fn test_link_for_each_route(table: RouteTable<Panel>) {
	let router = Router::new(table, create_memory_history(""));
	router.push("/Overview").unwrap();

	let links: Vec<Link> = ["overview", "layers", "settings"]
		.into_iter()
		.map(|name| Link::to(&router, RouteLocation::named(name), name).unwrap())
		.collect();

	let active: Vec<bool> = links.iter().map(Link::is_active).collect();
	assert_eq!(active, vec![true, false, false]);
}

#[rstest]
fn test_unknown_name_is_an_error(table: RouteTable<Panel>) {
	let router = Router::new(table, create_memory_history(""));
	assert_eq!(
		router.push_named("GeoServer"),
		Err(RouterError::InvalidRouteName("GeoServer".to_string()))
	);
}

/// A tracing layer that captures log messages to a Vec<String>
struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);
		if *event.metadata().level() == tracing::Level::WARN {
			self.logs.lock().unwrap().push(visitor.message);
		}
	}
}

#[rstest]
fn test_unmatched_navigation_logs_warning(table: RouteTable<Panel>) {
	// Arrange
	let logs = Arc::new(Mutex::new(Vec::new()));
	let subscriber = tracing_subscriber::registry().with(LogCapture { logs: logs.clone() });
	let router = Router::new(table, create_memory_history(""));

	// Act
	tracing::subscriber::with_default(subscriber, || {
		router.push("/DoesNotExist").unwrap();
		router.push("/Layers").unwrap();
	});

	// Assert
	let logs = logs.lock().unwrap();
	assert_eq!(
		*logs,
		vec![r#"No match found for location with path "/DoesNotExist""#.to_string()]
	);
}

#[rstest]
fn test_memory_history_trait_object() {
	let mut history: Box<dyn History> = Box::new(create_memory_history("/app/"));
	history.push("/Layers").unwrap();

	assert_eq!(history.base(), "/app");
	assert_eq!(history.location(), "/Layers");
	assert_eq!(history.create_href("/Layers"), "/app/Layers");
}

//! Core Router Implementation.
//!
//! The router owns a [`RouteTable`], a [`History`] strategy and the current
//! route, which it exposes as a [`Signal`] for the application shell to
//! observe. Cloning a `Router` yields another handle to the same state.

use crate::error::RouterError;
use crate::history::{History, HistoryState, NavigationType, create_web_history};
use crate::location::{ResolvedLocation, RouteLocation};
use crate::route::{Route, RouteMatch, RouteTable};
use crate::signal::Signal;
use crate::view::{Component, View};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Guard run before every navigation. Returning `false` aborts it.
///
/// Receives `(to, from)`.
pub type NavigationGuard<V> = Rc<dyn Fn(&CurrentRoute<V>, &CurrentRoute<V>) -> bool>;

/// Hook run after every completed navigation. Receives `(to, from)`.
pub type AfterEachHook<V> = Rc<dyn Fn(&CurrentRoute<V>, &CurrentRoute<V>)>;

/// The location the router is showing and the route it matched, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRoute<V> {
	/// The resolved location.
	pub location: ResolvedLocation,
	/// The matched route. `None` when no route matches the path.
	pub matched: Option<RouteMatch<V>>,
}

impl<V> CurrentRoute<V> {
	/// The state before the first navigation: `/` with no match.
	pub fn start() -> Self {
		Self {
			location: ResolvedLocation::start(),
			matched: None,
		}
	}

	/// `path?query#hash` of the location.
	pub fn full_path(&self) -> String {
		self.location.full_path()
	}

	/// Name of the matched route.
	pub fn name(&self) -> Option<&str> {
		self.matched.as_ref().and_then(|m| m.name.as_deref())
	}

	/// View of the matched route.
	pub fn view(&self) -> Option<&V> {
		self.matched.as_ref().map(|m| &m.view)
	}

	/// Whether a route matched.
	pub fn is_matched(&self) -> bool {
		self.matched.is_some()
	}

	/// Whether both sides matched the same route with the same params,
	/// query and hash. Spellings of the path that match alike compare
	/// equal. An unmatched side never does.
	pub fn is_same_route_as(&self, other: &CurrentRoute<V>) -> bool {
		let (Some(a), Some(b)) = (&self.matched, &other.matched) else {
			return false;
		};
		a.path == b.path
			&& a.params == b.params
			&& self.location.query == other.location.query
			&& self.location.hash == other.location.hash
	}
}

/// Result of a navigation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// The current route changed.
	Navigated,
	/// The target was already the current location; nothing changed.
	Duplicated,
}

struct RouterInner<V: 'static> {
	table: RouteTable<V>,
	history: RefCell<Box<dyn History>>,
	current: Signal<CurrentRoute<V>>,
	before_each: Vec<NavigationGuard<V>>,
	after_each: Vec<AfterEachHook<V>>,
	/// History position of the current entry, used to undo aborted pops.
	position: Cell<usize>,
}

/// The client-side router.
pub struct Router<V: 'static> {
	inner: Rc<RouterInner<V>>,
}

impl<V: 'static> Clone for Router<V> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<V: 'static> std::fmt::Debug for Router<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes_count", &self.inner.table.len())
			.field(
				"routes",
				&self
					.inner
					.table
					.routes()
					.iter()
					.map(|r| r.path())
					.collect::<Vec<_>>(),
			)
			.field("base", &self.inner.history.borrow().base())
			.finish()
	}
}

/// Builder for [`Router`].
pub struct RouterBuilder<V: 'static> {
	table: RouteTable<V>,
	history: Option<Box<dyn History>>,
	before_each: Vec<NavigationGuard<V>>,
	after_each: Vec<AfterEachHook<V>>,
}

impl<V: Clone + 'static> RouterBuilder<V> {
	/// Sets the history strategy. Defaults to a web history rooted at `/`.
	pub fn history(mut self, history: impl History + 'static) -> Self {
		self.history = Some(Box::new(history));
		self
	}

	/// Sets an already boxed history strategy.
	pub fn boxed_history(mut self, history: Box<dyn History>) -> Self {
		self.history = Some(history);
		self
	}

	/// Adds a guard run before every navigation.
	pub fn before_each<G>(mut self, guard: G) -> Self
	where
		G: Fn(&CurrentRoute<V>, &CurrentRoute<V>) -> bool + 'static,
	{
		self.before_each.push(Rc::new(guard));
		self
	}

	/// Adds a hook run after every completed navigation.
	pub fn after_each<H>(mut self, hook: H) -> Self
	where
		H: Fn(&CurrentRoute<V>, &CurrentRoute<V>) + 'static,
	{
		self.after_each.push(Rc::new(hook));
		self
	}

	/// Creates the router. No navigation happens until [`Router::start`].
	pub fn build(self) -> Router<V> {
		let history = self
			.history
			.unwrap_or_else(|| Box::new(create_web_history("")));

		tracing::info!(
			routes = self.table.len(),
			base = history.base(),
			"Router created"
		);

		Router {
			inner: Rc::new(RouterInner {
				table: self.table,
				history: RefCell::new(history),
				current: Signal::new(CurrentRoute::start()),
				before_each: self.before_each,
				after_each: self.after_each,
				position: Cell::new(0),
			}),
		}
	}
}

impl<V: Clone + 'static> Router<V> {
	/// Creates a router over `table` using `history`.
	pub fn new(table: RouteTable<V>, history: impl History + 'static) -> Self {
		Self::builder(table).history(history).build()
	}

	/// Starts building a router over `table`.
	pub fn builder(table: RouteTable<V>) -> RouterBuilder<V> {
		RouterBuilder {
			table,
			history: None,
			before_each: Vec::new(),
			after_each: Vec::new(),
		}
	}

	/// Resolves the history's current location and makes it the current
	/// route without adding a history entry.
	pub fn start(&self) -> Result<NavigationOutcome, RouterError> {
		let location = self.inner.history.borrow().location();
		self.inner
			.navigate(RouteLocation::Path(location), NavigationType::Pop, true)
	}

	/// Returns the current route signal.
	pub fn current(&self) -> &Signal<CurrentRoute<V>> {
		&self.inner.current
	}

	/// Returns a snapshot of the current route.
	pub fn current_route(&self) -> CurrentRoute<V> {
		self.inner.current.get()
	}

	/// Returns the view of the current route, if one matched.
	pub fn current_view(&self) -> Option<V> {
		self.inner.current.with(|c| c.view().cloned())
	}

	/// Returns the history base path.
	pub fn base(&self) -> String {
		self.inner.history.borrow().base().to_string()
	}

	/// Returns the route table.
	pub fn table(&self) -> &RouteTable<V> {
		&self.inner.table
	}

	/// Returns the routes in declaration order.
	pub fn routes(&self) -> &[Route<V>] {
		self.inner.table.routes()
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.inner.table.len()
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.inner.table.has_route(name)
	}

	/// Matches a bare path against registered routes.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch<V>> {
		self.inner.table.match_path(path)
	}

	/// Resolves a location without navigating.
	pub fn resolve(&self, location: impl Into<RouteLocation>) -> Result<CurrentRoute<V>, RouterError> {
		self.inner.resolve(&location.into())
	}

	/// Generates a URL by route name with parameters.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let route = self
			.inner
			.table
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;
		let params: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		route.pattern().reverse(&params)
	}

	/// Builds the `href` for a location, including the history base.
	pub fn href(&self, location: impl Into<RouteLocation>) -> Result<String, RouterError> {
		let resolved = self.resolve(location)?;
		Ok(self
			.inner
			.history
			.borrow()
			.create_href(&resolved.full_path()))
	}

	/// Navigates to a location, adding a history entry.
	pub fn push(&self, location: impl Into<RouteLocation>) -> Result<NavigationOutcome, RouterError> {
		self.inner
			.navigate(location.into(), NavigationType::Push, false)
	}

	/// Navigates to a location, overwriting the current history entry.
	pub fn replace(
		&self,
		location: impl Into<RouteLocation>,
	) -> Result<NavigationOutcome, RouterError> {
		self.inner
			.navigate(location.into(), NavigationType::Replace, false)
	}

	/// Navigates to a literal path.
	pub fn push_path(&self, path: &str) -> Result<NavigationOutcome, RouterError> {
		self.push(RouteLocation::path(path))
	}

	/// Navigates to a named route that takes no parameters.
	pub fn push_named(&self, name: &str) -> Result<NavigationOutcome, RouterError> {
		self.push(RouteLocation::named(name))
	}

	/// Moves `delta` entries through history.
	///
	/// With memory history the current route changes before this returns;
	/// with the browser's history it changes when `popstate` fires.
	pub fn go(&self, delta: isize) -> Result<(), RouterError> {
		let from_position = self.inner.history.borrow().state().map(|s| s.position);
		let moved = self.inner.history.borrow_mut().go(delta);
		let Some(location) = moved else {
			return Ok(());
		};

		match self
			.inner
			.navigate(RouteLocation::Path(location), NavigationType::Pop, true)
		{
			Err(RouterError::NavigationAborted(path)) => {
				// The history may have clamped the move, so undo what it applied.
				let to_position = self.inner.history.borrow().state().map(|s| s.position);
				let applied = match (from_position, to_position) {
					(Some(from), Some(to)) => to as isize - from as isize,
					_ => delta,
				};
				if applied != 0 {
					self.inner.history.borrow_mut().go(-applied);
				}
				Err(RouterError::NavigationAborted(path))
			}
			other => other.map(|_| ()),
		}
	}

	/// Goes back one entry.
	pub fn back(&self) -> Result<(), RouterError> {
		self.go(-1)
	}

	/// Goes forward one entry.
	pub fn forward(&self) -> Result<(), RouterError> {
		self.go(1)
	}

	/// Subscribes to moves the browser makes on its own (back/forward
	/// buttons). A no-op for histories that only move on request.
	pub fn setup_history_listener(&self) -> Result<(), RouterError> {
		let weak: Weak<RouterInner<V>> = Rc::downgrade(&self.inner);
		self.inner
			.history
			.borrow_mut()
			.listen(Box::new(move |location, state| {
				if let Some(inner) = weak.upgrade() {
					inner.handle_pop(location, state);
				}
			}))
	}
}

impl<V: Clone + Component> Router<V> {
	/// Renders the current route's view, or nothing when no route matched.
	pub fn render_current(&self) -> View {
		self.inner.current.with(|current| match current.view() {
			Some(view) => view.render(),
			None => View::Empty,
		})
	}
}

impl<V: Clone + 'static> RouterInner<V> {
	fn resolve(&self, location: &RouteLocation) -> Result<CurrentRoute<V>, RouterError> {
		match location {
			RouteLocation::Path(raw) => {
				let location = ResolvedLocation::parse(raw);
				let matched = self.table.match_path(&location.path);
				Ok(CurrentRoute { location, matched })
			}
			RouteLocation::Named {
				name,
				params,
				query,
			} => {
				let route = self
					.table
					.get(name)
					.ok_or_else(|| RouterError::InvalidRouteName(name.clone()))?;
				let path = route.pattern().reverse(params)?;

				let known = route.pattern().param_names();
				let params: HashMap<String, String> = params
					.iter()
					.filter(|(k, _)| known.contains(*k))
					.map(|(k, v)| (k.clone(), v.clone()))
					.collect();

				Ok(CurrentRoute {
					location: ResolvedLocation {
						path,
						query: query.clone(),
						hash: None,
					},
					matched: Some(RouteMatch {
						name: Some(name.clone()),
						path: route.path().to_string(),
						view: route.view().clone(),
						params,
					}),
				})
			}
		}
	}

	fn navigate(
		&self,
		location: RouteLocation,
		nav_type: NavigationType,
		force: bool,
	) -> Result<NavigationOutcome, RouterError> {
		let to = self.resolve(&location)?;
		let from = self.current.get();
		let full_path = to.full_path();

		if !force && to.is_same_route_as(&from) {
			tracing::debug!(path = %full_path, "Skipping navigation to the current location");
			return Ok(NavigationOutcome::Duplicated);
		}

		if !self.before_each.iter().all(|guard| guard(&to, &from)) {
			tracing::debug!(path = %full_path, "Navigation aborted by guard");
			return Err(RouterError::NavigationAborted(full_path));
		}

		match nav_type {
			NavigationType::Push => self.history.borrow_mut().push(&full_path)?,
			NavigationType::Replace => self.history.borrow_mut().replace(&full_path)?,
			NavigationType::Pop => {}
		}

		self.commit(to, from, nav_type);
		Ok(NavigationOutcome::Navigated)
	}

	fn commit(&self, to: CurrentRoute<V>, from: CurrentRoute<V>, nav_type: NavigationType) {
		match to.name() {
			Some(name) => tracing::debug!(
				path = %to.location.path,
				route = name,
				kind = ?nav_type,
				"Navigated"
			),
			None if to.is_matched() => {
				tracing::debug!(path = %to.location.path, kind = ?nav_type, "Navigated")
			}
			None => tracing::warn!(
				"No match found for location with path \"{}\"",
				to.location.path
			),
		}

		if let Some(state) = self.history.borrow().state() {
			self.position.set(state.position);
		}

		self.current.set(to.clone());
		for hook in &self.after_each {
			hook(&to, &from);
		}
	}

	fn handle_pop(&self, location: String, state: Option<HistoryState>) {
		let from_position = self.position.get();
		match self.navigate(RouteLocation::Path(location), NavigationType::Pop, true) {
			Ok(_) => {}
			Err(RouterError::NavigationAborted(path)) => {
				// Undo the browser's move so the address bar matches the view.
				if let Some(state) = state {
					let delta = from_position as isize - state.position as isize;
					if delta != 0 {
						self.history.borrow_mut().go(delta);
					}
				}
				tracing::debug!(path = %path, "History pop aborted by guard");
			}
			Err(e) => tracing::warn!(error = %e, "Failed to handle history pop"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::{MemoryHistory, create_memory_history};
	use rstest::{fixture, rstest};

	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	enum Screen {
		Home,
		Layer,
	}

	impl Component for Screen {
		fn render(&self) -> View {
			match self {
				Screen::Home => View::text("Home"),
				Screen::Layer => View::text("Layer"),
			}
		}

		fn name() -> &'static str {
			"Screen"
		}
	}

	#[fixture]
	fn table() -> RouteTable<Screen> {
		RouteTable::builder()
			.named_route("home", "/", Screen::Home)
			.named_route("layer", "/layers/{id}", Screen::Layer)
			.build()
			.unwrap()
	}

	#[fixture]
	fn router(table: RouteTable<Screen>) -> Router<Screen> {
		Router::new(table, create_memory_history(""))
	}

	#[rstest]
	fn test_router_starts_unmatched(router: Router<Screen>) {
		let current = router.current_route();
		assert_eq!(current, CurrentRoute::start());
		assert_eq!(router.render_current(), View::Empty);
	}

	#[rstest]
	fn test_start_resolves_history_location(router: Router<Screen>) {
		let outcome = router.start().unwrap();

		assert_eq!(outcome, NavigationOutcome::Navigated);
		assert_eq!(router.current_view(), Some(Screen::Home));
	}

	#[rstest]
	fn test_push_updates_current_route(router: Router<Screen>) {
		router.push("/layers/7").unwrap();

		let current = router.current_route();
		assert_eq!(current.name(), Some("layer"));
		assert_eq!(
			current.matched.unwrap().params.get("id").map(String::as_str),
			Some("7")
		);
		assert_eq!(router.render_current().render_to_string(), "Layer");
	}

	#[rstest]
	fn test_push_named_with_params(router: Router<Screen>) {
		router
			.push(RouteLocation::named("layer").param("id", "3").param("extra", "x"))
			.unwrap();

		let current = router.current_route();
		assert_eq!(current.location.path, "/layers/3");
		let params = current.matched.unwrap().params;
		assert_eq!(params.len(), 1);
		assert_eq!(params.get("id").map(String::as_str), Some("3"));
	}

	#[rstest]
	fn test_push_named_missing_param(router: Router<Screen>) {
		let result = router.push_named("layer");
		assert_eq!(
			result,
			Err(RouterError::MissingParameter("id".to_string()))
		);
	}

	#[rstest]
	fn test_push_unknown_name(router: Router<Screen>) {
		let result = router.push_named("nope");
		assert_eq!(result, Err(RouterError::InvalidRouteName("nope".to_string())));
		assert_eq!(router.current_route(), CurrentRoute::start());
	}

	#[rstest]
	fn test_duplicate_navigation_is_noop(router: Router<Screen>) {
		router.push("/layers/1").unwrap();
		let outcome = router.push("/layers/1").unwrap();
		assert_eq!(outcome, NavigationOutcome::Duplicated);
	}

	#[rstest]
	fn test_first_push_to_root_navigates(router: Router<Screen>) {
		let outcome = router.push("/").unwrap();

		assert_eq!(outcome, NavigationOutcome::Navigated);
		assert_eq!(router.current_view(), Some(Screen::Home));
	}

	#[rstest]
	#[case("/layers/1/")]
	#[case("/LAYERS/1")]
	fn test_equivalent_spelling_is_duplicate(router: Router<Screen>, #[case] path: &str) {
		// Arrange
		router.start().unwrap();
		router.push("/layers/1").unwrap();

		// Act
		let outcome = router.push(path).unwrap();

		// Assert
		assert_eq!(outcome, NavigationOutcome::Duplicated);
		assert_eq!(router.current_route().location.path, "/layers/1");
		router.back().unwrap();
		assert_eq!(router.current_view(), Some(Screen::Home));
	}

	#[rstest]
	fn test_unmatched_to_unmatched_navigates(router: Router<Screen>) {
		router.push("/missing").unwrap();
		let outcome = router.push("/missing").unwrap();
		assert_eq!(outcome, NavigationOutcome::Navigated);
	}

	#[rstest]
	fn test_unmatched_path_renders_nothing(router: Router<Screen>) {
		router.push("/layers/1").unwrap();
		router.push("/missing").unwrap();

		let current = router.current_route();
		assert_eq!(current.location.path, "/missing");
		assert!(!current.is_matched());
		assert_eq!(router.render_current(), View::Empty);
	}

	#[rstest]
	fn test_back_and_forward(router: Router<Screen>) {
		router.start().unwrap();
		router.push("/layers/1").unwrap();

		router.back().unwrap();
		assert_eq!(router.current_view(), Some(Screen::Home));

		router.forward().unwrap();
		assert_eq!(router.current_view(), Some(Screen::Layer));
	}

	#[rstest]
	fn test_back_at_first_entry_is_noop(router: Router<Screen>) {
		router.start().unwrap();
		router.back().unwrap();
		assert_eq!(router.current_view(), Some(Screen::Home));
	}

	#[rstest]
	fn test_guard_aborts_and_keeps_state(table: RouteTable<Screen>) {
		// Arrange
		let router = Router::builder(table)
			.history(MemoryHistory::new(""))
			.before_each(|to, _from| to.location.path != "/layers/666")
			.build();
		router.push("/layers/1").unwrap();

		// Act
		let result = router.push("/layers/666");

		// Assert
		assert_eq!(
			result,
			Err(RouterError::NavigationAborted("/layers/666".to_string()))
		);
		assert_eq!(router.current_route().location.path, "/layers/1");
	}

	#[rstest]
	fn test_guard_aborted_back_restores_history(table: RouteTable<Screen>) {
		let router = Router::builder(table)
			.history(MemoryHistory::new(""))
			.before_each(|to, from| !(to.location.path == "/" && from.is_matched()))
			.build();
		router.push("/layers/1").unwrap();

		assert!(matches!(
			router.back(),
			Err(RouterError::NavigationAborted(_))
		));
		assert_eq!(router.current_view(), Some(Screen::Layer));
		assert_eq!(router.forward(), Ok(()));
		assert_eq!(router.current_route().location.path, "/layers/1");
	}

	#[rstest]
	fn test_guard_aborted_clamped_go_restores_history(table: RouteTable<Screen>) {
		// Arrange
		let router = Router::builder(table)
			.history(MemoryHistory::new(""))
			.before_each(|to, _from| to.location.path != "/")
			.build();
		router.push("/layers/1").unwrap();
		router.push("/layers/2").unwrap();
		router.back().unwrap();

		// Act
		let result = router.go(-5);

		// Assert
		assert_eq!(result, Err(RouterError::NavigationAborted("/".to_string())));
		assert_eq!(router.current_route().location.path, "/layers/1");
		router.forward().unwrap();
		assert_eq!(router.current_route().location.path, "/layers/2");
	}

	#[rstest]
	fn test_after_each_sees_from_and_to(table: RouteTable<Screen>) {
		let log = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&log);
		let router = Router::builder(table)
			.history(MemoryHistory::new(""))
			.after_each(move |to, from| {
				sink.borrow_mut()
					.push(format!("{} -> {}", from.full_path(), to.full_path()));
			})
			.build();

		router.start().unwrap();
		router.push("/layers/2?style=dark").unwrap();

		assert_eq!(
			*log.borrow(),
			vec![
				"/ -> /".to_string(),
				"/ -> /layers/2?style=dark".to_string()
			]
		);
	}

	#[rstest]
	fn test_replace_does_not_add_entry(router: Router<Screen>) {
		router.start().unwrap();
		router.replace("/layers/5").unwrap();

		router.back().unwrap();

		assert_eq!(router.current_route().location.path, "/layers/5");
	}

	#[rstest]
	fn test_reverse(router: Router<Screen>) {
		assert_eq!(router.reverse("home", &[]).unwrap(), "/");
		assert_eq!(router.reverse("layer", &[("id", "9")]).unwrap(), "/layers/9");
		assert!(matches!(
			router.reverse("nope", &[]),
			Err(RouterError::InvalidRouteName(_))
		));
	}

	#[rstest]
	fn test_href_includes_base(table: RouteTable<Screen>) {
		let router = Router::new(table, create_memory_history("/maps/"));
		assert_eq!(
			router.href(RouteLocation::named("layer").param("id", "1")).unwrap(),
			"/maps/layers/1"
		);
	}

	#[rstest]
	fn test_clone_shares_state(router: Router<Screen>) {
		let other = router.clone();
		other.push("/layers/4").unwrap();
		assert_eq!(router.current_view(), Some(Screen::Layer));
	}

	#[rstest]
	fn test_setup_history_listener_on_memory_history(router: Router<Screen>) {
		assert_eq!(router.setup_history_listener(), Ok(()));
	}
}

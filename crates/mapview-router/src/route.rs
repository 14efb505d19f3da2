//! Route records and route tables.

use crate::error::RouterError;
use crate::pattern::{PatternOptions, RoutePattern};
use std::collections::{HashMap, HashSet};

/// A route declaration: path, name and the view it shows.
///
/// Records are plain data so tables can be declared as `const` arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecord<V> {
	/// URL pattern.
	pub path: &'static str,
	/// Name used for programmatic navigation.
	pub name: &'static str,
	/// The view the route shows.
	pub view: V,
}

impl<V> RouteRecord<V> {
	/// Declares a named route.
	pub const fn new(path: &'static str, name: &'static str, view: V) -> Self {
		Self { path, name, view }
	}
}

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route<V> {
	pattern: RoutePattern,
	name: Option<String>,
	view: V,
}

impl<V> Route<V> {
	/// Creates an unnamed route.
	pub fn new(pattern: &str, view: V) -> Result<Self, RouterError> {
		Self::with_options(None, pattern, view, PatternOptions::default())
	}

	/// Creates a named route.
	pub fn named(name: impl Into<String>, pattern: &str, view: V) -> Result<Self, RouterError> {
		Self::with_options(Some(name.into()), pattern, view, PatternOptions::default())
	}

	fn with_options(
		name: Option<String>,
		pattern: &str,
		view: V,
		options: PatternOptions,
	) -> Result<Self, RouterError> {
		Ok(Self {
			pattern: RoutePattern::with_options(pattern, options)?,
			name,
			view,
		})
	}

	/// Returns the route name.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	/// Returns the path pattern as written.
	pub fn path(&self) -> &str {
		self.pattern.pattern()
	}

	/// Returns the view this route shows.
	pub fn view(&self) -> &V {
		&self.view
	}
}

/// A matched route with extracted parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<V> {
	/// Name of the matched route.
	pub name: Option<String>,
	/// Pattern of the matched route as written.
	pub path: String,
	/// The view to show.
	pub view: V,
	/// Extracted path parameters.
	pub params: HashMap<String, String>,
}

/// An immutable, ordered list of routes.
///
/// Construction guarantees that no two routes share a path (after case and
/// trailing slash folding) and no two routes share a name.
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
	routes: Vec<Route<V>>,
	named_routes: HashMap<String, usize>,
	options: PatternOptions,
}

impl<V: Clone> RouteTable<V> {
	/// Starts a table with default matching options.
	pub fn builder() -> RouteTableBuilder<V> {
		RouteTableBuilder::new()
	}

	/// Compiles a table from static records.
	pub fn from_records(
		records: &[RouteRecord<V>],
		options: PatternOptions,
	) -> Result<Self, RouterError> {
		records
			.iter()
			.fold(RouteTableBuilder::new().options(options), |builder, record| {
				builder.named_route(record.name, record.path, record.view.clone())
			})
			.build()
	}

	/// Matches a path against the routes in declaration order.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch<V>> {
		self.routes.iter().find_map(|route| {
			route.pattern.matches(path).map(|params| RouteMatch {
				name: route.name.clone(),
				path: route.path().to_string(),
				view: route.view.clone(),
				params,
			})
		})
	}

	/// Looks up a route by name.
	pub fn get(&self, name: &str) -> Option<&Route<V>> {
		self.named_routes.get(name).map(|&index| &self.routes[index])
	}
}

impl<V> RouteTable<V> {
	/// Returns the routes in declaration order.
	pub fn routes(&self) -> &[Route<V>] {
		&self.routes
	}

	/// Returns the number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns `true` if the table has no routes.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named_routes.contains_key(name)
	}

	/// Matching options the patterns were compiled with.
	pub fn options(&self) -> PatternOptions {
		self.options
	}
}

/// Builder that validates table invariants in [`RouteTableBuilder::build`].
#[derive(Debug)]
pub struct RouteTableBuilder<V> {
	entries: Vec<(Option<String>, String, V)>,
	options: PatternOptions,
}

impl<V> Default for RouteTableBuilder<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> RouteTableBuilder<V> {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			options: PatternOptions::default(),
		}
	}

	/// Sets the matching options for every pattern in the table.
	pub fn options(mut self, options: PatternOptions) -> Self {
		self.options = options;
		self
	}

	/// Adds an unnamed route.
	pub fn route(mut self, path: &str, view: V) -> Self {
		self.entries.push((None, path.to_string(), view));
		self
	}

	/// Adds a named route.
	pub fn named_route(mut self, name: &str, path: &str, view: V) -> Self {
		self.entries
			.push((Some(name.to_string()), path.to_string(), view));
		self
	}

	/// Compiles every pattern and checks uniqueness of paths and names.
	pub fn build(self) -> Result<RouteTable<V>, RouterError> {
		let mut routes = Vec::with_capacity(self.entries.len());
		let mut named_routes = HashMap::new();
		let mut seen_paths = HashSet::new();

		for (name, path, view) in self.entries {
			let route = Route::with_options(name, &path, view, self.options)?;

			if !seen_paths.insert(route.pattern.key()) {
				return Err(RouterError::DuplicatePath(path));
			}
			if let Some(name) = &route.name {
				if named_routes.insert(name.clone(), routes.len()).is_some() {
					return Err(RouterError::DuplicateName(name.clone()));
				}
			}
			routes.push(route);
		}

		Ok(RouteTable {
			routes,
			named_routes,
			options: self.options,
		})
	}
}

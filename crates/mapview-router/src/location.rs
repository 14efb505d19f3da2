//! Navigation targets and their resolved form.

use std::collections::HashMap;

/// Where a navigation should go.
///
/// A location is either a literal path (which may carry `?query` and
/// `#hash` parts) or a route name plus the parameters needed to build its
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteLocation {
	/// A literal path such as `/GeoServer?layer=roads`.
	Path(String),
	/// A named route.
	Named {
		/// The route name.
		name: String,
		/// Path parameters for patterns with `{param}` segments.
		params: HashMap<String, String>,
		/// Query pairs appended to the generated path.
		query: Vec<(String, String)>,
	},
}

impl RouteLocation {
	/// Creates a path location.
	pub fn path(path: impl Into<String>) -> Self {
		Self::Path(path.into())
	}

	/// Creates a named location without parameters.
	pub fn named(name: impl Into<String>) -> Self {
		Self::Named {
			name: name.into(),
			params: HashMap::new(),
			query: Vec::new(),
		}
	}

	/// Adds a path parameter. Has no effect on path locations.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		if let Self::Named { params, .. } = &mut self {
			params.insert(key.into(), value.into());
		}
		self
	}

	/// Adds a query pair. Has no effect on path locations.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		if let Self::Named { query, .. } = &mut self {
			query.push((key.into(), value.into()));
		}
		self
	}
}

impl From<&str> for RouteLocation {
	fn from(path: &str) -> Self {
		Self::Path(path.to_string())
	}
}

impl From<String> for RouteLocation {
	fn from(path: String) -> Self {
		Self::Path(path)
	}
}

/// A location split into path, query and hash.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedLocation {
	/// Path component, always starting with `/`.
	pub path: String,
	/// Decoded query pairs in order of appearance.
	pub query: Vec<(String, String)>,
	/// Fragment without the leading `#`.
	pub hash: Option<String>,
}

impl ResolvedLocation {
	/// The location every router starts from before its first navigation.
	pub fn start() -> Self {
		Self {
			path: "/".to_string(),
			query: Vec::new(),
			hash: None,
		}
	}

	/// Parses a raw `path?query#hash` string.
	///
	/// A missing leading slash is added, and an empty path becomes `/`.
	/// A query string that fails to decode is dropped.
	pub fn parse(raw: &str) -> Self {
		let (rest, hash) = match raw.split_once('#') {
			Some((rest, hash)) => (rest, Some(hash.to_string())),
			None => (raw, None),
		};
		let (path, query) = match rest.split_once('?') {
			Some((path, query)) => (path, decode_query(query)),
			None => (rest, Vec::new()),
		};

		let path = if path.starts_with('/') {
			path.to_string()
		} else {
			format!("/{}", path)
		};

		Self { path, query, hash }
	}

	/// Returns the first value for a query key.
	pub fn query_value(&self, key: &str) -> Option<&str> {
		self.query
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Reassembles `path?query#hash`.
	pub fn full_path(&self) -> String {
		let mut full = self.path.clone();
		if !self.query.is_empty() {
			full.push('?');
			full.push_str(&serde_urlencoded::to_string(&self.query).unwrap_or_default());
		}
		if let Some(hash) = &self.hash {
			full.push('#');
			full.push_str(hash);
		}
		full
	}
}

fn decode_query(raw: &str) -> Vec<(String, String)> {
	match serde_urlencoded::from_str::<Vec<(String, String)>>(raw) {
		Ok(pairs) => pairs,
		Err(e) => {
			tracing::warn!(query = raw, error = %e, "Discarding malformed query string");
			Vec::new()
		}
	}
}

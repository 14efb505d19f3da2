//! Path pattern matching for client-side routes.
//!
//! Patterns are literal paths with optional `{name}` segments:
//! - `/GeoServer` - exact match
//! - `/layers/{id}` - single path parameter
//! - `/tiles/{path:*}` - wildcard matching the rest of the path
//!
//! Matching is always anchored at both ends, so `/OpenLayers` never matches
//! `/OpenLayersX` or `/OpenLayers/extra`.

use crate::error::RouterError;
use std::collections::HashMap;

/// Maximum allowed length for a route pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a route pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Options that control how patterns compare against paths.
///
/// The defaults are case-insensitive matching with an optional trailing
/// slash, so `/openlayers` and `/OpenLayers/` both reach `/OpenLayers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternOptions {
	/// Match letter case exactly.
	pub sensitive: bool,
	/// Require the trailing slash to match exactly.
	pub strict: bool,
}

impl PatternOptions {
	/// Sets case sensitivity.
	pub fn sensitive(mut self, sensitive: bool) -> Self {
		self.sensitive = sensitive;
		self
	}

	/// Sets trailing slash strictness.
	pub fn strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	/// The original pattern string.
	pattern: String,
	/// Compiled regex pattern.
	regex: regex::Regex,
	/// Parameter names in order.
	param_names: Vec<String>,
	/// Options the pattern was compiled with.
	options: PatternOptions,
}

impl RoutePattern {
	/// Compiles a pattern with the default options.
	pub fn new(pattern: &str) -> Result<Self, RouterError> {
		Self::with_options(pattern, PatternOptions::default())
	}

	/// Compiles a pattern with explicit matching options.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the pattern does not start
	/// with `/`, exceeds 1024 bytes or 32 segments, has an unclosed `{`, or
	/// compiles to an invalid regex.
	pub fn with_options(pattern: &str, options: PatternOptions) -> Result<Self, RouterError> {
		let invalid = |reason: String| RouterError::InvalidPattern {
			pattern: pattern.to_string(),
			reason,
		};

		if !pattern.starts_with('/') {
			return Err(invalid("pattern must start with '/'".to_string()));
		}

		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(invalid(format!(
				"pattern length {} exceeds maximum allowed length of {} bytes",
				pattern.len(),
				MAX_PATTERN_LENGTH
			)));
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(invalid(format!(
				"pattern has {} path segments, exceeding maximum of {}",
				segment_count, MAX_PATH_SEGMENTS
			)));
		}

		let (regex_str, param_names) = Self::compile_pattern(pattern, options).map_err(invalid)?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.case_insensitive(!options.sensitive)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| invalid(format!("failed to compile pattern regex: {}", e)))?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
			options,
		})
	}

	/// Compiles a pattern string into a regex and extracts parameter names.
	fn compile_pattern(
		pattern: &str,
		options: PatternOptions,
	) -> Result<(String, Vec<String>), String> {
		let body = if options.strict {
			pattern
		} else {
			pattern.strip_suffix('/').unwrap_or(pattern)
		};

		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();
		let mut chars = body.chars();

		while let Some(c) = chars.next() {
			match c {
				'{' => {
					let mut param = String::new();
					let mut modifier: Option<String> = None;
					let mut closed = false;

					for next in chars.by_ref() {
						match (next, modifier.as_mut()) {
							('}', _) => {
								closed = true;
								break;
							}
							(':', None) => modifier = Some(String::new()),
							(other, Some(m)) => m.push(other),
							(other, None) => param.push(other),
						}
					}

					if !closed {
						return Err("unclosed parameter".to_string());
					}
					if param.is_empty() {
						return Err("empty parameter name".to_string());
					}
					let is_wildcard = match modifier.as_deref() {
						None => false,
						Some("*") => true,
						Some(other) => {
							return Err(format!("unsupported parameter modifier ':{}'", other));
						}
					};

					if is_wildcard {
						regex_str.push_str(&format!("(?P<{}>.*)", param));
					} else {
						regex_str.push_str(&format!("(?P<{}>[^/]+)", param));
					}
					param_names.push(param);
				}
				'/' | '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '^' | '$' | '|' | '\\' => {
					regex_str.push('\\');
					regex_str.push(c);
				}
				_ => regex_str.push(c),
			}
		}

		if !options.strict {
			regex_str.push_str("/?");
		}
		regex_str.push('$');
		Ok((regex_str, param_names))
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns the options this pattern was compiled with.
	pub fn options(&self) -> PatternOptions {
		self.options
	}

	/// Key under which two patterns are considered the same route path.
	///
	/// Folds case and the trailing slash the same way matching does.
	pub fn key(&self) -> String {
		let mut key = if self.options.strict {
			self.pattern.clone()
		} else {
			self.pattern
				.strip_suffix('/')
				.unwrap_or(&self.pattern)
				.to_string()
		};
		if !self.options.sensitive {
			key = key.to_lowercase();
		}
		key
	}

	/// Attempts to match a path against this pattern.
	///
	/// Returns the extracted parameters keyed by name.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		self.regex.captures(path).map(|caps| {
			self.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect()
		})
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Returns whether this is an exact match pattern (no parameters).
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}

	/// Generates a path from this pattern with the given parameters.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Result<String, RouterError> {
		let mut result = self.pattern.clone();

		for name in &self.param_names {
			let value = params
				.get(name)
				.ok_or_else(|| RouterError::MissingParameter(name.clone()))?;
			let placeholder = format!("{{{}}}", name);
			let wildcard_placeholder = format!("{{{}:*}}", name);

			if result.contains(&placeholder) {
				result = result.replace(&placeholder, value);
			} else {
				result = result.replace(&wildcard_placeholder, value);
			}
		}

		Ok(result)
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern && self.options == other.options
	}
}

impl Eq for RoutePattern {}

impl std::fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

//! Error types for client-side routing.

use thiserror::Error;

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// Invalid route name.
	#[error("Invalid route name: {0}")]
	InvalidRouteName(String),
	/// Missing parameter for reverse URL.
	#[error("Missing parameter: {0}")]
	MissingParameter(String),
	/// The history backend refused the navigation.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// A `before_each` guard rejected the navigation.
	#[error("Navigation aborted: {0}")]
	NavigationAborted(String),
	/// Two routes in one table share a path.
	#[error("Duplicate route path: {0}")]
	DuplicatePath(String),
	/// Two routes in one table share a name.
	#[error("Duplicate route name: {0}")]
	DuplicateName(String),
	/// A route pattern could not be compiled.
	#[error("Invalid route pattern '{pattern}': {reason}")]
	InvalidPattern {
		/// The offending pattern.
		pattern: String,
		/// Why compilation failed.
		reason: String,
	},
}

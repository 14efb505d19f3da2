//! Application settings.
//!
//! Settings are read from a TOML file with two sections:
//!
//! ```toml
//! [router]
//! base = "/maps"
//! history = "web"     # or "memory"
//! sensitive = false
//! strict = false
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every key is optional. The `MAPVIEW_BASE_URL` environment variable, when
//! set, overrides `router.base`.

use mapview_router::{History, PatternOptions, create_memory_history, create_web_history};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable that overrides the router base path.
pub const BASE_URL_ENV: &str = "MAPVIEW_BASE_URL";

/// Error type for loading settings.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The file is not valid TOML or does not fit the schema.
	#[error("Parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// A value parsed but is out of range.
	#[error("Invalid setting '{key}': {reason}")]
	Invalid {
		/// Dotted key of the offending setting.
		key: &'static str,
		/// What is wrong with it.
		reason: String,
	},
}

/// History strategy the router uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
	/// The browser History API, with clean paths.
	#[default]
	Web,
	/// An in-process entry stack that never touches the address bar.
	Memory,
}

/// `[router]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterSettings {
	/// Path prefix the application is served under.
	pub base: String,
	/// History strategy.
	pub history: HistoryMode,
	/// Match letter case exactly.
	pub sensitive: bool,
	/// Require the trailing slash to match exactly.
	pub strict: bool,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			base: "/".to_string(),
			history: HistoryMode::Web,
			sensitive: false,
			strict: false,
		}
	}
}

impl RouterSettings {
	/// Pattern options for the route table.
	pub fn pattern_options(&self) -> PatternOptions {
		PatternOptions::default()
			.sensitive(self.sensitive)
			.strict(self.strict)
	}

	/// Creates the configured history strategy.
	pub fn create_history(&self) -> Box<dyn History> {
		match self.history {
			HistoryMode::Web => Box::new(create_web_history(&self.base)),
			HistoryMode::Memory => Box::new(create_memory_history(&self.base)),
		}
	}
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
	/// Default filter directive, used when `RUST_LOG` is unset.
	pub level: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
		}
	}
}

/// All application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	/// `[router]` section.
	pub router: RouterSettings,
	/// `[logging]` section.
	pub logging: LoggingSettings,
}

impl Settings {
	/// Parses and validates settings from TOML text.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Settings = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reads settings from a TOML file, then applies the environment.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = fs::read_to_string(path)?;
		let settings = Self::from_toml_str(&source)?.apply_env()?;

		tracing::debug!(path = %path.display(), base = %settings.router.base, "Loaded settings");
		Ok(settings)
	}

	/// Applies `MAPVIEW_BASE_URL` if it is set.
	pub fn apply_env(mut self) -> Result<Self, SettingsError> {
		if let Ok(base) = std::env::var(BASE_URL_ENV) {
			self.router.base = base;
			self.validate()?;
		}
		Ok(self)
	}

	/// Checks values serde cannot check on its own.
	pub fn validate(&self) -> Result<(), SettingsError> {
		let base = &self.router.base;
		if base.chars().any(|c| c.is_whitespace() || matches!(c, '?' | '#')) {
			return Err(SettingsError::Invalid {
				key: "router.base",
				reason: format!("'{}' must be a plain path", base),
			});
		}
		if base.contains("://") {
			return Err(SettingsError::Invalid {
				key: "router.base",
				reason: format!("'{}' must be a path, not a URL", base),
			});
		}
		if self.logging.level.trim().is_empty() {
			return Err(SettingsError::Invalid {
				key: "logging.level",
				reason: "must not be empty".to_string(),
			});
		}
		Ok(())
	}
}

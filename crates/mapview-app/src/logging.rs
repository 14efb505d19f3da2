//! Logging setup.

use crate::settings::LoggingSettings;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false`
/// when a subscriber was already installed.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(settings: &LoggingSettings) -> bool {
	use tracing_subscriber::layer::SubscriberExt;
	use tracing_subscriber::util::SubscriberInitExt;

	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.or_else(|_| tracing_subscriber::EnvFilter::try_new(&settings.level))
		.unwrap_or_else(|_| "info".into());

	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer())
		.try_init()
		.is_ok()
}

/// Browser builds leave subscriber installation to the host page.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(_settings: &LoggingSettings) -> bool {
	false
}

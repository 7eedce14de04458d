//! Tracing setup for the service binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::configs::settings::LogSettings;

/// Installs the global subscriber: an env-filter seeded from configuration
/// (overridable via `RUST_LOG`) feeding a console formatter.
///
/// Must be called once, before the server starts serving traffic.
pub fn setup(config: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.console.level));

    let console_layer = config
        .console
        .enabled
        .then(|| fmt::layer().with_target(true).with_line_number(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}

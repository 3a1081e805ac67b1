//! Structured logging for the grotto generator.
//!
//! Provides span-based, filterable logging via the `tracing` ecosystem,
//! with console output carrying timestamps and module paths. Integrates
//! with the configuration system for runtime log level control.

use grotto_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Sets up structured logging with:
/// - Console output with timestamps, module paths, and severity levels
/// - Environment-based filtering (`RUST_LOG` wins over the config setting)
/// - Integration with the config system's `debug.log_level`
///
/// # Examples
///
/// ```no_run
/// use grotto_config::Config;
/// use grotto_log::init_logging;
///
/// // Basic initialization
/// init_logging(None);
///
/// // With config override
/// let config = Config::default();
/// init_logging(Some(&config));
/// ```
pub fn init_logging(config: Option<&Config>) {
    let filter_str = match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => "info".to_string(),
    };

    // Base filter from the config, overridable via RUST_LOG env var.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    // Console layer: human-readable format with timestamps.
    let console_layer = fmt::layer()
        .with_target(true) // Show module path
        .with_thread_names(true) // Useful when generation workers are named
        .with_level(true)
        .with_timer(fmt::time::uptime()); // Time since process start

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// Create an `EnvFilter` with the default filter string.
///
/// Useful for testing and for getting consistent default behavior.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_enables_info() {
        let filter = default_env_filter();
        let filter_str = format!("{filter}");
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_worker_filter_parses() {
        let filter = EnvFilter::new("info,grotto_worldgen=debug");
        let filter_str = format!("{filter}");
        assert!(filter_str.contains("grotto_worldgen=debug"));
    }
}

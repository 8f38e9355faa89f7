//! Structured logging for tidewater.
//!
//! Installs a `tracing` subscriber with a human-readable console layer and, in
//! debug builds, a JSON file layer for post-mortem analysis. `RUST_LOG` takes
//! precedence over the config's `debug.log_level`. Records from the `log`
//! facade (used by the config crate) are bridged into the same subscriber.

use std::fs::File;
use std::path::Path;

use tidewater_config::Config;
use tracing_subscriber::fmt::format::{Format, Json, JsonFields};
use tracing_subscriber::fmt::time::Uptime;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// The JSON file layer type.
pub type JsonFileLayer<S> = fmt::Layer<S, JsonFields, Format<Json, Uptime>, File>;

/// Filter used when neither `RUST_LOG` nor the config sets one.
const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file inside the log directory.
pub const LOG_FILE_NAME: &str = "tidewater.log";

/// Filter directives for `config`, falling back to [`DEFAULT_FILTER`] when the
/// config is absent or its level is blank.
pub fn filter_directives(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// JSON-lines layer writing to `<log_dir>/tidewater.log`, truncating any
/// previous file.
pub fn json_file_layer<S>(log_dir: &Path) -> std::io::Result<JsonFileLayer<S>> {
    std::fs::create_dir_all(log_dir)?;
    let log_file = File::create(log_dir.join(LOG_FILE_NAME))?;
    Ok(fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json())
}

/// Install the global tracing subscriber.
///
/// * `log_dir` - Directory for the JSON log file (debug builds only)
/// * `debug_build` - Whether file logging is enabled
/// * `config` - Configuration providing the log level
///
/// A log directory that cannot be created only disables the file layer.
///
/// # Errors
///
/// Fails if a global subscriber was already installed.
///
/// # Examples
///
/// ```no_run
/// use tidewater_config::Config;
/// use tidewater_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config)).unwrap();
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let file_layer = match log_dir {
        Some(dir) if debug_build => json_file_layer(dir).ok(),
        _ => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
}

/// An `EnvFilter` with the default directives.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::Registry;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert_eq!(format!("{filter}"), "info");
    }

    #[test]
    fn test_config_level_wins_over_default() {
        let mut config = Config::default();
        config.debug.log_level = "debug,tidewater_worldgen=trace".to_string();
        assert_eq!(
            filter_directives(Some(&config)),
            "debug,tidewater_worldgen=trace"
        );
    }

    #[test]
    fn test_blank_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_directives(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        for directives in ["info", "debug,tidewater_worldgen=trace", "warn", "error"] {
            assert!(
                EnvFilter::try_new(directives).is_ok(),
                "Failed to parse filter: {directives}"
            );
        }
    }

    #[test]
    fn test_json_file_layer_writes_records() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");
        let layer = json_file_layer::<Registry>(&log_dir).unwrap();
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(seed = 5u64, "World generated");
        });

        let contents = std::fs::read_to_string(log_dir.join(LOG_FILE_NAME)).unwrap();
        let line = contents.lines().next().expect("one JSON record");
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["level"], "INFO");
        assert_eq!(record["fields"]["message"], "World generated");
        assert_eq!(record["fields"]["seed"], 5);
    }
}

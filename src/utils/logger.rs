//! Logging for the `pack-utils` binary. Logs go to stderr so stdout only
//! carries command output.

use crate::utils::error::{PackError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter directives read before `RUST_LOG`, e.g. `PACK_UTILS_LOG=pack_utils=trace`.
pub const LOG_ENV_VAR: &str = "PACK_UTILS_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One compact line per event.
    Compact,
    /// One JSON object per event, fields flattened, for log shippers.
    Json,
}

pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "pack_utils=debug,warn"
    } else {
        "pack_utils=warn"
    }
}

pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Fails when one is already installed.
pub fn init_logger(format: LogFormat, verbose: bool) -> Result<()> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    let layer = match format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(log_filter(verbose)))
        .try_init()
        .map_err(|e| PackError::ConfigError {
            message: format!("Logger could not be installed: {}", e),
        })
}

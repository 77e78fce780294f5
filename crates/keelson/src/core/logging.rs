//! Logging infrastructure
//!
//! Structured logging with the `tracing` crate. Parsers and generators open a
//! span per call and report counts at `debug`; lines that match no grammar
//! are reported at `trace`.
//!
//! # Usage
//!
//! ```no_run
//! use keelson::core::logging::{init_logging, LoggingConfig};
//!
//! // Level and format from the environment, falling back to info/compact
//! init_logging(LoggingConfig::default())?;
//! # Ok::<(), keelson::core::DiagramError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `KEELSON_LOG_LEVEL`: trace|debug|info|warn|error|off, or any `EnvFilter`
//!   directive such as `keelson::plugins::er=trace`
//! - `RUST_LOG`: used when `KEELSON_LOG_LEVEL` is not set
//! - `KEELSON_LOG_FORMAT`: compact|pretty|json
//!
//! On `wasm32` events go to the browser console through `tracing-wasm`.

use std::fmt;
use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self as fmt_layer, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use super::DiagramError;

pub const LEVEL_ENV: &str = "KEELSON_LOG_LEVEL";
pub const FORMAT_ENV: &str = "KEELSON_LOG_FORMAT";
pub const DEFAULT_LEVEL: &str = "info";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl LogFormat {
    pub const ALL: [LogFormat; 3] = [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json];

    pub fn name(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }

    /// Get all valid format names
    pub fn variants() -> Vec<&'static str> {
        Self::ALL.iter().map(LogFormat::name).collect()
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogFormat {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DiagramError::unknown_variant("log format", s))
    }
}

/// Requested logging setup; `None` fields are resolved from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

impl LoggingConfig {
    pub fn new(level: Option<&str>, format: Option<LogFormat>) -> Self {
        Self {
            level: level.map(str::to_string),
            format,
        }
    }

    /// Level directive: explicit value, `KEELSON_LOG_LEVEL`, `RUST_LOG`, `info`
    pub fn resolved_level(&self) -> String {
        self.level
            .clone()
            .or_else(|| std::env::var(LEVEL_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
    }

    /// Format: explicit value, `KEELSON_LOG_FORMAT`, compact
    pub fn resolved_format(&self) -> Result<LogFormat, DiagramError> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        match std::env::var(FORMAT_ENV) {
            Ok(name) => name.parse(),
            Err(_) => Ok(LogFormat::default()),
        }
    }
}

/// Install the global subscriber.
///
/// Fails when the format name from the environment is invalid or a global
/// subscriber is already installed.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(config: LoggingConfig) -> Result<(), DiagramError> {
    let level = config.resolved_level();
    let format = config.resolved_format()?;

    let filter = if level == "off" {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    };

    let registry = Registry::default().with(filter);
    let installed = match format {
        LogFormat::Compact => registry
            .with(
                fmt_layer::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true)
                    .with_span_events(FmtSpan::NONE)
                    .compact(),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt_layer::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::ACTIVE)
                    .pretty(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt_layer::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .json(),
            )
            .try_init(),
    };

    installed.map_err(|e| DiagramError::logging_error(e.to_string()))
}

/// Install the browser console subscriber and panic hook
#[cfg(target_arch = "wasm32")]
pub fn init_logging(config: LoggingConfig) -> Result<(), DiagramError> {
    // tracing-wasm has no level filter; the format is always the console's
    let _ = config;
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(tracing_wasm::WASMLayerConfig::default());
    Ok(())
}

/// Initialize logging from the environment only
pub fn init_default_logging() -> Result<(), DiagramError> {
    init_logging(LoggingConfig::default())
}

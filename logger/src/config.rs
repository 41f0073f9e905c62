//! Logger configuration.
//!
//! Hosts build their logger from a [`LoggerConfig`]. The format is the only
//! setting read from the process environment.

use crate::format;
use crate::logger::{LogSink, Logger};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Environment variable selecting the log format.
///
/// `development` selects [`LogFormat::Simple`]; any other value, or no value,
/// selects [`LogFormat::Json`].
pub const ENV_VAR: &str = "HANDLER_KIT_ENV";

/// Line format produced by a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable block.
    Simple,
}

impl LogFormat {
    /// Pick the format from an environment name.
    #[must_use]
    pub fn for_environment(environment: &str) -> Self {
        if environment == "development" {
            Self::Simple
        } else {
            Self::Json
        }
    }

    /// Read [`ENV_VAR`] from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(ENV_VAR)
            .map(|value| Self::for_environment(&value))
            .unwrap_or_default()
    }
}

/// Logger configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggerConfig {
    /// Line format.
    ///
    /// Default: JSON
    pub format: LogFormat,

    /// Root context merged into every record.
    ///
    /// Default: empty
    pub context: Map<String, Value>,
}

impl LoggerConfig {
    /// Create a configuration with the given format and an empty context.
    #[must_use]
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            context: Map::new(),
        }
    }

    /// Configuration whose format comes from [`ENV_VAR`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(LogFormat::from_env())
    }

    /// Set the line format.
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the root context.
    #[must_use]
    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }

    /// Build a logger writing to `sink`.
    #[must_use]
    pub fn build(self, sink: Arc<dyn LogSink>) -> Logger {
        let logger = Logger::from_shared(sink).with_context(self.context);
        match self.format {
            LogFormat::Json => logger.with_format(format::json),
            LogFormat::Simple => logger.with_format(format::simple),
        }
    }
}

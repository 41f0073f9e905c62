//! Log levels and records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Diagnostic detail.
    Debug,
    /// Normal operation.
    Info,
    /// Something unexpected but recoverable.
    Warn,
    /// An operation failed.
    Error,
    /// The process cannot continue.
    Fatal,
}

impl Level {
    /// All levels, lowest severity first.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Lowercase name as it appears in serialized records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structured log entry.
///
/// Built fresh for every log call and never mutated afterwards. `context`
/// already contains the logger's root context merged with the per-call
/// context.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
    /// Extra structured fields, in insertion order.
    pub context: Map<String, Value>,
}

impl LogRecord {
    /// Create a record without context.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
            context: Map::new(),
        }
    }

    /// Merge `context` into the record.
    ///
    /// Objects are merged key by key (later keys win), `null` adds nothing and
    /// any other value is stored under the `"context"` key.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        match context {
            Value::Object(fields) => self.context.extend(fields),
            Value::Null => {},
            other => {
                self.context.insert("context".to_string(), other);
            },
        }
        self
    }
}

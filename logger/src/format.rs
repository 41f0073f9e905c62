//! Record formatters.
//!
//! Two formatters ship with the crate:
//!
//! - [`json`]: one JSON object per line, for log collectors
//! - [`simple`]: a human-readable block, for local development

use crate::record::LogRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Turns a record into the line handed to a sink.
pub type Formatter = Arc<dyn Fn(&LogRecord) -> String + Send + Sync>;

/// Keys owned by the record itself; context entries never shadow them.
const RESERVED_KEYS: [&str; 3] = ["timestamp", "level", "message"];

const FALLBACK_MESSAGE: &str = "unable to serialize the log entry";

/// Render a timestamp the way log collectors expect (`1995-07-14T11:16:13.000Z`).
#[must_use]
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Structured representation of an error for use as log context.
///
/// ```
/// use handler_kit_logger::error_value;
///
/// let value = error_value("Error", "unexpected error!");
/// assert_eq!(value.to_string(), r#"{"message":"unexpected error!","name":"Error"}"#);
/// ```
#[must_use]
pub fn error_value(name: &str, message: impl std::fmt::Display) -> Value {
    json!({
        "message": message.to_string(),
        "name": name,
    })
}

fn context_entries(record: &LogRecord) -> impl Iterator<Item = (&String, &Value)> {
    record
        .context
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
}

/// Single-line JSON.
///
/// Produces `{"timestamp":..,"level":..,"message":..,...context}`. If the
/// entry cannot be serialized, a fallback entry carrying only the level and
/// the original message is emitted instead.
#[must_use]
pub fn json(record: &LogRecord) -> String {
    let mut entry = Map::new();
    entry.insert(
        "timestamp".to_string(),
        Value::String(timestamp(&record.timestamp)),
    );
    entry.insert(
        "level".to_string(),
        Value::String(record.level.as_str().to_string()),
    );
    entry.insert(
        "message".to_string(),
        Value::String(record.message.clone()),
    );
    for (key, value) in context_entries(record) {
        entry.insert(key.clone(), value.clone());
    }

    serde_json::to_string(&entry).unwrap_or_else(|_| {
        json!({
            "timestamp": timestamp(&record.timestamp),
            "level": record.level.as_str(),
            "message": FALLBACK_MESSAGE,
            "originalEntry": {
                "level": record.level.as_str(),
                "message": record.message,
            },
        })
        .to_string()
    })
}

/// Human-readable block:
///
/// ```text
/// [INFO] message
///
/// {
///   "timestamp": "...",
///   ...context
/// }
/// ```
#[must_use]
pub fn simple(record: &LogRecord) -> String {
    let mut extra = Map::new();
    extra.insert(
        "timestamp".to_string(),
        Value::String(timestamp(&record.timestamp)),
    );
    for (key, value) in context_entries(record) {
        extra.insert(key.clone(), value.clone());
    }

    let extra = serde_json::to_string_pretty(&extra).unwrap_or_else(|e| e.to_string());

    format!(
        "[{}] {}\n\n{}\n",
        record.level.as_str().to_uppercase(),
        record.message,
        extra
    )
}

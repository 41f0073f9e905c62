//! Time source for log records.

use chrono::{DateTime, Utc};

/// Source of record timestamps.
///
/// [`Logger::with_clock`](crate::Logger::with_clock) swaps it out, which pins
/// the `timestamp` of every record:
///
/// ```
/// use chrono::{DateTime, Utc};
/// use handler_kit_logger::{Clock, Level, Logger, TracingSink};
/// use serde_json::Value;
///
/// struct Epoch;
///
/// impl Clock for Epoch {
///     fn now(&self) -> DateTime<Utc> {
///         DateTime::UNIX_EPOCH
///     }
/// }
///
/// let logger = Logger::new(TracingSink).with_clock(Epoch);
/// let record = logger.record(Level::Info, "hi", Value::Null);
/// assert_eq!(record.timestamp.timestamp(), 0);
/// ```
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

//! The [`Logger`] facade and the [`LogSink`] host interface.

use crate::clock::{Clock, SystemClock};
use crate::format::{self, Formatter};
use crate::record::{Level, LogRecord};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Failure reported by a sink while writing a line.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The sink could not accept the line.
    #[error("log sink failed: {0}")]
    Sink(String),
}

/// Host-side destination of formatted log lines.
///
/// Each host adapter provides one: the functions runtime writes to the
/// invocation context, the web adapter writes to `tracing`. Closures with the
/// right signature are sinks too.
pub trait LogSink: Send + Sync {
    /// Write one already-formatted line at the given level.
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] when the line could not be written.
    fn log(&self, line: &str, level: Level) -> Result<(), LogError>;
}

impl<F> LogSink for F
where
    F: Fn(&str, Level) -> Result<(), LogError> + Send + Sync,
{
    fn log(&self, line: &str, level: Level) -> Result<(), LogError> {
        self(line, level)
    }
}

/// Structured logger.
///
/// Cloning is cheap: the sink, formatter, root context and clock are shared.
/// A logger carries no mutable state, so one instance can serve concurrent
/// invocations.
///
/// # Example
///
/// ```
/// use handler_kit_logger::{Level, LogError, Logger};
/// use serde_json::{json, Map};
///
/// let mut root = Map::new();
/// root.insert("service".to_string(), json!("greeter"));
///
/// let logger = Logger::new(|_: &str, _: Level| -> Result<(), LogError> { Ok(()) })
///     .with_context(root);
///
/// let record = logger.record(Level::Info, "hello", json!({ "name": "luca" }));
/// assert_eq!(record.context.get("service"), Some(&json!("greeter")));
/// assert_eq!(record.context.get("name"), Some(&json!("luca")));
/// ```
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    format: Formatter,
    context: Arc<Map<String, Value>>,
    clock: Arc<dyn Clock>,
}

impl Logger {
    /// Create a logger writing JSON lines to `sink`, with an empty root context.
    #[must_use]
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self::from_shared(Arc::new(sink))
    }

    /// Create a logger from an already shared sink.
    #[must_use]
    pub fn from_shared(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            format: Arc::new(format::json),
            context: Arc::new(Map::new()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the formatter.
    #[must_use]
    pub fn with_format<F>(mut self, format: F) -> Self
    where
        F: Fn(&LogRecord) -> String + Send + Sync + 'static,
    {
        self.format = Arc::new(format);
        self
    }

    /// Replace the root context merged into every record.
    #[must_use]
    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Arc::new(context);
        self
    }

    /// Replace the clock used to timestamp records.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Root context.
    #[must_use]
    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    /// Build the record a log call would emit, without emitting it.
    #[must_use]
    pub fn record(&self, level: Level, message: &str, context: Value) -> LogRecord {
        let mut record = LogRecord::new(self.clock.now(), level, message);
        record.context.clone_from(&*self.context);
        record.with_context(context)
    }

    /// Format a record and hand it to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] when the sink rejects the line.
    pub fn log(&self, level: Level, message: &str, context: Value) -> Result<(), LogError> {
        let record = self.record(level, message, context);
        let line = (self.format)(&record);
        self.sink.log(&line, level)
    }

    /// Log at [`Level::Debug`].
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] when the sink rejects the line.
    pub fn debug(&self, message: &str, context: Value) -> Result<(), LogError> {
        self.log(Level::Debug, message, context)
    }

    /// Log at [`Level::Info`].
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] when the sink rejects the line.
    pub fn info(&self, message: &str, context: Value) -> Result<(), LogError> {
        self.log(Level::Info, message, context)
    }

    /// Log at [`Level::Warn`].
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] when the sink rejects the line.
    pub fn warn(&self, message: &str, context: Value) -> Result<(), LogError> {
        self.log(Level::Warn, message, context)
    }

    /// Log at [`Level::Error`].
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] when the sink rejects the line.
    pub fn error(&self, message: &str, context: Value) -> Result<(), LogError> {
        self.log(Level::Error, message, context)
    }

    /// Log at [`Level::Fatal`].
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] when the sink rejects the line.
    pub fn fatal(&self, message: &str, context: Value) -> Result<(), LogError> {
        self.log(Level::Fatal, message, context)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

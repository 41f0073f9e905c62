//! Logger bound to the invocation's context log.

use crate::context::{ContextLevel, ContextLog, InvocationContext};
use handler_kit_logger::{Level, LogError, LogSink, Logger, LoggerConfig};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Log sink writing to a [`ContextLog`]. `fatal` is written as `error`.
#[derive(Clone)]
pub struct ContextSink {
    log: Arc<dyn ContextLog>,
}

impl ContextSink {
    /// Sink over `log`.
    #[must_use]
    pub fn new(log: Arc<dyn ContextLog>) -> Self {
        Self { log }
    }
}

impl LogSink for ContextSink {
    fn log(&self, line: &str, level: Level) -> Result<(), LogError> {
        let level = match level {
            Level::Debug => ContextLevel::Debug,
            Level::Info => ContextLevel::Info,
            Level::Warn => ContextLevel::Warn,
            Level::Error | Level::Fatal => ContextLevel::Error,
        };
        self.log.write(level, line)
    }
}

/// Logger for one invocation.
///
/// The format follows [`LoggerConfig::from_env`] and every record carries
/// `invocationId` and `functionName`.
#[must_use]
pub fn context_logger(ctx: &InvocationContext) -> Logger {
    let mut context = Map::new();
    context.insert(
        "invocationId".to_string(),
        Value::from(ctx.invocation_id.clone()),
    );
    context.insert(
        "functionName".to_string(),
        Value::from(ctx.function_name.clone()),
    );

    LoggerConfig::from_env()
        .with_context(context)
        .build(Arc::new(ContextSink::new(ctx.log())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::context::LogBuffer;
    use serde_json::json;

    #[test]
    fn test_fatal_is_written_as_error() {
        let buffer = Arc::new(LogBuffer::new());
        let sink = ContextSink::new(buffer.clone());

        for level in Level::ALL {
            sink.log(level.as_str(), level).unwrap();
        }

        let levels: Vec<_> = buffer.lines().into_iter().map(|(level, _)| level).collect();
        assert_eq!(
            levels,
            [
                ContextLevel::Debug,
                ContextLevel::Info,
                ContextLevel::Warn,
                ContextLevel::Error,
                ContextLevel::Error,
            ]
        );
    }

    #[test]
    fn test_records_carry_invocation_identifiers() {
        let buffer = Arc::new(LogBuffer::new());
        let ctx = InvocationContext::new("my-id", "Greet").with_log(buffer.clone());

        let logger = context_logger(&ctx).with_format(handler_kit_logger::format::json);
        logger.info("hello", json!({ "user": "luca" })).unwrap();

        let (level, line) = buffer.lines().pop().unwrap();
        let record: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(level, ContextLevel::Info);
        assert_eq!(record["invocationId"], "my-id");
        assert_eq!(record["functionName"], "Greet");
        assert_eq!(record["user"], "luca");
    }
}

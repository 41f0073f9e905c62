//! Sinks backed by the `tracing` ecosystem.

use crate::logger::{LogError, LogSink};
use crate::record::Level;

/// Target attached to every event emitted by [`TracingSink`].
pub const TARGET: &str = "handler_kit";

/// Forwards formatted lines to `tracing`.
///
/// `fatal` has no `tracing` counterpart and is emitted as `error`. Whatever
/// subscriber the application installs (usually `tracing-subscriber`'s `fmt`
/// layer) decides where the lines end up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, line: &str, level: Level) -> Result<(), LogError> {
        match level {
            Level::Debug => tracing::debug!(target: TARGET, "{line}"),
            Level::Info => tracing::info!(target: TARGET, "{line}"),
            Level::Warn => tracing::warn!(target: TARGET, "{line}"),
            Level::Error | Level::Fatal => tracing::error!(target: TARGET, "{line}"),
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::logger::Logger;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Records the level and target of every event.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<(tracing::Level, String)>>>);

    impl<S: Subscriber> Layer<S> for Captured {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            self.0
                .lock()
                .unwrap()
                .push((*metadata.level(), metadata.target().to_string()));
        }
    }

    #[test]
    fn test_tracing_sink_maps_levels() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry().with(captured.clone());
        let logger = Logger::new(TracingSink);

        tracing::subscriber::with_default(subscriber, || {
            for level in Level::ALL {
                logger.log(level, "through tracing", Value::Null).unwrap();
            }
        });

        let events = captured.0.lock().unwrap().clone();
        let levels: Vec<_> = events.iter().map(|(level, _)| *level).collect();
        assert_eq!(
            levels,
            [
                tracing::Level::DEBUG,
                tracing::Level::INFO,
                tracing::Level::WARN,
                tracing::Level::ERROR,
                tracing::Level::ERROR,
            ]
        );
        assert!(events.iter().all(|(_, target)| target == TARGET));
    }
}

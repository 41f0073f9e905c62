//! # Handler Kit Testing
//!
//! Testing utilities and helpers for handler-kit.
//!
//! This crate provides:
//! - A fixed clock for deterministic log timestamps
//! - A recording log sink that keeps every emitted line
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```
//! use handler_kit_logger::Level;
//! use handler_kit_testing::test_logger;
//! use serde_json::json;
//!
//! let (logger, sink) = test_logger();
//! logger.error("boom", json!({ "code": 42 })).unwrap();
//!
//! assert_eq!(sink.count_at(Level::Error), 1);
//! assert_eq!(sink.records()[0]["code"], 42);
//! ```

use chrono::{DateTime, Utc};
use handler_kit_logger::{Clock, Level, LogError, LogSink, Logger};

/// Mock implementations of the logger's seams.
pub mod mocks {
    use super::{Clock, DateTime, Level, LogError, LogSink, Utc};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making log lines reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use handler_kit_testing::mocks::FixedClock;
    /// use handler_kit_logger::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Log sink that records every line it receives.
    ///
    /// Clones share the same buffer, so a test keeps one handle and gives the
    /// other to the logger under test.
    #[derive(Debug, Clone, Default)]
    pub struct MemorySink {
        entries: Arc<Mutex<Vec<(String, Level)>>>,
    }

    impl MemorySink {
        /// Create an empty sink.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Every `(line, level)` received so far, in order.
        #[must_use]
        pub fn entries(&self) -> Vec<(String, Level)> {
            self.entries
                .lock()
                .map(|entries| entries.clone())
                .unwrap_or_default()
        }

        /// Lines received at `level`.
        #[must_use]
        pub fn lines_at(&self, level: Level) -> Vec<String> {
            self.entries()
                .into_iter()
                .filter(|(_, l)| *l == level)
                .map(|(line, _)| line)
                .collect()
        }

        /// Number of lines received at `level`.
        #[must_use]
        pub fn count_at(&self, level: Level) -> usize {
            self.lines_at(level).len()
        }

        /// Lines parsed back as JSON. Lines that are not JSON are skipped.
        #[must_use]
        pub fn records(&self) -> Vec<Value> {
            self.entries()
                .iter()
                .filter_map(|(line, _)| serde_json::from_str(line).ok())
                .collect()
        }

        /// Forget everything received so far.
        pub fn clear(&self) {
            if let Ok(mut entries) = self.entries.lock() {
                entries.clear();
            }
        }
    }

    impl LogSink for MemorySink {
        fn log(&self, line: &str, level: Level) -> Result<(), LogError> {
            let mut entries = self
                .entries
                .lock()
                .map_err(|_| LogError::Sink("memory sink poisoned".to_string()))?;
            entries.push((line.to_string(), level));
            Ok(())
        }
    }

    /// Log sink that rejects every line.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FailingSink;

    impl LogSink for FailingSink {
        fn log(&self, _line: &str, _level: Level) -> Result<(), LogError> {
            Err(LogError::Sink("sink unavailable".to_string()))
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    use super::mocks::{test_clock, FailingSink, MemorySink};
    use super::Logger;

    /// JSON logger writing to a fresh [`MemorySink`], timestamped by [`test_clock`].
    ///
    /// Returns the logger together with a handle on its sink.
    #[must_use]
    pub fn test_logger() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::new(sink.clone()).with_clock(test_clock());
        (logger, sink)
    }

    /// Logger whose sink rejects every line.
    #[must_use]
    pub fn failing_logger() -> Logger {
        Logger::new(FailingSink).with_clock(test_clock())
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use super::Level;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    /// Any log level.
    pub fn level() -> impl Strategy<Value = Level> {
        prop::sample::select(Level::ALL.to_vec())
    }

    /// Non-empty lists of violation messages.
    pub fn violations() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z ]{1,24}", 1..5)
    }

    /// Violation lists as a decoder might report them, including empty ones.
    pub fn reported_violations() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z ]{1,24}", 0..5)
    }

    /// Header maps with ASCII names, some of which may clash with the
    /// security header names.
    pub fn headers() -> impl Strategy<Value = BTreeMap<String, String>> {
        let name = prop_oneof![
            "[A-Z][a-z]{2,10}(-[A-Z][a-z]{2,10})?",
            Just("X-Frame-Options".to_string()),
            Just("Referrer-Policy".to_string()),
        ];
        prop::collection::btree_map(name, "[ -~]{0,20}", 0..6)
    }
}

// Re-export commonly used items
pub use helpers::{failing_logger, test_logger};
pub use mocks::{test_clock, FailingSink, FixedClock, MemorySink};

//! # Handler Kit Logger
//!
//! A minimal structured-logging facade shared by every handler-kit crate.
//!
//! The facade separates three concerns:
//!
//! - **Record**: what gets logged ([`LogRecord`]: timestamp, level, message, context)
//! - **Format**: how a record becomes a line ([`format::json`], [`format::simple`])
//! - **Sink**: where the line goes ([`LogSink`], implemented by each host)
//!
//! A [`Logger`] ties the three together and adds a fixed root context that is
//! merged into every record.
//!
//! ## Example
//!
//! ```
//! use handler_kit_logger::{Level, LogError, Logger};
//! use serde_json::json;
//!
//! let logger = Logger::new(|line: &str, _level: Level| -> Result<(), LogError> {
//!     println!("{line}");
//!     Ok(())
//! });
//!
//! logger.info("user signed in", json!({ "user": "luca" })).ok();
//! ```

pub mod clock;
pub mod config;
pub mod format;
pub mod logger;
pub mod record;
pub mod sink;

pub use clock::{Clock, SystemClock};
pub use config::{LogFormat, LoggerConfig, ENV_VAR};
pub use format::{error_value, Formatter};
pub use logger::{LogError, LogSink, Logger};
pub use record::{Level, LogRecord};
pub use sink::TracingSink;

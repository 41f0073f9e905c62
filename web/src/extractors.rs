//! Custom Axum extractors.
//!
//! # Examples
//!
//! ```
//! use handler_kit_axum::extractors::RequestLogger;
//! use handler_kit_logger::Level;
//! use serde_json::json;
//!
//! async fn handler(logger: RequestLogger) -> &'static str {
//!     logger.log(Level::Info, "processing", json!({ "step": 1 }));
//!     "ok"
//! }
//! ```

use crate::adapter::tracing_logger;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use handler_kit_logger::{Level, Logger};
use serde_json::Value;
use std::fmt;

/// The request's [`Logger`].
///
/// The one installed by [`logger_layer`](crate::middleware::logger_layer),
/// or a `tracing` logger when there is none.
#[derive(Clone)]
pub struct RequestLogger(pub Logger);

impl RequestLogger {
    /// Write a record, reporting a failing sink through `tracing`.
    pub fn log(&self, level: Level, message: &str, context: Value) {
        if let Err(err) = self.0.log(level, message, context) {
            tracing::warn!(error = %err, record = message, "failed to write log record");
        }
    }
}

impl fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RequestLogger").finish()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestLogger
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let logger = parts
            .extensions
            .get::<Logger>()
            .cloned()
            .unwrap_or_else(tracing_logger);

        Ok(Self(logger))
    }
}

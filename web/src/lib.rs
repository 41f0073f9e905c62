//! Axum web framework integration for handler-kit.
//!
//! Runs handler-kit HTTP handlers as axum handlers, so the same handler can
//! be served by a long-running server and by a serverless host.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at the axum route
//! 2. **Buffer** the body (up to [`AxumConfig::body_limit`])
//! 3. **Decode** it into an [`HttpRequest`](handler_kit_core::http::HttpRequest)
//!    ([`HttpRequestFromAxum`])
//! 4. **Run** the handler with the request's logger and the dependencies
//! 5. **Render** the response according to its `Content-Type`, or log the
//!    failure and answer a 500 problem
//!
//! # Example
//!
//! ```
//! use axum::{routing::get, Router};
//! use handler_kit_axum::middleware::{access_log_layer, logger_layer, AccessLogOptions};
//! use handler_kit_axum::{http_axum, tracing_logger};
//! use handler_kit_core::http::{success_json, HttpRequest};
//! use handler_kit_core::{of, Context};
//! use serde_json::json;
//!
//! #[derive(Clone)]
//! struct Deps {
//!     greeting: &'static str,
//! }
//!
//! let greet = of(|req: HttpRequest, ctx: Context<Deps>| async move {
//!     let name = req.query_param("name").unwrap_or("Test").to_string();
//!     Ok(success_json(json!({ "message": format!("{} {name}", ctx.greeting) })))
//! });
//!
//! let app: Router = Router::new()
//!     .route("/greet", get(http_axum(greet, Deps { greeting: "Ciao" })))
//!     .layer(access_log_layer(AccessLogOptions::default()))
//!     .layer(logger_layer(tracing_logger()));
//! ```

#![forbid(unsafe_code)]

pub mod adapter;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod request;

// Re-export key types for convenience
pub use adapter::{
    http_axum, http_axum_with, into_response, tracing_logger, AxumConfig, DEFAULT_BODY_LIMIT,
};
pub use error::ApiError;
pub use extractors::RequestLogger;
pub use middleware::{access_log_layer, logger_layer, AccessLogOptions, ACCESS_LOG_MESSAGE};
pub use request::{AxumRequest, HttpRequestFromAxum};

/// Result type alias for plain axum handlers.
pub type WebResult<T> = Result<T, ApiError>;

//! Axum middleware for per-request logging.
//!
//! - [`logger_layer`]: makes a [`Logger`] available to every request, where
//!   [`http_axum`](crate::http_axum) and the
//!   [`RequestLogger`](crate::extractors::RequestLogger) extractor pick it up
//! - [`access_log_layer`]: logs one `"http request"` record per response
//!
//! # Example
//!
//! ```
//! use axum::{routing::get, Router};
//! use handler_kit_axum::middleware::{access_log_layer, logger_layer, AccessLogOptions};
//! use handler_kit_axum::tracing_logger;
//!
//! let app: Router = Router::new()
//!     .route("/health", get(|| async { "ok" }))
//!     .layer(access_log_layer(AccessLogOptions::default()))
//!     .layer(logger_layer(tracing_logger()));
//! ```
//!
//! Layers wrap in reverse order: install [`logger_layer`] last so the access
//! log sees its logger.

use crate::adapter::tracing_logger;
use axum::{extract::Request, http::request::Parts, http::StatusCode, response::Response};
use handler_kit_logger::Logger;
use serde_json::json;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;

/// Message of every access log record.
pub const ACCESS_LOG_MESSAGE: &str = "http request";

/// Create a layer that stores `logger` in every request's extensions.
#[must_use]
pub fn logger_layer(logger: Logger) -> LoggerLayer {
    LoggerLayer { logger }
}

/// Layer installing a [`Logger`] per request.
#[derive(Clone)]
pub struct LoggerLayer {
    logger: Logger,
}

impl fmt::Debug for LoggerLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerLayer").finish_non_exhaustive()
    }
}

impl<S> Layer<S> for LoggerLayer {
    type Service = LoggerMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggerMiddleware {
            inner,
            logger: self.logger.clone(),
        }
    }
}

/// Middleware service installing a [`Logger`] per request.
#[derive(Clone)]
pub struct LoggerMiddleware<S> {
    inner: S,
    logger: Logger,
}

impl<S> Service<Request> for LoggerMiddleware<S>
where
    S: Service<Request, Response = Response>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        req.extensions_mut().insert(self.logger.clone());
        self.inner.call(req)
    }
}

type SkipFn = dyn Fn(&Parts, StatusCode) -> bool + Send + Sync;

/// Options of [`access_log_layer`].
#[derive(Clone)]
pub struct AccessLogOptions {
    skip: Arc<SkipFn>,
}

impl Default for AccessLogOptions {
    fn default() -> Self {
        Self {
            skip: Arc::new(|_, _| false),
        }
    }
}

impl AccessLogOptions {
    /// Skip the record when `skip(request, status)` is true.
    #[must_use]
    pub fn with_skip<F>(mut self, skip: F) -> Self
    where
        F: Fn(&Parts, StatusCode) -> bool + Send + Sync + 'static,
    {
        self.skip = Arc::new(skip);
        self
    }
}

impl fmt::Debug for AccessLogOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessLogOptions").finish_non_exhaustive()
    }
}

/// Create a layer that logs every answered request at `info`.
///
/// Records carry `method`, `url` and `status`, and go through the request's
/// logger (see [`logger_layer`]), else a `tracing` logger.
#[must_use]
pub fn access_log_layer(options: AccessLogOptions) -> AccessLogLayer {
    AccessLogLayer { options }
}

/// Layer for access logging.
#[derive(Clone, Debug)]
pub struct AccessLogLayer {
    options: AccessLogOptions,
}

impl<S> Layer<S> for AccessLogLayer {
    type Service = AccessLogMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLogMiddleware {
            inner,
            options: self.options.clone(),
        }
    }
}

/// Middleware service for access logging.
#[derive(Clone, Debug)]
pub struct AccessLogMiddleware<S> {
    inner: S,
    options: AccessLogOptions,
}

impl<S> Service<Request> for AccessLogMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let (parts, body) = req.into_parts();
        let parts_for_log = parts.clone();

        let span = tracing::info_span!(
            "http_request",
            method = %parts.method,
            uri = %parts.uri,
        );
        let fut = self.inner.call(Request::from_parts(parts, body));
        let options = self.options.clone();

        Box::pin(async move {
            let response = fut.instrument(span).await?;
            let status = response.status();

            if !(options.skip)(&parts_for_log, status) {
                let logger = parts_for_log
                    .extensions
                    .get::<Logger>()
                    .cloned()
                    .unwrap_or_else(tracing_logger);
                let url = parts_for_log
                    .uri
                    .path_and_query()
                    .map_or_else(|| parts_for_log.uri.path(), |pq| pq.as_str());
                let context = json!({
                    "method": parts_for_log.method.as_str(),
                    "url": url,
                    "status": status.as_u16(),
                });
                if let Err(err) = logger.info(ACCESS_LOG_MESSAGE, context) {
                    tracing::warn!(error = %err, "failed to write access log");
                }
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use handler_kit_logger::Level;
    use handler_kit_testing::test_logger;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_logger_is_available_to_handlers() {
        let (logger, sink) = test_logger();

        async fn handler(req: Request) -> &'static str {
            let logger = req.extensions().get::<Logger>().expect("logger installed");
            logger.info("inside", json!({})).unwrap();
            "ok"
        }

        let app = Router::new()
            .route("/test", get(handler))
            .layer(logger_layer(logger));

        let request = axum::http::Request::builder()
            .uri("/test")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(sink.records()[0]["message"], "inside");
    }

    #[tokio::test]
    async fn test_access_log_records_each_request() {
        let (logger, sink) = test_logger();
        let app = Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(access_log_layer(AccessLogOptions::default()))
            .layer(logger_layer(logger));

        let request = axum::http::Request::builder()
            .uri("/test?x=1")
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap();

        assert_eq!(sink.count_at(Level::Info), 1);
        let record = &sink.records()[0];
        assert_eq!(record["message"], "http request");
        assert_eq!(record["method"], "GET");
        assert_eq!(record["url"], "/test?x=1");
        assert_eq!(record["status"], 200);
    }

    #[tokio::test]
    async fn test_access_log_skip() {
        let (logger, sink) = test_logger();
        let options = AccessLogOptions::default()
            .with_skip(|parts, status| parts.uri.path() == "/health" && status.is_success());
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .layer(access_log_layer(options))
            .layer(logger_layer(logger));

        let request = axum::http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        app.clone().oneshot(request).await.unwrap();
        assert!(sink.entries().is_empty());

        let request = axum::http::Request::builder()
            .uri("/missing")
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap();
        assert_eq!(sink.count_at(Level::Info), 1);
        assert_eq!(sink.records()[0]["status"], 404);
    }
}

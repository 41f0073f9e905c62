//! Running HTTP handlers as axum handlers.

use crate::request::{AxumRequest, HttpRequestFromAxum};
use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::Response;
use futures::future::{BoxFuture, FutureExt};
use handler_kit_core::http::{respond, HttpRequest, HttpResponse, HttpStatusCode, RenderedResponse};
use handler_kit_core::{Error, Handler, HandlerEnvironment};
use handler_kit_logger::{Logger, LoggerConfig, TracingSink};
use serde::Serialize;
use std::sync::Arc;

/// Largest request body buffered by default (2 MiB, axum's own default).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Options of [`http_axum_with`].
#[derive(Clone)]
pub struct AxumConfig {
    /// Largest request body buffered, in bytes.
    pub body_limit: usize,
    /// Logger used when the request carries none.
    pub logger: Option<Logger>,
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            body_limit: DEFAULT_BODY_LIMIT,
            logger: None,
        }
    }
}

impl AxumConfig {
    /// Set the body limit.
    #[must_use]
    pub const fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Set the fallback logger.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }
}

impl std::fmt::Debug for AxumConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxumConfig")
            .field("body_limit", &self.body_limit)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

/// [`http_axum_with`] using the default [`AxumConfig`].
pub fn http_axum<A, S, R>(
    handler: Handler<HttpRequest, HttpResponse<A, S>, R>,
    deps: R,
) -> impl Fn(Request) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static
where
    A: Serialize + Send + 'static,
    S: Into<HttpStatusCode> + Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    http_axum_with(handler, deps, AxumConfig::default())
}

/// Adapt an HTTP `handler` to an axum handler.
///
/// The logger is the one installed by [`logger_layer`], else
/// `config.logger`, else a `tracing` logger formatted per
/// [`LoggerConfig::from_env`]. Successful responses are rendered according to
/// their `Content-Type`. Any failure, including an undecodable request or a
/// body over `config.body_limit`, is logged as `"uncaught error from handler"`
/// and answered with a 500 problem.
///
/// # Example
///
/// ```
/// use axum::{routing::get, Router};
/// use handler_kit_axum::http_axum;
/// use handler_kit_core::http::{success_json, HttpRequest};
/// use handler_kit_core::{of, Context};
/// use serde_json::json;
///
/// let hello = of(|req: HttpRequest, _ctx: Context<()>| async move {
///     let name = req.query_param("name").unwrap_or("Test").to_string();
///     Ok(success_json(json!({ "message": format!("Hello {name}") })))
/// });
///
/// let app: Router = Router::new().route("/hello", get(http_axum(hello, ())));
/// ```
///
/// [`logger_layer`]: crate::middleware::logger_layer
pub fn http_axum_with<A, S, R>(
    handler: Handler<HttpRequest, HttpResponse<A, S>, R>,
    deps: R,
    config: AxumConfig,
) -> impl Fn(Request) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static
where
    A: Serialize + Send + 'static,
    S: Into<HttpStatusCode> + Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);

    move |req: Request| {
        let handler = handler.clone();
        let deps = deps.clone();
        let config = Arc::clone(&config);

        async move {
            let (mut parts, body) = req.into_parts();
            let logger = parts
                .extensions
                .get::<Logger>()
                .cloned()
                .or_else(|| config.logger.clone())
                .unwrap_or_else(tracing_logger);

            let result = match to_bytes(body, config.body_limit).await {
                Ok(bytes) => {
                    let input = AxumRequest::from_parts(&mut parts, bytes).await;
                    let env =
                        HandlerEnvironment::new(input, HttpRequestFromAxum, logger.clone(), deps);
                    handler.run(env).await
                }
                Err(err) => Err(Error::other(err)),
            };

            into_response(respond(&logger, result))
        }
        .boxed()
    }
}

/// Logger writing through `tracing`, formatted per [`LoggerConfig::from_env`].
#[must_use]
pub fn tracing_logger() -> Logger {
    LoggerConfig::from_env().build(Arc::new(TracingSink))
}

/// Convert a rendered response into an axum [`Response`].
///
/// Headers that are not valid HTTP are dropped with a warning.
#[must_use]
pub fn into_response(rendered: RenderedResponse) -> Response {
    let mut response = Response::new(Body::from(rendered.body));
    *response.status_mut() = StatusCode::from_u16(rendered.status_code.as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let headers = response.headers_mut();
    for (name, value) in rendered.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "dropping invalid response header"),
        }
    }

    response
}

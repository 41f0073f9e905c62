//! The outcome of an HTTP handler run, as answered by every HTTP host.
//!
//! Successful responses are rendered; failures are logged and replaced by a
//! generic 500 problem so the caller never sees the original error.

use super::error::HttpError;
use super::problem::{to_problem_json, ProblemJson};
use super::render::{render, RenderedResponse};
use super::response::{problem_json, HttpResponse};
use super::status::{HttpErrorStatusCode, HttpStatusCode};
use crate::error::Error;
use handler_kit_logger::{error_value, Logger};
use serde::Serialize;
use serde_json::json;

/// Message of the record logged when a handler fails.
pub const UNCAUGHT_ERROR_MESSAGE: &str = "uncaught error from handler";

/// Message of the record logged when a response cannot be rendered.
pub const RENDER_ERROR_MESSAGE: &str = "unable to render the response";

/// The 500 problem answered in place of any handler failure.
#[must_use]
pub fn internal_server_error() -> HttpResponse<ProblemJson, HttpErrorStatusCode> {
    let error = Error::from(HttpError::new("Something went wrong."));
    problem_json(to_problem_json(&error))
}

/// Turn a handler result into the bytes a host writes.
///
/// - `Ok` responses are rendered; a rendering failure is logged at `error` and
///   answered with [`RenderedResponse::fallback`]
/// - `Err` is logged at `error` as [`UNCAUGHT_ERROR_MESSAGE`] with the error
///   under `"error"`, then answered with [`internal_server_error`]
///
/// Logging failures are reported through `tracing` and otherwise ignored.
#[must_use]
pub fn respond<A, S>(logger: &Logger, result: Result<HttpResponse<A, S>, Error>) -> RenderedResponse
where
    A: Serialize,
    S: Into<HttpStatusCode>,
{
    match result {
        Ok(res) => render_or_fallback(logger, res),
        Err(err) => {
            let context = json!({ "error": err.to_log_value() });
            if let Err(log_err) = logger.error(UNCAUGHT_ERROR_MESSAGE, context) {
                tracing::warn!(error = %log_err, "failed to log handler error");
            }
            render_or_fallback(logger, internal_server_error())
        }
    }
}

fn render_or_fallback<A, S>(logger: &Logger, res: HttpResponse<A, S>) -> RenderedResponse
where
    A: Serialize,
    S: Into<HttpStatusCode>,
{
    render(res).unwrap_or_else(|err| {
        let context = json!({ "error": error_value("RenderError", &err) });
        if let Err(log_err) = logger.error(RENDER_ERROR_MESSAGE, context) {
            tracing::warn!(error = %log_err, "failed to log render error");
        }
        RenderedResponse::fallback()
    })
}

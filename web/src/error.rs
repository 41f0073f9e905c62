//! Handler errors as axum responses.
//!
//! [`ApiError`] lets plain axum handlers return handler-kit errors. Unlike
//! [`http_axum`](crate::http_axum), which hides every failure behind a generic
//! 500, it answers with the error's own problem document.

use crate::adapter::into_response;
use axum::response::{IntoResponse, Response};
use handler_kit_core::http::{problem_json, render, to_problem_json, HttpError, RenderedResponse};
use handler_kit_core::{Error, ValidationError};

/// A handler-kit [`Error`] returned from an axum handler.
///
/// # Examples
///
/// ```
/// use handler_kit_axum::ApiError;
/// use handler_kit_core::http::HttpError;
///
/// async fn handler() -> Result<String, ApiError> {
///     Err(HttpError::not_found("no such user").into())
/// }
/// ```
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(pub Error);

impl ApiError {
    /// The wrapped error.
    #[must_use]
    pub const fn inner(&self) -> &Error {
        &self.0
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let problem = to_problem_json(&self.0);

        // Only server errors are logged; client errors are the caller's.
        if problem.status.as_u16() >= 500 {
            tracing::error!(
                status = problem.status.as_u16(),
                name = self.0.name(),
                error = %self.0,
                "Internal server error"
            );
        }

        let rendered = render(problem_json(problem)).unwrap_or_else(|err| {
            tracing::error!(error = %err, "unable to render the problem");
            RenderedResponse::fallback()
        });
        into_response(rendered)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        Self(err.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

/// Convert `anyhow::Error` to `ApiError`.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(err.into())
    }
}

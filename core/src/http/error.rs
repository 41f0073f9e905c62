//! HTTP error taxonomy.
//!
//! One data type, [`HttpError`], covers every named error kind. Each factory
//! fixes the status and title of its kind.

use super::status::HttpErrorStatusCode;

/// An error carrying its canonical HTTP status and title.
///
/// # Examples
///
/// ```
/// use handler_kit_core::http::{HttpError, HttpErrorStatusCode};
///
/// let err = HttpError::not_found("no such user");
/// assert_eq!(err.status(), HttpErrorStatusCode::NotFound);
/// assert_eq!(err.title(), "Not Found");
/// assert_eq!(err.to_string(), "no such user");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HttpError {
    status: HttpErrorStatusCode,
    title: &'static str,
    message: String,
}

impl HttpError {
    /// Message of every [`HttpError::unauthorized`] error.
    pub const UNAUTHORIZED_MESSAGE: &'static str =
        "You must provide a valid API key to access this resource.";

    const fn of(status: HttpErrorStatusCode, title: &'static str, message: String) -> Self {
        Self {
            status,
            title,
            message,
        }
    }

    /// 500 Internal Server Error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::of(
            HttpErrorStatusCode::InternalServerError,
            "Internal Server Error",
            message.into(),
        )
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::of(HttpErrorStatusCode::BadRequest, "Bad Request", message.into())
    }

    /// 401 Unauthorized, with [`HttpError::UNAUTHORIZED_MESSAGE`].
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::of(
            HttpErrorStatusCode::Unauthorized,
            "Unauthorized",
            Self::UNAUTHORIZED_MESSAGE.to_string(),
        )
    }

    /// 403 Forbidden.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::of(HttpErrorStatusCode::Forbidden, "Forbidden", message.into())
    }

    /// 404 Not Found.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::of(HttpErrorStatusCode::NotFound, "Not Found", message.into())
    }

    /// 409 Conflict.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::of(HttpErrorStatusCode::Conflict, "Conflict", message.into())
    }

    /// 422 Unprocessable Entity.
    #[must_use]
    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::of(
            HttpErrorStatusCode::UnprocessableEntity,
            "Unprocessable Entity",
            message.into(),
        )
    }

    /// 429 Too Many Requests.
    #[must_use]
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::of(
            HttpErrorStatusCode::TooManyRequests,
            "Too many request",
            message.into(),
        )
    }

    /// 503 Service Unavailable.
    #[must_use]
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::of(
            HttpErrorStatusCode::ServiceUnavailable,
            "Service Unavailable",
            message.into(),
        )
    }

    /// Status code.
    #[must_use]
    pub const fn status(&self) -> HttpErrorStatusCode {
        self.status
    }

    /// Short, status-specific title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Detail message. Never sent to clients by [`crate::to_problem_json`].
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

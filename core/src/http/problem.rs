//! RFC 7807 problem details and the mapping from handler errors.

use super::status::HttpErrorStatusCode;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Problem type of validation failures.
pub const VALIDATION_PROBLEM_TYPE: &str = "/problem/validation-error";

/// A problem details document.
///
/// Fields beyond the standard ones live in `extra` and are flattened into the
/// serialized object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemJson {
    /// Problem type URI reference.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Short summary.
    pub title: String,
    /// Status code; always an error status.
    pub status: HttpErrorStatusCode,
    /// Human readable explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Extension members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProblemJson {
    /// Problem with only a status and a title.
    #[must_use]
    pub fn new(status: HttpErrorStatusCode, title: impl Into<String>) -> Self {
        Self {
            type_: None,
            title: title.into(),
            status,
            detail: None,
            extra: Map::new(),
        }
    }

    /// Set the problem type.
    #[must_use]
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Set the detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add an extension member.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Map a handler error to the problem sent to HTTP callers.
///
/// Validation errors expose their violations, named HTTP errors expose their
/// title and status, and anything else becomes an opaque 500. Error messages
/// are never copied into the problem.
///
/// ```
/// use handler_kit_core::{to_problem_json, Error};
/// use handler_kit_core::http::{HttpError, HttpErrorStatusCode};
///
/// let problem = to_problem_json(&Error::from(HttpError::not_found("user 42")));
/// assert_eq!(problem.status, HttpErrorStatusCode::NotFound);
/// assert_eq!(problem.title, "Not Found");
/// assert_eq!(problem.detail, None);
/// ```
#[must_use]
pub fn to_problem_json(error: &Error) -> ProblemJson {
    match error {
        Error::Validation(err) => {
            ProblemJson::new(HttpErrorStatusCode::UnprocessableEntity, "Validation Error")
                .with_type(VALIDATION_PROBLEM_TYPE)
                .with_detail("Your request didn't validate")
                .with_extra(
                    "violations",
                    Value::from(err.violations.clone()),
                )
        }
        Error::Http(err) => ProblemJson::new(err.status(), err.title()),
        Error::Other(_) => {
            ProblemJson::new(HttpErrorStatusCode::InternalServerError, "Internal Server Error")
                .with_detail("Something went wrong")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::http::HttpError;
    use crate::validation::ValidationError;
    use serde_json::json;

    #[test]
    fn test_validation_error_problem() {
        let err = Error::from(ValidationError::new(vec![
            "name is required".to_string(),
            "age must be a number".to_string(),
        ]));

        assert_eq!(
            serde_json::to_value(to_problem_json(&err)).unwrap(),
            json!({
                "type": "/problem/validation-error",
                "title": "Validation Error",
                "status": 422,
                "detail": "Your request didn't validate",
                "violations": ["name is required", "age must be a number"],
            })
        );
    }

    #[test]
    fn test_http_error_problem_hides_message() {
        let err = Error::from(HttpError::conflict("row 12 already exists"));

        assert_eq!(
            serde_json::to_value(to_problem_json(&err)).unwrap(),
            json!({ "title": "Conflict", "status": 409 })
        );
    }

    #[test]
    fn test_other_error_problem() {
        let problem = to_problem_json(&Error::msg("database password is hunter2"));

        assert_eq!(problem.status, HttpErrorStatusCode::InternalServerError);
        assert_eq!(problem.title, "Internal Server Error");
        assert_eq!(problem.detail.as_deref(), Some("Something went wrong"));
        assert!(problem.extra.is_empty());
    }

    #[test]
    fn test_problem_deserializes_extra_members() {
        let problem: ProblemJson = serde_json::from_value(json!({
            "title": "Too many request",
            "status": 429,
            "retryAfter": 30,
        }))
        .unwrap();

        assert_eq!(problem.status, HttpErrorStatusCode::TooManyRequests);
        assert_eq!(problem.extra.get("retryAfter"), Some(&json!(30)));
    }
}

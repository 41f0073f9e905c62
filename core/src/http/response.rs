//! Immutable HTTP response values.
//!
//! Every transformation consumes a response and returns a new one, so
//! responses compose with plain method chaining:
//!
//! ```
//! use handler_kit_core::http::{success_json, HttpSuccessStatusCode};
//! use serde_json::json;
//!
//! let res = success_json(json!({ "message": "Ciao luca" }))
//!     .with_header("Cache-Control", "no-store")
//!     .with_status_code(HttpSuccessStatusCode::Accepted);
//!
//! assert_eq!(res.status_code.as_u16(), 202);
//! assert_eq!(res.header("Content-Type"), Some("application/json"));
//! ```

use super::problem::ProblemJson;
use super::status::{HttpErrorStatusCode, HttpStatusCode, HttpSuccessStatusCode};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Response headers. Keys are kept exactly as written.
pub type Headers = BTreeMap<String, String>;

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Baseline hardening headers attached to every response.
pub const SECURITY_HEADERS: [(&str, &str); 13] = [
    (
        "Content-Security-Policy",
        "default-src 'none'; upgrade-insecure-requests",
    ),
    ("Cross-Origin-Embedder-Policy", "require-corp"),
    ("Cross-Origin-Opener-Policy", "same-origin"),
    ("Cross-Origin-Resource-Policy", "same-origin"),
    ("Origin-Agent-Cluster", "?1"),
    ("Referrer-Policy", "no-referrer"),
    (
        "Strict-Transport-Security",
        "max-age=15552000; includeSubDomains",
    ),
    ("X-Content-Type-Options", "nosniff"),
    ("X-DNS-Prefetch-Control", "off"),
    ("X-Download-Options", "noopen"),
    ("X-Frame-Options", "DENY"),
    ("X-Permitted-Cross-Domain-Policies", "none"),
    ("X-XSS-Protection", "0"),
];

/// An HTTP response with a body of type `A` and a status drawn from `S`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse<A, S = HttpStatusCode> {
    /// Status.
    pub status_code: S,
    /// Headers.
    pub headers: Headers,
    /// Body.
    pub body: A,
}

impl<A, S> HttpResponse<A, S> {
    /// A response with no headers at all.
    #[must_use]
    pub const fn new(status_code: S, body: A) -> Self {
        Self {
            status_code,
            headers: Headers::new(),
            body,
        }
    }

    /// Replace the status code.
    #[must_use]
    pub fn with_status_code<T>(self, status_code: T) -> HttpResponse<A, T>
    where
        T: Into<HttpStatusCode>,
    {
        HttpResponse {
            status_code,
            headers: self.headers,
            body: self.body,
        }
    }

    /// Set a header; an existing value for the same key is replaced.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    /// Add the [`SECURITY_HEADERS`] the response does not set already.
    ///
    /// Headers present on the response win over the defaults, whatever their
    /// case, and applying this twice is the same as applying it once.
    #[must_use]
    pub fn with_security_headers(mut self) -> Self {
        for (name, value) in SECURITY_HEADERS {
            if self.header(name).is_none() {
                self.headers.insert(name.to_string(), value.to_string());
            }
        }
        self
    }

    /// Header value, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Transform the body, keeping status and headers.
    #[must_use]
    pub fn map_body<B>(self, f: impl FnOnce(A) -> B) -> HttpResponse<B, S> {
        HttpResponse {
            status_code: self.status_code,
            headers: self.headers,
            body: f(self.body),
        }
    }

    /// Widen the status to [`HttpStatusCode`].
    #[must_use]
    pub fn widen(self) -> HttpResponse<A>
    where
        S: Into<HttpStatusCode>,
    {
        HttpResponse {
            status_code: self.status_code.into(),
            headers: self.headers,
            body: self.body,
        }
    }
}

impl<A: Serialize, S: Into<HttpStatusCode>> HttpResponse<A, S> {
    /// Erase the body into JSON and widen the status.
    ///
    /// Lets one handler return success and problem responses through a
    /// single type.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the body cannot be represented as JSON.
    pub fn into_json(self) -> Result<HttpResponse<Value>, serde_json::Error> {
        let body = serde_json::to_value(&self.body)?;
        Ok(HttpResponse {
            status_code: self.status_code.into(),
            headers: self.headers,
            body,
        })
    }
}

/// 200 with security headers.
#[must_use]
pub fn success<A>(body: A) -> HttpResponse<A, HttpSuccessStatusCode> {
    HttpResponse::new(HttpSuccessStatusCode::Ok, body).with_security_headers()
}

/// [`success`] with `Content-Type: application/json`.
#[must_use]
pub fn success_json<A>(body: A) -> HttpResponse<A, HttpSuccessStatusCode> {
    success(body).with_header(CONTENT_TYPE, "application/json")
}

/// [`success_json`] with status 201.
#[must_use]
pub fn created_json<A>(body: A) -> HttpResponse<A, HttpSuccessStatusCode> {
    success_json(body).with_status_code(HttpSuccessStatusCode::Created)
}

/// 204 with security headers and no body.
#[must_use]
pub fn empty() -> HttpResponse<(), HttpSuccessStatusCode> {
    HttpResponse::new(HttpSuccessStatusCode::NoContent, ()).with_security_headers()
}

/// Problem response: status from the problem, `application/problem+json`,
/// security headers.
#[must_use]
pub fn problem_json(problem: ProblemJson) -> HttpResponse<ProblemJson, HttpErrorStatusCode> {
    HttpResponse::new(problem.status, problem)
        .with_header(CONTENT_TYPE, "application/problem+json")
        .with_security_headers()
}

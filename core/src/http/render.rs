//! Turning typed responses into bytes for a host.
//!
//! Both HTTP hosts write bodies the same way, so the decision lives here:
//! the `Content-Type` header picks the encoding.

use super::response::{HttpResponse, CONTENT_TYPE, Headers};
use super::status::{HttpErrorStatusCode, HttpStatusCode};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

/// Body of [`RenderedResponse::fallback`].
pub const FALLBACK_BODY: &str = "Internal server error";

/// Errors produced while rendering a response body.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The body cannot be written with the declared content type.
    #[error("body cannot be rendered as {content_type}")]
    BodyTypeMismatch {
        /// The declared content type.
        content_type: String,
    },

    /// The body could not be serialized.
    #[error("failed to serialize response body: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A response ready to be written by a host.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResponse {
    /// Status.
    pub status_code: HttpStatusCode,
    /// Headers, including any `Content-Type` added while rendering.
    pub headers: Headers,
    /// Encoded body.
    pub body: Bytes,
}

impl RenderedResponse {
    /// The plain 500 answered when a response cannot be rendered.
    #[must_use]
    pub fn fallback() -> Self {
        let response = HttpResponse::new(HttpErrorStatusCode::InternalServerError, ())
            .with_header(CONTENT_TYPE, "text/plain")
            .with_security_headers();

        Self {
            status_code: response.status_code.into(),
            headers: response.headers,
            body: Bytes::from_static(FALLBACK_BODY.as_bytes()),
        }
    }
}

enum Encoding {
    Json,
    Text,
    Untyped,
    Other,
}

fn encoding(content_type: Option<&str>) -> Encoding {
    let Some(content_type) = content_type else {
        return Encoding::Untyped;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/json" || essence.ends_with("+json") {
        Encoding::Json
    } else if essence == "text/plain" {
        Encoding::Text
    } else {
        Encoding::Other
    }
}

/// Encode a response for the wire.
///
/// | Content-Type | string body | `null` body | other body |
/// |--------------|-------------|-------------|------------|
/// | JSON (`application/json`, `*+json`) | JSON | JSON | JSON |
/// | `text/plain` | verbatim | empty | error |
/// | absent | verbatim | empty | JSON, `Content-Type: application/json` added |
/// | anything else | verbatim | empty | JSON |
///
/// # Errors
///
/// Returns [`RenderError::BodyTypeMismatch`] for a non-string body declared as
/// `text/plain`, and [`RenderError::Serialize`] when the body is not
/// representable as JSON.
///
/// # Example
///
/// ```
/// use handler_kit_core::http::{render, success};
///
/// let rendered = render(success("Hello world!").with_header("Content-Type", "text/plain")).unwrap();
/// assert_eq!(rendered.body, "Hello world!");
/// ```
pub fn render<A, S>(response: HttpResponse<A, S>) -> Result<RenderedResponse, RenderError>
where
    A: Serialize,
    S: Into<HttpStatusCode>,
{
    let response = response.into_json()?;
    let mut headers = response.headers;
    let content_type = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(CONTENT_TYPE))
        .map(|(_, value)| value.clone());

    let body = match (encoding(content_type.as_deref()), response.body) {
        (Encoding::Json, body) => Bytes::from(serde_json::to_vec(&body)?),
        (_, Value::String(text)) => Bytes::from(text),
        (_, Value::Null) => Bytes::new(),
        (Encoding::Text, _) => {
            return Err(RenderError::BodyTypeMismatch {
                content_type: content_type.unwrap_or_default(),
            });
        }
        (Encoding::Untyped, body) => {
            headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
            Bytes::from(serde_json::to_vec(&body)?)
        }
        (Encoding::Other, body) => Bytes::from(serde_json::to_vec(&body)?),
    };

    Ok(RenderedResponse {
        status_code: response.status_code,
        headers,
        body,
    })
}

//! Normalized HTTP request.
//!
//! Every HTTP host translates its native request into an [`HttpRequest`]
//! before the handler sees it, so handlers never depend on the host.

use crate::validation::ValidationError;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// String-keyed parameters (path, query, headers).
pub type Params = BTreeMap<String, String>;

/// Supported request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
    /// TRACE
    Trace,
    /// CONNECT
    Connect,
}

impl HttpMethod {
    /// Uppercase method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a method outside [`HttpMethod`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method {0:?}")]
pub struct UnsupportedMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "TRACE" => Ok(Self::Trace),
            "CONNECT" => Ok(Self::Connect),
            other => Err(UnsupportedMethod(other.to_string())),
        }
    }
}

/// Request payload as delivered by the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Raw bytes, untouched by the host.
    Bytes(Bytes),
    /// A body the host already parsed as JSON.
    Json(Value),
}

impl RequestBody {
    /// Interpret a JSON value handed over by a host binding.
    ///
    /// `null` is no body, a string is kept as raw bytes, anything else stays JSON.
    #[must_use]
    pub fn from_binding(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(text) => Self::Bytes(Bytes::from(text)),
            other => Self::Json(other),
        }
    }

    /// Whether there is no body.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

// Raw bytes are logged as (lossy) text.
impl Serialize for RequestBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Bytes(bytes) => serializer.serialize_str(&String::from_utf8_lossy(bytes)),
            Self::Json(value) => value.serialize(serializer),
        }
    }
}

/// Host-independent HTTP request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpRequest {
    /// Method.
    pub method: HttpMethod,
    /// Path parameters captured by the host router.
    pub path: Params,
    /// Query string parameters.
    pub query: Params,
    /// Headers.
    pub headers: Params,
    /// Payload.
    pub body: RequestBody,
    /// Original URL (path and query as received).
    pub url: String,
}

impl HttpRequest {
    /// A `GET` request for `url` with no parameters, headers or body.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: Params::new(),
            query: Params::new(),
            headers: Params::new(),
            body: RequestBody::Empty,
            url: url.into(),
        }
    }

    /// Set the method.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Add a path parameter.
    #[must_use]
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    /// Set the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
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

    /// Query parameter value.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Path parameter value.
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path.get(name).map(String::as_str)
    }

    /// Decode the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the body is missing or does not
    /// match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ValidationError> {
        let decoded = match &self.body {
            RequestBody::Empty => return Err(ValidationError::new(vec!["body is empty".to_string()])),
            RequestBody::Bytes(bytes) => serde_json::from_slice(bytes),
            RequestBody::Json(value) => T::deserialize(value),
        };
        decoded.map_err(|e| ValidationError::new(vec![e.to_string()]))
    }
}

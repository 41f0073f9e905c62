//! HTTP trigger payloads and responses.

use bytes::Bytes;
use handler_kit_core::http::{
    Headers, HttpMethod, HttpRequest, Params, RenderedResponse, RequestBody,
};
use handler_kit_core::validation::{Decoder, Violations};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Request as bound by an `httpTrigger` binding.
#[derive(Debug, Clone, Deserialize)]
struct AzureHttpRequest {
    method: HttpMethod,
    url: String,
    params: Params,
    query: Params,
    headers: Params,
    #[serde(default)]
    body: Value,
}

impl From<AzureHttpRequest> for HttpRequest {
    fn from(req: AzureHttpRequest) -> Self {
        Self {
            method: req.method,
            path: req.params,
            query: req.query,
            headers: req.headers,
            body: RequestBody::from_binding(req.body),
            url: req.url,
        }
    }
}

/// Decodes an `httpTrigger` payload into an [`HttpRequest`].
///
/// The runtime's `params` become the request's path parameters. A string body
/// is kept as raw bytes, `null` means no body, anything else stays JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpRequestFromAzure;

impl Decoder<Value> for HttpRequestFromAzure {
    type Output = HttpRequest;

    fn decode(&self, input: &Value) -> Result<HttpRequest, Violations> {
        AzureHttpRequest::deserialize(input)
            .map(HttpRequest::from)
            .map_err(|e| vec![e.to_string()])
    }
}

fn lossy_text<S: Serializer>(body: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(body))
}

/// Response returned to the runtime by an HTTP function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureHttpResponse {
    /// Numeric status.
    pub status_code: u16,
    /// Headers.
    pub headers: Headers,
    /// Encoded body.
    #[serde(serialize_with = "lossy_text")]
    pub body: Bytes,
}

impl AzureHttpResponse {
    /// Body parsed as JSON, if it is JSON.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

impl From<RenderedResponse> for AzureHttpResponse {
    fn from(rendered: RenderedResponse) -> Self {
        Self {
            status_code: rendered.status_code.as_u16(),
            headers: rendered.headers,
            body: rendered.body,
        }
    }
}

//! Translating axum requests into [`HttpRequest`].

use axum::extract::{FromRequestParts, OriginalUri, Path, Query};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};
use bytes::Bytes;
use handler_kit_core::http::{HttpMethod, HttpRequest, Params, RequestBody};
use handler_kit_core::validation::{Decoder, Violations};
use std::collections::HashMap;

/// A buffered axum request, as handed to [`HttpRequestFromAxum`].
#[derive(Debug, Clone)]
pub struct AxumRequest {
    /// Method.
    pub method: Method,
    /// URI as routed (without any nesting prefix).
    pub uri: Uri,
    /// URI as received, when axum recorded it.
    pub original_uri: Option<Uri>,
    /// Parameters captured by the router.
    pub path_params: HashMap<String, String>,
    /// Headers.
    pub headers: HeaderMap,
    /// Buffered body.
    pub body: Bytes,
}

impl AxumRequest {
    /// Collect everything the decoder needs from the request parts.
    ///
    /// Path parameters are empty when the request was not routed through a
    /// path with captures.
    pub async fn from_parts(parts: &mut Parts, body: Bytes) -> Self {
        let path_params = Path::<HashMap<String, String>>::from_request_parts(parts, &())
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            original_uri: parts
                .extensions
                .get::<OriginalUri>()
                .map(|OriginalUri(uri)| uri.clone()),
            path_params,
            headers: parts.headers.clone(),
            body,
        }
    }
}

fn path_and_query(uri: &Uri) -> String {
    uri.path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string)
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

fn join_into(params: &mut Params, key: String, value: &str) {
    params
        .entry(key)
        .and_modify(|joined| {
            joined.push(',');
            joined.push_str(value);
        })
        .or_insert_with(|| value.to_string());
}

/// Decodes an [`AxumRequest`] into an [`HttpRequest`].
///
/// - methods outside [`HttpMethod`] are violations
/// - header names come lowercased; repeated headers are joined with `,`
/// - non UTF-8 header values are violations
/// - repeated query keys are joined with `,`
/// - a JSON body that parses becomes [`RequestBody::Json`], any other
///   non-empty body is kept as raw bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpRequestFromAxum;

impl Decoder<AxumRequest> for HttpRequestFromAxum {
    type Output = HttpRequest;

    fn decode(&self, input: &AxumRequest) -> Result<HttpRequest, Violations> {
        let mut violations = Violations::new();

        let method = input
            .method
            .as_str()
            .parse::<HttpMethod>()
            .map_err(|e| violations.push(e.to_string()))
            .ok();

        let mut headers = Params::new();
        for (name, value) in &input.headers {
            match value.to_str() {
                Ok(value) => join_into(&mut headers, name.as_str().to_string(), value),
                Err(_) => violations.push(format!("header {name} is not valid UTF-8")),
            }
        }

        let mut query = Params::new();
        match Query::<Vec<(String, String)>>::try_from_uri(&input.uri) {
            Ok(Query(pairs)) => {
                for (key, value) in pairs {
                    join_into(&mut query, key, &value);
                }
            }
            Err(e) => violations.push(e.body_text()),
        }

        let Some(method) = method else {
            return Err(violations);
        };
        if !violations.is_empty() {
            return Err(violations);
        }

        let body = if input.body.is_empty() {
            RequestBody::Empty
        } else {
            headers
                .get("content-type")
                .filter(|content_type| is_json(content_type))
                .and_then(|_| serde_json::from_slice(&input.body).ok())
                .map_or_else(|| RequestBody::Bytes(input.body.clone()), RequestBody::Json)
        };

        Ok(HttpRequest {
            method,
            path: input.path_params.clone().into_iter().collect(),
            query,
            headers,
            body,
            url: path_and_query(input.original_uri.as_ref().unwrap_or(&input.uri)),
        })
    }
}

//! HTTP model shared by every HTTP host.
//!
//! - [`HttpRequest`]: the normalized request handlers receive
//! - [`HttpResponse`] and its constructors ([`success`], [`success_json`],
//!   [`created_json`], [`empty`], [`problem_json`])
//! - [`HttpError`]: named error kinds with fixed status and title
//! - [`ProblemJson`] and [`to_problem_json`]: what HTTP callers see on failure
//! - [`render`]: encoding a response body according to its content type
//! - [`respond`]: what a host answers for a handler result, success or failure
//! - [`parse_multipart`]: `multipart/form-data` bodies

pub mod error;
pub mod multipart;
pub mod problem;
pub mod render;
pub mod request;
pub mod respond;
pub mod response;
pub mod status;

pub use error::HttpError;
pub use multipart::{parse_multipart, Multipart};
pub use problem::{to_problem_json, ProblemJson, VALIDATION_PROBLEM_TYPE};
pub use render::{render, RenderError, RenderedResponse, FALLBACK_BODY};
pub use request::{HttpMethod, HttpRequest, Params, RequestBody, UnsupportedMethod};
pub use respond::{internal_server_error, respond, RENDER_ERROR_MESSAGE, UNCAUGHT_ERROR_MESSAGE};
pub use response::{
    created_json, empty, problem_json, success, success_json, Headers, HttpResponse,
    CONTENT_TYPE, SECURITY_HEADERS,
};
pub use status::{
    HttpErrorStatusCode, HttpRedirectionStatusCode, HttpStatusCode, HttpSuccessStatusCode,
    UnsupportedStatusCode,
};

//! End-to-end scenarios over the host-independent pipeline.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use bytes::Bytes;
use handler_kit_core::http::{
    parse_multipart, render, success, success_json, HttpMethod, HttpRequest, RenderError,
    RequestBody,
};
use handler_kit_core::validation::{FnDecoder, Violations};
use handler_kit_core::{of, to_problem_json, Context, Error, HandlerEnvironment};
use handler_kit_logger::Level;
use handler_kit_testing::test_logger;
use serde_json::json;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Clone)]
struct Deps {
    lang: &'static str,
}

fn passthrough() -> FnDecoder<impl Fn(&HttpRequest) -> Result<HttpRequest, Violations>, HttpRequest>
{
    FnDecoder::new(|req: &HttpRequest| -> Result<HttpRequest, Violations> { Ok(req.clone()) })
}

const MULTIPART_BODY: &[u8] = b"--testboundary\r\n\
Content-Disposition:form-data; name=\"file1\"; filename=\"file1.txt\";\r\n\
Content-Type: text/plain\r\n\
\r\n\
Hello from file1.txt\r\n\
--testboundary\r\n\
Content-Disposition: form-data; name=\"file2\"; filename=\"hello.json\";\r\n\
Content-Type: application/json\r\n\
\r\n\
{\"message\":\"it works!\"}\r\n\
--testboundary--";

// ============================================================================
// Handler pipeline
// ============================================================================

#[tokio::test]
async fn test_greeting_handler() {
    let greet = of(|req: HttpRequest, ctx: Context<Deps>| async move {
        let name = req.query_param("name").unwrap_or("Test").to_string();
        let greeting = if ctx.lang == "it" { "Ciao" } else { "Hello" };
        Ok(success_json(json!({ "message": format!("{greeting} {name}") })))
    });
    let (logger, sink) = test_logger();
    let req = HttpRequest::new("/greet?name=luca").with_query("name", "luca");

    let res = greet
        .run(HandlerEnvironment::new(req, passthrough(), logger, Deps { lang: "it" }))
        .await
        .unwrap();

    assert_eq!(res.status_code.as_u16(), 200);
    assert_eq!(res.body, json!({ "message": "Ciao luca" }));

    let records = sink.records();
    assert_eq!(sink.count_at(Level::Debug), 1);
    assert_eq!(records[0]["input"]["query"]["name"], "luca");
    assert_eq!(records[0]["input"]["method"], "GET");
}

#[tokio::test]
async fn test_failing_handler_maps_to_internal_server_error() {
    let fail = of(|_: HttpRequest, _ctx: Context<Deps>| async move {
        Err::<(), _>(Error::msg("unexpected error!"))
    });
    let (logger, _sink) = test_logger();

    let err = fail
        .run(HandlerEnvironment::new(
            HttpRequest::new("/"),
            passthrough(),
            logger,
            Deps { lang: "en" },
        ))
        .await
        .unwrap_err();

    let problem = to_problem_json(&err);
    assert_eq!(problem.status.as_u16(), 500);
    assert_eq!(problem.detail.as_deref(), Some("Something went wrong"));
}

// ============================================================================
// Body rendering
// ============================================================================

#[test]
fn test_text_plain_string_body() {
    let rendered =
        render(success("Hello world!").with_header("Content-Type", "text/plain")).unwrap();

    assert_eq!(rendered.status_code.as_u16(), 200);
    assert_eq!(rendered.body, "Hello world!");
}

#[test]
fn test_text_plain_object_body_is_a_mismatch() {
    let err = render(
        success(json!({ "message": "Hello world!" })).with_header("Content-Type", "text/plain"),
    )
    .unwrap_err();

    assert!(matches!(err, RenderError::BodyTypeMismatch { .. }));
}

// ============================================================================
// Multipart
// ============================================================================

#[tokio::test]
async fn test_multipart_two_files() {
    let req = HttpRequest::new("/upload")
        .with_method(HttpMethod::Post)
        .with_header("content-type", "multipart/form-data; boundary=testboundary")
        .with_body(RequestBody::Bytes(Bytes::from_static(MULTIPART_BODY)));

    let parts = parse_multipart(&req).await.unwrap();

    assert_eq!(parts.len(), 2);

    assert_eq!(parts[0].name.as_deref(), Some("file1"));
    assert_eq!(parts[0].filename.as_deref(), Some("file1.txt"));
    assert_eq!(parts[0].content_type.as_deref(), Some("text/plain"));
    assert_eq!(parts[0].data, Bytes::from_static(b"Hello from file1.txt"));

    assert_eq!(parts[1].name.as_deref(), Some("file2"));
    assert_eq!(parts[1].filename.as_deref(), Some("hello.json"));
    assert_eq!(parts[1].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        parts[1].data,
        Bytes::from_static(br#"{"message":"it works!"}"#)
    );
}

#[tokio::test]
async fn test_multipart_header_lookup_ignores_case() {
    let req = HttpRequest::new("/upload")
        .with_header("Content-Type", "multipart/form-data; boundary=testboundary")
        .with_body(RequestBody::Bytes(Bytes::from_static(MULTIPART_BODY)));

    assert_eq!(parse_multipart(&req).await.unwrap().len(), 2);
}

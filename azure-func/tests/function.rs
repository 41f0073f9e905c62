//! Integration tests for the event and HTTP function adapters.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use handler_kit_azure_func::{
    azure_function, http_azure_function, BindingDefinition, ContextLevel, FunctionError,
    InvocationContext, LogBuffer, TriggerError,
};
use handler_kit_core::http::{success, success_json, HttpError, HttpRequest};
use handler_kit_core::validation::JsonDecoder;
use handler_kit_core::{of, Context, Error};
use serde_json::{json, Value};
use std::sync::Arc;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Clone)]
struct Lang {
    lang: &'static str,
}

fn invoke(trigger: &str, name: &str, payload: Value) -> InvocationContext {
    InvocationContext::new("my-id", "Greet")
        .with_binding_definition(BindingDefinition::input(trigger, name))
        .with_binding_definition(BindingDefinition::output("http", "$return"))
        .with_binding(name, payload)
}

fn http_request(query: Value) -> Value {
    json!({
        "method": "GET",
        "url": "https://my-test.url.com/api",
        "params": {},
        "query": query,
        "headers": {},
        "body": null,
    })
}

fn greet() -> handler_kit_core::Handler<
    HttpRequest,
    handler_kit_core::http::HttpResponse<Value, handler_kit_core::http::HttpSuccessStatusCode>,
    Lang,
> {
    of(|req: HttpRequest, ctx: Context<Lang>| async move {
        let name = req.query_param("name").unwrap_or("Test").to_string();
        let message = if ctx.lang == "it" {
            format!("Ciao {name}")
        } else {
            format!("Hello {name}")
        };
        Ok(success_json(json!({ "message": message })))
    })
}

// ============================================================================
// HTTP trigger
// ============================================================================

#[tokio::test]
async fn test_wires_the_http_request() {
    let function = http_azure_function(greet(), Lang { lang: "it" });

    let res = function(invoke("httpTrigger", "req", http_request(json!({ "name": "luca" })))).await;

    assert_eq!(res.status_code, 200);
    assert_eq!(res.json(), Some(json!({ "message": "Ciao luca" })));
    assert_eq!(
        res.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_defaults_apply() {
    let function = http_azure_function(greet(), Lang { lang: "en" });

    let res = function(invoke("httpTrigger", "req", http_request(json!({})))).await;

    assert_eq!(res.json(), Some(json!({ "message": "Hello Test" })));
    assert_eq!(
        res.headers.get("X-Content-Type-Options").map(String::as_str),
        Some("nosniff")
    );
}

#[tokio::test]
async fn test_recovers_from_uncaught_errors() {
    let failing = of(|_: HttpRequest, _ctx: Context<()>| async move {
        Err::<handler_kit_core::http::HttpResponse<()>, _>(Error::msg("unhandled error"))
    });
    let function = http_azure_function(failing, ());
    let buffer = Arc::new(LogBuffer::new());

    let res = function(
        invoke("httpTrigger", "req", http_request(json!({}))).with_log(buffer.clone()),
    )
    .await;

    assert_eq!(res.status_code, 500);
    assert_eq!(
        res.headers.get("Content-Type").map(String::as_str),
        Some("application/problem+json")
    );
    assert_eq!(
        res.json(),
        Some(json!({
            "title": "Internal Server Error",
            "status": 500,
        }))
    );

    assert_eq!(buffer.count_at(ContextLevel::Error), 1);
    let (_, line) = buffer
        .lines()
        .into_iter()
        .find(|(level, _)| *level == ContextLevel::Error)
        .unwrap();
    let record: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(record["message"], "uncaught error from handler");
    assert_eq!(record["error"]["message"], "unhandled error");
    assert_eq!(record["invocationId"], "my-id");
}

#[tokio::test]
async fn test_http_errors_are_hidden_too() {
    let forbidden = of(|_: HttpRequest, _ctx: Context<()>| async move {
        Err::<handler_kit_core::http::HttpResponse<()>, _>(HttpError::forbidden("no").into())
    });
    let function = http_azure_function(forbidden, ());

    let res = function(invoke("httpTrigger", "req", http_request(json!({})))).await;

    assert_eq!(res.status_code, 500);
}

#[tokio::test]
async fn test_invalid_request_payload_is_a_500() {
    let function = http_azure_function(greet(), Lang { lang: "it" });
    let buffer = Arc::new(LogBuffer::new());

    let res = function(
        invoke("httpTrigger", "req", json!({ "method": "BREW" })).with_log(buffer.clone()),
    )
    .await;

    assert_eq!(res.status_code, 500);
    assert_eq!(buffer.count_at(ContextLevel::Error), 1);
}

#[tokio::test]
async fn test_body_type_mismatch_answers_plain_500() {
    let text = of(|_: HttpRequest, _ctx: Context<()>| async move {
        Ok(success(json!({ "message": "Hello world!" })).with_header("Content-Type", "text/plain"))
    });
    let function = http_azure_function(text, ());
    let buffer = Arc::new(LogBuffer::new());

    let res = function(
        invoke("httpTrigger", "req", http_request(json!({}))).with_log(buffer.clone()),
    )
    .await;

    assert_eq!(res.status_code, 500);
    assert_eq!(res.body, "Internal server error");
    assert_eq!(buffer.count_at(ContextLevel::Error), 1);
}

#[tokio::test]
async fn test_text_plain_body() {
    let text = of(|_: HttpRequest, _ctx: Context<()>| async move {
        Ok(success("Hello world!").with_header("Content-Type", "text/plain"))
    });
    let function = http_azure_function(text, ());

    let res = function(invoke("httpTrigger", "req", http_request(json!({})))).await;

    assert_eq!(res.status_code, 200);
    assert_eq!(res.body, "Hello world!");
}

// ============================================================================
// Event triggers
// ============================================================================

#[tokio::test]
async fn test_queue_trigger_echo() {
    let echo = of(|input: String, _ctx: Context<()>| async move { Ok(input) });
    let function = azure_function(echo, JsonDecoder::<String>::new(), ());

    let out = function(invoke("queueTrigger", "str", json!("ping"))).await.unwrap();

    assert_eq!(out, "ping");
}

#[tokio::test]
async fn test_event_failures_are_returned_without_logging() {
    let failing = of(|_: String, _ctx: Context<()>| async move {
        Err::<(), _>(Error::msg("try again"))
    });
    let function = azure_function(failing, JsonDecoder::<String>::new(), ());
    let buffer = Arc::new(LogBuffer::new());

    let err = function(invoke("queueTrigger", "str", json!("ping")).with_log(buffer.clone()))
        .await
        .unwrap_err();

    assert!(matches!(err, FunctionError::Handler(Error::Other(_))));
    assert!(!err.is_configuration());
    assert_eq!(buffer.count_at(ContextLevel::Error), 0);
}

#[tokio::test]
async fn test_event_validation_failure() {
    let echo = of(|input: String, _ctx: Context<()>| async move { Ok(input) });
    let function = azure_function(echo, JsonDecoder::<String>::new(), ());

    let err = function(invoke("queueTrigger", "str", json!(42))).await.unwrap_err();

    assert!(matches!(err, FunctionError::Handler(Error::Validation(_))));
}

#[tokio::test]
async fn test_missing_trigger_is_a_configuration_error() {
    let echo = of(|input: String, _ctx: Context<()>| async move { Ok(input) });
    let function = azure_function(echo, JsonDecoder::<String>::new(), ());

    let err = function(InvocationContext::new("my-id", "Echo")).await.unwrap_err();

    assert!(err.is_configuration());
    assert!(matches!(err, FunctionError::Trigger(TriggerError::NotSupported)));
}

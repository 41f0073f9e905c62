//! # Handler Kit Azure Functions
//!
//! Runs handler-kit handlers inside the Azure Functions runtime.
//!
//! The runtime hands every invocation an [`InvocationContext`]. The adapters
//! in this crate read the trigger payload from it, build a [`Logger`] on the
//! context log, run the handler and translate the outcome:
//!
//! - **Event triggers** ([`azure_function`]): the handler's value is returned
//!   as-is and failures are returned to the runtime, which decides whether to
//!   redeliver.
//! - **HTTP triggers** ([`http_azure_function`]): the response is rendered
//!   according to its `Content-Type`; failures are logged and answered with a
//!   500 problem.
//!
//! ## Example
//!
//! ```
//! use handler_kit_azure_func::{http_azure_function, BindingDefinition, InvocationContext};
//! use handler_kit_core::http::{success_json, HttpRequest};
//! use handler_kit_core::{of, Context};
//! use serde_json::json;
//!
//! let hello = of(|req: HttpRequest, _ctx: Context<()>| async move {
//!     let name = req.query_param("name").unwrap_or("Test").to_string();
//!     Ok(success_json(json!({ "message": format!("Hello {name}") })))
//! });
//! let function = http_azure_function(hello, ());
//!
//! let ctx = InvocationContext::new("my-id", "Hello")
//!     .with_binding_definition(BindingDefinition::input("httpTrigger", "req"))
//!     .with_binding("req", json!({
//!         "method": "GET",
//!         "url": "https://my-test.url.com/api/hello",
//!         "params": {},
//!         "query": {},
//!         "headers": {},
//!         "body": null,
//!     }));
//!
//! let res = tokio_test::block_on(function(ctx));
//! assert_eq!(res.status_code, 200);
//! assert_eq!(res.json(), Some(json!({ "message": "Hello Test" })));
//! ```
//!
//! [`Logger`]: handler_kit_logger::Logger

pub mod context;
pub mod function;
pub mod http;
pub mod logger;
pub mod trigger;

pub use context::{
    BindingDefinition, ContextLevel, ContextLog, InvocationContext, LogBuffer, TracingContextLog,
};
pub use function::{
    azure_function, http_azure_function, AzureFunction, FunctionError, HttpAzureFunction,
};
pub use http::{AzureHttpResponse, HttpRequestFromAzure};
pub use logger::{context_logger, ContextSink};
pub use trigger::{function_trigger, trigger_binding_data, TriggerError, TriggerKind};

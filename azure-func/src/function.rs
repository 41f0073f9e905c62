//! Adapting handlers to functions.
//!
//! - [`azure_function`]: event triggers (queue, blob, event hub, Cosmos DB).
//!   Failures are returned to the runtime so its retry policy can redeliver
//!   the event.
//! - [`http_azure_function`]: HTTP triggers. Every failure is logged and
//!   answered with a 500 problem; callers never see the original error.

use crate::context::InvocationContext;
use crate::http::{AzureHttpResponse, HttpRequestFromAzure};
use crate::logger::context_logger;
use crate::trigger::{trigger_binding_data, TriggerError};
use futures::future::{BoxFuture, FutureExt};
use handler_kit_core::http::{respond, HttpRequest, HttpResponse, HttpStatusCode};
use handler_kit_core::validation::Decoder;
use handler_kit_core::{Error, Handler, HandlerEnvironment};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Why an event-triggered function failed.
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    /// The invocation has no usable trigger payload.
    #[error(transparent)]
    Trigger(#[from] TriggerError),

    /// The handler failed.
    #[error(transparent)]
    Handler(#[from] Error),
}

impl FunctionError {
    /// Whether the failure comes from the function's binding configuration
    /// rather than from the event itself.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Trigger(_))
    }
}

/// An event-triggered function.
pub type AzureFunction<A> =
    Arc<dyn Fn(InvocationContext) -> BoxFuture<'static, Result<A, FunctionError>> + Send + Sync>;

/// An HTTP-triggered function. It always answers.
pub type HttpAzureFunction =
    Arc<dyn Fn(InvocationContext) -> BoxFuture<'static, AzureHttpResponse> + Send + Sync>;

/// Adapt `handler` to an event-triggered function.
///
/// The trigger payload is decoded with `decoder`; `deps` is cloned for every
/// invocation.
///
/// # Example
///
/// ```
/// use handler_kit_azure_func::{azure_function, BindingDefinition, InvocationContext};
/// use handler_kit_core::of;
/// use handler_kit_core::validation::JsonDecoder;
/// use serde_json::json;
///
/// let echo = of(|input: String, _ctx: handler_kit_core::Context<()>| async move { Ok(input) });
/// let function = azure_function(echo, JsonDecoder::<String>::new(), ());
///
/// let ctx = InvocationContext::new("my-id", "Echo")
///     .with_binding_definition(BindingDefinition::input("queueTrigger", "str"))
///     .with_binding("str", json!("ping"));
///
/// assert_eq!(tokio_test::block_on(function(ctx)).unwrap(), "ping");
/// ```
pub fn azure_function<I, A, R, D>(handler: Handler<I, A, R>, decoder: D, deps: R) -> AzureFunction<A>
where
    I: Serialize + Send + 'static,
    A: Send + 'static,
    R: Clone + Send + Sync + 'static,
    D: Decoder<Value, Output = I> + Clone + 'static,
{
    Arc::new(move |ctx: InvocationContext| {
        let handler = handler.clone();
        let decoder = decoder.clone();
        let deps = deps.clone();

        async move {
            let input = trigger_binding_data(&ctx)?.clone();
            let env = HandlerEnvironment::new(input, decoder, context_logger(&ctx), deps);
            Ok::<A, FunctionError>(handler.run(env).await?)
        }
        .boxed()
    })
}

/// Adapt an HTTP `handler` to an HTTP-triggered function.
///
/// The request is decoded from the `httpTrigger` payload. Successful responses
/// are rendered according to their `Content-Type`. Any failure, including an
/// undecodable request or a missing trigger, is logged as
/// `"uncaught error from handler"` and answered with a 500 problem.
pub fn http_azure_function<A, S, R>(
    handler: Handler<HttpRequest, HttpResponse<A, S>, R>,
    deps: R,
) -> HttpAzureFunction
where
    A: Serialize + Send + 'static,
    S: Into<HttpStatusCode> + Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    Arc::new(move |ctx: InvocationContext| {
        let handler = handler.clone();
        let deps = deps.clone();

        async move {
            let logger = context_logger(&ctx);
            let result = match trigger_binding_data(&ctx) {
                Ok(input) => {
                    let env = HandlerEnvironment::new(
                        input.clone(),
                        HttpRequestFromAzure,
                        logger.clone(),
                        deps,
                    );
                    handler.run(env).await
                }
                Err(err) => Err(Error::other(err)),
            };

            AzureHttpResponse::from(respond(&logger, result))
        }
        .boxed()
    })
}

//! Handler core: validation, logging and the user computation composed into
//! one host-independent unit.
//!
//! A [`Handler`] is built once with [`of`] and run once per request with a
//! fresh [`HandlerEnvironment`]. Running it:
//!
//! 1. decodes the raw input with the environment's decoder; a failure becomes
//!    [`Error::Validation`] and the computation is never invoked
//! 2. logs `"input decoded"` at debug level; sink failures are swallowed
//! 3. invokes the computation with the decoded input and a [`Context`]
//!
//! # Example
//!
//! ```
//! use handler_kit_core::handler::{of, Context, HandlerEnvironment};
//! use handler_kit_core::validation::JsonDecoder;
//! use handler_kit_logger::{Level, LogError, Logger};
//! use serde_json::json;
//!
//! #[derive(Clone)]
//! struct Deps {
//!     greeting: &'static str,
//! }
//!
//! let greet = of(|name: String, ctx: Context<Deps>| async move {
//!     Ok(format!("{} {name}", ctx.greeting))
//! });
//!
//! let env = HandlerEnvironment::new(
//!     json!("luca"),
//!     JsonDecoder::<String>::new(),
//!     Logger::new(|_: &str, _: Level| -> Result<(), LogError> { Ok(()) }),
//!     Deps { greeting: "Ciao" },
//! );
//!
//! let message = tokio_test::block_on(greet.run(env)).unwrap();
//! assert_eq!(message, "Ciao luca");
//! ```

use crate::error::{Error, Result};
use crate::validation::{parse, Decoder};
use futures::future::{BoxFuture, FutureExt};
use handler_kit_logger::Logger;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;

/// Everything one handler run needs.
///
/// Built fresh by a host adapter for each invocation and consumed by
/// [`Handler::run`]. All fields are required, so a missing logger or decoder
/// is a compile error rather than a runtime check.
pub struct HandlerEnvironment<U, D, R> {
    /// Raw input as delivered by the host.
    pub input: U,
    /// Decoder from the raw input to the handler's input type.
    pub input_decoder: D,
    /// Logger bound to the host's sink.
    pub logger: Logger,
    /// Caller-supplied dependencies.
    pub deps: R,
}

impl<U, D, R> HandlerEnvironment<U, D, R> {
    /// Bundle the pieces of an environment.
    #[must_use]
    pub const fn new(input: U, input_decoder: D, logger: Logger, deps: R) -> Self {
        Self {
            input,
            input_decoder,
            logger,
            deps,
        }
    }
}

/// What a running computation can read: the logger and the dependencies.
///
/// Derefs to the dependencies, so `ctx.lang` reads `deps.lang`.
#[derive(Debug, Clone)]
pub struct Context<R> {
    /// Logger bound to the host's sink.
    pub logger: Logger,
    /// Caller-supplied dependencies.
    pub deps: R,
}

impl<R> Deref for Context<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.deps
    }
}

type Compute<I, A, R> = dyn Fn(I, Context<R>) -> BoxFuture<'static, Result<A>> + Send + Sync;

/// A deferred computation from a decoded `I` to `A`, reading `R`.
///
/// Holds no mutable state; cloning shares the computation.
pub struct Handler<I, A, R> {
    compute: Arc<Compute<I, A, R>>,
}

impl<I, A, R> Clone for Handler<I, A, R> {
    fn clone(&self) -> Self {
        Self {
            compute: Arc::clone(&self.compute),
        }
    }
}

impl<I, A, R> fmt::Debug for Handler<I, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("input", &std::any::type_name::<I>())
            .field("output", &std::any::type_name::<A>())
            .finish_non_exhaustive()
    }
}

/// Build a [`Handler`] from an async computation.
pub fn of<I, A, R, F, Fut>(compute: F) -> Handler<I, A, R>
where
    F: Fn(I, Context<R>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<A>> + Send + 'static,
{
    Handler {
        compute: Arc::new(move |input, ctx| compute(input, ctx).boxed()),
    }
}

impl<I, A, R> Handler<I, A, R> {
    /// Decode the input, log it, and run the computation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the input does not decode, otherwise
    /// whatever the computation returns.
    pub async fn run<U, D>(&self, env: HandlerEnvironment<U, D, R>) -> Result<A>
    where
        D: Decoder<U, Output = I>,
        I: Serialize,
    {
        let HandlerEnvironment {
            input,
            input_decoder,
            logger,
            deps,
        } = env;

        let decoded = parse(&input_decoder, &input).map_err(Error::Validation)?;

        let logged = serde_json::to_value(&decoded).unwrap_or(Value::Null);
        if let Err(err) = logger.debug("input decoded", json!({ "input": logged })) {
            tracing::warn!(error = %err, "failed to log decoded input");
        }

        (self.compute)(decoded, Context { logger, deps }).await
    }
}

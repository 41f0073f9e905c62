//! # Handler Kit Core
//!
//! Host-independent handlers: a typed computation plus the validation,
//! logging and HTTP plumbing every host adapter shares.
//!
//! ## Core Concepts
//!
//! - **Decoder**: turns an untyped host input into the handler's input type ([`validation`])
//! - **Handler**: a deferred async computation built with [`handler::of`]
//! - **Environment**: input, decoder, logger and dependencies for one run ([`HandlerEnvironment`])
//! - **Error**: validation, named HTTP error, or anything else ([`Error`])
//! - **Problem JSON**: the body HTTP callers receive on failure ([`to_problem_json`])
//!
//! Host adapters (the functions runtime, axum) live in their own crates and
//! only translate between host objects and these types.
//!
//! ## Example
//!
//! ```
//! use handler_kit_core::handler::{of, Context};
//! use handler_kit_core::http::{success_json, HttpRequest, HttpResponse, HttpSuccessStatusCode};
//! use serde_json::{json, Value};
//!
//! #[derive(Clone)]
//! struct Deps {
//!     lang: &'static str,
//! }
//!
//! let greet = of(|req: HttpRequest, ctx: Context<Deps>| async move {
//!     let name = req.query_param("name").unwrap_or("Test").to_string();
//!     let greeting = if ctx.lang == "it" { "Ciao" } else { "Hello" };
//!     Ok(success_json(json!({ "message": format!("{greeting} {name}") })))
//! });
//! # let _: handler_kit_core::handler::Handler<HttpRequest, HttpResponse<Value, HttpSuccessStatusCode>, Deps> = greet;
//! ```

pub mod error;
pub mod handler;
pub mod http;
pub mod validation;

pub use error::{Error, Result};
pub use handler::{of, Context, Handler, HandlerEnvironment};
pub use http::to_problem_json;
pub use validation::{parse, Decoder, ValidationError, Violations};

//! Input validation.
//!
//! A [`Decoder`] turns an untyped host input into the typed value a handler
//! expects. [`parse`] runs a decoder and wraps every reported violation into
//! a single [`ValidationError`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Violation messages reported by a decoder, in reporting order.
pub type Violations = Vec<String>;

/// Decodes an untyped input `U` into `Self::Output`.
///
/// Decoders are pure: no side effects, and they always terminate.
pub trait Decoder<U: ?Sized>: Send + Sync {
    /// The typed value produced on success.
    type Output;

    /// Decode `input`.
    ///
    /// # Errors
    ///
    /// Returns every violation found, in the order they were detected.
    fn decode(&self, input: &U) -> Result<Self::Output, Violations>;
}

/// The input did not match the declared schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Violation messages, in the decoder's reporting order.
    pub violations: Violations,
    /// Summary message.
    pub message: String,
}

impl ValidationError {
    /// Message used when none is given.
    pub const DEFAULT_MESSAGE: &'static str = "Your request parameters didn't validate";

    /// Violation reported for a rejection that came with no violations.
    pub const UNSPECIFIED_VIOLATION: &'static str = "value did not validate";

    /// Error with the default message.
    #[must_use]
    pub fn new(violations: Violations) -> Self {
        Self::with_message(violations, Self::DEFAULT_MESSAGE)
    }

    /// Error with a custom message.
    #[must_use]
    pub fn with_message(violations: Violations, message: impl Into<String>) -> Self {
        Self {
            violations,
            message: message.into(),
        }
    }
}

/// Run `decoder` against `input`.
///
/// # Errors
///
/// Returns a [`ValidationError`] carrying the decoder's violations and the
/// default message.
///
/// # Example
///
/// ```
/// use handler_kit_core::validation::{parse, JsonDecoder};
/// use serde_json::json;
///
/// let decoder = JsonDecoder::<String>::new();
/// assert_eq!(parse(&decoder, &json!("ping")).unwrap(), "ping");
/// assert!(parse(&decoder, &json!(10)).is_err());
/// ```
pub fn parse<U, D>(decoder: &D, input: &U) -> Result<D::Output, ValidationError>
where
    U: ?Sized,
    D: Decoder<U> + ?Sized,
{
    parse_with_message(decoder, ValidationError::DEFAULT_MESSAGE, input)
}

/// Run `decoder` against `input`, using `message` for the error summary.
///
/// # Errors
///
/// Returns a [`ValidationError`] carrying the decoder's violations and `message`.
/// A rejection reported without violations gets
/// [`ValidationError::UNSPECIFIED_VIOLATION`], so the list is never empty.
pub fn parse_with_message<U, D>(
    decoder: &D,
    message: &str,
    input: &U,
) -> Result<D::Output, ValidationError>
where
    U: ?Sized,
    D: Decoder<U> + ?Sized,
{
    decoder.decode(input).map_err(|mut violations| {
        if violations.is_empty() {
            violations.push(ValidationError::UNSPECIFIED_VIOLATION.to_string());
        }
        ValidationError::with_message(violations, message)
    })
}

/// Decodes a JSON value into any `T: DeserializeOwned`.
pub struct JsonDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDecoder<T> {
    /// Create the decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonDecoder<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonDecoder")
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Decoder<Value> for JsonDecoder<T> {
    type Output = T;

    fn decode(&self, input: &Value) -> Result<T, Violations> {
        T::deserialize(input).map_err(|e| vec![e.to_string()])
    }
}

/// Adapts a closure into a [`Decoder`].
///
/// ```
/// use handler_kit_core::validation::{parse, FnDecoder};
///
/// let positive = FnDecoder::new(|n: &i64| {
///     if *n > 0 { Ok(*n) } else { Err(vec![format!("{n} is not positive")]) }
/// });
///
/// assert_eq!(parse(&positive, &3).unwrap(), 3);
/// assert_eq!(parse(&positive, &-1).unwrap_err().violations, ["-1 is not positive"]);
/// ```
pub struct FnDecoder<F, T> {
    decode: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F, T> FnDecoder<F, T> {
    /// Wrap `decode`.
    #[must_use]
    pub const fn new(decode: F) -> Self {
        Self {
            decode,
            _marker: PhantomData,
        }
    }
}

impl<F: Clone, T> Clone for FnDecoder<F, T> {
    fn clone(&self) -> Self {
        Self::new(self.decode.clone())
    }
}

impl<U, F, T> Decoder<U> for FnDecoder<F, T>
where
    U: ?Sized,
    F: Fn(&U) -> Result<T, Violations> + Send + Sync,
{
    type Output = T;

    fn decode(&self, input: &U) -> Result<T, Violations> {
        (self.decode)(input)
    }
}

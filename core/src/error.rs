//! The failure type of every handler.

use crate::http::HttpError;
use crate::validation::ValidationError;
use handler_kit_logger::error_value;
use serde_json::Value;

/// Why a handler failed.
///
/// The three variants are matched exhaustively when mapping to a problem
/// response, so validation failures can never be mistaken for generic HTTP
/// errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input did not decode.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A named HTTP error.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Anything else. Its details are never sent to HTTP callers.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Wrap any error as [`Error::Other`].
    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(anyhow::Error::new(err))
    }

    /// Build an [`Error::Other`] from a message.
    #[must_use]
    pub fn msg(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self::Other(anyhow::Error::msg(message))
    }

    /// Kind name used in log records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Http(_) => "HttpError",
            Self::Other(_) => "Error",
        }
    }

    /// `{"message": .., "name": ..}`, for log context.
    #[must_use]
    pub fn to_log_value(&self) -> Value {
        error_value(self.name(), self)
    }
}

/// Result type alias for handler computations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

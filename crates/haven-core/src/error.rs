//! Parse errors for API-facing enumerated values.

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors produced when parsing client-supplied enumerated values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The value was not one of `on`/`off`.
    #[error("invalid switch value: {0:?}")]
    InvalidSwitch(String),

    /// The value was not one of `auto`/`manual`.
    #[error("invalid mode: {0:?}")]
    InvalidMode(String),
}

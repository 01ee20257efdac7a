//! API error types and responses.
//!
//! Validation failures are the only errors this surface reports; every one
//! maps to a 400 with a stable error token that clients match on. Link
//! failures never show up here; commands are best-effort by contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use haven_core::CoreError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The fan/light state was not `on`/`off`, or the body was malformed.
    #[error("invalid")]
    Invalid,

    /// The mode was not `auto`/`manual`, or the body was malformed.
    #[error("invalid mode")]
    InvalidMode,

    /// The target temperature was missing or not a number.
    #[error("missing target_temp")]
    MissingTargetTemp,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Invalid | Self::InvalidMode | Self::MissingTargetTemp => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the stable error token for this error.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::InvalidMode => "invalid mode",
            Self::MissingTargetTemp => "missing target_temp",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.token(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidSwitch(_) => Self::Invalid,
            CoreError::InvalidMode(_) => Self::InvalidMode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_validation_error_is_a_400() {
        assert_eq!(ApiError::Invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidMode.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MissingTargetTemp.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn tokens_are_stable() {
        assert_eq!(ApiError::Invalid.token(), "invalid");
        assert_eq!(ApiError::InvalidMode.token(), "invalid mode");
        assert_eq!(ApiError::MissingTargetTemp.token(), "missing target_temp");
    }

    #[test]
    fn core_errors_map_to_their_endpoints_tokens() {
        assert_eq!(
            ApiError::from(CoreError::InvalidSwitch("x".into())),
            ApiError::Invalid
        );
        assert_eq!(
            ApiError::from(CoreError::InvalidMode("x".into())),
            ApiError::InvalidMode
        );
    }
}

//! API error types

use crate::dto::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use logpulse_core::GeneratorError;
use thiserror::Error;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("log generation is already running")]
    AlreadyRunning,

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for API handlers
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::AlreadyRunning
            | ApiError::Generator(GeneratorError::InvalidRate { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Generator(GeneratorError::NoRuntime) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Generator(GeneratorError::InvalidRate { reason, .. }) => reason.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logpulse_core::RateViolation;

    #[test]
    fn test_invalid_rate_messages() {
        let low = ApiError::from(GeneratorError::InvalidRate {
            rate: 0,
            reason: RateViolation::NotPositive,
        });
        assert_eq!(low.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(low.client_message(), "rate must be greater than zero");

        let high = ApiError::from(GeneratorError::InvalidRate {
            rate: 20_000,
            reason: RateViolation::AboveMaximum { max: 10_000 },
        });
        assert_eq!(
            high.client_message(),
            "maximum allowed rate is 10000 logs per second"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::AlreadyRunning.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(GeneratorError::NoRuntime).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let response = ApiError::BadRequest("invalid request format".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

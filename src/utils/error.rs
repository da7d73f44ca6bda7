//! Error handling module
//!
//! Defines the error taxonomy of the proxy and how each class is rendered as an envelope

use crate::models::Envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned when the upstream answers 2xx with a body that is not JSON
pub const INVALID_UPSTREAM_JSON: &str = "Invalid JSON from provider";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream credential not configured
    #[error("Missing ODDS_API_KEY")]
    MissingCredential,

    /// Local shared secret missing or wrong
    #[error("Unauthorized")]
    Unauthorized,

    /// Caller supplied an input the proxy refuses to forward
    #[error("{0}")]
    InvalidInput(String),

    /// No route matched
    #[error("Not found")]
    NotFound,

    /// Upstream answered with a non-success status
    #[error("{body}")]
    UpstreamStatus { status: u16, body: String },

    /// Upstream answered 2xx but the body is not JSON
    #[error("Invalid JSON from provider")]
    InvalidUpstreamJson { raw: String },

    /// Transport failure talking to the upstream
    #[error("HTTP client error: {0}")]
    HttpClient(reqwest::Error),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the request URL, which carries the upstream key
        AppError::HttpClient(err.without_url())
    }
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::InvalidUpstreamJson { .. } => StatusCode::BAD_GATEWAY,
            AppError::MissingCredential
            | AppError::HttpClient(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingCredential => "configuration_error",
            AppError::Unauthorized => "authentication_error",
            AppError::InvalidInput(_) => "invalid_request_error",
            AppError::NotFound => "not_found_error",
            AppError::UpstreamStatus { .. } => "upstream_status_error",
            AppError::InvalidUpstreamJson { .. } => "upstream_payload_error",
            AppError::HttpClient(_) | AppError::Internal(_) => "api_error",
        }
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        !matches!(self, AppError::Unauthorized | AppError::NotFound)
    }

    /// Convert to the response envelope
    pub fn to_envelope(&self) -> Envelope {
        match self {
            AppError::UpstreamStatus { status, body } => {
                Envelope::failure(body.clone()).with_status(*status)
            }
            AppError::InvalidUpstreamJson { raw } => {
                Envelope::failure(INVALID_UPSTREAM_JSON).with_raw(raw.clone())
            }
            other => Envelope::failure(other.to_string()),
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if !self.should_log_details() {
            tracing::warn!("Client error: {} - Status code: {}", self.error_type(), status);
        } else if status.is_server_error() {
            tracing::error!("Application error: {} - Status code: {}", self.error_type(), status);
        } else {
            tracing::warn!("Request failed: {} - Status code: {}", self.error_type(), status);
        }

        (status, Json(self.to_envelope())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::MissingCredential.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidInput("x".to_string()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidUpstreamJson { raw: "x".to_string() }.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(AppError::Internal("x".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_status_is_mirrored() {
        let err = AppError::UpstreamStatus { status: 429, body: "slow down".to_string() };
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let err = AppError::UpstreamStatus { status: 1000, body: String::new() };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_envelope_conversion() {
        let envelope = AppError::UpstreamStatus { status: 403, body: "bad key".to_string() }.to_envelope();
        assert!(!envelope.ok);
        assert_eq!(envelope.status, Some(403));
        assert_eq!(envelope.error.as_deref(), Some("bad key"));

        let envelope = AppError::InvalidUpstreamJson { raw: "not-json".to_string() }.to_envelope();
        assert_eq!(envelope.error.as_deref(), Some(INVALID_UPSTREAM_JSON));
        assert_eq!(envelope.raw.as_deref(), Some("not-json"));
        assert_eq!(envelope.status, None);
    }
}

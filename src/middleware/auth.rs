//! Authentication middleware
//!
//! Gates the `/api` routes behind an optional shared secret

use crate::handlers::AppState;
use crate::models::QueryParams;
use crate::utils::error::AppError;
use axum::{
    extract::{Query, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Header checked first for the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Query parameter checked last for the shared secret
pub const API_KEY_QUERY_PARAM: &str = "api_key";

/// Authentication middleware
///
/// Open when no secret is configured. OPTIONS requests never get here, the CORS
/// layer answers them first.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(secret) = state.settings.security.local_api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let query = Query::<Vec<(String, String)>>::try_from_uri(request.uri())
        .map(|Query(pairs)| QueryParams::new(pairs))
        .unwrap_or_default();

    let candidate = extract_candidate(request.headers(), &query);

    match candidate {
        Some(candidate) if validate_api_key(&candidate, secret) => {
            debug!("Authentication successful");
            Ok(next.run(request).await)
        }
        Some(_) => {
            warn!("Rejected request to {}: invalid API key", request.uri().path());
            Err(AppError::Unauthorized)
        }
        None => {
            warn!("Rejected request to {}: missing API key", request.uri().path());
            Err(AppError::Unauthorized)
        }
    }
}

/// Pick the caller's key: `x-api-key` header, then bearer token, then `api_key` query parameter
pub fn extract_candidate(headers: &HeaderMap, query: &QueryParams) -> Option<String> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
    };

    if let Some(key) = header_value(API_KEY_HEADER) {
        return Some(key.to_string());
    }

    if let Some(token) = header_value(AUTHORIZATION.as_str()).and_then(extract_bearer_token) {
        return Some(token.to_string());
    }

    query.get(API_KEY_QUERY_PARAM).map(str::to_string)
}

/// Token of an `Authorization: Bearer <token>` value
pub fn extract_bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Exact, case-sensitive comparison that does not short-circuit on the first differing byte
pub fn validate_api_key(candidate: &str, secret: &str) -> bool {
    let (a, b) = (candidate.as_bytes(), secret.as_bytes());
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

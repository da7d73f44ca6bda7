//! Health check handler

use crate::models::Envelope;
use axum::response::Json;
use tracing::debug;

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "odds-gpt-backend";

/// Basic health check
///
/// GET /health
/// Never authenticated and never touches the upstream
pub async fn health_check() -> Json<Envelope> {
    debug!("Executing health check");

    Json(Envelope::health(SERVICE_NAME))
}

//! Preflight middleware
//!
//! Sits outside the CORS layer so browser preflights end up as a bare 204

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};

/// Rewrite successful OPTIONS responses to 204, keeping the CORS headers
///
/// The CORS layer answers every OPTIONS request itself with an empty 200, before
/// routing or the auth gate run.
pub async fn preflight_middleware(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;

    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }

    response
}

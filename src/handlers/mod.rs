//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod health;
pub mod odds;
pub mod openapi;

use crate::config::Settings;
use crate::middleware::{auth_middleware, preflight_middleware, request_logging_middleware};
use crate::services::OddsClient;
use crate::utils::error::AppError;
use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub client: OddsClient,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let client = OddsClient::new(settings.upstream.clone())?;
    let cors = create_cors_layer(&settings.security.allowed_origin)?;

    let app_state = Arc::new(AppState { settings, client });

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Everything under /api sits behind the auth gate
    let api_routes = Router::new()
        .route("/sports", get(odds::list_sports))
        .route("/odds", get(odds::get_odds))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/openapi.json", get(openapi::openapi_document))
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(app_state)
        .layer(middleware_stack)
        // Outermost, so it sees the CORS layer's preflight answers
        .layer(middleware::from_fn(preflight_middleware));

    Ok(router)
}

/// CORS layer reflecting the configured origin
fn create_cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin = if allowed_origin == "*" {
        AllowOrigin::from(Any)
    } else {
        let value = HeaderValue::from_str(allowed_origin)
            .with_context(|| format!("Invalid CORS origin: {}", allowed_origin))?;
        AllowOrigin::exact(value)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any))
}

async fn not_found() -> AppError {
    AppError::NotFound
}

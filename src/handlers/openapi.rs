//! API description handler
//!
//! Serves the OpenAPI document agent platforms use to discover the proxy routes.
//! The document is reachable without credentials so callers can describe the API
//! before they have a key.

use crate::config::Settings;
use crate::handlers::AppState;
use crate::middleware::auth::API_KEY_HEADER;
use crate::models::query::{
    DEFAULT_ALL, DEFAULT_DATE_FORMAT, DEFAULT_MARKETS, DEFAULT_REGION, DEFAULT_SPORT,
};
use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /openapi.json
pub async fn openapi_document(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(build_openapi_document(&state.settings))
}

/// Build the OpenAPI 3.1 description of the proxy
pub fn build_openapi_document(settings: &Settings) -> Value {
    let mut document = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Odds GPT Backend",
            "description": "Live sports odds and the sports catalog, proxied from the odds provider.",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/api/sports": {
                "get": {
                    "operationId": "listSports",
                    "summary": "List available sports",
                    "parameters": [
                        query_parameter(
                            "all",
                            "Include out-of-season sports (\"true\" or \"false\")",
                            DEFAULT_ALL,
                            "true",
                        ),
                    ],
                    "responses": envelope_responses("Sports catalog"),
                }
            },
            "/api/odds": {
                "get": {
                    "operationId": "getOdds",
                    "summary": "Get odds for a sport (American odds format)",
                    "parameters": [
                        query_parameter(
                            "sport",
                            "Sport key, or \"upcoming\" for the next events across all sports",
                            DEFAULT_SPORT,
                            "basketball_nba",
                        ),
                        query_parameter("region", "Bookmaker region", DEFAULT_REGION, "us"),
                        query_parameter(
                            "markets",
                            "Comma separated markets",
                            DEFAULT_MARKETS,
                            "h2h,spreads",
                        ),
                        {
                            "name": "bookmakers",
                            "in": "query",
                            "required": false,
                            "description": "Comma separated bookmaker keys",
                            "schema": { "type": "string" },
                            "example": "draftkings,fanduel",
                        },
                        query_parameter(
                            "dateFormat",
                            "Timestamp format (\"iso\" or \"unix\")",
                            DEFAULT_DATE_FORMAT,
                            "iso",
                        ),
                    ],
                    "responses": envelope_responses("Odds for the requested sport"),
                }
            }
        },
        "components": {
            "securitySchemes": {
                "ApiKeyAuth": {
                    "type": "apiKey",
                    "in": "header",
                    "name": API_KEY_HEADER,
                }
            }
        },
        "security": [ { "ApiKeyAuth": [] } ],
    });

    if let Some(url) = &settings.server.public_base_url {
        document["servers"] = json!([{ "url": url }]);
    }

    document
}

fn query_parameter(name: &str, description: &str, default: &str, example: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": description,
        "schema": { "type": "string", "default": default },
        "example": example,
    })
}

fn envelope_responses(description: &str) -> Value {
    json!({
        "200": {
            "description": description,
            "content": {
                "application/json": {
                    "schema": {
                        "type": "object",
                        "properties": {
                            "ok": { "type": "boolean" },
                            "count": { "type": "integer" },
                            "data": {}
                        },
                        "required": ["ok"]
                    }
                }
            }
        },
        "401": { "description": "Missing or invalid API key" },
        "502": { "description": "Provider returned an unreadable payload" }
    })
}

//! Odds provider proxy handlers
//!
//! Forward catalog and odds requests upstream and wrap the payload in an envelope

use crate::handlers::AppState;
use crate::models::{Envelope, OddsQuery, QueryParams, SportsQuery};
use crate::utils::error::{AppError, AppResult};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

type QueryInput = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// List the sports catalog
///
/// GET /api/sports
pub async fn list_sports(
    State(state): State<Arc<AppState>>,
    query: QueryInput,
) -> AppResult<Json<Envelope>> {
    let params = normalize_query(query)?;
    let query = SportsQuery::from_params(&params);
    debug!("Listing sports (all={})", query.all);

    let data = state.client.list_sports(&query).await?;

    Ok(Json(Envelope::success(data)))
}

/// Fetch odds for a sport
///
/// GET /api/odds
pub async fn get_odds(
    State(state): State<Arc<AppState>>,
    query: QueryInput,
) -> AppResult<Json<Envelope>> {
    let params = normalize_query(query)?;
    let query = OddsQuery::from_params(&params)?;
    debug!(
        "Fetching odds: sport={}, region={}, markets={}",
        query.sport, query.region, query.markets
    );

    let data = state.client.fetch_odds(&query).await?;

    Ok(Json(
        Envelope::success(data).with_echo(query.sport, query.region, query.markets),
    ))
}

fn normalize_query(query: QueryInput) -> AppResult<QueryParams> {
    query
        .map(|Query(pairs)| QueryParams::new(pairs))
        .map_err(|e| AppError::InvalidInput(format!("Invalid query string: {}", e.body_text())))
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::client::PolygonClient;
use crate::config::ScreeningConfig;
use crate::error::ScanError;
use crate::scanner::run_scan;
use crate::types::EnrichedQuote;
use crate::universe::STOCK_UNIVERSE;

/// Header carrying the caller's Polygon API key. The collaborator that
/// owns the credential store resolves the key; this service only receives
/// the opaque string.
pub const API_KEY_HEADER: &str = "x-polygon-api-key";

#[derive(Clone)]
pub struct ApiState {
    pub client: Arc<PolygonClient>,
    pub screening: ScreeningConfig,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/scan", post(scan))
        .route("/universe", get(universe))
        .route("/health", get(health))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ScanResponse {
    results: Vec<EnrichedQuote>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Trigger a full universe scan. No body; a missing or empty API key
/// header surfaces as the MissingCredential error before any upstream call.
async fn scan(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<ScanResponse>, ScanError> {
    let credential = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let results = run_scan(state.client.clone(), credential, state.screening).await?;
    Ok(Json(ScanResponse { results }))
}

async fn universe() -> Json<Vec<&'static str>> {
    Json(STOCK_UNIVERSE.to_vec())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "universe_size": STOCK_UNIVERSE.len(),
    }))
}

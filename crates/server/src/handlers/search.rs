//! # Provision Route Handlers
//!
//! Read-only access to the knowledge base: similarity search without a model
//! call, and a listing by category.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::{
    extract::{Query, State},
    Json,
};
use legalrag::{Category, RetrievedProvision, StoredProvision};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

// --- API Payloads for Provisions ---

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Defaults to the configured top-k.
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub category: Option<String>,
    pub debug: Option<bool>,
}

// --- Provision Handlers ---

/// Handler for `POST /api/provisions/search`.
pub async fn provision_search_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<ApiResponse<Vec<RetrievedProvision>>>, AppError> {
    if payload.query.trim().is_empty() {
        return Err(AppError::BadRequest("The search query is empty.".to_string()));
    }
    info!("Received provision search for query: '{}'", payload.query);
    let limit = payload.limit.unwrap_or_else(|| app_state.advisor.top_k());
    let results = app_state
        .advisor
        .search_provisions(&payload.query, limit)
        .await?;
    let debug_info = json!({ "query": payload.query, "limit": limit });
    Ok(wrap_response(results, debug_params, Some(debug_info)))
}

/// Handler for `GET /api/provisions?category=`.
pub async fn list_provisions_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<StoredProvision>>>, AppError> {
    let category = params
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(str::parse::<Category>)
        .transpose()?;
    let provisions = app_state.advisor.list_provisions(category).await?;
    let debug_info = json!({ "category": category, "count": provisions.len() });
    Ok(wrap_response(
        provisions,
        Query(DebugParams {
            debug: params.debug,
        }),
        Some(debug_info),
    ))
}

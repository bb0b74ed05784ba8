//! API handlers for lead search, listing and the catalog

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use leadhunter_core::{BusinessLead, LeadFilter, SearchParams, StoredLead, catalog};
use serde::Serialize;
use serde_json::json;

use super::errors::ApiError;
use crate::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub regions: Vec<&'static str>,
    pub business_types: Vec<&'static str>,
}

/// Runs a search over every selected region and business type.
///
/// The search runs in its own task so it completes and persists its leads
/// even if the client disconnects.
///
/// # Errors
/// - `ApiError::BadRequest` - Body malformed, a selection empty or a label unknown
/// - `ApiError::Internal` - The search task did not complete
pub async fn api_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchParams>, JsonRejection>,
) -> Result<Json<Vec<BusinessLead>>, ApiError> {
    let Json(params) = payload.map_err(|rejection| ApiError::invalid_search_body(&rejection))?;

    let orchestrator = state.orchestrator.clone();
    let outcome = tokio::spawn(async move { orchestrator.search(params).await })
        .await
        .map_err(|e| {
            tracing::error!("Search task failed: {e}");
            ApiError::internal("Failed to search for leads")
        })??;

    Ok(Json(outcome.leads))
}

/// Lists stored leads, optionally filtered by `region` and `type`.
///
/// # Errors
/// - `ApiError::Internal` - The store could not be read
pub async fn api_leads(
    State(state): State<AppState>,
    Query(filter): Query<LeadFilter>,
) -> Result<Json<Vec<StoredLead>>, ApiError> {
    let leads = state
        .store
        .get_leads(&filter.normalized())
        .await
        .map_err(|e| {
            tracing::error!("Failed to load leads: {e}");
            ApiError::internal("Failed to load leads")
        })?;

    Ok(Json(leads))
}

pub async fn api_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        regions: catalog::regions(),
        business_types: catalog::business_types(),
    })
}

pub async fn api_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

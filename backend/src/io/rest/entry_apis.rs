//! # REST API for Schedule Entries

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use crate::AppState;
use shared::{EntryRangeQuery, UpdateEntryRequest, UpsertEntryRequest};

/// List entries in the half-open range `[start, end)`
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<EntryRangeQuery>,
) -> impl IntoResponse {
    info!("GET /api/entries?start={}&end={}", query.start, query.end);

    match state.schedule_service.list_entries(query).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("Failed to list entries", e),
    }
}

/// Insert or overwrite the entry for `(staff_id, date)`
pub async fn upsert_entry(
    State(state): State<AppState>,
    Json(request): Json<UpsertEntryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/entries - request: {:?}", request);

    match state.schedule_service.upsert_entry(request).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => error_response("Failed to upsert entry", e),
    }
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
    Json(request): Json<UpdateEntryRequest>,
) -> impl IntoResponse {
    info!("PATCH /api/entries/{} - request: {:?}", entry_id, request);

    match state.schedule_service.update_entry(&entry_id, request).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => error_response("Failed to update entry", e),
    }
}

pub async fn delete_entry(State(state): State<AppState>, Path(entry_id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/entries/{}", entry_id);

    match state.schedule_service.delete_entry(&entry_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete entry", e),
    }
}

//! # REST API for Staff Management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use crate::AppState;
use shared::{CreateStaffRequest, DeleteEntriesResponse, UpdateStaffRequest};

/// List all staff ordered by name
pub async fn list_staff(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/staff");

    match state.staff_service.list_staff().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response("Failed to list staff", e),
    }
}

pub async fn create_staff(
    State(state): State<AppState>,
    Json(request): Json<CreateStaffRequest>,
) -> impl IntoResponse {
    info!("POST /api/staff - request: {:?}", request);

    match state.staff_service.create_staff(request).await {
        Ok(staff) => (StatusCode::CREATED, Json(staff)).into_response(),
        Err(e) => error_response("Failed to create staff", e),
    }
}

pub async fn update_staff(
    State(state): State<AppState>,
    Path(staff_id): Path<String>,
    Json(request): Json<UpdateStaffRequest>,
) -> impl IntoResponse {
    info!("PATCH /api/staff/{} - request: {:?}", staff_id, request);

    match state.staff_service.update_staff(&staff_id, request).await {
        Ok(staff) => (StatusCode::OK, Json(staff)).into_response(),
        Err(e) => error_response("Failed to update staff", e),
    }
}

pub async fn delete_staff(State(state): State<AppState>, Path(staff_id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/staff/{}", staff_id);

    match state.staff_service.delete_staff(&staff_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete staff", e),
    }
}

/// Remove every schedule entry of one staff member
pub async fn delete_entries_for_staff(
    State(state): State<AppState>,
    Path(staff_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/staff/{}/entries", staff_id);

    match state.staff_service.delete_entries_for_staff(&staff_id).await {
        Ok(deleted_count) => (StatusCode::OK, Json(DeleteEntriesResponse { deleted_count })).into_response(),
        Err(e) => error_response("Failed to delete staff entries", e),
    }
}

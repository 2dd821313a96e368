//! Shared API-key check for every `/api` route.
//!
//! Accepts either `Authorization: Bearer <key>` or `apikey: <key>`. When no
//! key is configured the check is skipped.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::AppState;

pub async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    if presented_key(request.headers()) == Some(expected) {
        next.run(request).await
    } else {
        warn!("Rejected {} {}: missing or wrong API key", request.method(), request.uri().path());
        (StatusCode::UNAUTHORIZED, "Invalid API key").into_response()
    }
}

fn presented_key(headers: &HeaderMap) -> Option<&str> {
    if let Some(bearer) = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(bearer.trim());
    }
    headers.get("apikey").and_then(|v| v.to_str().ok()).map(str::trim)
}

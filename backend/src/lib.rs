//! # RK-Jadwal Backend
//!
//! The store behind the staff schedule calendar: staff members and their
//! per-day schedule entries, persisted in SQLite and served over an
//! authenticated JSON API.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (axum handlers, API-key check)
//!     ↓
//! Domain Layer (validation, services)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, patch},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::{ScheduleService, StaffService};
use crate::storage::DbConnection;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub staff_service: StaffService,
    pub schedule_service: ScheduleService,
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(db: DbConnection, api_key: Option<String>) -> Self {
        Self {
            staff_service: StaffService::new(db.clone()),
            schedule_service: ScheduleService::new(db),
            api_key: api_key.map(Arc::from),
        }
    }
}

/// Open the configured database and wire up all services
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    if config.api_key.is_none() {
        info!("No API key configured, requests are not authenticated");
    }
    Ok(AppState::new(db, config.api_key.clone()))
}

/// Create the axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/staff", get(io::list_staff).post(io::create_staff))
        .route("/staff/:staff_id", patch(io::update_staff).delete(io::delete_staff))
        .route("/staff/:staff_id/entries", delete(io::delete_entries_for_staff))
        .route("/entries", get(io::list_entries).put(io::upsert_entry))
        .route("/entries/:entry_id", patch(io::update_entry).delete(io::delete_entry))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), io::require_api_key));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use shared::{EntryListResponse, ScheduleEntry, StaffListResponse, StaffMember};
    use tower::ServiceExt;

    async fn setup_router(api_key: Option<&str>) -> Router {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        let state = AppState::new(db, api_key.map(str::to_string));
        create_router(state, &ServerConfig::default()).expect("Failed to build router")
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_staff(router: &Router, name: &str, group: &str) -> StaffMember {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/staff",
                serde_json::json!({ "name": name, "handle": null, "group": group }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await
    }

    #[tokio::test]
    async fn test_staff_crud_over_http() {
        let router = setup_router(None).await;
        let rani = create_staff(&router, "Rani", "kanwil").await;
        create_staff(&router, "Budi", "dumai").await;

        let response = router.clone().oneshot(empty_request("GET", "/api/staff")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let list: StaffListResponse = read_json(response).await;
        let names: Vec<&str> = list.staff.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Budi", "Rani"]);

        let response = router
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/staff/{}", rani.id),
                serde_json::json!({ "name": "Rani Putri" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let renamed: StaffMember = read_json(response).await;
        assert_eq!(renamed.name, "Rani Putri");

        let response = router
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/staff/{}", rani.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = router
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/staff/{}", rani.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_staff_is_bad_request() {
        let router = setup_router(None).await;

        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/staff",
                serde_json::json!({ "name": "  ", "handle": null, "group": "kanwil" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_entry_upsert_list_update_delete() {
        let router = setup_router(None).await;
        let rani = create_staff(&router, "Rani", "kanwil").await;

        let upsert = |status: &str, value: u32| {
            json_request(
                "PUT",
                "/api/entries",
                serde_json::json!({
                    "staff_id": rani.id,
                    "date": "2025-03-15",
                    "status": status,
                    "value": value,
                    "note": null,
                }),
            )
        };

        let response = router.clone().oneshot(upsert("plan", 3)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created: ScheduleEntry = read_json(response).await;

        let response = router.clone().oneshot(upsert("plan", 3)).await.unwrap();
        let again: ScheduleEntry = read_json(response).await;
        assert_eq!(again.id, created.id);

        let response = router
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/entries/{}", created.id),
                serde_json::json!({ "status": "done", "value": 7, "note": "selesai" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(empty_request("GET", "/api/entries?start=2025-03-01&end=2025-04-01"))
            .await
            .unwrap();
        let list: EntryListResponse = read_json(response).await;
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].value, Some(7));
        assert_eq!(list.entries[0].note.as_deref(), Some("selesai"));

        let response = router
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/entries/{}", created.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = router
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/entries/{}", created.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_key_is_enforced_when_configured() {
        let router = setup_router(Some("rahasia")).await;

        let response = router.clone().oneshot(empty_request("GET", "/api/staff")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .method("GET")
            .uri("/api/staff")
            .header("authorization", "Bearer rahasia")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder()
            .method("GET")
            .uri("/api/staff")
            .header("apikey", "salah")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

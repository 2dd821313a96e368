//! # REST API Interface Layer
//!
//! HTTP endpoints for the staff/schedule store. Handlers translate JSON to
//! service calls and map domain errors to status codes:
//!
//! - validation errors → 400
//! - unknown ids → 404
//! - anything else → 500
//!
//! Error bodies are plain text carrying the error message.

pub mod auth;
pub mod entry_apis;
pub mod staff_apis;

pub use auth::require_api_key;
pub use entry_apis::*;
pub use staff_apis::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::domain::{EntryValidationError, NotFoundError, StaffValidationError};

/// Convert a service failure into a response, logging it on the way
pub(crate) fn error_response(context: &str, e: anyhow::Error) -> Response {
    let status = if e.is::<NotFoundError>() {
        StatusCode::NOT_FOUND
    } else if e.is::<StaffValidationError>() || e.is::<EntryValidationError>() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    error!("{}: {}", context, e);
    (status, e.to_string()).into_response()
}

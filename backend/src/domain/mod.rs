//! # Domain Module
//!
//! Validation and orchestration on top of the repositories.
//!
//! - **staff_service**: create, list, patch and delete staff members
//! - **schedule_service**: range listing, upsert, update and delete of entries
//! - **errors**: typed validation and not-found errors
//!
//! Names are stored trimmed; dates must be zero-padded `YYYY-MM-DD` keys;
//! empty handles and notes are stored as absent.

pub mod errors;
pub mod schedule_service;
pub mod staff_service;

pub use errors::*;
pub use schedule_service::ScheduleService;
pub use staff_service::StaffService;

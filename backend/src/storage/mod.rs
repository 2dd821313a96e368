//! # Storage Module
//!
//! SQLite persistence for staff and schedule entries.
//!
//! - **connection**: pool setup and schema creation
//! - **repositories**: one repository per table, owning all SQL
//!
//! The `(staff_id, date)` uniqueness of schedule entries is enforced here by a
//! `UNIQUE` constraint, and staff deletion cascades to their entries through
//! the foreign key.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{ScheduleEntryRepository, StaffRepository};

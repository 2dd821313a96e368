//! # RK-Jadwal Client
//!
//! Headless client for the staff schedule calendar. It keeps the month grid
//! (staff rows, day columns, status badges and row totals) in sync with the
//! remote store and exposes it to whatever renders it.
//!
//! ```text
//! grid::GridEngine ── state (view selectors, edit modal, preferences)
//!        │
//! services::ScheduleStore ── ApiClient (reqwest) ── /api on the backend
//! ```

pub mod config;
pub mod grid;
pub mod services;
pub mod state;

pub use config::ClientConfig;
pub use grid::{GridEngine, GridError};
pub use services::{ApiClient, ScheduleStore, StoreError};

//! The remote store as seen by the calendar grid.
//!
//! The grid only depends on this trait; `ApiClient` talks to the real HTTP
//! store and tests substitute an in-memory double.

use async_trait::async_trait;
use std::sync::Arc;
use shared::{
    CreateStaffRequest, ScheduleEntry, StaffMember, UpdateEntryRequest, UpdateStaffRequest,
    UpsertEntryRequest,
};

/// Failure talking to the store. Every variant is terminal for the user
/// action that triggered it; nothing is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Not authorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Store rejected request ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// All staff ordered by name ascending
    async fn list_staff(&self) -> Result<Vec<StaffMember>, StoreError>;

    async fn insert_staff(&self, request: &CreateStaffRequest) -> Result<StaffMember, StoreError>;

    async fn update_staff(&self, staff_id: &str, patch: &UpdateStaffRequest) -> Result<StaffMember, StoreError>;

    async fn delete_staff(&self, staff_id: &str) -> Result<(), StoreError>;

    /// Delete every entry owned by `staff_id`, returning how many went
    async fn delete_entries_for_staff(&self, staff_id: &str) -> Result<u64, StoreError>;

    /// Entries with `start <= date < end_exclusive`
    async fn list_entries(&self, start: &str, end_exclusive: &str) -> Result<Vec<ScheduleEntry>, StoreError>;

    /// Insert or overwrite the entry for `(staff_id, date)`
    async fn upsert_entry(&self, request: &UpsertEntryRequest) -> Result<ScheduleEntry, StoreError>;

    async fn update_entry(&self, entry_id: &str, patch: &UpdateEntryRequest) -> Result<ScheduleEntry, StoreError>;

    async fn delete_entry(&self, entry_id: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: ScheduleStore + ?Sized> ScheduleStore for Arc<S> {
    async fn list_staff(&self) -> Result<Vec<StaffMember>, StoreError> {
        (**self).list_staff().await
    }

    async fn insert_staff(&self, request: &CreateStaffRequest) -> Result<StaffMember, StoreError> {
        (**self).insert_staff(request).await
    }

    async fn update_staff(&self, staff_id: &str, patch: &UpdateStaffRequest) -> Result<StaffMember, StoreError> {
        (**self).update_staff(staff_id, patch).await
    }

    async fn delete_staff(&self, staff_id: &str) -> Result<(), StoreError> {
        (**self).delete_staff(staff_id).await
    }

    async fn delete_entries_for_staff(&self, staff_id: &str) -> Result<u64, StoreError> {
        (**self).delete_entries_for_staff(staff_id).await
    }

    async fn list_entries(&self, start: &str, end_exclusive: &str) -> Result<Vec<ScheduleEntry>, StoreError> {
        (**self).list_entries(start, end_exclusive).await
    }

    async fn upsert_entry(&self, request: &UpsertEntryRequest) -> Result<ScheduleEntry, StoreError> {
        (**self).upsert_entry(request).await
    }

    async fn update_entry(&self, entry_id: &str, patch: &UpdateEntryRequest) -> Result<ScheduleEntry, StoreError> {
        (**self).update_entry(entry_id, patch).await
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<(), StoreError> {
        (**self).delete_entry(entry_id).await
    }
}

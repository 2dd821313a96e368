//! In-memory `ScheduleStore` for unit tests, with the same uniqueness and
//! ordering rules as the real store plus switchable failure.

use async_trait::async_trait;
use shared::{
    CreateStaffRequest, ScheduleEntry, StaffMember, UpdateEntryRequest, UpdateStaffRequest,
    UpsertEntryRequest,
};
use std::sync::Mutex;

use crate::services::store::{ScheduleStore, StoreError};

#[derive(Default)]
struct Inner {
    staff: Vec<StaffMember>,
    entries: Vec<ScheduleEntry>,
    next_id: u64,
    failing: bool,
    failing_operations: Vec<&'static str>,
    list_entries_calls: usize,
}

impl Inner {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn check(&self) -> Result<(), StoreError> {
        self.check_operation("")
    }

    fn check_operation(&self, operation: &str) -> Result<(), StoreError> {
        if self.failing || self.failing_operations.contains(&operation) {
            Err(StoreError::Transport("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with a transport error until reset
    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().unwrap().failing = failing;
    }

    /// Make only the named trait method fail, e.g. `"delete_staff"`
    pub fn fail_operation(&self, operation: &'static str) {
        self.inner.lock().unwrap().failing_operations.push(operation);
    }

    pub fn entries(&self) -> Vec<ScheduleEntry> {
        self.inner.lock().unwrap().entries.clone()
    }

    pub fn staff(&self) -> Vec<StaffMember> {
        self.inner.lock().unwrap().staff.clone()
    }

    pub fn list_entries_calls(&self) -> usize {
        self.inner.lock().unwrap().list_entries_calls
    }

    /// Seed a staff member directly, bypassing the trait
    pub fn seed_staff(&self, name: &str, group: shared::StaffGroup) -> StaffMember {
        let mut inner = self.inner.lock().unwrap();
        let staff = StaffMember {
            id: inner.next_id("staff"),
            name: name.to_string(),
            handle: None,
            group,
            created_at: "2025-03-01T00:00:00+00:00".to_string(),
        };
        inner.staff.push(staff.clone());
        staff
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn list_staff(&self) -> Result<Vec<StaffMember>, StoreError> {
        let inner = self.inner.lock().unwrap();
        inner.check()?;
        let mut staff = inner.staff.clone();
        staff.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(staff)
    }

    async fn insert_staff(&self, request: &CreateStaffRequest) -> Result<StaffMember, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let staff = StaffMember {
            id: inner.next_id("staff"),
            name: request.name.trim().to_string(),
            handle: request.handle.clone(),
            group: request.group,
            created_at: "2025-03-01T00:00:00+00:00".to_string(),
        };
        inner.staff.push(staff.clone());
        Ok(staff)
    }

    async fn update_staff(&self, staff_id: &str, patch: &UpdateStaffRequest) -> Result<StaffMember, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let staff = inner
            .staff
            .iter_mut()
            .find(|s| s.id == staff_id)
            .ok_or_else(|| StoreError::NotFound(staff_id.to_string()))?;
        if let Some(name) = &patch.name {
            staff.name = name.trim().to_string();
        }
        if let Some(handle) = &patch.handle {
            staff.handle = (!handle.is_empty()).then(|| handle.clone());
        }
        if let Some(group) = patch.group {
            staff.group = group;
        }
        Ok(staff.clone())
    }

    async fn delete_staff(&self, staff_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_operation("delete_staff")?;
        let before = inner.staff.len();
        inner.staff.retain(|s| s.id != staff_id);
        if inner.staff.len() == before {
            return Err(StoreError::NotFound(staff_id.to_string()));
        }
        Ok(())
    }

    async fn delete_entries_for_staff(&self, staff_id: &str) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let before = inner.entries.len();
        inner.entries.retain(|e| e.staff_id != staff_id);
        Ok((before - inner.entries.len()) as u64)
    }

    async fn list_entries(&self, start: &str, end_exclusive: &str) -> Result<Vec<ScheduleEntry>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.list_entries_calls += 1;
        inner.check()?;
        Ok(inner
            .entries
            .iter()
            .filter(|e| e.date.as_str() >= start && e.date.as_str() < end_exclusive)
            .cloned()
            .collect())
    }

    async fn upsert_entry(&self, request: &UpsertEntryRequest) -> Result<ScheduleEntry, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        if let Some(existing) = inner
            .entries
            .iter_mut()
            .find(|e| e.staff_id == request.staff_id && e.date == request.date)
        {
            existing.status = request.status;
            existing.value = request.value;
            existing.note = request.note.clone();
            return Ok(existing.clone());
        }
        let entry = ScheduleEntry {
            id: inner.next_id("entry"),
            staff_id: request.staff_id.clone(),
            date: request.date.clone(),
            status: request.status,
            value: request.value,
            note: request.note.clone(),
        };
        inner.entries.push(entry.clone());
        Ok(entry)
    }

    async fn update_entry(&self, entry_id: &str, patch: &UpdateEntryRequest) -> Result<ScheduleEntry, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let entry = inner
            .entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| StoreError::NotFound(entry_id.to_string()))?;
        entry.status = patch.status;
        entry.value = patch.value;
        entry.note = patch.note.clone();
        Ok(entry.clone())
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let before = inner.entries.len();
        inner.entries.retain(|e| e.id != entry_id);
        if inner.entries.len() == before {
            return Err(StoreError::NotFound(entry_id.to_string()));
        }
        Ok(())
    }
}

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::domain::errors::{NotFoundError, StaffValidationError};
use crate::storage::{DbConnection, ScheduleEntryRepository, StaffRepository};
use shared::{CreateStaffRequest, StaffListResponse, StaffMember, UpdateStaffRequest};

const MAX_NAME_LEN: usize = 100;
const MAX_HANDLE_LEN: usize = 50;

/// Service for managing the people who can be scheduled
#[derive(Clone)]
pub struct StaffService {
    staff_repository: StaffRepository,
    entry_repository: ScheduleEntryRepository,
}

impl StaffService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            staff_repository: StaffRepository::new(db.clone()),
            entry_repository: ScheduleEntryRepository::new(db),
        }
    }

    pub async fn create_staff(&self, request: CreateStaffRequest) -> Result<StaffMember> {
        info!("Creating staff: name={}, group={}", request.name, request.group);

        let name = validate_name(&request.name)?;
        let handle = normalize_handle(request.handle)?;

        let staff = StaffMember {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            handle,
            group: request.group,
            created_at: Utc::now().to_rfc3339(),
        };
        self.staff_repository.store_staff(&staff).await?;

        info!("Created staff {} with ID {}", staff.name, staff.id);
        Ok(staff)
    }

    pub async fn list_staff(&self) -> Result<StaffListResponse> {
        let staff = self.staff_repository.list_staff().await?;
        info!("Found {} staff", staff.len());
        Ok(StaffListResponse { staff })
    }

    pub async fn update_staff(&self, staff_id: &str, request: UpdateStaffRequest) -> Result<StaffMember> {
        info!("Updating staff {}: {:?}", staff_id, request);

        let mut staff = self
            .staff_repository
            .get_staff(staff_id)
            .await?
            .ok_or_else(|| NotFoundError::Staff(staff_id.to_string()))?;

        if let Some(name) = request.name {
            staff.name = validate_name(&name)?;
        }
        if request.handle.is_some() {
            staff.handle = normalize_handle(request.handle)?;
        }
        if let Some(group) = request.group {
            staff.group = group;
        }

        self.staff_repository.update_staff(&staff).await?;
        Ok(staff)
    }

    pub async fn delete_staff(&self, staff_id: &str) -> Result<()> {
        info!("Deleting staff {}", staff_id);

        if !self.staff_repository.delete_staff(staff_id).await? {
            warn!("Staff not found for delete: {}", staff_id);
            return Err(NotFoundError::Staff(staff_id.to_string()).into());
        }
        Ok(())
    }

    /// Remove every schedule entry owned by `staff_id`
    pub async fn delete_entries_for_staff(&self, staff_id: &str) -> Result<u64> {
        if self.staff_repository.get_staff(staff_id).await?.is_none() {
            return Err(NotFoundError::Staff(staff_id.to_string()).into());
        }

        let deleted = self.entry_repository.delete_entries_for_staff(staff_id).await?;
        info!("Deleted {} entries for staff {}", deleted, staff_id);
        Ok(deleted)
    }
}

fn validate_name(name: &str) -> Result<String, StaffValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StaffValidationError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(StaffValidationError::NameTooLong);
    }
    Ok(trimmed.to_string())
}

fn normalize_handle(handle: Option<String>) -> Result<Option<String>, StaffValidationError> {
    match handle.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(h) if h.chars().count() > MAX_HANDLE_LEN => Err(StaffValidationError::HandleTooLong),
        Some(h) => Ok(Some(h.to_string())),
    }
}

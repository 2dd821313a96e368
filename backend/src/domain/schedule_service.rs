use anyhow::Result;
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::errors::{EntryValidationError, NotFoundError};
use crate::storage::{DbConnection, ScheduleEntryRepository, StaffRepository};
use shared::{EntryListResponse, EntryRangeQuery, ScheduleEntry, UpdateEntryRequest, UpsertEntryRequest};

const MAX_NOTE_LEN: usize = 500;

/// Service for the per-day schedule entries
#[derive(Clone)]
pub struct ScheduleService {
    entry_repository: ScheduleEntryRepository,
    staff_repository: StaffRepository,
}

impl ScheduleService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            entry_repository: ScheduleEntryRepository::new(db.clone()),
            staff_repository: StaffRepository::new(db),
        }
    }

    /// Entries whose date lies in `[query.start, query.end)`
    pub async fn list_entries(&self, query: EntryRangeQuery) -> Result<EntryListResponse> {
        let start = parse_date_key(&query.start)?;
        let end = parse_date_key(&query.end)?;
        if start >= end {
            return Err(EntryValidationError::EmptyRange {
                start: query.start,
                end: query.end,
            }
            .into());
        }

        let entries = self
            .entry_repository
            .list_entries_in_range(&query.start, &query.end)
            .await?;
        info!("Found {} entries in [{}, {})", entries.len(), query.start, query.end);
        Ok(EntryListResponse { entries })
    }

    /// Create the entry for `(staff_id, date)` or overwrite the existing one
    pub async fn upsert_entry(&self, request: UpsertEntryRequest) -> Result<ScheduleEntry> {
        info!(
            "Upserting entry for staff {} on {} ({})",
            request.staff_id, request.date, request.status
        );

        parse_date_key(&request.date)?;
        let note = normalize_note(request.note)?;

        if self.staff_repository.get_staff(&request.staff_id).await?.is_none() {
            warn!("Upsert for unknown staff {}", request.staff_id);
            return Err(NotFoundError::Staff(request.staff_id).into());
        }

        let entry = ScheduleEntry {
            id: uuid::Uuid::new_v4().to_string(),
            staff_id: request.staff_id,
            date: request.date,
            status: request.status,
            value: request.value,
            note,
        };
        self.entry_repository
            .upsert_entry(&entry, &Utc::now().to_rfc3339())
            .await
    }

    pub async fn update_entry(&self, entry_id: &str, request: UpdateEntryRequest) -> Result<ScheduleEntry> {
        info!("Updating entry {} to {}", entry_id, request.status);

        let note = normalize_note(request.note)?;
        let mut entry = self
            .entry_repository
            .get_entry(entry_id)
            .await?
            .ok_or_else(|| NotFoundError::Entry(entry_id.to_string()))?;

        entry.status = request.status;
        entry.value = request.value;
        entry.note = note;

        if !self
            .entry_repository
            .update_entry(&entry, &Utc::now().to_rfc3339())
            .await?
        {
            return Err(NotFoundError::Entry(entry_id.to_string()).into());
        }
        Ok(entry)
    }

    pub async fn delete_entry(&self, entry_id: &str) -> Result<()> {
        info!("Deleting entry {}", entry_id);

        if !self.entry_repository.delete_entry(entry_id).await? {
            warn!("Entry not found for delete: {}", entry_id);
            return Err(NotFoundError::Entry(entry_id.to_string()).into());
        }
        Ok(())
    }
}

/// Accepts only zero-padded `YYYY-MM-DD` keys naming a real calendar day
fn parse_date_key(key: &str) -> Result<NaiveDate, EntryValidationError> {
    let date = NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_err(|_| EntryValidationError::InvalidDate(key.to_string()))?;
    if date.format("%Y-%m-%d").to_string() != key {
        return Err(EntryValidationError::InvalidDate(key.to_string()));
    }
    Ok(date)
}

fn normalize_note(note: Option<String>) -> Result<Option<String>, EntryValidationError> {
    match note.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(n) if n.chars().count() > MAX_NOTE_LEN => Err(EntryValidationError::NoteTooLong),
        Some(n) => Ok(Some(n.to_string())),
    }
}

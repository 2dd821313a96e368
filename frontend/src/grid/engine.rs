//! # Grid Engine
//!
//! Owns everything the month grid shows: the staff list, the entries of the
//! viewed month (indexed by `staff|date`), the view selectors and the edit
//! modal. All writes go straight through the `ScheduleStore`; the local copy
//! is only patched after the store has accepted the change.
//!
//! ## Loading
//!
//! A month switch clears the local entries at once and hands out a
//! `LoadTicket`. Fetch results are applied only while their ticket is the
//! latest one, so a slow response for a month the user already left is
//! dropped instead of painting badges into the wrong month.

use chrono::NaiveDate;
use log::{debug, error, info, warn};
use shared::{
    CreateStaffRequest, ScheduleEntry, StaffGroup, StaffMember, UpdateEntryRequest, UpdateStaffRequest,
    UpsertEntryRequest,
};
use std::collections::HashMap;

use crate::grid::cells::{cell_view, entry_key, index_entries, total_value, GridCell, GridRow};
use crate::services::date_utils;
use crate::services::store::{ScheduleStore, StoreError};
use crate::state::{EditBuffer, EditModal, ModalError, ModalOutcome, Preferences, StatusFilter, ViewState};

const MAX_NAME_LENGTH: usize = 100;
const MAX_HANDLE_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Validation(String),
    #[error("An entry already exists for {staff_id} on {date}")]
    CellOccupied { staff_id: String, date: String },
    #[error("No entry for {staff_id} on {date}")]
    EmptyCell { staff_id: String, date: String },
    #[error("Another cell is already being edited")]
    ModalBusy,
    #[error("No cell is being edited")]
    ModalClosed,
    #[error("Unknown staff member: {0}")]
    UnknownStaff(String),
    #[error("Day {0} is outside the viewed month")]
    DayOutOfRange(u32),
}

impl From<ModalError> for GridError {
    fn from(error: ModalError) -> Self {
        match error {
            ModalError::Busy => GridError::ModalBusy,
            ModalError::NotOpen => GridError::ModalClosed,
            ModalError::NotEditing => GridError::Validation(error.to_string()),
        }
    }
}

/// Identifies one entry fetch; only the newest ticket may apply its result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    year: i32,
    month: u32,
}

impl LoadTicket {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

pub struct GridEngine<S: ScheduleStore> {
    store: S,
    view: ViewState,
    staff: Vec<StaffMember>,
    entries: HashMap<String, ScheduleEntry>,
    modal: EditModal,
    generation: u64,
    last_error: Option<String>,
}

impl<S: ScheduleStore> GridEngine<S> {
    pub fn new(store: S, view: ViewState) -> Self {
        Self {
            store,
            view,
            staff: Vec::new(),
            entries: HashMap::new(),
            modal: EditModal::default(),
            generation: 0,
            last_error: None,
        }
    }

    /// Engine opened on the current month by the local clock
    pub fn with_current_month(store: S) -> Self {
        Self::new(store, ViewState::current())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.values()
    }

    pub fn modal(&self) -> &EditModal {
        &self.modal
    }

    /// User-facing message of the last failed write
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Initial load: staff list, then the entries of the viewed month
    pub async fn mount(&mut self) {
        self.load_staff().await;
        self.load_entries().await;
    }

    /// Refresh the staff list; a failure leaves the list empty
    pub async fn load_staff(&mut self) {
        match self.store.list_staff().await {
            Ok(staff) => {
                debug!("Loaded {} staff members", staff.len());
                self.staff = staff;
            }
            Err(e) => {
                error!("Failed to load staff: {}", e);
                self.staff.clear();
            }
        }
    }

    /// Refresh the entries of the viewed month
    pub async fn load_entries(&mut self) {
        let ticket = self.begin_load();
        self.reload_entries(ticket).await;
    }

    // ---- navigation ----

    /// Switch to `(year, month)`. Entries of the previous month are dropped
    /// immediately; pass the ticket to `reload_entries` to fetch the new ones.
    pub fn set_month(&mut self, year: i32, month: u32) -> LoadTicket {
        if self.view.set_period(year, month) {
            info!("📅 Viewing {}", self.view.title());
        }
        self.entries.clear();
        self.begin_load()
    }

    pub fn next_month(&mut self) -> LoadTicket {
        let (year, month) = date_utils::next_month(self.view.year(), self.view.month());
        self.set_month(year, month)
    }

    pub fn previous_month(&mut self) -> LoadTicket {
        let (year, month) = date_utils::previous_month(self.view.year(), self.view.month());
        self.set_month(year, month)
    }

    fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
            year: self.view.year(),
            month: self.view.month(),
        }
    }

    /// Fetch and apply the entries for `ticket`; returns false when the
    /// result was discarded as stale
    pub async fn reload_entries(&mut self, ticket: LoadTicket) -> bool {
        let result = self.fetch_entries(&ticket).await;
        self.apply_entries(&ticket, result)
    }

    pub async fn fetch_entries(&self, ticket: &LoadTicket) -> Result<Vec<ScheduleEntry>, StoreError> {
        let (start, end) = date_utils::month_range(ticket.year, ticket.month);
        self.store.list_entries(&start, &end).await
    }

    pub fn apply_entries(&mut self, ticket: &LoadTicket, result: Result<Vec<ScheduleEntry>, StoreError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale entries for {}-{:02} (load {} superseded by {})",
                ticket.year, ticket.month, ticket.generation, self.generation
            );
            return false;
        }

        match result {
            Ok(entries) => {
                debug!("Loaded {} entries for {}-{:02}", entries.len(), ticket.year, ticket.month);
                self.entries = index_entries(entries);
            }
            Err(e) => {
                error!("Failed to load entries for {}-{:02}: {}", ticket.year, ticket.month, e);
                self.entries.clear();
            }
        }
        true
    }

    pub fn set_group(&mut self, group: StaffGroup) {
        self.view.set_group(group);
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.view.set_filter(filter);
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::from_view(&self.view)
    }

    pub fn apply_preferences(&mut self, preferences: &Preferences) {
        preferences.apply_to(&mut self.view);
    }

    // ---- cells ----

    pub fn entry_for(&self, staff_id: &str, day: u32) -> Option<&ScheduleEntry> {
        self.entries.get(&entry_key(staff_id, &self.view.date_key(day)))
    }

    /// Open the modal for a cell: edit when it has an entry, create otherwise
    pub fn click_cell(&mut self, staff_id: &str, day: u32) -> Result<(), GridError> {
        if self.entry_for(staff_id, day).is_some() {
            self.open_edit(staff_id, day)
        } else {
            self.open_create(staff_id, day)
        }
    }

    pub fn open_create(&mut self, staff_id: &str, day: u32) -> Result<(), GridError> {
        let date = self.cell_date(staff_id, day)?;
        if self.entries.contains_key(&entry_key(staff_id, &date)) {
            return Err(GridError::CellOccupied {
                staff_id: staff_id.to_string(),
                date,
            });
        }
        self.modal.open_create(staff_id, &date)?;
        Ok(())
    }

    pub fn open_edit(&mut self, staff_id: &str, day: u32) -> Result<(), GridError> {
        let date = self.cell_date(staff_id, day)?;
        let entry = self
            .entries
            .get(&entry_key(staff_id, &date))
            .ok_or_else(|| GridError::EmptyCell {
                staff_id: staff_id.to_string(),
                date: date.clone(),
            })?;
        self.modal.open_edit(entry)?;
        Ok(())
    }

    fn cell_date(&self, staff_id: &str, day: u32) -> Result<String, GridError> {
        if !self.staff.iter().any(|s| s.id == staff_id) {
            return Err(GridError::UnknownStaff(staff_id.to_string()));
        }
        if !self.view.contains_day(day) {
            return Err(GridError::DayOutOfRange(day));
        }
        Ok(self.view.date_key(day))
    }

    pub fn buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.modal.buffer_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.modal.cancel();
    }

    /// Write the modal buffer to the store. The modal stays open on failure.
    pub async fn save_entry(&mut self) -> Result<(), GridError> {
        let (entry_id, buffer) = match &self.modal {
            EditModal::Closed => return Err(GridError::ModalClosed),
            EditModal::Creating(buffer) => (None, buffer.clone()),
            EditModal::Editing { entry_id, buffer } => (Some(entry_id.clone()), buffer.clone()),
        };

        let value = match buffer.parsed_value() {
            Ok(value) => value,
            Err(message) => return self.fail("Invalid entry", GridError::Validation(message)),
        };
        let note = buffer.note_value();

        match entry_id {
            None => {
                let request = UpsertEntryRequest {
                    staff_id: buffer.staff_id,
                    date: buffer.date,
                    status: buffer.status,
                    value,
                    note,
                };
                let saved = match self.store.upsert_entry(&request).await {
                    Ok(saved) => saved,
                    Err(e) => return self.fail("Failed to create entry", e.into()),
                };
                info!("✅ Saved {} for {} on {}", saved.status, saved.staff_id, saved.date);
                self.patch_local(saved);
                self.modal.finish(ModalOutcome::Saved)?;
                self.last_error = None;
                self.load_entries().await;
            }
            Some(entry_id) => {
                let patch = UpdateEntryRequest {
                    status: buffer.status,
                    value,
                    note,
                };
                let updated = match self.store.update_entry(&entry_id, &patch).await {
                    Ok(updated) => updated,
                    Err(e) => return self.fail("Failed to update entry", e.into()),
                };
                info!("✅ Updated entry {} to {}", updated.id, updated.status);
                self.patch_local(updated);
                self.modal.finish(ModalOutcome::Saved)?;
                self.last_error = None;
            }
        }
        Ok(())
    }

    /// Keep a written entry locally, unless the view has moved to another month
    fn patch_local(&mut self, entry: ScheduleEntry) {
        let (start, end) = self.view.month_range();
        if entry.date >= start && entry.date < end {
            self.entries.insert(entry_key(&entry.staff_id, &entry.date), entry);
        } else {
            debug!("Entry {} on {} is outside {}, not shown", entry.id, entry.date, self.view.title());
        }
    }

    /// Delete the entry open in the modal
    pub async fn delete_entry(&mut self) -> Result<(), GridError> {
        let entry_id = match &self.modal {
            EditModal::Closed => return Err(GridError::ModalClosed),
            EditModal::Creating(_) => return Err(ModalError::NotEditing.into()),
            EditModal::Editing { entry_id, .. } => entry_id.clone(),
        };
        self.delete_entry_by_id(&entry_id).await
    }

    /// Delete an entry by store id. Closes the modal when it was editing it.
    pub async fn delete_entry_by_id(&mut self, entry_id: &str) -> Result<(), GridError> {
        if let Err(e) = self.store.delete_entry(entry_id).await {
            return self.fail("Failed to delete entry", e.into());
        }

        info!("🗑️ Deleted entry {}", entry_id);
        self.entries.retain(|_, entry| entry.id != entry_id);
        if self.modal.entry_id() == Some(entry_id) {
            self.modal.finish(ModalOutcome::Deleted)?;
        }
        self.last_error = None;
        Ok(())
    }

    pub fn total_for_staff(&self, staff_id: &str) -> u64 {
        total_value(self.entries.values(), staff_id)
    }

    // ---- rendering ----

    /// Key of `today` when it falls in the viewed month
    pub fn today_key(&self, today: NaiveDate) -> Option<String> {
        let key = date_utils::date_key_of(today);
        let (start, end) = self.view.month_range();
        (key >= start && key < end).then_some(key)
    }

    /// Rows for the active group tab, highlighting today by the local clock
    pub fn rows(&self) -> Vec<GridRow> {
        self.rows_at(chrono::Local::now().date_naive())
    }

    pub fn rows_at(&self, today: NaiveDate) -> Vec<GridRow> {
        let today_key = self.today_key(today);
        let filter = self.view.filter();
        let days = self.view.days();

        self.view
            .visible_staff(&self.staff)
            .into_iter()
            .map(|staff| {
                let cells = days
                    .iter()
                    .map(|&day| {
                        let date = self.view.date_key(day);
                        let view = cell_view(self.entries.get(&entry_key(&staff.id, &date)), filter);
                        let is_today = today_key.as_deref() == Some(date.as_str());
                        GridCell { day, date, view, is_today }
                    })
                    .collect();
                GridRow {
                    staff: staff.clone(),
                    cells,
                    total: self.total_for_staff(&staff.id),
                }
            })
            .collect()
    }

    // ---- staff ----

    pub async fn add_staff(
        &mut self,
        name: &str,
        handle: Option<&str>,
        group: StaffGroup,
    ) -> Result<StaffMember, GridError> {
        let name = match validate_name(name) {
            Ok(name) => name,
            Err(e) => return self.fail("Invalid staff member", e),
        };
        let handle = match handle.map(validate_handle).transpose() {
            Ok(handle) => handle.flatten(),
            Err(e) => return self.fail("Invalid staff member", e),
        };

        let request = CreateStaffRequest { name, handle, group };
        let staff = match self.store.insert_staff(&request).await {
            Ok(staff) => staff,
            Err(e) => return self.fail("Failed to add staff member", e.into()),
        };

        info!("👤 Added {} to {}", staff.name, staff.group);
        self.last_error = None;
        self.load_staff().await;
        Ok(staff)
    }

    pub async fn update_staff(
        &mut self,
        staff_id: &str,
        mut patch: UpdateStaffRequest,
    ) -> Result<StaffMember, GridError> {
        if let Some(name) = patch.name.take() {
            match validate_name(&name) {
                Ok(name) => patch.name = Some(name),
                Err(e) => return self.fail("Invalid staff member", e),
            }
        }
        if let Some(handle) = patch.handle.take() {
            match validate_handle(&handle) {
                Ok(handle) => patch.handle = Some(handle.unwrap_or_default()),
                Err(e) => return self.fail("Invalid staff member", e),
            }
        }

        let staff = match self.store.update_staff(staff_id, &patch).await {
            Ok(staff) => staff,
            Err(e) => return self.fail("Failed to update staff member", e.into()),
        };

        info!("👤 Updated {}", staff.name);
        self.last_error = None;
        self.load_staff().await;
        Ok(staff)
    }

    /// Remove a staff member and every entry they own
    pub async fn delete_staff(&mut self, staff_id: &str) -> Result<(), GridError> {
        let removed = match self.store.delete_entries_for_staff(staff_id).await {
            Ok(removed) => removed,
            Err(e) => return self.fail("Failed to delete staff entries", e.into()),
        };
        self.entries.retain(|_, entry| entry.staff_id != staff_id);
        if let Err(e) = self.store.delete_staff(staff_id).await {
            return self.fail("Failed to delete staff member", e.into());
        }

        info!("🗑️ Deleted staff member {} with {} entries", staff_id, removed);
        self.staff.retain(|s| s.id != staff_id);
        if self.modal.buffer().is_some_and(|b| b.staff_id == staff_id) {
            self.modal.cancel();
        }
        self.last_error = None;
        Ok(())
    }

    fn fail<T>(&mut self, context: &str, error: GridError) -> Result<T, GridError> {
        match &error {
            GridError::Store(_) => error!("{}: {}", context, error),
            _ => warn!("{}: {}", context, error),
        }
        self.last_error = Some(error.to_string());
        Err(error)
    }
}

fn validate_name(name: &str) -> Result<String, GridError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GridError::Validation("Nama tidak boleh kosong".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(GridError::Validation(format!(
            "Nama maksimal {} karakter",
            MAX_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

/// Trimmed handle; blank means no handle
fn validate_handle(handle: &str) -> Result<Option<String>, GridError> {
    let handle = handle.trim();
    if handle.chars().count() > MAX_HANDLE_LENGTH {
        return Err(GridError::Validation(format!(
            "Handle maksimal {} karakter",
            MAX_HANDLE_LENGTH
        )));
    }
    Ok((!handle.is_empty()).then(|| handle.to_string()))
}

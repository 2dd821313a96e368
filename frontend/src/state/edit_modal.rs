//! # Edit Modal State Module
//!
//! The single-cell editor. States:
//!
//! ```text
//! Closed -> Creating -> (saved | cancelled) -> Closed
//! Closed -> Editing  -> (saved | deleted | cancelled) -> Closed
//! ```
//!
//! There is no in-flight "saving" state; the form stays editable while a
//! write is pending.

use log::info;
use shared::{EntryStatus, ScheduleEntry};

/// Form fields of the edit modal, kept as the user typed them
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    pub staff_id: String,
    pub date: String,
    pub status: EntryStatus,
    /// Raw value input; empty means "no value"
    pub value_input: String,
    pub note: String,
}

impl EditBuffer {
    /// Fresh buffer for an empty cell
    pub fn blank(staff_id: &str, date: &str) -> Self {
        Self {
            staff_id: staff_id.to_string(),
            date: date.to_string(),
            status: EntryStatus::Plan,
            value_input: String::new(),
            note: String::new(),
        }
    }

    pub fn from_entry(entry: &ScheduleEntry) -> Self {
        Self {
            staff_id: entry.staff_id.clone(),
            date: entry.date.clone(),
            status: entry.status,
            value_input: entry.value.map(|v| v.to_string()).unwrap_or_default(),
            note: entry.note.clone().unwrap_or_default(),
        }
    }

    /// Parse the value field: empty → `None`, otherwise a non-negative integer
    pub fn parsed_value(&self) -> Result<Option<u32>, String> {
        let raw = self.value_input.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<u32>()
            .map(Some)
            .map_err(|_| format!("Nilai harus bilangan bulat tidak negatif: {}", raw))
    }

    /// Trimmed note, `None` when blank
    pub fn note_value(&self) -> Option<String> {
        let note = self.note.trim();
        (!note.is_empty()).then(|| note.to_string())
    }
}

/// How an open modal was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    Saved,
    Deleted,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    #[error("Another cell is already being edited")]
    Busy,
    #[error("No cell is being edited")]
    NotOpen,
    #[error("Only an existing entry can be deleted")]
    NotEditing,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditModal {
    #[default]
    Closed,
    Creating(EditBuffer),
    Editing { entry_id: String, buffer: EditBuffer },
}

impl EditModal {
    pub fn open_create(&mut self, staff_id: &str, date: &str) -> Result<(), ModalError> {
        if self.is_open() {
            return Err(ModalError::Busy);
        }
        info!("📝 Creating entry for {} on {}", staff_id, date);
        *self = EditModal::Creating(EditBuffer::blank(staff_id, date));
        Ok(())
    }

    pub fn open_edit(&mut self, entry: &ScheduleEntry) -> Result<(), ModalError> {
        if self.is_open() {
            return Err(ModalError::Busy);
        }
        info!("📝 Editing entry {} ({} on {})", entry.id, entry.staff_id, entry.date);
        *self = EditModal::Editing {
            entry_id: entry.id.clone(),
            buffer: EditBuffer::from_entry(entry),
        };
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, EditModal::Closed)
    }

    pub fn is_creating(&self) -> bool {
        matches!(self, EditModal::Creating(_))
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditModal::Editing { .. })
    }

    /// Store id of the entry being edited
    pub fn entry_id(&self) -> Option<&str> {
        match self {
            EditModal::Editing { entry_id, .. } => Some(entry_id),
            _ => None,
        }
    }

    pub fn buffer(&self) -> Option<&EditBuffer> {
        match self {
            EditModal::Closed => None,
            EditModal::Creating(buffer) | EditModal::Editing { buffer, .. } => Some(buffer),
        }
    }

    pub fn buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        match self {
            EditModal::Closed => None,
            EditModal::Creating(buffer) | EditModal::Editing { buffer, .. } => Some(buffer),
        }
    }

    /// Close the modal with `outcome`. `Deleted` is only valid from `Editing`.
    pub fn finish(&mut self, outcome: ModalOutcome) -> Result<(), ModalError> {
        match (&*self, outcome) {
            (EditModal::Closed, _) => return Err(ModalError::NotOpen),
            (EditModal::Creating(_), ModalOutcome::Deleted) => return Err(ModalError::NotEditing),
            _ => {}
        }
        info!("📝 Edit modal closed: {:?}", outcome);
        *self = EditModal::Closed;
        Ok(())
    }

    /// Discard the buffer; a no-op when already closed
    pub fn cancel(&mut self) {
        if self.is_open() {
            let _ = self.finish(ModalOutcome::Cancelled);
        }
    }
}

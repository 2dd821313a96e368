//! Typed domain errors. The REST layer downcasts these out of `anyhow::Error`
//! to choose a status code.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StaffValidationError {
    #[error("Staff name cannot be empty")]
    EmptyName,
    #[error("Staff name cannot exceed 100 characters")]
    NameTooLong,
    #[error("Staff handle cannot exceed 50 characters")]
    HandleTooLong,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EntryValidationError {
    #[error("Date must be in YYYY-MM-DD format: {0}")]
    InvalidDate(String),
    #[error("Range start {start} must be before range end {end}")]
    EmptyRange { start: String, end: String },
    #[error("Note cannot exceed 500 characters")]
    NoteTooLong,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Staff not found: {0}")]
    Staff(String),
    #[error("Entry not found: {0}")]
    Entry(String),
}

//! Client-side state for the schedule grid.
//!
//! - **view_state**: year/month/group/filter selectors
//! - **edit_modal**: the single-cell edit buffer and its state machine
//! - **preferences**: group tab and filter persisted between sessions

pub mod edit_modal;
pub mod preferences;
pub mod view_state;

pub use edit_modal::{EditBuffer, EditModal, ModalError, ModalOutcome};
pub use preferences::{Preferences, PreferencesStore};
pub use view_state::{StatusFilter, ViewState};

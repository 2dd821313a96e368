//! The month grid: staff rows by day columns, one badge per cell.

pub mod cells;
pub mod engine;

pub use cells::{cell_view, entry_key, index_entries, CellView, GridCell, GridRow};
pub use engine::{GridEngine, GridError, LoadTicket};

//! Cell-level rendering decisions for the month grid.

use shared::{EntryStatus, ScheduleEntry, StaffMember};
use std::collections::HashMap;

use crate::state::StatusFilter;

/// Lookup key for the entry of one staff member on one day
pub fn entry_key(staff_id: &str, date: &str) -> String {
    format!("{}|{}", staff_id, date)
}

/// Index entries by `entry_key`. Later duplicates overwrite earlier ones.
pub fn index_entries(entries: Vec<ScheduleEntry>) -> HashMap<String, ScheduleEntry> {
    entries
        .into_iter()
        .map(|entry| (entry_key(&entry.staff_id, &entry.date), entry))
        .collect()
}

/// What a single cell shows
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    /// Nothing rendered
    Hidden,
    /// Empty cell rendered as a "none" badge (only under the `none` filter)
    Placeholder,
    Badge(ScheduleEntry),
}

impl CellView {
    pub fn is_visible(&self) -> bool {
        !matches!(self, CellView::Hidden)
    }

    pub fn entry(&self) -> Option<&ScheduleEntry> {
        match self {
            CellView::Badge(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Decide what a cell shows under `filter`
pub fn cell_view(entry: Option<&ScheduleEntry>, filter: StatusFilter) -> CellView {
    match (entry, filter) {
        (Some(entry), StatusFilter::All) => CellView::Badge(entry.clone()),
        (Some(entry), StatusFilter::Only(status)) if entry.status == status => CellView::Badge(entry.clone()),
        (Some(_), StatusFilter::Only(_)) => CellView::Hidden,
        (None, StatusFilter::Only(EntryStatus::None)) => CellView::Placeholder,
        (None, _) => CellView::Hidden,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub day: u32,
    pub date: String,
    pub view: CellView,
    pub is_today: bool,
}

/// One staff member's row for the viewed month
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub staff: StaffMember,
    pub cells: Vec<GridCell>,
    /// Sum of values over all loaded entries, regardless of the filter
    pub total: u64,
}

/// Sum of `value` over `staff_id`'s entries; absent values count as 0
pub fn total_value<'a>(entries: impl IntoIterator<Item = &'a ScheduleEntry>, staff_id: &str) -> u64 {
    entries
        .into_iter()
        .filter(|entry| entry.staff_id == staff_id)
        .map(|entry| u64::from(entry.value.unwrap_or(0)))
        .sum()
}

//! # View State Module
//!
//! The four selectors of the grid view: year, month, group tab and status
//! filter, plus what derives from them (day numbers, visible staff).
//!
//! Changing year or month is the only transition with a side effect; the grid
//! engine reacts to it by dropping the loaded entries and reloading.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use shared::{EntryStatus, StaffGroup, StaffMember};
use std::fmt;
use std::str::FromStr;

use crate::services::date_utils;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

/// Which badges the grid shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(EntryStatus),
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse::<EntryStatus>().map(StatusFilter::Only)
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

/// View-level selectors for the calendar grid
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    year: i32,
    /// 1-12
    month: u32,
    group: StaffGroup,
    filter: StatusFilter,
}

impl ViewState {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year: clamp_year(year),
            month: month.clamp(1, 12),
            group: StaffGroup::default(),
            filter: StatusFilter::default(),
        }
    }

    /// View of the current month by the local clock
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(today.year(), today.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn group(&self) -> StaffGroup {
        self.group
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Move to `(year, month)`; returns true when the period actually changed
    pub fn set_period(&mut self, year: i32, month: u32) -> bool {
        let year = clamp_year(year);
        let month = month.clamp(1, 12);
        let changed = year != self.year || month != self.month;
        self.year = year;
        self.month = month;
        changed
    }

    pub fn set_group(&mut self, group: StaffGroup) {
        self.group = group;
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn days_in_month(&self) -> u32 {
        date_utils::days_in_month(self.year, self.month)
    }

    /// Day numbers `1..=N` of the selected month
    pub fn days(&self) -> Vec<u32> {
        (1..=self.days_in_month()).collect()
    }

    pub fn date_key(&self, day: u32) -> String {
        date_utils::build_date_key(self.year, self.month, day)
    }

    pub fn contains_day(&self, day: u32) -> bool {
        (1..=self.days_in_month()).contains(&day)
    }

    /// `[first day, first day of next month)`
    pub fn month_range(&self) -> (String, String) {
        date_utils::month_range(self.year, self.month)
    }

    /// Staff in the active group tab, keeping the given order
    pub fn visible_staff<'a>(&self, staff: &'a [StaffMember]) -> Vec<&'a StaffMember> {
        staff.iter().filter(|s| s.group == self.group).collect()
    }

    /// Header text such as "Maret 2025"
    pub fn title(&self) -> String {
        format!("{} {}", date_utils::month_name(self.month), self.year)
    }
}

fn clamp_year(year: i32) -> i32 {
    year.clamp(MIN_YEAR, MAX_YEAR)
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Location group a staff member is scheduled under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffGroup {
    /// Regional office
    #[default]
    Kanwil,
    /// Dumai branch
    Dumai,
}

impl StaffGroup {
    pub const ALL: [StaffGroup; 2] = [StaffGroup::Kanwil, StaffGroup::Dumai];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffGroup::Kanwil => "kanwil",
            StaffGroup::Dumai => "dumai",
        }
    }
}

impl fmt::Display for StaffGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kanwil" => Ok(StaffGroup::Kanwil),
            "dumai" => Ok(StaffGroup::Dumai),
            other => Err(format!("Unknown staff group: {}", other)),
        }
    }
}

/// Status of a single day's schedule entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Plan,
    Done,
    Off,
    Late,
    None,
}

impl EntryStatus {
    pub const ALL: [EntryStatus; 5] = [
        EntryStatus::Plan,
        EntryStatus::Done,
        EntryStatus::Off,
        EntryStatus::Late,
        EntryStatus::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Plan => "plan",
            EntryStatus::Done => "done",
            EntryStatus::Off => "off",
            EntryStatus::Late => "late",
            EntryStatus::None => "none",
        }
    }

    /// Human-readable label used by the legend
    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Plan => "Rencana",
            EntryStatus::Done => "Selesai",
            EntryStatus::Off => "Libur",
            EntryStatus::Late => "Terlambat",
            EntryStatus::None => "Kosong",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plan" => Ok(EntryStatus::Plan),
            "done" => Ok(EntryStatus::Done),
            "off" => Ok(EntryStatus::Off),
            "late" => Ok(EntryStatus::Late),
            "none" => Ok(EntryStatus::None),
            other => Err(format!("Unknown entry status: {}", other)),
        }
    }
}

/// A person who can be scheduled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Opaque id assigned by the store
    pub id: String,
    /// Display name, never empty after trimming
    pub name: String,
    /// Optional short handle or label
    pub handle: Option<String>,
    pub group: StaffGroup,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

/// One status/value/note for one staff member on one calendar day.
///
/// At most one entry exists per `(staff_id, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: String,
    pub staff_id: String,
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
    pub status: EntryStatus,
    pub value: Option<u32>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStaffRequest {
    pub name: String,
    pub handle: Option<String>,
    pub group: StaffGroup,
}

/// Partial update for a staff member; absent fields are left untouched.
/// An empty `handle` clears the stored handle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateStaffRequest {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub group: Option<StaffGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffListResponse {
    pub staff: Vec<StaffMember>,
}

/// Half-open date range query: `start <= date < end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRangeQuery {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryListResponse {
    pub entries: Vec<ScheduleEntry>,
}

/// Insert-or-replace keyed on `(staff_id, date)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertEntryRequest {
    pub staff_id: String,
    pub date: String,
    pub status: EntryStatus,
    pub value: Option<u32>,
    pub note: Option<String>,
}

/// Replaces the mutable fields of an existing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    pub status: EntryStatus,
    pub value: Option<u32>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEntriesResponse {
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&EntryStatus::Late).unwrap();
        assert_eq!(json, "\"late\"");

        let parsed: EntryStatus = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, EntryStatus::None);
    }

    #[test]
    fn test_status_from_str_matches_as_str() {
        for status in EntryStatus::ALL {
            assert_eq!(status.as_str().parse::<EntryStatus>(), Ok(status));
        }
        assert!("pending".parse::<EntryStatus>().is_err());
    }

    #[test]
    fn test_defaults_and_labels() {
        assert_eq!(StaffGroup::default(), StaffGroup::Kanwil);
        assert_eq!(EntryStatus::default(), EntryStatus::Plan);
        assert_eq!(EntryStatus::Off.label(), "Libur");

        let labels: Vec<&str> = EntryStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Rencana", "Selesai", "Libur", "Terlambat", "Kosong"]);
    }

    #[test]
    fn test_group_parsing_is_case_insensitive() {
        for group in StaffGroup::ALL {
            assert_eq!(group.to_string().parse::<StaffGroup>(), Ok(group));
        }
        assert_eq!(" Kanwil ".parse::<StaffGroup>(), Ok(StaffGroup::Kanwil));
        assert_eq!("DUMAI".parse::<StaffGroup>(), Ok(StaffGroup::Dumai));
        assert!("pekanbaru".parse::<StaffGroup>().is_err());
    }

    #[test]
    fn test_entry_round_trips_with_absent_value() {
        let entry = ScheduleEntry {
            id: "e1".to_string(),
            staff_id: "s1".to_string(),
            date: "2025-03-10".to_string(),
            status: EntryStatus::Done,
            value: None,
            note: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "done");
        assert!(json["value"].is_null());
    }
}

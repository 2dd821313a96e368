//! Calendar arithmetic for the month grid.
//!
//! Every date key is assembled from integer `(year, month, day)` triples and
//! never parsed from user text, so there is no timezone drift. Months are
//! 1-based (January = 1).

use chrono::{Datelike, NaiveDate};

/// Gregorian leap-year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year` (28–31)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Canonical `YYYY-MM-DD` key for a calendar day
pub fn build_date_key(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Month following `(year, month)`
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Month preceding `(year, month)`
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Half-open range `[first day of month, first day of next month)` as date keys
pub fn month_range(year: i32, month: u32) -> (String, String) {
    let (next_year, next) = next_month(year, month);
    (build_date_key(year, month, 1), build_date_key(next_year, next, 1))
}

/// Key for `date`, used to highlight the "today" column
pub fn date_key_of(date: NaiveDate) -> String {
    build_date_key(date.year(), date.month(), date.day())
}

/// Indonesian month name for the grid header
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Januari",
        2 => "Februari",
        3 => "Maret",
        4 => "April",
        5 => "Mei",
        6 => "Juni",
        7 => "Juli",
        8 => "Agustus",
        9 => "September",
        10 => "Oktober",
        11 => "November",
        12 => "Desember",
        _ => "Bulan tidak valid",
    }
}

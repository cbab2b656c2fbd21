//! Wall-clock time vocabulary shared by the parser and the query engine.
//!
//! Every time in this crate is a local wall-clock `HH:MM` string, zero-padded
//! so that lexicographic comparison equals chronological comparison. There is
//! no timezone handling anywhere — the model is a single physical classroom
//! clock, and that assumption is deliberate, not an omission.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

// ── SchoolDay ───────────────────────────────────────────────────────────────

/// A weekday on which pull-out services can recur.
///
/// Weekends are excluded from the type itself: a schedule entry can never
/// name Saturday or Sunday, and queries anchored on a weekend match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchoolDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl SchoolDay {
    /// All school days, Monday first.
    pub const ALL: [SchoolDay; 5] = [
        SchoolDay::Monday,
        SchoolDay::Tuesday,
        SchoolDay::Wednesday,
        SchoolDay::Thursday,
        SchoolDay::Friday,
    ];

    /// Map a calendar weekday onto a school day. `None` for Saturday/Sunday.
    pub fn from_weekday(weekday: Weekday) -> Option<SchoolDay> {
        match weekday {
            Weekday::Mon => Some(SchoolDay::Monday),
            Weekday::Tue => Some(SchoolDay::Tuesday),
            Weekday::Wed => Some(SchoolDay::Wednesday),
            Weekday::Thu => Some(SchoolDay::Thursday),
            Weekday::Fri => Some(SchoolDay::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    /// Full English name ("Monday").
    pub fn name(&self) -> &'static str {
        match self {
            SchoolDay::Monday => "Monday",
            SchoolDay::Tuesday => "Tuesday",
            SchoolDay::Wednesday => "Wednesday",
            SchoolDay::Thursday => "Thursday",
            SchoolDay::Friday => "Friday",
        }
    }

    /// Lowercase full name, used by the legacy descriptor scanner.
    pub(crate) fn lower_name(&self) -> &'static str {
        match self {
            SchoolDay::Monday => "monday",
            SchoolDay::Tuesday => "tuesday",
            SchoolDay::Wednesday => "wednesday",
            SchoolDay::Thursday => "thursday",
            SchoolDay::Friday => "friday",
        }
    }

    /// Lowercase 3-letter abbreviation, used by the legacy descriptor scanner.
    pub(crate) fn abbrev(&self) -> &'static str {
        match self {
            SchoolDay::Monday => "mon",
            SchoolDay::Tuesday => "tue",
            SchoolDay::Wednesday => "wed",
            SchoolDay::Thursday => "thu",
            SchoolDay::Friday => "fri",
        }
    }
}

impl fmt::Display for SchoolDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchoolDay {
    type Err = ScheduleError;

    /// Parse a day name (case-insensitive, full name or 3-letter abbreviation).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(SchoolDay::Monday),
            "tuesday" | "tue" => Ok(SchoolDay::Tuesday),
            "wednesday" | "wed" => Ok(SchoolDay::Wednesday),
            "thursday" | "thu" => Ok(SchoolDay::Thursday),
            "friday" | "fri" => Ok(SchoolDay::Friday),
            _ => Err(ScheduleError::UnknownDay(s.trim().to_string())),
        }
    }
}

// ── Meridiem ────────────────────────────────────────────────────────────────

/// AM/PM marker on a 12-hour clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Parse "AM"/"PM" (case-insensitive). `None` for anything else.
    pub fn from_label(s: &str) -> Option<Meridiem> {
        match s.trim().to_lowercase().as_str() {
            "am" => Some(Meridiem::Am),
            "pm" => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

// ── normalize_time ──────────────────────────────────────────────────────────

/// Normalize an hour/minute/meridiem triple to a zero-padded 24-hour `HH:MM`
/// string.
///
/// Rules: hour 12 with PM stays 12; hour 12 with AM becomes 00; any other
/// hour with PM gains 12; no meridiem means the hour is used as-is (already
/// 24-hour, or ambiguous — the caller's problem).
///
/// This function is total. It does not validate ranges: the callers feed it
/// components already matched by the parser's time pattern, and out-of-range
/// numerics (hour "13" with PM) still format to a syntactically valid string.
pub fn normalize_time(hour: &str, minute: &str, meridiem: Option<Meridiem>) -> String {
    let hour: u32 = hour.trim().parse().unwrap_or(0);
    let minute: u32 = minute.trim().parse().unwrap_or(0);

    let hour = match meridiem {
        Some(Meridiem::Pm) if hour != 12 => hour + 12,
        Some(Meridiem::Am) if hour == 12 => 0,
        _ => hour,
    };

    format!("{hour:02}:{minute:02}")
}

/// Parse an `HH:MM` string to its minute of day. `None` if the string is not
/// a colon-separated pair of numbers.
pub fn minute_of_day(hhmm: &str) -> Option<u32> {
    let (h, m) = hhmm.trim().split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    Some(h * 60 + m)
}

// ── Tests ───────────────────────────────────────────────────────────────────

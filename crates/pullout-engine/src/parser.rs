//! Free-text schedule descriptor parsing.
//!
//! A descriptor is one human-entered string like `"MTW 10:00 AM-11:30 AM"` or
//! `"Mon/Wed 9:00-9:45 AM"`. Parsing never fails: a descriptor the parser
//! cannot understand produces zero entries plus warnings, so a bad string in
//! the roster degrades to "this student has no recurring schedule" instead of
//! poisoning the whole index. The warnings exist so a data-entry surface can
//! show them; this crate only logs them.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clock::{normalize_time, Meridiem, SchoolDay};

/// One time-range substring anywhere in the descriptor:
/// `H(:MM)? (AM|PM)? - H(:MM)? (AM|PM)?`, meridiem optional on either side.
static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\s*-\s*(\d{1,2})(?::(\d{2}))?\s*(am|pm)?")
        .expect("failed to compile time range regex")
});

// ── ScheduleEntry ───────────────────────────────────────────────────────────

/// One weekly recurrence of a pull-out service for one student.
///
/// Invariant: `start_time <= end_time` (both zero-padded `HH:MM`, so string
/// order is chronological order). An entry with `start_time == end_time` is a
/// degenerate zero-length window and is never active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: SchoolDay,
    pub start_time: String,
    pub end_time: String,
    pub service_type: String,
    pub provider: String,
    pub location: Option<String>,
}

impl ScheduleEntry {
    /// Whether this entry is active on `day` at wall-clock time `hhmm`.
    /// Inclusive on both endpoints; degenerate windows never match.
    pub fn is_active_at(&self, day: SchoolDay, hhmm: &str) -> bool {
        self.day == day
            && self.start_time != self.end_time
            && self.start_time.as_str() <= hhmm
            && hhmm <= self.end_time.as_str()
    }
}

// ── ParsedSchedule ──────────────────────────────────────────────────────────

/// The result of parsing one descriptor: the entries it encodes plus any
/// warnings about parts the parser had to drop.
///
/// `warnings` is non-empty exactly when a non-empty descriptor yielded fewer
/// entries than it appeared to promise (no time range, no recognized day, or
/// a reversed range).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedSchedule {
    pub entries: Vec<ScheduleEntry>,
    pub warnings: Vec<String>,
}

impl ParsedSchedule {
    /// Discard the warnings and keep the lenient contract.
    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries
    }
}

// ── parse_schedule ──────────────────────────────────────────────────────────

/// Parse a raw schedule descriptor into weekly recurring entries.
///
/// Every recognized weekday yields one entry sharing the same normalized
/// `start_time`/`end_time`, `service_type`, and `provider`. Duplicate day
/// tokens yield duplicate entries — callers must tolerate duplicates rather
/// than assume uniqueness.
///
/// Day recognition uses two mutually exclusive strategies:
///
/// 1. **Compact tokens** — when the descriptor's first whitespace-delimited
///    token is made only of the characters `M`, `T`, `W`, `F`, `h`, it is
///    decoded left to right: `M`→Monday, `Th`→Thursday (greedy, before the
///    lone-`T` rule), `T`→Tuesday, `W`→Wednesday, `F`→Friday.
/// 2. **Legacy names** — otherwise, a case-insensitive scan for `MWF`,
///    `TTH`/`T/TH`, and full day names or 3-letter abbreviations anywhere in
///    the descriptor.
///
/// # Examples
///
/// ```
/// use pullout_engine::parse_schedule;
///
/// let parsed = parse_schedule("MTW 10:00 AM-11:30 AM", "Speech Therapy", "Ms. Parker");
/// assert_eq!(parsed.entries.len(), 3);
/// assert_eq!(parsed.entries[0].start_time, "10:00");
/// assert_eq!(parsed.entries[0].end_time, "11:30");
/// assert!(parsed.warnings.is_empty());
/// ```
pub fn parse_schedule(descriptor: &str, service_type: &str, provider: &str) -> ParsedSchedule {
    let descriptor = descriptor.trim();
    if descriptor.is_empty() {
        return ParsedSchedule::default();
    }

    let mut warnings = Vec::new();

    let Some(caps) = TIME_RANGE_RE.captures(descriptor) else {
        warnings.push(format!("no time range recognized in '{descriptor}'"));
        return ParsedSchedule {
            entries: Vec::new(),
            warnings,
        };
    };

    let start_time = normalize_time(
        &caps[1],
        caps.get(2).map_or("0", |m| m.as_str()),
        caps.get(3).and_then(|m| Meridiem::from_label(m.as_str())),
    );
    let end_time = normalize_time(
        &caps[4],
        caps.get(5).map_or("0", |m| m.as_str()),
        caps.get(6).and_then(|m| Meridiem::from_label(m.as_str())),
    );

    // Overnight windows are out of scope; a reversed range would break the
    // start <= end invariant every consumer relies on.
    if start_time > end_time {
        warnings.push(format!(
            "ignoring reversed time range {start_time}-{end_time} in '{descriptor}'"
        ));
        return ParsedSchedule {
            entries: Vec::new(),
            warnings,
        };
    }

    let days = match compact_day_prefix(descriptor) {
        Some(prefix) => decode_compact_days(prefix),
        None => scan_day_names(descriptor),
    };

    if days.is_empty() {
        warnings.push(format!("no weekday recognized in '{descriptor}'"));
    }

    let entries = days
        .into_iter()
        .map(|day| ScheduleEntry {
            day,
            start_time: start_time.clone(),
            end_time: end_time.clone(),
            service_type: service_type.to_string(),
            provider: provider.to_string(),
            location: None,
        })
        .collect();

    ParsedSchedule { entries, warnings }
}

// ── Day recognition ─────────────────────────────────────────────────────────

/// The compact-token prefix, if the descriptor has one: its first
/// whitespace-delimited token, composed only of compact day characters.
///
/// Uppercase `H` is deliberately excluded so that `TTH` (a legacy group
/// token) falls through to the legacy scanner instead of decoding as
/// Tuesday + Tuesday.
fn compact_day_prefix(descriptor: &str) -> Option<&str> {
    let token = descriptor.split_whitespace().next()?;
    if token.chars().all(|c| matches!(c, 'M' | 'T' | 'W' | 'F' | 'h')) {
        Some(token)
    } else {
        None
    }
}

/// Decode a compact day prefix left to right.
///
/// The two-character `Th` token must be recognized before the lone `T`, or
/// Thursday reads as Tuesday followed by a stray `h`. A character that forms
/// no token (a stray `h`) is skipped without error.
fn decode_compact_days(prefix: &str) -> Vec<SchoolDay> {
    let chars: Vec<char> = prefix.chars().collect();
    let mut days = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            'T' if chars.get(i + 1) == Some(&'h') => {
                days.push(SchoolDay::Thursday);
                i += 2;
            }
            'M' => {
                days.push(SchoolDay::Monday);
                i += 1;
            }
            'T' => {
                days.push(SchoolDay::Tuesday);
                i += 1;
            }
            'W' => {
                days.push(SchoolDay::Wednesday);
                i += 1;
            }
            'F' => {
                days.push(SchoolDay::Friday);
                i += 1;
            }
            _ => {
                i += 1;
            }
        }
    }
    days
}

/// Legacy day recognition: group tokens first, then full names and 3-letter
/// abbreviations, all case-insensitive, anywhere in the descriptor.
fn scan_day_names(descriptor: &str) -> Vec<SchoolDay> {
    let lower = descriptor.to_lowercase();
    let mut days = Vec::new();

    if lower.contains("mwf") {
        days.extend([SchoolDay::Monday, SchoolDay::Wednesday, SchoolDay::Friday]);
    }
    if lower.contains("t/th") || lower.contains("tth") {
        days.extend([SchoolDay::Tuesday, SchoolDay::Thursday]);
    }

    for day in SchoolDay::ALL {
        if lower.contains(day.lower_name()) || lower.contains(day.abbrev()) {
            days.push(day);
        }
    }

    days
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(descriptor: &str) -> Vec<ScheduleEntry> {
        parse_schedule(descriptor, "Speech Therapy", "Ms. Parker").entries
    }

    #[test]
    fn test_compact_mtw() {
        let entries = entries("MTW 10:00 AM-11:30 AM");
        assert_eq!(entries.len(), 3);
        let days: Vec<SchoolDay> = entries.iter().map(|e| e.day).collect();
        assert_eq!(
            days,
            vec![SchoolDay::Monday, SchoolDay::Tuesday, SchoolDay::Wednesday]
        );
        for entry in &entries {
            assert_eq!(entry.start_time, "10:00");
            assert_eq!(entry.end_time, "11:30");
            assert_eq!(entry.service_type, "Speech Therapy");
            assert_eq!(entry.provider, "Ms. Parker");
        }
    }

    #[test]
    fn test_compact_full_week() {
        let entries = entries("MTWThF 9:00 AM-9:30 AM");
        let days: Vec<SchoolDay> = entries.iter().map(|e| e.day).collect();
        assert_eq!(days, SchoolDay::ALL.to_vec());
        assert!(entries.iter().all(|e| e.start_time == "09:00"));
        assert!(entries.iter().all(|e| e.end_time == "09:30"));
    }

    #[test]
    fn test_compact_th_is_thursday_not_tuesday() {
        let entries = entries("Th 1:00 PM-1:45 PM");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].day, SchoolDay::Thursday);
    }

    #[test]
    fn test_compact_tth_mix() {
        // TThF: Tuesday, Thursday, Friday — the greedy Th must not steal the
        // leading T's meaning.
        let days: Vec<SchoolDay> = entries("TThF 8:00 AM-8:30 AM")
            .iter()
            .map(|e| e.day)
            .collect();
        assert_eq!(
            days,
            vec![SchoolDay::Tuesday, SchoolDay::Thursday, SchoolDay::Friday]
        );
    }

    #[test]
    fn test_compact_duplicate_tokens_duplicate_entries() {
        let entries = entries("MM 10:00 AM-10:30 AM");
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.day == SchoolDay::Monday));
    }

    #[test]
    fn test_compact_stray_h_skipped() {
        let entries = entries("MhW 10:00 AM-10:30 AM");
        let days: Vec<SchoolDay> = entries.iter().map(|e| e.day).collect();
        assert_eq!(days, vec![SchoolDay::Monday, SchoolDay::Wednesday]);
    }

    #[test]
    fn test_legacy_mwf_group() {
        let days: Vec<SchoolDay> = entries("mwf 2:00 PM-2:30 PM")
            .iter()
            .map(|e| e.day)
            .collect();
        assert_eq!(
            days,
            vec![SchoolDay::Monday, SchoolDay::Wednesday, SchoolDay::Friday]
        );
    }

    #[test]
    fn test_legacy_tth_group() {
        let days: Vec<SchoolDay> = entries("TTH 2:00 PM-2:30 PM")
            .iter()
            .map(|e| e.day)
            .collect();
        assert_eq!(days, vec![SchoolDay::Tuesday, SchoolDay::Thursday]);
    }

    #[test]
    fn test_legacy_slash_tth_group() {
        let days: Vec<SchoolDay> = entries("T/TH 2:00 PM-2:30 PM")
            .iter()
            .map(|e| e.day)
            .collect();
        assert_eq!(days, vec![SchoolDay::Tuesday, SchoolDay::Thursday]);
    }

    #[test]
    fn test_legacy_full_and_abbreviated_names() {
        let days: Vec<SchoolDay> = entries("Monday and Wed 9:00-9:45 AM")
            .iter()
            .map(|e| e.day)
            .collect();
        assert_eq!(days, vec![SchoolDay::Monday, SchoolDay::Wednesday]);
    }

    #[test]
    fn test_meridiem_only_on_second_endpoint() {
        let entries = entries("MWF 9:00-10:30 AM");
        // First endpoint has no meridiem: used as-is.
        assert_eq!(entries[0].start_time, "09:00");
        assert_eq!(entries[0].end_time, "10:30");
    }

    #[test]
    fn test_hour_only_endpoints() {
        let entries = entries("F 2 PM-3 PM");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].start_time, "14:00");
        assert_eq!(entries[0].end_time, "15:00");
    }

    #[test]
    fn test_empty_descriptor() {
        let parsed = parse_schedule("", "Speech Therapy", "Ms. Parker");
        assert!(parsed.entries.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_no_time_range_warns() {
        let parsed = parse_schedule("MTW mornings", "Speech Therapy", "Ms. Parker");
        assert!(parsed.entries.is_empty());
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("no time range"));
    }

    #[test]
    fn test_time_range_but_no_days_warns() {
        let parsed = parse_schedule("daily 10:00 AM-10:30 AM", "OT", "Mr. Lee");
        assert!(parsed.entries.is_empty());
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("no weekday"));
    }

    #[test]
    fn test_reversed_range_dropped_with_warning() {
        let parsed = parse_schedule("MTW 2:00 PM-1:00 PM", "OT", "Mr. Lee");
        assert!(parsed.entries.is_empty());
        assert!(parsed.warnings[0].contains("reversed"));
    }

    #[test]
    fn test_degenerate_range_kept_but_never_active() {
        let entries = entries("M 10:00 AM-10:00 AM");
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_active_at(SchoolDay::Monday, "10:00"));
    }

    #[test]
    fn test_is_active_at_inclusive_bounds() {
        let entry = &entries("M 10:00 AM-10:30 AM")[0];
        assert!(entry.is_active_at(SchoolDay::Monday, "10:00"));
        assert!(entry.is_active_at(SchoolDay::Monday, "10:15"));
        assert!(entry.is_active_at(SchoolDay::Monday, "10:30"));
        assert!(!entry.is_active_at(SchoolDay::Monday, "09:59"));
        assert!(!entry.is_active_at(SchoolDay::Monday, "10:31"));
        assert!(!entry.is_active_at(SchoolDay::Tuesday, "10:15"));
    }

    #[test]
    fn test_lowercase_meridiem() {
        let entries = entries("W 1:15 pm-1:45 pm");
        assert_eq!(entries[0].start_time, "13:15");
        assert_eq!(entries[0].end_time, "13:45");
    }

    #[test]
    fn test_noon_boundary_range() {
        let entries = entries("M 11:30 AM-12:30 PM");
        assert_eq!(entries[0].start_time, "11:30");
        assert_eq!(entries[0].end_time, "12:30");
    }
}

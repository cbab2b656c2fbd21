//! Point-in-time queries over the schedule index.
//!
//! Every function takes an explicit `now` anchor (no system clock access), so
//! each call is a pure function of `(index, now, …)` — deterministic,
//! testable, and safe for any number of concurrent pollers. The intended
//! caller re-invokes these on a fixed cadence to track wall-clock
//! progression; the engine itself has no timers and no I/O.
//!
//! Anchors are `chrono::NaiveDateTime`: local wall-clock, no timezone. A
//! weekend anchor matches nothing, since schedule entries only exist on
//! school days.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::clock::{minute_of_day, SchoolDay};
use crate::index::{IndexedStudent, Student};
use crate::parser::ScheduleEntry;

/// Conventional lookahead window for [`upcoming_pull_outs`], in minutes.
pub const DEFAULT_LOOKAHEAD_MINUTES: i64 = 30;

// ── Query results ───────────────────────────────────────────────────────────

/// One student currently (or imminently) out of the room for a service.
///
/// Constructed fresh on every query call; one status per matching entry, so
/// a student with several simultaneously-active entries appears once per
/// entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullOutStatus<'a> {
    pub student: &'a Student,
    pub active_entry: &'a ScheduleEntry,
    /// Whole minutes until the entry ends, clamped to `>= 0`.
    pub minutes_remaining: i64,
}

/// The outcome of checking a candidate activity window against the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictReport<'a> {
    pub conflict: bool,
    /// Students with at least one overlapping entry, deduplicated by id.
    pub conflicting_students: Vec<&'a Student>,
}

// ── current_pull_outs ───────────────────────────────────────────────────────

/// Every student currently out of the room at `now`.
///
/// An entry matches when its day equals `now`'s weekday and `now`'s `HH:MM`
/// falls inside `[start_time, end_time]`, inclusive on both ends. Degenerate
/// zero-length windows never match.
pub fn current_pull_outs<'a>(
    index: &'a [IndexedStudent],
    now: NaiveDateTime,
) -> Vec<PullOutStatus<'a>> {
    let Some(today) = SchoolDay::from_weekday(now.weekday()) else {
        return Vec::new();
    };
    let current = hhmm(now);

    let mut statuses = Vec::new();
    for indexed in index {
        for entry in &indexed.schedule_entries {
            if entry.is_active_at(today, &current) {
                statuses.push(PullOutStatus {
                    student: &indexed.student,
                    active_entry: entry,
                    minutes_remaining: minutes_until_end(entry, now),
                });
            }
        }
    }
    statuses
}

// ── upcoming_pull_outs ──────────────────────────────────────────────────────

/// Every pull-out starting within the next `window_minutes` of `now`.
///
/// Selects entries on `now`'s weekday whose start is strictly after the
/// current `HH:MM` and at or before the `HH:MM` of `now + window`. Entries
/// already active belong to [`current_pull_outs`] and are excluded here. A
/// window that spills past midnight yields a wrapped horizon and therefore
/// matches nothing — services never cross midnight.
pub fn upcoming_pull_outs<'a>(
    index: &'a [IndexedStudent],
    now: NaiveDateTime,
    window_minutes: i64,
) -> Vec<PullOutStatus<'a>> {
    let Some(today) = SchoolDay::from_weekday(now.weekday()) else {
        return Vec::new();
    };
    let current = hhmm(now);
    let horizon = hhmm(now + Duration::minutes(window_minutes));

    let mut statuses = Vec::new();
    for indexed in index {
        for entry in &indexed.schedule_entries {
            if entry.day == today && entry.start_time > current && entry.start_time <= horizon {
                statuses.push(PullOutStatus {
                    student: &indexed.student,
                    active_entry: entry,
                    minutes_remaining: minutes_until_end(entry, now),
                });
            }
        }
    }
    statuses
}

// ── Per-student projections ─────────────────────────────────────────────────

/// Whether the given student is out of the room at `now`.
pub fn is_in_pull_out(index: &[IndexedStudent], student_id: &str, now: NaiveDateTime) -> bool {
    current_pull_outs(index, now)
        .iter()
        .any(|status| status.student.id == student_id)
}

/// The entry currently pulling the given student out, if any. When several
/// entries are simultaneously active, the first in entry order wins.
pub fn current_service_for<'a>(
    index: &'a [IndexedStudent],
    student_id: &str,
    now: NaiveDateTime,
) -> Option<&'a ScheduleEntry> {
    current_pull_outs(index, now)
        .into_iter()
        .find(|status| status.student.id == student_id)
        .map(|status| status.active_entry)
}

// ── detect_conflict ─────────────────────────────────────────────────────────

/// Check a candidate activity window (`"HH:MM-HH:MM"`) against every entry on
/// the given day (defaulting to `now`'s weekday).
///
/// Overlap is half-open: ranges `[s1, e1)` and `[s2, e2)` overlap iff
/// `s1 < e2 && s2 < e1`, so an entry ending exactly when the candidate starts
/// is not a conflict. Empty windows on either side cannot overlap anything.
///
/// A malformed candidate (missing separator, non-numeric components) or a
/// weekend default day degrades to "no conflict" — callers needing validation
/// must check the input first.
pub fn detect_conflict<'a>(
    index: &'a [IndexedStudent],
    candidate_range: &str,
    day: Option<SchoolDay>,
    now: NaiveDateTime,
) -> ConflictReport<'a> {
    let no_conflict = ConflictReport {
        conflict: false,
        conflicting_students: Vec::new(),
    };

    let Some(day) = day.or_else(|| SchoolDay::from_weekday(now.weekday())) else {
        return no_conflict;
    };
    let Some((cand_start, cand_end)) = parse_candidate_range(candidate_range) else {
        return no_conflict;
    };
    if cand_start >= cand_end {
        return no_conflict;
    }

    let mut seen = HashSet::new();
    let mut conflicting_students = Vec::new();
    for indexed in index {
        let overlapping = indexed.schedule_entries.iter().any(|entry| {
            entry.day == day
                && entry.start_time < entry.end_time
                && entry.start_time < cand_end
                && cand_start < entry.end_time
        });
        if overlapping && seen.insert(indexed.student.id.as_str()) {
            conflicting_students.push(&indexed.student);
        }
    }

    ConflictReport {
        conflict: !conflicting_students.is_empty(),
        conflicting_students,
    }
}

// ── filter_available ────────────────────────────────────────────────────────

/// Remove every candidate currently pulled out at `now`.
pub fn filter_available<'a>(
    index: &[IndexedStudent],
    candidates: &'a [Student],
    now: NaiveDateTime,
) -> Vec<&'a Student> {
    let pulled: HashSet<&str> = current_pull_outs(index, now)
        .iter()
        .map(|status| status.student.id.as_str())
        .collect();
    candidates
        .iter()
        .filter(|student| !pulled.contains(student.id.as_str()))
        .collect()
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// `now`'s wall-clock time as a zero-padded `HH:MM` string.
fn hhmm(now: NaiveDateTime) -> String {
    now.format("%H:%M").to_string()
}

/// Whole minutes from `now` until the entry's end on `now`'s date, floored
/// and clamped to zero.
fn minutes_until_end(entry: &ScheduleEntry, now: NaiveDateTime) -> i64 {
    let Some(end_minute) = minute_of_day(&entry.end_time) else {
        return 0;
    };
    let Some(end_time) = NaiveTime::from_hms_opt(end_minute / 60, end_minute % 60, 0) else {
        return 0;
    };
    let end = now.date().and_time(end_time);
    (end - now).num_minutes().max(0)
}

/// Split and renormalize a `"HH:MM-HH:MM"` candidate. `None` when either side
/// fails to parse as a time.
fn parse_candidate_range(range: &str) -> Option<(String, String)> {
    let (start, end) = range.split_once('-')?;
    let start = minute_of_day(start)?;
    let end = minute_of_day(end)?;
    Some((
        format!("{:02}:{:02}", start / 60, start % 60),
        format!("{:02}:{:02}", end / 60, end % 60),
    ))
}

// ── Tests ───────────────────────────────────────────────────────────────────

//! Roster projection: students enriched with their parsed schedule entries.
//!
//! The roster itself lives in an external store; this module only consumes a
//! snapshot of it. The index is a pure derivation — rebuild it whenever the
//! roster snapshot changes, never patch it incrementally. At classroom scale
//! (tens of students, a handful of entries each) full recomputation is cheap.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::{parse_schedule, ScheduleEntry};

// ── Roster input contract ───────────────────────────────────────────────────

/// The resource-service descriptor a student record carries in the roster
/// store. This is the single source string the parser consumes; the engine
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    #[serde(default)]
    pub attends_service: bool,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub raw_timeframe: String,
}

/// One student record as exposed by the roster store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resource: Option<ResourceDescriptor>,
}

/// A read-only projection of a student plus its derived schedule entries.
///
/// `schedule_entries` is empty when the student does not attend a service,
/// the descriptor is absent, or parsing produced nothing.
#[derive(Debug, Clone, Serialize)]
pub struct IndexedStudent {
    pub student: Student,
    pub schedule_entries: Vec<ScheduleEntry>,
}

// ── build_index ─────────────────────────────────────────────────────────────

/// Build the schedule index for one roster snapshot.
///
/// Pure, side-effect-free map apart from diagnostic logging: parser warnings
/// are logged per student and otherwise swallowed — a malformed descriptor
/// degrades to an empty schedule rather than an error.
pub fn build_index(roster: &[Student]) -> Vec<IndexedStudent> {
    roster
        .iter()
        .map(|student| {
            let schedule_entries = match &student.resource {
                Some(resource)
                    if resource.attends_service && !resource.raw_timeframe.trim().is_empty() =>
                {
                    let parsed = parse_schedule(
                        &resource.raw_timeframe,
                        &resource.service_type,
                        &resource.provider,
                    );
                    for warning in &parsed.warnings {
                        log::warn!("student {}: {}", student.id, warning);
                    }
                    parsed.entries
                }
                _ => Vec::new(),
            };
            IndexedStudent {
                student: student.clone(),
                schedule_entries,
            }
        })
        .collect()
}

/// Deserialize a roster snapshot from the store's JSON export.
///
/// This is the one fallible seam in the crate: malformed JSON is a caller
/// error, not a descriptor problem, so it surfaces as
/// [`ScheduleError::Roster`](crate::error::ScheduleError).
pub fn roster_from_json(json: &str) -> Result<Vec<Student>> {
    Ok(serde_json::from_str(json)?)
}

// ── Tests ───────────────────────────────────────────────────────────────────

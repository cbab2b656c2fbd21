//! # pullout-engine
//!
//! Deterministic pull-out schedule computation for classroom rosters.
//!
//! Students leave the main classroom for recurring services (speech therapy,
//! reading support, occupational therapy). Their schedules arrive as
//! free-text descriptors like `"MTW 10:00 AM-11:30 AM"`. This crate
//! normalizes those descriptors into a structured weekly recurrence model and
//! answers point-in-time questions over it: who is out of the room right now,
//! when they come back, who leaves soon, and whether a proposed classroom
//! activity collides with anyone's pull-out time.
//!
//! The engine owns no state and reads no clock: the caller supplies a roster
//! snapshot and an explicit `now` anchor, and every query is a pure function
//! of the two. The roster store and all rendering live outside this crate.
//!
//! ## Modules
//!
//! - [`clock`] — `HH:MM` normalization, meridiem handling, school-day type
//! - [`parser`] — free-text descriptor → weekly [`ScheduleEntry`] list
//! - [`index`] — roster snapshot → per-student schedule index
//! - [`query`] — current/upcoming pull-outs, conflict detection, availability
//! - [`error`] — error types

pub mod clock;
pub mod error;
pub mod index;
pub mod parser;
pub mod query;

pub use clock::{minute_of_day, normalize_time, Meridiem, SchoolDay};
pub use error::ScheduleError;
pub use index::{build_index, roster_from_json, IndexedStudent, ResourceDescriptor, Student};
pub use parser::{parse_schedule, ParsedSchedule, ScheduleEntry};
pub use query::{
    current_pull_outs, current_service_for, detect_conflict, filter_available, is_in_pull_out,
    upcoming_pull_outs, ConflictReport, PullOutStatus, DEFAULT_LOOKAHEAD_MINUTES,
};

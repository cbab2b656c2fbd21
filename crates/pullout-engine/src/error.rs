//! Error types for pull-out schedule operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid roster JSON: {0}")]
    Roster(#[from] serde_json::Error),

    #[error("Unknown day name: '{0}'")]
    UnknownDay(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

use std::path::PathBuf;

use thiserror::Error;

use crate::models::MealSlot;

/// Typed failures surfaced by the planner core. Storage errors pass through
/// unchanged; the core never retries or formats them for display.
#[derive(Debug, Error)]
pub enum Error {
    /// A required text field was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// A spin was attempted over an empty candidate list.
    #[error("no foods to choose from for {slot}")]
    NoCandidates { slot: MealSlot },

    /// Asked for a month that does not exist on the calendar.
    #[error("{year}-{month:02} is not a valid month")]
    InvalidMonth { year: i32, month: u32 },

    #[error("failed to open database at {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

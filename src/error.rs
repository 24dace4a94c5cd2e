//! Errors raised while loading and writing scenarios
//!
//! The projection itself never fails; only the file-facing code returns these.

use thiserror::Error;

use crate::events::EventId;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Duplicate event id {id}")]
    DuplicateEventId { id: EventId },
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;

//! Shared error types for the engine crate.

use thiserror::Error;

use bank::BankError;
use quiz_core::score::ScoreError;

/// Errors emitted by the session engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for a run")]
    Empty,

    #[error("run already completed")]
    Completed,

    #[error("run not completed")]
    NotCompleted,

    #[error("no run in progress")]
    NotStarted,

    #[error("no subject selected")]
    NoSubject,

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Bank(#[from] BankError),
}

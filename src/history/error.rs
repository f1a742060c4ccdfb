use thiserror::Error;

use crate::ev::EvError;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum HistoryError {
    #[error("No session has been started")]
    NoSession,

    #[error("No hand is in progress")]
    NoHandInProgress,

    #[error("Outcome for hand {found} cannot close hand {expected}")]
    OutcomeMismatch { expected: u64, found: u64 },

    #[error(transparent)]
    Ev(#[from] EvError),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

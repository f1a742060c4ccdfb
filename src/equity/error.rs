use thiserror::Error;

use crate::core::CardError;

/// Reasons an equity calculation could not be carried out.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EquityError {
    #[error("Invalid cards: {0}")]
    Cards(#[from] CardError),

    #[error("Equity needs at least one opponent hand")]
    NoOpponents,

    #[error("Sample count must be greater than 0")]
    ZeroSamples,

    #[error("Only {available} live cards left to complete a board needing {needed}")]
    NotEnoughCards { needed: usize, available: usize },
}

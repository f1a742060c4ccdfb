use thiserror::Error;

use super::card::Card;

/// Errors raised while parsing cards or validating a set of cards before
/// ranking them.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CardError {
    #[error("Card string ended before a value and suit were read")]
    TooFewChars,
    #[error("Unexpected trailing character '{0}'")]
    UnexpectedChar(char),
    #[error("Unexpected value character '{0}'")]
    UnexpectedValueChar(char),
    #[error("Unexpected suit character '{0}'")]
    UnexpectedSuitChar(char),
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("Expected 2 hole cards, got {0}")]
    WrongHoleCardCount(usize),
    #[error("A board holds at most 5 cards, got {0}")]
    TooManyBoardCards(usize),
}

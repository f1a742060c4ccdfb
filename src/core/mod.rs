//! Cards and hand ranking.
//!
//! The equity estimator only depends on the [`HandRanker`] trait, so any
//! evaluator can be swapped in. [`SevenCardRanker`] is the bundled default.

mod card;
pub use self::card::{parse_cards, standard_deck, Card, Suit, Value};

mod error;
pub use self::error::CardError;

mod rank;
pub use self::rank::{rank_cards, HandRanker, Rank, SevenCardRanker};

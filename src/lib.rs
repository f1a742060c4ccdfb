//! # poker_ledger
//!
//! Decision quality analytics for poker simulations.
//!
//! The crate watches a stream of player actions and turns it into two
//! kinds of knowledge:
//!
//! - **How a player plays.** [`stats::HandObservationTracker`] keeps
//!   opportunity gated counters (VPIP, PFR, 3-bet, c-bet, showdown rates,
//!   sizing) for every player and stores them in a
//!   [`knowledge::KnowledgeBase`] that can be merged or accumulated across
//!   sessions.
//! - **Whether a result was earned.** [`equity::EquityEstimator`] computes
//!   showdown equity against any number of known hands, and [`ev`] splits
//!   each showdown result into expected value and luck.
//!
//! Recorded sessions ([`history`]) can be replayed through a fresh tracker
//! to rebuild statistics without a rules engine.
//!
//! ```
//! use poker_ledger::core::parse_cards;
//! use poker_ledger::equity::EquityEstimatorBuilder;
//! use poker_ledger::ev::{analyze_showdown, ShowdownParticipant};
//!
//! let mut estimator = EquityEstimatorBuilder::new().seed(1).build().unwrap();
//! let board = parse_cards("2c7d9hJs3s").unwrap();
//! let records = analyze_showdown(
//!     &mut estimator,
//!     1,
//!     &board,
//!     &[
//!         ShowdownParticipant::new("hero", parse_cards("AhAd").unwrap(), 500.0, true),
//!         ShowdownParticipant::new("villain", parse_cards("KcKs").unwrap(), 500.0, false),
//!     ],
//!     1000.0,
//! );
//! assert_eq!(records[0].ev_chips(), 500.0);
//! assert_eq!(records[0].variance(), 0.0);
//! ```

/// Cards, parsing and hand ranking.
pub mod core;

/// Showdown equity estimation.
pub mod equity;

/// Expected value and luck accounting.
pub mod ev;

/// Recorded sessions and replay.
pub mod history;

/// Player profiles and the knowledge base.
pub mod knowledge;

/// Opportunity gated player statistics.
pub mod stats;

//! Opportunity gated behavioral statistics.
//!
//! [`HandObservationTracker`] consumes a chronological action stream and
//! folds it into [`PlayerStatistics`]. Every percentage is backed by the
//! raw count of times the situation came up, so statistics from different
//! sessions can be added together.

mod action;
mod outcome;
mod reliability;
mod report;
mod statistics;
mod tracker;

pub use self::action::{ActionContext, ActionKind, BettingContext, PlayerAction, Street};
pub use self::outcome::HandOutcome;
pub use self::reliability::{
    SampleReliability, MIN_DISPLAY_SAMPLE_SIZE, MIN_RELIABLE_SAMPLE_SIZE, RELIABLE_SAMPLE_SIZE,
    VERY_RELIABLE_SAMPLE_SIZE,
};
pub use self::report::StatisticsReport;
pub use self::statistics::{DerivedStats, PlayerStatistics, StatCounters, AGGRESSION_FACTOR_CAP};
pub use self::tracker::{HandObservationTracker, LIMP_THRESHOLD_BB};

//! Showdown equity for a hand against one or more known opponent hands.
//!
//! Complete boards are evaluated exactly; incomplete boards are sampled
//! with a seedable Monte Carlo. Bad input never panics, it degrades to a
//! neutral 0.5 and logs a warning.

mod builder;
mod config;
mod error;
mod estimator;

pub use self::builder::EquityEstimatorBuilder;
pub use self::config::{EquityConfig, BOARD_SIZE, DEFAULT_SAMPLE_COUNT, NEUTRAL_EQUITY};
pub use self::error::EquityError;
pub use self::estimator::{EquityEstimate, EquityEstimator, EquityMode};

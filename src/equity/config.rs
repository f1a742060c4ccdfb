use super::error::EquityError;

/// Number of Monte Carlo runouts used when no sample count is configured.
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Equity reported when the inputs could not be evaluated.
pub const NEUTRAL_EQUITY: f32 = 0.5;

/// Number of community cards on a complete holdem board.
pub const BOARD_SIZE: usize = 5;

/// Configuration for an [`EquityEstimator`](super::EquityEstimator).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquityConfig {
    /// Monte Carlo trials per estimate on an incomplete board
    pub samples: usize,
    /// Optional random seed for reproducible estimates
    pub seed: Option<u64>,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLE_COUNT,
            seed: None,
        }
    }
}

impl EquityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), EquityError> {
        if self.samples == 0 {
            return Err(EquityError::ZeroSamples);
        }
        Ok(())
    }
}

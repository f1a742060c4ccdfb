use crate::core::{HandRanker, SevenCardRanker};

use super::config::EquityConfig;
use super::error::EquityError;
use super::estimator::EquityEstimator;

/// Builder for [`EquityEstimator`].
///
/// ```
/// use poker_ledger::equity::EquityEstimatorBuilder;
///
/// let estimator = EquityEstimatorBuilder::new()
///     .samples(2000)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(estimator.config().samples, 2000);
/// ```
#[derive(Debug, Default)]
pub struct EquityEstimatorBuilder<R = SevenCardRanker> {
    samples: Option<usize>,
    seed: Option<u64>,
    ranker: R,
}

impl EquityEstimatorBuilder<SevenCardRanker> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: HandRanker> EquityEstimatorBuilder<R> {
    /// Set the number of Monte Carlo trials
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Set the random seed for reproducibility
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Swap in a different hand ranker
    pub fn ranker<R2: HandRanker>(self, ranker: R2) -> EquityEstimatorBuilder<R2> {
        EquityEstimatorBuilder {
            samples: self.samples,
            seed: self.seed,
            ranker,
        }
    }

    /// Start from an existing config; later setters still override it
    pub fn config(mut self, config: EquityConfig) -> Self {
        self.samples = Some(config.samples);
        self.seed = config.seed;
        self
    }

    pub fn build(self) -> Result<EquityEstimator<R>, EquityError> {
        let defaults = EquityConfig::default();
        let config = EquityConfig {
            samples: self.samples.unwrap_or(defaults.samples),
            seed: self.seed,
        };
        EquityEstimator::with_ranker(self.ranker, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let estimator = EquityEstimatorBuilder::new().build().unwrap();
        assert_eq!(estimator.config(), &EquityConfig::default());
    }

    #[test]
    fn test_builder_rejects_zero_samples() {
        let result = EquityEstimatorBuilder::new().samples(0).build();
        assert!(matches!(result, Err(EquityError::ZeroSamples)));
    }

    #[test]
    fn test_builder_from_config() {
        let config = EquityConfig {
            samples: 250,
            seed: Some(11),
        };
        let estimator = EquityEstimatorBuilder::new()
            .config(config.clone())
            .build()
            .unwrap();
        assert_eq!(estimator.config(), &config);
    }
}

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{instrument, trace, warn};

use crate::core::{standard_deck, Card, CardError, HandRanker, SevenCardRanker};

use super::config::{EquityConfig, BOARD_SIZE, NEUTRAL_EQUITY};
use super::error::EquityError;

/// How an equity number was produced.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquityMode {
    /// The board was complete so the result is exact.
    Deterministic,
    /// Missing board cards were sampled.
    MonteCarlo { samples: usize },
    /// The inputs could not be evaluated and the neutral value was used.
    Degraded,
}

/// Result of a single equity calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityEstimate {
    pub equity: f32,
    pub mode: EquityMode,
    /// Set when the estimate fell back to [`NEUTRAL_EQUITY`].
    pub error: Option<EquityError>,
}

impl EquityEstimate {
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    fn degraded(error: EquityError) -> Self {
        Self {
            equity: NEUTRAL_EQUITY,
            mode: EquityMode::Degraded,
            error: Some(error),
        }
    }
}

/// Estimates the share of the pot a hand is entitled to against one or
/// more known opponent hands.
///
/// With a full board the answer is exact. With fewer than five board cards
/// the remaining cards are sampled `samples` times from the live deck.
///
/// # Examples
///
/// ```
/// use poker_ledger::core::parse_cards;
/// use poker_ledger::equity::EquityEstimatorBuilder;
///
/// let mut estimator = EquityEstimatorBuilder::new().seed(7).build().unwrap();
/// let hero = parse_cards("AhAd").unwrap();
/// let villain = parse_cards("KcKs").unwrap();
/// let board = parse_cards("2c7d9hJs3s").unwrap();
///
/// let estimate = estimator.estimate(&hero, &[villain], &board);
/// assert_eq!(estimate.equity, 1.0);
/// ```
#[derive(Debug)]
pub struct EquityEstimator<R = SevenCardRanker> {
    ranker: R,
    config: EquityConfig,
    rng: StdRng,
}

impl EquityEstimator<SevenCardRanker> {
    /// Estimator with the default ranker and config, seeded from the OS.
    pub fn new() -> Self {
        Self {
            ranker: SevenCardRanker,
            config: EquityConfig::default(),
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for EquityEstimator<SevenCardRanker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: HandRanker> EquityEstimator<R> {
    pub fn with_ranker(ranker: R, config: EquityConfig) -> Result<Self, EquityError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { ranker, config, rng })
    }

    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    pub fn ranker(&self) -> &R {
        &self.ranker
    }

    /// Equity of `hero` against `opponents`.
    ///
    /// Never fails. Malformed input yields an equity of 0.5 flagged as
    /// degraded, and the cause is logged as a warning.
    #[instrument(level = "trace", skip_all, fields(opponents = opponents.len(), board = board.len()))]
    pub fn estimate<O: AsRef<[Card]>>(
        &mut self,
        hero: &[Card],
        opponents: &[O],
        board: &[Card],
    ) -> EquityEstimate {
        let Self { ranker, config, rng } = self;
        finish(run(ranker, config.samples, hero, opponents, board, rng))
    }

    /// Same as [`estimate`](Self::estimate) but draws runouts from a caller
    /// supplied random source.
    pub fn estimate_with_rng<O: AsRef<[Card]>, G: Rng + ?Sized>(
        &self,
        hero: &[Card],
        opponents: &[O],
        board: &[Card],
        rng: &mut G,
    ) -> EquityEstimate {
        finish(run(
            &self.ranker,
            self.config.samples,
            hero,
            opponents,
            board,
            rng,
        ))
    }

    /// Equity with the failure surfaced instead of replaced by the neutral
    /// value.
    pub fn try_estimate<O: AsRef<[Card]>>(
        &mut self,
        hero: &[Card],
        opponents: &[O],
        board: &[Card],
    ) -> Result<EquityEstimate, EquityError> {
        let Self { ranker, config, rng } = self;
        run(ranker, config.samples, hero, opponents, board, rng)
    }
}

fn finish(result: Result<EquityEstimate, EquityError>) -> EquityEstimate {
    match result {
        Ok(estimate) => estimate,
        Err(error) => {
            warn!(%error, "equity estimate degraded to neutral");
            EquityEstimate::degraded(error)
        }
    }
}

fn run<R, O, G>(
    ranker: &R,
    samples: usize,
    hero: &[Card],
    opponents: &[O],
    board: &[Card],
    rng: &mut G,
) -> Result<EquityEstimate, EquityError>
where
    R: HandRanker,
    O: AsRef<[Card]>,
    G: Rng + ?Sized,
{
    let dead = dead_cards(hero, opponents, board)?;
    if board.len() == BOARD_SIZE {
        let equity = showdown_share(ranker, hero, opponents, board)?;
        trace!(equity, "deterministic equity");
        return Ok(EquityEstimate {
            equity,
            mode: EquityMode::Deterministic,
            error: None,
        });
    }
    if samples == 0 {
        return Err(EquityError::ZeroSamples);
    }

    let mut live: Vec<Card> = standard_deck()
        .into_iter()
        .filter(|c| dead & (1u64 << c.index()) == 0)
        .collect();
    let missing = BOARD_SIZE - board.len();
    if live.len() < missing {
        return Err(EquityError::NotEnoughCards {
            needed: missing,
            available: live.len(),
        });
    }
    let mut runout: Vec<Card> = Vec::with_capacity(BOARD_SIZE);
    let mut total = 0.0f64;
    for _ in 0..samples {
        let (drawn, _) = live.partial_shuffle(rng, missing);
        runout.clear();
        runout.extend_from_slice(board);
        runout.extend_from_slice(drawn);
        total += f64::from(showdown_share(ranker, hero, opponents, &runout)?);
    }
    let equity = (total / samples as f64) as f32;
    trace!(equity, samples, "monte carlo equity");
    Ok(EquityEstimate {
        equity,
        mode: EquityMode::MonteCarlo { samples },
        error: None,
    })
}

/// Validate the hands and return the bit set of cards already in play.
fn dead_cards<O: AsRef<[Card]>>(
    hero: &[Card],
    opponents: &[O],
    board: &[Card],
) -> Result<u64, EquityError> {
    if opponents.is_empty() {
        return Err(EquityError::NoOpponents);
    }
    if board.len() > BOARD_SIZE {
        return Err(CardError::TooManyBoardCards(board.len()).into());
    }
    let mut dead = 0u64;
    let hands = std::iter::once(hero).chain(opponents.iter().map(|o| o.as_ref()));
    for hand in hands {
        if hand.len() != 2 {
            return Err(CardError::WrongHoleCardCount(hand.len()).into());
        }
    }
    let hole_cards = hero
        .iter()
        .chain(opponents.iter().flat_map(|o| o.as_ref().iter()));
    for card in board.iter().chain(hole_cards) {
        let bit = 1u64 << card.index();
        if dead & bit != 0 {
            return Err(CardError::DuplicateCard(*card).into());
        }
        dead |= bit;
    }
    Ok(dead)
}

/// Share of the pot hero takes on a complete board: 1 for a win, 0 for a
/// loss and 1/k when k hands tie for best.
fn showdown_share<R: HandRanker, O: AsRef<[Card]>>(
    ranker: &R,
    hero: &[Card],
    opponents: &[O],
    board: &[Card],
) -> Result<f32, EquityError> {
    let hero_rank = ranker.rank(hero, board)?;
    let mut beaten = false;
    let mut tied = 1usize;
    for opponent in opponents {
        let rank = ranker.rank(opponent.as_ref(), board)?;
        if rank > hero_rank {
            beaten = true;
        } else if rank == hero_rank {
            tied += 1;
        }
    }
    Ok(if beaten { 0.0 } else { 1.0 / tied as f32 })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::{parse_cards, Rank};
    use crate::equity::EquityEstimatorBuilder;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn seeded(seed: u64, samples: usize) -> EquityEstimator {
        EquityEstimatorBuilder::new()
            .seed(seed)
            .samples(samples)
            .build()
            .unwrap()
    }

    #[test]
    fn test_river_win_and_loss() {
        let mut estimator = seeded(1, 10);
        let board = cards("2c7d9hJs3s");
        let win = estimator.estimate(&cards("AhAd"), &[cards("KcKs")], &board);
        assert_eq!(win.equity, 1.0);
        assert_eq!(win.mode, EquityMode::Deterministic);
        assert!(!win.is_degraded());

        let loss = estimator.estimate(&cards("KcKs"), &[cards("AhAd")], &board);
        assert_eq!(loss.equity, 0.0);
    }

    #[test]
    fn test_aces_win_three_way_on_blank_river() {
        let mut estimator = seeded(1, 10);
        let estimate = estimator.estimate(
            &cards("AhAd"),
            &[cards("KcKs"), cards("QhQd")],
            &cards("2c7d9hJs3s"),
        );
        assert_eq!(estimate.equity, 1.0);
    }

    #[test]
    fn test_board_plays_three_way_chop() {
        let mut estimator = seeded(1, 10);
        let estimate = estimator.estimate(
            &cards("2h2d"),
            &[cards("3h3d"), cards("4h4d")],
            &cards("AsAhAdKsKh"),
        );
        assert_relative_eq!(estimate.equity, 1.0 / 3.0);
    }

    #[test]
    fn test_tie_only_counts_hands_sharing_best_rank() {
        let mut estimator = seeded(1, 10);
        // Hero and the first opponent split with the ace kicker, the third
        // hand plays the board and loses.
        let estimate = estimator.estimate(
            &cards("Ac2c"),
            &[cards("Ad3d"), cards("4h5h")],
            &cards("KsKhQdJs9c"),
        );
        assert_relative_eq!(estimate.equity, 0.5);
    }

    #[test]
    fn test_aces_against_kings_preflop() {
        let mut estimator = seeded(42, 5000);
        let estimate = estimator.estimate(&cards("AhAd"), &[cards("KcKs")], &[]);
        assert_eq!(estimate.mode, EquityMode::MonteCarlo { samples: 5000 });
        assert!(
            (0.78..=0.86).contains(&estimate.equity),
            "AA vs KK equity {}",
            estimate.equity
        );
    }

    #[test]
    fn test_monte_carlo_converges_to_exact_flop_equity() {
        let hero = cards("AhKh");
        let villain = cards("QcQd");
        let flop = cards("Qh7h2s");
        let mut exact = seeded(0, 1);
        let live: Vec<Card> = standard_deck()
            .into_iter()
            .filter(|c| !hero.contains(c) && !villain.contains(c) && !flop.contains(c))
            .collect();

        let mut total = 0.0f64;
        let mut runouts = 0usize;
        for i in 0..live.len() {
            for j in (i + 1)..live.len() {
                let mut board = flop.clone();
                board.push(live[i]);
                board.push(live[j]);
                total += f64::from(exact.estimate(&hero, &[villain.clone()], &board).equity);
                runouts += 1;
            }
        }
        assert_eq!(runouts, 990);
        let exact_equity = (total / runouts as f64) as f32;

        let mut sampled = seeded(9, 20_000);
        let estimate = sampled.estimate(&hero, &[villain], &flop);
        assert!(
            (estimate.equity - exact_equity).abs() < 0.02,
            "sampled {} exact {}",
            estimate.equity,
            exact_equity
        );
    }

    #[test]
    fn test_seeded_estimates_are_reproducible() {
        let hero = cards("8s8d");
        let opponents = [cards("AcKc"), cards("JhTh")];
        let board = cards("2c9h");
        let a = seeded(1234, 500).estimate(&hero, &opponents, &board);
        let b = seeded(1234, 500).estimate(&hero, &opponents, &board);
        assert_eq!(a, b);
    }

    #[test]
    fn test_estimate_with_rng_uses_callers_source() {
        let estimator = seeded(0, 300);
        let hero = cards("AsKs");
        let opponents = [cards("2h2d")];
        let a = estimator.estimate_with_rng(&hero, &opponents, &[], &mut StdRng::seed_from_u64(5));
        let b = estimator.estimate_with_rng(&hero, &opponents, &[], &mut StdRng::seed_from_u64(5));
        assert_eq!(a.equity, b.equity);
        assert!(a.equity > 0.0 && a.equity < 1.0);
    }

    #[test_log::test]
    fn test_duplicate_card_degrades() {
        let mut estimator = seeded(1, 10);
        let estimate = estimator.estimate(&cards("AhAd"), &[cards("AhKs")], &[]);
        assert_eq!(estimate.equity, NEUTRAL_EQUITY);
        assert_eq!(estimate.mode, EquityMode::Degraded);
        assert!(matches!(
            estimate.error,
            Some(EquityError::Cards(CardError::DuplicateCard(_)))
        ));
    }

    #[test]
    fn test_card_shared_with_board_degrades() {
        let mut estimator = seeded(1, 10);
        let estimate = estimator.estimate(&cards("AhAd"), &[cards("KcKs")], &cards("Ah2c3c"));
        assert!(estimate.is_degraded());
    }

    #[test]
    fn test_repeated_board_card_degrades() {
        let mut estimator = seeded(1, 10);
        let board = vec![
            Card::try_from("2c").unwrap(),
            Card::try_from("2c").unwrap(),
            Card::try_from("3d").unwrap(),
        ];
        let estimate = estimator.estimate(&cards("AhAd"), &[cards("KcKs")], &board);
        assert!(estimate.is_degraded());
    }

    #[test_log::test]
    fn test_malformed_hands_degrade() {
        let mut estimator = seeded(1, 10);
        let none: [Vec<Card>; 0] = [];
        assert_eq!(
            estimator.estimate(&cards("AhAd"), &none, &[]).error,
            Some(EquityError::NoOpponents)
        );
        assert_eq!(
            estimator.estimate(&cards("Ah"), &[cards("KcKs")], &[]).error,
            Some(EquityError::Cards(CardError::WrongHoleCardCount(1)))
        );
        assert_eq!(
            estimator
                .estimate(&cards("AhAd"), &[cards("KcKs")], &cards("2c3c4c5c6c7c"))
                .error,
            Some(EquityError::Cards(CardError::TooManyBoardCards(6)))
        );
    }

    #[test]
    fn test_exhausted_deck_degrades() {
        // 24 dealt hands leave only four live cards for a five card board.
        let deck = standard_deck();
        let hero = deck[..2].to_vec();
        let opponents: Vec<Vec<Card>> = deck[2..48].chunks(2).map(|c| c.to_vec()).collect();
        let mut estimator = seeded(1, 50);
        let estimate = estimator.estimate(&hero, &opponents, &[]);
        assert_eq!(estimate.equity, NEUTRAL_EQUITY);
        assert_eq!(estimate.mode, EquityMode::Degraded);
        assert_eq!(
            estimate.error,
            Some(EquityError::NotEnoughCards {
                needed: 5,
                available: 4
            })
        );
    }

    #[test]
    fn test_try_estimate_surfaces_error() {
        let mut estimator = seeded(1, 10);
        let result = estimator.try_estimate(&cards("AhAd"), &[cards("AhKs")], &[]);
        assert!(matches!(result, Err(EquityError::Cards(_))));
    }

    #[test]
    fn test_custom_ranker_errors_degrade() {
        struct Broken;
        impl HandRanker for Broken {
            fn rank(&self, _: &[Card], _: &[Card]) -> Result<Rank, CardError> {
                Err(CardError::TooFewChars)
            }
        }
        let mut estimator = EquityEstimatorBuilder::new()
            .ranker(Broken)
            .seed(3)
            .build()
            .unwrap();
        let estimate = estimator.estimate(&cards("AhAd"), &[cards("KcKs")], &cards("2c7d9hJs3s"));
        assert!(estimate.is_degraded());
        assert_eq!(estimate.equity, 0.5);
    }
}

use tracing::debug;

use crate::core::{Card, HandRanker};
use crate::equity::EquityEstimator;

use super::record::EvRecord;

/// A player whose hand was revealed at showdown.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShowdownParticipant {
    pub player_id: String,
    pub hole_cards: Vec<Card>,
    pub amount_invested: f32,
    pub won: bool,
}

impl ShowdownParticipant {
    pub fn new(
        player_id: impl Into<String>,
        hole_cards: Vec<Card>,
        amount_invested: f32,
        won: bool,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            hole_cards,
            amount_invested,
            won,
        }
    }
}

/// Build one [`EvRecord`] per participant, each player's equity measured
/// against every other revealed hand on `board`.
///
/// `board` is the public cards when the money went in, so an all in on the
/// flop is judged on flop equity. Fewer than two participants is not a
/// showdown and yields no records. Equity that cannot be computed falls
/// back to the estimator's neutral value.
pub fn analyze_showdown<R: HandRanker>(
    estimator: &mut EquityEstimator<R>,
    hand_number: u64,
    board: &[Card],
    participants: &[ShowdownParticipant],
    pot_size: f32,
) -> Vec<EvRecord> {
    if participants.len() < 2 {
        return Vec::new();
    }
    let mut records = Vec::with_capacity(participants.len());
    for (i, hero) in participants.iter().enumerate() {
        let opponents: Vec<&[Card]> = participants
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, p)| p.hole_cards.as_slice())
            .collect();
        let estimate = estimator.estimate(&hero.hole_cards, &opponents, board);
        records.push(EvRecord::new(
            hand_number,
            hero.player_id.clone(),
            estimate.equity,
            pot_size,
            hero.amount_invested,
            hero.won,
        ));
    }
    debug!(hand_number, participants = participants.len(), "analyzed showdown");
    records
}

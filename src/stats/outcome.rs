use std::collections::BTreeMap;

use crate::core::Card;

/// How a hand ended, as far as the statistics care.
///
/// Seats index into the player list handed to
/// [`HandObservationTracker::end_hand`](super::HandObservationTracker::end_hand).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandOutcome {
    pub hand_number: u64,
    /// Hole cards revealed at showdown keyed by seat
    pub shown_hands: BTreeMap<usize, Vec<Card>>,
    pub winners: Vec<usize>,
    pub pot_size: f32,
}

impl HandOutcome {
    /// Outcome of a hand that ended without a showdown.
    pub fn new(hand_number: u64) -> Self {
        Self {
            hand_number,
            ..Default::default()
        }
    }

    pub fn with_pot(mut self, pot_size: f32) -> Self {
        self.pot_size = pot_size;
        self
    }

    pub fn with_shown(mut self, seat: usize, cards: Vec<Card>) -> Self {
        self.shown_hands.insert(seat, cards);
        self
    }

    pub fn with_winner(mut self, seat: usize) -> Self {
        if !self.winners.contains(&seat) {
            self.winners.push(seat);
        }
        self
    }

    pub fn is_showdown(&self) -> bool {
        !self.shown_hands.is_empty()
    }

    pub fn went_to_showdown(&self, seat: usize) -> bool {
        self.shown_hands.contains_key(&seat)
    }

    pub fn won_at_showdown(&self, seat: usize) -> bool {
        self.went_to_showdown(seat) && self.winners.contains(&seat)
    }
}

use std::collections::BTreeMap;

use crate::ev::EvRecord;
use crate::stats::HandOutcome;

use super::action::RecordedAction;

/// Everything recorded about one hand.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandRecord {
    pub hand_number: u64,
    pub small_blind: f32,
    pub big_blind: f32,
    pub starting_stacks: BTreeMap<String, f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub finishing_stacks: BTreeMap<String, f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: Vec<RecordedAction>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub outcome: Option<HandOutcome>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ev_records: Vec<EvRecord>,
}

/// Condensed view of a finished hand.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct HandSummary {
    pub hand_number: u64,
    /// Players that finished with more chips than they started with
    pub winners: Vec<String>,
    /// Stack change for every player with a finishing stack
    pub chips_won: BTreeMap<String, f32>,
    pub went_to_showdown: bool,
    /// Luck adjusted result per player, present only after a showdown
    pub ev_adjusted_chips: Option<BTreeMap<String, f32>>,
}

impl HandRecord {
    pub fn new(
        hand_number: u64,
        small_blind: f32,
        big_blind: f32,
        starting_stacks: BTreeMap<String, f32>,
    ) -> Self {
        Self {
            hand_number,
            small_blind,
            big_blind,
            starting_stacks,
            ..Default::default()
        }
    }

    pub fn went_to_showdown(&self) -> bool {
        !self.ev_records.is_empty()
    }

    pub fn summary(&self) -> HandSummary {
        let chips_won: BTreeMap<String, f32> = self
            .finishing_stacks
            .iter()
            .map(|(id, finish)| {
                let start = self.starting_stacks.get(id).copied().unwrap_or(0.0);
                (id.clone(), finish - start)
            })
            .collect();
        let winners = chips_won
            .iter()
            .filter(|(_, won)| **won > 0.0)
            .map(|(id, _)| id.clone())
            .collect();
        let ev_adjusted_chips = self.went_to_showdown().then(|| {
            let mut adjusted = BTreeMap::new();
            for record in &self.ev_records {
                *adjusted.entry(record.player_id().to_owned()).or_insert(0.0) +=
                    record.ev_adjusted();
            }
            adjusted
        });

        HandSummary {
            hand_number: self.hand_number,
            winners,
            chips_won,
            went_to_showdown: self.went_to_showdown(),
            ev_adjusted_chips,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn stacks(entries: &[(&str, f32)]) -> BTreeMap<String, f32> {
        entries.iter().map(|(id, s)| (id.to_string(), *s)).collect()
    }

    #[test]
    fn test_summary_without_showdown() {
        let mut hand = HandRecord::new(
            1,
            10.0,
            20.0,
            stacks(&[("player_a", 1490.0), ("player_b", 1480.0), ("player_c", 1500.0)]),
        );
        hand.finishing_stacks =
            stacks(&[("player_a", 1490.0), ("player_b", 1510.0), ("player_c", 1500.0)]);

        let summary = hand.summary();
        assert_eq!(summary.hand_number, 1);
        assert_eq!(summary.winners, vec!["player_b"]);
        assert_eq!(summary.chips_won["player_b"], 30.0);
        assert_eq!(summary.chips_won["player_a"], 0.0);
        assert!(!summary.went_to_showdown);
        assert!(summary.ev_adjusted_chips.is_none());
    }

    #[test]
    fn test_summary_with_showdown_ev() {
        let mut hand = HandRecord::new(
            1,
            10.0,
            20.0,
            stacks(&[("player_a", 1000.0), ("player_b", 1000.0)]),
        );
        hand.finishing_stacks = stacks(&[("player_a", 1500.0), ("player_b", 500.0)]);
        hand.ev_records = vec![
            EvRecord::new(1, "player_a", 0.85, 1000.0, 500.0, true),
            EvRecord::new(1, "player_b", 0.15, 1000.0, 500.0, false),
        ];

        let summary = hand.summary();
        assert!(summary.went_to_showdown);
        let adjusted = summary.ev_adjusted_chips.unwrap();
        assert_relative_eq!(adjusted["player_a"], 350.0, epsilon = 1e-3);
        assert_relative_eq!(adjusted["player_b"], -350.0, epsilon = 1e-3);
    }

    #[test]
    fn test_multiway_ev_sums_to_zero() {
        let mut hand = HandRecord::new(
            1,
            10.0,
            20.0,
            stacks(&[("a", 1000.0), ("b", 1000.0), ("c", 1000.0)]),
        );
        hand.ev_records = vec![
            EvRecord::new(1, "a", 0.60, 1500.0, 500.0, true),
            EvRecord::new(1, "b", 0.25, 1500.0, 500.0, false),
            EvRecord::new(1, "c", 0.15, 1500.0, 500.0, false),
        ];
        let adjusted = hand.summary().ev_adjusted_chips.unwrap();
        assert_eq!(adjusted.len(), 3);
        let total: f32 = adjusted.values().sum();
        assert!(total.abs() < 1.0, "EV should sum to about zero, got {total}");
    }
}

use std::collections::BTreeMap;

use tracing::debug;

use super::error::EvError;
use super::record::EvRecord;

/// Running EV totals for one player.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvSummary {
    pub showdowns: usize,
    pub ev_chips: f32,
    pub actual_chips: f32,
    pub variance: f32,
}

impl EvSummary {
    pub fn add(&mut self, record: &EvRecord) {
        self.showdowns += 1;
        self.ev_chips += record.ev_chips();
        self.actual_chips += record.actual_chips();
        self.variance += record.variance();
    }

    pub fn merge(&mut self, other: &EvSummary) {
        self.showdowns += other.showdowns;
        self.ev_chips += other.ev_chips;
        self.actual_chips += other.actual_chips;
        self.variance += other.variance;
    }

    /// Total result with the luck taken out.
    pub fn ev_adjusted(&self) -> f32 {
        self.ev_chips
    }

    /// The summed variance should equal summed actual minus summed EV. The
    /// sums are kept independently so drift shows up here.
    pub fn variance_consistent(&self, tolerance: f32) -> bool {
        (self.variance - (self.actual_chips - self.ev_chips)).abs() <= tolerance
    }
}

/// Per-player EV accounting across many hands.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvLedger {
    summaries: BTreeMap<String, EvSummary>,
    records: Vec<EvRecord>,
}

impl EvLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the showdown records of `hand_number`.
    ///
    /// Every record must belong to that hand. On a mismatch nothing is
    /// applied and the first offending hand number is reported.
    pub fn record_hand(&mut self, hand_number: u64, records: Vec<EvRecord>) -> Result<(), EvError> {
        if let Some(bad) = records.iter().find(|r| r.hand_number() != hand_number) {
            return Err(EvError::HandMismatch {
                expected: hand_number,
                found: bad.hand_number(),
            });
        }
        for record in &records {
            self.summaries
                .entry(record.player_id().to_owned())
                .or_default()
                .add(record);
        }
        debug!(hand_number, records = records.len(), "recorded showdown EV");
        self.records.extend(records);
        Ok(())
    }

    pub fn summary(&self, player_id: &str) -> Option<&EvSummary> {
        self.summaries.get(player_id)
    }

    pub fn summaries(&self) -> impl Iterator<Item = (&str, &EvSummary)> {
        self.summaries.iter().map(|(id, s)| (id.as_str(), s))
    }

    pub fn records(&self) -> &[EvRecord] {
        &self.records
    }

    /// Totals over every player.
    pub fn total(&self) -> EvSummary {
        let mut total = EvSummary::default();
        for summary in self.summaries.values() {
            total.merge(summary);
        }
        total
    }
}

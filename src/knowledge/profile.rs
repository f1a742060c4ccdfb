use crate::stats::{PlayerStatistics, SampleReliability, StatisticsReport};

pub const LOOSE_VPIP: f32 = 30.0;
pub const PASSIVE_PFR: f32 = 12.0;
pub const FOLDS_TO_THREE_BET: f32 = 70.0;
pub const FREQUENT_FLOP_CBET: f32 = 70.0;
pub const PASSIVE_AGGRESSION: f32 = 1.0;
pub const CALLS_DOWN_WTSD: f32 = 30.0;

/// Everything known about one player: statistics plus free form notes on
/// their tendencies.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerProfile {
    pub player_id: String,
    pub name: String,
    pub statistics: PlayerStatistics,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tendencies: Vec<String>,
}

impl PlayerProfile {
    /// New empty profile. An empty `name` falls back to the id.
    pub fn new(player_id: &str, name: &str) -> Self {
        let name = if name.is_empty() { player_id } else { name };
        Self {
            player_id: player_id.to_owned(),
            name: name.to_owned(),
            statistics: PlayerStatistics::default(),
            tendencies: Vec::new(),
        }
    }

    pub fn with_statistics(mut self, statistics: PlayerStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn sample_size(&self) -> usize {
        self.statistics.hands_played()
    }

    pub fn reliability(&self) -> SampleReliability {
        self.statistics.reliability()
    }

    pub fn report(&self) -> StatisticsReport<'_> {
        StatisticsReport::new(&self.statistics)
    }

    /// Add a note unless an identical one is already present.
    pub fn add_tendency(&mut self, tendency: impl Into<String>) -> bool {
        let tendency = tendency.into();
        if self.tendencies.contains(&tendency) {
            false
        } else {
            self.tendencies.push(tendency);
            true
        }
    }

    /// Derive notes from the statistics. Nothing is inferred until the
    /// sample is large enough to exploit. Returns how many notes were new.
    pub fn infer_tendencies(&mut self) -> usize {
        if !self.statistics.is_reliable() {
            return 0;
        }
        let s = &self.statistics;
        let notes = [
            (s.vpip() > LOOSE_VPIP, "Plays too many hands (loose)"),
            (s.pfr() < PASSIVE_PFR, "Passive preflop"),
            (s.fold_to_three_bet() > FOLDS_TO_THREE_BET, "Folds to 3-bets too often"),
            (s.cbet_flop_pct() > FREQUENT_FLOP_CBET, "C-bets flop frequently"),
            (s.aggression_factor() < PASSIVE_AGGRESSION, "Very passive postflop"),
            (s.wtsd() > CALLS_DOWN_WTSD, "Calls down too much"),
        ];
        notes
            .into_iter()
            .filter(|(applies, _)| *applies)
            .filter(|(_, note)| self.add_tendency(*note))
            .count()
    }
}

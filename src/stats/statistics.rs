use super::reliability::SampleReliability;

/// Aggression factor reported when a player bets or raises but never calls.
pub const AGGRESSION_FACTOR_CAP: f32 = 10.0;

/// Raw tallies for one player.
///
/// Percentages are only meaningful relative to their opportunity counter,
/// so both halves of every pair are kept. That is what lets two sets of
/// counters be summed and the percentages recomputed from the totals.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatCounters {
    pub hands_played: usize,

    pub vpip_hands: usize,
    pub pfr_hands: usize,
    pub limp_hands: usize,
    pub three_bet_opportunities: usize,
    pub three_bet_count: usize,
    pub fold_to_three_bet_opportunities: usize,
    pub fold_to_three_bet_count: usize,

    pub cbet_flop_opportunities: usize,
    pub cbet_flop_count: usize,
    pub cbet_turn_opportunities: usize,
    pub cbet_turn_count: usize,
    pub cbet_river_opportunities: usize,
    pub cbet_river_count: usize,

    // Every aggressive action and every call, not once per hand
    pub bets_and_raises: usize,
    pub calls: usize,
    pub river_bets_and_raises: usize,
    pub river_calls: usize,

    pub saw_flop_count: usize,
    pub wtsd_count: usize,
    pub wsd_count: usize,

    // Sums of sizing as a percent of the pot before the action
    pub bet_sizing_total: f32,
    pub bet_sizing_count: usize,
    pub raise_sizing_total: f32,
    pub raise_sizing_count: usize,

    pub showdown_count: usize,
    pub ev_adjusted_total: f32,
}

impl StatCounters {
    /// Add every counter of `other` into `self`.
    pub fn accumulate(&mut self, other: &StatCounters) {
        self.hands_played += other.hands_played;

        self.vpip_hands += other.vpip_hands;
        self.pfr_hands += other.pfr_hands;
        self.limp_hands += other.limp_hands;
        self.three_bet_opportunities += other.three_bet_opportunities;
        self.three_bet_count += other.three_bet_count;
        self.fold_to_three_bet_opportunities += other.fold_to_three_bet_opportunities;
        self.fold_to_three_bet_count += other.fold_to_three_bet_count;

        self.cbet_flop_opportunities += other.cbet_flop_opportunities;
        self.cbet_flop_count += other.cbet_flop_count;
        self.cbet_turn_opportunities += other.cbet_turn_opportunities;
        self.cbet_turn_count += other.cbet_turn_count;
        self.cbet_river_opportunities += other.cbet_river_opportunities;
        self.cbet_river_count += other.cbet_river_count;

        self.bets_and_raises += other.bets_and_raises;
        self.calls += other.calls;
        self.river_bets_and_raises += other.river_bets_and_raises;
        self.river_calls += other.river_calls;

        self.saw_flop_count += other.saw_flop_count;
        self.wtsd_count += other.wtsd_count;
        self.wsd_count += other.wsd_count;

        self.bet_sizing_total += other.bet_sizing_total;
        self.bet_sizing_count += other.bet_sizing_count;
        self.raise_sizing_total += other.raise_sizing_total;
        self.raise_sizing_count += other.raise_sizing_count;

        self.showdown_count += other.showdown_count;
        self.ev_adjusted_total += other.ev_adjusted_total;
    }
}

/// Percentages derived from [`StatCounters`]. Only
/// [`PlayerStatistics::recalculate`] writes these.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedStats {
    vpip: f32,
    pfr: f32,
    limp_frequency: f32,
    three_bet_pct: f32,
    fold_to_three_bet: f32,
    cbet_flop_pct: f32,
    cbet_turn_pct: f32,
    cbet_river_pct: f32,
    aggression_factor: f32,
    river_aggression: f32,
    wtsd: f32,
    wsd: f32,
    avg_bet_sizing: f32,
    avg_raise_sizing: f32,
}

fn percent(count: usize, opportunities: usize) -> Option<f32> {
    if opportunities == 0 {
        None
    } else {
        Some(count as f32 / opportunities as f32 * 100.0)
    }
}

fn aggression(aggressive: usize, calls: usize) -> Option<f32> {
    if calls > 0 {
        Some(aggressive as f32 / calls as f32)
    } else if aggressive > 0 {
        Some(AGGRESSION_FACTOR_CAP)
    } else {
        None
    }
}

fn average(total: f32, count: usize) -> Option<f32> {
    if count == 0 {
        None
    } else {
        Some(total / count as f32)
    }
}

/// Overwrite `slot` only when the value could be computed.
fn update(slot: &mut f32, value: Option<f32>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// Behavioral statistics for one player: raw counters plus the
/// percentages computed from them.
///
/// Serializes flat, counters and percentages side by side in one object.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStatistics {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub counters: StatCounters,
    #[cfg_attr(feature = "serde", serde(flatten))]
    derived: DerivedStats,
}

impl PlayerStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics built from existing counters with percentages computed.
    pub fn from_counters(counters: StatCounters) -> Self {
        let mut stats = Self {
            counters,
            derived: DerivedStats::default(),
        };
        stats.recalculate();
        stats
    }

    /// Recompute every percentage whose denominator is positive. A
    /// percentage with a zero denominator keeps its previous value.
    pub fn recalculate(&mut self) {
        let c = &self.counters;
        let d = &mut self.derived;

        update(&mut d.vpip, percent(c.vpip_hands, c.hands_played));
        update(&mut d.pfr, percent(c.pfr_hands, c.hands_played));
        update(&mut d.limp_frequency, percent(c.limp_hands, c.hands_played));
        update(
            &mut d.three_bet_pct,
            percent(c.three_bet_count, c.three_bet_opportunities),
        );
        update(
            &mut d.fold_to_three_bet,
            percent(c.fold_to_three_bet_count, c.fold_to_three_bet_opportunities),
        );
        update(
            &mut d.cbet_flop_pct,
            percent(c.cbet_flop_count, c.cbet_flop_opportunities),
        );
        update(
            &mut d.cbet_turn_pct,
            percent(c.cbet_turn_count, c.cbet_turn_opportunities),
        );
        update(
            &mut d.cbet_river_pct,
            percent(c.cbet_river_count, c.cbet_river_opportunities),
        );
        update(
            &mut d.aggression_factor,
            aggression(c.bets_and_raises, c.calls),
        );
        update(
            &mut d.river_aggression,
            aggression(c.river_bets_and_raises, c.river_calls),
        );
        update(&mut d.wtsd, percent(c.wtsd_count, c.saw_flop_count));
        update(&mut d.wsd, percent(c.wsd_count, c.wtsd_count));
        update(
            &mut d.avg_bet_sizing,
            average(c.bet_sizing_total, c.bet_sizing_count),
        );
        update(
            &mut d.avg_raise_sizing,
            average(c.raise_sizing_total, c.raise_sizing_count),
        );
    }

    /// Add another player's raw counters into these and recompute.
    pub fn accumulate(&mut self, other: &PlayerStatistics) {
        self.counters.accumulate(&other.counters);
        self.recalculate();
    }

    pub fn hands_played(&self) -> usize {
        self.counters.hands_played
    }

    pub fn reliability(&self) -> SampleReliability {
        SampleReliability::from_hands(self.counters.hands_played)
    }

    /// True once the sample is large enough to exploit.
    pub fn is_reliable(&self) -> bool {
        self.reliability().is_exploitable()
    }

    /// Voluntarily put chips in the pot preflop, percent of hands.
    pub fn vpip(&self) -> f32 {
        self.derived.vpip
    }

    /// Preflop raise, percent of hands.
    pub fn pfr(&self) -> f32 {
        self.derived.pfr
    }

    pub fn limp_frequency(&self) -> f32 {
        self.derived.limp_frequency
    }

    pub fn three_bet_pct(&self) -> f32 {
        self.derived.three_bet_pct
    }

    pub fn fold_to_three_bet(&self) -> f32 {
        self.derived.fold_to_three_bet
    }

    pub fn cbet_flop_pct(&self) -> f32 {
        self.derived.cbet_flop_pct
    }

    pub fn cbet_turn_pct(&self) -> f32 {
        self.derived.cbet_turn_pct
    }

    pub fn cbet_river_pct(&self) -> f32 {
        self.derived.cbet_river_pct
    }

    /// (bets + raises) / calls, capped at [`AGGRESSION_FACTOR_CAP`] when
    /// there are no calls.
    pub fn aggression_factor(&self) -> f32 {
        self.derived.aggression_factor
    }

    pub fn river_aggression(&self) -> f32 {
        self.derived.river_aggression
    }

    /// Went to showdown, percent of flops seen.
    pub fn wtsd(&self) -> f32 {
        self.derived.wtsd
    }

    /// Won at showdown, percent of showdowns reached.
    pub fn wsd(&self) -> f32 {
        self.derived.wsd
    }

    /// Mean bet size as a percent of the pot.
    pub fn avg_bet_sizing(&self) -> f32 {
        self.derived.avg_bet_sizing
    }

    pub fn avg_raise_sizing(&self) -> f32 {
        self.derived.avg_raise_sizing
    }
}

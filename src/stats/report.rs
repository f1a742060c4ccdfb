use std::fmt;

use super::reliability::{SampleReliability, MIN_DISPLAY_SAMPLE_SIZE};
use super::statistics::PlayerStatistics;

/// Human readable summary of a player's statistics.
///
/// Percentages are withheld until [`MIN_DISPLAY_SAMPLE_SIZE`] hands have
/// been seen, so tiny samples cannot be mistaken for reads.
pub struct StatisticsReport<'a> {
    stats: &'a PlayerStatistics,
}

impl<'a> StatisticsReport<'a> {
    pub fn new(stats: &'a PlayerStatistics) -> Self {
        Self { stats }
    }
}

impl fmt::Display for StatisticsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let hands = s.hands_played();
        if hands < MIN_DISPLAY_SAMPLE_SIZE {
            writeln!(f, "Hands: {hands}")?;
            writeln!(f, "Insufficient data, statistics are not meaningful yet.")?;
            return write!(f, "{}", SampleReliability::Insufficient);
        }
        writeln!(f, "Hands: {} ({})", hands, s.reliability())?;
        writeln!(f, "VPIP/PFR: {:.1}% / {:.1}%", s.vpip(), s.pfr())?;
        writeln!(f, "Limp: {:.1}%", s.limp_frequency())?;
        writeln!(f, "3-Bet: {:.1}%", s.three_bet_pct())?;
        writeln!(f, "Fold to 3-Bet: {:.1}%", s.fold_to_three_bet())?;
        writeln!(
            f,
            "C-Bet: Flop {:.1}% / Turn {:.1}% / River {:.1}%",
            s.cbet_flop_pct(),
            s.cbet_turn_pct(),
            s.cbet_river_pct()
        )?;
        writeln!(
            f,
            "Aggression Factor: {:.2} (River: {:.2})",
            s.aggression_factor(),
            s.river_aggression()
        )?;
        writeln!(
            f,
            "Avg Sizing: Bet {:.0}% pot / Raise {:.0}% pot",
            s.avg_bet_sizing(),
            s.avg_raise_sizing()
        )?;
        writeln!(f, "WTSD: {:.1}%", s.wtsd())?;
        write!(f, "WSD: {:.1}%", s.wsd())?;
        if s.counters.showdown_count > 0 {
            write!(
                f,
                "\nEV adjusted: {:+.0} over {} showdowns",
                s.counters.ev_adjusted_total, s.counters.showdown_count
            )?;
        }
        Ok(())
    }
}

use std::collections::BTreeMap;

use tracing::debug;

use super::profile::PlayerProfile;
#[cfg(feature = "serde")]
use crate::stats::PlayerStatistics;

/// Profiles of every known player keyed by player id.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    profiles: BTreeMap<String, PlayerProfile>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self, player_id: &str) -> Option<&PlayerProfile> {
        self.profiles.get(player_id)
    }

    pub fn profile_mut(&mut self, player_id: &str) -> Option<&mut PlayerProfile> {
        self.profiles.get_mut(player_id)
    }

    pub fn get_or_create_profile(&mut self, player_id: &str, name: &str) -> &mut PlayerProfile {
        self.profiles
            .entry(player_id.to_owned())
            .or_insert_with(|| PlayerProfile::new(player_id, name))
    }

    /// Insert or replace the profile stored under its player id.
    pub fn update_profile(&mut self, profile: PlayerProfile) {
        self.profiles.insert(profile.player_id.clone(), profile);
    }

    pub fn has_profile(&self, player_id: &str) -> bool {
        self.profiles.contains_key(player_id)
    }

    pub fn total_hands_observed(&self) -> usize {
        self.profiles.values().map(|p| p.sample_size()).sum()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &PlayerProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Take profiles from `other`. Where both sides know a player the
    /// profile with strictly more hands wins, wholesale.
    pub fn merge_with(&mut self, other: KnowledgeBase) {
        let mut replaced = 0;
        for (player_id, incoming) in other.profiles {
            match self.profiles.get(&player_id) {
                Some(existing) if incoming.sample_size() <= existing.sample_size() => {}
                _ => {
                    replaced += 1;
                    self.profiles.insert(player_id, incoming);
                }
            }
        }
        debug!(replaced, total = self.profiles.len(), "merged knowledge base");
    }

    /// Add `other` on top of this knowledge base. Counters of shared players
    /// are summed and their percentages recomputed, tendency notes are
    /// unioned keeping first seen order.
    pub fn accumulate_with(&mut self, other: KnowledgeBase) {
        let mut accumulated = 0;
        for (player_id, incoming) in other.profiles {
            match self.profiles.get_mut(&player_id) {
                Some(existing) => {
                    accumulated += 1;
                    existing.statistics.accumulate(&incoming.statistics);
                    for tendency in incoming.tendencies {
                        existing.add_tendency(tendency);
                    }
                }
                None => {
                    self.profiles.insert(player_id, incoming);
                }
            }
        }
        debug!(
            accumulated,
            total = self.profiles.len(),
            "accumulated knowledge base"
        );
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load a knowledge base. Percentages are rebuilt from the stored
    /// counters, whatever values the file carries.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut kb: Self = serde_json::from_str(json)?;
        for profile in kb.profiles.values_mut() {
            let counters = profile.statistics.counters.clone();
            profile.statistics = PlayerStatistics::from_counters(counters);
        }
        Ok(kb)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::stats::{PlayerStatistics, StatCounters};

    fn profile(id: &str, hands: usize, vpip_hands: usize) -> PlayerProfile {
        PlayerProfile::new(id, "").with_statistics(PlayerStatistics::from_counters(StatCounters {
            hands_played: hands,
            vpip_hands,
            calls: vpip_hands,
            ..Default::default()
        }))
    }

    fn base(profiles: Vec<PlayerProfile>) -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        for p in profiles {
            kb.update_profile(p);
        }
        kb
    }

    #[test]
    fn test_get_or_create_keeps_existing() {
        let mut kb = KnowledgeBase::new();
        kb.get_or_create_profile("a", "Alice").statistics.counters.hands_played = 3;
        let again = kb.get_or_create_profile("a", "Other");
        assert_eq!(again.name, "Alice");
        assert_eq!(again.sample_size(), 3);
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn test_totals_and_ids() {
        let kb = base(vec![profile("b", 10, 2), profile("a", 5, 1)]);
        assert_eq!(kb.total_hands_observed(), 15);
        assert_eq!(kb.player_ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(kb.has_profile("a"));
        assert!(!kb.has_profile("c"));
    }

    #[test]
    fn test_merge_keeps_larger_sample() {
        let mut kb = base(vec![profile("a", 100, 20), profile("b", 10, 5)]);
        let other = base(vec![profile("a", 50, 50), profile("b", 11, 0), profile("c", 1, 1)]);
        kb.merge_with(other);

        assert_eq!(kb.profile("a").unwrap().sample_size(), 100);
        assert_eq!(kb.profile("b").unwrap().sample_size(), 11);
        assert_eq!(kb.profile("b").unwrap().statistics.vpip(), 0.0);
        assert!(kb.has_profile("c"));
    }

    #[test]
    fn test_merge_tie_keeps_existing() {
        let mut kb = base(vec![profile("a", 10, 1)]);
        kb.merge_with(base(vec![profile("a", 10, 9)]));
        assert_relative_eq!(kb.profile("a").unwrap().statistics.vpip(), 10.0);
    }

    #[test]
    fn test_accumulate_sums_counters() {
        let mut a = profile("a", 10, 2);
        a.add_tendency("limps a lot");
        let mut kb = base(vec![a]);

        let mut incoming = profile("a", 30, 18);
        incoming.add_tendency("calls down");
        incoming.add_tendency("limps a lot");
        kb.accumulate_with(base(vec![incoming, profile("z", 4, 0)]));

        let merged = kb.profile("a").unwrap();
        assert_eq!(merged.sample_size(), 40);
        assert_relative_eq!(merged.statistics.vpip(), 50.0);
        assert_eq!(merged.tendencies, vec!["limps a lot", "calls down"]);
        assert!(kb.has_profile("z"));
    }

    #[test]
    fn test_accumulate_order_independent() {
        let x = base(vec![profile("a", 10, 2), profile("b", 7, 7)]);
        let y = base(vec![profile("a", 30, 18), profile("c", 3, 0)]);

        let mut xy = KnowledgeBase::new();
        xy.accumulate_with(x.clone());
        xy.accumulate_with(y.clone());
        let mut yx = KnowledgeBase::new();
        yx.accumulate_with(y);
        yx.accumulate_with(x);

        for id in ["a", "b", "c"] {
            assert_eq!(
                xy.profile(id).unwrap().statistics,
                yx.profile(id).unwrap().statistics
            );
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let mut p = profile("a", 60, 30);
        p.infer_tendencies();
        let kb = base(vec![p, profile("b", 3, 1)]);
        let json = kb.to_json().unwrap();
        assert!(json.contains("\"vpip_hands\": 30"));
        let back = KnowledgeBase::from_json(&json).unwrap();
        assert_eq!(back, kb);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_loading_rebuilds_percentages_from_counters() {
        let kb = base(vec![profile("a", 60, 30), profile("b", 0, 0)]);
        let json = kb
            .to_json()
            .unwrap()
            .replace("\"vpip\": 50.0", "\"vpip\": 99.0")
            .replace("\"pfr\": 0.0", "\"pfr\": 42.0");
        assert!(json.contains("\"vpip\": 99.0"));

        let back = KnowledgeBase::from_json(&json).unwrap();
        assert_relative_eq!(back.profile("a").unwrap().statistics.vpip(), 50.0);
        // No hands behind it, so nothing survives from the file.
        assert_relative_eq!(back.profile("b").unwrap().statistics.pfr(), 0.0);
        assert_eq!(back, kb);
    }
}

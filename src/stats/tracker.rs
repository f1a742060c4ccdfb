use std::collections::HashMap;

use tracing::{debug, trace};

use crate::knowledge::KnowledgeBase;

use super::action::{ActionKind, BettingContext, PlayerAction, Street};
use super::outcome::HandOutcome;
use super::statistics::{PlayerStatistics, StatCounters};

/// A preflop call counts as a limp while the bet faced is at most this many
/// big blinds.
pub const LIMP_THRESHOLD_BB: f32 = 1.5;

/// Flags for one player during one hand. Each flag guards a counter so the
/// counter moves at most once per hand.
#[derive(Debug, Clone, Default)]
struct HandObservationState {
    saw_flop: bool,
    vpip: bool,
    pfr: bool,
    limped: bool,
    was_preflop_aggressor: bool,
    three_bet_opportunity: bool,
    fold_to_three_bet_opportunity: bool,
    folded_to_three_bet: bool,
    cbet_flop_opportunity: bool,
    cbet_flop: bool,
    cbet_turn_opportunity: bool,
    cbet_turn: bool,
    cbet_river_opportunity: bool,
}

impl HandObservationState {
    fn observe_preflop<C: BettingContext + ?Sized>(
        &mut self,
        kind: ActionKind,
        context: &C,
        counters: &mut StatCounters,
    ) {
        let was_aggressor = self.was_preflop_aggressor;

        if kind.is_voluntary() && !self.vpip {
            self.vpip = true;
            counters.vpip_hands += 1;
        }

        if kind.is_aggressive() && !self.pfr {
            self.pfr = true;
            self.was_preflop_aggressor = true;
            counters.pfr_hands += 1;
        }

        if kind == ActionKind::Call
            && context.current_bet() <= context.big_blind() * LIMP_THRESHOLD_BB
            && !self.limped
        {
            self.limped = true;
            counters.limp_hands += 1;
        }

        let raises = context.preflop_raise_count();
        if raises == 1 && !self.three_bet_opportunity {
            self.three_bet_opportunity = true;
            counters.three_bet_opportunities += 1;
            if kind.is_aggressive() {
                counters.three_bet_count += 1;
            }
        }

        if was_aggressor && raises >= 2 {
            if !self.fold_to_three_bet_opportunity {
                self.fold_to_three_bet_opportunity = true;
                counters.fold_to_three_bet_opportunities += 1;
            }
            if kind == ActionKind::Fold && !self.folded_to_three_bet {
                self.folded_to_three_bet = true;
                counters.fold_to_three_bet_count += 1;
            }
        }
    }

    fn observe_postflop(&mut self, kind: ActionKind, street: Street, counters: &mut StatCounters) {
        if !self.saw_flop {
            self.saw_flop = true;
            counters.saw_flop_count += 1;
        }

        // Each street's c-bet needs the previous street's aggression.
        match street {
            Street::Flop => {
                if self.was_preflop_aggressor && !self.cbet_flop_opportunity {
                    self.cbet_flop_opportunity = true;
                    counters.cbet_flop_opportunities += 1;
                    if kind.is_aggressive() {
                        self.cbet_flop = true;
                        counters.cbet_flop_count += 1;
                    }
                }
            }
            Street::Turn => {
                if self.cbet_flop && !self.cbet_turn_opportunity {
                    self.cbet_turn_opportunity = true;
                    counters.cbet_turn_opportunities += 1;
                    if kind.is_aggressive() {
                        self.cbet_turn = true;
                        counters.cbet_turn_count += 1;
                    }
                }
            }
            Street::River => {
                if self.cbet_turn && !self.cbet_river_opportunity {
                    self.cbet_river_opportunity = true;
                    counters.cbet_river_opportunities += 1;
                    if kind.is_aggressive() {
                        counters.cbet_river_count += 1;
                    }
                }
                if kind.is_aggressive() {
                    counters.river_bets_and_raises += 1;
                } else if kind == ActionKind::Call {
                    counters.river_calls += 1;
                }
            }
            Street::Preflop => {}
        }
    }
}

/// Watches hands action by action and keeps per-player statistics in the
/// [`KnowledgeBase`] it owns.
///
/// Actions must be fed in the order they happened. The opportunity rules
/// (facing exactly one raise, first action on a street) depend on it and
/// nothing here reorders or second guesses the input.
///
/// ```
/// use poker_ledger::stats::{ActionContext, HandObservationTracker, HandOutcome, PlayerAction, Street};
///
/// let mut tracker = HandObservationTracker::new();
/// let players = ["alice", "bob"];
/// tracker.start_hand(&players);
/// let ctx = ActionContext::new(Street::Preflop, 10.0).with_pot(15.0).with_current_bet(10.0);
/// tracker.observe_action("alice", &PlayerAction::raise(30.0), &ctx);
/// tracker.observe_action("bob", &PlayerAction::fold(), &ctx.with_current_bet(30.0).with_preflop_raises(1));
/// tracker.end_hand(&players, &HandOutcome::new(1));
///
/// let alice = tracker.statistics("alice").unwrap();
/// assert_eq!(alice.hands_played(), 1);
/// assert_eq!(alice.pfr(), 100.0);
/// ```
#[derive(Debug, Default)]
pub struct HandObservationTracker {
    knowledge: KnowledgeBase,
    hands: HashMap<String, HandObservationState>,
}

impl HandObservationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue tracking on top of existing profiles.
    pub fn with_knowledge(knowledge: KnowledgeBase) -> Self {
        Self {
            knowledge,
            hands: HashMap::new(),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn knowledge_mut(&mut self) -> &mut KnowledgeBase {
        &mut self.knowledge
    }

    pub fn into_knowledge(self) -> KnowledgeBase {
        self.knowledge
    }

    pub fn statistics(&self, player_id: &str) -> Option<&PlayerStatistics> {
        self.knowledge.profile(player_id).map(|p| &p.statistics)
    }

    /// Whether `player_id` has state in the hand in progress.
    pub fn is_tracking(&self, player_id: &str) -> bool {
        self.hands.contains_key(player_id)
    }

    /// Begin a hand. Any state left from the previous hand is dropped.
    pub fn start_hand<S: AsRef<str>>(&mut self, player_ids: &[S]) {
        self.hands.clear();
        for player_id in player_ids {
            self.hands
                .insert(player_id.as_ref().to_owned(), HandObservationState::default());
        }
        debug!(players = player_ids.len(), "hand started");
    }

    /// Record one action for one player.
    ///
    /// A player not seen before gets a profile and fresh hand state.
    pub fn observe_action<C: BettingContext + ?Sized>(
        &mut self,
        player_id: &str,
        action: &PlayerAction,
        context: &C,
    ) {
        let street = context.street();
        trace!(player_id, kind = ?action.kind, amount = ?action.amount, %street, "observed action");

        let profile = self.knowledge.get_or_create_profile(player_id, player_id);
        let state = self.hands.entry(player_id.to_owned()).or_default();
        let counters = &mut profile.statistics.counters;

        match action.kind {
            ActionKind::Call => {
                counters.calls += 1;
            }
            kind if kind.is_aggressive() => {
                counters.bets_and_raises += 1;
                if let Some(amount) = action.amount {
                    let sizing = amount / context.pot().max(1.0) * 100.0;
                    if kind == ActionKind::Bet {
                        counters.bet_sizing_total += sizing;
                        counters.bet_sizing_count += 1;
                    } else {
                        counters.raise_sizing_total += sizing;
                        counters.raise_sizing_count += 1;
                    }
                }
            }
            _ => {}
        }

        if street == Street::Preflop {
            state.observe_preflop(action.kind, context, counters);
        } else {
            state.observe_postflop(action.kind, street, counters);
        }

        profile.statistics.recalculate();
    }

    /// Finish the hand. Every listed player is credited with a hand played,
    /// including players that never acted. Showdown counters come from the
    /// revealed seats in `outcome`, where seat `i` is `player_ids[i]`.
    pub fn end_hand<S: AsRef<str>>(&mut self, player_ids: &[S], outcome: &HandOutcome) {
        for (seat, player_id) in player_ids.iter().enumerate() {
            let player_id = player_id.as_ref();
            let profile = self.knowledge.get_or_create_profile(player_id, player_id);
            let counters = &mut profile.statistics.counters;
            counters.hands_played += 1;

            if outcome.went_to_showdown(seat) {
                // A showdown implies a flop was dealt even if the player was
                // all in before acting on it.
                let saw_flop = self.hands.get(player_id).is_some_and(|s| s.saw_flop);
                if !saw_flop {
                    counters.saw_flop_count += 1;
                }
                counters.wtsd_count += 1;
                if outcome.won_at_showdown(seat) {
                    counters.wsd_count += 1;
                }
            }
            profile.statistics.recalculate();
        }
        debug!(
            hand_number = outcome.hand_number,
            players = player_ids.len(),
            showdown = outcome.is_showdown(),
            "hand ended"
        );
        self.hands.clear();
    }
}

use tracing::debug;

use crate::knowledge::KnowledgeBase;
use crate::stats::{HandObservationTracker, HandOutcome};

use super::session::SessionRecord;

/// Rebuild statistics from recorded sessions.
///
/// Every hand is fed through a fresh [`HandObservationTracker`] exactly as
/// it was recorded. Hands without a stored outcome close with no showdown.
/// EV records add to each player's showdown count and EV adjusted total.
pub fn replay_sessions(sessions: &[SessionRecord]) -> KnowledgeBase {
    let mut tracker = HandObservationTracker::new();
    let mut hands = 0;
    for session in sessions {
        hands += replay_session(&mut tracker, session);
    }
    let knowledge = tracker.into_knowledge();
    debug!(
        sessions = sessions.len(),
        hands,
        players = knowledge.len(),
        "replayed sessions"
    );
    knowledge
}

/// Replay one session into an existing tracker. Returns the number of
/// hands replayed.
pub fn replay_session(tracker: &mut HandObservationTracker, session: &SessionRecord) -> usize {
    for hand in &session.hands {
        tracker.start_hand(&session.players);
        for action in &hand.actions {
            tracker.observe_action(&action.actor, &action.action(), action);
        }
        match &hand.outcome {
            Some(outcome) => tracker.end_hand(&session.players, outcome),
            None => tracker.end_hand(&session.players, &HandOutcome::new(hand.hand_number)),
        }

        for record in &hand.ev_records {
            let profile = tracker
                .knowledge_mut()
                .get_or_create_profile(record.player_id(), record.player_id());
            profile.statistics.counters.ev_adjusted_total += record.ev_adjusted();
            profile.statistics.counters.showdown_count += 1;
        }
    }
    session.hands.len()
}

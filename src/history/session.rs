use std::collections::BTreeMap;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::ev::{EvError, EvLedger, EvRecord};
use crate::stats::HandOutcome;

use super::action::{DecisionKind, RecordedAction};
use super::error::{HistoryError, Result};
use super::hand::HandRecord;

/// How often a player stuck to or left the baseline strategy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionCounts {
    pub followed: usize,
    pub deviated: usize,
}

/// All hands played by a fixed set of players.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRecord {
    pub session_id: String,
    /// Seat order. Outcome seats index into this list.
    pub players: Vec<String>,
    pub hands: Vec<HandRecord>,
}

impl SessionRecord {
    pub fn action_count(&self) -> usize {
        self.hands.iter().map(|h| h.actions.len()).sum()
    }

    pub fn decision_counts(&self) -> BTreeMap<String, DecisionCounts> {
        let mut counts: BTreeMap<String, DecisionCounts> = BTreeMap::new();
        let actions = self.hands.iter().flat_map(|h| h.actions.iter());
        for action in actions {
            let Some(decision) = &action.decision else {
                continue;
            };
            let entry = counts.entry(action.actor.clone()).or_default();
            match decision {
                DecisionKind::FollowedGto => entry.followed += 1,
                DecisionKind::Deviated { .. } => entry.deviated += 1,
            }
        }
        counts
    }

    /// Fold every hand's EV records into a ledger.
    pub fn ev_ledger(&self) -> std::result::Result<EvLedger, EvError> {
        let mut ledger = EvLedger::new();
        for hand in &self.hands {
            ledger.record_hand(hand.hand_number, hand.ev_records.clone())?;
        }
        Ok(ledger)
    }
}

/// Builds a [`SessionRecord`] as play happens.
///
/// Only the most recently started hand accepts actions, outcomes and EV
/// records.
#[derive(Debug, Default)]
pub struct SessionRecorder {
    session: Option<SessionRecord>,
    hand_open: bool,
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, replacing any unfinished one. Without an id a time
    /// ordered UUID is generated. Returns the session id.
    pub fn start_session(&mut self, session_id: Option<&str>, players: Vec<String>) -> String {
        let session_id = session_id
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        debug!(%session_id, players = players.len(), "session started");
        self.session = Some(SessionRecord {
            session_id: session_id.clone(),
            players,
            hands: Vec::new(),
        });
        self.hand_open = false;
        session_id
    }

    pub fn current_session(&self) -> Option<&SessionRecord> {
        self.session.as_ref()
    }

    pub fn current_hand(&self) -> Option<&HandRecord> {
        if self.hand_open {
            self.session.as_ref().and_then(|s| s.hands.last())
        } else {
            None
        }
    }

    pub fn start_hand(
        &mut self,
        hand_number: u64,
        small_blind: f32,
        big_blind: f32,
        starting_stacks: BTreeMap<String, f32>,
    ) -> Result<()> {
        let session = self.session.as_mut().ok_or(HistoryError::NoSession)?;
        session.hands.push(HandRecord::new(
            hand_number,
            small_blind,
            big_blind,
            starting_stacks,
        ));
        self.hand_open = true;
        trace!(hand_number, "hand recording started");
        Ok(())
    }

    fn hand_mut(&mut self) -> Result<&mut HandRecord> {
        let session = self.session.as_mut().ok_or(HistoryError::NoSession)?;
        if !self.hand_open {
            return Err(HistoryError::NoHandInProgress);
        }
        session.hands.last_mut().ok_or(HistoryError::NoHandInProgress)
    }

    pub fn record_action(&mut self, action: RecordedAction) -> Result<()> {
        self.hand_mut()?.actions.push(action);
        Ok(())
    }

    pub fn record_outcome(&mut self, outcome: HandOutcome) -> Result<()> {
        let hand = self.hand_mut()?;
        if outcome.hand_number != hand.hand_number {
            return Err(HistoryError::OutcomeMismatch {
                expected: hand.hand_number,
                found: outcome.hand_number,
            });
        }
        hand.outcome = Some(outcome);
        Ok(())
    }

    pub fn record_hand_result(&mut self, finishing_stacks: BTreeMap<String, f32>) -> Result<()> {
        self.hand_mut()?.finishing_stacks = finishing_stacks;
        Ok(())
    }

    /// Attach a showdown EV record to the current hand. A record for any
    /// other hand is rejected.
    pub fn record_ev(&mut self, record: EvRecord) -> Result<()> {
        let hand = self.hand_mut()?;
        if record.hand_number() != hand.hand_number {
            return Err(EvError::HandMismatch {
                expected: hand.hand_number,
                found: record.hand_number(),
            }
            .into());
        }
        hand.ev_records.push(record);
        Ok(())
    }

    /// Close the session and hand back the record, if one was started.
    pub fn finish_session(&mut self) -> Option<SessionRecord> {
        self.hand_open = false;
        let session = self.session.take()?;
        debug!(
            session_id = %session.session_id,
            hands = session.hands.len(),
            actions = session.action_count(),
            "session finished"
        );
        Some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{ActionContext, PlayerAction, Street};

    fn players() -> Vec<String> {
        vec!["player_a".to_string(), "player_b".to_string()]
    }

    fn stacks() -> BTreeMap<String, f32> {
        players().into_iter().map(|p| (p, 1500.0)).collect()
    }

    fn raise_a() -> RecordedAction {
        let ctx = ActionContext::new(Street::Preflop, 20.0)
            .with_pot(30.0)
            .with_current_bet(20.0);
        RecordedAction::new("player_a", &PlayerAction::raise(60.0), &ctx)
    }

    #[test]
    fn test_start_session_with_id() {
        let mut recorder = SessionRecorder::new();
        let id = recorder.start_session(Some("test_123"), players());
        assert_eq!(id, "test_123");
        assert_eq!(recorder.current_session().unwrap().session_id, "test_123");
    }

    #[test]
    fn test_generated_session_id_is_uuid() {
        let mut recorder = SessionRecorder::new();
        let id = recorder.start_session(None, players());
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn test_record_requires_session_and_hand() {
        let mut recorder = SessionRecorder::new();
        assert_eq!(
            recorder.start_hand(1, 10.0, 20.0, stacks()),
            Err(HistoryError::NoSession)
        );
        recorder.start_session(None, players());
        assert_eq!(
            recorder.record_action(raise_a()),
            Err(HistoryError::NoHandInProgress)
        );
    }

    #[test]
    fn test_record_action_captures_minimal_data() {
        let mut recorder = SessionRecorder::new();
        recorder.start_session(Some("s"), players());
        recorder.start_hand(1, 10.0, 20.0, stacks()).unwrap();
        recorder.record_action(raise_a()).unwrap();

        let hand = recorder.current_hand().unwrap();
        assert_eq!(hand.hand_number, 1);
        assert_eq!(hand.actions.len(), 1);
        assert_eq!(hand.actions[0].amount, Some(60.0));
        assert_eq!(hand.actions[0].pot, 30.0);
    }

    #[test]
    fn test_decision_counts() {
        let mut recorder = SessionRecorder::new();
        recorder.start_session(Some("s"), players());
        recorder.start_hand(1, 10.0, 20.0, stacks()).unwrap();
        recorder
            .record_action(raise_a().with_decision(DecisionKind::FollowedGto))
            .unwrap();
        recorder
            .record_action(raise_a().with_decision(DecisionKind::Deviated {
                reason: "Exploiting passive opponent".to_string(),
            }))
            .unwrap();
        recorder.record_action(raise_a()).unwrap();

        let session = recorder.finish_session().unwrap();
        let counts = session.decision_counts();
        assert_eq!(
            counts["player_a"],
            DecisionCounts {
                followed: 1,
                deviated: 1
            }
        );
        assert_eq!(session.action_count(), 3);
    }

    #[test]
    fn test_record_hand_result() {
        let mut recorder = SessionRecorder::new();
        recorder.start_session(Some("s"), players());
        recorder.start_hand(1, 10.0, 20.0, stacks()).unwrap();
        let mut finishing = stacks();
        finishing.insert("player_a".to_string(), 1560.0);
        recorder.record_hand_result(finishing).unwrap();

        let hand = recorder.current_hand().unwrap();
        assert_eq!(hand.finishing_stacks["player_a"], 1560.0);
    }

    #[test]
    fn test_record_ev_checks_hand_number() {
        let mut recorder = SessionRecorder::new();
        recorder.start_session(Some("s"), players());
        recorder.start_hand(5, 10.0, 20.0, stacks()).unwrap();

        recorder
            .record_ev(EvRecord::new(5, "player_a", 0.75, 400.0, 200.0, true))
            .unwrap();
        let err = recorder
            .record_ev(EvRecord::new(4, "player_b", 0.25, 400.0, 200.0, false))
            .unwrap_err();
        assert_eq!(
            err,
            HistoryError::Ev(EvError::HandMismatch {
                expected: 5,
                found: 4
            })
        );

        let hand = recorder.current_hand().unwrap();
        assert_eq!(hand.ev_records.len(), 1);
        assert_eq!(hand.ev_records[0].equity(), 0.75);
    }

    #[test]
    fn test_record_outcome_checks_hand_number() {
        let mut recorder = SessionRecorder::new();
        recorder.start_session(Some("s"), players());
        recorder.start_hand(2, 10.0, 20.0, stacks()).unwrap();
        assert_eq!(
            recorder.record_outcome(HandOutcome::new(3)),
            Err(HistoryError::OutcomeMismatch {
                expected: 2,
                found: 3
            })
        );
        recorder.record_outcome(HandOutcome::new(2)).unwrap();
        assert!(recorder.current_hand().unwrap().outcome.is_some());
    }

    #[test]
    fn test_finish_session_resets() {
        let mut recorder = SessionRecorder::new();
        assert!(recorder.finish_session().is_none());
        recorder.start_session(Some("s"), players());
        recorder.start_hand(1, 10.0, 20.0, stacks()).unwrap();
        let session = recorder.finish_session().unwrap();
        assert_eq!(session.hands.len(), 1);
        assert!(recorder.current_session().is_none());
        assert!(recorder.current_hand().is_none());
    }

    #[test]
    fn test_session_ev_ledger() {
        let mut recorder = SessionRecorder::new();
        recorder.start_session(Some("s"), players());
        for hand in 1..=2 {
            recorder.start_hand(hand, 10.0, 20.0, stacks()).unwrap();
            recorder
                .record_ev(EvRecord::new(hand, "player_a", 0.5, 200.0, 100.0, hand == 1))
                .unwrap();
        }
        let ledger = recorder.finish_session().unwrap().ev_ledger().unwrap();
        let a = ledger.summary("player_a").unwrap();
        assert_eq!(a.showdowns, 2);
        assert_eq!(a.actual_chips, 0.0);
        assert_eq!(a.ev_chips, 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_session_json_round_trip() {
        let mut recorder = SessionRecorder::new();
        recorder.start_session(Some("round_trip"), players());
        recorder.start_hand(1, 10.0, 20.0, stacks()).unwrap();
        recorder.record_action(raise_a()).unwrap();
        recorder
            .record_ev(EvRecord::new(1, "player_a", 0.75, 400.0, 200.0, true))
            .unwrap();
        let session = recorder.finish_session().unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let back: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}

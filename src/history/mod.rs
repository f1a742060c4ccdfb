//! Recorded hand histories and replay.
//!
//! A [`SessionRecorder`] captures just enough about each action to feed it
//! back through the statistics tracker later, which is how statistics are
//! rebuilt from stored sessions with no rules engine involved.

mod action;
mod error;
mod hand;
mod replay;
mod session;

pub use self::action::{DecisionKind, RecordedAction};
pub use self::error::{HistoryError, Result};
pub use self::hand::{HandRecord, HandSummary};
pub use self::replay::{replay_session, replay_sessions};
pub use self::session::{DecisionCounts, SessionRecord, SessionRecorder};

//! Expected value accounting for showdowns.
//!
//! Splits each showdown result into the part the player earned with their
//! equity and the part the runout handed them.

mod error;
mod ledger;
mod record;
mod showdown;

pub use self::error::EvError;
pub use self::ledger::{EvLedger, EvSummary};
pub use self::record::EvRecord;
pub use self::showdown::{analyze_showdown, ShowdownParticipant};

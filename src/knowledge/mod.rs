//! Player profiles and the knowledge base that stores them.

mod profile;
mod store;

pub use self::profile::{
    PlayerProfile, CALLS_DOWN_WTSD, FOLDS_TO_THREE_BET, FREQUENT_FLOP_CBET, LOOSE_VPIP,
    PASSIVE_AGGRESSION, PASSIVE_PFR,
};
pub use self::store::KnowledgeBase;

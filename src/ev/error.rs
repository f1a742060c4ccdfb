use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EvError {
    /// A record was filed under a hand it does not belong to. Upstream hand
    /// tracking is out of sync.
    #[error("EV record for hand {found} cannot be applied to hand {expected}")]
    HandMismatch { expected: u64, found: u64 },
}

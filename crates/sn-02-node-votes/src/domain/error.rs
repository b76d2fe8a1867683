//! Error types for the delegation ledger.

use shared_types::{Address, U256};
use thiserror::Error;

/// Revert reasons for delegation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeVotesError {
    /// Target address is not an authorized validator candidate.
    #[error("Not a candidate: {0}")]
    NotCandidate(Address),

    /// The staking ledger refused to lock the requested amount.
    #[error("Insufficient stake: cannot lock {amount} for {delegator}")]
    InsufficientStake { delegator: Address, amount: U256 },

    /// Undelegation amount exceeds the live delegation.
    #[error("Insufficient delegation: have {have}, requested {requested}")]
    InsufficientDelegation { have: U256, requested: U256 },

    /// No matured pending-redeem entries at the current height.
    #[error("Nothing to redeem for {0}")]
    NothingToRedeem(Address),
}

/// Result type for delegation operations.
pub type NodeVotesResult<T> = Result<T, NodeVotesError>;

//! Error types for reward accounting.

use shared_types::Address;
use thiserror::Error;

/// Revert reasons for reward operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SystemRewardsError {
    /// Claim on a zero balance.
    #[error("Nothing to claim for {0}")]
    NothingToClaim(Address),
}

/// Result type for reward operations.
pub type SystemRewardsResult<T> = Result<T, SystemRewardsError>;

//! Error types for validator election and lifecycle.

use shared_types::{Address, U256};
use thiserror::Error;

/// Revert reasons for validator operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorsError {
    /// Caller lacks the candidate capability.
    #[error("Unauthorized: {0} lacks the candidate capability")]
    Unauthorized(Address),

    /// Registration deposit below the configured minimum.
    #[error("Insufficient deposit: provided {provided}, minimum {minimum}")]
    InsufficientDeposit { provided: U256, minimum: U256 },

    /// The staking ledger refused to lock the deposit.
    #[error("Insufficient stake: cannot lock deposit {amount} for {candidate}")]
    InsufficientStake { candidate: Address, amount: U256 },

    /// Candidate already has a live registration.
    #[error("Already registered: {0}")]
    AlreadyRegistered(Address),

    /// Candidate was jailed or removed; re-registration needs governance.
    #[error("Candidate retired: {0}")]
    CandidateRetired(Address),

    /// Address is not in the candidate registry.
    #[error("Unknown candidate: {0}")]
    UnknownCandidate(Address),

    /// Read before the first epoch rotation committed a set.
    #[error("Epoch not finalized: no validator set committed yet")]
    EpochNotFinalized,

    /// The committed set is empty; no producer can be scheduled.
    #[error("No qualified candidates in the current validator set")]
    NoQualifiedCandidates,
}

/// Result type for validator operations.
pub type ValidatorsResult<T> = Result<T, ValidatorsError>;

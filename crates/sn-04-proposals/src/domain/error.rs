//! Error types for the proposal workflow.

use super::ProposalStatus;
use shared_types::Address;
use thiserror::Error;

/// Revert reasons for proposal operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProposalsError {
    /// Caller is neither a current validator nor a permitted proposer.
    #[error("Unauthorized: {0} may not act on proposals")]
    Unauthorized(Address),

    /// No proposal with this id.
    #[error("Unknown proposal: {0}")]
    UnknownProposal(u64),

    /// Vote cast after the deadline or on a resolved proposal.
    #[error("Voting closed for proposal {0}")]
    VotingClosed(u64),

    /// Tally attempted before the voting deadline.
    #[error("Voting not ended for proposal {id}: deadline {deadline}, height {height}")]
    VotingNotEnded { id: u64, deadline: u64, height: u64 },

    /// Tally attempted on an already-resolved proposal.
    #[error("Proposal {id} already resolved: {status:?}")]
    AlreadyResolved { id: u64, status: ProposalStatus },

    /// Execute attempted on a proposal that did not pass.
    #[error("Proposal {0} not passed")]
    NotPassed(u64),

    /// Execute replayed on an executed proposal.
    #[error("Proposal {0} already executed")]
    AlreadyExecuted(u64),

    /// The dispatcher failed to apply the action; the proposal stays
    /// Passed and execution may be retried.
    #[error("Execution failed for proposal {id}: {reason}")]
    ExecutionFailed { id: u64, reason: String },
}

/// Result type for proposal operations.
pub type ProposalsResult<T> = Result<T, ProposalsError>;

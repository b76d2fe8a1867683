//! # sn-04-proposals
//!
//! Governance proposal workflow for Stakenet.
//!
//! Validators (or addresses holding the proposer capability) submit
//! proposals carrying a closed set of actions: permission changes, chain
//! parameter updates, validator removal. Current validators cast weighted
//! votes; weights come from a stake snapshot taken at the proposal's first
//! vote, so stake moved mid-vote cannot inflate anyone's voice.
//!
//! ## State machine
//!
//! ```text
//! Open ──tally──→ Passed ──execute──→ Executed
//!   │                │
//!   ├──tally──→ Rejected          (for ≤ quorum)
//!   └──tally──→ Expired           (zero votes)
//! ```
//!
//! Every transition is one-way. An executed proposal's effect is reverted
//! only by a later counter-proposal.

pub mod domain;
pub mod service;

pub use domain::{
    ParameterUpdate, Proposal, ProposalAction, ProposalStatus, ProposalsError, ProposalsResult,
    QuorumFraction, StakeSnapshot, Vote,
};
pub use service::Proposals;

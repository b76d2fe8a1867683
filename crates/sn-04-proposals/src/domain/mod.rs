//! Proposal domain entities and errors.

mod entities;
mod error;

pub use entities::{
    ParameterUpdate, Proposal, ProposalAction, ProposalStatus, QuorumFraction, StakeSnapshot, Vote,
};
pub use error::{ProposalsError, ProposalsResult};

//! Delegation domain entities and errors.

mod entities;
mod error;

pub use entities::PendingRedeem;
pub use error::{NodeVotesError, NodeVotesResult};

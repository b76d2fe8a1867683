//! # sn-02-node-votes
//!
//! Stake-weighted delegation ledger for Stakenet governance.
//!
//! Records which staking accounts delegate how much weight to which
//! validator candidates. A candidate's total is always the exact sum of its
//! live delegations: no rounding, no decay, no implicit adjustment.
//!
//! Delegation legality is *not* decided here. An external staking ledger,
//! reached through the [`StakeLocker`] port, verifies and locks the amount
//! before this ledger records it. Undelegated stake sits in a redeem queue
//! until the configured lock period elapses, then [`NodeVotes::redeem`]
//! releases it back through the same port.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryStakeLedger;
pub use domain::{NodeVotesError, NodeVotesResult, PendingRedeem};
pub use ports::StakeLocker;
pub use service::NodeVotes;

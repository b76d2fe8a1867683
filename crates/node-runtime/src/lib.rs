//! # Node Runtime
//!
//! Wires the five Stakenet governance ledgers into the block lifecycle.
//!
//! ## Responsibilities
//!
//! - **Genesis**: seed permissions, register and elect the initial
//!   validator set, pin the component registry.
//! - **Block hook**: once per finalized block, punish the scheduled
//!   producer when it skipped its slot, accrue the block's reward and
//!   fees, and rotate the epoch at each boundary.
//! - **Transaction surface**: the typed entrypoints the execution layer
//!   dispatches governance transactions into, each fully applying or fully
//!   reverting with a typed reason.
//!
//! Everything runs in the chain's serialized execution order; there are no
//! suspension points and no concurrent writers.

pub mod config;
pub mod error;
pub mod runtime;

pub use config::{ChainParams, GenesisConfig, GenesisValidator};
pub use error::{RuntimeError, RuntimeResult};
pub use runtime::GovernanceRuntime;

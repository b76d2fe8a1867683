//! # Shared Types Crate
//!
//! This crate contains the domain primitives shared by every governance
//! subsystem: the account [`Address`], the [`Capability`] permission flags,
//! the append-only [`GovernanceEvent`] record vocabulary and the
//! [`ComponentRegistry`] of well-known system addresses.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: all cross-subsystem types are defined here.
//! - **Deterministic by construction**: every type has a total order or a
//!   canonical encoding, so independent nodes replaying the same operations
//!   reach bit-identical state.

pub mod address;
pub mod entities;
pub mod events;
pub mod registry;

pub use address::{Address, AddressParseError, ADDRESS_LENGTH};
pub use entities::{Capability, U256};
pub use events::{EventSink, GovernanceEvent, InMemoryEventLog};
pub use registry::{
    ComponentRegistry, ADDRESS_LIST_ADDR, NODE_VOTES_ADDR, PROPOSALS_ADDR, SYSTEM_REWARDS_ADDR,
    VALIDATORS_ADDR,
};

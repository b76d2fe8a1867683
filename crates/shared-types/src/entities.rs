//! # Core Governance Entities
//!
//! Capability flags and numeric primitives shared across all ledgers.

use serde::{Deserialize, Serialize};

// Re-export U256 from primitive-types for use across all subsystems.
// Stake and reward amounts are token-denominated unsigned integers.
pub use primitive_types::U256;

/// A named permission flag checked before privileged operations.
///
/// The set is closed: genesis seeds the initial grants and every later
/// change goes through the permission registry (directly by an admin or
/// via an executed proposal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May mutate the permission registry directly.
    Admin,
    /// May register as a validator candidate and receive delegations.
    Candidate,
    /// May submit governance proposals without being an active validator.
    Proposer,
}

impl Capability {
    /// Stable lowercase tag used in event records and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Capability::Admin => "admin",
            Capability::Candidate => "candidate",
            Capability::Proposer => "proposer",
        }
    }
}

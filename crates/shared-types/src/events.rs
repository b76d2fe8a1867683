//! # Governance Event Records
//!
//! Every mutating ledger operation appends one structured record to an
//! [`EventSink`]. The sink is append-only and per-block ordered: records are
//! emitted in the canonical transaction order, so off-chain indexers replay
//! an identical sequence on every node.

use crate::{Address, Capability, U256};
use serde::{Deserialize, Serialize};

/// A structured record of one state mutation: which component, which
/// operation, the affected addresses and the resulting values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum GovernanceEvent {
    /// AddressList: a capability was granted or revoked.
    PermissionChanged {
        address: Address,
        capability: Capability,
        allowed: bool,
    },

    /// NodeVotes: stake delegated to a candidate.
    StakeDelegated {
        delegator: Address,
        candidate: Address,
        amount: U256,
        new_total: U256,
    },

    /// NodeVotes: stake undelegated into the redeem queue.
    StakeUndelegated {
        delegator: Address,
        candidate: Address,
        amount: U256,
        new_total: U256,
        unlock_height: u64,
    },

    /// NodeVotes: matured undelegations released back to the delegator.
    StakeRedeemed { delegator: Address, amount: U256 },

    /// Validators: a new candidate joined the registry.
    CandidateRegistered { candidate: Address, deposit: U256 },

    /// Validators: an epoch's validator set was committed.
    EpochRotated {
        epoch: u64,
        validators: Vec<Address>,
        /// True when no candidate qualified and the previous set was kept.
        degraded: bool,
    },

    /// Validators: a candidate crossed the jail threshold.
    ValidatorJailed {
        validator: Address,
        missed_slots: u32,
    },

    /// Validators: a candidate was removed (governance action).
    ValidatorRemoved { validator: Address },

    /// Proposals: a new proposal entered voting.
    ProposalSubmitted {
        id: u64,
        proposer: Address,
        deadline: u64,
    },

    /// Proposals: a weighted vote was recorded (re-votes replace).
    VoteCast {
        id: u64,
        voter: Address,
        support: bool,
        weight: U256,
    },

    /// Proposals: voting closed and the proposal resolved.
    ProposalResolved { id: u64, status: String },

    /// Proposals: a passed proposal's action was applied.
    ProposalExecuted { id: u64 },

    /// SystemRewards: reward credited to a validator's accrual.
    RewardAccrued {
        validator: Address,
        amount: U256,
        epoch: u64,
    },

    /// SystemRewards: a validator drained its accrued balance.
    RewardClaimed { validator: Address, amount: U256 },
}

impl GovernanceEvent {
    /// The component that emitted this record.
    pub fn component(&self) -> &'static str {
        match self {
            GovernanceEvent::PermissionChanged { .. } => "address_list",
            GovernanceEvent::StakeDelegated { .. }
            | GovernanceEvent::StakeUndelegated { .. }
            | GovernanceEvent::StakeRedeemed { .. } => "node_votes",
            GovernanceEvent::CandidateRegistered { .. }
            | GovernanceEvent::EpochRotated { .. }
            | GovernanceEvent::ValidatorJailed { .. }
            | GovernanceEvent::ValidatorRemoved { .. } => "validators",
            GovernanceEvent::ProposalSubmitted { .. }
            | GovernanceEvent::VoteCast { .. }
            | GovernanceEvent::ProposalResolved { .. }
            | GovernanceEvent::ProposalExecuted { .. } => "proposals",
            GovernanceEvent::RewardAccrued { .. } | GovernanceEvent::RewardClaimed { .. } => {
                "system_rewards"
            }
        }
    }
}

/// Destination for governance event records.
///
/// Implementations must preserve append order; the ledgers emit records in
/// canonical transaction order and rely on the sink not to reorder them.
pub trait EventSink {
    /// Append one record.
    fn emit(&mut self, event: GovernanceEvent);
}

/// In-memory, append-only event log.
///
/// The default sink for tests and for nodes that index in-process.
#[derive(Default)]
pub struct InMemoryEventLog {
    records: Vec<GovernanceEvent>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in emission order.
    pub fn records(&self) -> &[GovernanceEvent] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EventSink for InMemoryEventLog {
    fn emit(&mut self, event: GovernanceEvent) {
        self.records.push(event);
    }
}

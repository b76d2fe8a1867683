//! Proposal domain entities.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Capability, U256};
use sn_03_validators::ValidatorSet;
use std::collections::BTreeMap;

/// Lifecycle status of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Accepting votes until the deadline.
    Open,
    /// Quorum reached; awaiting execution.
    Passed,
    /// Deadline passed without reaching quorum.
    Rejected,
    /// Passed and its action applied.
    Executed,
    /// Deadline passed with zero votes cast.
    Expired,
}

impl ProposalStatus {
    /// Stable lowercase tag used in event records.
    pub fn tag(&self) -> &'static str {
        match self {
            ProposalStatus::Open => "open",
            ProposalStatus::Passed => "passed",
            ProposalStatus::Rejected => "rejected",
            ProposalStatus::Executed => "executed",
            ProposalStatus::Expired => "expired",
        }
    }
}

/// A governed chain-parameter change.
///
/// Closed set: each variant carries the strongly-typed new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterUpdate {
    MaxValidators(u32),
    MinCandidateDeposit(U256),
    RedeemLockBlocks(u64),
    JailThreshold(u32),
    FoundationSharePercent(u8),
}

/// The action a proposal applies when executed.
///
/// A closed tagged union, dispatched by match in the runtime executor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalAction {
    /// Grant or revoke a capability in the permission registry.
    PermissionChange {
        address: Address,
        capability: Capability,
        grant: bool,
    },
    /// Update one chain parameter.
    ParameterUpdate(ParameterUpdate),
    /// Remove a validator candidate from future elections.
    ValidatorRemoval { address: Address },
}

/// One validator's recorded vote. Re-voting replaces the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub weight: U256,
    pub support: bool,
}

/// Frozen voting weights, taken from the active validator set at the
/// proposal's first vote. All later votes on the proposal use these
/// weights, so stake moved during voting cannot change any voice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeSnapshot {
    weights: BTreeMap<Address, U256>,
    total: U256,
}

impl StakeSnapshot {
    /// Freeze the committed weights of `set`.
    pub fn of(set: &ValidatorSet) -> Self {
        let weights = set
            .members
            .iter()
            .map(|member| (member.address, member.stake))
            .collect();
        Self {
            weights,
            total: set.total_stake,
        }
    }

    /// Snapshotted weight of `voter`, zero if absent.
    pub fn weight_of(&self, voter: &Address) -> U256 {
        self.weights.get(voter).copied().unwrap_or_default()
    }

    /// Total snapshotted stake; the quorum base.
    pub fn total(&self) -> U256 {
        self.total
    }
}

/// Quorum threshold as a fraction of the snapshotted total stake.
///
/// A proposal passes when `votes_for * denominator > total * numerator`
/// (strictly). The default is a simple majority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumFraction {
    pub numerator: u64,
    pub denominator: u64,
}

impl Default for QuorumFraction {
    fn default() -> Self {
        Self {
            numerator: 1,
            denominator: 2,
        }
    }
}

impl QuorumFraction {
    /// Does `votes_for` clear the threshold over `total`?
    pub fn reached(&self, votes_for: U256, total: U256) -> bool {
        votes_for * U256::from(self.denominator) > total * U256::from(self.numerator)
    }
}

/// A governance proposal and its voting record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub proposer: Address,
    pub action: ProposalAction,
    /// Epoch in which the proposal was submitted.
    pub created_epoch: u64,
    /// First block height at which voting is over.
    pub deadline: u64,
    pub status: ProposalStatus,
    pub votes: BTreeMap<Address, Vote>,
    pub votes_for: U256,
    pub votes_against: U256,
    /// Taken at the first vote; `None` until then.
    pub snapshot: Option<StakeSnapshot>,
}

impl Proposal {
    /// Is `height` still inside the voting window?
    pub fn voting_open_at(&self, height: u64) -> bool {
        self.status == ProposalStatus::Open && height < self.deadline
    }
}

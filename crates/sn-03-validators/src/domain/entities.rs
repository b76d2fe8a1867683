//! Validator domain entities.

use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};
use std::collections::HashMap;

/// Lifecycle status of a registered candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// Registered, not yet elected into a committed set.
    Pending,
    /// Elected into at least one committed set.
    Active,
    /// Crossed the jail threshold; excluded from election.
    Jailed,
    /// Removed by governance; excluded from election.
    Removed,
}

/// A registered validator candidate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Candidate {
    pub address: Address,
    /// Locked registration deposit; counts toward ranking weight.
    pub self_stake: U256,
    pub status: CandidateStatus,
    /// Missed production slots since registration.
    pub missed_slots: u32,
}

impl Candidate {
    pub fn new(address: Address, self_stake: U256) -> Self {
        Self {
            address,
            self_stake,
            status: CandidateStatus::Pending,
            missed_slots: 0,
        }
    }

    /// May this candidate stand in the next election?
    pub fn electable(&self) -> bool {
        matches!(
            self.status,
            CandidateStatus::Pending | CandidateStatus::Active
        )
    }
}

/// One member of a committed validator set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    pub address: Address,
    /// Ranking weight at commit time (self-stake + delegated total).
    pub stake: U256,
}

/// The finalized, ordered validator set of one epoch.
///
/// Members are ranked by stake descending, ties broken by ascending
/// address. Once committed the set is immutable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidatorSet {
    pub epoch: u64,
    pub members: Vec<ValidatorInfo>,
    pub total_stake: U256,
    /// Quick lookup by validator address.
    #[serde(skip)]
    lookup: HashMap<Address, usize>,
}

impl ValidatorSet {
    /// Build a set from pre-ranked members.
    pub fn new(epoch: u64, members: Vec<ValidatorInfo>) -> Self {
        let total_stake = members
            .iter()
            .fold(U256::zero(), |acc, member| acc + member.stake);
        let lookup = members
            .iter()
            .enumerate()
            .map(|(i, member)| (member.address, i))
            .collect();
        Self {
            epoch,
            members,
            total_stake,
            lookup,
        }
    }

    /// Rank candidates and commit the top `max_validators`.
    ///
    /// Sort order: stake descending, then address ascending. The order is
    /// total, so every node commits an identical sequence.
    pub fn elect(epoch: u64, mut candidates: Vec<ValidatorInfo>, max_validators: usize) -> Self {
        candidates.sort_by(|a, b| b.stake.cmp(&a.stake).then(a.address.cmp(&b.address)));
        candidates.truncate(max_validators);
        Self::new(epoch, candidates)
    }

    /// Carry an unchanged membership into a later epoch.
    pub fn carried_into(&self, epoch: u64) -> Self {
        Self::new(epoch, self.members.clone())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Is this address a member of the set?
    pub fn contains(&self, address: &Address) -> bool {
        self.lookup.contains_key(address)
    }

    /// Member info by address.
    pub fn get(&self, address: &Address) -> Option<&ValidatorInfo> {
        self.lookup.get(address).map(|&idx| &self.members[idx])
    }

    /// Committed stake weight of a member, zero for non-members.
    pub fn stake_of(&self, address: &Address) -> U256 {
        self.get(address).map(|m| m.stake).unwrap_or_default()
    }

    /// Ordered member addresses.
    pub fn addresses(&self) -> Vec<Address> {
        self.members.iter().map(|m| m.address).collect()
    }

    /// Rebuild the lookup table (after deserialization).
    pub fn rebuild_lookup(&mut self) {
        self.lookup = self
            .members
            .iter()
            .enumerate()
            .map(|(i, member)| (member.address, i))
            .collect();
    }
}

/// What an epoch-rotation call actually did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RotationOutcome {
    /// A freshly elected set was committed.
    Rotated { validators: usize },
    /// This epoch was already rotated; the call was a no-op.
    AlreadyRotated,
    /// No candidate qualified: the previous membership was carried over,
    /// or the empty set committed when no previous epoch exists.
    NoQualifiedCandidates,
}

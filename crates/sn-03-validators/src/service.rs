//! Validator registry and election state machine.

use crate::domain::{
    Candidate, CandidateStatus, RotationOutcome, ValidatorInfo, ValidatorSet, ValidatorsError,
    ValidatorsResult,
};
use shared_types::{Address, Capability, EventSink, GovernanceEvent, U256};
use sn_01_address_list::AddressList;
use sn_02_node_votes::{NodeVotes, StakeLocker};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Candidate registry plus the per-epoch committed validator sets.
///
/// Committed sets are immutable and retained for every rotated epoch;
/// lifecycle changes (jail, removal) only affect future elections.
#[derive(Debug, Default, Clone)]
pub struct Validators {
    candidates: BTreeMap<Address, Candidate>,
    epochs: BTreeMap<u64, ValidatorSet>,
    current_epoch: Option<u64>,
}

impl Validators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `candidate` with a locked self-stake deposit.
    ///
    /// Requires the candidate capability and a deposit of at least
    /// `min_deposit`. Jailed or removed candidates cannot re-register;
    /// reinstatement is a governance decision.
    pub fn register_candidate(
        &mut self,
        candidate: Address,
        deposit: U256,
        min_deposit: U256,
        permissions: &AddressList,
        stake: &mut dyn StakeLocker,
        events: &mut dyn EventSink,
    ) -> ValidatorsResult<()> {
        if !permissions.is_allowed(candidate, Capability::Candidate) {
            return Err(ValidatorsError::Unauthorized(candidate));
        }
        if deposit < min_deposit {
            return Err(ValidatorsError::InsufficientDeposit {
                provided: deposit,
                minimum: min_deposit,
            });
        }
        match self.candidates.get(&candidate).map(|c| c.status) {
            Some(CandidateStatus::Jailed) | Some(CandidateStatus::Removed) => {
                return Err(ValidatorsError::CandidateRetired(candidate));
            }
            Some(_) => return Err(ValidatorsError::AlreadyRegistered(candidate)),
            None => {}
        }
        if !stake.check_and_lock_stake(candidate, deposit) {
            return Err(ValidatorsError::InsufficientStake {
                candidate,
                amount: deposit,
            });
        }

        self.candidates
            .insert(candidate, Candidate::new(candidate, deposit));
        info!(%candidate, %deposit, "candidate registered");
        events.emit(GovernanceEvent::CandidateRegistered {
            candidate,
            deposit,
        });
        Ok(())
    }

    /// Compute and commit the validator set for `epoch`.
    ///
    /// Idempotent per epoch. Qualification: a live (pending or active)
    /// registration that still holds the candidate capability. Ranking
    /// weight is self-stake plus the delegated total from the vote ledger.
    ///
    /// Degraded path: with zero qualified candidates the previous
    /// membership is carried over unchanged (the chain must never lose its
    /// producers); only a chain whose genesis committed no candidates can
    /// end up with an empty set.
    pub fn rotate_epoch(
        &mut self,
        epoch: u64,
        permissions: &AddressList,
        votes: &NodeVotes,
        max_validators: usize,
        events: &mut dyn EventSink,
    ) -> RotationOutcome {
        // Epochs only move forward; replays of the current or any earlier
        // epoch are no-ops.
        if self.current_epoch.is_some_and(|current| epoch <= current) {
            return RotationOutcome::AlreadyRotated;
        }

        let qualified: Vec<ValidatorInfo> = self
            .candidates
            .values()
            .filter(|c| c.electable() && permissions.is_allowed(c.address, Capability::Candidate))
            .map(|c| ValidatorInfo {
                address: c.address,
                stake: c.self_stake + votes.total_stake(c.address),
            })
            .collect();

        if qualified.is_empty() {
            let carried = match self.current_set() {
                Some(previous) => previous.carried_into(epoch),
                None => ValidatorSet::new(epoch, Vec::new()),
            };
            warn!(epoch, validators = carried.len(), "no qualified candidates");
            events.emit(GovernanceEvent::EpochRotated {
                epoch,
                validators: carried.addresses(),
                degraded: true,
            });
            self.epochs.insert(epoch, carried);
            self.current_epoch = Some(epoch);
            return RotationOutcome::NoQualifiedCandidates;
        }

        let set = ValidatorSet::elect(epoch, qualified, max_validators);
        for member in &set.members {
            if let Some(candidate) = self.candidates.get_mut(&member.address) {
                candidate.status = CandidateStatus::Active;
            }
        }
        let size = set.len();
        info!(epoch, validators = size, total_stake = %set.total_stake, "epoch rotated");
        events.emit(GovernanceEvent::EpochRotated {
            epoch,
            validators: set.addresses(),
            degraded: false,
        });
        self.epochs.insert(epoch, set);
        self.current_epoch = Some(epoch);
        RotationOutcome::Rotated { validators: size }
    }

    /// The committed set for the current epoch.
    pub fn current_validators(&self) -> ValidatorsResult<&ValidatorSet> {
        self.current_set().ok_or(ValidatorsError::EpochNotFinalized)
    }

    /// The committed set for a specific epoch, if it was rotated.
    pub fn epoch_validators(&self, epoch: u64) -> Option<&ValidatorSet> {
        self.epochs.get(&epoch)
    }

    /// Deterministic round-robin producer for `slot` over the current set.
    pub fn producer_for_slot(&self, slot: u64) -> ValidatorsResult<Address> {
        let set = self.current_validators()?;
        if set.is_empty() {
            return Err(ValidatorsError::NoQualifiedCandidates);
        }
        let idx = (slot % set.len() as u64) as usize;
        Ok(set.members[idx].address)
    }

    /// Record a missed production slot for `validator`.
    ///
    /// Reaching `jail_threshold` jails the candidate, excluding it from
    /// future elections. Returns whether this call jailed it.
    pub fn record_missed_slot(
        &mut self,
        validator: Address,
        jail_threshold: u32,
        events: &mut dyn EventSink,
    ) -> ValidatorsResult<bool> {
        let candidate = self
            .candidates
            .get_mut(&validator)
            .ok_or(ValidatorsError::UnknownCandidate(validator))?;
        candidate.missed_slots += 1;
        if candidate.status != CandidateStatus::Jailed
            && candidate.status != CandidateStatus::Removed
            && candidate.missed_slots >= jail_threshold
        {
            candidate.status = CandidateStatus::Jailed;
            let missed_slots = candidate.missed_slots;
            warn!(%validator, missed_slots, "validator jailed");
            events.emit(GovernanceEvent::ValidatorJailed {
                validator,
                missed_slots,
            });
            return Ok(true);
        }
        Ok(false)
    }

    /// Remove a candidate (governance action). Effective next rotation;
    /// already-committed sets stay untouched.
    pub fn remove_candidate(
        &mut self,
        validator: Address,
        events: &mut dyn EventSink,
    ) -> ValidatorsResult<()> {
        let candidate = self
            .candidates
            .get_mut(&validator)
            .ok_or(ValidatorsError::UnknownCandidate(validator))?;
        if candidate.status != CandidateStatus::Removed {
            candidate.status = CandidateStatus::Removed;
            info!(%validator, "candidate removed");
            events.emit(GovernanceEvent::ValidatorRemoved { validator });
        }
        Ok(())
    }

    /// Committed stake weight of `address` in the current set.
    pub fn stake_of(&self, address: Address) -> U256 {
        self.current_set()
            .map(|set| set.stake_of(&address))
            .unwrap_or_default()
    }

    /// Total committed stake of the current set.
    pub fn total_active_stake(&self) -> U256 {
        self.current_set()
            .map(|set| set.total_stake)
            .unwrap_or_default()
    }

    /// Registry view of one candidate.
    pub fn candidate(&self, address: Address) -> Option<&Candidate> {
        self.candidates.get(&address)
    }

    fn current_set(&self) -> Option<&ValidatorSet> {
        self.current_epoch.and_then(|epoch| self.epochs.get(&epoch))
    }
}

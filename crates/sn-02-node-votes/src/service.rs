//! Delegation ledger state machine.

use crate::domain::{NodeVotesError, NodeVotesResult, PendingRedeem};
use crate::ports::StakeLocker;
use shared_types::{Address, Capability, EventSink, GovernanceEvent, U256};
use sn_01_address_list::AddressList;
use std::collections::BTreeMap;
use tracing::info;

/// The delegated-vote ledger.
///
/// Invariant: `totals[candidate]` equals the sum over all delegators of
/// `delegations[delegator][candidate]`. Pending redeems are outside both.
#[derive(Debug, Default, Clone)]
pub struct NodeVotes {
    /// delegator -> candidate -> live amount
    delegations: BTreeMap<Address, BTreeMap<Address, U256>>,
    /// candidate -> sum of live delegations
    totals: BTreeMap<Address, U256>,
    /// delegator -> undelegated amounts waiting out the lock
    pending: BTreeMap<Address, Vec<PendingRedeem>>,
}

impl NodeVotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delegate `amount` from `delegator` to `candidate`.
    ///
    /// The candidate must hold the candidate capability; the amount must be
    /// lockable in the external staking ledger.
    pub fn delegate(
        &mut self,
        delegator: Address,
        candidate: Address,
        amount: U256,
        permissions: &AddressList,
        stake: &mut dyn StakeLocker,
        events: &mut dyn EventSink,
    ) -> NodeVotesResult<()> {
        if !permissions.is_allowed(candidate, Capability::Candidate) {
            return Err(NodeVotesError::NotCandidate(candidate));
        }
        if amount.is_zero() {
            return Ok(());
        }
        if !stake.check_and_lock_stake(delegator, amount) {
            return Err(NodeVotesError::InsufficientStake { delegator, amount });
        }

        let entry = self
            .delegations
            .entry(delegator)
            .or_default()
            .entry(candidate)
            .or_insert_with(U256::zero);
        *entry += amount;
        let total = self.totals.entry(candidate).or_insert_with(U256::zero);
        *total += amount;
        let new_total = *total;

        info!(%delegator, %candidate, %amount, %new_total, "stake delegated");
        events.emit(GovernanceEvent::StakeDelegated {
            delegator,
            candidate,
            amount,
            new_total,
        });
        Ok(())
    }

    /// Withdraw `amount` of `delegator`'s delegation to `candidate` into
    /// the redeem queue, unlockable `redeem_lock_blocks` after `height`.
    pub fn undelegate(
        &mut self,
        delegator: Address,
        candidate: Address,
        amount: U256,
        height: u64,
        redeem_lock_blocks: u64,
        events: &mut dyn EventSink,
    ) -> NodeVotesResult<()> {
        let have = self.delegation(delegator, candidate);
        if have < amount {
            return Err(NodeVotesError::InsufficientDelegation {
                have,
                requested: amount,
            });
        }
        if amount.is_zero() {
            return Ok(());
        }

        let by_candidate = self
            .delegations
            .get_mut(&delegator)
            .expect("checked: delegation exists");
        let remaining = have - amount;
        if remaining.is_zero() {
            by_candidate.remove(&candidate);
            if by_candidate.is_empty() {
                self.delegations.remove(&delegator);
            }
        } else {
            by_candidate.insert(candidate, remaining);
        }

        let total = self
            .totals
            .get_mut(&candidate)
            .expect("checked: candidate has total");
        *total -= amount;
        let new_total = *total;
        if new_total.is_zero() {
            self.totals.remove(&candidate);
        }

        let unlock_height = height + redeem_lock_blocks;
        self.pending.entry(delegator).or_default().push(PendingRedeem {
            candidate,
            amount,
            unlock_height,
        });

        info!(%delegator, %candidate, %amount, unlock_height, "stake undelegated");
        events.emit(GovernanceEvent::StakeUndelegated {
            delegator,
            candidate,
            amount,
            new_total,
            unlock_height,
        });
        Ok(())
    }

    /// Release every matured pending entry back to `delegator`.
    pub fn redeem(
        &mut self,
        delegator: Address,
        height: u64,
        stake: &mut dyn StakeLocker,
        events: &mut dyn EventSink,
    ) -> NodeVotesResult<U256> {
        let queue = match self.pending.get_mut(&delegator) {
            Some(queue) => queue,
            None => return Err(NodeVotesError::NothingToRedeem(delegator)),
        };

        let mut released = U256::zero();
        queue.retain(|entry| {
            if entry.matured(height) {
                released += entry.amount;
                false
            } else {
                true
            }
        });
        if queue.is_empty() {
            self.pending.remove(&delegator);
        }
        if released.is_zero() {
            return Err(NodeVotesError::NothingToRedeem(delegator));
        }

        stake.unlock_stake(delegator, released);
        info!(%delegator, amount = %released, "stake redeemed");
        events.emit(GovernanceEvent::StakeRedeemed {
            delegator,
            amount: released,
        });
        Ok(released)
    }

    /// Sum of all live delegations to `candidate`.
    pub fn total_stake(&self, candidate: Address) -> U256 {
        self.totals.get(&candidate).copied().unwrap_or_default()
    }

    /// Live delegation from `delegator` to `candidate`.
    pub fn delegation(&self, delegator: Address, candidate: Address) -> U256 {
        self.delegations
            .get(&delegator)
            .and_then(|by_candidate| by_candidate.get(&candidate))
            .copied()
            .unwrap_or_default()
    }

    /// Total queued (not yet redeemed) amount for `delegator`.
    pub fn pending_redeem(&self, delegator: Address) -> U256 {
        self.pending
            .get(&delegator)
            .map(|queue| queue.iter().fold(U256::zero(), |acc, e| acc + e.amount))
            .unwrap_or_default()
    }

    /// Queued amount already matured at `height`.
    pub fn redeemable(&self, delegator: Address, height: u64) -> U256 {
        self.pending
            .get(&delegator)
            .map(|queue| {
                queue
                    .iter()
                    .filter(|e| e.matured(height))
                    .fold(U256::zero(), |acc, e| acc + e.amount)
            })
            .unwrap_or_default()
    }
}

//! Reward accrual ledger.

use crate::domain::{RewardPolicy, SystemRewardsError, SystemRewardsResult};
use shared_types::{Address, EventSink, GovernanceEvent, U256};
use sn_03_validators::ValidatorSet;
use std::collections::BTreeMap;
use tracing::info;

/// Per-validator accrued reward balances, with per-epoch totals retained
/// for audit.
#[derive(Debug, Default, Clone)]
pub struct SystemRewards {
    accrued: BTreeMap<Address, U256>,
    epoch_totals: BTreeMap<u64, U256>,
}

/// Split `total` across `set` proportional to committed stake.
///
/// Integer-exact: each share is floored and the remainder goes to the
/// lowest-address member, so the returned amounts always sum to `total`.
/// A zero-stake set degrades to an equal split under the same remainder
/// rule.
pub fn split_proportional(total: U256, set: &ValidatorSet) -> Vec<(Address, U256)> {
    if set.is_empty() || total.is_zero() {
        return Vec::new();
    }

    let mut shares: Vec<(Address, U256)> = if set.total_stake.is_zero() {
        let count = U256::from(set.len() as u64);
        set.members
            .iter()
            .map(|m| (m.address, total / count))
            .collect()
    } else {
        set.members
            .iter()
            .map(|m| (m.address, total * m.stake / set.total_stake))
            .collect()
    };

    let distributed = shares
        .iter()
        .fold(U256::zero(), |acc, (_, amount)| acc + *amount);
    let remainder = total - distributed;
    if !remainder.is_zero() {
        let lowest = shares
            .iter_mut()
            .min_by_key(|entry| entry.0)
            .expect("set is non-empty");
        lowest.1 += remainder;
    }
    shares
}

impl SystemRewards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `validator`'s accrual. Purely additive.
    pub fn accrue(
        &mut self,
        validator: Address,
        amount: U256,
        epoch: u64,
        events: &mut dyn EventSink,
    ) {
        if amount.is_zero() {
            return;
        }
        let balance = self.accrued.entry(validator).or_insert_with(U256::zero);
        *balance += amount;
        let epoch_total = self.epoch_totals.entry(epoch).or_insert_with(U256::zero);
        *epoch_total += amount;

        events.emit(GovernanceEvent::RewardAccrued {
            validator,
            amount,
            epoch,
        });
    }

    /// Credit one block's reward and fees.
    ///
    /// The foundation share is carved off first (integer floor); the rest
    /// goes to the producer or to the whole active set, per `policy`. The
    /// credited amounts sum exactly to `block_reward + fees`.
    #[allow(clippy::too_many_arguments)]
    pub fn accrue_block(
        &mut self,
        producer: Address,
        block_reward: U256,
        fees: U256,
        set: &ValidatorSet,
        policy: RewardPolicy,
        foundation: Address,
        foundation_share_percent: u8,
        events: &mut dyn EventSink,
    ) {
        let total = block_reward + fees;
        if total.is_zero() {
            return;
        }
        let epoch = set.epoch;

        let foundation_cut = total * U256::from(foundation_share_percent) / U256::from(100u64);
        let validator_share = total - foundation_cut;
        self.accrue(foundation, foundation_cut, epoch, events);

        match policy {
            RewardPolicy::StakeProportional if !set.is_empty() => {
                for (validator, amount) in split_proportional(validator_share, set) {
                    self.accrue(validator, amount, epoch, events);
                }
            }
            // ProducerOnly, or a degenerate empty set: the sealer takes
            // the full validator share.
            _ => self.accrue(producer, validator_share, epoch, events),
        }

        info!(%producer, %total, epoch, "block reward accrued");
    }

    /// Drain `validator`'s full accrued balance.
    pub fn claim(
        &mut self,
        validator: Address,
        events: &mut dyn EventSink,
    ) -> SystemRewardsResult<U256> {
        let amount = match self.accrued.remove(&validator) {
            Some(balance) if !balance.is_zero() => balance,
            _ => return Err(SystemRewardsError::NothingToClaim(validator)),
        };

        info!(%validator, %amount, "reward claimed");
        events.emit(GovernanceEvent::RewardClaimed { validator, amount });
        Ok(amount)
    }

    /// Unclaimed balance of `validator`.
    pub fn pending(&self, validator: Address) -> U256 {
        self.accrued.get(&validator).copied().unwrap_or_default()
    }

    /// Everything accrued during `epoch`.
    pub fn epoch_accrued(&self, epoch: u64) -> U256 {
        self.epoch_totals.get(&epoch).copied().unwrap_or_default()
    }
}

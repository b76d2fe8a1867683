//! Adapters for the staking-ledger port.

use crate::ports::StakeLocker;
use shared_types::{Address, U256};
use std::collections::BTreeMap;

/// In-memory staking ledger adapter.
///
/// Backs the [`StakeLocker`] port in tests and single-process nodes. Each
/// account has a funded balance and a locked portion; locking never exceeds
/// the funded amount.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStakeLedger {
    balances: BTreeMap<Address, U256>,
    locked: BTreeMap<Address, U256>,
}

impl InMemoryStakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `owner` with spendable balance.
    pub fn fund(&mut self, owner: Address, amount: U256) {
        let entry = self.balances.entry(owner).or_insert_with(U256::zero);
        *entry = *entry + amount;
    }

    /// Currently locked stake for `owner`.
    pub fn locked_of(&self, owner: Address) -> U256 {
        self.locked.get(&owner).copied().unwrap_or_default()
    }

    /// Unlocked, spendable balance for `owner`.
    pub fn available_of(&self, owner: Address) -> U256 {
        let balance = self.balances.get(&owner).copied().unwrap_or_default();
        balance - self.locked_of(owner)
    }
}

impl StakeLocker for InMemoryStakeLedger {
    fn check_and_lock_stake(&mut self, owner: Address, amount: U256) -> bool {
        if self.available_of(owner) < amount {
            return false;
        }
        let entry = self.locked.entry(owner).or_insert_with(U256::zero);
        *entry = *entry + amount;
        true
    }

    fn unlock_stake(&mut self, owner: Address, amount: U256) {
        let entry = self.locked.entry(owner).or_insert_with(U256::zero);
        // Locks are created by this ledger, so the saturation never fires
        // in practice; it keeps the adapter total even on misuse.
        *entry = entry.saturating_sub(amount);
    }
}

//! Ports to collaborators outside this ledger.

use shared_types::{Address, U256};

/// External staking/balance ledger.
///
/// The delegation ledger never re-implements balance accounting; it trusts
/// an amount only after this port has locked it. Calls are synchronous,
/// in-process and deterministic, per the chain's serialized execution
/// model.
pub trait StakeLocker {
    /// Verify `owner` has `amount` of unlocked stake and lock it.
    ///
    /// Returns `false` (and locks nothing) when the balance is
    /// insufficient.
    fn check_and_lock_stake(&mut self, owner: Address, amount: U256) -> bool;

    /// Release previously locked stake after a matured redeem.
    fn unlock_stake(&mut self, owner: Address, amount: U256);
}

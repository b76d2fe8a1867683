//! Delegation entities.

use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

/// An undelegated amount waiting out the redeem lock.
///
/// Created by `undelegate`, drained by `redeem` once `unlock_height` is
/// reached. The candidate is retained for auditability only; the amount no
/// longer counts toward its total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRedeem {
    /// Candidate the stake was withdrawn from.
    pub candidate: Address,
    /// Amount waiting to unlock.
    pub amount: U256,
    /// First block height at which the amount may be redeemed.
    pub unlock_height: u64,
}

impl PendingRedeem {
    /// Has the lock period elapsed at `height`?
    pub fn matured(&self, height: u64) -> bool {
        height >= self.unlock_height
    }
}

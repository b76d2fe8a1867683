//! Reward entities.

use serde::{Deserialize, Serialize};

/// How the per-block validator share is credited.
///
/// A genesis policy choice, fixed for the chain's lifetime unless changed
/// by governance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    /// The block's producer receives the full validator share.
    ProducerOnly,
    /// The share is split across the active set proportional to each
    /// validator's committed stake.
    StakeProportional,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        RewardPolicy::StakeProportional
    }
}

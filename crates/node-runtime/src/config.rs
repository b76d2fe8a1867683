//! Genesis configuration for the governance runtime.

use serde::{Deserialize, Serialize};
use shared_types::{Address, ComponentRegistry, U256};
use sn_04_proposals::{ParameterUpdate, QuorumFraction};
use sn_05_system_rewards::RewardPolicy;

/// Chain parameters driving the governance state machines.
///
/// Seeded at genesis; the `ParameterUpdate` proposal action changes the
/// governable subset at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainParams {
    /// Blocks per epoch.
    pub epoch_length: u64,
    /// Maximum validators per committed set.
    pub max_validators: u32,
    /// Flat reward minted per block, on top of collected fees.
    pub block_reward: U256,
    /// Minimum candidate self-stake deposit.
    pub min_candidate_deposit: U256,
    /// Blocks an undelegated amount waits before redemption.
    pub redeem_lock_blocks: u64,
    /// Missed slots before a candidate is jailed.
    pub jail_threshold: u32,
    /// Proposal quorum over the snapshotted total stake.
    pub quorum: QuorumFraction,
    /// Percentage of each block's reward carved off to the foundation.
    pub foundation_share_percent: u8,
    /// How the validator share of rewards is credited.
    pub reward_policy: RewardPolicy,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            epoch_length: 20,
            max_validators: 99,
            block_reward: U256::from(1_000_000_000_000_000_000u64),
            min_candidate_deposit: U256::from(1_000u64)
                * U256::from(1_000_000_000_000_000_000u64),
            redeem_lock_blocks: 28_800,
            jail_threshold: 48,
            quorum: QuorumFraction::default(),
            foundation_share_percent: 5,
            reward_policy: RewardPolicy::default(),
        }
    }
}

impl ChainParams {
    /// Epoch a block height belongs to.
    pub fn epoch_of(&self, height: u64) -> u64 {
        height / self.epoch_length
    }

    /// Is `height` an epoch boundary (excluding genesis)?
    pub fn is_epoch_boundary(&self, height: u64) -> bool {
        height > 0 && height % self.epoch_length == 0
    }

    /// Apply one governed parameter change.
    pub fn apply(&mut self, update: ParameterUpdate) {
        match update {
            ParameterUpdate::MaxValidators(value) => self.max_validators = value,
            ParameterUpdate::MinCandidateDeposit(value) => self.min_candidate_deposit = value,
            ParameterUpdate::RedeemLockBlocks(value) => self.redeem_lock_blocks = value,
            ParameterUpdate::JailThreshold(value) => self.jail_threshold = value,
            ParameterUpdate::FoundationSharePercent(value) => {
                self.foundation_share_percent = value
            }
        }
    }
}

/// One genesis validator: pre-authorized, pre-funded, registered during
/// initialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisValidator {
    pub address: Address,
    pub deposit: U256,
}

/// The genesis document every node consumes at start-up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    #[serde(default)]
    pub params: ChainParams,
    /// Well-known addresses locating each governance ledger.
    #[serde(default)]
    pub registry: ComponentRegistry,
    /// Initial holder of the admin capability.
    pub admin: Address,
    /// Recipient of the foundation reward share.
    pub foundation: Address,
    /// Initial validator set; must be non-empty and within the maximum.
    #[serde(default)]
    pub validators: Vec<GenesisValidator>,
}

impl GenesisConfig {
    /// Parse a genesis document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

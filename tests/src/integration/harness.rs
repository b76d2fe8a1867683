//! Shared fixtures for the integration flows.

use node_runtime::{ChainParams, GenesisConfig, GenesisValidator, GovernanceRuntime};
use shared_types::{Address, U256};
use sn_02_node_votes::InMemoryStakeLedger;
use sn_04_proposals::QuorumFraction;
use sn_05_system_rewards::RewardPolicy;

/// Deterministic test address.
pub fn addr(tag: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = tag;
    Address(bytes)
}

/// Opt-in log output for debugging a failing flow:
/// `RUST_LOG=debug cargo test -p sn-tests`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const ADMIN: u8 = 100;
pub const FOUNDATION: u8 = 101;

/// Short epochs and small thresholds so flows stay readable.
pub fn test_params() -> ChainParams {
    ChainParams {
        epoch_length: 10,
        max_validators: 5,
        block_reward: U256::from(1_000u64),
        min_candidate_deposit: U256::from(100u64),
        redeem_lock_blocks: 20,
        jail_threshold: 3,
        quorum: QuorumFraction::default(),
        foundation_share_percent: 5,
        reward_policy: RewardPolicy::StakeProportional,
    }
}

/// Genesis with the given `(address_tag, deposit)` validators, plus a
/// stake ledger pre-funded for candidate tags 1..30 and delegator tags
/// 50..60.
pub fn boot(
    validators: &[(u8, u64)],
    params: ChainParams,
) -> GovernanceRuntime<InMemoryStakeLedger> {
    let mut stake = InMemoryStakeLedger::new();
    for tag in (1u8..30).chain(50..60) {
        stake.fund(addr(tag), U256::from(1_000_000u64));
    }
    let validators = validators
        .iter()
        .map(|&(tag, deposit)| {
            stake.fund(addr(tag), U256::from(deposit));
            GenesisValidator {
                address: addr(tag),
                deposit: U256::from(deposit),
            }
        })
        .collect();

    let genesis = GenesisConfig {
        params,
        registry: Default::default(),
        admin: addr(ADMIN),
        foundation: addr(FOUNDATION),
        validators,
    };
    GovernanceRuntime::new(genesis, stake).expect("genesis must initialize")
}

/// Advance the chain `blocks` times from `start`, every slot sealed by its
/// scheduled producer, with zero fees. Returns the next height.
pub fn advance(
    runtime: &GovernanceRuntime<InMemoryStakeLedger>,
    start: u64,
    blocks: u64,
) -> u64 {
    for height in start..start + blocks {
        let producer = runtime
            .producer_for_slot(height)
            .expect("schedule must exist");
        runtime
            .on_block_finalized(height, producer, U256::zero())
            .expect("block hook must succeed");
    }
    start + blocks
}

//! # Reward Flow Tests
//!
//! Reward conservation across whole epochs through the runtime: every
//! token accrued is claimable exactly once, under both distribution
//! policies, with the foundation share carved off first.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{addr, advance, boot, test_params, FOUNDATION};
    use node_runtime::RuntimeError;
    use shared_types::{GovernanceEvent, U256};
    use sn_05_system_rewards::{RewardPolicy, SystemRewardsError};

    #[test]
    fn test_epoch_accrual_conserves_every_token() {
        // Stakes 700/300 with 5% foundation share and awkward fee values:
        // rounding must never leak.
        let runtime = boot(&[(1, 700), (2, 300)], test_params());

        let mut expected = U256::zero();
        for height in 1..=10u64 {
            let producer = runtime.producer_for_slot(height).unwrap();
            let fees = U256::from(height * 7 + 1);
            runtime.on_block_finalized(height, producer, fees).unwrap();
            expected += U256::from(1_000u64) + fees;
        }

        let credited = runtime.pending_reward(addr(1))
            + runtime.pending_reward(addr(2))
            + runtime.pending_reward(addr(FOUNDATION));
        assert_eq!(credited, expected);
        assert_eq!(runtime.epoch_accrued(0), expected);
    }

    #[test]
    fn test_proportional_split_follows_stake() {
        let runtime = boot(&[(1, 700), (2, 300)], test_params());

        // One block, reward 1000, no fees: 50 foundation, 950 split 7:3.
        let producer = runtime.producer_for_slot(1).unwrap();
        runtime
            .on_block_finalized(1, producer, U256::zero())
            .unwrap();

        assert_eq!(runtime.pending_reward(addr(FOUNDATION)), U256::from(50u64));
        // 950 * 700/1000 = 665; 950 * 300/1000 = 285; remainder 0.
        assert_eq!(runtime.pending_reward(addr(1)), U256::from(665u64));
        assert_eq!(runtime.pending_reward(addr(2)), U256::from(285u64));
    }

    #[test]
    fn test_producer_only_policy_pays_the_sealer() {
        let mut params = test_params();
        params.reward_policy = RewardPolicy::ProducerOnly;
        params.foundation_share_percent = 0;
        let runtime = boot(&[(1, 700), (2, 300)], params);

        runtime
            .on_block_finalized(1, addr(2), U256::from(500u64))
            .unwrap();

        assert_eq!(runtime.pending_reward(addr(2)), U256::from(1_500u64));
        assert_eq!(runtime.pending_reward(addr(1)), U256::zero());
        assert_eq!(runtime.pending_reward(addr(FOUNDATION)), U256::zero());
    }

    #[test]
    fn test_claim_drains_once() {
        let runtime = boot(&[(1, 700), (2, 300)], test_params());
        advance(&runtime, 1, 5);

        let balance = runtime.pending_reward(addr(1));
        assert!(balance > U256::zero());

        assert_eq!(runtime.claim_rewards(addr(1)).unwrap(), balance);
        assert_eq!(runtime.pending_reward(addr(1)), U256::zero());
        assert_eq!(
            runtime.claim_rewards(addr(1)).unwrap_err(),
            RuntimeError::SystemRewards(SystemRewardsError::NothingToClaim(addr(1)))
        );

        // Accrual resumes after a claim.
        advance(&runtime, 6, 2);
        assert!(runtime.pending_reward(addr(1)) > U256::zero());
    }

    #[test]
    fn test_accrual_and_claim_events_balance() {
        let runtime = boot(&[(1, 700), (2, 300)], test_params());
        advance(&runtime, 1, 10);
        for tag in [1u8, 2, FOUNDATION] {
            runtime.claim_rewards(addr(tag)).unwrap();
        }

        let mut accrued = U256::zero();
        let mut claimed = U256::zero();
        for event in runtime.events() {
            match event {
                GovernanceEvent::RewardAccrued { amount, .. } => accrued += amount,
                GovernanceEvent::RewardClaimed { amount, .. } => claimed += amount,
                _ => {}
            }
        }
        assert_eq!(accrued, claimed);
        assert_eq!(accrued, U256::from(10_000u64));
    }
}

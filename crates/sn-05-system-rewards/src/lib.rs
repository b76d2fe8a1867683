//! # sn-05-system-rewards
//!
//! Reward accrual and distribution for Stakenet validators.
//!
//! Every block, the runtime feeds the block reward plus collected fees into
//! [`SystemRewards::accrue_block`]. A configured percentage goes to the
//! foundation address; the rest is credited to validators according to the
//! genesis [`RewardPolicy`]: everything to the producer, or split across
//! the active set proportional to committed stake.
//!
//! All arithmetic is integer-exact: the proportional split floors each
//! share and assigns the remainder to the lowest-address validator, so the
//! credited amounts always sum to the accrued input. No value is created
//! or destroyed by rounding.
//!
//! Validators drain their balance with [`SystemRewards::claim`].

pub mod domain;
pub mod service;

pub use domain::{RewardPolicy, SystemRewardsError, SystemRewardsResult};
pub use service::{split_proportional, SystemRewards};

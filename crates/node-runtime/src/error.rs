//! Error types for the governance runtime.

use shared_types::Address;
use sn_01_address_list::AddressListError;
use sn_02_node_votes::NodeVotesError;
use sn_03_validators::ValidatorsError;
use sn_04_proposals::ProposalsError;
use sn_05_system_rewards::SystemRewardsError;
use thiserror::Error;

/// Any revert reason a governance transaction can surface.
///
/// Component errors pass through unchanged; the runtime adds only the
/// genesis validation failures it detects itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Genesis listed zero validators or more than the configured maximum.
    #[error("Invalid genesis validators: got {got}, allowed 1..={max}")]
    InvalidGenesisValidators { got: usize, max: u32 },

    /// A genesis validator could not be registered.
    #[error("Genesis registration failed for {address}: {source}")]
    GenesisRegistration {
        address: Address,
        source: ValidatorsError,
    },

    #[error(transparent)]
    AddressList(#[from] AddressListError),

    #[error(transparent)]
    NodeVotes(#[from] NodeVotesError),

    #[error(transparent)]
    Validators(#[from] ValidatorsError),

    #[error(transparent)]
    Proposals(#[from] ProposalsError),

    #[error(transparent)]
    SystemRewards(#[from] SystemRewardsError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

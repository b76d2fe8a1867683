//! The governance runtime: ledgers wired into the block lifecycle.

use crate::config::{ChainParams, GenesisConfig};
use crate::error::{RuntimeError, RuntimeResult};
use parking_lot::RwLock;
use shared_types::{
    Address, Capability, ComponentRegistry, GovernanceEvent, InMemoryEventLog, U256,
};
use sn_01_address_list::AddressList;
use sn_02_node_votes::{NodeVotes, StakeLocker};
use sn_03_validators::{Candidate, RotationOutcome, Validators};
use sn_04_proposals::{Proposal, ProposalAction, ProposalStatus, Proposals};
use sn_05_system_rewards::SystemRewards;
use tracing::info;

/// Everything a node mutates while replaying governance transactions.
///
/// One lock guards the whole bundle: block processing is serialized by
/// protocol order, so writers never contend; the lock exists for the
/// read-mostly RPC surface.
struct LedgerState<S> {
    params: ChainParams,
    permissions: AddressList,
    votes: NodeVotes,
    validators: Validators,
    proposals: Proposals,
    rewards: SystemRewards,
    stake: S,
    events: InMemoryEventLog,
}

/// The five governance ledgers plus the block-lifecycle glue.
///
/// Mutating entrypoints mirror the transaction surface the execution layer
/// dispatches into; [`GovernanceRuntime::on_block_finalized`] is invoked
/// once per block by the production logic.
pub struct GovernanceRuntime<S: StakeLocker> {
    state: RwLock<LedgerState<S>>,
    registry: ComponentRegistry,
    foundation: Address,
}

impl<S: StakeLocker> core::fmt::Debug for GovernanceRuntime<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GovernanceRuntime")
            .field("foundation", &self.foundation)
            .finish_non_exhaustive()
    }
}

impl<S: StakeLocker> GovernanceRuntime<S> {
    /// Initialize the governance state from a genesis document.
    ///
    /// Seeds the admin and candidate grants, registers and elects the
    /// genesis validators (epoch 0). The stake ledger must already hold
    /// each genesis validator's deposit.
    pub fn new(genesis: GenesisConfig, stake: S) -> RuntimeResult<Self> {
        let params = genesis.params;
        if genesis.validators.is_empty() || genesis.validators.len() > params.max_validators as usize
        {
            return Err(RuntimeError::InvalidGenesisValidators {
                got: genesis.validators.len(),
                max: params.max_validators,
            });
        }

        let mut state = LedgerState {
            params,
            permissions: AddressList::new(),
            votes: NodeVotes::new(),
            validators: Validators::new(),
            proposals: Proposals::new(),
            rewards: SystemRewards::new(),
            stake,
            events: InMemoryEventLog::new(),
        };

        state
            .permissions
            .apply_grant(genesis.admin, Capability::Admin, &mut state.events);
        for validator in &genesis.validators {
            state.permissions.apply_grant(
                validator.address,
                Capability::Candidate,
                &mut state.events,
            );
            state
                .validators
                .register_candidate(
                    validator.address,
                    validator.deposit,
                    params.min_candidate_deposit,
                    &state.permissions,
                    &mut state.stake,
                    &mut state.events,
                )
                .map_err(|source| RuntimeError::GenesisRegistration {
                    address: validator.address,
                    source,
                })?;
        }

        let outcome = state.validators.rotate_epoch(
            0,
            &state.permissions,
            &state.votes,
            params.max_validators as usize,
            &mut state.events,
        );
        info!(validators = genesis.validators.len(), ?outcome, "genesis initialized");

        Ok(Self {
            state: RwLock::new(state),
            registry: genesis.registry,
            foundation: genesis.foundation,
        })
    }

    // === BLOCK LIFECYCLE ===

    /// Per-block hook, called once after the block's transactions applied.
    ///
    /// In order: missed-producer punishment, reward accrual for the block,
    /// and, on an epoch boundary, the rotation that commits the next
    /// validator set from fresh delegation totals.
    pub fn on_block_finalized(
        &self,
        height: u64,
        producer: Address,
        fees: U256,
    ) -> RuntimeResult<()> {
        let mut guard = self.state.write();
        let st = &mut *guard;

        // The scheduled producer skipped its slot: someone else sealed.
        if let Ok(scheduled) = st.validators.producer_for_slot(height) {
            if scheduled != producer {
                st.validators.record_missed_slot(
                    scheduled,
                    st.params.jail_threshold,
                    &mut st.events,
                )?;
            }
        }

        if let Ok(set) = st.validators.current_validators() {
            st.rewards.accrue_block(
                producer,
                st.params.block_reward,
                fees,
                set,
                st.params.reward_policy,
                self.foundation,
                st.params.foundation_share_percent,
                &mut st.events,
            );
        }

        if st.params.is_epoch_boundary(height) {
            let epoch = st.params.epoch_of(height);
            let outcome = st.validators.rotate_epoch(
                epoch,
                &st.permissions,
                &st.votes,
                st.params.max_validators as usize,
                &mut st.events,
            );
            if outcome != RotationOutcome::AlreadyRotated {
                info!(height, epoch, ?outcome, "epoch boundary processed");
            }
        }
        Ok(())
    }

    // === TRANSACTION ENTRYPOINTS ===

    /// Admin grant of a capability.
    pub fn grant(
        &self,
        caller: Address,
        address: Address,
        capability: Capability,
    ) -> RuntimeResult<()> {
        let st = &mut *self.state.write();
        st.permissions
            .grant(caller, address, capability, &mut st.events)?;
        Ok(())
    }

    /// Admin revocation of a capability.
    pub fn revoke(
        &self,
        caller: Address,
        address: Address,
        capability: Capability,
    ) -> RuntimeResult<()> {
        let st = &mut *self.state.write();
        st.permissions
            .revoke(caller, address, capability, &mut st.events)?;
        Ok(())
    }

    /// Delegate stake to a candidate.
    pub fn delegate(
        &self,
        delegator: Address,
        candidate: Address,
        amount: U256,
    ) -> RuntimeResult<()> {
        let st = &mut *self.state.write();
        st.votes.delegate(
            delegator,
            candidate,
            amount,
            &st.permissions,
            &mut st.stake,
            &mut st.events,
        )?;
        Ok(())
    }

    /// Undelegate stake into the redeem queue.
    pub fn undelegate(
        &self,
        delegator: Address,
        candidate: Address,
        amount: U256,
        height: u64,
    ) -> RuntimeResult<()> {
        let st = &mut *self.state.write();
        st.votes.undelegate(
            delegator,
            candidate,
            amount,
            height,
            st.params.redeem_lock_blocks,
            &mut st.events,
        )?;
        Ok(())
    }

    /// Release matured undelegations.
    pub fn redeem(&self, delegator: Address, height: u64) -> RuntimeResult<U256> {
        let st = &mut *self.state.write();
        let released = st
            .votes
            .redeem(delegator, height, &mut st.stake, &mut st.events)?;
        Ok(released)
    }

    /// Register a validator candidate with a self-stake deposit.
    pub fn register_candidate(&self, candidate: Address, deposit: U256) -> RuntimeResult<()> {
        let st = &mut *self.state.write();
        st.validators.register_candidate(
            candidate,
            deposit,
            st.params.min_candidate_deposit,
            &st.permissions,
            &mut st.stake,
            &mut st.events,
        )?;
        Ok(())
    }

    /// Submit a governance proposal.
    pub fn submit_proposal(
        &self,
        proposer: Address,
        action: ProposalAction,
        voting_period_blocks: u64,
        height: u64,
    ) -> RuntimeResult<u64> {
        let st = &mut *self.state.write();
        let epoch = st.params.epoch_of(height);
        let id = st.proposals.submit(
            proposer,
            action,
            voting_period_blocks,
            height,
            epoch,
            &st.permissions,
            &st.validators,
            &mut st.events,
        )?;
        Ok(id)
    }

    /// Cast or replace a vote on an open proposal.
    pub fn vote(
        &self,
        id: u64,
        voter: Address,
        support: bool,
        height: u64,
    ) -> RuntimeResult<()> {
        let st = &mut *self.state.write();
        st.proposals
            .vote(id, voter, support, height, &st.validators, &mut st.events)?;
        Ok(())
    }

    /// Resolve an open proposal after its deadline.
    pub fn tally(&self, id: u64, height: u64) -> RuntimeResult<ProposalStatus> {
        let st = &mut *self.state.write();
        let status = st
            .proposals
            .tally(id, height, st.params.quorum, &mut st.events)?;
        Ok(status)
    }

    /// Apply a passed proposal's action exactly once.
    pub fn execute_proposal(&self, id: u64) -> RuntimeResult<()> {
        let st = &mut *self.state.write();
        let LedgerState {
            params,
            permissions,
            validators,
            proposals,
            events,
            ..
        } = st;

        proposals.execute_with(id, events, |action, events| match action {
            ProposalAction::PermissionChange {
                address,
                capability,
                grant,
            } => {
                if *grant {
                    permissions.apply_grant(*address, *capability, events);
                } else {
                    permissions.apply_revoke(*address, *capability, events);
                }
                Ok(())
            }
            ProposalAction::ParameterUpdate(update) => {
                params.apply(*update);
                Ok(())
            }
            ProposalAction::ValidatorRemoval { address } => {
                validators.remove_candidate(*address, events)
            }
        })?;
        Ok(())
    }

    /// Drain a validator's accrued rewards.
    pub fn claim_rewards(&self, validator: Address) -> RuntimeResult<U256> {
        let st = &mut *self.state.write();
        let amount = st.rewards.claim(validator, &mut st.events)?;
        Ok(amount)
    }

    // === READ SURFACE ===

    /// Ordered addresses of the current committed set.
    pub fn current_validators(&self) -> RuntimeResult<Vec<Address>> {
        let st = self.state.read();
        Ok(st.validators.current_validators()?.addresses())
    }

    /// Scheduled producer for a slot.
    pub fn producer_for_slot(&self, slot: u64) -> RuntimeResult<Address> {
        let st = self.state.read();
        Ok(st.validators.producer_for_slot(slot)?)
    }

    /// Delegated total for a candidate.
    pub fn total_stake(&self, candidate: Address) -> U256 {
        self.state.read().votes.total_stake(candidate)
    }

    /// Live delegation between two parties.
    pub fn delegation(&self, delegator: Address, candidate: Address) -> U256 {
        self.state.read().votes.delegation(delegator, candidate)
    }

    /// Unclaimed reward balance.
    pub fn pending_reward(&self, validator: Address) -> U256 {
        self.state.read().rewards.pending(validator)
    }

    /// Everything accrued during an epoch.
    pub fn epoch_accrued(&self, epoch: u64) -> U256 {
        self.state.read().rewards.epoch_accrued(epoch)
    }

    /// Snapshot of one proposal.
    pub fn proposal(&self, id: u64) -> Option<Proposal> {
        self.state.read().proposals.get(id).cloned()
    }

    /// Snapshot of one candidate's registry entry.
    pub fn candidate(&self, address: Address) -> Option<Candidate> {
        self.state.read().validators.candidate(address).cloned()
    }

    /// Does `address` hold `capability`?
    pub fn is_allowed(&self, address: Address, capability: Capability) -> bool {
        self.state.read().permissions.is_allowed(address, capability)
    }

    /// Current chain parameters.
    pub fn params(&self) -> ChainParams {
        self.state.read().params
    }

    /// The genesis component registry.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Copy of the event log, in emission order.
    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.state.read().events.records().to_vec()
    }

    /// Inspect the stake ledger (tests, RPC).
    pub fn with_stake<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.read().stake)
    }
}

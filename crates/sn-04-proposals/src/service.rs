//! Proposal workflow state machine.

use crate::domain::{
    Proposal, ProposalAction, ProposalStatus, ProposalsError, ProposalsResult, QuorumFraction,
    StakeSnapshot, Vote,
};
use shared_types::{Address, Capability, EventSink, GovernanceEvent, U256};
use sn_01_address_list::AddressList;
use sn_03_validators::Validators;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// The proposal ledger.
///
/// Proposal ids are a monotonic counter starting at 1; resolved proposals
/// are retained forever for auditability.
#[derive(Debug, Clone)]
pub struct Proposals {
    proposals: BTreeMap<u64, Proposal>,
    next_id: u64,
}

impl Default for Proposals {
    fn default() -> Self {
        Self::new()
    }
}

impl Proposals {
    pub fn new() -> Self {
        Self {
            proposals: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Submit a proposal, opening its voting window.
    ///
    /// The proposer must be a current validator or hold the proposer
    /// capability.
    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        &mut self,
        proposer: Address,
        action: ProposalAction,
        voting_period_blocks: u64,
        height: u64,
        epoch: u64,
        permissions: &AddressList,
        validators: &Validators,
        events: &mut dyn EventSink,
    ) -> ProposalsResult<u64> {
        let is_validator = validators
            .current_validators()
            .map(|set| set.contains(&proposer))
            .unwrap_or(false);
        if !is_validator && !permissions.is_allowed(proposer, Capability::Proposer) {
            return Err(ProposalsError::Unauthorized(proposer));
        }

        let id = self.next_id;
        self.next_id += 1;
        let deadline = height + voting_period_blocks;
        self.proposals.insert(
            id,
            Proposal {
                id,
                proposer,
                action,
                created_epoch: epoch,
                deadline,
                status: ProposalStatus::Open,
                votes: BTreeMap::new(),
                votes_for: U256::zero(),
                votes_against: U256::zero(),
                snapshot: None,
            },
        );

        info!(id, %proposer, deadline, "proposal submitted");
        events.emit(GovernanceEvent::ProposalSubmitted {
            id,
            proposer,
            deadline,
        });
        Ok(id)
    }

    /// Cast or replace a weighted vote.
    ///
    /// The voter must be a current validator. The first vote on a proposal
    /// freezes the stake snapshot; every vote weight, including this one,
    /// comes from that snapshot.
    pub fn vote(
        &mut self,
        id: u64,
        voter: Address,
        support: bool,
        height: u64,
        validators: &Validators,
        events: &mut dyn EventSink,
    ) -> ProposalsResult<()> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(ProposalsError::UnknownProposal(id))?;
        if !proposal.voting_open_at(height) {
            return Err(ProposalsError::VotingClosed(id));
        }

        let set = validators
            .current_validators()
            .map_err(|_| ProposalsError::Unauthorized(voter))?;
        if !set.contains(&voter) {
            return Err(ProposalsError::Unauthorized(voter));
        }

        let weight = match &proposal.snapshot {
            Some(snapshot) => snapshot.weight_of(&voter),
            None => set.stake_of(&voter),
        };
        if weight.is_zero() {
            // Elected after the snapshot was frozen; no voice on this one.
            return Err(ProposalsError::Unauthorized(voter));
        }
        // First valid vote freezes the weight table for the proposal's
        // whole life.
        if proposal.snapshot.is_none() {
            proposal.snapshot = Some(StakeSnapshot::of(set));
        }

        // Replace, never add: back out any earlier vote first.
        if let Some(previous) = proposal.votes.insert(voter, Vote { weight, support }) {
            if previous.support {
                proposal.votes_for -= previous.weight;
            } else {
                proposal.votes_against -= previous.weight;
            }
        }
        if support {
            proposal.votes_for += weight;
        } else {
            proposal.votes_against += weight;
        }

        info!(id, %voter, support, %weight, "vote cast");
        events.emit(GovernanceEvent::VoteCast {
            id,
            voter,
            support,
            weight,
        });
        Ok(())
    }

    /// Resolve an open proposal once its deadline has passed.
    ///
    /// Zero votes expire the proposal; otherwise it passes exactly when
    /// the for-weight clears `quorum` over the snapshotted total.
    pub fn tally(
        &mut self,
        id: u64,
        height: u64,
        quorum: QuorumFraction,
        events: &mut dyn EventSink,
    ) -> ProposalsResult<ProposalStatus> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(ProposalsError::UnknownProposal(id))?;
        if proposal.status != ProposalStatus::Open {
            return Err(ProposalsError::AlreadyResolved {
                id,
                status: proposal.status,
            });
        }
        if height < proposal.deadline {
            return Err(ProposalsError::VotingNotEnded {
                id,
                deadline: proposal.deadline,
                height,
            });
        }

        let resolved = match &proposal.snapshot {
            None => ProposalStatus::Expired,
            Some(snapshot) => {
                if proposal.votes.is_empty() {
                    ProposalStatus::Expired
                } else if quorum.reached(proposal.votes_for, snapshot.total()) {
                    ProposalStatus::Passed
                } else {
                    ProposalStatus::Rejected
                }
            }
        };
        proposal.status = resolved;

        info!(id, status = resolved.tag(), "proposal resolved");
        events.emit(GovernanceEvent::ProposalResolved {
            id,
            status: resolved.tag().to_string(),
        });
        Ok(resolved)
    }

    /// Apply a passed proposal's action exactly once.
    ///
    /// `dispatch` performs the actual mutation (permission change,
    /// parameter update, removal). Only when it succeeds does the proposal
    /// transition to Executed; on failure it stays Passed and the call may
    /// be retried with a corrected environment.
    pub fn execute_with<E: fmt::Display>(
        &mut self,
        id: u64,
        events: &mut dyn EventSink,
        dispatch: impl FnOnce(&ProposalAction, &mut dyn EventSink) -> Result<(), E>,
    ) -> ProposalsResult<()> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(ProposalsError::UnknownProposal(id))?;
        match proposal.status {
            ProposalStatus::Executed => return Err(ProposalsError::AlreadyExecuted(id)),
            ProposalStatus::Passed => {}
            _ => return Err(ProposalsError::NotPassed(id)),
        }

        dispatch(&proposal.action, events).map_err(|e| ProposalsError::ExecutionFailed {
            id,
            reason: e.to_string(),
        })?;
        proposal.status = ProposalStatus::Executed;

        info!(id, "proposal executed");
        events.emit(GovernanceEvent::ProposalExecuted { id });
        Ok(())
    }

    /// Read one proposal.
    pub fn get(&self, id: u64) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    /// All proposals in id order.
    pub fn all(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }
}

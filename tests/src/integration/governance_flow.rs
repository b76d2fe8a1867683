//! # Governance Flow Tests
//!
//! End-to-end proposal lifecycles through the runtime: submission by
//! validators, weighted voting against the frozen snapshot, tally at the
//! deadline, and one-shot execution that mutates the permission registry,
//! chain parameters or candidate registry.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{addr, boot, test_params, ADMIN};
    use node_runtime::RuntimeError;
    use shared_types::{Capability, GovernanceEvent, U256};
    use sn_01_address_list::AddressListError;
    use sn_04_proposals::{
        ParameterUpdate, ProposalAction, ProposalStatus, ProposalsError,
    };

    fn permission_grant(tag: u8, capability: Capability) -> ProposalAction {
        ProposalAction::PermissionChange {
            address: addr(tag),
            capability,
            grant: true,
        }
    }

    #[test]
    fn test_proposal_passes_quorum_and_executes_once() {
        // Stakes 500/300/200: validators 1+2 form a strict majority.
        let runtime = boot(&[(1, 500), (2, 300), (3, 200)], test_params());

        let id = runtime
            .submit_proposal(addr(1), permission_grant(40, Capability::Proposer), 10, 0)
            .unwrap();
        runtime.vote(id, addr(1), true, 5).unwrap();
        runtime.vote(id, addr(2), true, 5).unwrap();

        // Deadline is height 10; tallying at 11 resolves Passed.
        assert_eq!(
            runtime.tally(id, 11).unwrap(),
            ProposalStatus::Passed
        );

        runtime.execute_proposal(id).unwrap();
        assert!(runtime.is_allowed(addr(40), Capability::Proposer));
        assert_eq!(
            runtime.proposal(id).unwrap().status,
            ProposalStatus::Executed
        );

        // Replay fails and changes nothing.
        let err = runtime.execute_proposal(id).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Proposals(ProposalsError::AlreadyExecuted(id))
        );
    }

    #[test]
    fn test_rejected_and_expired_proposals_never_execute() {
        let runtime = boot(&[(1, 500), (2, 300), (3, 200)], test_params());

        // 500 of 1000 misses the strict majority.
        let rejected = runtime
            .submit_proposal(addr(1), permission_grant(40, Capability::Proposer), 10, 0)
            .unwrap();
        runtime.vote(rejected, addr(1), true, 1).unwrap();
        assert_eq!(
            runtime.tally(rejected, 10).unwrap(),
            ProposalStatus::Rejected
        );

        // Nobody votes at all.
        let expired = runtime
            .submit_proposal(addr(2), permission_grant(41, Capability::Proposer), 10, 0)
            .unwrap();
        assert_eq!(
            runtime.tally(expired, 10).unwrap(),
            ProposalStatus::Expired
        );

        for id in [rejected, expired] {
            let err = runtime.execute_proposal(id).unwrap_err();
            assert_eq!(
                err,
                RuntimeError::Proposals(ProposalsError::NotPassed(id))
            );
        }
        assert!(!runtime.is_allowed(addr(40), Capability::Proposer));
        assert!(!runtime.is_allowed(addr(41), Capability::Proposer));
    }

    #[test]
    fn test_parameter_update_takes_effect() {
        let runtime = boot(&[(1, 600), (2, 400)], test_params());

        let id = runtime
            .submit_proposal(
                addr(1),
                ProposalAction::ParameterUpdate(ParameterUpdate::MaxValidators(1)),
                10,
                0,
            )
            .unwrap();
        runtime.vote(id, addr(1), true, 1).unwrap();
        runtime.tally(id, 10).unwrap();
        runtime.execute_proposal(id).unwrap();

        assert_eq!(runtime.params().max_validators, 1);

        // The shrunken maximum binds at the next rotation.
        let producer = runtime.producer_for_slot(10).unwrap();
        runtime
            .on_block_finalized(10, producer, U256::zero())
            .unwrap();
        assert_eq!(runtime.current_validators().unwrap(), vec![addr(1)]);
    }

    #[test]
    fn test_validator_removal_via_governance() {
        let runtime = boot(&[(1, 600), (2, 400)], test_params());

        let id = runtime
            .submit_proposal(
                addr(1),
                ProposalAction::ValidatorRemoval { address: addr(2) },
                10,
                0,
            )
            .unwrap();
        runtime.vote(id, addr(1), true, 1).unwrap();
        runtime.tally(id, 10).unwrap();
        runtime.execute_proposal(id).unwrap();

        // Committed epoch-0 set is untouched; the next rotation drops it.
        assert_eq!(
            runtime.current_validators().unwrap(),
            vec![addr(1), addr(2)]
        );
        let producer = runtime.producer_for_slot(10).unwrap();
        runtime
            .on_block_finalized(10, producer, U256::zero())
            .unwrap();
        assert_eq!(runtime.current_validators().unwrap(), vec![addr(1)]);
    }

    #[test]
    fn test_admin_path_and_governance_path_meet_in_registry() {
        let runtime = boot(&[(1, 600), (2, 400)], test_params());

        // Direct admin grant.
        runtime
            .grant(addr(ADMIN), addr(42), Capability::Candidate)
            .unwrap();
        assert!(runtime.is_allowed(addr(42), Capability::Candidate));

        // Non-admin cannot.
        let err = runtime
            .grant(addr(1), addr(43), Capability::Candidate)
            .unwrap_err();
        assert_eq!(
            err,
            RuntimeError::AddressList(AddressListError::Unauthorized { caller: addr(1) })
        );

        // Governance revokes what the admin granted.
        let id = runtime
            .submit_proposal(
                addr(1),
                ProposalAction::PermissionChange {
                    address: addr(42),
                    capability: Capability::Candidate,
                    grant: false,
                },
                10,
                0,
            )
            .unwrap();
        runtime.vote(id, addr(1), true, 1).unwrap();
        runtime.tally(id, 10).unwrap();
        runtime.execute_proposal(id).unwrap();
        assert!(!runtime.is_allowed(addr(42), Capability::Candidate));
    }

    #[test]
    fn test_event_log_records_full_proposal_history() {
        let runtime = boot(&[(1, 600), (2, 400)], test_params());

        let id = runtime
            .submit_proposal(addr(1), permission_grant(40, Capability::Proposer), 10, 0)
            .unwrap();
        runtime.vote(id, addr(1), true, 1).unwrap();
        runtime.tally(id, 10).unwrap();
        runtime.execute_proposal(id).unwrap();

        let events = runtime.events();
        let submitted = events
            .iter()
            .position(|e| matches!(e, GovernanceEvent::ProposalSubmitted { id: got, .. } if *got == id))
            .unwrap();
        let voted = events
            .iter()
            .position(|e| matches!(e, GovernanceEvent::VoteCast { id: got, .. } if *got == id))
            .unwrap();
        let resolved = events
            .iter()
            .position(|e| matches!(e, GovernanceEvent::ProposalResolved { id: got, .. } if *got == id))
            .unwrap();
        let executed = events
            .iter()
            .position(|e| matches!(e, GovernanceEvent::ProposalExecuted { id: got } if *got == id))
            .unwrap();

        // Append-only order mirrors the state machine's transitions.
        assert!(submitted < voted && voted < resolved && resolved < executed);
    }
}

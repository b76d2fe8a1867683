//! Permission registry ledger.

use crate::error::{AddressListError, AddressListResult};
use shared_types::{Address, Capability, EventSink, GovernanceEvent};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Set of (address, capability) grants.
///
/// State iterates in address order (`BTreeMap`), so any derived sequence is
/// identical on every node replaying the same operations.
#[derive(Debug, Default, Clone)]
pub struct AddressList {
    grants: BTreeMap<Address, BTreeSet<Capability>>,
}

impl AddressList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Does `address` hold `capability`?
    pub fn is_allowed(&self, address: Address, capability: Capability) -> bool {
        self.grants
            .get(&address)
            .is_some_and(|caps| caps.contains(&capability))
    }

    /// Grant `capability` to `address`. Caller must hold admin.
    ///
    /// Idempotent: re-granting an existing capability succeeds without
    /// emitting a second event.
    pub fn grant(
        &mut self,
        caller: Address,
        address: Address,
        capability: Capability,
        events: &mut dyn EventSink,
    ) -> AddressListResult<()> {
        self.check_admin(caller)?;
        self.apply_grant(address, capability, events);
        Ok(())
    }

    /// Revoke `capability` from `address`. Caller must hold admin.
    pub fn revoke(
        &mut self,
        caller: Address,
        address: Address,
        capability: Capability,
        events: &mut dyn EventSink,
    ) -> AddressListResult<()> {
        self.check_admin(caller)?;
        self.apply_revoke(address, capability, events);
        Ok(())
    }

    /// Governance-execution path: grant without a caller check.
    ///
    /// Only the proposal dispatcher may call this; an executed proposal is
    /// its own authorization.
    pub fn apply_grant(
        &mut self,
        address: Address,
        capability: Capability,
        events: &mut dyn EventSink,
    ) {
        let inserted = self.grants.entry(address).or_default().insert(capability);
        if inserted {
            info!(%address, capability = capability.tag(), "permission granted");
            events.emit(GovernanceEvent::PermissionChanged {
                address,
                capability,
                allowed: true,
            });
        }
    }

    /// Governance-execution path: revoke without a caller check.
    pub fn apply_revoke(
        &mut self,
        address: Address,
        capability: Capability,
        events: &mut dyn EventSink,
    ) {
        let removed = self
            .grants
            .get_mut(&address)
            .is_some_and(|caps| caps.remove(&capability));
        if removed {
            info!(%address, capability = capability.tag(), "permission revoked");
            events.emit(GovernanceEvent::PermissionChanged {
                address,
                capability,
                allowed: false,
            });
        }
    }

    fn check_admin(&self, caller: Address) -> AddressListResult<()> {
        if self.is_allowed(caller, Capability::Admin) {
            Ok(())
        } else {
            Err(AddressListError::Unauthorized { caller })
        }
    }
}

//! # Component Registry
//!
//! Each governance ledger lives at a fixed, well-known system address. The
//! genesis configuration maps component names to these addresses and every
//! node consumes the mapping at start-up to locate the ledgers.

use crate::{Address, ADDRESS_LENGTH};
use serde::{Deserialize, Serialize};

const fn system_addr(tag: u8) -> Address {
    let mut bytes = [0u8; ADDRESS_LENGTH];
    bytes[17] = 0xff;
    bytes[18] = 0xf0;
    bytes[19] = tag;
    Address(bytes)
}

/// Well-known address of the Validators ledger.
pub const VALIDATORS_ADDR: Address = system_addr(0x01);
/// Well-known address of the Proposals ledger.
pub const PROPOSALS_ADDR: Address = system_addr(0x02);
/// Well-known address of the NodeVotes ledger.
pub const NODE_VOTES_ADDR: Address = system_addr(0x03);
/// Well-known address of the SystemRewards ledger.
pub const SYSTEM_REWARDS_ADDR: Address = system_addr(0x04);
/// Well-known address of the AddressList ledger.
pub const ADDRESS_LIST_ADDR: Address = system_addr(0x05);

/// Genesis mapping from component name to deployed address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRegistry {
    pub validators: Address,
    pub proposals: Address,
    pub node_votes: Address,
    pub system_rewards: Address,
    pub address_list: Address,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self {
            validators: VALIDATORS_ADDR,
            proposals: PROPOSALS_ADDR,
            node_votes: NODE_VOTES_ADDR,
            system_rewards: SYSTEM_REWARDS_ADDR,
            address_list: ADDRESS_LIST_ADDR,
        }
    }
}

impl ComponentRegistry {
    /// Resolve a component by its canonical name.
    pub fn lookup(&self, name: &str) -> Option<Address> {
        match name {
            "validators" => Some(self.validators),
            "proposals" => Some(self.proposals),
            "node_votes" => Some(self.node_votes),
            "system_rewards" => Some(self.system_rewards),
            "address_list" => Some(self.address_list),
            _ => None,
        }
    }
}

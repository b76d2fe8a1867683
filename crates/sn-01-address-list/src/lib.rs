//! # sn-01-address-list
//!
//! Permission registry for Stakenet governance.
//!
//! Tracks which addresses hold which system-level capabilities (admin,
//! validator candidacy, proposal submission). All privileged calls across
//! the governance ledgers funnel through [`AddressList::is_allowed`].
//!
//! Mutations come from exactly two places:
//! - a caller holding [`Capability::Admin`] via [`AddressList::grant`] /
//!   [`AddressList::revoke`], or
//! - an executed governance proposal via the `apply_*` path, which the
//!   runtime invokes only while dispatching a passed proposal.
//!
//! Grant and revoke are idempotent; repeating one is a no-op, not an error.

pub mod error;
pub mod service;

pub use error::{AddressListError, AddressListResult};
pub use service::AddressList;

// Re-exported so dependents name the capability flags through this crate.
pub use shared_types::Capability;

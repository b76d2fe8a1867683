//! Error types for the permission registry.

use shared_types::Address;
use thiserror::Error;

/// Revert reasons for permission-registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressListError {
    /// Caller does not hold the admin capability.
    #[error("Unauthorized: {caller} lacks the admin capability")]
    Unauthorized { caller: Address },
}

/// Result type for permission-registry operations.
pub type AddressListResult<T> = Result<T, AddressListError>;

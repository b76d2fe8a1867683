//! # sn-03-validators
//!
//! Validator election and lifecycle for Stakenet.
//!
//! Maintains the candidate registry and computes the active validator set
//! per epoch from delegation totals. At every epoch boundary the runtime
//! calls [`Validators::rotate_epoch`], which ranks all qualified candidates
//! by total stake (self-stake plus delegated weight), breaks ties by
//! ascending address, truncates to the configured maximum and commits the
//! result as the epoch's immutable [`ValidatorSet`].
//!
//! The committed set drives the block-producer schedule
//! ([`Validators::producer_for_slot`], plain round-robin over the ordered
//! set) and the voting weights used by governance proposals.
//!
//! Candidates that stop producing are punished via
//! [`Validators::record_missed_slot`]; crossing the jail threshold excludes
//! them from election until governance intervenes. Removed and jailed
//! candidates are retained for audit, never deleted.

pub mod domain;
pub mod service;

pub use domain::{
    Candidate, CandidateStatus, RotationOutcome, ValidatorInfo, ValidatorSet, ValidatorsError,
    ValidatorsResult,
};
pub use service::Validators;

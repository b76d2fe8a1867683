//! # Stakenet Test Suite
//!
//! Unified test crate for cross-ledger flows that no single subsystem can
//! exercise on its own: governance proposals mutating the permission
//! registry, delegation-driven elections, and reward conservation across
//! whole epochs.
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sn-tests
//!
//! # By flow
//! cargo test -p sn-tests integration::governance_flow
//! cargo test -p sn-tests integration::epoch_rotation
//! cargo test -p sn-tests integration::reward_flow
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;

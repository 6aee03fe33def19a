//! # Integration Tests
//!
//! Flows that cross crate boundaries: a hardware-signed transaction
//! admitted by the service, and the tentative/final state split.

pub mod hardware_signing;

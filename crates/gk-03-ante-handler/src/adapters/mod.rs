//! Adapters layer - in-memory implementations of the outbound ports.

pub mod fee_grants;
pub mod memory_ledger;

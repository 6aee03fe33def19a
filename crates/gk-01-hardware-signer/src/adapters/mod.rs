//! # Adapters Layer
//!
//! Device implementations. Both satisfy the same [`crate::SecureDevice`]
//! port and differ only in where the key material lives.

pub mod ledger;
pub mod mock;

//! # Domain Layer
//!
//! Pure derivation and framing logic, no device I/O.

pub mod apdu;
pub mod bip32;
pub mod errors;
pub mod path;

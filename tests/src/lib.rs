//! # Gatekeeper Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Wallets, funded ledgers, signed sends
//! │
//! ├── benchmarks/       # Criterion benchmarks per subsystem
//! │   ├── gk_ante.rs
//! │   └── gk_signature.rs
//! │
//! ├── exploits/         # Attack simulations against admission
//! │   ├── malleability.rs
//! │   ├── replay.rs
//! │   └── fee_drain.rs
//! │
//! └── integration/      # Cross-crate flows
//!     ├── admission_flow.rs
//!     └── hardware_signing.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p gk-tests
//!
//! # By category
//! cargo test -p gk-tests integration::
//! cargo test -p gk-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p gk-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod benchmarks;
pub mod exploits;
pub mod fixtures;
pub mod integration;

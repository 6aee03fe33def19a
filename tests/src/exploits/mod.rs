//! # Exploit Simulations
//!
//! Each module replays a known attack against transaction admission and
//! asserts that it is rejected with the expected decorator and error.

pub mod fee_drain;
pub mod malleability;
pub mod replay;

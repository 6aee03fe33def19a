//! # Gatekeeper Benchmarks
//!
//! Criterion benchmarks for the signature primitive and the ante pipeline.

pub mod gk_ante;
pub mod gk_signature;

//! Ports layer - Hexagonal architecture interfaces.

pub mod inbound;
pub mod outbound;

//! Domain layer: wire types, messages, registry, decoded view and codec.

pub mod codec;
pub mod decoded;
pub mod errors;
pub mod msgs;
pub mod registry;
pub mod wire;

//! # Message Registry
//!
//! Maps type URLs to decoders. Built once at startup and shared read-only,
//! so dispatch never depends on runtime reflection.

use crate::domain::errors::TxError;
use crate::domain::msgs::{Msg, MsgMultiSend, MsgSend};
use crate::domain::wire::Any;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

type DecodeFn = fn(&[u8]) -> Result<Box<dyn Msg>, TxError>;

/// Type URL to decoder table.
#[derive(Default)]
pub struct MsgRegistry {
    decoders: HashMap<&'static str, DecodeFn>,
}

impl MsgRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in bank messages.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<MsgSend>(MsgSend::TYPE_URL);
        registry.register::<MsgMultiSend>(MsgMultiSend::TYPE_URL);
        registry
    }

    /// Register `M` under `type_url`, replacing any previous decoder.
    pub fn register<M>(&mut self, type_url: &'static str)
    where
        M: Msg + DeserializeOwned + 'static,
    {
        self.decoders.insert(type_url, decode_as::<M>);
    }

    /// Whether `type_url` has a decoder.
    pub fn contains(&self, type_url: &str) -> bool {
        self.decoders.contains_key(type_url)
    }

    /// Decode one envelope.
    pub fn decode(&self, any: &Any) -> Result<Box<dyn Msg>, TxError> {
        let decoder = self
            .decoders
            .get(any.type_url.as_str())
            .ok_or_else(|| TxError::UnknownMessageType(any.type_url.clone()))?;
        decoder(&any.value)
    }

    /// Registered type URLs, sorted.
    pub fn type_urls(&self) -> Vec<&'static str> {
        let mut urls: Vec<_> = self.decoders.keys().copied().collect();
        urls.sort_unstable();
        urls
    }
}

fn decode_as<M>(bytes: &[u8]) -> Result<Box<dyn Msg>, TxError>
where
    M: Msg + DeserializeOwned + 'static,
{
    let msg: M = bincode::deserialize(bytes).map_err(|e| TxError::Decode(e.to_string()))?;
    Ok(Box::new(msg))
}

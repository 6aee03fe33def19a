//! # Admission Context
//!
//! Per-transaction state threaded through the decorators. The ledger is
//! borrowed mutably for the length of one pipeline run; whether its writes
//! survive is decided by whoever owns the ledger branch.

use crate::ports::outbound::{AccountKeeper, FeeGrantKeeper};
use serde::{Deserialize, Serialize};

/// Which admission pass is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnteMode {
    /// Speculative check for the pending pool.
    Tentative,
    /// Admission immediately before execution.
    Final,
}

impl AnteMode {
    pub fn is_tentative(self) -> bool {
        matches!(self, Self::Tentative)
    }

    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tentative => "tentative",
            Self::Final => "final",
        }
    }
}

/// A typed event with string attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnteEvent {
    pub kind: &'static str,
    pub attributes: Vec<(&'static str, String)>,
}

impl AnteEvent {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((key, value.into()));
        self
    }

    /// First value recorded under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// State handed from decorator to decorator.
pub struct Context<'a> {
    chain_id: &'a str,
    block_height: u64,
    ledger: &'a mut dyn AccountKeeper,
    fee_grants: Option<&'a mut dyn FeeGrantKeeper>,
    events: Vec<AnteEvent>,
}

impl<'a> Context<'a> {
    pub fn new(chain_id: &'a str, block_height: u64, ledger: &'a mut dyn AccountKeeper) -> Self {
        Self {
            chain_id,
            block_height,
            ledger,
            fee_grants: None,
            events: Vec::new(),
        }
    }

    /// Enable fee grants for this run.
    pub fn with_fee_grants(mut self, fee_grants: &'a mut dyn FeeGrantKeeper) -> Self {
        self.fee_grants = Some(fee_grants);
        self
    }

    pub fn chain_id(&self) -> &str {
        self.chain_id
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn ledger(&self) -> &dyn AccountKeeper {
        &*self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut dyn AccountKeeper {
        &mut *self.ledger
    }

    pub fn fee_grants_mut(&mut self) -> Option<&mut (dyn FeeGrantKeeper + 'a)> {
        self.fee_grants.as_deref_mut()
    }

    pub fn emit(&mut self, event: AnteEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[AnteEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<AnteEvent> {
        self.events
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("chain_id", &self.chain_id)
            .field("block_height", &self.block_height)
            .field("fee_grants", &self.fee_grants.is_some())
            .field("events", &self.events.len())
            .finish()
    }
}

//! # Messages
//!
//! The admission layer only needs two things from a message: who must sign
//! it and whether it is structurally valid. Execution lives elsewhere.

use crate::domain::errors::TxError;
use crate::domain::wire::Any;
use serde::{Deserialize, Serialize};
use shared_types::{validate_coins, Address, Coin};
use std::collections::BTreeMap;
use std::fmt;

/// Capability every registered message type provides.
pub trait Msg: fmt::Debug + Send + Sync {
    /// Registry key.
    fn type_url(&self) -> &'static str;

    /// Required signers in order.
    fn signers(&self) -> Vec<Address>;

    /// Message-specific stateless checks.
    fn validate_basic(&self) -> Result<(), TxError>;

    /// Encoded payload carried inside [`Any::value`].
    fn encode(&self) -> Result<Vec<u8>, TxError>;

    /// Wrap in the tagged envelope.
    fn to_any(&self) -> Result<Any, TxError> {
        Ok(Any {
            type_url: self.type_url().to_string(),
            value: self.encode()?,
        })
    }
}

/// Transfer from one account to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from_address: Address,
    pub to_address: Address,
    pub amount: Vec<Coin>,
}

impl MsgSend {
    pub const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgSend";
}

impl Msg for MsgSend {
    fn type_url(&self) -> &'static str {
        Self::TYPE_URL
    }

    fn signers(&self) -> Vec<Address> {
        vec![self.from_address]
    }

    fn validate_basic(&self) -> Result<(), TxError> {
        if self.amount.is_empty() {
            return Err(TxError::InvalidMessage {
                index: 0,
                reason: "send amount is empty".to_string(),
            });
        }
        validate_coins(&self.amount)?;
        Ok(())
    }

    fn encode(&self) -> Result<Vec<u8>, TxError> {
        bincode::serialize(self).map_err(|e| TxError::Encode(e.to_string()))
    }
}

/// One side of a multi-send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoEntry {
    pub address: Address,
    pub coins: Vec<Coin>,
}

/// Many-to-many transfer; every input address signs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgMultiSend {
    pub inputs: Vec<IoEntry>,
    pub outputs: Vec<IoEntry>,
}

impl MsgMultiSend {
    pub const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgMultiSend";
}

impl Msg for MsgMultiSend {
    fn type_url(&self) -> &'static str {
        Self::TYPE_URL
    }

    fn signers(&self) -> Vec<Address> {
        self.inputs.iter().map(|input| input.address).collect()
    }

    /// Inputs and outputs must be non-empty, individually valid, and
    /// balance per denomination.
    fn validate_basic(&self) -> Result<(), TxError> {
        let invalid = |reason: &str| TxError::InvalidMessage {
            index: 0,
            reason: reason.to_string(),
        };
        if self.inputs.is_empty() {
            return Err(invalid("no inputs to send transaction"));
        }
        if self.outputs.is_empty() {
            return Err(invalid("no outputs to send transaction"));
        }

        let mut totals: BTreeMap<&str, i128> = BTreeMap::new();
        for input in &self.inputs {
            validate_coins(&input.coins)?;
            for coin in &input.coins {
                let entry = totals.entry(coin.denom.as_str()).or_default();
                *entry = entry
                    .checked_add(coin.amount)
                    .ok_or_else(|| invalid("input overflow"))?;
            }
        }
        for output in &self.outputs {
            validate_coins(&output.coins)?;
            for coin in &output.coins {
                let entry = totals.entry(coin.denom.as_str()).or_default();
                *entry = entry
                    .checked_sub(coin.amount)
                    .ok_or_else(|| invalid("output overflow"))?;
            }
        }
        if totals.values().any(|v| *v != 0) {
            return Err(invalid("sum inputs != sum outputs"));
        }
        Ok(())
    }

    fn encode(&self) -> Result<Vec<u8>, TxError> {
        bincode::serialize(self).map_err(|e| TxError::Encode(e.to_string()))
    }
}

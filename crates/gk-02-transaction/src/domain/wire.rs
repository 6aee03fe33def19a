//! # Wire Types
//!
//! The schema-typed transaction envelope. Optional sections are `Option`
//! so that a missing body, auth info or fee is representable on the wire
//! and rejected by `validate_basic` rather than by the decoder.

use serde::{Deserialize, Serialize};
use shared_types::Coin;

/// Self-describing message envelope: a type tag plus the encoded message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Any {
    /// Registry key, e.g. `/cosmos.bank.v1beta1.MsgSend`.
    pub type_url: String,
    /// Encoded message.
    pub value: Vec<u8>,
}

/// Messages plus free-form metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxBody {
    pub messages: Vec<Any>,
    pub memo: String,
    /// Block height after which the transaction is no longer valid (0 = none).
    pub timeout_height: u64,
}

/// Per-signer metadata, aligned positionally with the signer list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerInfo {
    /// Compressed SEC1 public key. May be absent when the account already
    /// has a key on record.
    pub public_key: Option<Vec<u8>>,
    /// Sequence number the signer committed to.
    pub sequence: u64,
}

/// Fee declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    /// `None` is a nil amount (invalid); `Some(vec![])` is a zero fee.
    pub amount: Option<Vec<Coin>>,
    pub gas_limit: u64,
    /// Bech32 address of an explicit payer.
    pub payer: Option<String>,
    /// Bech32 address of an account paying through a fee grant.
    pub granter: Option<String>,
}

/// Authentication section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    pub signer_infos: Vec<SignerInfo>,
    pub fee: Option<Fee>,
}

/// A submitted transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    pub body: Option<TxBody>,
    pub auth_info: Option<AuthInfo>,
    /// Signatures aligned positionally with the signer list.
    pub signatures: Vec<Vec<u8>>,
}

/// The exact byte sequence a signer commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDoc {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
}

impl SignDoc {
    /// Build the sign doc for one signer from the transaction sections.
    pub fn new(
        body: &TxBody,
        auth_info: &AuthInfo,
        chain_id: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<Self, crate::TxError> {
        Ok(Self {
            body_bytes: bincode::serialize(body)
                .map_err(|e| crate::TxError::Encode(e.to_string()))?,
            auth_info_bytes: bincode::serialize(auth_info)
                .map_err(|e| crate::TxError::Encode(e.to_string()))?,
            chain_id: chain_id.to_string(),
            account_number,
            sequence,
        })
    }

    /// Deterministic serialization.
    pub fn to_bytes(&self) -> Result<Vec<u8>, crate::TxError> {
        bincode::serialize(self).map_err(|e| crate::TxError::Encode(e.to_string()))
    }
}

//! # Transaction Errors

use shared_types::{AddressError, CoinError};
use thiserror::Error;

/// Structural and codec errors for transactions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TxError {
    /// The transaction carries no body.
    #[error("missing TxBody")]
    MissingBody,

    /// The transaction carries no auth info.
    #[error("missing AuthInfo")]
    MissingAuthInfo,

    /// The auth info carries no fee.
    #[error("missing fee")]
    MissingFee,

    /// Declared gas exceeds the reserved ceiling.
    #[error("invalid gas supplied; {gas} > {max}")]
    GasTooHigh { gas: u64, max: u64 },

    /// Fee amount is absent (nil), as opposed to an empty coin set.
    #[error("invalid fee provided: null")]
    NilFee,

    /// At least one fee coin is negative.
    #[error("invalid fee provided: {0}")]
    NegativeFee(String),

    /// The fee payer is not a valid address.
    #[error("invalid fee payer address: {0}")]
    InvalidFeePayer(AddressError),

    /// The fee granter is not a valid address.
    #[error("invalid fee granter address: {0}")]
    InvalidFeeGranter(AddressError),

    /// No signatures at all.
    #[error("no signatures supplied")]
    NoSignatures,

    /// Signature count differs from the signer count.
    #[error("wrong number of signers; expected {expected}, got {actual}")]
    SignatureCountMismatch { expected: usize, actual: usize },

    /// The body contains no messages.
    #[error("must contain at least one message")]
    NoMessages,

    /// There is no signer to pay fees.
    #[error("transaction has no signers")]
    NoSigners,

    /// A message failed its own validation.
    #[error("invalid message at index {index}: {reason}")]
    InvalidMessage { index: usize, reason: String },

    /// Message-level coin validation failure.
    #[error("invalid coins: {0}")]
    InvalidCoins(#[from] CoinError),

    /// No decoder registered for a type URL.
    #[error("unknown message type: {0}")]
    UnknownMessageType(String),

    /// Malformed wire bytes.
    #[error("decode error: {0}")]
    Decode(String),

    /// Serialization failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Signer index outside the signer info list.
    #[error("signer index {index} out of range ({count} signer infos)")]
    SignerIndexOutOfRange { index: usize, count: usize },

    /// The external signer failed.
    #[error("signing failed: {0}")]
    Signing(String),
}

//! # Admission Errors
//!
//! Every decorator fails with an [`AnteError`]; the driver wraps it in a
//! [`Rejection`] naming the decorator. Errors are returned verbatim, never
//! aggregated.

use crate::ports::outbound::LedgerError;
use gk_02_transaction::TxError;
use shared_types::{Address, AddressCodec};
use std::fmt;
use thiserror::Error;

/// Failure kinds a decorator can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnteError {
    /// Structurally malformed transaction.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Declared fee is below the local gas price floor.
    #[error("insufficient fees; got: {provided} required: {required}")]
    InsufficientFee { required: String, provided: String },

    /// The fee payer cannot cover the fee.
    #[error("insufficient funds: {address} has {available}{denom}, needs {required}{denom}")]
    InsufficientFunds {
        address: Address,
        denom: String,
        required: i128,
        available: i128,
    },

    /// Signature or identity failure.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Replay protection mismatch.
    #[error("account sequence mismatch for {address}, expected {expected}, got {actual}")]
    WrongSequence {
        address: Address,
        expected: u64,
        actual: u64,
    },

    /// A required account does not exist.
    #[error("account {0} does not exist")]
    AccountNotFound(Address),
}

impl AnteError {
    /// Stable kind label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::InsufficientFee { .. } => "insufficient_fee",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::Unauthorized(_) => "unauthorized",
            Self::WrongSequence { .. } => "wrong_sequence",
            Self::AccountNotFound(_) => "account_not_found",
        }
    }

    /// Message text with addresses in the chain's bech32 form.
    pub fn describe(&self, codec: &AddressCodec) -> String {
        match self {
            Self::InsufficientFunds {
                address,
                denom,
                required,
                available,
            } => format!(
                "insufficient funds: {} has {available}{denom}, needs {required}{denom}",
                codec.encode(address)
            ),
            Self::WrongSequence {
                address,
                expected,
                actual,
            } => format!(
                "account sequence mismatch for {}, expected {expected}, got {actual}",
                codec.encode(address)
            ),
            Self::AccountNotFound(address) => {
                format!("account {} does not exist", codec.encode(address))
            }
            other => other.to_string(),
        }
    }
}

impl From<TxError> for AnteError {
    fn from(err: TxError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<LedgerError> for AnteError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(address) => Self::AccountNotFound(address),
            LedgerError::InsufficientFunds {
                address,
                denom,
                required,
                available,
            } => Self::InsufficientFunds {
                address,
                denom,
                required,
                available,
            },
            LedgerError::Overflow { .. } => Self::InvalidRequest(err.to_string()),
        }
    }
}

/// A pipeline failure: the decorator that rejected and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub decorator: &'static str,
    pub error: AnteError,
}

impl Rejection {
    /// Like `Display`, with addresses rendered through `codec`.
    pub fn describe(&self, codec: &AddressCodec) -> String {
        format!("{}: {}", self.decorator, self.error.describe(codec))
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.decorator, self.error)
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("chain id must not be empty")]
    EmptyChainId,

    #[error("invalid bech32 prefix: {0}")]
    InvalidPrefix(String),

    #[error("invalid gas price {input:?}: {reason}")]
    InvalidGasPrice { input: String, reason: String },

    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
}

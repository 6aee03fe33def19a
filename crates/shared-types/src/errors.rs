//! # Error Types
//!
//! Defines error types for the shared value types.

use thiserror::Error;

/// Errors produced while encoding or decoding textual addresses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The configured human-readable prefix is not a valid bech32 HRP.
    #[error("Invalid bech32 prefix '{0}'")]
    InvalidPrefix(String),

    /// The string is not valid bech32 (bad charset, checksum or casing).
    #[error("Bech32 decode error: {0}")]
    Bech32(String),

    /// The decoded prefix differs from the configured one.
    #[error("Invalid address prefix: expected '{expected}', got '{got}'")]
    PrefixMismatch { expected: String, got: String },

    /// The decoded payload is not exactly 20 bytes.
    #[error("Invalid address length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// An empty string was supplied.
    #[error("Empty address string")]
    Empty,
}

/// Errors produced by coin validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoinError {
    /// Denomination fails the naming rules.
    #[error("Invalid denom: {0}")]
    InvalidDenom(String),

    /// Amount is zero or negative where a positive amount is required.
    #[error("Non-positive amount {amount} for denom {denom}")]
    NonPositive { denom: String, amount: i128 },

    /// Coins are not sorted by denom or contain a duplicate denom.
    #[error("Coins not sorted or duplicated at denom {0}")]
    Unsorted(String),
}

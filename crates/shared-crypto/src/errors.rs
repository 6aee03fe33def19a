//! Crypto error types.

use thiserror::Error;

/// Key handling errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Private key bytes have the wrong width or the scalar is outside `[1, n)`.
    #[error("Invalid private key encoding")]
    InvalidKeyEncoding,

    /// Public key bytes are not a valid SEC1 point on secp256k1.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Key generation failed.
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),
}

/// Reasons a signature is rejected by [`crate::verify`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// Signature is not exactly the expected width.
    #[error("Invalid signature length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// `r` or `s` is zero or not below the curve order.
    #[error("Signature scalar out of range")]
    ScalarOutOfRange,

    /// `s` is in the upper half of the curve order (malleable encoding).
    #[error("Non-canonical signature (high S value)")]
    NonCanonical,

    /// The verification equation does not hold for this key and message.
    #[error("Signature does not match public key and message")]
    Mismatch,
}

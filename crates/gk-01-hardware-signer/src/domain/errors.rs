//! # Signer Errors

use thiserror::Error;

/// Errors surfaced by the hardware signer protocol.
///
/// None of these are retried by this crate; retry policy belongs to the
/// wallet layer calling it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    /// The derivation path is malformed or targets a foreign purpose/coin type.
    /// Always raised before the device is contacted.
    #[error("Invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    /// Device I/O or protocol failure.
    #[error("Device error: {0}")]
    DeviceError(String),

    /// The operator declined the request on the device.
    #[error("Request denied on device")]
    ConfirmationDenied,

    /// The session was already released.
    #[error("Device session closed")]
    SessionClosed,

    /// Seed material could not be loaded (mock device only).
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),
}

/// Failure of the raw byte channel to a device.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Transport error: {0}")]
pub struct TransportError(pub String);

impl From<TransportError> for SignerError {
    fn from(e: TransportError) -> Self {
        SignerError::DeviceError(e.0)
    }
}

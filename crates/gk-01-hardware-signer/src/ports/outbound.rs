//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::{SignerError, TransportError};
use crate::domain::path::DerivationPath;
use shared_crypto::{PublicKey, Signature};

/// A secure signing device holding key material out of process.
///
/// Implementations perform the raw operation only. Path validation, session
/// exclusivity and close-once semantics are enforced by
/// [`crate::HardwareSigner`], which is the only caller.
pub trait SecureDevice: Send {
    /// Public key at `path`.
    fn get_public_key(&mut self, path: &DerivationPath) -> Result<PublicKey, SignerError>;

    /// Public key and bech32 address at `path` under `network_prefix`.
    fn get_address_and_public_key(
        &mut self,
        path: &DerivationPath,
        network_prefix: &str,
    ) -> Result<(PublicKey, String), SignerError>;

    /// Sign SHA-256(`message`) with the key at `path`; canonical low-S encoding.
    fn sign(&mut self, path: &DerivationPath, message: &[u8]) -> Result<Signature, SignerError>;

    /// Display the address at `path` for operator confirmation.
    fn show_address(
        &mut self,
        path: &DerivationPath,
        network_prefix: &str,
    ) -> Result<(), SignerError>;

    /// Release the device.
    fn close(&mut self) -> Result<(), SignerError>;
}

/// Opaque byte-oriented channel (USB/HID) carrying APDU frames.
pub trait DeviceTransport: Send {
    /// Send one frame and return the raw response, status word included.
    fn exchange(&mut self, frame: &[u8]) -> Result<Vec<u8>, TransportError>;

    /// Release the channel.
    fn close(&mut self) -> Result<(), TransportError>;
}

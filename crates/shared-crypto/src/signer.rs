//! Signing seam shared by in-process keys and external devices.

use crate::ecdsa::{sign, Signature};
use crate::keys::{PrivateKey, PublicKey};
use std::convert::Infallible;

/// Anything that can produce canonical signatures for a single key.
///
/// Transaction construction only depends on this trait, so a key held in
/// memory and a key held on a hardware device are interchangeable.
pub trait MessageSigner {
    /// Failure type of the backing key store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Public key of the signing key.
    fn public_key(&self) -> Result<PublicKey, Self::Error>;

    /// Sign `message` (hashed with SHA-256 by the signer).
    fn sign_message(&self, message: &[u8]) -> Result<Signature, Self::Error>;
}

impl MessageSigner for PrivateKey {
    type Error = Infallible;

    fn public_key(&self) -> Result<PublicKey, Self::Error> {
        Ok(PrivateKey::public_key(self))
    }

    fn sign_message(&self, message: &[u8]) -> Result<Signature, Self::Error> {
        Ok(sign(self, message))
    }
}

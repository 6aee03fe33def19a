//! # Seed-Backed Mock Device
//!
//! Same [`SecureDevice`] contract as the production adapter; the only
//! difference is that the seed lives in this process. Keys are derived per
//! request from a BIP-39 mnemonic and dropped immediately afterwards.

use crate::domain::bip32::ExtendedPrivateKey;
use crate::domain::errors::SignerError;
use crate::domain::path::DerivationPath;
use crate::ports::outbound::SecureDevice;
use shared_crypto::{PublicKey, Signature};
use shared_types::AddressCodec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Mnemonic used by test fixtures across the workspace.
pub const TEST_MNEMONIC: &str =
    "equip will roof matter pink blind book anxiety banner elbow sun young";

/// Counters observable after the device has been moved into a signer.
#[derive(Debug, Default)]
pub struct DeviceStats {
    /// Requests that reached the device (any operation).
    pub requests: AtomicUsize,
    /// Keys derived from the seed.
    pub derivations: AtomicUsize,
    /// Calls to `close`.
    pub closes: AtomicUsize,
}

/// In-process device holding a BIP-39 seed.
pub struct MockDevice {
    master: ExtendedPrivateKey,
    deny_confirmations: bool,
    stats: Arc<DeviceStats>,
}

impl MockDevice {
    /// Device seeded from `phrase` with an empty passphrase.
    pub fn from_mnemonic(phrase: &str) -> Result<Self, SignerError> {
        let mnemonic = bip39::Mnemonic::parse_normalized(phrase)
            .map_err(|e| SignerError::InvalidMnemonic(e.to_string()))?;
        let seed = zeroize::Zeroizing::new(mnemonic.to_seed(""));
        Ok(Self {
            master: ExtendedPrivateKey::master(&seed[..])?,
            deny_confirmations: false,
            stats: Arc::default(),
        })
    }

    /// Device seeded from [`TEST_MNEMONIC`].
    pub fn with_test_mnemonic() -> Result<Self, SignerError> {
        Self::from_mnemonic(TEST_MNEMONIC)
    }

    /// Simulate an operator who declines every confirmation prompt.
    pub fn deny_confirmations(mut self, deny: bool) -> Self {
        self.deny_confirmations = deny;
        self
    }

    /// Shared handle to the request counters.
    pub fn stats(&self) -> Arc<DeviceStats> {
        Arc::clone(&self.stats)
    }

    fn derive(&self, path: &DerivationPath) -> Result<ExtendedPrivateKey, SignerError> {
        self.stats.derivations.fetch_add(1, Ordering::SeqCst);
        self.master.derive_path(path)
    }

    fn record_request(&self) {
        self.stats.requests.fetch_add(1, Ordering::SeqCst);
    }
}

impl SecureDevice for MockDevice {
    fn get_public_key(&mut self, path: &DerivationPath) -> Result<PublicKey, SignerError> {
        self.record_request();
        Ok(self.derive(path)?.private_key()?.public_key())
    }

    fn get_address_and_public_key(
        &mut self,
        path: &DerivationPath,
        network_prefix: &str,
    ) -> Result<(PublicKey, String), SignerError> {
        let public_key = self.get_public_key(path)?;
        let codec = AddressCodec::new(network_prefix)
            .map_err(|e| SignerError::DeviceError(e.to_string()))?;
        let address = codec.encode(&public_key.address());
        Ok((public_key, address))
    }

    fn sign(&mut self, path: &DerivationPath, message: &[u8]) -> Result<Signature, SignerError> {
        self.record_request();
        if self.deny_confirmations {
            return Err(SignerError::ConfirmationDenied);
        }
        let key = self.derive(path)?.private_key()?;
        Ok(shared_crypto::sign(&key, message))
    }

    fn show_address(
        &mut self,
        path: &DerivationPath,
        network_prefix: &str,
    ) -> Result<(), SignerError> {
        self.record_request();
        if self.deny_confirmations {
            return Err(SignerError::ConfirmationDenied);
        }
        debug!(%path, network_prefix, "Showing address on mock device");
        Ok(())
    }

    fn close(&mut self) -> Result<(), SignerError> {
        self.stats.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

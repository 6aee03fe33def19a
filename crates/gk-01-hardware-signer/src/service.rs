//! # Hardware Signer Service
//!
//! The only public entry point to a device. Enforces, in order:
//!
//! 1. path validation before any device communication,
//! 2. one in-flight request per device (concurrent callers queue on the mutex),
//! 3. close exactly once, through [`HardwareSigner::close`] or on drop,
//! 4. `SessionClosed` for every request after close.
//!
//! Device I/O is never retried here.

use crate::domain::errors::SignerError;
use crate::domain::path::DerivationPath;
use crate::ports::outbound::SecureDevice;
use gk_telemetry::{metric_inc, DEVICE_REQUESTS};
use parking_lot::Mutex;
use shared_crypto::{MessageSigner, PublicKey, Signature};
use tracing::{debug, info, warn};

/// Exclusive session over one [`SecureDevice`].
pub struct HardwareSigner<D: SecureDevice> {
    device: Mutex<Option<D>>,
    coin_type: u32,
}

impl<D: SecureDevice> HardwareSigner<D> {
    /// Open a session. `coin_type` is the chain's configured BIP-44 coin type.
    pub fn new(device: D, coin_type: u32) -> Self {
        info!(coin_type, "Hardware signer session opened");
        Self {
            device: Mutex::new(Some(device)),
            coin_type,
        }
    }

    /// Configured coin type.
    pub fn coin_type(&self) -> u32 {
        self.coin_type
    }

    /// Public key at `path`.
    pub fn get_public_key(&self, path: &DerivationPath) -> Result<PublicKey, SignerError> {
        self.request("get_public_key", path, |d| d.get_public_key(path))
    }

    /// Public key and address at `path`.
    pub fn get_address_and_public_key(
        &self,
        path: &DerivationPath,
        network_prefix: &str,
    ) -> Result<(PublicKey, String), SignerError> {
        self.request("get_address", path, |d| {
            d.get_address_and_public_key(path, network_prefix)
        })
    }

    /// Canonical signature over SHA-256(`message`) with the key at `path`.
    pub fn sign(&self, path: &DerivationPath, message: &[u8]) -> Result<Signature, SignerError> {
        self.request("sign", path, |d| d.sign(path, message))
    }

    /// Display the address at `path` on the device.
    pub fn show_address(
        &self,
        path: &DerivationPath,
        network_prefix: &str,
    ) -> Result<(), SignerError> {
        self.request("show_address", path, |d| d.show_address(path, network_prefix))
    }

    /// A [`MessageSigner`] bound to one path of this device.
    pub fn account(&self, path: DerivationPath) -> Result<DeviceAccount<'_, D>, SignerError> {
        path.validate(self.coin_type)?;
        Ok(DeviceAccount { signer: self, path })
    }

    /// Release the device. A second call returns `SessionClosed`.
    pub fn close(&self) -> Result<(), SignerError> {
        let mut device = self.device.lock().take().ok_or(SignerError::SessionClosed)?;
        info!("Hardware signer session closed");
        device.close()
    }

    /// Whether the session is still open.
    pub fn is_open(&self) -> bool {
        self.device.lock().is_some()
    }

    fn request<R>(
        &self,
        operation: &'static str,
        path: &DerivationPath,
        f: impl FnOnce(&mut D) -> Result<R, SignerError>,
    ) -> Result<R, SignerError> {
        // Validation happens before the lock so a bad path never waits on,
        // or reaches, the device.
        if let Err(e) = path.validate(self.coin_type) {
            warn!(operation, %path, error = %e, "Rejected derivation path");
            metric_inc!(DEVICE_REQUESTS, &[operation, "rejected"]);
            return Err(e);
        }

        let mut guard = self.device.lock();
        let device = guard.as_mut().ok_or(SignerError::SessionClosed)?;
        let result = f(device);

        let outcome = match &result {
            Ok(_) => "ok",
            Err(SignerError::ConfirmationDenied) => "denied",
            Err(_) => "error",
        };
        metric_inc!(DEVICE_REQUESTS, &[operation, outcome]);
        debug!(operation, %path, outcome, "Device request finished");
        result
    }
}

impl<D: SecureDevice> Drop for HardwareSigner<D> {
    fn drop(&mut self) {
        if let Some(mut device) = self.device.get_mut().take() {
            if let Err(e) = device.close() {
                warn!(error = %e, "Failed to close device on drop");
            } else {
                info!("Hardware signer session closed on drop");
            }
        }
    }
}

/// One key on a hardware device, usable wherever a [`MessageSigner`] is.
pub struct DeviceAccount<'a, D: SecureDevice> {
    signer: &'a HardwareSigner<D>,
    path: DerivationPath,
}

impl<D: SecureDevice> DeviceAccount<'_, D> {
    /// Path of this account.
    pub fn path(&self) -> &DerivationPath {
        &self.path
    }
}

impl<D: SecureDevice> MessageSigner for DeviceAccount<'_, D> {
    type Error = SignerError;

    fn public_key(&self) -> Result<PublicKey, Self::Error> {
        self.signer.get_public_key(&self.path)
    }

    fn sign_message(&self, message: &[u8]) -> Result<Signature, Self::Error> {
        self.signer.sign(&self.path, message)
    }
}

//! # Ledger-Style Device Adapter
//!
//! Production [`SecureDevice`] speaking the signing app's APDU protocol over
//! any [`DeviceTransport`]. Key material never leaves the device; this
//! adapter only frames requests and decodes responses.

use crate::domain::apdu::{
    self, ApduCommand, INS_GET_ADDR_SECP256K1, INS_GET_VERSION, P1_DISPLAY, P1_NO_DISPLAY,
};
use crate::domain::errors::SignerError;
use crate::domain::path::DerivationPath;
use crate::ports::outbound::{DeviceTransport, SecureDevice};
use shared_crypto::{PublicKey, Signature, PUBLIC_KEY_LEN};
use shared_types::AddressCodec;
use tracing::{debug, info};

/// Prefix used when only the public key is wanted; the app always computes
/// an address alongside it.
const PUBKEY_ONLY_HRP: &str = "cosmos";

/// Version reported by the signing app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppVersion {
    pub test_mode: bool,
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

/// Device reached through an APDU transport.
pub struct LedgerDevice<T: DeviceTransport> {
    transport: T,
    version: AppVersion,
}

impl<T: DeviceTransport> LedgerDevice<T> {
    /// Open a device by querying the app version. Fails when the app does
    /// not answer with a well-formed version frame.
    pub fn connect(mut transport: T) -> Result<Self, SignerError> {
        let version = query_version(&mut transport)?;
        info!(
            major = version.major,
            minor = version.minor,
            patch = version.patch,
            test_mode = version.test_mode,
            "Signing app connected"
        );
        Ok(Self { transport, version })
    }

    /// Version captured at connect time.
    pub fn version(&self) -> AppVersion {
        self.version
    }

    fn exchange(&mut self, command: &ApduCommand) -> Result<Vec<u8>, SignerError> {
        let raw = self.transport.exchange(&command.encode())?;
        apdu::parse_response(&raw).map(<[u8]>::to_vec)
    }

    fn request_address(
        &mut self,
        path: &DerivationPath,
        hrp: &str,
        display: bool,
    ) -> Result<(PublicKey, String), SignerError> {
        let p1 = if display { P1_DISPLAY } else { P1_NO_DISPLAY };
        let payload = apdu::address_payload(path, hrp)?;
        let response = self.exchange(&ApduCommand::new(INS_GET_ADDR_SECP256K1, p1, 0, payload))?;
        decode_address_response(&response, hrp)
    }
}

impl<T: DeviceTransport> SecureDevice for LedgerDevice<T> {
    fn get_public_key(&mut self, path: &DerivationPath) -> Result<PublicKey, SignerError> {
        self.request_address(path, PUBKEY_ONLY_HRP, false)
            .map(|(pk, _)| pk)
    }

    fn get_address_and_public_key(
        &mut self,
        path: &DerivationPath,
        network_prefix: &str,
    ) -> Result<(PublicKey, String), SignerError> {
        self.request_address(path, network_prefix, false)
    }

    fn sign(&mut self, path: &DerivationPath, message: &[u8]) -> Result<Signature, SignerError> {
        let frames = apdu::sign_frames(path, message);
        let mut response = Vec::new();
        for frame in &frames {
            response = self.exchange(frame)?;
        }
        debug!(frames = frames.len(), "Sign request completed");
        der_to_canonical(&response)
    }

    fn show_address(
        &mut self,
        path: &DerivationPath,
        network_prefix: &str,
    ) -> Result<(), SignerError> {
        self.request_address(path, network_prefix, true).map(|_| ())
    }

    fn close(&mut self) -> Result<(), SignerError> {
        self.transport.close().map_err(SignerError::from)
    }
}

fn query_version<T: DeviceTransport>(transport: &mut T) -> Result<AppVersion, SignerError> {
    let command = ApduCommand::new(INS_GET_VERSION, 0, 0, Vec::new());
    let raw = transport.exchange(&command.encode())?;
    let payload = apdu::parse_response(&raw)?;
    if payload.len() < 4 {
        return Err(SignerError::DeviceError(format!(
            "version response too short ({} bytes)",
            payload.len()
        )));
    }
    Ok(AppVersion {
        test_mode: payload[0] != 0,
        major: payload[1],
        minor: payload[2],
        patch: payload[3],
    })
}

/// `compressed_pubkey[33] | address_ascii`
///
/// The address must be the bech32 form, under `hrp`, of the key returned in
/// the same frame.
fn decode_address_response(
    response: &[u8],
    hrp: &str,
) -> Result<(PublicKey, String), SignerError> {
    if response.len() <= PUBLIC_KEY_LEN {
        return Err(SignerError::DeviceError(format!(
            "address response too short ({} bytes)",
            response.len()
        )));
    }
    let (key, address) = response.split_at(PUBLIC_KEY_LEN);
    let public_key =
        PublicKey::from_bytes(key).map_err(|e| SignerError::DeviceError(e.to_string()))?;
    let address = String::from_utf8(address.to_vec())
        .map_err(|_| SignerError::DeviceError("address is not UTF-8".to_string()))?;

    let codec = AddressCodec::new(hrp).map_err(|e| SignerError::DeviceError(e.to_string()))?;
    let reported = codec
        .decode(&address)
        .map_err(|e| SignerError::DeviceError(format!("invalid address from device: {e}")))?;
    if reported != public_key.address() {
        return Err(SignerError::DeviceError(format!(
            "device address {address} does not belong to the returned key"
        )));
    }
    Ok((public_key, address))
}

/// Convert the device's DER signature into the 64-byte canonical form.
fn der_to_canonical(der: &[u8]) -> Result<Signature, SignerError> {
    let parsed = k256::ecdsa::Signature::from_der(der)
        .map_err(|_| SignerError::DeviceError("malformed DER signature".to_string()))?;
    let bytes = parsed.to_bytes();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);
    Ok(Signature::from_scalars_normalized(r, s))
}

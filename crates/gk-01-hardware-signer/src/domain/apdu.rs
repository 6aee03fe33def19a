//! # APDU Framing
//!
//! Fixed-format request/response frames exchanged with the signing app:
//!
//! ```text
//! request:  CLA | INS | P1 | P2 | Lc | data[Lc]
//! response: data[..] | SW1 | SW2
//! ```

use crate::domain::errors::SignerError;
use crate::domain::path::DerivationPath;

/// Class byte of the signing app.
pub const CLA: u8 = 0x55;
/// Report app version.
pub const INS_GET_VERSION: u8 = 0x00;
/// Sign a message with a derived key.
pub const INS_SIGN_SECP256K1: u8 = 0x02;
/// Return the public key and address for a path.
pub const INS_GET_ADDR_SECP256K1: u8 = 0x04;

/// First chunk of a multi-frame payload.
pub const P1_INIT: u8 = 0x00;
/// Intermediate chunk.
pub const P1_ADD: u8 = 0x01;
/// Final chunk.
pub const P1_LAST: u8 = 0x02;

/// Address request without on-screen confirmation.
pub const P1_NO_DISPLAY: u8 = 0x00;
/// Address request shown on the device screen.
pub const P1_DISPLAY: u8 = 0x01;

/// Maximum payload carried by one frame.
pub const CHUNK_SIZE: usize = 250;

/// Success status word.
pub const SW_OK: u16 = 0x9000;
/// Operator declined on the device.
pub const SW_DENIED: u16 = 0x6986;

/// A single request frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduCommand {
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    pub data: Vec<u8>,
}

impl ApduCommand {
    pub fn new(ins: u8, p1: u8, p2: u8, data: Vec<u8>) -> Self {
        Self { ins, p1, p2, data }
    }

    /// Wire bytes. Payloads are kept below [`CHUNK_SIZE`] by the callers.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(5 + self.data.len());
        out.extend_from_slice(&[CLA, self.ins, self.p1, self.p2, self.data.len() as u8]);
        out.extend_from_slice(&self.data);
        out
    }
}

/// Split a raw response into payload and status word, mapping non-success
/// statuses to errors.
pub fn parse_response(raw: &[u8]) -> Result<&[u8], SignerError> {
    if raw.len() < 2 {
        return Err(SignerError::DeviceError(format!(
            "response too short ({} bytes)",
            raw.len()
        )));
    }
    let (payload, sw) = raw.split_at(raw.len() - 2);
    match u16::from_be_bytes([sw[0], sw[1]]) {
        SW_OK => Ok(payload),
        SW_DENIED => Err(SignerError::ConfirmationDenied),
        other => Err(SignerError::DeviceError(format!(
            "status word 0x{other:04X}"
        ))),
    }
}

/// Path payload: five little-endian `u32`s, hardened bits set on the
/// first three.
pub fn serialize_path(path: &DerivationPath) -> Vec<u8> {
    path.bip32_indices()
        .iter()
        .flat_map(|index| index.to_le_bytes())
        .collect()
}

/// Frames for a sign request: the path first, then the message in
/// [`CHUNK_SIZE`] pieces, the last one flagged [`P1_LAST`].
pub fn sign_frames(path: &DerivationPath, message: &[u8]) -> Vec<ApduCommand> {
    let mut frames = vec![ApduCommand::new(
        INS_SIGN_SECP256K1,
        P1_INIT,
        0,
        serialize_path(path),
    )];

    let chunks: Vec<&[u8]> = if message.is_empty() {
        vec![&[][..]]
    } else {
        message.chunks(CHUNK_SIZE).collect()
    };
    let last = chunks.len() - 1;
    for (i, chunk) in chunks.into_iter().enumerate() {
        let p1 = if i == last { P1_LAST } else { P1_ADD };
        frames.push(ApduCommand::new(INS_SIGN_SECP256K1, p1, 0, chunk.to_vec()));
    }
    frames
}

/// Address request payload: `hrp_len | hrp | path`.
pub fn address_payload(path: &DerivationPath, hrp: &str) -> Result<Vec<u8>, SignerError> {
    if hrp.is_empty() || hrp.len() > 83 {
        return Err(SignerError::DeviceError(format!(
            "invalid network prefix length {}",
            hrp.len()
        )));
    }
    let mut data = Vec::with_capacity(1 + hrp.len() + 20);
    data.push(hrp.len() as u8);
    data.extend_from_slice(hrp.as_bytes());
    data.extend_from_slice(&serialize_path(path));
    Ok(data)
}

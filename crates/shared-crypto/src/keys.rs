//! # secp256k1 Keys
//!
//! `PrivateKey` owns the signing scalar and clears it on drop.
//! `PublicKey` is held in compressed SEC1 form and derives the 20-byte
//! account [`Address`].

use crate::ecdsa::is_valid_scalar;
use crate::errors::CryptoError;
use crate::hashing::keccak256;
use k256::ecdsa::{SigningKey, VerifyingKey};
use shared_types::Address;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Encoded private key width.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Compressed SEC1 public key width.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Uncompressed SEC1 public key width (`0x04 || x || y`).
const UNCOMPRESSED_LEN: usize = 65;

// =============================================================================
// PUBLIC KEY
// =============================================================================

/// Compressed secp256k1 public key.
#[derive(Clone)]
pub struct PublicKey {
    verifying_key: VerifyingKey,
    compressed: [u8; PUBLIC_KEY_LEN],
}

impl PublicKey {
    /// Parse a SEC1 point. Both the 33-byte compressed and the 65-byte
    /// uncompressed forms are accepted; the key is stored compressed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PUBLIC_KEY_LEN && bytes.len() != UNCOMPRESSED_LEN {
            return Err(CryptoError::InvalidPublicKey);
        }
        let verifying_key =
            VerifyingKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self::from_verifying_key(verifying_key))
    }

    pub(crate) fn from_verifying_key(verifying_key: VerifyingKey) -> Self {
        let point = verifying_key.to_encoded_point(true);
        let mut compressed = [0u8; PUBLIC_KEY_LEN];
        compressed.copy_from_slice(point.as_bytes());
        Self {
            verifying_key,
            compressed,
        }
    }

    /// Compressed encoding.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.compressed
    }

    /// Compressed encoding as an owned vector (the form carried in signer info).
    pub fn to_vec(&self) -> Vec<u8> {
        self.compressed.to_vec()
    }

    /// Uncompressed encoding (`0x04 || x || y`).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.verifying_key.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Account address: the last 20 bytes of Keccak-256 over the
    /// uncompressed point without its tag byte.
    pub fn address(&self) -> Address {
        let uncompressed = self.to_uncompressed();
        let hash = keccak256(&uncompressed[1..]);
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&hash[12..]);
        Address::new(addr)
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.compressed.ct_eq(&other.compressed).into()
    }
}

impl Eq for PublicKey {}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({}..)", hex::encode(&self.compressed[..8]))
    }
}

// =============================================================================
// PRIVATE KEY
// =============================================================================

/// secp256k1 signing key. The underlying scalar is zeroized when dropped.
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Generate a key from OS randomness. Randomness is used here only;
    /// signing is deterministic.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Decode exactly 32 big-endian bytes holding a scalar in `[1, n)`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(CryptoError::InvalidKeyEncoding);
        }
        let mut scalar = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        scalar.copy_from_slice(bytes);
        if !is_valid_scalar(&scalar) {
            return Err(CryptoError::InvalidKeyEncoding);
        }
        let signing_key =
            SigningKey::from_slice(scalar.as_ref()).map_err(|_| CryptoError::InvalidKeyEncoding)?;
        Ok(Self { signing_key })
    }

    /// Encode as exactly 32 bytes. The buffer is cleared when dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LEN]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    /// Matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(*self.signing_key.verifying_key())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        Self {
            signing_key: self.signing_key.clone(),
        }
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("PrivateKey{-}")
    }
}

/// Encoded bytes of an optional key; an absent key encodes as empty.
pub fn private_key_bytes(key: Option<&PrivateKey>) -> Vec<u8> {
    match key {
        Some(key) => key.to_bytes().to_vec(),
        None => Vec::new(),
    }
}

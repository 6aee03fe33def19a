//! # Hashing
//!
//! SHA-256 is the message digest fed to ECDSA; Keccak-256 is used for
//! address derivation.

use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// 256-bit digest.
pub type Hash = [u8; 32];

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

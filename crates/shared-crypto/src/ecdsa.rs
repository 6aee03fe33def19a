//! # ECDSA Signatures (secp256k1)
//!
//! Signature creation and verification with malleability-resistant
//! canonicalization.
//!
//! ## Security Notes
//!
//! - **Deterministic nonces**: RFC 6979 over SHA-256(message); signing never
//!   touches an RNG, so weak randomness cannot leak the key through nonce reuse.
//! - **Low-S (canonical form)**: both `(r, s)` and `(r, n - s)` satisfy the
//!   curve equation. Only `s <= n/2` is produced or accepted, so an already
//!   broadcast transaction cannot be re-serialized under a second valid id.
//! - **Scalar range**: `r` and `s` must lie in `[1, n-1]`.
//! - **Exact width**: the encoding is exactly 64 bytes (`r || s`, big-endian).
//! - **Constant-time comparisons** via the `subtle` crate.

use crate::errors::VerifyError;
use crate::keys::{PrivateKey, PublicKey};
use k256::ecdsa::signature::{Signer, Verifier};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use subtle::{Choice, ConstantTimeEq};

/// Width of an encoded signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
pub(crate) const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// floor(n / 2), the largest canonical S value.
pub(crate) const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// A canonical (low-S) secp256k1 signature, `r || s`.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde_as(as = "Bytes")] [u8; SIGNATURE_LEN]);

impl Signature {
    /// Parse exactly 64 bytes. Shorter or longer buffers are rejected rather
    /// than truncated.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VerifyError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(VerifyError::InvalidLength {
                expected: SIGNATURE_LEN,
                actual: bytes.len(),
            });
        }
        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    /// Build from an arbitrary `(r, s)` pair, normalising `s` to the lower
    /// half of the order. Used when a signature arrives from an external
    /// signer in a different encoding.
    pub fn from_scalars_normalized(r: [u8; 32], s: [u8; 32]) -> Self {
        let s = if is_low_s(&s) { s } else { negate_s(&s) };
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(&r);
        out[32..].copy_from_slice(&s);
        Self(out)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Owned byte vector, the form carried inside transactions.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// The `r` component.
    pub fn r(&self) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.0[..32]);
        r
    }

    /// The `s` component.
    pub fn s(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.0[32..]);
        s
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({:02x?}..)", &self.0[..4])
    }
}

// =============================================================================
// SIGN / VERIFY
// =============================================================================

/// Sign `message` with `private_key`.
///
/// The message is hashed with SHA-256 and signed with an RFC 6979 nonce.
/// The result is always canonical: if the raw `s` is above `n/2` it is
/// replaced by `n - s`.
pub fn sign(private_key: &PrivateKey, message: &[u8]) -> Signature {
    let raw: k256::ecdsa::Signature = private_key.signing_key().sign(message);
    let bytes = raw.to_bytes();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    Signature::from_scalars_normalized(r, s)
}

/// Verify `signature` over `message` against `public_key`.
///
/// Checks, in order: exact width, scalar ranges, canonical low-S, and
/// finally the curve equation over SHA-256(message).
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> Result<(), VerifyError> {
    let sig = Signature::from_slice(signature)?;
    let (r, s) = (sig.r(), sig.s());

    if !is_valid_scalar(&r) || !is_valid_scalar(&s) {
        return Err(VerifyError::ScalarOutOfRange);
    }

    if !is_low_s(&s) {
        return Err(VerifyError::NonCanonical);
    }

    let parsed =
        k256::ecdsa::Signature::from_slice(sig.as_bytes()).map_err(|_| VerifyError::ScalarOutOfRange)?;

    public_key
        .verifying_key()
        .verify(message, &parsed)
        .map_err(|_| VerifyError::Mismatch)
}

// =============================================================================
// SCALAR HELPERS
// =============================================================================

/// Constant-time big-endian comparison, returning `(a < b, a > b)`.
fn ct_compare(a: &[u8; 32], b: &[u8; 32]) -> (Choice, Choice) {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((a[i] < b[i]) as u8);
        let byte_greater = Choice::from((a[i] > b[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (less, greater)
}

/// Whether `s <= n/2`.
pub fn is_low_s(s: &[u8; 32]) -> bool {
    let (_, greater) = ct_compare(s, &SECP256K1_HALF_ORDER);
    (!greater).into()
}

/// Whether a scalar lies in `[1, n-1]`.
pub(crate) fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let (less, _) = ct_compare(scalar, &SECP256K1_ORDER);
    (!is_zero & less).into()
}

/// `n - s`, the malleable counterpart of `s`.
pub fn negate_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// UNIT TESTS
// =============================================================================

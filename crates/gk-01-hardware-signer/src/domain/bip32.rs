//! # BIP-32 Key Derivation (secp256k1)
//!
//! ```text
//! master:          I = HMAC-SHA512("Bitcoin seed", seed)
//! hardened child:  I = HMAC-SHA512(c, 0x00 || k || index)
//! normal child:    I = HMAC-SHA512(c, serP(K) || index)
//! k_child = IL + k (mod n), c_child = IR
//! ```
//!
//! An `IL >= n` or a zero child key is reported as an error rather than
//! skipping to the next index, since the caller asked for one exact path.

use crate::domain::errors::SignerError;
use crate::domain::path::{DerivationPath, HARDENED_OFFSET};
use hmac::{Hmac, Mac};
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar};
use sha2::Sha512;
use shared_crypto::PrivateKey;
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

/// Private key plus chain code at one node of the derivation tree.
pub struct ExtendedPrivateKey {
    key: Zeroizing<[u8; 32]>,
    chain_code: Zeroizing<[u8; 32]>,
}

impl ExtendedPrivateKey {
    /// Master node for `seed`.
    pub fn master(seed: &[u8]) -> Result<Self, SignerError> {
        let (il, ir) = hmac_split(MASTER_KEY_DOMAIN, &[seed])?;
        if parse_scalar(&il).map_or(true, |s| s == Scalar::ZERO) {
            return Err(derivation_failed("master key out of range"));
        }
        Ok(Self {
            key: il,
            chain_code: ir,
        })
    }

    /// Child at `index` (hardened when `index >= 2^31`).
    pub fn derive_child(&self, index: u32) -> Result<Self, SignerError> {
        let index_bytes = index.to_be_bytes();
        let (il, ir) = if index >= HARDENED_OFFSET {
            hmac_split(
                &self.chain_code[..],
                &[&[0u8], &self.key[..], &index_bytes],
            )?
        } else {
            let public = self.private_key()?.public_key();
            hmac_split(
                &self.chain_code[..],
                &[public.as_bytes(), &index_bytes],
            )?
        };

        let tweak = parse_scalar(&il).ok_or_else(|| derivation_failed("IL out of range"))?;
        let parent =
            parse_scalar(&self.key).ok_or_else(|| derivation_failed("parent key out of range"))?;
        let child = tweak + parent;
        if child == Scalar::ZERO {
            return Err(derivation_failed("child key is zero"));
        }

        let mut key = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(&child.to_bytes());
        Ok(Self {
            key,
            chain_code: ir,
        })
    }

    /// Walk every level of `path`.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, SignerError> {
        let mut node = self.derive_child(path.bip32_indices()[0])?;
        for index in &path.bip32_indices()[1..] {
            node = node.derive_child(*index)?;
        }
        Ok(node)
    }

    /// Signing key at this node.
    pub fn private_key(&self) -> Result<PrivateKey, SignerError> {
        PrivateKey::from_bytes(&self.key[..])
            .map_err(|e| derivation_failed(&e.to_string()))
    }

    /// Chain code at this node.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }
}

fn hmac_split(
    key: &[u8],
    parts: &[&[u8]],
) -> Result<(Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>), SignerError> {
    let mut mac =
        HmacSha512::new_from_slice(key).map_err(|e| derivation_failed(&e.to_string()))?;
    for part in parts {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());

    let mut il = Zeroizing::new([0u8; 32]);
    let mut ir = Zeroizing::new([0u8; 32]);
    il.copy_from_slice(&out[..32]);
    ir.copy_from_slice(&out[32..]);
    Ok((il, ir))
}

/// Big-endian scalar, `None` when `>= n`.
fn parse_scalar(bytes: &[u8; 32]) -> Option<Scalar> {
    Option::from(Scalar::from_repr(FieldBytes::from(*bytes)))
}

fn derivation_failed(reason: &str) -> SignerError {
    SignerError::DeviceError(format!("key derivation failed: {reason}"))
}

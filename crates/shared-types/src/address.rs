//! # Account Addresses
//!
//! A 20-byte identifier derived one-way from a public key, with a
//! checksummed bech32 text form:
//!
//! ```text
//! public_key -> keccak256(uncompressed[1..])[12..] -> 20 bytes
//!     -> Bech32(prefix, bytes) -> cosmos1qy352eufqy352eufqy352eufqy35qqqptw34ca
//! ```
//!
//! Derivation lives in `shared-crypto`; this module only carries the bytes
//! and the text codec so that every crate can name an address without
//! depending on the curve implementation.

use crate::errors::AddressError;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of an account address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// Wrap raw address bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Build an address from a slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LEN,
                got: bytes.len(),
            });
        }
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Derive a module account address from its name.
    ///
    /// Module accounts (e.g. the fee collector) have no key pair; their
    /// address is the truncated SHA-256 of the module name.
    pub fn for_module(name: &str) -> Self {
        use sha2::{Digest, Sha256};
        let digest = Sha256::digest(name.as_bytes());
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&digest[..ADDRESS_LEN]);
        Self(out)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

/// Bech32 text codec bound to one human-readable prefix.
///
/// Passed explicitly to everything that parses or renders addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCodec {
    hrp: Hrp,
}

impl AddressCodec {
    /// Create a codec for `prefix` (e.g. `"cosmos"`).
    pub fn new(prefix: &str) -> Result<Self, AddressError> {
        let hrp = Hrp::parse(prefix).map_err(|_| AddressError::InvalidPrefix(prefix.to_string()))?;
        Ok(Self { hrp })
    }

    /// The configured prefix.
    pub fn prefix(&self) -> &str {
        self.hrp.as_str()
    }

    /// Render an address as bech32.
    pub fn encode(&self, address: &Address) -> String {
        // A 20-byte payload is far below the bech32 length limit.
        bech32::encode::<Bech32>(self.hrp, address.as_bytes())
            .unwrap_or_else(|_| unreachable!("20-byte payload always encodes"))
    }

    /// Parse a bech32 address, checking prefix, checksum and length.
    pub fn decode(&self, text: &str) -> Result<Address, AddressError> {
        if text.trim().is_empty() {
            return Err(AddressError::Empty);
        }

        let (hrp, data) = bech32::decode(text).map_err(|e| AddressError::Bech32(e.to_string()))?;

        if !hrp.as_str().eq_ignore_ascii_case(self.hrp.as_str()) {
            return Err(AddressError::PrefixMismatch {
                expected: self.hrp.as_str().to_string(),
                got: hrp.as_str().to_string(),
            });
        }

        Address::from_slice(&data)
    }
}

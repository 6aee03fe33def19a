//! # Derivation Paths
//!
//! BIP-44 coordinates `m / purpose' / coin_type' / account' / change / address_index`.
//! The first three levels are hardened.

use crate::domain::errors::SignerError;
use std::fmt;
use std::str::FromStr;

/// Purpose reserved for BIP-44 secp256k1 accounts.
pub const BIP44_PURPOSE: u32 = 44;

/// Default coin type (ATOM).
pub const DEFAULT_COIN_TYPE: u32 = 118;

/// Hardened index offset.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Five-level BIP-44 derivation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    /// Purpose (must be 44)
    pub purpose: u32,
    /// Coin type (must match the chain's configured coin type)
    pub coin_type: u32,
    /// Account index
    pub account: u32,
    /// Internal (change) chain when set
    pub change: bool,
    /// Address index
    pub address_index: u32,
}

impl DerivationPath {
    /// Standard BIP-44 path for `coin_type`.
    pub fn bip44(coin_type: u32, account: u32, change: bool, address_index: u32) -> Self {
        Self {
            purpose: BIP44_PURPOSE,
            coin_type,
            account,
            change,
            address_index,
        }
    }

    /// Build from the five raw components, as exchanged with devices.
    ///
    /// Hardened bits are ignored; any non-zero change component selects
    /// the internal chain.
    pub fn from_components(components: &[u32]) -> Result<Self, SignerError> {
        let [purpose, coin_type, account, change, address_index] = components else {
            return Err(SignerError::InvalidDerivationPath(format!(
                "expected 5 components, got {}",
                components.len()
            )));
        };
        Ok(Self {
            purpose: purpose & !HARDENED_OFFSET,
            coin_type: coin_type & !HARDENED_OFFSET,
            account: account & !HARDENED_OFFSET,
            change: (change & !HARDENED_OFFSET) != 0,
            address_index: address_index & !HARDENED_OFFSET,
        })
    }

    /// Raw components without hardened bits.
    pub fn components(&self) -> [u32; 5] {
        [
            self.purpose,
            self.coin_type,
            self.account,
            self.change as u32,
            self.address_index,
        ]
    }

    /// BIP-32 child indices with the hardened bit applied to the first three levels.
    pub fn bip32_indices(&self) -> [u32; 5] {
        [
            self.purpose | HARDENED_OFFSET,
            self.coin_type | HARDENED_OFFSET,
            self.account | HARDENED_OFFSET,
            self.change as u32,
            self.address_index,
        ]
    }

    /// Check purpose and coin type against the configured values.
    ///
    /// Hardened-range values in the unhardened levels would alias another
    /// path once the hardened bit is applied, so they are rejected too.
    pub fn validate(&self, coin_type: u32) -> Result<(), SignerError> {
        if self.purpose != BIP44_PURPOSE {
            return Err(SignerError::InvalidDerivationPath(format!(
                "purpose {} (expected {})",
                self.purpose, BIP44_PURPOSE
            )));
        }
        if self.coin_type != coin_type {
            return Err(SignerError::InvalidDerivationPath(format!(
                "coin type {} (expected {})",
                self.coin_type, coin_type
            )));
        }
        if self.account >= HARDENED_OFFSET || self.address_index >= HARDENED_OFFSET {
            return Err(SignerError::InvalidDerivationPath(
                "index out of range".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m/{}'/{}'/{}'/{}/{}",
            self.purpose, self.coin_type, self.account, self.change as u32, self.address_index
        )
    }
}

impl FromStr for DerivationPath {
    type Err = SignerError;

    /// Parse `m/44'/118'/0'/0/0`. The first three levels must be hardened,
    /// the last two must not; the change level must be 0 or 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| SignerError::InvalidDerivationPath(format!("{s}: {reason}"));

        let mut parts = s.split('/');
        if parts.next() != Some("m") {
            return Err(invalid("must start with m/"));
        }

        let mut values = [0u32; 5];
        let mut count = 0;
        for (level, part) in parts.enumerate() {
            if level >= 5 {
                return Err(invalid("too many levels"));
            }
            let (digits, hardened) = match part.strip_suffix('\'') {
                Some(d) => (d, true),
                None => (part, false),
            };
            if hardened != (level < 3) {
                return Err(invalid("wrong hardening"));
            }
            let value: u32 = digits.parse().map_err(|_| invalid("bad index"))?;
            if value >= HARDENED_OFFSET {
                return Err(invalid("index out of range"));
            }
            values[level] = value;
            count += 1;
        }
        if count != 5 {
            return Err(invalid("expected 5 levels"));
        }
        if values[3] > 1 {
            return Err(invalid("change must be 0 or 1"));
        }

        Ok(Self {
            purpose: values[0],
            coin_type: values[1],
            account: values[2],
            change: values[3] == 1,
            address_index: values[4],
        })
    }
}

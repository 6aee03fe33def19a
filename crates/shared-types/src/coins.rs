//! # Coins
//!
//! Multi-asset amounts. Amounts are signed on the wire so that a negative
//! value submitted by a client is representable and can be rejected by
//! validation instead of being silently wrapped.

use crate::errors::CoinError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single-denomination amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination, e.g. `uatom`.
    pub denom: String,
    /// Amount in base units.
    pub amount: i128,
}

impl Coin {
    /// Create a coin.
    pub fn new(denom: impl Into<String>, amount: i128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Whether the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Check a denomination against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), CoinError> {
    let bytes = denom.as_bytes();
    let valid_len = (3..=128).contains(&bytes.len());
    let valid_head = bytes.first().is_some_and(u8::is_ascii_alphabetic);
    let valid_tail = bytes
        .iter()
        .skip(1)
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-'));

    if valid_len && valid_head && valid_tail {
        Ok(())
    } else {
        Err(CoinError::InvalidDenom(denom.to_string()))
    }
}

/// Validate a coin set: valid denoms, strictly positive amounts, sorted by
/// denom without duplicates.
pub fn validate_coins(coins: &[Coin]) -> Result<(), CoinError> {
    for (i, coin) in coins.iter().enumerate() {
        validate_denom(&coin.denom)?;
        if coin.amount <= 0 {
            return Err(CoinError::NonPositive {
                denom: coin.denom.clone(),
                amount: coin.amount,
            });
        }
        if i > 0 && coins[i - 1].denom >= coin.denom {
            return Err(CoinError::Unsorted(coin.denom.clone()));
        }
    }
    Ok(())
}

/// Whether any coin carries a negative amount.
pub fn is_any_negative(coins: &[Coin]) -> bool {
    coins.iter().any(Coin::is_negative)
}

/// Amount of `denom` in `coins`, zero when absent.
pub fn amount_of(coins: &[Coin], denom: &str) -> i128 {
    coins
        .iter()
        .find(|c| c.denom == denom)
        .map_or(0, |c| c.amount)
}

/// Render a coin set as `10uatom,5stake`.
pub fn format_coins(coins: &[Coin]) -> String {
    coins
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

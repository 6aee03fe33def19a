//! # Gas Prices
//!
//! Decimal coins with 18 fractional digits, stored as scaled integers so
//! fee arithmetic is exact.

use crate::domain::errors::ConfigError;
use primitive_types::U256;
use shared_types::{validate_denom, Coin};
use std::fmt;
use std::str::FromStr;

/// Fractional digits carried by a [`DecCoin`].
pub const DEC_PRECISION: usize = 18;

fn precision_multiplier() -> U256 {
    U256::exp10(DEC_PRECISION)
}

/// A per-gas price in one denomination, e.g. `0.025uatom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecCoin {
    pub denom: String,
    /// Price scaled by 10^18.
    scaled: U256,
}

impl DecCoin {
    /// Price from a whole-unit amount.
    pub fn from_integer(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            scaled: U256::from(amount) * precision_multiplier(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.scaled.is_zero()
    }

    /// Fee this price demands for `gas` units: `ceil(price * gas)`,
    /// saturating at `i128::MAX`.
    pub fn required_fee(&self, gas: u64) -> Coin {
        let max = U256::from(i128::MAX as u128);
        let amount = self
            .scaled
            .checked_mul(U256::from(gas))
            .map(|product| {
                let (quotient, remainder) = product.div_mod(precision_multiplier());
                if remainder.is_zero() {
                    quotient
                } else {
                    quotient + 1
                }
            })
            .map_or(i128::MAX, |fee| {
                if fee > max {
                    i128::MAX
                } else {
                    fee.low_u128() as i128
                }
            });
        Coin::new(self.denom.clone(), amount)
    }
}

impl FromStr for DecCoin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = |reason: &str| ConfigError::InvalidGasPrice {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let split = input
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| invalid("missing denom"))?;
        let (number, denom) = input.split_at(split);
        validate_denom(denom).map_err(|e| invalid(&e.to_string()))?;

        let (int_part, frac_part) = match number.split_once('.') {
            Some((i, f)) => (i, f),
            None => (number, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("missing amount"));
        }
        if frac_part.len() > DEC_PRECISION {
            return Err(invalid("too many decimal places"));
        }
        if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("amount must be a non-negative decimal"));
        }

        let digits = format!("{int_part}{frac_part:0<width$}", width = DEC_PRECISION);
        let scaled = U256::from_dec_str(&digits).map_err(|_| invalid("amount out of range"))?;

        Ok(Self {
            denom: denom.to_string(),
            scaled,
        })
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (int, frac) = self.scaled.div_mod(precision_multiplier());
        write!(
            f,
            "{int}.{frac:0>width$}{denom}",
            frac = frac.to_string(),
            width = DEC_PRECISION,
            denom = self.denom
        )
    }
}

/// Parse a comma-separated list such as `0.025uatom,1stake`.
pub fn parse_dec_coins(s: &str) -> Result<Vec<DecCoin>, ConfigError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(DecCoin::from_str)
        .collect()
}

//! Admission configuration.
//!
//! Passed explicitly into pipeline construction; nothing here is read from
//! process-wide state after startup.
//!
//! # Example
//!
//! ```ignore
//! let config = GatekeeperConfig::from_env()?;
//! config.validate()?;
//! let handler = new_ante_handler(&config)?;
//! ```

use crate::domain::errors::ConfigError;
use crate::domain::gas_price::{parse_dec_coins, DecCoin};
use shared_types::{Address, AddressCodec};
use std::env;

/// Module account that collects fees.
pub const FEE_COLLECTOR_NAME: &str = "fee_collector";

/// Default limit on memo length, in characters.
pub const DEFAULT_MAX_MEMO_CHARACTERS: usize = 256;

/// Chain identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainConfig {
    /// Bound into every sign doc.
    pub chain_id: String,
    /// Human-readable prefix for bech32 addresses.
    pub bech32_prefix: String,
    /// BIP-44 coin type hardware signers must use.
    pub coin_type: u32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: "gatekeeper-devnet".to_string(),
            bech32_prefix: "cosmos".to_string(),
            coin_type: 118,
        }
    }
}

/// Fee policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeConfig {
    /// Local gas price floor for tentative admission; empty means no floor.
    pub min_gas_prices: Vec<DecCoin>,
    /// Account credited with deducted fees.
    pub fee_collector: Address,
    /// Whether fee grants are accepted.
    pub fee_grants_enabled: bool,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            min_gas_prices: Vec::new(),
            fee_collector: Address::for_module(FEE_COLLECTOR_NAME),
            fee_grants_enabled: true,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatekeeperConfig {
    pub chain: ChainConfig,
    pub fees: FeeConfig,
    pub max_memo_characters: usize,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            chain: ChainConfig::default(),
            fees: FeeConfig::default(),
            max_memo_characters: DEFAULT_MAX_MEMO_CHARACTERS,
        }
    }
}

impl GatekeeperConfig {
    /// Defaults overridden by `GK_CHAIN_ID`, `GK_BECH32_PREFIX`,
    /// `GK_COIN_TYPE`, `GK_MIN_GAS_PRICES`, `GK_FEE_GRANTS` and
    /// `GK_MAX_MEMO_CHARACTERS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(chain_id) = lookup("GK_CHAIN_ID") {
            config.chain.chain_id = chain_id;
        }
        if let Some(prefix) = lookup("GK_BECH32_PREFIX") {
            config.chain.bech32_prefix = prefix;
        }
        if let Some(value) = lookup("GK_COIN_TYPE") {
            config.chain.coin_type = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "GK_COIN_TYPE",
                value: value.clone(),
            })?;
        }
        if let Some(prices) = lookup("GK_MIN_GAS_PRICES") {
            config.fees.min_gas_prices = parse_dec_coins(&prices)?;
        }
        if let Some(value) = lookup("GK_FEE_GRANTS") {
            config.fees.fee_grants_enabled = match value.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: "GK_FEE_GRANTS",
                        value,
                    })
                }
            };
        }
        if let Some(value) = lookup("GK_MAX_MEMO_CHARACTERS") {
            config.max_memo_characters = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "GK_MAX_MEMO_CHARACTERS",
                value: value.clone(),
            })?;
        }

        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain.chain_id.trim().is_empty() {
            return Err(ConfigError::EmptyChainId);
        }
        self.address_codec()?;
        Ok(())
    }

    /// Codec for the configured prefix.
    pub fn address_codec(&self) -> Result<AddressCodec, ConfigError> {
        AddressCodec::new(&self.chain.bech32_prefix)
            .map_err(|_| ConfigError::InvalidPrefix(self.chain.bech32_prefix.clone()))
    }

    /// Builder-style method to set the chain id
    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain.chain_id = chain_id.into();
        self
    }

    /// Builder-style method to set the gas price floor
    pub fn with_min_gas_prices(mut self, prices: Vec<DecCoin>) -> Self {
        self.fees.min_gas_prices = prices;
        self
    }
}

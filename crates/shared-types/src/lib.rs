//! # Shared Types Crate
//!
//! Value types shared by every Gatekeeper subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, coins and account records are
//!   defined once here and re-used by the signer, transaction and ante crates.
//! - **No Ambient Configuration**: the bech32 prefix lives in an explicit
//!   [`AddressCodec`] value, never in a process-wide singleton.

pub mod address;
pub mod coins;
pub mod entities;
pub mod errors;

pub use address::{Address, AddressCodec, ADDRESS_LEN};
pub use coins::{amount_of, format_coins, is_any_negative, validate_coins, validate_denom, Coin};
pub use entities::Account;
pub use errors::*;

//! # Hardware Signer Protocol (GK-01)
//!
//! Produces signatures and derives keys/addresses on a device that never
//! discloses its private key.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): derivation paths, BIP-32, APDU framing
//! - **Ports Layer** (`ports/`): `SecureDevice` and `DeviceTransport`
//! - **Adapters** (`adapters/`): APDU device (production) and seed-backed mock
//! - **Service Layer** (`service.rs`): `HardwareSigner`, the exclusive session
//!
//! ## Security Notes
//!
//! - **Fail fast**: a path with the wrong purpose or coin type is rejected
//!   before the device is contacted, so no key or address is disclosed
//! - **Exclusive sessions**: one in-flight request per device
//! - **No retries**: device failures surface as `DeviceError`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::ledger::{AppVersion, LedgerDevice};
pub use adapters::mock::{DeviceStats, MockDevice, TEST_MNEMONIC};
pub use domain::bip32::ExtendedPrivateKey;
pub use domain::errors::{SignerError, TransportError};
pub use domain::path::{DerivationPath, BIP44_PURPOSE, DEFAULT_COIN_TYPE, HARDENED_OFFSET};
pub use ports::outbound::{DeviceTransport, SecureDevice};
pub use service::{DeviceAccount, HardwareSigner};

//! # Shared Crypto - Signature Primitive and Key Model
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `ecdsa` | secp256k1 ECDSA | Transaction signing and verification |
//! | `keys` | secp256k1 | Private/public keys, address derivation |
//! | `hashing` | SHA-256, Keccak-256 | Message digests, address hashing |
//! | `signer` | - | `MessageSigner` seam shared by in-process keys and devices |
//!
//! ## Security Properties
//!
//! - **RFC 6979**: deterministic nonces, no RNG consulted while signing
//! - **Low-S**: `sign` always emits `s <= n/2`; `verify` rejects `s > n/2`
//! - **Exact width**: signatures are exactly 64 bytes, no tolerant parsing
//! - **Zeroize**: private key material is cleared on drop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod keys;
pub mod signer;

// Re-exports
pub use ecdsa::{is_low_s, negate_s, sign, verify, Signature, SIGNATURE_LEN};
pub use errors::{CryptoError, VerifyError};
pub use hashing::{keccak256, sha256, Hash};
pub use keys::{private_key_bytes, PrivateKey, PublicKey, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
pub use signer::MessageSigner;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Transaction Model (gk-02)
//!
//! Schema-typed transactions and the stateless rules around them.
//!
//! ## Responsibilities
//!
//! - Wire types ([`Tx`], [`TxBody`], [`AuthInfo`], [`Fee`]) and the
//!   length-prefixed codec.
//! - Type-URL message registry resolving [`Any`] envelopes to [`Msg`]s.
//! - Signer derivation: first-seen order, deduplicated, fee payer appended.
//! - `validate_basic` structural checks and per-signer [`SignDoc`] bytes.
//! - [`TxBuilder`] for assembling and signing transactions client side.
//!
//! Nothing here touches account state; that is the ante handler's job.

pub mod builder;
pub mod domain;

pub use builder::TxBuilder;
pub use domain::codec::{encode_tx, TxDecoder, MAX_TX_BYTES};
pub use domain::decoded::{DecodedTx, MAX_GAS_WANTED};
pub use domain::errors::TxError;
pub use domain::msgs::{IoEntry, Msg, MsgMultiSend, MsgSend};
pub use domain::registry::MsgRegistry;
pub use domain::wire::{Any, AuthInfo, Fee, SignDoc, SignerInfo, Tx, TxBody};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

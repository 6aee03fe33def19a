//! # Inbound Ports (Driving Ports / API)
//!
//! The admission API a node runtime drives.

use crate::domain::context::AnteEvent;
use crate::domain::errors::Rejection;

/// Result of a successful admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admitted {
    /// SHA-256 of the submitted frame.
    pub tx_hash: [u8; 32],
    /// Gas the transaction declared.
    pub gas_wanted: u64,
    /// Events emitted by the decorators, in order.
    pub events: Vec<AnteEvent>,
}

/// Why a submission was not admitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    /// The frame did not decode.
    #[error("tx decode failed: {0}")]
    Decode(#[from] gk_02_transaction::TxError),

    /// A decorator rejected the transaction.
    #[error("tx rejected by {0}")]
    Rejected(#[from] Rejection),
}

/// Transaction admission.
///
/// Tentative admission runs against the pending-pool state; final admission
/// runs against the state the next block executes on. Neither affects the
/// other until [`TxAdmissionApi::commit`].
pub trait TxAdmissionApi: Send + Sync {
    /// Speculative admission for the pending pool. Applies the fee floor.
    fn check_tx(&self, tx_bytes: &[u8]) -> Result<Admitted, AdmissionError>;

    /// Final admission before execution. Skips the fee floor.
    fn deliver_tx(&self, tx_bytes: &[u8]) -> Result<Admitted, AdmissionError>;

    /// Advance to `height` and reset the pending-pool state to the final state.
    fn commit(&self, height: u64);
}

//! # Transaction Codec
//!
//! Frame layout: a 4-byte big-endian payload length followed by the bincode
//! encoded [`Tx`]. The frame must be consumed exactly; short or trailing
//! bytes are rejected.

use crate::domain::decoded::DecodedTx;
use crate::domain::errors::TxError;
use crate::domain::registry::MsgRegistry;
use crate::domain::wire::Tx;
use shared_types::AddressCodec;
use std::sync::Arc;
use tracing::debug;

/// Upper bound on an encoded transaction payload.
pub const MAX_TX_BYTES: usize = 1024 * 1024;

const LEN_PREFIX: usize = 4;

/// Encode a transaction into a length-prefixed frame.
pub fn encode_tx(tx: &Tx) -> Result<Vec<u8>, TxError> {
    let payload = bincode::serialize(tx).map_err(|e| TxError::Encode(e.to_string()))?;
    if payload.len() > MAX_TX_BYTES {
        return Err(TxError::Encode(format!(
            "transaction is {} bytes, limit is {MAX_TX_BYTES}",
            payload.len()
        )));
    }
    let len = u32::try_from(payload.len()).map_err(|e| TxError::Encode(e.to_string()))?;

    let mut frame = Vec::with_capacity(LEN_PREFIX + payload.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Turns raw frames into [`DecodedTx`] values.
#[derive(Clone)]
pub struct TxDecoder {
    registry: Arc<MsgRegistry>,
    codec: AddressCodec,
}

impl TxDecoder {
    pub fn new(registry: Arc<MsgRegistry>, codec: AddressCodec) -> Self {
        Self { registry, codec }
    }

    pub fn codec(&self) -> &AddressCodec {
        &self.codec
    }

    pub fn registry(&self) -> &MsgRegistry {
        &self.registry
    }

    /// Decode a frame and resolve every message through the registry.
    ///
    /// A missing body decodes to a transaction with no messages; the
    /// structural checks reject it later with a precise error.
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedTx, TxError> {
        if bytes.len() < LEN_PREFIX {
            return Err(TxError::Decode(format!(
                "frame is {} bytes, shorter than the length prefix",
                bytes.len()
            )));
        }
        let (prefix, payload) = bytes.split_at(LEN_PREFIX);
        let declared = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;

        if declared > MAX_TX_BYTES {
            return Err(TxError::Decode(format!(
                "declared length {declared} exceeds limit {MAX_TX_BYTES}"
            )));
        }
        if declared != payload.len() {
            return Err(TxError::Decode(format!(
                "declared length {declared}, payload is {} bytes",
                payload.len()
            )));
        }

        let tx: Tx = bincode::deserialize(payload).map_err(|e| TxError::Decode(e.to_string()))?;
        let reencoded = bincode::serialized_size(&tx).map_err(|e| TxError::Decode(e.to_string()))?;
        if reencoded as usize != payload.len() {
            return Err(TxError::Decode("trailing bytes after transaction".into()));
        }

        let msgs = match tx.body.as_ref() {
            Some(body) => body
                .messages
                .iter()
                .map(|any| self.registry.decode(any))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let decoded = DecodedTx::new(tx, msgs, self.codec.clone(), bytes);
        debug!(tx_id = %decoded.id(), msgs = decoded.msgs().len(), "Decoded transaction");
        Ok(decoded)
    }
}

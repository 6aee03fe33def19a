//! # Decoded Transactions
//!
//! A [`Tx`] with its messages resolved through the registry. This is the
//! view the admission pipeline works on.

use crate::domain::errors::TxError;
use crate::domain::msgs::Msg;
use crate::domain::wire::{Fee, SignDoc, SignerInfo, Tx};
use sha2::{Digest, Sha256};
use shared_types::{is_any_negative, format_coins, Address, AddressCodec, Coin};
use std::collections::HashSet;

/// Reserved gas ceiling: the largest value representable as a signed 64-bit
/// integer, so downstream signed arithmetic cannot overflow.
pub const MAX_GAS_WANTED: u64 = (1 << 63) - 1;

/// Transaction with decoded messages and the address codec used to parse
/// its textual addresses.
#[derive(Debug)]
pub struct DecodedTx {
    tx: Tx,
    msgs: Vec<Box<dyn Msg>>,
    codec: AddressCodec,
    hash: [u8; 32],
}

impl DecodedTx {
    pub(crate) fn new(tx: Tx, msgs: Vec<Box<dyn Msg>>, codec: AddressCodec, raw: &[u8]) -> Self {
        Self {
            tx,
            msgs,
            codec,
            hash: Sha256::digest(raw).into(),
        }
    }

    /// Raw wire structure.
    pub fn tx(&self) -> &Tx {
        &self.tx
    }

    /// Decoded messages in body order.
    pub fn msgs(&self) -> &[Box<dyn Msg>] {
        &self.msgs
    }

    /// SHA-256 of the wire bytes this transaction was decoded from.
    pub fn hash(&self) -> [u8; 32] {
        self.hash
    }

    /// Hex transaction id for logs.
    pub fn id(&self) -> String {
        hex::encode(&self.hash[..8])
    }

    /// Address codec for this chain.
    pub fn codec(&self) -> &AddressCodec {
        &self.codec
    }

    /// Signer infos, empty when auth info is missing.
    pub fn signer_infos(&self) -> &[SignerInfo] {
        self.tx
            .auth_info
            .as_ref()
            .map(|a| a.signer_infos.as_slice())
            .unwrap_or_default()
    }

    /// Signatures aligned with [`DecodedTx::get_signers`].
    pub fn signatures(&self) -> &[Vec<u8>] {
        &self.tx.signatures
    }

    fn fee_decl(&self) -> Option<&Fee> {
        self.tx.auth_info.as_ref().and_then(|a| a.fee.as_ref())
    }

    /// Required signers: first-seen order over each message's signers,
    /// deduplicated, then the fee payer if it is not already present.
    pub fn get_signers(&self) -> Result<Vec<Address>, TxError> {
        let mut signers = Vec::new();
        let mut seen = HashSet::new();

        for msg in &self.msgs {
            for addr in msg.signers() {
                if seen.insert(addr) {
                    signers.push(addr);
                }
            }
        }

        if let Some(payer) = self.explicit_payer()? {
            if seen.insert(payer) {
                signers.push(payer);
            }
        }

        Ok(signers)
    }

    fn explicit_payer(&self) -> Result<Option<Address>, TxError> {
        match self.fee_decl().and_then(|f| f.payer.as_deref()) {
            Some(payer) if !payer.is_empty() => self
                .codec
                .decode(payer)
                .map(Some)
                .map_err(TxError::InvalidFeePayer),
            _ => Ok(None),
        }
    }

    /// Account paying the fee: the explicit payer, else the first signer.
    pub fn fee_payer(&self) -> Result<Address, TxError> {
        if let Some(payer) = self.explicit_payer()? {
            return Ok(payer);
        }
        self.get_signers()?
            .first()
            .copied()
            .ok_or(TxError::NoSigners)
    }

    /// Account granting the fee allowance, if any.
    pub fn fee_granter(&self) -> Result<Option<Address>, TxError> {
        match self.fee_decl().and_then(|f| f.granter.as_deref()) {
            Some(granter) if !granter.is_empty() => self
                .codec
                .decode(granter)
                .map(Some)
                .map_err(TxError::InvalidFeeGranter),
            _ => Ok(None),
        }
    }

    /// Declared gas limit, 0 without a fee.
    pub fn gas(&self) -> u64 {
        self.fee_decl().map(|f| f.gas_limit).unwrap_or(0)
    }

    /// Declared fee coins, empty when absent.
    pub fn fee(&self) -> &[Coin] {
        self.fee_decl()
            .and_then(|f| f.amount.as_deref())
            .unwrap_or_default()
    }

    /// Stateless structural checks, in this order: body, auth info, fee,
    /// gas ceiling, nil fee, negative fee, payer/granter addresses,
    /// signature presence, signature count; then each message's own check.
    pub fn validate_basic(&self) -> Result<(), TxError> {
        if self.tx.body.is_none() {
            return Err(TxError::MissingBody);
        }
        let auth_info = self.tx.auth_info.as_ref().ok_or(TxError::MissingAuthInfo)?;
        let fee = auth_info.fee.as_ref().ok_or(TxError::MissingFee)?;

        if fee.gas_limit > MAX_GAS_WANTED {
            return Err(TxError::GasTooHigh {
                gas: fee.gas_limit,
                max: MAX_GAS_WANTED,
            });
        }

        let amount = fee.amount.as_deref().ok_or(TxError::NilFee)?;
        if is_any_negative(amount) {
            return Err(TxError::NegativeFee(format_coins(amount)));
        }

        self.explicit_payer()?;
        self.fee_granter()?;

        let signatures = &self.tx.signatures;
        if signatures.is_empty() {
            return Err(TxError::NoSignatures);
        }

        let signers = self.get_signers()?;
        if signatures.len() != signers.len() {
            return Err(TxError::SignatureCountMismatch {
                expected: signers.len(),
                actual: signatures.len(),
            });
        }

        if self.msgs.is_empty() {
            return Err(TxError::NoMessages);
        }
        for (index, msg) in self.msgs.iter().enumerate() {
            msg.validate_basic().map_err(|e| match e {
                TxError::InvalidMessage { reason, .. } => TxError::InvalidMessage { index, reason },
                other => TxError::InvalidMessage {
                    index,
                    reason: other.to_string(),
                },
            })?;
        }

        Ok(())
    }

    /// Sign-doc bytes for signer `index`, using the sequence that signer
    /// declared in its signer info.
    pub fn sign_bytes(
        &self,
        index: usize,
        chain_id: &str,
        account_number: u64,
    ) -> Result<Vec<u8>, TxError> {
        let body = self.tx.body.as_ref().ok_or(TxError::MissingBody)?;
        let auth_info = self.tx.auth_info.as_ref().ok_or(TxError::MissingAuthInfo)?;
        let info = auth_info
            .signer_infos
            .get(index)
            .ok_or(TxError::SignerIndexOutOfRange {
                index,
                count: auth_info.signer_infos.len(),
            })?;
        SignDoc::new(body, auth_info, chain_id, account_number, info.sequence)?.to_bytes()
    }
}

//! # Transaction Builder
//!
//! Client-side assembly: collect messages, fee and signer infos, then
//! sign each signer's doc through any [`MessageSigner`].

use crate::domain::codec::encode_tx;
use crate::domain::errors::TxError;
use crate::domain::msgs::Msg;
use crate::domain::wire::{Any, AuthInfo, Fee, SignDoc, SignerInfo, Tx, TxBody};
use shared_crypto::{MessageSigner, PublicKey};
use shared_types::{Address, AddressCodec, Coin};
use tracing::debug;

/// Assembles and signs a [`Tx`].
#[derive(Debug, Clone, Default)]
pub struct TxBuilder {
    messages: Vec<Any>,
    memo: String,
    timeout_height: u64,
    fee_amount: Vec<Coin>,
    gas_limit: u64,
    payer: Option<String>,
    granter: Option<String>,
    signer_infos: Vec<SignerInfo>,
    signatures: Vec<Vec<u8>>,
}

impl TxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_msg(mut self, msg: &dyn Msg) -> Result<Self, TxError> {
        self.messages.push(msg.to_any()?);
        Ok(self)
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn timeout_height(mut self, height: u64) -> Self {
        self.timeout_height = height;
        self
    }

    pub fn fee_amount(mut self, amount: Vec<Coin>) -> Self {
        self.fee_amount = amount;
        self
    }

    pub fn gas_limit(mut self, gas: u64) -> Self {
        self.gas_limit = gas;
        self
    }

    pub fn payer(mut self, codec: &AddressCodec, payer: &Address) -> Self {
        self.payer = Some(codec.encode(payer));
        self
    }

    pub fn granter(mut self, codec: &AddressCodec, granter: &Address) -> Self {
        self.granter = Some(codec.encode(granter));
        self
    }

    /// Append a signer info. Signer infos must follow signer order.
    pub fn add_signer(mut self, public_key: Option<&PublicKey>, sequence: u64) -> Self {
        self.signer_infos.push(SignerInfo {
            public_key: public_key.map(PublicKey::to_vec),
            sequence,
        });
        self.signatures.push(Vec::new());
        self
    }

    fn body(&self) -> TxBody {
        TxBody {
            messages: self.messages.clone(),
            memo: self.memo.clone(),
            timeout_height: self.timeout_height,
        }
    }

    fn auth_info(&self) -> AuthInfo {
        AuthInfo {
            signer_infos: self.signer_infos.clone(),
            fee: Some(Fee {
                amount: Some(self.fee_amount.clone()),
                gas_limit: self.gas_limit,
                payer: self.payer.clone(),
                granter: self.granter.clone(),
            }),
        }
    }

    /// Sign-doc bytes for signer `index`.
    pub fn sign_bytes(
        &self,
        index: usize,
        chain_id: &str,
        account_number: u64,
    ) -> Result<Vec<u8>, TxError> {
        let info = self
            .signer_infos
            .get(index)
            .ok_or(TxError::SignerIndexOutOfRange {
                index,
                count: self.signer_infos.len(),
            })?;
        SignDoc::new(
            &self.body(),
            &self.auth_info(),
            chain_id,
            account_number,
            info.sequence,
        )?
        .to_bytes()
    }

    /// Sign for signer `index` with `signer` and store the signature.
    pub fn sign_with<S: MessageSigner>(
        &mut self,
        index: usize,
        signer: &S,
        chain_id: &str,
        account_number: u64,
    ) -> Result<(), TxError> {
        let bytes = self.sign_bytes(index, chain_id, account_number)?;
        let signature = signer
            .sign_message(&bytes)
            .map_err(|e| TxError::Signing(e.to_string()))?;
        debug!(index, chain_id, account_number, "Signed transaction");
        self.set_signature(index, signature.to_vec())
    }

    /// Store a raw signature for signer `index`.
    pub fn set_signature(&mut self, index: usize, signature: Vec<u8>) -> Result<(), TxError> {
        let count = self.signatures.len();
        let slot = self
            .signatures
            .get_mut(index)
            .ok_or(TxError::SignerIndexOutOfRange { index, count })?;
        *slot = signature;
        Ok(())
    }

    pub fn build(&self) -> Tx {
        Tx {
            body: Some(self.body()),
            auth_info: Some(self.auth_info()),
            signatures: self.signatures.clone(),
        }
    }

    /// Build and encode into a wire frame.
    pub fn encode(&self) -> Result<Vec<u8>, TxError> {
        encode_tx(&self.build())
    }
}

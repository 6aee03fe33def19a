//! Signature verification.

use crate::domain::context::{AnteEvent, AnteMode, Context};
use crate::domain::errors::AnteError;
use crate::domain::handler::AnteDecorator;
use gk_02_transaction::DecodedTx;
use gk_telemetry::{metric_inc, SIGNATURE_FAILURES, SIGNATURE_VERIFICATIONS};
use shared_crypto::{verify, PublicKey};
use tracing::{debug, warn};

/// Verifies every signature against its signer's sign doc.
///
/// Signature, signer and signer-info counts must agree before any
/// cryptographic work. Each signer's key comes from its signer info, or
/// from the account when the info omits it, and must hash to the signer
/// address. A key seen for the first time is recorded on the account.
#[derive(Debug, Clone, Default)]
pub struct SigVerificationDecorator;

impl SigVerificationDecorator {
    pub fn new() -> Self {
        Self
    }
}

impl AnteDecorator for SigVerificationDecorator {
    fn name(&self) -> &'static str {
        "SigVerification"
    }

    fn handle<'a>(
        &self,
        mut ctx: Context<'a>,
        tx: &DecodedTx,
        _mode: AnteMode,
    ) -> Result<Context<'a>, AnteError> {
        let signers = tx.get_signers()?;
        let signatures = tx.signatures();
        let signer_infos = tx.signer_infos();

        if signatures.len() != signers.len() {
            return Err(AnteError::InvalidRequest(format!(
                "invalid number of signer; expected: {}, got {}",
                signers.len(),
                signatures.len()
            )));
        }
        if signer_infos.len() != signers.len() {
            return Err(AnteError::InvalidRequest(format!(
                "invalid number of signer infos; expected: {}, got {}",
                signers.len(),
                signer_infos.len()
            )));
        }

        for (index, signer) in signers.iter().enumerate() {
            let mut account = ctx.ledger().get_account(signer)?;
            let signer_text = tx.codec().encode(signer);

            let key_bytes = signer_infos[index]
                .public_key
                .as_deref()
                .or(account.public_key.as_deref())
                .ok_or_else(|| {
                    AnteError::Unauthorized(format!("public key for {signer_text} is not set"))
                })?;
            let public_key = PublicKey::from_bytes(key_bytes)
                .map_err(|e| AnteError::Unauthorized(format!("invalid public key: {e}")))?;
            if public_key.address() != *signer {
                return Err(AnteError::Unauthorized(format!(
                    "public key does not match signer address {signer_text}"
                )));
            }

            let sign_bytes = tx.sign_bytes(index, ctx.chain_id(), account.account_number)?;
            metric_inc!(SIGNATURE_VERIFICATIONS);
            if let Err(err) = verify(&public_key, &sign_bytes, &signatures[index]) {
                metric_inc!(SIGNATURE_FAILURES);
                warn!(signer = %signer_text, index, reason = %err, "Signature verification failed");
                return Err(AnteError::Unauthorized(format!(
                    "signature verification failed; please verify account number ({}) and chain-id ({}): {err}",
                    account.account_number,
                    ctx.chain_id()
                )));
            }
            debug!(signer = %signer_text, index, "Signature verified");

            if account.public_key.is_none() {
                account.public_key = Some(public_key.to_vec());
                ctx.ledger_mut().set_account(account);
            }
            ctx.emit(
                AnteEvent::new("tx")
                    .attr("acc_seq", format!("{signer_text}/{}", signer_infos[index].sequence))
                    .attr("signature", hex::encode(&signatures[index])),
            );
        }

        Ok(ctx)
    }
}

//! Replay protection.

use crate::domain::context::{AnteMode, Context};
use crate::domain::errors::AnteError;
use crate::domain::handler::AnteDecorator;
use gk_02_transaction::DecodedTx;
use tracing::debug;

/// Checks each signer's declared sequence against the stored one and
/// advances the stored sequence by one.
///
/// All signers are checked before any sequence moves. The increment lands
/// in whatever ledger branch the context borrows; tentative and final runs
/// use separate branches, so a tentative pass never advances the sequence
/// the next block executes against.
#[derive(Debug, Clone, Default)]
pub struct IncrementSequenceDecorator;

impl IncrementSequenceDecorator {
    pub fn new() -> Self {
        Self
    }
}

impl AnteDecorator for IncrementSequenceDecorator {
    fn name(&self) -> &'static str {
        "IncrementSequence"
    }

    fn handle<'a>(
        &self,
        mut ctx: Context<'a>,
        tx: &DecodedTx,
        _mode: AnteMode,
    ) -> Result<Context<'a>, AnteError> {
        let signers = tx.get_signers()?;
        let signer_infos = tx.signer_infos();
        if signer_infos.len() != signers.len() {
            return Err(AnteError::InvalidRequest(format!(
                "invalid number of signer infos; expected: {}, got {}",
                signers.len(),
                signer_infos.len()
            )));
        }

        let mut accounts = Vec::with_capacity(signers.len());
        for (signer, info) in signers.iter().zip(signer_infos) {
            let account = ctx.ledger().get_account(signer)?;
            if account.sequence != info.sequence {
                return Err(AnteError::WrongSequence {
                    address: *signer,
                    expected: account.sequence,
                    actual: info.sequence,
                });
            }
            accounts.push(account);
        }

        for mut account in accounts {
            account.sequence = account.sequence.checked_add(1).ok_or_else(|| {
                AnteError::InvalidRequest(format!("sequence overflow for {}", tx.codec().encode(&account.address)))
            })?;
            debug!(signer = %account.address, sequence = account.sequence, "Sequence advanced");
            ctx.ledger_mut().set_account(account);
        }

        Ok(ctx)
    }
}

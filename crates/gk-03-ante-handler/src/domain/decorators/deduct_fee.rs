//! Fee deduction.

use crate::domain::context::{AnteEvent, AnteMode, Context};
use crate::domain::errors::AnteError;
use crate::domain::handler::AnteDecorator;
use gk_02_transaction::DecodedTx;
use shared_types::{format_coins, validate_coins, Address};
use tracing::debug;

/// Moves the declared fee from the payer to the fee collector.
///
/// The payer is the explicit fee payer, else the first signer. A granter
/// distinct from the payer pays instead, provided its allowance accepts
/// the fee. A zero fee moves nothing but still requires the payer account
/// to exist.
#[derive(Debug, Clone)]
pub struct DeductFeeDecorator {
    fee_collector: Address,
    fee_grants_enabled: bool,
}

impl DeductFeeDecorator {
    pub fn new(fee_collector: Address, fee_grants_enabled: bool) -> Self {
        Self {
            fee_collector,
            fee_grants_enabled,
        }
    }
}

impl AnteDecorator for DeductFeeDecorator {
    fn name(&self) -> &'static str {
        "DeductFee"
    }

    fn handle<'a>(
        &self,
        mut ctx: Context<'a>,
        tx: &DecodedTx,
        _mode: AnteMode,
    ) -> Result<Context<'a>, AnteError> {
        let payer = tx.fee_payer()?;
        let fee = tx.fee();
        let codec = tx.codec();
        let mut deduct_from = payer;

        if let Some(granter) = tx.fee_granter()? {
            if granter != payer {
                let grants = match ctx.fee_grants_mut() {
                    Some(grants) if self.fee_grants_enabled => grants,
                    _ => {
                        return Err(AnteError::InvalidRequest(
                            "fee grants are not enabled".to_string(),
                        ))
                    }
                };
                grants
                    .use_granted_fees(&granter, &payer, fee, tx.msgs())
                    .map_err(|e| {
                        AnteError::Unauthorized(format!(
                            "{} does not allow to pay fees for {}: {e}",
                            codec.encode(&granter),
                            codec.encode(&payer)
                        ))
                    })?;
                deduct_from = granter;
            }
        }

        ctx.ledger().get_account(&deduct_from)?;

        if fee.iter().all(|coin| coin.amount == 0) {
            return Ok(ctx);
        }

        validate_coins(fee).map_err(|e| {
            AnteError::InvalidRequest(format!("invalid fee amount {}: {e}", format_coins(fee)))
        })?;

        let ledger = ctx.ledger_mut();
        ledger.debit(&deduct_from, fee)?;
        ledger.credit(&self.fee_collector, fee)?;

        debug!(payer = %deduct_from, fee = %format_coins(fee), "Fee deducted");
        ctx.emit(
            AnteEvent::new("tx")
                .attr("fee", format_coins(fee))
                .attr("fee_payer", codec.encode(&deduct_from)),
        );
        Ok(ctx)
    }
}

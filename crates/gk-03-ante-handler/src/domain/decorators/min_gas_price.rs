//! Local fee floor for the pending pool.

use crate::domain::context::{AnteMode, Context};
use crate::domain::errors::AnteError;
use crate::domain::gas_price::DecCoin;
use crate::domain::handler::AnteDecorator;
use gk_02_transaction::DecodedTx;
use shared_types::{amount_of, format_coins, Coin};
use tracing::debug;

/// Rejects tentative admissions whose fee is below `min_gas_prices * gas`.
///
/// The fee passes when, in at least one floor denomination, the requirement
/// is non-zero and the fee covers it. A zero-gas transaction therefore never
/// clears a non-zero floor. Final admission skips the
/// check: the floor is a local policy, not a consensus rule.
#[derive(Debug, Clone)]
pub struct MinGasPriceDecorator {
    min_gas_prices: Vec<DecCoin>,
}

impl MinGasPriceDecorator {
    pub fn new(min_gas_prices: Vec<DecCoin>) -> Self {
        Self { min_gas_prices }
    }

    fn required_fees(&self, gas: u64) -> Vec<Coin> {
        self.min_gas_prices
            .iter()
            .map(|price| price.required_fee(gas))
            .collect()
    }
}

impl AnteDecorator for MinGasPriceDecorator {
    fn name(&self) -> &'static str {
        "MinGasPrice"
    }

    fn handle<'a>(
        &self,
        ctx: Context<'a>,
        tx: &DecodedTx,
        mode: AnteMode,
    ) -> Result<Context<'a>, AnteError> {
        if !mode.is_tentative() || self.min_gas_prices.iter().all(DecCoin::is_zero) {
            return Ok(ctx);
        }

        let required = self.required_fees(tx.gas());
        let provided = tx.fee();
        let covered = required.iter().any(|req| {
            let amount = amount_of(provided, &req.denom);
            req.amount != 0 && amount >= req.amount
        });

        if !covered {
            return Err(AnteError::InsufficientFee {
                required: format_coins(&required),
                provided: format_coins(provided),
            });
        }

        debug!(gas = tx.gas(), fee = %format_coins(provided), "Fee floor met");
        Ok(ctx)
    }
}

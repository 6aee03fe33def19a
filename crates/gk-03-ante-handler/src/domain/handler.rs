//! # Ante Handler
//!
//! An explicit, ordered list of decorators plus a driver loop. The first
//! decorator to fail stops the run; nothing after it executes.

use crate::domain::config::GatekeeperConfig;
use crate::domain::context::{AnteMode, Context};
use crate::domain::decorators::{
    DeductFeeDecorator, IncrementSequenceDecorator, MinGasPriceDecorator,
    SigVerificationDecorator, ValidateBasicDecorator,
};
use crate::domain::errors::{AnteError, ConfigError, Rejection};
use gk_02_transaction::DecodedTx;
use gk_telemetry::{metric_inc, HistogramTimer, ANTE_ADMITTED, ANTE_DURATION, ANTE_REJECTED};
use tracing::{debug, warn};

/// One admission step.
pub trait AnteDecorator: Send + Sync {
    /// Name reported in rejections, logs and metrics.
    fn name(&self) -> &'static str;

    /// Check (and possibly mutate the ledger for) `tx`, returning the
    /// context for the next decorator.
    fn handle<'a>(
        &self,
        ctx: Context<'a>,
        tx: &DecodedTx,
        mode: AnteMode,
    ) -> Result<Context<'a>, AnteError>;
}

/// The decorator chain.
pub struct AnteHandler {
    decorators: Vec<Box<dyn AnteDecorator>>,
}

impl AnteHandler {
    pub fn new(decorators: Vec<Box<dyn AnteDecorator>>) -> Self {
        Self { decorators }
    }

    /// Decorator names in execution order.
    pub fn decorator_names(&self) -> Vec<&'static str> {
        self.decorators.iter().map(|d| d.name()).collect()
    }

    /// Run every decorator in order, threading the context through.
    ///
    /// # Errors
    /// The first decorator error, tagged with that decorator's name.
    pub fn run<'a>(
        &self,
        mut ctx: Context<'a>,
        tx: &DecodedTx,
        mode: AnteMode,
    ) -> Result<Context<'a>, Rejection> {
        let _timer = HistogramTimer::new(&ANTE_DURATION, &[mode.as_str()]);

        for decorator in &self.decorators {
            ctx = match decorator.handle(ctx, tx, mode) {
                Ok(next) => next,
                Err(error) => {
                    warn!(
                        tx_id = %tx.id(),
                        mode = mode.as_str(),
                        decorator = decorator.name(),
                        kind = error.kind(),
                        error = %error.describe(tx.codec()),
                        "Transaction rejected"
                    );
                    metric_inc!(ANTE_REJECTED, &[mode.as_str(), decorator.name()]);
                    return Err(Rejection {
                        decorator: decorator.name(),
                        error,
                    });
                }
            };
            debug!(tx_id = %tx.id(), decorator = decorator.name(), "Decorator passed");
        }

        metric_inc!(ANTE_ADMITTED, &[mode.as_str()]);
        Ok(ctx)
    }
}

impl std::fmt::Debug for AnteHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnteHandler")
            .field("decorators", &self.decorator_names())
            .finish()
    }
}

/// The default chain: structural checks, fee floor (tentative only), fee
/// deduction, signature verification, sequence increment.
///
/// Fee deduction runs before signature verification, so a transaction
/// with a bad signature still pays its fee in the branch it ran against.
pub fn new_ante_handler(config: &GatekeeperConfig) -> Result<AnteHandler, ConfigError> {
    config.validate()?;

    Ok(AnteHandler::new(vec![
        Box::new(ValidateBasicDecorator::new(config.max_memo_characters)),
        Box::new(MinGasPriceDecorator::new(config.fees.min_gas_prices.clone())),
        Box::new(DeductFeeDecorator::new(
            config.fees.fee_collector,
            config.fees.fee_grants_enabled,
        )),
        Box::new(SigVerificationDecorator::new()),
        Box::new(IncrementSequenceDecorator::new()),
    ]))
}

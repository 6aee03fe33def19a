//! Stateless structural checks, run before anything touches the ledger.

use crate::domain::context::{AnteMode, Context};
use crate::domain::errors::AnteError;
use crate::domain::handler::AnteDecorator;
use gk_02_transaction::{DecodedTx, TxError};

/// Runs the transaction's own `validate_basic`, then the memo limit and the
/// timeout height.
#[derive(Debug, Clone)]
pub struct ValidateBasicDecorator {
    max_memo_characters: usize,
}

impl ValidateBasicDecorator {
    pub fn new(max_memo_characters: usize) -> Self {
        Self {
            max_memo_characters,
        }
    }
}

impl AnteDecorator for ValidateBasicDecorator {
    fn name(&self) -> &'static str {
        "ValidateBasic"
    }

    fn handle<'a>(
        &self,
        ctx: Context<'a>,
        tx: &DecodedTx,
        _mode: AnteMode,
    ) -> Result<Context<'a>, AnteError> {
        tx.validate_basic()?;

        let body = tx.tx().body.as_ref().ok_or(TxError::MissingBody)?;

        let memo_len = body.memo.chars().count();
        if memo_len > self.max_memo_characters {
            return Err(AnteError::InvalidRequest(format!(
                "maximum number of characters is {} but received {} characters",
                self.max_memo_characters, memo_len
            )));
        }

        if body.timeout_height > 0 && ctx.block_height() > body.timeout_height {
            return Err(AnteError::InvalidRequest(format!(
                "tx has timed out; timeout height: {}, current height: {}",
                body.timeout_height,
                ctx.block_height()
            )));
        }

        Ok(ctx)
    }
}

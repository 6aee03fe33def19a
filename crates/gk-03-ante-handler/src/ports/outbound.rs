//! # Outbound Ports (Driven Ports / SPI)
//!
//! The ledger and fee-grant collaborators the pipeline depends on. Both are
//! threaded through [`crate::Context`] by `&mut`; isolation between
//! speculative runs is the adapter's concern.

use gk_02_transaction::Msg;
use shared_types::{Account, Address, Coin};
use thiserror::Error;

/// Ledger failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {0} does not exist")]
    AccountNotFound(Address),

    #[error("{address} has {available}{denom}, needs {required}{denom}")]
    InsufficientFunds {
        address: Address,
        denom: String,
        required: i128,
        available: i128,
    },

    #[error("balance overflow for {address} in {denom}")]
    Overflow { address: Address, denom: String },
}

/// Account and balance storage.
///
/// `debit` and `credit` are atomic: every coin is checked before any
/// balance changes.
pub trait AccountKeeper {
    /// Fetch an account record.
    ///
    /// # Errors
    /// * `LedgerError::AccountNotFound` - no account at `address`
    fn get_account(&self, address: &Address) -> Result<Account, LedgerError>;

    /// Insert or replace an account record.
    fn set_account(&mut self, account: Account);

    /// Balance of `denom`, zero when unknown.
    fn get_balance(&self, address: &Address, denom: &str) -> i128;

    /// Overwrite a balance.
    fn set_balance(&mut self, address: &Address, denom: &str, amount: i128);

    /// Remove `coins` from `address`.
    ///
    /// # Errors
    /// * `LedgerError::InsufficientFunds` - first denom the balance cannot cover
    fn debit(&mut self, address: &Address, coins: &[Coin]) -> Result<(), LedgerError> {
        let mut updated = Vec::with_capacity(coins.len());
        for coin in coins {
            let available = self.get_balance(address, &coin.denom);
            if available < coin.amount {
                return Err(LedgerError::InsufficientFunds {
                    address: *address,
                    denom: coin.denom.clone(),
                    required: coin.amount,
                    available,
                });
            }
            updated.push((coin.denom.as_str(), available - coin.amount));
        }
        for (denom, amount) in updated {
            self.set_balance(address, denom, amount);
        }
        Ok(())
    }

    /// Add `coins` to `address`.
    ///
    /// # Errors
    /// * `LedgerError::Overflow` - a balance would exceed `i128::MAX`
    fn credit(&mut self, address: &Address, coins: &[Coin]) -> Result<(), LedgerError> {
        let mut updated = Vec::with_capacity(coins.len());
        for coin in coins {
            let amount = self
                .get_balance(address, &coin.denom)
                .checked_add(coin.amount)
                .ok_or_else(|| LedgerError::Overflow {
                    address: *address,
                    denom: coin.denom.clone(),
                })?;
            updated.push((coin.denom.as_str(), amount));
        }
        for (denom, amount) in updated {
            self.set_balance(address, denom, amount);
        }
        Ok(())
    }
}

/// Fee allowance failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeeGrantError {
    #[error("no fee allowance from {granter} to {grantee}")]
    NoAllowance { granter: Address, grantee: Address },

    #[error("fee limit exceeded")]
    SpendLimitExceeded,

    #[error("message type {0} not allowed by the fee allowance")]
    MessageNotAllowed(String),
}

/// Fee allowances: a granter paying fees on behalf of a grantee.
pub trait FeeGrantKeeper {
    /// Approve and consume `fee` from the allowance `granter` gave `grantee`.
    ///
    /// # Errors
    /// * `FeeGrantError::NoAllowance` - no grant exists
    /// * `FeeGrantError::SpendLimitExceeded` - the fee exceeds what remains
    /// * `FeeGrantError::MessageNotAllowed` - a message type is outside the grant
    fn use_granted_fees(
        &mut self,
        granter: &Address,
        grantee: &Address,
        fee: &[Coin],
        msgs: &[Box<dyn Msg>],
    ) -> Result<(), FeeGrantError>;
}

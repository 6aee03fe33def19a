//! # Account Entities
//!
//! The account record the ledger collaborator stores and the ante pipeline
//! reads. Balances are held separately by the ledger, keyed by denom.

use crate::address::Address;
use serde::{Deserialize, Serialize};

/// An on-chain account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account address.
    pub address: Address,
    /// Globally unique number assigned at account creation; part of sign bytes.
    pub account_number: u64,
    /// Next expected sequence (replay protection counter).
    pub sequence: u64,
    /// Compressed public key, recorded the first time the account signs.
    pub public_key: Option<Vec<u8>>,
}

impl Account {
    /// A fresh account with sequence zero and no recorded key.
    pub fn new(address: Address, account_number: u64) -> Self {
        Self {
            address,
            account_number,
            sequence: 0,
            public_key: None,
        }
    }
}

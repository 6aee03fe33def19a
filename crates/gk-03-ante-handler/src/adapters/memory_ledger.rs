//! # In-Memory Ledger
//!
//! [`InMemoryLedger`] is the durable-state stand-in; [`CachedLedger`] is a
//! copy-on-write branch over any [`AccountKeeper`] whose writes are kept
//! aside until the owner decides to apply them.

use crate::ports::outbound::{AccountKeeper, LedgerError};
use shared_types::{Account, Address, Coin};
use std::collections::BTreeMap;

type BalanceKey = (Address, String);

/// Map-backed ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    accounts: BTreeMap<Address, Account>,
    balances: BTreeMap<BalanceKey, i128>,
    next_account_number: u64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `account` and set its balances.
    pub fn insert_account(&mut self, account: Account, coins: Vec<Coin>) {
        let address = account.address;
        self.set_account(account);
        for coin in coins {
            self.set_balance(&address, &coin.denom, coin.amount);
        }
    }

    /// Create a fresh account with the next account number.
    pub fn create_account(&mut self, address: Address) -> Account {
        let account = Account::new(address, self.next_account_number);
        self.set_account(account.clone());
        account
    }

    /// Non-zero balances of `address`, sorted by denom.
    pub fn balances(&self, address: &Address) -> Vec<Coin> {
        self.balances
            .range((*address, String::new())..)
            .take_while(|((owner, _), _)| owner == address)
            .filter(|(_, amount)| **amount != 0)
            .map(|((_, denom), amount)| Coin::new(denom.clone(), *amount))
            .collect()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

impl AccountKeeper for InMemoryLedger {
    fn get_account(&self, address: &Address) -> Result<Account, LedgerError> {
        self.accounts
            .get(address)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(*address))
    }

    fn set_account(&mut self, account: Account) {
        self.next_account_number = self
            .next_account_number
            .max(account.account_number.saturating_add(1));
        self.accounts.insert(account.address, account);
    }

    fn get_balance(&self, address: &Address, denom: &str) -> i128 {
        self.balances
            .get(&(*address, denom.to_string()))
            .copied()
            .unwrap_or(0)
    }

    fn set_balance(&mut self, address: &Address, denom: &str, amount: i128) {
        self.balances.insert((*address, denom.to_string()), amount);
    }
}

/// Writes captured by a [`CachedLedger`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerDiff {
    accounts: BTreeMap<Address, Account>,
    balances: BTreeMap<BalanceKey, i128>,
}

impl LedgerDiff {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.balances.is_empty()
    }

    /// Write every captured change into `target`.
    pub fn apply(self, target: &mut dyn AccountKeeper) {
        for account in self.accounts.into_values() {
            target.set_account(account);
        }
        for ((address, denom), amount) in self.balances {
            target.set_balance(&address, &denom, amount);
        }
    }
}

/// Copy-on-write branch over a parent ledger.
pub struct CachedLedger<'p> {
    parent: &'p dyn AccountKeeper,
    writes: LedgerDiff,
}

impl<'p> CachedLedger<'p> {
    pub fn new(parent: &'p dyn AccountKeeper) -> Self {
        Self {
            parent,
            writes: LedgerDiff::default(),
        }
    }

    /// Release the parent borrow and hand back the captured writes.
    pub fn into_diff(self) -> LedgerDiff {
        self.writes
    }
}

impl AccountKeeper for CachedLedger<'_> {
    fn get_account(&self, address: &Address) -> Result<Account, LedgerError> {
        match self.writes.accounts.get(address) {
            Some(account) => Ok(account.clone()),
            None => self.parent.get_account(address),
        }
    }

    fn set_account(&mut self, account: Account) {
        self.writes.accounts.insert(account.address, account);
    }

    fn get_balance(&self, address: &Address, denom: &str) -> i128 {
        match self.writes.balances.get(&(*address, denom.to_string())) {
            Some(amount) => *amount,
            None => self.parent.get_balance(address, denom),
        }
    }

    fn set_balance(&mut self, address: &Address, denom: &str, amount: i128) {
        self.writes
            .balances
            .insert((*address, denom.to_string()), amount);
    }
}

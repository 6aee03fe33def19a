//! Shared fixtures for decorator and service tests.

use crate::adapters::memory_ledger::InMemoryLedger;
use gk_02_transaction::{DecodedTx, MsgRegistry, MsgSend, TxBuilder, TxDecoder};
use shared_crypto::PrivateKey;
use shared_types::{Account, Address, AddressCodec, Coin};
use std::sync::Arc;

pub(crate) const CHAIN_ID: &str = "gk-test";
pub(crate) const ACCOUNT_NUMBER: u64 = 7;
pub(crate) const DENOM: &str = "uatom";
pub(crate) const STARTING_BALANCE: i128 = 1_000_000;
pub(crate) const GAS: u64 = 200_000;

pub(crate) fn codec() -> AddressCodec {
    AddressCodec::new("cosmos").unwrap()
}

pub(crate) fn decode(bytes: &[u8]) -> DecodedTx {
    TxDecoder::new(Arc::new(MsgRegistry::with_defaults()), codec())
        .decode(bytes)
        .unwrap()
}

/// One funded account and helpers to build transactions it signs.
pub(crate) struct TxFixture {
    pub key: PrivateKey,
    pub address: Address,
}

impl TxFixture {
    pub fn new() -> Self {
        let key = PrivateKey::generate();
        let address = key.public_key().address();
        Self { key, address }
    }

    pub fn account(&self) -> Account {
        Account::new(self.address, ACCOUNT_NUMBER)
    }

    /// Ledger holding this fixture's account and balance.
    pub fn ledger(&self) -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        ledger.insert_account(self.account(), vec![Coin::new(DENOM, STARTING_BALANCE)]);
        ledger
    }

    /// Unsigned builder for a send from this account.
    pub fn builder(&self, sequence: u64, fee: i128) -> TxBuilder {
        let msg = MsgSend {
            from_address: self.address,
            to_address: Address::new([0xAB; 20]),
            amount: vec![Coin::new(DENOM, 1)],
        };
        let fee_amount = if fee == 0 {
            Vec::new()
        } else {
            vec![Coin::new(DENOM, fee)]
        };
        TxBuilder::new()
            .add_msg(&msg)
            .unwrap()
            .fee_amount(fee_amount)
            .gas_limit(GAS)
            .add_signer(Some(&self.key.public_key()), sequence)
    }

    /// Signed, encoded send.
    pub fn signed_send(&self, sequence: u64, fee: i128) -> Vec<u8> {
        let mut builder = self.builder(sequence, fee);
        builder
            .sign_with(0, &self.key, CHAIN_ID, ACCOUNT_NUMBER)
            .unwrap();
        builder.encode().unwrap()
    }
}

//! Shared fixtures for integration tests, exploit simulations and benches.

use gk_02_transaction::{MsgSend, TxBuilder};
use gk_03_ante_handler::{
    AdmissionService, GatekeeperConfig, InMemoryFeeGrants, InMemoryLedger,
};
use gk_telemetry::TelemetryConfig;
use shared_crypto::{MessageSigner, PrivateKey, PublicKey};
use shared_types::{Account, Address, Coin};
use std::sync::Once;

pub const DENOM: &str = "uatom";
pub const STARTING_BALANCE: i128 = 10_000_000;
pub const GAS: u64 = 200_000;
pub const RECIPIENT: Address = Address::new([0xAB; 20]);

static TELEMETRY: Once = Once::new();

/// A funded account with an in-process key.
pub struct Wallet {
    pub key: PrivateKey,
    pub address: Address,
    pub account_number: u64,
}

impl Wallet {
    pub fn new(account_number: u64) -> Self {
        let key = PrivateKey::generate();
        let address = key.public_key().address();
        Self {
            key,
            address,
            account_number,
        }
    }

    pub fn account(&self) -> Account {
        Account::new(self.address, self.account_number)
    }

    /// Unsigned send of one coin to [`RECIPIENT`].
    pub fn send(&self, sequence: u64, fee: i128) -> TxBuilder {
        send_from(self.address, &self.key.public_key(), sequence, fee)
    }

    /// Signed, encoded send.
    pub fn signed_send(&self, chain_id: &str, sequence: u64, fee: i128) -> Vec<u8> {
        sign_and_encode(
            self.send(sequence, fee),
            &self.key,
            chain_id,
            self.account_number,
        )
    }
}

/// Unsigned send from `from`, declaring `public_key` for signer 0.
pub fn send_from(from: Address, public_key: &PublicKey, sequence: u64, fee: i128) -> TxBuilder {
    let msg = MsgSend {
        from_address: from,
        to_address: RECIPIENT,
        amount: vec![Coin::new(DENOM, 1)],
    };
    let fee_amount = if fee == 0 {
        Vec::new()
    } else {
        vec![Coin::new(DENOM, fee)]
    };
    TxBuilder::new()
        .add_msg(&msg)
        .expect("MsgSend encodes")
        .fee_amount(fee_amount)
        .gas_limit(GAS)
        .add_signer(Some(public_key), sequence)
}

/// Sign signer 0 of `builder` with `signer` and encode.
pub fn sign_and_encode<S: MessageSigner>(
    mut builder: TxBuilder,
    signer: &S,
    chain_id: &str,
    account_number: u64,
) -> Vec<u8> {
    builder
        .sign_with(0, signer, chain_id, account_number)
        .expect("signing succeeds");
    builder.encode().expect("transaction encodes")
}

/// Ledger with every account in `accounts` funded with [`STARTING_BALANCE`].
pub fn funded_ledger(accounts: &[Account]) -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new();
    for account in accounts {
        ledger.insert_account(account.clone(), vec![Coin::new(DENOM, STARTING_BALANCE)]);
    }
    ledger
}

/// Install logging and metrics once per test binary. Output stays off
/// unless `GK_LOG_LEVEL` is set, e.g. `GK_LOG_LEVEL=debug` for each
/// decorator step.
pub fn init_telemetry() {
    TELEMETRY.call_once(|| {
        let config = TelemetryConfig {
            service_name: "gk-tests".to_string(),
            console_output: std::env::var_os("GK_LOG_LEVEL").is_some(),
            ..TelemetryConfig::from_env()
        };
        // Another harness may already own the global subscriber.
        let _ = gk_telemetry::init_logging(&config);
        let _ = gk_telemetry::register_metrics();
    });
}

/// Service over `config` with `accounts` funded and no fee grants.
pub fn funded_service(config: GatekeeperConfig, accounts: &[Account]) -> AdmissionService {
    init_telemetry();
    AdmissionService::with_state(config, funded_ledger(accounts), InMemoryFeeGrants::new())
        .expect("valid configuration")
}

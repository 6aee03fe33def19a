//! # Admission Service
//!
//! Application service implementing [`TxAdmissionApi`].
//!
//! ## State branches
//!
//! - **Pending**: what tentative admission checks against. Each admitted
//!   transaction's writes (fees, sequences) land here so later submissions
//!   from the same account see them. Reset to the final state on commit.
//! - **Final**: what the next block executes against. Written only by
//!   successful final admissions.
//!
//! Every run works on a copy-on-write [`CachedLedger`] over its branch; a
//! rejection drops the cache, so a failed run leaves the branch untouched.

use crate::adapters::fee_grants::InMemoryFeeGrants;
use crate::adapters::memory_ledger::{CachedLedger, InMemoryLedger};
use crate::domain::config::GatekeeperConfig;
use crate::domain::context::{AnteMode, Context};
use crate::domain::errors::ConfigError;
use crate::domain::handler::{new_ante_handler, AnteHandler};
use crate::ports::inbound::{AdmissionError, Admitted, TxAdmissionApi};
use gk_02_transaction::{MsgRegistry, TxDecoder};
use gk_telemetry::{log_tx_event, metric_inc, ANTE_REJECTED};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Ledger plus fee allowances, moved together.
#[derive(Debug, Clone, Default)]
struct Branch {
    ledger: InMemoryLedger,
    fee_grants: InMemoryFeeGrants,
}

/// Decodes, runs the ante pipeline and keeps the two state branches.
pub struct AdmissionService {
    config: GatekeeperConfig,
    decoder: TxDecoder,
    handler: AnteHandler,
    last_height: AtomicU64,
    pending: Mutex<Branch>,
    finalized: Mutex<Branch>,
}

impl AdmissionService {
    /// Service over empty state with the default message registry.
    pub fn new(config: GatekeeperConfig) -> Result<Self, ConfigError> {
        Self::with_state(config, InMemoryLedger::new(), InMemoryFeeGrants::new())
    }

    /// Service starting from `ledger` and `fee_grants` at height 0.
    pub fn with_state(
        config: GatekeeperConfig,
        ledger: InMemoryLedger,
        fee_grants: InMemoryFeeGrants,
    ) -> Result<Self, ConfigError> {
        let handler = new_ante_handler(&config)?;
        let decoder = TxDecoder::new(Arc::new(MsgRegistry::with_defaults()), config.address_codec()?);
        let branch = Branch { ledger, fee_grants };

        info!(
            chain_id = %config.chain.chain_id,
            decorators = ?handler.decorator_names(),
            "Admission service ready"
        );

        Ok(Self {
            config,
            decoder,
            handler,
            last_height: AtomicU64::new(0),
            pending: Mutex::new(branch.clone()),
            finalized: Mutex::new(branch),
        })
    }

    pub fn config(&self) -> &GatekeeperConfig {
        &self.config
    }

    pub fn decoder(&self) -> &TxDecoder {
        &self.decoder
    }

    pub fn handler(&self) -> &AnteHandler {
        &self.handler
    }

    /// Height of the last committed block.
    pub fn last_height(&self) -> u64 {
        self.last_height.load(Ordering::Acquire)
    }

    /// Snapshot of the ledger a mode runs against.
    pub fn ledger(&self, mode: AnteMode) -> InMemoryLedger {
        match mode {
            AnteMode::Tentative => self.pending.lock().ledger.clone(),
            AnteMode::Final => self.finalized.lock().ledger.clone(),
        }
    }

    /// Snapshot of the fee allowances a mode runs against.
    pub fn fee_grants(&self, mode: AnteMode) -> InMemoryFeeGrants {
        match mode {
            AnteMode::Tentative => self.pending.lock().fee_grants.clone(),
            AnteMode::Final => self.finalized.lock().fee_grants.clone(),
        }
    }

    fn admit(&self, tx_bytes: &[u8], mode: AnteMode) -> Result<Admitted, AdmissionError> {
        let tx = self.decoder.decode(tx_bytes).inspect_err(|_| {
            metric_inc!(ANTE_REJECTED, &[mode.as_str(), "TxDecoder"]);
        })?;
        let height = self.last_height() + 1;

        let mut branch = match mode {
            AnteMode::Tentative => self.pending.lock(),
            AnteMode::Final => self.finalized.lock(),
        };

        let (diff, fee_grants, events) = {
            let mut cache = CachedLedger::new(&branch.ledger);
            let mut fee_grants = branch.fee_grants.clone();
            let ctx = Context::new(&self.config.chain.chain_id, height, &mut cache)
                .with_fee_grants(&mut fee_grants);

            let events = self.handler.run(ctx, &tx, mode)?.into_events();
            (cache.into_diff(), fee_grants, events)
        };

        diff.apply(&mut branch.ledger);
        branch.fee_grants = fee_grants;
        drop(branch);

        log_tx_event!(info, "ante", "Transaction admitted", tx.id(), mode = mode.as_str(), height = height);
        Ok(Admitted {
            tx_hash: tx.hash(),
            gas_wanted: tx.gas(),
            events,
        })
    }
}

impl TxAdmissionApi for AdmissionService {
    fn check_tx(&self, tx_bytes: &[u8]) -> Result<Admitted, AdmissionError> {
        self.admit(tx_bytes, AnteMode::Tentative)
    }

    fn deliver_tx(&self, tx_bytes: &[u8]) -> Result<Admitted, AdmissionError> {
        self.admit(tx_bytes, AnteMode::Final)
    }

    fn commit(&self, height: u64) {
        let finalized = self.finalized.lock();
        let mut pending = self.pending.lock();
        *pending = finalized.clone();
        self.last_height.store(height, Ordering::Release);
        info!(height, accounts = finalized.ledger.account_count(), "Committed");
    }
}

impl std::fmt::Debug for AdmissionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionService")
            .field("chain_id", &self.config.chain.chain_id)
            .field("handler", &self.handler)
            .field("last_height", &self.last_height())
            .finish()
    }
}

//! # Ante Handler (gk-03)
//!
//! The admission pipeline every transaction passes before execution.
//!
//! ## Default Chain
//!
//! | # | Decorator | Mode | Fails with |
//! |---|-----------|------|------------|
//! | 1 | `ValidateBasic` | both | `InvalidRequest` |
//! | 2 | `MinGasPrice` | tentative | `InsufficientFee` |
//! | 3 | `DeductFee` | both | `InsufficientFunds`, `AccountNotFound`, `Unauthorized` |
//! | 4 | `SigVerification` | both | `InvalidRequest`, `Unauthorized` |
//! | 5 | `IncrementSequence` | both | `WrongSequence` |
//!
//! The driver stops at the first failing decorator and reports it by name.
//! Fee deduction precedes signature verification: within the branch a run
//! works on, an unauthenticated transaction can be debited before it is
//! rejected. The branch is discarded on rejection, so the debit never
//! reaches committed state.
//!
//! ## Architecture
//!
//! - `domain/` - context, decorators, driver, configuration, errors
//! - `ports/` - `AccountKeeper`, `FeeGrantKeeper` (outbound); `TxAdmissionApi` (inbound)
//! - `adapters/` - in-memory ledger with copy-on-write branches, in-memory fee grants
//! - `service.rs` - `AdmissionService` with pending and final state

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::fee_grants::{Allowance, InMemoryFeeGrants};
pub use adapters::memory_ledger::{CachedLedger, InMemoryLedger, LedgerDiff};
pub use domain::config::{
    ChainConfig, FeeConfig, GatekeeperConfig, DEFAULT_MAX_MEMO_CHARACTERS, FEE_COLLECTOR_NAME,
};
pub use domain::context::{AnteEvent, AnteMode, Context};
pub use domain::decorators::{
    DeductFeeDecorator, IncrementSequenceDecorator, MinGasPriceDecorator,
    SigVerificationDecorator, ValidateBasicDecorator,
};
pub use domain::errors::{AnteError, ConfigError, Rejection};
pub use domain::gas_price::{parse_dec_coins, DecCoin};
pub use domain::handler::{new_ante_handler, AnteDecorator, AnteHandler};
pub use ports::inbound::{AdmissionError, Admitted, TxAdmissionApi};
pub use ports::outbound::{AccountKeeper, FeeGrantError, FeeGrantKeeper, LedgerError};
pub use service::AdmissionService;

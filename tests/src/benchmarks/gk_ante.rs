//! # Ante Pipeline Benchmarks
//!
//! - Decode of a signed send
//! - Full default chain in both modes
//! - Single-decorator cost of signature verification
//! - Early rejection cost (replayed sequence, bad signature)

use crate::fixtures::{funded_ledger, Wallet};
use criterion::{black_box, BatchSize, BenchmarkId, Criterion, Throughput};
use gk_02_transaction::{MsgRegistry, TxDecoder};
use gk_03_ante_handler::{
    new_ante_handler, AnteDecorator, AnteMode, CachedLedger, Context, GatekeeperConfig,
    InMemoryFeeGrants, SigVerificationDecorator,
};
use std::sync::Arc;
use std::time::Duration;

const HEIGHT: u64 = 1;

struct Setup {
    config: GatekeeperConfig,
    wallets: Vec<Wallet>,
}

impl Setup {
    fn new(accounts: u64) -> Self {
        Self {
            config: GatekeeperConfig::default(),
            wallets: (0..accounts).map(Wallet::new).collect(),
        }
    }

    fn decoder(&self) -> TxDecoder {
        let codec = self
            .config
            .address_codec()
            .unwrap_or_else(|e| panic!("default config is valid: {e}"));
        TxDecoder::new(Arc::new(MsgRegistry::with_defaults()), codec)
    }

    fn signed_sends(&self, sequence: u64) -> Vec<Vec<u8>> {
        self.wallets
            .iter()
            .map(|w| w.signed_send(&self.config.chain.chain_id, sequence, 1_000))
            .collect()
    }
}

pub fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("gk-ante/decode");
    let setup = Setup::new(1);
    let decoder = setup.decoder();
    let bytes = setup.signed_sends(0).remove(0);

    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("decode_signed_send", |b| {
        b.iter(|| black_box(decoder.decode(&bytes).is_ok()))
    });

    group.finish();
}

pub fn bench_full_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("gk-ante/full_chain");
    group.measurement_time(Duration::from_secs(10));

    let setup = Setup::new(1);
    let decoder = setup.decoder();
    let handler = new_ante_handler(&setup.config)
        .unwrap_or_else(|e| panic!("default config is valid: {e}"));
    let accounts: Vec<_> = setup.wallets.iter().map(Wallet::account).collect();
    let ledger = funded_ledger(&accounts);
    let tx = decoder
        .decode(&setup.signed_sends(0)[0])
        .unwrap_or_else(|e| panic!("fixture decodes: {e}"));

    for mode in [AnteMode::Tentative, AnteMode::Final] {
        group.bench_with_input(BenchmarkId::new("admit", mode.as_str()), &mode, |b, &mode| {
            b.iter_batched(
                InMemoryFeeGrants::new,
                |mut grants| {
                    let mut cache = CachedLedger::new(&ledger);
                    let ctx = Context::new(&setup.config.chain.chain_id, HEIGHT, &mut cache)
                        .with_fee_grants(&mut grants);
                    black_box(handler.run(ctx, &tx, mode).is_ok())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

pub fn bench_signature_decorator(c: &mut Criterion) {
    let mut group = c.benchmark_group("gk-ante/sig_verification");

    let setup = Setup::new(1);
    let decoder = setup.decoder();
    let accounts: Vec<_> = setup.wallets.iter().map(Wallet::account).collect();
    let ledger = funded_ledger(&accounts);
    let tx = decoder
        .decode(&setup.signed_sends(0)[0])
        .unwrap_or_else(|e| panic!("fixture decodes: {e}"));
    let decorator = SigVerificationDecorator::new();

    group.bench_function("single_signer", |b| {
        b.iter(|| {
            let mut cache = CachedLedger::new(&ledger);
            let ctx = Context::new(&setup.config.chain.chain_id, HEIGHT, &mut cache);
            black_box(decorator.handle(ctx, &tx, AnteMode::Final).is_ok())
        })
    });

    group.finish();
}

pub fn bench_rejections(c: &mut Criterion) {
    let mut group = c.benchmark_group("gk-ante/rejections");

    let setup = Setup::new(1);
    let decoder = setup.decoder();
    let handler = new_ante_handler(&setup.config)
        .unwrap_or_else(|e| panic!("default config is valid: {e}"));
    let accounts: Vec<_> = setup.wallets.iter().map(Wallet::account).collect();
    let ledger = funded_ledger(&accounts);
    let chain_id = setup.config.chain.chain_id.clone();

    let replayed = decoder
        .decode(&setup.signed_sends(5)[0])
        .unwrap_or_else(|e| panic!("fixture decodes: {e}"));
    let wrong_chain = decoder
        .decode(&setup.wallets[0].signed_send("other-chain", 0, 1_000))
        .unwrap_or_else(|e| panic!("fixture decodes: {e}"));

    for (name, tx) in [("wrong_sequence", &replayed), ("bad_signature", &wrong_chain)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut cache = CachedLedger::new(&ledger);
                let ctx = Context::new(&chain_id, HEIGHT, &mut cache);
                black_box(handler.run(ctx, tx, AnteMode::Final).is_err())
            })
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_decode(c);
    bench_full_chain(c);
    bench_signature_decorator(c);
    bench_rejections(c);
}

//! # Signature Primitive Benchmarks
//!
//! - Sign (RFC 6979, low-S normalization)
//! - Verify, including the canonical-S and width checks
//! - Rejection cost of malformed and high-S signatures
//! - Address derivation from a compressed key

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use shared_crypto::{negate_s, sign, verify, PrivateKey};
use std::time::Duration;

fn generate_message(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

pub fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("gk-signature/sign");
    let key = PrivateKey::generate();

    for size in [32usize, 256, 4096] {
        let message = generate_message(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("sign", size), &message, |b, m| {
            b.iter(|| black_box(sign(&key, m)))
        });
    }

    group.finish();
}

pub fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("gk-signature/verify");
    group.measurement_time(Duration::from_secs(10));

    let key = PrivateKey::generate();
    let public_key = key.public_key();
    let message = generate_message(256);
    let signature = sign(&key, &message).to_vec();

    group.bench_function("verify_valid", |b| {
        b.iter(|| black_box(verify(&public_key, &message, &signature).is_ok()))
    });

    // Rejected before any curve arithmetic.
    let mut high_s = signature[..32].to_vec();
    let s: [u8; 32] = signature[32..].try_into().unwrap_or([0; 32]);
    high_s.extend_from_slice(&negate_s(&s));
    group.bench_function("reject_high_s", |b| {
        b.iter(|| black_box(verify(&public_key, &message, &high_s).is_err()))
    });

    let short = signature[..63].to_vec();
    group.bench_function("reject_short", |b| {
        b.iter(|| black_box(verify(&public_key, &message, &short).is_err()))
    });

    let other = generate_message(256);
    group.bench_function("reject_mismatch", |b| {
        b.iter(|| black_box(verify(&public_key, &other, &signature).is_err()))
    });

    group.finish();
}

pub fn bench_address_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("gk-signature/address");
    let public_key = PrivateKey::generate().public_key();

    group.bench_function("address_from_public_key", |b| {
        b.iter(|| black_box(public_key.address()))
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_sign(c);
    bench_verify(c);
    bench_address_derivation(c);
}

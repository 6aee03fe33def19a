//! # Gatekeeper Benchmarks
//!
//! | Area | Benchmark group |
//! |------|-----------------|
//! | Signature primitive | `gk-signature/*` |
//! | Transaction decode | `gk-ante/decode` |
//! | Ante pipeline | `gk-ante/full_chain`, `gk-ante/sig_verification` |
//! | Early rejection | `gk-ante/rejections` |

use criterion::{criterion_group, criterion_main, Criterion};
use gk_tests::benchmarks::{gk_ante, gk_signature};

fn signature_benchmarks(c: &mut Criterion) {
    gk_signature::register_benchmarks(c);
}

fn ante_benchmarks(c: &mut Criterion) {
    gk_ante::register_benchmarks(c);
}

criterion_group!(benches, signature_benchmarks, ante_benchmarks);

criterion_main!(benches);

//! Benchmarks for the constant-product hot paths
//!
//! Every swap quotes once and every deposit takes a square root, so these two
//! bound per-operation latency.

use amm::{integer_sqrt, V2Math, U256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_get_amount_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_amount_out");

    for (label, reserve) in [
        ("small", U256::from(1_000_000u64)),
        ("18_decimals", U256::exp10(24)),
        ("near_max", U256::MAX >> 2),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &reserve, |b, reserve| {
            b.iter(|| {
                V2Math::get_amount_out(
                    black_box(U256::from(1_000u64)),
                    black_box(*reserve),
                    black_box(*reserve),
                )
            })
        });
    }

    group.finish();
}

fn bench_integer_sqrt(c: &mut Criterion) {
    let mut group = c.benchmark_group("integer_sqrt");

    for (label, value) in [
        ("u64", U256::from(u64::MAX)),
        ("u128", U256::from(u128::MAX)),
        ("u256", U256::MAX),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &value, |b, value| {
            b.iter(|| integer_sqrt(black_box(*value)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_amount_out, bench_integer_sqrt);
criterion_main!(benches);

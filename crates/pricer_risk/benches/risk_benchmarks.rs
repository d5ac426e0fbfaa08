//! Criterion benchmarks for finite-difference Greeks and studies.
//!
//! Benchmarks cover:
//! - Single Greeks versus the batched `compute_all`
//! - Spot ladder throughput on the rayon pool

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::MarketParameters;
use pricer_core::types::Date;
use pricer_models::instruments::{ContractTerms, ExerciseStyle, OptionKind};
use pricer_risk::greeks::GreekEngine;
use pricer_risk::scenarios::spot_ladder;

fn inputs() -> (MarketParameters, ContractTerms) {
    let market = MarketParameters::new(100.0, 0.05, 0.2)
        .unwrap()
        .with_dividend(2.0, Date::from_ymd(2025, 7, 2).unwrap())
        .unwrap();
    let contract = ContractTerms::new(
        Date::from_ymd(2025, 1, 1).unwrap(),
        Date::from_ymd(2026, 1, 1).unwrap(),
        100.0,
        OptionKind::Put,
        ExerciseStyle::American,
    )
    .unwrap();
    (market, contract)
}

/// Benchmark individual Greeks against the batched computation.
fn bench_greeks(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_greeks");
    let (market, contract) = inputs();

    for n_steps in [50, 200] {
        let engine = GreekEngine::new(n_steps);
        group.bench_with_input(BenchmarkId::new("delta", n_steps), &engine, |b, e| {
            b.iter(|| e.delta(black_box(&market), black_box(&contract)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("compute_all", n_steps), &engine, |b, e| {
            b.iter(|| e.compute_all(black_box(&market), black_box(&contract)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark a spot ladder.
fn bench_ladder(c: &mut Criterion) {
    let (market, contract) = inputs();
    let spots: Vec<f64> = (0..21).map(|i| 80.0 + 2.0 * i as f64).collect();

    c.bench_function("spot_ladder_21x100", |b| {
        b.iter(|| spot_ladder(black_box(&market), black_box(&contract), 100, &spots).unwrap());
    });
}

criterion_group!(benches, bench_greeks, bench_ladder);
criterion_main!(benches);

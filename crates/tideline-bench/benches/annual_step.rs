//! Criterion benchmarks for the annual step with the reference models.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use tideline_bench::{reference_profile, stress_profile};
use tideline_engine::TransectEngine;

fn bench_first_year_reference(c: &mut Criterion) {
    c.bench_function("first_year_reference", |b| {
        b.iter_batched(
            || TransectEngine::new(reference_profile(42)).unwrap(),
            |mut engine| {
                let report = engine.advance();
                black_box(&report);
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_first_year_stress(c: &mut Criterion) {
    c.bench_function("first_year_stress", |b| {
        b.iter_batched(
            || TransectEngine::new(stress_profile(42)).unwrap(),
            |mut engine| {
                let report = engine.advance();
                black_box(&report);
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_full_run_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    group.sample_size(10);
    group.bench_function("reference_20_years", |b| {
        b.iter(|| {
            let mut engine = TransectEngine::new(reference_profile(42)).unwrap();
            let status = engine.run_to_end();
            black_box((status, engine.digest()));
        });
    });
    group.finish();
}

fn bench_construct_stress(c: &mut Criterion) {
    c.bench_function("construct_stress", |b| {
        b.iter(|| {
            let engine = TransectEngine::new(stress_profile(black_box(42))).unwrap();
            black_box(engine.state().cell_count());
        });
    });
}

criterion_group!(
    benches,
    bench_first_year_reference,
    bench_first_year_stress,
    bench_full_run_reference,
    bench_construct_stress
);
criterion_main!(benches);

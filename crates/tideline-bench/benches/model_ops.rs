//! Criterion benchmarks for individual reference models and the bay
//! integrator.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tideline_core::SECONDS_PER_YEAR;
use tideline_engine::hydro::advance_bay;
use tideline_engine::implicit::BackwardEuler;
use tideline_model::{BayParams, BayState, TidalInput, TidalSimulator};
use tideline_models::{SettlingMarsh, WaveBay};

fn bay_params() -> BayParams {
    BayParams {
        mineral_density: 2000.0,
        tidal_period: 12.5 * 3600.0,
        cell_count: 8000,
        settling_velocity: 0.5e-3,
        critical_shear: 0.1,
        reference_concentration: 0.01,
        wind_speed: 6.0,
        progradation_coeff: 2.0,
        erosion_coeff: 0.16 / SECONDS_PER_YEAR,
        tidal_amplitude: 0.7,
        sea_level_rise: 4e-3 / SECONDS_PER_YEAR,
        marsh_flux: 0.0,
        erodibility: 1e-4,
        bank_distance: 10.0,
        edge_depth: 0.3,
        bay_density: 1100.0,
        edge_density: 900.0,
    }
}

fn bench_bay_year(c: &mut Criterion) {
    let bay = WaveBay::default();
    let params = bay_params();
    let mut integrator = BackwardEuler::default();
    c.bench_function("wave_bay_one_year", |b| {
        b.iter(|| {
            let out = advance_bay(
                &bay,
                BayState {
                    fetch: black_box(5000.0),
                    depth: 1.5,
                },
                &params,
                SECONDS_PER_YEAR,
                &mut integrator,
            );
            black_box(out);
        });
    });
}

fn bench_settling_marsh(c: &mut Criterion) {
    let marsh = SettlingMarsh::default();
    let platform: Vec<f64> = (0..1000).map(|i| 0.3 + 0.0004 * i as f64).collect();
    let input = TidalInput {
        elevation: &platform,
        msl: 0.004,
        edge_concentration: 0.02,
        organic_fraction: 0.05,
        tidal_range: 1.4,
        iterations: 500,
        tidal_period: 12.5 * 3600.0,
        sub_cycle: 12.5 * 3600.0 / 500.0,
        settling_velocity: 0.05e-3,
        cycles_per_year: 365.0 * 24.0 / 12.5,
        max_biomass: 2500.0,
        min_depth: 0.0,
        max_depth: 0.7167 * 1.4 - 0.483,
        organic_density: 85.0,
        mineral_density: 2000.0,
    };
    c.bench_function("settling_marsh_1000_cells", |b| {
        b.iter(|| {
            let out = marsh.simulate(black_box(&input)).unwrap();
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_bay_year, bench_settling_marsh);
criterion_main!(benches);

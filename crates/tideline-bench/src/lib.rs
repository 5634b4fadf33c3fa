//! Benchmark profiles for the Tideline transect model.
//!
//! Provides pre-built [`RunConfig`] profiles driven by the reference
//! collaborator models:
//!
//! - [`reference_profile`]: 1 km bay, 200 m marsh, 300 m forest, 20 years
//! - [`stress_profile`]: default-sized 5 km bay and 1 km marsh, 100 years
//!
//! Spin-up and forest tables are synthetic, drawn from a seeded stream so
//! every profile is reproducible.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tideline_engine::{RunConfig, TransectConfig};
use tideline_models::reference_models;
use tideline_test_utils::{seeded_forest_profiles, seeded_spin_up};

/// Equilibrium bay depth (m) used by both profiles.
pub const EQUILIBRIUM_BAY_DEPTH: f64 = 1.5;

/// Reference benchmark profile: 1500 cells, 30 spin-up years, 20 run
/// years, forest on.
pub fn reference_profile(seed: u64) -> RunConfig {
    let parameters = TransectConfig {
        name: "bench_reference".into(),
        time_step_count: 19,
        marsh_width_initial: 200,
        bay_fetch_initial: 1000.0,
        forest_width_initial_fixed: true,
        forest_width_initial: 300,
        ..TransectConfig::default()
    };
    RunConfig {
        parameters,
        spin_up: seeded_spin_up(seed, 30, 200, 0.35, 0.003, 0.01),
        forest_profiles: seeded_forest_profiles(seed.wrapping_add(1), 20, 80),
        models: reference_models(EQUILIBRIUM_BAY_DEPTH),
    }
}

/// Stress benchmark profile: default parameters with a derived forest
/// width, 80 spin-up years and 100 run years.
pub fn stress_profile(seed: u64) -> RunConfig {
    let parameters = TransectConfig {
        name: "bench_stress".into(),
        ..TransectConfig::default()
    };
    RunConfig {
        spin_up: seeded_spin_up(seed, 80, parameters.marsh_width_initial, 0.35, 0.002, 0.01),
        forest_profiles: seeded_forest_profiles(seed.wrapping_add(1), 40, 80),
        models: reference_models(EQUILIBRIUM_BAY_DEPTH),
        parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tideline_engine::TransectEngine;

    #[test]
    fn reference_profile_constructs() {
        let engine = TransectEngine::new(reference_profile(42)).unwrap();
        assert_eq!(engine.state().cell_count(), 1000 + 200 + 300);
        assert_eq!(engine.state().spin_up_years(), 30);
    }

    #[test]
    fn profiles_are_seeded() {
        let a = TransectEngine::new(reference_profile(1)).unwrap();
        let b = TransectEngine::new(reference_profile(1)).unwrap();
        let c = TransectEngine::new(reference_profile(2)).unwrap();
        assert_eq!(a.digest(), b.digest());
        assert_ne!(a.digest(), c.digest());
    }
}

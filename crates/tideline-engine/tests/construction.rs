//! Integration test: construction-time rejection.
//!
//! Every inconsistency in parameters, historical tables or the built
//! transect aborts `TransectEngine::new` with a `ConfigError`.

use tideline_core::{ConfigError, ModelError, RunStatus};
use tideline_engine::{RunConfig, TransectConfig, TransectEngine};
use tideline_model::{Collaborators, ForestProfiles, SpinUp};
use tideline_test_utils::fixtures::{ConstantBay, FixedTransect, FlatMarsh, NoDecay, NoErosion};
use tideline_test_utils::{flat_spin_up, stepped_profile, uniform_forest_profiles};

fn parameters() -> TransectConfig {
    TransectConfig {
        time_step_count: 3,
        relative_sea_level_rise: 0.0,
        marsh_width_initial: 10,
        bay_fetch_initial: 20.0,
        forest_on: false,
        ..TransectConfig::default()
    }
}

fn run(
    parameters: TransectConfig,
    spin_up: SpinUp,
    forest_profiles: ForestProfiles,
    profile: Vec<f64>,
) -> RunConfig {
    RunConfig {
        parameters,
        spin_up,
        forest_profiles,
        models: Collaborators {
            builder: Box::new(FixedTransect::new(profile, 1.0)),
            bay: Box::new(ConstantBay::new(0.0, 0.0)),
            erosion: Box::new(NoErosion),
            tidal: Box::new(FlatMarsh::new(0.0)),
            decomposer: Box::new(NoDecay),
        },
    }
}

fn default_profile() -> Vec<f64> {
    stepped_profile(20, -0.3, 10, 0.5, 30, 0.05)
}

fn rejection(run: RunConfig) -> ConfigError {
    TransectEngine::new(run)
        .err()
        .expect("construction should fail")
}

#[test]
fn valid_inputs_construct_a_running_engine() {
    let e = TransectEngine::new(run(
        parameters(),
        flat_spin_up(5, 10, 0.5),
        uniform_forest_profiles(3, 4, 1.0, 1.0, 1.0),
        default_profile(),
    ))
    .unwrap();
    assert_eq!(e.status(), RunStatus::Running);
    assert_eq!(e.year_index(), 0);
    assert_eq!(e.state().total_years(), 5 + 4);
    assert_eq!(e.state().cell_count(), 60);
    // Spin-up deposits sit at the marsh edge.
    assert_eq!(e.state().ledger().mineral()[(0, 20)], 1000.0);
    assert_eq!(e.state().ledger().mineral()[(0, 19)], 0.0);
    assert_eq!(e.state().ledger().mineral()[(4, 29)], 1000.0);
    assert_eq!(e.state().ledger().mineral()[(4, 30)], 0.0);
    // Edge depth is measured below mean high water.
    assert!((e.state().edge_depth() - 0.2).abs() < 1e-12);
    assert!(e.initial_carbon().organic_carbon_kg > 0.0);
}

#[test]
fn rejects_invalid_parameter() {
    let params = TransectConfig {
        time_step_count: 0,
        ..parameters()
    };
    let err = rejection(run(
        params,
        flat_spin_up(5, 10, 0.5),
        uniform_forest_profiles(3, 4, 1.0, 1.0, 1.0),
        default_profile(),
    ));
    assert!(matches!(
        err,
        ConfigError::InvalidParameter { ref name, .. } if name == "time_step_count"
    ));
}

#[test]
fn rejects_spin_up_of_wrong_width() {
    let params = TransectConfig {
        marsh_width_initial: 12,
        ..parameters()
    };
    let err = rejection(run(
        params,
        flat_spin_up(5, 10, 0.5),
        uniform_forest_profiles(3, 4, 1.0, 1.0, 1.0),
        default_profile(),
    ));
    assert_eq!(
        err,
        ConfigError::ShapeMismatch {
            table: "spin_up.elevation",
            expected: (5, 12),
            actual: (5, 10),
        }
    );
}

#[test]
fn rejects_spin_up_shorter_than_forest_window() {
    let params = TransectConfig {
        forest_on: true,
        ..parameters()
    };
    let err = rejection(run(
        params,
        flat_spin_up(5, 10, 0.5),
        uniform_forest_profiles(8, 4, 1.0, 1.0, 1.0),
        default_profile(),
    ));
    assert_eq!(
        err,
        ConfigError::SpinUpTooShort {
            years: 5,
            required: 8,
        }
    );
}

#[test]
fn short_window_is_fine_without_forest() {
    assert!(TransectEngine::new(run(
        parameters(),
        flat_spin_up(5, 10, 0.5),
        uniform_forest_profiles(8, 4, 1.0, 1.0, 1.0),
        default_profile(),
    ))
    .is_ok());
}

#[test]
fn builder_failure_is_wrapped() {
    let err = rejection(run(
        parameters(),
        flat_spin_up(5, 10, 0.5),
        uniform_forest_profiles(3, 4, 1.0, 1.0, 1.0),
        vec![0.0; 25],
    ));
    assert!(matches!(
        err,
        ConfigError::Builder(ModelError::ExecutionFailed { .. })
    ));
}

#[test]
fn rejects_marsh_already_at_forest_height() {
    // Marsh at 1.0 m clears the 0.73 m forest threshold at the edge.
    let err = rejection(run(
        parameters(),
        flat_spin_up(5, 10, 0.5),
        uniform_forest_profiles(3, 4, 1.0, 1.0, 1.0),
        stepped_profile(20, -0.3, 10, 1.0, 30, 0.05),
    ));
    assert!(matches!(err, ConfigError::InvalidTransect { .. }));
}

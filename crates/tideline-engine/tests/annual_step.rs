//! Integration test: annual stepping on a hand-built transect.
//!
//! The transect is 20 bay cells at -0.3 m, 10 marsh cells at 0.5 m and
//! an upland rising 0.05 m per cell. With the default 0.7 m tidal
//! amplitude and zero minimum vegetation depth the forest threshold is
//! 0.73 m, so the first forest cell is 34. Bay rates are fixed per year
//! so every trajectory below can be worked out by hand.

use tideline_core::{mixed_deposit, RunStatus, StepError, TerminationReason};
use tideline_engine::{RunConfig, StepOutcome, TransectConfig, TransectEngine};
use tideline_model::{BayDynamics, Collaborators, ErosionFlux};
use tideline_models::EdgeErosion;
use tideline_test_utils::fixtures::{ConstantBay, FixedTransect, FlatMarsh, NoDecay, NoErosion};
use tideline_test_utils::{
    flat_spin_up, stepped_profile, uniform_forest_profiles, SPIN_UP_MINERAL,
    SPIN_UP_ORGANIC_ALLOCH, SPIN_UP_ORGANIC_AUTOCH,
};

const S: usize = 5;

fn parameters(steps: usize) -> TransectConfig {
    TransectConfig {
        name: "annual_step".into(),
        time_step_count: steps,
        relative_sea_level_rise: 0.0,
        marsh_width_initial: 10,
        bay_fetch_initial: 20.0,
        forest_on: false,
        ..TransectConfig::default()
    }
}

fn build(
    parameters: TransectConfig,
    profile: Vec<f64>,
    bay: impl BayDynamics,
    erosion: impl ErosionFlux,
    marsh: FlatMarsh,
) -> TransectEngine {
    let run = RunConfig {
        spin_up: flat_spin_up(S, parameters.marsh_width_initial, 0.5),
        forest_profiles: uniform_forest_profiles(3, 4, 100.0, 400.0, 20.0),
        models: Collaborators {
            builder: Box::new(FixedTransect::new(profile, 1.0)),
            bay: Box::new(bay),
            erosion: Box::new(erosion),
            tidal: Box::new(marsh),
            decomposer: Box::new(NoDecay),
        },
        parameters,
    };
    TransectEngine::new(run).unwrap()
}

fn engine(parameters: TransectConfig, upland_cells: usize, bay: impl BayDynamics) -> TransectEngine {
    let profile = stepped_profile(20, -0.3, 10, 0.5, upland_cells, 0.05);
    build(parameters, profile, bay, NoErosion, FlatMarsh::new(0.0))
}

/// A stopped engine refuses to step and leaves every array untouched;
/// rows past the final year were never written.
fn assert_frozen(e: &mut TransectEngine) {
    let digest = e.digest();
    assert!(e.advance().is_err());
    assert!(e.advance().is_err());
    assert_eq!(e.digest(), digest);
    let state = e.state();
    for y in e.end_year() + 1..state.total_years() {
        assert!(state.elevation().row(y).iter().all(|&z| z == 0.0), "row {y}");
        assert!(state.ledger().mineral().row(y).iter().all(|&m| m == 0.0), "row {y}");
        assert_eq!(state.series().fetch[y], 0.0, "row {y}");
        assert_eq!(state.series().marsh_edge[y], 0, "row {y}");
    }
}

#[test]
fn calm_transect_holds_steady() {
    let mut e = engine(parameters(4), 30, ConstantBay::new(0.0, 0.0));
    assert_eq!(e.state().geometry().marsh_edge(), 20);
    assert_eq!(e.state().geometry().forest_edge(), 34);

    assert_eq!(e.run_to_end(), RunStatus::Completed);
    assert_eq!(e.year_index(), 5);
    assert!(matches!(e.advance(), Err(StepError::Completed)));

    let state = e.state();
    let profile = stepped_profile(20, -0.3, 10, 0.5, 30, 0.05);
    for y in S..state.total_years() {
        assert!((state.series().fetch[y] - 20.0).abs() < 1e-9);
        assert!((state.series().bay_depth[y] - 1.0).abs() < 1e-9);
        assert_eq!(state.series().marsh_edge[y], 20);
        assert_eq!(state.series().forest_edge[y], 34);
        for (z, p) in state.elevation().row(y).iter().zip(&profile) {
            assert!((z - p).abs() < 1e-9, "year {y}: {z} vs {p}");
        }
        let r = state.fluxes()[y].residual();
        assert_eq!(r.mineral, 0.0);
        assert_eq!(r.organic, 0.0);
    }
}

#[test]
fn prograding_edge_fills_basin() {
    let mut e = engine(parameters(10), 30, ConstantBay::new(-2.4, 0.0));

    let report = e.advance().unwrap();
    assert_eq!(report.year, S);
    assert_eq!(report.outcome, StepOutcome::Advanced);
    let state = e.state();
    assert!((state.fetch() - 17.6).abs() < 1e-6);
    assert_eq!(state.series().marsh_edge[S], 18);

    // The two new cells take the old edge elevation and a bay-depth
    // deposit.
    let per_cell = mixed_deposit(1.0, 0.05, 2000.0, 85.0);
    for cell in 18..20 {
        assert_eq!(state.elevation()[(S, cell)], 0.5);
        let m = state.ledger().mineral()[(S, cell)];
        assert!((m - per_cell.mineral).abs() < 1e-6 * per_cell.mineral);
    }
    assert_eq!(state.ledger().mineral()[(S, 20)], 0.0);
    let captured = 2.0 * per_cell.mineral / 1000.0;
    assert!((state.marsh_flux().mineral - captured).abs() < 1e-6 * captured);

    // Next year's budget carries the captured mass.
    e.advance().unwrap();
    let budget = e.state().fluxes()[S + 1].marsh_mineral;
    assert!((budget - captured).abs() < 1e-6 * captured);

    e.advance().unwrap();
    let report = e.advance().unwrap();
    assert_eq!(
        report.outcome,
        StepOutcome::Terminated(TerminationReason::BasinFilled)
    );
    assert_eq!(e.end_year(), S + 3);
    assert_eq!(e.year_index(), 3);
    assert_eq!(
        e.status(),
        RunStatus::Terminated(TerminationReason::BasinFilled)
    );
    assert_eq!(
        e.advance(),
        Err(StepError::Terminated {
            reason: TerminationReason::BasinFilled
        })
    );
    assert_frozen(&mut e);
}

#[test]
fn shoaling_bay_fills_in() {
    let mut e = engine(parameters(10), 30, ConstantBay::new(0.0, -0.3));

    e.advance().unwrap();
    // Bay floor rose 0.3 m; the deposit is recorded on every bay cell.
    let state = e.state();
    let deposit = mixed_deposit(0.3, 0.05, 2000.0, 85.0);
    assert!(state.elevation()[(S, 0)].abs() < 1e-6);
    let m = state.ledger().mineral()[(S, 7)];
    assert!((m - deposit.mineral).abs() < 1e-4 * deposit.mineral);
    assert_eq!(state.ledger().mineral()[(S, 25)], 0.0);

    e.advance().unwrap();
    let report = e.advance().unwrap();
    assert_eq!(report.year, S + 2);
    assert_eq!(
        report.outcome,
        StepOutcome::Terminated(TerminationReason::BayFilled)
    );
    assert_eq!(e.end_year(), S + 2);
    assert!((e.state().series().bay_depth[S + 2] - 0.1).abs() < 1e-6);
    assert_frozen(&mut e);
}

#[test]
fn retreating_edge_stops_short_of_forest() {
    let mut e = engine(parameters(5), 30, ConstantBay::new(7.6, 0.0));
    assert_eq!(e.run_to_end(), RunStatus::Completed);

    let state = e.state();
    let series = state.series();
    assert_eq!(series.marsh_edge[S], 28);
    assert!((series.fetch[S] - 27.6).abs() < 1e-6);
    for y in S + 1..state.total_years() {
        assert_eq!(series.marsh_edge[y], 33, "year {y}");
        assert_eq!(series.forest_edge[y], 34, "year {y}");
        assert!((series.fetch[y] - 32.6).abs() < 1e-6);
    }
    // Cells crossed by the edge lost their whole record and became bay.
    for cell in 20..28 {
        assert!(state.ledger().cumulative_mass(cell, S).abs() < 1e-6);
        assert!((state.elevation()[(S, cell)] + 0.3).abs() < 1e-9);
    }
    assert!(state.ledger().cumulative_mass(28, S) > 0.0);
}

#[test]
fn retreat_releases_crossed_marsh_columns() {
    let profile = stepped_profile(20, -0.3, 10, 0.5, 30, 0.05);
    let mut e = build(
        parameters(5),
        profile,
        ConstantBay::new(7.6, 0.0),
        EdgeErosion,
        FlatMarsh::new(0.0),
    );
    let rhou = e.config().underlying_density();
    e.advance().unwrap();

    // Cells 20..28 release their five spin-up layers plus 0.8 m of
    // underlying sediment down to the bay bottom at -0.3 m.
    let crossed = 8.0;
    let underlying = 0.8 * rhou * 1000.0;
    let mineral = crossed * (S as f64 * SPIN_UP_MINERAL + 0.95 * underlying) / 1000.0;
    let organic = crossed
        * (S as f64 * (SPIN_UP_ORGANIC_ALLOCH + SPIN_UP_ORGANIC_AUTOCH) + 0.05 * underlying)
        / 1000.0;
    let flux = e.state().fluxes()[S];
    assert!((flux.erosion_mineral - mineral).abs() < 1e-9 * mineral);
    assert!((flux.erosion_organic - organic).abs() < 1e-9 * organic);
    // No budget, no export: everything released is stored in the bay.
    assert!((flux.bay_mineral - mineral).abs() < 1e-9 * mineral);
    assert_eq!(e.state().series().edge_flood[S], 0);
    assert_eq!(e.state().marsh_flux().mineral, 0.0);
}

#[test]
fn retreat_into_short_domain_floods_basin() {
    let mut e = engine(parameters(10), 10, ConstantBay::new(7.6, 0.0));
    assert_eq!(e.state().cell_count(), 40);
    assert_eq!(e.advance().unwrap().outcome, StepOutcome::Advanced);
    let report = e.advance().unwrap();
    assert_eq!(
        report.outcome,
        StepOutcome::Terminated(TerminationReason::MarshRetreated)
    );
    assert_eq!(e.end_year(), S + 1);
}

#[test]
fn rapid_sea_level_rise_drowns_marsh_then_barrier() {
    let params = TransectConfig {
        relative_sea_level_rise: 1000.0,
        ..parameters(10)
    };
    let mut e = engine(params, 30, ConstantBay::new(0.0, 0.0));
    // Forest starts where the upland clears 1.73 m.
    assert_eq!(e.state().geometry().forest_edge(), 54);

    // High water is 1.7 m: marsh and low upland cells up to 1.15 m have
    // no roots and sit more than the 0.52 m vegetation limit under water.
    let report = e.advance().unwrap();
    assert_eq!(report.outcome, StepOutcome::Advanced);
    assert_eq!(report.flooded_cells.len(), 23);
    assert_eq!(report.flooded_cells[0], 20);
    assert_eq!(report.flooded_cells[22], 42);
    let state = e.state();
    assert_eq!(state.series().edge_flood[S], 23);
    assert_eq!(state.series().marsh_edge[S], 43);
    assert!((state.fetch() - 43.0).abs() < 1e-6);
    let floor = state.elevation()[(S, 0)];
    assert!(state.elevation().row(S)[..43].iter().all(|&z| z == floor));

    let report = e.advance().unwrap();
    assert_eq!(
        report.outcome,
        StepOutcome::Terminated(TerminationReason::BarrierDrowned)
    );
    assert_eq!(e.end_year(), S + 1);
}

#[test]
fn drowned_edge_release_comes_out_of_marsh_flux() {
    let params = TransectConfig {
        relative_sea_level_rise: 1000.0,
        ..parameters(10)
    };
    let profile = stepped_profile(20, -0.3, 10, 0.5, 30, 0.05);
    let mut e = build(
        params,
        profile.clone(),
        ConstantBay::new(0.0, 0.0),
        EdgeErosion,
        FlatMarsh::new(1000.0),
    );
    let rhou = e.config().underlying_density();
    let report = e.advance().unwrap();
    assert_eq!(report.outcome, StepOutcome::Advanced);
    assert_eq!(report.flooded_cells.len(), 23);

    let state = e.state();
    // The fetch did not move before flooding, so the edge phase released
    // nothing and the flux record books no erosion.
    let flux = state.fluxes()[S];
    assert_eq!(flux.erosion_mineral, 0.0);
    assert_eq!(flux.erosion_organic, 0.0);

    // Flooding stripped the layers of cells 20..43, so the recomputed
    // release is the underlying sediment between each original surface
    // and the -0.3 m bay bottom.
    let thickness: f64 = profile[20..43].iter().map(|z| z + 0.3).sum();
    let released = thickness * rhou;
    // The platform ran from cell 20 through forest cell 54.
    let tidal = 1000.0 * 35.0 / 1000.0;
    let flux = state.marsh_flux();
    let expected = tidal - 0.95 * released;
    assert!(
        (flux.mineral - expected).abs() < 1e-9 * released,
        "{} vs {expected}",
        flux.mineral
    );
    assert!((flux.organic + 0.05 * released).abs() < 1e-9 * released);
    for cell in 20..43 {
        assert!(state.ledger().cumulative_mass(cell, S).abs() < 1e-9);
    }
}

#[test]
fn injected_marsh_supply_builds_short_platform() {
    let params = TransectConfig {
        marsh_width_initial: 5,
        mineral_flux_bay_to_marsh: 5000.0,
        ..parameters(3)
    };
    let profile = stepped_profile(20, -0.3, 5, 0.5, 5, 0.05);
    assert_eq!(profile.len(), 30);
    let mut e = build(
        params,
        profile,
        ConstantBay::new(0.0, 0.0),
        NoErosion,
        FlatMarsh::new(100.0),
    );
    assert_eq!(e.state().geometry().forest_edge(), 29);

    let report = e.advance().unwrap();
    let state = e.state();
    // The platform (cells 20..30) received mineral sediment.
    assert!(state.ledger().mineral().row(S)[20..30].iter().all(|&m| m == 100.0));
    assert!(state.series().fetch[S] <= 20.0);
    // The injected flux is the budget booked for the first year.
    assert_eq!(state.fluxes()[S].marsh_mineral, 5000.0);
    assert!(state.fluxes()[S].residual().mineral.abs() < 1e-9);

    // The edge sits within 10 cells of the domain end.
    assert_eq!(
        report.outcome,
        StepOutcome::Terminated(TerminationReason::MarshRetreated)
    );
    assert_eq!(e.end_year(), S);
    assert_frozen(&mut e);
}

#[test]
fn forest_ages_and_grows() {
    let params = TransectConfig {
        forest_on: true,
        ..parameters(3)
    };
    let mut e = engine(params, 30, ConstantBay::new(0.0, 0.0));
    assert_eq!(e.state().forest_age(), 60);
    e.advance().unwrap();

    let state = e.state();
    assert_eq!(state.forest_age(), 61);
    // Backfill window is the last three spin-up years.
    assert_eq!(state.ledger().organic_autoch()[(S - 1, 45)], 100.0);
    assert_eq!(state.ledger().mineral()[(S - 1, 45)], 400.0);
    // Current-year surface deposit and canopy on forest cells only.
    assert_eq!(state.ledger().mineral()[(S, 45)], 400.0);
    assert!(state.aboveground_biomass()[(S, 45)] > 0.0);
    assert_eq!(state.aboveground_biomass()[(S, 25)], 0.0);
}

//! The reference models chained by hand over one year: build a transect,
//! evaluate the bay, settle sediment on the platform, then decompose.

use tideline_core::{SedimentMass, YearGrid};
use tideline_model::{
    BayDynamics, BayParams, BayState, Decomposer, DecompositionInput, TidalInput,
    TidalSimulator, TransectBuilder, TransectRequest,
};
use tideline_models::{DepthDecay, SettlingMarsh, SlopeTransect, WaveBay};
use tideline_strata::SedimentLedger;
use tideline_test_utils::seeded_spin_up;

const AMP: f64 = 0.7;

fn request(spin: &YearGrid) -> TransectRequest<'_> {
    TransectRequest {
        sea_level_rise_mm: 4.0,
        reference_concentration_mg: 10.0,
        upland_slope: 0.005,
        bay_fetch: 200.0,
        spin_up_elevation: spin,
        tidal_amplitude: AMP,
        wind_speed: 6.0,
        total_years: spin.years() + 3,
        forest_width_fixed: true,
        forest_width: 100,
    }
}

#[test]
fn one_year_through_the_reference_models() {
    let spin = seeded_spin_up(3, 10, 50, 0.35, 0.003, 0.01);
    let transect = SlopeTransect::new(1.2)
        .build(&request(spin.elevation()))
        .unwrap();
    assert_eq!(transect.cell_count, 200 + 50 + 100);

    let params = BayParams {
        mineral_density: 2000.0,
        tidal_period: 12.5 * 3600.0,
        cell_count: transect.cell_count,
        settling_velocity: 0.5e-3,
        critical_shear: 0.1,
        reference_concentration: 0.01,
        wind_speed: 6.0,
        progradation_coeff: 2.0,
        erosion_coeff: 0.16 / (365.0 * 24.0 * 3600.0),
        tidal_amplitude: AMP,
        sea_level_rise: 4e-3 / (365.0 * 24.0 * 3600.0),
        marsh_flux: 0.0,
        erodibility: 1e-4,
        bank_distance: 10.0,
        edge_depth: 0.3,
        bay_density: 1100.0,
        edge_density: 900.0,
    };
    let rates = WaveBay::default()
        .rates(
            BayState {
                fetch: 200.0,
                depth: transect.bay_depth,
            },
            &params,
        )
        .unwrap();
    assert!(rates.edge_concentration >= params.reference_concentration);

    let s = spin.years();
    let platform = &transect.elevation.row(s - 1)[200..250];
    let tidal = TidalInput {
        elevation: platform,
        msl: 0.004,
        edge_concentration: rates.edge_concentration,
        organic_fraction: 0.05,
        tidal_range: 2.0 * AMP,
        iterations: 500,
        tidal_period: 12.5 * 3600.0,
        sub_cycle: 12.5 * 3600.0 / 500.0,
        settling_velocity: 0.05e-3,
        cycles_per_year: 365.0 * 24.0 / 12.5,
        max_biomass: 2500.0,
        min_depth: 0.0,
        max_depth: 0.7167 * 2.0 * AMP - 0.483,
        organic_density: 85.0,
        mineral_density: 2000.0,
    };
    let out = SettlingMarsh::default().simulate(&tidal).unwrap();
    out.check_len(50).unwrap();
    assert!(out.mineral_flux > 0.0);

    let mut elevation = transect.elevation.clone();
    elevation.row_mut(s)[200..250].copy_from_slice(&out.elevation);
    let mut ledger = SedimentLedger::new(elevation.years(), transect.cell_count);
    for (i, &autoch) in out.organic_autoch.iter().enumerate() {
        ledger.organic_autoch_mut()[(s, 200 + i)] = autoch;
    }
    let before: f64 = ledger.organic_autoch().row(s).iter().sum();

    let decay = DepthDecay
        .decompose(
            &DecompositionInput {
                elevation: &elevation,
                marsh_edge: 200,
                forest_edge: 250,
                year: s,
                cell_count: transect.cell_count,
                zero_depth: 0.4,
                coefficient: 0.1,
                organic_density: 85.0,
            },
            ledger.organic_autoch_mut(),
        )
        .unwrap();
    let after: f64 = ledger.organic_autoch().row(s).iter().sum();
    assert!((before - after - decay.organic_flux * 1000.0).abs() < 1e-6);
    assert!(decay.compaction.iter().all(|&c| c >= 0.0));
    assert_eq!(ledger.column_mass(0, 0), SedimentMass::ZERO.total());
}

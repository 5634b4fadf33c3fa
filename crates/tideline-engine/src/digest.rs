//! State digests for determinism checks.
//!
//! Uses FNV-1a over the bit patterns of every grid, series and flux
//! record. Not cryptographically secure; two runs with identical inputs
//! must produce identical digests.

use tideline_core::YearGrid;
use tideline_strata::Pool;

use crate::state::TransectState;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

fn fnv1a_f64s(hash: u64, values: &[f64]) -> u64 {
    let hash = fnv1a_u64(hash, values.len() as u64);
    values.iter().fold(hash, |h, v| fnv1a_u64(h, v.to_bits()))
}

fn fnv1a_grid(hash: u64, grid: &YearGrid) -> u64 {
    let (years, cells) = grid.shape();
    let hash = fnv1a_u64(fnv1a_u64(hash, years as u64), cells as u64);
    fnv1a_f64s(hash, grid.as_slice())
}

/// Digest of the complete transect state.
pub fn state_digest(state: &TransectState) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_grid(hash, state.elevation());
    for pool in Pool::ALL {
        hash = fnv1a_grid(hash, state.ledger().pool(pool));
    }
    hash = fnv1a_grid(hash, state.aboveground_biomass());
    hash = fnv1a_grid(hash, state.root_input());

    let s = state.series();
    for series in [
        &s.fetch,
        &s.bay_depth,
        &s.msl,
        &s.organic_content,
        &s.edge_concentration,
        &s.edge_height,
        &s.bay_sediment_density,
        &s.edge_density,
        &s.edge_mass,
        &s.decomposition_flux,
        &s.belowground_biomass,
        &s.mean_accretion,
        &s.organic_autoch_total,
        &s.organic_alloch_total,
    ] {
        hash = fnv1a_f64s(hash, series);
    }
    for series in [&s.marsh_edge, &s.forest_edge, &s.edge_flood] {
        hash = series.iter().fold(hash, |h, &v| fnv1a_u64(h, v as u64));
    }
    for m in s.bay_export.iter().chain(&s.bay_storage) {
        hash = fnv1a_u64(fnv1a_u64(hash, m.mineral.to_bits()), m.organic.to_bits());
    }
    for record in state.fluxes() {
        hash = fnv1a_f64s(hash, &record.as_array());
    }

    for v in [
        state.fetch(),
        state.bay_depth(),
        state.edge_depth(),
        state.bay_density(),
        state.marsh_flux().mineral,
        state.marsh_flux().organic,
    ] {
        hash = fnv1a_u64(hash, v.to_bits());
    }
    fnv1a_u64(hash, u64::from(state.forest_age()))
}

//! Marsh-edge resolver.
//!
//! Turns the integrated bay fetch into a new marsh edge, lays down new
//! marsh where the edge advanced, strips the record where it retreated,
//! and afterwards converts drowned edge cells to bay.

use smallvec::SmallVec;
use tideline_core::{mixed_deposit, SedimentMass, YearGrid};
use tideline_strata::{erosion_boundary_year, SedimentLedger};

/// Keep the marsh edge off the forest edge.
///
/// If `ceil(new_fetch) + bay_boundary` would reach `forest_edge`, the
/// fetch instead grows from `prior_fetch` just far enough to leave the
/// marsh edge one cell seaward of the forest.
pub fn clamp_fetch(
    new_fetch: f64,
    prior_fetch: f64,
    bay_boundary: usize,
    marsh_edge: usize,
    forest_edge: usize,
) -> f64 {
    let target = new_fetch.ceil().max(0.0) as usize + bay_boundary;
    if target >= forest_edge {
        prior_fetch + forest_edge as f64 - marsh_edge as f64 - 1.0
    } else {
        new_fetch
    }
}

/// Densities and composition of sediment deposited at the marsh edge.
#[derive(Clone, Copy, Debug)]
pub struct EdgeSediment {
    /// Organic fraction of bay sediment.
    pub organic_fraction: f64,
    /// Mineral density (kg/m3).
    pub mineral_density: f64,
    /// Organic density (kg/m3).
    pub organic_density: f64,
}

/// Fill the cells between the new and prior marsh edge with marsh.
///
/// `platform` is the working elevation slice starting at `new_edge`; its
/// first `prior_edge - new_edge` cells take the prior edge elevation.
/// Each new cell receives a `bay_depth`-thick deposit. Returns the mass
/// captured from the bay (kg).
#[allow(clippy::too_many_arguments)]
pub fn prograde(
    ledger: &mut SedimentLedger,
    elevation: &YearGrid,
    platform: &mut [f64],
    year: usize,
    prior_edge: usize,
    new_edge: usize,
    bay_depth: f64,
    sediment: EdgeSediment,
) -> SedimentMass {
    let cells = prior_edge.saturating_sub(new_edge);
    if cells == 0 {
        return SedimentMass::ZERO;
    }
    let last = elevation.cells().saturating_sub(1);
    let edge_z = elevation[(year - 1, prior_edge.min(last))];
    let n = cells.min(platform.len());
    platform[..n].fill(edge_z);

    let per_cell = mixed_deposit(
        bay_depth,
        sediment.organic_fraction,
        sediment.mineral_density,
        sediment.organic_density,
    );
    ledger.deposit(year, new_edge..prior_edge, per_cell);
    per_cell.scaled(cells as f64).to_kg()
}

/// Strip the record of every cell the edge retreated across.
///
/// Each cell in `prior_edge..new_edge` loses everything laid down since
/// its erosion boundary year relative to `bottom`. Returns the removed
/// mass (g).
pub fn erode_retreat(
    ledger: &mut SedimentLedger,
    elevation: &YearGrid,
    year: usize,
    prior_edge: usize,
    new_edge: usize,
    bottom: f64,
) -> SedimentMass {
    let mut removed = SedimentMass::ZERO;
    for cell in prior_edge..new_edge.min(elevation.cells()) {
        let boundary = erosion_boundary_year(elevation, cell, year, bottom).unwrap_or(0);
        removed += ledger.erode_above(cell, year, boundary);
    }
    removed
}

/// Conditions under which an edge cell drowns.
#[derive(Clone, Copy, Debug)]
pub struct FloodCriteria {
    /// Mean high water this year (m).
    pub high_water: f64,
    /// Depth below high water beyond which vegetation cannot grow (m).
    pub max_vegetation_depth: f64,
    /// Bay bottom elevation used for erosion boundaries (m).
    pub bottom: f64,
}

/// Convert drowned cells at the marsh edge to bay.
///
/// Starting at `marsh_edge`, a cell drowns when it produced no root
/// material this year and sits at least `max_vegetation_depth` below
/// high water. Each drowned cell's record is stripped back to its
/// erosion boundary year. The scan stops at the first surviving cell, at
/// `forest_edge`, or at the domain end. Returns the drowned cells in
/// order; the new marsh edge is `marsh_edge + len`.
pub fn flood_scan(
    ledger: &mut SedimentLedger,
    elevation: &YearGrid,
    year: usize,
    marsh_edge: usize,
    forest_edge: usize,
    criteria: FloodCriteria,
) -> SmallVec<[usize; 8]> {
    let cells = elevation.cells();
    let mut flooded = SmallVec::new();
    let mut edge = marsh_edge;
    while edge < cells && edge < forest_edge {
        let rooted = ledger.organic_autoch()[(year, edge)] > 0.0;
        let depth = criteria.high_water - elevation[(year, edge)];
        if rooted || depth < criteria.max_vegetation_depth {
            break;
        }
        let boundary = erosion_boundary_year(elevation, edge, year, criteria.bottom).unwrap_or(0);
        ledger.erode_above(edge, year, boundary);
        flooded.push(edge);
        edge += 1;
    }
    flooded
}

//! Forest aging and soil update.
//!
//! The forest soil column is not simulated layer by layer. Instead the
//! last `depth_rows` spin-up years of every forest cell are rewritten
//! each year from the age-indexed profile tables, and the current year
//! receives a surface deposit that decays with height above sea level.

use tideline_core::YearGrid;
use tideline_model::ForestProfiles;
use tideline_strata::{Pool, SedimentLedger};

/// Forest soil and biomass parameters.
#[derive(Clone, Copy, Debug)]
pub struct ForestGrowth {
    /// Peak aboveground biomass (g/m2).
    pub max_biomass: f64,
    /// Biomass factor at the marsh-forest boundary.
    pub edge_biomass: f64,
    /// Growth rate with height above sea level.
    pub growth_rate: f64,
    /// Background soil carbon accumulation (g/m2/yr).
    pub background: f64,
    /// Carbon layer from wetted soils.
    pub wetted: f64,
    /// Decay of belowground carbon with height above sea level.
    pub decay: f64,
}

impl ForestGrowth {
    /// Surface organic deposit at height `above_msl`.
    pub fn soil_organic(&self, above_msl: f64) -> f64 {
        self.background + self.wetted * (-self.decay * above_msl).exp()
    }

    /// Aboveground biomass at height `above_msl`.
    pub fn aboveground(&self, above_msl: f64) -> f64 {
        self.max_biomass / (1.0 + self.edge_biomass * (-self.growth_rate * above_msl).exp())
    }
}

/// Rewrite the spin-up backfill window from the profile tables.
///
/// Cells `prior_forest_edge..=forest_edge` (marsh converted from forest)
/// get organic matter plus root biomass; cells `forest_edge..B` get the
/// organic and mineral profiles. The window is the last
/// `profiles.depth_rows()` years before `spin_up_years`.
pub fn backfill(
    ledger: &mut SedimentLedger,
    profiles: &ForestProfiles,
    spin_up_years: usize,
    age: u32,
    prior_forest_edge: usize,
    forest_edge: usize,
) {
    let (_, cells) = ledger.shape();
    if cells == 0 {
        return;
    }
    let column = profiles.age_column(age);
    let window = profiles.depth_rows().min(spin_up_years);
    let first_row = spin_up_years - window;

    let transition_end = forest_edge.min(cells - 1);
    for cell in prior_forest_edge..=transition_end {
        let autoch = ledger.pool_mut(Pool::OrganicAutochthonous);
        for d in 0..window {
            autoch[(first_row + d, cell)] =
                profiles.organic()[(d, column)] + profiles.roots()[(d, column)];
        }
    }
    for cell in forest_edge..cells {
        for d in 0..window {
            ledger.pool_mut(Pool::OrganicAutochthonous)[(first_row + d, cell)] =
                profiles.organic()[(d, column)];
            ledger.pool_mut(Pool::Mineral)[(first_row + d, cell)] =
                profiles.mineral()[(d, column)];
        }
    }
}

/// Current-year forest soil deposit and aboveground biomass for cells
/// `forest_edge..B`.
#[allow(clippy::too_many_arguments)]
pub fn grow(
    ledger: &mut SedimentLedger,
    aboveground: &mut YearGrid,
    elevation: &YearGrid,
    profiles: &ForestProfiles,
    year: usize,
    msl: f64,
    forest_edge: usize,
    growth: &ForestGrowth,
) {
    let cells = elevation.cells();
    let surface_mineral = profiles.mineral()[(0, profiles.ages() - 1)];
    for cell in forest_edge.min(cells)..cells {
        let above = elevation[(year, cell)] - msl;
        ledger.pool_mut(Pool::OrganicAutochthonous)[(year, cell)] = growth.soil_organic(above);
        ledger.pool_mut(Pool::Mineral)[(year, cell)] = surface_mineral;
        aboveground[(year, cell)] = growth.aboveground(above);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROWTH: ForestGrowth = ForestGrowth {
        max_biomass: 5000.0,
        edge_biomass: 4.0,
        growth_rate: 2.0,
        background: 1e-4,
        wetted: 5.0,
        decay: 2.0,
    };

    fn profiles() -> ForestProfiles {
        // organic = 10 * age, mineral = 100 + depth, roots = 1.
        let organic = YearGrid::from_fn(3, 4, |_, a| 10.0 * (a + 1) as f64);
        let mineral = YearGrid::from_fn(3, 4, |d, _| 100.0 + d as f64);
        let roots = YearGrid::from_fn(3, 4, |_, _| 1.0);
        ForestProfiles::new(organic, mineral, roots).unwrap()
    }

    #[test]
    fn backfill_uses_age_column() {
        let mut ledger = SedimentLedger::new(6, 8);
        backfill(&mut ledger, &profiles(), 5, 2, 4, 6);
        // Window is rows 2..5.
        assert_eq!(ledger.organic_autoch()[(1, 6)], 0.0);
        assert_eq!(ledger.organic_autoch()[(2, 6)], 20.0);
        assert_eq!(ledger.mineral()[(4, 7)], 102.0);
        // Transitional cells carry roots but no mineral profile.
        assert_eq!(ledger.organic_autoch()[(3, 4)], 21.0);
        assert_eq!(ledger.mineral()[(3, 4)], 0.0);
        // Marsh cells are untouched.
        assert_eq!(ledger.organic_autoch()[(3, 3)], 0.0);
    }

    #[test]
    fn old_forests_use_last_column() {
        let mut ledger = SedimentLedger::new(6, 8);
        backfill(&mut ledger, &profiles(), 5, 200, 7, 7);
        assert_eq!(ledger.organic_autoch()[(2, 7)], 40.0);
    }

    #[test]
    fn growth_decays_with_height() {
        assert!(GROWTH.soil_organic(0.0) > GROWTH.soil_organic(1.0));
        assert!(GROWTH.aboveground(2.0) > GROWTH.aboveground(0.0));
        assert!((GROWTH.aboveground(0.0) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn grow_writes_forest_cells_only() {
        let elev = YearGrid::from_fn(6, 8, |_, c| c as f64 * 0.1);
        let mut ledger = SedimentLedger::new(6, 8);
        let mut agb = YearGrid::zeros(6, 8);
        grow(&mut ledger, &mut agb, &elev, &profiles(), 5, 0.0, 6, &GROWTH);
        assert_eq!(agb[(5, 5)], 0.0);
        assert!(agb[(5, 6)] > 0.0);
        assert_eq!(ledger.mineral()[(5, 7)], 100.0);
        assert!((ledger.organic_autoch()[(5, 6)] - GROWTH.soil_organic(0.6)).abs() < 1e-12);
    }
}

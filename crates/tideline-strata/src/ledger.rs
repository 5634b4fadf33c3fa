//! Per-year, per-cell sediment deposition records.
//!
//! Deposits are positive entries in a year row. Erosion is recorded as a
//! negative entry in the current year row equal to everything deposited
//! in that cell since the erosion boundary year, so the column sum from
//! the boundary year onward drops to zero.

use std::ops::Range;

use tideline_core::{SedimentMass, YearGrid};

/// One of the three deposition records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pool {
    /// Organic matter delivered from the bay.
    OrganicAllochthonous,
    /// Organic matter produced in place (roots, forest litter).
    OrganicAutochthonous,
    /// Mineral sediment.
    Mineral,
}

impl Pool {
    /// Every pool, in storage order.
    pub const ALL: [Pool; 3] = [
        Pool::OrganicAllochthonous,
        Pool::OrganicAutochthonous,
        Pool::Mineral,
    ];

    /// Short name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Pool::OrganicAllochthonous => "organic_alloch",
            Pool::OrganicAutochthonous => "organic_autoch",
            Pool::Mineral => "mineral",
        }
    }
}

/// The three parallel deposition records for a transect.
#[derive(Clone, Debug, PartialEq)]
pub struct SedimentLedger {
    organic_alloch: YearGrid,
    organic_autoch: YearGrid,
    mineral: YearGrid,
}

impl SedimentLedger {
    /// Zero-filled ledger of `years x cells`.
    pub fn new(years: usize, cells: usize) -> Self {
        Self {
            organic_alloch: YearGrid::zeros(years, cells),
            organic_autoch: YearGrid::zeros(years, cells),
            mineral: YearGrid::zeros(years, cells),
        }
    }

    /// `(years, cells)`.
    pub fn shape(&self) -> (usize, usize) {
        self.mineral.shape()
    }

    /// Read one pool.
    pub fn pool(&self, pool: Pool) -> &YearGrid {
        match pool {
            Pool::OrganicAllochthonous => &self.organic_alloch,
            Pool::OrganicAutochthonous => &self.organic_autoch,
            Pool::Mineral => &self.mineral,
        }
    }

    /// Mutate one pool.
    pub fn pool_mut(&mut self, pool: Pool) -> &mut YearGrid {
        match pool {
            Pool::OrganicAllochthonous => &mut self.organic_alloch,
            Pool::OrganicAutochthonous => &mut self.organic_autoch,
            Pool::Mineral => &mut self.mineral,
        }
    }

    /// Allochthonous organic record.
    pub fn organic_alloch(&self) -> &YearGrid {
        &self.organic_alloch
    }

    /// Autochthonous organic record.
    pub fn organic_autoch(&self) -> &YearGrid {
        &self.organic_autoch
    }

    /// Mineral record.
    pub fn mineral(&self) -> &YearGrid {
        &self.mineral
    }

    /// Mutable autochthonous organic record (for decomposition).
    pub fn organic_autoch_mut(&mut self) -> &mut YearGrid {
        &mut self.organic_autoch
    }

    /// Add bay-derived sediment to `cells` in `year`.
    ///
    /// The mineral part goes to the mineral record and the organic part
    /// to the allochthonous record. Cells past the domain are ignored.
    pub fn deposit(&mut self, year: usize, cells: Range<usize>, mass: SedimentMass) {
        let end = cells.end.min(self.mineral.cells());
        if cells.start >= end {
            return;
        }
        for v in &mut self.mineral.row_mut(year)[cells.start..end] {
            *v += mass.mineral;
        }
        for v in &mut self.organic_alloch.row_mut(year)[cells.start..end] {
            *v += mass.organic;
        }
    }

    /// Like [`deposit()`](Self::deposit), but a negative entry never
    /// removes more than a cell holds in that record through `year`.
    ///
    /// Returns the mass actually applied, summed over `cells` (grams).
    pub fn deposit_bounded(
        &mut self,
        year: usize,
        cells: Range<usize>,
        mass: SedimentMass,
    ) -> SedimentMass {
        let end = cells.end.min(self.mineral.cells());
        let mut applied = SedimentMass::ZERO;
        for cell in cells.start..end {
            applied.mineral += add_bounded(&mut self.mineral, year, cell, mass.mineral);
            applied.organic += add_bounded(&mut self.organic_alloch, year, cell, mass.organic);
        }
        applied
    }

    /// Copy a spin-up block into rows `0..block.years()` starting at
    /// column `first_cell`.
    ///
    /// Returns `false` (and writes nothing) if the block does not fit.
    pub fn load_block(&mut self, pool: Pool, first_cell: usize, block: &YearGrid) -> bool {
        let grid = self.pool_mut(pool);
        if block.years() > grid.years() || first_cell + block.cells() > grid.cells() {
            return false;
        }
        for y in 0..block.years() {
            grid.row_mut(y)[first_cell..first_cell + block.cells()].copy_from_slice(block.row(y));
        }
        true
    }

    /// Total mass (all pools, grams) in `cell` from `first_year` onward.
    pub fn column_mass(&self, cell: usize, first_year: usize) -> f64 {
        Pool::ALL
            .iter()
            .map(|&p| self.pool(p).column_sum_from(cell, first_year))
            .sum()
    }

    /// Cumulative mass (all pools, grams) in `cell` through `year`.
    pub fn cumulative_mass(&self, cell: usize, year: usize) -> f64 {
        Pool::ALL
            .iter()
            .map(|&p| self.pool(p).column_sum(cell, 0..year + 1))
            .sum()
    }

    /// Remove everything deposited in `cell` since `boundary_year`.
    ///
    /// Writes the negated column sums from `boundary_year` onward into row
    /// `year` of every pool and returns the removed mass in grams
    /// (organic = autochthonous + allochthonous). A column with no
    /// deposits above the boundary is left unchanged.
    pub fn erode_above(&mut self, cell: usize, year: usize, boundary_year: usize) -> SedimentMass {
        let mut removed = SedimentMass::ZERO;
        for pool in Pool::ALL {
            let grid = self.pool_mut(pool);
            let mass = grid.column_sum_from(cell, boundary_year);
            if mass != 0.0 {
                grid[(year, cell)] -= mass;
            }
            match pool {
                Pool::Mineral => removed.mineral += mass,
                _ => removed.organic += mass,
            }
        }
        removed
    }

    /// Whole-transect organic totals `(autochthonous, allochthonous)` in
    /// grams through `year`.
    pub fn organic_totals(&self, year: usize) -> (f64, f64) {
        (
            self.organic_autoch.total_through(year),
            self.organic_alloch.total_through(year),
        )
    }
}

fn add_bounded(grid: &mut YearGrid, year: usize, cell: usize, mass: f64) -> f64 {
    let held = grid.column_sum(cell, 0..year + 1).max(0.0);
    let applied = mass.max(-held);
    grid[(year, cell)] += applied;
    applied
}

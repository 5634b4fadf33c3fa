//! Read-only historical inputs consumed at construction.
//!
//! How these tables are stored on disk is the caller's concern; the
//! constructors here only check shapes.

use tideline_core::{ConfigError, YearGrid};

// ── SpinUp ─────────────────────────────────────────────────────────

/// Pre-simulated marsh history for the spin-up years.
///
/// Four grids of identical shape `spin_up_years x marsh_width`: platform
/// elevation and the three deposition records (grams).
#[derive(Clone, Debug, PartialEq)]
pub struct SpinUp {
    elevation: YearGrid,
    mineral: YearGrid,
    organic_alloch: YearGrid,
    organic_autoch: YearGrid,
}

impl SpinUp {
    /// Validate and wrap spin-up tables.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyDomain`] if the elevation table has no rows or
    /// columns; [`ConfigError::ShapeMismatch`] if any deposition table
    /// differs in shape from the elevation table.
    pub fn new(
        elevation: YearGrid,
        mineral: YearGrid,
        organic_alloch: YearGrid,
        organic_autoch: YearGrid,
    ) -> Result<Self, ConfigError> {
        let shape = elevation.shape();
        if shape.0 == 0 || shape.1 == 0 {
            return Err(ConfigError::EmptyDomain);
        }
        for (table, grid) in [
            ("spin_up.mineral", &mineral),
            ("spin_up.organic_alloch", &organic_alloch),
            ("spin_up.organic_autoch", &organic_autoch),
        ] {
            if grid.shape() != shape {
                return Err(ConfigError::ShapeMismatch {
                    table,
                    expected: shape,
                    actual: grid.shape(),
                });
            }
        }
        Ok(Self {
            elevation,
            mineral,
            organic_alloch,
            organic_autoch,
        })
    }

    /// Number of spin-up years `S`.
    pub fn years(&self) -> usize {
        self.elevation.years()
    }

    /// Number of marsh cells in the spin-up profile.
    pub fn marsh_width(&self) -> usize {
        self.elevation.cells()
    }

    /// Platform elevation history.
    pub fn elevation(&self) -> &YearGrid {
        &self.elevation
    }

    /// Mineral deposition history.
    pub fn mineral(&self) -> &YearGrid {
        &self.mineral
    }

    /// Allochthonous organic deposition history.
    pub fn organic_alloch(&self) -> &YearGrid {
        &self.organic_alloch
    }

    /// Autochthonous organic deposition history.
    pub fn organic_autoch(&self) -> &YearGrid {
        &self.organic_autoch
    }

    /// Organic carbon stock of the spin-up marsh.
    pub fn initial_carbon(&self) -> InitialMarshCarbon {
        let last = self.years() - 1;
        let organic_kg = (self.organic_alloch.total_through(last)
            + self.organic_autoch.total_through(last))
            / 1000.0;
        let mineral_kg = self.mineral.total_through(last) / 1000.0;
        InitialMarshCarbon::from_masses(organic_kg, mineral_kg)
    }
}

/// Carbon content of the spin-up marsh deposit.
///
/// Loss-on-ignition is converted to organic carbon with the quadratic
/// relation of Craft et al. (1991): `OC% = 0.4 LOI + 0.0025 LOI^2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialMarshCarbon {
    /// Organic matter (kg).
    pub organic_kg: f64,
    /// Mineral matter (kg).
    pub mineral_kg: f64,
    /// Loss on ignition (%).
    pub loi_percent: f64,
    /// Organic carbon content (%).
    pub organic_carbon_percent: f64,
    /// Organic carbon (kg).
    pub organic_carbon_kg: f64,
}

impl InitialMarshCarbon {
    /// Derive carbon figures from organic and mineral masses.
    pub fn from_masses(organic_kg: f64, mineral_kg: f64) -> Self {
        let total = organic_kg + mineral_kg;
        let loi_percent = if total > 0.0 {
            organic_kg / total * 100.0
        } else {
            0.0
        };
        let organic_carbon_percent = 0.4 * loi_percent + 0.0025 * loi_percent * loi_percent;
        Self {
            organic_kg,
            mineral_kg,
            loi_percent,
            organic_carbon_percent,
            organic_carbon_kg: organic_carbon_percent / 100.0 * total,
        }
    }
}

// ── ForestProfiles ─────────────────────────────────────────────────

/// Forest soil lookup tables indexed by depth increment (rows) and
/// forest age in years (columns, age 1 in column 0).
#[derive(Clone, Debug, PartialEq)]
pub struct ForestProfiles {
    organic: YearGrid,
    mineral: YearGrid,
    roots: YearGrid,
}

impl ForestProfiles {
    /// Validate and wrap the three profile tables.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyDomain`] if the organic table is empty;
    /// [`ConfigError::ShapeMismatch`] if the other tables differ in shape.
    pub fn new(organic: YearGrid, mineral: YearGrid, roots: YearGrid) -> Result<Self, ConfigError> {
        let shape = organic.shape();
        if shape.0 == 0 || shape.1 == 0 {
            return Err(ConfigError::EmptyDomain);
        }
        for (table, grid) in [("forest.mineral", &mineral), ("forest.roots", &roots)] {
            if grid.shape() != shape {
                return Err(ConfigError::ShapeMismatch {
                    table,
                    expected: shape,
                    actual: grid.shape(),
                });
            }
        }
        Ok(Self {
            organic,
            mineral,
            roots,
        })
    }

    /// Number of depth increments, which is also the length of the
    /// backfill window in years.
    pub fn depth_rows(&self) -> usize {
        self.organic.years()
    }

    /// Number of tabulated ages.
    pub fn ages(&self) -> usize {
        self.organic.cells()
    }

    /// Column for a forest of `age` years, clamped to the tabulated range.
    pub fn age_column(&self, age: u32) -> usize {
        (age as usize).clamp(1, self.ages()) - 1
    }

    /// Soil organic matter (g) by depth and age.
    pub fn organic(&self) -> &YearGrid {
        &self.organic
    }

    /// Soil mineral matter (g) by depth and age.
    pub fn mineral(&self) -> &YearGrid {
        &self.mineral
    }

    /// Root biomass (g) by depth and age.
    pub fn roots(&self) -> &YearGrid {
        &self.roots
    }
}

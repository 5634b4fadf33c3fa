//! Sediment mass pairs and the two-density mixing relation.

use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Seconds in a 365-day model year.
pub const SECONDS_PER_YEAR: f64 = 3600.0 * 24.0 * 365.0;

/// A mineral/organic mass pair.
///
/// Units depend on context: grams for deposition records, kilograms per
/// year for fluxes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SedimentMass {
    /// Mineral mass.
    pub mineral: f64,
    /// Organic mass.
    pub organic: f64,
}

impl SedimentMass {
    /// Zero mass.
    pub const ZERO: Self = Self {
        mineral: 0.0,
        organic: 0.0,
    };

    /// Construct from components.
    pub fn new(mineral: f64, organic: f64) -> Self {
        Self { mineral, organic }
    }

    /// Mineral plus organic.
    pub fn total(self) -> f64 {
        self.mineral + self.organic
    }

    /// Both components multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            mineral: self.mineral * factor,
            organic: self.organic * factor,
        }
    }

    /// Grams to kilograms.
    pub fn to_kg(self) -> Self {
        self.scaled(1e-3)
    }

    /// Split a total mass by organic fraction.
    pub fn split(total: f64, organic_fraction: f64) -> Self {
        Self {
            mineral: total * (1.0 - organic_fraction),
            organic: total * organic_fraction,
        }
    }
}

impl Add for SedimentMass {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            mineral: self.mineral + rhs.mineral,
            organic: self.organic + rhs.organic,
        }
    }
}

impl AddAssign for SedimentMass {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for SedimentMass {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            mineral: self.mineral - rhs.mineral,
            organic: self.organic - rhs.organic,
        }
    }
}

impl SubAssign for SedimentMass {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Bulk density (kg/m3) of a mineral/organic mixture.
///
/// `1 / ((1 - oc) / rho_mineral + oc / rho_organic)`.
pub fn bulk_density(organic_fraction: f64, mineral_density: f64, organic_density: f64) -> f64 {
    1.0 / ((1.0 - organic_fraction) / mineral_density + organic_fraction / organic_density)
}

/// Mass in grams per unit area of a deposit `height` metres thick,
/// split by organic fraction.
///
/// Densities are in kg/m3. A negative height yields negative masses,
/// which the ledger records as removal.
pub fn mixed_deposit(
    height: f64,
    organic_fraction: f64,
    mineral_density: f64,
    organic_density: f64,
) -> SedimentMass {
    let total = height
        / ((1.0 - organic_fraction) / (mineral_density * 1000.0)
            + organic_fraction / (organic_density * 1000.0));
    SedimentMass::split(total, organic_fraction)
}

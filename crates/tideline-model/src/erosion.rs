//! Marsh-edge erosion mass.

use tideline_core::{ModelError, SedimentMass, YearGrid};
use tideline_strata::SedimentLedger;

/// Everything an erosion model may read.
///
/// The ledger is passed before the current year's edge erosion is
/// written into it.
pub struct ErosionInput<'a> {
    /// Bay fetch after this year's hydrodynamics (cells).
    pub fetch: f64,
    /// Bay fetch at the end of the previous year (cells).
    pub prior_fetch: f64,
    /// Elevation history.
    pub elevation: &'a YearGrid,
    /// Current year row.
    pub year: usize,
    /// Deposition records.
    pub ledger: &'a SedimentLedger,
    /// Bulk density of sediment underlying the marsh (kg/m3).
    pub underlying_density: f64,
    /// First bay cell.
    pub bay_boundary: usize,
    /// Mean sea level by year (m).
    pub msl: &'a [f64],
    /// Tidal amplitude (m).
    pub tidal_amplitude: f64,
    /// Bay depth (m).
    pub bay_depth: f64,
}

/// Computes the sediment released into the bay by marsh-edge retreat.
pub trait ErosionFlux: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Mass eroded this year, in grams.
    fn eroded_mass(&self, input: &ErosionInput<'_>) -> Result<SedimentMass, ModelError>;
}

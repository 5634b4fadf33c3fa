//! The bay fetch/depth right-hand side.

use tideline_core::NumericFailure;

/// Bay geometry at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BayState {
    /// Open-water width of the bay (m, one cell per metre).
    pub fetch: f64,
    /// Bay depth below mean high water (m).
    pub depth: f64,
}

/// Parameters held fixed while integrating one year.
///
/// Rates are per second; densities in kg/m3; concentrations in kg/m3.
#[derive(Clone, Debug, PartialEq)]
pub struct BayParams {
    /// Mineral sediment density.
    pub mineral_density: f64,
    /// Tidal period (s).
    pub tidal_period: f64,
    /// Domain size in cells.
    pub cell_count: usize,
    /// Settling velocity of bay-bottom sediment (m/s).
    pub settling_velocity: f64,
    /// Critical shear stress for bay-bottom erosion (Pa).
    pub critical_shear: f64,
    /// Reference suspended sediment concentration at the bay mouth.
    pub reference_concentration: f64,
    /// Wind speed (m/s).
    pub wind_speed: f64,
    /// Marsh progradation coefficient.
    pub progradation_coeff: f64,
    /// Marsh edge erosion coefficient (m/s per W/m).
    pub erosion_coeff: f64,
    /// Tidal amplitude (m).
    pub tidal_amplitude: f64,
    /// Relative sea-level rise (m/s).
    pub sea_level_rise: f64,
    /// Sediment flux from bay to marsh (kg/s).
    pub marsh_flux: f64,
    /// Bay-bottom erodibility coefficient.
    pub erodibility: f64,
    /// Distance from the marsh bank at which waves are measured (m).
    pub bank_distance: f64,
    /// Depth of the marsh edge below mean high water (m).
    pub edge_depth: f64,
    /// Bulk density of bay sediment.
    pub bay_density: f64,
    /// Bulk density of the marsh edge.
    pub edge_density: f64,
}

/// Instantaneous rates and diagnostics from one right-hand-side call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BayRates {
    /// d(fetch)/dt (m/s).
    pub d_fetch: f64,
    /// d(depth)/dt (m/s).
    pub d_depth: f64,
    /// Suspended sediment concentration at the marsh edge (kg/m3).
    pub edge_concentration: f64,
    /// Net sediment flux out of the bay mouth (kg/s).
    pub boundary_flux: f64,
}

/// Right-hand side of the coupled bay fetch/depth equations.
///
/// Implementations must be pure: identical inputs give identical rates.
/// Conditions where the equations are undefined are reported as
/// [`NumericFailure`], which the engine treats as recoverable.
pub trait BayDynamics: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Evaluate rates at `state`.
    fn rates(&self, state: BayState, params: &BayParams) -> Result<BayRates, NumericFailure>;
}

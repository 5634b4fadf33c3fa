//! Initial transect construction.

use tideline_core::{ModelError, YearGrid};

/// What a transect builder is asked for.
pub struct TransectRequest<'a> {
    /// Relative sea-level rise (mm/yr).
    pub sea_level_rise_mm: f64,
    /// Reference concentration at the bay mouth (mg/L).
    pub reference_concentration_mg: f64,
    /// Upland slope (m/m).
    pub upland_slope: f64,
    /// Initial bay fetch (m).
    pub bay_fetch: f64,
    /// Spin-up platform elevation, `spin_up_years x marsh_width`.
    pub spin_up_elevation: &'a YearGrid,
    /// Tidal amplitude (m).
    pub tidal_amplitude: f64,
    /// Wind speed (m/s).
    pub wind_speed: f64,
    /// Rows to allocate (spin-up plus simulated years).
    pub total_years: usize,
    /// Whether the forest width is fixed rather than derived.
    pub forest_width_fixed: bool,
    /// Forest width when fixed (cells).
    pub forest_width: usize,
}

impl TransectRequest<'_> {
    /// Spin-up years `S`.
    pub fn spin_up_years(&self) -> usize {
        self.spin_up_elevation.years()
    }

    /// Spin-up marsh width (cells).
    pub fn marsh_width(&self) -> usize {
        self.spin_up_elevation.cells()
    }

    /// First marsh cell, `ceil(bay_fetch)`.
    pub fn marsh_edge(&self) -> usize {
        self.bay_fetch.ceil().max(0.0) as usize
    }
}

/// The starting transect.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialTransect {
    /// Domain size `B`.
    pub cell_count: usize,
    /// Initial bay depth below mean high water (m).
    pub bay_depth: f64,
    /// Elevation history with the spin-up rows filled, `total_years x B`.
    pub elevation: YearGrid,
}

/// Produces the initial cross-shore profile and domain size.
pub trait TransectBuilder: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Build the transect for `request`.
    fn build(&self, request: &TransectRequest<'_>) -> Result<InitialTransect, ModelError>;
}

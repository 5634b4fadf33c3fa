//! Marsh-platform tidal sedimentation.

use tideline_core::ModelError;

/// Inputs for one year of marsh-platform sedimentation.
///
/// `elevation` covers the cells from the marsh edge through the forest
/// edge, inclusive.
pub struct TidalInput<'a> {
    /// Platform elevation at the start of the year (m).
    pub elevation: &'a [f64],
    /// Mean sea level this year (m).
    pub msl: f64,
    /// Suspended sediment concentration at the marsh edge (kg/m3).
    pub edge_concentration: f64,
    /// Organic fraction of bay sediment.
    pub organic_fraction: f64,
    /// Tidal range (m).
    pub tidal_range: f64,
    /// Number of sub-cycle iterations per tidal cycle.
    pub iterations: usize,
    /// Tidal period (s).
    pub tidal_period: f64,
    /// Duration of one sub-cycle (s).
    pub sub_cycle: f64,
    /// Effective settling velocity on the platform (m/s).
    pub settling_velocity: f64,
    /// Tidal cycles per year.
    pub cycles_per_year: f64,
    /// Peak marsh biomass (g/m2).
    pub max_biomass: f64,
    /// Shallowest depth below high water for vegetation (m).
    pub min_depth: f64,
    /// Deepest depth below high water for vegetation (m).
    pub max_depth: f64,
    /// Organic matter density (kg/m3).
    pub organic_density: f64,
    /// Mineral density (kg/m3).
    pub mineral_density: f64,
}

/// Results for the platform cells, one entry per input cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TidalOutput {
    /// Platform elevation at the end of the year (m).
    pub elevation: Vec<f64>,
    /// Autochthonous organic deposition (g).
    pub organic_autoch: Vec<f64>,
    /// Allochthonous organic deposition (g).
    pub organic_alloch: Vec<f64>,
    /// Mineral deposition (g).
    pub mineral: Vec<f64>,
    /// Belowground biomass (g).
    pub belowground_biomass: Vec<f64>,
    /// Accretion (m).
    pub accretion: Vec<f64>,
    /// Aboveground biomass (g/m2).
    pub aboveground_biomass: Vec<f64>,
    /// Mineral flux from bay to marsh (kg/yr).
    pub mineral_flux: f64,
    /// Organic flux from bay to marsh (kg/yr).
    pub organic_flux: f64,
}

impl TidalOutput {
    /// Check that every per-cell vector has `cells` entries.
    pub fn check_len(&self, cells: usize) -> Result<(), ModelError> {
        for (output, v) in [
            ("elevation", &self.elevation),
            ("organic_autoch", &self.organic_autoch),
            ("organic_alloch", &self.organic_alloch),
            ("mineral", &self.mineral),
            ("belowground_biomass", &self.belowground_biomass),
            ("accretion", &self.accretion),
            ("aboveground_biomass", &self.aboveground_biomass),
        ] {
            if v.len() != cells {
                return Err(ModelError::OutputLength {
                    output,
                    expected: cells,
                    actual: v.len(),
                });
            }
        }
        Ok(())
    }
}

/// Simulates a year of tidal sedimentation and vegetation on the marsh.
pub trait TidalSimulator: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Run one year over the platform slice.
    fn simulate(&self, input: &TidalInput<'_>) -> Result<TidalOutput, ModelError>;
}

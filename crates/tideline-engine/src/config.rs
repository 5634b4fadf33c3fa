//! Run configuration and validation.
//!
//! [`TransectConfig`] holds every named scalar parameter of a run with
//! the reference model's names and defaults. Parameters can be listed
//! and overridden by name through [`parameters()`](TransectConfig::parameters)
//! and [`set()`](TransectConfig::set). [`RunConfig`] bundles the
//! parameters with the historical inputs and collaborator models that
//! [`TransectEngine::new`](crate::TransectEngine::new) consumes.

use indexmap::IndexMap;
use tideline_core::{bulk_density, ConfigError, SECONDS_PER_YEAR};
use tideline_model::{Collaborators, ForestProfiles, SpinUp};

/// Organic fraction of the sediment underlying the bay.
pub const UNDERLYING_ORGANIC_FRACTION: f64 = 0.05;

// ── ParamValue ─────────────────────────────────────────────────────

/// A named parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// Real-valued parameter.
    Float(f64),
    /// Non-negative integer parameter.
    Count(usize),
    /// Boolean switch.
    Flag(bool),
    /// Free text.
    Text(String),
}

impl ParamValue {
    /// Lower-case kind label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Count(_) => "count",
            Self::Flag(_) => "flag",
            Self::Text(_) => "text",
        }
    }
}

impl From<&f64> for ParamValue {
    fn from(v: &f64) -> Self {
        Self::Float(*v)
    }
}

impl From<&usize> for ParamValue {
    fn from(v: &usize) -> Self {
        Self::Count(*v)
    }
}

impl From<&bool> for ParamValue {
    fn from(v: &bool) -> Self {
        Self::Flag(*v)
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

// ── TransectConfig ─────────────────────────────────────────────────

/// Named scalar parameters of a run.
///
/// Units follow the reference model: sea-level rise in mm/yr, reference
/// concentration in mg/L, densities in kg/m3, times in seconds, lengths
/// in metres (one cell per metre).
#[derive(Clone, Debug, PartialEq)]
pub struct TransectConfig {
    /// Run label. Default: "default".
    pub name: String,
    /// Years per step. Only 1 is supported.
    pub time_step: usize,
    /// Number of simulated years; the run has `time_step_count + 1` rows.
    pub time_step_count: usize,
    /// Relative sea-level rise (mm/yr). Default: 4.
    pub relative_sea_level_rise: f64,
    /// Suspended sediment concentration at the bay mouth (mg/L). Default: 10.
    pub reference_concentration: f64,
    /// Upland slope (m/m). Default: 0.005.
    pub slope_upland: f64,
    /// Marsh width of the spin-up profile (cells). Default: 1000.
    pub marsh_width_initial: usize,
    /// Initial bay fetch (m). Default: 5000.
    pub bay_fetch_initial: f64,
    /// Use `forest_width_initial` rather than deriving the forest width.
    pub forest_width_initial_fixed: bool,
    /// Forest width when fixed (cells). Default: 2000.
    pub forest_width_initial: usize,
    /// Forest age at the start of the run (years). Default: 60.
    pub forest_age_initial: usize,
    /// Mineral sediment density (kg/m3). Default: 2000.
    pub bulk_density_mineral: f64,
    /// Organic matter density (kg/m3). Default: 85.
    pub bulk_density_organic: f64,
    /// Tidal period (s). Default: 12.5 h.
    pub tidal_period: f64,
    /// Settling velocity on the marsh platform (m/s). Default: 0.05e-3.
    pub settling_velocity_effective: f64,
    /// Settling velocity on the mudflat (m/s). Default: 0.5e-3.
    pub settling_velocity_mudflat: f64,
    /// Critical shear stress of the mudflat (Pa). Default: 0.1.
    pub critical_shear_mudflat: f64,
    /// Wind speed (m/s). Default: 6.
    pub wind_speed: f64,
    /// Tidal amplitude (m). Default: 0.7.
    pub tidal_amplitude: f64,
    /// Marsh progradation coefficient. Default: 2.
    pub marsh_progradation_coeff: f64,
    /// Marsh edge erosion coefficient (m/s per W/m). Default: 0.16 per year.
    pub marsh_erosion_coeff: f64,
    /// Mudflat erodibility coefficient. Default: 1e-4.
    pub mudflat_erodibility_coeff: f64,
    /// Distance from the marsh bank for wave calculations (m). Default: 10.
    pub dist_marsh_bank: f64,
    /// Tidal cycles per year. Default: 365 * 24 / 12.5.
    pub tide_cycles_yearly: f64,
    /// Peak marsh biomass (g/m2). Default: 2500.
    pub maximum_biomass_marsh: f64,
    /// Shallowest depth below high water for marsh vegetation (m). Default: 0.
    pub veg_minimum_depth: f64,
    /// Peak forest aboveground biomass (g/m2). Default: 5000.
    pub maximum_biomass_forest: f64,
    /// Tree biomass factor at the marsh-forest boundary. Default: 4.
    pub tree_biomass_forest_edge: f64,
    /// Tree growth rate. Default: 2.
    pub tree_growth_rate: f64,
    /// Background forest soil carbon accumulation (g/m2/yr). Default: 1e-4.
    pub forest_background_carbon_accumulation: f64,
    /// Forest carbon layer from wetted soils. Default: 5.
    pub forest_carbon_layer_wetted_soils: f64,
    /// Decay constant of belowground forest carbon with height. Default: 2.
    pub forest_belowground_decay_constant: f64,
    /// Depth at which marsh decomposition stops (m). Default: 0.4.
    pub zero_decomposition_depth_marsh: f64,
    /// Marsh surface decomposition coefficient. Default: 0.1.
    pub decomposition_coefficient_marsh: f64,
    /// Run the forest soil and biomass update. Default: true.
    pub forest_on: bool,
    /// Sub-cycles per simulated tidal cycle. Default: 500.
    pub tidal_iterations: usize,
    /// Initial mineral flux from bay to marsh (kg/yr). Default: 0.
    pub mineral_flux_bay_to_marsh: f64,
    /// Initial organic flux from bay to marsh (kg/yr). Default: 0.
    pub organic_flux_bay_to_marsh: f64,
    /// Sediment drawn from interior ponds to feed drowning marsh (kg/yr).
    /// Accepted for parameter-set compatibility; no model reads it.
    /// Default: 0.
    pub sed_flux_pond: f64,
}

impl Default for TransectConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            time_step: 1,
            time_step_count: 100,
            relative_sea_level_rise: 4.0,
            reference_concentration: 10.0,
            slope_upland: 0.005,
            marsh_width_initial: 1000,
            bay_fetch_initial: 5000.0,
            forest_width_initial_fixed: false,
            forest_width_initial: 2000,
            forest_age_initial: 60,
            bulk_density_mineral: 2000.0,
            bulk_density_organic: 85.0,
            tidal_period: 12.5 * 3600.0,
            settling_velocity_effective: 0.05e-3,
            settling_velocity_mudflat: 0.5e-3,
            critical_shear_mudflat: 0.1,
            wind_speed: 6.0,
            tidal_amplitude: 0.7,
            marsh_progradation_coeff: 2.0,
            marsh_erosion_coeff: 0.16 / SECONDS_PER_YEAR,
            mudflat_erodibility_coeff: 0.0001,
            dist_marsh_bank: 10.0,
            tide_cycles_yearly: 365.0 * 24.0 / 12.5,
            maximum_biomass_marsh: 2500.0,
            veg_minimum_depth: 0.0,
            maximum_biomass_forest: 5000.0,
            tree_biomass_forest_edge: 4.0,
            tree_growth_rate: 2.0,
            forest_background_carbon_accumulation: 0.0001,
            forest_carbon_layer_wetted_soils: 5.0,
            forest_belowground_decay_constant: 2.0,
            zero_decomposition_depth_marsh: 0.4,
            decomposition_coefficient_marsh: 0.1,
            forest_on: true,
            tidal_iterations: 500,
            mineral_flux_bay_to_marsh: 0.0,
            organic_flux_bay_to_marsh: 0.0,
            sed_flux_pond: 0.0,
        }
    }
}

macro_rules! parameter_table {
    ($($field:ident: $kind:ident),* $(,)?) => {
        impl TransectConfig {
            /// Every named parameter with its current value, in
            /// declaration order.
            pub fn parameters(&self) -> IndexMap<&'static str, ParamValue> {
                let mut map = IndexMap::new();
                $(map.insert(stringify!($field), ParamValue::from(&self.$field));)*
                map
            }

            /// Override one parameter by name.
            ///
            /// # Errors
            ///
            /// [`ConfigError::UnknownParameter`] for an unrecognised name;
            /// [`ConfigError::ParameterKind`] if `value` has the wrong kind.
            /// Ranges are not checked here; call [`validate()`](Self::validate).
            pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ConfigError> {
                match name {
                    $(stringify!($field) => match value {
                        ParamValue::$kind(v) => {
                            self.$field = v;
                            Ok(())
                        }
                        _ => Err(ConfigError::ParameterKind {
                            name: name.to_string(),
                            expected: ParamValue::$kind(Default::default()).kind(),
                        }),
                    },)*
                    _ => Err(ConfigError::UnknownParameter {
                        name: name.to_string(),
                    }),
                }
            }
        }
    };
}

parameter_table! {
    name: Text,
    time_step: Count,
    time_step_count: Count,
    relative_sea_level_rise: Float,
    reference_concentration: Float,
    slope_upland: Float,
    marsh_width_initial: Count,
    bay_fetch_initial: Float,
    forest_width_initial_fixed: Flag,
    forest_width_initial: Count,
    forest_age_initial: Count,
    bulk_density_mineral: Float,
    bulk_density_organic: Float,
    tidal_period: Float,
    settling_velocity_effective: Float,
    settling_velocity_mudflat: Float,
    critical_shear_mudflat: Float,
    wind_speed: Float,
    tidal_amplitude: Float,
    marsh_progradation_coeff: Float,
    marsh_erosion_coeff: Float,
    mudflat_erodibility_coeff: Float,
    dist_marsh_bank: Float,
    tide_cycles_yearly: Float,
    maximum_biomass_marsh: Float,
    veg_minimum_depth: Float,
    maximum_biomass_forest: Float,
    tree_biomass_forest_edge: Float,
    tree_growth_rate: Float,
    forest_background_carbon_accumulation: Float,
    forest_carbon_layer_wetted_soils: Float,
    forest_belowground_decay_constant: Float,
    zero_decomposition_depth_marsh: Float,
    decomposition_coefficient_marsh: Float,
    forest_on: Flag,
    tidal_iterations: Count,
    mineral_flux_bay_to_marsh: Float,
    organic_flux_bay_to_marsh: Float,
    sed_flux_pond: Float,
}

fn invalid(name: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name: name.to_string(),
        reason: reason.into(),
    }
}

impl TransectConfig {
    // ── Derived quantities ─────────────────────────────────────────

    /// Relative sea-level rise (m/s).
    pub fn sea_level_rise_m_per_s(&self) -> f64 {
        self.relative_sea_level_rise * 1e-3 / SECONDS_PER_YEAR
    }

    /// Relative sea-level rise (m/yr).
    pub fn sea_level_rise_m_per_yr(&self) -> f64 {
        self.relative_sea_level_rise * 1e-3
    }

    /// Reference concentration (kg/m3).
    pub fn reference_concentration_kg(&self) -> f64 {
        self.reference_concentration / 1000.0
    }

    /// Bulk density of the sediment underlying the bay (kg/m3).
    pub fn underlying_density(&self) -> f64 {
        bulk_density(
            UNDERLYING_ORGANIC_FRACTION,
            self.bulk_density_mineral,
            self.bulk_density_organic,
        )
    }

    /// Tidal range (m).
    pub fn tidal_range(&self) -> f64 {
        2.0 * self.tidal_amplitude
    }

    /// Deepest depth below high water at which marsh vegetation grows (m).
    pub fn max_vegetation_depth(&self) -> f64 {
        0.7167 * 2.0 * self.tidal_amplitude - 0.483
    }

    /// Duration of one tidal sub-cycle (s).
    pub fn sub_cycle(&self) -> f64 {
        self.tidal_period / self.tidal_iterations as f64
    }

    /// Rows simulated after the spin-up.
    pub fn run_years(&self) -> usize {
        self.time_step_count + 1
    }

    /// Check every parameter for finiteness and range.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidParameter`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Annual stepping only.
        if self.time_step != 1 {
            return Err(invalid("time_step", format!("must be 1, got {}", self.time_step)));
        }
        // 2. At least one simulated year.
        if self.time_step_count == 0 {
            return Err(invalid("time_step_count", "must be at least 1"));
        }
        // 3. Every real-valued parameter must be finite.
        for (name, value) in self.parameters() {
            if let ParamValue::Float(v) = value {
                if !v.is_finite() {
                    return Err(invalid(name, format!("must be finite, got {v}")));
                }
            }
        }
        // 4. Strictly positive quantities.
        for (name, v) in [
            ("bay_fetch_initial", self.bay_fetch_initial),
            ("bulk_density_mineral", self.bulk_density_mineral),
            ("bulk_density_organic", self.bulk_density_organic),
            ("tidal_period", self.tidal_period),
            ("settling_velocity_effective", self.settling_velocity_effective),
            ("settling_velocity_mudflat", self.settling_velocity_mudflat),
            ("tidal_amplitude", self.tidal_amplitude),
            ("tide_cycles_yearly", self.tide_cycles_yearly),
        ] {
            if v <= 0.0 {
                return Err(invalid(name, format!("must be positive, got {v}")));
            }
        }
        if !self.forest_width_initial_fixed && self.slope_upland <= 0.0 {
            return Err(invalid(
                "slope_upland",
                "must be positive when the forest width is derived",
            ));
        }
        // 5. Non-negative quantities.
        for (name, v) in [
            ("reference_concentration", self.reference_concentration),
            ("wind_speed", self.wind_speed),
            ("critical_shear_mudflat", self.critical_shear_mudflat),
            ("marsh_progradation_coeff", self.marsh_progradation_coeff),
            ("marsh_erosion_coeff", self.marsh_erosion_coeff),
            ("mudflat_erodibility_coeff", self.mudflat_erodibility_coeff),
            ("dist_marsh_bank", self.dist_marsh_bank),
            ("maximum_biomass_marsh", self.maximum_biomass_marsh),
            ("maximum_biomass_forest", self.maximum_biomass_forest),
            ("zero_decomposition_depth_marsh", self.zero_decomposition_depth_marsh),
            ("decomposition_coefficient_marsh", self.decomposition_coefficient_marsh),
        ] {
            if v < 0.0 {
                return Err(invalid(name, format!("must be non-negative, got {v}")));
            }
        }
        // 6. Organic matter must be lighter than mineral sediment; edge
        //    densities are clamped between the two.
        if self.bulk_density_organic >= self.bulk_density_mineral {
            return Err(invalid(
                "bulk_density_organic",
                format!(
                    "must be below bulk_density_mineral ({}), got {}",
                    self.bulk_density_mineral, self.bulk_density_organic
                ),
            ));
        }
        // 7. At least one tidal sub-cycle.
        if self.tidal_iterations == 0 {
            return Err(invalid("tidal_iterations", "must be at least 1"));
        }
        // 8. Vegetation depth window must be non-empty.
        let dmax = self.max_vegetation_depth();
        if self.veg_minimum_depth >= dmax {
            return Err(invalid(
                "veg_minimum_depth",
                format!("must be below the maximum vegetation depth {dmax}"),
            ));
        }
        // 9. Forest age is tracked as u32.
        if u32::try_from(self.forest_age_initial).is_err() {
            return Err(invalid("forest_age_initial", "does not fit in u32"));
        }
        Ok(())
    }
}

// ── RunConfig ──────────────────────────────────────────────────────

/// Everything needed to construct a [`TransectEngine`](crate::TransectEngine).
pub struct RunConfig {
    /// Named scalar parameters.
    pub parameters: TransectConfig,
    /// Spin-up marsh history.
    pub spin_up: SpinUp,
    /// Forest soil lookup tables.
    pub forest_profiles: ForestProfiles,
    /// Collaborator models.
    pub models: Collaborators,
}

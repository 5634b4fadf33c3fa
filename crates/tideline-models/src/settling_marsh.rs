//! Tidal settling and vegetation on the marsh platform.
//!
//! One representative tidal cycle is split into `iterations` sub-cycles.
//! Each platform cell accumulates the time it spends inundated; sediment
//! at the edge concentration settles during that time, limited by the
//! mass held in the water column above the cell at high tide. The
//! per-cycle deposit is scaled by the number of cycles per year.
//!
//! Vegetation follows the parabolic productivity curve of Morris et al.
//! (2002): biomass peaks midway between the shallowest and deepest
//! depths below high water at which plants survive and is zero outside
//! that range.

use std::f64::consts::PI;

use tideline_core::{ModelError, SedimentMass};
use tideline_model::{TidalInput, TidalOutput, TidalSimulator};

/// Reference tidal simulator.
#[derive(Clone, Debug)]
pub struct SettlingMarsh {
    /// Fraction of peak biomass buried as root material each year.
    /// Default: 0.1.
    pub root_burial_fraction: f64,
}

impl Default for SettlingMarsh {
    fn default() -> Self {
        Self {
            root_burial_fraction: 0.1,
        }
    }
}

impl SettlingMarsh {
    /// Peak biomass (g/m2) at `depth` below mean high water.
    pub fn biomass(depth: f64, max_biomass: f64, min_depth: f64, max_depth: f64) -> f64 {
        if depth <= min_depth || depth >= max_depth {
            return 0.0;
        }
        let half_width = 0.5 * (max_depth - min_depth);
        max_biomass * (depth - min_depth) * (max_depth - depth) / (half_width * half_width)
    }

    /// Seconds per tidal cycle that a surface at `elevation` is flooded.
    fn inundation_time(input: &TidalInput<'_>, elevation: f64) -> f64 {
        let amplitude = 0.5 * input.tidal_range;
        (0..input.iterations)
            .filter(|&i| {
                let t = (i as f64 + 0.5) * input.sub_cycle;
                input.msl + amplitude * (2.0 * PI * t / input.tidal_period).sin() > elevation
            })
            .count() as f64
            * input.sub_cycle
    }
}

impl TidalSimulator for SettlingMarsh {
    fn name(&self) -> &str {
        "settling_marsh"
    }

    fn simulate(&self, input: &TidalInput<'_>) -> Result<TidalOutput, ModelError> {
        if input.iterations == 0 || !(input.sub_cycle > 0.0) {
            return Err(ModelError::ExecutionFailed {
                reason: "tidal cycle has no sub-cycles".to_string(),
            });
        }
        let n = input.elevation.len();
        let high_water = input.msl + 0.5 * input.tidal_range;
        let mut out = TidalOutput {
            elevation: Vec::with_capacity(n),
            organic_autoch: Vec::with_capacity(n),
            organic_alloch: Vec::with_capacity(n),
            mineral: Vec::with_capacity(n),
            belowground_biomass: Vec::with_capacity(n),
            accretion: Vec::with_capacity(n),
            aboveground_biomass: Vec::with_capacity(n),
            mineral_flux: 0.0,
            organic_flux: 0.0,
        };

        for &z in input.elevation {
            let flooded = Self::inundation_time(input, z);
            let column = (high_water - z).max(0.0);
            let per_cycle = (input.edge_concentration * input.settling_velocity * flooded)
                .min(input.edge_concentration * column);
            // kg/m2 per cycle -> g per cell per year
            let settled = SedimentMass::split(
                per_cycle * input.cycles_per_year * 1000.0,
                input.organic_fraction,
            );

            let depth = high_water - z;
            let peak = Self::biomass(depth, input.max_biomass, input.min_depth, input.max_depth);
            let roots = self.root_burial_fraction * peak;

            let accretion = settled.mineral / (input.mineral_density * 1000.0)
                + (settled.organic + roots) / (input.organic_density * 1000.0);
            if !accretion.is_finite() {
                return Err(ModelError::ExecutionFailed {
                    reason: format!("non-finite accretion at elevation {z}"),
                });
            }

            out.elevation.push(z + accretion);
            out.organic_autoch.push(roots);
            out.organic_alloch.push(settled.organic);
            out.mineral.push(settled.mineral);
            out.belowground_biomass.push(roots);
            out.accretion.push(accretion);
            out.aboveground_biomass.push(peak);
            out.mineral_flux += settled.mineral / 1000.0;
            out.organic_flux += settled.organic / 1000.0;
        }
        Ok(out)
    }
}

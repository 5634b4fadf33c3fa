//! Depth-limited decay of buried root material.

use tideline_core::{ModelError, YearGrid};
use tideline_model::{Decomposer, Decomposition, DecompositionInput};

/// Reference decomposer.
///
/// Every autochthonous layer on the marsh platform decays at a rate that
/// falls linearly from `coefficient` at the surface to zero at
/// `zero_depth` below it. Layer depth is the elevation gained since the
/// layer was laid down. Mass lost is converted to surface lowering at the
/// organic density.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthDecay;

impl DepthDecay {
    /// Fractional loss for a layer `depth` metres below the surface.
    pub fn rate(depth: f64, coefficient: f64, zero_depth: f64) -> f64 {
        if zero_depth <= 0.0 {
            return 0.0;
        }
        coefficient * (1.0 - depth / zero_depth).max(0.0)
    }
}

impl Decomposer for DepthDecay {
    fn name(&self) -> &str {
        "depth_decay"
    }

    fn decompose(
        &self,
        input: &DecompositionInput<'_>,
        organic_autoch: &mut YearGrid,
    ) -> Result<Decomposition, ModelError> {
        if input.year >= input.elevation.years() || input.year >= organic_autoch.years() {
            return Err(ModelError::ExecutionFailed {
                reason: format!("year {} outside the record", input.year),
            });
        }
        let cells = input.cell_count.min(organic_autoch.cells());
        let mut out = Decomposition {
            compaction: vec![0.0; input.cell_count],
            organic_flux: 0.0,
        };
        let last = input.forest_edge.min(cells);

        for cell in input.marsh_edge.min(last)..last {
            let surface = input.elevation[(input.year, cell)];
            let mut lost = 0.0;
            for layer in 0..=input.year {
                let mass = organic_autoch[(layer, cell)];
                if mass <= 0.0 {
                    continue;
                }
                let depth = (surface - input.elevation[(layer, cell)]).max(0.0);
                let k = Self::rate(depth, input.coefficient, input.zero_depth);
                if k > 0.0 {
                    let decayed = k.min(1.0) * mass;
                    organic_autoch[(layer, cell)] = mass - decayed;
                    lost += decayed;
                }
            }
            out.compaction[cell] = lost / (input.organic_density * 1000.0);
            out.organic_flux += lost / 1000.0;
        }
        Ok(out)
    }
}

//! Organic decomposition and compaction.

use tideline_core::{ModelError, YearGrid};

/// Read-only context for a decomposition pass.
pub struct DecompositionInput<'a> {
    /// Elevation history, including the current year row.
    pub elevation: &'a YearGrid,
    /// First marsh cell.
    pub marsh_edge: usize,
    /// First forest cell.
    pub forest_edge: usize,
    /// Current year row.
    pub year: usize,
    /// Domain size in cells.
    pub cell_count: usize,
    /// Depth below the surface at which decomposition stops (m).
    pub zero_depth: f64,
    /// Surface decomposition coefficient (1/yr).
    pub coefficient: f64,
    /// Organic matter density (kg/m3).
    pub organic_density: f64,
}

/// Result of a decomposition pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decomposition {
    /// Elevation loss per cell (m), `cell_count` entries.
    pub compaction: Vec<f64>,
    /// Organic mass removed by decomposition (kg).
    pub organic_flux: f64,
}

/// Decays autochthonous organic matter in place.
pub trait Decomposer: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Decompose `organic_autoch` for the current year.
    fn decompose(
        &self,
        input: &DecompositionInput<'_>,
        organic_autoch: &mut YearGrid,
    ) -> Result<Decomposition, ModelError>;
}

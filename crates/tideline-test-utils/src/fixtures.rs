//! Mock collaborator models.
//!
//! - [`ConstantBay`]: fixed annual fetch/depth rates.
//! - [`FailingBay`]: reports a numeric failure after N calls.
//! - [`FlatMarsh`]: fixed mineral and root deposit per platform cell.
//! - [`FailingMarsh`]: returns a model error after N calls.
//! - [`NoErosion`], [`NoDecay`]: do nothing.
//! - [`FixedTransect`]: explicit cross-shore profile.

use std::sync::atomic::{AtomicUsize, Ordering};

use tideline_core::{ModelError, NumericFailure, SedimentMass, YearGrid, SECONDS_PER_YEAR};
use tideline_model::{
    BayDynamics, BayParams, BayRates, BayState, Decomposer, Decomposition, DecompositionInput,
    ErosionFlux, ErosionInput, InitialTransect, TidalInput, TidalOutput, TidalSimulator,
    TransectBuilder, TransectRequest,
};

// ── Bay ────────────────────────────────────────────────────────────

/// Bay whose fetch and depth change at fixed annual rates.
#[derive(Clone, Debug, Default)]
pub struct ConstantBay {
    /// Fetch change (m/yr).
    pub fetch_per_year: f64,
    /// Depth change (m/yr).
    pub depth_per_year: f64,
    pub edge_concentration: f64,
    pub boundary_flux: f64,
}

impl ConstantBay {
    pub fn new(fetch_per_year: f64, depth_per_year: f64) -> Self {
        Self {
            fetch_per_year,
            depth_per_year,
            ..Self::default()
        }
    }

    pub fn with_concentration(mut self, edge_concentration: f64) -> Self {
        self.edge_concentration = edge_concentration;
        self
    }
}

impl BayDynamics for ConstantBay {
    fn name(&self) -> &str {
        "constant_bay"
    }

    fn rates(&self, _state: BayState, _params: &BayParams) -> Result<BayRates, NumericFailure> {
        Ok(BayRates {
            d_fetch: self.fetch_per_year / SECONDS_PER_YEAR,
            d_depth: self.depth_per_year / SECONDS_PER_YEAR,
            edge_concentration: self.edge_concentration,
            boundary_flux: self.boundary_flux,
        })
    }
}

/// Behaves like `inner` for `succeed_count` calls, then reports a
/// domain failure on every call.
pub struct FailingBay {
    pub inner: ConstantBay,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingBay {
    pub fn new(inner: ConstantBay, succeed_count: usize) -> Self {
        Self {
            inner,
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `rates()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl BayDynamics for FailingBay {
    fn name(&self) -> &str {
        "failing_bay"
    }

    fn rates(&self, state: BayState, params: &BayParams) -> Result<BayRates, NumericFailure> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(NumericFailure::Domain {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        self.inner.rates(state, params)
    }
}

// ── Marsh ──────────────────────────────────────────────────────────

/// Deposits `mineral_per_cell` grams on every platform cell each year,
/// plus `roots_per_cell` grams of autochthonous organic matter.
#[derive(Clone, Debug, Default)]
pub struct FlatMarsh {
    pub mineral_per_cell: f64,
    pub roots_per_cell: f64,
}

impl FlatMarsh {
    pub fn new(mineral_per_cell: f64) -> Self {
        Self {
            mineral_per_cell,
            ..Self::default()
        }
    }

    pub fn with_roots(mut self, roots_per_cell: f64) -> Self {
        self.roots_per_cell = roots_per_cell;
        self
    }
}

impl TidalSimulator for FlatMarsh {
    fn name(&self) -> &str {
        "flat_marsh"
    }

    fn simulate(&self, input: &TidalInput<'_>) -> Result<TidalOutput, ModelError> {
        let n = input.elevation.len();
        let rise = self.mineral_per_cell / (input.mineral_density * 1000.0);
        Ok(TidalOutput {
            elevation: input.elevation.iter().map(|z| z + rise).collect(),
            organic_autoch: vec![self.roots_per_cell; n],
            organic_alloch: vec![0.0; n],
            mineral: vec![self.mineral_per_cell; n],
            belowground_biomass: vec![0.0; n],
            accretion: vec![rise; n],
            aboveground_biomass: vec![0.0; n],
            mineral_flux: self.mineral_per_cell * n as f64 / 1000.0,
            organic_flux: 0.0,
        })
    }
}

/// Behaves like [`FlatMarsh`] for `succeed_count` calls, then fails.
pub struct FailingMarsh {
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingMarsh {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `simulate()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl TidalSimulator for FailingMarsh {
    fn name(&self) -> &str {
        "failing_marsh"
    }

    fn simulate(&self, input: &TidalInput<'_>) -> Result<TidalOutput, ModelError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(ModelError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        FlatMarsh::default().simulate(input)
    }
}

// ── Erosion / decomposition ────────────────────────────────────────

/// Erosion model that never releases sediment.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoErosion;

impl ErosionFlux for NoErosion {
    fn name(&self) -> &str {
        "no_erosion"
    }

    fn eroded_mass(&self, _input: &ErosionInput<'_>) -> Result<SedimentMass, ModelError> {
        Ok(SedimentMass::ZERO)
    }
}

/// Decomposer that leaves the record untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDecay;

impl Decomposer for NoDecay {
    fn name(&self) -> &str {
        "no_decay"
    }

    fn decompose(
        &self,
        input: &DecompositionInput<'_>,
        _organic_autoch: &mut YearGrid,
    ) -> Result<Decomposition, ModelError> {
        Ok(Decomposition {
            compaction: vec![0.0; input.cell_count],
            organic_flux: 0.0,
        })
    }
}

// ── Transect ───────────────────────────────────────────────────────

/// Builder that lays `profile` into every spin-up row.
///
/// The profile is the whole domain; its length becomes the cell count.
#[derive(Clone, Debug)]
pub struct FixedTransect {
    pub profile: Vec<f64>,
    pub bay_depth: f64,
}

impl FixedTransect {
    pub fn new(profile: Vec<f64>, bay_depth: f64) -> Self {
        Self { profile, bay_depth }
    }
}

impl TransectBuilder for FixedTransect {
    fn name(&self) -> &str {
        "fixed_transect"
    }

    fn build(&self, request: &TransectRequest<'_>) -> Result<InitialTransect, ModelError> {
        let cells = self.profile.len();
        let needed = request.marsh_edge() + request.marsh_width();
        if cells <= needed {
            return Err(ModelError::ExecutionFailed {
                reason: format!("profile of {cells} cells cannot hold bay and marsh ({needed})"),
            });
        }
        let mut elevation = YearGrid::zeros(request.total_years, cells);
        for year in 0..request.spin_up_years().min(request.total_years) {
            elevation.row_mut(year).copy_from_slice(&self.profile);
        }
        Ok(InitialTransect {
            cell_count: cells,
            bay_depth: self.bay_depth,
            elevation,
        })
    }
}

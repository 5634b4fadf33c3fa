//! Per-year performance metrics for the step engine.
//!
//! [`StepMetrics`] captures wall-clock timing for each phase of a single
//! annual step, plus integrator work counters.

/// Timing and integrator metrics collected during a single step.
///
/// All durations are in microseconds. The engine populates these fields
/// after each `advance()` call; consumers read them from the most recent
/// step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Edge density estimate and bay ODE integration.
    pub hydrodynamics_us: u64,
    /// Marsh-edge relocation, progradation deposits and edge erosion.
    pub edge_us: u64,
    /// Bay floor elevation and deposition.
    pub bay_us: u64,
    /// Tidal marsh sedimentation.
    pub marsh_us: u64,
    /// Forest soil and biomass update.
    pub forest_us: u64,
    /// Decomposition and compaction.
    pub decomposition_us: u64,
    /// Post-update flooding correction.
    pub flooding_us: u64,
    /// Integrator steps accepted this year.
    pub ode_accepted_steps: u32,
    /// Integrator steps rejected this year.
    pub ode_rejected_steps: u32,
    /// Bay right-hand-side evaluations this year.
    pub rhs_evaluations: u32,
}

//! Bay hydrodynamics coupler.
//!
//! Integrates the bay fetch/depth equations over one year and reports
//! the marsh-edge concentration and boundary flux at the final state.
//! Numeric failures are absorbed here: the bay is held at its pre-step
//! geometry and the caller is told a recovery happened.

use tideline_core::NumericFailure;
use tideline_model::{BayDynamics, BayParams, BayState};

use crate::implicit::{BackwardEuler, IntegrationStats, State};

/// Result of one year of bay integration.
#[derive(Clone, Debug, PartialEq)]
pub struct HydroOutcome {
    /// Fetch at the end of the year (m).
    pub fetch: f64,
    /// Depth at the end of the year (m).
    pub depth: f64,
    /// Marsh-edge concentration at the final state (kg/m3), `None` when
    /// the integration was abandoned.
    pub edge_concentration: Option<f64>,
    /// Net boundary flux at the final state (kg/s).
    pub boundary_flux: f64,
    /// The failure that forced the bay to be held, if any.
    pub recovered: Option<NumericFailure>,
    /// Integrator counters.
    pub stats: IntegrationStats,
}

impl HydroOutcome {
    fn held(start: BayState, failure: NumericFailure, stats: IntegrationStats) -> Self {
        Self {
            fetch: start.fetch,
            depth: start.depth,
            edge_concentration: None,
            boundary_flux: 0.0,
            recovered: Some(failure),
            stats,
        }
    }
}

/// Advance the bay by `duration` seconds from `start`.
pub fn advance_bay(
    bay: &dyn BayDynamics,
    start: BayState,
    params: &BayParams,
    duration: f64,
    integrator: &mut BackwardEuler,
) -> HydroOutcome {
    let rhs = |y: State| {
        bay.rates(
            BayState {
                fetch: y[0],
                depth: y[1],
            },
            params,
        )
        .map(|r| [r.d_fetch, r.d_depth])
    };
    let result = integrator
        .integrate(rhs, [start.fetch, start.depth], duration)
        .and_then(|y| {
            let end = BayState {
                fetch: y[0],
                depth: y[1],
            };
            bay.rates(end, params).map(|r| (end, r))
        });
    let stats = integrator.stats();

    match result {
        Ok((end, rates)) => HydroOutcome {
            fetch: end.fetch,
            depth: end.depth,
            edge_concentration: Some(rates.edge_concentration),
            boundary_flux: rates.boundary_flux,
            recovered: None,
            stats,
        },
        Err(failure) => {
            log::warn!(
                "bay model '{}' failed ({failure}); holding fetch {} and depth {}",
                bay.name(),
                start.fetch,
                start.depth
            );
            HydroOutcome::held(start, failure, stats)
        }
    }
}

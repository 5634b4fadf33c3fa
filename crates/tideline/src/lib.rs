//! Tideline: a bay-marsh-forest transect carbon model.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Tideline sub-crates. For most users, adding `tideline` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tideline::prelude::*;
//! use tideline::types::YearGrid;
//!
//! // Twenty spin-up years of a 40-cell marsh platform at 0.4 m.
//! let years = 20;
//! let width = 40;
//! let grid = |v: f64| YearGrid::from_fn(years, width, |_, _| v);
//! let spin_up = SpinUp::new(grid(0.4), grid(1000.0), grid(50.0), grid(150.0)).unwrap();
//! let table = |v: f64| YearGrid::from_fn(10, 80, |_, _| v);
//! let forest = ForestProfiles::new(table(100.0), table(400.0), table(20.0)).unwrap();
//!
//! let parameters = TransectConfig {
//!     time_step_count: 2,
//!     marsh_width_initial: width,
//!     bay_fetch_initial: 100.0,
//!     forest_width_initial_fixed: true,
//!     forest_width_initial: 100,
//!     slope_upland: 0.01,
//!     tidal_iterations: 50,
//!     ..TransectConfig::default()
//! };
//! let run = RunConfig {
//!     parameters,
//!     spin_up,
//!     forest_profiles: forest,
//!     models: tideline::models::reference_models(1.2),
//! };
//! let mut engine = TransectEngine::new(run).unwrap();
//! let report = engine.advance().unwrap();
//! assert_eq!(report.year, years);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tideline-core` | Year grids, sediment masses, flux records, status, errors |
//! | [`strata`] | `tideline-strata` | Deposition ledger and transect geometry |
//! | [`model`] | `tideline-model` | Collaborator traits and historical inputs |
//! | [`models`] | `tideline-models` | Reference collaborator implementations |
//! | [`engine`] | `tideline-engine` | Annual step engine, configuration, integrator |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`tideline-core`).
///
/// Contains the year-by-cell grid, sediment mass pairs, the annual flux
/// record, run status and error types.
pub use tideline_core as types;

/// Deposition records and transect geometry (`tideline-strata`).
///
/// [`strata::SedimentLedger`] holds the three deposition pools;
/// [`strata::TransectGeometry`] holds the elevation history and edges.
pub use tideline_strata as strata;

/// Collaborator model interfaces (`tideline-model`).
///
/// Implement [`model::BayDynamics`], [`model::TidalSimulator`] and the
/// other traits to plug custom physics into the engine.
pub use tideline_model as model;

/// Reference collaborator models (`tideline-models`).
///
/// [`models::reference_models`] returns one of each, ready for a
/// [`engine::RunConfig`].
pub use tideline_models as models;

/// Annual step engine (`tideline-engine`).
///
/// [`engine::TransectEngine`] advances a run one year per call.
pub use tideline_engine as engine;

/// Common imports for typical Tideline usage.
///
/// ```rust
/// use tideline::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tideline_core::{FluxRecord, RunStatus, SedimentMass, TerminationReason, YearGrid};

    // Errors
    pub use tideline_core::{ConfigError, ModelError, NumericFailure, StepError};

    // Strata
    pub use tideline_strata::{Pool, SedimentLedger, TransectGeometry};

    // Collaborators and inputs
    pub use tideline_model::{
        BayDynamics, Collaborators, Decomposer, ErosionFlux, ForestProfiles, SpinUp,
        TidalSimulator, TransectBuilder,
    };

    // Engine
    pub use tideline_engine::{
        ParamValue, RunConfig, StepMetrics, StepOutcome, StepReport, TransectConfig,
        TransectEngine,
    };
}

//! Annual step engine for the Tideline transect model.
//!
//! [`TransectEngine`] owns a bay-marsh-forest transect and advances it
//! one year per call, delegating the numerical work to the collaborator
//! models in [`tideline_model`]. The bay fetch/depth equations are
//! integrated here with an adaptive implicit scheme ([`implicit`]).
//!
//! Construction consumes a [`RunConfig`]: the named scalar parameters
//! ([`TransectConfig`]), the spin-up history, the forest profile tables
//! and one of each collaborator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod digest;
pub mod edge;
pub mod engine;
pub mod forest;
pub mod hydro;
pub mod implicit;
pub mod metrics;
pub mod state;

pub use config::{ParamValue, RunConfig, TransectConfig};
pub use engine::{StepOutcome, StepReport, TransectEngine};
pub use metrics::StepMetrics;
pub use state::{Series, TransectState};

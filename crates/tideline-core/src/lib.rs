//! Core types for the Tideline transect model.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared across the workspace: the
//! pre-allocated year-by-cell grid, sediment mass pairs and the
//! two-density mixing relation, the annual flux record, run status,
//! and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod flux;
pub mod grid;
pub mod sediment;
pub mod status;

pub use error::{ConfigError, ModelError, NumericFailure, StepError};
pub use flux::FluxRecord;
pub use grid::YearGrid;
pub use sediment::{bulk_density, mixed_deposit, SedimentMass, SECONDS_PER_YEAR};
pub use status::{RunStatus, TerminationReason};

//! Stratigraphic bookkeeping for the Tideline transect.
//!
//! Two pieces of per-year, per-cell state live here:
//!
//! - [`SedimentLedger`]: three deposition records (allochthonous organic,
//!   autochthonous organic, mineral) in grams, with deposit and
//!   erode-above-boundary operations.
//! - [`TransectGeometry`]: the elevation history plus the current bay,
//!   marsh-edge and forest-edge indices, with the threshold and
//!   erosion-boundary searches the step engine relies on.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ledger;
pub mod transect;

pub use ledger::{Pool, SedimentLedger};
pub use transect::{erosion_boundary_year, TransectGeometry};

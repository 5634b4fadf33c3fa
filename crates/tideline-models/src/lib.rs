//! Reference collaborator models for the Tideline step engine.
//!
//! Self-contained implementations of every collaborator trait so a
//! transect can be run end to end:
//!
//! 1. [`SlopeTransect`]: flat bay, spin-up marsh, linear upland.
//! 2. [`WaveBay`]: wind-wave edge erosion, settling-driven progradation,
//!    tidal export and a bay sediment budget.
//! 3. [`EdgeErosion`]: sediment column released between the old and new
//!    marsh edge.
//! 4. [`SettlingMarsh`]: sub-cycle tidal settling with parabolic
//!    vegetation productivity.
//! 5. [`DepthDecay`]: depth-limited first-order decay with compaction.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod depth_decay;
pub mod edge_erosion;
pub mod settling_marsh;
pub mod slope_transect;
pub mod wave_bay;

pub use depth_decay::DepthDecay;
pub use edge_erosion::EdgeErosion;
pub use settling_marsh::SettlingMarsh;
pub use slope_transect::SlopeTransect;
pub use wave_bay::WaveBay;

use tideline_model::Collaborators;

/// The full reference model set.
///
/// `equilibrium_bay_depth` (m) seeds the initial bay depth; it normally
/// comes from an equilibrium lookup for the chosen sea-level rise and
/// sediment supply.
pub fn reference_models(equilibrium_bay_depth: f64) -> Collaborators {
    Collaborators {
        builder: Box::new(SlopeTransect::new(equilibrium_bay_depth)),
        bay: Box::new(WaveBay::default()),
        erosion: Box::new(EdgeErosion),
        tidal: Box::new(SettlingMarsh::default()),
        decomposer: Box::new(DepthDecay),
    }
}

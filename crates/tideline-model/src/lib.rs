//! Collaborator model interfaces for the Tideline step engine.
//!
//! The annual step engine delegates five numerical jobs to external
//! models, each expressed as an object-safe trait with explicit input
//! and output structs:
//!
//! | Trait | Job |
//! |-------|-----|
//! | [`TransectBuilder`] | initial elevation profile and domain size |
//! | [`BayDynamics`] | instantaneous fetch/depth rates for the bay ODE |
//! | [`ErosionFlux`] | mass released by marsh-edge erosion |
//! | [`TidalSimulator`] | annual marsh-platform sedimentation and biomass |
//! | [`Decomposer`] | organic decay and the resulting compaction |
//!
//! [`Collaborators`] bundles one of each for the engine. Historical
//! inputs consumed at construction ([`SpinUp`], [`ForestProfiles`]) are
//! defined here as well.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bay;
pub mod builder;
pub mod decompose;
pub mod erosion;
pub mod inputs;
pub mod tidal;

pub use bay::{BayDynamics, BayParams, BayRates, BayState};
pub use builder::{InitialTransect, TransectBuilder, TransectRequest};
pub use decompose::{Decomposer, Decomposition, DecompositionInput};
pub use erosion::{ErosionFlux, ErosionInput};
pub use inputs::{ForestProfiles, InitialMarshCarbon, SpinUp};
pub use tidal::{TidalInput, TidalOutput, TidalSimulator};

/// One implementation of each collaborator, as consumed by the engine.
pub struct Collaborators {
    /// Builds the initial transect.
    pub builder: Box<dyn TransectBuilder>,
    /// Bay fetch/depth right-hand side.
    pub bay: Box<dyn BayDynamics>,
    /// Marsh-edge erosion mass.
    pub erosion: Box<dyn ErosionFlux>,
    /// Marsh-platform tidal sedimentation.
    pub tidal: Box<dyn TidalSimulator>,
    /// Organic decomposition and compaction.
    pub decomposer: Box<dyn Decomposer>,
}

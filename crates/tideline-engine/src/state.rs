//! Mutable run state owned by the engine.
//!
//! Every array is allocated once with `spin_up_years + run_years` rows.
//! Series are indexed by year (spin-up years included); entries for
//! years the run never reached stay zero.

use tideline_core::{FluxRecord, SedimentMass, YearGrid};
use tideline_strata::{SedimentLedger, TransectGeometry};

/// Per-year scalar series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    /// Bay fetch (m).
    pub fetch: Vec<f64>,
    /// Bay depth below mean high water (m).
    pub bay_depth: Vec<f64>,
    /// First marsh cell.
    pub marsh_edge: Vec<usize>,
    /// First forest cell.
    pub forest_edge: Vec<usize>,
    /// Mean sea level relative to the start of the run (m).
    pub msl: Vec<f64>,
    /// Organic fraction of bay sediment.
    pub organic_content: Vec<f64>,
    /// Suspended sediment concentration at the marsh edge (kg/m3).
    pub edge_concentration: Vec<f64>,
    /// Depth of the marsh edge below mean high water (m).
    pub edge_height: Vec<f64>,
    /// Edge cells drowned by the flooding correction.
    pub edge_flood: Vec<usize>,
    /// Bulk density of bay sediment (kg/m3).
    pub bay_sediment_density: Vec<f64>,
    /// Bulk density of the marsh edge (kg/m3).
    pub edge_density: Vec<f64>,
    /// Erodible mass at the marsh edge (kg).
    pub edge_mass: Vec<f64>,
    /// Organic mass lost to decomposition (kg).
    pub decomposition_flux: Vec<f64>,
    /// Belowground biomass summed over the platform (g).
    pub belowground_biomass: Vec<f64>,
    /// Platform-mean accretion (m).
    pub mean_accretion: Vec<f64>,
    /// Whole-transect autochthonous organic stock (g).
    pub organic_autoch_total: Vec<f64>,
    /// Whole-transect allochthonous organic stock (g).
    pub organic_alloch_total: Vec<f64>,
    /// Sediment exported through the bay mouth (kg/yr).
    pub bay_export: Vec<SedimentMass>,
    /// Sediment stored in the bay (kg/yr).
    pub bay_storage: Vec<SedimentMass>,
}

impl Series {
    fn new(years: usize) -> Self {
        Self {
            fetch: vec![0.0; years],
            bay_depth: vec![0.0; years],
            marsh_edge: vec![0; years],
            forest_edge: vec![0; years],
            msl: vec![0.0; years],
            organic_content: vec![0.0; years],
            edge_concentration: vec![0.0; years],
            edge_height: vec![0.0; years],
            edge_flood: vec![0; years],
            bay_sediment_density: vec![0.0; years],
            edge_density: vec![0.0; years],
            edge_mass: vec![0.0; years],
            decomposition_flux: vec![0.0; years],
            belowground_biomass: vec![0.0; years],
            mean_accretion: vec![0.0; years],
            organic_autoch_total: vec![0.0; years],
            organic_alloch_total: vec![0.0; years],
            bay_export: vec![SedimentMass::ZERO; years],
            bay_storage: vec![SedimentMass::ZERO; years],
        }
    }
}

/// Complete transect state.
#[derive(Clone, Debug, PartialEq)]
pub struct TransectState {
    pub(crate) spin_up_years: usize,
    pub(crate) geometry: TransectGeometry,
    pub(crate) ledger: SedimentLedger,
    pub(crate) aboveground_biomass: YearGrid,
    pub(crate) root_input: YearGrid,
    pub(crate) series: Series,
    pub(crate) fluxes: Vec<FluxRecord>,
    pub(crate) fetch: f64,
    pub(crate) bay_depth: f64,
    pub(crate) edge_depth: f64,
    pub(crate) marsh_flux: SedimentMass,
    pub(crate) bay_density: f64,
    pub(crate) forest_age: u32,
}

impl TransectState {
    pub(crate) fn new(spin_up_years: usize, geometry: TransectGeometry, ledger: SedimentLedger) -> Self {
        let (years, cells) = ledger.shape();
        Self {
            spin_up_years,
            geometry,
            ledger,
            aboveground_biomass: YearGrid::zeros(years, cells),
            root_input: YearGrid::zeros(years, cells),
            series: Series::new(years),
            fluxes: vec![FluxRecord::default(); years],
            fetch: 0.0,
            bay_depth: 0.0,
            edge_depth: 0.0,
            marsh_flux: SedimentMass::ZERO,
            bay_density: 0.0,
            forest_age: 0,
        }
    }

    /// Spin-up years `S`; simulated years start at row `S`.
    pub fn spin_up_years(&self) -> usize {
        self.spin_up_years
    }

    /// Total rows (spin-up plus simulated).
    pub fn total_years(&self) -> usize {
        self.geometry.elevation().years()
    }

    /// Number of cells `B`.
    pub fn cell_count(&self) -> usize {
        self.geometry.cell_count()
    }

    /// Elevation history and current edges.
    pub fn geometry(&self) -> &TransectGeometry {
        &self.geometry
    }

    /// Elevation history (m).
    pub fn elevation(&self) -> &YearGrid {
        self.geometry.elevation()
    }

    /// Deposition records.
    pub fn ledger(&self) -> &SedimentLedger {
        &self.ledger
    }

    /// Aboveground biomass, marsh and forest (g/m2).
    pub fn aboveground_biomass(&self) -> &YearGrid {
        &self.aboveground_biomass
    }

    /// Autochthonous organic matter laid down on the platform each year,
    /// as delivered by the tidal model and before any decomposition (g).
    pub fn root_input(&self) -> &YearGrid {
        &self.root_input
    }

    /// Per-year series.
    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Per-year flux ledger (kg/yr).
    pub fn fluxes(&self) -> &[FluxRecord] {
        &self.fluxes
    }

    /// Current bay fetch (m).
    pub fn fetch(&self) -> f64 {
        self.fetch
    }

    /// Current bay depth (m).
    pub fn bay_depth(&self) -> f64 {
        self.bay_depth
    }

    /// Current depth of the marsh edge below mean high water (m).
    pub fn edge_depth(&self) -> f64 {
        self.edge_depth
    }

    /// Bay-to-marsh flux carried into next year's budget (kg/yr).
    pub fn marsh_flux(&self) -> SedimentMass {
        self.marsh_flux
    }

    /// Current bay sediment bulk density (kg/m3).
    pub fn bay_density(&self) -> f64 {
        self.bay_density
    }

    /// Current forest age (years).
    pub fn forest_age(&self) -> u32 {
        self.forest_age
    }
}

//! The annual bay sediment flux record.

use crate::sediment::SedimentMass;

/// Eight annual mass fluxes (kg/yr) describing the bay sediment budget.
///
/// The bay budget closes by construction:
/// `erosion = marsh + export + bay` for each of the mineral and organic
/// components, so [`residual`](FluxRecord::residual) is zero up to
/// floating-point rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FluxRecord {
    /// Mineral mass eroded from the marsh edge into the bay.
    pub erosion_mineral: f64,
    /// Organic mass eroded from the marsh edge into the bay.
    pub erosion_organic: f64,
    /// Mineral mass delivered from the bay to the marsh.
    pub marsh_mineral: f64,
    /// Organic mass delivered from the bay to the marsh.
    pub marsh_organic: f64,
    /// Mineral mass exported from the bay to the ocean.
    pub export_mineral: f64,
    /// Organic mass exported from the bay to the ocean.
    pub export_organic: f64,
    /// Net mineral mass stored in the bay.
    pub bay_mineral: f64,
    /// Net organic mass stored in the bay.
    pub bay_organic: f64,
}

impl FluxRecord {
    /// Field names in [`as_array`](FluxRecord::as_array) order.
    pub const NAMES: [&'static str; 8] = [
        "erosion_mineral",
        "erosion_organic",
        "marsh_mineral",
        "marsh_organic",
        "export_mineral",
        "export_organic",
        "bay_mineral",
        "bay_organic",
    ];

    /// Assemble a record from its four mass pairs.
    pub fn new(
        erosion: SedimentMass,
        marsh: SedimentMass,
        export: SedimentMass,
        bay: SedimentMass,
    ) -> Self {
        Self {
            erosion_mineral: erosion.mineral,
            erosion_organic: erosion.organic,
            marsh_mineral: marsh.mineral,
            marsh_organic: marsh.organic,
            export_mineral: export.mineral,
            export_organic: export.organic,
            bay_mineral: bay.mineral,
            bay_organic: bay.organic,
        }
    }

    /// Erosion in, minus delivered, exported and stored, per component.
    pub fn residual(&self) -> SedimentMass {
        SedimentMass {
            mineral: self.erosion_mineral
                - self.marsh_mineral
                - self.export_mineral
                - self.bay_mineral,
            organic: self.erosion_organic
                - self.marsh_organic
                - self.export_organic
                - self.bay_organic,
        }
    }

    /// Values in [`NAMES`](FluxRecord::NAMES) order.
    pub fn as_array(&self) -> [f64; 8] {
        [
            self.erosion_mineral,
            self.erosion_organic,
            self.marsh_mineral,
            self.marsh_organic,
            self.export_mineral,
            self.export_organic,
            self.bay_mineral,
            self.bay_organic,
        ]
    }
}

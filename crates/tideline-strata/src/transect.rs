//! Elevation history and boundary indices of the transect.
//!
//! Cell 0 is the seaward end of the bay and cell `B - 1` the upland end.
//! While a run is live the indices satisfy
//! `bay_boundary <= marsh_edge < forest_edge <= B`.

use tideline_core::YearGrid;

/// Elevation history plus the current bay, marsh and forest boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct TransectGeometry {
    elevation: YearGrid,
    bay_boundary: usize,
    marsh_edge: usize,
    forest_edge: usize,
}

impl TransectGeometry {
    /// Wrap an elevation history with initial boundary indices.
    pub fn new(elevation: YearGrid, marsh_edge: usize, forest_edge: usize) -> Self {
        Self {
            elevation,
            bay_boundary: 0,
            marsh_edge,
            forest_edge,
        }
    }

    /// Number of cells `B`.
    pub fn cell_count(&self) -> usize {
        self.elevation.cells()
    }

    /// Elevation history (m relative to initial mean sea level).
    pub fn elevation(&self) -> &YearGrid {
        &self.elevation
    }

    /// Mutable elevation history.
    pub fn elevation_mut(&mut self) -> &mut YearGrid {
        &mut self.elevation
    }

    /// First bay cell.
    ///
    /// Always 0: the bay is open to the sea at the seaward end of the
    /// domain and nothing moves this boundary. With it at 0 the marsh edge
    /// is `ceil(fetch)`, so a basin-filled stop always precedes a
    /// marsh-expanded one.
    pub fn bay_boundary(&self) -> usize {
        self.bay_boundary
    }

    /// First marsh cell.
    pub fn marsh_edge(&self) -> usize {
        self.marsh_edge
    }

    /// First forest cell.
    pub fn forest_edge(&self) -> usize {
        self.forest_edge
    }

    /// Move both edges.
    pub fn set_edges(&mut self, marsh_edge: usize, forest_edge: usize) {
        self.marsh_edge = marsh_edge;
        self.forest_edge = forest_edge;
    }

    /// Whether `bay_boundary <= marsh_edge < forest_edge <= B` holds.
    pub fn edges_ordered(&self) -> bool {
        self.bay_boundary <= self.marsh_edge
            && self.marsh_edge < self.forest_edge
            && self.forest_edge <= self.cell_count()
    }

    /// First cell in `year` whose elevation is strictly above `threshold`.
    pub fn first_above(&self, year: usize, threshold: f64) -> Option<usize> {
        self.elevation.row(year).iter().position(|&z| z > threshold)
    }

    /// First cell in `year` whose elevation is at least `threshold`, or
    /// `B` if none is.
    pub fn first_at_or_above(&self, year: usize, threshold: f64) -> usize {
        self.elevation
            .row(year)
            .iter()
            .position(|&z| z >= threshold)
            .unwrap_or(self.cell_count())
    }

    /// See [`erosion_boundary_year`].
    pub fn erosion_boundary_year(&self, cell: usize, before_year: usize, bottom: f64) -> Option<usize> {
        erosion_boundary_year(&self.elevation, cell, before_year, bottom)
    }
}

/// Year after the last year before `before_year` in which `cell` lay
/// below `bottom`.
///
/// This is the oldest layer that erosion down to `bottom` would remove.
/// `None` means the cell was never below `bottom`, so its whole recorded
/// column sits above the erosion depth. Out-of-range cells and empty
/// histories also yield `None`.
pub fn erosion_boundary_year(
    elevation: &YearGrid,
    cell: usize,
    before_year: usize,
    bottom: f64,
) -> Option<usize> {
    if cell >= elevation.cells() {
        return None;
    }
    elevation
        .column(cell)
        .take(before_year)
        .enumerate()
        .filter(|&(_, z)| z < bottom)
        .last()
        .map(|(i, _)| i + 1)
}

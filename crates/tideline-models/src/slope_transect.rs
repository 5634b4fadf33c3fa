//! Flat bay, spin-up marsh, linear upland.

use tideline_core::{ModelError, YearGrid};
use tideline_model::{InitialTransect, TransectBuilder, TransectRequest};

/// Reference transect builder.
///
/// The bay floor sits `equilibrium_depth` below mean high water. The
/// marsh copies the spin-up platform and the upland rises from the last
/// marsh cell at the upland slope. Unless fixed, the forest is made wide
/// enough that sea-level rise over the whole run, plus the tidal
/// amplitude and one metre of freeboard, cannot overtop it.
#[derive(Clone, Debug)]
pub struct SlopeTransect {
    equilibrium_depth: f64,
}

impl SlopeTransect {
    /// Builder with the given equilibrium bay depth (m).
    pub fn new(equilibrium_depth: f64) -> Self {
        Self { equilibrium_depth }
    }

    /// Equilibrium bay depth (m).
    pub fn equilibrium_depth(&self) -> f64 {
        self.equilibrium_depth
    }

    fn forest_width(&self, request: &TransectRequest<'_>) -> Result<usize, ModelError> {
        if request.forest_width_fixed {
            return Ok(request.forest_width);
        }
        if !(request.upland_slope > 0.0) {
            return Err(ModelError::ExecutionFailed {
                reason: format!("upland slope {} is not positive", request.upland_slope),
            });
        }
        let rise = request.sea_level_rise_mm * 1e-3 * request.total_years as f64;
        let width = ((rise + request.tidal_amplitude + 1.0) / request.upland_slope).ceil();
        if !width.is_finite() || width < 0.0 {
            return Err(ModelError::ExecutionFailed {
                reason: format!("derived forest width {width} is not a cell count"),
            });
        }
        Ok(width as usize)
    }
}

impl TransectBuilder for SlopeTransect {
    fn name(&self) -> &str {
        "slope_transect"
    }

    fn build(&self, request: &TransectRequest<'_>) -> Result<InitialTransect, ModelError> {
        if !(self.equilibrium_depth > 0.0) {
            return Err(ModelError::ExecutionFailed {
                reason: format!("equilibrium depth {} is not positive", self.equilibrium_depth),
            });
        }
        let spin_up = request.spin_up_elevation;
        let (spin_years, marsh_width) = spin_up.shape();
        if spin_years == 0 || marsh_width == 0 {
            return Err(ModelError::ExecutionFailed {
                reason: "spin-up platform is empty".to_string(),
            });
        }
        if request.total_years < spin_years {
            return Err(ModelError::ExecutionFailed {
                reason: format!(
                    "{} rows cannot hold {spin_years} spin-up years",
                    request.total_years
                ),
            });
        }

        let marsh_edge = request.marsh_edge();
        let forest_width = self.forest_width(request)?;
        let cell_count = marsh_edge + marsh_width + forest_width;
        let upland_start = marsh_edge + marsh_width;
        let bay_floor = request.tidal_amplitude - self.equilibrium_depth;

        let mut elevation = YearGrid::zeros(request.total_years, cell_count);
        for year in 0..spin_years {
            let platform = spin_up.row(year);
            let top = platform[marsh_width - 1];
            let row = elevation.row_mut(year);
            row[..marsh_edge].fill(bay_floor);
            row[marsh_edge..upland_start].copy_from_slice(platform);
            for (j, z) in row[upland_start..].iter_mut().enumerate() {
                *z = top + request.upland_slope * (j + 1) as f64;
            }
        }

        log::debug!(
            "transect: {cell_count} cells (bay {marsh_edge}, marsh {marsh_width}, forest {forest_width})"
        );
        Ok(InitialTransect {
            cell_count,
            bay_depth: self.equilibrium_depth,
            elevation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(spin: &YearGrid, fixed: bool) -> TransectRequest<'_> {
        TransectRequest {
            sea_level_rise_mm: 4.0,
            reference_concentration_mg: 10.0,
            upland_slope: 0.005,
            bay_fetch: 9.5,
            spin_up_elevation: spin,
            tidal_amplitude: 0.7,
            wind_speed: 6.0,
            total_years: 6,
            forest_width_fixed: fixed,
            forest_width: 20,
        }
    }

    #[test]
    fn fixed_width_profile_layout() {
        let spin = YearGrid::from_fn(2, 5, |_, c| 0.3 + 0.01 * c as f64);
        let t = SlopeTransect::new(1.5).build(&request(&spin, true)).unwrap();
        assert_eq!(t.cell_count, 10 + 5 + 20);
        assert_eq!(t.elevation.shape(), (6, 35));
        assert_eq!(t.bay_depth, 1.5);
        assert!((t.elevation[(1, 0)] - (0.7 - 1.5)).abs() < 1e-12);
        assert_eq!(t.elevation[(1, 10)], 0.3);
        assert!((t.elevation[(1, 15)] - (0.34 + 0.005)).abs() < 1e-12);
        // Simulated rows start empty.
        assert_eq!(t.elevation[(2, 15)], 0.0);
    }

    #[test]
    fn derived_width_covers_sea_level_rise() {
        let spin = YearGrid::zeros(2, 5);
        let t = SlopeTransect::new(1.0).build(&request(&spin, false)).unwrap();
        let expected = ((4e-3 * 6.0 + 0.7 + 1.0) / 0.005_f64).ceil() as usize;
        assert_eq!(t.cell_count, 10 + 5 + expected);
    }

    #[test]
    fn non_positive_depth_is_rejected() {
        let spin = YearGrid::zeros(2, 5);
        assert!(SlopeTransect::new(0.0).build(&request(&spin, true)).is_err());
    }
}

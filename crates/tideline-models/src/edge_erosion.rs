//! Sediment released by marsh-edge retreat.

use tideline_core::{ModelError, SedimentMass};
use tideline_model::{ErosionFlux, ErosionInput};
use tideline_strata::erosion_boundary_year;

/// Organic fraction of sediment underlying the marsh.
const UNDERLYING_ORGANIC_FRACTION: f64 = 0.05;

/// Reference erosion model.
///
/// When the fetch grows, every cell between the old and new marsh edge
/// releases its recorded column above the current bay bottom. Cells that
/// were never below the bay bottom also release the underlying sediment
/// between their original surface and the bay bottom. A shrinking or
/// unchanged fetch releases nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeErosion;

impl ErosionFlux for EdgeErosion {
    fn name(&self) -> &str {
        "edge_erosion"
    }

    fn eroded_mass(&self, input: &ErosionInput<'_>) -> Result<SedimentMass, ModelError> {
        if input.fetch <= input.prior_fetch {
            return Ok(SedimentMass::ZERO);
        }
        if input.year == 0 || input.year > input.msl.len() {
            return Err(ModelError::ExecutionFailed {
                reason: format!("year {} has no preceding sea level", input.year),
            });
        }
        let cells = input.elevation.cells();
        let first = (input.prior_fetch.ceil().max(0.0) as usize + input.bay_boundary).min(cells);
        let last = (input.fetch.ceil().max(0.0) as usize + input.bay_boundary).min(cells);
        let bottom = input.msl[input.year - 1] + input.tidal_amplitude - input.bay_depth;

        let mut released = SedimentMass::ZERO;
        for cell in first..last {
            let boundary = erosion_boundary_year(input.elevation, cell, input.year, bottom);
            let from = boundary.unwrap_or(0);
            let ledger = input.ledger;
            released.organic += ledger.organic_autoch().column_sum_from(cell, from)
                + ledger.organic_alloch().column_sum_from(cell, from);
            released.mineral += ledger.mineral().column_sum_from(cell, from);

            if boundary.is_none() {
                let underlying = (input.elevation[(0, cell)] - bottom).max(0.0);
                released += SedimentMass::split(
                    underlying * input.underlying_density * 1000.0,
                    UNDERLYING_ORGANIC_FRACTION,
                );
            }
        }
        Ok(released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tideline_core::YearGrid;
    use tideline_strata::SedimentLedger;

    fn input<'a>(
        fetch: f64,
        prior_fetch: f64,
        elevation: &'a YearGrid,
        ledger: &'a SedimentLedger,
        msl: &'a [f64],
    ) -> ErosionInput<'a> {
        ErosionInput {
            fetch,
            prior_fetch,
            elevation,
            year: 3,
            ledger,
            underlying_density: 1000.0,
            bay_boundary: 0,
            msl,
            tidal_amplitude: 0.5,
            bay_depth: 1.0,
        }
    }

    #[test]
    fn prograding_edge_releases_nothing() {
        let elev = YearGrid::zeros(4, 6);
        let ledger = SedimentLedger::new(4, 6);
        let msl = [0.0; 4];
        let m = EdgeErosion
            .eroded_mass(&input(2.0, 3.0, &elev, &ledger, &msl))
            .unwrap();
        assert_eq!(m, SedimentMass::ZERO);
    }

    #[test]
    fn retreat_releases_column_and_underlying_sediment() {
        // Bay bottom at 0.5 - 1.0 = -0.5; cells sit at 0.0, never below it.
        let elev = YearGrid::zeros(4, 6);
        let mut ledger = SedimentLedger::new(4, 6);
        ledger.deposit(1, 2..3, SedimentMass::new(100.0, 10.0));
        let msl = [0.0; 4];
        let m = EdgeErosion
            .eroded_mass(&input(3.0, 2.0, &elev, &ledger, &msl))
            .unwrap();
        // 0.5 m of underlying sediment at 1000 kg/m3 -> 500 kg = 500_000 g.
        assert!((m.mineral - (100.0 + 500_000.0 * 0.95)).abs() < 1e-6);
        assert!((m.organic - (10.0 + 500_000.0 * 0.05)).abs() < 1e-6);
    }

    #[test]
    fn submerged_history_limits_release_to_boundary() {
        // Cell 2 was below the bottom in year 0 only.
        let elev = YearGrid::from_fn(4, 6, |y, _| if y == 0 { -1.0 } else { 0.0 });
        let mut ledger = SedimentLedger::new(4, 6);
        ledger.deposit(0, 2..3, SedimentMass::new(50.0, 0.0));
        ledger.deposit(2, 2..3, SedimentMass::new(7.0, 1.0));
        let msl = [0.0; 4];
        let m = EdgeErosion
            .eroded_mass(&input(3.0, 2.0, &elev, &ledger, &msl))
            .unwrap();
        assert_eq!(m, SedimentMass::new(7.0, 1.0));
    }
}

//! The annual step engine.
//!
//! [`TransectEngine`] owns the transect state and advances it one year
//! per call. Each year runs the same fixed sequence of phases:
//!
//! 1. integrate the bay fetch/depth equations,
//! 2. release edge-erosion mass and resolve the new marsh edge,
//! 3. deposit on the bay floor,
//! 4. run the tidal platform model,
//! 5. age the forest,
//! 6. decompose organic matter and compact,
//! 7. drown edge cells that can no longer hold vegetation,
//! 8. record fluxes and series and test for terminal states.
//!
//! A collaborator failure in any phase disables the engine; the year row
//! it was writing is left partial.

use std::time::Instant;

use smallvec::SmallVec;
use tideline_core::{
    bulk_density, mixed_deposit, ConfigError, FluxRecord, ModelError, NumericFailure, RunStatus,
    SedimentMass, StepError, TerminationReason, SECONDS_PER_YEAR,
};
use tideline_model::{
    BayParams, BayState, Collaborators, DecompositionInput, ErosionInput, ForestProfiles,
    InitialMarshCarbon, TidalInput, TransectRequest,
};
use tideline_strata::{erosion_boundary_year, Pool, SedimentLedger, TransectGeometry};

use crate::config::{RunConfig, TransectConfig, UNDERLYING_ORGANIC_FRACTION};
use crate::digest::state_digest;
use crate::edge::{clamp_fetch, erode_retreat, flood_scan, prograde, EdgeSediment, FloodCriteria};
use crate::forest::{backfill, grow, ForestGrowth};
use crate::hydro::advance_bay;
use crate::implicit::BackwardEuler;
use crate::metrics::StepMetrics;
use crate::state::TransectState;

/// Forest establishes this far (m) above the lowest vegetated depth.
const FOREST_MARGIN: f64 = 0.03;
/// Edge-to-domain-end distance (cells) at which a run stops.
const EDGE_LIMIT: usize = 10;
/// Bay depth (m) below which the bay counts as filled.
const MIN_BAY_DEPTH: f64 = 0.2;

// ── StepReport ─────────────────────────────────────────────────────

/// What a successful annual step did to the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The year was simulated and more years remain.
    Advanced,
    /// The year was simulated and was the last configured year.
    Completed,
    /// The run reached a terminal geomorphic state this year.
    Terminated(TerminationReason),
}

/// Result of a successful [`TransectEngine::advance()`].
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Row index of the simulated year.
    pub year: usize,
    /// How the step ended.
    pub outcome: StepOutcome,
    /// Edge cells converted to bay by the flooding correction.
    pub flooded_cells: SmallVec<[usize; 8]>,
    /// Numeric failure absorbed by holding the bay geometry, if any.
    pub ode_recovered: Option<NumericFailure>,
    /// Timings and integrator counters.
    pub metrics: StepMetrics,
}

// ── TransectEngine ─────────────────────────────────────────────────

/// Single-threaded annual step engine.
///
/// Construction validates the configuration, builds the initial
/// transect and seeds the deposition records from the spin-up history.
/// Each [`advance()`](Self::advance) call simulates one year.
pub struct TransectEngine {
    config: TransectConfig,
    profiles: ForestProfiles,
    models: Collaborators,
    state: TransectState,
    integrator: BackwardEuler,
    initial_carbon: InitialMarshCarbon,
    status: RunStatus,
    time_index: usize,
    end_year: usize,
    last_metrics: StepMetrics,
}

impl TransectEngine {
    /// Construct an engine from a [`RunConfig`].
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]: invalid parameters, spin-up tables that do
    /// not match the configured marsh width or the forest window, a
    /// builder failure or a built transect of the wrong shape, or an
    /// initial transect with no room for the forest.
    pub fn new(run: RunConfig) -> Result<Self, ConfigError> {
        let RunConfig {
            parameters: config,
            spin_up,
            forest_profiles: profiles,
            models,
        } = run;

        // 1. Scalar parameters.
        config.validate()?;

        // 2. Spin-up width must match the configured marsh width.
        let spin_up_years = spin_up.years();
        if spin_up.marsh_width() != config.marsh_width_initial {
            return Err(ConfigError::ShapeMismatch {
                table: "spin_up.elevation",
                expected: (spin_up_years, config.marsh_width_initial),
                actual: spin_up.elevation().shape(),
            });
        }

        // 3. The forest backfill window reaches into the spin-up rows.
        if config.forest_on && spin_up_years < profiles.depth_rows() {
            return Err(ConfigError::SpinUpTooShort {
                years: spin_up_years,
                required: profiles.depth_rows(),
            });
        }

        // 4. Build the transect.
        let run_years = config.run_years();
        let total_years = spin_up_years + run_years;
        let request = TransectRequest {
            sea_level_rise_mm: config.relative_sea_level_rise,
            reference_concentration_mg: config.reference_concentration,
            upland_slope: config.slope_upland,
            bay_fetch: config.bay_fetch_initial,
            spin_up_elevation: spin_up.elevation(),
            tidal_amplitude: config.tidal_amplitude,
            wind_speed: config.wind_speed,
            total_years,
            forest_width_fixed: config.forest_width_initial_fixed,
            forest_width: config.forest_width_initial,
        };
        let marsh_edge = request.marsh_edge();
        let built = models
            .builder
            .build(&request)
            .map_err(ConfigError::Builder)?;
        if built.cell_count == 0 {
            return Err(ConfigError::EmptyDomain);
        }
        let expected = (total_years, built.cell_count);
        if built.elevation.shape() != expected {
            return Err(ConfigError::ShapeMismatch {
                table: "transect.elevation",
                expected,
                actual: built.elevation.shape(),
            });
        }
        let cells = built.cell_count;

        // 5. Seed the deposition records at the marsh edge.
        let mut ledger = SedimentLedger::new(total_years, cells);
        for (pool, block) in [
            (Pool::Mineral, spin_up.mineral()),
            (Pool::OrganicAllochthonous, spin_up.organic_alloch()),
            (Pool::OrganicAutochthonous, spin_up.organic_autoch()),
        ] {
            if !ledger.load_block(pool, marsh_edge, block) {
                return Err(ConfigError::InvalidTransect {
                    reason: format!(
                        "spin-up marsh of {} cells does not fit at cell {marsh_edge} of {cells}",
                        block.cells()
                    ),
                });
            }
        }

        // 6. Sea level and the initial forest edge.
        let slr = config.sea_level_rise_m_per_yr();
        let amp = config.tidal_amplitude;
        let dmin = config.veg_minimum_depth;
        let mut geometry = TransectGeometry::new(built.elevation, marsh_edge, cells);
        let mut msl = vec![0.0; total_years];
        for (i, m) in msl[spin_up_years..].iter_mut().enumerate() {
            *m = (i + 1) as f64 * slr;
        }
        let last = spin_up_years - 1;
        let forest_edge =
            geometry.first_at_or_above(last, msl[spin_up_years] + amp - dmin + FOREST_MARGIN);
        if forest_edge <= marsh_edge {
            return Err(ConfigError::InvalidTransect {
                reason: format!(
                    "forest edge {forest_edge} is not landward of marsh edge {marsh_edge}"
                ),
            });
        }
        geometry.set_edges(marsh_edge, forest_edge);
        let spin_up_forest = geometry.first_at_or_above(last, msl[last] + amp + dmin);
        let edge_depth = msl[last] + amp - geometry.elevation()[(last, marsh_edge)];

        // 7. Pre-run series.
        let mut state = TransectState::new(spin_up_years, geometry, ledger);
        let s = &mut state.series;
        s.msl = msl;
        s.organic_content.fill(UNDERLYING_ORGANIC_FRACTION);
        for y in 0..spin_up_years {
            s.fetch[y] = config.bay_fetch_initial;
            s.marsh_edge[y] = marsh_edge;
            s.forest_edge[y] = spin_up_forest;
            s.bay_depth[y] = built.bay_depth;
        }
        state.fetch = config.bay_fetch_initial;
        state.bay_depth = built.bay_depth;
        state.edge_depth = edge_depth;
        state.bay_density = config.underlying_density();
        state.marsh_flux = SedimentMass::new(
            config.mineral_flux_bay_to_marsh,
            config.organic_flux_bay_to_marsh,
        );
        // Range checked by validate().
        state.forest_age = u32::try_from(config.forest_age_initial).unwrap_or(u32::MAX);

        log::info!(
            "transect '{}': {cells} cells, {spin_up_years} spin-up + {run_years} run years, \
             marsh edge {marsh_edge}, forest edge {forest_edge}, bay depth {:.3} m",
            config.name,
            built.bay_depth
        );

        Ok(Self {
            initial_carbon: spin_up.initial_carbon(),
            end_year: total_years,
            config,
            profiles,
            models,
            state,
            integrator: BackwardEuler::default(),
            status: RunStatus::Running,
            time_index: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Simulate the next year.
    ///
    /// # Errors
    ///
    /// [`StepError::Terminated`] or [`StepError::Completed`] once the run
    /// has ended, [`StepError::Disabled`] after an earlier model failure,
    /// and [`StepError::ModelFailed`] if a collaborator fails this year
    /// (the engine is disabled afterwards).
    pub fn advance(&mut self) -> Result<StepReport, StepError> {
        match self.status {
            RunStatus::Running => {}
            RunStatus::Completed => return Err(StepError::Completed),
            RunStatus::Terminated(reason) => return Err(StepError::Terminated { reason }),
            RunStatus::Disabled => return Err(StepError::Disabled),
        }
        let result = self.step();
        if let Err(e) = &result {
            log::warn!(
                "transect '{}': year {} failed ({e}); stepping disabled",
                self.config.name,
                self.current_year()
            );
            self.status = RunStatus::Disabled;
        }
        result
    }

    /// Advance until the run stops, returning the final status.
    pub fn run_to_end(&mut self) -> RunStatus {
        while self.status.is_running() {
            if self.advance().is_err() {
                break;
            }
        }
        self.status
    }

    fn current_year(&self) -> usize {
        self.state.spin_up_years + self.time_index
    }

    fn step(&mut self) -> Result<StepReport, StepError> {
        let step_start = Instant::now();
        let yr = self.current_year();
        let Self {
            config,
            profiles,
            models,
            state,
            integrator,
            ..
        } = self;
        let mut metrics = StepMetrics::default();

        let cells = state.cell_count();
        let amp = config.tidal_amplitude;
        let rhos = config.bulk_density_mineral;
        let rhoo = config.bulk_density_organic;
        let rhou = config.underlying_density();
        let dmin = config.veg_minimum_depth;
        let dmax = config.max_vegetation_depth();
        let bay_boundary = state.geometry.bay_boundary();
        let prior_edge = state.geometry.marsh_edge();
        let prior_forest = state.geometry.forest_edge();
        let msl_prev = state.series.msl[yr - 1];
        let msl_now = state.series.msl[yr];
        let oc_prev = state.series.organic_content[yr - 1];
        let prior_fetch = state.series.fetch[yr - 1];
        let forest_threshold = msl_now + amp - dmin + FOREST_MARGIN;

        // ── Bay hydrodynamics ──────────────────────────────────────
        let phase = Instant::now();
        let bottom = msl_prev + amp - state.bay_depth;
        let elevation = state.geometry.elevation();
        let (first_layer, underlying) =
            match erosion_boundary_year(elevation, prior_edge, yr, bottom) {
                Some(y) => (y, 0.0),
                None => (0, (elevation[(0, prior_edge)] - bottom).max(0.0) * rhou),
            };
        let edge_mass = state.ledger.column_mass(prior_edge, first_layer) / 1000.0 + underlying;
        let edge_volume = elevation[(yr - 1, prior_edge)] - bottom;
        let edge_density = match edge_mass / edge_volume {
            r if r.is_nan() => rhos,
            r => r.clamp(rhoo, rhos),
        };
        state.series.edge_mass[yr] = edge_mass;
        state.series.edge_density[yr] = edge_density;

        let budget = state.marsh_flux;
        let params = BayParams {
            mineral_density: rhos,
            tidal_period: config.tidal_period,
            cell_count: cells,
            settling_velocity: config.settling_velocity_mudflat,
            critical_shear: config.critical_shear_mudflat,
            reference_concentration: config.reference_concentration_kg(),
            wind_speed: config.wind_speed,
            progradation_coeff: config.marsh_progradation_coeff,
            erosion_coeff: config.marsh_erosion_coeff,
            tidal_amplitude: amp,
            sea_level_rise: config.sea_level_rise_m_per_s(),
            marsh_flux: budget.total() / SECONDS_PER_YEAR,
            erodibility: config.mudflat_erodibility_coeff,
            bank_distance: config.dist_marsh_bank,
            edge_depth: state.edge_depth,
            bay_density: state.bay_density,
            edge_density,
        };
        let start = BayState {
            fetch: state.fetch,
            depth: state.bay_depth,
        };
        let hydro = advance_bay(
            models.bay.as_ref(),
            start,
            &params,
            SECONDS_PER_YEAR,
            integrator,
        );
        let bay_depth = hydro.depth;
        let concentration = hydro
            .edge_concentration
            .unwrap_or(state.series.edge_concentration[yr - 1]);
        let mut fetch = clamp_fetch(hydro.fetch, state.fetch, bay_boundary, prior_edge, prior_forest);
        let export = SedimentMass::split(hydro.boundary_flux * SECONDS_PER_YEAR, oc_prev);
        state.fetch = fetch;
        state.bay_depth = bay_depth;
        state.series.edge_concentration[yr] = concentration;
        metrics.ode_accepted_steps = hydro.stats.accepted;
        metrics.ode_rejected_steps = hydro.stats.rejected;
        metrics.rhs_evaluations = hydro.stats.rhs_evaluations;
        metrics.hydrodynamics_us = phase.elapsed().as_micros() as u64;

        // ── Edge erosion and marsh edge ────────────────────────────
        let phase = Instant::now();
        let erosion = &models.erosion;
        let eroded = erosion
            .eroded_mass(&ErosionInput {
                fetch,
                prior_fetch,
                elevation: state.geometry.elevation(),
                year: yr,
                ledger: &state.ledger,
                underlying_density: rhou,
                bay_boundary,
                msl: &state.series.msl,
                tidal_amplitude: amp,
                bay_depth,
            })
            .map_err(failed(erosion.name()))?
            .to_kg();
        let storage = eroded - budget - export;
        state.series.bay_export[yr] = export;
        state.series.bay_storage[yr] = storage;
        state.series.organic_content[yr] = UNDERLYING_ORGANIC_FRACTION;
        state.bay_density = bulk_density(oc_prev, rhos, rhoo);

        if fetch.floor() <= EDGE_LIMIT as f64 {
            metrics.edge_us = phase.elapsed().as_micros() as u64;
            return Ok(self.terminate(TerminationReason::BasinFilled, yr, metrics, step_start));
        }

        let marsh_edge = (fetch.ceil().max(0.0) as usize + bay_boundary).min(cells - 1);
        let Some(forest_edge) = state.geometry.first_above(yr - 1, forest_threshold) else {
            metrics.edge_us = phase.elapsed().as_micros() as u64;
            return Ok(self.terminate(TerminationReason::BarrierDrowned, yr, metrics, step_start));
        };
        let forest_edge = forest_edge.max(marsh_edge + 1);
        let platform_end = (forest_edge + 1).min(cells);
        let mut platform = state.geometry.elevation().row(yr - 1)[marsh_edge..platform_end].to_vec();

        let mut captured = SedimentMass::ZERO;
        if marsh_edge < prior_edge {
            captured = prograde(
                &mut state.ledger,
                state.geometry.elevation(),
                &mut platform,
                yr,
                prior_edge,
                marsh_edge,
                bay_depth,
                EdgeSediment {
                    organic_fraction: oc_prev,
                    mineral_density: rhos,
                    organic_density: rhoo,
                },
            );
            log::trace!("year {yr}: edge prograded {prior_edge} -> {marsh_edge}");
        } else if marsh_edge > prior_edge {
            let bottom = msl_prev + amp - bay_depth;
            erode_retreat(
                &mut state.ledger,
                state.geometry.elevation(),
                yr,
                prior_edge,
                marsh_edge,
                bottom,
            );
            log::trace!("year {yr}: edge retreated {prior_edge} -> {marsh_edge}");
        }
        metrics.edge_us = phase.elapsed().as_micros() as u64;

        // ── Bay floor ──────────────────────────────────────────────
        let phase = Instant::now();
        let bay_floor = msl_now + amp - bay_depth;
        let prior_floor = msl_prev + amp - state.series.bay_depth[yr - 1];
        state.geometry.elevation_mut().row_mut(yr)[..marsh_edge].fill(bay_floor);
        // A deepening bay strips at most what each cell holds.
        state.ledger.deposit_bounded(
            yr,
            0..marsh_edge,
            mixed_deposit(bay_floor - prior_floor, oc_prev, rhos, rhoo),
        );
        metrics.bay_us = phase.elapsed().as_micros() as u64;

        // ── Marsh platform ─────────────────────────────────────────
        let phase = Instant::now();
        let tidal = &models.tidal;
        let marsh = tidal
            .simulate(&TidalInput {
                elevation: &platform,
                msl: msl_now,
                edge_concentration: concentration,
                organic_fraction: oc_prev,
                tidal_range: config.tidal_range(),
                iterations: config.tidal_iterations,
                tidal_period: config.tidal_period,
                sub_cycle: config.sub_cycle(),
                settling_velocity: config.settling_velocity_effective,
                cycles_per_year: config.tide_cycles_yearly,
                max_biomass: config.maximum_biomass_marsh,
                min_depth: dmin,
                max_depth: dmax,
                organic_density: rhoo,
                mineral_density: rhos,
            })
            .map_err(failed(tidal.name()))?;
        marsh
            .check_len(platform.len())
            .map_err(failed(tidal.name()))?;

        let span = marsh_edge..platform_end;
        let elevation = state.geometry.elevation_mut();
        elevation.row_mut(yr)[span.clone()].copy_from_slice(&marsh.elevation);
        elevation.copy_cells(yr - 1, yr, platform_end..cells);
        for (v, m) in state.ledger.pool_mut(Pool::Mineral).row_mut(yr)[span.clone()]
            .iter_mut()
            .zip(&marsh.mineral)
        {
            *v += m;
        }
        state.ledger.pool_mut(Pool::OrganicAutochthonous).row_mut(yr)[span.clone()]
            .copy_from_slice(&marsh.organic_autoch);
        state.root_input.row_mut(yr)[span.clone()].copy_from_slice(&marsh.organic_autoch);
        state.ledger.pool_mut(Pool::OrganicAllochthonous).row_mut(yr)[span.clone()]
            .copy_from_slice(&marsh.organic_alloch);
        state.aboveground_biomass.row_mut(yr)[span]
            .copy_from_slice(&marsh.aboveground_biomass);
        state.series.belowground_biomass[yr] = marsh.belowground_biomass.iter().sum();
        if !marsh.accretion.is_empty() {
            state.series.mean_accretion[yr] =
                marsh.accretion.iter().sum::<f64>() / marsh.accretion.len() as f64;
        }
        state.marsh_flux = SedimentMass::new(marsh.mineral_flux, marsh.organic_flux) + captured;

        let Some(forest_edge) = state.geometry.first_above(yr, forest_threshold) else {
            metrics.marsh_us = phase.elapsed().as_micros() as u64;
            return Ok(self.terminate(TerminationReason::BarrierDrowned, yr, metrics, step_start));
        };
        let mut forest_edge = forest_edge.max(marsh_edge + 1);
        metrics.marsh_us = phase.elapsed().as_micros() as u64;

        // ── Forest ─────────────────────────────────────────────────
        if config.forest_on {
            let phase = Instant::now();
            state.forest_age = state.forest_age.saturating_add(1);
            backfill(
                &mut state.ledger,
                profiles,
                state.spin_up_years,
                state.forest_age,
                state.series.forest_edge[yr - 1],
                forest_edge,
            );
            let growth = ForestGrowth {
                max_biomass: config.maximum_biomass_forest,
                edge_biomass: config.tree_biomass_forest_edge,
                growth_rate: config.tree_growth_rate,
                background: config.forest_background_carbon_accumulation,
                wetted: config.forest_carbon_layer_wetted_soils,
                decay: config.forest_belowground_decay_constant,
            };
            grow(
                &mut state.ledger,
                &mut state.aboveground_biomass,
                state.geometry.elevation(),
                profiles,
                yr,
                msl_now,
                forest_edge,
                &growth,
            );
            metrics.forest_us = phase.elapsed().as_micros() as u64;
        }

        // ── Decomposition ──────────────────────────────────────────
        let phase = Instant::now();
        let decomposer = &models.decomposer;
        let decay = decomposer
            .decompose(
                &DecompositionInput {
                    elevation: state.geometry.elevation(),
                    marsh_edge,
                    forest_edge,
                    year: yr,
                    cell_count: cells,
                    zero_depth: config.zero_decomposition_depth_marsh,
                    coefficient: config.decomposition_coefficient_marsh,
                    organic_density: rhoo,
                },
                state.ledger.organic_autoch_mut(),
            )
            .map_err(failed(decomposer.name()))?;
        if decay.compaction.len() != cells {
            return Err(failed(decomposer.name())(ModelError::OutputLength {
                output: "compaction",
                expected: cells,
                actual: decay.compaction.len(),
            }));
        }
        state.series.decomposition_flux[yr] = decay.organic_flux;
        for (z, c) in state.geometry.elevation_mut().row_mut(yr)[marsh_edge..]
            .iter_mut()
            .zip(&decay.compaction[marsh_edge..])
        {
            *z -= c;
        }
        let (autoch, alloch) = state.ledger.organic_totals(yr);
        state.series.organic_autoch_total[yr] = autoch;
        state.series.organic_alloch_total[yr] = alloch;
        metrics.decomposition_us = phase.elapsed().as_micros() as u64;

        // ── Edge flooding ──────────────────────────────────────────
        let phase = Instant::now();
        let flooded = flood_scan(
            &mut state.ledger,
            state.geometry.elevation(),
            yr,
            marsh_edge,
            forest_edge,
            FloodCriteria {
                high_water: msl_now + amp,
                max_vegetation_depth: dmax,
                bottom: msl_prev + amp - bay_depth,
            },
        );
        let drowned = flooded.len();
        fetch += drowned as f64;
        let marsh_edge = marsh_edge + drowned;
        state.fetch = fetch;
        state.series.edge_flood[yr] = drowned;
        forest_edge = forest_edge.max(marsh_edge + 1).min(cells);
        if drowned > 0 {
            let released = erosion
                .eroded_mass(&ErosionInput {
                    fetch,
                    prior_fetch,
                    elevation: state.geometry.elevation(),
                    year: yr,
                    ledger: &state.ledger,
                    underlying_density: rhou,
                    bay_boundary,
                    msl: &state.series.msl,
                    tidal_amplitude: amp,
                    bay_depth,
                })
                .map_err(failed(erosion.name()))?
                .to_kg();
            state.marsh_flux -= released;
            let row = state.geometry.elevation_mut().row_mut(yr);
            let floor = row[0];
            row[..marsh_edge.min(cells)].fill(floor);
            log::debug!("year {yr}: {drowned} edge cells drowned");
        }
        metrics.flooding_us = phase.elapsed().as_micros() as u64;

        // ── Records ────────────────────────────────────────────────
        state.fluxes[yr] = FluxRecord::new(eroded, budget, export, storage);
        let s = &mut state.series;
        s.fetch[yr] = fetch;
        s.marsh_edge[yr] = marsh_edge;
        s.forest_edge[yr] = forest_edge;
        s.bay_depth[yr] = bay_depth;
        s.bay_sediment_density[yr] = state.bay_density;
        if marsh_edge > 0 && marsh_edge < cells {
            let depth = msl_now + amp - state.geometry.elevation()[(yr, marsh_edge)];
            state.edge_depth = depth;
            s.edge_height[yr] = depth;
        }
        state.geometry.set_edges(marsh_edge, forest_edge);

        let terminal = if fetch.floor() <= EDGE_LIMIT as f64 {
            Some(TerminationReason::BasinFilled)
        } else if marsh_edge <= EDGE_LIMIT {
            Some(TerminationReason::MarshExpanded)
        } else if marsh_edge >= cells.saturating_sub(EDGE_LIMIT) {
            Some(TerminationReason::MarshRetreated)
        } else if bay_depth < MIN_BAY_DEPTH {
            Some(TerminationReason::BayFilled)
        } else {
            None
        };

        log::debug!(
            "year {yr}: fetch {fetch:.2} m, bay depth {bay_depth:.4} m, edges {marsh_edge}/{forest_edge}, \
             Ce {concentration:.5} kg/m3"
        );

        let ode_recovered = hydro.recovered;
        if let Some(reason) = terminal {
            let mut report = self.terminate(reason, yr, metrics, step_start);
            report.flooded_cells = flooded;
            report.ode_recovered = ode_recovered;
            return Ok(report);
        }

        self.time_index += 1;
        let outcome = if self.time_index == self.config.run_years() {
            self.status = RunStatus::Completed;
            log::info!(
                "transect '{}': completed {} years",
                self.config.name,
                self.time_index
            );
            StepOutcome::Completed
        } else {
            StepOutcome::Advanced
        };
        metrics.total_us = step_start.elapsed().as_micros() as u64;
        self.last_metrics = metrics.clone();
        Ok(StepReport {
            year: yr,
            outcome,
            flooded_cells: flooded,
            ode_recovered,
            metrics,
        })
    }

    fn terminate(
        &mut self,
        reason: TerminationReason,
        year: usize,
        mut metrics: StepMetrics,
        step_start: Instant,
    ) -> StepReport {
        self.status = RunStatus::Terminated(reason);
        self.end_year = year;
        log::info!("transect '{}': {reason} in year {year}", self.config.name);
        metrics.total_us = step_start.elapsed().as_micros() as u64;
        self.last_metrics = metrics.clone();
        StepReport {
            year,
            outcome: StepOutcome::Terminated(reason),
            flooded_cells: SmallVec::new(),
            ode_recovered: None,
            metrics,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Current lifecycle state.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Last row of the run: the termination year, or the total number of
    /// rows while running or after completion.
    pub fn end_year(&self) -> usize {
        self.end_year
    }

    /// Simulated years completed so far.
    pub fn year_index(&self) -> usize {
        self.time_index
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Transect state.
    pub fn state(&self) -> &TransectState {
        &self.state
    }

    /// Scalar parameters of the run.
    pub fn config(&self) -> &TransectConfig {
        &self.config
    }

    /// Organic carbon held in the spin-up marsh.
    pub fn initial_carbon(&self) -> InitialMarshCarbon {
        self.initial_carbon
    }

    /// Digest of the full state, for determinism checks.
    pub fn digest(&self) -> u64 {
        state_digest(&self.state)
    }
}

fn failed(name: &str) -> impl FnOnce(ModelError) -> StepError + '_ {
    move |reason| StepError::ModelFailed {
        name: name.to_string(),
        reason,
    }
}

//! Wind-wave driven bay fetch/depth dynamics.
//!
//! Waves are generated over the bay fetch with the fetch- and
//! depth-limited Young & Verhagen (1996) relations. Wave power at the
//! marsh bank erodes the edge; suspended sediment settling at the edge
//! drives progradation. The depth equation is a bay sediment budget:
//!
//! ```text
//! d(fetch)/dt = Be * W - Ba * Ce * ws / rho_edge
//! d(depth)/dt = RSLR - (Fe - Fm - Fc) / (rho_bay * fetch)
//! ```
//!
//! where `Fe` is the mass released (or captured) by edge motion, `Fm`
//! the flux to the marsh platform and `Fc` the export through the bay
//! mouth.

use std::f64::consts::PI;

use tideline_core::NumericFailure;
use tideline_model::{BayDynamics, BayParams, BayRates, BayState};

const G: f64 = 9.81;

/// Wave state at the marsh bank.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveState {
    /// Significant wave height (m).
    pub height: f64,
    /// Peak period (s).
    pub period: f64,
    /// Wave power per metre of crest (W/m).
    pub power: f64,
    /// Bottom shear stress (Pa).
    pub bottom_shear: f64,
}

/// Reference bay right-hand side.
#[derive(Clone, Debug)]
pub struct WaveBay {
    /// Water density (kg/m3). Default: 1030.
    pub water_density: f64,
    /// Wave friction factor. Default: 0.015.
    pub friction_factor: f64,
}

impl Default for WaveBay {
    fn default() -> Self {
        Self {
            water_density: 1030.0,
            friction_factor: 0.015,
        }
    }
}

/// Solve `omega^2 = g k tanh(k h)` for `k` by Newton iteration.
///
/// Returns `(k, n)` with `n = Cg / C`.
fn wavenumber(omega: f64, depth: f64) -> (f64, f64) {
    let h = depth.max(0.01);
    let mut k = omega * omega / G;
    // Shallow-water start converges faster where kh is small.
    k = k.max(omega / (G * h).sqrt());
    for _ in 0..30 {
        let t = (k * h).tanh();
        let f = omega * omega - G * k * t;
        let df = -G * (t + k * h * (1.0 - t * t));
        let dk = -f / df;
        k += dk;
        if dk.abs() < 1e-10 * k {
            break;
        }
    }
    let kh = k * h;
    let s = (2.0 * kh).sinh();
    let n = if s.abs() > 1e-10 {
        0.5 * (1.0 + 2.0 * kh / s)
    } else {
        1.0
    };
    (k, n)
}

impl WaveBay {
    /// Waves generated over `fetch` metres of water `depth` metres deep.
    pub fn waves(&self, fetch: f64, depth: f64, wind_speed: f64) -> WaveState {
        if wind_speed <= 0.0 || fetch <= 0.0 || depth <= 0.0 {
            return WaveState::default();
        }
        let u2 = wind_speed * wind_speed;

        let a1 = 0.493 * (G * depth / u2).powf(0.75);
        let b1 = 3.13e-3 * (G * fetch / u2).powf(0.57);
        let height = 0.24 * u2 / G * (a1.tanh() * (b1 / a1.tanh()).tanh()).powf(0.87);

        let a2 = 0.331 * (G * depth / u2).powf(1.01);
        let b2 = 5.215e-4 * (G * fetch / u2).powf(0.73);
        let period = 7.54 * wind_speed / G * (a2.tanh() * (b2 / a2.tanh()).tanh()).powf(0.37);

        if period <= 0.0 || height <= 0.0 {
            return WaveState::default();
        }

        let omega = 2.0 * PI / period;
        let (k, n) = wavenumber(omega, depth);
        let group_velocity = n * omega / k;
        let power = self.water_density * G * height * height / 16.0 * group_velocity;

        let kh = k * depth;
        let orbital = if kh > 10.0 {
            0.0
        } else {
            PI * height / (period * kh.sinh())
        };
        let bottom_shear = 0.5 * self.water_density * self.friction_factor * orbital * orbital;

        WaveState {
            height,
            period,
            power,
            bottom_shear,
        }
    }
}

fn finite(value: f64, quantity: &str) -> Result<f64, NumericFailure> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumericFailure::Overflow {
            quantity: quantity.to_string(),
        })
    }
}

impl BayDynamics for WaveBay {
    fn name(&self) -> &str {
        "wave_bay"
    }

    fn rates(&self, state: BayState, p: &BayParams) -> Result<BayRates, NumericFailure> {
        let BayState { fetch, depth } = state;
        if !(depth > 0.0) {
            return Err(NumericFailure::Domain {
                reason: format!("bay depth {depth} is not positive"),
            });
        }
        if !(fetch > 0.0) || fetch > p.cell_count as f64 {
            return Err(NumericFailure::Domain {
                reason: format!("bay fetch {fetch} outside (0, {}]", p.cell_count),
            });
        }

        // Waves are measured a short distance offshore of the bank.
        let wave_fetch = (fetch - p.bank_distance).max(0.0);
        let waves = self.waves(wave_fetch, depth, p.wind_speed);

        let excess_shear = (waves.bottom_shear - p.critical_shear).max(0.0);
        let resuspended = p.erodibility * excess_shear / p.settling_velocity;
        let edge_concentration = finite(p.reference_concentration + resuspended, "concentration")?;

        let tidal_range = 2.0 * p.tidal_amplitude;
        let boundary_flux = (edge_concentration - p.reference_concentration)
            * tidal_range.min(depth)
            * fetch
            / p.tidal_period;

        let edge_rate = p.erosion_coeff * waves.power
            - p.progradation_coeff * edge_concentration * p.settling_velocity / p.edge_density;

        // Eroding edges release marsh sediment; prograding edges bury bay sediment.
        let scarp = (depth - p.edge_depth).max(0.0);
        let edge_mass = if edge_rate > 0.0 {
            edge_rate * scarp * p.edge_density
        } else {
            edge_rate * scarp * p.bay_density
        };

        let d_depth = p.sea_level_rise
            - (edge_mass - p.marsh_flux - boundary_flux) / (p.bay_density * fetch);

        Ok(BayRates {
            d_fetch: finite(edge_rate, "fetch rate")?,
            d_depth: finite(d_depth, "depth rate")?,
            edge_concentration,
            boundary_flux: finite(boundary_flux, "boundary flux")?,
        })
    }
}

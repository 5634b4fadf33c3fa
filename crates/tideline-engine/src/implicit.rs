//! Adaptive backward-Euler integrator for the two-equation bay system.
//!
//! Each step is taken twice: once with the full step `h` and once as two
//! half steps. The difference estimates the local error; the half-step
//! result is kept when the scaled error is at most one. Implicit stages
//! are solved by Newton iteration with a forward-difference Jacobian.
//! Stages that fail to converge, or whose right-hand side fails at a
//! trial point, shrink the step. The run fails once the step falls below
//! a floor relative to the interval or the step budget is spent.

use tideline_core::NumericFailure;

/// State vector: `[fetch, depth]`.
pub type State = [f64; 2];

const MAX_STEPS: u32 = 50_000;
const MAX_NEWTON: usize = 8;
const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 4.0;
/// Smallest step, as a fraction of the interval.
const MIN_STEP_FRACTION: f64 = 1e-12;
/// Smallest first step, as a fraction of the interval.
const MIN_INITIAL_FRACTION: f64 = 1e-8;

/// Absolute and relative error tolerances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    /// Absolute tolerance. Default: 1e-6.
    pub atol: f64,
    /// Relative tolerance. Default: 1e-6.
    pub rtol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            atol: 1e-6,
            rtol: 1e-6,
        }
    }
}

impl Tolerances {
    fn scale(&self, magnitude: f64) -> f64 {
        self.atol + self.rtol * magnitude.abs()
    }
}

/// Work done by one integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegrationStats {
    /// Steps accepted.
    pub accepted: u32,
    /// Steps rejected (error too large or a stage failed).
    pub rejected: u32,
    /// Right-hand-side evaluations.
    pub rhs_evaluations: u32,
}

/// Adaptive backward-Euler integrator.
#[derive(Clone, Debug, Default)]
pub struct BackwardEuler {
    tolerances: Tolerances,
    stats: IntegrationStats,
    last_failure: Option<NumericFailure>,
}

impl BackwardEuler {
    /// Integrator with the given tolerances.
    pub fn new(tolerances: Tolerances) -> Self {
        Self {
            tolerances,
            ..Self::default()
        }
    }

    /// Counters from the most recent [`integrate`](Self::integrate) call.
    pub fn stats(&self) -> IntegrationStats {
        self.stats
    }

    /// Integrate `y' = rhs(y)` from `y0` over `[0, t_end]`.
    ///
    /// # Errors
    ///
    /// The right-hand side's own failure if it fails at `y0`, or if it
    /// keeps failing until the step underflows; otherwise
    /// [`NumericFailure::Domain`] on step underflow or an exhausted step
    /// budget.
    pub fn integrate<F>(&mut self, mut rhs: F, y0: State, t_end: f64) -> Result<State, NumericFailure>
    where
        F: FnMut(State) -> Result<State, NumericFailure>,
    {
        self.stats = IntegrationStats::default();
        self.last_failure = None;
        if !(t_end > 0.0) {
            return Ok(y0);
        }

        let f0 = self.eval(&mut rhs, y0)?;
        let mut h = self.initial_step(y0, f0, t_end);
        let h_min = t_end * MIN_STEP_FRACTION;
        let mut y = y0;
        let mut t = 0.0;

        while t < t_end {
            if self.stats.accepted + self.stats.rejected >= MAX_STEPS {
                return Err(NumericFailure::Domain {
                    reason: format!("step budget of {MAX_STEPS} exhausted at t = {t}"),
                });
            }
            h = h.min(t_end - t);
            if h < h_min {
                return Err(self.last_failure.take().unwrap_or(NumericFailure::Domain {
                    reason: format!("step size {h} below minimum at t = {t}"),
                }));
            }

            let Some((full, halves)) = self.doubled_step(&mut rhs, y, h) else {
                self.stats.rejected += 1;
                h *= 0.25;
                log::trace!("stage failed at t = {t}; shrinking step to {h}");
                continue;
            };

            let err = (0..2)
                .map(|i| {
                    let scale = self.tolerances.scale(y[i].abs().max(halves[i].abs()));
                    (halves[i] - full[i]).abs() / scale
                })
                .fold(0.0_f64, f64::max);

            if err <= 1.0 {
                t += h;
                y = halves;
                self.stats.accepted += 1;
            } else {
                self.stats.rejected += 1;
            }
            let factor = (SAFETY / err.max(1e-10).sqrt()).clamp(MIN_FACTOR, MAX_FACTOR);
            log::trace!("t = {t}, h = {h}, err = {err:.3e}, factor = {factor:.2}");
            h *= factor;
        }
        Ok(y)
    }

    fn eval<F>(&mut self, rhs: &mut F, y: State) -> Result<State, NumericFailure>
    where
        F: FnMut(State) -> Result<State, NumericFailure>,
    {
        self.stats.rhs_evaluations = self.stats.rhs_evaluations.saturating_add(1);
        let f = rhs(y)?;
        if f.iter().all(|v| v.is_finite()) {
            Ok(f)
        } else {
            Err(NumericFailure::Overflow {
                quantity: "bay rates".to_string(),
            })
        }
    }

    fn initial_step(&self, y0: State, f0: State, t_end: f64) -> f64 {
        let rate = (0..2)
            .map(|i| f0[i].abs() / self.tolerances.scale(y0[i]))
            .fold(0.0_f64, f64::max);
        if rate > 0.0 {
            (0.01 / rate).clamp(t_end * MIN_INITIAL_FRACTION, t_end)
        } else {
            t_end
        }
    }

    /// One full step and two half steps from `y`.
    fn doubled_step<F>(&mut self, rhs: &mut F, y: State, h: f64) -> Option<(State, State)>
    where
        F: FnMut(State) -> Result<State, NumericFailure>,
    {
        let full = self.stage(rhs, y, h)?;
        let mid = self.stage(rhs, y, 0.5 * h)?;
        let end = self.stage(rhs, mid, 0.5 * h)?;
        Some((full, end))
    }

    /// Solve `z = y + h f(z)` by Newton iteration.
    ///
    /// `None` if the right-hand side fails, the Jacobian is singular or
    /// the iteration does not converge.
    fn stage<F>(&mut self, rhs: &mut F, y: State, h: f64) -> Option<State>
    where
        F: FnMut(State) -> Result<State, NumericFailure>,
    {
        let mut z = y;
        for _ in 0..MAX_NEWTON {
            let fz = self.try_eval(rhs, z)?;
            let residual = [z[0] - y[0] - h * fz[0], z[1] - y[1] - h * fz[1]];

            // Forward-difference Jacobian of the residual: I - h df/dz.
            let mut jac = [[0.0; 2]; 2];
            for j in 0..2 {
                let dz = f64::EPSILON.sqrt() * z[j].abs().max(1.0);
                let mut zp = z;
                zp[j] += dz;
                let fp = self.try_eval(rhs, zp)?;
                for i in 0..2 {
                    let identity = if i == j { 1.0 } else { 0.0 };
                    jac[i][j] = identity - h * (fp[i] - fz[i]) / dz;
                }
            }

            let det = jac[0][0] * jac[1][1] - jac[0][1] * jac[1][0];
            if det == 0.0 || !det.is_finite() {
                return None;
            }
            let delta = [
                -(jac[1][1] * residual[0] - jac[0][1] * residual[1]) / det,
                -(jac[0][0] * residual[1] - jac[1][0] * residual[0]) / det,
            ];
            z = [z[0] + delta[0], z[1] + delta[1]];
            if !z.iter().all(|v| v.is_finite()) {
                return None;
            }
            let converged = (0..2).all(|i| delta[i].abs() <= 0.01 * self.tolerances.scale(z[i]));
            if converged {
                return Some(z);
            }
        }
        None
    }

    fn try_eval<F>(&mut self, rhs: &mut F, y: State) -> Option<State>
    where
        F: FnMut(State) -> Result<State, NumericFailure>,
    {
        match self.eval(rhs, y) {
            Ok(f) => Some(f),
            Err(e) => {
                self.last_failure = Some(e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_rates_are_exact() {
        let mut be = BackwardEuler::default();
        let y = be
            .integrate(|_| Ok([2.0, -0.5]), [10.0, 3.0], 4.0)
            .unwrap();
        assert!((y[0] - 18.0).abs() < 1e-9);
        assert!((y[1] - 1.0).abs() < 1e-9);
        assert!(be.stats().accepted >= 1);
    }

    #[test]
    fn zero_rates_take_one_step() {
        let mut be = BackwardEuler::default();
        let y = be.integrate(|_| Ok([0.0, 0.0]), [5.0, 1.0], 3.15e7).unwrap();
        assert_eq!(y, [5.0, 1.0]);
        assert_eq!(be.stats().accepted, 1);
        assert_eq!(be.stats().rejected, 0);
    }

    #[test]
    fn exponential_decay_tracks_solution() {
        let mut be = BackwardEuler::default();
        let y = be
            .integrate(|y| Ok([-y[0], -0.5 * y[1]]), [1.0, 1.0], 1.0)
            .unwrap();
        assert!((y[0] - (-1.0_f64).exp()).abs() < 1e-3);
        assert!((y[1] - (-0.5_f64).exp()).abs() < 1e-3);
    }

    #[test]
    fn stiff_relaxation_is_stable() {
        let mut be = BackwardEuler::default();
        let y = be
            .integrate(|y| Ok([-1e4 * (y[0] - 1.0), -y[1]]), [0.0, 1.0], 2.0)
            .unwrap();
        assert!((y[0] - 1.0).abs() < 1e-4);
        assert!(y[1] > 0.0);
    }

    #[test]
    fn failure_at_start_propagates() {
        let mut be = BackwardEuler::default();
        let err = be
            .integrate(
                |_| {
                    Err(NumericFailure::Domain {
                        reason: "always".into(),
                    })
                },
                [1.0, 1.0],
                1.0,
            )
            .unwrap_err();
        assert_eq!(
            err,
            NumericFailure::Domain {
                reason: "always".into()
            }
        );
        assert_eq!(be.stats().rhs_evaluations, 1);
    }

    #[test]
    fn leaving_the_domain_underflows() {
        // Depth is driven through zero where the rates are undefined.
        let mut be = BackwardEuler::default();
        let result = be.integrate(
            |y| {
                if y[1] <= 0.0 {
                    Err(NumericFailure::Domain {
                        reason: "dry bay".into(),
                    })
                } else {
                    Ok([0.0, -1.0])
                }
            },
            [1.0, 0.5],
            1.0,
        );
        assert!(result.is_err());
        assert!(be.stats().rejected > 0);
    }

    #[test]
    fn non_finite_rates_are_overflow() {
        let mut be = BackwardEuler::default();
        let err = be
            .integrate(|_| Ok([f64::NAN, 0.0]), [1.0, 1.0], 1.0)
            .unwrap_err();
        assert!(matches!(err, NumericFailure::Overflow { .. }));
    }
}

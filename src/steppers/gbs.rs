//! Gragg-Bulirsch-Stoer base stepper

use crate::state::State;
use crate::system::System;

/// Modified-midpoint (leap-frog) sub-integration with final smoothing.
///
/// The smoothing step suppresses the weak instability of pure leap-frog
/// and keeps the asymptotic error expansion in even powers of the
/// sub-step size only, so each cancelled term of a Richardson
/// extrapolation over the subinterval count gains two orders of accuracy.
/// The extrapolates also have good imaginary-axis coverage, which makes
/// them useful for method-of-lines treatment of hyperbolic PDE.
///
/// # Characteristics
/// - Order: 2 (before extrapolation)
/// - System evaluations per call: `n` (plus the shared one passed in)
/// - Explicit, fixed sub-step
///
/// # References
/// - Gragg, W. B. (1965). "On Extrapolation Algorithms for Ordinary
///   Initial Value Problems". SIAM Journal on Numerical Analysis, 2(3).
/// - Hairer, E., Nørsett, S. P., & Wanner, G. (1993). "Solving Ordinary
///   Differential Equations I: Nonstiff Problems". Springer, §II.9.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gbs;

/// Ring index triples: `RING[cur]` is the (previous, current, next)
/// slot assignment for the leap-frog recurrence at position `cur`.
const RING: [[usize; 3]; 3] = [[0, 1, 2], [1, 2, 0], [2, 0, 1]];

impl Gbs {
    /// Advance `y0` by `dt` using `n >= 2` leap-frog subintervals,
    /// writing the smoothed result into `y`.
    ///
    /// `f0` must be `system` evaluated at `(t, y0)`; it is taken as an
    /// argument so one evaluation at the macro-step's starting point can
    /// be shared by every sub-integration. `scratch` is the three-slot
    /// ring; its contents on entry are irrelevant but its shapes must
    /// match `y0`.
    #[allow(clippy::too_many_arguments)]
    pub fn step<Y, S>(
        system: &mut S,
        y0: &Y,
        y: &mut Y,
        t: f64,
        dt: f64,
        n: usize,
        f0: &Y,
        scratch: &mut [Y; 3],
    ) where
        Y: State,
        S: System<Y>,
    {
        debug_assert!(n >= 2, "leap-frog needs at least two subintervals");

        let h = dt / n as f64;
        let mut tn = t;

        // forward Euler start
        scratch[0].copy_from(y0);
        scratch[0].axpy(h, f0);
        tn += h;

        // first leap-frog step runs off y0 directly, avoiding a copy
        let fval = system.eval(tn, &scratch[0]);
        scratch[1].copy_from(y0);
        scratch[1].axpy(2.0 * h, &fval);

        // leap-frog iteration over the ring
        let mut cur = 2;
        for _ in 1..n {
            cur = if cur < 2 { cur + 1 } else { 0 };
            tn += h;
            let [ia, ib, ic] = RING[cur];
            let fval = system.eval(tn, &scratch[ib]);
            let (sa, sc) = ring_pair(scratch, ia, ic);
            sc.copy_from(sa);
            sc.axpy(2.0 * h, &fval);
        }

        // smoothing: y = (s[a] + 2 s[b] + s[c]) / 4
        let [ia, ib, ic] = RING[cur];
        y.copy_from(&scratch[ia]);
        y.axpy(2.0, &scratch[ib]);
        y.axpy(1.0, &scratch[ic]);
        y.scale_mut(0.25);
    }
}

/// Split the ring into the (read, write) slot pair for one leap-frog step
fn ring_pair<Y>(scratch: &mut [Y; 3], ia: usize, ic: usize) -> (&Y, &mut Y) {
    let [s0, s1, s2] = scratch;
    match (ia, ic) {
        (0, 2) => (&*s0, s2),
        (1, 0) => (&*s1, s0),
        (2, 1) => (&*s2, s1),
        _ => unreachable!("ring indices always two apart"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    fn gbs_exp(dt: f64, n: usize) -> f64 {
        // dy/dt = y, y(0) = 1, one macro-step of size dt
        let mut system = |_t: f64, y: &f64| *y;
        let y0 = 1.0;
        let f0 = y0;
        let mut y = 0.0;
        let mut scratch = [0.0; 3];
        Gbs::step(&mut system, &y0, &mut y, 0.0, dt, n, &f0, &mut scratch);
        y
    }

    #[test]
    fn test_exponential_single_step() {
        let y = gbs_exp(0.1, 10);
        assert_relative_eq!(y, 0.1f64.exp(), epsilon = 1e-4);
    }

    #[test]
    fn test_error_is_second_order_in_substep() {
        // doubling n should shrink the error by about 4x
        let exact = 0.5f64.exp();
        let e1 = (gbs_exp(0.5, 8) - exact).abs();
        let e2 = (gbs_exp(0.5, 16) - exact).abs();
        let ratio = e1 / e2;
        assert!(ratio > 3.5 && ratio < 4.5, "ratio = {}", ratio);
    }

    #[test]
    fn test_harmonic_oscillator_vector_state() {
        // [x, v]' = [v, -x], one period
        let mut system = |_t: f64, y: &DVector<f64>| {
            DVector::from_vec(vec![y[1], -y[0]])
        };

        let mut y = DVector::from_vec(vec![1.0, 0.0]);
        let mut scratch = [
            DVector::zeros(2),
            DVector::zeros(2),
            DVector::zeros(2),
        ];

        let nsteps = 100;
        let dt = 2.0 * std::f64::consts::PI / nsteps as f64;
        let mut t = 0.0;
        for _ in 0..nsteps {
            let y0 = y.clone();
            let f0 = system(t, &y0);
            Gbs::step(&mut system, &y0, &mut y, t, dt, 8, &f0, &mut scratch);
            t += dt;
        }

        assert_relative_eq!(y[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(y[1], 0.0, epsilon = 1e-3, max_relative = 1.0);
    }

    #[test]
    fn test_minimum_two_subintervals() {
        // n = 2 exercises the shortest ring walk
        let y = gbs_exp(0.01, 2);
        assert_relative_eq!(y, 0.01f64.exp(), epsilon = 1e-6);
    }
}

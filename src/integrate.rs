//! Integration facade

use crate::error::Error;
use crate::extrapolation::ExtrapolationStepper;
use crate::state::State;
use crate::system::System;

/// Scheme selection and execution options for [`integrate`].
///
/// The defaults are the order-8, 3-core scheme run in parallel. `cores`
/// selects the extrapolation weights as well as bounding the worker
/// count; `parallel = false` runs the same scheme single-threaded with
/// bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub order: usize,
    pub cores: usize,
    pub parallel: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            order: 8,
            cores: 3,
            parallel: true,
        }
    }
}

/// Integrate `system` from `y0` over `n` macro-steps of size `dt`.
///
/// `observer` is invoked after every macro-step with the post-step time
/// and state. Returns the final state, or an error if the
/// `(order, cores)` pair in `options` has no scheme in the catalogue.
///
/// # Example
///
/// ```
/// use exstep::{integrate, Options};
///
/// let options = Options { order: 12, cores: 4, ..Options::default() };
/// let y = integrate(|_t, y: &f64| *y, &1.0, 0.0, 0.0625, 32, |_, _| {}, &options).unwrap();
/// assert!((y - 2.0f64.exp()).abs() < 1e-11);
/// ```
pub fn integrate<Y, S, O>(
    system: S,
    y0: &Y,
    t: f64,
    dt: f64,
    n: usize,
    observer: O,
    options: &Options,
) -> Result<Y, Error>
where
    Y: State,
    S: System<Y> + Clone + 'static,
    O: FnMut(f64, &Y),
{
    let mut stepper =
        ExtrapolationStepper::new(system, y0, options.order, options.cores, options.parallel)?;

    let mut y = y0.clone();
    stepper.step_with(&mut y, t, dt, n, observer);
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.order, 8);
        assert_eq!(options.cores, 3);
        assert!(options.parallel);
    }

    #[test]
    fn test_unsupported_options_error() {
        let options = Options { order: 9, cores: 3, parallel: false };
        let result = integrate(|_t, y: &f64| *y, &1.0, 0.0, 0.1, 1, |_, _| {}, &options);
        assert_eq!(result, Err(Error::UnsupportedScheme { order: 9, cores: 3 }));
    }

    #[test]
    fn test_initial_state_is_not_mutated() {
        let y0 = 1.0;
        let y = integrate(
            |_t, y: &f64| *y,
            &y0,
            0.0,
            0.1,
            5,
            |_, _| {},
            &Options { parallel: false, ..Options::default() },
        )
        .unwrap();
        assert_eq!(y0, 1.0);
        assert!(y > 1.0);
    }
}

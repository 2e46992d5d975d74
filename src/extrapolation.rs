//! Underdetermined parallel extrapolation stepper

use std::sync::{Arc, Mutex, RwLock};

use crate::config::Scheme;
use crate::error::Error;
use crate::partition::partition;
use crate::state::State;
use crate::steppers::Gbs;
use crate::system::System;
use crate::threading::Pool;

/// Per-macro-step inputs, published by the driving thread before the
/// pool barrier releases the workers and read-only for them afterwards.
/// The driver swaps the caller's state in and out instead of copying it.
struct Latch<Y> {
    y: Y,
    t: f64,
    dt: f64,
}

enum Mode<Y, S> {
    Serial {
        system: S,
        scratch: [Y; 3],
        outputs: Vec<Y>,
    },
    Parallel {
        pool: Pool,
        latch: Arc<RwLock<Latch<Y>>>,
        outputs: Arc<Vec<Mutex<Y>>>,
    },
}

/// Runs many GBS sub-integrations per macro-step and linearly combines
/// their outputs into a single high-order result.
///
/// The scheme is underdetermined: it carries more sub-integrations than
/// the order requires, and the surplus weights are chosen offline to
/// enlarge the stability domain (reported through [`isbn`](Self::isbn))
/// rather than to raise the order. Since every sub-integration starts
/// from the same input state they are independent, so in parallel mode
/// they are bin-packed onto a pool of workers and one macro-step costs
/// one fan-out/fan-in barrier.
///
/// The weighted reduction always runs on the driving thread in fixed
/// index order, so a serial and a parallel run of the same problem
/// produce the same floating-point output.
pub struct ExtrapolationStepper<Y, S> {
    scheme: &'static Scheme,
    mode: Mode<Y, S>,
}

impl<Y, S> std::fmt::Debug for ExtrapolationStepper<Y, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtrapolationStepper")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

impl<Y, S> ExtrapolationStepper<Y, S>
where
    Y: State,
    S: System<Y>,
{
    /// Construct a single-threaded stepper.
    ///
    /// Uses the same step counts and weights as the parallel variant for
    /// the given `(order, cores)` pair, so results match bit for bit.
    /// `y0` only seeds the shapes of the output and scratch buffers.
    pub fn serial(system: S, y0: &Y, order: usize, cores: usize) -> Result<Self, Error> {
        let scheme = Scheme::lookup(order, cores)?;
        let outputs = vec![y0.clone(); scheme.num_steppers()];
        let scratch = [y0.clone(), y0.clone(), y0.clone()];
        Ok(Self {
            scheme,
            mode: Mode::Serial {
                system,
                scratch,
                outputs,
            },
        })
    }

    /// Order of accuracy of the extrapolation scheme
    pub fn order(&self) -> usize {
        self.scheme.order
    }

    /// Normalized imaginary-axis stability boundary of the scheme
    pub fn isbn(&self) -> f32 {
        self.scheme.isbn
    }

    /// The scheme driving this stepper
    pub fn scheme(&self) -> &'static Scheme {
        self.scheme
    }

    /// Number of spawned worker threads (zero when serial)
    pub fn num_workers(&self) -> usize {
        match &self.mode {
            Mode::Serial { .. } => 0,
            Mode::Parallel { pool, .. } => pool.size(),
        }
    }

    /// Advance `y` by `n` macro-steps of size `dt`, unobserved
    pub fn step(&mut self, y: &mut Y, t: f64, dt: f64, n: usize) {
        self.step_with(y, t, dt, n, |_t, _y: &Y| {});
    }

    /// Advance `y` by `n` macro-steps of size `dt`, invoking `observer`
    /// with the post-step time and state after each one.
    ///
    /// Stepping is total: divergence shows up as NaN/Inf in the observed
    /// states, never as an error return.
    pub fn step_with<O>(&mut self, y: &mut Y, mut t: f64, dt: f64, n: usize, mut observer: O)
    where
        O: FnMut(f64, &Y),
    {
        for _ in 0..n {
            self.evaluate(y, t, dt);
            self.reduce(y);
            t += dt;
            observer(t, y);
        }
    }

    /// Run the sub-integrations for one macro-step
    fn evaluate(&mut self, y: &mut Y, t: f64, dt: f64) {
        match &mut self.mode {
            Mode::Serial {
                system,
                scratch,
                outputs,
            } => {
                // one evaluation at the starting point, shared by every
                // sub-integration
                let f0 = system.eval(t, y);
                for (out, &count) in outputs.iter_mut().zip(self.scheme.step_counts) {
                    Gbs::step(system, y, out, t, dt, count, &f0, scratch);
                }
            }
            Mode::Parallel { pool, latch, .. } => {
                {
                    let mut latch = latch.write().unwrap();
                    std::mem::swap(&mut latch.y, y);
                    latch.t = t;
                    latch.dt = dt;
                }
                pool.process();
            }
        }
    }

    /// Combine the sub-integration outputs into `y`, in index order.
    ///
    /// The order is fixed because floating-point addition is not
    /// associative; keeping it makes serial and parallel runs agree.
    fn reduce(&mut self, y: &mut Y) {
        let weights = self.scheme.weights;
        match &mut self.mode {
            Mode::Serial { outputs, .. } => {
                y.copy_from(&outputs[0]);
                y.scale_mut(weights[0]);
                for (w, out) in weights.iter().zip(outputs.iter()).skip(1) {
                    y.axpy(*w, out);
                }
            }
            Mode::Parallel { outputs, .. } => {
                {
                    let out = outputs[0].lock().unwrap();
                    y.copy_from(&out);
                    y.scale_mut(weights[0]);
                }
                for (w, out) in weights.iter().zip(outputs.iter()).skip(1) {
                    let out = out.lock().unwrap();
                    y.axpy(*w, &out);
                }
            }
        }
    }
}

impl<Y, S> ExtrapolationStepper<Y, S>
where
    Y: State,
    S: System<Y> + Clone + 'static,
{
    /// Construct a stepper, parallel or serial.
    ///
    /// `cores` selects the extrapolation scheme; the pair must be in the
    /// supported catalogue. In parallel mode the step counts are
    /// bin-packed into groups of roughly equal cost and one worker is
    /// spawned per group (never more than `cores`), each owning its own
    /// replica of `system` and its own scratch ring.
    pub fn new(system: S, y0: &Y, order: usize, cores: usize, parallel: bool) -> Result<Self, Error> {
        if !parallel {
            return Self::serial(system, y0, order, cores);
        }

        let scheme = Scheme::lookup(order, cores)?;
        let m = scheme.num_steppers();

        // group the step counts into bins of roughly equal cost, then map
        // the bin values back to stepper indices (counts are distinct in
        // every supported scheme, so the search is unambiguous)
        let bins = partition(scheme.step_counts);
        let bin_indices: Vec<Vec<usize>> = bins
            .iter()
            .map(|bin| {
                bin.iter()
                    .map(|value| {
                        scheme
                            .step_counts
                            .iter()
                            .position(|count| count == value)
                            .expect("bin value comes from the step counts")
                    })
                    .collect()
            })
            .collect();

        let latch = Arc::new(RwLock::new(Latch {
            y: y0.clone(),
            t: 0.0,
            dt: 0.0,
        }));
        let outputs: Arc<Vec<Mutex<Y>>> =
            Arc::new((0..m).map(|_| Mutex::new(y0.clone())).collect());

        let mut pool = Pool::new(bin_indices.len());
        for (k, indices) in bin_indices.iter().enumerate() {
            let latch = Arc::clone(&latch);
            let outputs = Arc::clone(&outputs);
            let indices = indices.clone();
            let step_counts = scheme.step_counts;
            let mut system = system.clone();
            let mut scratch = [y0.clone(), y0.clone(), y0.clone()];

            pool.emplace(k, move || {
                let latch = latch.read().unwrap();

                // one evaluation at the starting point, shared by every
                // sub-integration in this bin
                let f0 = system.eval(latch.t, &latch.y);

                for &j in &indices {
                    let mut out = outputs[j].lock().unwrap();
                    Gbs::step(
                        &mut system,
                        &latch.y,
                        &mut out,
                        latch.t,
                        latch.dt,
                        step_counts[j],
                        &f0,
                        &mut scratch,
                    );
                }
            });
        }

        Ok(Self {
            scheme,
            mode: Mode::Parallel {
                pool,
                latch,
                outputs,
            },
        })
    }
}

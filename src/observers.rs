//! Observation sinks for recorded integrations
//!
//! Observers are plain `FnMut(f64, &Y)` closures; pass `|_, _| {}` to
//! observe nothing. [`DenseObserver`] is the common recording sink.

/// Records the time and state after every macro-step.
///
/// The observer only reads the post-step state; it has no way to alter
/// the integration.
///
/// # Example
///
/// ```
/// use exstep::{integrate, DenseObserver, Options};
///
/// let mut dense = DenseObserver::with_capacity(16);
/// integrate(
///     |_t, y: &f64| -*y,
///     &1.0,
///     0.0,
///     0.125,
///     16,
///     |t, y: &f64| dense.observe(t, y),
///     &Options::default(),
/// )
/// .unwrap();
///
/// assert_eq!(dense.len(), 16);
/// assert!((dense.states()[15] - (-2.0f64).exp()).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DenseObserver<Y> {
    times: Vec<f64>,
    states: Vec<Y>,
}

impl<Y: Clone> DenseObserver<Y> {
    pub fn new() -> Self {
        Self {
            times: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Preallocate for `size` samples
    pub fn with_capacity(size: usize) -> Self {
        Self {
            times: Vec::with_capacity(size),
            states: Vec::with_capacity(size),
        }
    }

    /// Append one sample
    pub fn observe(&mut self, t: f64, y: &Y) {
        self.times.push(t);
        self.states.push(y.clone());
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Recorded sample times
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Recorded states, one per sample time
    pub fn states(&self) -> &[Y] {
        &self.states
    }
}

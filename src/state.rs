//! State vector abstraction

use nalgebra::{DVector, SVector};

/// Elementwise arithmetic surface the steppers need from a state vector.
///
/// The core treats states as opaque values: every intermediate is an owned
/// copy seeded from the initial state, and all arithmetic is in place so
/// the hot loop never allocates. Any type with elementwise add, scalar
/// multiply, and copy can implement this; implementations for `f64`,
/// [`DVector<f64>`], and [`SVector<f64, N>`] ship with the crate.
///
/// All states flowing through one integration must have the shape of the
/// initial state; the core does not check this. `Send + Sync` are part of
/// the contract because parallel macro-steps hand every worker a shared
/// reference to the latched input state.
pub trait State: Clone + Send + Sync + 'static {
    /// Overwrite `self` with a copy of `other`
    fn copy_from(&mut self, other: &Self);

    /// `self <- a * x + self`
    fn axpy(&mut self, a: f64, x: &Self);

    /// `self <- a * self`
    fn scale_mut(&mut self, a: f64);
}

impl State for f64 {
    fn copy_from(&mut self, other: &Self) {
        *self = *other;
    }

    fn axpy(&mut self, a: f64, x: &Self) {
        *self += a * x;
    }

    fn scale_mut(&mut self, a: f64) {
        *self *= a;
    }
}

impl State for DVector<f64> {
    fn copy_from(&mut self, other: &Self) {
        DVector::copy_from(self, other);
    }

    fn axpy(&mut self, a: f64, x: &Self) {
        DVector::axpy(self, a, x, 1.0);
    }

    fn scale_mut(&mut self, a: f64) {
        *self *= a;
    }
}

impl<const N: usize> State for SVector<f64, N> {
    fn copy_from(&mut self, other: &Self) {
        SVector::copy_from(self, other);
    }

    fn axpy(&mut self, a: f64, x: &Self) {
        SVector::axpy(self, a, x, 1.0);
    }

    fn scale_mut(&mut self, a: f64) {
        *self *= a;
    }
}

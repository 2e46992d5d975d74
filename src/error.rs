//! Crate error types

use thiserror::Error;

/// Errors raised while constructing a stepper.
///
/// Stepping itself is total: numerical divergence (NaN/Inf) propagates
/// through the state and is left to the observer to detect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no extrapolation scheme for order {order} on {cores} cores")]
    UnsupportedScheme { order: usize, cores: usize },
}

//! exstep - Parallel extrapolation time stepping for ordinary differential equations
//!
//! Advances a user-supplied time derivative `f(t, y) -> y'` over a fixed
//! sequence of macro-steps using an underdetermined Richardson-style
//! extrapolation of the Gragg-Bulirsch-Stoer (GBS) base method. Each
//! macro-step runs several independent GBS sub-integrations at different
//! sub-step counts and combines their outputs with precomputed rational
//! weights; the surplus sub-integrations are spent enlarging the stability
//! region rather than raising the order further.
//!
//! # Architecture
//!
//! - Sub-integrations within a macro-step are independent, so they are
//!   bin-packed onto a static pool of worker threads and computed in
//!   parallel behind a fan-out/fan-in barrier
//! - The weighted reduction always runs in fixed index order, so serial
//!   and parallel runs produce the same floating-point output
//! - Supported schemes are a fixed catalogue of `(order, cores)` pairs;
//!   anything else is rejected at construction
//!
//! # Example
//!
//! ```
//! use exstep::{integrate, Options};
//!
//! // dy/dt = y, y(0) = 1, integrated to t = 2
//! let nsteps = 32;
//! let dt = 2.0 / nsteps as f64;
//! let y = integrate(
//!     |_t, y: &f64| *y,
//!     &1.0,
//!     0.0,
//!     dt,
//!     nsteps,
//!     |_t, _y: &f64| {},
//!     &Options::default(),
//! )
//! .unwrap();
//!
//! assert!((y - 2.0f64.exp()).abs() < 3e-12);
//! ```

pub mod config;
pub mod error;
pub mod extrapolation;
pub mod integrate;
pub mod observers;
pub mod partition;
pub mod state;
pub mod steppers;
pub mod system;
pub mod threading;

pub use config::Scheme;
pub use error::Error;
pub use extrapolation::ExtrapolationStepper;
pub use integrate::{integrate, Options};
pub use observers::DenseObserver;
pub use state::State;
pub use system::System;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Scheme;
    pub use crate::error::Error;
    pub use crate::extrapolation::ExtrapolationStepper;
    pub use crate::integrate::{integrate, Options};
    pub use crate::observers::DenseObserver;
    pub use crate::state::State;
    pub use crate::steppers::Gbs;
    pub use crate::system::System;
}

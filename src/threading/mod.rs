//! Worker-thread plumbing for parallel macro-steps
//!
//! A [`Pool`] owns long-lived [`Worker`] threads, each parked on its own
//! [`Semaphore`] between macro-steps. `Pool::process()` is the fan-out /
//! fan-in barrier the extrapolation stepper runs once per macro-step.

mod pool;
mod semaphore;
mod worker;

pub use pool::Pool;
pub use semaphore::Semaphore;
pub use worker::Worker;

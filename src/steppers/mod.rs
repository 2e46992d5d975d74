//! Base time stepping methods

mod gbs;

pub use gbs::Gbs;

//! Kelvin-Helmholtz problem setup and on-the-fly interface diagnostics.
//!
//! The host solver owns the mesh and the time integration; this crate fills
//! the conserved variables for one of three KH configurations at setup and,
//! for the double shear layer, reduces the evolved state to mixing-layer and
//! shear-layer widths once per diagnostic cadence.

pub mod config;
pub mod grid;
pub mod physics;
pub mod problem;

pub use config::Config;
pub use grid::{Domain, Grid};
pub use physics::PhysicsState;
pub use problem::{Iprob, ProblemParams};

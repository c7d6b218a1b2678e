//! # Buoyancy Simulation
//!
//! Interaction state for the buoyancy lab: the current densities, the trailing
//! force chart and the mapping from physics results to what gets drawn.

pub mod controller;
pub mod error;
pub mod params;
pub mod presentation;
pub mod state;
pub mod trend;

pub use controller::*;
pub use error::{DensityKind, SimulationError};
pub use params::*;
pub use presentation::*;
pub use state::*;
pub use trend::*;

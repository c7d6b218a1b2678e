//! # Buoyancy Physics
//!
//! Closed-form Archimedes model for a single rigid object resting in a liquid
//! column. Densities are in g/cm³, volumes in cm³, forces in newtons.

pub mod constants;
pub mod model;

pub use constants::*;
pub use model::*;

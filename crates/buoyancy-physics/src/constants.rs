//! Physical constants for the buoyancy model
//!
//! The unit conversions mirror what the visualization has always shown, so the
//! force readout stays comparable between runs.

/// Gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.8;

/// Volume of the test object (cm³)
pub const OBJECT_VOLUME_CM3: f64 = 100.0;

/// Divisor applied to a density in g/cm³ before it enters the force formula
pub const DENSITY_DIVISOR: f64 = 1000.0;

/// cm³ per m³
pub const CM3_PER_M3: f64 = 1.0e6;

/// Density of fresh water (g/cm³)
pub const WATER_DENSITY: f64 = 1.0;

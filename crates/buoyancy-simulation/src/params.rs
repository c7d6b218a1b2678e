//! Fixed parameters of the lab

use std::ops::RangeInclusive;

use buoyancy_physics::{GRAVITY, OBJECT_VOLUME_CM3, WATER_DENSITY};

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    // Physical constants
    pub gravity: f64,       // m/s²
    pub object_volume: f64, // cm³

    // Reset targets (g/cm³)
    pub default_liquid_density: f64,
    pub default_object_density: f64,

    // Slider limits, shared by both sliders
    pub density_min: f64,
    pub density_max: f64,
    pub density_step: f64,

    // Points kept on the force chart
    pub trend_capacity: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            object_volume: OBJECT_VOLUME_CM3,
            default_liquid_density: WATER_DENSITY,
            default_object_density: 0.8,
            density_min: 0.1,
            density_max: 2.0,
            density_step: 0.1,
            trend_capacity: 10,
        }
    }
}

impl SimulationParams {
    pub fn density_range(&self) -> RangeInclusive<f64> {
        self.density_min..=self.density_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SimulationParams::default();
        assert_eq!(params.gravity, 9.8);
        assert_eq!(params.object_volume, 100.0);
        assert_eq!(params.default_liquid_density, 1.0);
        assert_eq!(params.default_object_density, 0.8);
        assert_eq!(params.trend_capacity, 10);
    }

    #[test]
    fn test_defaults_inside_slider_range() {
        let params = SimulationParams::default();
        let range = params.density_range();
        assert!(range.contains(&params.default_liquid_density));
        assert!(range.contains(&params.default_object_density));
        assert!(*range.start() > 0.0);
    }
}

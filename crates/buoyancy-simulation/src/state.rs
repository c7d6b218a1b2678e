//! Current slider values plus the fixed physical context

use buoyancy_physics::{evaluate, BuoyancyInput, BuoyancyReport};

use crate::error::{DensityKind, Result, SimulationError};
use crate::params::SimulationParams;

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    liquid_density: f64,
    object_density: f64,
    gravity: f64,
    object_volume: f64,
}

fn check_density(which: DensityKind, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::InvalidDensity { which, value })
    }
}

impl SimulationState {
    pub fn new(params: &SimulationParams) -> Result<Self> {
        Ok(Self {
            liquid_density: check_density(DensityKind::Liquid, params.default_liquid_density)?,
            object_density: check_density(DensityKind::Object, params.default_object_density)?,
            gravity: params.gravity,
            object_volume: params.object_volume,
        })
    }

    pub fn liquid_density(&self) -> f64 {
        self.liquid_density
    }

    pub fn object_density(&self) -> f64 {
        self.object_density
    }

    pub fn set_liquid_density(&mut self, value: f64) -> Result<()> {
        self.liquid_density = check_density(DensityKind::Liquid, value)?;
        Ok(())
    }

    pub fn set_object_density(&mut self, value: f64) -> Result<()> {
        self.object_density = check_density(DensityKind::Object, value)?;
        Ok(())
    }

    pub fn input(&self) -> BuoyancyInput {
        BuoyancyInput {
            liquid_density: self.liquid_density,
            object_density: self.object_density,
            gravity: self.gravity,
            object_volume: self.object_volume,
        }
    }

    pub fn evaluate(&self) -> BuoyancyReport {
        evaluate(&self.input())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let state = SimulationState::new(&SimulationParams::default()).unwrap();
        assert_eq!(state.liquid_density(), 1.0);
        assert_eq!(state.object_density(), 0.8);
        assert_eq!(state.input().gravity, 9.8);
        assert_eq!(state.input().object_volume, 100.0);
    }

    #[test]
    fn test_rejects_non_positive_density() {
        let mut state = SimulationState::new(&SimulationParams::default()).unwrap();
        assert_eq!(
            state.set_liquid_density(0.0),
            Err(SimulationError::InvalidDensity {
                which: DensityKind::Liquid,
                value: 0.0
            })
        );
        assert!(state.set_object_density(-1.0).is_err());
        assert!(state.set_object_density(f64::NAN).is_err());
        assert!(state.set_liquid_density(f64::INFINITY).is_err());

        // Rejected writes leave the previous values in place
        assert_eq!(state.liquid_density(), 1.0);
        assert_eq!(state.object_density(), 0.8);
    }

    #[test]
    fn test_invalid_defaults_fail_construction() {
        let params = SimulationParams {
            default_object_density: 0.0,
            ..SimulationParams::default()
        };
        assert!(SimulationState::new(&params).is_err());
    }
}

//! Archimedes' principle for a single object
//!
//! F = ρ_liquid * g * V_displaced, evaluated with the object fully displacing
//! its own volume. The submerged fraction is reported separately and only
//! drives the presentation.

use std::fmt;

use crate::constants::{CM3_PER_M3, DENSITY_DIVISOR};

/// Resting state of the object relative to the liquid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatState {
    /// Object is less dense than the liquid and rides partly above the surface
    Floating,
    /// Object is denser than the liquid and rests on the floor
    Sunk,
    /// Densities match exactly; the object hangs mid-column
    Suspended,
}

impl FloatState {
    pub fn label(self) -> &'static str {
        match self {
            FloatState::Floating => "Floating",
            FloatState::Sunk => "Sunk",
            FloatState::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for FloatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs to a single evaluation of the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuoyancyInput {
    /// Liquid density (g/cm³)
    pub liquid_density: f64,
    /// Object density (g/cm³)
    pub object_density: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Object volume (cm³)
    pub object_volume: f64,
}

/// Everything derived from one [`BuoyancyInput`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuoyancyReport {
    /// Upward force from the displaced liquid (N)
    pub buoyant_force: f64,
    /// Weight of the object (N)
    pub object_weight: f64,
    /// Portion of the object below the surface, capped at 1
    pub submerged_fraction: f64,
    /// Floating, sunk or suspended, from the density comparison
    pub state: FloatState,
    /// Volume the fraction applies to (cm³)
    pub object_volume: f64,
}

impl BuoyancyReport {
    /// Volume below the surface (cm³)
    pub fn submerged_volume(&self) -> f64 {
        self.object_volume * self.submerged_fraction
    }

    /// Buoyant force minus weight, positive when the object is pushed up
    pub fn net_force(&self) -> f64 {
        self.buoyant_force - self.object_weight
    }
}

/// Force exerted by a column of `density` acting over `volume` cm³
///
/// Used for both the buoyant force (liquid density) and the weight (object
/// density), so the two stay directly comparable.
pub fn density_force(density: f64, gravity: f64, volume: f64) -> f64 {
    (density / DENSITY_DIVISOR) * gravity * (volume / CM3_PER_M3)
}

/// Classify the resting state. Equality is exact: no tolerance is applied.
pub fn classify(object_density: f64, liquid_density: f64) -> FloatState {
    if object_density < liquid_density {
        FloatState::Floating
    } else if object_density > liquid_density {
        FloatState::Sunk
    } else {
        FloatState::Suspended
    }
}

/// min(1, object / liquid)
pub fn submerged_fraction(object_density: f64, liquid_density: f64) -> f64 {
    (object_density / liquid_density).min(1.0)
}

/// Evaluate the model. Callers guarantee both densities are positive.
pub fn evaluate(input: &BuoyancyInput) -> BuoyancyReport {
    BuoyancyReport {
        buoyant_force: density_force(input.liquid_density, input.gravity, input.object_volume),
        object_weight: density_force(input.object_density, input.gravity, input.object_volume),
        submerged_fraction: submerged_fraction(input.object_density, input.liquid_density),
        state: classify(input.object_density, input.liquid_density),
        object_volume: input.object_volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GRAVITY, OBJECT_VOLUME_CM3};

    fn input(liquid: f64, object: f64) -> BuoyancyInput {
        BuoyancyInput {
            liquid_density: liquid,
            object_density: object,
            gravity: GRAVITY,
            object_volume: OBJECT_VOLUME_CM3,
        }
    }

    #[test]
    fn test_buoyant_force_formula() {
        let report = evaluate(&input(1.0, 0.8));
        let expected = (1.0 / 1000.0) * 9.8 * (100.0 / 1.0e6);
        assert!((report.buoyant_force - expected).abs() < 1e-18);
        assert!((report.buoyant_force - 9.8e-7).abs() < 1e-15);
    }

    #[test]
    fn test_buoyant_force_ignores_object_density() {
        for object in [0.1, 0.5, 1.0, 1.5, 2.0] {
            let report = evaluate(&input(1.3, object));
            assert_eq!(report.buoyant_force, density_force(1.3, GRAVITY, OBJECT_VOLUME_CM3));
        }
    }

    #[test]
    fn test_object_weight_uses_object_density() {
        let report = evaluate(&input(1.0, 0.8));
        assert_eq!(report.object_weight, density_force(0.8, GRAVITY, OBJECT_VOLUME_CM3));
        assert!(report.net_force() > 0.0);
    }

    #[test]
    fn test_floating() {
        let report = evaluate(&input(1.0, 0.8));
        assert_eq!(report.state, FloatState::Floating);
        assert!((report.submerged_fraction - 0.8).abs() < 1e-12);
        assert!((report.submerged_volume() - 80.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", report.submerged_volume()), "80.00");
    }

    #[test]
    fn test_sunk_caps_fraction() {
        let report = evaluate(&input(0.5, 1.5));
        assert_eq!(report.state, FloatState::Sunk);
        assert_eq!(report.submerged_fraction, 1.0);
        assert_eq!(report.submerged_volume(), OBJECT_VOLUME_CM3);
        assert!(report.net_force() < 0.0);
    }

    #[test]
    fn test_suspended_requires_exact_equality() {
        assert_eq!(classify(0.7, 0.7), FloatState::Suspended);
        assert_eq!(classify(0.7, 0.7 + f64::EPSILON), FloatState::Floating);
        assert_eq!(classify(0.7 + f64::EPSILON, 0.7), FloatState::Sunk);

        let report = evaluate(&input(1.2, 1.2));
        assert_eq!(report.submerged_fraction, 1.0);
        assert_eq!(report.net_force(), 0.0);
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(FloatState::Floating.to_string(), "Floating");
        assert_eq!(FloatState::Sunk.label(), "Sunk");
        assert_eq!(FloatState::Suspended.label(), "Suspended");
    }
}

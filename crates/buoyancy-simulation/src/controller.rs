//! Slider and reset handling
//!
//! The controller owns the only mutable simulation state. Every handler
//! leaves `report` consistent with the current densities.

use buoyancy_physics::BuoyancyReport;

use crate::error::Result;
use crate::params::SimulationParams;
use crate::presentation::{
    format_density, format_force, format_volume, liquid_gradient, object_offset, LiquidGradient,
};
use crate::state::SimulationState;
use crate::trend::TrendBuffer;

/// Text shown in the readout panel
#[derive(Clone, Debug, PartialEq)]
pub struct Readout {
    pub liquid_density: String,
    pub object_density: String,
    pub buoyant_force: String,
    pub submerged_volume: String,
    pub state: &'static str,
}

pub struct InteractionController {
    params: SimulationParams,
    defaults: SimulationState,
    state: SimulationState,
    trend: TrendBuffer,
    gradient: LiquidGradient,
    report: BuoyancyReport,
}

impl InteractionController {
    /// Build the controller at load time: colors and physics are computed once,
    /// the chart starts empty.
    pub fn new(params: SimulationParams) -> Result<Self> {
        let defaults = SimulationState::new(&params)?;
        let state = defaults.clone();
        let gradient = liquid_gradient(state.liquid_density());
        let report = state.evaluate();
        let trend = TrendBuffer::new(params.trend_capacity);

        log::info!(
            "Simulation ready: liquid {:.1} g/cm³, object {:.1} g/cm³, {}",
            state.liquid_density(),
            state.object_density(),
            report.state
        );

        Ok(Self {
            params,
            defaults,
            state,
            trend,
            gradient,
            report,
        })
    }

    /// Liquid slider moved: recolor, recompute and record a chart sample
    pub fn set_liquid_density(&mut self, density: f64) -> Result<&BuoyancyReport> {
        self.state.set_liquid_density(density)?;
        self.gradient = liquid_gradient(density);
        self.report = self.state.evaluate();
        self.trend.append(density, self.report.buoyant_force);

        log::debug!(
            "liquid density -> {:.2}: force {:.3e} N, {} ({} chart points)",
            density,
            self.report.buoyant_force,
            self.report.state,
            self.trend.len()
        );
        Ok(&self.report)
    }

    /// Object slider moved: physics only, the chart and colors are untouched
    pub fn set_object_density(&mut self, density: f64) -> Result<&BuoyancyReport> {
        self.state.set_object_density(density)?;
        self.report = self.state.evaluate();

        log::debug!("object density -> {:.2}: {}", density, self.report.state);
        Ok(&self.report)
    }

    pub fn reset(&mut self) {
        self.state = self.defaults.clone();
        self.gradient = liquid_gradient(self.state.liquid_density());
        self.report = self.state.evaluate();
        self.trend.reset();

        log::info!("Simulation reset");
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn report(&self) -> &BuoyancyReport {
        &self.report
    }

    pub fn gradient(&self) -> LiquidGradient {
        self.gradient
    }

    pub fn trend(&self) -> &TrendBuffer {
        &self.trend
    }

    pub fn object_offset(&self, container_height: f32) -> f32 {
        object_offset(&self.report, container_height)
    }

    pub fn readout(&self) -> Readout {
        Readout {
            liquid_density: format_density(self.state.liquid_density()),
            object_density: format_density(self.state.object_density()),
            buoyant_force: format_force(self.report.buoyant_force),
            submerged_volume: format_volume(self.report.submerged_volume()),
            state: self.report.state.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DensityKind, SimulationError};
    use buoyancy_physics::FloatState;

    fn controller() -> InteractionController {
        InteractionController::new(SimulationParams::default()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let controller = controller();
        assert_eq!(controller.report().state, FloatState::Floating);
        assert!(controller.trend().is_empty());
        assert_eq!(controller.gradient().floor.b, 200);

        let readout = controller.readout();
        assert_eq!(readout.liquid_density, "1.0");
        assert_eq!(readout.object_density, "0.8");
        assert_eq!(readout.submerged_volume, "80.00");
        assert_eq!(readout.state, "Floating");
    }

    #[test]
    fn test_liquid_change_appends_and_recolors() {
        let mut controller = controller();
        let report = *controller.set_liquid_density(1.5).unwrap();
        assert_eq!(report.state, FloatState::Floating);
        assert_eq!(controller.trend().len(), 1);
        assert_eq!(controller.trend().labels(), vec!["1.5"]);
        assert_eq!(controller.trend().values(), vec![report.buoyant_force]);
        assert_eq!(controller.gradient().floor.b, 225);
    }

    #[test]
    fn test_object_change_leaves_chart_and_color() {
        let mut controller = controller();
        controller.set_liquid_density(1.2).unwrap();
        let gradient = controller.gradient();

        let report = *controller.set_object_density(1.8).unwrap();
        assert_eq!(report.state, FloatState::Sunk);
        assert_eq!(controller.trend().len(), 1);
        assert_eq!(controller.gradient(), gradient);
        assert_eq!(controller.object_offset(300.0), 0.0);
    }

    #[test]
    fn test_equal_densities_suspend() {
        let mut controller = controller();
        controller.set_object_density(1.0).unwrap();
        assert_eq!(controller.report().state, FloatState::Suspended);
        assert_eq!(controller.object_offset(300.0), 150.0);
        assert_eq!(controller.readout().state, "Suspended");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut controller = controller();
        for step in 1..=15 {
            controller.set_liquid_density(step as f64 * 0.1).unwrap();
        }
        controller.set_object_density(1.9).unwrap();
        assert_eq!(controller.trend().len(), 10);

        controller.reset();
        assert_eq!(controller.state().liquid_density(), 1.0);
        assert_eq!(controller.state().object_density(), 0.8);
        assert!(controller.trend().is_empty());
        assert_eq!(controller.gradient(), liquid_gradient(1.0));
        assert_eq!(controller.report().state, FloatState::Floating);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut controller = controller();
        let err = controller.set_liquid_density(0.0).unwrap_err();
        assert_eq!(
            err,
            SimulationError::InvalidDensity {
                which: DensityKind::Liquid,
                value: 0.0
            }
        );
        assert!(controller.trend().is_empty());
        assert_eq!(controller.state().liquid_density(), 1.0);
        assert!(controller.set_object_density(-0.5).is_err());
    }
}

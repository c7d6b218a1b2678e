//! Maps physics results onto what the tank view draws
//!
//! The color ramp is a plain monotonic density→saturation mapping. It is not
//! calibrated against any real liquid.

use buoyancy_physics::{BuoyancyReport, FloatState};

/// 8-bit sRGB triple
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Vertical two-stop gradient for the liquid column, lighter at the floor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidGradient {
    /// Color at the tank floor: rgb(52, 152, B)
    pub floor: Rgb,
    /// Color at the liquid surface: rgb(41, 128, B - 30)
    pub surface: Rgb,
}

const FLOOR_RG: (u8, u8) = (52, 152);
const SURFACE_RG: (u8, u8) = (41, 128);
const SURFACE_BLUE_OFFSET: u8 = 30;

/// min(255, floor(150 + density * 50))
pub fn blue_channel(density: f64) -> u8 {
    (150.0 + density * 50.0).floor().clamp(0.0, 255.0) as u8
}

pub fn liquid_gradient(density: f64) -> LiquidGradient {
    let blue = blue_channel(density);
    LiquidGradient {
        floor: Rgb::new(FLOOR_RG.0, FLOOR_RG.1, blue),
        surface: Rgb::new(SURFACE_RG.0, SURFACE_RG.1, blue.saturating_sub(SURFACE_BLUE_OFFSET)),
    }
}

/// Distance from the tank floor to the bottom of the object
pub fn object_offset(report: &BuoyancyReport, container_height: f32) -> f32 {
    match report.state {
        // Less dense objects ride higher
        FloatState::Floating => container_height * (1.0 - report.submerged_fraction as f32),
        FloatState::Sunk => 0.0,
        FloatState::Suspended => container_height / 2.0,
    }
}

pub fn format_density(density: f64) -> String {
    format!("{:.1}", density)
}

pub fn format_force(force: f64) -> String {
    format!("{:.4}", force)
}

pub fn format_volume(volume: f64) -> String {
    format!("{:.2}", volume)
}

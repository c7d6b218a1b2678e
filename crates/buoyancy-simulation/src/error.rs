use thiserror::Error;

/// Which slider a density value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityKind {
    Liquid,
    Object,
}

impl std::fmt::Display for DensityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DensityKind::Liquid => f.write_str("liquid"),
            DensityKind::Object => f.write_str("object"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// Densities must be finite and strictly positive
    #[error("invalid {which} density: {value} (must be finite and > 0)")]
    InvalidDensity { which: DensityKind, value: f64 },
}

pub type Result<T> = std::result::Result<T, SimulationError>;

//! Window and view configuration
//!
//! Loaded from an optional JSON file; anything missing falls back to
//! defaults. Physics values are not configurable here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width in points
    pub width: u32,
    /// Logical height in points
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Buoyancy Lab".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Height of the liquid column in points
    pub tank_height: f32,
    /// Height of the force chart in points
    pub chart_height: f32,
    pub vsync: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tank_height: 320.0,
            chart_height: 220.0,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub view: ViewConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse config: {0}")]
    Json(#[source] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an in-memory JSON document (no file path involved)
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(self.view.tank_height > 0.0) || !(self.view.chart_height > 0.0) {
            return Err(ConfigError::Invalid(
                "tank_height and chart_height must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 800);
        assert!(config.view.vsync);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = AppConfig::from_json(r#"{ "window": { "width": 640 } }"#).unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.view, ViewConfig::default());
    }

    #[test]
    fn test_rejects_zero_size() {
        let err = AppConfig::from_json(r#"{ "window": { "height": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = AppConfig::from_json("{ window: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_bad_file_reports_its_path() {
        let path = std::env::temp_dir().join(format!(
            "buoyancy-bad-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ window: ").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        match &err {
            ConfigError::Parse { path: reported, .. } => assert_eq!(reported, &path),
            other => panic!("expected a parse error, got {other:?}"),
        }
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_valid_file_loads() {
        let path = std::env::temp_dir().join(format!(
            "buoyancy-good-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "view": { "vsync": false } }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(!config.view.vsync);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

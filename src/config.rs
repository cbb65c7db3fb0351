//! Configuration system for the tapescope viewer.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::viewport::{MAX_TILE_SIZE, MIN_TILE_SIZE};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Initial window width in pixels
    pub width: u32,
    /// Initial window height in pixels
    pub height: u32,
}

/// Simulation clock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Target tick rate at startup (ticks per second)
    pub start_rate: f64,
    /// Upper bound for the target tick rate
    pub max_rate: f64,
    /// Start with the clock paused
    #[serde(default)]
    pub start_paused: bool,
}

/// Viewport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Initial tile edge in pixels; a power of two in [4, 128]
    pub tile_size: u32,
}

/// Asset catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory holding one image file per symbol
    pub symbol_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clock: ClockConfig::default(),
            viewport: ViewportConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_rate: 120.0,
            max_rate: 2000.0,
            start_paused: false,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { tile_size: 16 }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            symbol_dir: PathBuf::from("img/symbols"),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err("window dimensions must be > 0".to_string());
        }
        if self.clock.start_rate < 1.0 {
            return Err("start_rate must be >= 1".to_string());
        }
        if self.clock.max_rate < self.clock.start_rate {
            return Err("max_rate cannot be below start_rate".to_string());
        }
        let ts = self.viewport.tile_size;
        if !(MIN_TILE_SIZE..=MAX_TILE_SIZE).contains(&ts) || !ts.is_power_of_two() {
            return Err(format!(
                "tile_size must be a power of two between {} and {}",
                MIN_TILE_SIZE, MAX_TILE_SIZE
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.viewport.tile_size, loaded.viewport.tile_size);
        assert_eq!(config.clock.start_rate, loaded.clock.start_rate);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let loaded: Config =
            serde_yaml::from_str("clock:\n  start_rate: 30\n  max_rate: 500\n").unwrap();
        assert_eq!(loaded.clock.start_rate, 30.0);
        assert_eq!(loaded.window.width, 800);
        assert_eq!(loaded.viewport.tile_size, 16);
        assert!(!loaded.clock.start_paused);
    }

    #[test]
    fn test_validate_rejects_bad_tile_size() {
        let mut config = Config::default();
        config.viewport.tile_size = 24;
        assert!(config.validate().is_err());

        config.viewport.tile_size = 256;
        assert!(config.validate().is_err());

        config.viewport.tile_size = 2;
        assert!(config.validate().is_err());

        config.viewport.tile_size = 64;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let mut config = Config::default();
        config.clock.start_rate = 0.5;
        assert!(config.validate().is_err());

        config.clock.start_rate = 100.0;
        config.clock.max_rate = 50.0;
        assert!(config.validate().is_err());
    }
}

//! Demo configuration, loaded from YAML (default `arbor.yaml`).

use std::fs;
use std::path::{Path, PathBuf};

use arbor_bt::SchedulerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborConfig {
    pub scheduler: SchedulerConfig,
    pub demo: DemoConfig,
}

/// Chaser scenario parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of chaser trees registered with the scheduler
    pub chasers: usize,

    /// Frames to simulate
    pub frames: u64,

    /// Frame delta fed to the scheduler
    pub dt_seconds: f32,

    /// Lower bound of the random search interval
    pub timer_min_seconds: f32,

    /// Upper bound of the random search interval
    pub timer_max_seconds: f32,

    pub sight_radius: f32,
    pub chaser_speed: f32,
    pub target_orbit_radius: f32,

    /// Radians per second
    pub target_angular_speed: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            chasers: 3,
            frames: 600,
            dt_seconds: 1.0 / 60.0,
            timer_min_seconds: 3.0,
            timer_max_seconds: 10.0,
            sight_radius: 6.0,
            chaser_speed: 3.5,
            target_orbit_radius: 8.0,
            target_angular_speed: 0.5,
        }
    }
}

impl ArborConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_yaml()?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let demo = &self.demo;
        if !(demo.dt_seconds.is_finite() && demo.dt_seconds > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "demo.dt_seconds must be positive, got {}",
                demo.dt_seconds
            )));
        }
        if demo.timer_min_seconds < 0.0 || demo.timer_min_seconds > demo.timer_max_seconds {
            return Err(ConfigError::Invalid(format!(
                "demo timer range [{}, {}] is empty or negative",
                demo.timer_min_seconds, demo.timer_max_seconds
            )));
        }
        if demo.sight_radius < 0.0 || demo.chaser_speed < 0.0 {
            return Err(ConfigError::Invalid(
                "demo.sight_radius and demo.chaser_speed must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

//! Configuration file handling for time-mosaic.
//!
//! Loads configuration from `<config dir>/time-mosaic/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::camera::{CameraSettings, Resolution};
use crate::chaos::ChaosLevel;

/// Hours in a day; screen time above this is rejected.
pub const MAX_SCREEN_TIME: f32 = 24.0;

/// Accepted refresh rates.
pub const FPS_RANGE: std::ops::RangeInclusive<u32> = 1..=120;

/// Configuration file structure for time-mosaic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mirror: MirrorConfig,
    pub camera: CameraConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Daily screen time in hours; drives the chaos level
    pub screen_time: f32,
    /// Redraw rate of the mirror
    pub fps: u32,
    /// Fixed RNG seed for reproducible mosaics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            screen_time: 0.0,
            fps: 30,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub device: u32,
    pub mirror: bool,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let settings = CameraSettings::default();
        Self {
            device: settings.device_index,
            mirror: settings.mirror,
            width: settings.resolution.width,
            height: settings.resolution.height,
            fps: settings.fps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub status_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { status_bar: true }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With no explicit path, a missing default file yields defaults. An
    /// explicit path must exist. Parsed values are validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound { path });
            }
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;
        config.validate()?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the mirror cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hours = self.mirror.screen_time;
        if !(0.0..=MAX_SCREEN_TIME).contains(&hours) {
            return Err(ConfigError::Invalid(format!(
                "mirror.screen_time must be between 0 and {}, got {}",
                MAX_SCREEN_TIME, hours
            )));
        }
        if !FPS_RANGE.contains(&self.mirror.fps) {
            return Err(ConfigError::Invalid(format!(
                "mirror.fps must be between {} and {}, got {}",
                FPS_RANGE.start(),
                FPS_RANGE.end(),
                self.mirror.fps
            )));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "camera resolution must be non-zero, got {}x{}",
                self.camera.width, self.camera.height
            )));
        }
        Ok(())
    }

    pub fn chaos(&self) -> ChaosLevel {
        ChaosLevel::from_screen_time(self.mirror.screen_time)
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.camera.device,
            resolution: Resolution {
                width: self.camera.width,
                height: self.camera.height,
            },
            fps: self.camera.fps,
            mirror: self.camera.mirror,
        }
    }

    /// Serialise for `config show`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file '{}' not found", .path.display())]
    NotFound { path: PathBuf },
    #[error("Failed to read config file '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("Config file already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        })
        .join("time-mosaic")
        .join("config.toml")
}

/// Commented template written by `config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# time-mosaic configuration

[mirror]
# Daily screen time in hours (0-24). 12h or more is maximum chaos.
screen_time = 0.0
# Redraw rate
fps = 30
# Fixed seed for reproducible noise (omit for random)
# seed = 42

[camera]
# Camera device index (see `time-mosaic list-cameras`)
device = 0
# Mirror horizontally (selfie mode)
mirror = true
# Requested capture resolution
width = 640
height = 480
fps = 30

[ui]
# Show status bar
status_bar = true
"#;

//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, FPS_RANGE, MAX_SCREEN_TIME};

/// Parse and validate daily screen time (0-24 hours)
fn parse_screen_time(s: &str) -> Result<f32, String> {
    let hours: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=MAX_SCREEN_TIME).contains(&hours) {
        return Err(format!(
            "Screen time must be between 0 and {} hours, got {}",
            MAX_SCREEN_TIME, hours
        ));
    }
    Ok(hours)
}

/// Parse and validate refresh rate
fn parse_fps(s: &str) -> Result<u32, String> {
    let fps: u32 = s.parse().map_err(|_| format!("'{}' is not a valid frame rate", s))?;
    if !FPS_RANGE.contains(&fps) {
        return Err(format!(
            "Frame rate must be between {} and {}, got {}",
            FPS_RANGE.start(),
            FPS_RANGE.end(),
            fps
        ));
    }
    Ok(fps)
}

/// Webcam mirror that dissolves into a glitchy mosaic the more screen time you log
#[derive(Parser, Debug)]
#[command(name = "time-mosaic")]
#[command(version, about = "Real-time webcam mosaic driven by your screen time", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Today's screen time in hours (0-24)
    #[arg(long, short = 't', value_parser = parse_screen_time)]
    pub screen_time: Option<f32>,

    /// Camera device index (from list-cameras)
    #[arg(long)]
    pub camera: Option<u32>,

    /// Use a still image instead of the camera
    #[arg(long, short)]
    pub image: Option<PathBuf>,

    /// Do not flip the picture horizontally
    #[arg(long)]
    pub no_mirror: bool,

    /// Redraw rate (1-120)
    #[arg(long, value_parser = parse_fps)]
    pub fps: Option<u32>,

    /// Seed for reproducible noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide status bar
    #[arg(long)]
    pub no_status: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Layer command-line overrides on top of a loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(hours) = self.screen_time {
            config.mirror.screen_time = hours;
        }
        if let Some(fps) = self.fps {
            config.mirror.fps = fps;
        }
        if let Some(seed) = self.seed {
            config.mirror.seed = Some(seed);
        }
        if let Some(device) = self.camera {
            config.camera.device = device;
        }
        if self.no_mirror {
            config.camera.mirror = false;
        }
        if self.no_status {
            config.ui.status_bar = false;
        }
        config
    }
}

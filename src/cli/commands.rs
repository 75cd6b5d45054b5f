//! Subcommand handlers for list-cameras and config actions.

use std::path::{Path, PathBuf};

use super::args::ConfigAction;
use crate::camera;
use crate::config::{default_path, Config, ConfigError, DEFAULT_CONFIG_TOML};
use crate::error::MirrorError;

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), MirrorError> {
    let devices = camera::list_devices()?;
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
        println!("Use --image <path> to run the mirror on a still picture instead.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --camera <index> to select a camera.");
    }
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), MirrorError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(path)?;
            let rendered = config
                .to_toml()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;

            println!("Current configuration:");
            println!();
            println!("{}", rendered.trim_end());
            println!();
            println!("Chaos level: {}", config.chaos());
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            let written = write_default_config(&config_path)?;
            println!("Created config file: {}", written.display());
        }
    }
    Ok(())
}

/// Write the commented default config, refusing to overwrite.
pub fn write_default_config(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let io_err = |e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG_TOML).map_err(io_err)?;

    log::info!("Wrote default config to {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_default_config_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/time-mosaic/config.toml");

        let written = write_default_config(&path).unwrap();
        assert_eq!(written, path);
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\nstatus_bar = false\n").unwrap();

        let err = write_default_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists { .. }));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[ui]\nstatus_bar = false\n"
        );
    }

    #[test]
    fn test_show_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.toml");
        let err = handle_config_action(ConfigAction::Show, Some(&missing)).unwrap_err();
        assert!(matches!(err, MirrorError::Config(ConfigError::NotFound { .. })));
    }
}

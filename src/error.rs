//! Crate-level error type for running the mirror.

use crate::camera::CameraError;
use crate::config::ConfigError;
use crate::source::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

impl MirrorError {
    /// True when the camera refused access; the message is shown as-is.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, MirrorError::Source(SourceError::PermissionDenied { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PERMISSION_DENIED_MESSAGE;

    #[test]
    fn test_permission_denied_is_transparent() {
        let err: MirrorError = SourceError::PermissionDenied {
            cause: CameraError::PermissionDenied,
        }
        .into();
        assert!(err.is_permission_denied());
        assert_eq!(err.to_string(), PERMISSION_DENIED_MESSAGE);
    }

    #[test]
    fn test_config_error_wraps() {
        let err: MirrorError = ConfigError::Invalid("fps".to_string()).into();
        assert!(!err.is_permission_denied());
        assert_eq!(err.to_string(), "Invalid configuration: fps");
    }

    #[test]
    fn test_camera_error_wraps() {
        let err: MirrorError = CameraError::DeviceNotFound(3).into();
        assert!(matches!(err, MirrorError::Camera(_)));
        assert!(!err.is_permission_denied());
        assert!(err.to_string().starts_with("Camera device 3 not found"));
    }
}

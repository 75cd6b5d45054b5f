//! Frame sources: where the renderer's video comes from.
//!
//! A source is acquired once per session, hands out its latest decoded
//! frame on demand, and is released exactly once at teardown.
//!
//! ```text
//! Uninitialized --acquire ok--> Ready --release--> Released
//! Uninitialized --acquire err--> Denied
//! ```

mod camera_source;
mod still;

pub use camera_source::CameraSource;
pub use still::StillSource;

use std::path::PathBuf;

use crate::camera::{CameraError, Frame};

/// Message shown to the user when the camera cannot be used.
pub const PERMISSION_DENIED_MESSAGE: &str =
    "Camera access denied. The mirror cannot reflect your digital soul.";

/// Lifecycle of a frame source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Uninitialized,
    Ready,
    Released,
    Denied,
}

/// Errors from acquiring a frame source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Camera refused, missing, or broken. Display is the user-facing message.
    #[error("{}", PERMISSION_DENIED_MESSAGE)]
    PermissionDenied {
        #[source]
        cause: CameraError,
    },
    /// A still image could not be read or decoded.
    #[error("Cannot load image '{}': {}", .path.display(), .source)]
    Unavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// `acquire` was called on a source that already left `Uninitialized`.
    #[error("Frame source already used (state {0:?}); start a new session")]
    AlreadyAcquired(SourceState),
}

/// Producer of decoded video frames.
pub trait FrameSource {
    /// Open the underlying device. Only valid from `Uninitialized`.
    fn acquire(&mut self) -> Result<(), SourceError>;

    /// Latest decoded frame, if the source is ready and has produced one.
    /// Never blocks.
    fn current_frame(&self) -> Option<Frame>;

    /// Stop capture and free the device. Idempotent.
    fn release(&mut self);

    fn state(&self) -> SourceState;

    /// Short human-readable label, e.g. for a status line.
    fn label(&self) -> String;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn acquire(&mut self) -> Result<(), SourceError> {
        (**self).acquire()
    }

    fn current_frame(&self) -> Option<Frame> {
        (**self).current_frame()
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn state(&self) -> SourceState {
        (**self).state()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

//! Still-image source, for running without a camera.

use std::path::{Path, PathBuf};

use super::{FrameSource, SourceError, SourceState};
use crate::camera::{mirror_horizontal, Frame};

#[derive(Debug)]
enum Origin {
    File(PathBuf),
    Memory(Frame),
}

/// Serves one decoded image as every frame.
#[derive(Debug)]
pub struct StillSource {
    origin: Origin,
    mirror: bool,
    frame: Option<Frame>,
    state: SourceState,
}

impl StillSource {
    /// Decode `path` on acquire.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::with_origin(Origin::File(path.as_ref().to_path_buf()))
    }

    /// Serve an already decoded frame.
    pub fn from_frame(frame: Frame) -> Self {
        Self::with_origin(Origin::Memory(frame))
    }

    /// Flip the image left-right, matching a mirrored camera.
    pub fn mirrored(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    fn with_origin(origin: Origin) -> Self {
        Self {
            origin,
            mirror: false,
            frame: None,
            state: SourceState::Uninitialized,
        }
    }

    fn load(&self) -> Result<Frame, SourceError> {
        match &self.origin {
            Origin::Memory(frame) => Ok(frame.clone()),
            Origin::File(path) => {
                let image = image::open(path)
                    .map_err(|source| SourceError::Unavailable {
                        path: path.clone(),
                        source,
                    })?
                    .to_rgb8();
                let (width, height) = image.dimensions();
                log::info!("Loaded still image {} ({}x{})", path.display(), width, height);
                Ok(Frame::from_rgb(image.into_raw(), width, height))
            }
        }
    }
}

impl FrameSource for StillSource {
    fn acquire(&mut self) -> Result<(), SourceError> {
        if self.state != SourceState::Uninitialized {
            return Err(SourceError::AlreadyAcquired(self.state));
        }
        match self.load() {
            Ok(mut frame) => {
                if self.mirror {
                    mirror_horizontal(&mut frame);
                }
                self.frame = Some(frame);
                self.state = SourceState::Ready;
                Ok(())
            }
            Err(e) => {
                self.state = SourceState::Denied;
                Err(e)
            }
        }
    }

    fn current_frame(&self) -> Option<Frame> {
        if self.state != SourceState::Ready {
            return None;
        }
        self.frame.clone()
    }

    fn release(&mut self) {
        self.frame = None;
        if self.state == SourceState::Ready {
            self.state = SourceState::Released;
        }
    }

    fn state(&self) -> SourceState {
        self.state
    }

    fn label(&self) -> String {
        match &self.origin {
            Origin::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Origin::Memory(frame) => format!("still {}x{}", frame.width, frame.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_lifecycle() {
        let mut source = StillSource::from_frame(Frame::from_rgb(vec![9; 12], 2, 2));
        assert!(source.current_frame().is_none());

        source.acquire().unwrap();
        assert_eq!(source.state(), SourceState::Ready);
        assert_eq!(source.current_frame().unwrap().data, vec![9; 12]);

        source.release();
        assert_eq!(source.state(), SourceState::Released);
        assert!(source.current_frame().is_none());
        source.release();
        assert_eq!(source.state(), SourceState::Released);
    }

    #[test]
    fn test_mirrored_memory_source() {
        let mut source =
            StillSource::from_frame(Frame::from_rgb(vec![1, 1, 1, 2, 2, 2], 2, 1)).mirrored(true);
        source.acquire().unwrap();
        assert_eq!(source.current_frame().unwrap().data, vec![2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn test_decodes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let mut source = StillSource::from_path(&path);
        assert_eq!(source.label(), "face.png");
        source.acquire().unwrap();
        let frame = source.current_frame().unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert!(frame.is_complete());
        assert_eq!(&frame.data[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let mut source = StillSource::from_path("/definitely/not/here.png");
        let err = source.acquire().unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
        assert!(err.to_string().contains("not/here.png"));
        assert_eq!(source.state(), SourceState::Denied);
    }
}

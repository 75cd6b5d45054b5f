//! Live webcam source.

use super::{FrameSource, SourceError, SourceState};
use crate::camera::{CameraCapture, CameraSettings, Frame};

/// Frame source backed by a [`CameraCapture`] thread.
#[derive(Debug)]
pub struct CameraSource {
    settings: CameraSettings,
    capture: Option<CameraCapture>,
    state: SourceState,
}

impl CameraSource {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            settings,
            capture: None,
            state: SourceState::Uninitialized,
        }
    }
}

impl FrameSource for CameraSource {
    fn acquire(&mut self) -> Result<(), SourceError> {
        if self.state != SourceState::Uninitialized {
            return Err(SourceError::AlreadyAcquired(self.state));
        }

        let opened = CameraCapture::open(self.settings.clone()).and_then(|mut capture| {
            capture.start()?;
            Ok(capture)
        });

        match opened {
            Ok(capture) => {
                self.capture = Some(capture);
                self.state = SourceState::Ready;
                Ok(())
            }
            Err(cause) => {
                log::warn!("Camera {} unavailable: {}", self.settings.device_index, cause);
                self.state = SourceState::Denied;
                Err(SourceError::PermissionDenied { cause })
            }
        }
    }

    fn current_frame(&self) -> Option<Frame> {
        if self.state != SourceState::Ready {
            return None;
        }
        self.capture.as_ref()?.latest_frame()
    }

    fn release(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            capture.stop();
            log::info!("Camera {} released", self.settings.device_index);
        }
        if self.state == SourceState::Ready {
            self.state = SourceState::Released;
        }
    }

    fn state(&self) -> SourceState {
        self.state
    }

    /// `camera 0`, plus the negotiated resolution once streaming.
    fn label(&self) -> String {
        let index = self.settings.device_index;
        match self.capture.as_ref().and_then(CameraCapture::actual_resolution) {
            Some(res) => format!("camera {} {}x{}", index, res.width, res.height),
            None => format!("camera {}", index),
        }
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.release();
    }
}

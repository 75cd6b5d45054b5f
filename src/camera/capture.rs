//! Camera capture handle: owns the capture thread and the latest-frame slot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use super::capture_loop::{run_capture_loop, CaptureCommand};
use super::device::list_devices;
use super::types::{CameraError, CameraSettings, Frame, Resolution};

/// Camera capture handle.
///
/// The camera is opened inside a background thread which decodes frames
/// continuously and keeps only the most recent one. Readers never block
/// on the camera: `latest_frame()` clones whatever is in the slot.
pub struct CameraCapture {
    /// Latest decoded frame (shared with capture thread)
    frame_slot: Arc<Mutex<Option<Frame>>>,
    capture_thread: Option<JoinHandle<()>>,
    command_tx: Option<Sender<CaptureCommand>>,
    stop_signal: Arc<AtomicBool>,
    settings: CameraSettings,
    /// Actual resolution negotiated with the device (set by `start`)
    actual_resolution: Option<Resolution>,
}

impl std::fmt::Debug for CameraCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraCapture")
            .field("settings", &self.settings)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl CameraCapture {
    /// Validate that the requested device exists.
    ///
    /// The stream itself is only opened by `start()`, inside the capture
    /// thread.
    ///
    /// # Errors
    /// * `CameraError::QueryFailed` - If devices cannot be enumerated
    /// * `CameraError::DeviceNotFound` - If the device index doesn't exist
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        let devices = list_devices()?;
        if !devices.iter().any(|d| d.index == settings.device_index) {
            return Err(CameraError::DeviceNotFound(settings.device_index));
        }

        Ok(Self {
            frame_slot: Arc::new(Mutex::new(None)),
            capture_thread: None,
            command_tx: None,
            stop_signal: Arc::new(AtomicBool::new(false)),
            settings,
            actual_resolution: None,
        })
    }

    /// Resolution the device actually delivers, once started.
    pub fn actual_resolution(&self) -> Option<Resolution> {
        self.actual_resolution
    }

    /// Start the capture thread and wait until the stream is open.
    ///
    /// # Errors
    /// * `CameraError::AlreadyRunning` - If capture is already running
    /// * `CameraError::PermissionDenied` - If the OS refuses camera access
    /// * `CameraError::OpenFailed` / `CameraError::StreamFailed` - Other device failures
    pub fn start(&mut self) -> Result<(), CameraError> {
        if self.is_running() {
            return Err(CameraError::AlreadyRunning);
        }

        self.stop_signal.store(false, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel();
        self.command_tx = Some(tx);

        let slot = Arc::clone(&self.frame_slot);
        let stop = Arc::clone(&self.stop_signal);
        let settings = self.settings.clone();

        // The thread reports the negotiated resolution or the open error
        let (info_tx, info_rx) = mpsc::channel::<Result<Resolution, CameraError>>();

        let handle = std::thread::spawn(move || {
            run_capture_loop(settings, slot, stop, rx, info_tx);
        });
        self.capture_thread = Some(handle);

        match info_rx.recv() {
            Ok(Ok(res)) => {
                log::info!(
                    "Camera {} streaming at {}x{}",
                    self.settings.device_index,
                    res.width,
                    res.height
                );
                self.actual_resolution = Some(res);
                Ok(())
            }
            Ok(Err(e)) => {
                self.join_thread();
                Err(e)
            }
            Err(_) => {
                self.join_thread();
                Err(CameraError::StreamFailed(
                    "Capture thread terminated unexpectedly".to_string(),
                ))
            }
        }
    }

    /// Stop the capture thread and drop the last frame.
    ///
    /// Safe to call when nothing is running.
    pub fn stop(&mut self) {
        if let Some(tx) = self.command_tx.take() {
            let _ = tx.send(CaptureCommand::Stop);
        }
        if self.capture_thread.is_some() {
            self.join_thread();
            log::debug!("Camera {} stopped", self.settings.device_index);
        }
        if let Ok(mut slot) = self.frame_slot.lock() {
            *slot = None;
        }
    }

    /// Clone the most recently decoded frame, if any.
    pub fn latest_frame(&self) -> Option<Frame> {
        let slot = self.frame_slot.lock().ok()?;
        slot.clone()
    }

    /// Check if the capture thread is currently running.
    pub fn is_running(&self) -> bool {
        self.capture_thread
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    fn join_thread(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        if let Some(h) = self.capture_thread.take() {
            let _ = h.join();
        }
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_open_invalid_device() {
        let settings = CameraSettings {
            device_index: 999,
            ..CameraSettings::default()
        };
        match CameraCapture::open(settings) {
            Err(CameraError::DeviceNotFound(idx)) => assert_eq!(idx, 999),
            // Hosts without a camera backend fail enumeration instead
            Err(CameraError::QueryFailed(_)) => {}
            other => panic!("Expected DeviceNotFound, got {:?}", other),
        }
    }
}

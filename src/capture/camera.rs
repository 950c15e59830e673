//! Camera abstraction for frame capture.
//!
//! This module provides a trait-based abstraction over camera hardware,
//! allowing for both real camera input and mock implementations for testing.

use super::{CaptureConfig, Frame, Resolution};
use thiserror::Error;

/// Errors that can occur during camera operations.
///
/// Acquisition failures are split into the categories a scanning caller has
/// to distinguish: the UI reacts differently to a denied permission than to
/// a missing or busy device.
#[derive(Debug, Error)]
pub enum CameraError {
    /// The platform refused access to the camera.
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),
    /// No camera device matches the requested identifier.
    #[error("camera device not found: {0}")]
    DeviceNotFound(String),
    /// The device exists but is held by another consumer.
    #[error("camera device busy: {0}")]
    DeviceBusy(String),
    /// The device cannot satisfy the requested capture configuration.
    #[error("camera constraints unsatisfiable: {0}")]
    ConstraintsUnsatisfiable(String),
    /// A frame could not be read from an open camera.
    #[error("failed to capture frame: {0}")]
    CaptureFailed(String),
    /// The camera has not been opened.
    #[error("camera not initialized")]
    NotInitialized,
}

/// Trait for camera implementations.
///
/// This abstraction allows swapping between real camera hardware
/// and mock implementations for testing. Acquisition is scoped: `open`
/// claims the device, `close` releases it unconditionally.
pub trait CameraSource {
    /// Opens and initializes the camera with the given configuration.
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError>;

    /// Captures a single frame.
    fn capture(&mut self) -> Result<Frame, CameraError>;

    /// Returns the native resolution of the open stream, if known.
    fn resolution(&self) -> Option<Resolution>;

    /// Checks if the camera is currently open.
    fn is_open(&self) -> bool;

    /// Closes the camera and releases the device.
    fn close(&mut self);
}

/// Mock camera for testing that serves flat synthetic frames.
///
/// The pixel content is irrelevant to the scanner core, which only hands
/// frames to the detector; tests script the detector instead.
#[derive(Debug, Default)]
pub struct MockCamera {
    config: Option<CaptureConfig>,
    sequence: u64,
    fail_open: Option<MockFailure>,
    fail_next_capture: bool,
}

/// Acquisition failure categories a [`MockCamera`] can simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Simulates a denied camera permission.
    PermissionDenied,
    /// Simulates a missing device.
    DeviceNotFound,
    /// Simulates a device held by another consumer.
    DeviceBusy,
    /// Simulates unsatisfiable capture constraints.
    ConstraintsUnsatisfiable,
}

impl MockCamera {
    /// Creates a mock camera that opens and captures successfully.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock camera whose `open` fails with the given category.
    pub fn failing(failure: MockFailure) -> Self {
        Self {
            fail_open: Some(failure),
            ..Self::default()
        }
    }

    /// Makes the next `capture` call fail once.
    pub fn fail_next_capture(&mut self) {
        self.fail_next_capture = true;
    }
}

impl CameraSource for MockCamera {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
        if let Some(failure) = self.fail_open {
            let detail = "mock".to_owned();
            return Err(match failure {
                MockFailure::PermissionDenied => CameraError::PermissionDenied(detail),
                MockFailure::DeviceNotFound => CameraError::DeviceNotFound(detail),
                MockFailure::DeviceBusy => CameraError::DeviceBusy(detail),
                MockFailure::ConstraintsUnsatisfiable => {
                    CameraError::ConstraintsUnsatisfiable(detail)
                }
            });
        }

        config
            .validate()
            .map_err(|e| CameraError::ConstraintsUnsatisfiable(e.to_string()))?;
        self.config = Some(config.clone());
        self.sequence = 0;
        tracing::info!(?config, "MockCamera opened");
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame, CameraError> {
        let config = self.config.as_ref().ok_or(CameraError::NotInitialized)?;

        if self.fail_next_capture {
            self.fail_next_capture = false;
            return Err(CameraError::CaptureFailed("mock frame drop".to_owned()));
        }

        let pixel_count = (config.width * config.height) as usize;
        self.sequence += 1;
        Ok(Frame::new(
            vec![0x80; pixel_count],
            config.width,
            config.height,
            self.sequence,
        ))
    }

    fn resolution(&self) -> Option<Resolution> {
        self.config
            .as_ref()
            .map(|c| Resolution::new(c.width, c.height))
    }

    fn is_open(&self) -> bool {
        self.config.is_some()
    }

    fn close(&mut self) {
        self.config = None;
        tracing::info!("MockCamera closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_camera_lifecycle() {
        let mut camera = MockCamera::new();
        let config = CaptureConfig::default();

        assert!(!camera.is_open());

        camera.open(&config).unwrap();
        assert!(camera.is_open());
        assert_eq!(camera.resolution(), Some(Resolution::new(640, 480)));

        let frame = camera.capture().unwrap();
        assert!(frame.is_valid());
        assert_eq!(frame.sequence(), 1);

        let frame2 = camera.capture().unwrap();
        assert_eq!(frame2.sequence(), 2);

        camera.close();
        assert!(!camera.is_open());
    }

    #[test]
    fn test_capture_without_open() {
        let mut camera = MockCamera::new();
        assert!(matches!(camera.capture(), Err(CameraError::NotInitialized)));
    }

    #[test]
    fn test_failing_open_reports_category() {
        let mut camera = MockCamera::failing(MockFailure::DeviceBusy);
        assert!(matches!(
            camera.open(&CaptureConfig::default()),
            Err(CameraError::DeviceBusy(_))
        ));
        assert!(!camera.is_open());
    }

    #[test]
    fn test_capture_failure_is_transient() {
        let mut camera = MockCamera::new();
        camera.open(&CaptureConfig::default()).unwrap();

        camera.fail_next_capture();
        assert!(matches!(
            camera.capture(),
            Err(CameraError::CaptureFailed(_))
        ));

        // The next capture recovers on its own.
        assert!(camera.capture().is_ok());
    }
}

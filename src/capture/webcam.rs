//! Real camera backend built on `nokhwa`.
//!
//! Only compiled with the `camera` feature. Platform errors do not map
//! cleanly onto acquisition categories across backends, so classification
//! falls back to inspecting the error text.

use super::{CameraError, CameraSource, CaptureConfig, Frame, Resolution};
use nokhwa::pixel_format::LumaFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution as NokhwaResolution,
};

/// Camera source backed by a physical device via `nokhwa`.
#[derive(Default)]
pub struct WebcamCamera {
    inner: Option<nokhwa::Camera>,
    sequence: u64,
}

impl WebcamCamera {
    /// Creates an unopened webcam source.
    pub fn new() -> Self {
        Self::default()
    }
}

fn classify_open_error(err: nokhwa::NokhwaError) -> CameraError {
    let text = err.to_string();
    let lower = text.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("access") {
        CameraError::PermissionDenied(text)
    } else if lower.contains("not found") || lower.contains("no device") {
        CameraError::DeviceNotFound(text)
    } else if lower.contains("busy") || lower.contains("in use") {
        CameraError::DeviceBusy(text)
    } else {
        CameraError::ConstraintsUnsatisfiable(text)
    }
}

impl CameraSource for WebcamCamera {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
        config
            .validate()
            .map_err(|e| CameraError::ConstraintsUnsatisfiable(e.to_string()))?;

        let requested = RequestedFormat::new::<LumaFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                NokhwaResolution::new(config.width, config.height),
                FrameFormat::MJPEG,
                config.fps,
            ),
        ));

        let mut camera = nokhwa::Camera::new(CameraIndex::Index(config.device_id), requested)
            .map_err(classify_open_error)?;
        camera.open_stream().map_err(classify_open_error)?;

        tracing::info!(
            device = config.device_id,
            resolution = ?camera.resolution(),
            "webcam opened"
        );
        self.inner = Some(camera);
        self.sequence = 0;
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame, CameraError> {
        let camera = self.inner.as_mut().ok_or(CameraError::NotInitialized)?;

        let buffer = camera
            .frame()
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
        let decoded = buffer
            .decode_image::<LumaFormat>()
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

        let (width, height) = decoded.dimensions();
        self.sequence += 1;
        Ok(Frame::new(decoded.into_raw(), width, height, self.sequence))
    }

    fn resolution(&self) -> Option<Resolution> {
        self.inner
            .as_ref()
            .map(|c| Resolution::new(c.resolution().width(), c.resolution().height()))
    }

    fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    fn close(&mut self) {
        if let Some(mut camera) = self.inner.take() {
            if let Err(err) = camera.stop_stream() {
                tracing::warn!(error = %err, "failed to stop camera stream");
            }
            tracing::info!("webcam closed");
        }
    }
}

//! Camera acquisition and frame capture.
//!
//! The scanner core never talks to camera hardware directly; it consumes
//! the [`CameraSource`] trait defined here. Acquisition is scoped to the
//! scanning session: the device is claimed on start and released
//! unconditionally on stop, including on error paths during start.

mod camera;
mod config;
mod frame;
#[cfg(feature = "camera")]
mod webcam;

pub use camera::{CameraError, CameraSource, MockCamera, MockFailure};
pub use config::{CaptureConfig, ConfigError, FileConfig, OutputConfig};
pub use frame::{Frame, Resolution};
#[cfg(feature = "camera")]
pub use webcam::WebcamCamera;

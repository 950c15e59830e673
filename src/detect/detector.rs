//! Barcode detector abstraction.
//!
//! Detection is an external capability: given a frame, a detector returns
//! zero or more decoded codes with bounding geometry. The scanner core
//! treats detector failures as an empty result for that tick.

use super::CodeGeometry;
use crate::capture::Frame;
use std::collections::VecDeque;
use thiserror::Error;

/// Errors a detector can report for a single frame.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The frame is not yet available for detection.
    #[error("frame not ready")]
    FrameNotReady,
    /// The underlying detection engine failed.
    #[error("detection failed: {0}")]
    DetectionFailed(String),
}

/// A single detected code in a frame.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Raw decoded text of the code.
    pub text: String,
    /// Bounding geometry in camera-native pixel coordinates.
    pub geometry: CodeGeometry,
}

impl Detection {
    /// Creates a detection.
    pub fn new(text: impl Into<String>, geometry: CodeGeometry) -> Self {
        Self {
            text: text.into(),
            geometry,
        }
    }
}

/// Trait for barcode detector implementations.
pub trait Detector {
    /// Runs detection over a frame, returning all codes found in it.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, DetectError>;
}

/// Mock detector that replays scripted results, for testing.
///
/// Each `detect` call consumes the next scripted result; once the script is
/// exhausted, every call returns an empty result.
#[derive(Debug, Default)]
pub struct MockDetector {
    script: VecDeque<Result<Vec<Detection>, DetectError>>,
    calls: u64,
}

impl MockDetector {
    /// Creates a detector with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one tick's detections.
    pub fn push_detections(&mut self, detections: Vec<Detection>) {
        self.script.push_back(Ok(detections));
    }

    /// Queues one tick with no detections.
    pub fn push_empty(&mut self) {
        self.script.push_back(Ok(Vec::new()));
    }

    /// Queues one failing tick.
    pub fn push_failure(&mut self) {
        self.script.push_back(Err(DetectError::FrameNotReady));
    }

    /// Returns how many times `detect` has been called.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl Detector for MockDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>, DetectError> {
        self.calls += 1;
        self.script.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

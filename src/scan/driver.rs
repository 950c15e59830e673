//! Ties camera, detector, session, overlay, and UI callbacks together.

use super::{ScanEvent, ScanObserver, ScanSession};
use crate::capture::{CameraError, CameraSource, CaptureConfig, ConfigError, Resolution};
use crate::detect::Detector;
use crate::overlay::{DrawSurface, OverlayRenderer, Viewport};
use crate::scan::{Haptic, NoHaptic, NullObserver};
use std::time::Instant;
use thiserror::Error;

/// Errors that can prevent a scanning session from starting.
#[derive(Debug, Error)]
pub enum StartError {
    /// The capture configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The camera could not be acquired or primed.
    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// Drives a scanning session over a camera and a detector.
///
/// The driver owns the scoped camera acquisition: `start` claims the
/// device and `stop` releases it unconditionally, including when `start`
/// itself fails partway. The embedder supplies the two cadences by calling
/// [`ScanDriver::detection_tick`] on a fixed interval and
/// [`ScanDriver::render_tick`] once per display frame; neither assumes the
/// other ran in between.
pub struct ScanDriver<C, D> {
    camera: C,
    detector: D,
    session: ScanSession,
    renderer: OverlayRenderer,
    observer: Box<dyn ScanObserver>,
    haptic: Box<dyn Haptic>,
    resolution: Option<Resolution>,
}

impl<C: CameraSource, D: Detector> ScanDriver<C, D> {
    /// Creates a driver with no observer and no haptic capability.
    pub fn new(camera: C, detector: D, session: ScanSession) -> Self {
        let renderer = OverlayRenderer::new(session.config().max_label_chars);
        Self {
            camera,
            detector,
            session,
            renderer,
            observer: Box::new(NullObserver),
            haptic: Box::new(NoHaptic),
            resolution: None,
        }
    }

    /// Attaches a UI observer.
    pub fn with_observer(mut self, observer: impl ScanObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Attaches a haptic capability.
    pub fn with_haptic(mut self, haptic: impl Haptic + 'static) -> Self {
        self.haptic = Box::new(haptic);
        self
    }

    /// Acquires the camera and activates the session.
    ///
    /// The camera is primed with one capture to confirm it delivers frames
    /// and to learn the native resolution; if priming fails the device is
    /// released before the error is returned.
    pub fn start(&mut self, config: &CaptureConfig) -> Result<(), StartError> {
        config.validate()?;
        self.camera.open(config)?;

        match self.camera.capture() {
            Ok(frame) => self.resolution = Some(frame.resolution()),
            Err(err) => {
                self.camera.close();
                return Err(err.into());
            }
        }

        self.session.start();
        tracing::info!(resolution = ?self.resolution, "scan driver started");
        Ok(())
    }

    /// Deactivates the session and releases the camera.
    pub fn stop(&mut self) {
        if let Some(event) = self.session.stop() {
            event.dispatch(self.observer.as_mut());
        }
        self.camera.close();
        self.resolution = None;
        tracing::info!("scan driver stopped");
    }

    /// Runs one detection tick.
    ///
    /// Does nothing unless the session is active and the camera is open.
    /// A failed capture or detection is a transient empty result; the next
    /// tick simply tries again.
    pub fn detection_tick(&mut self, now: Instant) {
        if !self.session.is_active() || !self.camera.is_open() {
            return;
        }

        let frame = match self.camera.capture() {
            Ok(frame) => frame,
            Err(err) => {
                tracing::trace!(error = %err, "no frame this tick");
                return;
            }
        };

        let generation = self.session.generation();
        let detections = match self.detector.detect(&frame) {
            Ok(detections) => detections,
            Err(err) => {
                tracing::trace!(error = %err, "detection unavailable this tick");
                Vec::new()
            }
        };

        for event in self.session.apply_detections(generation, &detections, now) {
            if matches!(event, ScanEvent::TargetFound { .. }) {
                self.haptic.pulse();
            }
            event.dispatch(self.observer.as_mut());
        }
    }

    /// Runs one render tick: prunes expired codes, re-evaluates the border
    /// state, and redraws the overlay onto `surface` at `viewport` size.
    pub fn render_tick(&mut self, surface: &mut dyn DrawSurface, viewport: Viewport, now: Instant) {
        if let Some(event) = self.session.render_tick(now) {
            event.dispatch(self.observer.as_mut());
        }

        if let Some(native) = self.resolution {
            self.renderer
                .render(surface, native, viewport, self.session.visible().entries());
        }
    }

    /// Returns the session for inspection and target edits.
    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// Returns the session mutably.
    pub fn session_mut(&mut self) -> &mut ScanSession {
        &mut self.session
    }
}

//! Notifications emitted by the scanning session.

use super::BorderState;

/// A notification produced by a session tick.
///
/// Events fire exactly once per state change: `TargetFound` on a serial's
/// first not-found-to-found transition of the session, `BorderChanged` on
/// each border state transition (never on mere re-evaluation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A target serial was matched for the first time this session.
    TargetFound {
        /// The serial that was just found.
        serial: String,
        /// All serials found so far, in order of first match.
        found: Vec<String>,
    },
    /// The border feedback state transitioned.
    BorderChanged(BorderState),
}

/// Callback interface for UI collaborators.
///
/// All methods default to no-ops so observers implement only what they
/// display.
pub trait ScanObserver {
    /// Called when a target serial is matched for the first time.
    fn on_target_found(&mut self, _serial: &str, _found: &[String]) {}

    /// Called when the border feedback state transitions.
    fn on_border_changed(&mut self, _state: BorderState) {}
}

impl ScanEvent {
    /// Delivers this event to an observer.
    pub fn dispatch(&self, observer: &mut dyn ScanObserver) {
        match self {
            Self::TargetFound { serial, found } => observer.on_target_found(serial, found),
            Self::BorderChanged(state) => observer.on_border_changed(*state),
        }
    }
}

/// Fire-and-forget haptic feedback.
///
/// A pulse is requested on the first match of each target serial; platforms
/// without the capability plug in [`NoHaptic`].
pub trait Haptic {
    /// Requests a single vibration pulse.
    fn pulse(&mut self);
}

/// Haptic implementation that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptic;

impl Haptic for NoHaptic {
    fn pulse(&mut self) {}
}

/// Observer implementation that ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ScanObserver for NullObserver {}

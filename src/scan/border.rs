//! Debounced feedback state shown around the camera view.

use std::time::{Duration, Instant};

/// Feedback state derived from the scanning session each render tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderState {
    /// No targets defined or scanning inactive.
    #[default]
    Idle,
    /// Scanning for targets, none currently in view.
    Searching,
    /// A target is in view, or was within the debounce window.
    Found,
}

/// Evaluates [`BorderState`] transitions with found-state debouncing.
///
/// Detection can momentarily drop a code between frames; without a hold
/// the border would flicker between `Found` and `Searching`. The monitor
/// keeps `Found` for a debounce window after the last target sighting and
/// reports a notification only when the state actually changes.
#[derive(Debug)]
pub struct BorderMonitor {
    state: BorderState,
    last_found: Option<Instant>,
    debounce: Duration,
}

impl BorderMonitor {
    /// Creates a monitor in the `Idle` state with the given debounce window.
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: BorderState::Idle,
            last_found: None,
            debounce,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> BorderState {
        self.state
    }

    /// Evaluates the state for one render tick.
    ///
    /// Returns the new state only on a transition, `None` when the state
    /// is unchanged. Idle takes precedence over everything else.
    pub fn evaluate(
        &mut self,
        active: bool,
        have_targets: bool,
        target_visible: bool,
        now: Instant,
    ) -> Option<BorderState> {
        let next = if !active || !have_targets {
            BorderState::Idle
        } else if target_visible {
            self.last_found = Some(now);
            BorderState::Found
        } else if self
            .last_found
            .is_some_and(|t| now.duration_since(t) < self.debounce)
        {
            BorderState::Found
        } else {
            BorderState::Searching
        };

        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "border state changed");
            self.state = next;
            Some(next)
        } else {
            None
        }
    }

    /// Forgets the last target sighting, ending any debounce hold.
    pub fn clear_debounce(&mut self) {
        self.last_found = None;
    }

    /// Forces the state to `Idle`, returning the transition if there was one.
    pub fn force_idle(&mut self) -> Option<BorderState> {
        self.last_found = None;
        if self.state != BorderState::Idle {
            self.state = BorderState::Idle;
            tracing::debug!("border state forced idle");
            Some(BorderState::Idle)
        } else {
            None
        }
    }
}

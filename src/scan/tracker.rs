//! Tracking of codes currently visible in the camera view.
//!
//! Detection only sees a code in the frames where the detector finds it;
//! a code intermittently missed for a few frames should still render as
//! present. This tracker absorbs that per-frame noise: entries are
//! refreshed on every sighting and evicted lazily once their age exceeds
//! the visibility timeout. Eviction is driven by the render tick, not a
//! background timer.

use crate::detect::CodeGeometry;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A code currently visible in the camera view.
#[derive(Debug, Clone)]
pub struct VisibleCode {
    /// Decoded serial number.
    pub serial: String,
    /// Bounding geometry in camera-native pixel coordinates.
    pub geometry: CodeGeometry,
    /// Whether the serial was in the target set when last detected.
    pub is_target: bool,
    /// When the code was last detected.
    pub last_seen: Instant,
}

/// The set of codes currently visible, keyed by serial.
#[derive(Debug)]
pub struct VisibleCodes {
    codes: HashMap<String, VisibleCode>,
    timeout: Duration,
}

impl VisibleCodes {
    /// Creates an empty tracker with the given visibility timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            codes: HashMap::new(),
            timeout,
        }
    }

    /// Creates or refreshes the entry for `serial`.
    pub fn upsert(&mut self, serial: &str, geometry: CodeGeometry, is_target: bool, now: Instant) {
        match self.codes.get_mut(serial) {
            Some(entry) => {
                entry.geometry = geometry;
                entry.is_target = is_target;
                entry.last_seen = now;
            }
            None => {
                tracing::debug!(serial, is_target, "code entered view");
                self.codes.insert(
                    serial.to_owned(),
                    VisibleCode {
                        serial: serial.to_owned(),
                        geometry,
                        is_target,
                        last_seen: now,
                    },
                );
            }
        }
    }

    /// Removes entries whose age exceeds the visibility timeout.
    pub fn prune_expired(&mut self, now: Instant) {
        let timeout = self.timeout;
        let before = self.codes.len();
        self.codes
            .retain(|_, entry| now.duration_since(entry.last_seen) <= timeout);
        let removed = before - self.codes.len();
        if removed > 0 {
            tracing::trace!(removed, remaining = self.codes.len(), "expired codes pruned");
        }
    }

    /// Iterates over the currently tracked codes.
    pub fn entries(&self) -> impl Iterator<Item = &VisibleCode> {
        self.codes.values()
    }

    /// Returns true if any tracked code is a target match.
    pub fn any_target(&self) -> bool {
        self.codes.values().any(|entry| entry.is_target)
    }

    /// Returns the number of tracked codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if no codes are tracked.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.codes.clear();
    }
}

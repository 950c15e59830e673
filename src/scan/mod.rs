//! The scanner core: session state, visible-code tracking, and the
//! debounced feedback state machine.
//!
//! Two independent cadences drive the core. A fixed-interval detection
//! tick pulls a frame, runs the detector, and applies decoded results to
//! the session; a display-rate render tick prunes expired codes,
//! re-evaluates the border state, and redraws the overlay. Both run on one
//! thread and each tolerates the other having changed state in between.

mod border;
mod driver;
mod events;
mod session;
mod tracker;

pub use border::{BorderMonitor, BorderState};
pub use driver::{ScanDriver, StartError};
pub use events::{Haptic, NoHaptic, NullObserver, ScanEvent, ScanObserver};
pub use session::{ScanSession, SessionStats};
pub use tracker::{VisibleCode, VisibleCodes};

use crate::capture::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and presentation parameters of the scanner core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// How long a code stays visible after its last sighting, in
    /// milliseconds.
    pub visibility_timeout_ms: u64,
    /// How long the border holds `Found` after the last target sighting,
    /// in milliseconds.
    pub found_debounce_ms: u64,
    /// Interval between detection ticks, in milliseconds.
    pub detection_interval_ms: u64,
    /// Maximum label length before overlay text is ellipsis-truncated.
    pub max_label_chars: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            visibility_timeout_ms: 500,
            found_debounce_ms: 300,
            detection_interval_ms: 100,
            max_label_chars: 20,
        }
    }
}

impl ScanConfig {
    /// Returns the visibility timeout as a duration.
    pub fn visibility_timeout(&self) -> Duration {
        Duration::from_millis(self.visibility_timeout_ms)
    }

    /// Returns the found-state debounce window as a duration.
    pub fn found_debounce(&self) -> Duration {
        Duration::from_millis(self.found_debounce_ms)
    }

    /// Returns the detection tick interval as a duration.
    pub fn detection_interval(&self) -> Duration {
        Duration::from_millis(self.detection_interval_ms)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.visibility_timeout_ms == 0 || self.detection_interval_ms == 0 {
            return Err(ConfigError::InvalidTiming);
        }
        if self.max_label_chars == 0 {
            return Err(ConfigError::InvalidLabelLength);
        }
        Ok(())
    }
}

/// Parses a free-form serial list as entered by the user.
///
/// Splits on newlines and commas, trims whitespace, and drops empty
/// entries. Duplicates are preserved here; the session's target set
/// deduplicates on insertion.
pub fn parse_serial_list(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.visibility_timeout(), Duration::from_millis(500));
        assert_eq!(config.found_debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_zero_timing_invalid() {
        let mut config = ScanConfig::default();
        config.detection_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTiming)
        ));
    }

    #[test]
    fn test_parse_serial_list() {
        assert_eq!(
            parse_serial_list("SN-1, SN-2\n SN-3 ,\n\n,SN-4"),
            ["SN-1", "SN-2", "SN-3", "SN-4"]
        );
        assert!(parse_serial_list("  \n , ").is_empty());
    }
}

//! Metrics collection and registry.

use crate::scan::{BorderState, ScanSession};
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// A snapshot of session state for a metrics update.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Whether a scanning session is active.
    pub active: bool,
    /// Number of target serials being searched for.
    pub targets: usize,
    /// Number of target serials found so far.
    pub found: usize,
    /// Number of codes currently visible.
    pub visible_codes: usize,
    /// Current border feedback state.
    pub border_state: BorderState,
    /// Detection results applied to the session.
    pub frames_processed: u64,
    /// Individual detections seen across all applied results.
    pub detections_total: u64,
    /// Detections whose text failed payload validation.
    pub decode_failures: u64,
    /// Detection results dropped as stale.
    pub stale_results_dropped: u64,
}

impl MetricsSnapshot {
    /// Creates a snapshot from the current state of a session.
    pub fn from_session(session: &ScanSession) -> Self {
        let stats = session.stats();
        Self {
            active: session.is_active(),
            targets: session.target_count(),
            found: session.found().len(),
            visible_codes: session.visible().len(),
            border_state: session.border_state(),
            frames_processed: stats.frames_processed,
            detections_total: stats.detections_total,
            decode_failures: stats.decode_failures,
            stale_results_dropped: stats.stale_results_dropped,
        }
    }
}

fn border_state_value(state: BorderState) -> i64 {
    match state {
        BorderState::Idle => 0,
        BorderState::Searching => 1,
        BorderState::Found => 2,
    }
}

/// Prometheus metrics registry for scanner monitoring.
pub struct MetricsRegistry {
    registry: Registry,

    // Session metrics
    active: IntGauge,
    targets: IntGauge,
    found: IntGauge,
    visible_codes: IntGauge,
    border_state: IntGauge,

    // Pipeline metrics
    frames_total: IntCounter,
    detections_total: IntCounter,
    decode_failures_total: IntCounter,
    stale_results_total: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all scanner metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        // Session metrics
        let active = IntGauge::new(
            "inventory_scanner_active",
            "Whether a scanning session is active (1=active, 0=inactive)",
        )?;
        let targets = IntGauge::new(
            "inventory_scanner_targets",
            "Number of target serials being searched for",
        )?;
        let found = IntGauge::new(
            "inventory_scanner_found",
            "Number of target serials found this session",
        )?;
        let visible_codes = IntGauge::new(
            "inventory_scanner_visible_codes",
            "Number of codes currently visible in the camera view",
        )?;
        let border_state = IntGauge::new(
            "inventory_scanner_border_state",
            "Border feedback state (0=idle, 1=searching, 2=found)",
        )?;

        // Pipeline metrics
        let frames_total = IntCounter::new(
            "inventory_scanner_frames_total",
            "Detection results applied to the session",
        )?;
        let detections_total = IntCounter::new(
            "inventory_scanner_detections_total",
            "Individual code detections processed",
        )?;
        let decode_failures_total = IntCounter::new(
            "inventory_scanner_decode_failures_total",
            "Detections discarded because payload validation failed",
        )?;
        let stale_results_total = IntCounter::new(
            "inventory_scanner_stale_results_total",
            "Detection results dropped because they arrived stale",
        )?;

        // Register all metrics
        registry.register(Box::new(active.clone()))?;
        registry.register(Box::new(targets.clone()))?;
        registry.register(Box::new(found.clone()))?;
        registry.register(Box::new(visible_codes.clone()))?;
        registry.register(Box::new(border_state.clone()))?;
        registry.register(Box::new(frames_total.clone()))?;
        registry.register(Box::new(detections_total.clone()))?;
        registry.register(Box::new(decode_failures_total.clone()))?;
        registry.register(Box::new(stale_results_total.clone()))?;

        Ok(Self {
            registry,
            active,
            targets,
            found,
            visible_codes,
            border_state,
            frames_total,
            detections_total,
            decode_failures_total,
            stale_results_total,
        })
    }

    /// Updates all metrics from a snapshot of session state.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        self.active.set(if snapshot.active { 1 } else { 0 });
        self.targets.set(snapshot.targets as i64);
        self.found.set(snapshot.found as i64);
        self.visible_codes.set(snapshot.visible_codes as i64);
        self.border_state
            .set(border_state_value(snapshot.border_state));

        // Counters advance by the delta against the snapshot.
        let current = self.frames_total.get();
        if snapshot.frames_processed > current {
            self.frames_total.inc_by(snapshot.frames_processed - current);
        }

        let current = self.detections_total.get();
        if snapshot.detections_total > current {
            self.detections_total
                .inc_by(snapshot.detections_total - current);
        }

        let current = self.decode_failures_total.get();
        if snapshot.decode_failures > current {
            self.decode_failures_total
                .inc_by(snapshot.decode_failures - current);
        }

        let current = self.stale_results_total.get();
        if snapshot.stale_results_dropped > current {
            self.stale_results_total
                .inc_by(snapshot.stale_results_dropped - current);
        }
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanConfig;

    #[test]
    fn test_registry_creation() {
        let registry = MetricsRegistry::new();
        assert!(registry.is_ok());
    }

    #[test]
    fn test_metrics_update() {
        let registry = MetricsRegistry::new().unwrap();

        let snapshot = MetricsSnapshot {
            active: true,
            targets: 3,
            found: 1,
            visible_codes: 2,
            border_state: BorderState::Found,
            frames_processed: 10,
            detections_total: 14,
            decode_failures: 4,
            stale_results_dropped: 1,
        };

        registry.update(&snapshot);

        let output = registry.encode().unwrap();
        assert!(output.contains("inventory_scanner_active 1"));
        assert!(output.contains("inventory_scanner_targets 3"));
        assert!(output.contains("inventory_scanner_border_state 2"));
        assert!(output.contains("inventory_scanner_frames_total 10"));
    }

    #[test]
    fn test_snapshot_from_session() {
        let mut session = ScanSession::new(ScanConfig::default());
        session.set_targets("SN-1, SN-2");
        session.start();

        let snapshot = MetricsSnapshot::from_session(&session);
        assert!(snapshot.active);
        assert_eq!(snapshot.targets, 2);
        assert_eq!(snapshot.found, 0);
        assert_eq!(snapshot.border_state, BorderState::Idle);
    }
}

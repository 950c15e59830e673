//! Prometheus metrics exporter for scanner monitoring.
//!
//! Observability into the scanning pipeline: session state, tracker
//! occupancy, and per-tick pipeline counters, exposed in Prometheus
//! format. The HTTP endpoint is feature-gated; the registry itself has no
//! server dependency.
//!
//! # Metrics Exposed
//!
//! ## Session Metrics
//! - `inventory_scanner_active` - Whether a session is active (1/0)
//! - `inventory_scanner_targets` - Target serials being searched for
//! - `inventory_scanner_found` - Target serials found this session
//! - `inventory_scanner_visible_codes` - Codes currently in view
//! - `inventory_scanner_border_state` - Feedback state (0=idle, 1=searching, 2=found)
//!
//! ## Pipeline Metrics
//! - `inventory_scanner_frames_total` - Detection results applied
//! - `inventory_scanner_detections_total` - Individual detections processed
//! - `inventory_scanner_decode_failures_total` - Detections that failed payload validation
//! - `inventory_scanner_stale_results_total` - Results dropped as stale

mod collector;
#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
#[cfg(feature = "metrics")]
pub use server::{MetricsServer, MetricsServerConfig, MetricsState, ServerError};

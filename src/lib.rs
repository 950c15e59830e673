//! Inventory Scanner Library
//!
//! The scanner core of a box-finding tool: point a camera at shelves of
//! labeled boxes, search for specific serial numbers, and get live visual
//! feedback when a wanted box enters the view. QR payloads are generated
//! and validated by the same crate, so only codes produced by this scheme
//! ever register as matches.
//!
//! # Architecture
//!
//! Two unsynchronized cadences drive a session:
//!
//! ```text
//! detection tick (fixed interval)          render tick (display rate)
//!   capture → detect → decode payload        prune expired codes
//!        ↓                                        ↓
//!   visible-code tracker ──────────────→ border state machine
//!        ↓                                        ↓
//!   found-set + notifications              overlay drawing
//! ```
//!
//! # Design Principles
//!
//! - **No ambient state**: a [`scan::ScanSession`] owns all mutable state
//!   and is passed explicitly; independent sessions can coexist
//! - **Noise suppression by design**: undecodable codes and transient
//!   detection failures are discarded silently, never surfaced as errors
//! - **Scoped camera acquisition**: the device is claimed on start and
//!   released unconditionally on stop, including on start's error paths
//! - **Stale results cannot leak**: detection results carry a session
//!   generation and are dropped after any stop, reset, or target change
//!
//! # Example
//!
//! ```
//! use inventory_scanner::{
//!     capture::{CaptureConfig, MockCamera},
//!     detect::{CodeGeometry, Detection, MockDetector, Point},
//!     payload,
//!     scan::{ScanConfig, ScanDriver, ScanSession},
//! };
//! use std::time::Instant;
//!
//! // Define what to search for.
//! let mut session = ScanSession::new(ScanConfig::default());
//! session.set_targets("BOX-001, BOX-002");
//!
//! // Script a detector sighting of a labeled box.
//! let mut detector = MockDetector::new();
//! detector.push_detections(vec![Detection::new(
//!     payload::encode("BOX-001"),
//!     CodeGeometry::Corners([
//!         Point::new(10.0, 10.0),
//!         Point::new(60.0, 10.0),
//!         Point::new(60.0, 60.0),
//!         Point::new(10.0, 60.0),
//!     ]),
//! )]);
//!
//! let mut driver = ScanDriver::new(MockCamera::new(), detector, session);
//! driver.start(&CaptureConfig::default()).unwrap();
//! driver.detection_tick(Instant::now());
//!
//! assert_eq!(driver.session().found(), ["BOX-001"]);
//! driver.stop();
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capture;
pub mod detect;
pub mod metrics;
pub mod overlay;
pub mod payload;
pub mod scan;

// Re-export commonly used types at crate root
pub use capture::{CameraSource, CaptureConfig, Frame, MockCamera, Resolution};
pub use detect::{CodeGeometry, Detection, Detector, MockDetector};
pub use overlay::{DrawSurface, OverlayRenderer, Viewport};
pub use payload::DecodeError;
pub use scan::{BorderState, ScanConfig, ScanDriver, ScanEvent, ScanObserver, ScanSession};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

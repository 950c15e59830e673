//! Scanning session state.
//!
//! A session owns everything the detection and render activities mutate:
//! the target set, the found set, the visible-code tracker, and the border
//! monitor. It is constructed by the caller and passed around explicitly,
//! so independent sessions can coexist and tests need no shared globals.

use super::{
    parse_serial_list, BorderMonitor, BorderState, ScanConfig, ScanEvent, VisibleCodes,
};
use crate::detect::Detection;
use crate::payload;
use std::collections::HashSet;
use std::time::Instant;

/// Counters describing the work a session has done.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    /// Detection results applied to the session.
    pub frames_processed: u64,
    /// Individual detections seen across all applied results.
    pub detections_total: u64,
    /// Detections whose text failed payload validation.
    pub decode_failures: u64,
    /// Detection results dropped because they arrived stale.
    pub stale_results_dropped: u64,
}

/// State of one scanning session.
pub struct ScanSession {
    config: ScanConfig,
    targets: HashSet<String>,
    found: HashSet<String>,
    /// Found serials in order of first match; the committed presentation
    /// order for UI snapshots.
    found_order: Vec<String>,
    visible: VisibleCodes,
    border: BorderMonitor,
    active: bool,
    /// Bumped on every start/stop/reset/retarget. Detection results carry
    /// the generation they were issued under and are dropped on mismatch,
    /// so an in-flight result can never leak across a reset.
    generation: u64,
    stats: SessionStats,
}

impl ScanSession {
    /// Creates an inactive session with no targets.
    pub fn new(config: ScanConfig) -> Self {
        let visible = VisibleCodes::new(config.visibility_timeout());
        let border = BorderMonitor::new(config.found_debounce());
        Self {
            config,
            targets: HashSet::new(),
            found: HashSet::new(),
            found_order: Vec::new(),
            visible,
            border,
            active: false,
            generation: 0,
            stats: SessionStats::default(),
        }
    }

    /// Replaces the target set from free-form user input.
    ///
    /// The text is split on newlines and commas and trimmed. Replacing
    /// targets clears all derived state so stale matches cannot survive
    /// the edit.
    pub fn set_targets(&mut self, text: &str) {
        let serials = parse_serial_list(text);
        tracing::info!(count = serials.len(), "target set replaced");
        self.targets = serials.into_iter().collect();
        self.clear_derived();
        self.generation += 1;
    }

    /// Marks the session active.
    pub fn start(&mut self) {
        self.active = true;
        self.generation += 1;
        tracing::info!(targets = self.targets.len(), "scan session started");
    }

    /// Marks the session inactive and clears the target set and all
    /// derived state.
    ///
    /// Returns the border transition to `Idle`, if there was one, so the
    /// UI is notified synchronously rather than on a render tick that may
    /// never come.
    pub fn stop(&mut self) -> Option<ScanEvent> {
        tracing::info!(found = self.found_order.len(), "scan session stopped");
        self.active = false;
        self.targets.clear();
        self.clear_derived();
        self.generation += 1;
        self.border.force_idle().map(ScanEvent::BorderChanged)
    }

    /// Clears the found set and visible codes, keeping targets and the
    /// active flag.
    pub fn reset(&mut self) {
        self.clear_derived();
        self.generation += 1;
        tracing::debug!("scan session reset");
    }

    fn clear_derived(&mut self) {
        self.found.clear();
        self.found_order.clear();
        self.visible.clear();
        self.border.clear_debounce();
    }

    /// Applies one tick's detection results.
    ///
    /// `generation` is the value of [`ScanSession::generation`] captured
    /// when detection was issued; results from a previous generation or an
    /// inactive session are dropped. Undecodable detections are discarded
    /// silently: foreign QR content in view is expected, not an error.
    ///
    /// Returns a `TargetFound` event for every target serial that
    /// transitioned from not-found to found, each carrying a snapshot of
    /// the full found list in first-match order.
    pub fn apply_detections(
        &mut self,
        generation: u64,
        detections: &[Detection],
        now: Instant,
    ) -> Vec<ScanEvent> {
        if generation != self.generation || !self.active {
            self.stats.stale_results_dropped += 1;
            tracing::trace!(
                stale = generation,
                current = self.generation,
                active = self.active,
                "detection result dropped"
            );
            return Vec::new();
        }

        self.stats.frames_processed += 1;
        let mut events = Vec::new();

        for detection in detections {
            self.stats.detections_total += 1;

            let serial = match payload::decode(&detection.text) {
                Ok(serial) => serial,
                Err(err) => {
                    self.stats.decode_failures += 1;
                    tracing::trace!(error = %err, "discarded undecodable code");
                    continue;
                }
            };

            let is_target = self.targets.contains(&serial);
            self.visible.upsert(&serial, detection.geometry, is_target, now);

            if is_target && self.found.insert(serial.clone()) {
                self.found_order.push(serial.clone());
                tracing::info!(
                    serial = %serial,
                    found = self.found_order.len(),
                    targets = self.targets.len(),
                    "target serial found"
                );
                events.push(ScanEvent::TargetFound {
                    serial,
                    found: self.found_order.clone(),
                });
            }
        }

        events
    }

    /// Runs the session's share of a render tick: prunes expired codes and
    /// re-evaluates the border state.
    ///
    /// Returns the border transition, if any.
    pub fn render_tick(&mut self, now: Instant) -> Option<ScanEvent> {
        self.visible.prune_expired(now);
        self.border
            .evaluate(
                self.active,
                !self.targets.is_empty(),
                self.visible.any_target(),
                now,
            )
            .map(ScanEvent::BorderChanged)
    }

    /// Returns the codes currently visible.
    pub fn visible(&self) -> &VisibleCodes {
        &self.visible
    }

    /// Returns the found serials in order of first match.
    pub fn found(&self) -> &[String] {
        &self.found_order
    }

    /// Returns the number of target serials.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if `serial` is in the target set.
    pub fn is_target(&self, serial: &str) -> bool {
        self.targets.contains(serial)
    }

    /// Returns the current border state.
    pub fn border_state(&self) -> BorderState {
        self.border.state()
    }

    /// Returns true while the session is scanning.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the current session generation.
    ///
    /// Callers issuing asynchronous detection capture this value and pass
    /// it back to [`ScanSession::apply_detections`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the session's work counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{BoundingBox, CodeGeometry, Point};
    use std::time::Duration;

    fn session_with_targets(targets: &str) -> ScanSession {
        let mut session = ScanSession::new(ScanConfig::default());
        session.set_targets(targets);
        session.start();
        session
    }

    fn detection_for(serial: &str) -> Detection {
        Detection::new(
            payload::encode(serial),
            CodeGeometry::Rect(BoundingBox::new(10.0, 10.0, 50.0, 50.0)),
        )
    }

    fn corner_detection_for(serial: &str) -> Detection {
        Detection::new(
            payload::encode(serial),
            CodeGeometry::Corners([
                Point::new(10.0, 10.0),
                Point::new(60.0, 10.0),
                Point::new(60.0, 60.0),
                Point::new(10.0, 60.0),
            ]),
        )
    }

    #[test]
    fn test_first_match_emits_found_event_once() {
        let mut session = session_with_targets("SN-42");
        let now = Instant::now();
        let generation = session.generation();

        let events =
            session.apply_detections(generation, &[corner_detection_for("SN-42")], now);
        assert_eq!(
            events,
            vec![ScanEvent::TargetFound {
                serial: "SN-42".to_owned(),
                found: vec!["SN-42".to_owned()],
            }]
        );

        // Same serial again: visible entry refreshes, no second event.
        let events = session.apply_detections(
            generation,
            &[corner_detection_for("SN-42")],
            now + Duration::from_millis(100),
        );
        assert!(events.is_empty());
        assert_eq!(session.found(), ["SN-42"]);

        let entry = session.visible().entries().next().unwrap();
        assert!(entry.is_target);
    }

    #[test]
    fn test_non_target_is_tracked_but_not_found() {
        let mut session = session_with_targets("SN-42");
        let generation = session.generation();

        let events =
            session.apply_detections(generation, &[detection_for("SN-99")], Instant::now());

        assert!(events.is_empty());
        assert!(session.found().is_empty());
        assert_eq!(session.visible().len(), 1);
        assert!(!session.visible().any_target());
    }

    #[test]
    fn test_undecodable_text_is_discarded() {
        let mut session = session_with_targets("SN-42");
        let generation = session.generation();

        let foreign = Detection::new(
            r#"{"not":"ours"}"#,
            CodeGeometry::Rect(BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        );
        let events = session.apply_detections(generation, &[foreign], Instant::now());

        assert!(events.is_empty());
        assert!(session.visible().is_empty());
        assert_eq!(session.stats().decode_failures, 1);
    }

    #[test]
    fn test_found_is_subset_of_targets_and_monotonic() {
        let mut session = session_with_targets("SN-1, SN-2, SN-3");
        let generation = session.generation();
        let now = Instant::now();

        session.apply_detections(generation, &[detection_for("SN-2")], now);
        session.apply_detections(
            generation,
            &[detection_for("SN-1"), detection_for("SN-77")],
            now,
        );
        session.apply_detections(generation, &[detection_for("SN-2")], now);

        // First-match order, only targets, no shrinking.
        assert_eq!(session.found(), ["SN-2", "SN-1"]);
        assert!(session.found().iter().all(|s| session.is_target(s)));
    }

    #[test]
    fn test_stale_generation_dropped() {
        let mut session = session_with_targets("SN-42");
        let stale = session.generation();

        session.reset(); // bumps the generation

        let events =
            session.apply_detections(stale, &[detection_for("SN-42")], Instant::now());
        assert!(events.is_empty());
        assert!(session.found().is_empty());
        assert!(session.visible().is_empty());
        assert_eq!(session.stats().stale_results_dropped, 1);
    }

    #[test]
    fn test_results_after_stop_dropped() {
        let mut session = session_with_targets("SN-42");
        let generation = session.generation();

        session.stop();

        let events =
            session.apply_detections(generation, &[detection_for("SN-42")], Instant::now());
        assert!(events.is_empty());
        assert!(session.found().is_empty());
    }

    #[test]
    fn test_retarget_clears_found_and_visible() {
        let mut session = session_with_targets("SN-42");
        let generation = session.generation();
        session.apply_detections(generation, &[detection_for("SN-42")], Instant::now());
        assert_eq!(session.found(), ["SN-42"]);

        session.set_targets("SN-1");

        assert!(session.found().is_empty());
        assert!(session.visible().is_empty());
        assert!(!session.is_target("SN-42"));
    }

    #[test]
    fn test_reset_returns_to_searching() {
        let mut session = session_with_targets("SN-42");
        let generation = session.generation();
        let t0 = Instant::now();

        session.apply_detections(generation, &[detection_for("SN-42")], t0);
        assert_eq!(
            session.render_tick(t0),
            Some(ScanEvent::BorderChanged(BorderState::Found))
        );

        session.reset();

        assert!(session.found().is_empty());
        assert!(session.visible().is_empty());
        // Targets remain and scanning is active, so the next evaluation
        // lands on Searching despite the recent sighting.
        assert_eq!(
            session.render_tick(t0 + Duration::from_millis(1)),
            Some(ScanEvent::BorderChanged(BorderState::Searching))
        );
    }

    #[test]
    fn test_border_idle_without_targets() {
        let mut session = ScanSession::new(ScanConfig::default());
        session.start();

        assert_eq!(session.render_tick(Instant::now()), None);
        assert_eq!(session.border_state(), BorderState::Idle);
    }

    #[test]
    fn test_border_follows_visibility() {
        let mut session = session_with_targets("SN-42");
        let generation = session.generation();
        let t0 = Instant::now();

        assert_eq!(
            session.render_tick(t0),
            Some(ScanEvent::BorderChanged(BorderState::Searching))
        );

        session.apply_detections(generation, &[detection_for("SN-42")], t0);
        assert_eq!(
            session.render_tick(t0),
            Some(ScanEvent::BorderChanged(BorderState::Found))
        );

        // Entry still live at 400ms; the sighting timestamp refreshes.
        assert_eq!(session.render_tick(t0 + Duration::from_millis(400)), None);

        // Expired at 501ms, but the debounce still holds Found.
        assert_eq!(session.render_tick(t0 + Duration::from_millis(501)), None);
        assert!(session.visible().is_empty());
        assert_eq!(session.border_state(), BorderState::Found);

        // 300ms past the last sighting tick the hold ends.
        assert_eq!(
            session.render_tick(t0 + Duration::from_millis(700)),
            Some(ScanEvent::BorderChanged(BorderState::Searching))
        );
    }

    #[test]
    fn test_stop_emits_idle_transition() {
        let mut session = session_with_targets("SN-42");
        session.render_tick(Instant::now());
        assert_eq!(session.border_state(), BorderState::Searching);

        assert_eq!(
            session.stop(),
            Some(ScanEvent::BorderChanged(BorderState::Idle))
        );
        assert_eq!(session.stop(), None);
    }

    #[test]
    fn test_serial_list_parsing_feeds_targets() {
        let mut session = ScanSession::new(ScanConfig::default());
        session.set_targets(" SN-1 ,SN-2\nSN-3,\n , SN-1");
        assert_eq!(session.target_count(), 3);
        assert!(session.is_target("SN-2"));
    }
}

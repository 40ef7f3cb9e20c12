//! Swipe gesture interpretation for paged carousels.
//!
//! # Overview
//! [`SwipeGestureDetector`] turns one pointer drag into at most one
//! navigation decision. It never touches the index itself: it reads the
//! bounds from an [`IndexState`] and reports a [`GestureOutcome`] that the
//! owner applies.
//!
//! # Gesture Flow
//! 1. **Down**: record `start_x`/`start_time`, enter Dragging.
//! 2. **Move**: `distance = start_x - x` (positive = toward next page).
//!    - Report a damped visual offset for feedback.
//!    - Pick the threshold from the drag's average speed; once
//!      `|distance|` exceeds it, commit immediately and go back to Idle.
//!      Later moves of the same touch are ignored until the next Down.
//! 3. **Up/Cancel** without a commit: Idle, snap back to the current page.

use crate::gesture_constants::{
    FAST_SWIPE_THRESHOLD, FLICK_VELOCITY_CUTOFF, MAX_RELEASE_VELOCITY, RESISTANCE_CAP,
    RESISTANCE_FACTOR, SLOW_SWIPE_THRESHOLD,
};
use crate::input::{PointerButton, PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker1D;
use slidekit_core::{Direction, IndexState};

/// Tunables for swipe interpretation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// When false, every pointer event is ignored.
    pub enabled: bool,
    /// Threshold used for slow drags.
    pub slow_threshold: f32,
    /// Threshold used for flicks faster than `velocity_cutoff`.
    pub fast_threshold: f32,
    /// Average speed (px/ms) separating flicks from drags.
    pub velocity_cutoff: f32,
    /// Distance past which visual feedback stops growing.
    pub resistance_cap: f32,
    /// Fraction of the drag shown as feedback.
    pub resistance_factor: f32,
    /// Clamp for the release velocity handed to animations (px/ms).
    pub max_release_velocity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            slow_threshold: SLOW_SWIPE_THRESHOLD,
            fast_threshold: FAST_SWIPE_THRESHOLD,
            velocity_cutoff: FLICK_VELOCITY_CUTOFF,
            resistance_cap: RESISTANCE_CAP,
            resistance_factor: RESISTANCE_FACTOR,
            max_release_velocity: MAX_RELEASE_VELOCITY,
        }
    }
}

impl GestureConfig {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn thresholds(mut self, slow: f32, fast: f32) -> Self {
        self.slow_threshold = slow;
        self.fast_threshold = fast;
        self
    }

    pub fn velocity_cutoff(mut self, cutoff: f32) -> Self {
        self.velocity_cutoff = cutoff;
        self
    }

    pub fn resistance(mut self, cap: f32, factor: f32) -> Self {
        self.resistance_cap = cap;
        self.resistance_factor = factor;
        self
    }
}

/// Navigation threshold for a drag moving at `velocity` px/ms.
pub fn dynamic_threshold(velocity: f32, config: &GestureConfig) -> f32 {
    if velocity > config.velocity_cutoff {
        config.fast_threshold
    } else {
        config.slow_threshold
    }
}

/// Ephemeral record of the drag in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub pointer: PointerId,
    pub start_x: f32,
    pub start_time_ms: u64,
    /// `start_x - current_x`; positive drags toward the next page.
    pub distance: f32,
    pub elapsed_ms: u64,
}

impl DragState {
    fn begin(pointer: PointerId, x: f32, time_ms: u64) -> Self {
        Self {
            pointer,
            start_x: x,
            start_time_ms: time_ms,
            distance: 0.0,
            elapsed_ms: 0,
        }
    }

    fn update(&mut self, x: f32, time_ms: u64) {
        self.distance = self.start_x - x;
        self.elapsed_ms = time_ms.saturating_sub(self.start_time_ms);
    }

    /// Average speed since the drag started, in px/ms.
    pub fn average_velocity(&self) -> f32 {
        self.distance.abs() / self.elapsed_ms.max(1) as f32
    }
}

/// Damped feedback offset for a drag, in content-offset units.
///
/// Grows with the drag up to `resistance_cap`, scaled by
/// `resistance_factor`. Pure, so it can be checked without any UI mounted.
pub fn compute_visual_offset(drag: &DragState, config: &GestureConfig) -> f32 {
    let cap = config.resistance_cap.max(0.0);
    drag.distance.clamp(-cap, cap) * config.resistance_factor
}

/// What the owner should do after a pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    /// Nothing to do.
    Ignored,
    /// A drag began; hold the current rendered position.
    Started,
    /// Show `visual_offset` on top of the held position.
    Dragged { visual_offset: f32 },
    /// Navigate one page. `release_velocity` is in content-offset px/ms.
    Commit {
        direction: Direction,
        release_velocity: f32,
    },
    /// Return to the resting position of the unchanged index.
    SnapBack { release_velocity: f32 },
}

impl GestureOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, GestureOutcome::Ignored)
    }
}

/// Idle/Dragging state machine that commits at most once per gesture.
#[derive(Clone, Debug, Default)]
pub struct SwipeGestureDetector {
    config: GestureConfig,
    drag: Option<DragState>,
    tracker: VelocityTracker1D,
}

impl SwipeGestureDetector {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            drag: None,
            tracker: VelocityTracker1D::new(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        if !config.enabled {
            self.reset();
        }
        self.config = config;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Feeds one pointer event. `bounds` decides whether a commit can move.
    pub fn on_event(&mut self, event: &PointerEvent, bounds: &IndexState) -> GestureOutcome {
        if !self.config.enabled {
            return GestureOutcome::Ignored;
        }
        match event.kind {
            PointerEventKind::Down => self.on_down(event, bounds),
            PointerEventKind::Move => self.on_move(event, bounds),
            PointerEventKind::Up | PointerEventKind::Cancel => self.on_up(event),
        }
    }

    /// Drops any drag in progress without producing an outcome.
    ///
    /// Returns whether a drag was active.
    pub fn reset(&mut self) -> bool {
        self.tracker.reset();
        self.drag.take().is_some()
    }

    fn on_down(&mut self, event: &PointerEvent, bounds: &IndexState) -> GestureOutcome {
        if !event.buttons.contains(PointerButton::Primary) || bounds.is_empty() {
            return GestureOutcome::Ignored;
        }
        if let Some(active) = self.drag {
            if active.pointer != event.id {
                // Second finger while one is already dragging.
                return GestureOutcome::Ignored;
            }
            log::debug!("pointer {:?} pressed again without release; restarting drag", event.id);
        }
        self.tracker.reset();
        self.tracker.add_position(event.time_ms, event.x);
        self.drag = Some(DragState::begin(event.id, event.x, event.time_ms));
        GestureOutcome::Started
    }

    fn on_move(&mut self, event: &PointerEvent, bounds: &IndexState) -> GestureOutcome {
        let Some(mut drag) = self.drag else {
            return GestureOutcome::Ignored;
        };
        if drag.pointer != event.id {
            return GestureOutcome::Ignored;
        }
        if !event.buttons.contains(PointerButton::Primary) {
            // The release was delivered somewhere else.
            log::debug!("pointer {:?} moved with no button held; ending drag", event.id);
            return self.finish_without_commit();
        }

        self.tracker.add_position(event.time_ms, event.x);
        drag.update(event.x, event.time_ms);
        self.drag = Some(drag);

        let velocity = drag.average_velocity();
        let threshold = dynamic_threshold(velocity, &self.config);
        log::trace!(
            "swipe move: distance={:.1} velocity={:.3}px/ms threshold={:.0}",
            drag.distance,
            velocity,
            threshold
        );

        if drag.distance.abs() <= threshold {
            return GestureOutcome::Dragged {
                visual_offset: compute_visual_offset(&drag, &self.config),
            };
        }

        let release_velocity = self.release_velocity();
        self.drag = None;
        self.tracker.reset();
        match Direction::from_distance(drag.distance) {
            Some(direction) if bounds.can_go(direction) => GestureOutcome::Commit {
                direction,
                release_velocity,
            },
            _ => {
                log::debug!("swipe past threshold at boundary; snapping back");
                // No page to fling toward: settle without carrying the flick.
                GestureOutcome::SnapBack {
                    release_velocity: 0.0,
                }
            }
        }
    }

    fn on_up(&mut self, event: &PointerEvent) -> GestureOutcome {
        match self.drag {
            Some(drag) if drag.pointer == event.id => self.finish_without_commit(),
            _ => GestureOutcome::Ignored,
        }
    }

    fn finish_without_commit(&mut self) -> GestureOutcome {
        let release_velocity = self.release_velocity();
        self.reset();
        GestureOutcome::SnapBack { release_velocity }
    }

    /// Finger velocity converted to content-offset velocity: a finger moving
    /// left scrolls the content toward higher offsets.
    fn release_velocity(&self) -> f32 {
        let max = self.config.max_release_velocity.abs();
        (-self.tracker.velocity_per_ms()).clamp(-max, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButtons;

    fn detector() -> SwipeGestureDetector {
        SwipeGestureDetector::new(GestureConfig::default())
    }

    #[test]
    fn threshold_depends_on_velocity() {
        let config = GestureConfig::default();
        assert_eq!(dynamic_threshold(0.7, &config), 30.0);
        assert_eq!(dynamic_threshold(0.5, &config), 50.0);
        assert_eq!(dynamic_threshold(0.07, &config), 50.0);
    }

    #[test]
    fn visual_offset_is_damped_and_capped() {
        let config = GestureConfig::default();
        let mut drag = DragState::begin(PointerId::PRIMARY, 100.0, 0);
        drag.update(80.0, 10);
        assert!((compute_visual_offset(&drag, &config) - 6.0).abs() < 1e-4);
        drag.update(300.0, 20);
        assert!((compute_visual_offset(&drag, &config) + 15.0).abs() < 1e-4);
    }

    #[test]
    fn fast_flick_commits_during_drag() {
        let mut detector = detector();
        let bounds = IndexState::new(3);
        detector.on_event(&PointerEvent::down(200.0, 0), &bounds);
        let outcome = detector.on_event(&PointerEvent::moved(165.0, 50), &bounds);
        match outcome {
            GestureOutcome::Commit { direction, .. } => assert_eq!(direction, Direction::Next),
            other => panic!("expected commit, got {other:?}"),
        }
        assert!(!detector.is_dragging());
    }

    #[test]
    fn slow_drag_of_same_distance_snaps_back() {
        let mut detector = detector();
        let bounds = IndexState::new(3);
        detector.on_event(&PointerEvent::down(200.0, 0), &bounds);
        let outcome = detector.on_event(&PointerEvent::moved(165.0, 500), &bounds);
        assert!(matches!(outcome, GestureOutcome::Dragged { .. }));
        let outcome = detector.on_event(&PointerEvent::up(165.0, 510), &bounds);
        assert!(matches!(outcome, GestureOutcome::SnapBack { .. }));
    }

    #[test]
    fn only_one_commit_per_touch() {
        let mut detector = detector();
        let bounds = IndexState::new(5);
        detector.on_event(&PointerEvent::down(300.0, 0), &bounds);
        let first = detector.on_event(&PointerEvent::moved(200.0, 40), &bounds);
        assert!(matches!(first, GestureOutcome::Commit { .. }));
        assert_eq!(
            detector.on_event(&PointerEvent::moved(300.0, 80), &bounds),
            GestureOutcome::Ignored
        );
        assert_eq!(
            detector.on_event(&PointerEvent::moved(150.0, 120), &bounds),
            GestureOutcome::Ignored
        );
        assert_eq!(
            detector.on_event(&PointerEvent::up(150.0, 130), &bounds),
            GestureOutcome::Ignored
        );
    }

    #[test]
    fn rightward_swipe_goes_previous() {
        let mut detector = detector();
        let mut bounds = IndexState::new(3);
        bounds.set_index(2);
        detector.on_event(&PointerEvent::down(100.0, 0), &bounds);
        let outcome = detector.on_event(&PointerEvent::moved(160.0, 30), &bounds);
        assert!(matches!(
            outcome,
            GestureOutcome::Commit {
                direction: Direction::Previous,
                ..
            }
        ));
    }

    #[test]
    fn boundary_commit_becomes_snap_back() {
        let mut detector = detector();
        let bounds = IndexState::new(3);
        detector.on_event(&PointerEvent::down(100.0, 0), &bounds);
        let outcome = detector.on_event(&PointerEvent::moved(200.0, 30), &bounds);
        assert_eq!(
            outcome,
            GestureOutcome::SnapBack {
                release_velocity: 0.0
            }
        );
        assert!(!detector.is_dragging());
    }

    #[test]
    fn release_velocity_points_along_content_offset() {
        let mut detector = detector();
        let bounds = IndexState::new(3);
        detector.on_event(&PointerEvent::down(200.0, 0), &bounds);
        detector.on_event(&PointerEvent::moved(195.0, 10), &bounds);
        detector.on_event(&PointerEvent::moved(190.0, 20), &bounds);
        match detector.on_event(&PointerEvent::up(190.0, 20), &bounds) {
            GestureOutcome::SnapBack { release_velocity } => {
                assert!(release_velocity > 0.0, "got {release_velocity}")
            }
            other => panic!("expected snap back, got {other:?}"),
        }
    }

    #[test]
    fn secondary_pointer_is_ignored() {
        let mut detector = detector();
        let bounds = IndexState::new(3);
        detector.on_event(&PointerEvent::down(200.0, 0), &bounds);
        let second = PointerEvent::down(50.0, 5).with_id(PointerId(1));
        assert_eq!(detector.on_event(&second, &bounds), GestureOutcome::Ignored);
        let second_move = PointerEvent::moved(0.0, 10).with_id(PointerId(1));
        assert_eq!(
            detector.on_event(&second_move, &bounds),
            GestureOutcome::Ignored
        );
        assert!(detector.is_dragging());
    }

    #[test]
    fn move_without_button_ends_drag() {
        let mut detector = detector();
        let bounds = IndexState::new(3);
        detector.on_event(&PointerEvent::down(200.0, 0), &bounds);
        let stray = PointerEvent::moved(190.0, 10).with_buttons(PointerButtons::NONE);
        assert!(matches!(
            detector.on_event(&stray, &bounds),
            GestureOutcome::SnapBack { .. }
        ));
        assert!(!detector.is_dragging());
    }

    #[test]
    fn disabled_detector_ignores_input() {
        let mut detector = SwipeGestureDetector::new(GestureConfig::default().enabled(false));
        let bounds = IndexState::new(3);
        assert_eq!(
            detector.on_event(&PointerEvent::down(200.0, 0), &bounds),
            GestureOutcome::Ignored
        );
        assert!(!detector.is_dragging());
    }

    #[test]
    fn empty_carousel_never_starts_drag() {
        let mut detector = detector();
        let bounds = IndexState::new(0);
        assert_eq!(
            detector.on_event(&PointerEvent::down(200.0, 0), &bounds),
            GestureOutcome::Ignored
        );
    }
}

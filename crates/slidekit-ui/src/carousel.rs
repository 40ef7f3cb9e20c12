//! The owning carousel: index, gesture, position and autoplay together.
//!
//! # Control Flow
//! 1. Input arrives: a pointer event, a navigation command, a resize or a
//!    frame tick.
//! 2. Gestures go through the swipe detector; commands go straight to the
//!    index.
//! 3. Index changes are announced to subscribers exactly once.
//! 4. Whatever happened, the synchronizer is asked to settle on the current
//!    index, so boundary no-ops still re-settle the view.

use slidekit_core::{Direction, IndexChange, IndexState, ListenerRegistry, Subscription};
use slidekit_foundation::{GestureOutcome, PointerEvent, SwipeGestureDetector};

use crate::autoplay::AutoPlayTimer;
use crate::config::{CarouselConfig, ConfigError};
use crate::synchronizer::{PositionSynchronizer, SyncOutcome};
use crate::viewport::{LayoutMode, Viewport};

/// Read-only view of everything a host needs to render a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselSnapshot {
    pub current_index: usize,
    pub item_count: usize,
    pub is_dragging: bool,
    pub can_go_next: bool,
    pub can_go_previous: bool,
    pub offset: f32,
    pub page_width: f32,
    pub layout_mode: LayoutMode,
    pub is_settled: bool,
}

#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    index: IndexState,
    gesture: SwipeGestureDetector,
    sync: PositionSynchronizer,
    autoplay: Option<AutoPlayTimer>,
    viewport: Viewport,
    layout_mode: LayoutMode,
    index_changed: ListenerRegistry<IndexChange>,
}

impl Carousel {
    /// Creates a carousel over `item_count` pages, positioned on page 0.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(item_count: usize, config: CarouselConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!("carousel created: {item_count} pages, {config:?}");
        Ok(Self {
            config,
            index: IndexState::with_circular(item_count, config.circular),
            gesture: SwipeGestureDetector::new(config.gesture),
            sync: PositionSynchronizer::new(config.animation),
            autoplay: config.auto_play_interval_ms.map(AutoPlayTimer::new),
            viewport: Viewport::default(),
            layout_mode: LayoutMode::Carousel,
            index_changed: ListenerRegistry::new(),
        })
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.index.item_count()
    }

    pub fn current_index(&self) -> usize {
        self.index.current()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn can_go_next(&self) -> bool {
        self.index.can_go_next()
    }

    pub fn can_go_previous(&self) -> bool {
        self.index.can_go_previous()
    }

    pub fn offset(&self) -> f32 {
        self.sync.offset()
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn index_state(&self) -> &IndexState {
        &self.index
    }

    pub fn is_auto_playing(&self) -> bool {
        self.autoplay.is_some()
    }

    /// True once the offset rests on the current page with nothing pending.
    pub fn is_settled(&self) -> bool {
        !self.sync.needs_frame() && !self.gesture.is_dragging()
    }

    /// Whether the host should keep delivering frames.
    pub fn needs_frame(&self) -> bool {
        self.sync.needs_frame() || self.autoplay.is_some()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            current_index: self.current_index(),
            item_count: self.item_count(),
            is_dragging: self.is_dragging(),
            can_go_next: self.can_go_next(),
            can_go_previous: self.can_go_previous(),
            offset: self.offset(),
            page_width: self.viewport.width(),
            layout_mode: self.layout_mode,
            is_settled: self.is_settled(),
        }
    }

    /// Registers a listener for committed navigations.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&IndexChange) + 'static) -> Subscription {
        self.index_changed.subscribe(listener)
    }

    pub fn set_circular(&mut self, circular: bool) {
        self.config.circular = circular;
        self.index.set_circular(circular);
    }

    pub fn next(&mut self) -> usize {
        self.navigate(|index| index.next(), None)
    }

    pub fn previous(&mut self) -> usize {
        self.navigate(|index| index.previous(), None)
    }

    /// Jumps to `index`, clamped into range.
    pub fn go_to(&mut self, index: isize) -> usize {
        self.navigate(|state| state.set_index(index), None)
    }

    /// Re-settles on `index` without changing the current page.
    pub fn sync_to_index(&mut self, index: usize) -> SyncOutcome {
        self.sync.sync_to_index(index, &self.viewport, None)
    }

    fn navigate(
        &mut self,
        command: impl FnOnce(&mut IndexState) -> (usize, Option<IndexChange>),
        velocity: Option<f32>,
    ) -> usize {
        let (current, change) = command(&mut self.index);
        self.sync.sync_to_index(current, &self.viewport, velocity);
        if let Some(change) = change {
            if let Some(timer) = self.autoplay.as_mut() {
                timer.restart();
            }
            self.index_changed.dispatch(&change);
        }
        current
    }

    /// Feeds one pointer event through the swipe detector.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> GestureOutcome {
        if self.layout_mode == LayoutMode::Grid {
            return GestureOutcome::Ignored;
        }
        let outcome = self.gesture.on_event(event, &self.index);
        match outcome {
            GestureOutcome::Ignored => {}
            GestureOutcome::Started => self.sync.begin_drag(),
            GestureOutcome::Dragged { visual_offset } => self.sync.drag_to(visual_offset),
            GestureOutcome::Commit {
                direction,
                release_velocity,
            } => {
                self.navigate(|index| index.step(direction), Some(release_velocity));
            }
            GestureOutcome::SnapBack { release_velocity } => {
                let current = self.index.current();
                self.sync
                    .sync_to_index(current, &self.viewport, Some(release_velocity));
            }
        }
        self.refresh_autoplay_suspension();
        outcome
    }

    /// Abandons a drag in progress and settles back on the current page.
    pub fn cancel_gesture(&mut self) -> bool {
        let was_dragging = self.gesture.reset();
        if was_dragging {
            let current = self.index.current();
            self.sync.sync_to_index(current, &self.viewport, None);
        }
        self.refresh_autoplay_suspension();
        was_dragging
    }

    /// Records a new viewport width and switches layout when it crosses the
    /// grid breakpoint.
    pub fn on_viewport_resized(&mut self, width: f32) {
        let previous = self.viewport;
        if previous.width() == width {
            return;
        }
        self.viewport.set_width(width);
        let mode = LayoutMode::for_width(width, self.config.grid_breakpoint);
        if mode != self.layout_mode {
            log::debug!("carousel layout {:?} -> {:?} at width {width}", self.layout_mode, mode);
            self.layout_mode = mode;
            match mode {
                LayoutMode::Grid => {
                    self.gesture.reset();
                    self.sync.set_bypassed(true);
                }
                LayoutMode::Carousel => {
                    self.sync.set_bypassed(false);
                    self.sync.jump_to_index(self.index.current(), &self.viewport);
                }
            }
            self.refresh_autoplay_suspension();
            return;
        }
        if mode != LayoutMode::Carousel {
            return;
        }
        // A drag anchored to the old width would land between pages.
        let cancelled = self.gesture.reset();
        if cancelled {
            log::debug!("viewport resized mid-drag; gesture cancelled");
        }
        if previous.is_measured() {
            self.sync.jump_to_index(self.index.current(), &self.viewport);
        } else if cancelled {
            // First measurement: settle from wherever the drag left the page.
            self.sync.sync_to_index(self.index.current(), &self.viewport, None);
        }
        // Otherwise a deferred sync picks the width up on the next frame.
        self.refresh_autoplay_suspension();
    }

    /// Advances animations and autoplay to `frame_nanos`. Returns the offset
    /// to render.
    pub fn on_frame(&mut self, frame_nanos: u64) -> f32 {
        let fire = self
            .autoplay
            .as_mut()
            .is_some_and(|timer| timer.on_frame(frame_nanos));
        if fire && self.layout_mode == LayoutMode::Carousel {
            self.auto_advance();
        }
        self.sync.on_frame(frame_nanos, &self.viewport)
    }

    fn auto_advance(&mut self) {
        if self.index.can_go(Direction::Next) {
            self.next();
        } else if !self.index.is_empty() {
            // Non-circular carousels rewind to the first page.
            self.go_to(0);
        }
    }

    fn refresh_autoplay_suspension(&mut self) {
        let dragging = self.gesture.is_dragging();
        if let Some(timer) = self.autoplay.as_mut() {
            timer.set_suspended(dragging);
        }
    }

    /// Releases everything tied to the mounted carousel: drag state,
    /// listeners and the autoplay timer.
    pub fn unmount(&mut self) {
        if self.gesture.reset() {
            log::debug!("carousel unmounted during an active drag");
        }
        self.sync.set_bypassed(true);
        self.autoplay = None;
        self.index_changed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn carousel(count: usize) -> Carousel {
        let mut carousel = Carousel::new(count, CarouselConfig::default()).unwrap();
        carousel.on_viewport_resized(300.0);
        carousel
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CarouselConfig::default().resistance_factor(-1.0);
        assert!(Carousel::new(3, config).is_err());
    }

    #[test]
    fn events_fire_once_per_committed_navigation() {
        let mut carousel = carousel(3);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = Rc::clone(&seen);
            carousel.subscribe(move |change| seen.borrow_mut().push(*change))
        };
        carousel.next();
        carousel.next();
        carousel.next();
        carousel.go_to(2);
        carousel.go_to(-3);
        assert_eq!(
            *seen.borrow(),
            vec![
                IndexChange {
                    previous_index: 0,
                    new_index: 1
                },
                IndexChange {
                    previous_index: 1,
                    new_index: 2
                },
                IndexChange {
                    previous_index: 2,
                    new_index: 0
                },
            ]
        );
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut carousel = carousel(3);
        carousel.go_to(2);
        let snapshot = carousel.snapshot();
        assert_eq!(snapshot.current_index, 2);
        assert!(!snapshot.can_go_next);
        assert!(snapshot.can_go_previous);
        assert_eq!(snapshot.page_width, 300.0);
        assert!(!snapshot.is_settled);
    }

    #[test]
    fn grid_layout_ignores_gestures() {
        let mut carousel = carousel(3);
        carousel.on_viewport_resized(1024.0);
        assert_eq!(carousel.layout_mode(), LayoutMode::Grid);
        assert_eq!(
            carousel.on_pointer_event(&PointerEvent::down(500.0, 0)),
            GestureOutcome::Ignored
        );
        assert_eq!(carousel.offset(), 0.0);
    }

    #[test]
    fn unmount_during_drag_clears_everything() {
        let mut carousel = Carousel::new(3, CarouselConfig::default().auto_play(Some(1000))).unwrap();
        carousel.on_viewport_resized(300.0);
        let _sub = carousel.subscribe(|_| {});
        carousel.on_pointer_event(&PointerEvent::down(200.0, 0));
        assert!(carousel.is_dragging());
        carousel.unmount();
        assert!(!carousel.is_dragging());
        assert!(!carousel.is_auto_playing());
        assert!(!carousel.needs_frame());
    }
}

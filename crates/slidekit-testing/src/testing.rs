//! Deterministic test rule: one carousel driven by a manual clock.

use std::cell::RefCell;
use std::rc::Rc;

use slidekit_core::{IndexChange, Subscription};
use slidekit_foundation::{GestureOutcome, PointerEvent};
use slidekit_ui::{Carousel, CarouselConfig, CarouselSnapshot, ConfigError};

/// 60 Hz.
pub const DEFAULT_FRAME_INTERVAL_NANOS: u64 = 16_666_667;

const NANOS_PER_MS: u64 = 1_000_000;

/// Owns a [`Carousel`] and a virtual clock. Nothing advances unless the
/// test pumps frames.
pub struct CarouselTestRule {
    carousel: Carousel,
    now_nanos: u64,
    frame_interval_nanos: u64,
    frames_pumped: u64,
}

impl CarouselTestRule {
    pub fn new(item_count: usize, config: CarouselConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            carousel: Carousel::new(item_count, config)?,
            now_nanos: 0,
            frame_interval_nanos: DEFAULT_FRAME_INTERVAL_NANOS,
            frames_pumped: 0,
        })
    }

    /// Creates the rule, reports `width` as the first measurement and pumps
    /// one frame so the clock has a reference point.
    pub fn with_width(
        item_count: usize,
        config: CarouselConfig,
        width: f32,
    ) -> Result<Self, ConfigError> {
        let mut rule = Self::new(item_count, config)?;
        rule.resize(width);
        rule.pump_frame();
        Ok(rule)
    }

    pub fn set_frame_interval_ms(&mut self, interval_ms: u64) {
        self.frame_interval_nanos = interval_ms.max(1) * NANOS_PER_MS;
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        self.carousel.snapshot()
    }

    pub fn now_nanos(&self) -> u64 {
        self.now_nanos
    }

    /// Clock time used for pointer events.
    pub fn now_ms(&self) -> u64 {
        self.now_nanos / NANOS_PER_MS
    }

    pub fn frames_pumped(&self) -> u64 {
        self.frames_pumped
    }

    /// Moves the clock without delivering a frame.
    pub fn advance_time_by_ms(&mut self, ms: u64) {
        self.now_nanos += ms * NANOS_PER_MS;
    }

    /// Advances one frame interval and delivers a frame. Returns the
    /// rendered offset.
    pub fn pump_frame(&mut self) -> f32 {
        self.now_nanos += self.frame_interval_nanos;
        self.frames_pumped += 1;
        self.carousel.on_frame(self.now_nanos)
    }

    /// Delivers a frame at the current clock time without advancing it.
    pub fn frame_now(&mut self) -> f32 {
        self.frames_pumped += 1;
        self.carousel.on_frame(self.now_nanos)
    }

    pub fn pump_frames(&mut self, count: usize) -> f32 {
        let mut offset = self.carousel.offset();
        for _ in 0..count {
            offset = self.pump_frame();
        }
        offset
    }

    /// Pumps frames covering at least `ms` of clock time.
    pub fn pump_for_ms(&mut self, ms: u64) -> f32 {
        let until = self.now_nanos + ms * NANOS_PER_MS;
        let mut offset = self.carousel.offset();
        while self.now_nanos < until {
            offset = self.pump_frame();
        }
        offset
    }

    /// Pumps until the carousel is settled. Returns false if it was still
    /// moving after `max_frames`.
    pub fn pump_until_idle(&mut self, max_frames: usize) -> bool {
        for _ in 0..max_frames {
            if self.carousel.is_settled() {
                return true;
            }
            self.pump_frame();
        }
        let settled = self.carousel.is_settled();
        if !settled {
            log::warn!("carousel still moving after {max_frames} frames");
        }
        settled
    }

    pub fn resize(&mut self, width: f32) {
        self.carousel.on_viewport_resized(width);
    }

    pub fn send(&mut self, event: PointerEvent) -> GestureOutcome {
        self.carousel.on_pointer_event(&event)
    }

    /// Records every index change from now on.
    pub fn record_index_changes(&self) -> IndexChangeRecorder {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let subscription = self
            .carousel
            .subscribe(move |change| sink.borrow_mut().push(*change));
        IndexChangeRecorder {
            changes,
            _subscription: subscription,
        }
    }
}

/// Collected [`IndexChange`]s; stops recording when dropped.
pub struct IndexChangeRecorder {
    changes: Rc<RefCell<Vec<IndexChange>>>,
    _subscription: Subscription,
}

impl IndexChangeRecorder {
    pub fn changes(&self) -> Vec<IndexChange> {
        self.changes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.changes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.borrow().is_empty()
    }

    /// `(previous_index, new_index)` pairs, handy for `assert_eq!`.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.changes
            .borrow()
            .iter()
            .map(|change| (change.previous_index, change.new_index))
            .collect()
    }

    pub fn clear(&self) {
        self.changes.borrow_mut().clear();
    }
}

//! Drives the rendered offset to the resting position of a page.
//!
//! # Overview
//! Every way of changing page (arrow, dot, swipe commit, swipe snap-back)
//! ends in [`PositionSynchronizer::sync_to_index`], so all of them share one
//! animated transition. The page width is measured on each call, so a resize
//! between two calls is picked up automatically.
//!
//! # Deferral
//! A zero or non-finite width means the container is not laid out yet.
//! Committing `index * 0` would stack every page at offset 0, so the request
//! is parked and retried on the next frame instead.

use slidekit_animation::{AnimationSpec, Animatable};

use crate::viewport::{is_usable_width, ViewportMeasure};

/// Result of a sync request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncOutcome {
    /// A transition started from rest.
    Started,
    /// An in-flight transition was redirected.
    Retargeted,
    /// Already resting on the target; nothing moves.
    AlreadyAtRest,
    /// Width not measurable yet; retried on the next frame.
    Deferred,
    /// Grid layout is active; offsets are not driven.
    Bypassed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingSync {
    index: usize,
    velocity: Option<f32>,
    animate: bool,
}

#[derive(Clone, Debug)]
pub struct PositionSynchronizer {
    offset: Animatable,
    pending: Option<PendingSync>,
    drag_anchor: Option<f32>,
    bypassed: bool,
    page_width: f32,
}

impl PositionSynchronizer {
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            offset: Animatable::new(0.0, spec),
            pending: None,
            drag_anchor: None,
            bypassed: false,
            page_width: 0.0,
        }
    }

    /// Rendered offset along the page axis. Always 0 in grid layout.
    pub fn offset(&self) -> f32 {
        if self.bypassed {
            0.0
        } else {
            self.offset.value()
        }
    }

    /// Width used by the most recent successful sync.
    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_running()
    }

    /// Whether the host should schedule another frame.
    pub fn needs_frame(&self) -> bool {
        !self.bypassed && (self.offset.is_running() || self.pending.is_some())
    }

    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.offset.set_spec(spec);
    }

    /// Animates toward `index * page_width`.
    ///
    /// `velocity` (px/ms) seeds the transition, e.g. with the release speed
    /// of a swipe; otherwise the current velocity carries over.
    pub fn sync_to_index(
        &mut self,
        index: usize,
        viewport: &dyn ViewportMeasure,
        velocity: Option<f32>,
    ) -> SyncOutcome {
        self.request(
            PendingSync {
                index,
                velocity,
                animate: true,
            },
            viewport,
        )
    }

    /// Moves to `index` without animation (resize, layout switch).
    pub fn jump_to_index(&mut self, index: usize, viewport: &dyn ViewportMeasure) -> SyncOutcome {
        self.request(
            PendingSync {
                index,
                velocity: None,
                animate: false,
            },
            viewport,
        )
    }

    fn request(&mut self, sync: PendingSync, viewport: &dyn ViewportMeasure) -> SyncOutcome {
        if self.bypassed {
            return SyncOutcome::Bypassed;
        }
        let width = viewport.measure_width();
        if !is_usable_width(width) {
            log::debug!(
                "page width {width} not measurable; deferring sync to page {}",
                sync.index
            );
            self.pending = Some(sync);
            self.drag_anchor = None;
            return SyncOutcome::Deferred;
        }

        self.pending = None;
        self.drag_anchor = None;
        self.page_width = width;
        let target = sync.index as f32 * width;

        if !sync.animate {
            self.offset.snap_to(target);
            return SyncOutcome::Started;
        }

        let has_velocity = sync.velocity.is_some_and(|v| v != 0.0);
        if self.offset.is_at_rest_on(target) && !has_velocity {
            return SyncOutcome::AlreadyAtRest;
        }

        let was_running = self.offset.is_running();
        self.offset.animate_to(target, sync.velocity);
        if was_running {
            SyncOutcome::Retargeted
        } else {
            SyncOutcome::Started
        }
    }

    /// Holds the current rendered offset as the anchor for drag feedback.
    pub fn begin_drag(&mut self) {
        if self.bypassed {
            return;
        }
        self.offset.stop();
        self.drag_anchor = Some(self.offset.value());
    }

    /// Shows `visual_offset` on top of the drag anchor, without animation.
    pub fn drag_to(&mut self, visual_offset: f32) {
        if let Some(anchor) = self.drag_anchor {
            self.offset.snap_to(anchor + visual_offset);
        }
    }

    pub fn is_holding_drag(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Switches offset driving off (grid layout) or back on.
    pub fn set_bypassed(&mut self, bypassed: bool) {
        if bypassed == self.bypassed {
            return;
        }
        self.bypassed = bypassed;
        self.drag_anchor = None;
        self.pending = None;
        self.offset.stop();
    }

    /// Retries a deferred sync, then advances the transition.
    pub fn on_frame(&mut self, frame_nanos: u64, viewport: &dyn ViewportMeasure) -> f32 {
        if self.bypassed {
            return 0.0;
        }
        // A held drag owns the offset; the parked sync waits for release.
        if let (Some(pending), None) = (self.pending, self.drag_anchor) {
            self.request(pending, viewport);
        }
        self.offset.tick(frame_nanos)
    }
}

//! Scripted pointer input for a [`CarouselTestRule`].
//!
//! The robot keeps pointer timestamps on the rule's clock, so the velocity
//! the gesture detector sees is exactly the one the script asks for.

use slidekit_core::Direction;
use slidekit_foundation::{GestureOutcome, PointerEvent, PointerId};

use crate::testing::CarouselTestRule;

/// Everything a scripted gesture produced, in delivery order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwipeResult {
    pub outcomes: Vec<GestureOutcome>,
}

impl SwipeResult {
    pub fn commits(&self) -> Vec<Direction> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                GestureOutcome::Commit { direction, .. } => Some(*direction),
                _ => None,
            })
            .collect()
    }

    pub fn committed(&self) -> Option<Direction> {
        self.commits().first().copied()
    }

    pub fn snapped_back(&self) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| matches!(outcome, GestureOutcome::SnapBack { .. }))
    }

    /// Largest visual feedback offset reported during the drag.
    pub fn max_feedback(&self) -> f32 {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                GestureOutcome::Dragged { visual_offset } => Some(visual_offset.abs()),
                _ => None,
            })
            .fold(0.0, f32::max)
    }
}

pub struct SwipeRobot<'a> {
    rule: &'a mut CarouselTestRule,
    pointer: PointerId,
    x: f32,
    pressed: bool,
    frame_per_event: bool,
}

impl<'a> SwipeRobot<'a> {
    pub fn new(rule: &'a mut CarouselTestRule) -> Self {
        Self {
            rule,
            pointer: PointerId::PRIMARY,
            x: 0.0,
            pressed: false,
            frame_per_event: true,
        }
    }

    pub fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = pointer;
        self
    }

    /// Whether a frame is delivered after every event (default true).
    pub fn frame_per_event(mut self, enabled: bool) -> Self {
        self.frame_per_event = enabled;
        self
    }

    pub fn rule(&mut self) -> &mut CarouselTestRule {
        self.rule
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn press(&mut self, x: f32) -> GestureOutcome {
        self.x = x;
        self.pressed = true;
        let event = PointerEvent::down(x, self.rule.now_ms()).with_id(self.pointer);
        self.deliver(event)
    }

    /// Moves to `x` after `after_ms` of clock time.
    pub fn move_to(&mut self, x: f32, after_ms: u64) -> GestureOutcome {
        self.rule.advance_time_by_ms(after_ms);
        self.x = x;
        let event = PointerEvent::moved(x, self.rule.now_ms()).with_id(self.pointer);
        self.deliver(event)
    }

    pub fn release(&mut self) -> GestureOutcome {
        self.pressed = false;
        let event = PointerEvent::up(self.x, self.rule.now_ms()).with_id(self.pointer);
        self.deliver(event)
    }

    pub fn cancel(&mut self) -> GestureOutcome {
        self.pressed = false;
        let event = PointerEvent::cancel(self.x, self.rule.now_ms()).with_id(self.pointer);
        self.deliver(event)
    }

    /// Press at `from_x`, move to `to_x` over `duration_ms` in `steps`
    /// evenly spaced moves, then release.
    pub fn swipe(&mut self, from_x: f32, to_x: f32, duration_ms: u64, steps: u32) -> SwipeResult {
        let mut result = SwipeResult::default();
        result.outcomes.push(self.press(from_x));
        result.outcomes.extend(self.drag_path(from_x, to_x, duration_ms, steps));
        result.outcomes.push(self.release());
        result
    }

    /// Same as [`swipe`](Self::swipe) without the release.
    pub fn drag_path(
        &mut self,
        from_x: f32,
        to_x: f32,
        duration_ms: u64,
        steps: u32,
    ) -> Vec<GestureOutcome> {
        let steps = steps.max(1);
        let mut outcomes = Vec::with_capacity(steps as usize);
        let mut elapsed = 0;
        for step in 1..=steps {
            let at_ms = duration_ms * u64::from(step) / u64::from(steps);
            let fraction = step as f32 / steps as f32;
            let x = from_x + (to_x - from_x) * fraction;
            outcomes.push(self.move_to(x, at_ms - elapsed));
            elapsed = at_ms;
        }
        outcomes
    }

    /// Quick swipe toward the next page: `distance` px in 50 ms.
    pub fn fling_next(&mut self, start_x: f32, distance: f32) -> SwipeResult {
        self.swipe(start_x, start_x - distance, 50, 5)
    }

    /// Quick swipe toward the previous page: `distance` px in 50 ms.
    pub fn fling_previous(&mut self, start_x: f32, distance: f32) -> SwipeResult {
        self.swipe(start_x, start_x + distance, 50, 5)
    }

    fn deliver(&mut self, event: PointerEvent) -> GestureOutcome {
        let outcome = self.rule.send(event);
        if self.frame_per_event {
            self.rule.frame_now();
        }
        outcome
    }
}

//! A single animated `f32` that can be retargeted mid-flight.
//!
//! # Retargeting
//! Calling [`Animatable::animate_to`] while an animation runs starts a new
//! segment from the current value *and* velocity, so the motion bends
//! toward the new target instead of jumping.

use crate::easing::Easing;
use crate::spring::SpringSpec;

/// Displacement (px) under which a spring counts as settled.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// Velocity (px/ms) under which a spring counts as settled.
const REST_VELOCITY: f32 = 0.01;

const NANOS_PER_MS: f64 = 1_000_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl TweenSpec {
    pub const fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(300, Easing::FAST_OUT_SLOW_IN)
    }
}

/// How an [`Animatable`] travels to its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationSpec {
    Spring(SpringSpec),
    Tween(TweenSpec),
}

impl Default for AnimationSpec {
    fn default() -> Self {
        AnimationSpec::Spring(SpringSpec::default())
    }
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    from: f32,
    initial_velocity: f32,
    start_nanos: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct Animatable {
    value: f32,
    /// px/ms
    velocity: f32,
    target: f32,
    spec: AnimationSpec,
    segment: Option<Segment>,
    last_frame_nanos: Option<u64>,
}

impl Animatable {
    pub fn new(initial: f32, spec: AnimationSpec) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            target: initial,
            spec,
            segment: None,
            last_frame_nanos: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Takes effect for the next [`animate_to`](Self::animate_to).
    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
    }

    pub fn is_running(&self) -> bool {
        self.segment.is_some()
    }

    /// True when not animating and sitting on `target`.
    pub fn is_at_rest_on(&self, target: f32) -> bool {
        !self.is_running() && (self.value - target).abs() < f32::EPSILON.max(target.abs() * 1e-6)
    }

    /// Starts (or redirects) an animation toward `target`.
    ///
    /// `initial_velocity` (px/ms) replaces the current velocity when given,
    /// e.g. the finger speed at release.
    pub fn animate_to(&mut self, target: f32, initial_velocity: Option<f32>) {
        if let Some(velocity) = initial_velocity {
            self.velocity = velocity;
        }
        self.target = target;
        self.segment = Some(Segment {
            from: self.value,
            initial_velocity: self.velocity,
            start_nanos: self.last_frame_nanos,
        });
    }

    /// Jumps to `value` and stops any animation.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.segment = None;
    }

    /// Freezes at the current value.
    pub fn stop(&mut self) {
        self.target = self.value;
        self.velocity = 0.0;
        self.segment = None;
    }

    /// Advances to `frame_nanos` and returns the new value.
    pub fn tick(&mut self, frame_nanos: u64) -> f32 {
        let last_frame = self.last_frame_nanos.replace(frame_nanos);
        let Some(mut segment) = self.segment else {
            return self.value;
        };
        let start = *segment.start_nanos.get_or_insert(last_frame.unwrap_or(frame_nanos));
        self.segment = Some(segment);

        let elapsed_ms = (frame_nanos.saturating_sub(start) as f64 / NANOS_PER_MS) as f32;
        match self.spec {
            AnimationSpec::Spring(spring) => self.step_spring(spring, segment, elapsed_ms),
            AnimationSpec::Tween(tween) => {
                self.step_tween(tween, segment, elapsed_ms, last_frame, frame_nanos)
            }
        }
        self.value
    }

    fn step_spring(&mut self, spring: SpringSpec, segment: Segment, elapsed_ms: f32) {
        let (displacement, velocity_per_s) = spring.evaluate(
            segment.from - self.target,
            segment.initial_velocity * 1000.0,
            elapsed_ms / 1000.0,
        );
        let velocity = velocity_per_s / 1000.0;
        if displacement.abs() < VISIBILITY_THRESHOLD && velocity.abs() < REST_VELOCITY {
            self.finish();
        } else {
            self.value = self.target + displacement;
            self.velocity = velocity;
        }
    }

    fn step_tween(
        &mut self,
        tween: TweenSpec,
        segment: Segment,
        elapsed_ms: f32,
        last_frame: Option<u64>,
        frame_nanos: u64,
    ) {
        let duration = tween.duration_ms.max(1) as f32;
        if elapsed_ms >= duration {
            self.finish();
            return;
        }
        let eased = tween.easing.transform(elapsed_ms / duration);
        let next = segment.from + (self.target - segment.from) * eased;
        let frame_ms = last_frame
            .map(|last| (frame_nanos.saturating_sub(last) as f64 / NANOS_PER_MS) as f32)
            .unwrap_or(0.0);
        if frame_ms > 0.0 {
            self.velocity = (next - self.value) / frame_ms;
        }
        self.value = next;
    }

    fn finish(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
        self.segment = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: u64 = 16_000_000;

    fn run_until_idle(anim: &mut Animatable, start: u64) -> (u64, Vec<f32>) {
        let mut frame = start;
        let mut values = Vec::new();
        for _ in 0..600 {
            frame += FRAME;
            values.push(anim.tick(frame));
            if !anim.is_running() {
                break;
            }
        }
        (frame, values)
    }

    #[test]
    fn spring_settles_exactly_on_target() {
        let mut anim = Animatable::new(0.0, AnimationSpec::default());
        anim.tick(0);
        anim.animate_to(300.0, None);
        let (_, values) = run_until_idle(&mut anim, 0);
        assert!(!anim.is_running());
        assert_eq!(anim.value(), 300.0);
        assert!(values.windows(2).all(|w| w[1] >= w[0] - 1e-3), "non-monotonic: {values:?}");
    }

    #[test]
    fn tween_reaches_target_after_duration() {
        let spec = AnimationSpec::Tween(TweenSpec::new(160, Easing::Linear));
        let mut anim = Animatable::new(0.0, spec);
        anim.tick(0);
        anim.animate_to(100.0, None);
        anim.tick(FRAME * 5);
        assert!((anim.value() - 50.0).abs() < 0.01, "got {}", anim.value());
        anim.tick(FRAME * 10);
        assert_eq!(anim.value(), 100.0);
        assert!(!anim.is_running());
    }

    #[test]
    fn retarget_continues_from_current_value() {
        let mut anim = Animatable::new(0.0, AnimationSpec::default());
        anim.tick(0);
        anim.animate_to(400.0, None);
        anim.tick(FRAME);
        anim.tick(FRAME * 2);
        let mid = anim.value();
        assert!(mid > 0.0 && mid < 400.0);

        anim.animate_to(0.0, None);
        let after = anim.tick(FRAME * 3);
        // Still carrying forward momentum: no jump back to the origin.
        assert!((after - mid).abs() < 60.0, "mid={mid}, after={after}");
        run_until_idle(&mut anim, FRAME * 3);
        assert_eq!(anim.value(), 0.0);
    }

    #[test]
    fn snap_to_stops_animation() {
        let mut anim = Animatable::new(0.0, AnimationSpec::default());
        anim.animate_to(100.0, Some(1.0));
        anim.snap_to(42.0);
        assert!(!anim.is_running());
        assert_eq!(anim.tick(FRAME), 42.0);
        assert!(anim.is_at_rest_on(42.0));
    }

    #[test]
    fn animate_to_current_value_settles_without_motion() {
        let mut anim = Animatable::new(120.0, AnimationSpec::default());
        anim.tick(0);
        anim.animate_to(120.0, None);
        assert_eq!(anim.tick(FRAME), 120.0);
        assert!(!anim.is_running());
    }
}

//! Default tuning for swipe navigation.
//!
//! All values are in logical pixels and milliseconds. They are defaults for
//! [`GestureConfig`](crate::GestureConfig), not contracts; what matters is
//! that a fast flick needs less travel than a slow drag.

/// Travel needed to change page when the drag is slow.
pub const SLOW_SWIPE_THRESHOLD: f32 = 50.0;

/// Travel needed to change page when the drag is a quick flick.
pub const FAST_SWIPE_THRESHOLD: f32 = 30.0;

/// Average drag speed (px/ms) above which [`FAST_SWIPE_THRESHOLD`] applies.
pub const FLICK_VELOCITY_CUTOFF: f32 = 0.5;

/// Drag distance past which the rubber-band feedback stops growing.
pub const RESISTANCE_CAP: f32 = 50.0;

/// Fraction of the drag distance shown as visual feedback before a commit.
pub const RESISTANCE_FACTOR: f32 = 0.3;

/// Maximum release velocity handed to the settle animation, in px/ms.
///
/// Matches Android's default maximum fling velocity (8000 px/s) on a baseline
/// density.
pub const MAX_RELEASE_VELOCITY: f32 = 8.0;

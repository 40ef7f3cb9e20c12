//! Frame-driven animation primitives for SlideKit.
//!
//! Animations never read a clock. The owner feeds frame timestamps (in
//! nanoseconds, monotonically increasing) through [`Animatable::tick`].

pub mod animatable;
pub mod easing;
pub mod spring;

pub use animatable::{AnimationSpec, Animatable, TweenSpec, VISIBILITY_THRESHOLD};
pub use easing::{CubicBezier, Easing};
pub use spring::SpringSpec;

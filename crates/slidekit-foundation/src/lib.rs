//! Foundation elements for SlideKit: pointer input, velocity tracking and
//! the swipe gesture interpreter.

pub mod gesture_constants;
pub mod input;
pub mod swipe;
pub mod velocity_tracker;

// Re-export commonly used items
pub use gesture_constants::*;
pub use input::{PointerButton, PointerButtons, PointerEvent, PointerEventKind, PointerId};
pub use swipe::{
    compute_visual_offset, dynamic_threshold, DragState, GestureConfig, GestureOutcome,
    SwipeGestureDetector,
};
pub use velocity_tracker::VelocityTracker1D;

pub mod prelude {
    pub use crate::input::{
        PointerButton, PointerButtons, PointerEvent, PointerEventKind, PointerId,
    };
    pub use crate::swipe::{GestureConfig, GestureOutcome, SwipeGestureDetector};
}

//! Carousel state machine for SlideKit.
//!
//! [`Carousel`] owns the index, the swipe detector, the position
//! synchronizer and the optional autoplay timer of one mounted carousel. The
//! host feeds it pointer events, viewport widths and frame times, and reads
//! back an offset to render.

mod autoplay;
mod carousel;
mod config;
pub mod debug;
mod synchronizer;
mod viewport;

pub use autoplay::AutoPlayTimer;
pub use carousel::{Carousel, CarouselSnapshot};
pub use config::{CarouselConfig, ConfigError};
pub use debug::{format_carousel_state, log_carousel_state, page_dots};
pub use synchronizer::{PositionSynchronizer, SyncOutcome};
pub use viewport::{LayoutMode, Viewport, ViewportMeasure, DEFAULT_GRID_BREAKPOINT};

pub use slidekit_animation::{AnimationSpec, Easing, SpringSpec, TweenSpec};
pub use slidekit_core::{Direction, IndexChange, IndexState, Subscription};
pub use slidekit_foundation::{
    GestureConfig, GestureOutcome, PointerButton, PointerButtons, PointerEvent, PointerEventKind,
    PointerId,
};

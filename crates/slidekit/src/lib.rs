#![deny(missing_docs)]

//! Swipeable, paginated carousels with minimal boilerplate.
//!
//! Create a [`Carousel`], feed it pointer events, viewport widths and frame
//! times, and render the offset it returns. With the `shell` feature the
//! [`CarouselShell`] does the feeding for a host surface.

/// Re-export the UI crate so applications can depend on a single crate.
pub use slidekit_ui::*;

pub use slidekit_animation::{Animatable, CubicBezier};
pub use slidekit_core::ListenerRegistry;
pub use slidekit_foundation::{
    compute_visual_offset, dynamic_threshold, DragState, SwipeGestureDetector, VelocityTracker1D,
};

#[cfg(feature = "shell")]
pub use slidekit_app_shell::{
    CarouselBounds, CarouselShell, Host, HostEvent, HostEventKind, HostListenerId,
    MountedCarousel, RecordingHost, ShellClock, ShellError,
};

/// Convenience imports for SlideKit applications.
pub mod prelude {
    pub use slidekit_ui::{
        Carousel, CarouselConfig, CarouselSnapshot, Direction, IndexChange, LayoutMode,
        PointerEvent, Subscription,
    };

    #[cfg(feature = "shell")]
    pub use slidekit_app_shell::{CarouselBounds, CarouselShell, HostEvent};
}

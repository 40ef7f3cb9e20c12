//! Viewport measurement and the carousel/grid layout switch.

use std::cell::Cell;

/// Width at which the pricing-style layout stops scrolling and shows every
/// page side by side.
pub const DEFAULT_GRID_BREAKPOINT: f32 = 768.0;

/// Source of the current page width, measured at call time.
///
/// A width of 0 (or anything non-finite) means "not laid out yet".
pub trait ViewportMeasure {
    fn measure_width(&self) -> f32;
}

impl ViewportMeasure for f32 {
    fn measure_width(&self) -> f32 {
        *self
    }
}

impl ViewportMeasure for Cell<f32> {
    fn measure_width(&self) -> f32 {
        self.get()
    }
}

/// Last width reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    width: f32,
}

impl Viewport {
    pub fn new(width: f32) -> Self {
        Self { width }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn is_measured(&self) -> bool {
        is_usable_width(self.width)
    }
}

impl ViewportMeasure for Viewport {
    fn measure_width(&self) -> f32 {
        self.width
    }
}

pub(crate) fn is_usable_width(width: f32) -> bool {
    width.is_finite() && width > 0.0
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// One page visible, swipe/scroll between pages.
    #[default]
    Carousel,
    /// All pages visible at once; no scrolling.
    Grid,
}

impl LayoutMode {
    /// Layout for a viewport `width`. Unmeasured widths stay in carousel
    /// mode so the first real measurement decides.
    pub fn for_width(width: f32, breakpoint: Option<f32>) -> Self {
        match breakpoint {
            Some(breakpoint) if is_usable_width(width) && width >= breakpoint => LayoutMode::Grid,
            _ => LayoutMode::Carousel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_selects_grid() {
        assert_eq!(LayoutMode::for_width(375.0, Some(768.0)), LayoutMode::Carousel);
        assert_eq!(LayoutMode::for_width(768.0, Some(768.0)), LayoutMode::Grid);
        assert_eq!(LayoutMode::for_width(1920.0, None), LayoutMode::Carousel);
        assert_eq!(LayoutMode::for_width(0.0, Some(768.0)), LayoutMode::Carousel);
    }

    #[test]
    fn measure_sources() {
        let cell = Cell::new(320.0_f32);
        assert_eq!(cell.measure_width(), 320.0);
        cell.set(0.0);
        assert_eq!(cell.measure_width(), 0.0);
        assert!(!Viewport::default().is_measured());
        assert!(!Viewport::new(f32::INFINITY).is_measured());
        assert!(Viewport::new(1.0).is_measured());
    }
}

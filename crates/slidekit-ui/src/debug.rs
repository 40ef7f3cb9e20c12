//! Debug utilities for inspecting a carousel's state
//!
//! # Usage
//!
//! ```rust,ignore
//! use slidekit_ui::{log_carousel_state, page_dots};
//!
//! carousel.on_frame(now);
//! log_carousel_state(&carousel.snapshot());
//! println!("{}", page_dots(&carousel.snapshot()));
//! ```

use crate::carousel::CarouselSnapshot;
use crate::viewport::LayoutMode;
use std::fmt::Write;

/// Returns a multi-line description of `snapshot`.
pub fn format_carousel_state(snapshot: &CarouselSnapshot) -> String {
    let mut output = String::new();
    writeln!(output, "=== CAROUSEL STATE ===").ok();
    writeln!(
        output,
        "page: {} / {}  [{}]",
        display_page(snapshot),
        snapshot.item_count,
        page_dots(snapshot)
    )
    .ok();
    writeln!(
        output,
        "layout: {:?}, width: {:.1}, offset: {:.1}",
        snapshot.layout_mode, snapshot.page_width, snapshot.offset
    )
    .ok();
    writeln!(
        output,
        "dragging: {}, settled: {}, prev: {}, next: {}",
        snapshot.is_dragging, snapshot.is_settled, snapshot.can_go_previous, snapshot.can_go_next
    )
    .ok();
    writeln!(output, "=== END CAROUSEL STATE ===").ok();
    output
}

/// Logs [`format_carousel_state`] at debug level.
pub fn log_carousel_state(snapshot: &CarouselSnapshot) {
    for line in format_carousel_state(snapshot).lines() {
        log::debug!("{line}");
    }
}

/// Page indicator, e.g. `o * o` with the current page starred. In grid
/// layout every page is visible, so every dot is starred.
pub fn page_dots(snapshot: &CarouselSnapshot) -> String {
    let mut output = String::new();
    for page in 0..snapshot.item_count {
        if page > 0 {
            output.push(' ');
        }
        let active =
            snapshot.layout_mode == LayoutMode::Grid || page == snapshot.current_index;
        output.push(if active { '*' } else { 'o' });
    }
    output
}

fn display_page(snapshot: &CarouselSnapshot) -> usize {
    if snapshot.item_count == 0 {
        0
    } else {
        snapshot.current_index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(current_index: usize, item_count: usize, layout_mode: LayoutMode) -> CarouselSnapshot {
        CarouselSnapshot {
            current_index,
            item_count,
            is_dragging: false,
            can_go_next: current_index + 1 < item_count,
            can_go_previous: current_index > 0,
            offset: current_index as f32 * 320.0,
            page_width: 320.0,
            layout_mode,
            is_settled: true,
        }
    }

    #[test]
    fn dots_mark_current_page() {
        assert_eq!(page_dots(&snapshot(1, 3, LayoutMode::Carousel)), "o * o");
        assert_eq!(page_dots(&snapshot(0, 3, LayoutMode::Grid)), "* * *");
        assert_eq!(page_dots(&snapshot(0, 0, LayoutMode::Carousel)), "");
    }

    #[test]
    fn format_includes_page_and_offset() {
        let text = format_carousel_state(&snapshot(2, 3, LayoutMode::Carousel));
        assert!(text.contains("page: 3 / 3"));
        assert!(text.contains("offset: 640.0"));
        assert!(text.contains("next: false"));
    }
}

//! Assertion utilities for robot testing
//!
//! Helpers for validating carousel state in robot tests.

use slidekit_ui::{CarouselSnapshot, LayoutMode};

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the carousel rests on `page`: index, offset and settle state.
pub fn assert_resting_on(snapshot: &CarouselSnapshot, page: usize, msg: &str) {
    assert_eq!(
        snapshot.current_index, page,
        "{}: expected page {}, snapshot {:?}",
        msg, page, snapshot
    );
    assert!(snapshot.is_settled, "{}: still moving: {:?}", msg, snapshot);
    let expected = match snapshot.layout_mode {
        LayoutMode::Carousel => page as f32 * snapshot.page_width,
        LayoutMode::Grid => 0.0,
    };
    assert_approx_eq(snapshot.offset, expected, 0.5, &format!("{} - offset", msg));
}

/// Assert that the index lies inside `[0, item_count)` (or is 0 when empty).
pub fn assert_index_in_range(snapshot: &CarouselSnapshot, msg: &str) {
    if snapshot.item_count == 0 {
        assert_eq!(snapshot.current_index, 0, "{}: empty carousel", msg);
    } else {
        assert!(
            snapshot.current_index < snapshot.item_count,
            "{}: index {} out of range for {} pages",
            msg,
            snapshot.current_index,
            snapshot.item_count
        );
    }
}

/// Assert that a sequence never steps backwards.
pub fn assert_monotonic(values: &[f32], increasing: bool, tolerance: f32, msg: &str) {
    for pair in values.windows(2) {
        let step = pair[1] - pair[0];
        let ok = if increasing {
            step >= -tolerance
        } else {
            step <= tolerance
        };
        assert!(ok, "{}: non-monotonic step {:?} in {:?}", msg, pair, values);
    }
}

/// Assert that a collection has an expected count.
pub fn assert_count<T>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {}",
        msg,
        expected,
        items.len()
    );
}

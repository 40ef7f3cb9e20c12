use rustc_hash::FxHashMap;
use slidekit_foundation::PointerId;

/// Pointers whose press landed on the carousel.
///
/// The pointer that received Down keeps receiving Move and Up/Cancel even
/// after it leaves the carousel bounds; pointers that were pressed elsewhere
/// never reach it.
#[derive(Debug, Default)]
pub(crate) struct PointerTracker {
    tracked: FxHashMap<PointerId, (f32, f32)>,
}

impl PointerTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn track(&mut self, pointer: PointerId, x: f32, y: f32) {
        self.tracked.insert(pointer, (x, y));
    }

    /// Updates the last position; false for untracked pointers.
    pub(crate) fn update(&mut self, pointer: PointerId, x: f32, y: f32) -> bool {
        match self.tracked.get_mut(&pointer) {
            Some(position) => {
                *position = (x, y);
                true
            }
            None => false,
        }
    }

    pub(crate) fn release(&mut self, pointer: PointerId) -> Option<(f32, f32)> {
        self.tracked.remove(&pointer)
    }

    /// Drops every tracked pointer, returning them.
    pub(crate) fn clear(&mut self) -> Vec<(PointerId, (f32, f32))> {
        self.tracked.drain().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_only_pressed_pointers() {
        let mut tracker = PointerTracker::new();
        tracker.track(PointerId::PRIMARY, 10.0, 5.0);
        assert!(tracker.update(PointerId::PRIMARY, 20.0, 5.0));
        assert!(!tracker.update(PointerId(7), 20.0, 5.0));
        assert_eq!(tracker.release(PointerId::PRIMARY), Some((20.0, 5.0)));
        assert_eq!(tracker.release(PointerId::PRIMARY), None);
        assert!(tracker.clear().is_empty());
    }
}

//! The authoritative "current page" of a carousel.
//!
//! [`IndexState`] holds the page count and the current index and funnels every
//! write through one clamping store routine. Mutations return an
//! [`IndexChange`] only when the stored index actually moved, so callers can
//! forward exactly one event per committed navigation.

/// Navigation direction along the page axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward higher indices (content moves left).
    Next,
    /// Toward lower indices (content moves right).
    Previous,
}

impl Direction {
    /// Returns the direction matching the sign of a drag distance, where a
    /// positive distance means dragging toward the next page.
    pub fn from_distance(distance: f32) -> Option<Self> {
        if distance > 0.0 {
            Some(Direction::Next)
        } else if distance < 0.0 {
            Some(Direction::Previous)
        } else {
            None
        }
    }
}

/// Emitted once per committed navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexChange {
    pub previous_index: usize,
    pub new_index: usize,
}

/// Page index with the range invariant `0 <= current < item_count`.
///
/// An empty state (`item_count == 0`) reports index 0 and treats every
/// command as a no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexState {
    item_count: usize,
    current: usize,
    circular: bool,
}

impl IndexState {
    /// Creates a non-circular state positioned on the first page.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            current: 0,
            circular: false,
        }
    }

    /// Creates a state with the given wrap behaviour.
    pub fn with_circular(item_count: usize, circular: bool) -> Self {
        Self {
            item_count,
            current: 0,
            circular,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Switches between clamping and wrapping next/previous behaviour.
    pub fn set_circular(&mut self, circular: bool) {
        self.circular = circular;
    }

    pub fn last_index(&self) -> Option<usize> {
        self.item_count.checked_sub(1)
    }

    pub fn can_go_next(&self) -> bool {
        match self.last_index() {
            None => false,
            Some(_) if self.circular => true,
            Some(last) => self.current < last,
        }
    }

    pub fn can_go_previous(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.circular || self.current > 0
    }

    /// Whether a step in `direction` would move to another page.
    pub fn can_go(&self, direction: Direction) -> bool {
        match direction {
            Direction::Next => self.can_go_next(),
            Direction::Previous => self.can_go_previous(),
        }
    }

    /// Clamps `target` into range and stores it. Returns the stored index and
    /// the change, if any.
    ///
    /// Clamping applies in circular mode as well; only the single-step
    /// commands wrap.
    pub fn set_index(&mut self, target: isize) -> (usize, Option<IndexChange>) {
        let Some(last) = self.last_index() else {
            return (0, None);
        };
        let clamped = if target <= 0 {
            0
        } else {
            (target as usize).min(last)
        };
        let change = self.store(clamped);
        (self.current, change)
    }

    /// Advances one page, wrapping to 0 in circular mode.
    pub fn next(&mut self) -> (usize, Option<IndexChange>) {
        self.step(Direction::Next)
    }

    /// Retreats one page, wrapping to the last page in circular mode.
    pub fn previous(&mut self) -> (usize, Option<IndexChange>) {
        self.step(Direction::Previous)
    }

    /// Single step in `direction` with the configured wrap behaviour.
    pub fn step(&mut self, direction: Direction) -> (usize, Option<IndexChange>) {
        let Some(last) = self.last_index() else {
            return (0, None);
        };
        let target = match direction {
            Direction::Next if self.current < last => self.current + 1,
            Direction::Next if self.circular => 0,
            Direction::Previous if self.current > 0 => self.current - 1,
            Direction::Previous if self.circular => last,
            _ => self.current,
        };
        let change = self.store(target);
        (self.current, change)
    }

    fn store(&mut self, index: usize) -> Option<IndexChange> {
        debug_assert!(index < self.item_count.max(1));
        if index == self.current {
            return None;
        }
        let previous_index = std::mem::replace(&mut self.current, index);
        log::debug!("carousel index {} -> {}", previous_index, index);
        Some(IndexChange {
            previous_index,
            new_index: index,
        })
    }
}

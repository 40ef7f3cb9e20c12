//! Pointer input types delivered by the host to a carousel.
//!
//! Positions are in logical pixels along the page axis plus the cross axis.
//! Timestamps are host milliseconds; only differences between them matter.

use std::ops::{BitOr, BitOrAssign};

/// Identifies one pointer (mouse, a single touch, a pen).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

impl PointerId {
    /// The mouse, or the first touch on touch screens.
    pub const PRIMARY: PointerId = PointerId(0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    const fn mask(self) -> u8 {
        match self {
            PointerButton::Primary => 0b001,
            PointerButton::Secondary => 0b010,
            PointerButton::Middle => 0b100,
        }
    }
}

/// Set of pressed buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: PointerButtons = PointerButtons(0);
    pub const PRIMARY: PointerButtons = PointerButtons(PointerButton::Primary.mask());

    pub fn contains(self, button: PointerButton) -> bool {
        self.0 & button.mask() != 0
    }

    pub fn insert(&mut self, button: PointerButton) {
        self.0 |= button.mask();
    }

    pub fn remove(&mut self, button: PointerButton) {
        self.0 &= !button.mask();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<PointerButton> for PointerButtons {
    fn from(button: PointerButton) -> Self {
        PointerButtons(button.mask())
    }
}

impl BitOr for PointerButtons {
    type Output = PointerButtons;

    fn bitor(self, rhs: Self) -> Self::Output {
        PointerButtons(self.0 | rhs.0)
    }
}

impl BitOrAssign for PointerButtons {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
    pub buttons: PointerButtons,
}

impl PointerEvent {
    fn primary(kind: PointerEventKind, x: f32, time_ms: u64, buttons: PointerButtons) -> Self {
        Self {
            id: PointerId::PRIMARY,
            kind,
            x,
            y: 0.0,
            time_ms,
            buttons,
        }
    }

    /// Primary-button press at `x`.
    pub fn down(x: f32, time_ms: u64) -> Self {
        Self::primary(PointerEventKind::Down, x, time_ms, PointerButtons::PRIMARY)
    }

    /// Move with the primary button held.
    pub fn moved(x: f32, time_ms: u64) -> Self {
        Self::primary(PointerEventKind::Move, x, time_ms, PointerButtons::PRIMARY)
    }

    pub fn up(x: f32, time_ms: u64) -> Self {
        Self::primary(PointerEventKind::Up, x, time_ms, PointerButtons::NONE)
    }

    pub fn cancel(x: f32, time_ms: u64) -> Self {
        Self::primary(PointerEventKind::Cancel, x, time_ms, PointerButtons::NONE)
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_insert_remove() {
        let mut buttons = PointerButtons::NONE;
        assert!(buttons.is_empty());
        buttons.insert(PointerButton::Secondary);
        buttons |= PointerButtons::PRIMARY;
        assert!(buttons.contains(PointerButton::Primary));
        assert!(buttons.contains(PointerButton::Secondary));
        assert!(!buttons.contains(PointerButton::Middle));
        buttons.remove(PointerButton::Primary);
        assert!(!buttons.contains(PointerButton::Primary));
    }

    #[test]
    fn constructors_set_primary_state() {
        let down = PointerEvent::down(10.0, 5);
        assert_eq!(down.id, PointerId::PRIMARY);
        assert!(down.buttons.contains(PointerButton::Primary));
        let up = PointerEvent::up(10.0, 6);
        assert!(up.buttons.is_empty());
        let touch = PointerEvent::moved(1.0, 7).with_id(PointerId(3)).with_y(4.0);
        assert_eq!(touch.id, PointerId(3));
        assert_eq!(touch.y, 4.0);
    }
}

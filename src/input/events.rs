//! Pointer event types consumed by the interaction engine.
//!
//! Positions arrive already normalized to the raster pixel grid of the
//! displayed page; the embedding layer is responsible for subtracting its
//! own offsets and dividing out the display zoom.

use crate::geometry::Point;

/// Keyboard modifiers captured with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    /// Cmd on macOS, Win key elsewhere.
    pub platform: bool,
}

impl Modifiers {
    /// Whether this event extends a selection instead of replacing it.
    pub fn additive(self) -> bool {
        self.shift || self.control || self.platform
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDownEvent {
    pub position: Point,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMoveEvent {
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerUpEvent {
    pub position: Point,
    pub modifiers: Modifiers,
}

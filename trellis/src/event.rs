//! Abstract input event shapes consumed by the engine.
//!
//! The host's windowing layer translates its native events into these before
//! handing them to [`Engine::handle_event`](crate::engine::Engine::handle_event).
//! Per frame the host delivers zero-or-one close signal, zero-or-more pointer
//! moves (only the latest matters), zero-or-one pointer down, zero-or-one
//! pointer up, zero-or-one wheel event, and viewport resizes.

use crate::primitives::{Point, Size};

/// Pointer button identifier, matching the two style callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// A wheel event's magnitude on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDelta {
    pub horizontal: f32,
    pub vertical: f32,
}

impl ScrollDelta {
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self { horizontal, vertical }
    }
}

/// One event from the host's event source.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Pointer moved to a new position.
    PointerMoved { position: Point },

    /// Pointer button pressed.
    PointerDown {
        button: PointerButton,
        position: Point,
    },

    /// Pointer button released.
    PointerUp {
        button: PointerButton,
        position: Point,
    },

    /// Wheel scrolled at a position.
    Wheel {
        delta: ScrollDelta,
        position: Point,
    },

    /// The viewport was resized.
    Resized { size: Size },

    /// The host asked to close.
    CloseRequested,
}

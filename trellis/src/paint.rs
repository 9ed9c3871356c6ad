//! Frame paint output.
//!
//! Painting emits an ordered batch of fill commands rather than drawing
//! directly; the host renderer replays the batch with whatever graphics API
//! it wraps. Order within the batch is z-order, back to front.

use crate::primitives::{Color, Rect};

/// One filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintCommand {
    pub rect: Rect,
    pub color: Color,
}

/// An ordered list of paint commands for one frame.
#[derive(Debug, Default)]
pub struct PaintBatch {
    commands: Vec<PaintCommand>,
}

impl PaintBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filled rectangle.
    #[inline]
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(PaintCommand { rect, color });
    }

    /// Commands in z-order, back to front.
    pub fn iter(&self) -> impl Iterator<Item = &PaintCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all commands, keeping the allocation for the next frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

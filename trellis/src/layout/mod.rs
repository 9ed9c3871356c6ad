//! Layout behaviors for containers.
//!
//! The layout system is composed from small independent behaviors rather
//! than an inheritance chain: [`linear`] implements the one-axis flow
//! algorithm shared by rows and columns, [`scroll`] layers an offset and
//! viewport culling on top of it, and [`overlay`] provides free positioning
//! for floating panels. An element kind combines whichever behaviors it
//! needs.

pub mod linear;
pub mod overlay;
pub mod scroll;

use crate::primitives::{Rect, Size};
use crate::style::{Align, SizeMode, Style};

/// The flow direction of a linear container.
///
/// All layout math is written against a major axis (the flow direction) and
/// a minor axis (perpendicular); `Axis` maps those back to x/y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A row: major axis is x.
    Horizontal,
    /// A column: major axis is y.
    Vertical,
}

impl Axis {
    /// Major-axis extent of a size.
    #[inline]
    pub fn major(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Minor-axis extent of a size.
    #[inline]
    pub fn minor(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    /// Leading edge of a rect on the major axis.
    #[inline]
    pub fn major_start(self, rect: Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.x,
            Axis::Vertical => rect.y,
        }
    }

    /// Trailing edge of a rect on the major axis.
    #[inline]
    pub fn major_end(self, rect: Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.right(),
            Axis::Vertical => rect.bottom(),
        }
    }

    /// Leading edge of a rect on the minor axis.
    #[inline]
    pub fn minor_start(self, rect: Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.y,
            Axis::Vertical => rect.x,
        }
    }

    /// Major-axis length of a rect.
    #[inline]
    pub fn major_len(self, rect: Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.width,
            Axis::Vertical => rect.height,
        }
    }

    /// Minor-axis length of a rect.
    #[inline]
    pub fn minor_len(self, rect: Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.height,
            Axis::Vertical => rect.width,
        }
    }

    /// Build a rect from major/minor coordinates.
    #[inline]
    pub fn rect(self, major_pos: f32, minor_pos: f32, major_len: f32, minor_len: f32) -> Rect {
        match self {
            Axis::Horizontal => Rect::new(major_pos, minor_pos, major_len, minor_len),
            Axis::Vertical => Rect::new(minor_pos, major_pos, minor_len, major_len),
        }
    }

    /// Translate a rect along the major axis.
    #[inline]
    pub fn shift(self, rect: Rect, offset: f32) -> Rect {
        match self {
            Axis::Horizontal => rect.translate(offset, 0.0),
            Axis::Vertical => rect.translate(0.0, offset),
        }
    }

    /// The style sizing mode governing the major axis.
    #[inline]
    pub fn major_mode(self, style: &Style) -> SizeMode {
        match self {
            Axis::Horizontal => style.width,
            Axis::Vertical => style.height,
        }
    }

    /// The style sizing mode governing the minor axis.
    #[inline]
    pub fn minor_mode(self, style: &Style) -> SizeMode {
        match self {
            Axis::Horizontal => style.height,
            Axis::Vertical => style.width,
        }
    }

    /// The alignment flag selecting the center bucket on the major axis.
    #[inline]
    pub fn center_flag(self) -> Align {
        match self {
            Axis::Horizontal => Align::CENTER_X,
            Axis::Vertical => Align::CENTER_Y,
        }
    }

    /// The alignment flag selecting the end bucket on the major axis.
    #[inline]
    pub fn end_flag(self) -> Align {
        match self {
            Axis::Horizontal => Align::RIGHT,
            Axis::Vertical => Align::BOTTOM,
        }
    }

    /// The alignment flag that centers an element on the cross axis.
    #[inline]
    pub fn cross_center_flag(self) -> Align {
        match self {
            Axis::Horizontal => Align::CENTER_Y,
            Axis::Vertical => Align::CENTER_X,
        }
    }

    /// The alignment flag that pushes an element to the far cross edge.
    #[inline]
    pub fn cross_far_flag(self) -> Align {
        match self {
            Axis::Horizontal => Align::BOTTOM,
            Axis::Vertical => Align::RIGHT,
        }
    }
}

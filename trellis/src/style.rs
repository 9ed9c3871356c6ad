//! Style descriptor attached to every element.
//!
//! A `Style` is a per-frame-immutable configuration value: sizing modes,
//! alignment flags, visibility, paint priority, optional click callbacks,
//! and a fill color. Cloning a style clones its `Rc` callbacks, so two
//! elements built from the same descriptor explicitly share handlers.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use crate::event::PointerButton;
use crate::primitives::Color;

/// Sizing mode for one axis.
///
/// `Percent` resolves against the parent extent on that axis; `Fixed` is an
/// absolute size and always wins over the parent extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeMode {
    /// Fraction of the parent extent, in `0..=1`.
    Percent(f32),
    /// Absolute size in layout units.
    Fixed(f32),
}

impl Default for SizeMode {
    fn default() -> Self {
        SizeMode::Percent(1.0)
    }
}

impl SizeMode {
    /// Resolve this mode against a parent extent.
    #[inline]
    pub fn resolve(&self, parent: f32) -> f32 {
        match self {
            SizeMode::Percent(p) => p * parent,
            SizeMode::Fixed(px) => *px,
        }
    }

    /// The percentage weight this mode contributes to flex distribution.
    #[inline]
    pub fn weight(&self) -> f32 {
        match self {
            SizeMode::Percent(p) => *p,
            SizeMode::Fixed(_) => 0.0,
        }
    }

    /// The fixed extent this mode contributes, if any.
    #[inline]
    pub fn fixed(&self) -> Option<f32> {
        match self {
            SizeMode::Fixed(px) if *px != 0.0 => Some(*px),
            _ => None,
        }
    }
}

bitflags! {
    /// Alignment flags for placement inside a parent container.
    ///
    /// Only the axis-relevant flags matter to a given container: a row reads
    /// `LEFT`/`CENTER_X`/`RIGHT` for main-axis bucket assignment and the
    /// vertical flags for cross-axis placement; a column is the mirror.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Align: u8 {
        const TOP = 1;
        const BOTTOM = 2;
        const LEFT = 4;
        const RIGHT = 8;
        const CENTER_X = 16;
        const CENTER_Y = 32;
    }
}

/// Paint ordering for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintPriority {
    /// Painted in tree order.
    #[default]
    Normal,
    /// Painted after every normal sibling; globally registered high-priority
    /// elements paint after the whole page.
    High,
}

/// A zero-argument click handler.
pub type Callback = Rc<dyn Fn()>;

/// Immutable-per-frame visual/behavioral configuration for an element.
#[derive(Clone, Default)]
pub struct Style {
    /// Sizing mode for the horizontal axis.
    pub width: SizeMode,
    /// Sizing mode for the vertical axis.
    pub height: SizeMode,
    /// Alignment flags consumed by the parent container.
    pub align: Align,
    /// Invisible elements are skipped in sizing, positioning, painting,
    /// and hit-testing.
    pub visible: bool,
    /// Paint ordering relative to siblings.
    pub priority: PaintPriority,
    /// Fired on a primary-button press inside the element's rectangle.
    pub on_primary: Option<Callback>,
    /// Fired on a secondary-button press inside the element's rectangle.
    pub on_secondary: Option<Callback>,
    /// Fill color used when the element paints.
    pub fill: Color,
}

impl Style {
    /// Create a visible style with default sizing (fill the parent).
    pub fn new() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    /// Set the horizontal sizing mode.
    pub fn width(mut self, width: SizeMode) -> Self {
        self.width = width;
        self
    }

    /// Set the vertical sizing mode.
    pub fn height(mut self, height: SizeMode) -> Self {
        self.height = height;
        self
    }

    /// Fix both axes to absolute sizes.
    pub fn fixed(mut self, width: f32, height: f32) -> Self {
        self.width = SizeMode::Fixed(width);
        self.height = SizeMode::Fixed(height);
        self
    }

    /// Set alignment flags.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Mark the element invisible.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Set paint priority.
    pub fn priority(mut self, priority: PaintPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Attach a primary-button click handler.
    pub fn on_primary(mut self, f: impl Fn() + 'static) -> Self {
        self.on_primary = Some(Rc::new(f));
        self
    }

    /// Attach a secondary-button click handler.
    pub fn on_secondary(mut self, f: impl Fn() + 'static) -> Self {
        self.on_secondary = Some(Rc::new(f));
        self
    }

    /// Set the fill color.
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    /// The callback registered for the given button, if any.
    pub fn callback_for(&self, button: PointerButton) -> Option<&Callback> {
        match button {
            PointerButton::Primary => self.on_primary.as_ref(),
            PointerButton::Secondary => self.on_secondary.as_ref(),
        }
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("align", &self.align)
            .field("visible", &self.visible)
            .field("priority", &self.priority)
            .field("on_primary", &self.on_primary.is_some())
            .field("on_secondary", &self.on_secondary.is_some())
            .field("fill", &self.fill)
            .finish()
    }
}

//! The base visual node and its per-kind behavior dispatch.
//!
//! Every element carries a rectangle, a previous-frame rectangle for change
//! detection, a style descriptor, and a closed [`ElementKind`] describing its
//! behavior. The five element operations — measure-and-place, paint,
//! hit-test, hover, and scroll — dispatch on the kind through a single match.

use tracing::warn;

use crate::arena::{Arena, ElementId};
use crate::event::{PointerButton, ScrollDelta};
use crate::layout::{self, Axis};
use crate::paint::PaintBatch;
use crate::primitives::{Point, Rect, Size};
use crate::style::{PaintPriority, Style};

/// Discriminant used to key the per-kind name registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTag {
    Block,
    Row,
    Column,
    ScrollRow,
    ScrollColumn,
    Overlay,
    TextInput,
}

/// Behavior and per-kind state of an element.
#[derive(Debug)]
pub enum ElementKind {
    /// A plain leaf rectangle.
    Block,
    /// A linear container flowing children along one axis.
    Linear {
        axis: Axis,
        children: Vec<ElementId>,
    },
    /// A linear container with a scroll offset along its major axis.
    ScrollLinear {
        axis: Axis,
        children: Vec<ElementId>,
        offset: f32,
        scroll_speed: f32,
        locked: bool,
    },
    /// A free-positioned container for floating panels. Exempt from
    /// parent-driven placement; its position is set externally.
    Overlay {
        axis: Axis,
        children: Vec<ElementId>,
    },
    /// A focusable text-input leaf.
    TextInput { active: bool },
}

impl ElementKind {
    /// Registry tag for this kind.
    pub fn tag(&self) -> ElementTag {
        match self {
            ElementKind::Block => ElementTag::Block,
            ElementKind::Linear { axis: Axis::Horizontal, .. } => ElementTag::Row,
            ElementKind::Linear { axis: Axis::Vertical, .. } => ElementTag::Column,
            ElementKind::ScrollLinear { axis: Axis::Horizontal, .. } => ElementTag::ScrollRow,
            ElementKind::ScrollLinear { axis: Axis::Vertical, .. } => ElementTag::ScrollColumn,
            ElementKind::Overlay { .. } => ElementTag::Overlay,
            ElementKind::TextInput { .. } => ElementTag::TextInput,
        }
    }

    /// Child handle list, if this kind is a container.
    pub fn children(&self) -> Option<&Vec<ElementId>> {
        match self {
            ElementKind::Linear { children, .. }
            | ElementKind::ScrollLinear { children, .. }
            | ElementKind::Overlay { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Mutable child handle list, if this kind is a container.
    pub fn children_mut(&mut self) -> Option<&mut Vec<ElementId>> {
        match self {
            ElementKind::Linear { children, .. }
            | ElementKind::ScrollLinear { children, .. }
            | ElementKind::Overlay { children, .. } => Some(children),
            _ => None,
        }
    }
}

/// A single visual node in the retained tree.
#[derive(Debug)]
pub struct Element {
    /// Optional name for registry lookup.
    pub(crate) name: Option<String>,
    /// Current rectangle. Written only by the element's own placement step
    /// or by a scrollable parent applying its offset afterwards.
    pub rect: Rect,
    /// Rectangle snapshot from the last frame it changed.
    pub(crate) prev_rect: Rect,
    /// True when the rectangle changed since the last compare.
    pub(crate) dirty: bool,
    /// Marked for reclamation on the next arena sweep.
    pub(crate) removed: bool,
    /// Cleared by a scrollable parent when fully outside its viewport.
    pub should_paint: bool,
    /// Updated by the per-frame hover pass.
    pub hovered: bool,
    /// Style descriptor.
    pub style: Style,
    /// Per-kind behavior and state.
    pub kind: ElementKind,
}

impl Element {
    /// Create a new element of the given kind.
    pub fn new(kind: ElementKind, style: Style) -> Self {
        Self {
            name: None,
            rect: Rect::ZERO,
            prev_rect: Rect::ZERO,
            dirty: false,
            removed: false,
            should_paint: true,
            hovered: false,
            style,
            kind,
        }
    }

    /// Give the element a registry name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The element's registry name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Registry tag for this element's kind.
    pub fn tag(&self) -> ElementTag {
        self.kind.tag()
    }

    /// Whether the rectangle changed since the last cached comparison.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Resolve this element's size from its style against a parent size.
    pub fn resolve_size(&self, parent: Size) -> Size {
        Size::new(
            self.style.width.resolve(parent.width),
            self.style.height.resolve(parent.height),
        )
    }

    /// Adopt a freshly computed rectangle: recompute the dirty flag against
    /// the previous-frame rectangle and snapshot it only when it changed.
    pub(crate) fn commit_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.dirty = rect != self.prev_rect;
        if self.dirty {
            self.prev_rect = rect;
        }
        self.should_paint = true;
    }
}

// =========================================================================
// Per-kind dispatch
// =========================================================================

/// Measure the element against a parent rectangle and place it, recursing
/// into children for container kinds.
pub fn measure_and_place(arena: &mut Arena, id: ElementId, parent: Rect) {
    let Some(el) = arena.get(id) else {
        warn!(?id, "measure_and_place on missing element");
        return;
    };
    if !el.style.visible {
        return;
    }

    let size = el.resolve_size(parent.size());
    // Overlays keep their externally-set position; everything else is placed
    // at the parent origin.
    let origin = match el.kind {
        ElementKind::Overlay { .. } => el.rect.origin(),
        _ => parent.origin(),
    };
    let rect = Rect::from_origin_size(origin, size);

    let Some(el) = arena.get_mut(id) else { return };
    el.commit_rect(rect);

    match &el.kind {
        ElementKind::Block | ElementKind::TextInput { .. } => {}
        ElementKind::Linear { axis, children } | ElementKind::Overlay { axis, children } => {
            let (axis, children) = (*axis, children.clone());
            layout::linear::layout(arena, &children, rect, axis);
        }
        ElementKind::ScrollLinear { axis, .. } => {
            let axis = *axis;
            layout::scroll::layout(arena, id, rect, axis);
        }
    }
}

/// Paint the element and its children into a batch.
///
/// Within a container, normal-priority children paint before high-priority
/// ones, so high-priority siblings always end up on top.
pub fn paint(arena: &Arena, id: ElementId, batch: &mut PaintBatch) {
    let Some(el) = arena.get(id) else { return };
    if !el.style.visible || !el.should_paint {
        return;
    }
    batch.fill_rect(el.rect, el.style.fill);

    let Some(children) = el.kind.children() else { return };
    for pass in [PaintPriority::Normal, PaintPriority::High] {
        for &child in children {
            if let Some(c) = arena.get(child) {
                if c.style.priority == pass {
                    paint(arena, child, batch);
                }
            }
        }
    }
}

/// Hit-test a pointer-down against the element tree.
///
/// Returns `true` the first time a matching callback fires, a text input
/// takes focus, or a registered overlay trigger opens its panel. Containers
/// try their children first and fall back to their own claim only if no
/// child took the event. Overlay containers test children unconditionally,
/// since a floating panel's children may extend past the panel rectangle.
pub fn hit_test(
    arena: &mut Arena,
    id: ElementId,
    point: Point,
    button: PointerButton,
    focus: &mut crate::focus::FocusState,
) -> bool {
    let Some(el) = arena.get(id) else { return false };
    if !el.style.visible {
        return false;
    }
    let rect = el.rect;

    match &el.kind {
        ElementKind::Block => {
            if !rect.contains(point) {
                return false;
            }
            claim(arena, id, button, focus)
        }
        ElementKind::TextInput { .. } => {
            if !rect.contains(point) {
                return false;
            }
            let fired = fire_callback(arena, id, button);
            if button == PointerButton::Primary {
                focus.activate_input(arena, id);
                return true;
            }
            fired
        }
        ElementKind::Linear { children, .. } | ElementKind::ScrollLinear { children, .. } => {
            if !rect.contains(point) {
                return false;
            }
            let children = children.clone();
            for child in children {
                if hit_test(arena, child, point, button, focus) {
                    return true;
                }
            }
            claim(arena, id, button, focus)
        }
        ElementKind::Overlay { children, .. } => {
            let children = children.clone();
            for child in children {
                if hit_test(arena, child, point, button, focus) {
                    return true;
                }
            }
            rect.contains(point) && fire_callback(arena, id, button)
        }
    }
}

/// Let an element whose rectangle contains the pointer claim the click:
/// its button callback fires, and if it is a registered overlay trigger, a
/// primary press opens its panel anchored underneath.
fn claim(
    arena: &mut Arena,
    id: ElementId,
    button: PointerButton,
    focus: &mut crate::focus::FocusState,
) -> bool {
    let fired = fire_callback(arena, id, button);
    if button == PointerButton::Primary {
        if let Some(widget) = focus.widget_for_trigger(id) {
            layout::overlay::anchor_below(arena, widget.panel, widget.trigger);
            focus.open_overlay(arena, widget.panel);
            return true;
        }
    }
    fired
}

/// Update hover state for the element subtree.
pub fn update_hover(arena: &mut Arena, id: ElementId, point: Point) {
    let Some(el) = arena.get_mut(id) else { return };
    if !el.style.visible {
        el.hovered = false;
        return;
    }
    el.hovered = el.rect.contains(point);
    if let Some(children) = el.kind.children() {
        for child in children.clone() {
            update_hover(arena, child, point);
        }
    }
}

/// Route a wheel event through the element subtree.
///
/// A scrollable row consumes the horizontal component and forwards the
/// vertical one to its children; a scrollable column is the mirror. Positive
/// delta increases the offset on either axis; callers tune `scroll_speed`
/// for the visual direction they want.
pub fn handle_scroll(arena: &mut Arena, id: ElementId, point: Point, delta: ScrollDelta) {
    let Some(el) = arena.get(id) else { return };
    if !el.style.visible {
        return;
    }
    let rect = el.rect;

    match &el.kind {
        ElementKind::ScrollLinear {
            axis,
            children,
            scroll_speed,
            locked,
            ..
        } => {
            if *locked || !rect.contains(point) {
                return;
            }
            let (consumed, forwarded) = match axis {
                Axis::Horizontal => (delta.horizontal, ScrollDelta::new(0.0, delta.vertical)),
                Axis::Vertical => (delta.vertical, ScrollDelta::new(delta.horizontal, 0.0)),
            };
            let speed = *scroll_speed;
            let children = children.clone();

            if consumed != 0.0 {
                if let Some(el) = arena.get_mut(id) {
                    if let ElementKind::ScrollLinear { offset, .. } = &mut el.kind {
                        *offset += consumed * speed;
                    }
                    el.dirty = true;
                }
            }
            for child in children {
                handle_scroll(arena, child, point, forwarded);
            }
        }
        ElementKind::Linear { children, .. } => {
            if !rect.contains(point) {
                return;
            }
            for child in children.clone() {
                handle_scroll(arena, child, point, delta);
            }
        }
        ElementKind::Overlay { children, .. } => {
            for child in children.clone() {
                handle_scroll(arena, child, point, delta);
            }
        }
        ElementKind::Block | ElementKind::TextInput { .. } => {}
    }
}

/// Fire the element's callback for the given button, if one is registered.
///
/// The callback is cloned out of the style before the call so it cannot
/// observe a borrowed arena.
fn fire_callback(arena: &Arena, id: ElementId, button: PointerButton) -> bool {
    let cb = arena
        .get(id)
        .and_then(|el| el.style.callback_for(button).cloned());
    match cb {
        Some(cb) => {
            cb();
            true
        }
        None => false,
    }
}

//! Free positioning for floating panels.
//!
//! Overlay containers are exempt from parent-driven placement: the
//! measure-and-place step keeps whatever origin was set here and only
//! resolves their size. Flow inside an overlay is ordinary linear layout.

use tracing::warn;

use crate::arena::{Arena, ElementId};
use crate::element::ElementKind;
use crate::primitives::Point;

/// Move an overlay to an absolute position.
pub fn set_position(arena: &mut Arena, id: ElementId, origin: Point) {
    let Some(el) = arena.get_mut(id) else {
        warn!(?id, "set_position on missing element");
        return;
    };
    if !matches!(el.kind, ElementKind::Overlay { .. }) {
        warn!(?id, kind = ?el.tag(), "set_position on non-overlay");
        return;
    }
    if el.rect.origin() != origin {
        el.rect.x = origin.x;
        el.rect.y = origin.y;
        el.dirty = true;
    }
}

/// Position an overlay directly below another element's rectangle.
pub fn anchor_below(arena: &mut Arena, id: ElementId, anchor: ElementId) {
    let Some(anchor_rect) = arena.get(anchor).map(|el| el.rect) else {
        warn!(?anchor, "anchor_below on missing anchor");
        return;
    };
    set_position(arena, id, Point::new(anchor_rect.x, anchor_rect.bottom()));
}

/// Make an overlay visible.
pub fn show(arena: &mut Arena, id: ElementId) {
    if let Some(el) = arena.get_mut(id) {
        if !el.style.visible {
            el.style.visible = true;
            el.dirty = true;
        }
    }
}

/// Hide an overlay.
pub fn hide(arena: &mut Arena, id: ElementId) {
    if let Some(el) = arena.get_mut(id) {
        if el.style.visible {
            el.style.visible = false;
            el.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element;
    use crate::primitives::Rect;
    use crate::style::Style;

    #[test]
    fn test_overlay_keeps_external_position() {
        let mut arena = Arena::new();
        let panel = arena.overlay(Style::new().fixed(120.0, 80.0));
        set_position(&mut arena, panel, Point::new(40.0, 60.0));
        element::measure_and_place(&mut arena, panel, Rect::new(0.0, 0.0, 800.0, 600.0));

        assert_eq!(arena.get(panel).unwrap().rect, Rect::new(40.0, 60.0, 120.0, 80.0));
    }

    #[test]
    fn test_anchor_below() {
        let mut arena = Arena::new();
        let trigger = arena.block(Style::new().fixed(50.0, 20.0));
        element::measure_and_place(&mut arena, trigger, Rect::new(10.0, 10.0, 800.0, 600.0));

        let panel = arena.overlay(Style::new().fixed(120.0, 80.0));
        anchor_below(&mut arena, panel, trigger);
        element::measure_and_place(&mut arena, panel, Rect::new(0.0, 0.0, 800.0, 600.0));

        assert_eq!(arena.get(panel).unwrap().rect.origin(), Point::new(10.0, 30.0));
    }

    #[test]
    fn test_set_position_on_non_overlay_is_noop() {
        let mut arena = Arena::new();
        let block = arena.block(Style::new().fixed(10.0, 10.0));
        set_position(&mut arena, block, Point::new(99.0, 99.0));
        assert_eq!(arena.get(block).unwrap().rect.origin(), Point::ORIGIN);
    }

    #[test]
    fn test_show_hide_toggle_dirty() {
        let mut arena = Arena::new();
        let panel = arena.overlay(Style::new().fixed(10.0, 10.0).hidden());
        show(&mut arena, panel);
        assert!(arena.get(panel).unwrap().style.visible);
        assert!(arena.get(panel).unwrap().is_dirty());

        hide(&mut arena, panel);
        assert!(!arena.get(panel).unwrap().style.visible);
    }
}

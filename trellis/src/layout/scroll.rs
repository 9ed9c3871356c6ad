//! Scroll offset and viewport culling for scrollable containers.
//!
//! A scrollable container lays its children out exactly like a plain linear
//! container, then shifts every child along the major axis by its stored
//! offset. The offset is corrected before it is applied so content can never
//! be scrolled fully out of reach: the last child's trailing edge stops at
//! the viewport's leading edge, and the first child can never detach from
//! it. Children whose shifted rectangle falls fully outside the container
//! are still measured but have their subtree marked unpaintable.

use crate::arena::{Arena, ElementId};
use crate::element;
use crate::layout::{Axis, linear};
use crate::primitives::Rect;

/// Lay out a scrollable container's children inside `bounds`.
pub fn layout(arena: &mut Arena, id: ElementId, bounds: Rect, axis: Axis) {
    let Some(el) = arena.get(id) else { return };
    let (children, mut offset) = match &el.kind {
        crate::element::ElementKind::ScrollLinear { children, offset, .. } => {
            (children.clone(), *offset)
        }
        _ => return,
    };

    // Unshifted flow first; the offset is applied afterwards.
    let placements = linear::layout(arena, &children, bounds, axis);
    if placements.is_empty() {
        return;
    }

    let lead = axis.major_start(bounds);
    let first_leading = placements
        .first()
        .and_then(|p| arena.get(p.id))
        .map(|el| axis.major_start(el.rect))
        .unwrap_or(lead);
    let last_trailing = placements
        .last()
        .and_then(|p| arena.get(p.id))
        .map(|el| axis.major_end(el.rect))
        .unwrap_or(lead);

    // Keep the last child's trailing edge from passing the leading edge,
    // then keep the first child from detaching from it.
    if last_trailing + offset <= lead {
        offset = lead - last_trailing;
    }
    if first_leading + offset > lead {
        offset = lead - first_leading;
    }

    if let Some(el) = arena.get_mut(id) {
        if let crate::element::ElementKind::ScrollLinear { offset: stored, .. } = &mut el.kind {
            *stored = offset;
        }
    }

    for p in &placements {
        let Some(shifted) = arena.get(p.id).map(|el| axis.shift(el.rect, offset)) else {
            continue;
        };
        if shifted.intersects(&bounds) {
            if offset != 0.0 {
                element::measure_and_place(arena, p.id, axis.shift(p.synthetic, offset));
            }
        } else {
            // Out of view: shift the rect without recursing, then cull.
            if let Some(el) = arena.get_mut(p.id) {
                el.commit_rect(shifted);
            }
            mark_subtree_unpainted(arena, p.id);
        }
    }
}

/// Clear `should_paint` for an element and all its descendants.
fn mark_subtree_unpainted(arena: &mut Arena, root: ElementId) {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(el) = arena.get_mut(id) else { continue };
        el.should_paint = false;
        if let Some(children) = el.kind.children() {
            stack.extend(children.iter().copied());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::style::{SizeMode, Style};

    fn set_offset(arena: &mut Arena, id: ElementId, value: f32) {
        if let Some(el) = arena.get_mut(id) {
            if let ElementKind::ScrollLinear { offset, .. } = &mut el.kind {
                *offset = value;
            }
        }
    }

    fn offset_of(arena: &Arena, id: ElementId) -> f32 {
        match &arena.get(id).unwrap().kind {
            ElementKind::ScrollLinear { offset, .. } => *offset,
            _ => panic!("not scrollable"),
        }
    }

    fn tall_column(arena: &mut Arena) -> (ElementId, Vec<ElementId>) {
        let col = arena.scroll_column(Style::new().fixed(200.0, 100.0), 1.0);
        let mut items = Vec::new();
        for _ in 0..3 {
            let item = arena.block(Style::new().height(SizeMode::Fixed(100.0)));
            arena.append(col, item);
            items.push(item);
        }
        (col, items)
    }

    #[test]
    fn test_offset_shifts_children() {
        let mut arena = Arena::new();
        let (col, items) = tall_column(&mut arena);
        set_offset(&mut arena, col, -50.0);
        element::measure_and_place(&mut arena, col, Rect::new(0.0, 0.0, 200.0, 100.0));

        assert_eq!(arena.get(items[0]).unwrap().rect.y, -50.0);
        assert_eq!(arena.get(items[1]).unwrap().rect.y, 50.0);
    }

    #[test]
    fn test_offset_clamped_at_start() {
        let mut arena = Arena::new();
        let (col, items) = tall_column(&mut arena);
        set_offset(&mut arena, col, 40.0);
        element::measure_and_place(&mut arena, col, Rect::new(0.0, 0.0, 200.0, 100.0));

        assert_eq!(offset_of(&arena, col), 0.0);
        assert_eq!(arena.get(items[0]).unwrap().rect.y, 0.0);
    }

    #[test]
    fn test_offset_corrected_at_end() {
        let mut arena = Arena::new();
        let (col, _) = tall_column(&mut arena);
        // Far past the end: the last child's bottom edge stops at the top.
        set_offset(&mut arena, col, -1000.0);
        element::measure_and_place(&mut arena, col, Rect::new(0.0, 0.0, 200.0, 100.0));

        assert_eq!(offset_of(&arena, col), -300.0);
    }

    #[test]
    fn test_out_of_view_children_are_culled() {
        let mut arena = Arena::new();
        let (col, items) = tall_column(&mut arena);
        element::measure_and_place(&mut arena, col, Rect::new(0.0, 0.0, 200.0, 100.0));

        assert!(arena.get(items[0]).unwrap().should_paint);
        assert!(!arena.get(items[1]).unwrap().should_paint);
        assert!(!arena.get(items[2]).unwrap().should_paint);
    }

    #[test]
    fn test_culled_children_still_measured() {
        let mut arena = Arena::new();
        let (col, items) = tall_column(&mut arena);
        element::measure_and_place(&mut arena, col, Rect::new(0.0, 0.0, 200.0, 100.0));

        let rect = arena.get(items[2]).unwrap().rect;
        assert_eq!(rect, Rect::new(0.0, 200.0, 200.0, 100.0));
    }

    #[test]
    fn test_scrolled_in_child_paints_again() {
        let mut arena = Arena::new();
        let (col, items) = tall_column(&mut arena);
        set_offset(&mut arena, col, -150.0);
        element::measure_and_place(&mut arena, col, Rect::new(0.0, 0.0, 200.0, 100.0));

        assert!(arena.get(items[1]).unwrap().should_paint);
        assert!(arena.get(items[2]).unwrap().should_paint);
        assert!(!arena.get(items[0]).unwrap().should_paint);
    }

    #[test]
    fn test_short_content_stays_pinned() {
        let mut arena = Arena::new();
        let col = arena.scroll_column(Style::new().fixed(200.0, 400.0), 1.0);
        let item = arena.block(Style::new().height(SizeMode::Fixed(100.0)));
        arena.append(col, item);
        set_offset(&mut arena, col, -60.0);
        element::measure_and_place(&mut arena, col, Rect::new(0.0, 0.0, 200.0, 400.0));

        // Content shorter than the viewport can still be nudged until its
        // trailing edge reaches the top, but never dragged downward.
        assert_eq!(arena.get(item).unwrap().rect.y, -60.0);
        set_offset(&mut arena, col, 25.0);
        element::measure_and_place(&mut arena, col, Rect::new(0.0, 0.0, 200.0, 400.0));
        assert_eq!(offset_of(&arena, col), 0.0);
    }
}

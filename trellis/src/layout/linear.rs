//! One-axis flow layout shared by rows and columns.
//!
//! Layout runs in two passes over the visible children. The first pass sums
//! fixed extents and percentage weights; the leftover major extent after
//! fixed children is distributed to percentage children in proportion to
//! their weights, normalized so the weights always spend exactly the
//! leftover. The second pass walks children in container order and advances
//! one of three placement cursors — start, center, end — chosen by each
//! child's alignment flags.
//!
//! Children are not placed directly: each gets a synthetic parent rectangle
//! positioned at its assigned slot, sized so the child's own style
//! resolution lands on the computed extent. Recursing through
//! [`measure_and_place`](crate::element::measure_and_place) this way keeps
//! sizing logic in one place and lets nested containers lay out against the
//! slot they were given.

use crate::arena::{Arena, ElementId};
use crate::element;
use crate::layout::Axis;
use crate::primitives::Rect;

/// A child together with the synthetic parent rectangle it was given.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub id: ElementId,
    pub synthetic: Rect,
}

/// Lay out `children` inside `bounds` along `axis`.
///
/// Invisible children are skipped entirely: they take no space and are not
/// placed. Returns the placements in container order so scrollable
/// containers can re-run individual children after applying their offset.
pub fn layout(arena: &mut Arena, children: &[ElementId], bounds: Rect, axis: Axis) -> Vec<Placement> {
    let major_len = axis.major_len(bounds);
    let minor_len = axis.minor_len(bounds);
    let lead = axis.major_start(bounds);
    let minor_lead = axis.minor_start(bounds);

    // Pass 1: accumulate fixed extents and percentage weights.
    let mut total_fixed = 0.0;
    let mut total_percent = 0.0;
    for &child in children {
        let Some(el) = arena.get(child) else { continue };
        if !el.style.visible {
            continue;
        }
        let mode = axis.major_mode(&el.style);
        match mode.fixed() {
            Some(px) => total_fixed += px,
            None => total_percent += mode.weight(),
        }
    }

    let remaining = major_len - total_fixed;
    let scale = if total_percent > 0.0 {
        1.0 / total_percent
    } else {
        1.0
    };
    // Every percentage child resolves against the same synthetic extent.
    let share = scale * remaining;

    // Bucket totals for the center and end cursors.
    let mut center_total = 0.0;
    let mut end_total = 0.0;
    for &child in children {
        let Some(el) = arena.get(child) else { continue };
        if !el.style.visible {
            continue;
        }
        let extent = child_extent(axis, el, share);
        if el.style.align.contains(axis.center_flag()) {
            center_total += extent;
        } else if el.style.align.contains(axis.end_flag()) {
            end_total += extent;
        }
    }

    let mut start_cursor = lead;
    let mut center_cursor = lead + (major_len - center_total) / 2.0;
    let mut end_cursor = lead + major_len - end_total;

    // Pass 2: place children in container order, advancing the cursor of
    // whichever bucket each child belongs to.
    let mut placements = Vec::with_capacity(children.len());
    for &child in children {
        let Some(el) = arena.get(child) else { continue };
        if !el.style.visible {
            continue;
        }
        let align = el.style.align;
        let extent = child_extent(axis, el, share);
        let child_minor = axis.minor_mode(&el.style).resolve(minor_len);

        let cursor = if align.contains(axis.center_flag()) {
            &mut center_cursor
        } else if align.contains(axis.end_flag()) {
            &mut end_cursor
        } else {
            &mut start_cursor
        };
        let major_pos = *cursor;
        *cursor += extent;

        let minor_pos = if align.contains(axis.cross_center_flag()) {
            minor_lead + (minor_len - child_minor) / 2.0
        } else if align.contains(axis.cross_far_flag()) {
            minor_lead + minor_len - child_minor
        } else {
            minor_lead
        };

        // The synthetic major extent makes the child's own percentage
        // resolve to `extent`; the minor extent stays the parent's so the
        // child's minor percentage resolves unchanged.
        let synthetic_major = match axis.major_mode(&el.style).fixed() {
            Some(px) => px,
            None => share,
        };
        let synthetic = axis.rect(major_pos, minor_pos, synthetic_major, minor_len);

        element::measure_and_place(arena, child, synthetic);
        placements.push(Placement { id: child, synthetic });
    }
    placements
}

#[inline]
fn child_extent(axis: Axis, el: &crate::element::Element, share: f32) -> f32 {
    let mode = axis.major_mode(&el.style);
    match mode.fixed() {
        Some(px) => px,
        None => mode.weight() * share,
    }
}

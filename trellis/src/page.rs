//! A page: the root containers shown together, plus dispatch routing.
//!
//! A page owns three id lists — ordinary roots, free-floating overlay
//! roots, and a high-priority dispatch list — and routes pointer events
//! through them in a fixed order: the open overlay first (a hit inside it
//! consumes the click, a miss closes it and falls through), then the
//! high-priority list in registration order, then the roots. Hover and
//! scroll are broadcast instead; they carry no exclusivity.

use tracing::trace;

use crate::arena::{Arena, ElementId};
use crate::element;
use crate::event::{PointerButton, ScrollDelta};
use crate::focus::FocusState;
use crate::primitives::Point;

/// One screenful of roots and its dispatch lists.
#[derive(Debug, Default)]
pub struct Page {
    roots: Vec<ElementId>,
    overlays: Vec<ElementId>,
    high_priority: Vec<ElementId>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root container. Roots are laid out and painted in add order.
    pub fn add_root(&mut self, id: ElementId) {
        self.roots.push(id);
    }

    /// Add a free-floating overlay root. Overlays lay out after the roots
    /// and paint on top of them.
    pub fn add_overlay(&mut self, id: ElementId) {
        self.overlays.push(id);
    }

    /// Give an element first claim on pointer events, ahead of the roots.
    pub fn register_high_priority(&mut self, id: ElementId) {
        self.high_priority.push(id);
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn overlays(&self) -> &[ElementId] {
        &self.overlays
    }

    /// Drop ids that were reclaimed by an arena sweep.
    pub fn prune(&mut self, dead: &[ElementId]) {
        if dead.is_empty() {
            return;
        }
        self.roots.retain(|id| !dead.contains(id));
        self.overlays.retain(|id| !dead.contains(id));
        self.high_priority.retain(|id| !dead.contains(id));
    }

    /// Tear the page down: remove every subtree, sweep the arena, and scrub
    /// focus registrations that pointed into it.
    pub fn clear(&mut self, arena: &mut Arena, focus: &mut FocusState) {
        for id in self.roots.drain(..).chain(self.overlays.drain(..)) {
            arena.remove_subtree(id);
        }
        self.high_priority.clear();
        let dead = arena.sweep();
        focus.prune(&dead);
    }

    /// Route a pointer-down through the page.
    ///
    /// Returns `true` if anything claimed the click. Whether or not it was
    /// claimed, a click that never reaches the active text input drops that
    /// input's focus, exactly once.
    pub fn dispatch_pointer(
        &self,
        arena: &mut Arena,
        focus: &mut FocusState,
        point: Point,
        button: PointerButton,
    ) -> bool {
        focus.begin_click();
        let handled = self.dispatch_pointer_inner(arena, focus, point, button);
        focus.finish_click(arena);
        if !handled {
            trace!(?point, ?button, "pointer-down unhandled");
        }
        handled
    }

    fn dispatch_pointer_inner(
        &self,
        arena: &mut Arena,
        focus: &mut FocusState,
        point: Point,
        button: PointerButton,
    ) -> bool {
        // Stage 1: the open overlay owns the pointer. A click inside the
        // panel dispatches into it; a click on its own trigger closes it;
        // anything else closes it and falls through.
        if let Some(panel) = focus.open_panel() {
            let panel_rect = arena.get(panel).map(|el| el.rect);
            if panel_rect.is_some_and(|r| r.contains(point)) {
                element::hit_test(arena, panel, point, button, focus);
                return true;
            }
            let trigger = focus
                .widgets()
                .iter()
                .find(|w| w.panel == panel)
                .map(|w| w.trigger);
            focus.close_overlay(arena);
            if let Some(trigger) = trigger {
                let on_trigger = arena
                    .get(trigger)
                    .is_some_and(|el| el.style.visible && el.rect.contains(point));
                if on_trigger {
                    return true;
                }
            }
        }

        // Stage 2: high-priority elements, in registration order. A
        // registered trigger claimed here (or in stage 3) opens its panel
        // as part of the hit-test itself.
        for &id in &self.high_priority {
            if element::hit_test(arena, id, point, button, focus) {
                return true;
            }
        }

        // Stage 3: the roots.
        for &id in &self.roots {
            if element::hit_test(arena, id, point, button, focus) {
                return true;
            }
        }
        false
    }

    /// Broadcast a wheel event to overlays and roots.
    pub fn dispatch_scroll(&self, arena: &mut Arena, point: Point, delta: ScrollDelta) {
        for &id in self.overlays.iter().chain(&self.roots) {
            element::handle_scroll(arena, id, point, delta);
        }
    }

    /// Broadcast the pointer position to refresh hover flags.
    pub fn dispatch_hover(&self, arena: &mut Arena, point: Point) {
        for &id in self.overlays.iter().chain(&self.roots) {
            element::update_hover(arena, id, point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::primitives::Rect;
    use crate::style::{SizeMode, Style};
    use std::cell::Cell;
    use std::rc::Rc;

    fn laid_out_page(arena: &mut Arena) -> (Page, ElementId) {
        let root = arena.column(Style::new().fixed(400.0, 300.0));
        let mut page = Page::new();
        page.add_root(root);
        element::measure_and_place(arena, root, Rect::new(0.0, 0.0, 400.0, 300.0));
        (page, root)
    }

    #[test]
    fn test_root_click_dispatch() {
        let hits = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&hits);

        let mut arena = Arena::new();
        let mut focus = FocusState::default();
        let (page, root) = laid_out_page(&mut arena);
        let button = arena.block(
            Style::new()
                .height(SizeMode::Fixed(40.0))
                .on_primary(move || counter.set(counter.get() + 1)),
        );
        arena.append(root, button);
        element::measure_and_place(&mut arena, root, Rect::new(0.0, 0.0, 400.0, 300.0));

        assert!(page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(10.0, 10.0),
            PointerButton::Primary
        ));
        assert_eq!(hits.get(), 1);

        // Outside every root: unhandled.
        assert!(!page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(900.0, 900.0),
            PointerButton::Primary
        ));
    }

    #[test]
    fn test_trigger_opens_overlay_and_click_away_closes() {
        let mut arena = Arena::new();
        let mut focus = FocusState::default();
        let (mut page, root) = laid_out_page(&mut arena);

        let trigger = arena.block(Style::new().fixed(60.0, 20.0));
        arena.append(root, trigger);
        let panel = arena.overlay(Style::new().fixed(120.0, 80.0).hidden());
        page.add_overlay(panel);
        focus.register_overlay(trigger, panel);
        element::measure_and_place(&mut arena, root, Rect::new(0.0, 0.0, 400.0, 300.0));

        assert!(page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(10.0, 10.0),
            PointerButton::Primary
        ));
        assert_eq!(focus.open_panel(), Some(panel));
        // Panel anchored under its trigger.
        assert_eq!(arena.get(panel).unwrap().rect.origin(), Point::new(0.0, 20.0));

        // A click far away closes the panel and falls through to the root.
        page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(390.0, 290.0),
            PointerButton::Primary,
        );
        assert_eq!(focus.open_panel(), None);
        assert!(!arena.get(panel).unwrap().style.visible);
    }

    #[test]
    fn test_open_panel_consumes_inside_clicks() {
        let hits = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&hits);

        let mut arena = Arena::new();
        let mut focus = FocusState::default();
        let (mut page, root) = laid_out_page(&mut arena);

        let trigger = arena.block(Style::new().fixed(60.0, 20.0));
        arena.append(root, trigger);
        let item = arena.block(
            Style::new()
                .height(SizeMode::Fixed(20.0))
                .on_primary(move || counter.set(counter.get() + 1)),
        );
        let panel = arena.overlay(Style::new().fixed(120.0, 80.0).hidden());
        arena.append(panel, item);
        page.add_overlay(panel);
        focus.register_overlay(trigger, panel);
        element::measure_and_place(&mut arena, root, Rect::new(0.0, 0.0, 400.0, 300.0));

        page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(10.0, 10.0),
            PointerButton::Primary,
        );
        element::measure_and_place(&mut arena, panel, Rect::new(0.0, 0.0, 400.0, 300.0));

        // Click the item inside the open panel (panel sits at 0,20).
        assert!(page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(10.0, 30.0),
            PointerButton::Primary
        ));
        assert_eq!(hits.get(), 1);
        assert_eq!(focus.open_panel(), Some(panel));
    }

    #[test]
    fn test_trigger_click_while_open_closes() {
        let mut arena = Arena::new();
        let mut focus = FocusState::default();
        let (mut page, root) = laid_out_page(&mut arena);

        let trigger = arena.block(Style::new().fixed(60.0, 20.0));
        arena.append(root, trigger);
        let panel = arena.overlay(Style::new().fixed(120.0, 80.0).hidden());
        page.add_overlay(panel);
        focus.register_overlay(trigger, panel);
        element::measure_and_place(&mut arena, root, Rect::new(0.0, 0.0, 400.0, 300.0));

        let on_trigger = Point::new(10.0, 10.0);
        page.dispatch_pointer(&mut arena, &mut focus, on_trigger, PointerButton::Primary);
        assert_eq!(focus.open_panel(), Some(panel));

        // Second click on the trigger toggles the panel shut and is consumed.
        assert!(page.dispatch_pointer(
            &mut arena,
            &mut focus,
            on_trigger,
            PointerButton::Primary
        ));
        assert_eq!(focus.open_panel(), None);
    }

    #[test]
    fn test_high_priority_wins_over_roots() {
        let root_hits = Rc::new(Cell::new(0u32));
        let top_hits = Rc::new(Cell::new(0u32));
        let r = Rc::clone(&root_hits);
        let t = Rc::clone(&top_hits);

        let mut arena = Arena::new();
        let mut focus = FocusState::default();
        let root = arena.column(
            Style::new()
                .fixed(400.0, 300.0)
                .on_primary(move || r.set(r.get() + 1)),
        );
        let top = arena.block(
            Style::new()
                .fixed(100.0, 100.0)
                .on_primary(move || t.set(t.get() + 1)),
        );
        let mut page = Page::new();
        page.add_root(root);
        page.add_root(top);
        page.register_high_priority(top);
        element::measure_and_place(&mut arena, root, Rect::new(0.0, 0.0, 400.0, 300.0));
        element::measure_and_place(&mut arena, top, Rect::new(0.0, 0.0, 400.0, 300.0));

        page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(10.0, 10.0),
            PointerButton::Primary,
        );
        assert_eq!(top_hits.get(), 1);
        assert_eq!(root_hits.get(), 0);
    }

    #[test]
    fn test_high_priority_covers_trigger() {
        let hits = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&hits);

        let mut arena = Arena::new();
        let mut focus = FocusState::default();
        let (mut page, root) = laid_out_page(&mut arena);

        let trigger = arena.block(Style::new().fixed(60.0, 20.0));
        arena.append(root, trigger);
        let panel = arena.overlay(Style::new().fixed(120.0, 80.0).hidden());
        page.add_overlay(panel);
        focus.register_overlay(trigger, panel);

        // A high-priority element sits on top of the trigger and must win
        // the click.
        let shield = arena.block(
            Style::new()
                .fixed(100.0, 100.0)
                .on_primary(move || counter.set(counter.get() + 1)),
        );
        page.add_root(shield);
        page.register_high_priority(shield);
        element::measure_and_place(&mut arena, root, Rect::new(0.0, 0.0, 400.0, 300.0));
        element::measure_and_place(&mut arena, shield, Rect::new(0.0, 0.0, 400.0, 300.0));

        assert!(page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(10.0, 10.0),
            PointerButton::Primary
        ));
        assert_eq!(hits.get(), 1);
        assert_eq!(focus.open_panel(), None);
    }

    #[test]
    fn test_secondary_click_does_not_open_overlay() {
        let mut arena = Arena::new();
        let mut focus = FocusState::default();
        let (mut page, root) = laid_out_page(&mut arena);

        let trigger = arena.block(Style::new().fixed(60.0, 20.0));
        arena.append(root, trigger);
        let panel = arena.overlay(Style::new().fixed(120.0, 80.0).hidden());
        page.add_overlay(panel);
        focus.register_overlay(trigger, panel);
        element::measure_and_place(&mut arena, root, Rect::new(0.0, 0.0, 400.0, 300.0));

        page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(10.0, 10.0),
            PointerButton::Secondary,
        );
        assert_eq!(focus.open_panel(), None);
        assert!(!arena.get(panel).unwrap().style.visible);
    }

    #[test]
    fn test_click_away_drops_input_focus() {
        let mut arena = Arena::new();
        let mut focus = FocusState::default();
        let (page, root) = laid_out_page(&mut arena);
        let input = arena.text_input(Style::new().height(SizeMode::Fixed(30.0)));
        arena.append(root, input);
        element::measure_and_place(&mut arena, root, Rect::new(0.0, 0.0, 400.0, 300.0));

        page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(10.0, 10.0),
            PointerButton::Primary,
        );
        assert_eq!(focus.active_input(), Some(input));

        page.dispatch_pointer(
            &mut arena,
            &mut focus,
            Point::new(10.0, 200.0),
            PointerButton::Primary,
        );
        assert_eq!(focus.active_input(), None);
        assert!(matches!(
            arena.get(input).unwrap().kind,
            ElementKind::TextInput { active: false }
        ));
    }

    #[test]
    fn test_clear_reclaims_and_prunes() {
        let mut arena = Arena::new();
        let mut focus = FocusState::default();
        let (mut page, root) = laid_out_page(&mut arena);
        let input = arena.text_input(Style::new());
        arena.append(root, input);
        focus.activate_input(&mut arena, input);

        page.clear(&mut arena, &mut focus);
        assert!(page.roots().is_empty());
        assert!(arena.get(root).is_none());
        assert!(arena.get(input).is_none());
        assert_eq!(focus.active_input(), None);
    }
}

//! Exclusive focus: one open overlay and one active text input at a time.
//!
//! Focus is a context value threaded through dispatch, not global state.
//! It holds the registry of overlay widgets (a trigger paired with the
//! floating panel it opens), the single open-panel slot, and the single
//! active-text-input slot. Opening or activating a new occupant closes or
//! deactivates the previous one as part of the same call; dispatch uses
//! [`FocusState::begin_click`]/[`FocusState::finish_click`] to deactivate a
//! clicked-away input exactly once per pointer-down.

use tracing::debug;

use crate::arena::{Arena, ElementId};
use crate::element::ElementKind;
use crate::layout::overlay;

/// A trigger element paired with the floating panel it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayWidget {
    pub trigger: ElementId,
    pub panel: ElementId,
}

/// Per-engine focus registries and slots.
#[derive(Debug, Default)]
pub struct FocusState {
    widgets: Vec<OverlayWidget>,
    open: Option<ElementId>,
    active_input: Option<ElementId>,
    /// The input activated by the pointer-down currently being dispatched.
    last_clicked: Option<ElementId>,
}

impl FocusState {
    /// Register an overlay widget. The panel should start hidden.
    pub fn register_overlay(&mut self, trigger: ElementId, panel: ElementId) {
        self.widgets.push(OverlayWidget { trigger, panel });
    }

    /// Registered overlay widgets, in registration order.
    pub fn widgets(&self) -> &[OverlayWidget] {
        &self.widgets
    }

    /// The widget whose trigger is `id`, if one was registered.
    pub fn widget_for_trigger(&self, id: ElementId) -> Option<OverlayWidget> {
        self.widgets.iter().copied().find(|w| w.trigger == id)
    }

    /// The currently open panel, if any.
    pub fn open_panel(&self) -> Option<ElementId> {
        self.open
    }

    /// The currently active text input, if any.
    pub fn active_input(&self) -> Option<ElementId> {
        self.active_input
    }

    /// Open a panel, closing whichever panel was open before.
    pub fn open_overlay(&mut self, arena: &mut Arena, panel: ElementId) {
        if self.open == Some(panel) {
            return;
        }
        self.close_overlay(arena);
        overlay::show(arena, panel);
        self.open = Some(panel);
        debug!(?panel, "overlay opened");
    }

    /// Close the open panel, if any.
    pub fn close_overlay(&mut self, arena: &mut Arena) {
        if let Some(panel) = self.open.take() {
            overlay::hide(arena, panel);
            debug!(?panel, "overlay closed");
        }
    }

    /// Activate a text input, deactivating whichever was active before.
    pub fn activate_input(&mut self, arena: &mut Arena, id: ElementId) {
        self.last_clicked = Some(id);
        if self.active_input == Some(id) {
            return;
        }
        self.deactivate_input(arena);
        set_input_active(arena, id, true);
        self.active_input = Some(id);
        debug!(?id, "text input activated");
    }

    /// Deactivate the active text input, if any.
    pub fn deactivate_input(&mut self, arena: &mut Arena) {
        if let Some(id) = self.active_input.take() {
            set_input_active(arena, id, false);
            debug!(?id, "text input deactivated");
        }
    }

    /// Start a pointer-down dispatch.
    pub fn begin_click(&mut self) {
        self.last_clicked = None;
    }

    /// Finish a pointer-down dispatch: if the click landed anywhere but the
    /// active input, that input loses focus.
    pub fn finish_click(&mut self, arena: &mut Arena) {
        if let Some(active) = self.active_input {
            if self.last_clicked != Some(active) {
                self.deactivate_input(arena);
            }
        }
        self.last_clicked = None;
    }

    /// Drop registrations and slots that refer to reclaimed elements.
    pub fn prune(&mut self, dead: &[ElementId]) {
        if dead.is_empty() {
            return;
        }
        self.widgets
            .retain(|w| !dead.contains(&w.trigger) && !dead.contains(&w.panel));
        if self.open.is_some_and(|p| dead.contains(&p)) {
            self.open = None;
        }
        if self.active_input.is_some_and(|i| dead.contains(&i)) {
            self.active_input = None;
        }
    }
}

fn set_input_active(arena: &mut Arena, id: ElementId, value: bool) {
    if let Some(el) = arena.get_mut(id) {
        if let ElementKind::TextInput { active } = &mut el.kind {
            *active = value;
            el.dirty = true;
        }
    }
}

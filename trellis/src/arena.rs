//! The owning store for every element's lifetime.
//!
//! Elements live in a generation-checked slot map; containers and pages hold
//! [`ElementId`] handles, never references, so a handle left behind after a
//! sweep simply resolves to `None` instead of dangling. A flat name registry
//! keyed by `(kind, name)` supports external lookup; a miss is reported and
//! answered with a shared default element so callers can chain safely.

use std::collections::{HashMap, HashSet};

use slotmap::{SlotMap, new_key_type};
use tracing::{debug, warn};

use crate::element::{Element, ElementKind, ElementTag};
use crate::error::EngineError;
use crate::layout::Axis;
use crate::style::Style;

new_key_type! {
    /// Stable, generation-checked handle to an arena element.
    pub struct ElementId;
}

/// Owns every element constructed for a running engine.
pub struct Arena {
    elements: SlotMap<ElementId, Element>,
    registry: HashMap<(ElementTag, String), ElementId>,
    default_id: ElementId,
}

impl Arena {
    /// Create an empty arena.
    ///
    /// A hidden default block is created up front; name lookups that miss
    /// resolve to it.
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let default_id = elements.insert(Element::new(ElementKind::Block, Style::new().hidden()));
        Self {
            elements,
            registry: HashMap::new(),
            default_id,
        }
    }

    /// Insert an element, registering its name if it has one.
    pub fn insert(&mut self, element: Element) -> ElementId {
        let key = element.name().map(|n| (element.tag(), n.to_owned()));
        let id = self.elements.insert(element);
        if let Some(key) = key {
            if let Some(old) = self.registry.insert(key.clone(), id) {
                warn!(kind = ?key.0, name = %key.1, ?old, "name re-registered, shadowing older element");
            }
        }
        id
    }

    /// Look up an element by handle.
    #[inline]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Look up an element mutably by handle.
    #[inline]
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Number of live elements (including the default instance).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over live elements.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter()
    }

    /// Iterate mutably over live elements.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ElementId, &mut Element)> {
        self.elements.iter_mut()
    }

    /// The shared default element returned by failed lookups.
    pub fn default_element(&self) -> ElementId {
        self.default_id
    }

    /// Look up a named element of a kind.
    ///
    /// A miss is non-fatal: it is logged and the shared default element is
    /// returned so chained calls stay harmless.
    pub fn lookup(&self, tag: ElementTag, name: &str) -> ElementId {
        match self.try_lookup(tag, name) {
            Ok(id) => id,
            Err(err) => {
                warn!(%err, "registry lookup failed, returning default element");
                self.default_id
            }
        }
    }

    /// Look up a named element of a kind, reporting a miss as an error.
    pub fn try_lookup(&self, tag: ElementTag, name: &str) -> Result<ElementId, EngineError> {
        self.registry
            .get(&(tag, name.to_owned()))
            .copied()
            .ok_or_else(|| EngineError::UnknownElement {
                kind: tag,
                name: name.to_owned(),
            })
    }

    /// Mark an element for reclamation on the next sweep.
    ///
    /// Callers must detach the handle from every container first; this is
    /// the second step of the two-step removal contract.
    pub fn mark_removed(&mut self, id: ElementId) {
        if let Some(el) = self.elements.get_mut(id) {
            el.removed = true;
        } else {
            warn!(?id, "mark_removed on missing element");
        }
    }

    /// Reclaim every marked element, scrub the name registry, and prune any
    /// child handle still pointing at a reclaimed element.
    ///
    /// Returns the reclaimed handles so callers can drop their own caches.
    pub fn sweep(&mut self) -> Vec<ElementId> {
        let dead: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, el)| el.removed)
            .map(|(id, _)| id)
            .collect();
        if dead.is_empty() {
            return dead;
        }

        for &id in &dead {
            if let Some(el) = self.elements.remove(id) {
                if let Some(name) = el.name {
                    self.registry.remove(&(el.kind.tag(), name));
                }
            }
        }

        let dead_set: HashSet<ElementId> = dead.iter().copied().collect();
        for (_, el) in self.elements.iter_mut() {
            if let Some(children) = el.kind.children_mut() {
                children.retain(|c| !dead_set.contains(c));
            }
        }

        debug!(count = dead.len(), "swept elements");
        dead
    }

    // =====================================================================
    // Factories
    // =====================================================================

    /// Construct a plain block leaf.
    pub fn block(&mut self, style: Style) -> ElementId {
        self.insert(Element::new(ElementKind::Block, style))
    }

    /// Construct a horizontal linear container.
    pub fn row(&mut self, style: Style) -> ElementId {
        self.insert(Element::new(
            ElementKind::Linear {
                axis: Axis::Horizontal,
                children: Vec::new(),
            },
            style,
        ))
    }

    /// Construct a vertical linear container.
    pub fn column(&mut self, style: Style) -> ElementId {
        self.insert(Element::new(
            ElementKind::Linear {
                axis: Axis::Vertical,
                children: Vec::new(),
            },
            style,
        ))
    }

    /// Construct a horizontally scrollable container.
    pub fn scroll_row(&mut self, style: Style, scroll_speed: f32) -> ElementId {
        self.insert(Element::new(
            ElementKind::ScrollLinear {
                axis: Axis::Horizontal,
                children: Vec::new(),
                offset: 0.0,
                scroll_speed,
                locked: false,
            },
            style,
        ))
    }

    /// Construct a vertically scrollable container.
    pub fn scroll_column(&mut self, style: Style, scroll_speed: f32) -> ElementId {
        self.insert(Element::new(
            ElementKind::ScrollLinear {
                axis: Axis::Vertical,
                children: Vec::new(),
                offset: 0.0,
                scroll_speed,
                locked: false,
            },
            style,
        ))
    }

    /// Construct a free-positioned overlay container (vertical flow).
    pub fn overlay(&mut self, style: Style) -> ElementId {
        self.insert(Element::new(
            ElementKind::Overlay {
                axis: Axis::Vertical,
                children: Vec::new(),
            },
            style,
        ))
    }

    /// Construct a focusable text-input leaf.
    pub fn text_input(&mut self, style: Style) -> ElementId {
        self.insert(Element::new(ElementKind::TextInput { active: false }, style))
    }

    /// Lock or unlock a scrollable container. A locked container ignores
    /// wheel input entirely; its offset stays where it is.
    pub fn set_locked(&mut self, id: ElementId, value: bool) {
        let Some(el) = self.get_mut(id) else {
            warn!(?id, "set_locked on missing element");
            return;
        };
        let tag = el.tag();
        match &mut el.kind {
            ElementKind::ScrollLinear { locked, .. } => *locked = value,
            _ => warn!(?id, kind = ?tag, "set_locked on non-scrollable"),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

//! Structural mutation of the element tree.
//!
//! All parent/child wiring goes through these arena methods so the
//! single-parent invariant holds: appending a child that already lives in
//! another container silently detaches it first. Misuse — wrong handle kind,
//! stale handle, out-of-range index — is logged and ignored rather than
//! panicking, since the tree is routinely mutated from UI callbacks.

use tracing::warn;

use crate::arena::{Arena, ElementId};

impl Arena {
    /// Append a child to a container, detaching it from any previous parent.
    pub fn append(&mut self, parent: ElementId, child: ElementId) {
        self.detach_everywhere(child);
        let Some(el) = self.get_mut(parent) else {
            warn!(?parent, "append to missing element");
            return;
        };
        let tag = el.tag();
        match el.kind.children_mut() {
            Some(children) => children.push(child),
            None => warn!(?parent, kind = ?tag, "append to non-container"),
        }
    }

    /// Insert a child at an index, detaching it from any previous parent.
    ///
    /// An out-of-range index appends instead.
    pub fn insert_at(&mut self, parent: ElementId, index: usize, child: ElementId) {
        self.detach_everywhere(child);
        let Some(el) = self.get_mut(parent) else {
            warn!(?parent, "insert into missing element");
            return;
        };
        let tag = el.tag();
        match el.kind.children_mut() {
            Some(children) => {
                let index = index.min(children.len());
                children.insert(index, child);
            }
            None => warn!(?parent, kind = ?tag, "insert into non-container"),
        }
    }

    /// Remove a child handle from a container without reclaiming the child.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) {
        let Some(el) = self.get_mut(parent) else {
            warn!(?parent, "remove_child on missing element");
            return;
        };
        let tag = el.tag();
        match el.kind.children_mut() {
            Some(children) => {
                let before = children.len();
                children.retain(|&c| c != child);
                if children.len() == before {
                    warn!(?parent, ?child, "remove_child: not a child of this container");
                }
            }
            None => warn!(?parent, kind = ?tag, "remove_child on non-container"),
        }
    }

    /// Swap two children of the same container by index.
    pub fn swap_children(&mut self, parent: ElementId, a: usize, b: usize) {
        let Some(el) = self.get_mut(parent) else {
            warn!(?parent, "swap_children on missing element");
            return;
        };
        let tag = el.tag();
        match el.kind.children_mut() {
            Some(children) => {
                if a < children.len() && b < children.len() {
                    children.swap(a, b);
                } else {
                    warn!(?parent, a, b, len = children.len(), "swap_children out of range");
                }
            }
            None => warn!(?parent, kind = ?tag, "swap_children on non-container"),
        }
    }

    /// Drop every child handle from a container without reclaiming them.
    pub fn clear_children(&mut self, parent: ElementId) {
        let Some(el) = self.get_mut(parent) else {
            warn!(?parent, "clear_children on missing element");
            return;
        };
        let tag = el.tag();
        match el.kind.children_mut() {
            Some(children) => children.clear(),
            None => warn!(?parent, kind = ?tag, "clear_children on non-container"),
        }
    }

    /// Remove a handle from every container that holds it.
    pub fn detach_everywhere(&mut self, child: ElementId) {
        for (_, el) in self.iter_mut() {
            if let Some(children) = el.kind.children_mut() {
                children.retain(|&c| c != child);
            }
        }
    }

    /// Detach an element and mark it and all its descendants for reclamation.
    ///
    /// The elements stay queryable until the next [`Arena::sweep`].
    pub fn remove_subtree(&mut self, root: ElementId) {
        self.detach_everywhere(root);
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(el) = self.get(id) else { continue };
            if let Some(children) = el.kind.children() {
                stack.extend(children.iter().copied());
            }
            self.mark_removed(id);
        }
    }
}

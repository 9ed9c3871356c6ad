//! The frame engine: event buffering, layout scheduling, and paint output.
//!
//! The engine owns the arena, the focus state, and a named set of pages,
//! one of which is active. Hosts push translated input events at any rate;
//! the engine buffers them last-wins and consumes the buffer once per
//! [`Engine::poll_and_update`] call. Layout only runs on frames where
//! something could have moved — a resize, a structural change, or a dirty
//! element — so an idle frame does no tree work and reports that nothing
//! needs repainting.

use indexmap::IndexMap;
use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::arena::{Arena, ElementId};
use crate::element;
use crate::error::EngineError;
use crate::event::{InputEvent, PointerButton, ScrollDelta};
use crate::focus::FocusState;
use crate::page::Page;
use crate::paint::PaintBatch;
use crate::primitives::{Point, Rect, Size};
use crate::style::Style;

/// Tunables for the frame loop.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Layout passes run per dirty frame. More than one pass lets offset
    /// corrections and callback-driven changes settle within the frame.
    pub convergence_passes: usize,
    /// Scroll speed given to containers built through the engine factories.
    pub default_scroll_speed: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            convergence_passes: 3,
            default_scroll_speed: 1.0,
        }
    }
}

/// Counters for frames processed since engine creation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub frames: u64,
    pub layout_frames: u64,
    pub skipped_frames: u64,
}

/// The retained-mode frame engine.
pub struct Engine {
    pub arena: Arena,
    pub focus: FocusState,
    pages: IndexMap<String, Page>,
    active: Option<String>,
    viewport: Size,
    cursor: Point,
    pressed: Option<PointerButton>,
    pending_click: Option<(PointerButton, Point)>,
    pending_release: Option<PointerButton>,
    pending_scroll: Option<(ScrollDelta, Point)>,
    resized: bool,
    close_requested: bool,
    rect_cache: SecondaryMap<ElementId, Rect>,
    laid_out: bool,
    repaint: bool,
    config: EngineConfig,
    stats: FrameStats,
}

impl Engine {
    /// Create an engine with the default configuration.
    pub fn new(viewport: Size) -> Self {
        Self::with_config(viewport, EngineConfig::default())
    }

    pub fn with_config(viewport: Size, config: EngineConfig) -> Self {
        Self {
            arena: Arena::new(),
            focus: FocusState::default(),
            pages: IndexMap::new(),
            active: None,
            viewport,
            cursor: Point::ORIGIN,
            pressed: None,
            pending_click: None,
            pending_release: None,
            pending_scroll: None,
            resized: true,
            close_requested: false,
            rect_cache: SecondaryMap::new(),
            laid_out: false,
            repaint: false,
            config,
            stats: FrameStats::default(),
        }
    }

    // =====================================================================
    // Pages
    // =====================================================================

    /// Create (or fetch) a page by name. The first page created becomes the
    /// active page.
    pub fn add_page(&mut self, name: impl Into<String>) -> &mut Page {
        let name = name.into();
        if self.active.is_none() {
            self.active = Some(name.clone());
        }
        self.pages.entry(name).or_default()
    }

    /// Fetch an existing page mutably.
    pub fn page_mut(&mut self, name: &str) -> Result<&mut Page, EngineError> {
        self.pages.get_mut(name).ok_or_else(|| EngineError::UnknownPage {
            name: name.to_owned(),
        })
    }

    /// Switch the active page. Open overlays and input focus are dropped;
    /// the next frame lays the new page out from scratch.
    pub fn set_active(&mut self, name: &str) -> Result<(), EngineError> {
        if !self.pages.contains_key(name) {
            return Err(EngineError::UnknownPage {
                name: name.to_owned(),
            });
        }
        if self.active.as_deref() != Some(name) {
            self.focus.close_overlay(&mut self.arena);
            self.focus.deactivate_input(&mut self.arena);
            self.active = Some(name.to_owned());
            self.resized = true;
            debug!(page = name, "page switched");
        }
        Ok(())
    }

    /// Name of the active page, if one is set.
    pub fn active_page(&self) -> Option<&str> {
        self.active.as_deref()
    }

    // =====================================================================
    // Factories using engine defaults
    // =====================================================================

    /// Build a scrollable row with the configured default scroll speed.
    pub fn scroll_row(&mut self, style: Style) -> ElementId {
        let speed = self.config.default_scroll_speed;
        self.arena.scroll_row(style, speed)
    }

    /// Build a scrollable column with the configured default scroll speed.
    pub fn scroll_column(&mut self, style: Style) -> ElementId {
        let speed = self.config.default_scroll_speed;
        self.arena.scroll_column(style, speed)
    }

    // =====================================================================
    // Events
    // =====================================================================

    /// Buffer one input event. Within a frame the buffers are last-wins:
    /// only the final pointer position, click, release, and wheel event
    /// survive to the next update.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { position } => self.cursor = position,
            InputEvent::PointerDown { button, position } => {
                self.cursor = position;
                self.pressed = Some(button);
                self.pending_click = Some((button, position));
            }
            InputEvent::PointerUp { button, position } => {
                self.cursor = position;
                self.pending_release = Some(button);
            }
            InputEvent::Wheel { delta, position } => {
                self.pending_scroll = Some((delta, position));
            }
            InputEvent::Resized { size } => {
                if size != self.viewport {
                    self.viewport = size;
                    self.resized = true;
                }
            }
            InputEvent::CloseRequested => self.close_requested = true,
        }
    }

    /// Whether the host asked to shut down.
    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    /// The last known pointer position.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// The button currently held down, if any.
    pub fn pressed(&self) -> Option<PointerButton> {
        self.pressed
    }

    /// Frame counters.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    // =====================================================================
    // Frame loop
    // =====================================================================

    /// Run one frame: reclaim removed elements, re-lay the active page out
    /// if anything changed, then dispatch the buffered input.
    ///
    /// Returns `true` when layout ran and the host should repaint.
    pub fn poll_and_update(&mut self) -> Result<bool, EngineError> {
        let Some(active) = self.active.clone() else {
            return Err(EngineError::NoActivePage);
        };

        // Reclaim elements marked for removal and scrub every list that
        // could still hold their handles.
        let dead = self.arena.sweep();
        let removed_any = !dead.is_empty();
        if removed_any {
            self.focus.prune(&dead);
            for page in self.pages.values_mut() {
                page.prune(&dead);
            }
            for &id in &dead {
                self.rect_cache.remove(id);
            }
        }

        self.stats.frames += 1;
        let viewport = Rect::from_origin_size(Point::ORIGIN, self.viewport);
        let page = self
            .pages
            .get(&active)
            .ok_or_else(|| EngineError::UnknownPage { name: active.clone() })?;

        let did_layout = if self.resized || !self.laid_out || removed_any || self.tree_changed() {
            for _ in 0..self.config.convergence_passes {
                for &root in page.roots() {
                    element::measure_and_place(&mut self.arena, root, viewport);
                }
                for &overlay in page.overlays() {
                    element::measure_and_place(&mut self.arena, overlay, viewport);
                }
            }
            self.refresh_cache();
            self.resized = false;
            self.laid_out = true;
            self.stats.layout_frames += 1;
            trace!(frame = self.stats.frames, "layout pass");
            true
        } else {
            self.stats.skipped_frames += 1;
            false
        };
        self.repaint = did_layout;

        // Input dispatched against the freshly settled rectangles. Its
        // effects (dirty flags, offsets, visibility) surface next frame.
        let page = self
            .pages
            .get(&active)
            .ok_or_else(|| EngineError::UnknownPage { name: active })?;
        if let Some((button, point)) = self.pending_click.take() {
            page.dispatch_pointer(&mut self.arena, &mut self.focus, point, button);
        }
        if let Some(button) = self.pending_release.take() {
            if self.pressed == Some(button) {
                self.pressed = None;
            }
        }
        if let Some((delta, point)) = self.pending_scroll.take() {
            page.dispatch_scroll(&mut self.arena, point, delta);
        }
        page.dispatch_hover(&mut self.arena, self.cursor);

        Ok(did_layout)
    }

    /// Paint the active page into a fresh batch: roots in add order, then
    /// overlay roots on top.
    ///
    /// Returns an empty batch when the preceding update skipped layout,
    /// so idle frames cost a cache comparison, not a repaint.
    pub fn paint(&self) -> Result<PaintBatch, EngineError> {
        let active = self.active.as_deref().ok_or(EngineError::NoActivePage)?;
        let page = self
            .pages
            .get(active)
            .ok_or_else(|| EngineError::UnknownPage {
                name: active.to_owned(),
            })?;

        let mut batch = PaintBatch::new();
        if !self.repaint {
            return Ok(batch);
        }
        for &root in page.roots() {
            element::paint(&self.arena, root, &mut batch);
        }
        for &overlay in page.overlays() {
            element::paint(&self.arena, overlay, &mut batch);
        }
        Ok(batch)
    }

    /// True when any element's rectangle or dirty flag disagrees with the
    /// cache from the last layout frame.
    fn tree_changed(&self) -> bool {
        let mut seen = 0usize;
        for (id, el) in self.arena.iter() {
            if el.is_dirty() {
                return true;
            }
            match self.rect_cache.get(id) {
                Some(cached) if *cached == el.rect => seen += 1,
                _ => return true,
            }
        }
        // Entries left in the cache mean elements disappeared.
        seen != self.rect_cache.len()
    }

    fn refresh_cache(&mut self) {
        self.rect_cache.clear();
        for (id, el) in self.arena.iter_mut() {
            el.dirty = false;
            self.rect_cache.insert(id, el.rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::SizeMode;
    use std::cell::Cell;
    use std::rc::Rc;

    fn engine_with_page() -> (Engine, ElementId) {
        let mut engine = Engine::new(Size::new(400.0, 300.0));
        let root = engine.arena.column(Style::new());
        engine.add_page("main").add_root(root);
        (engine, root)
    }

    #[test]
    fn test_first_frame_lays_out() {
        let (mut engine, root) = engine_with_page();
        assert!(engine.poll_and_update().unwrap());
        assert_eq!(
            engine.arena.get(root).unwrap().rect,
            Rect::new(0.0, 0.0, 400.0, 300.0)
        );
    }

    #[test]
    fn test_idle_frames_skip_layout() {
        let (mut engine, _) = engine_with_page();
        assert!(engine.poll_and_update().unwrap());
        assert!(!engine.poll_and_update().unwrap());
        assert!(!engine.poll_and_update().unwrap());
        assert_eq!(engine.stats().layout_frames, 1);
        assert_eq!(engine.stats().skipped_frames, 2);
    }

    #[test]
    fn test_resize_forces_layout() {
        let (mut engine, root) = engine_with_page();
        engine.poll_and_update().unwrap();
        engine.handle_event(InputEvent::Resized {
            size: Size::new(800.0, 600.0),
        });
        assert!(engine.poll_and_update().unwrap());
        assert_eq!(engine.arena.get(root).unwrap().rect.width, 800.0);
    }

    #[test]
    fn test_structural_change_forces_layout() {
        let (mut engine, root) = engine_with_page();
        engine.poll_and_update().unwrap();
        assert!(!engine.poll_and_update().unwrap());

        let child = engine.arena.block(Style::new().height(SizeMode::Fixed(40.0)));
        engine.arena.append(root, child);
        assert!(engine.poll_and_update().unwrap());
        assert_eq!(
            engine.arena.get(child).unwrap().rect,
            Rect::new(0.0, 0.0, 400.0, 40.0)
        );
    }

    #[test]
    fn test_removal_is_safe_and_relays() {
        let (mut engine, root) = engine_with_page();
        let child = engine.arena.block(Style::new().height(SizeMode::Fixed(40.0)));
        engine.arena.append(root, child);
        engine.poll_and_update().unwrap();

        engine.arena.remove_subtree(child);
        assert!(engine.poll_and_update().unwrap());
        assert!(engine.arena.get(child).is_none());
        assert!(!engine.poll_and_update().unwrap());
    }

    #[test]
    fn test_click_buffer_is_last_wins() {
        let hits = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&hits);
        let (mut engine, root) = engine_with_page();
        let button = engine.arena.block(
            Style::new()
                .height(SizeMode::Fixed(40.0))
                .on_primary(move || counter.set(counter.get() + 1)),
        );
        engine.arena.append(root, button);
        engine.poll_and_update().unwrap();

        // Two downs in one frame: only the last one dispatches.
        engine.handle_event(InputEvent::PointerDown {
            button: PointerButton::Primary,
            position: Point::new(10.0, 200.0),
        });
        engine.handle_event(InputEvent::PointerDown {
            button: PointerButton::Primary,
            position: Point::new(10.0, 10.0),
        });
        engine.poll_and_update().unwrap();
        assert_eq!(hits.get(), 1);

        // Consumed: the next frame does not redeliver it.
        engine.poll_and_update().unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_scroll_event_moves_offset_next_frame() {
        let mut engine = Engine::new(Size::new(200.0, 100.0));
        let col = engine.scroll_column(Style::new());
        for _ in 0..3 {
            let item = engine.arena.block(Style::new().height(SizeMode::Fixed(100.0)));
            engine.arena.append(col, item);
        }
        engine.add_page("main").add_root(col);
        engine.poll_and_update().unwrap();

        engine.handle_event(InputEvent::Wheel {
            delta: ScrollDelta::new(0.0, -50.0),
            position: Point::new(50.0, 50.0),
        });
        engine.poll_and_update().unwrap();
        // The wheel dirtied the container, so the next frame re-lays out.
        assert!(engine.poll_and_update().unwrap());
        let first = engine.arena.get(col).unwrap().kind.children().unwrap()[0];
        assert_eq!(engine.arena.get(first).unwrap().rect.y, -50.0);
    }

    #[test]
    fn test_paint_after_layout() {
        let (mut engine, _) = engine_with_page();
        assert!(engine.paint().unwrap().is_empty());
        engine.poll_and_update().unwrap();
        assert_eq!(engine.paint().unwrap().len(), 1);

        // A skipped frame paints nothing.
        assert!(!engine.poll_and_update().unwrap());
        assert!(engine.paint().unwrap().is_empty());
    }

    #[test]
    fn test_page_errors() {
        let mut engine = Engine::new(Size::new(100.0, 100.0));
        assert_eq!(engine.poll_and_update(), Err(EngineError::NoActivePage));
        assert!(engine.set_active("missing").is_err());
        assert!(engine.page_mut("missing").is_err());
    }

    #[test]
    fn test_close_request() {
        let (mut engine, _) = engine_with_page();
        assert!(!engine.should_close());
        engine.handle_event(InputEvent::CloseRequested);
        assert!(engine.should_close());
    }

    #[test]
    fn test_page_switch_resets_focus() {
        let (mut engine, root) = engine_with_page();
        let input = engine.arena.text_input(Style::new().height(SizeMode::Fixed(30.0)));
        engine.arena.append(root, input);
        let other = engine.arena.column(Style::new());
        engine.add_page("other").add_root(other);
        engine.poll_and_update().unwrap();

        engine.focus.activate_input(&mut engine.arena, input);
        engine.set_active("other").unwrap();
        assert_eq!(engine.focus.active_input(), None);
        assert!(engine.poll_and_update().unwrap());
    }
}

//! A retained-mode UI engine: a persistent element tree, one-axis flow
//! layout, scrollable containers, overlay and input focus, and a frame
//! scheduler that only re-lays the tree out when something changed.
//!
//! The pieces compose bottom-up:
//!
//! - [`primitives`] and [`style`] are the plain data vocabulary.
//! - [`arena`] owns every [`element::Element`] behind generation-checked
//!   handles; [`container`] wires parents to children.
//! - [`layout`] holds the flow algorithm and the scroll/overlay behaviors
//!   layered on it.
//! - [`focus`] and [`page`] give events somewhere to go.
//! - [`engine`] ties it together into a poll-update-paint loop driven by
//!   [`event::InputEvent`]s from the host.
//!
//! ```
//! use trellis::engine::Engine;
//! use trellis::primitives::Size;
//! use trellis::style::Style;
//!
//! let mut engine = Engine::new(Size::new(800.0, 600.0));
//! let root = engine.arena.column(Style::new());
//! engine.add_page("main").add_root(root);
//! assert!(engine.poll_and_update().unwrap());
//! let batch = engine.paint().unwrap();
//! assert_eq!(batch.len(), 1);
//! ```

pub mod arena;
pub mod container;
pub mod demo;
pub mod element;
pub mod engine;
pub mod error;
pub mod event;
pub mod focus;
pub mod layout;
pub mod page;
pub mod paint;
pub mod primitives;
pub mod style;

pub use arena::{Arena, ElementId};
pub use element::{Element, ElementKind, ElementTag};
pub use engine::{Engine, EngineConfig, FrameStats};
pub use error::EngineError;
pub use event::{InputEvent, PointerButton, ScrollDelta};
pub use focus::FocusState;
pub use page::Page;
pub use paint::{PaintBatch, PaintCommand};
pub use primitives::{Color, Point, Rect, Size};
pub use style::{Align, PaintPriority, SizeMode, Style};

//! A small reference page exercising the whole engine surface.
//!
//! Used by the demo binary and handy as an integration fixture: a header
//! with a menu trigger, the floating menu it opens, a scrollable list, a
//! text input, and a footer pinned to the bottom.

use tracing::info;

use crate::engine::Engine;
use crate::primitives::Color;
use crate::style::{Align, SizeMode, Style};

const HEADER_BG: Color = Color::rgb(0.16, 0.16, 0.2);
const PANEL_BG: Color = Color::rgb(0.22, 0.22, 0.28);
const ITEM_BG: Color = Color::rgb(0.3, 0.3, 0.38);
const ACCENT: Color = Color::rgb(0.36, 0.56, 0.92);

/// Build the demo page into `engine` and make it active.
pub fn build(engine: &mut Engine) {
    // Header: menu trigger on the left, a couple of buttons on the right.
    let trigger = engine.arena.block(
        Style::new()
            .fixed(80.0, 32.0)
            .align(Align::CENTER_Y)
            .fill(ACCENT),
    );
    let save = engine.arena.block(
        Style::new()
            .fixed(64.0, 32.0)
            .align(Align::RIGHT | Align::CENTER_Y)
            .fill(ITEM_BG)
            .on_primary(|| info!("save clicked")),
    );
    let header = engine.arena.row(
        Style::new()
            .height(SizeMode::Fixed(48.0))
            .fill(HEADER_BG),
    );
    engine.arena.append(header, trigger);
    engine.arena.append(header, save);

    // The menu panel the trigger opens. Starts hidden; the dispatch layer
    // shows it anchored under the trigger.
    let menu = engine.arena.overlay(Style::new().fixed(160.0, 96.0).fill(PANEL_BG).hidden());
    for label in ["new", "open", "quit"] {
        let item = engine.arena.block(
            Style::new()
                .height(SizeMode::Fixed(32.0))
                .fill(PANEL_BG)
                .on_primary(move || info!(item = label, "menu item clicked")),
        );
        engine.arena.append(menu, item);
    }

    // Scrollable body.
    let list = engine.scroll_column(Style::new().fill(Color::TRANSPARENT));
    for n in 0..12 {
        let item = engine.arena.block(
            Style::new()
                .height(SizeMode::Fixed(56.0))
                .fill(ITEM_BG)
                .on_primary(move || info!(n, "list item clicked")),
        );
        engine.arena.append(list, item);
    }

    // Search input above the list.
    let search = engine.arena.text_input(
        Style::new()
            .height(SizeMode::Fixed(36.0))
            .fill(Color::WHITE),
    );

    let footer = engine.arena.row(
        Style::new()
            .height(SizeMode::Fixed(28.0))
            .align(Align::BOTTOM)
            .fill(HEADER_BG),
    );

    let root = engine.arena.column(Style::new().fill(Color::rgb(0.1, 0.1, 0.12)));
    engine.arena.append(root, header);
    engine.arena.append(root, search);
    engine.arena.append(root, list);
    engine.arena.append(root, footer);

    let page = engine.add_page("main");
    page.add_root(root);
    page.add_overlay(menu);
    engine.focus.register_overlay(trigger, menu);
}

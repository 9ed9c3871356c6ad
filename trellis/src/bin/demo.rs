//! Headless demo: drives the engine with a scripted event stream and logs
//! what each frame produced. Run with `RUST_LOG=debug` for the full trace.

use tracing::info;
use tracing_subscriber::EnvFilter;

use trellis::engine::Engine;
use trellis::event::{InputEvent, PointerButton, ScrollDelta};
use trellis::primitives::{Point, Size};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut engine = Engine::new(Size::new(800.0, 600.0));
    trellis::demo::build(&mut engine);

    let script = [
        InputEvent::PointerMoved {
            position: Point::new(400.0, 300.0),
        },
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            position: Point::new(10.0, 10.0),
        },
        InputEvent::Wheel {
            delta: ScrollDelta::new(0.0, -120.0),
            position: Point::new(400.0, 300.0),
        },
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            position: Point::new(400.0, 200.0),
        },
        InputEvent::Resized {
            size: Size::new(1024.0, 768.0),
        },
        InputEvent::CloseRequested,
    ];

    for event in script {
        engine.handle_event(event);
        match engine.poll_and_update() {
            Ok(true) => match engine.paint() {
                Ok(batch) => info!(commands = batch.len(), "frame painted"),
                Err(err) => {
                    eprintln!("paint failed: {err}");
                    return;
                }
            },
            Ok(false) => info!("frame skipped"),
            Err(err) => {
                eprintln!("frame failed: {err}");
                return;
            }
        }
        if engine.should_close() {
            break;
        }
    }

    let stats = engine.stats();
    info!(
        frames = stats.frames,
        layouts = stats.layout_frames,
        skipped = stats.skipped_frames,
        "demo finished"
    );
}

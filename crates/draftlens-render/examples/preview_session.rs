//! Minimal composition-root wiring: a style store over in-memory storage,
//! a preview renderer over a recording surface, and one simulated drawing
//! gesture. Run with `RUST_LOG=debug` to see the store and renderer logs.

use draftlens_core::entity::{LinePreview, PreviewEntity};
use draftlens_core::storage::MemoryStorage;
use draftlens_core::style::config::LineStyleDelta;
use draftlens_core::style::store::{SlotAction, StyleAction, StyleStore};
use draftlens_core::style::{InteractionMode, StyleColor};
use draftlens_core::viewport::{ViewTransform, Viewport};
use draftlens_render::{PreviewOptions, PreviewRenderer, RecordingSurface};
use kurbo::Point;
use std::sync::Arc;

fn main() {
    env_logger::init();

    let storage = Arc::new(MemoryStorage::new());
    let mut store = pollster::block_on(StyleStore::load(storage, "drawing-styles"));

    // Customize the hover appearance of lines.
    store.dispatch(StyleAction::Line(SlotAction::ToggleOverride(
        InteractionMode::Hover,
        true,
    )));
    store.dispatch(StyleAction::Line(SlotAction::UpdateOverride(
        InteractionMode::Hover,
        LineStyleDelta {
            color: Some(StyleColor::rgb(0xFF, 0x8C, 0x00)),
            ..Default::default()
        },
    )));

    let mut renderer = PreviewRenderer::new();
    renderer.attach(RecordingSurface::new(), 800.0, 600.0, 2.0);

    let transform = ViewTransform::default();
    let viewport = Viewport::new(800.0, 600.0);
    let gesture = PreviewEntity::Line(LinePreview::new(
        Point::new(-120.0, 40.0),
        Point::new(180.0, 160.0),
    ));

    renderer.draw_preview(
        &gesture,
        transform,
        viewport,
        &PreviewOptions::new().with_mode(InteractionMode::Hover),
        store.settings(),
    );

    if let Some(surface) = renderer.surface() {
        println!("recorded {} drawing commands:", surface.commands().len());
        for command in surface.commands() {
            println!("  {command:?}");
        }
    }

    renderer.clear();

    // Flush the debounced settings write before exiting.
    if let Err(err) = pollster::block_on(store.persist_now()) {
        eprintln!("settings write failed: {err}");
    }
}

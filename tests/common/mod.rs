#![allow(dead_code)]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use mathtext::font::fixed::FixedMetrics;
use mathtext::layout::{self, LayoutBox, LayoutContext, LayoutSettings};
use mathtext::parser::Node;
use mathtext::render::bbox::BBoxBackend;
use mathtext::{Cursor, Renderer};

/// Routes `log` output to the test harness, `RUST_LOG=debug` shows the diagnostics
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load_yaml<T : DeserializeOwned, P : AsRef<Path>>(path : P) -> T {
    let file = File::open(path.as_ref()).expect("failed to open test collection");
    let reader = BufReader::new(file);
    serde_yaml::from_reader(reader).expect("failed to parse test collection")
}

pub fn layout_node(node : &Node, metrics : &FixedMetrics) -> LayoutBox {
    let settings = LayoutSettings::default();
    let env = settings.root_environment();
    layout::layout(node, &env, LayoutContext::new(&settings, metrics))
}

/// Draws `layout` with its baseline at the origin, returns the end of the baseline and the drawn area
pub fn draw(layout : &LayoutBox) -> (f64, Option<mathtext::geometry::BBox<mathtext::dimensions::units::Px>>) {
    let mut backend = BBoxBackend::new(FixedMetrics::default());
    let end = Renderer::new().render(layout, &mut backend, Cursor::default());
    (end, backend.finish())
}

/*! # A typesetting engine for LaTeX-like math text.

This library takes a string of LaTeX-like markup (e.g. `The area is $\pi r^2$`, `$\sqrt{\frac{a}{b}}$`)
and turns it into text runs, lines and shapes positioned on a canvas. It also offers an approximate HTML export.

The engine does not load fonts itself: text is measured through the [`FontMetrics`](crate::font::FontMetrics) trait,
implemented by whatever canvas the formula is drawn on.

## Basic usage

The [`MathText`] driver parses once, then sizes, draws or exports the same tree as often as needed.

```
use mathtext::MathText;
use mathtext::font::fixed::FixedMetrics;
use mathtext::render::bbox::BBoxBackend;

let mut math = MathText::new();
assert!(math.parse(r"$e = \lim_{n \to \infty} \left(1 + \frac{1}{n}\right)^n$"));

// measure
let metrics = FixedMetrics::default();
let size = math.size(&metrics);
assert!(size.width.to_unitless() > 0.);

// draw, here on a backend that only records what is drawn
let mut backend = BBoxBackend::new(FixedMetrics::default());
let end = math.draw(&mut backend, 0., size.baseline_height.to_unitless());
assert!((end - size.width.to_unitless()).abs() < 1e-9);
```

Notes:

 - `draw` places the start of the baseline of the formula at the position given and returns the x-coordinate right of it.
 - Lengths are in device pixels. Font sizes given in points are converted at 96 pixels per inch.
 - The y-axis points downwards: the part of a formula above its baseline has negative y-coordinates.

## Malformed markup

Parsing never fails: problems are collected as [`Diagnostic`](crate::error::Diagnostic)s and the parser
goes on with what it understood. [`MathText::parse`] returns whether the markup was free of problems.

```
let mut math = mathtext::MathText::new();
assert!(!math.parse(r"$\notacommand{x} + 1$"));
assert_eq!(math.diagnostics().len(), 1);
println!("{}", math.diagnostics()[0]); // error @ ch. ..: unknown instruction '\notacommand'
```

## Step by step

[`MathText`] wraps three steps, available on their own:

  1. Parsing the markup into a [`Node`](crate::parser::Node) tree, cf [`parser::parse`] and [`parser::Parser`].
  2. Laying out the tree in space, yielding a [`LayoutBox`](crate::layout::LayoutBox), cf [`layout::layout`].
     This step needs a [`FontMetrics`](crate::font::FontMetrics) and the engine factors of [`LayoutSettings`](crate::layout::LayoutSettings).
  3. Drawing the layout on a backend with a [`Renderer`](crate::render::Renderer).

## Implementing backends

A backend implements [`FontMetrics`](crate::font::FontMetrics) to measure text and [`GraphicsBackend`](crate::render::GraphicsBackend)
to draw text runs, lines, rectangles and paths. Two backends ship with the crate:
[`render::bbox::BBoxBackend`] and, with the `tinyskia-renderer` feature, a tiny-skia pixmap backend.
*/

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate log;

#[deny(missing_docs)]
pub mod error;
#[deny(missing_docs)]
pub mod dimensions;
#[deny(missing_docs)]
pub mod geometry;
#[deny(missing_docs)]
pub mod environment;
#[deny(missing_docs)]
pub mod layout;
#[warn(missing_docs)]
pub mod parser;
#[deny(missing_docs)]
pub mod render;
#[deny(missing_docs)]
pub mod html;

pub mod font;

use std::sync::Arc;

use crate::dimensions::{units::Px, Unit};
use crate::environment::Environment;
use crate::error::Diagnostic;
use crate::font::cache::MetricsCache;
use crate::font::FontMetrics;
use crate::geometry::BBox;
use crate::html::Html;
use crate::layout::{LayoutBox, LayoutContext, LayoutSettings, NodeSize};
use crate::parser::{EngineContext, Node, ParseOptions, Parser};
use crate::render::bbox::BBoxBackend;

pub use crate::render::{Backend, Cursor, GraphicsBackend, Renderer};


/// Parses a formula once and sizes, draws or exports it on demand.
#[derive(Debug, Clone, Default)]
pub struct MathText {
    settings : LayoutSettings,
    options : ParseOptions,
    root : Node,
    diagnostics : Vec<Diagnostic>,
    cache : Option<Arc<MetricsCache>>,
}

impl MathText {
    /// A driver with the default settings and an empty formula
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver with the given engine factors
    pub fn with_settings(settings : LayoutSettings) -> Self {
        Self { settings, ..Self::default() }
    }

    /// Options for the next calls to [`MathText::parse`]
    pub fn with_options(self, options : ParseOptions) -> Self {
        Self { options, ..self }
    }

    /// Measures text through `cache`, shared with whoever else holds it
    pub fn with_cache(self, cache : Arc<MetricsCache>) -> Self {
        Self { cache : Some(cache), ..self }
    }

    /// Engine factors
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Engine factors, to be modified. Changes apply to the next layout.
    pub fn settings_mut(&mut self) -> &mut LayoutSettings {
        &mut self.settings
    }

    /// Parses `markup`, replacing the previous formula.
    /// Returns `true` if no diagnostic was recorded, the best-effort tree is kept in any case.
    pub fn parse(&mut self, markup : &str) -> bool {
        let context = EngineContext {
            font_size : self.settings.font_size,
            font_size_unit : self.settings.font_size_unit,
            color : self.settings.color,
            ..EngineContext::default()
        };
        let output = Parser::new(markup)
            .with_options(self.options)
            .with_context(context)
            .parse();
        for diagnostic in &output.diagnostics {
            debug!("{}", diagnostic);
        }
        self.root = output.root;
        self.diagnostics = output.diagnostics;
        self.diagnostics.is_empty()
    }

    /// Problems found by the last call to [`MathText::parse`]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Root of the parsed tree
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The environment the root of the tree is laid out in
    pub fn root_environment(&self) -> Environment {
        self.settings.root_environment()
    }

    /// Lays the formula out, measuring text with `metrics`
    pub fn layout(&self, metrics : &dyn FontMetrics) -> LayoutBox {
        let env = self.root_environment();
        match self.cache {
            Some(ref cache) => {
                let cached = cache.wrap(metrics);
                layout::layout(&self.root, &env, LayoutContext::new(&self.settings, &cached))
            },
            None => layout::layout(&self.root, &env, LayoutContext::new(&self.settings, metrics)),
        }
    }

    /// Size of the formula
    pub fn size(&self, metrics : &dyn FontMetrics) -> NodeSize {
        self.layout(metrics).size
    }

    /// Draws the formula on `backend` with the start of its baseline at (`x`, `y`).
    /// Returns the x-coordinate right of the formula.
    pub fn draw<B : Backend>(&self, backend : &mut B, x : f64, y : f64) -> f64 {
        let layout = self.layout(&*backend);
        Renderer::new().render(&layout, backend, Cursor::new(x, y))
    }

    /// Smallest box containing everything the formula draws, relative to the start of its baseline.
    /// `None` if the formula draws nothing.
    pub fn bounding_box(&self, metrics : &dyn FontMetrics) -> Option<BBox<Px>> {
        let layout = self.layout(metrics);
        let mut backend = BBoxBackend::new(metrics);
        Renderer::new().render(&layout, &mut backend, Cursor::default());
        backend.finish()
    }

    /// Approximate HTML markup of the formula
    pub fn to_html(&self) -> Html {
        let env = self.root_environment();
        html::to_html(&self.root, &env, &env, &self.settings.fonts)
    }
}


/// Renders `markup` on `backend` with the start of its baseline at (`x`, `y`), using the default settings.
/// Returns the x-coordinate right of the formula, or the diagnostics if the markup has problems.
pub fn render<B : Backend>(markup : &str, backend : &mut B, x : f64, y : f64) -> error::Result<f64> {
    let mut math = MathText::new();
    if !math.parse(markup) {
        return Err(error::Error::Parse(math.diagnostics));
    }
    Ok(math.draw(backend, x, y))
}

/// Width, ascent and descent of `markup` laid out with the default settings, in pixels.
pub fn measure(markup : &str, metrics : &dyn FontMetrics) -> (Unit<Px>, Unit<Px>, Unit<Px>) {
    let mut math = MathText::new();
    math.parse(markup);
    let size = math.size(metrics);
    (size.width, size.baseline_height, size.descent())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::fixed::FixedMetrics;

    #[test]
    fn parse_keeps_best_effort_tree() {
        let mut math = MathText::new();
        assert!(!math.parse("\\notacommand{x} y"));
        assert_eq!(math.diagnostics().len(), 1);
        let mut texts = String::new();
        math.root().walk(&mut |node| if let Node::Text(ref text) = *node { texts.push_str(text) });
        assert!(texts.contains('y'));
        assert!(!texts.contains("notacommand"));

        assert!(math.parse("x"));
        assert!(math.diagnostics().is_empty());
    }

    #[test]
    fn draw_advances_by_the_width() {
        let metrics = FixedMetrics::default();
        let mut math = MathText::new();
        math.parse("$\\sqrt{x^2} + \\frac{1}{2}$");
        let size = math.size(&metrics);
        let mut backend = BBoxBackend::new(FixedMetrics::default());
        let end = math.draw(&mut backend, 10., 20.);
        assert!((end - 10. - size.width.to_unitless()).abs() < 1e-9);
        assert!(backend.finish().is_some());
    }

    #[test]
    fn bounding_box_of_the_drawing() {
        let metrics = FixedMetrics::default();
        let mut math = MathText::new();
        math.parse("$\\overline{x}$");
        let bbox = math.bounding_box(&metrics).unwrap();
        assert!(bbox.y_min < Unit::ZERO);
        assert!(bbox.width() > Unit::ZERO);

        math.parse("\\phantom{x}");
        assert!(math.bounding_box(&metrics).is_none());
    }

    #[test]
    fn cached_layout_matches() {
        let metrics = FixedMetrics::default();
        let cache = Arc::new(MetricsCache::new());
        let mut plain = MathText::new();
        let mut cached = MathText::new().with_cache(cache.clone());
        plain.parse("$a_1 + \\sum_{i} b$");
        cached.parse("$a_1 + \\sum_{i} b$");
        assert_eq!(plain.size(&metrics), cached.size(&metrics));
        let misses = cache.stats().misses;
        assert!(misses > 0);
        cached.size(&metrics);
        assert_eq!(cache.stats().misses, misses);
    }

    #[test]
    fn settings_change_the_size() {
        let metrics = FixedMetrics::default();
        let mut math = MathText::new();
        math.parse("x");
        let small = math.size(&metrics);
        math.settings_mut().font_size *= 2.;
        let large = math.size(&metrics);
        assert!(large.width > small.width);
    }

    #[test]
    fn strict_render() {
        let mut backend = BBoxBackend::new(FixedMetrics::default());
        assert!(render("$x$", &mut backend, 0., 0.).is_ok());
        assert!(matches!(render("$\\frac{x}$", &mut backend, 0., 0.), Err(error::Error::Parse(_))));
    }

    #[test]
    fn html_export() {
        let mut math = MathText::new();
        math.parse("a$^2$");
        let html = math.to_html();
        assert!(html.complete);
        assert!(html.html.contains("<sup>"));
    }

    #[test]
    fn measure_text() {
        let metrics = FixedMetrics::default();
        let (width, ascent, descent) = measure("g", &metrics);
        assert!(width > Unit::ZERO);
        assert!(ascent > Unit::ZERO);
        assert!(descent > Unit::ZERO);
    }
}

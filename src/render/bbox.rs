//! Defines a backend that does not draw anything but computes the "real bbox", the one that encloses all areas actually drawn to.
//! Characters (typically in italic style) routinely go beyond the box given by their advance and the font ascent/descent.
//! To determine the real bounding box, you can perform a rendering with the backend defined in this module.

use crate::dimensions::{units::Px, Unit};
use crate::font::{FontDescriptor, FontMetrics};
use crate::geometry::BBox;

use super::{Brush, Cursor, GraphicsBackend, Path, Pen, RGBA};


/// A rendering backend that does not draw but simply records the bounding box being drawn to.
///
/// Text is measured with the wrapped metrics, which are also the metrics the formula is laid out with.
#[derive(Debug, Clone)]
pub struct BBoxBackend<M> {
    metrics: M,
    /// The current bounding box
    /// Is None when nothing has been drawn yet
    bbox: Option<BBox<Px>>,
}

impl<M : Default> Default for BBoxBackend<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M> BBoxBackend<M> {
    /// Creates a new bbox rendering backend measuring text with `metrics`.
    pub fn new(metrics: M) -> Self {
        Self {
            metrics,
            bbox: None,
        }
    }

    /// Returns the bounding box computed by the backend.
    /// Return None when nothing has been drawn
    pub fn finish(self) -> Option<BBox<Px>> {
        self.bbox
    }

    /// The bounding box drawn to so far
    pub fn current(&self) -> Option<&BBox<Px>> {
        self.bbox.as_ref()
    }

    fn enclose(&mut self, mut bbox: BBox<Px>) {
        if let Some(other) = self.bbox.as_ref() {
            bbox = bbox.union(other.clone());
        }
        self.bbox = Some(bbox)
    }

    fn enclose_rect(&mut self, x_min: f64, y_min: f64, x_max: f64, y_max: f64) {
        self.enclose(BBox::new(
            Unit::new(x_min.min(x_max)), Unit::new(y_min.min(y_max)),
            Unit::new(x_min.max(x_max)), Unit::new(y_min.max(y_max)),
        ));
    }
}

impl<M : FontMetrics> GraphicsBackend for BBoxBackend<M> {
    fn text(&mut self, pos: Cursor, text: &str, font: &FontDescriptor, _color: RGBA) {
        if text.chars().all(char::is_whitespace) {
            return;
        }
        let tight = self.metrics.tight_bounding_box(font, text);
        self.enclose(tight.translate(Unit::new(pos.x), Unit::new(pos.y)));
    }

    fn line(&mut self, from: Cursor, to: Cursor, pen: &Pen) {
        let half = pen.width / 2.;
        self.enclose_rect(
            from.x.min(to.x) - half, from.y.min(to.y) - half,
            from.x.max(to.x) + half, from.y.max(to.y) + half,
        );
    }

    fn rect(&mut self, pos: Cursor, width: f64, height: f64, pen: Option<&Pen>, brush: Option<&Brush>, _rounding: f64) {
        if pen.is_none() && brush.is_none() {
            return;
        }
        let half = pen.map_or(0., |p| p.width / 2.);
        self.enclose_rect(pos.x - half, pos.y - half, pos.x + width + half, pos.y + height + half);
    }

    fn path(&mut self, origin: Cursor, path: &Path, pen: Option<&Pen>, _brush: Option<&Brush>) {
        if let Some((x0, y0, x1, y1)) = path.bounds() {
            let half = pen.map_or(0., |p| p.width / 2.);
            self.enclose_rect(
                origin.x + x0 - half, origin.y + y0 - half,
                origin.x + x1 + half, origin.y + y1 + half,
            );
        }
    }
}

impl<M : FontMetrics> FontMetrics for BBoxBackend<M> {
    fn width(&self, font: &FontDescriptor, text: &str) -> Unit<Px> { self.metrics.width(font, text) }
    fn tight_bounding_box(&self, font: &FontDescriptor, text: &str) -> BBox<Px> { self.metrics.tight_bounding_box(font, text) }
    fn bounding_box(&self, font: &FontDescriptor, text: &str) -> BBox<Px> { self.metrics.bounding_box(font, text) }
    fn left_bearing(&self, font: &FontDescriptor, c: char) -> Unit<Px> { self.metrics.left_bearing(font, c) }
    fn right_bearing(&self, font: &FontDescriptor, c: char) -> Unit<Px> { self.metrics.right_bearing(font, c) }
    fn strikeout_pos(&self, font: &FontDescriptor) -> Unit<Px> { self.metrics.strikeout_pos(font) }
    fn line_width(&self, font: &FontDescriptor) -> Unit<Px> { self.metrics.line_width(font) }
    fn ascent(&self, font: &FontDescriptor) -> Unit<Px> { self.metrics.ascent(font) }
    fn descent(&self, font: &FontDescriptor) -> Unit<Px> { self.metrics.descent(font) }
    fn leading(&self, font: &FontDescriptor) -> Unit<Px> { self.metrics.leading(font) }
    fn x_height(&self, font: &FontDescriptor) -> Unit<Px> { self.metrics.x_height(font) }
    fn device_id(&self) -> Option<usize> { self.metrics.device_id() }
}

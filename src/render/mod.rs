//! Draw a [`LayoutBox`] (as computed by the `layout` module) onto a `Backend`, such as a screen, a PNG image, etc.
//!
//! To do this, a `Renderer` must first be created using the `Renderer::new` function
//! and then `Renderer::render` must be called on the `LayoutBox` and the desired `Backend`.
//!
//! ## Backends
//!
//! The `Backend` trait represents all operations that are needed to render a formula:
//!
//!   - measuring text: [`FontMetrics`], the layout engine needs the same measurements the backend draws with
//!   - drawing text in a given font and color: `GraphicsBackend::text`
//!   - drawing lines, (rounded) rectangles and paths with a [`Pen`] and/or a [`Brush`]: `GraphicsBackend::line`, `GraphicsBackend::rect`, `GraphicsBackend::path`
//!
//! Two backends ship with the crate:
//!
//!  - [`bbox::BBoxBackend`] draws nothing and records the area touched by the drawing
//!  - TinySkia backend : `tinyskia-renderer` (render to a pixmap, png)
//!
//! ## Caveat on coordinate systems
//!
//! The top is oriented along -Y. So in particular, the Y coordinate of the position of a superscript is less than the Y coordinate of its base.
//! Glyph outlines in font files are often given with the opposite convention: the top of the glyph has the highest Y coordinate.
//! Some adjustment needs to be made when implementing [`GraphicsBackend::text`].

pub mod bbox;
#[cfg(feature="tinyskia-renderer")]
pub mod tinyskia;

use crate::dimensions::units::Px;
use crate::font::{FontDescriptor, FontMetrics};
use crate::layout::{LayoutBox, Primitive};
use crate::parser::nodes::NodeKind;
pub use crate::parser::color::RGBA;

/// Context used for rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    /// When set to true, the renderer additionally calls [`GraphicsBackend::bbox`] to draw boxes
    /// around every piece of text and every node of the layout.
    pub debug: bool,
}

/// Position of the cursor in space. The unit used in pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Cursor {
    /// x-coordinate
    pub x: f64,
    /// y-coordinate (NB: `cursor1.y` < `cursor2.y`  means `cursor1` is above `cursor2` on the screen)
    pub y: f64,
}

impl Cursor {
    /// Cursor at (`x`, `y`)
    pub fn new(x: f64, y: f64) -> Cursor {
        Cursor { x, y }
    }

    /// Adds `dx` and `dy` to the x- and y- coordinates resp. of the cursor
    pub fn translate(self, dx: f64, dy: f64) -> Cursor {
        Cursor {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Moves cursor by `dx` in the direction -X
    pub fn left(self, dx: f64) -> Cursor {
        self.translate(-dx, 0.)
    }
    /// Moves cursor by `dx` in the direction +X
    pub fn right(self, dx: f64) -> Cursor {
        self.translate(dx, 0.)
    }
    /// Moves cursor by `dy` in the direction -Y
    pub fn up(self, dy: f64) -> Cursor {
        self.translate(0., -dy)
    }
    /// Moves cursor by `dy` in the direction +Y
    pub fn down(self, dy: f64) -> Cursor {
        self.translate(0., dy)
    }
}

/// How lines are dashed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    /// continuous line
    Solid,
    /// dashes of about three line widths
    Dashed,
    /// dots
    Dotted,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::Solid
    }
}

/// How lines and outlines are stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    /// line color
    pub color: RGBA,
    /// line width, in pixels
    pub width: f64,
    /// dash pattern
    pub style: LineStyle,
}

impl Pen {
    /// A solid pen
    pub fn new(color: RGBA, width: f64) -> Self {
        Self { color, width, style: LineStyle::Solid }
    }

    /// The same pen with its width multiplied by `factor`
    pub fn scaled(self, factor: f64) -> Self {
        Self { width: self.width * factor, ..self }
    }

    /// The same pen with another dash pattern
    pub fn with_style(self, style: LineStyle) -> Self {
        Self { style, ..self }
    }
}

/// How areas are filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    /// fill color
    pub color: RGBA,
}

impl Brush {
    /// Fills with a single color
    pub fn solid(color: RGBA) -> Self {
        Self { color }
    }
}

/// One step of a [`Path`], in pixels relative to the origin of the path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// starts a new sub-path
    MoveTo(f64, f64),
    /// straight line to a point
    LineTo(f64, f64),
    /// cubic Bézier curve: two control points, then the end point
    CubicTo(f64, f64, f64, f64, f64, f64),
    /// closes the current sub-path
    Close,
}

/// Outline made of lines and cubic curves
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    /// segments, in drawing order
    pub segments: Vec<PathSegment>,
}

/// Distance of the control points of a cubic approximating a quarter ellipse, relative to the radius
const KAPPA: f64 = 0.552_284_749_8;

impl Path {
    /// An empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new sub-path at (`x`, `y`)
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(x, y));
        self
    }

    /// Adds a straight line
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::LineTo(x, y));
        self
    }

    /// Adds a cubic curve
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::CubicTo(x1, y1, x2, y2, x, y));
        self
    }

    /// Closes the current sub-path
    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Adds a closed ellipse centered on (`cx`, `cy`)
    pub fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> &mut Self {
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        self.move_to(cx + rx, cy)
            .cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry)
            .cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy)
            .cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry)
            .cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy)
            .close()
    }

    /// Adds an open polyline through `points`
    pub fn polyline(&mut self, points: &[(f64, f64)]) -> &mut Self {
        if let Some(&(x, y)) = points.first() {
            self.move_to(x, y);
            for &(x, y) in &points[1..] {
                self.line_to(x, y);
            }
        }
        self
    }

    /// A copy of the path with every point transformed by `f`
    pub fn map(&self, f: impl Fn(f64, f64) -> (f64, f64)) -> Path {
        let segments = self.segments.iter().map(|segment| match *segment {
            PathSegment::MoveTo(x, y) => { let (x, y) = f(x, y); PathSegment::MoveTo(x, y) },
            PathSegment::LineTo(x, y) => { let (x, y) = f(x, y); PathSegment::LineTo(x, y) },
            PathSegment::CubicTo(x1, y1, x2, y2, x, y) => {
                let ((x1, y1), (x2, y2), (x, y)) = (f(x1, y1), f(x2, y2), f(x, y));
                PathSegment::CubicTo(x1, y1, x2, y2, x, y)
            },
            PathSegment::Close => PathSegment::Close,
        }).collect();
        Path { segments }
    }

    /// Whether the path has no segment
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Smallest box containing every point and control point of the path, as (x_min, y_min, x_max, y_max)
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = Vec::with_capacity(self.segments.len() * 3);
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(x, y) | PathSegment::LineTo(x, y) => points.push((x, y)),
                PathSegment::CubicTo(x1, y1, x2, y2, x, y) => points.extend_from_slice(&[(x1, y1), (x2, y2), (x, y)]),
                PathSegment::Close => (),
            }
        }
        points.iter().fold(None, |acc, &(x, y)| match acc {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
    }
}


/// A backend that can draw text, lines and shapes. One of the two traits needed to implement [`Backend`].
///
/// Implementing the function [`GraphicsBackend::bbox`] is optional (if not implemented, this function does nothing).
/// This function is only used in the debug mode of [`Renderer`] to draw rectangles around text and layout boxes.
pub trait GraphicsBackend {
    /// Only called by [`Renderer`] when [`Renderer::debug`] is true (debug mode).
    /// Draws a rectangle whose top-left corner is at `_pos` with the dimensions specified by `_width` and `_height`
    /// The parameter `_role` specifies the type of objects that the rectangle encloses.
    /// One can use this parameter to style the rectangles differently, e.g. red for text, green for fractions, etc.
    fn bbox(&mut self, _pos: Cursor, _width: f64, _height: f64, _role: Role) {}
    /// Draws `text` with its baseline starting at `pos`
    fn text(&mut self, pos: Cursor, text: &str, font: &FontDescriptor, color: RGBA);
    /// Draws a straight line
    fn line(&mut self, from: Cursor, to: Cursor, pen: &Pen);
    /// Draws a rectangle whose top-left corner is at `pos`, with corners rounded by `rounding` pixels.
    /// Used to draw boxes and matrix rules.
    fn rect(&mut self, pos: Cursor, width: f64, height: f64, pen: Option<&Pen>, brush: Option<&Brush>, rounding: f64);
    /// Draws `path`, whose coordinates are relative to `origin`
    fn path(&mut self, origin: Cursor, path: &Path, pen: Option<&Pen>, brush: Option<&Brush>);
}

/// A conjunction of the measurements of [`FontMetrics`] and the draw commands of [`GraphicsBackend`].
/// This is the trait that needs to be implemented for something to be a backend.
pub trait Backend : FontMetrics + GraphicsBackend {
}

impl<T : FontMetrics + GraphicsBackend> Backend for T {}


/// The type of things enclosed by a debug rectangle (cf [`Renderer::debug`] for debug mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// a run of text
    Glyph,
    /// a node of the tree
    Node(NodeKind),
}

impl Renderer {
    /// Creates new renderer.
    pub fn new() -> Self {
        Renderer {
            debug: false,
        }
    }

    /// A renderer drawing the debug boxes
    pub fn debug() -> Self {
        Renderer {
            debug: true,
        }
    }

    /// Renders the given layout onto `out`, the provided backend, with the baseline starting at `origin`.
    /// Returns the x-coordinate right of the layout.
    pub fn render(&self, layout: &LayoutBox, out: &mut impl Backend, origin: Cursor) -> f64 {
        self.render_box(out, origin, layout);
        origin.x + layout.size.width.unitless(Px)
    }

    fn render_box(&self, out: &mut impl Backend, pos: Cursor, layout: &LayoutBox) {
        if self.debug {
            if let Some(kind) = layout.kind {
                out.bbox(
                    pos.up(layout.size.baseline_height.unitless(Px)),
                    layout.size.width.unitless(Px),
                    layout.size.overall_height.unitless(Px),
                    Role::Node(kind),
                );
            }
        }

        for item in &layout.contents {
            let at = pos.translate(item.x.unitless(Px), item.y.unitless(Px));
            match item.primitive {
                Primitive::Text { ref text, ref font, color } => {
                    if self.debug {
                        let tight = out.tight_bounding_box(font, text);
                        out.bbox(
                            at.translate(tight.x_min.unitless(Px), tight.y_min.unitless(Px)),
                            tight.width().unitless(Px),
                            tight.total_height().unitless(Px),
                            Role::Glyph,
                        );
                    }
                    out.text(at, text, font, color);
                },
                Primitive::Line { dx, dy, ref pen } => {
                    out.line(at, at.translate(dx.unitless(Px), dy.unitless(Px)), pen);
                },
                Primitive::Rect { width, height, ref pen, ref brush, rounding } => {
                    out.rect(at, width.unitless(Px), height.unitless(Px), pen.as_ref(), brush.as_ref(), rounding.unitless(Px));
                },
                Primitive::Path { ref path, ref pen, ref brush } => {
                    out.path(at, path, pen.as_ref(), brush.as_ref());
                },
                Primitive::Box(ref inner) => self.render_box(out, at, inner),
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_moves() {
        let c = Cursor::new(1., 2.);
        assert_eq!(c.up(1.).down(3.).left(0.5).right(2.), Cursor::new(2.5, 4.));
    }

    #[test]
    fn path_bounds() {
        let mut path = Path::new();
        assert_eq!(path.bounds(), None);
        path.ellipse(0., 0., 2., 1.);
        let (x0, y0, x1, y1) = path.bounds().unwrap();
        assert!((x0 + 2.).abs() < 1e-9 && (x1 - 2.).abs() < 1e-9);
        assert!((y0 + 1.).abs() < 1e-9 && (y1 - 1.).abs() < 1e-9);

        let mut line = Path::new();
        line.polyline(&[(0., 0.), (3., -1.), (1., 4.)]);
        assert_eq!(line.bounds(), Some((0., -1., 3., 4.)));
        assert_eq!(line.segments.len(), 3);
    }

    #[test]
    fn pens() {
        let pen = Pen::new(RGBA::BLACK, 2.).scaled(1.5).with_style(LineStyle::Dotted);
        assert_eq!(pen.width, 3.);
        assert_eq!(pen.style, LineStyle::Dotted);
        assert_eq!(Brush::solid(RGBA::WHITE).color, RGBA::WHITE);
    }
}

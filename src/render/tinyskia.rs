//! Provides a [`Backend`](super::Backend) for tiny-skia
//!
//! This allows to render onto a canvas of RGBA pixels ([`Pixmap`]),
//! which can then be used inside a [`tiny_skia`] application,
//! or converted to a PNG image.
//! Glyphs are drawn from their outlines, read from the faces of a [`TtfMetrics`].

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform};

use super::{Brush, Cursor, GraphicsBackend, LineStyle, Path, PathSegment, Pen, Role, RGBA};
use crate::dimensions::{units::Px, Unit};
use crate::environment::Capitalization;
use crate::error::Error;
use crate::font::ttf::TtfMetrics;
use crate::font::{FontDescriptor, FontMetrics};
use crate::geometry::BBox;
use crate::layout::NodeSize;

/// Size of small capitals, relative to capitals
const SMALL_CAPS_SCALE : f64 = 0.8;

/// Backend for TinySkia renderer
pub struct TinySkiaBackend<'a> {
    /// A canvas to draw onto
    pixmap : Pixmap,
    /// Transform to convert from layout coordinates to coordinates on the pixmap
    layout_to_pixmap : Transform,
    metrics : TtfMetrics<'a>,
}

impl<'a> TinySkiaBackend<'a> {
    /// A transparent canvas large enough for a formula of size `size`, whose baseline starts at (0, 0) in layout coordinates.
    /// Pixels are `scale` times larger than layout units.
    pub fn new(metrics : TtfMetrics<'a>, size : NodeSize, scale : f64) -> Result<Self, Error> {
        // Positions in the layout are relative to the baseline, with negative y-coordinates above it.
        // Coordinates on `pixmap` are relative to its top-left corner.
        let width = (size.width.to_unitless() * scale).ceil().max(1.) as u32;
        let height = (size.overall_height.to_unitless() * scale).ceil().max(1.) as u32;
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| Error::Backend(format!("cannot allocate a {}x{} pixmap", width, height)))?;

        let scale = scale as f32;
        let layout_to_pixmap = Transform::from_translate(0.0, size.baseline_height.to_unitless() as f32)
            .post_scale(scale, scale);

        Ok(Self { pixmap, layout_to_pixmap, metrics })
    }

    /// Fills the whole canvas with `color`
    pub fn clear(&mut self, color : RGBA) {
        self.pixmap.fill(Color::from_rgba8(color.r(), color.g(), color.b(), color.a()));
    }

    /// Returns pixmap being drawn onto after all drawing operations are completed
    pub fn pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn glyph_outline(&self, font : &FontDescriptor, c : char) -> (Option<tiny_skia::Path>, f64, f64) {
        struct Builder {
            open_path : PathBuilder,
        }

        impl ttf_parser::OutlineBuilder for Builder {
            fn move_to(&mut self, x : f32, y : f32) {
                self.open_path.move_to(x, y);
            }
            fn line_to(&mut self, x : f32, y : f32) {
                self.open_path.line_to(x, y);
            }
            fn quad_to(&mut self, x1 : f32, y1 : f32, x : f32, y : f32) {
                self.open_path.quad_to(x1, y1, x, y);
            }
            fn curve_to(&mut self, x1 : f32, y1 : f32, x2 : f32, y2 : f32, x : f32, y : f32) {
                self.open_path.cubic_to(x1, y1, x2, y2, x, y);
            }
            fn close(&mut self) {
                self.open_path.close();
            }
        }

        let (face, gid) = self.metrics.glyph(font, c);
        let scale = font.size.to_unitless() / face.units_per_em() as f64;
        let advance = face.glyph_hor_advance(gid).unwrap_or(0) as f64 * scale;
        let mut builder = Builder { open_path : PathBuilder::new() };
        face.outline_glyph(gid, &mut builder);
        (builder.open_path.finish(), scale, advance)
    }

    fn paint(color : RGBA) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
        paint.anti_alias = true;
        paint
    }

    fn stroke(pen : &Pen) -> Stroke {
        let width = pen.width as f32;
        let dash = match pen.style {
            LineStyle::Solid => None,
            LineStyle::Dashed => StrokeDash::new(vec![3. * width, 2. * width], 0.),
            LineStyle::Dotted => StrokeDash::new(vec![width, width], 0.),
        };
        Stroke { width, dash, ..Stroke::default() }
    }

    fn draw_path(&mut self, path : &tiny_skia::Path, pen : Option<&Pen>, brush : Option<&Brush>) {
        if let Some(brush) = brush {
            self.pixmap.fill_path(path, &Self::paint(brush.color), FillRule::Winding, self.layout_to_pixmap, None);
        }
        if let Some(pen) = pen {
            if pen.width > 0. {
                self.pixmap.stroke_path(path, &Self::paint(pen.color), &Self::stroke(pen), self.layout_to_pixmap, None);
            }
        }
    }
}

fn to_skia_path(origin : Cursor, path : &Path) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    let (x0, y0) = (origin.x as f32, origin.y as f32);
    for segment in &path.segments {
        match *segment {
            PathSegment::MoveTo(x, y) => builder.move_to(x0 + x as f32, y0 + y as f32),
            PathSegment::LineTo(x, y) => builder.line_to(x0 + x as f32, y0 + y as f32),
            PathSegment::CubicTo(x1, y1, x2, y2, x, y) => builder.cubic_to(
                x0 + x1 as f32, y0 + y1 as f32,
                x0 + x2 as f32, y0 + y2 as f32,
                x0 + x as f32, y0 + y as f32,
            ),
            PathSegment::Close => builder.close(),
        }
    }
    builder.finish()
}

impl<'a> FontMetrics for TinySkiaBackend<'a> {
    fn width(&self, font : &FontDescriptor, text : &str) -> Unit<Px> { self.metrics.width(font, text) }
    fn tight_bounding_box(&self, font : &FontDescriptor, text : &str) -> BBox<Px> { self.metrics.tight_bounding_box(font, text) }
    fn bounding_box(&self, font : &FontDescriptor, text : &str) -> BBox<Px> { self.metrics.bounding_box(font, text) }
    fn left_bearing(&self, font : &FontDescriptor, c : char) -> Unit<Px> { self.metrics.left_bearing(font, c) }
    fn right_bearing(&self, font : &FontDescriptor, c : char) -> Unit<Px> { self.metrics.right_bearing(font, c) }
    fn strikeout_pos(&self, font : &FontDescriptor) -> Unit<Px> { self.metrics.strikeout_pos(font) }
    fn line_width(&self, font : &FontDescriptor) -> Unit<Px> { self.metrics.line_width(font) }
    fn ascent(&self, font : &FontDescriptor) -> Unit<Px> { self.metrics.ascent(font) }
    fn descent(&self, font : &FontDescriptor) -> Unit<Px> { self.metrics.descent(font) }
    fn leading(&self, font : &FontDescriptor) -> Unit<Px> { self.metrics.leading(font) }
    fn x_height(&self, font : &FontDescriptor) -> Unit<Px> { self.metrics.x_height(font) }
}

impl<'a> GraphicsBackend for TinySkiaBackend<'a> {
    fn bbox(&mut self, pos : Cursor, width : f64, height : f64, role : Role) {
        let color = match role {
            Role::Glyph => RGBA(0, 200, 0, 255),
            Role::Node(_) => RGBA(200, 0, 0, 255),
        };
        if let Some(rect) = Rect::from_xywh(pos.x as f32, pos.y as f32, width as f32, height as f32) {
            let path = PathBuilder::from_rect(rect);
            let stroke = Stroke { width : 0.1, ..Stroke::default() };
            self.pixmap.stroke_path(&path, &Self::paint(color), &stroke, self.layout_to_pixmap, None);
        }
    }

    fn text(&mut self, pos : Cursor, text : &str, font : &FontDescriptor, color : RGBA) {
        let paint = Self::paint(color);
        let mut x = pos.x;
        for c in text.chars() {
            let (c, font) = match font.capitalization {
                Capitalization::Mixed => (c, font.clone()),
                Capitalization::AllUppercase => (c.to_uppercase().next().unwrap_or(c), font.clone()),
                Capitalization::AllLowercase => (c.to_lowercase().next().unwrap_or(c), font.clone()),
                Capitalization::SmallCaps if c.is_lowercase() =>
                    (c.to_uppercase().next().unwrap_or(c), font.scaled(SMALL_CAPS_SCALE)),
                Capitalization::SmallCaps => (c, font.clone()),
            };
            let (outline, scale, advance) = self.glyph_outline(&font, c);
            if let Some(outline) = outline {
                // font units are y-up
                let transform = Transform::from_scale(scale as f32, -scale as f32)
                    .post_translate(x as f32, pos.y as f32)
                    .post_concat(self.layout_to_pixmap);
                self.pixmap.fill_path(&outline, &paint, FillRule::Winding, transform, None);
            }
            x += advance;
        }
    }

    fn line(&mut self, from : Cursor, to : Cursor, pen : &Pen) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x as f32, from.y as f32);
        builder.line_to(to.x as f32, to.y as f32);
        if let Some(path) = builder.finish() {
            self.draw_path(&path, Some(pen), None);
        }
    }

    fn rect(&mut self, pos : Cursor, width : f64, height : f64, pen : Option<&Pen>, brush : Option<&Brush>, rounding : f64) {
        let mut path = Path::new();
        let r = rounding.min(width.abs() / 2.).min(height.abs() / 2.).max(0.);
        if r > 0. {
            // quarter circles approximated by cubics
            let k = r * 0.552_284_749_8;
            path.move_to(r, 0.)
                .line_to(width - r, 0.)
                .cubic_to(width - r + k, 0., width, r - k, width, r)
                .line_to(width, height - r)
                .cubic_to(width, height - r + k, width - r + k, height, width - r, height)
                .line_to(r, height)
                .cubic_to(r - k, height, 0., height - r + k, 0., height - r)
                .line_to(0., r)
                .cubic_to(0., r - k, r - k, 0., r, 0.)
                .close();
        } else {
            path.polyline(&[(0., 0.), (width, 0.), (width, height), (0., height)]).close();
        }
        if let Some(path) = to_skia_path(pos, &path) {
            self.draw_path(&path, pen, brush);
        }
    }

    fn path(&mut self, origin : Cursor, path : &Path, pen : Option<&Pen>, brush : Option<&Brush>) {
        if let Some(path) = to_skia_path(origin, path) {
            self.draw_path(&path, pen, brush);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skia_paths() {
        let mut path = Path::new();
        assert!(to_skia_path(Cursor::default(), &path).is_none());
        path.move_to(0., 0.).line_to(2., 3.).cubic_to(1., 1., 2., 2., 4., 4.).close();
        let skia = to_skia_path(Cursor::new(10., 10.), &path).unwrap();
        let bounds = skia.bounds();
        assert_eq!((bounds.left(), bounds.top()), (10., 10.));
        assert_eq!((bounds.right(), bounds.bottom()), (14., 14.));
    }

    #[test]
    fn dashes() {
        let pen = Pen::new(RGBA::BLACK, 2.);
        assert!(TinySkiaBackend::stroke(&pen).dash.is_none());
        assert!(TinySkiaBackend::stroke(&pen.with_style(LineStyle::Dashed)).dash.is_some());
        assert_eq!(TinySkiaBackend::stroke(&pen).width, 2.);
    }
}

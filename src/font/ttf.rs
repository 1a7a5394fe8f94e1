//! Metrics read from OpenType/TrueType fonts parsed with `ttf-parser`.

use std::collections::HashMap;

use ttf_parser::{Face, GlyphId};

use crate::dimensions::{Unit, units::Px};
use crate::font::{FontDescriptor, FontMetrics};
use crate::geometry::BBox;


/// A [`FontMetrics`] backed by parsed font faces.
///
/// Faces are looked up by the family name of the [`FontDescriptor`]; families without a face of their own use the default face.
/// Bold and italic are not synthesized: register the bold or italic face under its own family name if needed.
pub struct TtfMetrics<'a> {
    default : Face<'a>,
    faces : HashMap<String, Face<'a>>,
}

impl<'a> TtfMetrics<'a> {
    /// Creates metrics using `face` for every family
    pub fn new(face : Face<'a>) -> Self {
        Self { default : face, faces : HashMap::new() }
    }

    /// Uses `face` for the family `family`
    pub fn with_face(mut self, family : &str, face : Face<'a>) -> Self {
        self.faces.insert(family.to_string(), face);
        self
    }

    /// The face used to render `font`
    pub fn face_for(&self, font : &FontDescriptor) -> &Face<'a> {
        self.faces.get(&font.family).unwrap_or(&self.default)
    }

    /// Pixels per font unit at the size of `font`
    pub fn scale(&self, font : &FontDescriptor) -> f64 {
        font.size.to_unitless() / self.face_for(font).units_per_em() as f64
    }

    /// The glyph for `c`, falling back to the default face and then to `.notdef`
    pub fn glyph(&self, font : &FontDescriptor, c : char) -> (&Face<'a>, GlyphId) {
        let face = self.face_for(font);
        if let Some(gid) = face.glyph_index(c) {
            return (face, gid);
        }
        match self.default.glyph_index(c) {
            Some(gid) => (&self.default, gid),
            None => (face, GlyphId(0)),
        }
    }

    fn px(&self, font : &FontDescriptor, value : f64) -> Unit<Px> {
        Unit::new(value * self.scale(font))
    }
}

impl<'a> FontMetrics for TtfMetrics<'a> {
    fn width(&self, font : &FontDescriptor, text : &str) -> Unit<Px> {
        text.chars()
            .map(|c| {
                let (face, gid) = self.glyph(font, c);
                let advance = face.glyph_hor_advance(gid).unwrap_or(0) as f64;
                Unit::new(advance * font.size.to_unitless() / face.units_per_em() as f64)
            })
            .sum()
    }

    fn tight_bounding_box(&self, font : &FontDescriptor, text : &str) -> BBox<Px> {
        let mut x = Unit::<Px>::ZERO;
        let mut bbox : Option<BBox<Px>> = None;
        for c in text.chars() {
            let (face, gid) = self.glyph(font, c);
            let scale = font.size.to_unitless() / face.units_per_em() as f64;
            if let Some(rect) = face.glyph_bounding_box(gid) {
                // font units are y-up
                let glyph = BBox::new(
                    x + Unit::new(rect.x_min as f64 * scale),
                    Unit::new(-rect.y_max as f64 * scale),
                    x + Unit::new(rect.x_max as f64 * scale),
                    Unit::new(-rect.y_min as f64 * scale),
                );
                bbox = Some(match bbox {
                    Some(b) => b.union(glyph),
                    None => glyph,
                });
            }
            x += Unit::new(face.glyph_hor_advance(gid).unwrap_or(0) as f64 * scale);
        }
        bbox.unwrap_or_else(|| BBox::new(Unit::ZERO, Unit::ZERO, x, Unit::ZERO))
    }

    fn left_bearing(&self, font : &FontDescriptor, c : char) -> Unit<Px> {
        let (face, gid) = self.glyph(font, c);
        let bearing = face.glyph_hor_side_bearing(gid).unwrap_or(0) as f64;
        Unit::new(bearing * font.size.to_unitless() / face.units_per_em() as f64)
    }

    fn right_bearing(&self, font : &FontDescriptor, c : char) -> Unit<Px> {
        let (face, gid) = self.glyph(font, c);
        let scale = font.size.to_unitless() / face.units_per_em() as f64;
        let advance = face.glyph_hor_advance(gid).unwrap_or(0) as f64;
        match face.glyph_bounding_box(gid) {
            Some(rect) => Unit::new((advance - rect.x_max as f64) * scale),
            None => Unit::ZERO,
        }
    }

    fn strikeout_pos(&self, font : &FontDescriptor) -> Unit<Px> {
        let face = self.face_for(font);
        match face.strikeout_metrics() {
            Some(metrics) => self.px(font, metrics.position as f64),
            None => self.x_height(font).scale(0.5),
        }
    }

    fn line_width(&self, font : &FontDescriptor) -> Unit<Px> {
        let face = self.face_for(font);
        match face.underline_metrics() {
            Some(metrics) if metrics.thickness > 0 => self.px(font, metrics.thickness as f64),
            _ => font.size.scale(0.05),
        }
    }

    fn ascent(&self, font : &FontDescriptor) -> Unit<Px> {
        self.px(font, self.face_for(font).ascender() as f64)
    }

    fn descent(&self, font : &FontDescriptor) -> Unit<Px> {
        self.px(font, -(self.face_for(font).descender() as f64))
    }

    fn leading(&self, font : &FontDescriptor) -> Unit<Px> {
        self.px(font, self.face_for(font).line_gap() as f64)
    }

    fn x_height(&self, font : &FontDescriptor) -> Unit<Px> {
        match self.face_for(font).x_height() {
            Some(height) => self.px(font, height as f64),
            None => self.tight_bounding_box(font, "x").total_height(),
        }
    }
}

//! Fonts, as seen by the layout engine: a [`FontDescriptor`] names a font, a [`FontMetrics`] implementation measures text in it.
//!
//! The engine never loads glyphs itself: measuring strings is the job of whatever canvas the formula is drawn on.

/// Thread-safe cache for font measurements.
#[deny(missing_docs)]
pub mod cache;
/// Deterministic metrics, for headless layout and tests.
#[deny(missing_docs)]
pub mod fixed;
/// Metrics read from a font file parsed by 'ttf-parser'.
#[cfg(feature="ttfparser-fontparser")]
#[deny(missing_docs)]
pub mod ttf;

use std::hash::{Hash, Hasher};

use crate::dimensions::{Unit, units::Px};
use crate::environment::{Capitalization, FontFamily};
use crate::geometry::BBox;


/// A concrete font: family name, pixel size and style
#[derive(Debug, Clone)]
pub struct FontDescriptor {
    /// name of the font family, e.g. "serif"
    pub family : String,
    /// size of an em, in pixels
    pub size : Unit<Px>,
    /// bold weight
    pub bold : bool,
    /// italic style
    pub italic : bool,
    /// capitalization applied when rendering
    pub capitalization : Capitalization,
}

impl PartialEq for FontDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
        && self.size.to_unitless().to_bits() == other.size.to_unitless().to_bits()
        && self.bold == other.bold
        && self.italic == other.italic
        && self.capitalization == other.capitalization
    }
}

impl Eq for FontDescriptor {}

impl Hash for FontDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.size.to_unitless().to_bits().hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.capitalization.hash(state);
    }
}

impl FontDescriptor {
    /// A copy of the font with its size multiplied by `factor`
    pub fn scaled(&self, factor : f64) -> Self {
        Self {
            size : self.size.scale(factor),
            ..self.clone()
        }
    }

    /// A copy of the font, without italic
    pub fn upright(&self) -> Self {
        Self {
            italic : false,
            ..self.clone()
        }
    }
}


/// Measurements of text, as provided by a canvas.
///
/// Every quantity is in device pixels. Boxes are given in device coordinates relative to the start of the baseline:
/// y grows downwards, so the part of a glyph above the baseline has negative y.
pub trait FontMetrics {
    /// Advance width of `text`
    fn width(&self, font : &FontDescriptor, text : &str) -> Unit<Px>;
    /// Smallest box containing the ink of `text`
    fn tight_bounding_box(&self, font : &FontDescriptor, text : &str) -> BBox<Px>;
    /// Box spanning the advance width of `text` and the ascent/descent of the font
    fn bounding_box(&self, font : &FontDescriptor, text : &str) -> BBox<Px> {
        BBox::new(Unit::ZERO, -self.ascent(font), self.width(font, text), self.descent(font))
    }
    /// Distance between the pen position and the leftmost ink of `c`
    fn left_bearing(&self, font : &FontDescriptor, c : char) -> Unit<Px>;
    /// Distance between the rightmost ink of `c` and the advance
    fn right_bearing(&self, font : &FontDescriptor, c : char) -> Unit<Px>;
    /// Height of the strike-through line above the baseline
    fn strikeout_pos(&self, font : &FontDescriptor) -> Unit<Px>;
    /// Thickness of lines (underline, fraction bar) in this font
    fn line_width(&self, font : &FontDescriptor) -> Unit<Px>;
    /// Height of the font above the baseline
    fn ascent(&self, font : &FontDescriptor) -> Unit<Px>;
    /// Depth of the font below the baseline (positive)
    fn descent(&self, font : &FontDescriptor) -> Unit<Px>;
    /// Ascent plus descent
    fn height(&self, font : &FontDescriptor) -> Unit<Px> {
        self.ascent(font) + self.descent(font)
    }
    /// Space between the descent of a line and the ascent of the next one
    fn leading(&self, font : &FontDescriptor) -> Unit<Px>;
    /// Distance between two baselines
    fn line_spacing(&self, font : &FontDescriptor) -> Unit<Px> {
        self.height(font) + self.leading(font)
    }
    /// Height of lower-case letters
    fn x_height(&self, font : &FontDescriptor) -> Unit<Px>;
    /// Identifies the device the metrics are taken for: metrics of the same font differ from one device to another.
    fn device_id(&self) -> Option<usize> {
        None
    }
}

impl<'a, M : FontMetrics + ?Sized> FontMetrics for &'a M {
    fn width(&self, font : &FontDescriptor, text : &str) -> Unit<Px> { (**self).width(font, text) }
    fn tight_bounding_box(&self, font : &FontDescriptor, text : &str) -> BBox<Px> { (**self).tight_bounding_box(font, text) }
    fn bounding_box(&self, font : &FontDescriptor, text : &str) -> BBox<Px> { (**self).bounding_box(font, text) }
    fn left_bearing(&self, font : &FontDescriptor, c : char) -> Unit<Px> { (**self).left_bearing(font, c) }
    fn right_bearing(&self, font : &FontDescriptor, c : char) -> Unit<Px> { (**self).right_bearing(font, c) }
    fn strikeout_pos(&self, font : &FontDescriptor) -> Unit<Px> { (**self).strikeout_pos(font) }
    fn line_width(&self, font : &FontDescriptor) -> Unit<Px> { (**self).line_width(font) }
    fn ascent(&self, font : &FontDescriptor) -> Unit<Px> { (**self).ascent(font) }
    fn descent(&self, font : &FontDescriptor) -> Unit<Px> { (**self).descent(font) }
    fn height(&self, font : &FontDescriptor) -> Unit<Px> { (**self).height(font) }
    fn leading(&self, font : &FontDescriptor) -> Unit<Px> { (**self).leading(font) }
    fn line_spacing(&self, font : &FontDescriptor) -> Unit<Px> { (**self).line_spacing(font) }
    fn x_height(&self, font : &FontDescriptor) -> Unit<Px> { (**self).x_height(font) }
    fn device_id(&self) -> Option<usize> { (**self).device_id() }
}


/// Names of the fonts the logical [`FontFamily`]s resolve to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSet {
    /// text serif font
    pub roman : String,
    /// text sans-serif font
    pub sans : String,
    /// serif font inside math
    pub math_roman : String,
    /// sans-serif font inside math
    pub math_sans : String,
    /// monospaced font
    pub typewriter : String,
    /// script font
    pub script : String,
    /// blackboard font
    pub blackboard : String,
    /// calligraphic font
    pub caligraphic : String,
    /// fraktur font
    pub fraktur : String,
    /// font providing the symbols missing elsewhere
    pub fallback_symbol : String,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            roman           : "serif".to_string(),
            sans            : "sans-serif".to_string(),
            math_roman      : "serif".to_string(),
            math_sans       : "sans-serif".to_string(),
            typewriter      : "monospace".to_string(),
            script          : "cursive".to_string(),
            blackboard      : "serif".to_string(),
            caligraphic     : "cursive".to_string(),
            fraktur         : "fantasy".to_string(),
            fallback_symbol : "serif".to_string(),
        }
    }
}

impl FontSet {
    /// Name of the font a logical family resolves to, independently of math mode
    pub fn name_of(&self, family : FontFamily) -> Option<&str> {
        match family {
            FontFamily::Roman | FontFamily::Current => Some(&self.roman),
            FontFamily::Sans           => Some(&self.sans),
            FontFamily::MathRoman      => Some(&self.math_roman),
            FontFamily::MathSans       => Some(&self.math_sans),
            FontFamily::Typewriter     => Some(&self.typewriter),
            FontFamily::Script         => Some(&self.script),
            FontFamily::Blackboard     => Some(&self.blackboard),
            FontFamily::Caligraphic    => Some(&self.caligraphic),
            FontFamily::Fraktur        => Some(&self.fraktur),
            FontFamily::FallbackSymbol => Some(&self.fallback_symbol),
            FontFamily::Custom         => None,
        }
    }
}

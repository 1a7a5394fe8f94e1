//! Font metrics computed from fixed proportions rather than read from a font.
//!
//! Useful to lay formulas out without a canvas (e.g. on a server computing sizes only) and to get reproducible numbers in tests.
//! All proportions are given in em and scaled by the font size.

use crate::dimensions::{Unit, units::Px};
use crate::environment::Capitalization;
use crate::font::{FontDescriptor, FontMetrics};
use crate::geometry::BBox;

/// Proportions, in em, from which the metrics are computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedMetrics {
    /// advance of an upper-case letter
    pub upper_width : f64,
    /// advance of a lower-case letter or digit
    pub lower_width : f64,
    /// advance of a space
    pub space_width : f64,
    /// advance of any other character
    pub other_width : f64,
    /// extra advance of every character in bold fonts
    pub bold_extra : f64,
    /// font ascent
    pub ascent : f64,
    /// font descent
    pub descent : f64,
    /// font leading
    pub leading : f64,
    /// height of capitals, digits and ascenders
    pub cap_height : f64,
    /// height of lower-case letters
    pub x_height : f64,
    /// depth of descenders
    pub descender_depth : f64,
    /// position of the strike-through line
    pub strikeout : f64,
    /// thickness of lines
    pub line_width : f64,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            upper_width : 0.7,
            lower_width : 0.5,
            space_width : 0.25,
            other_width : 0.6,
            bold_extra : 0.05,
            ascent : 0.8,
            descent : 0.2,
            leading : 0.2,
            cap_height : 0.7,
            x_height : 0.45,
            descender_depth : 0.2,
            strikeout : 0.25,
            line_width : 0.05,
        }
    }
}

impl FixedMetrics {
    fn em(&self, font : &FontDescriptor, value : f64) -> Unit<Px> {
        font.size.scale(value)
    }

    fn char_width(&self, font : &FontDescriptor, c : char) -> f64 {
        if c.is_whitespace() {
            return self.space_width;
        }
        let base = if c.is_uppercase() {
            self.upper_width
        }
        else if c.is_lowercase() && font.capitalization == Capitalization::SmallCaps {
            self.upper_width * 0.8
        }
        else if c.is_lowercase() || c.is_ascii_digit() {
            self.lower_width
        }
        else {
            self.other_width
        };
        if font.bold { base + self.bold_extra } else { base }
    }

    /// height above the baseline and depth below of the ink of `c`, in em
    fn char_extent(&self, font : &FontDescriptor, c : char) -> Option<(f64, f64)> {
        if c.is_whitespace() {
            return None;
        }
        let small_caps = font.capitalization == Capitalization::SmallCaps;
        let height = match c {
            'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't' | 'i' | 'j' => self.cap_height,
            _ if c.is_lowercase() && small_caps => self.cap_height * 0.8,
            _ if c.is_lowercase() => self.x_height,
            '-' | '+' | '=' | '~' => self.x_height * 0.8,
            '.' | ',' | '_' => self.x_height * 0.2,
            _ => self.cap_height,
        };
        let depth = match c {
            'g' | 'j' | 'p' | 'q' | 'y' if !small_caps => self.descender_depth,
            '(' | ')' | '[' | ']' | '{' | '}' | '|' | ',' | ';' => self.descender_depth,
            _ => 0.,
        };
        Some((height, depth))
    }
}

impl FontMetrics for FixedMetrics {
    fn width(&self, font : &FontDescriptor, text : &str) -> Unit<Px> {
        let em : f64 = text.chars().map(|c| self.char_width(font, c)).sum();
        self.em(font, em)
    }

    fn tight_bounding_box(&self, font : &FontDescriptor, text : &str) -> BBox<Px> {
        let extent = text.chars()
            .filter_map(|c| self.char_extent(font, c))
            .fold(None, |acc : Option<(f64, f64)>, (h, d)| match acc {
                None => Some((h, d)),
                Some((h0, d0)) => Some((h0.max(h), d0.max(d))),
            });
        let width = self.width(font, text);
        match extent {
            Some((height, depth)) => BBox::new(Unit::ZERO, -self.em(font, height), width, self.em(font, depth)),
            None => BBox::new(Unit::ZERO, Unit::ZERO, width, Unit::ZERO),
        }
    }

    fn left_bearing(&self, _font : &FontDescriptor, _c : char) -> Unit<Px> {
        Unit::ZERO
    }

    fn right_bearing(&self, _font : &FontDescriptor, _c : char) -> Unit<Px> {
        Unit::ZERO
    }

    fn strikeout_pos(&self, font : &FontDescriptor) -> Unit<Px> { self.em(font, self.strikeout) }
    fn line_width(&self, font : &FontDescriptor) -> Unit<Px> { self.em(font, self.line_width) }
    fn ascent(&self, font : &FontDescriptor) -> Unit<Px> { self.em(font, self.ascent) }
    fn descent(&self, font : &FontDescriptor) -> Unit<Px> { self.em(font, self.descent) }
    fn leading(&self, font : &FontDescriptor) -> Unit<Px> { self.em(font, self.leading) }
    fn x_height(&self, font : &FontDescriptor) -> Unit<Px> { self.em(font, self.x_height) }
}

//! The formatting state (font, color, size, style flags, math mode) inherited by every node of the tree.
//!
//! An [`Environment`] is a plain value: a node that changes the formatting takes a copy, modifies it
//! and hands the copy down to its children, the caller's environment is never modified.

use crate::dimensions::{Unit, units::{Pt, Px}};
use crate::font::{FontDescriptor, FontSet};
use crate::parser::color::RGBA;

/// Logical font families, resolved to an actual font name through a [`FontSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// serif text font (math roman inside math mode)
    Roman,
    /// sans-serif text font (math sans inside math mode)
    Sans,
    /// font for math
    MathRoman,
    /// sans-serif font for math
    MathSans,
    /// monospaced font
    Typewriter,
    /// script font
    Script,
    /// blackboard-bold font
    Blackboard,
    /// calligraphic font
    Caligraphic,
    /// fraktur font
    Fraktur,
    /// the font used for symbols missing from the other fonts
    FallbackSymbol,
    /// whatever font is currently used, behaves like [`FontFamily::Roman`]
    Current,
    /// the font named in [`Environment::custom_font_name`]
    Custom,
}

/// Unit in which [`Environment::font_size`] is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontSizeUnit {
    /// typographic points (1/72 inch)
    Points,
    /// device pixels
    Pixels,
}

impl std::str::FromStr for FontSizeUnit {
    type Err = ();

    /// Unknown units fall back to points
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pix" | "pixel" | "pixels" | "px" => Ok(FontSizeUnit::Pixels),
            _ => Ok(FontSizeUnit::Points),
        }
    }
}

/// How letters are capitalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capitalization {
    /// letters are rendered as they are written
    Mixed,
    /// lower-case letters are rendered as smaller upper-case letters
    SmallCaps,
    /// every letter is upper-case
    AllUppercase,
    /// every letter is lower-case
    AllLowercase,
}

/// Current formatting state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// current logical font
    pub family : FontFamily,
    /// font used when `family` is [`FontFamily::Custom`]
    pub custom_font_name : String,
    /// current font color
    pub color : RGBA,
    /// current font size, in `font_size_unit`
    pub font_size : f64,
    /// unit of `font_size`
    pub font_size_unit : FontSizeUnit,
    /// is the text currently bold?
    pub bold : bool,
    /// is the text currently italic?
    pub italic : bool,
    /// is the text currently underlined?
    pub underlined : bool,
    /// is the text currently overlined?
    pub overline : bool,
    /// is the text currently struck through?
    pub strike : bool,
    /// capitalization of letters
    pub capitalization : Capitalization,
    /// are we inside a math environment?
    pub inside_math : bool,
    /// inside math, are digits rendered upright (rather than italic)?
    pub force_digits_upright : bool,
    /// inside math, use the compact text style (scripts beside operators) rather than the display style
    pub text_style : bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            family : FontFamily::Roman,
            custom_font_name : String::new(),
            color : RGBA::BLACK,
            font_size : 10.,
            font_size_unit : FontSizeUnit::Points,
            bold : false,
            italic : false,
            underlined : false,
            overline : false,
            strike : false,
            capitalization : Capitalization::Mixed,
            inside_math : false,
            force_digits_upright : true,
            text_style : false,
        }
    }
}

impl Environment {
    /// Switches to math mode: italic on, decorations off.
    pub fn begin_math_mode(&mut self) {
        self.inside_math = true;
        self.force_digits_upright = true;
        self.italic = true;
        self.capitalization = Capitalization::Mixed;
        self.underlined = false;
        self.overline = false;
        self.strike = false;
    }

    /// Leaves math mode: italic off, decorations off.
    pub fn end_math_mode(&mut self) {
        self.inside_math = false;
        self.force_digits_upright = true;
        self.italic = false;
        self.capitalization = Capitalization::Mixed;
        self.underlined = false;
        self.overline = false;
        self.strike = false;
    }

    /// A copy of `self` using the logical font `family`
    pub fn exchanged_font_for(&self, family : FontFamily) -> Self {
        Self {
            family,
            ..self.clone()
        }
    }

    /// A copy of `self` using the roman font of the current mode (math roman inside math)
    pub fn exchanged_font_for_roman(&self) -> Self {
        if self.inside_math {
            self.exchanged_font_for(FontFamily::MathRoman)
        }
        else {
            self.exchanged_font_for(FontFamily::Roman)
        }
    }

    /// A copy of `self` with the font size multiplied by `factor`
    pub fn scaled(&self, factor : f64) -> Self {
        Self {
            font_size : self.font_size * factor,
            ..self.clone()
        }
    }

    /// Font size in device pixels
    pub fn font_size_px(&self) -> Unit<Px> {
        match self.font_size_unit {
            FontSizeUnit::Points => Unit::<Pt>::new(self.font_size) * Unit::standard_pt_to_px(),
            FontSizeUnit::Pixels => Unit::new(self.font_size),
        }
    }

    /// Name of the actual font the logical font resolves to
    pub fn family_name<'a>(&'a self, fonts : &'a FontSet) -> &'a str {
        match self.family {
            FontFamily::Sans if self.inside_math => &fonts.math_sans,
            FontFamily::Roman | FontFamily::Current if self.inside_math => &fonts.math_roman,
            FontFamily::Custom => &self.custom_font_name,
            family => fonts.name_of(family).unwrap_or(&fonts.roman),
        }
    }

    /// The font described by this environment
    pub fn font(&self, fonts : &FontSet) -> FontDescriptor {
        FontDescriptor {
            family : self.family_name(fonts).to_string(),
            size : self.font_size_px(),
            bold : self.bold,
            italic : self.italic,
            capitalization : self.capitalization,
        }
    }

    /// Opening `<span>` carrying the formatting differences with `default`
    pub fn to_html_start(&self, default : &Environment, fonts : &FontSet) -> String {
        let mut style = String::new();
        match self.font_size_unit {
            FontSizeUnit::Points => style.push_str(&format!("font-size: {}pt; ", self.font_size)),
            FontSizeUnit::Pixels => style.push_str(&format!("font-size: {}px; ", self.font_size)),
        }

        if self.italic && !default.italic {
            style.push_str("font-style: italic; ");
        }
        else if !self.italic && default.italic {
            style.push_str("font-style: normal; ");
        }

        if self.bold && !default.bold {
            style.push_str("font-weight: bold; ");
        }
        if self.color != default.color {
            style.push_str(&format!("color: {}; ", self.color.to_css()));
        }
        if self.family != default.family {
            style.push_str(&format!("font-family: {}; ", self.family_name(fonts)));
        }

        let mut decorations = Vec::new();
        if self.underlined && !default.underlined { decorations.push("underline"); }
        if self.overline   && !default.overline   { decorations.push("overline"); }
        if self.strike     && !default.strike     { decorations.push("line-through"); }
        if !decorations.is_empty() {
            style.push_str(&format!("text-decoration: {}; ", decorations.join(" ")));
        }
        match self.capitalization {
            Capitalization::Mixed => (),
            Capitalization::SmallCaps    => style.push_str("font-variant: small-caps; "),
            Capitalization::AllUppercase => style.push_str("text-transform: uppercase; "),
            Capitalization::AllLowercase => style.push_str("text-transform: lowercase; "),
        }

        format!("<span style=\"{}\">", style.trim_end())
    }

    /// Closes what [`Environment::to_html_start`] opened
    pub fn to_html_after(&self, _default : &Environment) -> String {
        "</span>".to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let env = Environment::default();
        assert_eq!(env.color, RGBA::BLACK);
        assert_eq!(env.family, FontFamily::Roman);
        assert_eq!(env.font_size, 10.);
        assert!(!env.inside_math);
        assert!((env.font_size_px().to_unitless() - 40. / 3.).abs() < 1e-9);
    }

    #[test]
    fn math_mode_toggles_italic() {
        let mut env = Environment { underlined : true, ..Environment::default() };
        env.begin_math_mode();
        assert!(env.inside_math && env.italic && !env.underlined);
        env.end_math_mode();
        assert!(!env.inside_math && !env.italic);
    }

    #[test]
    fn exchanged_fonts_are_copies() {
        let mut env = Environment::default();
        let tt = env.exchanged_font_for(FontFamily::Typewriter);
        assert_eq!(tt.family, FontFamily::Typewriter);
        assert_eq!(env.family, FontFamily::Roman);

        env.begin_math_mode();
        env.family = FontFamily::Script;
        assert_eq!(env.exchanged_font_for_roman().family, FontFamily::MathRoman);
    }

    #[test]
    fn family_resolution_depends_on_mode() {
        let fonts = FontSet::default();
        let mut env = Environment::default();
        assert_eq!(env.family_name(&fonts), fonts.roman);
        env.begin_math_mode();
        assert_eq!(env.family_name(&fonts), fonts.math_roman);

        let custom = Environment { family : FontFamily::Custom, custom_font_name : "Fira".into(), ..Environment::default() };
        assert_eq!(custom.font(&fonts).family, "Fira");
    }

    #[test]
    fn html_span() {
        let fonts = FontSet::default();
        let default = Environment::default();
        let bold = Environment { bold : true, underlined : true, ..default.clone() };
        let html = bold.to_html_start(&default, &fonts);
        assert!(html.starts_with("<span style=\"font-size: 10pt;"));
        assert!(html.contains("font-weight: bold;"));
        assert!(html.contains("text-decoration: underline;"));
        assert_eq!(bold.to_html_after(&default), "</span>");
    }

    #[test]
    fn parse_size_unit() {
        assert_eq!("px".parse(), Ok(FontSizeUnit::Pixels));
        assert_eq!("Points".parse(), Ok(FontSizeUnit::Points));
        assert_eq!("furlongs".parse(), Ok(FontSizeUnit::Points));
    }
}

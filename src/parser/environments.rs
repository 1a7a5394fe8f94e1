//! Tables of delimiters, table rules and `\begin{..}` environments known to the parser.

use std::fmt;
use std::str::FromStr;

/// Kind of delimiter drawn by a brace node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BraceType {
    /// `(` `)`
    Paren,
    /// `[` `]`
    Square,
    /// `\{` `\}`
    Curly,
    /// `|`
    SingleLine,
    /// `\|`
    DoubleLine,
    /// `\langle` `\rangle`
    Angle,
    /// `\lfloor` `\rfloor`
    Floor,
    /// `\lceil` `\rceil`
    Ceil,
    /// `\ulcorner` `\urcorner`
    TopCorner,
    /// `\llcorner` `\lrcorner`
    BottomCorner,
    /// `.`: no visible delimiter
    None,
    /// matches any closing delimiter
    Any,
    /// not a delimiter
    Unknown,
}

impl BraceType {
    /// Delimiter written as plain text after `\left`/`\right`, and whether it is an opening one.
    pub fn from_token(name : &str) -> (BraceType, bool) {
        match name {
            "("              => (BraceType::Paren, true),
            ")"              => (BraceType::Paren, false),
            "["              => (BraceType::Square, true),
            "]"              => (BraceType::Square, false),
            "{"              => (BraceType::Curly, true),
            "}"              => (BraceType::Curly, false),
            "|"              => (BraceType::SingleLine, true),
            "||" | "#"       => (BraceType::DoubleLine, true),
            "<" | "langle"   => (BraceType::Angle, true),
            ">" | "rangle"   => (BraceType::Angle, false),
            "_" | "lfloor"   => (BraceType::Floor, true),
            "rfloor"         => (BraceType::Floor, false),
            "~" | "lceil"    => (BraceType::Ceil, true),
            "rceil"          => (BraceType::Ceil, false),
            "ulcorner" | "tlcorner" => (BraceType::TopCorner, true),
            "urcorner" | "trcorner" => (BraceType::TopCorner, false),
            "blcorner" | "llcorner" => (BraceType::BottomCorner, true),
            "brcorner" | "lrcorner" => (BraceType::BottomCorner, false),
            "any"            => (BraceType::Any, true),
            "." | "" | "none" => (BraceType::None, true),
            _                => (BraceType::Unknown, true),
        }
    }

    /// Delimiter written as an instruction (`\langle`, `\{`, `\|`, ...)
    pub fn from_instruction(name : &str) -> BraceType {
        match name {
            "{" | "}"                    => BraceType::Curly,
            "|"                          => BraceType::DoubleLine,
            "langle" | "rangle"          => BraceType::Angle,
            "lfloor" | "rfloor"          => BraceType::Floor,
            "lceil" | "rceil"            => BraceType::Ceil,
            "ulcorner" | "tlcorner" | "urcorner" | "trcorner" => BraceType::TopCorner,
            "llcorner" | "blcorner" | "lrcorner" | "brcorner" => BraceType::BottomCorner,
            _                            => BraceType::Unknown,
        }
    }

    /// Opening delimiter written as an instruction, [`BraceType::Unknown`] for closing ones
    pub fn opening_from_instruction(name : &str) -> BraceType {
        match name {
            "{"                     => BraceType::Curly,
            "|"                     => BraceType::DoubleLine,
            "langle"                => BraceType::Angle,
            "lfloor"                => BraceType::Floor,
            "lceil"                 => BraceType::Ceil,
            "ulcorner" | "tlcorner" => BraceType::TopCorner,
            "llcorner" | "blcorner" => BraceType::BottomCorner,
            _                       => BraceType::Unknown,
        }
    }

    /// Can `found` close a group opened expecting `self`? [`BraceType::Any`] accepts everything,
    /// [`BraceType::None`] is accepted anywhere when `accept_none` is set.
    pub fn accepts(self, found : BraceType, accept_none : bool) -> bool {
        if self == BraceType::Any {
            return true;
        }
        if accept_none && found == BraceType::None {
            return true;
        }
        found != BraceType::Unknown && self == found
    }

    /// Does the delimiter draw something (or stand for something that does)?
    pub fn is_printable(self) -> bool {
        self != BraceType::Any && self != BraceType::Unknown
    }

    /// Characters (opening, closing) used when the delimiter is emitted as text
    pub fn glyphs(self) -> (&'static str, &'static str) {
        match self {
            BraceType::Paren        => ("(", ")"),
            BraceType::Square       => ("[", "]"),
            BraceType::Curly        => ("{", "}"),
            BraceType::SingleLine   => ("|", "|"),
            BraceType::DoubleLine   => ("\u{2016}", "\u{2016}"),
            BraceType::Angle        => ("\u{27E8}", "\u{27E9}"),
            BraceType::Floor        => ("\u{230A}", "\u{230B}"),
            BraceType::Ceil         => ("\u{2308}", "\u{2309}"),
            BraceType::TopCorner    => ("\u{231C}", "\u{231D}"),
            BraceType::BottomCorner => ("\u{231E}", "\u{231F}"),
            BraceType::None | BraceType::Any | BraceType::Unknown => ("", ""),
        }
    }
}

impl fmt::Display for BraceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BraceType::Paren        => "parenthesis",
            BraceType::Square       => "square bracket",
            BraceType::Curly        => "curly bracket",
            BraceType::SingleLine   => "single line",
            BraceType::DoubleLine   => "double line",
            BraceType::Angle        => "angle bracket",
            BraceType::Floor        => "floor",
            BraceType::Ceil         => "ceiling",
            BraceType::TopCorner    => "top corner",
            BraceType::BottomCorner => "bottom corner",
            BraceType::None         => "none",
            BraceType::Any          => "any",
            BraceType::Unknown      => "unknown",
        };
        f.write_str(name)
    }
}


/// Style of a rule line in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineType {
    /// no line
    None,
    /// thin line
    Single,
    /// two thin lines
    Double,
    /// thick line
    Heavy,
    /// dashed thin line
    Dashed,
    /// two dashed thin lines
    DoubleDashed,
}

impl Default for LineType {
    fn default() -> Self {
        LineType::None
    }
}

/// Counts of the rule instructions (`\hline`, `\hdashline`, `\toprule`, ...) met before a table row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleCount {
    /// `\hline`, `\midrule`
    pub single : usize,
    /// `\hdashline`
    pub dashed : usize,
    /// `\toprule`, `\bottomrule`
    pub heavy : usize,
}

impl RuleCount {
    /// Records the rule instruction `name`, returns `false` if `name` is not a rule.
    pub fn record(&mut self, name : &str) -> bool {
        match name {
            "hline" | "midrule"       => self.single += 1,
            "hdashline"               => self.dashed += 1,
            "toprule" | "bottomrule"  => self.heavy += 1,
            _ => return false,
        }
        true
    }

    /// The line drawn for the rules recorded: repeated rules double up, heavy rules win over dashed ones.
    pub fn line_type(&self) -> LineType {
        match (self.single, self.heavy, self.dashed) {
            (1, _, _)               => LineType::Single,
            (s, _, _) if s > 1      => LineType::Double,
            (_, h, _) if h > 0      => LineType::Heavy,
            (_, _, 1)               => LineType::Dashed,
            (_, _, d) if d > 1      => LineType::DoubleDashed,
            _                       => LineType::None,
        }
    }
}


/// Horizontal alignment of lines in a block or of cells in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    /// flush left
    Left,
    /// centered
    Centered,
    /// flush right
    Right,
}

impl Default for HorizontalAlignment {
    fn default() -> Self {
        HorizontalAlignment::Centered
    }
}

impl FromStr for HorizontalAlignment {
    type Err = ();

    /// Unknown names fall back to [`HorizontalAlignment::Centered`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "l" | "left" | "flushleft"   => HorizontalAlignment::Left,
            "r" | "right" | "flushright" => HorizontalAlignment::Right,
            _                            => HorizontalAlignment::Centered,
        })
    }
}

impl fmt::Display for HorizontalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HorizontalAlignment::Left     => "left",
            HorizontalAlignment::Centered => "centered",
            HorizontalAlignment::Right    => "right",
        })
    }
}

/// Which part of a block of lines sits on the baseline of the surrounding text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalOrientation {
    /// top of the first line
    Top,
    /// baseline of the first line
    FirstLine,
    /// middle of the block
    Centered,
    /// baseline of the last line
    LastLine,
    /// bottom of the last line
    Bottom,
}

impl Default for VerticalOrientation {
    fn default() -> Self {
        VerticalOrientation::FirstLine
    }
}

impl FromStr for VerticalOrientation {
    type Err = ();

    /// Unknown names fall back to [`VerticalOrientation::Centered`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "p" | "first_line" | "first-line" | "firstline" | "line1" => VerticalOrientation::FirstLine,
            "last_line" | "last-line" | "lastline" | "linen"          => VerticalOrientation::LastLine,
            "t" | "top"                                               => VerticalOrientation::Top,
            "b" | "bottom"                                            => VerticalOrientation::Bottom,
            _                                                         => VerticalOrientation::Centered,
        })
    }
}

impl fmt::Display for VerticalOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VerticalOrientation::Top       => "top",
            VerticalOrientation::FirstLine => "first_line",
            VerticalOrientation::Centered  => "centered",
            VerticalOrientation::LastLine  => "last_line",
            VerticalOrientation::Bottom    => "bottom",
        })
    }
}

/// How far apart consecutive lines of a block are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpacingMode {
    /// at least the line spacing of the font, more if a line is taller than the font
    Default,
    /// lines only separated by the leading of the font
    Minimal,
}

impl Default for SpacingMode {
    fn default() -> Self {
        SpacingMode::Default
    }
}


/// Column specification of an `array` or `tabular`, e.g. `|l|c:r|`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// alignment of each column
    pub alignments : Vec<HorizontalAlignment>,
    /// vertical rule left of each column, plus the one right of the last column
    pub lines : Vec<LineType>,
}

impl ColumnSpec {
    /// Parses a column specification. Unknown characters (including spaces) are ignored.
    pub fn parse(spec : &str) -> Self {
        let mut alignments = Vec::new();
        let mut lines = Vec::new();
        let mut pending = LineType::None;

        for c in spec.chars() {
            match c {
                'l' | 'c' | 'r' => {
                    lines.push(pending);
                    pending = LineType::None;
                    alignments.push(match c {
                        'l' => HorizontalAlignment::Left,
                        'r' => HorizontalAlignment::Right,
                        _   => HorizontalAlignment::Centered,
                    });
                },
                '|' => pending = match pending {
                    LineType::None => LineType::Single,
                    _              => LineType::Double,
                },
                ':' => pending = match pending {
                    LineType::None => LineType::Dashed,
                    _              => LineType::DoubleDashed,
                },
                _ => (),
            }
        }
        lines.push(pending);

        Self { alignments, lines }
    }

    /// Alignment of column `col`, centered past the end of the specification
    pub fn alignment(&self, col : usize) -> HorizontalAlignment {
        self.alignments.get(col).copied().unwrap_or_default()
    }

    /// Rule left of column `col` (`col == columns` for the rule right of the last column)
    pub fn line_before(&self, col : usize) -> LineType {
        self.lines.get(col).copied().unwrap_or_default()
    }
}


/// Matrix-like environments, whose cells are separated by `&` and rows by `\\`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixEnvironment {
    /// `matrix`
    Matrix,
    /// `array`, takes a column specification
    Array,
    /// `aligned`
    Aligned,
    /// `align`
    Align,
    /// `cases`, curly brace on the left
    Cases,
    /// `pmatrix`, in parentheses
    PMatrix,
    /// `bmatrix`, in square brackets
    BMatrix,
    /// `Bmatrix`, in curly brackets
    CurlyMatrix,
    /// `vmatrix`, between single lines
    VMatrix,
    /// `Vmatrix`, between double lines
    DoubleVMatrix,
    /// `tabular`, takes a column specification
    Tabular,
}

impl MatrixEnvironment {
    /// Environment named `name`, if it is matrix-like
    pub fn from_name(name : &str) -> Option<Self> {
        Some(match name {
            "matrix"  => MatrixEnvironment::Matrix,
            "array"   => MatrixEnvironment::Array,
            "aligned" => MatrixEnvironment::Aligned,
            "align"   => MatrixEnvironment::Align,
            "cases"   => MatrixEnvironment::Cases,
            "pmatrix" => MatrixEnvironment::PMatrix,
            "bmatrix" => MatrixEnvironment::BMatrix,
            "Bmatrix" => MatrixEnvironment::CurlyMatrix,
            "vmatrix" => MatrixEnvironment::VMatrix,
            "Vmatrix" => MatrixEnvironment::DoubleVMatrix,
            "tabular" => MatrixEnvironment::Tabular,
            _ => return None,
        })
    }

    /// Is `\begin{..}` followed by a `{colspec}` argument?
    pub fn takes_column_spec(self) -> bool {
        matches!(self, MatrixEnvironment::Array | MatrixEnvironment::Tabular)
    }

    /// Delimiters (opening, closing) the matrix is wrapped into
    pub fn braces(self) -> Option<(BraceType, BraceType)> {
        match self {
            MatrixEnvironment::PMatrix       => Some((BraceType::Paren, BraceType::Paren)),
            MatrixEnvironment::Cases         => Some((BraceType::Curly, BraceType::None)),
            MatrixEnvironment::BMatrix       => Some((BraceType::Square, BraceType::Square)),
            MatrixEnvironment::CurlyMatrix   => Some((BraceType::Curly, BraceType::Curly)),
            MatrixEnvironment::VMatrix       => Some((BraceType::SingleLine, BraceType::SingleLine)),
            MatrixEnvironment::DoubleVMatrix => Some((BraceType::DoubleLine, BraceType::DoubleLine)),
            _ => None,
        }
    }
}

/// Environments holding several lines of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnvironment {
    /// `center`, `flushleft`, `flushright`, `document`
    Aligned(HorizontalAlignment),
    /// `framed`, `shaded`, `snugshade`: the lines in a box of the same name
    Boxed(&'static str),
}

impl BlockEnvironment {
    /// Environment named `name`, if it is a block of lines
    pub fn from_name(name : &str) -> Option<Self> {
        Some(match name {
            "document"   => BlockEnvironment::Aligned(HorizontalAlignment::Left),
            "center"     => BlockEnvironment::Aligned(HorizontalAlignment::Centered),
            "flushleft"  => BlockEnvironment::Aligned(HorizontalAlignment::Left),
            "flushright" => BlockEnvironment::Aligned(HorizontalAlignment::Right),
            "framed"     => BlockEnvironment::Boxed("framed"),
            "shaded"     => BlockEnvironment::Boxed("shaded"),
            "snugshade"  => BlockEnvironment::Boxed("snugshade"),
            _ => return None,
        })
    }
}


/// Height, in em, of the invisible box sized by `\big` and its relatives
pub fn big_size_factor(name : &str) -> Option<f64> {
    let stem = name
        .strip_suffix('l')
        .or_else(|| name.strip_suffix('m'))
        .or_else(|| name.strip_suffix('r'))
        .unwrap_or(name);
    match stem {
        "big"  => Some(0.85),
        "Big"  => Some(1.15),
        "bigg" => Some(1.45),
        "Bigg" => Some(1.75),
        _ => None,
    }
}

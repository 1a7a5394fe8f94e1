//! Converting [`Node`]s to [`LayoutBox`]es which are ready to be rendered.
//!
//! Layout happens once per formula: every node is measured and the primitives it draws (text runs, lines,
//! rectangles, paths) are positioned relative to the start of its baseline. A [`LayoutBox`] therefore carries
//! both answers to the two questions asked of a node, its size ([`NodeSize`]) and what it draws.
//! Drawing a box advances the cursor by exactly [`NodeSize::width`], whatever the node.
//!
//! All lengths are in device pixels, y grows downwards: content above the baseline has negative y.
//!
//! Measurements come from a [`FontMetrics`] implementation, the engine factors from [`LayoutSettings`].

mod builders;
mod decorations;
mod engine;
mod horizontal;
mod vertical;

use crate::dimensions::{units::Px, Unit};
use crate::environment::{Environment, FontSizeUnit};
use crate::font::{FontDescriptor, FontMetrics, FontSet};
use crate::parser::color::RGBA;
use crate::parser::nodes::{Node, NodeKind};
use crate::parser::EngineContext;
use crate::render::{Brush, Path, Pen};

pub use self::builders::Placed;

/// Size of a node, relative to the start of its baseline
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeSize {
    /// horizontal advance
    pub width : Unit<Px>,
    /// distance from the top of the node to its baseline
    pub baseline_height : Unit<Px>,
    /// distance from the top to the bottom of the node
    pub overall_height : Unit<Px>,
    /// height of the strikeout line above the baseline
    pub strikeout_pos : Unit<Px>,
    /// how far a subscript following this node is shifted to the right (italic overhang at the baseline)
    pub baseline_x_correction : Unit<Px>,
    /// how far a superscript following this node is shifted to the right
    pub top_x_correction : Unit<Px>,
}

impl NodeSize {
    /// Distance from the baseline to the bottom of the node
    pub fn descent(&self) -> Unit<Px> {
        self.overall_height - self.baseline_height
    }
}

/// Something a node draws
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Text whose baseline starts at the item position
    Text {
        /// the characters
        text : String,
        /// the font
        font : FontDescriptor,
        /// the color
        color : RGBA,
    },
    /// A straight line from the item position
    Line {
        /// horizontal extent
        dx : Unit<Px>,
        /// vertical extent
        dy : Unit<Px>,
        /// stroke
        pen : Pen,
    },
    /// A rectangle whose top-left corner is at the item position
    Rect {
        /// width
        width : Unit<Px>,
        /// height
        height : Unit<Px>,
        /// frame, if any
        pen : Option<Pen>,
        /// fill, if any
        brush : Option<Brush>,
        /// radius of the rounded corners
        rounding : Unit<Px>,
    },
    /// A path whose coordinates are relative to the item position
    Path {
        /// the outline
        path : Path,
        /// stroke, if any
        pen : Option<Pen>,
        /// fill, if any
        brush : Option<Brush>,
    },
    /// A nested box, the item position being the start of its baseline
    Box(LayoutBox),
}

/// A primitive positioned relative to the start of the baseline of its box
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem {
    /// offset to the right
    pub x : Unit<Px>,
    /// offset downwards
    pub y : Unit<Px>,
    /// what is drawn
    pub primitive : Primitive,
}

/// A laid out node: its size and what it draws
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutBox {
    /// kind of the node this box was made for, `None` for helper boxes
    pub kind : Option<NodeKind>,
    /// size of the node
    pub size : NodeSize,
    /// drawn items, in drawing order
    pub contents : Vec<LayoutItem>,
}

/// Factors of the layout engine and root formatting.
///
/// Every factor is relative: to the font size for size factors, to some measured length (height of "x",
/// line width, ..) for the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// font size of the root environment
    pub font_size : f64,
    /// unit of `font_size`
    pub font_size_unit : FontSizeUnit,
    /// font color of the root environment
    pub color : RGBA,
    /// actual fonts behind the logical families
    pub fonts : FontSet,

    /// delimiters are this much higher than their content
    pub brace_factor : f64,
    /// width of delimiters, relative to the width of the glyph
    pub brace_shrink_factor : f64,
    /// vertical position of the middle of glyph delimiters, relative to the strikeout line
    pub brace_y_shift_factor : f64,
    /// font size of sub- and superscripts
    pub subsuper_size_factor : f64,
    /// italic correction, relative to the width of "x"
    pub italic_correction_factor : f64,
    /// how far subscripts go down, relative to the height of "x"
    pub sub_shift_factor : f64,
    /// how far superscripts go up, relative to the height of "x"
    pub super_shift_factor : f64,
    /// after a large node, share of the subscript height below the node
    pub special_sub_shift_factor : f64,
    /// after a large node, share of the superscript height above the node top
    pub special_super_shift_factor : f64,
    /// font size of numerator and denominator
    pub frac_factor : f64,
    /// font size of numerator and denominator of fractions nested in fractions
    pub frac_nested_factor : f64,
    /// distance between the fraction line and the numerator/denominator, relative to the height of "x"
    pub frac_shift_factor : f64,
    /// font size of the annotation of under/overbraces
    pub underbrace_factor : f64,
    /// font size of the annotation of under/oversets
    pub underset_factor : f64,
    /// height of decorations, relative to the height of the decorated node
    pub decoration_height_factor : f64,
    /// decorations are narrower than their node by this share of the width of "X"
    pub decoration_width_reduction_factor : f64,
    /// font size of scripts placed above and below operators
    pub operatorsubsuper_size_factor : f64,
    /// distance between operators and their scripts, relative to the x-height
    pub operatorsubsuper_distance_factor : f64,
    /// extra room on both sides of operators with limits, relative to the width of "x"
    pub operatorsubsuper_extra_space_factor : f64,
    /// width of operator symbols, relative to their ink
    pub mathoperator_width_factor : f64,
    /// font size of big operators (`\sum`) in display style
    pub big_operator_font_factor : f64,
    /// scripts are placed relative to the previous node when it is larger than the font by this factor
    pub subsuper_mode_selection_by_size_factor : f64,
    /// width of the root sign, relative to the width of "X"
    pub sqrt_width_factor : f64,
    /// the root sign is this much higher than its content
    pub sqrt_height_factor : f64,
    /// font size of the root degree
    pub sqrt_small_font_factor : f64,
    /// width of thin table rules, relative to the font line width
    pub matrix_line_width_thin_factor : f64,
    /// width of heavy table rules, relative to the font line width
    pub matrix_line_width_heavy_factor : f64,
    /// distance between the two lines of double rules, relative to the thin rule width
    pub matrix_line_separation_factor : f64,
    /// space left and right of the table, relative to the width of "x"
    pub matrix_x_padding_factor : f64,
    /// space above and below the table, relative to the width of "x"
    pub matrix_y_padding_factor : f64,
    /// space between columns, relative to the width of "x"
    pub matrix_x_separation_factor : f64,
    /// space between rows, relative to the width of "x"
    pub matrix_y_separation_factor : f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            font_size : 10.,
            font_size_unit : FontSizeUnit::Points,
            color : RGBA::BLACK,
            fonts : FontSet::default(),
            brace_factor : 1.04,
            brace_shrink_factor : 0.6,
            brace_y_shift_factor : 0.7,
            subsuper_size_factor : 0.7,
            italic_correction_factor : 0.4,
            sub_shift_factor : 0.4,
            super_shift_factor : 0.5,
            special_sub_shift_factor : 0.4,
            special_super_shift_factor : 0.4,
            frac_factor : 0.9,
            frac_nested_factor : 0.7,
            frac_shift_factor : 0.4,
            underbrace_factor : 0.75,
            underset_factor : 0.7,
            decoration_height_factor : 0.2,
            decoration_width_reduction_factor : 0.2,
            operatorsubsuper_size_factor : 0.65,
            operatorsubsuper_distance_factor : 0.25,
            operatorsubsuper_extra_space_factor : 0.5,
            mathoperator_width_factor : 1.5,
            big_operator_font_factor : 1.8,
            subsuper_mode_selection_by_size_factor : 1.01,
            sqrt_width_factor : 0.8,
            sqrt_height_factor : 1.2,
            sqrt_small_font_factor : 0.57,
            matrix_line_width_thin_factor : 1.0,
            matrix_line_width_heavy_factor : 3.0,
            matrix_line_separation_factor : 2.0,
            matrix_x_padding_factor : 1.0,
            matrix_y_padding_factor : 1.0,
            matrix_x_separation_factor : 0.5,
            matrix_y_separation_factor : 0.5,
        }
    }
}

impl LayoutSettings {
    /// The environment a formula starts in
    pub fn root_environment(&self) -> Environment {
        Environment {
            font_size : self.font_size,
            font_size_unit : self.font_size_unit,
            color : self.color,
            ..Environment::default()
        }
    }
}

/// What layout reads besides the node and its environment
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    /// engine factors and fonts
    pub settings : &'a LayoutSettings,
    /// text measurements
    pub metrics : &'a dyn FontMetrics,
}

impl<'a> LayoutContext<'a> {
    /// Creates a context
    pub fn new(settings : &'a LayoutSettings, metrics : &'a dyn FontMetrics) -> Self {
        Self { settings, metrics }
    }

    /// The font of `env`
    pub fn font(&self, env : &Environment) -> FontDescriptor {
        env.font(&self.settings.fonts)
    }

    /// Line width of the font of `env`
    pub fn line_width(&self, env : &Environment) -> Unit<Px> {
        self.metrics.line_width(&self.font(env))
    }

    /// What instruction behaviors see when evaluated in `env`
    pub fn engine_context(&self, env : &Environment) -> EngineContext {
        EngineContext {
            font_size : self.settings.font_size,
            font_size_unit : self.settings.font_size_unit,
            color : self.settings.color,
            line_width : self.line_width(env),
        }
    }
}

/// Kinds of the nodes enclosing the node being laid out, innermost first.
///
/// Passed down the recursive walk instead of a parent pointer stored in the tree.
#[derive(Debug, Clone, Copy)]
pub struct Ancestors<'a> {
    kind : Option<NodeKind>,
    parent : Option<&'a Ancestors<'a>>,
}

impl Ancestors<'static> {
    /// No enclosing node
    pub const ROOT : Ancestors<'static> = Ancestors { kind : None, parent : None };
}

impl<'a> Ancestors<'a> {
    /// `self` with `kind` as innermost ancestor
    pub fn push(&'a self, kind : NodeKind) -> Ancestors<'a> {
        Ancestors { kind : Some(kind), parent : Some(self) }
    }

    /// Kinds of the enclosing nodes, innermost first
    pub fn iter(&self) -> impl Iterator<Item = NodeKind> + '_ {
        let mut current = Some(self);
        std::iter::from_fn(move || {
            while let Some(ancestors) = current {
                current = ancestors.parent;
                if let Some(kind) = ancestors.kind {
                    return Some(kind);
                }
            }
            None
        })
    }

    /// Whether some enclosing node is of kind `kind`
    pub fn contains(&self, kind : NodeKind) -> bool {
        self.iter().any(|k| k == kind)
    }

    /// Number of enclosing nodes
    pub fn depth(&self) -> usize {
        self.iter().count()
    }
}

/// Lays out `node` in environment `env`
pub fn layout(node : &Node, env : &Environment, ctx : LayoutContext<'_>) -> LayoutBox {
    engine::layout_node(node, env, ctx, &Ancestors::ROOT, None)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::fixed::FixedMetrics;
    use crate::parser::{ParseOptions, Parser};

    pub(crate) const ERROR_TOLERANCE : f64 = 1e-6;

    pub(crate) fn parse_math(input : &str) -> Node {
        Parser::new(input)
            .with_options(ParseOptions { wrap_in_math : true, ..ParseOptions::default() })
            .parse()
            .root
    }

    pub(crate) fn layout_math(input : &str) -> LayoutBox {
        let settings = LayoutSettings::default();
        let metrics = FixedMetrics::default();
        let ctx = LayoutContext::new(&settings, &metrics);
        layout(&parse_math(input), &settings.root_environment(), ctx)
    }

    #[test]
    fn ancestors() {
        let root = Ancestors::ROOT;
        assert_eq!(root.depth(), 0);
        let frac = root.push(NodeKind::Fraction);
        let sub = frac.push(NodeKind::Subscript);
        assert_eq!(sub.iter().collect::<Vec<_>>(), vec![NodeKind::Subscript, NodeKind::Fraction]);
        assert!(sub.contains(NodeKind::Fraction));
        assert!(!frac.contains(NodeKind::Subscript));
        assert_eq!(sub.depth(), 2);
    }

    #[test]
    fn settings_from_yaml() {
        let settings : LayoutSettings = serde_yaml::from_str("font_size: 20\nfrac_factor: 0.5\n").unwrap();
        assert_eq!(settings.font_size, 20.);
        assert_eq!(settings.frac_factor, 0.5);
        assert_eq!(settings.brace_factor, LayoutSettings::default().brace_factor);
        assert_eq!(settings.root_environment().font_size, 20.);
    }

    #[test]
    fn engine_context_follows_settings() {
        let settings = LayoutSettings { font_size : 12., color : RGBA::WHITE, ..LayoutSettings::default() };
        let metrics = FixedMetrics::default();
        let ctx = LayoutContext::new(&settings, &metrics);
        let engine = ctx.engine_context(&settings.root_environment());
        assert_eq!(engine.font_size, 12.);
        assert_eq!(engine.color, RGBA::WHITE);
        assert!(engine.line_width > Unit::ZERO);
    }

    #[test]
    fn empty_formula() {
        let layout = layout_math("");
        assert_eq!(layout.size.width, Unit::ZERO);
    }
}

//! The syntax tree produced by the parser.
//!
//! Every node owns its children. Nodes carry no formatting state of their own: the [`Environment`](crate::environment::Environment)
//! a node is laid out with is handed down by its ancestors, and instruction nodes describe how they change it.

use std::fmt;

use super::environments::{BraceType, ColumnSpec, HorizontalAlignment, LineType, SpacingMode, VerticalOrientation};
use super::instructions::{BoxStyle, Modifier};
use super::symbols::Symbol;

/// Kind of a [`Node`], without its contents. Used to describe the ancestors of a node during layout
/// and to label debug boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`Node::Text`]
    Text,
    /// [`Node::Symbol`]
    Symbol,
    /// [`Node::Whitespace`]
    Whitespace,
    /// [`Node::Verbatim`]
    Verbatim,
    /// [`Node::List`]
    List,
    /// [`Node::VerticalList`]
    VerticalList,
    /// [`Node::Block`]
    Block,
    /// [`Node::Subscript`]
    Subscript,
    /// [`Node::Superscript`]
    Superscript,
    /// [`Node::Fraction`]
    Fraction,
    /// [`Node::Sqrt`]
    Sqrt,
    /// [`Node::Brace`]
    Brace,
    /// [`Node::Matrix`]
    Matrix,
    /// [`Node::Decorated`]
    Decorated,
    /// [`Node::TextProps`]
    TextProps,
    /// [`Node::BoxInstruction`]
    BoxInstruction,
    /// [`Node::ModifyEnvironment`]
    ModifyEnvironment,
    /// [`Node::Phantom`]
    Phantom,
    /// [`Node::EmptyBox`]
    EmptyBox,
}

/// Explicit spaces, e.g. `\quad` or `~`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WhitespaceKind {
    /// a space in the markup, outside math
    Normal,
    /// `\ `, a third of an em
    Thicker,
    /// `~` or `\nbsp`, a normal space the line is never broken at
    NonBreaking,
    /// `\enspace`, half an em
    Enspace,
    /// `\quad` or `\emspace`
    Quad,
    /// `\qquad`
    QQuad,
    /// `\,` or `\thinspace`
    Thin,
    /// `\:` or `\medspace`
    Medium,
    /// `\;` or `\thickspace`
    Thick,
    /// `\!` or `\negthinspace`
    NegativeThin,
    /// `\negmedspace`
    NegativeMedium,
    /// `\negthickspace`
    NegativeThick,
}

impl WhitespaceKind {
    /// The whitespace a given instruction stands for
    pub fn from_instruction(name : &str) -> Option<Self> {
        use self::WhitespaceKind::*;
        Some(match name {
            " "                      => Thicker,
            "nbsp"                   => NonBreaking,
            "enspace"                => Enspace,
            "quad" | "emspace"       => Quad,
            "qquad"                  => QQuad,
            "," | "thinspace"        => Thin,
            ":" | "medspace"         => Medium,
            ";" | "thickspace"       => Thick,
            "!" | "negthinspace"     => NegativeThin,
            "negmedspace"            => NegativeMedium,
            "negthickspace"          => NegativeThick,
            _ => return None,
        })
    }

    /// Width in em, `None` for a space as wide as the " " of the current font
    pub fn em(self) -> Option<f64> {
        use self::WhitespaceKind::*;
        match self {
            Normal         => None,
            NonBreaking    => None,
            Thicker        => Some(1. / 3.),
            Enspace        => Some(0.5),
            Quad           => Some(1.),
            QQuad          => Some(2.),
            Thin           => Some(1. / 6.),
            Medium         => Some(2. / 9.),
            Thick          => Some(5. / 18.),
            NegativeThin   => Some(-1. / 6.),
            NegativeMedium => Some(-2. / 9.),
            NegativeThick  => Some(-5. / 18.),
        }
    }

    /// HTML entity for the space
    pub fn html_entity(self) -> &'static str {
        use self::WhitespaceKind::*;
        match self {
            Normal => " ",
            NonBreaking => "&nbsp;",
            Thicker | Medium | Thick => "&ensp;",
            Enspace => "&ensp;",
            Quad => "&emsp;",
            QQuad => "&emsp;&emsp;",
            Thin => "&thinsp;",
            NegativeThin | NegativeMedium | NegativeThick => "",
        }
    }
}

/// The different ways of stacking two nodes on top of each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FracMode {
    /// `\frac`: numerator over denominator, separated by a bar
    Frac,
    /// `\dfrac`: like `\frac`, children keep the full size
    DFrac,
    /// `\tfrac`: like `\frac`, children in text size
    TFrac,
    /// `\sfrac` or `\nicefrac`: numerator and denominator on both sides of a slash
    SFrac,
    /// `\stfrac`: like `\sfrac` in text size
    STFrac,
    /// `\underbrace`: a horizontal brace below the first node, the second node below the brace
    UnderBrace,
    /// `\overbrace`: a horizontal brace above the first node, the second node above the brace
    OverBrace,
    /// `\stackrel` or `\binom`: numerator over denominator without a bar
    StackRel,
    /// `\underset`: the first node below the second one
    UnderSet,
    /// `\overset`: the first node above the second one
    OverSet,
}

impl FracMode {
    /// Fraction mode of an instruction
    pub fn from_name(name : &str) -> Option<Self> {
        use self::FracMode::*;
        Some(match name {
            "frac"               => Frac,
            "dfrac"              => DFrac,
            "tfrac"              => TFrac,
            "sfrac" | "nicefrac" => SFrac,
            "stfrac"             => STFrac,
            "underbrace"         => UnderBrace,
            "overbrace"          => OverBrace,
            "stackrel" | "binom" => StackRel,
            "underset"           => UnderSet,
            "overset"            => OverSet,
            _ => return None,
        })
    }

    /// Whether the numerator and the denominator are drawn next to each other
    pub fn is_slanted(self) -> bool {
        matches!(self, FracMode::SFrac | FracMode::STFrac)
    }
}

/// Accent-like decorations drawn above, through or below a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// `\vec`, a small arrow
    Vec,
    /// `\hat`
    Hat,
    /// `\widehat`
    WideHat,
    /// `\check`
    Check,
    /// `\widecheck`
    WideCheck,
    /// `\breve`
    Breve,
    /// `\ocirc`
    Circle,
    /// `\dot`
    Dot,
    /// `\ddot`
    DoubleDot,
    /// `\bar`
    Bar,
    /// `\arrow` or `\overrightarrow`
    RightArrow,
    /// `\overleftarrow`
    LeftArrow,
    /// `\overleftrightarrow`
    LeftRightArrow,
    /// `\underleftarrow`
    UnderLeftArrow,
    /// `\underrightarrow`
    UnderRightArrow,
    /// `\underleftrightarrow`
    UnderLeftRightArrow,
    /// `\overline` or `\oline`
    Overline,
    /// `\doubleoverline` or `\ooline`
    DoubleOverline,
    /// `\underline` or `\uline`
    Underline,
    /// `\doubleunderline` or `\uuline`
    DoubleUnderline,
    /// `\tilde`
    Tilde,
    /// `\widetilde`
    WideTilde,
    /// `\acute`
    Acute,
    /// `\grave`
    Grave,
    /// `\cancel`, a diagonal from bottom left to top right
    Cancel,
    /// `\bcancel`, a diagonal from top left to bottom right
    BackCancel,
    /// `\xcancel`, both diagonals
    CrossCancel,
}

impl Decoration {
    /// Decoration drawn by an instruction
    pub fn from_name(name : &str) -> Option<Self> {
        use self::Decoration::*;
        Some(match name {
            "vec"                           => Vec,
            "hat"                           => Hat,
            "widehat"                       => WideHat,
            "check"                         => Check,
            "widecheck"                     => WideCheck,
            "breve"                         => Breve,
            "ocirc"                         => Circle,
            "dot"                           => Dot,
            "ddot"                          => DoubleDot,
            "bar"                           => Bar,
            "arrow" | "overrightarrow"      => RightArrow,
            "overleftarrow"                 => LeftArrow,
            "overleftrightarrow"            => LeftRightArrow,
            "underleftarrow"                => UnderLeftArrow,
            "underrightarrow"               => UnderRightArrow,
            "underleftrightarrow"           => UnderLeftRightArrow,
            "overline" | "oline"            => Overline,
            "doubleoverline" | "ooline"     => DoubleOverline,
            "underline" | "uline"           => Underline,
            "doubleunderline" | "uuline"    => DoubleUnderline,
            "tilde"                         => Tilde,
            "widetilde"                     => WideTilde,
            "acute"                         => Acute,
            "grave"                         => Grave,
            "cancel"                        => Cancel,
            "bcancel"                       => BackCancel,
            "xcancel"                       => CrossCancel,
            _ => return None,
        })
    }

    /// Whether the decoration is drawn below the node
    pub fn is_below(self) -> bool {
        use self::Decoration::*;
        matches!(self, UnderLeftArrow | UnderRightArrow | UnderLeftRightArrow | Underline | DoubleUnderline)
    }

    /// Whether the decoration is drawn across the node
    pub fn is_across(self) -> bool {
        use self::Decoration::*;
        matches!(self, Cancel | BackCancel | CrossCancel)
    }
}

/// What a phantom keeps of its child's size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhantomKind {
    /// `\phantom`: width and height
    Both,
    /// `\hphantom`: width only
    Horizontal,
    /// `\vphantom`: height only
    Vertical,
}

impl PhantomKind {
    /// Phantom kind of an instruction
    pub fn from_name(name : &str) -> Option<Self> {
        match name {
            "phantom"  => Some(PhantomKind::Both),
            "hphantom" => Some(PhantomKind::Horizontal),
            "vphantom" => Some(PhantomKind::Vertical),
            _ => None,
        }
    }
}

/// Lines stacked on top of each other
#[derive(Debug, Clone)]
pub struct VerticalList {
    /// one node per line
    pub lines : Vec<Node>,
    /// how lines are aligned with each other
    pub alignment : HorizontalAlignment,
    /// multiplies the distance between lines
    pub spacing_factor : f64,
    /// how the distance between lines is computed
    pub spacing : SpacingMode,
    /// which line gives the baseline of the whole list
    pub orientation : VerticalOrientation,
}

impl VerticalList {
    /// Lines with the default spacing, anchored on the baseline of the first line
    pub fn new(lines : Vec<Node>, alignment : HorizontalAlignment) -> Self {
        Self {
            lines,
            alignment,
            spacing_factor : 1.,
            spacing : SpacingMode::Default,
            orientation : VerticalOrientation::FirstLine,
        }
    }
}

/// Cells of a matrix-like environment together with the rules drawn between them
#[derive(Debug, Clone)]
pub struct Matrix {
    /// rows of cells, every row has the same number of cells
    pub rows : Vec<Vec<Node>>,
    /// alignment of the columns and vertical rules
    pub columns : ColumnSpec,
    /// rule above the first row
    pub top_line : LineType,
    /// rule below each row
    pub row_lines : Vec<LineType>,
}

impl Matrix {
    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A node of the syntax tree
#[derive(Debug, Clone)]
pub enum Node {
    /// A run of text
    Text(String),
    /// A named symbol, e.g. `\alpha` or `\sum`
    Symbol {
        /// name of the instruction
        name : String,
        /// what to draw
        symbol : Symbol,
        /// scripts following the symbol are placed above and below it
        limits : bool,
    },
    /// Explicit space
    Whitespace(WhitespaceKind),
    /// Raw text drawn in the typewriter font, line by line
    Verbatim {
        /// the raw text
        text : String,
        /// spaces are drawn as ␣
        visible_space : bool,
    },
    /// Nodes placed one after the other on a common baseline
    List(Vec<Node>),
    /// Lines stacked vertically
    VerticalList(VerticalList),
    /// A `{..}` group: scopes the environment changes made inside it
    Block(Box<Node>),
    /// Child lowered below the baseline of the previous node
    Subscript(Box<Node>),
    /// Child raised above the previous node
    Superscript(Box<Node>),
    /// Two nodes on top of (or next to) each other
    Fraction {
        /// layout of the two nodes
        mode : FracMode,
        /// numerator, or main node of under/overbrace
        top : Box<Node>,
        /// denominator, or annotation of under/overbrace
        bottom : Box<Node>,
    },
    /// A root
    Sqrt {
        /// degree of the root, drawn small on the left
        degree : Option<Box<Node>>,
        /// radicand
        child : Box<Node>,
    },
    /// Delimiters scaled to the size of their contents
    Brace {
        /// left delimiter
        open : BraceType,
        /// right delimiter
        close : BraceType,
        /// contents
        child : Box<Node>,
    },
    /// A grid of cells
    Matrix(Matrix),
    /// A node with an accent-like decoration
    Decorated {
        /// the decoration
        decoration : Decoration,
        /// decorated node
        child : Box<Node>,
    },
    /// An instruction changing the environment of its argument only, e.g. `\textbf{..}`
    TextProps {
        /// name of the instruction
        name : String,
        /// string parameters given before the argument
        params : Vec<String>,
        /// how the environment is changed
        modifier : Modifier,
        /// the argument
        child : Box<Node>,
    },
    /// A box drawn around its argument, e.g. `\fbox{..}`
    BoxInstruction {
        /// name of the instruction
        name : String,
        /// string parameters given before the argument
        params : Vec<String>,
        /// pen, brush, padding of the box
        style : BoxStyle,
        /// the argument
        child : Box<Node>,
    },
    /// An instruction changing the environment of the nodes following it in the same list, e.g. `\bf`
    ModifyEnvironment {
        /// name of the instruction
        name : String,
        /// string parameters
        params : Vec<String>,
        /// how the environment is changed
        modifier : Modifier,
    },
    /// Takes up space without being drawn
    Phantom {
        /// which dimensions are kept
        kind : PhantomKind,
        /// node whose size is kept
        child : Box<Node>,
    },
    /// An invisible box, in em of the current font. Its height is centered on the strikeout line.
    EmptyBox {
        /// width, in em
        width : f64,
        /// height, in em
        height : f64,
    },
}

impl Default for Node {
    fn default() -> Self {
        Node::List(Vec::new())
    }
}

impl Node {
    /// Text node
    pub fn text(text : impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Kind of the node
    pub fn kind(&self) -> NodeKind {
        match *self {
            Node::Text(_)                  => NodeKind::Text,
            Node::Symbol { .. }            => NodeKind::Symbol,
            Node::Whitespace(_)            => NodeKind::Whitespace,
            Node::Verbatim { .. }          => NodeKind::Verbatim,
            Node::List(_)                  => NodeKind::List,
            Node::VerticalList(_)          => NodeKind::VerticalList,
            Node::Block(_)                 => NodeKind::Block,
            Node::Subscript(_)             => NodeKind::Subscript,
            Node::Superscript(_)           => NodeKind::Superscript,
            Node::Fraction { .. }          => NodeKind::Fraction,
            Node::Sqrt { .. }              => NodeKind::Sqrt,
            Node::Brace { .. }             => NodeKind::Brace,
            Node::Matrix(_)                => NodeKind::Matrix,
            Node::Decorated { .. }         => NodeKind::Decorated,
            Node::TextProps { .. }         => NodeKind::TextProps,
            Node::BoxInstruction { .. }    => NodeKind::BoxInstruction,
            Node::ModifyEnvironment { .. } => NodeKind::ModifyEnvironment,
            Node::Phantom { .. }           => NodeKind::Phantom,
            Node::EmptyBox { .. }          => NodeKind::EmptyBox,
        }
    }

    /// Name of the instruction the node was created from, for nodes that keep it
    pub fn instruction_name(&self) -> Option<&str> {
        match *self {
            Node::Symbol { ref name, .. }
            | Node::TextProps { ref name, .. }
            | Node::BoxInstruction { ref name, .. }
            | Node::ModifyEnvironment { ref name, .. } => Some(name),
            _ => None,
        }
    }

    /// Direct children of the node, in order
    pub fn children(&self) -> Vec<&Node> {
        match *self {
            Node::List(ref nodes) => nodes.iter().collect(),
            Node::VerticalList(ref list) => list.lines.iter().collect(),
            Node::Matrix(ref matrix) => matrix.rows.iter().flatten().collect(),
            Node::Block(ref child)
            | Node::Subscript(ref child)
            | Node::Superscript(ref child)
            | Node::Brace { ref child, .. }
            | Node::Decorated { ref child, .. }
            | Node::TextProps { ref child, .. }
            | Node::BoxInstruction { ref child, .. }
            | Node::Phantom { ref child, .. } => vec![child],
            Node::Fraction { ref top, ref bottom, .. } => vec![top, bottom],
            Node::Sqrt { ref degree, ref child } => degree.iter().map(|d| &**d).chain(Some(&**child)).collect(),
            Node::Text(_)
            | Node::Symbol { .. }
            | Node::Whitespace(_)
            | Node::Verbatim { .. }
            | Node::ModifyEnvironment { .. }
            | Node::EmptyBox { .. } => Vec::new(),
        }
    }

    /// Calls `f` on the node and all its descendants, depth first
    pub fn walk<'s, F : FnMut(&'s Node)>(&'s self, f : &mut F) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Whether any node of the tree was created from the instruction `name`
    pub fn contains_instruction(&self, name : &str) -> bool {
        let mut found = false;
        self.walk(&mut |node| found |= node.instruction_name() == Some(name));
        found
    }

    /// Whether this is a [`Node::ModifyEnvironment`]
    pub fn is_modify_environment(&self) -> bool {
        matches!(self, Node::ModifyEnvironment { .. })
    }

    /// Whether this node accepts `\limits`/`\nolimits`
    pub fn set_limits(&mut self, value : bool) -> bool {
        match *self {
            Node::Symbol { ref mut limits, .. } => {
                *limits = value;
                true
            },
            _ => false,
        }
    }

    /// Whether scripts following this node go above and below it
    pub fn has_limits(&self) -> bool {
        matches!(*self, Node::Symbol { limits : true, .. })
    }

    /// Removes layers which do not change the result of layout:
    ///  - `{..}` groups disappear, the lists they contain keep scoping environment changes,
    ///    except a group of several nodes followed by a script, which stays the base of that script;
    ///  - lists nested in lists are flattened, unless they contain an environment change;
    ///  - empty lists are dropped and lists of a single node are replaced by the node.
    ///
    /// Simplifying twice gives the same tree as simplifying once.
    pub fn simplify(self) -> Node {
        match self {
            Node::Block(child) => child.simplify(),
            Node::List(children) => {
                let mut flat = Vec::with_capacity(children.len());
                let mut children = children.into_iter().peekable();
                while let Some(child) = children.next() {
                    let before_script = matches!(children.peek(), Some(Node::Subscript(_)) | Some(Node::Superscript(_)));
                    let child = match child {
                        Node::Block(group) if before_script => match group.simplify() {
                            list @ Node::List(_) => Node::Block(Box::new(list)),
                            node => node,
                        },
                        child => child.simplify(),
                    };
                    match child {
                        Node::List(nodes) if !nodes.iter().any(Node::is_modify_environment) => flat.extend(nodes),
                        node => flat.push(node),
                    }
                }
                if flat.len() == 1 {
                    match flat.pop() {
                        Some(node) if node.is_modify_environment() => Node::List(Vec::new()),
                        Some(node) => node,
                        None => Node::List(Vec::new()),
                    }
                }
                else {
                    Node::List(flat)
                }
            },
            Node::VerticalList(list) => Node::VerticalList(VerticalList {
                lines : list.lines.into_iter().map(Node::simplify).collect(),
                ..list
            }),
            Node::Matrix(matrix) => Node::Matrix(Matrix {
                rows : matrix.rows.into_iter()
                    .map(|row| row.into_iter().map(Node::simplify).collect())
                    .collect(),
                ..matrix
            }),
            Node::Subscript(child) => Node::Subscript(Box::new(child.simplify())),
            Node::Superscript(child) => Node::Superscript(Box::new(child.simplify())),
            Node::Fraction { mode, top, bottom } => Node::Fraction {
                mode,
                top : Box::new(top.simplify()),
                bottom : Box::new(bottom.simplify()),
            },
            Node::Sqrt { degree, child } => Node::Sqrt {
                degree : degree.map(|d| Box::new(d.simplify())),
                child : Box::new(child.simplify()),
            },
            Node::Brace { open, close, child } => Node::Brace { open, close, child : Box::new(child.simplify()) },
            Node::Decorated { decoration, child } => Node::Decorated { decoration, child : Box::new(child.simplify()) },
            Node::TextProps { name, params, modifier, child } =>
                Node::TextProps { name, params, modifier, child : Box::new(child.simplify()) },
            Node::BoxInstruction { name, params, style, child } =>
                Node::BoxInstruction { name, params, style, child : Box::new(child.simplify()) },
            Node::Phantom { kind, child } => Node::Phantom { kind, child : Box::new(child.simplify()) },
            leaf => leaf,
        }
    }
}

impl fmt::Display for Node {
    /// A compact, s-expression like, description of the tree
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Node::Text(ref text) => write!(f, "{:?}", text),
            Node::Symbol { ref name, limits, .. } =>
                write!(f, "\\{}{}", name, if limits { "[limits]" } else { "" }),
            Node::Whitespace(kind) => write!(f, "space({:?})", kind),
            Node::Verbatim { ref text, .. } => write!(f, "verb({:?})", text),
            Node::EmptyBox { width, height } => write!(f, "empty({}em, {}em)", width, height),
            Node::ModifyEnvironment { ref name, .. } => write!(f, "\\{}", name),
            _ => {
                let tag = match *self {
                    Node::List(_) => "list".to_string(),
                    Node::VerticalList(_) => "lines".to_string(),
                    Node::Block(_) => "block".to_string(),
                    Node::Subscript(_) => "sub".to_string(),
                    Node::Superscript(_) => "sup".to_string(),
                    Node::Fraction { mode, .. } => format!("{:?}", mode).to_lowercase(),
                    Node::Sqrt { .. } => "sqrt".to_string(),
                    Node::Brace { open, close, .. } => format!("brace[{:?} {:?}]", open, close),
                    Node::Matrix(_) => "matrix".to_string(),
                    Node::Decorated { decoration, .. } => format!("{:?}", decoration).to_lowercase(),
                    Node::TextProps { ref name, .. } | Node::BoxInstruction { ref name, .. } => format!("\\{}", name),
                    Node::Phantom { kind, .. } => format!("phantom[{:?}]", kind),
                    _ => String::new(),
                };
                write!(f, "({}", tag)?;
                for child in self.children() {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::parser::instructions::EngineContext;

    fn modifier(env : Environment, _ : &[String], _ : &EngineContext) -> Environment {
        Environment { bold : true, ..env }
    }

    fn bf() -> Node {
        Node::ModifyEnvironment { name : "bf".to_string(), params : Vec::new(), modifier }
    }

    #[test]
    fn flattening() {
        let tree = Node::List(vec![
            Node::Block(Box::new(Node::List(vec![Node::text("a"), Node::text("b")]))),
            Node::List(Vec::new()),
            Node::text("c"),
        ]);
        let simple = tree.simplify();
        assert_eq!(simple.to_string(), r#"(list "a" "b" "c")"#);
    }

    #[test]
    fn lists_with_environment_changes_are_kept() {
        let tree = Node::List(vec![
            Node::Block(Box::new(Node::List(vec![bf(), Node::text("b")]))),
            Node::text("c"),
        ]);
        let simple = tree.simplify();
        assert_eq!(simple.to_string(), r#"(list (list \bf "b") "c")"#);
    }

    #[test]
    fn singletons() {
        let tree = Node::Superscript(Box::new(Node::List(vec![Node::Block(Box::new(Node::text("2")))])));
        assert_eq!(tree.simplify().to_string(), r#"(sup "2")"#);

        let lone = Node::Block(Box::new(Node::List(vec![bf()])));
        assert_eq!(lone.simplify().to_string(), "(list)");
    }

    #[test]
    fn idempotence() {
        let trees = vec![
            Node::List(vec![
                Node::List(vec![Node::List(vec![bf()]), Node::text("x")]),
                Node::Block(Box::new(Node::List(vec![Node::List(vec![Node::text("y")])]))),
                Node::Fraction {
                    mode : FracMode::Frac,
                    top : Box::new(Node::List(vec![Node::text("1")])),
                    bottom : Box::new(Node::Block(Box::new(Node::List(Vec::new())))),
                },
            ]),
            Node::List(vec![Node::List(vec![bf(), Node::List(vec![bf()])])]),
        ];
        for tree in trees {
            let once = tree.simplify();
            let twice = once.clone().simplify();
            eprintln!("{}", once);
            assert_eq!(once.to_string(), twice.to_string());
        }
    }

    #[test]
    fn instruction_tables() {
        assert_eq!(FracMode::from_name("nicefrac"), Some(FracMode::SFrac));
        assert!(FracMode::SFrac.is_slanted());
        assert_eq!(Decoration::from_name("uuline"), Some(Decoration::DoubleUnderline));
        assert!(Decoration::Underline.is_below());
        assert!(Decoration::CrossCancel.is_across());
        assert_eq!(PhantomKind::from_name("vphantom"), Some(PhantomKind::Vertical));
        assert_eq!(WhitespaceKind::from_instruction(","), Some(WhitespaceKind::Thin));
        assert_eq!(WhitespaceKind::Thick.em(), Some(5. / 18.));
        assert_eq!(WhitespaceKind::NonBreaking.em(), None);
    }

    #[test]
    fn walking() {
        let tree = Node::List(vec![
            Node::text("a"),
            Node::Subscript(Box::new(bf())),
        ]);
        assert!(tree.contains_instruction("bf"));
        assert!(!tree.contains_instruction("it"));
        let mut count = 0;
        tree.walk(&mut |_| count += 1);
        assert_eq!(count, 4);
    }
}

//! An HTML approximation of a parsed formula.
//!
//! Formatting is expressed with `<span style="..">` elements holding the differences with a default
//! [`Environment`]. Scripts become `<sub>`/`<sup>`, matrices `<table>`s and verbatim text `<pre>`.
//! Nodes with no HTML counterpart (fractions, most accents) make the export report a failure,
//! but their children are still exported.

use crate::environment::{Environment, FontFamily};
use crate::font::FontSet;
use crate::parser::environments::{BraceType, HorizontalAlignment};
use crate::parser::instructions::EngineContext;
use crate::parser::nodes::{Decoration, FracMode, Node};

/// Result of an HTML export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Html {
    /// the markup produced
    pub html : String,
    /// whether every node could be represented
    pub complete : bool,
}

/// Exports `node`, laid out in `env`, relative to the formatting of `default`
pub fn to_html(node : &Node, env : &Environment, default : &Environment, fonts : &FontSet) -> Html {
    let mut writer = HtmlWriter {
        fonts,
        default,
        context : EngineContext {
            font_size : default.font_size,
            font_size_unit : default.font_size_unit,
            color : default.color,
            ..EngineContext::default()
        },
        out : String::new(),
    };
    let complete = writer.node(node, env);
    if !complete {
        debug!("some nodes have no HTML representation");
    }
    Html { html : writer.out, complete }
}

/// Escapes the characters with a meaning in HTML
pub fn escape(text : &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn align_attribute(alignment : HorizontalAlignment) -> &'static str {
    match alignment {
        HorizontalAlignment::Left => "left",
        HorizontalAlignment::Centered => "center",
        HorizontalAlignment::Right => "right",
    }
}

fn brace_entities(kind : BraceType) -> (&'static str, &'static str) {
    match kind {
        BraceType::Angle => ("&lang;", "&rang;"),
        BraceType::Floor => ("&lfloor;", "&rfloor;"),
        BraceType::Ceil => ("&lceil;", "&rceil;"),
        BraceType::Paren => ("(", ")"),
        BraceType::Square => ("[", "]"),
        BraceType::Curly => ("{", "}"),
        BraceType::SingleLine => ("|", "|"),
        BraceType::DoubleLine => ("||", "||"),
        BraceType::TopCorner => ("&ulcorner;", "&urcorner;"),
        BraceType::BottomCorner => ("&llcorner;", "&lrcorner;"),
        BraceType::None | BraceType::Any | BraceType::Unknown => ("", ""),
    }
}

struct HtmlWriter<'a> {
    fonts : &'a FontSet,
    default : &'a Environment,
    context : EngineContext,
    out : String,
}

impl<'a> HtmlWriter<'a> {
    fn styled(&mut self, env : &Environment, text : &str) {
        self.out.push_str(&env.to_html_start(self.default, self.fonts));
        self.out.push_str(&escape(text));
        self.out.push_str(&env.to_html_after(self.default));
    }

    fn wrapped(&mut self, open : &str, child : &Node, env : &Environment, close : &str) -> bool {
        self.out.push_str(open);
        let ok = self.node(child, env);
        self.out.push_str(close);
        ok
    }

    /// Exports the nodes of a list, applying the environment changes they contain to the following ones
    fn sequence<'n>(&mut self, nodes : impl IntoIterator<Item = &'n Node>, env : &Environment, separator : &str) -> bool {
        let mut env = env.clone();
        let mut ok = true;
        for (i, node) in nodes.into_iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            // keep going after a failure: the rest of the list is still exported
            ok &= self.node(node, &env);
            if let Node::ModifyEnvironment { ref params, modifier, .. } = *node {
                env = modifier(env, params, &self.context);
            }
        }
        ok
    }

    fn node(&mut self, node : &Node, env : &Environment) -> bool {
        match *node {
            Node::Text(ref text) => {
                self.styled(env, text);
                true
            },
            Node::Symbol { ref symbol, .. } => {
                let mut env = env.clone();
                if let Some(italic) = symbol.italic {
                    env.italic = italic;
                }
                if let Some(bold) = symbol.bold {
                    env.bold = bold;
                }
                self.styled(&env, symbol.text);
                true
            },
            Node::Whitespace(kind) => {
                self.out.push_str(kind.html_entity());
                true
            },
            Node::Verbatim { ref text, visible_space } => {
                let tt = env.exchanged_font_for(FontFamily::Typewriter);
                let text = if visible_space { text.replace(' ', "\u{2423}") } else { text.clone() };
                self.out.push_str(&tt.to_html_start(self.default, self.fonts));
                self.out.push_str("<pre>");
                self.out.push_str(&escape(&text));
                self.out.push_str("</pre>");
                self.out.push_str(&tt.to_html_after(self.default));
                true
            },
            Node::List(ref nodes) => self.sequence(nodes, env, ""),
            Node::VerticalList(ref list) => {
                self.out.push_str(&format!("<div align=\"{}\">", align_attribute(list.alignment)));
                let ok = self.sequence(&list.lines, env, "<br/>");
                self.out.push_str("</div>");
                ok
            },
            Node::Block(ref child) => self.node(child, env),
            Node::Subscript(ref child) => self.wrapped("<sub>", child, env, "</sub>"),
            Node::Superscript(ref child) => self.wrapped("<sup>", child, env, "</sup>"),
            Node::Fraction { mode, ref top, ref bottom } => {
                // best effort: numerator and denominator on one line
                self.node(top, env);
                if mode != FracMode::UnderBrace && mode != FracMode::OverBrace {
                    self.out.push('/');
                }
                self.node(bottom, env);
                false
            },
            Node::Sqrt { ref degree, ref child } => {
                let mut ok = true;
                if let Some(degree) = degree {
                    let mut small = env.clone();
                    small.italic = false;
                    ok &= self.wrapped("<sup>", degree, &small, "</sup>");
                }
                self.out.push_str("&radic;<span style=\"text-decoration:overline\">");
                ok &= self.node(child, env);
                self.out.push_str("&nbsp;</span>");
                ok
            },
            Node::Brace { open, close, ref child } => {
                let (open, _) = brace_entities(open);
                let (_, close) = brace_entities(close);
                self.wrapped(open, child, env, close)
            },
            Node::Matrix(ref matrix) => {
                self.out.push_str("<table>");
                let mut ok = true;
                for row in &matrix.rows {
                    self.out.push_str("<tr>");
                    for (col, cell) in row.iter().enumerate() {
                        let align = align_attribute(matrix.columns.alignment(col));
                        ok &= self.wrapped(&format!("<td align=\"{}\">", align), cell, env, "</td>");
                    }
                    self.out.push_str("</tr>");
                }
                self.out.push_str("</table>");
                ok
            },
            Node::Decorated { decoration, ref child } => {
                let mut decorated = env.clone();
                match decoration {
                    Decoration::Underline | Decoration::DoubleUnderline => decorated.underlined = true,
                    Decoration::Overline | Decoration::DoubleOverline => decorated.overline = true,
                    Decoration::Cancel | Decoration::BackCancel | Decoration::CrossCancel => decorated.strike = true,
                    _ => {
                        self.node(child, env);
                        return false;
                    },
                }
                self.node(child, &decorated)
            },
            Node::TextProps { ref params, modifier, ref child, .. } => {
                let env = modifier(env.clone(), params, &self.context);
                self.node(child, &env)
            },
            Node::BoxInstruction { ref params, ref style, ref child, .. } => {
                let mut css = Vec::new();
                if let Some(pen) = (style.pen)(env, params, &self.context) {
                    if !pen.color.is_transparent() {
                        css.push(format!("border: {}px solid {}", pen.width.max(1.), pen.color.to_css()));
                    }
                }
                if let Some(brush) = (style.brush)(env, params, &self.context) {
                    if !brush.color.is_transparent() {
                        css.push(format!("background-color: {}", brush.color.to_css()));
                    }
                }
                if style.padding_factor > 0. {
                    css.push(format!("padding: {}em", style.padding_factor * 0.5));
                }
                if css.is_empty() {
                    self.node(child, env)
                } else {
                    let open = format!("<span style=\"{}\">", css.join("; "));
                    self.wrapped(&open, child, env, "</span>")
                }
            },
            Node::ModifyEnvironment { .. } => true,
            Node::Phantom { .. } => true,
            Node::EmptyBox { .. } => true,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseOptions, Parser};

    fn export(input : &str) -> Html {
        let root = Parser::new(input).with_options(ParseOptions::default()).parse().root;
        let env = Environment::default();
        to_html(&root, &env, &env, &FontSet::default())
    }

    #[test]
    fn text_is_escaped() {
        let html = export("a<b \\& \"c\"");
        assert!(html.complete);
        assert!(html.html.contains("a&lt;b"));
        assert!(html.html.contains("&amp;"));
        assert!(html.html.contains("&quot;c&quot;"));
    }

    #[test]
    fn scripts() {
        let html = export("$x_1^2$");
        assert!(html.complete);
        assert!(html.html.contains("<sub>"));
        assert!(html.html.contains("<sup>"));
        assert!(html.html.find("<sub>") < html.html.find("<sup>"));
    }

    #[test]
    fn formatting_becomes_spans() {
        let html = export("\\textbf{bold}");
        assert!(html.html.contains("font-weight: bold;"));
        assert!(html.html.contains("bold</span>"));
        let colored = export("\\color{red}x");
        assert!(colored.html.contains("color: "));
    }

    #[test]
    fn fractions_are_incomplete() {
        let html = export("$\\frac{a}{b}$");
        assert!(!html.complete);
        assert!(html.html.contains('a'));
        assert!(html.html.contains('b'));
    }

    #[test]
    fn roots_and_braces() {
        let html = export("$\\sqrt{x}\\left\\langle y\\right\\rangle$");
        assert!(html.complete);
        assert!(html.html.contains("&radic;"));
        assert!(html.html.contains("&lang;"));
        assert!(html.html.contains("&rang;"));
    }

    #[test]
    fn underline_is_supported_hat_is_not() {
        assert!(export("$\\underline{x}$").html.contains("text-decoration: underline;"));
        assert!(!export("$\\hat{x}$").complete);
    }

    #[test]
    fn symbols_force_or_inherit_the_style() {
        let named = export("$\\sin x$");
        let sin = named.html.find("sin").unwrap();
        let span_start = named.html[..sin].rfind("<span").unwrap();
        assert!(!named.html[span_start..sin].contains("font-style: italic;"));
        let x = named.html.rfind('x').unwrap();
        let span_start = named.html[..x].rfind("<span").unwrap();
        assert!(named.html[span_start..x].contains("font-style: italic;"));

        let greek = export("$\\alpha$");
        assert!(greek.html.contains("font-style: italic;"));
        let upright = export("$\\mathrm{\\alpha}$");
        assert!(!upright.html.contains("font-style: italic;"));
    }

    #[test]
    fn matrices_become_tables() {
        let html = export("$\\begin{matrix}a&b\\\\c&d\\end{matrix}$");
        assert!(html.complete);
        assert_eq!(html.html.matches("<tr>").count(), 2);
        assert_eq!(html.html.matches("<td").count(), 4);
    }

    #[test]
    fn verbatim_is_preformatted() {
        let html = export("\\verb!a<b!");
        assert!(html.html.contains("<pre>a&lt;b</pre>"));
        assert!(html.html.contains("font-family: monospace;"));
    }

    #[test]
    fn whitespace_entities() {
        let html = export("a\\quad b");
        assert!(html.html.contains("&emsp;"));
    }
}

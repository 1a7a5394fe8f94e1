//! Parses strings of LaTeX-like markup into a tree of [`Node`]s
//!
//! Defines the [`parse`] function which uses the standard instruction registry and default options.
//! More fine-grained customization is offered by the [`Parser`] struct, which accepts options
//! and a custom [`InstructionRegistry`].
//!
//! Parsing is tolerant: the markup is always turned into a tree, problems found on the way
//! are reported as [`Diagnostic`]s next to it.

#[deny(missing_docs)]
pub mod nodes;
#[deny(missing_docs)]
pub mod color;
#[deny(missing_docs)]
pub mod symbols;
#[deny(missing_docs)]
pub mod environments;
#[deny(missing_docs)]
pub mod instructions;
#[deny(missing_docs)]
pub mod lexer;
pub mod accents;
mod engine;

pub use self::nodes::Node;
pub use self::instructions::{EngineContext, InstructionRegistry};

use crate::error::{Diagnostic, Error, Result};
use self::engine::Engine;

/// Knobs of the parser
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    /// parse the input as if it were enclosed in `$..$`
    pub wrap_in_math : bool,
    /// surround the result with thick spaces
    pub add_surrounding_space : bool,
    /// `\\` at top level starts a new line, instead of being reported
    pub allow_linebreaks : bool,
    /// groups nested deeper than this are skipped
    pub max_depth : usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            wrap_in_math : false,
            add_surrounding_space : false,
            allow_linebreaks : false,
            max_depth : 256,
        }
    }
}

/// The tree produced by the parser, together with the problems found in the markup
#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// root of the tree, already simplified
    pub root : Node,
    /// problems found, in the order they were met
    pub diagnostics : Vec<Diagnostic>,
}

impl ParseOutput {
    /// Whether the markup parsed without any diagnostic
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The tree if there was no diagnostic, the diagnostics otherwise
    pub fn into_result(self) -> Result<Node> {
        if self.diagnostics.is_empty() {
            Ok(self.root)
        } else {
            Err(Error::Parse(self.diagnostics))
        }
    }
}

/// Parser builder
///
/// ```
/// use mathtext::parser::{Parser, ParseOptions};
/// let output = Parser::new("x^2")
///     .with_options(ParseOptions { wrap_in_math : true, ..ParseOptions::default() })
///     .parse();
/// assert!(output.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'i, 'r> {
    input : &'i str,
    registry : &'r InstructionRegistry,
    options : ParseOptions,
    context : EngineContext,
}

impl<'i> Parser<'i, 'static> {
    /// A parser for `input` with the standard registry and default options
    pub fn new(input : &'i str) -> Self {
        Self {
            input,
            registry : InstructionRegistry::standard(),
            options : ParseOptions::default(),
            context : EngineContext::default(),
        }
    }
}

impl<'i, 'r> Parser<'i, 'r> {
    /// Replaces the options
    pub fn with_options(self, options : ParseOptions) -> Self {
        Self { options, ..self }
    }

    /// Replaces the context modifiers are evaluated in
    pub fn with_context(self, context : EngineContext) -> Self {
        Self { context, ..self }
    }

    /// Replaces the instruction registry
    pub fn with_registry<'s>(self, registry : &'s InstructionRegistry) -> Parser<'i, 's> {
        Parser {
            input : self.input,
            registry,
            options : self.options,
            context : self.context,
        }
    }

    /// Parses the input
    pub fn parse(self) -> ParseOutput {
        let mut engine = Engine::new(self.input, self.registry, self.context, self.options.max_depth);
        let root = engine.parse_document(&self.options);
        let diagnostics = engine.into_diagnostics();
        if !diagnostics.is_empty() {
            debug!("parsed {:?} with {} diagnostic(s)", self.input, diagnostics.len());
        }
        ParseOutput { root, diagnostics }
    }
}

/// Parses `input` with the standard registry and default options
pub fn parse(input : &str) -> ParseOutput {
    Parser::new(input).parse()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::parser::environments::BraceType;

    fn tree(input : &str) -> String {
        let output = parse(input);
        for diagnostic in &output.diagnostics {
            eprintln!("{}: {}", input, diagnostic);
        }
        output.root.to_string()
    }

    fn errors(input : &str) -> Vec<ParseError> {
        parse(input).diagnostics.into_iter().map(|d| d.error).collect()
    }

    #[test]
    fn math_mode() {
        assert_eq!(tree("$x^2$"), r#"(\equation (list "x" (sup "2")))"#);
        assert_eq!(tree("$a+b$"), r#"(\equation (list "a" \+ "b"))"#);
        assert!(parse("$x_{i}^{2}$").is_ok());

        let wrapped = Parser::new("x^2")
            .with_options(ParseOptions { wrap_in_math : true, ..ParseOptions::default() })
            .parse();
        assert!(wrapped.is_ok());
        assert_eq!(wrapped.root.to_string(), tree("$x^2$"));
    }

    #[test]
    fn scripts_take_one_character() {
        assert_eq!(tree("$x^23$"), r#"(\equation (list "x" (sup "2") "3"))"#);
        assert_eq!(tree(r"$x^\alpha$"), r#"(\equation (list "x" (sup \alpha)))"#);
    }

    #[test]
    fn text_instructions() {
        assert_eq!(tree(r"\textbf{bold} normal"), r#"(list (\textbf "bold") space(Normal) "normal")"#);
        assert_eq!(tree(r"\colorbox{red}{X}"), r#"(\colorbox "X")"#);
        assert_eq!(tree(r"a {\bf b} c"), r#"(list "a " (list \bf "b") space(Normal) "c")"#);

        match parse(r"\colorbox{red}{X}").root {
            Node::BoxInstruction { ref params, .. } => assert_eq!(params, &["red".to_string()]),
            ref other => panic!("unexpected tree {}", other),
        }
    }

    #[test]
    fn unknown_instructions_are_reported() {
        let output = parse(r"\notacommand{x}");
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].error, ParseError::UnknownInstruction("notacommand".to_string()));
        assert!(!output.root.contains_instruction("notacommand"));
        assert_eq!(output.root.to_string(), r#""x""#);
    }

    #[test]
    fn missing_arguments() {
        let cases = vec![r"\frac{1}", r"\textcolor{red}", r"$\sqrt$", r"\fbox"];
        for case in cases {
            eprintln!("{}", case);
            let errs = errors(case);
            assert!(errs.iter().any(|e| matches!(e, ParseError::MissingArgument { .. })), "{:?}", errs);
        }
    }

    #[test]
    fn ragged_matrix() {
        let output = parse(r"$\begin{matrix} a & b \\ c & d & e \end{matrix}$");
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].error, ParseError::MatrixRowLength { expected : 2, found : 3 });

        let mut widths = Vec::new();
        output.root.walk(&mut |node| if let Node::Matrix(matrix) = node {
            widths.extend(matrix.rows.iter().map(Vec::len));
        });
        assert_eq!(widths, vec![3, 3]);
    }

    #[test]
    fn matrix_rules_and_braces() {
        let output = parse(r"$\begin{pmatrix} \hline a & b \\ \hline c & d \\ \end{pmatrix}$");
        assert!(output.is_ok(), "{:?}", output.diagnostics);
        let mut found = false;
        output.root.walk(&mut |node| match node {
            Node::Brace { open, close, .. } => {
                assert_eq!((*open, *close), (BraceType::Paren, BraceType::Paren));
            },
            Node::Matrix(matrix) => {
                found = true;
                assert_eq!(matrix.rows.len(), 2);
                assert_eq!(matrix.top_line, environments::LineType::Single);
                assert_eq!(matrix.row_lines[0], environments::LineType::Single);
            },
            _ => (),
        });
        assert!(found);

        let output = parse(r"\begin{tabular}{|l|c|} x & y \end{tabular}");
        assert!(output.is_ok(), "{:?}", output.diagnostics);
    }

    #[test]
    fn left_right() {
        let output = parse(r"$\left( x \right.$");
        assert!(output.is_ok(), "{:?}", output.diagnostics);
        match output.root {
            Node::TextProps { ref child, .. } => match **child {
                Node::Brace { open, close, .. } => assert_eq!((open, close), (BraceType::Paren, BraceType::None)),
                ref other => panic!("unexpected tree {}", other),
            },
            ref other => panic!("unexpected tree {}", other),
        }

        assert!(parse(r"$\left\{ x \right\}$").is_ok());
        assert!(parse(r"$\left[ \frac{1}{2} \right]$").is_ok());
        assert!(parse(r"$\left\langle x \right\rangle$").is_ok());

        let errs = errors(r"$\left( x$");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], ParseError::UnexpectedToken { .. }));

        let errs = errors(r"$x \right)$");
        assert_eq!(errs.len(), 1);

        let errs = errors(r"$\left x \right)$");
        assert!(errs.contains(&ParseError::MissingBraceType { instruction : "left".to_string() }));
    }

    #[test]
    fn big_delimiters() {
        assert_eq!(tree(r"$\bigl( x \bigr)$"),
                   r#"(\equation (list (brace[Paren None] empty(0em, 0.85em)) "x" (brace[None Paren] empty(0em, 0.85em))))"#);
        assert!(errors(r"$\big x$").contains(&ParseError::MissingBraceType { instruction : "big".to_string() }));
    }

    #[test]
    fn limits() {
        assert_eq!(tree(r"$\sum_{i}$"), r#"(\equation (list \sum[limits] (sub "i")))"#);
        assert_eq!(tree(r"$\sum\nolimits_{i}$"), r#"(\equation (list \sum (sub "i")))"#);
        assert_eq!(tree(r"$\textstyle\sum_{i}$"), r#"(\equation (list \textstyle \sum (sub "i")))"#);
        assert_eq!(tree(r"\sum"), r"\sum");
    }

    #[test]
    fn instructions_with_arguments() {
        let success_cases = vec![
            r"$\frac{1}{2}$",
            r"$\dfrac{a}{b+c}$",
            r"$\binom{n}{k}$",
            r"$\sqrt{x}$",
            r"$\sqrt[3]{x}$",
            r"$\cbrt{x}$",
            r"$\vec{x}$",
            r"$\underbrace{a+b}{n}$",
            r"$\substack[l]{a\\b}$",
            r"$\phantom{x}$",
            r"\textcolor{blue}{word}",
            r"\fcolorbox{red}{yellow}{text}",
            r"\unicode{x3B1}",
            r"\begin{center} a \\ b \end{center}",
            r"\begin{framed} a \end{framed}",
            r"\verb|\frac{1}{2}|",
            r"a~b -- c --- d-e",
        ];
        for case in success_cases {
            eprintln!("{}", case);
            let output = parse(case);
            assert!(output.is_ok(), "{:?}", output.diagnostics);
        }
    }

    #[test]
    fn environments() {
        assert!(errors(r"\end{center}").contains(&ParseError::UnmatchedEnd("center".to_string())));
        assert!(errors(r"\begin{foo} a \end{foo}").contains(&ParseError::UnknownEnvironment("foo".to_string())));
        assert_eq!(errors(r"\begin{foo} a \end{foo}").len(), 1);
    }

    #[test]
    fn line_breaks() {
        assert_eq!(errors(r"a \\ b"), vec![ParseError::LineBreakNotAllowed]);

        let output = Parser::new(r"a \\ b")
            .with_options(ParseOptions { allow_linebreaks : true, ..ParseOptions::default() })
            .parse();
        assert!(output.is_ok());
        match output.root {
            Node::VerticalList(ref list) => assert_eq!(list.lines.len(), 2),
            ref other => panic!("unexpected tree {}", other),
        }
    }

    #[test]
    fn surrounding_space() {
        let output = Parser::new("x")
            .with_options(ParseOptions { add_surrounding_space : true, ..ParseOptions::default() })
            .parse();
        assert_eq!(output.root.to_string(), r#"(list space(Thick) "x" space(Thick))"#);
    }

    #[test]
    fn nesting_limit() {
        let deep = format!("{}x{}", "{".repeat(20), "}".repeat(20));
        let output = Parser::new(&deep)
            .with_options(ParseOptions { max_depth : 8, ..ParseOptions::default() })
            .parse();
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].error, ParseError::NestingTooDeep(8));

        assert!(parse(&deep).is_ok());
    }

    #[test]
    fn custom_registry() {
        let registry = InstructionRegistry::empty();
        let output = Parser::new(r"\textbf{x} $\alpha$").with_registry(&registry).parse();
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].error, ParseError::UnknownInstruction("textbf".to_string()));
    }

    #[test]
    fn simplified_trees_are_stable() {
        let cases = vec![
            r"$x^2$",
            r"a {b {c}} d",
            r"{\bf a} {{b}}",
            r"$\frac{{a}}{{{b}}}$",
            r"$\begin{matrix} {a} & b \end{matrix}$",
            r"${\frac{a}{b}c}^2 {c}_1$",
        ];
        for case in cases {
            eprintln!("{}", case);
            let root = parse(case).root;
            assert_eq!(root.clone().simplify().to_string(), root.to_string());
        }
    }

    #[test]
    fn groups_before_scripts_keep_their_extent() {
        let grouped = parse(r"${\frac{a}{b}c}^2$").root.to_string();
        assert!(grouped.contains(r#"(block (list ("#), "{}", grouped);
        assert!(grouped.contains(r#""c")) (sup "2")"#), "{}", grouped);
        let single = parse(r"${c}^2$").root.to_string();
        assert!(!single.contains("block"), "{}", single);
        assert!(single.contains(r#""c" (sup "2")"#), "{}", single);
    }

    #[test]
    fn strict_result() {
        assert!(parse(r"$x$").into_result().is_ok());
        match parse(r"\nope").into_result() {
            Err(Error::Parse(diagnostics)) => assert_eq!(diagnostics.len(), 1),
            other => panic!("unexpected result {:?}", other),
        }
    }
}

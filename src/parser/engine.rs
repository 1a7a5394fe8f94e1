//! Recursive descent over the tokens of the [`Lexer`].
//!
//! The engine never gives up: every syntax problem is pushed as a [`Diagnostic`] and parsing resumes
//! at the next token which makes sense, so that some tree is always produced.

use std::borrow::Cow;
use std::mem;

use crate::environment::Environment;
use crate::error::{Diagnostic, ParseError};
use super::environments::{big_size_factor, BlockEnvironment, BraceType, ColumnSpec, HorizontalAlignment,
                          LineType, MatrixEnvironment, RuleCount, SpacingMode, VerticalOrientation};
use super::instructions::{Behavior, EngineContext, Instruction, InstructionRegistry};
use super::lexer::{Lexer, Token};
use super::nodes::{Decoration, FracMode, Matrix, Node, PhantomKind, VerticalList, WhitespaceKind};
use super::symbols::Symbol;
use super::ParseOptions;

/// Text tokens which stand for an operator symbol inside math
const MATH_OPERATORS : &[&str] = &["+", "-", "=", "*", "<", ">"];

/// The token which ended a run of nodes. The token itself is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Terminator {
    Eof,
    CloseBrace,
    CloseBracket,
    NewLine,
    Ampersand,
    EndEnvironment,
    Right,
    Dollar,
}

/// Tokens ending a run on top of the ones which always do
#[derive(Debug, Clone, Copy, Default)]
struct Stop<'i> {
    /// inside `\left`: `\right` ends the run
    brace : Option<BraceType>,
    /// inside `\begin{name}`: `\end{name}` ends the run
    environment : Option<&'i str>,
    /// inside an optional argument: `]` ends the run
    bracket : bool,
    /// the run is the content of `$..$`: the closing `$` is consumed
    dollar : bool,
}

pub(crate) struct Engine<'i, 'r> {
    lexer : Lexer<'i>,
    registry : &'r InstructionRegistry,
    ctx : EngineContext,
    current : Token<'i>,
    /// a token given back to the lexer, read before any other
    pending : Option<Token<'i>>,
    diagnostics : Vec<Diagnostic>,
    depth : usize,
    max_depth : usize,
    /// `\textstyle` is in effect, big operators do not take limits
    text_style : bool,
    /// delimiter of the last `\right` met
    last_right : BraceType,
    /// rules (`\hline`...) met in the last run
    last_rules : RuleCount,
}

impl<'i, 'r> Engine<'i, 'r> {
    pub fn new(input : &'i str, registry : &'r InstructionRegistry, ctx : EngineContext, max_depth : usize) -> Self {
        Self {
            lexer : Lexer::new(input),
            registry,
            ctx,
            current : Token::EOF,
            pending : None,
            diagnostics : Vec::new(),
            depth : 0,
            max_depth,
            text_style : false,
            last_right : BraceType::None,
            last_rules : RuleCount::default(),
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Parses the whole input
    pub fn parse_document(&mut self, options : &ParseOptions) -> Node {
        if options.wrap_in_math {
            self.lexer.set_math(true);
        }

        let mut lines = Vec::new();
        let mut line = Vec::new();
        loop {
            let stop = Stop { dollar : self.math(), ..Stop::default() };
            let (node, end) = self.parse_run(true, stop);
            line.push(node);
            match end {
                Terminator::Eof => break,
                Terminator::NewLine if options.allow_linebreaks =>
                    lines.push(Node::List(mem::take(&mut line))),
                Terminator::NewLine => self.error(ParseError::LineBreakNotAllowed),
                Terminator::CloseBrace => self.error(ParseError::UnexpectedToken {
                    expected : "end of input".to_string(),
                    found    : self.current.to_string(),
                }),
                // stray '&' or the '$' closing the wrapping math
                _ => (),
            }
        }

        let mut root = if options.allow_linebreaks {
            lines.push(Node::List(line));
            Node::VerticalList(VerticalList::new(lines, HorizontalAlignment::Left))
        } else {
            Node::List(line)
        };

        if options.wrap_in_math {
            root = self.math_node(root);
        }
        if options.add_surrounding_space {
            root = Node::List(vec![
                Node::Whitespace(WhitespaceKind::Thick),
                root,
                Node::Whitespace(WhitespaceKind::Thick),
            ]);
        }
        root.simplify()
    }

    fn math(&self) -> bool {
        self.lexer.inside_math()
    }

    fn advance(&mut self) {
        self.current = match self.pending.take() {
            Some(token) => token,
            None => self.lexer.next_token(&mut self.diagnostics),
        };
    }

    fn advance_skipping_whitespace(&mut self) {
        self.advance();
        while self.current == Token::WhiteSpace {
            self.advance();
        }
    }

    /// The rest of a text token, to be read again by the next `advance`
    fn give_back(&mut self, rest : &str) {
        if !rest.is_empty() {
            self.pending = Some(Token::Text(Cow::Owned(rest.to_string())));
        }
    }

    fn error(&mut self, error : ParseError) {
        let diagnostic = Diagnostic::new(self.lexer.position(), error);
        debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn unexpected(&mut self, expected : &str) {
        let found = self.current.to_string();
        self.error(ParseError::UnexpectedToken { expected : expected.to_string(), found });
    }

    /// Environment the parser can tell about, used to evaluate modifiers while parsing
    fn probe(&self) -> Environment {
        let mut env = Environment::default();
        if self.math() {
            env.begin_math_mode();
        }
        env.text_style = self.text_style;
        env
    }

    /// Wraps `child` in the instruction which switches to math
    fn math_node(&self, child : Node) -> Node {
        let modifier = match self.registry.get("equation") {
            Some(Instruction { behavior : Behavior::TextProps(modifier), .. }) => *modifier,
            _ => enter_math,
        };
        Node::TextProps { name : "equation".to_string(), params : Vec::new(), modifier, child : Box::new(child) }
    }

    fn text_node(&self, text : String) -> Option<Node> {
        let text = if self.math() {
            text.chars().filter(|c| !c.is_whitespace()).collect()
        } else {
            text
        };
        if text.is_empty() { None } else { Some(Node::Text(text)) }
    }

    fn symbol_node(name : &str) -> Option<Node> {
        Symbol::from_name(name).map(|symbol| Node::Symbol { name : name.to_string(), symbol, limits : false })
    }

    /// Parses nodes until a terminator. If `get` is set the current token is skipped first.
    fn parse_run(&mut self, get : bool, stop : Stop<'i>) -> (Node, Terminator) {
        if self.depth >= self.max_depth {
            self.error(ParseError::NestingTooDeep(self.max_depth));
            let end = self.skip_group(get);
            return (Node::default(), end);
        }

        self.depth += 1;
        let text_style = self.text_style;
        let mut rules = RuleCount::default();
        let (nodes, end) = self.parse_run_nodes(get, stop, &mut rules);
        self.text_style = text_style;
        self.last_rules = rules;
        self.depth -= 1;
        (Node::List(nodes).simplify(), end)
    }

    fn parse_run_nodes(&mut self, mut get_new : bool, stop : Stop<'i>, rules : &mut RuleCount) -> (Vec<Node>, Terminator) {
        let mut nodes : Vec<Node> = Vec::new();
        loop {
            if get_new {
                self.advance();
            }
            get_new = true;

            match self.current.clone() {
                Token::EOF => return (nodes, Terminator::Eof),
                Token::Text(text) => {
                    let mut text = text.into_owned();
                    if !self.math() {
                        // coalesce the words of a sentence
                        loop {
                            self.advance();
                            match self.current {
                                Token::Text(ref more) => text.push_str(more),
                                Token::WhiteSpace => text.push(' '),
                                _ => break,
                            }
                        }
                        get_new = false;
                    }

                    let trimmed = text.trim();
                    if self.math() && MATH_OPERATORS.contains(&trimmed) {
                        if let Some(node) = Self::symbol_node(trimmed) {
                            nodes.push(node);
                            continue;
                        }
                    }
                    nodes.extend(self.text_node(text));
                },
                Token::NewLine => return (nodes, Terminator::NewLine),
                Token::WhiteSpace => {
                    if !self.math() {
                        nodes.push(Node::Whitespace(WhitespaceKind::Normal));
                    }
                },
                Token::Tilde => nodes.push(Node::Whitespace(WhitespaceKind::NonBreaking)),
                Token::EnDash => nodes.extend(Self::symbol_node("endash")),
                Token::EmDash => nodes.extend(Self::symbol_node("emdash")),
                Token::Hyphen => nodes.extend(Self::symbol_node("hyphen")),
                Token::Instruction(name) => match name {
                    "limits" | "nolimits" => {
                        if let Some(last) = nodes.last_mut() {
                            last.set_limits(name == "limits");
                        }
                    },
                    "right" => if self.parse_right(stop) {
                        return (nodes, Terminator::Right);
                    },
                    _ if rules.record(name) => (),
                    _ => {
                        let (node, get) = self.parse_instruction(name);
                        nodes.extend(node);
                        get_new = get;
                    },
                },
                Token::Underscore | Token::Hat => {
                    let subscript = self.current == Token::Underscore;
                    let (node, rest, get) = self.parse_script_base();
                    get_new = get;
                    if let Some(node) = node {
                        nodes.push(if subscript {
                            Node::Subscript(Box::new(node))
                        } else {
                            Node::Superscript(Box::new(node))
                        });
                    }
                    if let Some(rest) = rest {
                        nodes.extend(self.text_node(rest));
                    }
                },
                Token::OpenBrace => {
                    let (child, closed) = self.parse_group();
                    nodes.push(Node::Block(Box::new(child)));
                    get_new = closed;
                },
                Token::CloseBrace => return (nodes, Terminator::CloseBrace),
                Token::OpenBracket => nodes.extend(self.text_node("[".to_string())),
                Token::CloseBracket => {
                    if stop.bracket {
                        return (nodes, Terminator::CloseBracket);
                    }
                    nodes.extend(self.text_node("]".to_string()));
                },
                Token::Verbatim { text, visible_space } =>
                    nodes.push(Node::Verbatim { text : text.to_string(), visible_space }),
                Token::BeginEnvironment(name) => {
                    let (node, get) = self.parse_environment(name);
                    nodes.push(node);
                    get_new = get;
                },
                Token::EndEnvironment(name) => {
                    if stop.environment == Some(name) {
                        return (nodes, Terminator::EndEnvironment);
                    }
                    self.error(ParseError::UnmatchedEnd(name.to_string()));
                },
                Token::Ampersand => return (nodes, Terminator::Ampersand),
                Token::Dollar => {
                    if self.math() {
                        // a '$' closing math opened further up is left to that level
                        if stop.dollar {
                            self.lexer.set_math(false);
                        }
                        return (nodes, Terminator::Dollar);
                    }
                    self.lexer.set_math(true);
                    let (child, end) = self.parse_run(true, Stop { dollar : true, ..Stop::default() });
                    if end != Terminator::Dollar {
                        self.lexer.set_math(false);
                        get_new = false;
                    }
                    nodes.push(self.math_node(child));
                },
            }
        }
    }

    /// Skips tokens up to the `}` closing the current group
    fn skip_group(&mut self, get : bool) -> Terminator {
        if get {
            self.advance();
        }
        let mut level = 0usize;
        loop {
            match self.current {
                Token::EOF => return Terminator::Eof,
                Token::OpenBrace => level += 1,
                Token::CloseBrace if level == 0 => return Terminator::CloseBrace,
                Token::CloseBrace => level -= 1,
                _ => (),
            }
            self.advance();
        }
    }

    /// Parses `{..}`, the current token being `{`. Returns `false` if the group was not closed,
    /// in which case the current token is what ended it.
    fn parse_group(&mut self) -> (Node, bool) {
        let (child, end) = self.parse_run(true, Stop::default());
        if end != Terminator::CloseBrace {
            self.unexpected("'}'");
            return (child, false);
        }
        (child, true)
    }

    /// Like [`Engine::parse_group`] with the math mode and the text style set for the content
    fn parse_scoped_group(&mut self, math : bool, text_style : bool) -> (Node, bool) {
        let (old_math, old_style) = (self.math(), self.text_style);
        self.lexer.set_math(math);
        self.text_style = text_style;
        let result = self.parse_group();
        self.lexer.set_math(old_math);
        self.text_style = old_style;
        result
    }

    /// Moves to the next `{`, reporting a missing argument of `name` if there is none
    fn expect_open_brace(&mut self, name : &str, expected : usize) -> bool {
        self.advance_skipping_whitespace();
        if self.current == Token::OpenBrace {
            return true;
        }
        self.error(ParseError::MissingArgument { instruction : name.to_string(), expected });
        false
    }

    /// What follows `_` or `^`: a group, an instruction or the first character of a text.
    /// Also returns the rest of that text, which is not scripted.
    fn parse_script_base(&mut self) -> (Option<Node>, Option<String>, bool) {
        self.advance_skipping_whitespace();
        match self.current.clone() {
            Token::Instruction(name) => {
                let (node, get) = self.parse_instruction(name);
                (node, None, get)
            },
            Token::OpenBrace => {
                let (child, closed) = self.parse_group();
                (Some(child), None, closed)
            },
            Token::Text(text) => {
                let mut chars = text.chars();
                let first = chars.next().map(|c| Node::Text(c.to_string()));
                let rest = chars.as_str();
                (first, (!rest.is_empty()).then(|| rest.to_string()), true)
            },
            _ => {
                self.unexpected("an argument for '^' or '_'");
                (None, None, false)
            },
        }
    }

    /// Delimiter read from the current token. The rest of a text token is given back.
    fn read_delimiter(&mut self) -> (BraceType, bool) {
        match self.current.clone() {
            Token::Instruction(name) => {
                let brace = BraceType::from_instruction(name);
                (brace, BraceType::opening_from_instruction(name) != BraceType::Unknown)
            },
            Token::Text(text) => {
                let mut chars = text.chars();
                let first = match chars.next() {
                    Some(c) => c,
                    None => return (BraceType::Unknown, false),
                };
                let mut buffer = [0; 4];
                let (brace, opening) = BraceType::from_token(first.encode_utf8(&mut buffer));
                if brace != BraceType::Unknown {
                    self.give_back(chars.as_str());
                }
                (brace, opening)
            },
            Token::OpenBracket => (BraceType::Square, true),
            Token::CloseBracket => (BraceType::Square, false),
            _ => (BraceType::Unknown, false),
        }
    }

    /// `\left<delim> .. \right<delim>`
    fn parse_left(&mut self) -> (Option<Node>, bool) {
        self.advance_skipping_whitespace();
        let (open, _) = self.read_delimiter();
        if open == BraceType::Unknown || open == BraceType::Any {
            self.error(ParseError::MissingBraceType { instruction : "left".to_string() });
            return (None, false);
        }

        let expected = if open == BraceType::None { BraceType::Any } else { open };
        self.last_right = BraceType::None;
        let (child, end) = self.parse_run(true, Stop { brace : Some(expected), ..Stop::default() });
        if end == Terminator::Right {
            let node = Node::Brace { open, close : self.last_right, child : Box::new(child) };
            return (Some(node), true);
        }

        self.unexpected("'\\right'");
        (Some(Node::Brace { open, close : BraceType::None, child : Box::new(child) }), false)
    }

    /// `\right<delim>`, returns whether it closes the current run
    fn parse_right(&mut self, stop : Stop<'i>) -> bool {
        self.advance_skipping_whitespace();
        let (close, _) = self.read_delimiter();
        if close == BraceType::Unknown || close == BraceType::Any {
            self.error(ParseError::MissingBraceType { instruction : "right".to_string() });
            // whatever followed is parsed as usual
            self.pending = Some(mem::replace(&mut self.current, Token::EOF));
            return false;
        }

        match stop.brace {
            Some(expected) => {
                if !expected.accepts(close, true) {
                    debug!("'\\right{}' closes '\\left{}'", close, expected);
                }
                self.last_right = close;
                true
            },
            None => {
                self.error(ParseError::UnexpectedToken {
                    expected : "'\\left' before '\\right'".to_string(),
                    found    : "'\\right'".to_string(),
                });
                false
            },
        }
    }

    /// Any instruction which is neither a rule nor `\right`
    fn parse_instruction(&mut self, name : &'i str) -> (Option<Node>, bool) {
        if name == "left" {
            return self.parse_left();
        }
        if let Some(kind) = WhitespaceKind::from_instruction(name) {
            return (Some(Node::Whitespace(kind)), true);
        }
        if let Some(symbol) = Symbol::from_name(name) {
            let limits = symbol.limits && self.math() && !self.text_style;
            return (Some(Node::Symbol { name : name.to_string(), symbol, limits }), true);
        }
        if let Some(factor) = big_size_factor(name) {
            return self.parse_big(name, factor);
        }
        if let Some(&instruction) = self.registry.get(name) {
            return self.parse_registered(name, instruction);
        }
        if let Some(kind) = PhantomKind::from_name(name) {
            if !self.expect_open_brace(name, 1) {
                return (None, false);
            }
            let (child, closed) = self.parse_group();
            return (Some(Node::Phantom { kind, child : Box::new(child) }), closed);
        }
        match name {
            "substack" | "lsubstack" | "rsubstack" => return self.parse_substack(name),
            "sqrt" | "cbrt" => return self.parse_sqrt(name),
            _ => (),
        }
        if let Some(decoration) = Decoration::from_name(name) {
            if !self.expect_open_brace(name, 1) {
                return (None, false);
            }
            let (child, closed) = self.parse_group();
            return (Some(Node::Decorated { decoration, child : Box::new(child) }), closed);
        }
        if let Some(mode) = FracMode::from_name(name) {
            return self.parse_fraction(name, mode);
        }

        self.error(ParseError::UnknownInstruction(name.to_string()));
        (None, true)
    }

    /// `\big(`, `\Biggr]`... an invisible box of the given height between delimiters
    fn parse_big(&mut self, name : &str, factor : f64) -> (Option<Node>, bool) {
        self.advance_skipping_whitespace();
        let (brace, opening) = self.read_delimiter();
        if brace == BraceType::Unknown || brace == BraceType::Any {
            self.error(ParseError::MissingBraceType { instruction : name.to_string() });
            return (None, false);
        }

        let opening = if name.ends_with('l') {
            true
        } else if name.ends_with('r') {
            false
        } else {
            opening
        };
        let child = Box::new(Node::EmptyBox { width : 0., height : factor });
        let node = if opening {
            Node::Brace { open : brace, close : BraceType::None, child }
        } else {
            Node::Brace { open : BraceType::None, close : brace, child }
        };
        (Some(node), true)
    }

    /// Reads `count` arguments as plain strings
    fn parse_string_params(&mut self, name : &str, count : usize) -> Option<Vec<String>> {
        let mut params = Vec::with_capacity(count);
        for _ in 0 .. count {
            if !self.expect_open_brace(name, count) {
                return None;
            }
            let mut param = String::new();
            loop {
                self.advance();
                match self.current {
                    Token::Text(ref text) => param.push_str(text),
                    Token::WhiteSpace => param.push(' '),
                    Token::Hyphen => param.push('-'),
                    Token::EnDash => param.push_str("--"),
                    Token::EmDash => param.push_str("---"),
                    Token::CloseBrace => break,
                    _ => {
                        self.error(ParseError::MissingArgument { instruction : name.to_string(), expected : count });
                        return None;
                    },
                }
            }
            params.push(param);
        }
        Some(params)
    }

    /// Instructions from the registry
    fn parse_registered(&mut self, name : &str, instruction : Instruction) -> (Option<Node>, bool) {
        let params = match self.parse_string_params(name, instruction.params) {
            Some(params) => params,
            None => return (None, false),
        };

        match instruction.behavior {
            Behavior::ModifyEnvironment(modifier) => {
                let env = modifier(self.probe(), &params, &self.ctx);
                self.text_style = env.text_style;
                let node = Node::ModifyEnvironment { name : name.to_string(), params, modifier };
                // one space after the instruction is part of it
                self.advance();
                let get_new = self.current == Token::WhiteSpace;
                (Some(node), get_new)
            },
            Behavior::TextProps(modifier) => {
                if !self.expect_open_brace(name, instruction.params + 1) {
                    return (None, false);
                }
                let env = modifier(self.probe(), &params, &self.ctx);
                let (child, closed) = self.parse_scoped_group(env.inside_math, env.text_style);
                let node = Node::TextProps { name : name.to_string(), params, modifier, child : Box::new(child) };
                (Some(node), closed)
            },
            Behavior::Box(style) => {
                if !self.expect_open_brace(name, instruction.params + 1) {
                    return (None, false);
                }
                let (child, closed) = self.parse_scoped_group(self.math(), self.text_style);
                let node = Node::BoxInstruction { name : name.to_string(), params, style, child : Box::new(child) };
                (Some(node), closed)
            },
            Behavior::Substitute(substitute) => (Some(Node::Text(substitute(&params))), true),
        }
    }

    /// `\substack[align]{a \\ b}`
    fn parse_substack(&mut self, name : &str) -> (Option<Node>, bool) {
        let mut alignment = match name {
            "lsubstack" => HorizontalAlignment::Left,
            "rsubstack" => HorizontalAlignment::Right,
            _ => HorizontalAlignment::Centered,
        };

        self.advance_skipping_whitespace();
        if self.current == Token::OpenBracket {
            let mut spec = String::new();
            loop {
                self.advance();
                match self.current {
                    Token::Text(ref text) => spec.push_str(text),
                    Token::WhiteSpace => (),
                    _ => break,
                }
            }
            if self.current != Token::CloseBracket {
                self.unexpected("']'");
                return (None, false);
            }
            alignment = spec.parse().unwrap_or(alignment);
            self.advance_skipping_whitespace();
        }
        if self.current != Token::OpenBrace {
            self.error(ParseError::MissingArgument { instruction : name.to_string(), expected : 1 });
            return (None, false);
        }

        let (lines, end) = self.parse_lines(Stop::default());
        let closed = end == Terminator::CloseBrace;
        if !closed {
            self.unexpected("'}'");
        }
        let node = Node::VerticalList(VerticalList {
            lines,
            alignment,
            spacing_factor : 1.,
            spacing : SpacingMode::Minimal,
            orientation : VerticalOrientation::FirstLine,
        });
        (Some(node), closed)
    }

    /// `\sqrt[n]{x}` and `\cbrt{x}`
    fn parse_sqrt(&mut self, name : &str) -> (Option<Node>, bool) {
        self.advance_skipping_whitespace();
        let mut degree = None;
        if name == "cbrt" {
            degree = Some(Box::new(Node::text("3")));
        } else if self.current == Token::OpenBracket {
            let (node, end) = self.parse_run(true, Stop { bracket : true, ..Stop::default() });
            if end != Terminator::CloseBracket {
                self.unexpected("']'");
                return (None, false);
            }
            degree = Some(Box::new(node));
            self.advance_skipping_whitespace();
        }
        if self.current != Token::OpenBrace {
            self.error(ParseError::MissingArgument { instruction : name.to_string(), expected : 1 });
            return (None, false);
        }

        let (child, closed) = self.parse_group();
        (Some(Node::Sqrt { degree, child : Box::new(child) }), closed)
    }

    /// `\frac{a}{b}` and the other two-argument stacks
    fn parse_fraction(&mut self, name : &str, mode : FracMode) -> (Option<Node>, bool) {
        if !self.expect_open_brace(name, 2) {
            return (None, false);
        }
        let (top, closed) = self.parse_group();
        if !closed || !self.expect_open_brace(name, 2) {
            return (None, false);
        }
        let (bottom, closed) = self.parse_group();

        let fraction = Node::Fraction { mode, top : Box::new(top), bottom : Box::new(bottom) };
        let node = if name == "binom" {
            Node::Brace { open : BraceType::Paren, close : BraceType::Paren, child : Box::new(fraction) }
        } else {
            fraction
        };
        (Some(node), closed)
    }

    /// Lines separated by `\\` up to the end of the group or environment
    fn parse_lines(&mut self, stop : Stop<'i>) -> (Vec<Node>, Terminator) {
        let mut lines = Vec::new();
        let mut line = Vec::new();
        loop {
            let (node, end) = self.parse_run(true, stop);
            line.push(node);
            match end {
                Terminator::Ampersand => (),
                Terminator::NewLine => lines.push(Node::List(mem::take(&mut line)).simplify()),
                end => {
                    lines.push(Node::List(line).simplify());
                    return (lines, end);
                },
            }
        }
    }

    /// `\begin{name} .. \end{name}`
    fn parse_environment(&mut self, name : &'i str) -> (Node, bool) {
        if let Some(env) = MatrixEnvironment::from_name(name) {
            return self.parse_matrix(name, env);
        }

        let stop = Stop { environment : Some(name), ..Stop::default() };
        let block = BlockEnvironment::from_name(name);
        if block.is_none() {
            self.error(ParseError::UnknownEnvironment(name.to_string()));
        }

        let (lines, end) = self.parse_lines(stop);
        let closed = end == Terminator::EndEnvironment;
        if !closed {
            self.unexpected(&format!("'\\end{{{}}}'", name));
        }

        let node = match block {
            Some(BlockEnvironment::Boxed(box_name)) => {
                let content = Node::VerticalList(VerticalList::new(lines, HorizontalAlignment::Left));
                match self.registry.get(box_name) {
                    Some(&Instruction { params, behavior : Behavior::Box(style) }) => Node::BoxInstruction {
                        name   : box_name.to_string(),
                        params : vec!["lightgray".to_string(); params],
                        style,
                        child  : Box::new(content),
                    },
                    _ => content,
                }
            },
            _ => Node::VerticalList(VerticalList::new(lines, alignment_of(block))),
        };
        (node, closed)
    }

    /// Matrix-like environments: cells separated by `&`, rows by `\\`
    fn parse_matrix(&mut self, name : &'i str, env : MatrixEnvironment) -> (Node, bool) {
        let mut columns = ColumnSpec::default();
        if env.takes_column_spec() {
            self.lexer.consume_whitespace();
            if self.pending.is_none() && self.lexer.input().starts_with('{') {
                let _ = self.lexer.read_until("{");
                match self.lexer.read_until("}") {
                    Some(spec) => columns = ColumnSpec::parse(spec),
                    None => self.error(ParseError::UnexpectedToken {
                        expected : "'}'".to_string(),
                        found    : "end of input".to_string(),
                    }),
                }
            } else {
                self.error(ParseError::MissingArgument { instruction : format!("begin{{{}}}", name), expected : 1 });
            }
        }

        let stop = Stop { environment : Some(name), ..Stop::default() };
        let mut rows : Vec<Vec<Node>> = Vec::new();
        let mut row : Vec<Node> = Vec::new();
        let mut top_line = LineType::None;
        let mut row_lines : Vec<LineType> = Vec::new();
        let mut expected : Option<usize> = None;
        let closed = loop {
            let (cell, end) = self.parse_run(true, stop);

            // rules before the first cell of a row go below the previous row
            if row.is_empty() {
                let line = self.last_rules.line_type();
                match row_lines.last_mut() {
                    _ if line == LineType::None => (),
                    Some(last) => *last = line,
                    None => top_line = line,
                }
            }
            row.push(cell);

            match end {
                Terminator::Ampersand => continue,
                Terminator::NewLine => {
                    self.push_row(&mut rows, &mut row_lines, mem::take(&mut row), &mut expected);
                    continue;
                },
                _ => (),
            }

            let trailing = matches!(&row[..], [Node::List(nodes)] if nodes.is_empty());
            if !trailing || rows.is_empty() {
                self.push_row(&mut rows, &mut row_lines, mem::take(&mut row), &mut expected);
            }
            if end == Terminator::EndEnvironment {
                break true;
            }
            self.unexpected(&format!("'\\end{{{}}}'", name));
            break false;
        };

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize_with(width, Node::default);
        }

        let matrix = Node::Matrix(Matrix { rows, columns, top_line, row_lines });
        let node = match env.braces() {
            Some((open, close)) => Node::Brace { open, close, child : Box::new(matrix) },
            None => matrix,
        };
        (node, closed)
    }

    fn push_row(&mut self, rows : &mut Vec<Vec<Node>>, row_lines : &mut Vec<LineType>, row : Vec<Node>, expected : &mut Option<usize>) {
        match *expected {
            None => *expected = Some(row.len()),
            Some(count) if count != row.len() => {
                self.error(ParseError::MatrixRowLength { expected : count, found : row.len() });
            },
            Some(_) => (),
        }
        rows.push(row);
        row_lines.push(LineType::None);
    }
}

fn alignment_of(block : Option<BlockEnvironment>) -> HorizontalAlignment {
    match block {
        Some(BlockEnvironment::Aligned(alignment)) => alignment,
        _ => HorizontalAlignment::Left,
    }
}

fn enter_math(mut env : Environment, _ : &[String], _ : &EngineContext) -> Environment {
    env.begin_math_mode();
    env
}

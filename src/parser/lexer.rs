//! Producing tokens for the parser
use std::borrow::Cow;
use std::fmt;

use crate::error::{Diagnostic, ParseError};
use super::accents::AccentTable;

/// A token of the markup
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A run of text, possibly synthesized (e.g. `\"a` or `\char"41`)
    Text(Cow<'a, str>),
    /// An instruction, e.g. `\alpha`, without the backslash
    Instruction(&'a str),
    /// `\\`, `\newline` or `\linebreak`
    NewLine,
    /// `\begin{name}`
    BeginEnvironment(&'a str),
    /// `\end{name}`
    EndEnvironment(&'a str),
    /// Raw text from `\verb|..|` or `\begin{verbatim}..\end{verbatim}`
    Verbatim {
        /// the raw text
        text : &'a str,
        /// whether spaces are shown as ␣
        visible_space : bool,
    },
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `_`
    Underscore,
    /// `^`
    Hat,
    /// `$`
    Dollar,
    /// `&`
    Ampersand,
    /// `~`
    Tilde,
    /// A series of whitespaces
    WhiteSpace,
    /// `--` outside math
    EnDash,
    /// `---` outside math
    EmDash,
    /// `-` outside math
    Hyphen,
    /// End of file token
    EOF,
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Text(ref text)             => write!(f, "'{}'", text),
            Token::Instruction(name)          => write!(f, r#""\{}""#, name),
            Token::NewLine                    => write!(f, r"'\\'"),
            Token::BeginEnvironment(name)     => write!(f, r"'\begin{{{}}}'", name),
            Token::EndEnvironment(name)       => write!(f, r"'\end{{{}}}'", name),
            Token::Verbatim { .. }            => write!(f, "verbatim text"),
            Token::OpenBrace                  => write!(f, "'{{'"),
            Token::CloseBrace                 => write!(f, "'}}'"),
            Token::OpenBracket                => write!(f, "'['"),
            Token::CloseBracket               => write!(f, "']'"),
            Token::Underscore                 => write!(f, "'_'"),
            Token::Hat                        => write!(f, "'^'"),
            Token::Dollar                     => write!(f, "'$'"),
            Token::Ampersand                  => write!(f, "'&'"),
            Token::Tilde                      => write!(f, "'~'"),
            Token::WhiteSpace                 => write!(f, "' '"),
            Token::EnDash                     => write!(f, "'--'"),
            Token::EmDash                     => write!(f, "'---'"),
            Token::Hyphen                     => write!(f, "'-'"),
            Token::EOF                        => write!(f, "end of input"),
        }
    }
}

/// Characters which end a text run outside math
const TOKEN_CHARACTERS : &[char] = &['-', '_', '^', '\\', '$', '&', '}', '{', '[', ']', '~'];
/// Characters which form a text token on their own inside math
const MATH_SPECIAL_CHARS : &[char] = &['(', '[', '|', ')', ']', '+', '-', '*', '/', '<', '>', '='];
/// Characters which end a text run inside math
const MATH_SPECIAL_END_CHARS : &[char] = &['(', '&', '[', '|', ')', ']', '\\', '$', '{', '}', '_', '^', '+', '-', '/', '*', '=', '<', '>', '~'];
/// Instructions made of a single non-letter character, e.g. `\,` or `\{`
const SINGLE_CHAR_INSTRUCTIONS : &[char] = &['|', ';', ':', '!', ',', '_', '\\', '$', '%', '&', '#', '}', '{', ' ', '[', ']'];

/// Environments whose content is read verbatim, with whether spaces are shown
const VERBATIM_ENVIRONMENTS : &[(&str, bool)] = &[("verbatim", false), ("verbatim*", true), ("lstlisting", false)];


/// The main structure for producing tokens from an input string.
///
/// The lexer is mode-sensitive: inside math (see [`Lexer::set_math`]) operators and parentheses each become
/// a text token of their own, and accents are not recognized.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    source : &'a str,
    input : &'a str,
    inside_math : bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer at the start of `input`, outside math
    pub fn new(input: &'a str) -> Lexer<'a> {
        Self { source : input, input, inside_math : false }
    }

    /// Switches math mode on or off for the next tokens
    pub fn set_math(&mut self, inside_math : bool) {
        self.inside_math = inside_math;
    }

    /// Whether the lexer is in math mode
    pub fn inside_math(&self) -> bool {
        self.inside_math
    }

    /// Returns remaining input
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Position of the lexer in the input, in characters
    pub fn position(&self) -> usize {
        let consumed = self.source.len() - self.input.len();
        self.source[..consumed].chars().count()
    }

    fn diagnostic(&self, diagnostics : &mut Vec<Diagnostic>, error : ParseError) {
        let diagnostic = Diagnostic::new(self.position(), error);
        debug!("{}", diagnostic);
        diagnostics.push(diagnostic);
    }

    /// Reads the raw input up to the first occurrence of `end` and moves past `end`.
    /// If `end` never occurs, nothing is consumed and `None` is returned.
    pub fn read_until(&mut self, end : &str) -> Option<&'a str> {
        let index = self.input.find(end)?;
        let text = &self.input[..index];
        self.input = &self.input[index + end.len() ..];
        Some(text)
    }

    /// Consumes and returns all the remaining input
    pub fn read_to_end(&mut self) -> &'a str {
        let rest = self.input;
        self.input = &self.input[self.input.len()..];
        rest
    }

    /// Advances through the input so that the first character pointed to
    /// is not a whitespace
    pub fn consume_whitespace(&mut self) {
        self.input = self.input.trim_start();
    }

    /// Produces the next token. Lexical problems are appended to `diagnostics` and lexing goes on.
    pub fn next_token(&mut self, diagnostics : &mut Vec<Diagnostic>) -> Token<'a> {
        let mut chars = self.input.chars();
        let c = match chars.next() {
            Some(c) => c,
            None => return Token::EOF,
        };

        match c {
            '-' if !self.inside_math => {
                if let Some(rest) = self.input.strip_prefix("---") {
                    self.input = rest;
                    Token::EmDash
                }
                else if let Some(rest) = self.input.strip_prefix("--") {
                    self.input = rest;
                    Token::EnDash
                }
                else {
                    self.input = chars.as_str();
                    Token::Hyphen
                }
            },
            '\\' => self.instruction(diagnostics),
            '{' => {
                if !self.inside_math {
                    if let Some((accented, len)) = AccentTable::standard().match_curly(self.input) {
                        self.input = &self.input[len..];
                        return Token::Text(Cow::Owned(accented.to_string()));
                    }
                }
                self.input = chars.as_str();
                Token::OpenBrace
            },
            c if c.is_whitespace() => {
                self.consume_whitespace();
                Token::WhiteSpace
            },
            c => {
                let token = match c {
                    '$' => Token::Dollar,
                    '&' => Token::Ampersand,
                    '~' => Token::Tilde,
                    '}' => Token::CloseBrace,
                    '[' => Token::OpenBracket,
                    ']' => Token::CloseBracket,
                    '_' => Token::Underscore,
                    '^' => Token::Hat,
                    _ => return self.text(),
                };
                self.input = chars.as_str();
                token
            },
        }
    }

    fn text(&mut self) -> Token<'a> {
        let start = self.input;
        if self.inside_math {
            let mut chars = self.input.chars();
            if let Some(c) = chars.next() {
                if MATH_SPECIAL_CHARS.contains(&c) {
                    self.input = chars.as_str();
                    return Token::Text(Cow::Borrowed(diff_slices(start, self.input)));
                }
            }

            let end = self.input.find(|c : char| MATH_SPECIAL_END_CHARS.contains(&c)).unwrap_or(self.input.len());
            let run = &self.input[..end];
            self.input = &self.input[end..];

            // runs of whitespace inside the text are collapsed to their first character
            if run.chars().any(char::is_whitespace) {
                let mut collapsed = String::with_capacity(run.len());
                let mut last_was_space = false;
                for c in run.chars() {
                    if c.is_whitespace() {
                        if !last_was_space { collapsed.push(c); }
                        last_was_space = true;
                    }
                    else {
                        collapsed.push(c);
                        last_was_space = false;
                    }
                }
                return Token::Text(Cow::Owned(collapsed));
            }
            Token::Text(Cow::Borrowed(run))
        }
        else {
            let end = self.input
                .find(|c : char| c.is_whitespace() || TOKEN_CHARACTERS.contains(&c))
                .unwrap_or(self.input.len());
            let run = &self.input[..end];
            self.input = &self.input[end..];
            Token::Text(Cow::Borrowed(run))
        }
    }

    fn instruction(&mut self, diagnostics : &mut Vec<Diagnostic>) -> Token<'a> {
        if !self.inside_math && !self.input.starts_with(r"\char") {
            if let Some((accented, len)) = AccentTable::standard().match_backslash(self.input) {
                self.input = &self.input[len..];
                return Token::Text(Cow::Owned(accented.to_string()));
            }
        }

        let mut chars = self.input.chars();
        chars.next();
        let start_command = chars.as_str();

        let character = match chars.next() {
            Some(c) => c,
            None => {
                self.input = start_command;
                self.diagnostic(diagnostics, ParseError::EmptyInstruction);
                return Token::EOF;
            },
        };

        if character == '\\' {
            self.input = chars.as_str();
            return Token::NewLine;
        }
        if SINGLE_CHAR_INSTRUCTIONS.contains(&character) {
            self.input = chars.as_str();
            return Token::Instruction(diff_slices(start_command, self.input));
        }

        let end = start_command.find(|c : char| !c.is_alphabetic()).unwrap_or(start_command.len());
        let name = &start_command[..end];
        self.input = &start_command[end..];

        match name {
            "" => {
                self.diagnostic(diagnostics, ParseError::EmptyInstruction);
                self.next_token(diagnostics)
            },
            "newline" | "linebreak" => Token::NewLine,
            "char" => self.char_code().unwrap_or(Token::Instruction(name)),
            "begin" => self.begin_environment(diagnostics),
            "end" => match self.environment_name("end", diagnostics) {
                Some(name) => Token::EndEnvironment(name),
                None => self.next_token(diagnostics),
            },
            _ if name.starts_with("verb") => {
                self.input = &start_command["verb".len()..];
                self.verb(diagnostics)
            },
            _ => Token::Instruction(name),
        }
    }

    /// `\char"HEX`, `` \char`OCT ``, `\char'OCT` or `\charDEC`, the instruction name is already consumed
    fn char_code(&mut self) -> Option<Token<'a>> {
        let mut chars = self.input.chars();
        let (radix, digits) = match chars.next()? {
            '"' => (16, chars.as_str()),
            '`' | '\'' => (8, chars.as_str()),
            c if c.is_ascii_digit() => (10, self.input),
            _ => return None,
        };

        let end = digits.find(|c : char| !c.is_digit(radix)).unwrap_or(digits.len());
        let number = &digits[..end];
        self.input = &digits[end..];
        let code = u32::from_str_radix(number, radix).unwrap_or(0xFFFD);
        let c = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
        Some(Token::Text(Cow::Owned(c.to_string())))
    }

    /// Reads `{name}` after `\begin` or `\end`
    fn environment_name(&mut self, instruction : &str, diagnostics : &mut Vec<Diagnostic>) -> Option<&'a str> {
        let rest = match self.input.strip_prefix('{') {
            Some(rest) => rest,
            None => {
                self.diagnostic(diagnostics, ParseError::MissingBraceAfter { instruction : instruction.to_string() });
                return None;
            },
        };
        self.input = rest;
        match self.read_until("}") {
            Some(name) => Some(name.trim()),
            None => {
                self.diagnostic(diagnostics, ParseError::UnexpectedToken {
                    expected : "'}'".to_string(),
                    found : Token::EOF.to_string(),
                });
                Some(self.read_to_end().trim())
            },
        }
    }

    fn begin_environment(&mut self, diagnostics : &mut Vec<Diagnostic>) -> Token<'a> {
        let name = match self.environment_name("begin", diagnostics) {
            Some(name) => name,
            None => return self.next_token(diagnostics),
        };

        let visible_space = match VERBATIM_ENVIRONMENTS.iter().find(|(env, _)| *env == name) {
            Some(&(_, visible_space)) => visible_space,
            None => return Token::BeginEnvironment(name),
        };

        let end = format!(r"\end{{{}}}", name);
        let text = match self.read_until(&end) {
            Some(text) => text,
            None => {
                self.diagnostic(diagnostics, ParseError::UnterminatedVerbatim(name.to_string()));
                self.read_to_end()
            },
        };
        Token::Verbatim { text : trim_blank_lines(text), visible_space }
    }

    /// `\verb|..|`, `\verb*|..|` or `\verb{..}`, the input starts right after `verb`
    fn verb(&mut self, diagnostics : &mut Vec<Diagnostic>) -> Token<'a> {
        let (visible_space, rest) = match self.input.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, self.input),
        };
        let mut chars = rest.chars();
        let delimiter = match chars.next() {
            Some('{') => '}',
            Some(c) => c,
            None => {
                self.input = rest;
                self.diagnostic(diagnostics, ParseError::UnterminatedVerb);
                return Token::EOF;
            },
        };
        self.input = chars.as_str();

        let mut buffer = [0u8; 4];
        let text = match self.read_until(delimiter.encode_utf8(&mut buffer)) {
            Some(text) => text,
            None => {
                self.diagnostic(diagnostics, ParseError::UnterminatedVerb);
                self.read_to_end()
            },
        };
        Token::Verbatim { text, visible_space }
    }
}

/// Drops the first and the last line of `text` if they only contain whitespace
fn trim_blank_lines(text : &str) -> &str {
    let mut text = text;
    match text.find('\n') {
        Some(index) if text[..index].trim().is_empty() => text = &text[index + 1 ..],
        None if text.trim().is_empty() => return "",
        _ => (),
    }
    if let Some(index) = text.rfind('\n') {
        if text[index + 1 ..].trim().is_empty() {
            text = &text[..index];
        }
    }
    else if text.trim().is_empty() {
        return "";
    }
    text
}

/// Assuming `slice2` is a suffix of `slice1`,
/// returns the prefix of `slice1` that ends just before the first character of `slice2`
fn diff_slices<'a>(slice : &'a str, suffix : &'a str) -> &'a str {
    &slice[.. (slice.len() - suffix.len())]
}


#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{Lexer, Token, trim_blank_lines};
    use crate::error::ParseError;

    fn tokens(input : &str, math : bool) -> (Vec<Token<'_>>, Vec<ParseError>) {
        let mut lexer = Lexer::new(input);
        lexer.set_math(math);
        let mut diagnostics = Vec::new();
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token(&mut diagnostics);
            if token == Token::EOF { break; }
            tokens.push(token);
        }
        (tokens, diagnostics.into_iter().map(|d| d.error).collect())
    }

    fn text(s : &str) -> Token<'_> {
        Token::Text(Cow::Borrowed(s))
    }

    #[test]
    fn lex_text_mode() {
        let (got, errors) = tokens(r"ab  c--d---e-f~g", false);
        assert!(errors.is_empty());
        assert_eq!(got, vec![
            text("ab"), Token::WhiteSpace, text("c"), Token::EnDash, text("d"),
            Token::EmDash, text("e"), Token::Hyphen, text("f"), Token::Tilde, text("g"),
        ]);
    }

    #[test]
    fn lex_math_mode() {
        let (got, _) = tokens(r"f(x)=a  b+c_1", true);
        assert_eq!(got, vec![
            text("f"), text("("), text("x"), text(")"), text("="),
            text("a b"), text("+"), text("c"), Token::Underscore, text("1"),
        ]);

        let (got, _) = tokens(r"x-y", true);
        assert_eq!(got, vec![text("x"), text("-"), text("y")]);
    }

    #[test]
    fn lex_instructions() {
        let tests = [
            (r"\alpha x",   Token::Instruction("alpha"), " x"),
            (r"\$ 0",       Token::Instruction("$"),     " 0"),
            (r"\, 0",       Token::Instruction(","),     " 0"),
            (r"\ +1",       Token::Instruction(" "),     "+1"),
            (r"\\x",        Token::NewLine,              "x"),
            (r"\newline x", Token::NewLine,              " x"),
            (r"\frac{1}",   Token::Instruction("frac"),  "{1}"),
            (r"\begin{matrix}a", Token::BeginEnvironment("matrix"), "a"),
            (r"\end{ pmatrix }", Token::EndEnvironment("pmatrix"), ""),
        ];

        for (input, token, remainder) in tests {
            eprintln!("Input: {:?}", input);
            let mut lexer = Lexer::new(input);
            let mut diagnostics = Vec::new();
            assert_eq!(lexer.next_token(&mut diagnostics), token);
            assert_eq!(lexer.input(), remainder);
            assert!(diagnostics.is_empty());
        }
    }

    #[test]
    fn lex_accents() {
        let (got, _) = tokens(r#"M\"uller {\'e} \v{s}\ss x"#, false);
        assert_eq!(got, vec![
            text("M"), text("ü"), text("ller"), Token::WhiteSpace,
            text("é"), Token::WhiteSpace, text("š"), text("ß"),
            Token::WhiteSpace, text("x"),
        ]);

        // accents are not recognized in math
        let (got, _) = tokens(r"\vec{x}", true);
        assert_eq!(got[0], Token::Instruction("vec"));
    }

    #[test]
    fn lex_char() {
        let tests = [
            (r#"\char"41x"#, "A", "x"),
            (r"\char'101 ", "A", " "),
            (r"\char`101",  "A", ""),
            (r"\char65",    "A", ""),
        ];
        for (input, expected, remainder) in tests {
            eprintln!("Input: {:?}", input);
            let mut lexer = Lexer::new(input);
            let mut diagnostics = Vec::new();
            assert_eq!(lexer.next_token(&mut diagnostics), Token::Text(expected.into()));
            assert_eq!(lexer.input(), remainder);
        }
    }

    #[test]
    fn lex_verbatim() {
        let (got, errors) = tokens(r"\verb!a \b! \verb*|x y| \verb{c}", false);
        assert!(errors.is_empty());
        assert_eq!(got, vec![
            Token::Verbatim { text : r"a \b", visible_space : false },
            Token::WhiteSpace,
            Token::Verbatim { text : "x y", visible_space : true },
            Token::WhiteSpace,
            Token::Verbatim { text : "c", visible_space : false },
        ]);

        let (got, errors) = tokens("\\begin{verbatim}  \nline 1\n  line 2\n\\end{verbatim}", false);
        assert!(errors.is_empty());
        assert_eq!(got, vec![Token::Verbatim { text : "line 1\n  line 2", visible_space : false }]);

        let (_, errors) = tokens(r"\verb|abc", false);
        assert_eq!(errors, vec![ParseError::UnterminatedVerb]);
        let (_, errors) = tokens(r"\begin{lstlisting} x", false);
        assert_eq!(errors, vec![ParseError::UnterminatedVerbatim("lstlisting".to_string())]);
    }

    #[test]
    fn lex_errors() {
        let (got, errors) = tokens(r"a\", false);
        assert_eq!(got, vec![text("a")]);
        assert_eq!(errors, vec![ParseError::EmptyInstruction]);

        let (got, errors) = tokens(r"\begin x", false);
        assert_eq!(got, vec![Token::WhiteSpace, text("x")]);
        assert_eq!(errors, vec![ParseError::MissingBraceAfter { instruction : "begin".to_string() }]);

        let (got, errors) = tokens(r"\1", false);
        assert_eq!(got, vec![text("1")]);
        assert_eq!(errors, vec![ParseError::EmptyInstruction]);
    }

    #[test]
    fn positions_count_characters() {
        let mut lexer = Lexer::new("éé\\x");
        let mut diagnostics = Vec::new();
        lexer.next_token(&mut diagnostics);
        assert_eq!(lexer.position(), 2);
    }

    #[test]
    fn blank_lines() {
        assert_eq!(trim_blank_lines("  \na\nb\n "), "a\nb");
        assert_eq!(trim_blank_lines("a"), "a");
        assert_eq!(trim_blank_lines("   "), "");
        assert_eq!(trim_blank_lines("\n"), "");
    }
}

//! Defines different error types related to various phases of rendering a formula.
//!   - [`ParseError`] : a syntax problem in the markup (unknown instruction, missing argument, ragged matrix row).
//!     Parse errors never abort parsing: each one is recorded as a [`Diagnostic`] and the parser goes on.
//!   - [`Error`] : what the strict entry points (e.g. [`crate::render`]) return.

use std::fmt;

/// Result type for the strict entry points
pub type Result<T> = ::std::result::Result<T, Error>;

/// Syntax problem in the markup provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A lone `\` with no instruction name after it.
    EmptyInstruction,
    /// `\begin` or `\end` was not followed by `{name}`.
    MissingBraceAfter {
        /// `begin` or `end`
        instruction : String,
    },
    /// The instruction is neither a symbol nor registered in the instruction registry.
    UnknownInstruction(String),
    /// A known instruction did not get all of its `{...}` arguments.
    MissingArgument {
        /// name of the instruction
        instruction : String,
        /// number of arguments expected
        expected : usize,
    },
    /// `\end{name}` without a corresponding `\begin{name}`.
    UnmatchedEnd(String),
    /// `\begin{name}` for an environment we know nothing about.
    UnknownEnvironment(String),
    /// A row of a matrix-like environment does not have as many cells as the first one.
    MatrixRowLength {
        /// number of columns established by the previous rows
        expected : usize,
        /// number of cells in the faulty row
        found : usize,
    },
    /// `\verb` whose closing delimiter was never found.
    UnterminatedVerb,
    /// `\begin{verbatim}` (or similar) without its `\end{..}`.
    UnterminatedVerbatim(String),
    /// `\left`, `\right` or `\big`-like instruction not followed by a delimiter.
    MissingBraceType {
        /// name of the instruction
        instruction : String,
    },
    /// A specific token was expected.
    UnexpectedToken {
        /// the expected token
        expected : String,
        /// the token found instead
        found : String,
    },
    /// Groups are nested more deeply than allowed, the group is skipped.
    NestingTooDeep(usize),
    /// A line break appeared while explicit line breaks are not permitted.
    LineBreakNotAllowed,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ParseError::*;
        match *self {
            EmptyInstruction =>
                write!(f, "empty instruction name after '\\'"),
            MissingBraceAfter { ref instruction } =>
                write!(f, "expected '{{' after '\\{}'", instruction),
            UnknownInstruction(ref name) =>
                write!(f, "unknown instruction '\\{}'", name),
            MissingArgument { ref instruction, expected } =>
                write!(f, "instruction '\\{}' expects {} argument(s) in braces", instruction, expected),
            UnmatchedEnd(ref name) =>
                write!(f, "'\\end{{{}}}' without matching '\\begin{{{}}}'", name, name),
            UnknownEnvironment(ref name) =>
                write!(f, "unknown environment '{}'", name),
            MatrixRowLength { expected, found } =>
                write!(f, "matrix row has {} cell(s), expected {}", found, expected),
            UnterminatedVerb =>
                write!(f, "'\\verb' is missing its closing delimiter"),
            UnterminatedVerbatim(ref name) =>
                write!(f, "'\\begin{{{}}}' is missing its '\\end{{{}}}'", name, name),
            MissingBraceType { ref instruction } =>
                write!(f, "'\\{}' must be followed by a delimiter", instruction),
            UnexpectedToken { ref expected, ref found } =>
                write!(f, "expected {} found {}", expected, found),
            NestingTooDeep(max) =>
                write!(f, "groups nested more than {} levels deep", max),
            LineBreakNotAllowed =>
                write!(f, "line breaks are not allowed here"),
        }
    }
}

/// A [`ParseError`] together with the character offset in the input where it was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// offset (in characters) in the input string
    pub position : usize,
    /// what went wrong
    pub error : ParseError,
}

impl Diagnostic {
    /// Creates a new diagnostic
    pub fn new(position : usize, error : ParseError) -> Self {
        Self { position, error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "error @ ch. {}: {}", self.position, self.error)
    }
}

/// A generic error type covering any error that may happen during the process.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// the markup produced diagnostics
    Parse(Vec<Diagnostic>),
    /// the graphics backend failed (e.g. could not allocate its target)
    Backend(String),
}

impl From<Vec<Diagnostic>> for Error {
    fn from(e: Vec<Diagnostic>) -> Self {
        Error::Parse(e)
    }
}

impl From<Diagnostic> for Error {
    fn from(e: Diagnostic) -> Self {
        Error::Parse(vec![e])
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Parse(ref diagnostics) => {
                let mut first = true;
                for diagnostic in diagnostics {
                    if !first { writeln!(f)?; }
                    write!(f, "{}", diagnostic)?;
                    first = false;
                }
                Ok(())
            },
            Error::Backend(ref message) =>
                write!(f, "backend error: {}", message),
        }
    }
}

impl std::error::Error for Error {}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::new(4, ParseError::UnknownInstruction("foo".to_string()));
        assert_eq!(d.to_string(), "error @ ch. 4: unknown instruction '\\foo'");

        let e : Error = vec![d.clone(), Diagnostic::new(0, ParseError::EmptyInstruction)].into();
        assert_eq!(e.to_string().lines().count(), 2);
    }
}

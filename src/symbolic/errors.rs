//! Error types of the expression core.
//!
//! Parsing failures carry the byte offset at which they were detected,
//! evaluation failures carry the offending function and input where that
//! makes sense. Both are plain enums with hand written `Display` so that the
//! text can be shown to the user as is.
use std::fmt;

/// What went wrong while turning text into an expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// nothing but whitespace was given
    Empty,
    /// a character that starts no token
    UnexpectedChar(char),
    /// identifier outside of the reserved set
    UnknownIdentifier(String),
    /// '(' without ')' or ')' without '('
    UnmatchedParen,
    /// token that cannot appear at this place
    UnexpectedToken(String),
    /// input ended while an operand was expected
    UnexpectedEnd,
    /// a complete expression is followed by more tokens
    TrailingInput(String),
    /// numeric literal that does not fit into f64
    InvalidNumber(String),
    /// function called with a wrong number of arguments
    InvalidArity {
        function: String,
        expected: usize,
        found: usize,
    },
    /// nesting exceeds the parser's depth limit
    TooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseErrorKind::Empty => write!(f, "empty expression"),
            ParseErrorKind::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            ParseErrorKind::UnknownIdentifier(name) => {
                write!(f, "name '{}' is not recognized", name)
            }
            ParseErrorKind::UnmatchedParen => write!(f, "unmatched parenthesis"),
            ParseErrorKind::UnexpectedToken(tok) => write!(f, "unexpected '{}'", tok),
            ParseErrorKind::UnexpectedEnd => write!(f, "unexpected end of expression"),
            ParseErrorKind::TrailingInput(tok) => {
                write!(f, "unexpected '{}' after complete expression", tok)
            }
            ParseErrorKind::InvalidNumber(text) => write!(f, "invalid number '{}'", text),
            ParseErrorKind::InvalidArity {
                function,
                expected,
                found,
            } => write!(
                f,
                "{}() takes exactly {} argument{} ({} given)",
                function,
                expected,
                if *expected == 1 { "" } else { "s" },
                found
            ),
            ParseErrorKind::TooDeep => write!(f, "expression is nested too deeply"),
        }
    }
}

/// Syntax error with the zero-based byte offset where it was detected
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        ParseError { kind, position }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)
    }
}

impl std::error::Error for ParseError {}

/// Failures of the tree walking evaluator
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// variable used without a value bound in the context
    UnboundVariable(String),
    /// real valued function called outside of its domain
    DomainError { function: String, input: f64 },
    DivisionByZero,
    InvalidArity {
        function: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::UnboundVariable(name) => write!(f, "name '{}' is not defined", name),
            EvalError::DomainError { function, input } => {
                write!(f, "math domain error: {}({})", function, input)
            }
            EvalError::DivisionByZero => write!(f, "division by zero"),
            EvalError::InvalidArity {
                function,
                expected,
                found,
            } => write!(
                f,
                "{}() takes exactly {} argument{} ({} given)",
                function,
                expected,
                if *expected == 1 { "" } else { "s" },
                found
            ),
        }
    }
}

impl std::error::Error for EvalError {}

/// Any failure on the way from text to a value
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    Parse(ParseError),
    Eval(EvalError),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalcError::Parse(e) => write!(f, "{}", e),
            CalcError::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcError::Parse(e) => Some(e),
            CalcError::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for CalcError {
    fn from(e: ParseError) -> Self {
        CalcError::Parse(e)
    }
}

impl From<EvalError> for CalcError {
    fn from(e: EvalError) -> Self {
        CalcError::Eval(e)
    }
}

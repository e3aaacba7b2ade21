//! Splits an expression string into tokens.
//!
//! Lexemes are recognized with [nom] combinators; the driving loop keeps track
//! of byte offsets so that every token, and every error, knows where it
//! starts in the original text. Identifiers are taken greedily (`asin` is one
//! token, never `a`,`s`,`i`,`n`); whether a name is allowed is decided by the
//! parser.
//!
//! [nom]: https://crates.io/crates/nom
use crate::symbolic::errors::{ParseError, ParseErrorKind};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0},
    combinator::{opt, recognize},
    multi::many0,
    sequence::pair,
};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `**`
    Power,
    LParen,
    RParen,
    Comma,
}

/// A lexeme together with its source text and byte offset
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

/// `12`, `12.5`, `12.` or `.5`
fn number(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(alpha1, many0(alt((alphanumeric1, tag("_")))))).parse(input)
}

/// `**` must be tried before `*`
fn operator(input: &str) -> IResult<&str, &str> {
    alt((
        tag("**"),
        tag("*"),
        tag("/"),
        tag("+"),
        tag("-"),
        tag("("),
        tag(")"),
        tag(","),
    ))
    .parse(input)
}

fn operator_kind(op: &str) -> TokenKind {
    match op {
        "**" => TokenKind::Power,
        "*" => TokenKind::Star,
        "/" => TokenKind::Slash,
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "(" => TokenKind::LParen,
        ")" => TokenKind::RParen,
        _ => TokenKind::Comma,
    }
}

/// Turns the whole input into tokens or reports the first character that
/// starts no token.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut rest = text;
    loop {
        let skipped: IResult<&str, &str> = multispace0(rest);
        if let Ok((after_space, _)) = skipped {
            rest = after_space;
        }
        if rest.is_empty() {
            break;
        }
        let position = text.len() - rest.len();

        if let Ok((remaining, lexeme)) = number(rest) {
            let value = lexeme.parse::<f64>().map_err(|_| {
                ParseError::new(ParseErrorKind::InvalidNumber(lexeme.to_string()), position)
            })?;
            if !value.is_finite() {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidNumber(lexeme.to_string()),
                    position,
                ));
            }
            tokens.push(Token {
                kind: TokenKind::Number(value),
                text: lexeme.to_string(),
                position,
            });
            rest = remaining;
        } else if let Ok((remaining, lexeme)) = identifier(rest) {
            tokens.push(Token {
                kind: TokenKind::Ident(lexeme.to_string()),
                text: lexeme.to_string(),
                position,
            });
            rest = remaining;
        } else if let Ok((remaining, lexeme)) = operator(rest) {
            tokens.push(Token {
                kind: operator_kind(lexeme),
                text: lexeme.to_string(),
                position,
            });
            rest = remaining;
        } else {
            let c = rest.chars().next().unwrap_or(' ');
            return Err(ParseError::new(ParseErrorKind::UnexpectedChar(c), position));
        }
    }
    Ok(tokens)
}

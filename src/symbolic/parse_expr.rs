//! a module turns a String expression into an expression tree
//!# Example
//! ```
//! use RustedCalc::symbolic::parse_expr::parse;
//! let tree = parse("2**10 - sqrt(16)").unwrap();
//! println!("parsed expression {}", tree);
//! ```
use crate::symbolic::errors::{EvalError, ParseError, ParseErrorKind};
use crate::symbolic::symbolic_engine::{Callable, Constant, Expr, Variable};
use crate::symbolic::tokenizer::{Token, TokenKind, tokenize};
use log::debug;

//                  precedence ladder, lowest first
//                |  expr    := term (('+' | '-') term)*         |
//                |  term    := unary (('*' | '/') unary)*       |
//                |  unary   := ('-' | '+') unary | power        |
//                |  power   := primary ('**' unary)?            |
//                |  primary := number | name | name '(' args ')'|
//                |             | '(' expr ')'                   |
// power takes a unary on its right, so 2**-1 parses and 2**3**2 = 2**(3**2);
// unary minus sits above power, so -2**2 = -(2**2)

/// nesting limit; keeps recursion depth bounded whatever the input
pub const MAX_DEPTH: usize = 256;

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    /// byte length of the source, position of end-of-input errors
    end: usize,
}

impl ExprParser {
    fn new(tokens: Vec<Token>, end: usize) -> Self {
        ExprParser {
            tokens,
            pos: 0,
            depth: 0,
            end,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn position(&self) -> usize {
        self.peek().map(|t| t.position).unwrap_or(self.end)
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::new(ParseErrorKind::TooDeep, self.position()));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // every node of a left-nested chain adds one level to the tree
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        let mut chain = 0;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => TokenKind::Plus,
                Some(TokenKind::Minus) => TokenKind::Minus,
                _ => break,
            };
            self.enter()?;
            chain += 1;
            self.advance();
            let right = self.parse_term()?;
            left = if op == TokenKind::Plus {
                left + right
            } else {
                left - right
            };
        }
        self.depth -= chain;
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        let mut chain = 0;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => TokenKind::Star,
                Some(TokenKind::Slash) => TokenKind::Slash,
                _ => break,
            };
            self.enter()?;
            chain += 1;
            self.advance();
            let right = self.parse_unary()?;
            left = if op == TokenKind::Star {
                left * right
            } else {
                left / right
            };
        }
        self.depth -= chain;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let result = match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.advance();
                self.parse_unary().map(|operand| -operand)
            }
            // unary plus changes nothing, no node for it
            Some(TokenKind::Plus) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        };
        self.leave();
        result
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_primary()?;
        if let Some(TokenKind::Power) = self.peek_kind() {
            self.advance();
            let exponent = self.parse_unary()?;
            return Ok(base.pow(exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = match self.advance() {
            Some(token) => token,
            None => return Err(ParseError::new(ParseErrorKind::UnexpectedEnd, self.end)),
        };
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Literal(value)),
            TokenKind::Ident(ref name) => self.parse_name(name, token.position),
            TokenKind::LParen => {
                self.enter()?;
                let inner = self.parse_expr()?;
                self.leave();
                self.expect_closing(token.position)?;
                Ok(inner)
            }
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken(token.text),
                token.position,
            )),
        }
    }

    fn parse_name(&mut self, name: &str, position: usize) -> Result<Expr, ParseError> {
        if let Ok(c) = name.parse::<Constant>() {
            return Ok(Expr::Constant(c));
        }
        if let Ok(v) = name.parse::<Variable>() {
            return Ok(Expr::Var(v));
        }
        let callable = Callable::lookup(name).ok_or_else(|| {
            ParseError::new(ParseErrorKind::UnknownIdentifier(name.to_string()), position)
        })?;
        match self.advance() {
            Some(Token {
                kind: TokenKind::LParen,
                position: open,
                ..
            }) => {
                self.enter()?;
                let args = self.parse_arguments(open)?;
                self.leave();
                callable.build(args).map_err(|e| match e {
                    EvalError::InvalidArity {
                        function,
                        expected,
                        found,
                    } => ParseError::new(
                        ParseErrorKind::InvalidArity {
                            function,
                            expected,
                            found,
                        },
                        position,
                    ),
                    other => ParseError::new(
                        ParseErrorKind::UnexpectedToken(other.to_string()),
                        position,
                    ),
                })
            }
            Some(token) => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken(token.text),
                token.position,
            )),
            None => Err(ParseError::new(ParseErrorKind::UnexpectedEnd, self.end)),
        }
    }

    /// comma separated arguments up to and including the closing bracket
    fn parse_arguments(&mut self, open: usize) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if let Some(TokenKind::RParen) = self.peek_kind() {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            match self.peek_kind() {
                Some(TokenKind::Comma) => {
                    self.advance();
                }
                _ => break,
            }
        }
        self.expect_closing(open)?;
        Ok(args)
    }

    /// `open` is the offset of the bracket being closed
    fn expect_closing(&mut self, open: usize) -> Result<(), ParseError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => Ok(()),
            Some(token) => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken(token.text),
                token.position,
            )),
            None => Err(ParseError::new(ParseErrorKind::UnmatchedParen, open)),
        }
    }
}

/// Parses a complete expression. Fails on empty input, unknown names,
/// unbalanced brackets and anything left over after the expression.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ParseError::new(ParseErrorKind::Empty, 0));
    }
    let mut parser = ExprParser::new(tokens, text.len());
    let tree = parser.parse_expr()?;
    if let Some(token) = parser.advance() {
        let kind = if token.kind == TokenKind::RParen {
            ParseErrorKind::UnmatchedParen
        } else {
            ParseErrorKind::TrailingInput(token.text)
        };
        return Err(ParseError::new(kind, token.position));
    }
    debug!("parsed '{}' into {}", text, tree);
    Ok(tree)
}

impl Expr {
    /// same as [`parse`]
    pub fn parse_expression(text: &str) -> Result<Expr, ParseError> {
        parse(text)
    }
}

//! # Expression tree
//!
//! The closed set of nodes an expression can be made of. Every identifier a
//! user may type is one of the enums below, so a tree built by the parser
//! cannot contain a name outside the reserved set:
//!
//! - constants `pi`, `e` ([`Constant`])
//! - variables `x`, `y` ([`Variable`])
//! - one argument functions `sin cos tan asin acos atan log ln sqrt abs` ([`Function`])
//! - `pow(a, b)`, which is lowered to the binary `**` node ([`Callable`])
//!
//! ## Main structures and methods
//! - `Expr` - the tree itself, immutable once built
//! - `free_variables()` - which of `x`, `y` occur in the tree; decides scalar vs plot mode
//! - `Display` - fully parenthesized text that parses back into the same tree
//! - `std::ops` overloads (`+ - * / unary -`) and `pow` for building trees in code
//!
//! # Examples
//! ```rust, ignore
//! use RustedCalc::symbolic::symbolic_engine::{Expr, Variable};
//! let x = Expr::Var(Variable::X);
//! let expr = x.clone().pow(Expr::Literal(2.0)) + Expr::Literal(1.0);
//! assert_eq!(expr.to_string(), "((x ** 2) + 1)");
//! ```
#![allow(non_camel_case_types)]

use crate::symbolic::errors::EvalError;
use std::collections::BTreeSet;
use std::f64::consts::{E, PI};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Reserved numeric constants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => PI,
            Constant::E => E,
        }
    }
}

/// The two free variables an expression may depend on
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Variable {
    X,
    Y,
}

/// One argument real valued functions.
/// `log` and `ln` are both the natural logarithm; they are kept apart so the
/// tree prints back exactly what was typed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Sqrt,
    Abs,
}

impl Function {
    /// Applies the function to a single value. Inputs outside of the real
    /// domain give `DomainError`; NaN input passes through as NaN.
    pub fn apply(self, input: f64) -> Result<f64, EvalError> {
        let out_of_domain = match self {
            Function::Asin | Function::Acos => !(-1.0..=1.0).contains(&input),
            Function::Log | Function::Ln => input <= 0.0,
            Function::Sqrt => input < 0.0,
            _ => false,
        };
        if out_of_domain {
            return Err(self.domain_error(input));
        }
        let result = match self {
            Function::Sin => input.sin(),
            Function::Cos => input.cos(),
            Function::Tan => input.tan(),
            Function::Asin => input.asin(),
            Function::Acos => input.acos(),
            Function::Atan => input.atan(),
            Function::Log | Function::Ln => input.ln(),
            Function::Sqrt => input.sqrt(),
            Function::Abs => input.abs(),
        };
        // sin(inf) and friends
        if result.is_nan() && !input.is_nan() {
            return Err(self.domain_error(input));
        }
        Ok(result)
    }

    fn domain_error(self, input: f64) -> EvalError {
        EvalError::DomainError {
            function: self.to_string(),
            input,
        }
    }
}

/// Everything that may stand before an opening bracket
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Callable {
    Func(Function),
    Pow,
}

impl Callable {
    pub fn lookup(name: &str) -> Option<Callable> {
        if name == "pow" {
            return Some(Callable::Pow);
        }
        name.parse::<Function>().ok().map(Callable::Func)
    }

    pub fn name(&self) -> String {
        match self {
            Callable::Func(f) => f.to_string(),
            Callable::Pow => "pow".to_string(),
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Callable::Func(_) => 1,
            Callable::Pow => 2,
        }
    }

    /// Builds the node for a call with the given arguments
    pub fn build(self, mut args: Vec<Expr>) -> Result<Expr, EvalError> {
        if args.len() != self.arity() {
            return Err(EvalError::InvalidArity {
                function: self.name(),
                expected: self.arity(),
                found: args.len(),
            });
        }
        match self {
            Callable::Func(f) => {
                let arg = args.remove(0);
                Ok(Expr::Call(f, Box::new(arg)))
            }
            Callable::Pow => {
                let exponent = args.remove(1);
                let base = args.remove(0);
                Ok(base.pow(exponent))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "**")]
    Pow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum UnaryOp {
    #[strum(serialize = "-")]
    Neg,
}

/// Expression tree built by the parser. Owned by the request that parsed it
/// and never modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// numeric literal
    Literal(f64),
    /// `pi` or `e`
    Constant(Constant),
    /// `x` or `y`
    Var(Variable),
    /// named function of one argument
    Call(Function, Box<Expr>),
    /// left op right
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// op operand
    Unary(UnaryOp, Box<Expr>),
}

/// Prints the tree with every compound node in brackets, so the output
/// parses back into an equal tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(val) if *val < 0.0 => write!(f, "({})", val),
            Expr::Literal(val) => write!(f, "{}", val),
            Expr::Constant(c) => write!(f, "{}", c),
            Expr::Var(v) => write!(f, "{}", v),
            Expr::Call(func, arg) => write!(f, "{}({})", func, arg),
            Expr::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
            Expr::Unary(op, operand) => write!(f, "({}{})", op, operand),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Binary(BinaryOp::Add, self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Binary(BinaryOp::Sub, self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Binary(BinaryOp::Mul, self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Binary(BinaryOp::Div, self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Unary(UnaryOp::Neg, self.boxed())
    }
}

impl Expr {
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn pow(self, exponent: Expr) -> Expr {
        Expr::Binary(BinaryOp::Pow, self.boxed(), exponent.boxed())
    }

    pub fn call(func: Function, arg: Expr) -> Expr {
        Expr::Call(func, arg.boxed())
    }

    /// true if the variable occurs anywhere in the tree
    pub fn contains_variable(&self, var: Variable) -> bool {
        match self {
            Expr::Var(v) => *v == var,
            Expr::Literal(_) | Expr::Constant(_) => false,
            Expr::Call(_, arg) => arg.contains_variable(var),
            Expr::Binary(_, lhs, rhs) => lhs.contains_variable(var) || rhs.contains_variable(var),
            Expr::Unary(_, operand) => operand.contains_variable(var),
        }
    }

    /// set of variables the expression depends on
    pub fn free_variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        match self {
            Expr::Var(v) => {
                vars.insert(*v);
            }
            Expr::Literal(_) | Expr::Constant(_) => {}
            Expr::Call(_, arg) => arg.collect_variables(vars),
            Expr::Binary(_, lhs, rhs) => {
                lhs.collect_variables(vars);
                rhs.collect_variables(vars);
            }
            Expr::Unary(_, operand) => operand.collect_variables(vars),
        }
    }

    /// no free variables at all
    pub fn is_constant(&self) -> bool {
        !self.contains_variable(Variable::X) && !self.contains_variable(Variable::Y)
    }

    /// longest path from the root to a leaf
    pub fn depth(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Constant(_) | Expr::Var(_) => 1,
            Expr::Call(_, arg) => 1 + arg.depth(),
            Expr::Binary(_, lhs, rhs) => 1 + lhs.depth().max(rhs.depth()),
            Expr::Unary(_, operand) => 1 + operand.depth(),
        }
    }
}

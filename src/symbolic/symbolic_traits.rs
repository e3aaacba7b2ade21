// NUMERIC TRAITS //////////////////////////////////////////////////////////////////
// The evaluator walks the tree once, generically; what a number is and what
// happens on a domain error is decided by the element type.
// f64 fails fast, Samples (see samples.rs) writes NaN into the bad elements.

use crate::symbolic::errors::EvalError;
use crate::symbolic::symbolic_engine::{BinaryOp, Function};

/// Value type the evaluator can reduce a tree to
pub trait Numeric: Sized + Clone {
    /// the same number everywhere
    fn constant(value: f64) -> Self;
    fn plus(self, rhs: Self) -> Result<Self, EvalError>;
    fn minus(self, rhs: Self) -> Result<Self, EvalError>;
    fn times(self, rhs: Self) -> Result<Self, EvalError>;
    fn divide(self, rhs: Self) -> Result<Self, EvalError>;
    fn power(self, exponent: Self) -> Result<Self, EvalError>;
    fn negate(self) -> Self;
    fn apply(self, func: Function) -> Result<Self, EvalError>;

    fn binary(self, op: BinaryOp, rhs: Self) -> Result<Self, EvalError> {
        match op {
            BinaryOp::Add => self.plus(rhs),
            BinaryOp::Sub => self.minus(rhs),
            BinaryOp::Mul => self.times(rhs),
            BinaryOp::Div => self.divide(rhs),
            BinaryOp::Pow => self.power(rhs),
        }
    }
}

/// a / b, refusing a zero divisor
pub fn checked_div(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(a / b)
}

/// base ** exponent over the reals.
/// 0 to a negative power is a division by zero, a negative base to a
/// fractional power has no real value
pub fn checked_pow(base: f64, exponent: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    let result = base.powf(exponent);
    if result.is_nan() && !base.is_nan() && !exponent.is_nan() {
        return Err(EvalError::DomainError {
            function: "pow".to_string(),
            input: base,
        });
    }
    Ok(result)
}

///////////////// SCALARS: every failure is reported /////////////////////////
impl Numeric for f64 {
    fn constant(value: f64) -> Self {
        value
    }
    fn plus(self, rhs: Self) -> Result<Self, EvalError> {
        Ok(self + rhs)
    }
    fn minus(self, rhs: Self) -> Result<Self, EvalError> {
        Ok(self - rhs)
    }
    fn times(self, rhs: Self) -> Result<Self, EvalError> {
        Ok(self * rhs)
    }
    fn divide(self, rhs: Self) -> Result<Self, EvalError> {
        checked_div(self, rhs)
    }
    fn power(self, exponent: Self) -> Result<Self, EvalError> {
        checked_pow(self, exponent)
    }
    fn negate(self) -> Self {
        -self
    }
    fn apply(self, func: Function) -> Result<Self, EvalError> {
        func.apply(self)
    }
}

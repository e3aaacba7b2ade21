//! Tree walking evaluator, generic over the value type.
//!
//! `evaluate_scalar` reduces a tree to one `f64` and fails on the first
//! domain error or division by zero. `evaluate_vector` reduces the same tree
//! over sampled `x` (and `y`) and writes NaN where the scalar evaluator
//! would have failed. Unbound variables fail in both modes.
use crate::symbolic::errors::EvalError;
use crate::symbolic::samples::Samples;
use crate::symbolic::symbolic_engine::{Expr, UnaryOp, Variable};
use crate::symbolic::symbolic_traits::Numeric;

/// Values bound to `x` and `y` for one evaluation call
#[derive(Clone, Debug, PartialEq)]
pub struct EvalContext<T> {
    x: Option<T>,
    y: Option<T>,
}

impl<T> Default for EvalContext<T> {
    fn default() -> Self {
        EvalContext { x: None, y: None }
    }
}

impl<T> EvalContext<T> {
    /// nothing bound
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, var: Variable, value: T) -> Self {
        self.bind(var, value);
        self
    }

    pub fn bind(&mut self, var: Variable, value: T) {
        match var {
            Variable::X => self.x = Some(value),
            Variable::Y => self.y = Some(value),
        }
    }

    pub fn get(&self, var: Variable) -> Option<&T> {
        match var {
            Variable::X => self.x.as_ref(),
            Variable::Y => self.y.as_ref(),
        }
    }
}

pub fn evaluate<T: Numeric>(expr: &Expr, context: &EvalContext<T>) -> Result<T, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(T::constant(*value)),
        Expr::Constant(c) => Ok(T::constant(c.value())),
        Expr::Var(var) => context
            .get(*var)
            .cloned()
            .ok_or_else(|| EvalError::UnboundVariable(var.to_string())),
        Expr::Call(func, arg) => evaluate(arg, context)?.apply(*func),
        Expr::Binary(op, lhs, rhs) => {
            let left = evaluate(lhs, context)?;
            let right = evaluate(rhs, context)?;
            left.binary(*op, right)
        }
        Expr::Unary(UnaryOp::Neg, operand) => Ok(evaluate(operand, context)?.negate()),
    }
}

/// fail-fast evaluation to a single number
pub fn evaluate_scalar(expr: &Expr, context: &EvalContext<f64>) -> Result<f64, EvalError> {
    evaluate(expr, context)
}

/// elementwise evaluation over sampled variables, NaN where undefined
pub fn evaluate_vector(expr: &Expr, context: &EvalContext<Samples>) -> Result<Samples, EvalError> {
    evaluate(expr, context)
}

impl Expr {
    /// evaluates an expression without free variables
    pub fn eval_scalar(&self) -> Result<f64, EvalError> {
        evaluate_scalar(self, &EvalContext::new())
    }
}

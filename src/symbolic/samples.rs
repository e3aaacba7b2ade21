//! Sampled values for the vectorized evaluator.
//!
//! A sub-expression evaluates to one of three shapes: a single number (no
//! variable below it), a line of samples over the `x` axis, or a mesh over the
//! `(x, y)` plane. Binary operations broadcast the way array libraries do: a
//! scalar spreads over anything, a line spreads over every row of a mesh.
//!
//! Domain errors never abort the evaluation here; the offending elements
//! become NaN and plotting simply leaves them out.
use crate::symbolic::errors::EvalError;
use crate::symbolic::symbolic_engine::Function;
use crate::symbolic::symbolic_traits::{Numeric, checked_div, checked_pow};
use nalgebra::{DMatrix, DVector};

#[derive(Clone, Debug, PartialEq)]
pub enum Samples {
    Scalar(f64),
    /// one value per x sample
    Line(DVector<f64>),
    /// row i follows y, column j follows x
    Mesh(DMatrix<f64>),
}

impl Samples {
    pub fn map<F: Fn(f64) -> f64>(self, f: F) -> Samples {
        match self {
            Samples::Scalar(a) => Samples::Scalar(f(a)),
            Samples::Line(v) => Samples::Line(v.map(f)),
            Samples::Mesh(m) => Samples::Mesh(m.map(f)),
        }
    }

    /// Elementwise combination with broadcasting.
    /// Panics if two lines, two meshes, or a line and a mesh row differ in
    /// length; contexts built by the plot planner always agree.
    pub fn zip_with<F: Fn(f64, f64) -> f64>(self, rhs: Samples, f: F) -> Samples {
        match (self, rhs) {
            (Samples::Scalar(a), Samples::Scalar(b)) => Samples::Scalar(f(a, b)),
            (Samples::Scalar(a), Samples::Line(v)) => Samples::Line(v.map(|b| f(a, b))),
            (Samples::Line(v), Samples::Scalar(b)) => Samples::Line(v.map(|a| f(a, b))),
            (Samples::Scalar(a), Samples::Mesh(m)) => Samples::Mesh(m.map(|b| f(a, b))),
            (Samples::Mesh(m), Samples::Scalar(b)) => Samples::Mesh(m.map(|a| f(a, b))),
            (Samples::Line(u), Samples::Line(v)) => Samples::Line(u.zip_map(&v, f)),
            (Samples::Mesh(m), Samples::Mesh(n)) => Samples::Mesh(m.zip_map(&n, f)),
            (Samples::Line(v), Samples::Mesh(m)) => {
                assert_eq!(v.len(), m.ncols(), "line does not match mesh rows");
                Samples::Mesh(DMatrix::from_fn(m.nrows(), m.ncols(), |i, j| {
                    f(v[j], m[(i, j)])
                }))
            }
            (Samples::Mesh(m), Samples::Line(v)) => {
                assert_eq!(v.len(), m.ncols(), "line does not match mesh rows");
                Samples::Mesh(DMatrix::from_fn(m.nrows(), m.ncols(), |i, j| {
                    f(m[(i, j)], v[j])
                }))
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Samples::Scalar(_) => 1,
            Samples::Line(v) => v.len(),
            Samples::Mesh(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spreads the value over `n` samples; a line is returned as is.
    /// None for a mesh
    pub fn into_line(self, n: usize) -> Option<DVector<f64>> {
        match self {
            Samples::Scalar(a) => Some(DVector::from_element(n, a)),
            Samples::Line(v) => Some(v),
            Samples::Mesh(_) => None,
        }
    }

    /// Spreads the value over an `nrows x ncols` mesh
    pub fn into_mesh(self, nrows: usize, ncols: usize) -> DMatrix<f64> {
        match self {
            Samples::Scalar(a) => DMatrix::from_element(nrows, ncols, a),
            Samples::Line(v) => DMatrix::from_fn(nrows, ncols, |_, j| v[j]),
            Samples::Mesh(m) => m,
        }
    }
}

fn or_nan(result: Result<f64, EvalError>) -> f64 {
    result.unwrap_or(f64::NAN)
}

/// NaN-producing policy: the elementwise operations never fail
impl Numeric for Samples {
    fn constant(value: f64) -> Self {
        Samples::Scalar(value)
    }
    fn plus(self, rhs: Self) -> Result<Self, EvalError> {
        Ok(self.zip_with(rhs, |a, b| a + b))
    }
    fn minus(self, rhs: Self) -> Result<Self, EvalError> {
        Ok(self.zip_with(rhs, |a, b| a - b))
    }
    fn times(self, rhs: Self) -> Result<Self, EvalError> {
        Ok(self.zip_with(rhs, |a, b| a * b))
    }
    fn divide(self, rhs: Self) -> Result<Self, EvalError> {
        Ok(self.zip_with(rhs, |a, b| or_nan(checked_div(a, b))))
    }
    fn power(self, exponent: Self) -> Result<Self, EvalError> {
        Ok(self.zip_with(exponent, |a, b| or_nan(checked_pow(a, b))))
    }
    fn negate(self) -> Self {
        self.map(|a| -a)
    }
    fn apply(self, func: Function) -> Result<Self, EvalError> {
        Ok(self.map(|a| or_nan(func.apply(a))))
    }
}

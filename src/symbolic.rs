#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// error types of parsing and evaluation
pub mod errors;
/// splits the input into tokens
pub mod tokenizer;
/// a module turns a String expression into an expression tree
///
///# Example
/// ```
/// use RustedCalc::symbolic::symbolic_engine::Expr;
/// let input = "x**2 + sin(x)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Expression engine
/// a module
/// 1) defines the closed expression tree and the reserved names
/// 2) finds the free variables of an expression
/// 3) turns an expression back into a string for printing and control results
///# Example#
/// ```
/// use RustedCalc::symbolic::symbolic_engine::{Expr, Variable};
/// let parsed_expression = Expr::parse_expression("x**2+y**2-4").unwrap();
/// let variables = parsed_expression.free_variables();
/// assert!(variables.contains(&Variable::Y));
/// println!("printed back: {}", parsed_expression);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// the numeric element types the evaluator works over
pub mod symbolic_traits;
/// sampled values: scalar, line over x, mesh over (x, y)
pub mod samples;
///________________________________________________________________________________________________________________________________________________
///
/// evaluate an expression to a number or over sampled variables
/// Example#
/// ```
/// use RustedCalc::symbolic::symbolic_engine::{Expr, Variable};
/// use RustedCalc::symbolic::evaluator::{EvalContext, evaluate_vector};
/// use RustedCalc::symbolic::samples::Samples;
/// use RustedCalc::symbolic::utils::linspace;
/// // scalar mode fails fast
/// let f = Expr::parse_expression("1/0").unwrap();
/// assert!(f.eval_scalar().is_err());
/// // vector mode writes NaN where the expression is undefined
/// let f = Expr::parse_expression("sqrt(x)").unwrap();
/// let ctx = EvalContext::new().with(Variable::X, Samples::Line(linspace(-1.0, 1.0, 3)));
/// let ys = evaluate_vector(&f, &ctx).unwrap();
/// println!("{:?}", ys);
/// ```
pub mod evaluator;
///______________________________________________________________________________________________________________________________________________
/// sampling helpers: linspace, meshgrid
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;

mod symbolic_engine_tests;

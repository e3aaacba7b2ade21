//! Front door of the calculator: one expression string in, either a display
//! text or a plot description out.
//!
//! Routing looks at the free variables of the parsed tree. No `x` and no `y`
//! means the expression is evaluated to a number; otherwise it is handed to
//! the plot planner.
use crate::plotting::plot_planner::{PlotDescription, SamplingDomain, plan_plot};
use crate::plotting::plots::{RenderError, RenderTarget};
use crate::symbolic::errors::CalcError;
use crate::symbolic::parse_expr::parse;
use log::{debug, info};

/// What a submitted expression turned into
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// formatted number, or `"Error: " + cause`
    Value(String),
    Plot(PlotDescription),
}

/// shortest text that reads back as the same f64: `11`, `0.5`, `inf`.
/// Negative zero is shown as `0`.
pub fn format_value(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}", value)
}

/// Parses and evaluates an expression without free variables.
pub fn evaluate_text(text: &str) -> Result<f64, CalcError> {
    let tree = parse(text)?;
    Ok(tree.eval_scalar()?)
}

#[derive(Clone, Debug, Default)]
pub struct Calculator {
    pub domain: SamplingDomain,
}

impl Calculator {
    pub fn new(domain: SamplingDomain) -> Self {
        Calculator { domain }
    }

    pub fn submit(&self, text: &str) -> Outcome {
        let tree = match parse(text) {
            Ok(tree) => tree,
            Err(e) => {
                info!("'{}' rejected: {}", text, e);
                return Outcome::Value(format!("Error: {}", e));
            }
        };
        let variables = tree.free_variables();
        if variables.is_empty() {
            debug!("'{}' has no free variables, evaluating", text);
            match tree.eval_scalar() {
                Ok(value) => Outcome::Value(format_value(value)),
                Err(e) => {
                    info!("'{}' failed: {}", text, e);
                    Outcome::Value(format!("Error: {}", CalcError::from(e)))
                }
            }
        } else {
            debug!("'{}' depends on {:?}, plotting", text, variables);
            Outcome::Plot(plan_plot(&tree, text, &self.domain))
        }
    }

    /// Submits `text` and delivers the outcome: a value replaces `display`,
    /// a plot is drawn on `target`. Both are only borrowed for this call.
    pub fn run(
        &self,
        text: &str,
        display: &mut String,
        target: &mut dyn RenderTarget,
    ) -> Result<(), RenderError> {
        match self.submit(text) {
            Outcome::Value(shown) => {
                *display = shown;
                Ok(())
            }
            Outcome::Plot(plot) => target.render(&plot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::plot_planner::PlotKind;
    use crate::symbolic::errors::{EvalError, ParseErrorKind};

    fn small() -> Calculator {
        Calculator::new(SamplingDomain::new(-10.0, 10.0, 21))
    }

    #[test]
    fn test_scalar_results() {
        let calc = small();
        assert_eq!(calc.submit("3+4*2"), Outcome::Value("11".to_string()));
        assert_eq!(calc.submit("2**10"), Outcome::Value("1024".to_string()));
        assert_eq!(calc.submit("sqrt(16)"), Outcome::Value("4".to_string()));
        assert_eq!(calc.submit("1/2"), Outcome::Value("0.5".to_string()));
        assert_eq!(calc.submit("10**400"), Outcome::Value("inf".to_string()));
    }

    #[test]
    fn test_negative_zero_is_shown_as_zero() {
        let calc = small();
        assert_eq!(calc.submit("0*-1"), Outcome::Value("0".to_string()));
        assert_eq!(calc.submit("-0"), Outcome::Value("0".to_string()));
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(-2.5), "-2.5");
    }

    #[test]
    fn test_long_input_is_refused_not_crashing() {
        let calc = small();
        let text = format!("1{}", "+1".repeat(10_000));
        let Outcome::Value(shown) = calc.submit(&text) else {
            panic!("expected a value")
        };
        assert!(shown.starts_with("Error: expression is nested too deeply at position "));
        // parsing fails before routing, so an x chain is refused the same way
        let Outcome::Value(shown) = calc.submit(&format!("x{}", "*x".repeat(10_000))) else {
            panic!("expected a value")
        };
        assert!(shown.starts_with("Error: expression is nested too deeply"));
    }

    #[test]
    fn test_scalar_errors_are_shown() {
        let calc = small();
        assert_eq!(
            calc.submit("1/0"),
            Outcome::Value("Error: division by zero".to_string())
        );
        assert_eq!(
            calc.submit("foo(1)"),
            Outcome::Value("Error: name 'foo' is not recognized at position 0".to_string())
        );
        let Outcome::Value(text) = calc.submit("(1+2") else {
            panic!("expected a value")
        };
        assert!(text.starts_with("Error: unmatched parenthesis"));
        assert_eq!(calc.submit("(1+2"), Outcome::Value(text));
    }

    #[test]
    fn test_routing_follows_free_variables() {
        let calc = small();
        // 'e' and 'exp'-like text must not be mistaken for x
        assert!(matches!(calc.submit("e*2"), Outcome::Value(_)));
        let Outcome::Plot(plot) = calc.submit("sin(x)") else {
            panic!("expected a plot")
        };
        assert_eq!(plot.title, "y = sin(x)");
        let Outcome::Plot(plot) = calc.submit("x**2+y**2-4") else {
            panic!("expected a plot")
        };
        assert!(plot.is_contour());
    }

    #[test]
    fn test_evaluate_text() {
        assert_eq!(evaluate_text("2*pi").unwrap(), 2.0 * std::f64::consts::PI);
        assert!(matches!(
            evaluate_text("x+1"),
            Err(CalcError::Eval(EvalError::UnboundVariable(_)))
        ));
        match evaluate_text("") {
            Err(CalcError::Parse(e)) => assert_eq!(e.kind, ParseErrorKind::Empty),
            other => panic!("unexpected {:?}", other),
        }
    }

    struct Collect(Vec<PlotDescription>);

    impl RenderTarget for Collect {
        fn render(&mut self, plot: &PlotDescription) -> Result<(), RenderError> {
            self.0.push(plot.clone());
            Ok(())
        }
    }

    #[test]
    fn test_run_delivers_to_borrowed_handles() {
        let calc = small();
        let mut display = String::from("0");
        let mut target = Collect(Vec::new());
        calc.run("6*7", &mut display, &mut target).unwrap();
        assert_eq!(display, "42");
        assert!(target.0.is_empty());
        calc.run("sqrt(x)", &mut display, &mut target).unwrap();
        assert_eq!(display, "42");
        assert_eq!(target.0.len(), 1);
        assert!(matches!(target.0[0].kind, PlotKind::Curve { .. }));
        calc.run("sin(x", &mut display, &mut target).unwrap();
        assert!(display.starts_with("Error: "));
    }
}

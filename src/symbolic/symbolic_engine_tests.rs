//___________________________________TESTS____________________________________
// tests that go through the whole chain: text -> tree -> printed text -> values
#[cfg(test)]
mod tests {
    use crate::symbolic::errors::{EvalError, ParseErrorKind};
    use crate::symbolic::evaluator::{EvalContext, evaluate_scalar, evaluate_vector};
    use crate::symbolic::parse_expr::parse;
    use crate::symbolic::samples::Samples;
    use crate::symbolic::symbolic_engine::{BinaryOp, Constant, Expr, Function, Variable};
    use crate::symbolic::utils::{linspace, meshgrid};
    use approx::assert_relative_eq;

    const INPUTS: [&str; 10] = [
        "3+4*2",
        "-2**2",
        "2**-1",
        "2**3**2",
        "pow(2, 0.5)*sqrt(2)",
        "-(1-2)/-4",
        "log(e)+ln(e**2)",
        "abs(-3.5)*.5-12.",
        "atan(1)*4-pi",
        "cos(pi)+sin(pi/2)+tan(0)+asin(1)-acos(0)",
    ];

    #[test]
    fn test_printed_tree_parses_to_same_tree() {
        for text in INPUTS {
            let tree = parse(text).unwrap();
            let printed = tree.to_string();
            assert_eq!(parse(&printed).unwrap(), tree, "{} printed as {}", text, printed);
        }
    }

    #[test]
    fn test_printed_tree_keeps_value() {
        for text in INPUTS {
            let tree = parse(text).unwrap();
            let again = parse(&tree.to_string()).unwrap();
            assert_eq!(tree.eval_scalar(), again.eval_scalar(), "{}", text);
        }
    }

    fn same_samples(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a
                .iter()
                .zip(b)
                .all(|(p, q)| (p.is_nan() && q.is_nan()) || p == q)
    }

    #[test]
    fn test_printed_tree_keeps_sampled_values() {
        let axis = linspace(-3.0, 3.0, 25);
        let (x_mesh, y_mesh) = meshgrid(&axis, &axis);
        let line = EvalContext::new().with(Variable::X, Samples::Line(axis.clone()));
        let mesh = EvalContext::new()
            .with(Variable::X, Samples::Mesh(x_mesh))
            .with(Variable::Y, Samples::Mesh(y_mesh));
        for text in [
            "2**-x**2",
            "-sin(x)/(1+abs(x))",
            "sqrt(x)-ln(x)/x",
            "x**2+y**2-4",
            "asin(x/y)*pow(y, 0.5)",
        ] {
            let tree = parse(text).unwrap();
            let again = parse(&tree.to_string()).unwrap();
            if !tree.contains_variable(Variable::Y) {
                let a = evaluate_vector(&tree, &line).unwrap().into_line(25).unwrap();
                let b = evaluate_vector(&again, &line).unwrap().into_line(25).unwrap();
                assert!(same_samples(a.as_slice(), b.as_slice()), "{}", text);
            }
            let a = evaluate_vector(&tree, &mesh).unwrap().into_mesh(25, 25);
            let b = evaluate_vector(&again, &mesh).unwrap().into_mesh(25, 25);
            assert!(same_samples(a.as_slice(), b.as_slice()), "{}", text);
        }
    }

    #[test]
    fn test_known_values() {
        let expected = [11.0, -4.0, 0.5, 512.0, 2.0, -0.25, 3.0, -10.25, 0.0, 0.0];
        for (text, value) in INPUTS.iter().zip(expected) {
            let result = parse(text).unwrap().eval_scalar().unwrap();
            assert_relative_eq!(result, value, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tree_built_by_hand_equals_parsed() {
        let x = Expr::Var(Variable::X);
        let built = Expr::call(Function::Sin, x.clone()) + x.pow(Expr::Literal(2.0));
        assert_eq!(parse("sin(x)+x**2").unwrap(), built);
        let lowered = parse("pow(x, 2)").unwrap();
        assert!(matches!(lowered, Expr::Binary(BinaryOp::Pow, _, _)));
        assert_eq!(parse("pi").unwrap(), Expr::Constant(Constant::Pi));
    }

    #[test]
    fn test_vector_agrees_with_scalar_pointwise() {
        let texts = ["x**2-3*x+1", "sin(x)/(2+cos(x))", "abs(x)**0.5", "exp_free(x)"];
        let xs = linspace(-3.0, 3.0, 13);
        let ctx = EvalContext::new().with(Variable::X, Samples::Line(xs.clone()));
        for text in &texts[..3] {
            let tree = parse(text).unwrap();
            let ys = evaluate_vector(&tree, &ctx).unwrap().into_line(xs.len()).unwrap();
            for (x, y) in xs.iter().zip(ys.iter()) {
                let point = EvalContext::new().with(Variable::X, *x);
                assert_relative_eq!(evaluate_scalar(&tree, &point).unwrap(), *y, epsilon = 1e-12);
            }
        }
        assert!(parse(texts[3]).is_err());
    }

    #[test]
    fn test_vector_marks_only_bad_points() {
        let tree = parse("ln(x)+1/(x-1)").unwrap();
        let xs = linspace(-1.0, 2.0, 4);
        let ctx = EvalContext::new().with(Variable::X, Samples::Line(xs.clone()));
        let ys = evaluate_vector(&tree, &ctx).unwrap().into_line(4).unwrap();
        // samples -1, 0, 1, 2
        assert!(ys[0].is_nan());
        assert!(ys[1].is_nan());
        assert!(ys[2].is_nan());
        assert_relative_eq!(ys[3], 2.0_f64.ln() + 1.0, epsilon = 1e-12);
        // the same points fail loudly one by one
        let point = |x: f64| EvalContext::new().with(Variable::X, x);
        assert!(matches!(
            evaluate_scalar(&tree, &point(-1.0)),
            Err(EvalError::DomainError { .. })
        ));
        assert_eq!(evaluate_scalar(&tree, &point(1.0)), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_mesh_agrees_with_scalar() {
        let tree = parse("x**2+y**2-4").unwrap();
        let axis = linspace(-2.0, 2.0, 5);
        let (x_mesh, y_mesh) = meshgrid(&axis, &axis);
        let ctx = EvalContext::new()
            .with(Variable::X, Samples::Mesh(x_mesh))
            .with(Variable::Y, Samples::Mesh(y_mesh));
        let values = evaluate_vector(&tree, &ctx).unwrap().into_mesh(5, 5);
        for i in 0..5 {
            for j in 0..5 {
                let point = EvalContext::new()
                    .with(Variable::X, axis[j])
                    .with(Variable::Y, axis[i]);
                assert_eq!(evaluate_scalar(&tree, &point).unwrap(), values[(i, j)]);
            }
        }
    }

    #[test]
    fn test_errors_are_deterministic() {
        for text in ["(1+2", "1+", "sin", "x(2)", "2^3", "foo(1)", "pow(1)", ")"] {
            let first = parse(text).unwrap_err();
            let second = parse(text).unwrap_err();
            assert_eq!(first, second);
            assert!(first.position <= text.len());
        }
        assert_eq!(parse("2^3").unwrap_err().kind, ParseErrorKind::UnexpectedChar('^'));
    }
}

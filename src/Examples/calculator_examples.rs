// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::Utils::logger::save_plot_to_csv;
use crate::calculator::{Calculator, Outcome, evaluate_text};
use crate::plotting::contour::contour_segments;
use crate::plotting::plot_planner::{PlotKind, SamplingDomain, plan_plot_text};
use crate::plotting::plots::{PlottersRenderer, RenderTarget};
use crate::symbolic::evaluator::{EvalContext, evaluate_vector};
use crate::symbolic::parse_expr::parse;
use crate::symbolic::samples::Samples;
use crate::symbolic::symbolic_engine::Variable;
use crate::symbolic::utils::linspace;

/// number of available examples
pub const EXAMPLES: usize = 5;

pub fn calculator_examples(example: usize) {
    match example {
        0 => {
            // SCALAR EXPRESSIONS
            // the same text a keypad would produce, evaluated to a display string
            let calc = Calculator::default();
            for input in ["3+4*2", "2**10", "sqrt(16)", "-2**2", "pow(2, 0.5)", "1/0", "asin(2)"] {
                match calc.submit(input) {
                    Outcome::Value(shown) => println!("{} = {}", input, shown),
                    Outcome::Plot(plot) => println!("{} is a plot: {}", input, plot.title),
                }
            }
            // typed errors instead of display strings
            match evaluate_text("sin(1") {
                Ok(value) => println!("value {}", value),
                Err(e) => println!("typed error: {:?}", e),
            }
        }
        1 => {
            // PARSE AND PRINT BACK
            let input = "2**3**2 - sin(x)/-2";
            match parse(input) {
                Ok(tree) => {
                    println!("parsed: {}", tree);
                    println!("free variables: {:?}", tree.free_variables());
                    println!("depth: {}", tree.depth());
                }
                Err(e) => println!("{}: {}", input, e),
            }
            for bad in ["(1+2", "foo(1)", "2^3", "sin", "pow(1)"] {
                if let Err(e) = parse(bad) {
                    println!("{:>8} -> {}", bad, e);
                }
            }
        }
        2 => {
            // VECTOR EVALUATION
            // undefined points become NaN, the rest is computed as usual
            let xs = linspace(-2.0, 2.0, 9);
            let ctx = EvalContext::new().with(Variable::X, Samples::Line(xs.clone()));
            if let Ok(tree) = parse("sqrt(x) + 1/x") {
                match evaluate_vector(&tree, &ctx) {
                    Ok(ys) => println!("x = {}\ny = {:?}", xs.transpose(), ys),
                    Err(e) => println!("{}", e),
                }
            }
        }
        3 => {
            // PLOTS
            // curve and implicit curve planned and drawn into image files
            let domain = SamplingDomain::default();
            for (input, file) in [
                ("sin(x)*x", "curve.png"),
                ("x**2+y**2-16", "circle.svg"),
                ("foo(x)", "message.png"),
            ] {
                let plot = plan_plot_text(input, &domain);
                let mut renderer = PlottersRenderer::new(file, 800, 600);
                match renderer.render(&plot) {
                    Ok(()) => println!("{} drawn into {}", input, file),
                    Err(e) => println!("{} not drawn: {}", input, e),
                }
            }
        }
        4 => {
            // CONTOUR DATA AND CSV EXPORT
            let domain = SamplingDomain::new(-10.0, 10.0, 201);
            let plot = plan_plot_text("x*y-4", &domain);
            if let PlotKind::ImplicitContour {
                xs,
                ys,
                values,
                level,
            } = &plot.kind
            {
                let segments = contour_segments(xs, ys, values, *level);
                println!("{} segments on the hyperbola", segments.len());
            }
            match save_plot_to_csv(&plot, "hyperbola.csv") {
                Ok(rows) => println!("{} rows saved", rows),
                Err(e) => println!("{}", e),
            }
        }
        _ => {
            println!("no such example, choose 0..{}", EXAMPLES - 1);
        }
    }
}

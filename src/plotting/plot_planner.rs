//! # Plot planner
//!
//! Decides from the free variables of a parsed expression what to draw:
//! - only `x`: the curve `y = f(x)` sampled over the x axis
//! - `y` (with or without `x`): the implicit curve `f(x, y) = 0` over the (x, y) mesh
//!
//! The result is a renderer-agnostic [`PlotDescription`]. Presentation is
//! fixed: both axes span [-10, 10], gridlines and the zero axis lines are on.
//! Evaluation failures do not leave this module; they turn into a text-only
//! description carrying `"Invalid function: " + cause`.
use crate::symbolic::errors::EvalError;
use crate::symbolic::evaluator::{EvalContext, evaluate_vector};
use crate::symbolic::parse_expr::parse;
use crate::symbolic::samples::Samples;
use crate::symbolic::symbolic_engine::{Expr, Variable};
use crate::symbolic::utils::{linspace, meshgrid};
use log::{info, warn};
use nalgebra::{DMatrix, DVector};

/// fixed axis range of every plot
pub const AXIS_RANGE: (f64, f64) = (-10.0, 10.0);
/// samples per axis
pub const DEFAULT_SAMPLES: usize = 1000;
/// largest accepted samples per axis; a mesh holds its square
pub const MAX_SAMPLES: usize = 5000;
/// level of the implicit curve
pub const CONTOUR_LEVEL: f64 = 0.0;

/// Where the variables are sampled
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingDomain {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Default for SamplingDomain {
    fn default() -> Self {
        SamplingDomain {
            start: AXIS_RANGE.0,
            end: AXIS_RANGE.1,
            samples: DEFAULT_SAMPLES,
        }
    }
}

impl SamplingDomain {
    pub fn new(start: f64, end: f64, samples: usize) -> Self {
        SamplingDomain {
            start,
            end,
            samples,
        }
    }

    pub fn axis(&self) -> DVector<f64> {
        linspace(self.start, self.end, self.samples)
    }

    /// `x` bound to the samples of the axis
    pub fn line_context(&self) -> EvalContext<Samples> {
        EvalContext::new().with(Variable::X, Samples::Line(self.axis()))
    }

    /// `x` and `y` bound to the coordinate matrices of the square mesh
    pub fn mesh_context(&self) -> EvalContext<Samples> {
        let axis = self.axis();
        let (x_mesh, y_mesh) = meshgrid(&axis, &axis);
        EvalContext::new()
            .with(Variable::X, Samples::Mesh(x_mesh))
            .with(Variable::Y, Samples::Mesh(y_mesh))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlotKind {
    /// samples of y = f(x); y is NaN where f is undefined
    Curve { points: Vec<(f64, f64)> },
    /// f(x, y) over the mesh spanned by `xs` and `ys`, to be contoured at `level`
    ImplicitContour {
        xs: DVector<f64>,
        ys: DVector<f64>,
        values: DMatrix<f64>,
        level: f64,
    },
    /// nothing to draw but a centered message
    Message { text: String },
}

/// Everything a renderer needs for one plot
#[derive(Clone, Debug, PartialEq)]
pub struct PlotDescription {
    pub title: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub grid: bool,
    /// draw the lines y = 0 and x = 0
    pub zero_axes: bool,
    pub kind: PlotKind,
}

impl PlotDescription {
    fn with_kind(title: String, kind: PlotKind) -> Self {
        PlotDescription {
            title,
            x_range: AXIS_RANGE,
            y_range: AXIS_RANGE,
            grid: true,
            zero_axes: true,
            kind,
        }
    }

    /// text-only placeholder shown instead of a failed plot
    pub fn message(cause: &str) -> Self {
        Self::with_kind(
            String::new(),
            PlotKind::Message {
                text: format!("Invalid function: {}", cause),
            },
        )
    }

    pub fn is_curve(&self) -> bool {
        matches!(self.kind, PlotKind::Curve { .. })
    }

    pub fn is_contour(&self) -> bool {
        matches!(self.kind, PlotKind::ImplicitContour { .. })
    }
}

/// Samples the expression and builds the description, or reports why the
/// expression cannot be evaluated at all.
pub fn try_plan_plot(
    tree: &Expr,
    text: &str,
    domain: &SamplingDomain,
) -> Result<PlotDescription, EvalError> {
    if tree.contains_variable(Variable::Y) {
        info!("'{}' depends on y, planning implicit curve", text);
        let values = evaluate_vector(tree, &domain.mesh_context())?;
        let axis = domain.axis();
        let values = values.into_mesh(axis.len(), axis.len());
        let kind = PlotKind::ImplicitContour {
            xs: axis.clone(),
            ys: axis,
            values,
            level: CONTOUR_LEVEL,
        };
        Ok(PlotDescription::with_kind(format!("{} = 0", text), kind))
    } else {
        info!("'{}' depends on x only, planning curve", text);
        let axis = domain.axis();
        // only y is ever bound to a mesh
        let ys = evaluate_vector(tree, &domain.line_context())?
            .into_line(axis.len())
            .ok_or_else(|| EvalError::UnboundVariable(Variable::Y.to_string()))?;
        let points = axis.iter().copied().zip(ys.iter().copied()).collect();
        Ok(PlotDescription::with_kind(
            format!("y = {}", text),
            PlotKind::Curve { points },
        ))
    }
}

/// Like [`try_plan_plot`] but never fails: an evaluation error becomes a
/// message plot.
pub fn plan_plot(tree: &Expr, text: &str, domain: &SamplingDomain) -> PlotDescription {
    match try_plan_plot(tree, text, domain) {
        Ok(plot) => plot,
        Err(e) => {
            warn!("cannot plot '{}': {}", text, e);
            PlotDescription::message(&e.to_string())
        }
    }
}

/// Parses and plans in one go; parse errors become a message plot too.
pub fn plan_plot_text(text: &str, domain: &SamplingDomain) -> PlotDescription {
    match parse(text) {
        Ok(tree) => plan_plot(&tree, text, domain),
        Err(e) => {
            warn!("cannot plot '{}': {}", text, e);
            PlotDescription::message(&e.to_string())
        }
    }
}

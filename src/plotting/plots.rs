use crate::plotting::contour::contour_segments;
use crate::plotting::plot_planner::{PlotDescription, PlotKind};
use itertools::Itertools;
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt;
use std::path::{Path, PathBuf};

/// Failure while drawing or writing plot data
#[derive(Debug)]
pub enum RenderError {
    /// the drawing backend refused an operation
    Backend(String),
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::Backend(msg) => write!(f, "drawing failed: {}", msg),
            RenderError::Io(e) => write!(f, "io error: {}", e),
            RenderError::Csv(e) => write!(f, "csv error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl From<csv::Error> for RenderError {
    fn from(e: csv::Error) -> Self {
        RenderError::Csv(e)
    }
}

fn backend<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Backend(e.to_string())
}

/// Surface a plot description is drawn on. Borrowed exclusively for one
/// call, nothing is kept between calls.
pub trait RenderTarget {
    fn render(&mut self, plot: &PlotDescription) -> Result<(), RenderError>;
}

/// Splits a sampled curve at non-finite points; each run is drawn as its own
/// polyline so undefined regions stay empty.
pub fn finite_runs(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    points
        .iter()
        .chunk_by(|(x, y)| x.is_finite() && y.is_finite())
        .into_iter()
        .filter(|(finite, _)| *finite)
        .map(|(_, run)| run.copied().collect::<Vec<_>>())
        .filter(|run| run.len() > 1)
        .collect()
}

fn draw_plot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: &PlotDescription,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(backend)?;
    let (x0, x1) = plot.x_range;
    let (y0, y1) = plot.y_range;
    let mut chart = ChartBuilder::on(root)
        .caption(&plot.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(backend)?;

    let mut mesh = chart.configure_mesh();
    if !plot.grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(backend)?;

    if plot.zero_axes {
        chart
            .draw_series(LineSeries::new(vec![(x0, 0.0), (x1, 0.0)], &BLACK))
            .map_err(backend)?;
        chart
            .draw_series(LineSeries::new(vec![(0.0, y0), (0.0, y1)], &BLACK))
            .map_err(backend)?;
    }

    match &plot.kind {
        PlotKind::Curve { points } => {
            let runs = finite_runs(points);
            debug!("curve drawn as {} polylines", runs.len());
            for run in runs {
                chart
                    .draw_series(LineSeries::new(run, &BLUE))
                    .map_err(backend)?;
            }
        }
        PlotKind::ImplicitContour {
            xs,
            ys,
            values,
            level,
        } => {
            let segments = contour_segments(xs, ys, values, *level);
            debug!("contour drawn as {} segments", segments.len());
            chart
                .draw_series(
                    segments
                        .into_iter()
                        .map(|(a, b)| PathElement::new(vec![a, b], &BLUE)),
                )
                .map_err(backend)?;
        }
        PlotKind::Message { text } => {
            let style = TextStyle::from(("sans-serif", 20).into_font())
                .pos(Pos::new(HPos::Center, VPos::Center));
            let centre = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
            chart
                .draw_series(std::iter::once(Text::new(text.clone(), centre, style)))
                .map_err(backend)?;
        }
    }
    root.present().map_err(backend)?;
    Ok(())
}

/// Renders into an image file with plotters: SVG when the file name ends in
/// `.svg`, PNG otherwise
#[derive(Clone, Debug)]
pub struct PlottersRenderer {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl PlottersRenderer {
    pub fn new<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Self {
        PlottersRenderer {
            path: path.as_ref().to_path_buf(),
            width,
            height,
        }
    }

    fn is_svg(&self) -> bool {
        self.path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false)
    }
}

impl RenderTarget for PlottersRenderer {
    fn render(&mut self, plot: &PlotDescription) -> Result<(), RenderError> {
        let size = (self.width, self.height);
        if self.is_svg() {
            let root = SVGBackend::new(&self.path, size).into_drawing_area();
            draw_plot(&root, plot)?;
        } else {
            let root = BitMapBackend::new(&self.path, size).into_drawing_area();
            draw_plot(&root, plot)?;
        }
        info!("plot '{}' written to {}", plot.title, self.path.display());
        Ok(())
    }
}

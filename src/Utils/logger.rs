use crate::plotting::plot_planner::{PlotDescription, PlotKind};
use crate::plotting::plots::RenderError;
use csv::Writer;
use log::{LevelFilter, info};
use simplelog::*;
use std::fs::File;
use std::path::Path;

/// Sets up the global logger: terminal output when `console` is on, plus a
/// copy into `file` when given. Only the first call installs a logger, later
/// calls are ignored.
pub fn init_logger(level: LevelFilter, file: Option<&str>, console: bool) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if console {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if let Some(filename) = file {
        if let Ok(file) = File::create(filename) {
            loggers.push(WriteLogger::new(level, Config::default(), file));
        }
    }
    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

/// "off", "error", "warn", "info", "debug" or "trace", case ignored
pub fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level '{}'", level))
}

/// Writes the sampled data of a plot as CSV: `x,y` rows for a curve,
/// `x,y,z` rows for a contour grid. A message plot has no data; nothing is
/// written and 0 is returned. Returns the number of data rows.
pub fn save_plot_to_csv<P: AsRef<Path>>(
    plot: &PlotDescription,
    filename: P,
) -> Result<usize, RenderError> {
    let mut rows = 0;
    match &plot.kind {
        PlotKind::Curve { points } => {
            let mut writer = Writer::from_path(filename.as_ref())?;
            writer.write_record(["x", "y"])?;
            for (x, y) in points {
                writer.write_record(&[x.to_string(), y.to_string()])?;
                rows += 1;
            }
            writer.flush()?;
        }
        PlotKind::ImplicitContour { xs, ys, values, .. } => {
            let mut writer = Writer::from_path(filename.as_ref())?;
            writer.write_record(["x", "y", "z"])?;
            for (i, row) in values.row_iter().enumerate() {
                for (j, z) in row.iter().enumerate() {
                    writer.write_record(&[xs[j].to_string(), ys[i].to_string(), z.to_string()])?;
                    rows += 1;
                }
            }
            writer.flush()?;
        }
        PlotKind::Message { .. } => return Ok(0),
    }
    info!("{} rows saved to {}", rows, filename.as_ref().display());
    Ok(rows)
}

#![allow(non_snake_case)]
use RustedCalc::Examples::calculator_examples::calculator_examples;
use RustedCalc::Utils::logger::{init_logger, parse_level, save_plot_to_csv};
use RustedCalc::Utils::settings::CalcSettings;
use RustedCalc::calculator::{Calculator, Outcome};
use RustedCalc::plotting::plot_planner::{PlotDescription, plan_plot_text};
use RustedCalc::plotting::plots::{PlottersRenderer, RenderTarget};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about = "Graphing calculator: evaluates expressions and plots functions of x and y", long_about = None)]
struct Cli {
    /// settings document ("plot width: 800 ... log level: info ...")
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// off, error, warn, info, debug or trace; overrides the settings document
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression; expressions of x or y are plotted instead
    Eval {
        /// e.g. "3+4*2" or "sqrt(16)"
        expression: String,
    },
    /// Plot y = f(x), or the curve f(x, y) = 0 when y appears
    Plot {
        expression: String,
        /// image file, .svg for SVG output, PNG otherwise
        #[arg(long)]
        output: Option<String>,
        /// also write the sampled data as CSV
        #[arg(long)]
        csv: Option<String>,
    },
    /// Read one expression per line from stdin
    Repl,
    /// Run one of the bundled examples
    Demo {
        #[arg(default_value_t = 0)]
        example: usize,
    },
}

fn load_settings(cli: &Cli) -> Result<CalcSettings, String> {
    let mut settings = match &cli.config {
        Some(path) => CalcSettings::from_file(path)?,
        None => CalcSettings::default(),
    };
    if let Some(level) = &cli.log_level {
        settings.log.level = parse_level(level)?;
    }
    Ok(settings)
}

fn draw(plot: &PlotDescription, output: &str, settings: &CalcSettings) -> Result<(), String> {
    let mut renderer = PlottersRenderer::new(output, settings.plot.width, settings.plot.height);
    renderer.render(plot).map_err(|e| e.to_string())?;
    println!("{} -> {}", plot_label(plot), output);
    Ok(())
}

fn plot_label(plot: &PlotDescription) -> String {
    if plot.title.is_empty() {
        "message plot".to_string()
    } else {
        plot.title.clone()
    }
}

fn repl(calc: &Calculator, settings: &CalcSettings) -> Result<(), String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush().map_err(|e| e.to_string())?;
        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line).map_err(|e| e.to_string())?;
        if read == 0 {
            return Ok(());
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        match calc.submit(text) {
            Outcome::Value(shown) => println!("{}", shown),
            Outcome::Plot(plot) => {
                if let Err(e) = draw(&plot, &settings.plot.output, settings) {
                    warn!("drawing '{}' failed: {}", text, e);
                    println!("Error: {}", e);
                }
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let settings = load_settings(&cli)?;
    init_logger(
        settings.log.level,
        settings.log.file.as_deref(),
        settings.log.console,
    );
    info!("settings: {:?}", settings);
    let calc = Calculator::new(settings.domain());
    match cli.command {
        Commands::Eval { expression } => match calc.submit(&expression) {
            Outcome::Value(shown) => println!("{}", shown),
            Outcome::Plot(plot) => draw(&plot, &settings.plot.output, &settings)?,
        },
        Commands::Plot {
            expression,
            output,
            csv,
        } => {
            let plot = plan_plot_text(&expression, &settings.domain());
            let output = output.unwrap_or_else(|| settings.plot.output.clone());
            draw(&plot, &output, &settings)?;
            if let Some(csv) = csv {
                let rows = save_plot_to_csv(&plot, &csv).map_err(|e| e.to_string())?;
                println!("{} rows -> {}", rows, csv);
            }
        }
        Commands::Repl => repl(&calc, &settings)?,
        Commands::Demo { example } => calculator_examples(example),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

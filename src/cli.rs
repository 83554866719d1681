use crate::config::{Config, LayoutStrategy, load_config};
use crate::document::{parse_diagram, save_diagram};
use crate::ir::Diagram;
use crate::layout::{LayoutReport, compute_layout};
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "angd", version, about = "Octolinear angle diagram renderer")]
pub struct Args {
    /// Input diagram (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Layout strategy, overriding the config file
    #[arg(short = 's', long = "strategy", value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Canvas width, overriding the diagram
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Canvas height, overriding the diagram
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Write the input back sorted and rounded before laying it out
    #[arg(long = "rewrite")]
    pub rewrite: bool,

    /// Write the computed geometry as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Grid,
    Declutter,
}

impl From<StrategyArg> for LayoutStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Grid => LayoutStrategy::Grid,
            StrategyArg::Declutter => LayoutStrategy::Declutter,
        }
    }
}

pub fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;
    let input = read_input(args.input.as_deref())?;

    let mut diagram = parse_diagram(&input)?;
    if args.rewrite {
        let path = rewrite_target(args.input.as_deref())?;
        diagram.validate()?;
        save_diagram(path, &diagram)?;
    }

    // Canvas overrides only affect this render, never the rewritten document.
    apply_canvas_overrides(&mut diagram, args);
    diagram.validate()?;
    log::info!(
        places = diagram.places().len(),
        routes = diagram.routes().len();
        "Loaded diagram"
    );

    let report = diagram.apply_layout(&config.layout);
    log_report(&report);

    let layout = compute_layout(&diagram, &config.theme)?;
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
    }

    let svg = render_svg(&layout, &config.theme);
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref())?,
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(strategy) = args.strategy {
        config.layout.strategy = strategy.into();
    }
    Ok(config)
}

fn apply_canvas_overrides(diagram: &mut Diagram, args: &Args) {
    if let Some(width) = args.width {
        diagram.canvas.width = width;
    }
    if let Some(height) = args.height {
        diagram.canvas.height = height;
    }
}

fn log_report(report: &LayoutReport) {
    match report.declutter {
        Some(declutter) if !declutter.convergence.is_converged() => {
            log::warn!(
                iterations = declutter.convergence.iterations();
                "Declutter hit its iteration cap before settling"
            );
        }
        _ => log::debug!(strategy:? = report.strategy; "Layout applied"),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn rewrite_target(input: Option<&Path>) -> Result<&Path> {
    match input {
        Some(path) if path != Path::new("-") => Ok(path),
        _ => Err(anyhow::anyhow!("--rewrite needs an input file, not stdin")),
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Point;
    use std::ffi::OsStr;

    #[test]
    fn parses_short_flags() {
        let args = Args::try_parse_from([
            "angd", "-i", "roads.json", "-o", "roads.png", "-e", "png", "-s", "grid", "-w", "800",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Png);
        assert_eq!(args.strategy, Some(StrategyArg::Grid));
        assert_eq!(args.width, Some(800.0));
        assert_eq!(args.height, None);
        assert!(!args.rewrite);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn strategy_flag_overrides_config() {
        let args = Args::try_parse_from(["angd", "--strategy", "grid"]).unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.layout.strategy, LayoutStrategy::Grid);
    }

    #[test]
    fn rewrite_refuses_stdin() {
        assert!(rewrite_target(None).is_err());
        assert!(rewrite_target(Some(Path::new("-"))).is_err());
        assert!(rewrite_target(Some(Path::new("a.json"))).is_ok());
    }

    #[test]
    fn rewrite_keeps_the_file_canvas_under_overrides() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let input = dir.path().join("roads.json");
        let output = dir.path().join("roads.svg");
        std::fs::write(
            &input,
            r#"{
                "places": { "Kandy": [7.2906, 80.6337], "Colombo": [6.9319, 79.8478] },
                "roads": { "A1": ["Colombo", "Kandy"] },
                "width_height": [1600, 900],
                "padding": 80
            }"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            OsStr::new("angd"),
            OsStr::new("-i"),
            input.as_os_str(),
            OsStr::new("-o"),
            output.as_os_str(),
            OsStr::new("-w"),
            OsStr::new("300"),
            OsStr::new("-H"),
            OsStr::new("200"),
            OsStr::new("--rewrite"),
        ])
        .unwrap();
        run(&args).unwrap();

        let rewritten = crate::document::load_diagram(&input).unwrap();
        assert_eq!(rewritten.canvas.width, 1600.0);
        assert_eq!(rewritten.canvas.height, 900.0);
        assert_eq!(rewritten.place("Kandy"), Some(Point::new(80.6337, 7.2906)));

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("width=\"460.00\" height=\"360.00\""));
    }

    #[test]
    fn png_requires_output_path() {
        assert!(ensure_output(&None, "png").is_err());
    }
}

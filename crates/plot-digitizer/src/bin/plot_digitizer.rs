use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use plot_digitizer::core::{complete_correspondences, DebugSink, NoDebug};
use plot_digitizer::io::write_trajectory_csv;
use plot_digitizer::{
    gray_view, load_gray, write_trajectory, DigitizeConfig, DigitizeReport, Digitizer,
    DirDebugSink, LinePointProvider,
};

use log::{info, LevelFilter};

#[cfg(feature = "tracing")]
use plot_digitizer::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use plot_digitizer::core::init_with_level;

/// Digitize a line plot image into (x, y) data.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input image file.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Data point as x,y (no spaces). Give at least 2; 3 are recommended,
    /// e.g. -p 0,0 -p 1,0 -p 0,1.
    #[arg(short, long = "point", value_name = "X,Y", allow_hyphen_values = true)]
    points: Vec<String>,

    /// Pixel location of the matching --point, in the same order. Missing
    /// locations are asked for on stdin.
    #[arg(short, long = "location", value_name = "COL,ROW")]
    locations: Vec<String>,

    /// Background gray level (0 = black, 255 = white); classified when omitted.
    #[arg(short, long)]
    background: Option<u8>,

    /// Curve gray level (0 = black, 255 = white); classified when omitted.
    #[arg(short, long)]
    foreground: Option<u8>,

    /// Histogram bins used for classification.
    #[arg(long)]
    bins: Option<usize>,

    /// Keep the axis strips instead of blanking them.
    #[arg(long)]
    no_mask: bool,

    /// JSON config file; command-line options override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trajectory output (.csv or .json); printed as CSV to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON report with calibration and classification details.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Directory for debug images (original, masked, final).
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("no input image given (use --input or image_path in --config)")]
    MissingInput,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    #[cfg(not(feature = "tracing"))]
    init_with_level(args.log_level)?;
    #[cfg(feature = "tracing")]
    init_tracing(args.log_level);

    run(args)
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(args)))]
fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = merge_config(args)?;
    if cfg.image_path.is_empty() {
        return Err(CliError::MissingInput.into());
    }

    info!("processing {}", cfg.image_path);
    let img = load_gray(&cfg.image_path)?;
    let correspondences = cfg.correspondences()?;

    let view = gray_view(&img);
    let digitizer = Digitizer::new(cfg.params.clone())?;

    let mut provider = LinePointProvider::new(io::stdin().lock(), io::stderr());
    let correspondences = complete_correspondences(&view, correspondences, &mut provider)?;

    let mut no_debug = NoDebug;
    let mut dir_sink;
    let sink: &mut dyn DebugSink = match &cfg.debug_dir {
        Some(dir) => {
            dir_sink = DirDebugSink::new(dir);
            &mut dir_sink
        }
        None => &mut no_debug,
    };
    let result = digitizer.digitize_with_debug(&view, &correspondences, sink)?;

    match &cfg.output_path {
        Some(path) => {
            write_trajectory(path, &result.trajectory)?;
            info!("wrote {} points to {path}", result.trajectory.len());
        }
        None => write_trajectory_csv(BufWriter::new(io::stdout().lock()), &result.trajectory)?,
    }

    if let Some(path) = &cfg.report_path {
        let report = DigitizeReport {
            image_path: &cfg.image_path,
            correspondences: &correspondences,
            result: &result,
        };
        report.write_json(path)?;
        info!("wrote report to {path}");
    }
    Ok(())
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| {
        format!("unknown log level {s:?}; expected off, error, warn, info, debug or trace")
    })
}

fn merge_config(args: Args) -> Result<DigitizeConfig, Box<dyn std::error::Error>> {
    let mut cfg = match &args.config {
        Some(path) => DigitizeConfig::load_json(path)?,
        None => DigitizeConfig::default(),
    };

    if let Some(input) = args.input {
        cfg.image_path = input.to_string_lossy().into_owned();
    }
    if !args.points.is_empty() {
        cfg.points = args.points;
    }
    if !args.locations.is_empty() {
        cfg.locations = args.locations;
    }
    if args.background.is_some() {
        cfg.params.background = args.background;
    }
    if args.foreground.is_some() {
        cfg.params.foreground = args.foreground;
    }
    if let Some(bins) = args.bins {
        cfg.params.intensity.num_bins = bins;
    }
    if args.no_mask {
        cfg.params.mask_axes = false;
    }
    if let Some(out) = args.output {
        cfg.output_path = Some(out.to_string_lossy().into_owned());
    }
    if let Some(report) = args.report {
        cfg.report_path = Some(report.to_string_lossy().into_owned());
    }
    if let Some(dir) = args.debug_dir {
        cfg.debug_dir = Some(dir.to_string_lossy().into_owned());
    }
    Ok(cfg)
}

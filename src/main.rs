//! csv_eda - EDA statistics and charts for CSV files
//!
//! `stats` prints the per-column report; `analyze` renders the box-plot
//! grid, histogram grid and correlation heatmap as SVG files.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use csv_eda::charts::SvgDirectory;
use csv_eda::{stats_report, GridConfig, LoadOptions, ReportConfig, ReportDriver, WarningPolicy};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::cmp::max;
use std::path::PathBuf;

/// Exploratory data analysis for CSV files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Args)]
struct GlobalOpts {
    /// Enable debug logging.
    #[arg(global = true, long, default_value_t = false)]
    debug: bool,

    /// Minimum log level.
    #[arg(global = true, long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print entry counts, value kinds, null counts and descriptive statistics.
    Stats(StatsArgs),
    /// Render box plots, histograms and the correlation heatmap.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// CSV file with a header row.
    csv: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Treat inf and -inf as missing values.
    #[arg(long)]
    inf_as_missing: bool,

    /// Log statistical advisories (empty columns, single values) as warnings.
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// CSV file with a header row.
    csv: PathBuf,

    /// Number of subplots per grid row.
    #[arg(long, default_value = "3")]
    num_cols: GridConfig,

    /// Directory the SVG figures are written to.
    #[arg(long, default_value = "eda_figures")]
    out_dir: PathBuf,

    /// Open each figure with the system default viewer.
    #[arg(long)]
    open: bool,

    /// Treat inf and -inf as missing values.
    #[arg(long)]
    inf_as_missing: bool,

    /// Log statistical advisories (empty columns, single values) as warnings.
    #[arg(long)]
    show_warnings: bool,
}

fn init_logging(opts: GlobalOpts) -> Result<()> {
    let level = if opts.debug {
        max(LevelFilter::Debug, opts.log_level)
    } else {
        opts.log_level
    };

    let mut config = ConfigBuilder::new();
    config.set_time_level(LevelFilter::Off);
    config.set_thread_level(LevelFilter::Off);
    config.set_target_level(LevelFilter::Off);
    config.set_location_level(if opts.debug {
        LevelFilter::Error
    } else {
        LevelFilter::Off
    });

    TermLogger::init(level, config.build(), TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}

fn warning_policy(show_warnings: bool) -> WarningPolicy {
    if show_warnings {
        WarningPolicy::Show
    } else {
        WarningPolicy::Suppress
    }
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let options = LoadOptions::default().with_inf_as_missing(args.inf_as_missing);
    let report = stats_report(&args.csv, &options)
        .with_context(|| format!("Failed to summarize {}", args.csv.display()))?;
    warning_policy(args.show_warnings).emit(report.advisories());

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = ReportConfig {
        grid: args.num_cols,
        ..ReportConfig::default()
    }
    .with_load_options(LoadOptions::default().with_inf_as_missing(args.inf_as_missing))
    .with_warnings(warning_policy(args.show_warnings));

    let mut surface = SvgDirectory::new(&args.out_dir)
        .with_context(|| format!("Cannot create {}", args.out_dir.display()))?
        .open_with_viewer(args.open);

    let summary = ReportDriver::run(&args.csv, &config, &mut surface)
        .with_context(|| format!("Failed to analyze {}", args.csv.display()))?;

    log::info!(
        "{} figures for {} rows and {} numeric columns in {}",
        summary.figures,
        summary.rows,
        summary.numeric_columns,
        surface.dir().display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global_opts)?;
    log::debug!("Parsed arguments: {cli:?}");

    match cli.command {
        Commands::Stats(args) => run_stats(args),
        Commands::Analyze(args) => run_analyze(args),
    }
}

//! SpreadLab CLI — inspect a price table, smooth series, compare groups.
//!
//! Commands:
//! - `inspect` — list instruments, date span, NaN cells and dataset hash
//! - `sma` — print centered SMA series
//! - `groups` — print group statistics and overview records
//! - `report` — run a full analysis and write report.json + summaries.csv

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use spreadlab_core::data::parse_date;
use spreadlab_core::SmaWindow;
use spreadlab_runner::{
    export_json, load_dataset, run_analysis, write_report, AnalysisConfig, AnalysisReport,
    GroupConfig, LoadedData,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(
    name = "spreadlab",
    about = "SpreadLab CLI — moving averages and cross-sectional group statistics"
)]
struct Cli {
    /// Log debug events (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show instruments, date span and data quality of a CSV file.
    Inspect {
        /// Wide CSV: date column followed by one column per instrument.
        data: PathBuf,
    },
    /// Print centered SMA series as CSV.
    Sma {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Instruments to smooth (default: all, or the config's list).
        #[arg(long = "instrument", short = 'i')]
        instruments: Vec<String>,

        /// Average over the window ending at the current point instead of
        /// the one ending just before it.
        #[arg(long, default_value_t = false)]
        include_current: bool,
    },
    /// Print group statistics and the per-group overview records.
    Groups {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Comma-separated group members; repeat for several groups.
        #[arg(long = "group", short = 'g')]
        groups: Vec<String>,

        /// Print the records as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run the full analysis and write report artifacts.
    Report {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Output directory for report.json and summaries.csv.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Also print the JSON report to stdout.
        #[arg(long, default_value_t = false)]
        print: bool,
    },
}

/// Inputs shared by every analysis command. Flags override the config file.
#[derive(Args)]
struct AnalysisArgs {
    /// Wide CSV: date column followed by one column per instrument.
    data: PathBuf,

    /// Path to a TOML analysis config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// SMA period, 2 to 50.
    #[arg(long)]
    sma_period: Option<usize>,

    /// First date of the analysis range.
    #[arg(long)]
    start: Option<String>,

    /// Last date of the analysis range.
    #[arg(long)]
    end: Option<String>,

    /// Seed for colours past the fixed palette.
    #[arg(long)]
    color_seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Inspect { data } => run_inspect(data),
        Commands::Sma {
            analysis,
            instruments,
            include_current,
        } => run_sma(analysis, instruments, include_current),
        Commands::Groups {
            analysis,
            groups,
            json,
        } => run_groups(analysis, groups, json),
        Commands::Report {
            analysis,
            output_dir,
            print,
        } => run_report(analysis, output_dir, print),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn parse_cli_date(flag: &str, value: &str) -> Result<NaiveDate> {
    match parse_date(value) {
        Some(date) => Ok(date),
        None => bail!("{flag}: cannot parse date '{value}'"),
    }
}

impl AnalysisArgs {
    /// Load the dataset and build the effective config.
    fn load(&self) -> Result<(LoadedData, AnalysisConfig)> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(period) = self.sma_period {
            config.sma_period = period;
        }
        if self.start.is_some() || self.end.is_some() {
            let mut range = config.date_range.unwrap_or_default();
            if let Some(start) = &self.start {
                range.start = Some(parse_cli_date("--start", start)?);
            }
            if let Some(end) = &self.end {
                range.end = Some(parse_cli_date("--end", end)?);
            }
            config.date_range = Some(range);
        }
        if self.color_seed.is_some() {
            config.color_seed = self.color_seed;
        }

        let loaded = load_dataset(&self.data)
            .with_context(|| format!("failed to load {}", self.data.display()))?;
        Ok((loaded, config))
    }
}

fn run_inspect(data: PathBuf) -> Result<()> {
    let loaded =
        load_dataset(&data).with_context(|| format!("failed to load {}", data.display()))?;
    let ds = &loaded.dataset;

    println!("File:        {}", data.display());
    println!("Dataset:     {}", loaded.dataset_hash);
    match ds.span {
        Some(span) => println!(
            "Span:        {} to {} ({} rows)",
            span.start,
            span.end,
            ds.row_count()
        ),
        None => println!("Span:        (no rows)"),
    }
    println!("NaN cells:   {}", ds.nan_cells);
    println!();
    println!("{:<20} {:>8} {:>8}", "Instrument", "Points", "NaN");
    println!("{}", "-".repeat(38));
    for instrument in &ds.instruments {
        let points = ds.series.get(&instrument.name);
        let nan = points.iter().filter(|p| p.value.is_nan()).count();
        println!("{:<20} {:>8} {:>8}", instrument.name, points.len(), nan);
    }
    Ok(())
}

fn run_sma(args: AnalysisArgs, instruments: Vec<String>, include_current: bool) -> Result<()> {
    let (loaded, mut config) = args.load()?;
    if !instruments.is_empty() {
        config.instruments = instruments;
    }
    if include_current {
        config.sma_window = SmaWindow::IncludeCurrent;
    }

    let report = run_analysis(&loaded, &config)?;
    println!("instrument,date,sma");
    for (name, series) in &report.sma {
        for p in series {
            println!("{name},{},{}", p.time, p.value);
        }
    }
    Ok(())
}

fn run_groups(args: AnalysisArgs, groups: Vec<String>, json: bool) -> Result<()> {
    let (loaded, mut config) = args.load()?;
    for list in groups {
        let members: Vec<String> = list
            .split(',')
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        config.groups.push(GroupConfig {
            name: None,
            members,
        });
    }
    if config.groups.is_empty() {
        bail!("no groups given: use --group A,B or a config with [[groups]]");
    }

    let report = run_analysis(&loaded, &config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report.summaries)?);
        return Ok(());
    }
    print_groups(&report);
    Ok(())
}

fn run_report(args: AnalysisArgs, output_dir: PathBuf, print: bool) -> Result<()> {
    let (loaded, config) = args.load()?;
    let report = run_analysis(&loaded, &config)?;

    print_groups(&report);
    if print {
        println!("{}", export_json(&report)?);
    }

    let dir = write_report(&report, &output_dir)?;
    println!("Report saved to: {}", dir.display());
    Ok(())
}

fn print_groups(report: &AnalysisReport) {
    println!(
        "Range: {} to {} (SMA period {})",
        report.interval.start, report.interval.end, report.sma_period
    );
    println!();
    println!(
        "{:<20} {:>10} {:>10} {:>10} {:>10} {:>6}",
        "Group", "Min", "Max", "Mean", "Dispersion", "N"
    );
    println!("{}", "-".repeat(71));
    for g in &report.groups {
        if g.stats.is_empty() {
            println!("{:<20} {:>10}", g.name, "(no data)");
            continue;
        }
        println!(
            "{:<20} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>6}",
            g.name, g.stats.min, g.stats.max, g.stats.mean, g.stats.dispersion, g.stats.count
        );
    }

    if report.summaries.is_empty() {
        return;
    }
    println!();
    println!(
        "{:<12} {:<20} {:>10} {:>10} {:>10} {:>10}  Color",
        "Label", "Group", "Low", "Open", "Close", "High"
    );
    for r in &report.summaries {
        println!(
            "{:<12} {:<20} {:>10.4} {:>10.4} {:>10.4} {:>10.4}  {}",
            r.label,
            r.name,
            r.low,
            r.open,
            r.close,
            r.high,
            r.color.css()
        );
    }
}

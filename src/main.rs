//! Gridfill - backfill a text grid and compact orphaned values into the last column.

mod config;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use config::{Config, OutputFormat};
use gridfill_core::storage::{
    parse_csv, parse_csv_str, render_csv, render_markdown, write_csv, write_markdown,
};
use gridfill_engine::{Grid, backfill, compact, fill_in_place, fill_until_stable};
use log::{info, warn};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Phase {
    /// Backfill then compact
    Both,
    /// Backfill only
    Backfill,
    /// Compaction only
    Compact,
}

#[derive(Parser)]
#[command(name = "gridfill", version, about = "Backfill blank cells in a CSV grid", long_about = None)]
struct Cli {
    /// CSV file to read ("-" or omitted for stdin)
    input: Option<PathBuf>,

    #[arg(short, long, help = "Write the result to a file instead of stdout")]
    output: Option<PathBuf>,

    #[arg(long, value_enum, help = "Output format [default: csv]")]
    format: Option<OutputFormat>,

    #[arg(long, value_enum, default_value_t = Phase::Both)]
    phase: Phase,

    #[arg(long, help = "Repeat the full fill until the grid stops changing")]
    until_stable: bool,

    #[arg(long, help = "Pass limit for --until-stable [default: 64]")]
    max_passes: Option<usize>,

    #[arg(long, help = "Config file path")]
    config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Verbose logging")]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.until_stable && cli.phase != Phase::Both {
        bail!("--until-stable repeats full fills and cannot be combined with a single --phase");
    }
    let config = Config::load(cli.config.as_deref())?;

    let mut grid = read_input(cli.input.as_deref())?;
    info!("loaded {}x{} grid", grid.nrows(), grid.ncols());

    let until_stable = cli.until_stable || config.fill.until_stable;
    let max_passes = cli.max_passes.unwrap_or(config.fill.max_passes);

    match cli.phase {
        Phase::Both if until_stable => {
            let (stable, passes) = fill_until_stable(&grid, max_passes)?;
            info!("stable after {} passes", passes);
            grid = stable;
        }
        Phase::Both => {
            let stats = fill_in_place(&mut grid)?;
            info!(
                "backfilled {}, moved {}, displaced {}",
                stats.backfilled, stats.moved, stats.displaced
            );
        }
        Phase::Backfill | Phase::Compact => {
            if until_stable {
                warn!("until_stable only applies to full fills; ignoring it for a single phase");
            }
            if cli.phase == Phase::Backfill {
                let filled = backfill(&mut grid)?;
                info!("backfilled {}", filled);
            } else {
                let stats = compact(&mut grid)?;
                info!("moved {}, displaced {}", stats.moved, stats.displaced);
            }
        }
    }

    let format = cli.format.unwrap_or(config.output.format);
    write_output(cli.output.as_deref(), &grid, format)
}

fn read_input(input: Option<&Path>) -> Result<Grid> {
    match input {
        Some(path) if path != Path::new("-") => {
            parse_csv(path).with_context(|| format!("Failed to load {}", path.display()))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            parse_csv_str(&content).context("Failed to parse stdin")
        }
    }
}

fn write_output(output: Option<&Path>, grid: &Grid, format: OutputFormat) -> Result<()> {
    match output {
        Some(path) => {
            match format {
                OutputFormat::Csv => write_csv(path, grid),
                OutputFormat::Markdown => write_markdown(path, grid),
            }
            .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => match format {
            OutputFormat::Csv => print!("{}", render_csv(grid)),
            OutputFormat::Markdown => print!("{}", render_markdown(grid)),
        },
    }
    Ok(())
}

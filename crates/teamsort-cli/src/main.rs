//! teamsort - split a youth-sports registration roster into age-group teams.
//!
//! `teamsort assign` reads a players table and an age group table, builds
//! balanced teams for every age group, and writes one combined CSV.
//! `teamsort generate` writes a random players table to try it out on.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use teamsort_core::config::Config;
use teamsort_core::sample::{self, DEFAULT_COUNT};
use teamsort_core::table::writer::create_file;
use teamsort_core::table::{load_brackets, load_players, save_assignments, save_players};
use teamsort_core::{partition_roster, BalanceThresholds, Partition};

/// Log file name inside the configured log directory
const LOG_FILE: &str = "teamsort.log";

#[derive(Parser)]
#[command(name = "teamsort", version)]
#[command(about = "Split a registration roster into balanced age-group teams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign every player to an age group and team
    Assign {
        /// Players table (CSV)
        #[arg(long)]
        players: PathBuf,

        /// Age group table (CSV with Age Group and Max Players columns)
        #[arg(long)]
        brackets: PathBuf,

        /// Output CSV path [default: output_teams.csv in the configured output directory]
        #[arg(long)]
        out: Option<PathBuf>,

        /// Fewest girls allowed on a u-5/u-6 team
        #[arg(long)]
        min_girls: Option<usize>,

        /// Most girls allowed on a u-5/u-6 team
        #[arg(long)]
        max_girls: Option<usize>,

        /// Season year the age cutoffs are computed from [default: current year]
        #[arg(long)]
        season_year: Option<i32>,

        /// Write balance diagnoses as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Generate a random players table
    Generate {
        /// Number of players
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output CSV path
        #[arg(long)]
        out: PathBuf,
    },
}

/// Open the log file inside `dir`, creating the directory if needed.
fn file_appender(dir: &Path) -> std::result::Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
}

/// Initialize the tracing subscriber for logging.
///
/// RUST_LOG controls the level (default `warn`). When a log directory is
/// configured, the same events also go to a file there; the returned guard
/// must live until exit so buffered lines get flushed. A log file that can't
/// be opened is handed back so it can be reported once logging is up.
fn init_tracing(log_dir: Option<&Path>) -> (Option<WorkerGuard>, Option<InitError>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard, err) = match log_dir.map(file_appender) {
        Some(Ok(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard), None)
        }
        Some(Err(e)) => (None, None, Some(e)),
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    (guard, err)
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let (_guard, log_err) = init_tracing(config.log_dir.as_deref());
    if let Some(e) = config_err {
        warn!(error = %e, "Ignoring unreadable config, using defaults");
    }
    if let Some(e) = log_err {
        warn!(error = %e, "Could not open log file, logging to stderr only");
    }

    match cli.command {
        Commands::Assign {
            players,
            brackets,
            out,
            min_girls,
            max_girls,
            season_year,
            report,
        } => {
            let defaults = config.thresholds().context("Invalid girls-per-team bounds in config")?;
            let thresholds = BalanceThresholds::new(
                min_girls.unwrap_or(defaults.min_girls),
                max_girls.unwrap_or(defaults.max_girls),
            )?;
            let season_year = season_year.unwrap_or_else(|| Utc::now().year());
            let out = out.unwrap_or_else(|| config.output_path());

            assign(&players, &brackets, &out, thresholds, season_year, report.as_deref())
        }
        Commands::Generate { count, seed, out } => generate(count, seed, &out),
    }
}

fn assign(
    players: &Path,
    brackets: &Path,
    out: &Path,
    thresholds: BalanceThresholds,
    season_year: i32,
    report: Option<&Path>,
) -> Result<()> {
    info!(season_year, ?thresholds, "Assigning teams");

    let roster = load_players(players)
        .with_context(|| format!("Failed to load players from {}", players.display()))?;
    let table = load_brackets(brackets)
        .with_context(|| format!("Failed to load age groups from {}", brackets.display()))?;

    let partition = partition_roster(&roster, &table, thresholds, season_year)?;
    save_assignments(out, &partition.rows)?;

    print_summary(&partition);
    println!("Wrote {} players to {}", partition.rows.len(), out.display());

    if let Some(path) = report {
        write_report(path, &report_json(&partition))?;
        println!("Wrote report to {}", path.display());
    }
    Ok(())
}

fn print_summary(partition: &Partition) {
    for outcome in &partition.outcomes {
        let sizes: Vec<String> = outcome.team_sizes().iter().map(|s| s.to_string()).collect();
        println!(
            "{:<8} {:>4} players  {:>3} teams  [{}]{}",
            outcome.bracket.label,
            outcome.players(),
            outcome.teams.len(),
            sizes.join(", "),
            if outcome.is_resolved() { "" } else { "  UNRESOLVED" },
        );
    }
    for issue in partition.issues() {
        println!("  ! {}", issue);
    }
}

fn report_json(partition: &Partition) -> serde_json::Value {
    let brackets: Vec<serde_json::Value> = partition
        .outcomes
        .iter()
        .map(|o| {
            serde_json::json!({
                "age_group": o.bracket.label,
                "players": o.players(),
                "team_sizes": o.team_sizes(),
                "moves": o.moves,
                "resolved": o.is_resolved(),
                "issues": o.issues,
            })
        })
        .collect();
    serde_json::json!({
        "resolved": partition.is_resolved(),
        "age_groups": brackets,
    })
}

/// Write `report` as pretty JSON, creating any missing parent directories.
fn write_report(path: &Path, report: &serde_json::Value) -> Result<()> {
    let file = create_file(path)?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

fn generate(count: usize, seed: Option<u64>, out: &Path) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let players = sample::generate_players(&mut rng, count, Utc::now().date_naive());
    save_players(out, &players)?;

    println!("Wrote {} players to {}", players.len(), out.display());
    Ok(())
}

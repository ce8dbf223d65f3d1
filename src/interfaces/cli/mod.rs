//! CLI Interface Module
//!
//! Command-line host for the scoreboard.
//!
//! ## Subcommands
//! - `run`: replay a command script (file or stdin) and print the summary
//! - `simulate`: concurrent load simulation, optionally serving metrics

pub mod script;

use crate::application::services::{ScoreboardConfig, ScoreboardService};
use crate::domain::error::ScoreboardError;
use crate::domain::key::SimpleMatchKeyGenerator;
use crate::infrastructure::observability::{HealthStatus, ObservabilityServer};
use crate::interfaces::tools::simulation::{run_simulation, SimulationConfig, SimulationError, SimulationReport};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use script::{execute_script, parse_line, ScriptCommand, ScriptReport};

/// Scoreboard command-line configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "scoreboard")]
#[command(author = "Live Scoreboard Team")]
#[command(version = "0.1.0")]
#[command(about = "Live football scoreboard", long_about = None)]
pub struct CliConfig {
    /// Log level (RUST_LOG takes precedence)
    #[arg(short = 'l', long, global = true, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Replay a command script against a fresh scoreboard
    Run(RunArgs),
    /// Start, score and finish many matches concurrently
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Script path, or `-` for stdin
    #[arg(default_value = "-")]
    pub script: String,

    /// Output format of the final summary
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Abort on the first rejected command
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of independent matches
    #[arg(short, long, default_value_t = 1000)]
    pub matches: usize,

    /// Goals recorded per match
    #[arg(short, long, default_value_t = 10)]
    pub goals_per_match: u32,

    /// Worker threads (0 = number of CPU cores)
    #[arg(short = 'n', long, default_value_t = 0)]
    pub threads: usize,

    /// RNG seed for goal sides
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Serve /metrics and /health on this port during the run
    #[arg(long)]
    pub metrics_port: Option<u16>,

    /// Metrics bind address
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Keep serving metrics this many seconds after the run
    #[arg(long, default_value_t = 0)]
    pub linger_secs: u64,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// CLI failures
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot open script {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot read script: {0}")]
    Read(#[source] io::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: {source}")]
    Rejected {
        line: usize,
        #[source]
        source: ScoreboardError,
    },

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("simulation finished inconsistently: {0}")]
    Inconsistent(String),
}

/// Runs the CLI application
pub async fn run() -> Result<(), CliError> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    tracing::debug!(?config, "configuration");

    match config.command {
        CliCommand::Run(args) => run_script(&args),
        CliCommand::Simulate(args) => simulate(args).await,
    }
}

fn run_script(args: &RunArgs) -> Result<(), CliError> {
    let board = ScoreboardService::new(SimpleMatchKeyGenerator);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let report = if args.script == "-" {
        execute_script(&board, io::stdin().lock(), &mut out, args.strict)?
    } else {
        let file = File::open(&args.script).map_err(|source| CliError::Open {
            path: args.script.clone(),
            source,
        })?;
        execute_script(&board, BufReader::new(file), &mut out, args.strict)?
    };

    tracing::info!(
        executed = report.executed,
        rejected = report.rejected,
        active = board.active_matches(),
        "script finished"
    );

    match args.format {
        OutputFormat::Text => {
            for line in board.get_summary() {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &board.summary_views())?;
            writeln!(out)?;
        }
    }

    Ok(())
}

async fn simulate(args: SimulateArgs) -> Result<(), CliError> {
    let config = SimulationConfig {
        matches: args.matches,
        goals_per_match: args.goals_per_match,
        threads: if args.threads == 0 { num_cpus::get() } else { args.threads },
        seed: args.seed,
    };

    let board = Arc::new(ScoreboardService::with_config(
        SimpleMatchKeyGenerator,
        ScoreboardConfig {
            expected_matches: config.matches,
        },
    ));

    let server = args.metrics_port.map(|port| {
        let server = ObservabilityServer::new(SocketAddr::new(args.host, port), board.metrics().clone());
        let health = server.health_checker();
        let handle = tokio::spawn(async move {
            if let Err(err) = server.run().await {
                tracing::error!(%err, "observability server stopped");
            }
        });
        (handle, health)
    });

    tracing::info!(
        matches = config.matches,
        goals_per_match = config.goals_per_match,
        threads = config.threads,
        "simulation starting"
    );

    let worker_board = board.clone();
    let report = tokio::task::spawn_blocking(move || run_simulation(&worker_board, &config))
        .await
        .map_err(|err| SimulationError::Join(err.to_string()))??;

    print_report(&report, args.format)?;

    if let Some((handle, health)) = server {
        let status = simulation_health(&report);
        if status != HealthStatus::Healthy {
            tracing::warn!(?status, "simulation left the scoreboard inconsistent");
        }
        health.set_status(status);

        if args.linger_secs > 0 {
            tracing::info!(secs = args.linger_secs, "serving metrics before exit");
            tokio::time::sleep(Duration::from_secs(args.linger_secs)).await;
        }
        handle.abort();
    }

    if !report.is_consistent() {
        return Err(CliError::Inconsistent(format!(
            "{} of {} starts, {} of {} goals, {} matches left",
            report.matches_started,
            report.matches_requested,
            report.goals_recorded,
            report.goals_expected,
            report.leftover_matches
        )));
    }

    Ok(())
}

/// Health reported after a run
///
/// Short counts on an emptied board are `Degraded`; matches stuck on the
/// board are `Unhealthy`.
fn simulation_health(report: &SimulationReport) -> HealthStatus {
    if report.is_consistent() {
        HealthStatus::Healthy
    } else if report.leftover_matches == 0 {
        HealthStatus::Degraded
    } else {
        HealthStatus::Unhealthy
    }
}

fn print_report(report: &SimulationReport, format: OutputFormat) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "========================================")?;
            writeln!(out, "  Scoreboard load simulation")?;
            writeln!(out, "========================================")?;
            writeln!(out, "Threads:          {}", report.threads)?;
            writeln!(out, "Matches started:  {}/{}", report.matches_started, report.matches_requested)?;
            writeln!(out, "Goals recorded:   {}/{}", report.goals_recorded, report.goals_expected)?;
            writeln!(out, "Matches finished: {}", report.matches_finished)?;
            writeln!(out, "Elapsed:          {} ms", report.elapsed_ms)?;
            writeln!(out, "Throughput:       {:.0} ops/s", report.ops_per_sec)?;
            writeln!(out, "Top of summary:")?;
            for line in &report.top_of_summary {
                writeln!(out, "  {}", line)?;
            }
        }
    }

    Ok(())
}

/// Initializes tracing (RUST_LOG wins over `level`)
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let config = CliConfig::parse_from(["scoreboard", "run"]);
        assert_eq!(config.log_level, "info");
        match config.command {
            CliCommand::Run(args) => {
                assert_eq!(args.script, "-");
                assert_eq!(args.format, OutputFormat::Text);
                assert!(!args.strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_run_custom() {
        let config = CliConfig::parse_from([
            "scoreboard",
            "run",
            "matches.txt",
            "--format",
            "json",
            "--strict",
            "--log-level",
            "debug",
        ]);
        assert_eq!(config.log_level, "debug");
        match config.command {
            CliCommand::Run(args) => {
                assert_eq!(args.script, "matches.txt");
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_simulate_defaults() {
        let config = CliConfig::parse_from(["scoreboard", "simulate"]);
        match config.command {
            CliCommand::Simulate(args) => {
                assert_eq!(args.matches, 1000);
                assert_eq!(args.goals_per_match, 10);
                assert_eq!(args.threads, 0);
                assert_eq!(args.seed, 42);
                assert_eq!(args.metrics_port, None);
                assert_eq!(args.host.to_string(), "127.0.0.1");
                assert_eq!(args.linger_secs, 0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_simulate_short_flags() {
        let config = CliConfig::parse_from([
            "scoreboard", "simulate", "-m", "50", "-g", "3", "-n", "4", "-s", "7", "--metrics-port", "9100",
            "-l", "warn",
        ]);
        assert_eq!(config.log_level, "warn");
        match config.command {
            CliCommand::Simulate(args) => {
                assert_eq!(args.matches, 50);
                assert_eq!(args.goals_per_match, 3);
                assert_eq!(args.threads, 4);
                assert_eq!(args.seed, 7);
                assert_eq!(args.metrics_port, Some(9100));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn report() -> SimulationReport {
        SimulationReport {
            threads: 2,
            matches_requested: 10,
            matches_started: 10,
            start_rejections: 0,
            goals_expected: 20,
            goals_recorded: 20,
            matches_finished: 10,
            leftover_matches: 0,
            elapsed_ms: 1,
            ops_per_sec: 40_000.0,
            top_of_summary: Vec::new(),
        }
    }

    #[test]
    fn test_simulation_health() {
        assert_eq!(simulation_health(&report()), HealthStatus::Healthy);

        let short = SimulationReport {
            matches_started: 9,
            start_rejections: 1,
            goals_recorded: 18,
            matches_finished: 9,
            ..report()
        };
        assert_eq!(simulation_health(&short), HealthStatus::Degraded);

        let stuck = SimulationReport {
            matches_finished: 8,
            leftover_matches: 2,
            ..report()
        };
        assert_eq!(simulation_health(&stuck), HealthStatus::Unhealthy);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(CliConfig::try_parse_from(["scoreboard", "--log-level", "loud", "run"]).is_err());
    }
}

//! Command-line driver for the Cue Ladder rating engine
//!
//! Loads configuration, reads a JSON request from a file or stdin, runs the
//! engine and prints the JSON result. The engine itself does no I/O; this
//! binary is a thin host around it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cue_ladder::config::AppConfig;
use cue_ladder::types::{MatchContext, PlayerStats};
use cue_ladder::{RatingCalculator, RatingEngine};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Cue Ladder - rating engine for head-to-head pool matches
#[derive(Parser)]
#[command(
    name = "cue-ladder",
    version,
    about = "Rate pool matches, predict outcomes and track ladder progression",
    long_about = "Cue Ladder computes Elo-style rating updates for head-to-head pool matches, \
                 with dynamic K-factors, streak/quality/upset bonuses, match predictions and \
                 a 14-tier rank ladder. Requests and results are JSON."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit")]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rate a completed match
    Rate {
        /// JSON match request, `-` for stdin
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,
    },
    /// Predict a pending match
    Predict {
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,
    },
    /// Show what each player stands to gain or lose
    Scenarios {
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,
    },
    /// Show a player's progress towards the next tier
    Progress {
        /// JSON player stats, `-` for stdin
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,
    },
    /// List the configured rank ladder
    Tiers,
}

/// Two players and the match between them
#[derive(Debug, Serialize, Deserialize)]
struct MatchRequest {
    player1: PlayerStats,
    player2: PlayerStats,
    context: MatchContext,
}

/// Two players for a forward prediction
#[derive(Debug, Serialize, Deserialize)]
struct PredictRequest {
    player1: PlayerStats,
    player2: PlayerStats,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file/environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    cue_ladder::config::validate_config(&config)?;
    Ok(config)
}

fn read_json<T: for<'de> Deserialize<'de>>(input: &Path) -> Result<T> {
    let contents = if input == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read request from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read request {}", input.display()))?
    };

    serde_json::from_str(&contents).context("Failed to parse JSON request")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(engine: &RatingEngine, command: Command) -> Result<()> {
    match command {
        Command::Rate { input } => {
            let request: MatchRequest = read_json(&input)?;
            let result = engine.apply_match(&request.player1, &request.player2, &request.context)?;
            info!(
                "Rated {} ({:+}) vs {} ({:+})",
                result.player1.player_id,
                result.player1.delta,
                result.player2.player_id,
                result.player2.delta
            );
            print_json(&result)
        }
        Command::Predict { input } => {
            let request: PredictRequest = read_json(&input)?;
            print_json(&engine.predict(&request.player1, &request.player2)?)
        }
        Command::Scenarios { input } => {
            let request: MatchRequest = read_json(&input)?;
            print_json(&engine.scenarios(&request.player1, &request.player2, &request.context)?)
        }
        Command::Progress { input } => {
            let player: PlayerStats = read_json(&input)?;
            print_json(&engine.progression(&player)?)
        }
        Command::Tiers => print_json(engine.ladder()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let engine = config.build_engine()?;
    debug!(
        "Engine ready: base K {}, {} tiers",
        engine.config().base_k_factor,
        engine.ladder().len()
    );

    if args.dry_run {
        info!("Configuration validation successful");
        return Ok(());
    }

    let Some(command) = args.command else {
        error!("No command given; see --help");
        std::process::exit(2);
    };

    if let Err(e) = run(&engine, command) {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

//! Command line entry point for pairwise-skill
//!
//! Reads match outcomes from JSON files, runs them through the rating engine
//! and prints the results as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pairwise_skill::config::AppConfig;
use pairwise_skill::{BradleyTerryFull, RatedPlayer, RatingCalculator, RatingError, Skill};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Pairwise Skill - multi-team Bradley-Terry rating
#[derive(Parser)]
#[command(
    name = "pairwise-skill",
    version,
    about = "Rate players from multi-team match outcomes",
    long_about = "Pairwise Skill updates player skill estimates (mean, variance) from the \
                 finishing order of any number of teams, comparing every team against every \
                 other team under a Bradley-Terry model."
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

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the prior skill for a player with no history
    Prior,
    /// Rate one match read from a JSON file
    Rate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the probability that side `a` beats side `b`
    Predict {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// One match: teams of labelled skills, optionally with explicit ranks.
/// Without ranks, teams are listed in finishing order.
#[derive(Debug, Deserialize)]
struct MatchFile {
    teams: Vec<Vec<RatedPlayer>>,
    #[serde(default)]
    ranks: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
struct PredictionFile {
    a: Vec<Skill>,
    b: Vec<Skill>,
}

#[derive(Debug, Serialize)]
struct Prediction {
    win_probability: f64,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, config file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    pairwise_skill::config::validate_config(&config)?;
    Ok(config)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).map_err(|e| {
        RatingError::InvalidMatchInput {
            reason: format!("{}: {}", path.display(), e),
        }
        .into()
    })
}

fn rate(model: &BradleyTerryFull, path: &Path) -> Result<String> {
    let input: MatchFile = read_json(path)?;
    info!(teams = input.teams.len(), "Rating match from {}", path.display());

    let changes = match &input.ranks {
        Some(ranks) => model.calculate_rating_changes(&input.teams, ranks)?,
        None => model.calculate_in_order(&input.teams)?,
    };

    Ok(serde_json::to_string_pretty(&changes)?)
}

fn predict(model: &BradleyTerryFull, path: &Path) -> Result<String> {
    let input: PredictionFile = read_json(path)?;
    let win_probability = model.predict_win(&input.a, &input.b)?;
    debug!(win_probability, "Predicted outcome");

    Ok(serde_json::to_string_pretty(&Prediction { win_probability })?)
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

    debug!(service = %config.service.name, model = ?config.model, "Configuration loaded");
    let model = config.model;

    let output = match &args.command {
        Command::Prior => serde_json::to_string_pretty(&model.initial_skill())?,
        Command::Rate { file } => rate(&model, file)?,
        Command::Predict { file } => predict(&model, file)?,
    };

    println!("{}", output);
    Ok(())
}

//! Anagram Rounds - CLI
//!
//! Play timed anagram rounds in the terminal, analyze seed words and plan
//! daily challenges.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use anagram_rounds::{
    commands::{DailyConfig, PlayConfig, analyze_seed, run_daily, run_play},
    config::GameConfig,
    core::{LevelInfo, RoundContext, RoundGoal},
    dictionary::Dictionary,
    output::{print_analysis_result, print_daily_plans},
};

#[derive(Parser)]
#[command(
    name = "anagram_rounds",
    about = "Timed anagram rounds: find every word hidden in a seed word",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Newline-delimited word list (default: embedded list)
    #[arg(short, long, global = true)]
    dictionary: Option<PathBuf>,

    /// JSON game configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a round in the terminal (default)
    Play {
        /// Seed word (default: random word from the dictionary)
        seed: Option<String>,

        /// Append the saved result to this JSON lines file
        #[arg(short, long)]
        results: Option<PathBuf>,

        /// Round length in seconds
        #[arg(long)]
        duration: Option<u32>,

        /// Play as a level instead of practice; level results are saved
        #[arg(short, long)]
        level: Option<u32>,

        /// Level theme; the bonus star then needs the seed word itself
        #[arg(long, requires = "level")]
        theme: Option<String>,

        /// End the round once this score is reached
        #[arg(long, conflicts_with = "target_words")]
        target_score: Option<u32>,

        /// End the round once this many words are found
        #[arg(long)]
        target_words: Option<usize>,
    },

    /// Show the max score, formable words and star targets for a seed
    Analyze {
        /// Seed word to analyze
        seed: String,
    },

    /// Print a random seed-length word
    Random,

    /// Plan daily challenges
    Daily {
        /// First date to plan (YYYY-MM-DD)
        #[arg(short, long)]
        start: NaiveDate,

        /// Number of days to plan
        #[arg(short = 'n', long, default_value = "30")]
        days: u64,

        /// Fixed RNG seed for reproducible plans
        #[arg(long)]
        rng_seed: Option<u64>,

        /// JSON plan file; existing dates are kept and skipped
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load the game config from `--config` or fall back to defaults
fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

/// Load the word list from `--dictionary` or the embedded list
fn load_dictionary(path: Option<&Path>, config: &GameConfig) -> Result<Dictionary> {
    let dictionary = Dictionary::new(config.letter_count);
    match path {
        Some(path) => dictionary.load_from_path(path)?,
        None => dictionary.load_embedded()?,
    }
    Ok(dictionary)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    let command = cli.command.unwrap_or(Commands::Play {
        seed: None,
        results: None,
        duration: None,
        level: None,
        theme: None,
        target_score: None,
        target_words: None,
    });

    if let Commands::Play {
        duration: Some(secs),
        ..
    } = &command
    {
        config.round_duration_secs = *secs;
        config.validate()?;
    }

    let dictionary = load_dictionary(cli.dictionary.as_deref(), &config)?;
    info!(words = dictionary.len(), "dictionary ready");

    match command {
        Commands::Play {
            seed,
            results,
            level,
            theme,
            target_score,
            target_words,
            ..
        } => {
            let context = match level {
                Some(number) => RoundContext::Level(LevelInfo {
                    number,
                    theme,
                    max_score: None,
                    star_thresholds: None,
                }),
                None => RoundContext::Practice,
            };
            let goal = match (target_score, target_words) {
                (Some(score), _) => RoundGoal::TargetScore(score),
                (None, Some(count)) => RoundGoal::TargetWordCount(count),
                (None, None) => RoundGoal::TimeLimit,
            };
            let options = PlayConfig {
                seed,
                context,
                goal,
                results,
            };
            run_play(options, Arc::new(dictionary), &config).await?;
        }
        Commands::Analyze { seed } => {
            let result = analyze_seed(&seed, &dictionary, &config)?;
            print_analysis_result(&result);
        }
        Commands::Random => {
            let word = dictionary
                .random_word(config.letter_count)
                .with_context(|| format!("no {}-letter words in dictionary", config.letter_count))?;
            println!("{}", word.to_uppercase());
        }
        Commands::Daily {
            start,
            days,
            rng_seed,
            output,
        } => {
            let options = DailyConfig {
                start,
                days,
                rng_seed,
                existing: output.as_deref(),
            };
            let plans = run_daily(&options, &dictionary, &config)?;
            let json = serde_json::to_string_pretty(&plans)?;
            match &output {
                Some(path) => {
                    std::fs::write(path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    print_daily_plans(&plans);
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

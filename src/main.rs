//! Event schedule CLI.
//!
//! Generates trial sequences from a JSON schedule configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cogex_core::Event;
use cogex_experiment::ScheduleConfig;
use cogex_timing::sample_onsets;

#[derive(Parser)]
#[command(name = "cogex")]
#[command(about = "Trial sequence generation for behavioural and neuroimaging tasks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an event sequence.
    Generate {
        /// Schedule configuration (JSON). Uses the built-in default when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
        /// Also report onset sample indices at this rate (Hz)
        #[arg(long)]
        sampling_rate: Option<f64>,
    },

    /// Print the default configuration.
    ExampleConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

#[derive(Serialize)]
struct Output<'a> {
    seed: u64,
    events: &'a [Event],
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_onsets: Option<Vec<u64>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            config,
            seed,
            format,
            sampling_rate,
        } => generate(config, seed, format, sampling_rate),
        Commands::ExampleConfig => {
            println!("{}", serde_json::to_string_pretty(&ScheduleConfig::default())?);
            Ok(())
        }
    }
}

fn generate(
    config: Option<PathBuf>,
    seed: Option<u64>,
    format: Format,
    sampling_rate: Option<f64>,
) -> Result<()> {
    let config = match config {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            ScheduleConfig::from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => ScheduleConfig::default(),
    };

    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let events = config
        .generate(&mut rng)
        .context("generating event sequence")?;
    info!(seed, events = events.len(), "generated schedule");

    let sample_onsets = sampling_rate
        .map(|hz| sample_onsets(&events, hz))
        .transpose()
        .context("converting onsets to samples")?;

    match format {
        Format::Json => {
            let output = Output {
                seed,
                events: &events,
                sample_onsets,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Table => print_table(&events, sample_onsets.as_deref()),
    }
    Ok(())
}

/// Tab-separated events table, times in seconds.
fn print_table(events: &[Event], samples: Option<&[u64]>) {
    match samples {
        Some(_) => println!("onset\tduration\ttrial_type\tsample"),
        None => println!("onset\tduration\ttrial_type"),
    }
    for (i, event) in events.iter().enumerate() {
        let mut row = format!(
            "{:.3}\t{:.3}\t{}",
            event.onset().as_secs_f64(),
            event.duration().as_secs_f64(),
            event.trial_type()
        );
        if let Some(sample) = samples.and_then(|s| s.get(i)) {
            row.push_str(&format!("\t{sample}"));
        }
        println!("{row}");
    }
}

//! binsense - ferramentas de linha de comando da lixeira inteligente
//! Inspeciona o estado persistido da fusão e reproduz amostras gravadas

use anyhow::{Context, Result};
use binsense_air::{
    AirConfig, AirQualityProcessor, BmeSample, CONFIG_FILE, EchoFusion, FileStateStore,
    LoadOutcome, ProcessError, StateStore,
};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bytes exibidos na prévia hexadecimal
const HEX_PREVIEW_LEN: usize = 32;

#[derive(Parser)]
#[command(name = "binsense")]
#[command(author = "Binsense Contributors")]
#[command(version = "2026.10.1")]
#[command(about = "Binsense - smart bin sensor tools", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./binsense.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or reset the persisted fusion state
    State {
        #[command(subcommand)]
        action: StateAction,
    },

    /// Run recorded samples (JSON lines) through the processing pipeline
    Replay {
        /// Samples file, one JSON object per line
        #[arg(value_name = "SAMPLES")]
        input: PathBuf,

        /// State file (overrides the configuration)
        #[arg(short, long, value_name = "FILE")]
        state: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum StateAction {
    /// Show what a load would restore
    Show {
        /// State file (overrides the configuration)
        #[arg(short, long, value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// Remove the persisted state
    Clear {
        /// State file (overrides the configuration)
        #[arg(short, long, value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::State { action } => match action {
            StateAction::Show { path } => state_show_command(cli.config.as_deref(), path),
            StateAction::Clear { path } => state_clear_command(cli.config.as_deref(), path),
        },
        Commands::Replay { input, state } => {
            replay_command(cli.config.as_deref(), &input, state)
        }
        Commands::Config => config_command(cli.config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        let code = e
            .downcast_ref::<ProcessError>()
            .map(|err| exit_code(err.status_code()))
            .unwrap_or(1);
        std::process::exit(code);
    }
}

/// Código de saída do processo para um status de inicialização.
///
/// O sistema só preserva 8 bits; status fora de 1..=255 (negativos inclusive)
/// saem como 1 e o valor exato fica na mensagem de erro.
fn exit_code(status: i32) -> i32 {
    if (1..=255).contains(&status) { status } else { 1 }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "binsense=debug,binsense_air=debug"
    } else {
        "binsense=info,binsense_air=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Carrega configuração explícita, `./binsense.toml` ou padrão
fn resolve_config(explicit: Option<&Path>, state_override: Option<PathBuf>) -> Result<AirConfig> {
    let mut config = match explicit {
        Some(path) => AirConfig::from_file(path)?,
        None if Path::new(CONFIG_FILE).exists() => AirConfig::from_file(Path::new(CONFIG_FILE))?,
        None => AirConfig::default(),
    };

    if let Some(path) = state_override {
        config.state_path = path;
    }

    config.validate()?;
    Ok(config)
}

fn state_show_command(config_path: Option<&Path>, path: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path, path)?;
    let mut store = FileStateStore::new(&config.state_path);
    let outcome = store.load(config.state_capacity)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_state_report(&mut out, &config, &outcome)?;
    Ok(())
}

fn write_state_report<W: Write>(out: &mut W, config: &AirConfig, outcome: &LoadOutcome) -> Result<()> {
    writeln!(out, "{} {}", "file:".bold(), config.state_path.display())?;
    writeln!(out, "{} {}", "status:".bold(), outcome_label(outcome))?;

    match outcome {
        LoadOutcome::Missing => {}
        LoadOutcome::Corrupt(reason) => {
            writeln!(out, "{} {}", "reason:".bold(), reason)?;
        }
        LoadOutcome::Restored(_) | LoadOutcome::Truncated { .. } => {
            if let Some(declared) = outcome.declared_len() {
                writeln!(out, "{} {} bytes", "declared:".bold(), declared)?;
            }
            writeln!(
                out,
                "{} {} bytes (capacity {})",
                "copied:".bold(),
                outcome.copied_len(),
                config.state_capacity
            )?;
            if let Some(state) = outcome.state() {
                writeln!(out, "{} {}", "data:".bold(), hex_preview(state.as_bytes()))?;
            }
        }
    }

    Ok(())
}

fn outcome_label(outcome: &LoadOutcome) -> ColoredString {
    match outcome {
        LoadOutcome::Missing => outcome.label().yellow(),
        LoadOutcome::Restored(_) => outcome.label().green(),
        LoadOutcome::Truncated { .. } => outcome.label().yellow().bold(),
        LoadOutcome::Corrupt(_) => outcome.label().red().bold(),
    }
}

fn hex_preview(bytes: &[u8]) -> String {
    let encoded = hex::encode(&bytes[..bytes.len().min(HEX_PREVIEW_LEN)]);

    let mut preview = String::with_capacity(encoded.len() * 3 / 2);
    for (i, c) in encoded.chars().enumerate() {
        if i > 0 && i % 2 == 0 {
            preview.push(' ');
        }
        preview.push(c);
    }
    if bytes.len() > HEX_PREVIEW_LEN {
        preview.push_str(&format!(" … (+{} bytes)", bytes.len() - HEX_PREVIEW_LEN));
    }
    preview
}

fn state_clear_command(config_path: Option<&Path>, path: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path, path)?;
    let mut store = FileStateStore::new(&config.state_path);
    store.clear()?;

    println!(
        "{} Removed state {}",
        "✓".green().bold(),
        config.state_path.display()
    );
    Ok(())
}

/// Lê amostras JSON, ignorando linhas vazias e comentários `#`
fn read_samples(input: &Path) -> Result<Vec<BmeSample>> {
    let file = fs::File::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;

    let mut samples = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", input.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let sample: BmeSample = serde_json::from_str(trimmed)
            .with_context(|| format!("Invalid sample on line {}", index + 1))?;
        samples.push(sample);
    }

    Ok(samples)
}

fn replay_command(config_path: Option<&Path>, input: &Path, state: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path, state)?;
    let samples = read_samples(input)?;
    debug!(count = samples.len(), "samples loaded");

    let fusion = EchoFusion::with_save_interval(config.save_interval);
    let store = FileStateStore::new(&config.state_path);
    let mut processor = AirQualityProcessor::new(fusion, store, config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for sample in &samples {
        let output = processor.process(sample)?;
        let line = serde_json::json!({
            "timestamp": sample.timestamp,
            "output": output.as_slice(),
        });
        writeln!(out, "{line}")?;
    }

    info!(
        samples = processor.samples_processed(),
        saves = processor.saves(),
        save_failures = processor.save_failures(),
        "replay finished"
    );
    Ok(())
}

fn config_command(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path, None)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

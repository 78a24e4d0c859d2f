use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;

use salutation_core::{CharCount, CombinationCounts, GeneratorSettings, SalutationGenerator};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Pair sushi foods with recipients sharing the same first letter"
)]
struct Cli {
    /// Number of salutations to print
    #[arg(default_value_t = 5)]
    lines: usize,

    /// Only use foods and recipients starting with this letter
    #[arg(long = "char")]
    fixed_char: Option<char>,

    /// Optional path to a TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the foods word list
    #[arg(long)]
    foods: Option<PathBuf>,

    /// Override the recipients word list
    #[arg(long)]
    recipients: Option<PathBuf>,

    /// Override the number of missed draws tolerated before giving up
    #[arg(long = "max-attempts")]
    max_attempts: Option<usize>,

    /// Print the number of possible salutations instead of generating
    #[arg(long)]
    count: bool,

    /// With --count, also print the count for each starting letter
    #[arg(long = "per-char", requires = "count")]
    per_char: bool,

    /// With --count, print the counts as JSON
    #[arg(long, requires = "count")]
    json: bool,

    /// Seed the random generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// JSON layout of `--count --json`.
#[derive(Serialize)]
struct CountReport<'a> {
    total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_char: Option<&'a [CharCount]>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = resolve_settings(&cli)?;
    debug!("Using settings {:?}", settings);

    let mut generator = SalutationGenerator::from_settings(&settings, cli.lines)
        .context("failed to load word lists")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.count {
        let counts = generator.combination_counts();
        write_counts(&mut out, &counts, cli.per_char, cli.json)?;
        return Ok(());
    }

    let mut rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    };
    let salutations = generator
        .generate_with_rng(cli.fixed_char, rng.as_mut())
        .context("failed to generate salutations")?;

    for salutation in salutations {
        writeln!(out, "{salutation}")?;
    }

    Ok(())
}

/// Installs `env_logger`; `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();
}

/// Builds the settings: defaults, then the TOML file, then the environment,
/// then command-line flags.
fn resolve_settings(cli: &Cli) -> Result<GeneratorSettings> {
    let mut settings = match &cli.config {
        Some(path) => GeneratorSettings::from_toml_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => GeneratorSettings::default(),
    };

    settings
        .apply_env()
        .context("invalid SALUTATION_* environment variable")?;

    if let Some(path) = &cli.foods {
        settings.foods_path = path.clone();
    }
    if let Some(path) = &cli.recipients {
        settings.recipients_path = path.clone();
    }
    if let Some(max_attempts) = cli.max_attempts {
        settings.max_attempts = max_attempts;
    }
    settings.validate()?;

    Ok(settings)
}

fn write_counts<W: Write>(
    out: &mut W,
    counts: &CombinationCounts,
    per_char: bool,
    json: bool,
) -> Result<()> {
    if json {
        let report = CountReport {
            total: counts.total(),
            per_char: per_char.then(|| counts.per_char()),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    if per_char {
        for entry in counts.per_char() {
            writeln!(out, "{}: {}", entry.character, entry.count)?;
        }
    }
    writeln!(out, "total: {}", counts.total())?;
    Ok(())
}

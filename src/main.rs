//! Wordle Oracle - CLI
//!
//! Check guesses against local word lists and remote dictionaries, and build
//! or probe membership filter assets.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use wordle_oracle::{
    commands::{
        DEFAULT_CONCURRENCY, DEFAULT_FP_RATE, build_filter, check_words, probe_filter,
        read_inputs, run_batch,
    },
    config::{OracleConfig, ProviderConfig},
    lexicon::MembershipFilter,
    oracle::{Oracle, load_lexicon},
    output::{print_batch_summary, print_build_result, print_check_results, print_probe_result},
};

#[derive(Parser)]
#[command(
    name = "wordle-oracle",
    about = "Word-validity oracle for five-letter guesses",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Membership filter asset
    #[arg(long, global = true)]
    filter: Option<PathBuf>,

    /// Common word list (text or JSON array)
    #[arg(short = 'w', long, global = true)]
    words: Option<PathBuf>,

    /// Excluded word list
    #[arg(long, global = true)]
    exclusions: Option<PathBuf>,

    /// Directory for the durable verdict cache
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Remote provider as NAME=URL (repeatable)
    #[arg(short, long = "provider", global = true)]
    providers: Vec<ProviderConfig>,

    /// Keep verdicts for this run only
    #[arg(long, global = true)]
    no_cache: bool,

    /// Ask providers even when the filter rules a word out
    #[arg(long, global = true)]
    distrust_filter: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one or more words
    Check {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Check every word in a file, one per line
    Batch {
        file: PathBuf,

        /// Lookups in flight at once
        #[arg(short = 'j', long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },

    /// Build a filter asset from a word list
    BuildFilter {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Target false-positive rate
        #[arg(short, long, default_value_t = DEFAULT_FP_RATE)]
        rate: f64,
    },

    /// Estimate a filter's false-positive rate
    ProbeFilter {
        /// Filter asset (defaults to --filter)
        path: Option<PathBuf>,

        #[arg(short = 'n', long, default_value_t = 10_000)]
        samples: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

impl Cli {
    /// Config file first, then flag overrides
    fn oracle_config(&self) -> Result<OracleConfig> {
        let mut config = match &self.config {
            Some(path) => OracleConfig::load(path)
                .with_context(|| format!("cannot use config {}", path.display()))?,
            None => OracleConfig::default(),
        };

        if self.filter.is_some() {
            config.filter_path.clone_from(&self.filter);
        }
        if self.words.is_some() {
            config.words_path.clone_from(&self.words);
        }
        if self.exclusions.is_some() {
            config.exclusions_path.clone_from(&self.exclusions);
        }
        if self.cache_dir.is_some() {
            config.cache_dir.clone_from(&self.cache_dir);
        }
        config.providers.extend(self.providers.iter().cloned());
        if self.no_cache {
            config.durable_cache = false;
        }
        if self.distrust_filter {
            config.trust_filter_negatives = false;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.oracle_config()?;

    match &cli.command {
        Commands::Check { words } => run_check_command(config, words, cli.json).await,
        Commands::Batch { file, concurrency } => {
            run_batch_command(config, file, *concurrency, cli.json).await
        }
        Commands::BuildFilter {
            input,
            output,
            rate,
        } => {
            let result = build_filter(input, output, *rate)?;
            print_build_result(&result);
            Ok(())
        }
        Commands::ProbeFilter {
            path,
            samples,
            seed,
        } => run_probe_command(&config, path.as_deref(), *samples, *seed),
    }
}

async fn run_check_command(config: OracleConfig, words: &[String], json: bool) -> Result<()> {
    let oracle = Oracle::from_config(config);
    let results = check_words(&oracle, words).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_check_results(&results);
    }

    flush(&oracle);
    Ok(())
}

async fn run_batch_command(
    config: OracleConfig,
    file: &Path,
    concurrency: usize,
    json: bool,
) -> Result<()> {
    let inputs = read_inputs(file)?;
    let oracle = Oracle::from_config(config);
    let summary = run_batch(&oracle, inputs, concurrency, !json).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary.results)?);
    } else {
        print_batch_summary(&summary);
    }

    flush(&oracle);
    Ok(())
}

fn run_probe_command(
    config: &OracleConfig,
    path: Option<&Path>,
    samples: usize,
    seed: u64,
) -> Result<()> {
    let path = path
        .or(config.filter_path.as_deref())
        .context("no filter given: pass a path or --filter")?;
    let filter = MembershipFilter::load(path)
        .with_context(|| format!("cannot load filter {}", path.display()))?;
    let lexicon = load_lexicon(config);

    let result = probe_filter(&filter, lexicon.common(), samples, seed);
    print_probe_result(&result);
    Ok(())
}

/// Write pending verdicts before exit; failure only costs future lookups
fn flush(oracle: &Oracle) {
    if let Err(e) = oracle.cache().flush() {
        tracing::warn!(error = %e, "could not persist verdict cache");
    }
}

//! corpus-rank
//!
//! Ranks the pages of an HTML corpus by random-surfer sampling and by
//! iterated PageRank, and prints both.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use corpus_rank::{
    corpus,
    page_rank::{iterated, sampled, PageRank},
    report::Report,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "corpus-rank", version, about)]
struct Cli {
    /// Directory holding the corpus' .html files
    corpus: PathBuf,

    /// Probability of following a link rather than jumping anywhere
    #[arg(long, env = "CORPUS_RANK_DAMPING", default_value_t = 0.85)]
    damping: f64,

    /// Steps of the random surfer walk
    #[arg(long, env = "CORPUS_RANK_SAMPLES", default_value_t = 10_000)]
    samples: usize,

    /// Largest per-page change at which iteration stops
    #[arg(long, env = "CORPUS_RANK_THRESHOLD", default_value_t = 0.001)]
    threshold: f64,

    #[arg(long, env = "CORPUS_RANK_MAX_ITERATIONS", default_value_t = 10_000)]
    max_iterations: usize,

    /// Seed for the random surfer; random when omitted
    #[arg(long, env = "CORPUS_RANK_SEED")]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    let graph = corpus::crawl(&cli.corpus)
        .with_context(|| format!("failed to load corpus {}", cli.corpus.display()))?;

    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };
    let sampled_cfg = sampled::Config {
        damping: cli.damping,
        samples: cli.samples,
    };
    let sampled = sampled::SampledPageRank::new(&graph, &sampled_cfg, rng)
        .and_then(|mut pr| pr.calc())
        .context("sampling failed")?;

    let iterated_cfg = iterated::Config {
        damping: cli.damping,
        threshold: cli.threshold,
        max_iterations: cli.max_iterations,
    };
    let iterated = iterated::IteratedPageRank::new(&graph, &iterated_cfg)
        .and_then(|mut pr| pr.calc())
        .context("iteration failed")?;

    let report = Report::new(cli.damping, &sampled, &iterated);
    match cli.format {
        Format::Text => print!("{}", report.to_text()),
        Format::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

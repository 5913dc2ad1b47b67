//! linkrank CLI - rank the pages of an HTML corpus
//!
//! Pipeline:
//!
//! 1. Config: linkrank.toml in the corpus directory, overridden by flags
//! 2. Discovery: read the `.html` pages and their links into a graph
//! 3. Sampling: random-surfer estimate
//! 4. Iteration: power-iteration estimate
//! 5. Rendering: both results as text or JSON on stdout
//!
//! Logs go to stderr so stdout can be piped.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use linkrank::config::Config;
use linkrank::discovery::crawl;
use linkrank::rendering::{JsonReport, ReportFormat, TextReport};
use linkrank::{IterativeRanker, SamplingRanker};

/// PageRank for a directory of HTML pages
///
/// Ranks every page by random-surfer sampling and by power iteration and
/// prints both results.
///
/// Examples:
///   linkrank corpus0                     # Default damping and samples
///   linkrank corpus0 --samples 100000    # Longer walk, tighter estimate
///   linkrank corpus0 --seed 7 -f json    # Reproducible, machine-readable
#[derive(Parser, Debug)]
#[command(name = "linkrank")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Directory containing the .html pages
    #[arg(value_name = "CORPUS")]
    corpus: PathBuf,

    /// Probability of following a link instead of jumping (0 < d < 1)
    #[arg(short, long)]
    damping: Option<f64>,

    /// Number of pages the random surfer visits
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Seed for the random surfer
    ///
    /// Runs with the same seed produce the same sampling estimate.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// List pages by descending rank instead of by name
    #[arg(long)]
    by_rank: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = run(&cli)?;
    print!("{output}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("linkrank=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<String> {
    let mut config = Config::load(&cli.corpus).context("Failed to load configuration")?;
    if let Some(damping) = cli.damping {
        config.ranking.damping = damping;
    }
    if let Some(samples) = cli.samples {
        config.ranking.samples = samples;
    }
    if let Some(seed) = cli.seed {
        config.ranking.seed = Some(seed);
    }
    config.ranking.validate()?;
    info!("{}", config.display_summary());

    let graph = crawl(&cli.corpus)
        .with_context(|| format!("Failed to crawl corpus '{}'", cli.corpus.display()))?;
    info!(pages = graph.len(), links = graph.link_count(), "corpus loaded");

    let sampling = SamplingRanker::new(&config.ranking)
        .rank(&graph)
        .context("Sampling PageRank failed")?;
    let report = IterativeRanker::new(&config.ranking)
        .rank(&graph)
        .context("Iterative PageRank failed")?;
    info!(iterations = report.iterations, delta = report.delta, "ranking done");

    let output = match cli.format {
        ReportFormat::Text => {
            let color = !cli.no_color && std::io::stdout().is_terminal();
            let text = TextReport::new(color).by_rank(cli.by_rank);
            format!(
                "{}{}",
                text.render(
                    &format!(
                        "PageRank Results from Sampling (n = {})",
                        config.ranking.samples
                    ),
                    &sampling
                ),
                text.render("PageRank Results from Iteration", &report.ranks)
            )
        }
        ReportFormat::Json => {
            let json = JsonReport {
                damping: config.ranking.damping,
                samples: config.ranking.samples,
                sampling: &sampling,
                iteration: &report.ranks,
                iterations: report.iterations,
            };
            format!("{}\n", json.render()?)
        }
    };

    Ok(output)
}

use anyhow::{Context, Result};
use clap::Parser;
use link_rank::{estimate_both, page_rank::PageRankResult, Config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Rank the pages of an HTML corpus by sampling and by iteration.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory holding the `*.html` pages.
    corpus: PathBuf,

    /// TOML file with defaults for the options below.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    damping: Option<f64>,

    /// Length of the random walk.
    #[arg(long)]
    samples: Option<usize>,

    #[arg(long)]
    tolerance: Option<f64>,

    /// Give up iterating after this many passes.
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Seed the random walk for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(x) = self.damping {
            cfg.damping = x;
        }
        if let Some(x) = self.samples {
            cfg.samples = x;
        }
        if let Some(x) = self.tolerance {
            cfg.tolerance = x;
        }
        if self.max_iterations.is_some() {
            cfg.max_iterations = self.max_iterations;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LINK_RANK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("link_rank=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cfg = cli.config()?;

    let graph = link_rank::crawl(&cli.corpus)
        .with_context(|| format!("crawling {}", cli.corpus.display()))?;
    let (sampled, iterated) = estimate_both(&graph, &cfg)?;

    println!("PageRank Results from Sampling (n = {})", cfg.samples);
    print!("{:?}", sampled.debug());
    println!("PageRank Results from Iteration");
    print!("{:?}", iterated.debug());
    Ok(())
}

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use janitor::config::TrainingConfig;
use janitor::headless::TrainingEnv;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON configuration file (defaults to ./janitor.ron when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of generations to train
    #[arg(long)]
    generations: Option<usize>,

    /// Population size per generation
    #[arg(long)]
    population: Option<usize>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads for evaluation (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    /// Command-line flags take priority over file and environment settings
    fn apply(&self, config: &mut TrainingConfig) {
        if let Some(generations) = self.generations {
            config.run.generations = generations;
        }
        if let Some(population) = self.population {
            config.evolution.population_size = population;
        }
        if let Some(seed) = self.seed {
            config.run.seed = Some(seed);
        }
        if let Some(threads) = self.threads {
            config.run.threads = threads;
        }
        if self.no_progress {
            config.run.progress = false;
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = TrainingConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    if config.run.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.run.threads)
            .build_global()
            .context("Failed to configure worker threads")?;
        log::info!("Using {} worker threads", config.run.threads);
    }

    log::info!("Starting janitor training");

    let mut env = TrainingEnv::new(config)?;
    let summary = env.run()?;

    match &summary.champion {
        Some(champion) => println!(
            "Best fitness {} (generation {}) after {} generations",
            champion.fitness,
            champion.generation + 1,
            summary.generations
        ),
        None => println!("No generations were run"),
    }

    Ok(())
}

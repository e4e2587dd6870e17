//! Training environment for janitor evolution
//!
//! Main generation loop: evaluate the population in parallel on a shared map
//! template, record statistics, keep the champion, then select and breed.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use janitor_core::{Action, Cell, EpisodeState, JUNK_REWARD, Map, NUM_STATES};
use janitor_genetic::{
    Genome, GenomeFactory, PlayResult, Population, breed, create_population, evaluate_all, play,
    select,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::report::{format_runtime, generation_summary, replay};
use crate::config::TrainingConfig;

/// Statistics for one evaluated generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation index
    pub generation: usize,
    /// Individuals evaluated this generation
    pub population_size: usize,
    pub best_fitness: i64,
    pub average_fitness: f64,
    pub worst_fitness: i64,
    /// Fitness ceiling of the generation's map (all junk, no actions)
    pub max_possible: i64,
}

impl GenerationStats {
    /// Build statistics from ranked results (best first)
    pub fn from_ranked(generation: usize, ranked: &[PlayResult], junk: usize) -> Self {
        let total: i64 = ranked.iter().map(|r| r.fitness).sum();
        let average_fitness = if ranked.is_empty() {
            0.0
        } else {
            total as f64 / ranked.len() as f64
        };

        Self {
            generation,
            population_size: ranked.len(),
            best_fitness: ranked.first().map_or(0, |r| r.fitness),
            average_fitness,
            worst_fitness: ranked.last().map_or(0, |r| r.fitness),
            max_possible: junk as i64 * JUNK_REWARD,
        }
    }
}

/// Best genome of the most recently evaluated generation
///
/// Fitness is only comparable on the map it was earned on, so that map is
/// kept alongside the genome.
#[derive(Debug, Clone)]
pub struct Champion {
    pub genome: Genome<Action>,
    pub fitness: i64,
    pub generation: usize,
    pub map: Map,
}

/// Outcome of a finished training run
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub seed: u64,
    pub generations: usize,
    pub champion: Option<Champion>,
    pub elapsed: Duration,
}

/// Main training environment
pub struct TrainingEnv {
    /// Training configuration
    pub config: TrainingConfig,
    /// Seed the RNG was created from
    seed: u64,
    rng: Xoshiro256PlusPlus,
    factory: GenomeFactory<Action>,
    population: Population<Action>,
    /// Read-only template copied into every episode
    map: Map,
    /// Next generation to evaluate
    generation: usize,
    /// Statistics history
    pub stats_history: Vec<GenerationStats>,
    champion: Option<Champion>,
}

impl TrainingEnv {
    /// Create a new training environment with a random initial population
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.run.seed.unwrap_or_else(rand::random);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let factory = GenomeFactory::new(NUM_STATES, Action::ALL.to_vec())?;
        let population = create_population(config.evolution.population_size, &mut rng, &factory);
        let map = Map::generate(config.world.map_size, config.world.junk_probability, &mut rng)?;

        log::info!(
            "Seed {}: {} genomes of {} genes, {}x{} map with {} junk",
            seed,
            population.len(),
            factory.num_states(),
            map.size(),
            map.size(),
            map.count(Cell::Junk)
        );

        Ok(Self {
            config,
            seed,
            rng,
            factory,
            population,
            map,
            generation: 0,
            stats_history: Vec::new(),
            champion: None,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &Population<Action> {
        &self.population
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn champion(&self) -> Option<&Champion> {
        self.champion.as_ref()
    }

    fn start(&self) -> (i32, i32) {
        (self.config.world.start_x, self.config.world.start_y)
    }

    /// Create a progress bar style
    fn progress_style() -> Result<ProgressStyle> {
        Ok(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"))
    }

    /// Evaluate every individual once on the current map template
    fn evaluate_population(&self, pb: &ProgressBar) -> Result<Vec<PlayResult>> {
        let start = self.start();
        let actions_limit = self.config.world.actions_limit;

        evaluate_all(&self.population, |genome| {
            let mut episode = EpisodeState::new(&self.map, start, actions_limit)?;
            let fitness = play(genome, &mut episode)?;
            pb.inc(1);
            Ok::<_, anyhow::Error>(fitness)
        })
    }

    /// Evaluate, select and breed one generation
    pub fn step(&mut self, pb: &ProgressBar) -> Result<GenerationStats> {
        if self.generation > 0 && self.config.world.fresh_map_each_generation {
            self.map = Map::generate(
                self.config.world.map_size,
                self.config.world.junk_probability,
                &mut self.rng,
            )?;
        }

        let results = self.evaluate_population(pb)?;
        let stats = GenerationStats::from_ranked(self.generation, &results, self.map.count(Cell::Junk));

        if let Some(best) = results.first() {
            self.champion = Some(Champion {
                genome: self.population[best.individual].clone(),
                fitness: best.fitness,
                generation: self.generation,
                map: self.map.clone(),
            });
        }

        let selected = select(
            &mut self.rng,
            &self.population,
            &results,
            self.config.evolution.select_fraction,
        )?;
        self.population = breed(
            &mut self.rng,
            &selected,
            &self.config.evolution.breed_config(),
            &self.factory,
        )?;

        log::debug!(
            "Generation {}: {} selected, next population {}",
            self.generation,
            selected.len(),
            self.population.len()
        );

        self.stats_history.push(stats.clone());
        self.generation += 1;
        Ok(stats)
    }

    /// Run the full training loop
    pub fn run(&mut self) -> Result<TrainingSummary> {
        let generations = self.config.run.generations;
        let started = Instant::now();

        let pb = if self.config.run.progress {
            let pb = ProgressBar::new(
                (generations * self.config.evolution.population_size) as u64,
            );
            pb.set_style(Self::progress_style()?);
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };

        pb.println(format!(
            "Starting training: {} generations, {} population, seed {}",
            generations, self.config.evolution.population_size, self.seed
        ));

        for _ in 0..generations {
            let stats = self.step(&pb)?;
            // Bred populations may overshoot the target size
            pb.set_length(pb.position().max(pb.length().unwrap_or(0)));

            let summary = generation_summary(&stats, generations);
            log::info!("{}", summary.replace('\n', ", "));
            pb.println(summary);
        }

        let elapsed = started.elapsed();
        pb.finish_with_message("Training complete!");

        if let Some(champion) = &self.champion {
            log::info!(
                "Best genome (fitness {}, generation {}): {}",
                champion.fitness,
                champion.generation + 1,
                champion.genome
            );

            if log::log_enabled!(log::Level::Debug) {
                let frames = replay(
                    &champion.genome,
                    &champion.map,
                    self.start(),
                    self.config.world.actions_limit,
                )?;
                for frame in frames {
                    log::debug!("\n{}", frame);
                }
            }
        }
        log::info!("Runtime: {}", format_runtime(elapsed));

        Ok(TrainingSummary {
            seed: self.seed,
            generations: self.generation,
            champion: self.champion.clone(),
            elapsed,
        })
    }
}

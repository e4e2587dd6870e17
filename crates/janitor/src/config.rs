//! Training configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `janitor.ron` file (if exists), or the file given on the command line
//! 3. Environment variables prefixed with `JANITOR_`
//!
//! Example environment variable: `JANITOR_EVOLUTION__POPULATION_SIZE=500`

use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use config::{Config, Environment, File, FileFormat};
use janitor_genetic::{BreedConfig, MutationConfig};
use serde::{Deserialize, Serialize};

/// Main training configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TrainingConfig {
    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub evolution: EvolutionConfig,
}

/// Run length, seeding and execution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Number of generations to evolve
    pub generations: usize,
    /// RNG seed; a random seed is drawn and logged when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Worker threads for evaluation (0 = one per core)
    pub threads: usize,
    /// Show a progress bar while training
    pub progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            generations: 10,
            seed: None,
            threads: 0,
            progress: true,
        }
    }
}

/// Map and episode settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldConfig {
    /// Side length of the square map, border included
    pub map_size: usize,
    /// Chance for each interior cell to start as junk
    pub junk_probability: f32,
    pub start_x: i32,
    pub start_y: i32,
    /// Action budget per episode
    pub actions_limit: usize,
    /// Draw a new map for every generation instead of reusing the first
    pub fresh_map_each_generation: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            map_size: 10,
            junk_probability: 1.0 / 3.0,
            start_x: 1,
            start_y: 1,
            actions_limit: 100,
            fresh_map_each_generation: true,
        }
    }
}

/// Population and genetic operator settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Share of each generation kept as breeding pool
    pub select_fraction: f32,
    /// Share of the next generation filled with random genomes
    pub random_fraction: f32,
    pub mutation_probability: f32,
    /// Point mutations per child as a share of genome length
    pub mutation_magnitude: f32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            select_fraction: 0.1,
            random_fraction: 0.05,
            mutation_probability: 0.3,
            mutation_magnitude: 0.02,
        }
    }
}

impl EvolutionConfig {
    pub fn breed_config(&self) -> BreedConfig {
        BreedConfig {
            target_size: self.population_size,
            random_fraction: self.random_fraction,
            mutation: MutationConfig {
                probability: self.mutation_probability,
                magnitude: self.mutation_magnitude,
            },
        }
    }
}

impl TrainingConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path`, or an optional `janitor.ron` when no path is given
    /// 3. Environment variables prefixed with `JANITOR_` (highest priority)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("janitor")
                .format(FileFormat::Ron)
                .required(false),
        };

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("run.generations", 10_i64)?
            .set_default("run.threads", 0_i64)?
            .set_default("run.progress", true)?
            .set_default("world.map_size", 10_i64)?
            .set_default("world.junk_probability", 1.0 / 3.0)?
            .set_default("world.start_x", 1_i64)?
            .set_default("world.start_y", 1_i64)?
            .set_default("world.actions_limit", 100_i64)?
            .set_default("world.fresh_map_each_generation", true)?
            .set_default("evolution.population_size", 200_i64)?
            .set_default("evolution.select_fraction", 0.1)?
            .set_default("evolution.random_fraction", 0.05)?
            .set_default("evolution.mutation_probability", 0.3)?
            .set_default("evolution.mutation_magnitude", 0.02)?
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (JANITOR_RUN__GENERATIONS, etc.)
            .add_source(Environment::with_prefix("JANITOR").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Reject settings the simulation or the genetic engine cannot run with
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        ensure!(
            world.map_size >= 3,
            "world.map_size must be at least 3, got {}",
            world.map_size
        );
        let interior = 1..world.map_size as i32 - 1;
        ensure!(
            interior.contains(&world.start_x) && interior.contains(&world.start_y),
            "start position ({}, {}) is not inside the map border",
            world.start_x,
            world.start_y
        );

        let evolution = &self.evolution;
        ensure!(
            evolution.population_size > 0,
            "evolution.population_size must be positive"
        );
        for (name, value) in [
            ("world.junk_probability", world.junk_probability),
            ("evolution.select_fraction", evolution.select_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("{} must be within [0, 1], got {}", name, value);
            }
        }
        let survivors = (evolution.select_fraction * evolution.population_size as f32) as usize;
        ensure!(
            survivors > 0,
            "evolution.select_fraction {} keeps no individual out of {}",
            evolution.select_fraction,
            evolution.population_size
        );

        evolution
            .breed_config()
            .validate()
            .context("Invalid breeding settings")?;
        Ok(())
    }

    /// Pretty RON rendering of the effective configuration
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.run.generations, 10);
        assert_eq!(config.world.map_size, 10);
        assert_eq!(config.world.actions_limit, 100);
        assert_eq!(config.evolution.population_size, 200);
        assert!(config.run.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_with_defaults() {
        // Should load defaults when no config file exists
        let config = TrainingConfig::load(None).expect("Failed to load config");
        assert_eq!(config.world.map_size, 10);
        assert_eq!(config.evolution.population_size, 200);
        assert!((config.evolution.select_fraction - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = TrainingConfig::load(Some(Path::new("does/not/exist.ron")));
        assert!(result.is_err());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = TrainingConfig::default();
        config.run.seed = Some(7);

        let text = config.to_ron().unwrap();
        let parsed: TrainingConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_small_map() {
        let mut config = TrainingConfig::default();
        config.world.map_size = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_start_on_border() {
        let mut config = TrainingConfig::default();
        config.world.start_x = 0;
        assert!(config.validate().is_err());

        config.world.start_x = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_fractions() {
        let mut config = TrainingConfig::default();
        config.evolution.random_fraction = 1.5;
        assert!(config.validate().is_err());

        let mut config = TrainingConfig::default();
        config.evolution.mutation_probability = -0.1;
        assert!(config.validate().is_err());

        let mut config = TrainingConfig::default();
        config.world.junk_probability = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_breeding_pool() {
        let mut config = TrainingConfig::default();
        config.evolution.select_fraction = 0.001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_breed_config_mapping() {
        let config = EvolutionConfig::default();
        let breed = config.breed_config();
        assert_eq!(breed.target_size, 200);
        assert_eq!(breed.random_fraction, 0.05);
        assert_eq!(breed.mutation.probability, 0.3);
    }
}

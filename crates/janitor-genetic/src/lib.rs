//! Genetic algorithm engine for Genetic Janitor
//!
//! This crate implements:
//! - Lookup-table genomes mapping encoded states to actions
//! - Genome playback against any [`Episode`] implementation
//! - Population evaluation, noisy fitness-proportionate selection
//! - Single-point crossover, point mutation and elitist breeding
//!
//! Randomness is always passed in explicitly through [`RandomSource`].

pub mod breeding;
pub mod episode;
pub mod error;
pub mod genome;
pub mod population;
pub mod random;
pub mod traits;

// Re-export main types for convenience
pub use breeding::{BreedConfig, MutationConfig, breed, mate};
pub use episode::play;
pub use error::GeneticError;
pub use genome::{Genome, GenomeFactory};
pub use population::{PlayResult, Population, create_population, evaluate_all, rank, select};
pub use random::{RandomSource, SequenceRandom};
pub use traits::Episode;

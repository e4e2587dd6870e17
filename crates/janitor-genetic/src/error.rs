//! Errors reported by the genetic engine

use thiserror::Error;

/// Caller misuse detected by the genetic engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneticError {
    /// Selection or breeding was handed a pool with no individuals.
    #[error("population is empty")]
    EmptyPopulation,
    /// A fraction or probability outside `[0, 1]` (or NaN).
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidFraction { name: &'static str, value: f32 },
    /// Genome length does not match the state space it is used against.
    #[error("genome has {actual} genes but {expected} are required")]
    GenomeLengthMismatch { expected: usize, actual: usize },
    #[error("action set is empty")]
    EmptyActionSet,
}

pub(crate) fn check_fraction(name: &'static str, value: f32) -> Result<(), GeneticError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GeneticError::InvalidFraction { name, value })
    }
}

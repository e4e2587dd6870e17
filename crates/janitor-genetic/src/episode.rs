//! Genome playback
//!
//! Drives one genome through one episode until the episode reports
//! termination.

use crate::error::GeneticError;
use crate::genome::Genome;
use crate::traits::Episode;

/// Play `genome` in `episode` and return the final fitness
///
/// The genome must cover the episode's whole state space. A policy that never
/// accomplishes anything simply runs until the episode's action budget ends.
pub fn play<E: Episode>(genome: &Genome<E::Action>, episode: &mut E) -> Result<i64, GeneticError> {
    if genome.len() != episode.num_states() {
        return Err(GeneticError::GenomeLengthMismatch {
            expected: episode.num_states(),
            actual: genome.len(),
        });
    }

    while !episode.is_terminal() {
        let state = episode.encode_state();
        episode.apply_action(genome.action(state));
    }

    Ok(episode.fitness())
}

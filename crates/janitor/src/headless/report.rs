//! Text reporting for training runs
//!
//! Generation summaries, runtime formatting and step-by-step replays of a
//! genome. Nothing in here affects training results.

use std::time::Duration;

use anyhow::Result;
use janitor_core::{Action, EpisodeState, Map};
use janitor_genetic::{Episode, GeneticError, Genome};

use super::training_env::GenerationStats;

/// Format an integer with a space every three digits (`1234567` -> `1 234 567`)
pub fn format_thousands(number: u128) -> String {
    let digits = number.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Runtime in whole milliseconds with thousand separators
pub fn format_runtime(elapsed: Duration) -> String {
    format!("{} ms", format_thousands(elapsed.as_millis()))
}

/// Multi-line summary of one generation
pub fn generation_summary(stats: &GenerationStats, generations: usize) -> String {
    format!(
        "Generation: {}/{}\nAverage fitness: {:.1}\nBest fitness:    {}/{}\nWorst fitness:   {}",
        stats.generation + 1,
        generations,
        stats.average_fitness,
        stats.best_fitness,
        stats.max_possible,
        stats.worst_fitness
    )
}

/// Replay `genome` on `map` and render every step
///
/// The first frame is the starting position; one frame follows per action.
/// The genome must cover the whole state space.
pub fn replay(
    genome: &Genome<Action>,
    map: &Map,
    start: (i32, i32),
    actions_limit: usize,
) -> Result<Vec<String>> {
    let mut episode = EpisodeState::new(map, start, actions_limit)?;
    if genome.len() != episode.num_states() {
        return Err(GeneticError::GenomeLengthMismatch {
            expected: episode.num_states(),
            actual: genome.len(),
        }
        .into());
    }

    let mut frames = vec![episode.to_string()];

    while !episode.is_terminal() {
        let action = genome.action(episode.encode_state());
        episode.apply(action);
        frames.push(format!("{:?}\n{}", action, episode));
    }

    Ok(frames)
}

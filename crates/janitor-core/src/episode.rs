//! Janitor episode state
//!
//! One episode owns a private copy of the map, the agent position, the score
//! and the number of actions taken. Only `move_by` and `pickup` mutate it.

use std::fmt;

use janitor_genetic::Episode;

use crate::action::Action;
use crate::cell::Cell;
use crate::encoding::{NUM_STATES, encode_state};
use crate::error::CoreError;
use crate::map::Map;

/// Fitness awarded per collected junk cell
pub const JUNK_REWARD: i64 = 10;

#[derive(Debug, Clone)]
pub struct EpisodeState {
    map: Map,
    x: i32,
    y: i32,
    score: usize,
    max_score: usize,
    actions_performed: usize,
    actions_limit: usize,
}

impl EpisodeState {
    /// Start an episode on a copy of `template`
    ///
    /// The start must be a non-wall interior cell.
    pub fn new(template: &Map, start: (i32, i32), actions_limit: usize) -> Result<Self, CoreError> {
        let (x, y) = start;
        if !template.is_interior(x, y) || template.cell(x, y) == Cell::Wall {
            return Err(CoreError::InvalidStart { x, y });
        }

        Ok(Self {
            map: template.clone(),
            x,
            y,
            score: 0,
            max_score: template.count(Cell::Junk),
            actions_performed: 0,
            actions_limit,
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Junk on the map when the episode started
    pub fn max_score(&self) -> usize {
        self.max_score
    }

    pub fn actions_performed(&self) -> usize {
        self.actions_performed
    }

    /// Step by `(dx, dy)` unless the target is a wall
    ///
    /// Always costs one action. Returns whether the agent moved.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        self.actions_performed += 1;

        let (nx, ny) = (self.x + dx, self.y + dy);
        if self.map.cell(nx, ny) == Cell::Wall {
            return false;
        }

        self.x = nx;
        self.y = ny;
        true
    }

    /// Collect junk under the agent, if any
    ///
    /// Always costs one action.
    pub fn pickup(&mut self) {
        self.actions_performed += 1;

        if self.map.cell(self.x, self.y) == Cell::Junk {
            self.score += 1;
            self.map.set(self.x, self.y, Cell::Free);
        }
    }

    /// All junk collected or the action budget used up
    pub fn is_terminal(&self) -> bool {
        self.score == self.max_score || self.actions_performed >= self.actions_limit
    }

    /// `score * 10 - actions`; negative when little is collected
    pub fn fitness(&self) -> i64 {
        self.score as i64 * JUNK_REWARD - self.actions_performed as i64
    }

    pub fn apply(&mut self, action: Action) {
        match action.delta() {
            Some((dx, dy)) => {
                self.move_by(dx, dy);
            }
            None => self.pickup(),
        }
    }
}

impl Episode for EpisodeState {
    type Action = Action;

    fn num_states(&self) -> usize {
        NUM_STATES
    }

    fn is_terminal(&self) -> bool {
        EpisodeState::is_terminal(self)
    }

    fn encode_state(&self) -> usize {
        encode_state(&self.map, self.x, self.y)
    }

    fn apply_action(&mut self, action: Action) {
        self.apply(action);
    }

    fn fitness(&self) -> i64 {
        EpisodeState::fitness(self)
    }
}

impl fmt::Display for EpisodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Score: {}/{} Actions: {}",
            self.score, self.max_score, self.actions_performed
        )?;

        for (y, row) in self.map.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if (x as i32, y as i32) == (self.x, self.y) {
                    let agent = if *cell == Cell::Junk { '0' } else { 'O' };
                    write!(f, "{}", agent)?;
                } else {
                    write!(f, "{}", cell)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

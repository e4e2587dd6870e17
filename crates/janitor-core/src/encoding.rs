//! Fixed-radix encoding of the agent's surroundings
//!
//! The state id of a position is `sum(value[i] * 3^i)` over the cells
//! returned by [`Map::state_cells`] without diagonals: west, east, north,
//! south, self.

use crate::cell::Cell;
use crate::map::Map;

/// Diagonals are never part of the encoded neighborhood
pub const INCLUDE_DIAGONALS: bool = false;

/// Cells contributing to a state id
pub const STATE_CELLS: usize = 5;

/// Distinct state ids, and therefore the genome length
pub const NUM_STATES: usize = num_states(STATE_CELLS, Cell::COUNT);

/// Size of the state space for `cell_count` cells with `cell_values` values each
///
/// Depends only on the neighborhood, never on the number of actions.
pub const fn num_states(cell_count: usize, cell_values: usize) -> usize {
    cell_values.pow(cell_count as u32)
}

/// State id for an agent standing at `(x, y)`
pub fn encode_state(map: &Map, x: i32, y: i32) -> usize {
    map.state_cells(x, y, INCLUDE_DIAGONALS)
        .iter()
        .rev()
        .fold(0, |state, cell| state * Cell::COUNT + cell.value())
}

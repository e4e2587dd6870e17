//! Square grid map with a wall border
//!
//! Coordinates are `(x, y)` with `x` the column and `y` the row; storage is
//! row-major. Every border cell is a wall, so an agent that only moves one
//! step at a time from an interior cell never leaves the grid.

use std::fmt;

use janitor_genetic::RandomSource;
use smallvec::SmallVec;

use crate::cell::Cell;
use crate::error::CoreError;

/// Offsets in neighbor order: west, east, north, south, then the diagonals
/// north-east, south-east, south-west, north-west
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Smallest map that still has an interior cell
pub const MIN_MAP_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    size: usize,
    cells: Vec<Cell>,
}

impl Map {
    /// Map with a wall border and a free interior
    pub fn walled(size: usize) -> Result<Self, CoreError> {
        if size < MIN_MAP_SIZE {
            return Err(CoreError::MapTooSmall { size });
        }

        let mut cells = vec![Cell::Free; size * size];
        for y in 0..size {
            for x in 0..size {
                if Self::is_border(size, x, y) {
                    cells[y * size + x] = Cell::Wall;
                }
            }
        }

        Ok(Self { size, cells })
    }

    /// Generate a map whose interior cells are junk with `junk_probability`
    ///
    /// Draws one Bernoulli trial per interior cell, row by row.
    pub fn generate<R: RandomSource + ?Sized>(
        size: usize,
        junk_probability: f32,
        rng: &mut R,
    ) -> Result<Self, CoreError> {
        let mut map = Self::walled(size)?;

        for y in 1..size - 1 {
            for x in 1..size - 1 {
                if rng.should_happen(junk_probability) {
                    map.cells[y * size + x] = Cell::Junk;
                }
            }
        }

        log::trace!(
            "generated {}x{} map with {} junk",
            size,
            size,
            map.count(Cell::Junk)
        );
        Ok(map)
    }

    fn is_border(size: usize, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == size - 1 || y == size - 1
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    /// True for cells not on the wall border
    pub fn is_interior(&self, x: i32, y: i32) -> bool {
        x >= 1 && y >= 1 && (x as usize) < self.size - 1 && (y as usize) < self.size - 1
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.size + x as usize)
        } else {
            None
        }
    }

    /// Checked cell access
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Cell at `(x, y)`; panics when out of bounds
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        match self.index(x, y) {
            Some(idx) => self.cells[idx],
            None => panic!("cell ({}, {}) outside {}x{} map", x, y, self.size, self.size),
        }
    }

    /// Overwrite the cell at `(x, y)`; panics when out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        match self.index(x, y) {
            Some(idx) => self.cells[idx] = cell,
            None => panic!("cell ({}, {}) outside {}x{} map", x, y, self.size, self.size),
        }
    }

    /// Cells around `(x, y)` in [`NEIGHBOR_OFFSETS`] order
    pub fn neighbors(&self, x: i32, y: i32, include_diagonals: bool) -> SmallVec<[Cell; 9]> {
        let count = if include_diagonals { 8 } else { 4 };
        NEIGHBOR_OFFSETS[..count]
            .iter()
            .map(|&(dx, dy)| self.cell(x + dx, y + dy))
            .collect()
    }

    /// Neighbors followed by the cell at `(x, y)` itself
    ///
    /// This order defines the state encoding.
    pub fn state_cells(&self, x: i32, y: i32, include_diagonals: bool) -> SmallVec<[Cell; 9]> {
        let mut cells = self.neighbors(x, y, include_diagonals);
        cells.push(self.cell(x, y));
        cells
    }

    /// Number of cells of the given type
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

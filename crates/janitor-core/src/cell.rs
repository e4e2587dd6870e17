//! Cell types of the janitor grid

use std::fmt;

use serde::{Deserialize, Serialize};

/// Content of one grid cell
///
/// The discriminant is the cell's value in the state encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Free = 0,
    Wall = 1,
    Junk = 2,
}

impl Cell {
    /// Number of distinct cell types
    pub const COUNT: usize = 3;

    /// Value used by the state encoding
    #[inline]
    pub const fn value(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Free => ' ',
            Self::Wall => '#',
            Self::Junk => 'x',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

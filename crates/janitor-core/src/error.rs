//! Errors reported while setting up the grid world

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Maps need at least one interior cell inside the wall border.
    #[error("map size {size} is too small, need at least 3")]
    MapTooSmall { size: usize },
    /// Episodes must start on a walkable interior cell.
    #[error("invalid start position ({x}, {y})")]
    InvalidStart { x: i32, y: i32 },
}

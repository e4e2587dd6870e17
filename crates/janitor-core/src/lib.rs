//! Grid world for Genetic Janitor
//!
//! This crate provides:
//! - Map generation with a wall border and random junk
//! - Neighborhood extraction and the fixed-radix state encoding
//! - Episode state with bounded movement and pickup, implementing
//!   [`janitor_genetic::Episode`]

mod action;
mod cell;
pub mod encoding;
mod episode;
mod error;
pub mod map;

pub use action::Action;
pub use cell::Cell;
pub use encoding::{NUM_STATES, STATE_CELLS, encode_state, num_states};
pub use episode::{EpisodeState, JUNK_REWARD};
pub use error::CoreError;
pub use map::Map;

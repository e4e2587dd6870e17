//! # Janitor - evolving a grid-cleaning policy
//!
//! A janitor walks a walled grid picking up junk. Its policy is a genome that
//! maps every encoded neighborhood to an action, and a genetic algorithm
//! improves that policy over generations.

pub mod config;
pub mod headless;

//! Headless training for janitor evolution
//!
//! This module drives the genetic algorithm without any interactive surface:
//! - Generation loop with parallel evaluation
//! - Per-generation statistics and champion tracking
//! - Text reports and step-by-step replays

mod report;
mod training_env;

pub use report::{format_runtime, format_thousands, generation_summary, replay};
pub use training_env::{Champion, GenerationStats, TrainingEnv, TrainingSummary};

//! Episode trait for genome-environment interaction
//!
//! This trait defines the interface between a genome and the environment it
//! is evaluated in, keeping the genetic engine decoupled from any concrete
//! world implementation.

/// One running simulation that a genome can drive to termination
pub trait Episode {
    /// Action type stored in the genome
    type Action: Copy;

    /// Number of distinct state ids `encode_state` can produce
    fn num_states(&self) -> usize;

    /// True once the episode must not take further actions
    fn is_terminal(&self) -> bool;

    /// Encode the current situation as a state id in `[0, num_states)`
    fn encode_state(&self) -> usize;

    /// Apply one action; every call counts as one step
    fn apply_action(&mut self, action: Self::Action);

    /// Score of the episode so far (higher is better)
    fn fitness(&self) -> i64;
}

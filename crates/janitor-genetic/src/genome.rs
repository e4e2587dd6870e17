//! Lookup-table genome
//!
//! A genome maps every encoded state id to one action. Genomes are never
//! modified after construction: breeding and mutation always build a new one.

use std::fmt;

use crate::error::GeneticError;
use crate::random::RandomSource;

/// Fixed-length action table indexed by state id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genome<A> {
    genes: Vec<A>,
}

impl<A: Copy> Genome<A> {
    /// Sample one action uniformly from `actions` for each of `num_states` slots
    ///
    /// Panics when `actions` is empty and `num_states > 0`.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R, num_states: usize, actions: &[A]) -> Self {
        let genes = (0..num_states)
            .map(|_| actions[rng.random_int(actions.len())])
            .collect();
        Self { genes }
    }

    pub fn from_genes(genes: Vec<A>) -> Self {
        Self { genes }
    }

    /// Action chosen for `state_id`
    ///
    /// `state_id` must be below [`Genome::len`].
    #[inline]
    pub fn action(&self, state_id: usize) -> A {
        self.genes[state_id]
    }

    pub fn genes(&self) -> &[A] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl<A: fmt::Display> fmt::Display for Genome<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gene in &self.genes {
            write!(f, "{}", gene)?;
        }
        Ok(())
    }
}

/// Creates random genomes for a fixed state space and action set
///
/// Also supplies the action set used by point mutations.
#[derive(Debug, Clone)]
pub struct GenomeFactory<A> {
    num_states: usize,
    actions: Vec<A>,
}

impl<A: Copy> GenomeFactory<A> {
    pub fn new(num_states: usize, actions: Vec<A>) -> Result<Self, GeneticError> {
        if actions.is_empty() {
            return Err(GeneticError::EmptyActionSet);
        }
        Ok(Self {
            num_states,
            actions,
        })
    }

    pub fn create<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Genome<A> {
        Genome::random(rng, self.num_states, &self.actions)
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }
}

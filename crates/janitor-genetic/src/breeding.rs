//! Crossover, mutation and next-generation breeding

use serde::{Deserialize, Serialize};

use crate::error::{GeneticError, check_fraction};
use crate::genome::{Genome, GenomeFactory};
use crate::population::{Population, create_population};
use crate::random::RandomSource;

/// Point-mutation settings applied to each child
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Chance that a child is mutated at all
    pub probability: f32,
    /// Number of point mutations as a fraction of genome length (rounded)
    pub magnitude: f32,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            probability: 0.3,
            magnitude: 0.02,
        }
    }
}

impl MutationConfig {
    pub fn validate(&self) -> Result<(), GeneticError> {
        check_fraction("mutation_probability", self.probability)?;
        check_fraction("mutation_magnitude", self.magnitude)
    }

    /// Number of point mutations for a genome of `len` genes
    pub fn mutation_count(&self, len: usize) -> usize {
        (self.magnitude * len as f32).round() as usize
    }
}

/// Settings for building the next generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreedConfig {
    /// Population size the next generation should reach
    pub target_size: usize,
    /// Share of `target_size` filled with fresh random genomes
    pub random_fraction: f32,
    pub mutation: MutationConfig,
}

impl Default for BreedConfig {
    fn default() -> Self {
        Self {
            target_size: 200,
            random_fraction: 0.05,
            mutation: MutationConfig::default(),
        }
    }
}

impl BreedConfig {
    pub fn validate(&self) -> Result<(), GeneticError> {
        check_fraction("random_fraction", self.random_fraction)?;
        self.mutation.validate()
    }

    /// Number of fresh random genomes injected per generation
    pub fn random_count(&self) -> usize {
        (self.random_fraction * self.target_size as f32) as usize
    }
}

/// Single-point crossover with optional point mutations
///
/// The cut index is drawn from the middle third of the genome. The child
/// takes `mom` before the cut and `dad` from the cut on. Mutations may hit the
/// same slot more than once.
pub fn mate<A: Copy, R: RandomSource + ?Sized>(
    rng: &mut R,
    mom: &Genome<A>,
    dad: &Genome<A>,
    mutation: &MutationConfig,
    actions: &[A],
) -> Result<Genome<A>, GeneticError> {
    if mom.len() != dad.len() {
        return Err(GeneticError::GenomeLengthMismatch {
            expected: mom.len(),
            actual: dad.len(),
        });
    }
    if actions.is_empty() {
        return Err(GeneticError::EmptyActionSet);
    }

    let len = mom.len();
    let third = len / 3;
    let cut = if third == 0 {
        0
    } else {
        rng.random_int(third) + third
    };

    let mut genes = Vec::with_capacity(len);
    genes.extend_from_slice(&mom.genes()[..cut]);
    genes.extend_from_slice(&dad.genes()[cut..]);

    if rng.should_happen(mutation.probability) && len > 0 {
        for _ in 0..mutation.mutation_count(len) {
            let index = rng.random_int(len);
            genes[index] = actions[rng.random_int(actions.len())];
        }
    }

    Ok(Genome::from_genes(genes))
}

/// Build the next generation from the selected breeding pool
///
/// Output order is children, then fresh random genomes, then every selected
/// genome unchanged. Children are bred until the three groups together reach
/// `target_size`, so the result is never smaller than `target_size` and
/// exceeds it when random and selected genomes alone already do.
pub fn breed<A: Copy, R: RandomSource + ?Sized>(
    rng: &mut R,
    selected: &[Genome<A>],
    config: &BreedConfig,
    factory: &GenomeFactory<A>,
) -> Result<Population<A>, GeneticError> {
    config.validate()?;
    if selected.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }

    let num_random = config.random_count();
    let random = create_population(num_random, rng, factory);

    let mut next = Vec::with_capacity(config.target_size.max(num_random + selected.len()));
    while next.len() + num_random + selected.len() < config.target_size {
        let mom = &selected[rng.random_int(selected.len())];
        let dad = &selected[rng.random_int(selected.len())];
        next.push(mate(rng, mom, dad, &config.mutation, factory.actions())?);
    }

    log::trace!(
        "bred {} children, {} random, {} carried over",
        next.len(),
        random.len(),
        selected.len()
    );

    next.extend(random);
    next.extend_from_slice(selected);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn uniform(gene: char, len: usize) -> Genome<char> {
        Genome::from_genes(vec![gene; len])
    }

    const NO_MUTATION: MutationConfig = MutationConfig {
        probability: 0.0,
        magnitude: 0.0,
    };

    #[test]
    fn test_mate_splices_at_cut() {
        // cut = 1 % 3 + 3 = 4, then one draw for the mutation check
        let mut rng = SequenceRandom::new(vec![1, 50]);

        let child = mate(&mut rng, &uniform('a', 9), &uniform('b', 9), &NO_MUTATION, &['z']).unwrap();

        assert_eq!(child.to_string(), "aaaabbbbb");
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_mate_skips_mutation_at_zero_probability() {
        // cut = 0 + 3, then a mutation check draw of 0 that must not fire
        let mut rng = SequenceRandom::new(vec![0, 0, 0, 0]);
        let mutation = MutationConfig {
            probability: 0.0,
            magnitude: 1.0,
        };

        let child = mate(
            &mut rng,
            &uniform('a', 9),
            &uniform('b', 9),
            &mutation,
            &['x', 'y', 'z'],
        )
        .unwrap();

        assert_eq!(child.to_string(), "aaabbbbbb");
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_mate_applies_point_mutations() {
        let mut rng = SequenceRandom::new(vec![0, 0, 7, 2, 1, 2]);
        let mutation = MutationConfig {
            probability: 1.0,
            magnitude: 0.2,
        };

        let child = mate(
            &mut rng,
            &uniform('a', 9),
            &uniform('b', 9),
            &mutation,
            &['x', 'y', 'z'],
        )
        .unwrap();

        // cut 3, round(1.8) = 2 mutations at slots 7 and 1
        assert_eq!(child.to_string(), "azabbbbzb");
    }

    #[test]
    fn test_mate_cut_stays_in_middle_third() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let mom = Genome::from_genes(vec![0u8; 243]);
        let dad = Genome::from_genes(vec![1u8; 243]);

        for _ in 0..200 {
            let child = mate(&mut rng, &mom, &dad, &NO_MUTATION, &[0, 1]).unwrap();
            let cut = child.genes().iter().take_while(|&&g| g == 0).count();
            assert!((81..162).contains(&cut), "cut {}", cut);
            assert!(child.genes()[cut..].iter().all(|&g| g == 1));
        }
    }

    #[test]
    fn test_mate_rejects_length_mismatch() {
        let mut rng = SequenceRandom::constant(0);

        let result = mate(&mut rng, &uniform('a', 9), &uniform('b', 6), &NO_MUTATION, &['a']);
        assert_eq!(
            result,
            Err(GeneticError::GenomeLengthMismatch {
                expected: 9,
                actual: 6
            })
        );
    }

    #[test]
    fn test_mutation_count_rounds() {
        let mutation = MutationConfig {
            probability: 1.0,
            magnitude: 0.02,
        };
        assert_eq!(mutation.mutation_count(243), 5);
        assert_eq!(mutation.mutation_count(0), 0);
    }

    #[test]
    fn test_breed_reaches_target_size() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        let factory = GenomeFactory::new(30, vec!['a', 'b', 'c']).unwrap();
        let selected = create_population(20, &mut rng, &factory);
        let config = BreedConfig::default();

        let next = breed(&mut rng, &selected, &config, &factory).unwrap();

        assert_eq!(next.len(), 200);
        assert_eq!(&next[180..], &selected[..]);
        assert!(next.iter().all(|g| g.len() == 30));
    }

    #[test]
    fn test_breed_preserves_overshoot() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        let factory = GenomeFactory::new(12, vec![0u8, 1]).unwrap();
        let selected = create_population(8, &mut rng, &factory);
        let config = BreedConfig {
            target_size: 10,
            random_fraction: 0.5,
            mutation: MutationConfig::default(),
        };

        let next = breed(&mut rng, &selected, &config, &factory).unwrap();

        // 5 random + 8 selected, no children
        assert_eq!(next.len(), 13);
        assert_eq!(&next[5..], &selected[..]);
    }

    #[test]
    fn test_breed_without_random_injection() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);
        let factory = GenomeFactory::new(9, vec!['a', 'b']).unwrap();
        let selected = vec![uniform('a', 9), uniform('b', 9)];
        let config = BreedConfig {
            target_size: 6,
            random_fraction: 0.0,
            mutation: NO_MUTATION,
        };

        let next = breed(&mut rng, &selected, &config, &factory).unwrap();

        assert_eq!(next.len(), 6);
        // Every child gene comes from the parent at that slot
        for child in &next[..4] {
            assert!(child.genes().iter().all(|&g| g == 'a' || g == 'b'));
        }
    }

    #[test]
    fn test_breed_rejects_empty_pool() {
        let mut rng = SequenceRandom::constant(0);
        let factory = GenomeFactory::new(9, vec!['a']).unwrap();

        let result = breed(&mut rng, &[], &BreedConfig::default(), &factory);
        assert_eq!(result, Err(GeneticError::EmptyPopulation));
    }

    #[test]
    fn test_breed_is_deterministic() {
        let factory = GenomeFactory::new(243, vec![0u8, 1, 2, 3, 4]).unwrap();

        let run = |seed: u64| {
            let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
            let selected = create_population(10, &mut rng, &factory);
            breed(&mut rng, &selected, &BreedConfig::default(), &factory).unwrap()
        };

        assert_eq!(run(77), run(77));
    }
}

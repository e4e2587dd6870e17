//! Population creation, evaluation and selection

use rayon::prelude::*;

use crate::error::{GeneticError, check_fraction};
use crate::genome::{Genome, GenomeFactory};
use crate::random::RandomSource;

/// Ordered collection of genomes; the vector index identifies the individual
pub type Population<A> = Vec<Genome<A>>;

/// Fitness of one individual after its episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayResult {
    /// Index of the individual in the evaluated population
    pub individual: usize,
    pub fitness: i64,
}

/// Create `size` independent random genomes (duplicates allowed)
pub fn create_population<A: Copy, R: RandomSource + ?Sized>(
    size: usize,
    rng: &mut R,
    factory: &GenomeFactory<A>,
) -> Population<A> {
    (0..size).map(|_| factory.create(rng)).collect()
}

/// Evaluate every individual in parallel and rank the results
///
/// Results are sorted by fitness descending; equal fitness keeps the lower
/// individual index first. The evaluator must build its own episode state for
/// each call.
pub fn evaluate_all<A, F, E>(population: &[Genome<A>], evaluator: F) -> Result<Vec<PlayResult>, E>
where
    A: Sync,
    F: Fn(&Genome<A>) -> Result<i64, E> + Sync,
    E: Send,
{
    let mut results: Vec<PlayResult> = population
        .par_iter()
        .enumerate()
        .map(|(individual, genome)| {
            evaluator(genome).map(|fitness| PlayResult {
                individual,
                fitness,
            })
        })
        .collect::<Result<_, E>>()?;

    rank(&mut results);
    Ok(results)
}

/// Sort results by fitness descending, ties by individual index ascending
pub fn rank(results: &mut [PlayResult]) {
    results.sort_by(|a, b| {
        b.fitness
            .cmp(&a.fitness)
            .then(a.individual.cmp(&b.individual))
    });
}

/// Noisy fitness-proportionate selection
///
/// Every result's fitness is shifted to be strictly positive and multiplied
/// by a random weight in steps of 1/100 over `[0, 0.99]`. The
/// `floor(fraction * len)` best weighted scores survive. Equal weighted scores
/// keep the order of `ranked`.
pub fn select<A: Clone, R: RandomSource + ?Sized>(
    rng: &mut R,
    population: &[Genome<A>],
    ranked: &[PlayResult],
    fraction: f32,
) -> Result<Population<A>, GeneticError> {
    check_fraction("select_fraction", fraction)?;
    if ranked.is_empty() || population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }

    let lowest = ranked.iter().map(|r| r.fitness).min().unwrap_or(0);
    let floor = lowest.min(0) - 1;

    let mut weighted: Vec<(i64, usize)> = ranked
        .iter()
        .map(|result| {
            let weight = rng.random_int(100) as i64;
            ((result.fitness - floor) * weight / 100, result.individual)
        })
        .collect();

    // Stable: equal scores stay in rank order
    weighted.sort_by(|a, b| b.0.cmp(&a.0));

    let count = ((fraction * ranked.len() as f32) as usize).min(ranked.len());
    log::trace!("selected {} of {} individuals", count, ranked.len());

    Ok(weighted
        .iter()
        .take(count)
        .map(|&(_, individual)| population[individual].clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    /// Population of single-gene genomes whose gene equals its index
    fn indexed_population(size: usize) -> Population<usize> {
        (0..size).map(|i| Genome::from_genes(vec![i])).collect()
    }

    fn ranked_by_gene(population: &Population<usize>) -> Vec<PlayResult> {
        evaluate_all(population, |g| Ok::<_, GeneticError>(g.action(0) as i64)).unwrap()
    }

    #[test]
    fn test_create_population_size() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let factory = GenomeFactory::new(243, vec![0u8, 1, 2, 3, 4]).unwrap();

        let population = create_population(200, &mut rng, &factory);

        assert_eq!(population.len(), 200);
        assert!(population.iter().all(|g| g.len() == 243));
    }

    #[test]
    fn test_evaluate_all_sorted_descending() {
        let population = indexed_population(10);
        let results = ranked_by_gene(&population);

        assert_eq!(results.len(), 10);
        assert_eq!(results[0].individual, 9);
        assert_eq!(results[9].individual, 0);
        assert!(results.windows(2).all(|w| w[0].fitness >= w[1].fitness));
    }

    #[test]
    fn test_evaluate_all_ties_by_index() {
        let population = indexed_population(6);
        let results =
            evaluate_all(&population, |g| Ok::<_, GeneticError>((g.action(0) % 2) as i64)).unwrap();

        let order: Vec<usize> = results.iter().map(|r| r.individual).collect();
        assert_eq!(order, vec![1, 3, 5, 0, 2, 4]);
    }

    #[test]
    fn test_evaluate_all_propagates_error() {
        let population = indexed_population(4);
        let result = evaluate_all(&population, |g| {
            if g.action(0) == 2 {
                Err(GeneticError::EmptyPopulation)
            } else {
                Ok(0)
            }
        });

        assert_eq!(result, Err(GeneticError::EmptyPopulation));
    }

    #[test]
    fn test_select_returns_floor_of_fraction() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let population = indexed_population(10);
        let results = ranked_by_gene(&population);

        for (fraction, expected) in [(0.1, 1), (0.25, 2), (0.5, 5), (0.99, 9), (1.0, 10)] {
            let selected = select(&mut rng, &population, &results, fraction).unwrap();
            assert_eq!(selected.len(), expected, "fraction {}", fraction);
        }
    }

    #[test]
    fn test_select_zero_fraction_is_empty() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let population = indexed_population(10);
        let results = ranked_by_gene(&population);

        let selected = select(&mut rng, &population, &results, 0.0).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn test_select_rejects_empty_results() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let population = indexed_population(3);

        let result = select(&mut rng, &population, &[], 0.5);
        assert_eq!(result, Err(GeneticError::EmptyPopulation));
    }

    #[test]
    fn test_select_rejects_invalid_fraction() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let population = indexed_population(3);
        let results = ranked_by_gene(&population);

        assert!(matches!(
            select(&mut rng, &population, &results, 1.5),
            Err(GeneticError::InvalidFraction { .. })
        ));
        assert!(matches!(
            select(&mut rng, &population, &results, f32::NAN),
            Err(GeneticError::InvalidFraction { .. })
        ));
    }

    #[test]
    fn test_select_equal_weights_keep_rank_order() {
        // Weight 0 for everyone: all scores tie, order falls back to ranking
        let mut rng = SequenceRandom::constant(0);
        let population = indexed_population(5);
        let results = ranked_by_gene(&population);

        let selected = select(&mut rng, &population, &results, 0.6).unwrap();
        let genes: Vec<usize> = selected.iter().map(|g| g.action(0)).collect();
        assert_eq!(genes, vec![4, 3, 2]);
    }

    #[test]
    fn test_select_low_performer_can_win() {
        // Ranked order is 4, 3, 2, 1, 0; only the worst gets a nonzero weight
        let mut rng = SequenceRandom::new(vec![0, 0, 0, 0, 99]);
        let population = indexed_population(5);
        let results = evaluate_all(&population, |g| {
            Ok::<_, GeneticError>(10 + g.action(0) as i64)
        })
        .unwrap();

        let selected = select(&mut rng, &population, &results, 0.2).unwrap();
        assert_eq!(selected[0].action(0), 0);
    }

    #[test]
    fn test_select_handles_negative_fitness() {
        let mut rng = SequenceRandom::constant(50);
        let population = indexed_population(4);
        let results = evaluate_all(&population, |g| {
            Ok::<_, GeneticError>(-100 + g.action(0) as i64)
        })
        .unwrap();

        // floor = -101, shifted values 1..4 scaled by 0.5 -> 0, 1, 1, 2
        let selected = select(&mut rng, &population, &results, 0.5).unwrap();
        let genes: Vec<usize> = selected.iter().map(|g| g.action(0)).collect();
        assert_eq!(genes, vec![3, 2]);
    }

    #[test]
    fn test_select_favours_fitter_individuals() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(2024);
        let population = indexed_population(100);
        let results = ranked_by_gene(&population);

        let mut total = 0usize;
        for _ in 0..50 {
            let selected = select(&mut rng, &population, &results, 0.1).unwrap();
            total += selected.iter().map(|g| g.action(0)).sum::<usize>();
        }

        // Uniform picks would average 49.5 per survivor
        let average = total as f32 / (50.0 * 10.0);
        assert!(average > 60.0, "average gene {}", average);
    }
}

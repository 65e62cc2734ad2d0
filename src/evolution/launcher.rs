use rayon::prelude::*;
use tracing::{debug, trace};

use super::options::OptimizerOptions;
use crate::{
    cart::CartLine,
    catalog::CatalogIndex,
    error::{OptionExt, Result, SourcingError},
    fitness::{CostSummary, FitnessEvaluator, FreightPolicy, Objective},
    generator::random_solution_from_offers,
    rng::RandomNumberGenerator,
    selection::{ElitistSelection, SelectionStrategy, TournamentSelection},
    solution::Solution,
};

/// Outcome of one genetic search.
#[derive(Debug, Clone)]
pub struct EvolutionResult<'a> {
    /// The cheapest solution of the final population.
    pub solution: Solution<'a>,
    /// Cost breakdown of `solution`.
    pub summary: CostSummary,
    /// Best score after each generation; index 0 is the initial population.
    pub history: Vec<f64>,
}

/// Runs a genetic search for the cheapest assignment of cart lines to suppliers.
///
/// One run seeds a random population, then for a fixed number of generations
/// selects parents by binary tournament, pairs them for single-point crossover,
/// mutates each child with a small probability and keeps the best individuals
/// of parents and children combined.
#[derive(Debug, Clone)]
pub struct GeneticOptimizer<O = FitnessEvaluator>
where
    O: Objective,
{
    objective: O,
    selection: TournamentSelection,
    survival: ElitistSelection,
}

impl GeneticOptimizer<FitnessEvaluator> {
    /// Optimizer for the standard cost model with the given freight policy.
    pub fn with_freight(freight: FreightPolicy) -> Self {
        Self::new(FitnessEvaluator::new(freight))
    }
}

impl Default for GeneticOptimizer<FitnessEvaluator> {
    fn default() -> Self {
        Self::with_freight(FreightPolicy::default())
    }
}

impl<O> GeneticOptimizer<O>
where
    O: Objective,
{
    /// Creates a new `GeneticOptimizer` minimizing `objective`.
    pub fn new(objective: O) -> Self {
        Self {
            objective,
            selection: TournamentSelection::default(),
            survival: ElitistSelection::new(),
        }
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Evolves a population of solutions for `cart` over `options.get_generations()` generations.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The cart is empty
    /// - The options are invalid for the cart (see [`OptimizerOptions::validate`])
    /// - A cart line names a product no supplier carries
    /// - The objective produces a non-finite score
    ///
    /// All of the first three are reported before any population is built.
    ///
    /// # Performance
    ///
    /// Populations at or above the options' parallel threshold are scored in
    /// parallel using Rayon's parallel iterator.
    pub fn evolve<'a>(
        &self,
        options: &OptimizerOptions,
        cart: &'a [CartLine],
        index: &CatalogIndex<'a>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult<'a>> {
        if cart.is_empty() {
            return Err(SourcingError::EmptyCart);
        }
        options.validate(cart.len())?;
        let offers = index.offers_for(cart)?;

        let population_size = options.get_population_size();
        let crossover = options.crossover_enabled(cart.len());

        debug!(
            lines = cart.len(),
            population_size,
            generations = options.get_generations(),
            crossover,
            "Starting genetic search"
        );

        let mut population = (0..population_size)
            .map(|_| random_solution_from_offers(cart, &offers, rng))
            .collect::<Result<Vec<_>>>()?;
        let mut costs = self.score_all(&population, options)?;

        let mut history = Vec::with_capacity(options.get_generations() + 1);
        history.push(costs.iter().copied().fold(f64::INFINITY, f64::min));

        for generation in 0..options.get_generations() {
            let parents = self.selection.select(&costs, population_size, Some(&mut *rng))?;

            let mut children = Vec::with_capacity(population_size);
            for pair in parents.chunks_exact(2) {
                let (first, second) = (&population[pair[0]], &population[pair[1]]);
                if crossover {
                    let cut = rng.gen_index_inclusive(1, cart.len() - 1);
                    let (child1, child2) = first.crossover(second, cut)?;
                    children.push(child1);
                    children.push(child2);
                } else {
                    children.push(first.clone());
                    children.push(second.clone());
                }
            }

            for child in &mut children {
                if rng.chance(options.get_mutation_rate()) {
                    child.mutate(&offers, rng)?;
                }
            }

            let child_costs = self.score_all(&children, options)?;

            // Parents first, so equal costs keep the incumbent.
            population.extend(children);
            costs.extend(child_costs);

            let survivors = self.survival.select(&costs, population_size, None)?;
            let mut pool: Vec<Option<Solution<'a>>> = population.into_iter().map(Some).collect();
            population = survivors
                .iter()
                .map(|&idx| {
                    pool[idx].take().ok_or_else_sourcing(|| {
                        SourcingError::Other(format!("Survivor {} selected twice", idx))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            costs = survivors.iter().map(|&idx| costs[idx]).collect();

            let best = costs.first().copied().ok_or_else_sourcing(|| SourcingError::EmptyPopulation)?;
            history.push(best);

            trace!(generation, best, "Generation complete");
        }

        let best_idx = self
            .survival
            .select(&costs, 1, None)?
            .first()
            .copied()
            .ok_or_else_sourcing(|| SourcingError::EmptyPopulation)?;
        let solution = population.swap_remove(best_idx);
        let summary = self.objective.evaluate(&solution);

        debug!(
            grand_total = summary.grand_total,
            suppliers = solution.suppliers().len(),
            "Genetic search finished"
        );

        Ok(EvolutionResult {
            solution,
            summary,
            history,
        })
    }

    /// Scores every solution, in parallel for large populations.
    fn score_all(&self, population: &[Solution<'_>], options: &OptimizerOptions) -> Result<Vec<f64>> {
        let check = |score: f64| {
            if score.is_finite() {
                Ok(score)
            } else {
                Err(SourcingError::FitnessCalculation(format!(
                    "Non-finite fitness score encountered: {}",
                    score
                )))
            }
        };

        if population.len() >= options.get_parallel_threshold() {
            population
                .par_iter()
                .map(|solution| check(self.objective.score(solution)))
                .collect()
        } else {
            population
                .iter()
                .map(|solution| check(self.objective.score(solution)))
                .collect()
        }
    }
}

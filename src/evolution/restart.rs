//! # Restarts
//!
//! A single genetic search is noisy. `RestartController` runs several fully
//! independent searches and keeps the cheapest result. Runs share nothing but
//! the read-only cart and catalog.
//!
//! Every run gets its own generator, spawned up-front from the caller's, so a
//! seeded controller returns the same result whether the runs execute one after
//! another or concurrently on the rayon pool.

use rayon::prelude::*;
use tracing::info;

use super::launcher::{EvolutionResult, GeneticOptimizer};
use super::options::{OptimizerOptions, RestartOptions};
use crate::{
    cart::CartLine,
    catalog::CatalogIndex,
    error::{OptionExt, Result, SourcingError},
    fitness::{FitnessEvaluator, FreightPolicy, Objective},
    rng::RandomNumberGenerator,
};

/// Outcome of a repeated search.
#[derive(Debug, Clone)]
pub struct RestartResult<'a> {
    /// The cheapest result over all runs; the earliest run wins ties.
    pub best: EvolutionResult<'a>,
    /// Final grand total of every run, in run order.
    pub run_costs: Vec<f64>,
}

/// Runs a [`GeneticOptimizer`] several times and keeps the global best.
#[derive(Debug, Clone)]
pub struct RestartController<O = FitnessEvaluator>
where
    O: Objective,
{
    optimizer: GeneticOptimizer<O>,
}

impl RestartController<FitnessEvaluator> {
    /// Controller around the standard cost model with the given freight policy.
    pub fn with_freight(freight: FreightPolicy) -> Self {
        Self::new(GeneticOptimizer::with_freight(freight))
    }
}

impl Default for RestartController<FitnessEvaluator> {
    fn default() -> Self {
        Self::with_freight(FreightPolicy::default())
    }
}

impl<O> RestartController<O>
where
    O: Objective,
{
    pub fn new(optimizer: GeneticOptimizer<O>) -> Self {
        Self { optimizer }
    }

    pub fn optimizer(&self) -> &GeneticOptimizer<O> {
        &self.optimizer
    }

    /// Executes `restart.get_runs()` independent searches.
    ///
    /// # Errors
    ///
    /// Fails before any search if the options are invalid, the cart is empty or
    /// a product is unknown. If any run fails the whole call fails and no
    /// partial best is returned.
    pub fn run<'a>(
        &self,
        options: &OptimizerOptions,
        restart: &RestartOptions,
        cart: &'a [CartLine],
        index: &CatalogIndex<'a>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<RestartResult<'a>> {
        restart.validate()?;
        if cart.is_empty() {
            return Err(SourcingError::EmptyCart);
        }
        options.validate(cart.len())?;
        index.offers_for(cart)?;

        let streams: Vec<RandomNumberGenerator> =
            (0..restart.get_runs()).map(|_| rng.spawn()).collect();

        let results: Vec<EvolutionResult<'a>> = if restart.is_parallel() {
            streams
                .into_par_iter()
                .map(|mut stream| self.optimizer.evolve(options, cart, index, &mut stream))
                .collect::<Result<Vec<_>>>()?
        } else {
            streams
                .into_iter()
                .map(|mut stream| self.optimizer.evolve(options, cart, index, &mut stream))
                .collect::<Result<Vec<_>>>()?
        };

        let run_costs: Vec<f64> = results.iter().map(|r| r.summary.grand_total).collect();

        let mut best: Option<EvolutionResult<'a>> = None;
        for result in results {
            let improves = best
                .as_ref()
                .map_or(true, |b| result.summary.grand_total < b.summary.grand_total);
            if improves {
                best = Some(result);
            }
        }
        let best = best.ok_or_else_sourcing(|| SourcingError::EmptyPopulation)?;

        info!(
            runs = restart.get_runs(),
            parallel = restart.is_parallel(),
            best = best.summary.grand_total,
            worst = run_costs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            "Repeated search finished"
        );

        Ok(RestartResult { best, run_costs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Supplier;

    fn suppliers() -> Vec<Supplier> {
        vec![
            Supplier::new("A", 1.0)
                .unwrap()
                .with_product("milk", 2.0)
                .unwrap()
                .with_product("eggs", 4.0)
                .unwrap()
                .with_product("jam", 3.0)
                .unwrap(),
            Supplier::new("B", 0.5)
                .unwrap()
                .with_product("milk", 2.5)
                .unwrap()
                .with_product("eggs", 3.0)
                .unwrap()
                .with_product("jam", 3.5)
                .unwrap(),
            Supplier::new("C", 2.0)
                .unwrap()
                .with_product("eggs", 1.5)
                .unwrap()
                .with_product("jam", 1.0)
                .unwrap(),
        ]
    }

    fn cart() -> Vec<CartLine> {
        ["milk", "eggs", "jam", "milk"]
            .iter()
            .map(|p| CartLine::single(*p).unwrap())
            .collect()
    }

    #[test]
    fn test_best_is_minimum_of_runs() {
        let suppliers = suppliers();
        let cart = cart();
        let index = CatalogIndex::new(&suppliers);
        let options = OptimizerOptions::new(4, 3);

        let result = RestartController::with_freight(FreightPolicy::PerAssignment)
            .run(
                &options,
                &RestartOptions::new(6),
                &cart,
                &index,
                &mut RandomNumberGenerator::from_seed(17),
            )
            .unwrap();

        assert_eq!(result.run_costs.len(), 6);
        let min = result.run_costs.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(result.best.summary.grand_total, min);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let suppliers = suppliers();
        let cart = cart();
        let index = CatalogIndex::new(&suppliers);
        let options = OptimizerOptions::new(6, 10);
        let controller = RestartController::with_freight(FreightPolicy::PerSupplier);
        assert_eq!(
            controller.optimizer().objective().freight_policy(),
            FreightPolicy::PerSupplier
        );

        let sequential = controller
            .run(
                &options,
                &RestartOptions::new(5),
                &cart,
                &index,
                &mut RandomNumberGenerator::from_seed(23),
            )
            .unwrap();
        let parallel = controller
            .run(
                &options,
                &RestartOptions::new(5).with_parallel(true),
                &cart,
                &index,
                &mut RandomNumberGenerator::from_seed(23),
            )
            .unwrap();

        assert_eq!(sequential.run_costs, parallel.run_costs);
        assert_eq!(sequential.best.solution, parallel.best.solution);
    }

    #[test]
    fn test_rejects_zero_runs() {
        let suppliers = suppliers();
        let cart = cart();
        let index = CatalogIndex::new(&suppliers);

        let result = RestartController::with_freight(FreightPolicy::PerAssignment).run(
            &OptimizerOptions::default(),
            &RestartOptions::new(0),
            &cart,
            &index,
            &mut RandomNumberGenerator::from_seed(1),
        );
        assert!(matches!(result, Err(SourcingError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_unknown_product_aborts_all_runs() {
        let suppliers = suppliers();
        let index = CatalogIndex::new(&suppliers);
        let cart = vec![
            CartLine::single("milk").unwrap(),
            CartLine::single("truffle").unwrap(),
        ];

        let result = RestartController::with_freight(FreightPolicy::PerAssignment).run(
            &OptimizerOptions::default(),
            &RestartOptions::default().with_parallel(true),
            &cart,
            &index,
            &mut RandomNumberGenerator::from_seed(1),
        );
        assert!(matches!(result, Err(SourcingError::UnknownProduct(p)) if p == "truffle"));
    }
}

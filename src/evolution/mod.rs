//! # Evolution
//!
//! The genetic search and its restart wrapper.
//!
//! [`optimize`] runs one search with the default cost model, [`best_of`] runs
//! several and keeps the cheapest. Both build a [`CatalogIndex`] for the given
//! suppliers. Use [`GeneticOptimizer`] or [`RestartController`] directly for a
//! custom [`Objective`](crate::fitness::Objective), a non-default freight policy,
//! or access to the per-generation history.
//!
//! ## Example
//!
//! ```rust
//! use sourcing::cart::CartLine;
//! use sourcing::catalog::Supplier;
//! use sourcing::evolution::{best_of, OptimizerOptions, RestartOptions};
//! use sourcing::rng::RandomNumberGenerator;
//!
//! # fn main() -> sourcing::Result<()> {
//! let suppliers = vec![
//!     Supplier::new("A", 5.0)?.with_product("milk", 2.0)?,
//!     Supplier::new("B", 3.0)?
//!         .with_product("milk", 2.5)?
//!         .with_product("bread", 1.0)?,
//! ];
//! let cart = vec![CartLine::single("milk")?, CartLine::single("bread")?];
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let solution = best_of(
//!     &cart,
//!     &suppliers,
//!     &OptimizerOptions::new(10, 20),
//!     &RestartOptions::new(3),
//!     &mut rng,
//! )?;
//!
//! assert_eq!(solution.suppliers(), vec!["B"]);
//! # Ok(())
//! # }
//! ```

pub mod launcher;
pub mod options;
pub mod restart;

pub use launcher::{EvolutionResult, GeneticOptimizer};
pub use options::{Crossover, OptimizerOptions, OptimizerOptionsBuilder, RestartOptions};
pub use restart::{RestartController, RestartResult};

use crate::{
    cart::CartLine,
    catalog::{CatalogIndex, Supplier},
    error::Result,
    fitness::FreightPolicy,
    rng::RandomNumberGenerator,
    solution::Solution,
};

/// Runs a single genetic search and returns the cheapest solution it found.
///
/// # Errors
///
/// See [`GeneticOptimizer::evolve`].
pub fn optimize<'a>(
    cart: &'a [CartLine],
    suppliers: &'a [Supplier],
    options: &OptimizerOptions,
    rng: &mut RandomNumberGenerator,
) -> Result<Solution<'a>> {
    let index = CatalogIndex::new(suppliers);
    GeneticOptimizer::with_freight(FreightPolicy::default())
        .evolve(options, cart, &index, rng)
        .map(|result| result.solution)
}

/// Runs `restart.get_runs()` independent searches and returns the cheapest
/// solution across all of them.
///
/// # Errors
///
/// See [`RestartController::run`].
pub fn best_of<'a>(
    cart: &'a [CartLine],
    suppliers: &'a [Supplier],
    options: &OptimizerOptions,
    restart: &RestartOptions,
    rng: &mut RandomNumberGenerator,
) -> Result<Solution<'a>> {
    let index = CatalogIndex::new(suppliers);
    RestartController::with_freight(FreightPolicy::default())
        .run(options, restart, cart, &index, rng)
        .map(|result| result.best.solution)
}

pub mod cart;
pub mod catalog;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod generator;
pub mod loader;
pub mod report;
pub mod rng;
pub mod selection;
pub mod solution;

// Re-export commonly used types for convenience
pub use cart::{CartLine, Quantity};
pub use catalog::{CatalogIndex, Offer, Supplier};
pub use error::{OptionExt, Result, ResultExt, SourcingError};
pub use evolution::{best_of, optimize, OptimizerOptions, RestartOptions};
pub use fitness::{cost, CostSummary, FitnessEvaluator, FreightPolicy, Objective};
pub use solution::{Assignment, Solution};

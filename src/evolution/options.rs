//! # Options
//!
//! `OptimizerOptions` configures a single genetic search, `RestartOptions` the
//! repeated-search wrapper around it.
//!
//! ## Example
//!
//! ```rust
//! use sourcing::evolution::options::{Crossover, OptimizerOptions, RestartOptions};
//!
//! // Defaults: population 50, 100 generations, mutation rate 0.1
//! let default_options = OptimizerOptions::default();
//! assert_eq!(default_options.get_population_size(), 50);
//!
//! let custom = OptimizerOptions::builder()
//!     .population_size(20)
//!     .generations(40)
//!     .mutation_rate(0.2)
//!     .crossover(Crossover::SinglePoint)
//!     .build();
//! assert!(custom.validate(3).is_ok());
//! assert!(custom.validate(1).is_err());
//!
//! let restarts = RestartOptions::new(5).with_parallel(true);
//! assert_eq!(restarts.get_runs(), 5);
//! ```

use crate::error::{Result, SourcingError};

/// Crossover operator applied to consecutive parent pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crossover {
    /// Single-point crossover when the cart has at least two lines; a cart of
    /// one line has no cut point, so children start as copies of their parents.
    #[default]
    Auto,
    /// Always single-point crossover. Carts shorter than two lines are rejected.
    SinglePoint,
    /// Children start as copies of their parents; only mutation changes them.
    Disabled,
}

#[derive(Debug, Clone)]
pub struct OptimizerOptions {
    population_size: usize,
    generations: usize,
    mutation_rate: f64,
    crossover: Crossover,
    /// Minimum population size evaluated in parallel
    parallel_threshold: usize,
}

impl OptimizerOptions {
    pub fn new(population_size: usize, generations: usize) -> Self {
        Self {
            population_size,
            generations,
            ..Self::default()
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_generations(&self) -> usize {
        self.generations
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_crossover(&self) -> Crossover {
        self.crossover
    }

    /// Returns the minimum population size evaluated in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the number of generations.
    pub fn set_generations(&mut self, generations: usize) {
        self.generations = generations;
    }

    /// Sets the per-child mutation probability.
    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    /// Sets the crossover operator.
    pub fn set_crossover(&mut self, crossover: Crossover) {
        self.crossover = crossover;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Whether children of a cart with `cart_len` lines are produced by crossover.
    pub fn crossover_enabled(&self, cart_len: usize) -> bool {
        match self.crossover {
            Crossover::Auto => cart_len >= 2,
            Crossover::SinglePoint => true,
            Crossover::Disabled => false,
        }
    }

    /// Checks the options against a cart of `cart_len` lines.
    ///
    /// # Errors
    ///
    /// Returns `SourcingError::InvalidConfiguration` if the population size is
    /// odd or below 2, the mutation rate is outside `[0, 1]`, or single-point
    /// crossover is forced on a cart shorter than two lines.
    pub fn validate(&self, cart_len: usize) -> Result<()> {
        if self.population_size < 2 {
            return Err(SourcingError::InvalidConfiguration(format!(
                "Population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.population_size % 2 != 0 {
            return Err(SourcingError::InvalidConfiguration(format!(
                "Population size must be even to pair parents, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SourcingError::InvalidConfiguration(format!(
                "Mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.crossover == Crossover::SinglePoint && cart_len < 2 {
            return Err(SourcingError::InvalidConfiguration(format!(
                "Single-point crossover needs at least 2 cart lines, got {}",
                cart_len
            )));
        }
        Ok(())
    }

    /// Returns a builder for creating an `OptimizerOptions` instance.
    pub fn builder() -> OptimizerOptionsBuilder {
        OptimizerOptionsBuilder::default()
    }
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.1,
            crossover: Crossover::Auto,
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `OptimizerOptions`.
#[derive(Debug, Clone, Default)]
pub struct OptimizerOptionsBuilder {
    population_size: Option<usize>,
    generations: Option<usize>,
    mutation_rate: Option<f64>,
    crossover: Option<Crossover>,
    parallel_threshold: Option<usize>,
}

impl OptimizerOptionsBuilder {
    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the number of generations.
    pub fn generations(mut self, value: usize) -> Self {
        self.generations = Some(value);
        self
    }

    /// Sets the per-child mutation probability.
    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    /// Sets the crossover operator.
    pub fn crossover(mut self, value: Crossover) -> Self {
        self.crossover = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `OptimizerOptions` instance. Unset fields take their defaults.
    pub fn build(self) -> OptimizerOptions {
        let default = OptimizerOptions::default();
        OptimizerOptions {
            population_size: self.population_size.unwrap_or(default.population_size),
            generations: self.generations.unwrap_or(default.generations),
            mutation_rate: self.mutation_rate.unwrap_or(default.mutation_rate),
            crossover: self.crossover.unwrap_or(default.crossover),
            parallel_threshold: self.parallel_threshold.unwrap_or(default.parallel_threshold),
        }
    }
}

/// How many independent searches to run and whether to run them concurrently.
#[derive(Debug, Clone)]
pub struct RestartOptions {
    runs: usize,
    parallel: bool,
}

impl RestartOptions {
    pub fn new(runs: usize) -> Self {
        Self {
            runs,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn get_runs(&self) -> usize {
        self.runs
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(SourcingError::InvalidConfiguration(
                "At least one run is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RestartOptions {
    fn default() -> Self {
        Self::new(10)
    }
}

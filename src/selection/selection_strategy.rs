use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies of the optimizer.
///
/// A strategy picks individuals from a scored population and returns their
/// indices, so callers decide whether to clone or move the chosen solutions.
/// All strategies minimize: a lower cost is better.
///
/// # Examples
///
/// ```
/// use sourcing::selection::{ElitistSelection, SelectionStrategy};
/// use sourcing::error::Result;
///
/// fn main() -> Result<()> {
///     let costs = vec![9.5, 6.5, 11.0];
///
///     let selection = ElitistSelection::new();
///     let selected = selection.select(&costs, 2, None)?;
///
///     assert_eq!(selected, vec![1, 0]);
///
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects `num_to_select` individuals given the cost of each one.
    ///
    /// # Arguments
    ///
    /// * `costs` - The cost of every individual, indexed like the population.
    /// * `num_to_select` - The number of individuals to select.
    /// * `rng` - Random number generator for strategies that draw at random.
    ///   If a strategy requires randomness but `rng` is `None`, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The selection requires randomness but `rng` is `None`
    fn select(
        &self,
        costs: &[f64],
        num_to_select: usize,
        rng: Option<&mut RandomNumberGenerator>,
    ) -> Result<Vec<usize>>;
}

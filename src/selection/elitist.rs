use std::cmp::Ordering;

use crate::error::{Result, SourcingError};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that keeps the cheapest individuals.
///
/// Individuals are sorted by ascending cost with a stable sort, so among equal
/// costs the one appearing first in the pool survives first. NaN costs sort
/// last. This is the survivor rule of the optimizer: parents and children are
/// pooled and the best `population_size` of them form the next generation.
///
/// # Examples
///
/// ```
/// use sourcing::selection::{ElitistSelection, SelectionStrategy};
/// use sourcing::error::Result;
///
/// fn main() -> Result<()> {
///     let costs = vec![0.5, 0.8, 0.3, 0.3];
///
///     let selection = ElitistSelection::new();
///     let selected = selection.select(&costs, 3, None)?;
///
///     assert_eq!(selected, vec![2, 3, 0]);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElitistSelection;

impl ElitistSelection {
    pub fn new() -> Self {
        Self
    }
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| {
        if a.is_nan() && b.is_nan() {
            Ordering::Equal
        } else if a.is_nan() {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    })
}

impl SelectionStrategy for ElitistSelection {
    fn select(
        &self,
        costs: &[f64],
        num_to_select: usize,
        _rng: Option<&mut RandomNumberGenerator>,
    ) -> Result<Vec<usize>> {
        if costs.is_empty() {
            return Err(SourcingError::EmptyPopulation);
        }

        let mut indexed: Vec<usize> = (0..costs.len()).collect();
        indexed.sort_by(|&a, &b| ascending(costs[a], costs[b]));
        indexed.truncate(num_to_select);

        Ok(indexed)
    }
}

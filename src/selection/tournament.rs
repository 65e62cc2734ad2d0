use crate::error::{OptionExt, Result, SourcingError};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that picks parents through tournaments.
///
/// Each tournament samples `tournament_size` individuals uniformly at random
/// with replacement and keeps the cheapest one. Ties go to the individual drawn
/// first. The process is repeated once per requested parent, so the same
/// individual may be selected several times.
///
/// The default is a binary tournament.
///
/// # Examples
///
/// ```
/// use sourcing::rng::RandomNumberGenerator;
/// use sourcing::selection::{SelectionStrategy, TournamentSelection};
/// use sourcing::error::Result;
///
/// fn main() -> Result<()> {
///     let costs = vec![9.5, 6.5, 11.0, 7.0];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let selection = TournamentSelection::default();
///     let parents = selection.select(&costs, 4, Some(&mut rng))?;
///
///     assert_eq!(parents.len(), 4);
///     assert!(parents.iter().all(|&i| i < costs.len()));
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(SourcingError::InvalidConfiguration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament(&self, costs: &[f64], rng: &mut RandomNumberGenerator) -> usize {
        let mut best_idx = rng.gen_index(costs.len());

        for _ in 1..self.tournament_size {
            let idx = rng.gen_index(costs.len());
            if costs[idx] < costs[best_idx] {
                best_idx = idx;
            }
        }

        best_idx
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 2 }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(
        &self,
        costs: &[f64],
        num_to_select: usize,
        rng: Option<&mut RandomNumberGenerator>,
    ) -> Result<Vec<usize>> {
        if costs.is_empty() {
            return Err(SourcingError::EmptyPopulation);
        }

        let rng = rng.ok_or_else_sourcing(|| {
            SourcingError::InvalidConfiguration(
                "Tournament selection requires a random number generator".to_string(),
            )
        })?;

        Ok((0..num_to_select)
            .map(|_| self.run_tournament(costs, rng))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_selection() {
        let costs = vec![0.5, 0.8, 0.3, 0.9, 0.1];
        let mut rng = RandomNumberGenerator::from_seed(1);

        let selection = TournamentSelection::default();
        let selected = selection.select(&costs, 10, Some(&mut rng)).unwrap();

        assert_eq!(selected.len(), 10);
        assert!(selected.iter().all(|&i| i < costs.len()));
    }

    #[test]
    fn test_binary_tournament_prefers_cheaper() {
        let costs = vec![1.0, 5.0];
        let mut rng = RandomNumberGenerator::from_seed(7);

        let selection = TournamentSelection::default();
        let selected = selection.select(&costs, 200, Some(&mut rng)).unwrap();

        // Index 1 only wins when it is drawn twice: about a quarter of the time.
        let worst = selected.iter().filter(|&&i| i == 1).count();
        assert!(worst < 100);
        assert!(selected.contains(&0));
    }

    #[test]
    fn test_ties_go_to_the_first_drawn() {
        let costs = vec![2.0, 2.0, 2.0];
        let selection = TournamentSelection::default();

        let mut draws = RandomNumberGenerator::from_seed(99);
        let mut replay = draws.clone();

        let winner = selection.run_tournament(&costs, &mut draws);
        let first_drawn = replay.gen_index(costs.len());
        assert_eq!(winner, first_drawn);
    }

    #[test]
    fn test_tournament_of_whole_population_size_favours_best() {
        let costs = vec![0.5, 0.8, 0.3, 0.9, 0.1];
        let mut rng = RandomNumberGenerator::from_seed(3);

        let selection = TournamentSelection::new(200).unwrap();
        let selected = selection.select(&costs, 20, Some(&mut rng)).unwrap();

        assert!(selected.iter().all(|&i| i == 4));
    }

    #[test]
    fn test_tournament_selection_empty_population() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let selection = TournamentSelection::default();

        let result = selection.select(&[], 3, Some(&mut rng));
        assert!(matches!(result, Err(SourcingError::EmptyPopulation)));
    }

    #[test]
    fn test_tournament_selection_requires_rng() {
        let selection = TournamentSelection::default();
        assert!(selection.select(&[1.0, 2.0], 1, None).is_err());
    }

    #[test]
    fn test_tournament_selection_invalid_size() {
        assert!(TournamentSelection::new(0).is_err());
        assert_eq!(TournamentSelection::new(3).unwrap().tournament_size(), 3);
    }
}

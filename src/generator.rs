//! # Solution Generator
//!
//! Draws random valid solutions. Every line picks its supplier uniformly and
//! independently of the other lines; consolidating suppliers is left to
//! crossover and mutation.

use crate::cart::CartLine;
use crate::catalog::{CatalogIndex, Offer};
use crate::error::{Result, SourcingError};
use crate::rng::RandomNumberGenerator;
use crate::solution::{Assignment, Solution};

/// Draws one random solution for `cart` from the suppliers in `index`.
///
/// # Errors
///
/// Returns `SourcingError::UnknownProduct` if a cart line has no eligible supplier.
pub fn random_solution<'a>(
    cart: &'a [CartLine],
    index: &CatalogIndex<'a>,
    rng: &mut RandomNumberGenerator,
) -> Result<Solution<'a>> {
    let offers = index.offers_for(cart)?;
    random_solution_from_offers(cart, &offers, rng)
}

/// Same as [`random_solution`] with the per-line offers already resolved.
///
/// `offers[i]` holds the eligible offers of `cart[i]`.
pub fn random_solution_from_offers<'a>(
    cart: &'a [CartLine],
    offers: &[&[Offer<'a>]],
    rng: &mut RandomNumberGenerator,
) -> Result<Solution<'a>> {
    if offers.len() != cart.len() {
        return Err(SourcingError::Other(format!(
            "Expected offers for {} cart lines, got {}",
            cart.len(),
            offers.len()
        )));
    }

    let assignments = cart
        .iter()
        .zip(offers)
        .map(|(line, candidates)| {
            if candidates.is_empty() {
                return Err(SourcingError::UnknownProduct(line.product().to_string()));
            }
            let offer = candidates[rng.gen_index(candidates.len())];
            Ok(Assignment::new(line, offer))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Solution::new(assignments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Supplier;

    fn suppliers() -> Vec<Supplier> {
        vec![
            Supplier::new("A", 5.0).unwrap().with_product("milk", 2.0).unwrap(),
            Supplier::new("B", 3.0)
                .unwrap()
                .with_product("milk", 2.5)
                .unwrap()
                .with_product("bread", 1.0)
                .unwrap(),
        ]
    }

    #[test]
    fn test_random_solution_is_valid() {
        let suppliers = suppliers();
        let index = CatalogIndex::new(&suppliers);
        let cart = vec![
            CartLine::single("milk").unwrap(),
            CartLine::single("bread").unwrap(),
        ];
        let mut rng = RandomNumberGenerator::from_seed(1);

        for _ in 0..20 {
            let solution = random_solution(&cart, &index, &mut rng).unwrap();
            assert_eq!(solution.len(), cart.len());
            assert_eq!(solution.assignments()[1].supplier.name(), "B");
            for assignment in solution.assignments() {
                assert_eq!(
                    assignment.supplier.price_of(assignment.line.product()),
                    Some(assignment.unit_price)
                );
            }
        }
    }

    #[test]
    fn test_random_solution_explores_all_offers() {
        let suppliers = suppliers();
        let index = CatalogIndex::new(&suppliers);
        let cart = vec![CartLine::single("milk").unwrap()];
        let mut rng = RandomNumberGenerator::from_seed(2);

        let picked: std::collections::HashSet<&str> = (0..50)
            .map(|_| {
                let solution = random_solution(&cart, &index, &mut rng).unwrap();
                let supplier: &Supplier = solution.assignments()[0].supplier;
                supplier.name()
            })
            .collect();

        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_random_solution_unknown_product() {
        let suppliers = suppliers();
        let index = CatalogIndex::new(&suppliers);
        let cart = vec![
            CartLine::single("milk").unwrap(),
            CartLine::single("caviar").unwrap(),
        ];
        let mut rng = RandomNumberGenerator::from_seed(3);

        let result = random_solution(&cart, &index, &mut rng);
        assert!(matches!(result, Err(SourcingError::UnknownProduct(p)) if p == "caviar"));
    }

    #[test]
    fn test_mismatched_offers_rejected() {
        let cart = vec![CartLine::single("milk").unwrap()];
        let mut rng = RandomNumberGenerator::from_seed(4);

        assert!(random_solution_from_offers(&cart, &[], &mut rng).is_err());
    }
}

//! # Fitness
//!
//! The `Objective` trait scores a solution; lower grand totals are better.
//! `FitnessEvaluator` is the cost model used by the optimizer: the sum of the
//! chosen unit prices plus the shipping fees incurred.
//!
//! How shipping fees are incurred is governed by [`FreightPolicy`]. The default,
//! `PerAssignment`, charges a supplier's fee once for every line assigned to it.
//! This reproduces the established behaviour even though it penalises
//! consolidation; `PerSupplier` charges each distinct supplier once.
//!
//! ## Example
//!
//! ```rust
//! use sourcing::cart::CartLine;
//! use sourcing::catalog::{CatalogIndex, Supplier};
//! use sourcing::fitness::{cost, FitnessEvaluator, FreightPolicy, Objective};
//! use sourcing::solution::{Assignment, Solution};
//!
//! let suppliers = vec![Supplier::new("B", 3.0)
//!     .unwrap()
//!     .with_product("milk", 2.5)
//!     .unwrap()
//!     .with_product("bread", 1.0)
//!     .unwrap()];
//! let cart = vec![CartLine::single("milk").unwrap(), CartLine::single("bread").unwrap()];
//! let index = CatalogIndex::new(&suppliers);
//!
//! let solution = Solution::new(
//!     cart.iter()
//!         .map(|line| Assignment::new(line, index.eligible_suppliers(line.product()).unwrap()[0]))
//!         .collect(),
//! );
//!
//! assert_eq!(cost(&solution).grand_total, 9.5);
//! let deduplicated = FitnessEvaluator::new(FreightPolicy::PerSupplier).evaluate(&solution);
//! assert_eq!(deduplicated.grand_total, 6.5);
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::catalog::Supplier;
use crate::solution::Solution;

/// How shipping fees accumulate over a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreightPolicy {
    /// Every assignment pays its supplier's fee, even if the supplier repeats.
    #[default]
    PerAssignment,
    /// Each distinct supplier used pays its fee once.
    PerSupplier,
}

/// Item, freight and grand totals of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostSummary {
    pub items_total: f64,
    pub freight_total: f64,
    pub grand_total: f64,
}

impl fmt::Display for CostSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "items {:.2} + freight {:.2} = {:.2}",
            self.items_total, self.freight_total, self.grand_total
        )
    }
}

/// Scores solutions for the optimizer. Lower `grand_total` is better.
pub trait Objective: Send + Sync {
    fn evaluate(&self, solution: &Solution<'_>) -> CostSummary;

    /// Scalar fitness used for ranking.
    fn score(&self, solution: &Solution<'_>) -> f64 {
        self.evaluate(solution).grand_total
    }
}

/// Prices plus shipping fees under a chosen [`FreightPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FitnessEvaluator {
    freight: FreightPolicy,
}

impl FitnessEvaluator {
    pub fn new(freight: FreightPolicy) -> Self {
        Self { freight }
    }

    pub fn freight_policy(&self) -> FreightPolicy {
        self.freight
    }
}

impl Objective for FitnessEvaluator {
    fn evaluate(&self, solution: &Solution<'_>) -> CostSummary {
        let assignments = solution.assignments();
        let items_total: f64 = assignments.iter().map(|a| a.unit_price).sum();

        let freight_total: f64 = match self.freight {
            FreightPolicy::PerAssignment => {
                assignments.iter().map(|a| a.supplier.shipping_fee()).sum()
            }
            FreightPolicy::PerSupplier => {
                let mut charged: HashSet<*const Supplier> = HashSet::new();
                assignments
                    .iter()
                    .filter(|a| charged.insert(a.supplier as *const Supplier))
                    .map(|a| a.supplier.shipping_fee())
                    .sum()
            }
        };

        CostSummary {
            items_total,
            freight_total,
            grand_total: items_total + freight_total,
        }
    }
}

/// Cost of `solution` under the default (per-assignment) freight policy.
pub fn cost(solution: &Solution<'_>) -> CostSummary {
    FitnessEvaluator::default().evaluate(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::solution::Assignment;

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

    fn cart() -> Vec<CartLine> {
        vec![
            CartLine::single("milk").unwrap(),
            CartLine::single("bread").unwrap(),
        ]
    }

    fn assign<'a>(cart: &'a [CartLine], picks: &[&'a Supplier]) -> Solution<'a> {
        Solution::new(
            cart.iter()
                .zip(picks)
                .map(|(line, &supplier)| Assignment {
                    line,
                    supplier,
                    unit_price: supplier.price_of(line.product()).unwrap(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_per_assignment_counts_fee_per_line() {
        let suppliers = suppliers();
        let cart = cart();

        let b_only = assign(&cart, &[&suppliers[1], &suppliers[1]]);
        let summary = cost(&b_only);
        assert_eq!(summary.items_total, 3.5);
        assert_eq!(summary.freight_total, 6.0);
        assert_eq!(summary.grand_total, 9.5);

        let split = assign(&cart, &[&suppliers[0], &suppliers[1]]);
        assert_eq!(cost(&split).grand_total, 11.0);
    }

    #[test]
    fn test_per_supplier_counts_fee_once() {
        let suppliers = suppliers();
        let cart = cart();
        let evaluator = FitnessEvaluator::new(FreightPolicy::PerSupplier);

        let b_only = assign(&cart, &[&suppliers[1], &suppliers[1]]);
        assert_eq!(evaluator.evaluate(&b_only).grand_total, 6.5);

        let split = assign(&cart, &[&suppliers[0], &suppliers[1]]);
        let summary = evaluator.evaluate(&split);
        assert_eq!(summary.freight_total, 8.0);
        assert_eq!(summary.grand_total, 11.0);
    }

    #[test]
    fn test_per_supplier_charges_same_named_suppliers_separately() {
        let suppliers = vec![
            Supplier::new("Feira", 4.0).unwrap().with_product("milk", 2.0).unwrap(),
            Supplier::new("Feira", 6.0).unwrap().with_product("bread", 1.0).unwrap(),
        ];
        let cart = cart();
        let solution = assign(&cart, &[&suppliers[0], &suppliers[1]]);

        let summary = FitnessEvaluator::new(FreightPolicy::PerSupplier).evaluate(&solution);
        assert_eq!(summary.freight_total, 10.0);
        assert_eq!(summary.grand_total, 13.0);
    }

    #[test]
    fn test_cost_is_deterministic() {
        let suppliers = suppliers();
        let cart = cart();
        let solution = assign(&cart, &[&suppliers[0], &suppliers[1]]);

        assert_eq!(cost(&solution), cost(&solution));
        assert_eq!(
            FitnessEvaluator::default().score(&solution),
            cost(&solution).grand_total
        );
    }

    #[test]
    fn test_empty_solution_costs_nothing() {
        let summary = cost(&Solution::new(Vec::new()));
        assert_eq!(summary, CostSummary::default());
    }

    #[test]
    fn test_summary_display() {
        let summary = CostSummary {
            items_total: 3.5,
            freight_total: 3.0,
            grand_total: 6.5,
        };
        assert_eq!(summary.to_string(), "items 3.50 + freight 3.00 = 6.50");
    }
}

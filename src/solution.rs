//! # Solution
//!
//! A `Solution` assigns exactly one supplier to every cart line, in cart order.
//! It borrows the cart and the suppliers, so the input data is never touched
//! by the search and can be shared freely between concurrent runs.
//!
//! The genetic operators live here too: single-point crossover swaps the tails
//! of two solutions, point mutation re-draws the supplier of one line.

use std::collections::HashSet;
use std::fmt;

use crate::cart::CartLine;
use crate::catalog::{Offer, Supplier};
use crate::error::{Result, SourcingError};
use crate::rng::RandomNumberGenerator;

/// One cart line sourced from one supplier at the price copied from its catalog.
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a> {
    pub line: &'a CartLine,
    pub supplier: &'a Supplier,
    pub unit_price: f64,
}

impl<'a> Assignment<'a> {
    pub fn new(line: &'a CartLine, offer: Offer<'a>) -> Self {
        Self {
            line,
            supplier: offer.supplier,
            unit_price: offer.unit_price,
        }
    }
}

impl PartialEq for Assignment<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.line, other.line)
            && std::ptr::eq(self.supplier, other.supplier)
            && self.unit_price == other.unit_price
    }
}

/// A candidate assignment of suppliers to all cart lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<'a> {
    assignments: Vec<Assignment<'a>>,
}

impl<'a> Solution<'a> {
    pub fn new(assignments: Vec<Assignment<'a>>) -> Self {
        Self { assignments }
    }

    pub fn assignments(&self) -> &[Assignment<'a>] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Names of the distinct suppliers used, in order of first appearance.
    pub fn suppliers(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.assignments
            .iter()
            .map(|a| a.supplier.name())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Produces two children by exchanging the assignments from `cut` onwards.
    ///
    /// `child1 = self[..cut] + other[cut..]`, `child2 = other[..cut] + self[cut..]`.
    ///
    /// # Errors
    ///
    /// Returns `SourcingError::InvalidConfiguration` if the parents differ in
    /// length or `cut` is not an inner position.
    pub fn crossover(&self, other: &Self, cut: usize) -> Result<(Self, Self)> {
        if self.len() != other.len() {
            return Err(SourcingError::InvalidConfiguration(format!(
                "Cannot cross solutions of length {} and {}",
                self.len(),
                other.len()
            )));
        }
        if cut == 0 || cut >= self.len() {
            return Err(SourcingError::InvalidConfiguration(format!(
                "Cut point {} is outside 1..{}",
                cut,
                self.len()
            )));
        }

        let (head1, tail1) = self.assignments.split_at(cut);
        let (head2, tail2) = other.assignments.split_at(cut);

        let child1 = head1.iter().chain(tail2).copied().collect();
        let child2 = head2.iter().chain(tail1).copied().collect();

        Ok((Self::new(child1), Self::new(child2)))
    }

    /// Replaces the supplier of the line at `position` with `offer`.
    pub fn reassign(&mut self, position: usize, offer: Offer<'a>) -> Result<()> {
        let assignment = self.assignments.get_mut(position).ok_or_else(|| {
            SourcingError::Other(format!("Position {} is outside the solution", position))
        })?;
        *assignment = Assignment::new(assignment.line, offer);
        Ok(())
    }

    /// Picks one line uniformly and re-draws its supplier uniformly from `offers`.
    ///
    /// `offers[i]` must hold the eligible offers of line `i`. The new supplier
    /// may coincide with the previous one.
    pub fn mutate(&mut self, offers: &[&[Offer<'a>]], rng: &mut RandomNumberGenerator) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        let position = rng.gen_index(self.len());
        let candidates = offers
            .get(position)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                SourcingError::UnknownProduct(self.assignments[position].line.product().to_string())
            })?;
        let offer = candidates[rng.gen_index(candidates.len())];

        self.reassign(position, offer)
    }
}

impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for assignment in &self.assignments {
            writeln!(
                f,
                "{:<30} {:>10} {:<24} {:>10.2}",
                assignment.line.product(),
                assignment.line.quantity().to_string(),
                assignment.supplier.name(),
                assignment.unit_price
            )?;
        }
        Ok(())
    }
}

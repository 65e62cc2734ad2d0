//! # Catalog
//!
//! Suppliers and the index answering "who sells this product, and for how much".
//!
//! ## Example
//!
//! ```rust
//! use sourcing::catalog::{CatalogIndex, Supplier};
//!
//! let suppliers = vec![
//!     Supplier::new("A", 5.0).unwrap().with_product("milk", 2.0).unwrap(),
//!     Supplier::new("B", 3.0)
//!         .unwrap()
//!         .with_product("milk", 2.5)
//!         .unwrap()
//!         .with_product("bread", 1.0)
//!         .unwrap(),
//! ];
//!
//! let index = CatalogIndex::new(&suppliers);
//! assert_eq!(index.eligible_suppliers("milk").unwrap().len(), 2);
//! assert_eq!(index.eligible_suppliers("bread").unwrap()[0].supplier.name(), "B");
//! assert!(index.eligible_suppliers("eggs").is_err());
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::cart::CartLine;
use crate::error::{Result, SourcingError};

/// An entity offering a priced catalog of products plus one flat shipping fee.
///
/// Fee and prices are validated on insertion and the supplier is never mutated
/// by the optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    name: String,
    shipping_fee: f64,
    catalog: HashMap<String, f64>,
}

fn ensure_amount(what: &str, owner: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SourcingError::InvalidSupplier(format!(
            "{} of '{}' must be a non-negative number, got {}",
            what, owner, value
        )));
    }
    Ok(())
}

impl Supplier {
    /// Creates a supplier with an empty catalog.
    pub fn new(name: impl Into<String>, shipping_fee: f64) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(SourcingError::InvalidSupplier(
                "Supplier name cannot be empty".to_string(),
            ));
        }
        ensure_amount("Shipping fee", &name, shipping_fee)?;

        Ok(Self {
            name,
            shipping_fee,
            catalog: HashMap::new(),
        })
    }

    /// Adds (or replaces) a product listing, builder style.
    pub fn with_product(mut self, product: impl Into<String>, unit_price: f64) -> Result<Self> {
        self.insert_product(product, unit_price)?;
        Ok(self)
    }

    /// Adds (or replaces) a product listing and returns the price it replaced.
    pub fn insert_product(
        &mut self,
        product: impl Into<String>,
        unit_price: f64,
    ) -> Result<Option<f64>> {
        let product = product.into().trim().to_string();
        if product.is_empty() {
            return Err(SourcingError::InvalidSupplier(format!(
                "Product name listed by '{}' cannot be empty",
                self.name
            )));
        }
        ensure_amount(&format!("Price of '{}'", product), &self.name, unit_price)?;

        Ok(self.catalog.insert(product, unit_price))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shipping_fee(&self) -> f64 {
        self.shipping_fee
    }

    /// Unit price of `product`, if this supplier carries it.
    pub fn price_of(&self, product: &str) -> Option<f64> {
        self.catalog.get(product).copied()
    }

    /// Iterates over `(product, unit_price)` listings in no particular order.
    pub fn products(&self) -> impl Iterator<Item = (&str, f64)> {
        self.catalog.iter().map(|(name, price)| (name.as_str(), *price))
    }
}

/// One supplier's offer for a product.
#[derive(Debug, Clone, Copy)]
pub struct Offer<'a> {
    pub supplier: &'a Supplier,
    pub unit_price: f64,
}

/// Maps each product name to the suppliers carrying it.
///
/// Offers for a product keep the order of the supplier slice the index was
/// built from, which keeps seeded runs reproducible.
#[derive(Debug, Clone)]
pub struct CatalogIndex<'a> {
    offers: HashMap<&'a str, Vec<Offer<'a>>>,
}

impl<'a> CatalogIndex<'a> {
    /// Builds the index with a single scan over all supplier catalogs.
    pub fn new(suppliers: &'a [Supplier]) -> Self {
        let mut offers: HashMap<&'a str, Vec<Offer<'a>>> = HashMap::new();

        for supplier in suppliers {
            for (product, unit_price) in supplier.products() {
                offers
                    .entry(product)
                    .or_default()
                    .push(Offer { supplier, unit_price });
            }
        }

        debug!(
            suppliers = suppliers.len(),
            products = offers.len(),
            "Catalog index built"
        );

        Self { offers }
    }

    /// Returns the offers for `product`.
    ///
    /// # Errors
    ///
    /// Returns `SourcingError::UnknownProduct` if no supplier carries it.
    pub fn eligible_suppliers(&self, product: &str) -> Result<&[Offer<'a>]> {
        match self.offers.get(product) {
            Some(offers) if !offers.is_empty() => Ok(offers),
            _ => Err(SourcingError::UnknownProduct(product.to_string())),
        }
    }

    /// Resolves the offers of every cart line, in cart order.
    ///
    /// Fails on the first line whose product nobody carries, so callers can
    /// reject a cart before any search work starts.
    pub fn offers_for(&self, cart: &[CartLine]) -> Result<Vec<&[Offer<'a>]>> {
        cart.iter()
            .map(|line| self.eligible_suppliers(line.product()))
            .collect()
    }

    /// Number of distinct products carried by at least one supplier.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_supplier_validation() {
        assert!(Supplier::new("", 1.0).is_err());
        assert!(Supplier::new("A", -1.0).is_err());
        assert!(Supplier::new("A", f64::INFINITY).is_err());
        assert!(Supplier::new("A", 0.0).unwrap().with_product("milk", -0.5).is_err());
        assert!(Supplier::new("A", 0.0).unwrap().with_product(" ", 1.0).is_err());
    }

    #[test]
    fn test_insert_product_reports_replaced_price() {
        let mut supplier = Supplier::new("A", 1.0).unwrap();
        assert_eq!(supplier.insert_product("milk", 2.0).unwrap(), None);
        assert_eq!(supplier.insert_product("milk", 1.5).unwrap(), Some(2.0));
        assert_eq!(supplier.price_of("milk"), Some(1.5));

        let supplier = supplier.with_product("eggs", 3.0).unwrap();
        let mut listed: Vec<(&str, f64)> = supplier.products().collect();
        listed.sort_by(|a, b| a.0.cmp(b.0));
        assert_eq!(listed, vec![("eggs", 3.0), ("milk", 1.5)]);
    }

    #[test]
    fn test_eligible_suppliers_keep_supplier_order() {
        let suppliers = suppliers();
        let index = CatalogIndex::new(&suppliers);

        let milk = index.eligible_suppliers("milk").unwrap();
        let names: Vec<&str> = milk.iter().map(|o| o.supplier.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(milk[1].unit_price, 2.5);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_unknown_product() {
        let suppliers = suppliers();
        let index = CatalogIndex::new(&suppliers);

        match index.eligible_suppliers("eggs") {
            Err(SourcingError::UnknownProduct(name)) => assert_eq!(name, "eggs"),
            other => panic!("Expected UnknownProduct, got {:?}", other),
        }
    }

    #[test]
    fn test_offers_for_cart() {
        let suppliers = suppliers();
        let index = CatalogIndex::new(&suppliers);
        let cart = vec![
            CartLine::single("bread").unwrap(),
            CartLine::single("milk").unwrap(),
        ];

        let offers = index.offers_for(&cart).unwrap();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].len(), 1);
        assert_eq!(offers[1].len(), 2);

        let cart = vec![CartLine::single("eggs").unwrap()];
        assert!(index.offers_for(&cart).is_err());
    }
}

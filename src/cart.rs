//! # Cart
//!
//! A cart is an ordered list of [`CartLine`]s. Quantity and unit are carried
//! through to the report; pricing does not scale with them.

use std::fmt;

use crate::error::{Result, SourcingError};

/// A numeric magnitude with an optional unit label, e.g. `200 g` or `3`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub amount: f64,
    pub unit: Option<String>,
}

impl Quantity {
    pub fn new(amount: f64, unit: Option<String>) -> Self {
        Self { amount, unit }
    }

    /// Splits a quantity string into its leading decimal magnitude and the
    /// trailing unit label.
    ///
    /// Whitespace between the two is optional and a decimal comma is accepted.
    /// A string with no leading number is rejected.
    ///
    /// ```rust
    /// use sourcing::cart::Quantity;
    ///
    /// let q = Quantity::parse("200g").unwrap();
    /// assert_eq!(q.amount, 200.0);
    /// assert_eq!(q.unit.as_deref(), Some("g"));
    ///
    /// let q = Quantity::parse(" 1,5 kg ").unwrap();
    /// assert_eq!(q.amount, 1.5);
    /// assert_eq!(q.unit.as_deref(), Some("kg"));
    ///
    /// assert!(Quantity::parse("kg").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        let mut end = 0;
        let mut seen_separator = false;
        for (idx, ch) in text.char_indices() {
            if ch.is_ascii_digit() {
                end = idx + 1;
            } else if (ch == '.' || ch == ',') && !seen_separator && end == idx && idx > 0 {
                seen_separator = true;
            } else {
                break;
            }
        }

        if end == 0 {
            return None;
        }

        let amount: f64 = text[..end].replace(',', ".").parse().ok()?;
        let unit = text[end..].trim();
        let unit = (!unit.is_empty()).then(|| unit.to_string());

        Some(Self { amount, unit })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} {}", self.amount, unit),
            None => write!(f, "{}", self.amount),
        }
    }
}

/// One requested product entry of the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: String,
    quantity: Quantity,
}

impl CartLine {
    /// Creates a cart line, rejecting empty product names and negative or
    /// non-finite quantities.
    pub fn new(product: impl Into<String>, quantity: Quantity) -> Result<Self> {
        let product = product.into().trim().to_string();
        if product.is_empty() {
            return Err(SourcingError::InvalidCartLine(
                "Product name cannot be empty".to_string(),
            ));
        }
        if !quantity.amount.is_finite() || quantity.amount < 0.0 {
            return Err(SourcingError::InvalidCartLine(format!(
                "Quantity for '{}' must be a non-negative number, got {}",
                product, quantity.amount
            )));
        }

        Ok(Self { product, quantity })
    }

    /// Cart line for a single unit-less item.
    pub fn single(product: impl Into<String>) -> Result<Self> {
        Self::new(product, Quantity::new(1.0, None))
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn quantity(&self) -> &Quantity {
        &self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_space() {
        let q = Quantity::parse("200 g").unwrap();
        assert_eq!(q, Quantity::new(200.0, Some("g".to_string())));
    }

    #[test]
    fn test_parse_decimal_point() {
        let q = Quantity::parse("0.5kg").unwrap();
        assert_eq!(q, Quantity::new(0.5, Some("kg".to_string())));
    }

    #[test]
    fn test_parse_without_unit() {
        let q = Quantity::parse("3").unwrap();
        assert_eq!(q, Quantity::new(3.0, None));
    }

    #[test]
    fn test_parse_trailing_separator_belongs_to_unit() {
        let q = Quantity::parse("2.un").unwrap();
        assert_eq!(q, Quantity::new(2.0, Some(".un".to_string())));
    }

    #[test]
    fn test_parse_rejects_missing_number() {
        assert!(Quantity::parse("").is_none());
        assert!(Quantity::parse("un").is_none());
        assert!(Quantity::parse(".5 kg").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Quantity::new(1.5, Some("kg".into())).to_string(), "1.5 kg");
        assert_eq!(Quantity::new(2.0, None).to_string(), "2");
    }

    #[test]
    fn test_cart_line_validation() {
        assert!(CartLine::single("  ").is_err());
        assert!(CartLine::new("milk", Quantity::new(-1.0, None)).is_err());
        assert!(CartLine::new("milk", Quantity::new(f64::NAN, None)).is_err());

        let line = CartLine::single(" milk ").unwrap();
        assert_eq!(line.product(), "milk");
        assert_eq!(line.quantity().amount, 1.0);
    }
}

//! # Loader
//!
//! Reads suppliers, product listings and carts from semicolon-delimited files.
//! Every file starts with a header row, which is skipped; columns are matched
//! by position and every field is trimmed.
//!
//! | File      | Columns                                      |
//! |-----------|----------------------------------------------|
//! | suppliers | `name;shipping_fee`                          |
//! | products  | `category;name;price;quantity;supplier`      |
//! | cart      | `product;quantity`                           |
//!
//! Numeric fields accept a decimal comma (`12,50`).
//!
//! ## Example
//!
//! ```rust
//! use sourcing::loader::{assemble_catalog, read_cart, read_products, read_suppliers};
//!
//! # fn main() -> sourcing::Result<()> {
//! let suppliers = read_suppliers("name;fee\nA;5\nB;3,0\n".as_bytes())?;
//! let listings = read_products(
//!     "category;name;price;quantity;supplier\n\
//!      dairy;milk;2.0;1 l;A\n\
//!      dairy;milk;2,5;1 l;B\n\
//!      bakery;bread;1.0;500 g;B\n"
//!         .as_bytes(),
//! )?;
//! let catalog = assemble_catalog(suppliers, &listings);
//! let cart = read_cart("product;quantity\nmilk;2 l\nbread;1\n".as_bytes())?;
//!
//! assert_eq!(catalog[1].price_of("milk"), Some(2.5));
//! assert_eq!(cart.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::cart::{CartLine, Quantity};
use crate::catalog::Supplier;
use crate::error::{Result, SourcingError};

/// One row of the products file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    pub category: String,
    pub product: String,
    pub unit_price: f64,
    /// Pack size as listed, e.g. `200 g`. Informational only.
    pub quantity: Option<Quantity>,
    pub supplier: String,
}

#[derive(Debug, Deserialize)]
struct SupplierRow {
    name: String,
    shipping_fee: String,
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    category: String,
    name: String,
    price: String,
    quantity: String,
    supplier: String,
}

#[derive(Debug, Deserialize)]
struct CartRow {
    product: String,
    quantity: String,
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(b';')
        .has_headers(true)
        .trim(csv::Trim::All);
    builder
}

/// Deserializes every data row by position, pairing it with its line number.
fn read_rows<T, R>(mut reader: csv::Reader<R>) -> Result<Vec<(u64, T)>>
where
    for<'de> T: Deserialize<'de>,
    R: io::Read,
{
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        let row: T = record.deserialize(None).map_err(|e| SourcingError::Parse {
            line,
            message: e.to_string(),
        })?;
        rows.push((line, row));
    }

    Ok(rows)
}

/// Parses a decimal number that may use a comma as decimal separator.
fn parse_decimal(text: &str, field: &str, line: u64) -> Result<f64> {
    text.replace(',', ".")
        .parse::<f64>()
        .map_err(|_| SourcingError::Parse {
            line,
            message: format!("{} must be a number, got '{}'", field, text),
        })
}

fn parse_error(line: u64) -> impl FnOnce(SourcingError) -> SourcingError {
    move |e| SourcingError::Parse {
        line,
        message: e.to_string(),
    }
}

/// Reads suppliers with empty catalogs.
///
/// # Errors
///
/// Fails on malformed rows, invalid fees and repeated supplier names.
pub fn read_suppliers<R: io::Read>(reader: R) -> Result<Vec<Supplier>> {
    suppliers_from(reader_builder().from_reader(reader))
}

/// Reads suppliers from the file at `path`. See [`read_suppliers`].
pub fn load_suppliers<P: AsRef<Path>>(path: P) -> Result<Vec<Supplier>> {
    suppliers_from(reader_builder().from_path(path)?)
}

fn suppliers_from<R: io::Read>(reader: csv::Reader<R>) -> Result<Vec<Supplier>> {
    let mut suppliers: Vec<Supplier> = Vec::new();

    for (line, row) in read_rows::<SupplierRow, _>(reader)? {
        let fee = parse_decimal(&row.shipping_fee, "Shipping fee", line)?;
        let supplier = Supplier::new(row.name, fee).map_err(parse_error(line))?;

        if suppliers.iter().any(|s| s.name() == supplier.name()) {
            return Err(SourcingError::Parse {
                line,
                message: format!("Supplier '{}' is listed more than once", supplier.name()),
            });
        }
        suppliers.push(supplier);
    }

    debug!(suppliers = suppliers.len(), "Loaded suppliers");
    Ok(suppliers)
}

/// Reads product listings.
///
/// A pack quantity that cannot be split into magnitude and unit is kept as
/// `None` with a warning; it never affects pricing.
///
/// # Errors
///
/// Fails on malformed rows and unparseable prices.
pub fn read_products<R: io::Read>(reader: R) -> Result<Vec<ProductListing>> {
    products_from(reader_builder().from_reader(reader))
}

/// Reads product listings from the file at `path`. See [`read_products`].
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<ProductListing>> {
    products_from(reader_builder().from_path(path)?)
}

fn products_from<R: io::Read>(reader: csv::Reader<R>) -> Result<Vec<ProductListing>> {
    let listings = read_rows::<ProductRow, _>(reader)?
        .into_iter()
        .map(|(line, row)| {
            let unit_price = parse_decimal(&row.price, "Price", line)?;
            let quantity = Quantity::parse(&row.quantity);
            if quantity.is_none() && !row.quantity.is_empty() {
                warn!(line, quantity = %row.quantity, "Unreadable pack quantity ignored");
            }

            Ok(ProductListing {
                category: row.category,
                product: row.name,
                unit_price,
                quantity,
                supplier: row.supplier,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(listings = listings.len(), "Loaded product listings");
    Ok(listings)
}

/// Joins product listings onto their suppliers by name.
///
/// Listings naming an unknown supplier, or rejected by the supplier's own
/// validation, are skipped with a warning. When a supplier lists the same
/// product more than once the lowest price is kept.
pub fn assemble_catalog(mut suppliers: Vec<Supplier>, listings: &[ProductListing]) -> Vec<Supplier> {
    let positions: HashMap<String, usize> = suppliers
        .iter()
        .enumerate()
        .map(|(idx, supplier)| (supplier.name().to_string(), idx))
        .collect();

    for listing in listings {
        let Some(&idx) = positions.get(listing.supplier.as_str()) else {
            warn!(
                product = %listing.product,
                supplier = %listing.supplier,
                "Listing skipped: unknown supplier"
            );
            continue;
        };
        let supplier = &mut suppliers[idx];

        if let Some(existing) = supplier.price_of(listing.product.trim()) {
            warn!(
                product = %listing.product,
                supplier = %listing.supplier,
                kept = existing.min(listing.unit_price),
                "Duplicate listing"
            );
            if existing <= listing.unit_price {
                continue;
            }
        }

        if let Err(e) = supplier.insert_product(listing.product.as_str(), listing.unit_price) {
            warn!(error = %e, "Listing skipped");
        }
    }

    suppliers
}

/// Loads suppliers and products and joins them. See [`assemble_catalog`].
pub fn load_catalog<P, Q>(suppliers_path: P, products_path: Q) -> Result<Vec<Supplier>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let suppliers = load_suppliers(suppliers_path)?;
    let listings = load_products(products_path)?;
    Ok(assemble_catalog(suppliers, &listings))
}

/// Reads cart lines in file order.
///
/// # Errors
///
/// Fails on malformed rows, quantities without a leading number and invalid
/// cart lines.
pub fn read_cart<R: io::Read>(reader: R) -> Result<Vec<CartLine>> {
    cart_from(reader_builder().from_reader(reader))
}

/// Reads cart lines from the file at `path`. See [`read_cart`].
pub fn load_cart<P: AsRef<Path>>(path: P) -> Result<Vec<CartLine>> {
    cart_from(reader_builder().from_path(path)?)
}

fn cart_from<R: io::Read>(reader: csv::Reader<R>) -> Result<Vec<CartLine>> {
    let cart = read_rows::<CartRow, _>(reader)?
        .into_iter()
        .map(|(line, row)| {
            let quantity = Quantity::parse(&row.quantity).ok_or_else(|| SourcingError::Parse {
                line,
                message: format!("Quantity must start with a number, got '{}'", row.quantity),
            })?;
            CartLine::new(row.product, quantity).map_err(parse_error(line))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(lines = cart.len(), "Loaded cart");
    Ok(cart)
}

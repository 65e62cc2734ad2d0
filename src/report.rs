//! # Report
//!
//! Writes a solution as a semicolon-delimited table: one row per cart line,
//! followed by the item, freight and grand totals in the price column.
//!
//! ```text
//! product;supplier;quantity;unit;unit_price
//! milk;B;1;;2.50
//! bread;B;1;;1.00
//! items_total;;;;3.50
//! freight_total;;;;6.00
//! grand_total;;;;9.50
//! ```

use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::fitness::CostSummary;
use crate::solution::Solution;

const HEADER: [&str; 5] = ["product", "supplier", "quantity", "unit", "unit_price"];

fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.delimiter(b';');
    builder
}

/// Writes the report for `solution` to `writer`.
///
/// # Errors
///
/// Propagates write failures of the underlying writer.
pub fn write_report<W: io::Write>(
    writer: W,
    solution: &Solution<'_>,
    summary: &CostSummary,
) -> Result<()> {
    report_to(writer_builder().from_writer(writer), solution, summary)
}

/// Writes the report for `solution` to the file at `path`, replacing it.
pub fn save_report<P: AsRef<Path>>(
    path: P,
    solution: &Solution<'_>,
    summary: &CostSummary,
) -> Result<()> {
    report_to(writer_builder().from_path(path)?, solution, summary)
}

fn report_to<W: io::Write>(
    mut writer: csv::Writer<W>,
    solution: &Solution<'_>,
    summary: &CostSummary,
) -> Result<()> {
    writer.write_record(HEADER)?;

    for assignment in solution.assignments() {
        let quantity = assignment.line.quantity();
        let amount = quantity.amount.to_string();
        let price = format!("{:.2}", assignment.unit_price);
        writer.write_record([
            assignment.line.product(),
            assignment.supplier.name(),
            amount.as_str(),
            quantity.unit.as_deref().unwrap_or(""),
            price.as_str(),
        ])?;
    }

    for (label, value) in [
        ("items_total", summary.items_total),
        ("freight_total", summary.freight_total),
        ("grand_total", summary.grand_total),
    ] {
        let value = format!("{:.2}", value);
        writer.write_record([label, "", "", "", value.as_str()])?;
    }

    writer.flush()?;
    debug!(rows = solution.len(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartLine, Quantity};
    use crate::catalog::{CatalogIndex, Supplier};
    use crate::fitness::cost;
    use crate::solution::Assignment;

    #[test]
    fn test_report_rows_and_totals() {
        let suppliers = vec![Supplier::new("B", 3.0)
            .unwrap()
            .with_product("milk", 2.5)
            .unwrap()
            .with_product("bread", 1.0)
            .unwrap()];
        let cart = vec![
            CartLine::new("milk", Quantity::new(2.0, Some("l".to_string()))).unwrap(),
            CartLine::single("bread").unwrap(),
        ];
        let index = CatalogIndex::new(&suppliers);
        let solution = Solution::new(
            cart.iter()
                .map(|line| Assignment::new(line, index.eligible_suppliers(line.product()).unwrap()[0]))
                .collect(),
        );

        let mut out = Vec::new();
        write_report(&mut out, &solution, &cost(&solution)).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "product;supplier;quantity;unit;unit_price",
                "milk;B;2;l;2.50",
                "bread;B;1;;1.00",
                "items_total;;;;3.50",
                "freight_total;;;;6.00",
                "grand_total;;;;9.50",
            ]
        );
    }
}

//! Receipt

use std::io;

use thiserror::Error;

use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::{Columns, Rows}},
};

use crate::{money, orders::Order, products::Product};

/// Errors that can occur when rendering an order receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A line item references a product missing from the catalogue.
    #[error("order references unknown product {0}")]
    MissingProduct(i64),

    /// IO error writing the receipt
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// Printable summary of an order against a product catalogue.
///
/// Products are resolved by identifier lookup only; the receipt never holds
/// an object graph.
#[derive(Debug)]
pub struct OrderReceipt<'a> {
    order: &'a Order,
    catalogue: &'a [Product],
}

impl<'a> OrderReceipt<'a> {
    /// Create a receipt for the given order and catalogue.
    #[must_use]
    pub const fn new(order: &'a Order, catalogue: &'a [Product]) -> Self {
        Self { order, catalogue }
    }

    fn product_name(&self, product_id: i64) -> Result<&str, ReceiptError> {
        self.catalogue
            .iter()
            .find(|product| product.id == product_id)
            .map(|product| product.name.as_str())
            .ok_or(ReceiptError::MissingProduct(product_id))
    }

    /// Write the receipt as a table followed by a total line.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::MissingProduct`]: a line item references a product
    ///   not present in the catalogue.
    /// - [`ReceiptError::Io`]: the output could not be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

        for item in &self.order.items {
            builder.push_record([
                self.product_name(item.product_id)?.to_owned(),
                item.quantity.to_string(),
                money::format_amount(item.unit_price),
                money::format_amount(item.line_total()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(
            out,
            "Order #{} ({}) total: {}",
            self.order.id,
            self.order.status,
            money::format_amount(self.order.total())
        )?;

        Ok(())
    }
}

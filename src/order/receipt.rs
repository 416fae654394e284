//! Order receipt rendering

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use super::Order;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

impl Order<'_> {
    /// Writes the order lines and price summary as a table.
    ///
    /// Tax and total are rounded to whole currency units.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Price", "Line Total"]);

        for (idx, line) in self.items.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.menu_item().name.clone(),
                line.quantity().to_string(),
                format!("{}", line.menu_item().price),
                format!("{}", line.line_total()),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        write_summary(&mut out, self)
    }
}

fn write_summary(out: &mut impl io::Write, order: &Order<'_>) -> Result<(), ReceiptError> {
    let breakdown = order.breakdown();

    let rows = [
        ("Subtotal:", breakdown.subtotal().to_string()),
        ("Delivery:", breakdown.delivery_fee().to_string()),
        ("Tax:", breakdown.display_tax().to_string()),
        ("Total:", breakdown.display_total().to_string()),
    ];

    // Right-align every amount under the widest one.
    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in &rows {
        writeln!(out, " {label:>9}  {value:>value_width$}").map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out, "\n Order {} ({})", order.id(), order.status()).map_err(|_err| ReceiptError::IO)?;
    writeln!(out, " Estimated delivery: {}", order.estimated_delivery())
        .map_err(|_err| ReceiptError::IO)
}

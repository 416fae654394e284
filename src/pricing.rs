//! Pricing

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::{cart::line::CartLine, config::PricingConfig};

/// Errors raised while parsing a `"<amount> <ISO code>"` price string.
#[derive(Debug, Error, PartialEq)]
pub enum PriceParseError {
    /// The string was not an amount followed by a currency code.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// The currency code is not a known ISO currency.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Subtotal, delivery fee, tax and total for the current cart contents.
///
/// Every amount is kept at full decimal precision. Use [`PriceBreakdown::display_tax`]
/// and [`PriceBreakdown::display_total`] for the whole-unit figures shown to a customer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown<'a> {
    subtotal: Money<'a, Currency>,
    delivery_fee: Money<'a, Currency>,
    tax: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> PriceBreakdown<'a> {
    /// Price a set of cart lines.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line is priced in a currency other than the
    /// configured one.
    pub fn from_lines(
        lines: &[CartLine<'a>],
        config: &PricingConfig,
    ) -> Result<Self, PricingError> {
        let currency = config.currency();

        let subtotal = lines
            .iter()
            .try_fold(Money::from_minor(0, currency), |acc, line| {
                acc.add(line.line_total())
            })?;

        let delivery_fee = config.delivery_fee();
        let tax = Money::from_decimal(config.tax_rate() * *subtotal.amount(), currency);
        let total = subtotal.add(delivery_fee)?.add(tax)?;

        Ok(Self {
            subtotal,
            delivery_fee,
            tax,
            total,
        })
    }

    /// Sum of price times quantity over all lines.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Flat delivery fee.
    pub fn delivery_fee(&self) -> Money<'a, Currency> {
        self.delivery_fee
    }

    /// Unrounded tax on the subtotal.
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// Unrounded total.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Tax rounded to the nearest whole currency unit.
    pub fn display_tax(&self) -> Money<'a, Currency> {
        round_to_whole_units(self.tax)
    }

    /// Total rounded to the nearest whole currency unit.
    pub fn display_total(&self) -> Money<'a, Currency> {
        round_to_whole_units(self.total)
    }
}

/// Round an amount to the nearest whole currency unit, halves away from zero.
pub fn round_to_whole_units(money: Money<'_, Currency>) -> Money<'_, Currency> {
    let mut rounded = money
        .amount()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    // Keep the currency's minor-unit scale so rounded amounts print like any other price.
    rounded.rescale(money.currency().exponent);

    Money::from_decimal(rounded, money.currency())
}

/// Parse a price written as `"<amount> <ISO code>"`, e.g. `"249.50 INR"`.
///
/// # Errors
///
/// - [`PriceParseError::InvalidPrice`]: the amount is missing, malformed or negative.
/// - [`PriceParseError::UnknownCurrency`]: the currency code is not recognised.
pub fn parse_price(price: &str) -> Result<Money<'static, Currency>, PriceParseError> {
    let mut parts = price.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceParseError::InvalidPrice(price.to_string()));
    };

    let amount = Decimal::from_str(amount)
        .map_err(|_err| PriceParseError::InvalidPrice(price.to_string()))?;

    if amount.is_sign_negative() {
        return Err(PriceParseError::InvalidPrice(price.to_string()));
    }

    let currency =
        iso::find(code).ok_or_else(|| PriceParseError::UnknownCurrency(code.to_string()))?;

    Ok(Money::from_decimal(amount, currency))
}

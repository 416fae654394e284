//! Cart
//!
//! Lines are unique by menu item id and kept in insertion order. Every quantity is at least
//! one: setting a quantity of zero or less removes the line.

use std::num::NonZeroU32;

use tracing::debug;

use crate::{
    catalog::{MenuItem, MenuItemId},
    config::PricingConfig,
    pricing::{PriceBreakdown, PricingError},
};

pub mod line;

use line::CartLine;

/// Cart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
}

impl<'a> Cart<'a> {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one of `item`, merging with an existing line for the same id.
    pub fn add(&mut self, item: MenuItem<'a>) {
        if let Some(line) = self.line_mut(&item.id) {
            line.increment();
            debug!(item = %item.id, quantity = line.quantity().get(), "incremented cart line");
            return;
        }

        debug!(item = %item.id, "added cart line");
        self.lines.push(CartLine::new(item));
    }

    /// Replace the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Unknown ids are ignored.
    pub fn update_quantity(&mut self, item_id: &MenuItemId, quantity: i64) {
        let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

        let Some(quantity) = NonZeroU32::new(clamped) else {
            self.remove(item_id);
            return;
        };

        if let Some(line) = self.line_mut(item_id) {
            line.set_quantity(quantity);
            debug!(item = %item_id, quantity = quantity.get(), "updated cart line");
        }
    }

    /// Remove the line for `item_id`, if present.
    pub fn remove(&mut self, item_id: &MenuItemId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.item_id() != item_id);

        if self.lines.len() != before {
            debug!(item = %item_id, "removed cart line");
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity().get()))
            .sum()
    }

    /// Price the current contents.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line is priced in a currency other than the
    /// configured one.
    pub fn price_breakdown(&self, config: &PricingConfig) -> Result<PriceBreakdown<'a>, PricingError> {
        PriceBreakdown::from_lines(&self.lines, config)
    }

    /// The line for `item_id`, if present.
    pub fn line(&self, item_id: &MenuItemId) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.item_id() == item_id)
    }

    fn line_mut(&mut self, item_id: &MenuItemId) -> Option<&mut CartLine<'a>> {
        self.lines.iter_mut().find(|line| line.item_id() == item_id)
    }

    /// Check if the cart has a line for `item_id`.
    pub fn contains(&self, item_id: &MenuItemId) -> bool {
        self.line(item_id).is_some()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

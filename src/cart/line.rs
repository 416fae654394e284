//! Cart lines

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::catalog::{MenuItem, MenuItemId};

/// One aggregated entry per distinct menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    menu_item: MenuItem<'a>,
    quantity: NonZeroU32,
}

impl<'a> CartLine<'a> {
    /// Create a line with a quantity of one.
    pub fn new(menu_item: MenuItem<'a>) -> Self {
        Self::with_quantity(menu_item, NonZeroU32::MIN)
    }

    /// Create a line with the given quantity.
    pub fn with_quantity(menu_item: MenuItem<'a>, quantity: NonZeroU32) -> Self {
        Self {
            menu_item,
            quantity,
        }
    }

    /// The menu item on this line.
    pub fn menu_item(&self) -> &MenuItem<'a> {
        &self.menu_item
    }

    /// Id of the menu item on this line.
    pub fn item_id(&self) -> &MenuItemId {
        &self.menu_item.id
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money<'a, Currency> {
        let price = self.menu_item.price;

        Money::from_decimal(
            *price.amount() * Decimal::from(self.quantity.get()),
            price.currency(),
        )
    }

    pub(crate) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}

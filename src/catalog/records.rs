//! Catalog records

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

/// Stable restaurant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(String);

/// Stable menu item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(String);

macro_rules! string_id {
    ($id:ident) => {
        impl $id {
            /// Create an id from its string form.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $id {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $id {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $id {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(RestaurantId);
string_id!(MenuItemId);

/// Restaurant
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant<'a> {
    /// Restaurant id
    pub id: RestaurantId,

    /// Display name
    pub name: String,

    /// Image reference
    pub image: String,

    /// Cuisine label, e.g. "North Indian"
    pub cuisine: String,

    /// Average rating out of five
    pub rating: f32,

    /// Advertised delivery time, e.g. "25-35 min"
    pub delivery_time: String,

    /// Advertised delivery fee (display only)
    pub delivery_fee: Money<'a, Currency>,

    /// Minimum order value
    pub min_order: Money<'a, Currency>,

    /// Whether the restaurant is accepting orders
    pub is_open: bool,
}

impl<'a> Restaurant<'a> {
    /// Create an open restaurant with the given fees and empty display fields.
    pub fn new(
        id: impl Into<RestaurantId>,
        name: impl Into<String>,
        delivery_fee: Money<'a, Currency>,
        min_order: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            cuisine: String::new(),
            rating: 0.0,
            delivery_time: String::new(),
            delivery_fee,
            min_order,
            is_open: true,
        }
    }

    /// Case-insensitive substring match against the name or cuisine.
    ///
    /// An empty query matches every restaurant.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();

        self.name.to_lowercase().contains(&query) || self.cuisine.to_lowercase().contains(&query)
    }
}

/// Menu item
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<'a> {
    /// Menu item id
    pub id: MenuItemId,

    /// Restaurant serving this item
    pub restaurant_id: RestaurantId,

    /// Display name
    pub name: String,

    /// Description
    pub description: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Image reference
    pub image: String,

    /// Menu category, e.g. "Mains"
    pub category: String,

    /// Vegetarian flag
    pub is_vegetarian: bool,

    /// Spicy flag
    pub is_spicy: bool,

    /// Popular flag
    pub is_popular: bool,
}

impl<'a> MenuItem<'a> {
    /// Create a menu item with empty display fields and no flags set.
    pub fn new(
        id: impl Into<MenuItemId>,
        restaurant_id: impl Into<RestaurantId>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            restaurant_id: restaurant_id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: String::new(),
            is_vegetarian: false,
            is_spicy: false,
            is_popular: false,
        }
    }

    /// Set the menu category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

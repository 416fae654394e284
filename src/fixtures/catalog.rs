//! Catalog Fixtures

use serde::Deserialize;

use crate::{
    catalog::{MenuItem, MenuItemId, Restaurant, RestaurantId},
    fixtures::FixtureError,
    pricing::parse_price,
};

/// Wrapper for restaurants in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Restaurants, each with its menu
    pub restaurants: Vec<RestaurantFixture>,
}

/// Restaurant fixture from YAML
#[derive(Debug, Deserialize)]
pub struct RestaurantFixture {
    /// Restaurant id
    pub id: RestaurantId,

    /// Display name
    pub name: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Cuisine label
    pub cuisine: String,

    /// Rating out of five
    #[serde(default)]
    pub rating: f32,

    /// Advertised delivery time
    #[serde(default)]
    pub delivery_time: String,

    /// Advertised delivery fee, e.g. "25 INR"
    pub delivery_fee: String,

    /// Minimum order, e.g. "199 INR"
    pub min_order: String,

    /// Whether the restaurant is open (defaults to open)
    #[serde(default = "default_open")]
    pub is_open: bool,

    /// Menu items
    #[serde(default)]
    pub menu: Vec<MenuItemFixture>,
}

fn default_open() -> bool {
    true
}

/// Menu item fixture from YAML
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Menu item id
    pub id: MenuItemId,

    /// Display name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Price, e.g. "249 INR"
    pub price: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Menu category
    pub category: String,

    /// Vegetarian flag
    #[serde(default)]
    pub vegetarian: bool,

    /// Spicy flag
    #[serde(default)]
    pub spicy: bool,

    /// Popular flag
    #[serde(default)]
    pub popular: bool,
}

impl TryFrom<&RestaurantFixture> for Restaurant<'static> {
    type Error = FixtureError;

    fn try_from(fixture: &RestaurantFixture) -> Result<Self, Self::Error> {
        Ok(Restaurant {
            id: fixture.id.clone(),
            name: fixture.name.clone(),
            image: fixture.image.clone(),
            cuisine: fixture.cuisine.clone(),
            rating: fixture.rating,
            delivery_time: fixture.delivery_time.clone(),
            delivery_fee: parse_price(&fixture.delivery_fee)?,
            min_order: parse_price(&fixture.min_order)?,
            is_open: fixture.is_open,
        })
    }
}

impl MenuItemFixture {
    /// Convert into a menu item served by `restaurant_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed.
    pub fn try_into_menu_item(
        self,
        restaurant_id: &RestaurantId,
    ) -> Result<MenuItem<'static>, FixtureError> {
        Ok(MenuItem {
            price: parse_price(&self.price)?,
            id: self.id,
            restaurant_id: restaurant_id.clone(),
            name: self.name,
            description: self.description,
            image: self.image,
            category: self.category,
            is_vegetarian: self.vegetarian,
            is_spicy: self.spicy,
            is_popular: self.popular,
        })
    }
}

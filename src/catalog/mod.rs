//! Catalog
//!
//! Static restaurants and menu items, keyed by id. Records are stored in `SlotMap`s with
//! string-id indexes, and iterate in insertion order.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

mod records;

pub use records::{MenuItem, MenuItemId, Restaurant, RestaurantId};

new_key_type! {
    /// Restaurant Key
    pub struct RestaurantKey;

    /// Menu Item Key
    pub struct MenuItemKey;
}

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A restaurant with this id was already added.
    #[error("Duplicate restaurant: {0}")]
    DuplicateRestaurant(RestaurantId),

    /// A menu item with this id was already added.
    #[error("Duplicate menu item: {0}")]
    DuplicateMenuItem(MenuItemId),

    /// A menu item refers to a restaurant that is not in the catalog.
    #[error("Menu item {item} refers to unknown restaurant {restaurant}")]
    UnknownRestaurant {
        /// Menu item id
        item: MenuItemId,
        /// Missing restaurant id
        restaurant: RestaurantId,
    },

    /// A price is in a different currency from the catalog.
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Menu category tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// A single named category
    Only(String),
}

impl CategoryFilter {
    /// Whether a menu item belongs to this tab.
    pub fn includes(&self, item: &MenuItem<'_>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }

    /// Tab label, `"all"` for [`CategoryFilter::All`].
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category,
        }
    }
}

/// Catalog
#[derive(Debug)]
pub struct Catalog<'a> {
    restaurants: SlotMap<RestaurantKey, Restaurant<'a>>,
    menu_items: SlotMap<MenuItemKey, MenuItem<'a>>,

    /// String id -> `SlotMap` key mappings for lookups
    restaurant_keys: FxHashMap<RestaurantId, RestaurantKey>,
    menu_item_keys: FxHashMap<MenuItemId, MenuItemKey>,

    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            restaurants: SlotMap::with_key(),
            menu_items: SlotMap::with_key(),
            restaurant_keys: FxHashMap::default(),
            menu_item_keys: FxHashMap::default(),
            currency,
        }
    }

    /// Add a restaurant.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateRestaurant`]: the id is already present.
    /// - [`CatalogError::CurrencyMismatch`]: a fee is not in the catalog currency.
    pub fn insert_restaurant(
        &mut self,
        restaurant: Restaurant<'a>,
    ) -> Result<RestaurantKey, CatalogError> {
        if self.restaurant_keys.contains_key(&restaurant.id) {
            return Err(CatalogError::DuplicateRestaurant(restaurant.id));
        }

        self.check_currency(restaurant.delivery_fee.currency())?;
        self.check_currency(restaurant.min_order.currency())?;

        let id = restaurant.id.clone();
        let key = self.restaurants.insert(restaurant);
        self.restaurant_keys.insert(id, key);

        Ok(key)
    }

    /// Add a menu item. Its restaurant must already be present.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateMenuItem`]: the id is already present.
    /// - [`CatalogError::UnknownRestaurant`]: the restaurant has not been added.
    /// - [`CatalogError::CurrencyMismatch`]: the price is not in the catalog currency.
    pub fn insert_menu_item(&mut self, item: MenuItem<'a>) -> Result<MenuItemKey, CatalogError> {
        if self.menu_item_keys.contains_key(&item.id) {
            return Err(CatalogError::DuplicateMenuItem(item.id));
        }

        if !self.restaurant_keys.contains_key(&item.restaurant_id) {
            return Err(CatalogError::UnknownRestaurant {
                item: item.id,
                restaurant: item.restaurant_id,
            });
        }

        self.check_currency(item.price.currency())?;

        let id = item.id.clone();
        let key = self.menu_items.insert(item);
        self.menu_item_keys.insert(id, key);

        Ok(key)
    }

    fn check_currency(&self, currency: &Currency) -> Result<(), CatalogError> {
        if currency == self.currency {
            Ok(())
        } else {
            Err(CatalogError::CurrencyMismatch(
                self.currency.iso_alpha_code,
                currency.iso_alpha_code,
            ))
        }
    }

    /// All restaurants, in insertion order.
    pub fn restaurants(&self) -> impl Iterator<Item = &Restaurant<'a>> {
        self.restaurants.values()
    }

    /// Restaurants whose name or cuisine contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Restaurant<'a>> {
        self.restaurants().filter(|r| r.matches(query)).collect()
    }

    /// Look up a restaurant by id.
    pub fn restaurant(&self, id: &RestaurantId) -> Option<&Restaurant<'a>> {
        let key = self.restaurant_keys.get(id)?;

        self.restaurants.get(*key)
    }

    /// Look up a menu item by id.
    pub fn menu_item(&self, id: &MenuItemId) -> Option<&MenuItem<'a>> {
        let key = self.menu_item_keys.get(id)?;

        self.menu_items.get(*key)
    }

    /// Menu items served by a restaurant, in insertion order.
    pub fn menu_items<'c>(
        &'c self,
        restaurant_id: &'c RestaurantId,
    ) -> impl Iterator<Item = &'c MenuItem<'a>> + 'c {
        self.menu_items
            .values()
            .filter(move |item| item.restaurant_id == *restaurant_id)
    }

    /// Distinct menu categories for a restaurant, in first-seen order.
    pub fn categories(&self, restaurant_id: &RestaurantId) -> SmallVec<[&str; 8]> {
        let mut categories: SmallVec<[&str; 8]> = SmallVec::new();

        let served = self
            .menu_items
            .values()
            .filter(|item| item.restaurant_id == *restaurant_id);

        for item in served {
            if !categories.contains(&item.category.as_str()) {
                categories.push(item.category.as_str());
            }
        }

        categories
    }

    /// Currency all prices are in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of restaurants.
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    /// Check if the catalog has no restaurants.
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{INR, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn restaurant(id: &str, name: &str, cuisine: &str) -> Restaurant<'static> {
        Restaurant {
            cuisine: cuisine.to_string(),
            ..Restaurant::new(
                id,
                name,
                Money::from_minor(2_500, INR),
                Money::from_minor(20_000, INR),
            )
        }
    }

    fn item(id: &str, restaurant: &str, category: &str) -> MenuItem<'static> {
        MenuItem::new(id, restaurant, id, Money::from_minor(19_900, INR)).with_category(category)
    }

    fn catalog() -> Result<Catalog<'static>, CatalogError> {
        let mut catalog = Catalog::new(INR);

        catalog.insert_restaurant(restaurant("spice-route", "Spice Route", "North Indian"))?;
        catalog.insert_restaurant(restaurant("pizza-hub", "Pizza Hub", "Italian"))?;

        catalog.insert_menu_item(item("paneer-tikka", "spice-route", "Starters"))?;
        catalog.insert_menu_item(item("dal-makhani", "spice-route", "Mains"))?;
        catalog.insert_menu_item(item("samosa", "spice-route", "Starters"))?;
        catalog.insert_menu_item(item("margherita", "pizza-hub", "Pizza"))?;

        Ok(catalog)
    }

    #[test]
    fn lookups_by_id() -> TestResult {
        let catalog = catalog()?;

        let restaurant = catalog
            .restaurant(&"pizza-hub".into())
            .ok_or("missing restaurant")?;
        assert_eq!(restaurant.name, "Pizza Hub");

        let item = catalog
            .menu_item(&"samosa".into())
            .ok_or("missing item")?;
        assert_eq!(item.restaurant_id, RestaurantId::new("spice-route"));

        assert!(catalog.menu_item(&"biryani".into()).is_none());

        Ok(())
    }

    #[test]
    fn menu_items_are_filtered_by_restaurant_in_order() -> TestResult {
        let catalog = catalog()?;
        let spice_route = RestaurantId::new("spice-route");

        let ids: Vec<&str> = catalog
            .menu_items(&spice_route)
            .map(|item| item.id.as_str())
            .collect();

        assert_eq!(ids, ["paneer-tikka", "dal-makhani", "samosa"]);

        Ok(())
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() -> TestResult {
        let catalog = catalog()?;

        let categories = catalog.categories(&"spice-route".into());

        assert_eq!(categories.as_slice(), ["Starters", "Mains"]);

        Ok(())
    }

    #[test]
    fn categories_outlive_the_lookup_id() -> TestResult {
        let catalog = catalog()?;

        let categories = {
            let id = RestaurantId::from(String::from("spice-route"));
            catalog.categories(&id)
        };

        assert_eq!(categories.len(), 2);
        assert!(catalog.categories(&"nowhere".into()).is_empty());

        Ok(())
    }

    #[test]
    fn search_matches_name_or_cuisine() -> TestResult {
        let catalog = catalog()?;

        let by_cuisine: Vec<&str> = catalog
            .search("italian")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(by_cuisine, ["pizza-hub"]);

        assert_eq!(catalog.search("").len(), 2);
        assert!(catalog.search("sushi").is_empty());

        Ok(())
    }

    #[test]
    fn category_filter_includes() {
        let starter = item("samosa", "spice-route", "Starters");

        assert!(CategoryFilter::All.includes(&starter));
        assert!(CategoryFilter::Only("Starters".to_string()).includes(&starter));
        assert!(!CategoryFilter::Only("Mains".to_string()).includes(&starter));
        assert_eq!(CategoryFilter::All.label(), "all");
    }

    #[test]
    fn duplicate_ids_are_rejected() -> TestResult {
        let mut catalog = catalog()?;

        assert_eq!(
            catalog.insert_restaurant(restaurant("pizza-hub", "Again", "Italian")),
            Err(CatalogError::DuplicateRestaurant("pizza-hub".into()))
        );
        assert_eq!(
            catalog.insert_menu_item(item("samosa", "spice-route", "Starters")),
            Err(CatalogError::DuplicateMenuItem("samosa".into()))
        );

        Ok(())
    }

    #[test]
    fn dangling_restaurant_reference_is_rejected() {
        let mut catalog = Catalog::new(INR);

        let result = catalog.insert_menu_item(item("samosa", "nowhere", "Starters"));

        assert_eq!(
            result,
            Err(CatalogError::UnknownRestaurant {
                item: "samosa".into(),
                restaurant: "nowhere".into(),
            })
        );
    }

    #[test]
    fn foreign_currency_is_rejected() {
        let mut catalog = Catalog::new(INR);

        let result = catalog.insert_restaurant(Restaurant::new(
            "diner",
            "Diner",
            Money::from_minor(399, USD),
            Money::from_minor(1_000, USD),
        ));

        assert_eq!(
            result,
            Err(CatalogError::CurrencyMismatch(
                INR.iso_alpha_code,
                USD.iso_alpha_code
            ))
        );
    }
}

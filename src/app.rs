//! Application state
//!
//! [`App`] owns everything a view needs to render the ordering screens: the catalog, the cart,
//! the checkout flow, the notification slot and the current view selection. Views read from
//! it and send user events to it; they hold no state of their own.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, line::CartLine},
    catalog::{Catalog, CategoryFilter, MenuItem, MenuItemId, Restaurant, RestaurantId},
    checkout::{Checkout, CheckoutError, CheckoutPhase, DeliveryDetails},
    config::PricingConfig,
    notifications::{Notifications, ScheduledClear},
    order::Order,
    pricing::{PriceBreakdown, PricingError},
};

/// Message shown when a closed restaurant is selected.
pub const RESTAURANT_CLOSED_MESSAGE: &str = "Sorry, this restaurant is currently closed";

/// Application errors
#[derive(Debug, Error, PartialEq)]
pub enum AppError {
    /// No restaurant with this id in the catalog.
    #[error("Unknown restaurant: {0}")]
    UnknownRestaurant(RestaurantId),

    /// No menu item with this id in the catalog.
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(MenuItemId),

    /// The pricing configuration and the catalog use different currencies.
    #[error("Currency mismatch: catalog uses {catalog}, pricing uses {pricing}")]
    CurrencyMismatch {
        /// Catalog currency code
        catalog: &'static str,
        /// Pricing currency code
        pricing: &'static str,
    },

    /// Rejected checkout transition.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Errors bubbled up from pricing the cart.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Top-level screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// Restaurant grid
    #[default]
    Restaurants,

    /// Menu of the selected restaurant
    Menu,
}

/// Application controller
#[derive(Debug)]
pub struct App<'a> {
    catalog: Catalog<'a>,
    config: PricingConfig,
    cart: Cart<'a>,
    checkout: Checkout,
    notifications: Notifications,
    view: View,
    selected_restaurant: Option<RestaurantId>,
    search_query: String,
    category: CategoryFilter,
}

impl<'a> App<'a> {
    /// Create a session over `catalog` with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CurrencyMismatch`] if `config` and `catalog` disagree on currency.
    pub fn new(catalog: Catalog<'a>, config: PricingConfig) -> Result<Self, AppError> {
        if catalog.currency() != config.currency() {
            return Err(AppError::CurrencyMismatch {
                catalog: catalog.currency().iso_alpha_code,
                pricing: config.currency().iso_alpha_code,
            });
        }

        let notifications = Notifications::new(config.notification_delay());

        Ok(Self {
            catalog,
            config,
            cart: Cart::new(),
            checkout: Checkout::new(),
            notifications,
            view: View::Restaurants,
            selected_restaurant: None,
            search_query: String::new(),
            category: CategoryFilter::All,
        })
    }

    /// Catalog
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Pricing configuration
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Cart
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Checkout flow
    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Notification slot
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Current screen.
    pub fn view(&self) -> View {
        self.view
    }

    // Restaurants

    /// Set the restaurant search text.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Current search text.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Restaurants matching the search text.
    pub fn filtered_restaurants(&self) -> Vec<&Restaurant<'a>> {
        self.catalog.search(&self.search_query)
    }

    /// Open a restaurant's menu.
    ///
    /// A closed restaurant is refused with a notification and nothing else changes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownRestaurant`] if the id is not in the catalog.
    pub fn select_restaurant(&mut self, id: &RestaurantId) -> Result<(), AppError> {
        let restaurant = self
            .catalog
            .restaurant(id)
            .ok_or_else(|| AppError::UnknownRestaurant(id.clone()))?;

        if !restaurant.is_open {
            warn!(restaurant = %id, "refused to open closed restaurant");
            self.notifications.show(RESTAURANT_CLOSED_MESSAGE);
            return Ok(());
        }

        self.selected_restaurant = Some(id.clone());
        self.category = CategoryFilter::All;
        self.view = View::Menu;

        Ok(())
    }

    /// Leave the menu and return to the restaurant grid.
    pub fn back_to_restaurants(&mut self) {
        self.selected_restaurant = None;
        self.category = CategoryFilter::All;
        self.view = View::Restaurants;
    }

    /// Restaurant whose menu is showing.
    pub fn selected_restaurant(&self) -> Option<&Restaurant<'a>> {
        let id = self.selected_restaurant.as_ref()?;

        self.catalog.restaurant(id)
    }

    // Menu

    /// Category tabs for the selected restaurant: "all" followed by each category.
    pub fn category_tabs(&self) -> Vec<CategoryFilter> {
        let mut tabs = vec![CategoryFilter::All];

        if let Some(id) = &self.selected_restaurant {
            tabs.extend(
                self.catalog
                    .categories(id)
                    .into_iter()
                    .map(|category| CategoryFilter::Only(category.to_string())),
            );
        }

        tabs
    }

    /// Switch the menu category tab.
    pub fn select_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Active category tab.
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Selected restaurant's menu, filtered by the active category tab.
    pub fn menu_items(&self) -> Vec<&MenuItem<'a>> {
        let Some(id) = &self.selected_restaurant else {
            return Vec::new();
        };

        self.catalog
            .menu_items(id)
            .filter(|item| self.category.includes(item))
            .collect()
    }

    // Cart

    /// Add one of a menu item to the cart and confirm with a notification.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownMenuItem`] if the id is not in the catalog.
    pub fn add_to_cart(&mut self, id: &MenuItemId) -> Result<(), AppError> {
        let item = self
            .catalog
            .menu_item(id)
            .cloned()
            .ok_or_else(|| AppError::UnknownMenuItem(id.clone()))?;

        let message = format!("{} added to cart!", item.name);

        self.cart.add(item);
        self.notifications.show(message);

        Ok(())
    }

    /// Set a cart line's quantity; zero or less removes it.
    pub fn update_quantity(&mut self, id: &MenuItemId, quantity: i64) {
        self.cart.update_quantity(id, quantity);
    }

    /// Remove a cart line.
    pub fn remove_from_cart(&mut self, id: &MenuItemId) {
        self.cart.remove(id);
    }

    /// Cart lines in display order.
    pub fn cart_lines(&self) -> &[CartLine<'a>] {
        self.cart.lines()
    }

    /// Badge count: total quantity across lines.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Price the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the cart cannot be priced.
    pub fn price_breakdown(&self) -> Result<PriceBreakdown<'a>, PricingError> {
        self.cart.price_breakdown(&self.config)
    }

    // Checkout

    /// Show the cart panel.
    pub fn open_cart(&mut self) {
        self.checkout.open();
    }

    /// Dismiss the cart panel, returning checkout to the review phase.
    pub fn close_cart(&mut self) {
        self.checkout.cancel();
    }

    /// Current checkout phase.
    pub fn checkout_phase(&self) -> CheckoutPhase {
        self.checkout.phase()
    }

    /// Whether "proceed to checkout" should be offered.
    pub fn can_proceed_to_checkout(&self) -> bool {
        self.checkout.can_advance(&self.cart)
    }

    /// Move to the delivery details form.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::PanelClosed`] (wrapped) if the cart panel is not open, or
    /// [`CheckoutError::EmptyCart`] if the cart is empty.
    pub fn proceed_to_checkout(&mut self) -> Result<(), AppError> {
        self.checkout.advance_to_form(&self.cart)?;

        Ok(())
    }

    /// Edit the delivery details.
    pub fn delivery_details_mut(&mut self) -> &mut DeliveryDetails {
        self.checkout.details_mut()
    }

    /// Place the order, clear the cart and close the panel.
    ///
    /// # Errors
    ///
    /// Returns an [`AppError::Checkout`] if checkout is not on the form, the cart is empty,
    /// or the cart cannot be priced. Nothing changes in that case.
    pub fn place_order(&mut self) -> Result<Order<'a>, AppError> {
        let order = self.checkout.place_order(&mut self.cart, &self.config)?;

        self.notifications.show(order.confirmation_message());
        debug!(order = %order.id(), "checkout complete");

        Ok(order)
    }

    // Notifications

    /// Message visible at `now`, if any.
    pub fn notification(&self, now: Instant) -> Option<&str> {
        self.notifications.current(now)
    }

    /// Pending clear for the visible notification, for the view's timer.
    pub fn pending_clear(&self) -> Option<ScheduledClear> {
        self.notifications.scheduled()
    }

    /// Drop the notification if its delay has elapsed by `now`.
    pub fn expire_notification(&mut self, now: Instant) -> bool {
        self.notifications.expire(now)
    }

    /// Apply a scheduled clear fired by the view's timer.
    pub fn fire_clear(&mut self, clear: ScheduledClear) -> bool {
        self.notifications.fire(clear)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rusty_money::{
        Money,
        iso::{INR, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn catalog() -> Result<Catalog<'static>, crate::catalog::CatalogError> {
        let mut catalog = Catalog::new(INR);

        catalog.insert_restaurant(Restaurant::new(
            "spice-route",
            "Spice Route",
            Money::from_minor(2_500, INR),
            Money::from_minor(20_000, INR),
        ))?;
        catalog.insert_restaurant(Restaurant {
            is_open: false,
            ..Restaurant::new(
                "night-owl",
                "Night Owl",
                Money::from_minor(4_000, INR),
                Money::from_minor(30_000, INR),
            )
        })?;

        catalog.insert_menu_item(
            MenuItem::new("samosa", "spice-route", "Samosa", Money::from_minor(5_000, INR))
                .with_category("Starters"),
        )?;
        catalog.insert_menu_item(
            MenuItem::new("dal", "spice-route", "Dal Makhani", Money::from_minor(10_000, INR))
                .with_category("Mains"),
        )?;

        Ok(catalog)
    }

    fn app() -> TestResult<App<'static>> {
        Ok(App::new(catalog()?, PricingConfig::default())?)
    }

    #[test]
    fn new_rejects_currency_mismatch() -> TestResult {
        let config = PricingConfig::from_yaml_str(
            "currency: USD\ndelivery_fee: 3.99 USD\ntax_rate: 0.08\n",
        )?;

        let result = App::new(catalog()?, config);

        assert!(matches!(
            result,
            Err(AppError::CurrencyMismatch { catalog: found, pricing })
                if found == INR.iso_alpha_code && pricing == USD.iso_alpha_code
        ));

        Ok(())
    }

    #[test]
    fn selecting_open_restaurant_shows_menu() -> TestResult {
        let mut app = app()?;

        app.select_restaurant(&"spice-route".into())?;

        assert_eq!(app.view(), View::Menu);
        assert_eq!(
            app.selected_restaurant().map(|r| r.name.as_str()),
            Some("Spice Route")
        );
        assert_eq!(app.menu_items().len(), 2);

        Ok(())
    }

    #[test]
    fn selecting_closed_restaurant_only_notifies() -> TestResult {
        let mut app = app()?;
        app.select_restaurant(&"spice-route".into())?;
        let shown_before = app.notifications().shown();

        app.select_restaurant(&"night-owl".into())?;

        assert_eq!(app.notifications().shown(), shown_before + 1);
        assert_eq!(
            app.selected_restaurant().map(|r| r.id.as_str()),
            Some("spice-route")
        );
        assert_eq!(
            app.notification(Instant::now()),
            Some(RESTAURANT_CLOSED_MESSAGE)
        );

        Ok(())
    }

    #[test]
    fn selecting_unknown_restaurant_errors() -> TestResult {
        let mut app = app()?;

        assert_eq!(
            app.select_restaurant(&"nowhere".into()),
            Err(AppError::UnknownRestaurant("nowhere".into()))
        );

        Ok(())
    }

    #[test]
    fn back_to_restaurants_clears_selection() -> TestResult {
        let mut app = app()?;
        app.select_restaurant(&"spice-route".into())?;

        app.back_to_restaurants();

        assert_eq!(app.view(), View::Restaurants);
        assert!(app.selected_restaurant().is_none());
        assert!(app.menu_items().is_empty());

        Ok(())
    }

    #[test]
    fn category_tabs_filter_menu() -> TestResult {
        let mut app = app()?;
        app.select_restaurant(&"spice-route".into())?;

        let labels: Vec<String> = app
            .category_tabs()
            .iter()
            .map(|tab| tab.label().to_string())
            .collect();
        assert_eq!(labels, ["all", "Starters", "Mains"]);

        app.select_category(CategoryFilter::Only("Mains".to_string()));
        let names: Vec<&str> = app.menu_items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Dal Makhani"]);

        Ok(())
    }

    #[test]
    fn search_filters_restaurants() -> TestResult {
        let mut app = app()?;

        app.set_search_query("OWL");

        let ids: Vec<&str> = app
            .filtered_restaurants()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["night-owl"]);

        Ok(())
    }

    #[test]
    fn add_to_cart_notifies() -> TestResult {
        let mut app = app()?;

        app.add_to_cart(&"samosa".into())?;
        app.add_to_cart(&"samosa".into())?;

        assert_eq!(app.item_count(), 2);
        assert_eq!(app.notifications().shown(), 2);
        assert_eq!(
            app.notification(Instant::now()),
            Some("Samosa added to cart!")
        );

        Ok(())
    }

    #[test]
    fn add_unknown_item_errors_without_notifying() -> TestResult {
        let mut app = app()?;

        assert_eq!(
            app.add_to_cart(&"biryani".into()),
            Err(AppError::UnknownMenuItem("biryani".into()))
        );
        assert_eq!(app.notifications().shown(), 0);
        assert_eq!(app.item_count(), 0);

        Ok(())
    }

    #[test]
    fn full_checkout_flow() -> TestResult {
        let mut app = app()?;

        app.add_to_cart(&"dal".into())?;
        app.add_to_cart(&"dal".into())?;
        app.add_to_cart(&"samosa".into())?;

        let expected_total = app.price_breakdown()?.total();
        assert_eq!(expected_total, Money::from_minor(29_500, INR));

        app.open_cart();
        assert!(app.can_proceed_to_checkout());
        app.proceed_to_checkout()?;
        assert_eq!(app.checkout_phase(), CheckoutPhase::FormEntry);

        app.delivery_details_mut().address = "4th Block, Koramangala".to_string();

        let order = app.place_order()?;

        assert_eq!(order.total(), expected_total);
        assert_eq!(order.details().address, "4th Block, Koramangala");
        assert_eq!(app.item_count(), 0);
        assert_eq!(app.checkout_phase(), CheckoutPhase::Reviewing);
        assert!(!app.checkout().is_open());
        assert_eq!(
            app.notification(Instant::now()),
            Some("Order placed successfully! Estimated delivery: 30-45 minutes")
        );

        Ok(())
    }

    #[test]
    fn proceed_with_empty_cart_is_rejected() -> TestResult {
        let mut app = app()?;
        app.open_cart();

        assert!(!app.can_proceed_to_checkout());
        assert_eq!(
            app.proceed_to_checkout(),
            Err(AppError::Checkout(CheckoutError::EmptyCart))
        );
        assert_eq!(app.checkout_phase(), CheckoutPhase::Reviewing);

        Ok(())
    }

    #[test]
    fn close_cart_keeps_lines() -> TestResult {
        let mut app = app()?;
        app.add_to_cart(&"samosa".into())?;
        app.open_cart();
        app.proceed_to_checkout()?;

        app.close_cart();

        assert_eq!(app.checkout_phase(), CheckoutPhase::Reviewing);
        assert_eq!(app.item_count(), 1);

        Ok(())
    }

    #[test]
    fn quantity_controls_delegate_to_cart() -> TestResult {
        let mut app = app()?;
        app.add_to_cart(&"samosa".into())?;
        app.add_to_cart(&"dal".into())?;

        app.update_quantity(&"samosa".into(), 4);
        app.remove_from_cart(&"dal".into());

        assert_eq!(app.cart_lines().len(), 1);
        assert_eq!(app.item_count(), 4);

        app.update_quantity(&"samosa".into(), -1);
        assert!(app.cart().is_empty());

        Ok(())
    }

    #[test]
    fn notification_expires_after_configured_delay() -> TestResult {
        let mut app = app()?;

        app.add_to_cart(&"samosa".into())?;
        let clear = app.pending_clear().ok_or("expected pending clear")?;
        let delay = app.config().notification_delay();

        let before = clear
            .due()
            .checked_sub(Duration::from_millis(1))
            .ok_or("due time underflow")?;
        assert!(!app.expire_notification(before));
        assert_eq!(app.notification(before), Some("Samosa added to cart!"));

        assert!(app.expire_notification(clear.due()));
        assert_eq!(app.notification(clear.due()), None);
        assert!(app.pending_clear().is_none());
        assert_eq!(delay, Duration::from_secs(3));

        Ok(())
    }

    #[test]
    fn stale_clear_does_not_hide_newer_notification() -> TestResult {
        let mut app = app()?;

        app.add_to_cart(&"samosa".into())?;
        let first = app.pending_clear().ok_or("expected pending clear")?;

        app.add_to_cart(&"dal".into())?;

        assert!(!app.fire_clear(first));
        assert_eq!(
            app.notification(Instant::now()),
            Some("Dal Makhani added to cart!")
        );

        Ok(())
    }
}

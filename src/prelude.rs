//! Tiffin prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    app::{App, AppError, View},
    cart::{Cart, line::CartLine},
    catalog::{
        Catalog, CatalogError, CategoryFilter, MenuItem, MenuItemId, Restaurant, RestaurantId,
    },
    checkout::{Checkout, CheckoutError, CheckoutPhase, DeliveryDetails},
    config::{ConfigError, PricingConfig},
    fixtures::{Fixture, FixtureError},
    notifications::{Notifications, ScheduledClear},
    order::{Order, OrderId, OrderStatus, ReceiptError},
    pricing::{PriceBreakdown, PriceParseError, PricingError, parse_price},
};

//! Ordering Demo
//!
//! Walks one customer session through the engine: open a restaurant, fill the cart, check out
//! and print the receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-r` to pick the restaurant
//! Use `-i` (repeatable) to add menu items; defaults to the restaurant's first two dishes
//!
//! Set `RUST_LOG=tiffin=debug` to trace cart and checkout events.

use std::io;

use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tiffin::{
    app::{App, RESTAURANT_CLOSED_MESSAGE},
    catalog::{MenuItemId, RestaurantId},
    fixtures::Fixture,
    utils::DemoArgs,
};

/// Ordering Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = DemoArgs::parse();

    let (catalog, config) = Fixture::from_set(&args.fixture)?.into_parts()?;
    let mut app = App::new(catalog, config)?;

    let restaurant_id = RestaurantId::from(args.restaurant.as_str());
    app.select_restaurant(&restaurant_id)?;

    let Some(restaurant) = app.selected_restaurant() else {
        bail!("{RESTAURANT_CLOSED_MESSAGE}");
    };

    println!("{} ({})\n", restaurant.name, restaurant.cuisine);

    let items: Vec<MenuItemId> = if args.items.is_empty() {
        app.menu_items()
            .iter()
            .take(2)
            .map(|item| item.id.clone())
            .collect()
    } else {
        args.items.iter().map(|id| MenuItemId::from(id.as_str())).collect()
    };

    for id in &items {
        app.add_to_cart(id)?;
    }

    let breakdown = app.price_breakdown()?;

    println!("Items:    {}", app.item_count());
    println!("Subtotal: {}", breakdown.subtotal());
    println!("Delivery: {}", breakdown.delivery_fee());
    println!("Tax:      {}", breakdown.display_tax());
    println!("Total:    {}\n", breakdown.display_total());

    app.open_cart();
    app.proceed_to_checkout()?;

    let details = app.delivery_details_mut();
    details.address.clone_from(&args.address);
    details.phone.clone_from(&args.phone);

    let order = app.place_order()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    order.write_to(&mut handle)?;

    Ok(())
}

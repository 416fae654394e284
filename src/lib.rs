//! Tiffin
//!
//! Tiffin is the cart, pricing and checkout engine behind a food-ordering frontend: a restaurant
//! catalog, a quantity-aware cart, a flat fee plus percentage tax price breakdown, a two-phase
//! checkout and a single-slot notification queue.

pub mod app;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod notifications;
pub mod order;
pub mod prelude;
pub mod pricing;
pub mod utils;

//! Utils

use clap::Parser;

/// Arguments for the ordering demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Fixture set to load the catalog & pricing from
    #[clap(short, long, default_value = "demo")]
    pub fixture: String,

    /// Restaurant to order from
    #[clap(short, long, default_value = "spice-route")]
    pub restaurant: String,

    /// Menu item to add to the cart; repeat to add more (or the same one again)
    #[clap(short, long = "item")]
    pub items: Vec<String>,

    /// Delivery address entered at checkout
    #[clap(short, long, default_value = "4th Block, Koramangala, Bengaluru")]
    pub address: String,

    /// Contact phone number entered at checkout
    #[clap(short, long, default_value = "+91 98450 00000")]
    pub phone: String,
}

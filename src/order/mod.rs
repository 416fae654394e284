//! Orders
//!
//! An [`Order`] is the snapshot taken when checkout completes. It is never persisted and its
//! status never advances past [`OrderStatus::Pending`].

use std::fmt;

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::{
    cart::line::CartLine,
    catalog::RestaurantId,
    checkout::DeliveryDetails,
    pricing::PriceBreakdown,
};

mod receipt;

pub use receipt::ReceiptError;

/// Delivery estimate quoted for every order.
pub const ESTIMATED_DELIVERY: &str = "30-45 minutes";

/// Order id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a new random order id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Order lifecycle labels.
///
/// Orders are created as [`OrderStatus::Pending`]; nothing in this crate moves them on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderStatus {
    /// Submitted, awaiting confirmation
    #[default]
    Pending,
    /// Accepted by the restaurant
    Confirmed,
    /// Being prepared
    Preparing,
    /// Out for delivery
    OnTheWay,
    /// Delivered
    Delivered,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OnTheWay => "on-way",
            OrderStatus::Delivered => "delivered",
        })
    }
}

/// Order
#[derive(Debug, Clone)]
pub struct Order<'a> {
    id: OrderId,
    items: Vec<CartLine<'a>>,
    breakdown: PriceBreakdown<'a>,
    details: DeliveryDetails,
    status: OrderStatus,
    estimated_delivery: String,
    created_at: Timestamp,
}

impl<'a> Order<'a> {
    /// Create a pending order from a cart snapshot and its price breakdown.
    pub fn new(
        items: Vec<CartLine<'a>>,
        breakdown: PriceBreakdown<'a>,
        details: DeliveryDetails,
    ) -> Self {
        Self {
            id: OrderId::new(),
            items,
            breakdown,
            details,
            status: OrderStatus::Pending,
            estimated_delivery: ESTIMATED_DELIVERY.to_string(),
            created_at: Timestamp::now(),
        }
    }

    /// Order id
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Lines as they were when the order was placed.
    pub fn items(&self) -> &[CartLine<'a>] {
        &self.items
    }

    /// Price breakdown at submission time.
    pub fn breakdown(&self) -> &PriceBreakdown<'a> {
        &self.breakdown
    }

    /// Subtotal
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.breakdown.subtotal()
    }

    /// Delivery fee
    pub fn delivery_fee(&self) -> Money<'a, Currency> {
        self.breakdown.delivery_fee()
    }

    /// Unrounded tax
    pub fn tax(&self) -> Money<'a, Currency> {
        self.breakdown.tax()
    }

    /// Unrounded total
    pub fn total(&self) -> Money<'a, Currency> {
        self.breakdown.total()
    }

    /// Delivery details entered at checkout.
    pub fn details(&self) -> &DeliveryDetails {
        &self.details
    }

    /// Status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Quoted delivery estimate.
    pub fn estimated_delivery(&self) -> &str {
        &self.estimated_delivery
    }

    /// When the order was placed.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Sum of line quantities.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity().get()))
            .sum()
    }

    /// Distinct restaurants the order draws from, in line order.
    pub fn restaurant_ids(&self) -> SmallVec<[&RestaurantId; 2]> {
        let mut ids: SmallVec<[&RestaurantId; 2]> = SmallVec::new();

        for line in &self.items {
            let id = &line.menu_item().restaurant_id;

            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        ids
    }

    /// Message shown to the customer once the order is placed.
    pub fn confirmation_message(&self) -> String {
        format!(
            "Order placed successfully! Estimated delivery: {}",
            self.estimated_delivery
        )
    }
}

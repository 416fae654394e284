//! Checkout
//!
//! Two-phase flow behind the cart panel: review the cart, then enter delivery details and
//! place the order.

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::Cart,
    config::PricingConfig,
    order::Order,
    pricing::PricingError,
};

/// Errors that reject a checkout transition. State is left unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// Checkout needs at least one cart line.
    #[error("cart is empty")]
    EmptyCart,

    /// The cart panel is not showing.
    #[error("cart panel is closed")]
    PanelClosed,

    /// Orders can only be placed from the delivery details form.
    #[error("checkout is not on the delivery details form")]
    NotInForm,

    /// Errors bubbled up from pricing the cart.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Which step of checkout is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Reviewing cart contents
    #[default]
    Reviewing,

    /// Entering delivery details
    FormEntry,
}

/// Delivery details collected on the checkout form. Free text, passed through unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDetails {
    /// Delivery address
    pub address: String,

    /// Contact phone number
    pub phone: String,

    /// Special instructions for the restaurant or rider
    pub instructions: String,
}

/// Checkout flow state
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    phase: CheckoutPhase,
    details: DeliveryDetails,
    open: bool,
}

impl Checkout {
    /// Closed panel, reviewing phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Whether the cart panel is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the cart panel.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Whether "proceed to checkout" should be offered for `cart`.
    pub fn can_advance(&self, cart: &Cart<'_>) -> bool {
        self.open && self.phase == CheckoutPhase::Reviewing && !cart.is_empty()
    }

    /// Move from reviewing to the delivery details form.
    ///
    /// Already being on the form is not an error.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::PanelClosed`]: the cart panel is not open.
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    pub fn advance_to_form(&mut self, cart: &Cart<'_>) -> Result<(), CheckoutError> {
        if !self.open {
            return Err(CheckoutError::PanelClosed);
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.phase = CheckoutPhase::FormEntry;
        debug!("checkout moved to delivery details form");

        Ok(())
    }

    /// Delivery details entered so far.
    pub fn details(&self) -> &DeliveryDetails {
        &self.details
    }

    /// Edit the delivery details.
    pub fn details_mut(&mut self) -> &mut DeliveryDetails {
        &mut self.details
    }

    /// Close the panel from either phase. The cart is left alone; entered details are dropped.
    pub fn cancel(&mut self) {
        self.reset();
        self.open = false;
    }

    fn reset(&mut self) {
        self.phase = CheckoutPhase::Reviewing;
        self.details = DeliveryDetails::default();
    }

    /// Submit the order.
    ///
    /// Snapshots the cart and its price breakdown into an [`Order`], clears the cart, resets
    /// to [`CheckoutPhase::Reviewing`] and closes the panel.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::PanelClosed`]: the cart panel is not open.
    /// - [`CheckoutError::NotInForm`]: called while reviewing.
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::Pricing`]: the cart could not be priced.
    ///
    /// Nothing changes when an error is returned.
    pub fn place_order<'a>(
        &mut self,
        cart: &mut Cart<'a>,
        config: &PricingConfig,
    ) -> Result<Order<'a>, CheckoutError> {
        if !self.open {
            return Err(CheckoutError::PanelClosed);
        }

        if self.phase != CheckoutPhase::FormEntry {
            return Err(CheckoutError::NotInForm);
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let breakdown = cart.price_breakdown(config)?;
        let details = std::mem::take(&mut self.details);
        let order = Order::new(cart.lines().to_vec(), breakdown, details);

        cart.clear();
        self.cancel();

        info!(order = %order.id(), total = %order.total(), "order placed");

        Ok(order)
    }
}

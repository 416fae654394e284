//! Pricing configuration
//!
//! One named value per pricing constant. Restaurants advertise their own delivery fee for
//! display, but carts are always priced with [`PricingConfig::delivery_fee`].

use std::{fs, path::Path, time::Duration};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;

use crate::pricing::{PriceParseError, parse_price};

/// Delivery fee charged on every order, in minor units of the default currency (INR).
pub const DEFAULT_DELIVERY_FEE_MINOR: i64 = 2_500;

/// Tax rate applied to the subtotal, in percent points.
pub const DEFAULT_TAX_PERCENT_POINTS: u32 = 8;

/// How long a notification stays visible.
pub const DEFAULT_NOTIFICATION_DELAY: Duration = Duration::from_secs(3);

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid delivery fee
    #[error(transparent)]
    Price(#[from] PriceParseError),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Delivery fee currency differs from the configured currency
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Tax rate is not a fraction between 0 and 1
    #[error("Invalid tax rate: {0}")]
    InvalidTaxRate(f64),
}

/// On-disk shape of a pricing configuration.
#[derive(Debug, Deserialize)]
struct PricingConfigFile {
    currency: String,
    delivery_fee: String,
    tax_rate: f64,
    #[serde(default = "default_notification_delay_ms")]
    notification_delay_ms: u64,
}

fn default_notification_delay_ms() -> u64 {
    u64::try_from(DEFAULT_NOTIFICATION_DELAY.as_millis()).unwrap_or(u64::MAX)
}

/// Pricing and notification settings shared by the cart and checkout.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    currency: &'static Currency,
    delivery_fee: Money<'static, Currency>,
    tax_rate: Percentage,
    notification_delay: Duration,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: iso::INR,
            delivery_fee: Money::from_minor(DEFAULT_DELIVERY_FEE_MINOR, iso::INR),
            tax_rate: Percentage::from(Decimal::new(i64::from(DEFAULT_TAX_PERCENT_POINTS), 2)),
            notification_delay: DEFAULT_NOTIFICATION_DELAY,
        }
    }
}

impl PricingConfig {
    /// Create a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CurrencyMismatch`] if the delivery fee is not in `currency`.
    pub fn new(
        currency: &'static Currency,
        delivery_fee: Money<'static, Currency>,
        tax_rate: Percentage,
        notification_delay: Duration,
    ) -> Result<Self, ConfigError> {
        if delivery_fee.currency() != currency {
            return Err(ConfigError::CurrencyMismatch(
                currency.iso_alpha_code.to_string(),
                delivery_fee.currency().iso_alpha_code.to_string(),
            ));
        }

        Ok(Self {
            currency,
            delivery_fee,
            tax_rate,
            notification_delay,
        })
    }

    /// Parse a configuration from YAML.
    ///
    /// ```yaml
    /// currency: INR
    /// delivery_fee: 25 INR
    /// tax_rate: 0.08
    /// notification_delay_ms: 3000
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the YAML is malformed or any value is invalid.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: PricingConfigFile = serde_norway::from_str(contents)?;

        let currency = iso::find(&file.currency)
            .ok_or_else(|| ConfigError::UnknownCurrency(file.currency.clone()))?;

        let delivery_fee = parse_price(&file.delivery_fee)?;

        let tax_rate = Decimal::from_f64(file.tax_rate)
            .filter(|rate| *rate >= Decimal::ZERO && *rate <= Decimal::ONE)
            .ok_or(ConfigError::InvalidTaxRate(file.tax_rate))?;

        Self::new(
            currency,
            delivery_fee,
            Percentage::from(tax_rate),
            Duration::from_millis(file.notification_delay_ms),
        )
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Currency every price must be in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Flat delivery fee added to every order.
    pub fn delivery_fee(&self) -> Money<'static, Currency> {
        self.delivery_fee
    }

    /// Tax rate as a fraction of the subtotal.
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }

    /// How long a notification stays visible.
    pub fn notification_delay(&self) -> Duration {
        self.notification_delay
    }
}

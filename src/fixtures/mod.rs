//! Fixtures
//!
//! Catalog and pricing data loaded from YAML files under a base directory:
//!
//! - `catalog/<name>.yml`: restaurants with their menus
//! - `pricing/<name>.yml`: a [`PricingConfig`]

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    config::{ConfigError, PricingConfig},
    pricing::{PriceParseError, parse_price},
};

pub mod catalog;

use catalog::CatalogFixture;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price
    #[error(transparent)]
    Price(#[from] PriceParseError),

    /// Fixture data breaks a catalog rule
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid pricing configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The catalog file lists no restaurants, so its currency is unknown
    #[error("No restaurants loaded; currency unknown")]
    NoRestaurants,

    /// No catalog loaded yet
    #[error("No catalog loaded")]
    NoCatalog,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: Option<Catalog<'static>>,

    pricing: PricingConfig,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            pricing: PricingConfig::default(),
        }
    }

    /// Load restaurants and menus from `catalog/<name>.yml`.
    ///
    /// The catalog currency is taken from the first restaurant's delivery fee; every other
    /// price must match it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is invalid, or the data
    /// breaks a catalog rule (duplicate ids, mixed currencies).
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        let first = fixture
            .restaurants
            .first()
            .ok_or(FixtureError::NoRestaurants)?;
        let currency = parse_price(&first.delivery_fee)?.currency();

        let mut catalog = Catalog::new(currency);

        for restaurant_fixture in fixture.restaurants {
            catalog.insert_restaurant((&restaurant_fixture).try_into()?)?;

            for item_fixture in restaurant_fixture.menu {
                catalog.insert_menu_item(item_fixture.try_into_menu_item(&restaurant_fixture.id)?)?;
            }
        }

        self.catalog = Some(catalog);

        Ok(self)
    }

    /// Load pricing configuration from `pricing/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or holds an invalid configuration.
    pub fn load_pricing(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("pricing").join(format!("{name}.yml"));

        self.pricing = PricingConfig::load(file_path)?;

        Ok(self)
    }

    /// Load a complete fixture set (catalog and pricing with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_catalog(name)?.load_pricing(name)?;

        Ok(fixture)
    }

    /// Loaded catalog
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCatalog`] if no catalog has been loaded.
    pub fn catalog(&self) -> Result<&Catalog<'static>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCatalog)
    }

    /// Loaded pricing configuration, or the default if none was loaded
    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Split into the catalog and pricing configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCatalog`] if no catalog has been loaded.
    pub fn into_parts(self) -> Result<(Catalog<'static>, PricingConfig), FixtureError> {
        let catalog = self.catalog.ok_or(FixtureError::NoCatalog)?;

        Ok((catalog, self.pricing))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::{Money, iso::INR};
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn write_catalog(dir: &TempDir, name: &str, contents: &str) -> TestResult {
        let catalog_dir = dir.path().join("catalog");
        fs::create_dir_all(&catalog_dir)?;
        fs::write(catalog_dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn from_set_loads_demo_fixtures() -> TestResult {
        let fixture = Fixture::from_set("demo")?;
        let catalog = fixture.catalog()?;

        assert_eq!(catalog.currency(), INR);
        assert!(!catalog.is_empty());
        assert_eq!(fixture.pricing().delivery_fee(), Money::from_minor(2_500, INR));

        Ok(())
    }

    #[test]
    fn load_catalog_from_custom_base_path() -> TestResult {
        let dir = TempDir::new()?;
        write_catalog(
            &dir,
            "tiny",
            "restaurants:
  - id: chai-point
    name: Chai Point
    cuisine: Cafe
    delivery_fee: 20 INR
    min_order: 99 INR
    menu:
      - id: masala-chai
        name: Masala Chai
        price: 40 INR
        category: Drinks
",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_catalog("tiny")?;

        let catalog = fixture.catalog()?;
        let chai = catalog
            .menu_item(&"masala-chai".into())
            .ok_or("missing item")?;

        assert_eq!(chai.price, Money::from_minor(4_000, INR));
        assert_eq!(chai.restaurant_id.as_str(), "chai-point");

        Ok(())
    }

    #[test]
    fn mixed_currencies_are_rejected() -> TestResult {
        let dir = TempDir::new()?;
        write_catalog(
            &dir,
            "mixed",
            "restaurants:
  - id: chai-point
    name: Chai Point
    cuisine: Cafe
    delivery_fee: 20 INR
    min_order: 99 INR
    menu:
      - id: latte
        name: Latte
        price: 4.50 USD
        category: Drinks
",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_catalog("mixed");

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::CurrencyMismatch(_, _)))
        ));

        Ok(())
    }

    #[test]
    fn empty_catalog_is_rejected() -> TestResult {
        let dir = TempDir::new()?;
        write_catalog(&dir, "empty", "restaurants: []\n")?;

        let mut fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(
            fixture.load_catalog("empty"),
            Err(FixtureError::NoRestaurants)
        ));

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut fixture = Fixture::with_base_path("does/not/exist");

        assert!(matches!(
            fixture.load_catalog("demo"),
            Err(FixtureError::Io(_))
        ));
    }

    #[test]
    fn catalog_before_loading_errors() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.catalog(), Err(FixtureError::NoCatalog)));
    }
}

//! # Settings
//!
//! Layered configuration: built-in defaults, then an optional TOML file,
//! then `TOW_PRICING_*` environment variables (`__` separates nested keys,
//! e.g. `TOW_PRICING_PRICING__TRAVEL_RATE_PER_MILE=2.10`).
//!
//! ```toml
//! [pricing]
//! discount_rate = "0.15"
//! travel_rate_per_mile = "1.75"
//!
//! [[services]]
//! service_name = "Towing"
//! standard_price = "100"
//! towing = true
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use crate::application::error::{InfrastructureError, InfrastructureResult};
use crate::application::services::price_catalog::DEFAULT_FALLBACK_STANDARD_PRICE;
use crate::domain::services::quote_calculator::{
    MileageRates, DEFAULT_TOW_RATE_PER_MILE, DEFAULT_TRAVEL_RATE_PER_MILE,
};
use crate::domain::value_objects::DiscountPolicy;
use crate::infrastructure::persistence::ServicePriceRecord;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tow-pricing.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TOW_PRICING";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rates and fallbacks.
    pub pricing: PricingSettings,
    /// Catalog seed for the in-memory configuration store.
    pub services: Vec<ServicePriceRecord>,
    /// Log output.
    pub logging: LoggingSettings,
}

/// Pricing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Discount rate record for the in-memory store. Unset means the store
    /// has no record and the fallback applies.
    pub discount_rate: Option<Decimal>,
    /// Rate used while the configured one is loading or unusable.
    pub fallback_discount_rate: Decimal,
    /// Standard price shown for unknown services and while loading.
    pub fallback_standard_price: Decimal,
    /// Dollars per travel mile.
    pub travel_rate_per_mile: Decimal,
    /// Dollars per tow mile.
    pub tow_rate_per_mile: Decimal,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            discount_rate: None,
            fallback_discount_rate: DiscountPolicy::FALLBACK_RATE,
            fallback_standard_price: DEFAULT_FALLBACK_STANDARD_PRICE,
            travel_rate_per_mile: DEFAULT_TRAVEL_RATE_PER_MILE,
            tow_rate_per_mile: DEFAULT_TOW_RATE_PER_MILE,
        }
    }
}

impl PricingSettings {
    /// Returns the fallback discount policy.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` if the rate is outside
    /// `[0, 1)`.
    pub fn fallback_policy(&self) -> InfrastructureResult<DiscountPolicy> {
        DiscountPolicy::new(self.fallback_discount_rate).map_err(|e| {
            InfrastructureError::configuration(format!("pricing.fallback_discount_rate: {e}"))
        })
    }

    /// Returns the per-mile rates.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` if a rate is negative.
    pub fn mileage_rates(&self) -> InfrastructureResult<MileageRates> {
        MileageRates::new(self.travel_rate_per_mile, self.tow_rate_per_mile).map_err(|e| {
            InfrastructureError::configuration(format!("pricing mileage rates: {e}"))
        })
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Loads settings from `path` (required) or [`DEFAULT_CONFIG_FILE`]
    /// (optional), then applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` if a source cannot be
    /// read or parsed, or if validation fails.
    pub fn load(path: Option<&Path>) -> InfrastructureResult<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        Self::build(Config::builder().add_source(file).add_source(environment()))
    }

    /// Parses settings from a TOML document, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` if the document is
    /// malformed or validation fails.
    pub fn from_toml_str(toml: &str) -> InfrastructureResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> InfrastructureResult<Self> {
        let settings: Self = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| InfrastructureError::configuration(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks rates, fallbacks, and the service seed.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` describing the first
    /// invalid value.
    pub fn validate(&self) -> InfrastructureResult<()> {
        self.pricing.fallback_policy()?;
        self.pricing.mileage_rates()?;
        if self.pricing.fallback_standard_price <= Decimal::ZERO {
            return Err(InfrastructureError::configuration(format!(
                "pricing.fallback_standard_price must be positive, got {}",
                self.pricing.fallback_standard_price
            )));
        }

        let mut seen = HashSet::new();
        for record in &self.services {
            if record.standard_price <= Decimal::ZERO {
                return Err(InfrastructureError::configuration(format!(
                    "service {:?}: standard_price must be positive, got {}",
                    record.service_name, record.standard_price
                )));
            }
            if !seen.insert(record.service_name.as_str()) {
                return Err(InfrastructureError::configuration(format!(
                    "service {:?} configured twice",
                    record.service_name
                )));
            }
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

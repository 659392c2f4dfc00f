//! `tow-quote`: price a service request from the command line.
//!
//! ```text
//! tow-quote --service Towing --travel-miles 10 --tow-miles 20
//! ```
//!
//! Prints the priced quote as JSON on stdout; logs go to stderr.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tow_pricing::application::services::{DiscountPolicyResolver, PriceCatalog, QuoteService};
use tow_pricing::domain::services::quote_calculator::TripDistances;
use tow_pricing::infrastructure::config::Settings;
use tow_pricing::infrastructure::persistence::in_memory::InMemoryPricingConfigStore;
use tow_pricing::infrastructure::telemetry::init_tracing;
use tracing::{debug, warn};

/// Price a towing or roadside service.
#[derive(Debug, Parser)]
#[command(name = "tow-quote", version, about)]
struct Args {
    /// Service name, matched exactly against the catalog.
    #[arg(long)]
    service: String,

    /// Miles from the driver to the pickup.
    #[arg(long)]
    travel_miles: Option<f64>,

    /// Miles from pickup to drop-off.
    #[arg(long)]
    tow_miles: Option<f64>,

    /// Bill tow miles even if the service is not in the catalog.
    #[arg(long)]
    towing: bool,

    /// Settings file (defaults to ./tow-pricing.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    init_tracing(&settings.logging).context("initializing logging")?;
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    let store = Arc::new(InMemoryPricingConfigStore::from_settings(&settings));
    let catalog = Arc::new(
        PriceCatalog::new(store)
            .with_resolver(DiscountPolicyResolver::new(settings.pricing.fallback_policy()?))
            .with_fallback_price(settings.pricing.fallback_standard_price),
    );
    if let Err(e) = catalog.refresh().await {
        warn!(error = %e, "quoting with fallback prices");
    }

    let service = QuoteService::new(catalog, settings.pricing.mileage_rates()?);
    let trip = TripDistances::new(args.travel_miles, args.tow_miles, args.towing);
    let priced = service.quote(&args.service, trip);

    let json = serde_json::to_string_pretty(&priced).context("serializing quote")?;
    println!("{json}");
    Ok(())
}

//! # Persistence Layer
//!
//! Ports for the pricing configuration store and the job and partner
//! records, with in-memory adapters.
//!
//! ## Ports
//!
//! - [`PricingConfigStore`]: Service catalog and discount rate
//! - [`JobRepository`]: Persistence for jobs
//! - [`PartnerRepository`]: Persistence for partners
//!
//! ## Implementations
//!
//! - `in_memory`: Thread-safe in-memory adapters

pub mod in_memory;
pub mod traits;

pub use traits::{
    JobRepository, PartnerRepository, PricingConfigStore, RepositoryError, RepositoryResult,
    ServicePriceRecord,
};

//! # In-Memory Repositories
//!
//! In-memory implementations for tests and the CLI.
//!
//! ## Available Repositories
//!
//! - [`InMemoryPricingConfigStore`]: Pricing configuration, seedable from settings
//! - [`InMemoryJobRepository`]: Job persistence
//! - [`InMemoryPartnerRepository`]: Partner persistence
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<..>>` for thread-safe access.

pub mod job_repository;
pub mod partner_repository;
pub mod pricing_config_store;

pub use job_repository::InMemoryJobRepository;
pub use partner_repository::InMemoryPartnerRepository;
pub use pricing_config_store::InMemoryPricingConfigStore;

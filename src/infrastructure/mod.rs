//! # Infrastructure Layer
//!
//! Adapters around the engine: record stores, settings, and log setup.
//!
//! - [`persistence`]: Store ports and in-memory adapters
//! - [`config`]: Layered settings
//! - [`telemetry`]: `tracing` subscriber setup

pub mod config;
pub mod persistence;
pub mod telemetry;

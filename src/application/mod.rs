//! # Application Layer
//!
//! Use cases built on the domain calculators: catalog lookup, quoting,
//! and partner commission bookkeeping.

pub mod error;
pub mod services;

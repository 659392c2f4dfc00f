//! # Domain Layer
//!
//! Business types and the pure pricing calculators. Nothing here performs
//! I/O.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

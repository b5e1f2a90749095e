//! Budget Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for yearly budgets.
//! It is database-agnostic and defines the repository trait that is
//! implemented by the `storage-sqlite` crate.

pub mod budgets;
pub mod errors;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

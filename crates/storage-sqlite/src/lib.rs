//! SQLite storage implementation for the budget service.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository trait defined in `budget-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor that serializes all writes
//! - Database-specific model types (with Diesel derives)
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!     storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod budgets;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from budget-core for convenience
pub use budget_core::errors::{DatabaseError, Error, Result};

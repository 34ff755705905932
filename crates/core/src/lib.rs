//! Pocketledger Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for the finance tracker.
//! It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod analytics;
pub mod budgets;
pub mod errors;
pub mod events;
pub mod goals;
pub mod pagination;
pub mod transactions;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

// Re-export pagination types used by every list surface
pub use pagination::{PageRequest, Paginated};

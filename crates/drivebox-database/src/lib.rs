//! # drivebox-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for the Drivebox tree store. Every statement is its own
//! atomicity boundary — no multi-statement transactions are used, and the
//! service layer is written to tolerate partial completion of multi-row
//! operations.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::create_pool;

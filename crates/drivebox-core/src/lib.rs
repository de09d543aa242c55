//! # drivebox-core
//!
//! Core crate for Drivebox. Contains configuration schemas, the traits for
//! the two external collaborators (blob store and identity provider), and
//! the unified error system.
//!
//! This crate has **no** internal dependencies on other Drivebox crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;

//! # drivebox-api
//!
//! HTTP API layer for Drivebox built on Axum.
//!
//! Provides the authenticated drive endpoints, the anonymous share
//! endpoints, the blob-store upload callback, extractors, DTOs,
//! middleware, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{assemble_state, build_state};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

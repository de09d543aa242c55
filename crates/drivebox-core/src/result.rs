//! Application result alias.

use crate::error::AppError;

/// Convenience alias used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

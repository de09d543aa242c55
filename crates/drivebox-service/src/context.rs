//! Request context carrying the resolved caller identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current authenticated request.
///
/// Built by the API layer after the identity gate resolved the session
/// token, and passed into every service method so each operation knows
/// *who* is acting without reaching for ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's stable identifier.
    pub user_id: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            request_time: Utc::now(),
        }
    }
}

//! Session token claims.

use serde::{Deserialize, Serialize};

/// Claims carried by a session token from the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The stable user identifier.
    pub sub: String,
    /// Token issuer.
    #[serde(default)]
    pub iss: Option<String>,
    /// Expiry (seconds since epoch).
    pub exp: i64,
    /// Issued-at (seconds since epoch).
    #[serde(default)]
    pub iat: Option<i64>,
}

//! Session verification configuration.

use serde::{Deserialize, Serialize};

/// Settings for verifying session tokens issued by the external identity
/// provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the identity provider.
    pub session_secret: String,
    /// Expected `iss` claim; empty disables issuer validation.
    #[serde(default)]
    pub issuer: String,
    /// Accepted clock skew in seconds when validating expiry.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    30
}

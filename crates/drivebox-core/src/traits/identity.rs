//! Identity gate trait — resolves opaque session tokens to owner ids.

use async_trait::async_trait;

use crate::result::AppResult;

/// Resolves an opaque session token into a stable user identifier.
///
/// The identity provider is external; this trait is the whole surface the
/// rest of the application sees. Every tree operation is scoped by the
/// identifier this returns.
#[async_trait]
pub trait SessionVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Verify a session token and return the user id it belongs to.
    ///
    /// Fails with `Unauthorized` for missing, malformed, or expired
    /// tokens.
    async fn verify(&self, token: &str) -> AppResult<String>;
}

//! JWT-based session verification.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use drivebox_core::config::auth::AuthConfig;
use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::SessionVerifier;

use crate::claims::SessionClaims;

/// Verifies HS256-signed session tokens issued by the identity provider.
#[derive(Clone)]
pub struct JwtSessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtSessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionVerifier").finish()
    }
}

impl JwtSessionVerifier {
    /// Create a verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        if !config.issuer.is_empty() {
            validation.set_issuer(&[&config.issuer]);
        }
        Self {
            decoding_key: DecodingKey::from_secret(config.session_secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionVerifier for JwtSessionVerifier {
    async fn verify(&self, token: &str) -> AppResult<String> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid session token: {e}")))?;

        if data.claims.sub.is_empty() {
            return Err(AppError::unauthorized("Session token has no subject"));
        }
        Ok(data.claims.sub)
    }
}

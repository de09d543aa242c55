//! Share link token generation.

use rand::Rng;

/// Generates share link tokens.
#[derive(Debug, Clone)]
pub struct LinkService;

impl LinkService {
    /// Creates a new link service.
    pub fn new() -> Self {
        Self
    }

    /// Generates an unguessable token: 128 bits of randomness,
    /// hex-encoded without separators.
    pub fn generate_token(&self) -> String {
        let bytes: [u8; 16] = rand::rng().random();
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl Default for LinkService {
    fn default() -> Self {
        Self::new()
    }
}

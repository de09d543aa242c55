//! # drivebox-auth
//!
//! Identity gate for Drivebox. Sessions are issued by an external
//! identity provider; this crate only verifies the signed session token
//! and hands the stable user identifier (`sub`) to the rest of the
//! application. Nothing outside this crate ever inspects a token.

pub mod claims;
pub mod verifier;

pub use claims::SessionClaims;
pub use verifier::JwtSessionVerifier;

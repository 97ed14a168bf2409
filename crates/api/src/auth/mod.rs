//! Access-token verification.
//!
//! Tokens are issued by the identity provider; this service only checks
//! their signature and expiry and reads the caller identity from the claims.

pub mod jwt;

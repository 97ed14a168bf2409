//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::OptionalAuthUser`] -- Accepts anonymous requests but rejects bad tokens.

pub mod auth;

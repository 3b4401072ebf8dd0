//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the session context resolved from a Bearer token.

pub mod auth;

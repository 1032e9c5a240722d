//! Authentication types and flows for the Fortnox API.
//!
//! This module provides scope handling, session management, the
//! client-credentials token exchange, and the connectivity test.

mod scopes;
mod session;
mod token;

pub use scopes::{Scope, ScopeSet};
pub use session::Session;
pub use token::{
    fetch_access_token, verify_connection, AuthError, Verification, VerificationStatus,
};

//! Session management for Fortnox API authentication.
//!
//! This module provides the [`Session`] type holding the short-lived access
//! token obtained from the client-credentials exchange.

use crate::auth::ScopeSet;
use chrono::{DateTime, Utc};

/// An authenticated session for Fortnox API calls.
///
/// A session holds the bearer token and the scopes the vendor actually
/// granted. Tokens are short-lived; the session carries the expiry so an
/// embedding host can decide when to fetch a fresh one. The SDK itself
/// never caches or refreshes tokens — a [`crate::FortnoxClient`] is built
/// from a session and uses that token for its lifetime.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`, making it safe to share across threads.
///
/// # Example
///
/// ```rust
/// use fortnox_api::{ScopeSet, Session};
///
/// let session = Session::new(
///     "access-token".to_string(),
///     "invoice customer".parse().unwrap(),
///     None,
/// );
///
/// assert!(session.is_active());
/// assert!(!session.expired());
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    /// The bearer token for API authentication.
    pub access_token: String,

    /// The scopes granted with this token.
    pub scopes: ScopeSet,

    /// When this token expires, if known.
    pub expires: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a new session with the specified parameters.
    #[must_use]
    pub const fn new(
        access_token: String,
        scopes: ScopeSet,
        expires: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token,
            scopes,
            expires,
        }
    }

    /// Returns `true` if this session's token has expired.
    ///
    /// Sessions without a known expiry are considered never expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns `true` if this session is usable (has a token and is not expired).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

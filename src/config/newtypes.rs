//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Fortnox client ID.
///
/// This newtype ensures the client ID is non-empty and provides type safety
/// to prevent accidental misuse of raw strings.
///
/// # Example
///
/// ```rust
/// use fortnox_api::ClientId;
///
/// let id = ClientId::new("my-client-id").unwrap();
/// assert_eq!(id.as_ref(), "my-client-id");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ClientId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated Fortnox client secret.
///
/// This newtype ensures the secret is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ClientSecret(*****)` instead of the actual key.
///
/// # Example
///
/// ```rust
/// use fortnox_api::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated Fortnox tenant identifier.
///
/// The tenant ID is the numeric company/database identifier scoping all API
/// calls, also known as the DatabaseNumber in Fortnox company information.
/// It is sent as the `TenantId` header on token requests.
///
/// # Example
///
/// ```rust
/// use fortnox_api::TenantId;
///
/// let tenant = TenantId::new("123456").unwrap();
/// assert_eq!(tenant.as_ref(), "123456");
///
/// // Non-numeric identifiers are rejected
/// assert!(TenantId::new("acme-ab").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a new validated tenant ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTenantId`] if the value is empty or
    /// contains non-digit characters.
    pub fn new(tenant: impl Into<String>) -> Result<Self, ConfigError> {
        let tenant = tenant.into();
        let tenant = tenant.trim().to_string();

        if tenant.is_empty() || !tenant.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidTenantId { tenant });
        }

        Ok(Self(tenant))
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TenantId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TenantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated base URL override.
///
/// Used for the API base and token endpoint overrides, primarily to point
/// the SDK at a mock server in tests or at a proxy in production setups.
/// Trailing slashes are stripped so path concatenation stays predictable.
///
/// # Example
///
/// ```rust
/// use fortnox_api::BaseUrl;
///
/// let base = BaseUrl::new("https://api.fortnox.se/").unwrap();
/// assert_eq!(base.as_ref(), "https://api.fortnox.se");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not start
    /// with an `http://` or `https://` scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }
        // Require a host after the scheme
        let rest = url.splitn(2, "://").nth(1).unwrap_or("");
        if rest.is_empty() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(url))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_rejects_empty() {
        assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
    }

    #[test]
    fn test_client_id_round_trips() {
        let id = ClientId::new("abc123").unwrap();
        assert_eq!(id.as_ref(), "abc123");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""abc123""#);

        let back: ClientId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_client_secret_rejects_empty() {
        assert!(matches!(
            ClientSecret::new(""),
            Err(ConfigError::EmptyClientSecret)
        ));
    }

    #[test]
    fn test_client_secret_debug_is_masked() {
        let secret = ClientSecret::new("super-secret-value").unwrap();
        let debug = format!("{secret:?}");
        assert_eq!(debug, "ClientSecret(*****)");
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn test_tenant_id_accepts_digits() {
        let tenant = TenantId::new("987654").unwrap();
        assert_eq!(tenant.as_ref(), "987654");
        assert_eq!(tenant.to_string(), "987654");
    }

    #[test]
    fn test_tenant_id_trims_whitespace() {
        let tenant = TenantId::new("  123  ").unwrap();
        assert_eq!(tenant.as_ref(), "123");
    }

    #[test]
    fn test_tenant_id_rejects_non_numeric() {
        assert!(matches!(
            TenantId::new("acme-ab"),
            Err(ConfigError::InvalidTenantId { .. })
        ));
        assert!(matches!(
            TenantId::new(""),
            Err(ConfigError::InvalidTenantId { .. })
        ));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let base = BaseUrl::new("https://api.fortnox.se/").unwrap();
        assert_eq!(base.as_ref(), "https://api.fortnox.se");
    }

    #[test]
    fn test_base_url_accepts_http_for_local_mocks() {
        let base = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(base.as_ref(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_base_url_rejects_missing_scheme() {
        assert!(matches!(
            BaseUrl::new("api.fortnox.se"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            BaseUrl::new("https://"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}

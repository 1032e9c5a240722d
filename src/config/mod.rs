//! Configuration types for the Fortnox API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with Fortnox.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`FortnoxConfig`]: The main configuration struct holding all SDK settings
//! - [`FortnoxConfigBuilder`]: A builder for constructing [`FortnoxConfig`] instances
//! - [`ClientId`]: A validated client ID newtype
//! - [`ClientSecret`]: A validated client secret newtype with masked debug output
//! - [`TenantId`]: A validated numeric tenant identifier
//! - [`BaseUrl`]: A validated URL override for the API base or token endpoint
//!
//! # Example
//!
//! ```rust
//! use fortnox_api::{FortnoxConfig, ClientId, ClientSecret, TenantId};
//!
//! let config = FortnoxConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .tenant_id(TenantId::new("123456").unwrap())
//!     .scopes("companyinformation invoice customer".parse().unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, ClientId, ClientSecret, TenantId};

use crate::auth::ScopeSet;
use crate::error::ConfigError;

/// Default base URL for the Fortnox REST API.
pub const DEFAULT_API_BASE: &str = "https://api.fortnox.se";

/// Default URL for the Fortnox OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://apps.fortnox.se/oauth-v1/token";

/// Configuration for the Fortnox API SDK.
///
/// This struct holds all configuration needed for SDK operations, including
/// client credentials, the tenant identifier, and the scopes to request when
/// obtaining access tokens.
///
/// # Thread Safety
///
/// `FortnoxConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # URL Overrides
///
/// The `api_base` and `token_url` fields default to the public Fortnox
/// endpoints and are overridable for proxy setups and tests.
///
/// # Example
///
/// ```rust
/// use fortnox_api::{FortnoxConfig, ClientId, ClientSecret, TenantId};
///
/// let config = FortnoxConfig::builder()
///     .client_id(ClientId::new("id").unwrap())
///     .client_secret(ClientSecret::new("secret").unwrap())
///     .tenant_id(TenantId::new("42").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_base(), "https://api.fortnox.se");
/// ```
#[derive(Clone, Debug)]
pub struct FortnoxConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    tenant_id: TenantId,
    scopes: ScopeSet,
    api_base: Option<BaseUrl>,
    token_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

// Verify FortnoxConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FortnoxConfig>();
};

impl FortnoxConfig {
    /// Creates a new builder for constructing a `FortnoxConfig`.
    #[must_use]
    pub fn builder() -> FortnoxConfigBuilder {
        FortnoxConfigBuilder::new()
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the tenant identifier.
    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the scopes requested when obtaining access tokens.
    #[must_use]
    pub const fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    /// Returns the API base URL.
    ///
    /// Defaults to [`DEFAULT_API_BASE`] unless overridden.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_ref()
            .map_or(DEFAULT_API_BASE, BaseUrl::as_ref)
    }

    /// Returns the OAuth token endpoint URL.
    ///
    /// Defaults to [`DEFAULT_TOKEN_URL`] unless overridden.
    #[must_use]
    pub fn token_url(&self) -> &str {
        self.token_url
            .as_ref()
            .map_or(DEFAULT_TOKEN_URL, BaseUrl::as_ref)
    }

    /// Returns the User-Agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

/// Builder for constructing [`FortnoxConfig`] instances.
///
/// Required fields are `client_id`, `client_secret`, and `tenant_id`;
/// [`build`](Self::build) fails with [`ConfigError::MissingRequiredField`]
/// if any of them is unset. Scopes default to the empty set.
#[derive(Debug, Default)]
pub struct FortnoxConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    tenant_id: Option<TenantId>,
    scopes: ScopeSet,
    api_base: Option<BaseUrl>,
    token_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl FortnoxConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the client secret (required).
    #[must_use]
    pub fn client_secret(mut self, client_secret: ClientSecret) -> Self {
        self.client_secret = Some(client_secret);
        self
    }

    /// Sets the tenant identifier (required).
    #[must_use]
    pub fn tenant_id(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Sets the scopes to request when obtaining access tokens.
    #[must_use]
    pub fn scopes(mut self, scopes: ScopeSet) -> Self {
        self.scopes = scopes;
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn api_base(mut self, api_base: BaseUrl) -> Self {
        self.api_base = Some(api_base);
        self
    }

    /// Overrides the OAuth token endpoint URL.
    #[must_use]
    pub fn token_url(mut self, token_url: BaseUrl) -> Self {
        self.token_url = Some(token_url);
        self
    }

    /// Sets a prefix for the User-Agent header on outgoing requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`FortnoxConfig`], validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id`,
    /// `client_secret`, or `tenant_id` has not been set.
    pub fn build(self) -> Result<FortnoxConfig, ConfigError> {
        let client_id = self.client_id.ok_or(ConfigError::MissingRequiredField {
            field: "client_id",
        })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;
        let tenant_id = self.tenant_id.ok_or(ConfigError::MissingRequiredField {
            field: "tenant_id",
        })?;

        Ok(FortnoxConfig {
            client_id,
            client_secret,
            tenant_id,
            scopes: self.scopes,
            api_base: self.api_base,
            token_url: self.token_url,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

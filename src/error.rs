//! Error types for SDK configuration.
//!
//! This module contains error types used for configuration and validation
//! errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use fortnox_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Find it in the Fortnox Developer Portal under your app settings.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Find it in the Fortnox Developer Portal under your app settings.")]
    EmptyClientSecret,

    /// Tenant ID is invalid.
    #[error("Invalid tenant ID '{tenant}'. Expected the numeric company identifier (the DatabaseNumber in Fortnox company information).")]
    InvalidTenantId {
        /// The invalid tenant identifier that was provided.
        tenant: String,
    },

    /// A scope name is not one of the known Fortnox consent scopes.
    #[error("Unknown scope '{scope}'. Scopes must match those granted during client consent in the Fortnox Developer Portal.")]
    UnknownScope {
        /// The unrecognized scope name.
        scope: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A base URL override is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.fortnox.se').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

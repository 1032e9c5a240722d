//! # Fortnox API Rust SDK
//!
//! A Rust SDK for the Fortnox accounting API, providing type-safe
//! configuration, client-credentials authentication, and typed resource
//! operations over invoices, orders, customers, and articles.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`FortnoxConfig`] and [`FortnoxConfigBuilder`]
//! - Validated newtypes for API credentials and the tenant identifier
//! - Consent scope handling with requested-vs-granted comparison
//! - OAuth 2.0 client-credentials token exchange via [`auth`]
//! - A connectivity test for credential-verification UIs
//! - An async HTTP client with rate-limit backoff and vendor-error translation
//! - Multi-page accumulation over Fortnox list pagination metadata
//! - Typed (resource, operation) dispatch with static field schema tables
//! - A sequential batch runner with a continue-on-fail policy
//!
//! ## Quick Start
//!
//! ```rust
//! use fortnox_api::{ClientId, ClientSecret, FortnoxConfig, TenantId};
//!
//! // Create configuration using the builder pattern
//! let config = FortnoxConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .client_secret(ClientSecret::new("your-client-secret").unwrap())
//!     .tenant_id(TenantId::new("123456").unwrap())
//!     .scopes("companyinformation invoice customer".parse().unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Authentication
//!
//! Fortnox issues short-lived tenant-scoped tokens through a
//! client-credentials exchange:
//!
//! ```rust,ignore
//! use fortnox_api::auth::{fetch_access_token, verify_connection};
//!
//! // Exchange client credentials for a bearer token
//! let session = fetch_access_token(&config).await?;
//!
//! // Or test the credential set end to end
//! let verification = verify_connection(&config).await;
//! println!("{}", verification.message);
//! ```
//!
//! Token refresh is the embedding host's concern: build a new session when
//! [`Session::expired`] says so and construct a fresh client from it.
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use fortnox_api::{ApiRequest, FortnoxClient, HttpMethod};
//!
//! let client = FortnoxClient::new(&config, &session);
//!
//! // Single call; the parsed body comes back unchanged
//! let request = ApiRequest::builder(HttpMethod::Get, "/3/invoices/42").build();
//! let response = client.request(&request).await?;
//! println!("{}", response.body["Invoice"]);
//!
//! // Or let the pager walk every page of a list endpoint
//! let invoices = client
//!     .fetch_all(HttpMethod::Get, "/3/invoices", "Invoices", None, Default::default())
//!     .await?;
//! ```
//!
//! ## Resource Operations
//!
//! ```rust,ignore
//! use fortnox_api::resources::{handle, Operation};
//!
//! let operation = Operation::parse("invoice", "bookkeep")?;
//! let params = serde_json::json!({ "documentNumber": "42" });
//! let output = handle(&client, operation, params.as_object().unwrap()).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Errors are surfaced, never swallowed**: every failed call raises a
//!   translated error scoped to that call

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;
pub mod runner;

// Re-export public types at crate root for convenience
pub use auth::{Scope, ScopeSet, Session};
pub use config::{
    BaseUrl, ClientId, ClientSecret, FortnoxConfig, FortnoxConfigBuilder, TenantId,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, ApiRequest, ApiRequestBuilder, ApiResponse, FortnoxClient, HttpMethod, RequestError,
};

// Re-export auth flows for convenience
pub use auth::{fetch_access_token, verify_connection, AuthError, Verification, VerificationStatus};

// Re-export operation dispatch types
pub use resources::{Operation, OperationError, OperationOutput, Resource};
pub use runner::run_batch;

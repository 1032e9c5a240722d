//! OAuth 2.0 Client Credentials Grant for Fortnox integrations.
//!
//! Fortnox issues short-lived bearer tokens through a client-credentials
//! exchange scoped to a tenant (the company's DatabaseNumber). This module
//! implements that exchange plus the connectivity test used to verify a
//! credential set before it is put to work.
//!
//! # Overview
//!
//! The token request is a single POST to the Fortnox OAuth endpoint with:
//! - HTTP Basic authentication built from `client_id:client_secret`
//! - a `TenantId` header carrying the numeric company identifier
//! - a form-encoded body: `grant_type=client_credentials&scope=<scopes>`
//!
//! The granted scopes come back space-joined in the response and may be a
//! subset of what was requested; [`verify_connection`] surfaces the
//! difference as a warning rather than a failure.
//!
//! # Failure Handling
//!
//! [`fetch_access_token`] propagates failures as [`AuthError`] — callers
//! that sit behind it (the request executor) interpret them. The
//! connectivity test never returns an error: it folds every failure into
//! a [`Verification`] status/message pair for credential-check UIs.
//!
//! # Example
//!
//! ```rust,ignore
//! use fortnox_api::auth::{fetch_access_token, verify_connection};
//!
//! let session = fetch_access_token(&config).await?;
//! println!("token: {}", session.access_token);
//!
//! let verification = verify_connection(&config).await;
//! println!("{:?}: {}", verification.status, verification.message);
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{Duration, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::auth::{Scope, ScopeSet, Session};
use crate::config::FortnoxConfig;

/// Grant type for the client-credentials exchange.
const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Errors that can occur while obtaining an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token request failed.
    ///
    /// Network-level failures carry status 0; HTTP-level rejections carry
    /// the response status and body text.
    #[error("Token request failed with status {status}: {message}")]
    TokenRequestFailed {
        /// The HTTP status code returned (0 for network errors).
        status: u16,
        /// The error message or response body.
        message: String,
    },
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};

/// Token endpoint response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    scope: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Parses the granted scope string leniently.
///
/// The vendor may grant scope names this SDK does not model; those are
/// skipped rather than failing the whole exchange.
fn parse_granted_scopes(scope: &str) -> ScopeSet {
    scope
        .split_whitespace()
        .filter_map(|name| name.parse::<Scope>().ok())
        .collect()
}

/// Exchanges client credentials for an access token.
///
/// Performs one POST to the configured token endpoint using HTTP Basic
/// authentication, the `TenantId` header, and a form-encoded
/// `grant_type=client_credentials&scope=...` body. Returns a [`Session`]
/// whose scopes are the *granted* set from the response.
///
/// # Errors
///
/// Returns [`AuthError::TokenRequestFailed`] if the request cannot be sent,
/// the endpoint rejects the credentials, or the response cannot be parsed.
/// Failures are not interpreted here — the caller decides how to react.
pub async fn fetch_access_token(config: &FortnoxConfig) -> Result<Session, AuthError> {
    let basic = BASE64.encode(format!(
        "{}:{}",
        config.client_id().as_ref(),
        config.client_secret().as_ref()
    ));
    let scope_string = config.scopes().to_scope_string();
    let body = format!(
        "grant_type={CLIENT_CREDENTIALS_GRANT_TYPE}&scope={}",
        urlencoding::encode(&scope_string)
    );

    let client = reqwest::Client::new();
    let response = client
        .post(config.token_url())
        .header("Authorization", format!("Basic {basic}"))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("TenantId", config.tenant_id().as_ref())
        .body(body)
        .send()
        .await
        .map_err(|e| AuthError::TokenRequestFailed {
            status: 0,
            message: format!("Network error: {e}"),
        })?;

    let status = response.status().as_u16();

    if !response.status().is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(AuthError::TokenRequestFailed {
            status,
            message: error_body,
        });
    }

    let token_response: TokenResponse =
        response
            .json()
            .await
            .map_err(|e| AuthError::TokenRequestFailed {
                status,
                message: format!("Failed to parse token response: {e}"),
            })?;

    let expires = token_response
        .expires_in
        .map(|seconds| Utc::now() + Duration::seconds(seconds));

    Ok(Session::new(
        token_response.access_token,
        parse_granted_scopes(&token_response.scope),
        expires,
    ))
}

/// Outcome status of a connectivity test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    /// The credentials work; the message may still carry a scope warning.
    Ok,
    /// The credentials do not work; the message carries the reason.
    Error,
}

/// Result of a connectivity test: a status plus a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verification {
    /// Whether the credential set is usable.
    pub status: VerificationStatus,
    /// Human-readable summary for credential-verification UIs.
    pub message: String,
}

/// Company information probe response body.
#[derive(Debug, Deserialize)]
struct CompanyInformationResponse {
    #[serde(rename = "CompanyInformation", default)]
    company_information: Option<CompanyInformation>,
}

#[derive(Debug, Deserialize)]
struct CompanyInformation {
    #[serde(rename = "CompanyName", default)]
    company_name: Option<String>,
}

/// Tests a credential set end to end.
///
/// Fetches a token, compares requested against granted scopes, then probes
/// the company-information endpoint with the new bearer token. Always
/// returns a [`Verification`] — failures become an `Error` status with the
/// underlying message, never a panic or a propagated error.
///
/// A successful probe with missing scopes still reports
/// [`VerificationStatus::Ok`], with the warning appended to the message so
/// the user can fix the consent configuration.
pub async fn verify_connection(config: &FortnoxConfig) -> Verification {
    // Step 1: fetch a token to learn the granted scopes
    let session = match fetch_access_token(config).await {
        Ok(session) => session,
        Err(e) => {
            return Verification {
                status: VerificationStatus::Error,
                message: format!("Authentication failed: {e}"),
            };
        }
    };

    let missing = config.scopes().missing_from(&session.scopes);
    if !missing.is_empty() {
        tracing::warn!(
            missing = %missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            "token granted without all requested scopes"
        );
    }

    // Step 2: probe the company information endpoint
    let url = format!("{}/3/companyinformation", config.api_base());
    let client = reqwest::Client::new();
    let response = match client
        .get(&url)
        .header("Authorization", format!("Bearer {}", session.access_token))
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            return Verification {
                status: VerificationStatus::Error,
                message: format!("Authentication failed: {e}"),
            };
        }
    };

    if !response.status().is_success() {
        return Verification {
            status: VerificationStatus::Error,
            message: format!(
                "Authentication failed: company information returned HTTP {}",
                response.status().as_u16()
            ),
        };
    }

    let company_name = response
        .json::<CompanyInformationResponse>()
        .await
        .ok()
        .and_then(|body| body.company_information)
        .and_then(|info| info.company_name)
        .unwrap_or_else(|| "Unknown".to_string());

    // Step 3: build the result message
    let mut message = format!("Connected to {company_name}");
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|s| s.as_str()).collect();
        message.push_str(&format!(". Warning: missing scopes: {}", names.join(", ")));
    }

    Verification {
        status: VerificationStatus::Ok,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Scope;
    use crate::config::{BaseUrl, ClientId, ClientSecret, TenantId};
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(token_url: &str, api_base: &str, scopes: &str) -> FortnoxConfig {
        FortnoxConfig::builder()
            .client_id(ClientId::new("test-client-id").unwrap())
            .client_secret(ClientSecret::new("test-client-secret").unwrap())
            .tenant_id(TenantId::new("123456").unwrap())
            .scopes(scopes.parse().unwrap())
            .token_url(BaseUrl::new(token_url).unwrap())
            .api_base(BaseUrl::new(api_base).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse_granted_scopes_skips_unknown_names() {
        let scopes = parse_granted_scopes("invoice somethingnew customer");
        assert_eq!(scopes.len(), 2);
        assert!(scopes.contains(Scope::Invoice));
        assert!(scopes.contains(Scope::Customer));
    }

    #[tokio::test]
    async fn test_token_request_sends_basic_auth_tenant_and_form_body() {
        let server = MockServer::start().await;

        // base64("test-client-id:test-client-secret")
        let expected_basic = "Basic dGVzdC1jbGllbnQtaWQ6dGVzdC1jbGllbnQtc2VjcmV0";

        Mock::given(method("POST"))
            .and(path("/oauth-v1/token"))
            .and(header("Authorization", expected_basic))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(header("TenantId", "123456"))
            .and(body_string(
                "grant_type=client_credentials&scope=customer%20invoice",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "new-token",
                "scope": "customer invoice",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(
            &format!("{}/oauth-v1/token", server.uri()),
            &server.uri(),
            "invoice customer",
        );

        let session = fetch_access_token(&config).await.unwrap();
        assert_eq!(session.access_token, "new-token");
        assert!(session.scopes.contains(Scope::Invoice));
        assert!(session.expires.is_some());
    }

    #[tokio::test]
    async fn test_token_request_failure_carries_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth-v1/token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let config = test_config(
            &format!("{}/oauth-v1/token", server.uri()),
            &server.uri(),
            "invoice",
        );

        let result = fetch_access_token(&config).await;
        match result {
            Err(AuthError::TokenRequestFailed { status, message }) => {
                assert_eq!(status, 401);
                assert!(message.contains("invalid_client"));
            }
            Ok(_) => panic!("expected token request to fail"),
        }
    }

    #[tokio::test]
    async fn test_verify_connection_reports_missing_scopes_as_warning() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth-v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "scope": "invoice"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/3/companyinformation"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "CompanyInformation": { "CompanyName": "Acme AB" }
            })))
            .mount(&server)
            .await;

        let config = test_config(
            &format!("{}/oauth-v1/token", server.uri()),
            &server.uri(),
            "invoice customer",
        );

        let verification = verify_connection(&config).await;
        assert_eq!(verification.status, VerificationStatus::Ok);
        assert!(verification.message.contains("Connected to Acme AB"));
        assert!(verification.message.contains("missing scopes"));
        assert!(verification.message.contains("customer"));
    }

    #[tokio::test]
    async fn test_verify_connection_never_raises_on_bad_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth-v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let config = test_config(
            &format!("{}/oauth-v1/token", server.uri()),
            &server.uri(),
            "invoice",
        );

        let verification = verify_connection(&config).await;
        assert_eq!(verification.status, VerificationStatus::Error);
        assert!(verification.message.starts_with("Authentication failed:"));
    }
}

//! HTTP client for Fortnox API communication.
//!
//! This module provides the [`FortnoxClient`] type for making authenticated
//! requests to the Fortnox API with automatic rate-limit retry handling.

use std::collections::HashMap;
use std::time::Duration;

use crate::auth::Session;
use crate::clients::errors::{ApiError, RequestError};
use crate::clients::request::{ApiRequest, HttpMethod};
use crate::clients::response::ApiResponse;
use crate::config::FortnoxConfig;

/// Maximum number of retries after a rate-limited response.
pub const MAX_RETRIES: u32 = 3;

/// Base delay for the exponential backoff schedule, in milliseconds.
pub const BASE_DELAY_MS: u64 = 1000;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the backoff delay before retry number `attempt + 1`.
///
/// The schedule doubles from [`BASE_DELAY_MS`]: attempt 0 waits 1s,
/// attempt 1 waits 2s, attempt 2 waits 4s.
#[must_use]
pub const fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS << attempt)
}

/// HTTP client for making authenticated requests to the Fortnox API.
///
/// The client handles:
/// - Base URL construction from the configured API base
/// - Default headers including User-Agent and the bearer token
/// - Automatic retry with exponential backoff on HTTP 429 responses
/// - Vendor error translation on failure
///
/// Token refresh is out of scope: the client uses the session token it was
/// constructed with for its whole lifetime, and the embedding host decides
/// when to mint a fresh session.
///
/// # Thread Safety
///
/// `FortnoxClient` is `Send + Sync`, making it safe to share across async
/// tasks.
///
/// # Example
///
/// ```rust,ignore
/// use fortnox_api::{ApiRequest, FortnoxClient, HttpMethod};
///
/// let client = FortnoxClient::new(&config, &session);
///
/// let request = ApiRequest::builder(HttpMethod::Get, "/3/invoices/42").build();
/// let response = client.request(&request).await?;
/// println!("{}", response.body["Invoice"]);
/// ```
#[derive(Debug)]
pub struct FortnoxClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `https://api.fortnox.se`).
    api_base: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify FortnoxClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FortnoxClient>();
};

impl FortnoxClient {
    /// Creates a new client for the given configuration and session.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &FortnoxConfig, session: &Session) -> Self {
        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Fortnox API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if !session.access_token.is_empty() {
            default_headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", session.access_token),
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_base: config.api_base().to_string(),
            default_headers,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request to the Fortnox API.
    ///
    /// Rate-limited responses (HTTP 429) are retried up to [`MAX_RETRIES`]
    /// times with exponential backoff (1s, 2s, 4s) before the failure is
    /// translated and returned. Any other non-2xx response is translated
    /// immediately. On success the parsed JSON body is returned unchanged —
    /// callers extract the envelope key they expect.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Network`] for connection-level failures and
    /// [`RequestError::Api`] for translated vendor errors, including a
    /// still-rate-limited response after the final retry.
    pub async fn request(&self, request: &ApiRequest) -> Result<ApiResponse, RequestError> {
        let url = format!("{}{}", self.api_base, request.path);

        let mut attempt: u32 = 0;
        loop {
            let mut req_builder = match request.method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &self.default_headers {
                req_builder = req_builder.header(key, value);
            }

            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }

            // Empty bodies were normalized away at request construction;
            // anything still present goes on the wire as JSON.
            if let Some(body) = &request.body {
                req_builder = req_builder.json(body);
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let body: serde_json::Value = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text).unwrap_or_else(|_| serde_json::json!({}))
            };

            let response = ApiResponse::new(code, res_headers, body);

            if response.is_ok() {
                return Ok(response);
            }

            // Rate limit: retry with exponential backoff
            if code == 429 && attempt < MAX_RETRIES {
                let delay = retry_delay(attempt);
                tracing::warn!(
                    path = %request.path,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    "rate limited by Fortnox, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(ApiError::from_response(code, &response.body, &body_text).into());
        }
    }

    /// Sends a request and returns the parsed response body.
    ///
    /// Convenience wrapper over [`request`](Self::request) for callers that
    /// do not need status or headers.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`request`](Self::request).
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: std::collections::BTreeMap<String, String>,
    ) -> Result<serde_json::Value, RequestError> {
        let request = ApiRequest::builder(method, path)
            .maybe_body(body)
            .query(query)
            .build();
        let response = self.request(&request).await?;
        Ok(response.body)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ScopeSet;
    use crate::config::{ClientId, ClientSecret, TenantId};

    fn create_test_config() -> FortnoxConfig {
        FortnoxConfig::builder()
            .client_id(ClientId::new("test-id").unwrap())
            .client_secret(ClientSecret::new("test-secret").unwrap())
            .tenant_id(TenantId::new("123456").unwrap())
            .build()
            .unwrap()
    }

    fn create_test_session() -> Session {
        Session::new("test-access-token".to_string(), ScopeSet::new(), None)
    }

    #[test]
    fn test_retry_delay_schedule() {
        assert_eq!(retry_delay(0), Duration::from_millis(1000));
        assert_eq!(retry_delay(1), Duration::from_millis(2000));
        assert_eq!(retry_delay(2), Duration::from_millis(4000));
    }

    #[test]
    fn test_client_uses_configured_api_base() {
        let config = create_test_config();
        let client = FortnoxClient::new(&config, &create_test_session());
        assert_eq!(client.api_base(), "https://api.fortnox.se");
    }

    #[test]
    fn test_bearer_token_header_injection() {
        let config = create_test_config();
        let client = FortnoxClient::new(&config, &create_test_session());

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer test-access-token".to_string())
        );
    }

    #[test]
    fn test_no_authorization_header_when_token_empty() {
        let config = create_test_config();
        let session = Session::new(String::new(), ScopeSet::new(), None);
        let client = FortnoxClient::new(&config, &session);

        assert!(!client.default_headers().contains_key("Authorization"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let config = create_test_config();
        let client = FortnoxClient::new(&config, &create_test_session());

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let config = create_test_config();
        let client = FortnoxClient::new(&config, &create_test_session());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Fortnox API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FortnoxClient>();
    }
}

//! Error types and vendor-error translation for the Fortnox API SDK.
//!
//! Fortnox reports business and validation failures through a structured
//! `ErrorInformation` envelope with a numeric code and a message that is
//! Swedish by default. This module finds that envelope in a failure body,
//! translates known codes to English, and produces the [`ApiError`]
//! surfaced to callers.
//!
//! # Example
//!
//! ```rust,ignore
//! match client.request(&request).await {
//!     Ok(response) => println!("body: {}", response.body),
//!     Err(RequestError::Api(e)) => {
//!         println!("API error {}: {}", e.status, e);
//!         if let Some(detail) = &e.detail {
//!             println!("  {detail}");
//!         }
//!     }
//!     Err(RequestError::Network(e)) => println!("network error: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Known Fortnox error codes mapped to English translations.
///
/// Codes absent from this table keep the vendor's original message.
const ERROR_TRANSLATIONS: &[(i64, &str)] = &[
    (1_000_003, "System error -- contact Fortnox support"),
    (2_000_106, "Value must be alphanumeric"),
    (2_000_108, "Value must be numeric"),
    (2_000_134, "Value must be a boolean"),
    (2_000_310, "Invalid credentials"),
    (2_000_359, "Value contains invalid characters"),
    (2_000_588, "Invalid parameter in the request"),
    (2_001_101, "No active license for the requested scope"),
    (2_001_304, "Account not found"),
    (2_001_399, "Invalid field name"),
];

/// Looks up the English translation for a Fortnox error code.
#[must_use]
pub fn translate_error_code(code: i64) -> Option<&'static str> {
    ERROR_TRANSLATIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, text)| *text)
}

/// The structured error envelope Fortnox nests inside failure bodies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorInformation {
    /// The vendor's numeric error code.
    pub code: i64,
    /// The vendor's message text (Swedish by default).
    pub message: String,
}

/// Searches a failure body for the `ErrorInformation` envelope.
///
/// The envelope can sit at different depths depending on which layer
/// produced the failure: directly in the response body, under a `body`
/// wrapper from a transport-level failure, or under `response.body` when a
/// prior layer has already wrapped the exchange. The first match wins.
#[must_use]
pub fn extract_error_envelope(body: &Value) -> Option<ErrorInformation> {
    let candidates = [
        body.get("ErrorInformation"),
        body.get("body").and_then(|b| b.get("ErrorInformation")),
        body.get("response")
            .and_then(|r| r.get("body"))
            .and_then(|b| b.get("ErrorInformation")),
    ];

    for candidate in candidates.into_iter().flatten() {
        let code = candidate.get("code").and_then(Value::as_i64);
        let message = candidate.get("message").and_then(Value::as_str);
        if let (Some(code), Some(message)) = (code, message) {
            return Some(ErrorInformation {
                code,
                message: message.to_string(),
            });
        }
    }

    None
}

/// An error surfaced from a failed Fortnox API call.
///
/// The primary message is the English translation of the vendor error when
/// the code is known, otherwise the vendor's original text. The detail
/// string preserves the code and original message for diagnosis, and the
/// HTTP status of the failing response is kept verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// Primary, possibly translated, error message.
    pub message: String,
    /// Secondary detail preserving the vendor code and original message.
    pub detail: Option<String>,
    /// The HTTP status code of the failing response.
    pub status: u16,
}

impl ApiError {
    /// Builds an `ApiError` from a failure response body.
    ///
    /// When an [`ErrorInformation`] envelope is found, known codes are
    /// substituted with their English text and the original is preserved in
    /// the detail string. Without an envelope the raw body text is used
    /// as-is, with no added detail.
    #[must_use]
    pub fn from_response(status: u16, body: &Value, raw_body: &str) -> Self {
        if let Some(envelope) = extract_error_envelope(body) {
            let message = translate_error_code(envelope.code)
                .map_or_else(|| envelope.message.clone(), ToString::to_string);
            return Self {
                message,
                detail: Some(format!(
                    "Fortnox error {}: {}",
                    envelope.code, envelope.message
                )),
                status,
            };
        }

        let message = if raw_body.trim().is_empty() {
            format!("Fortnox API request failed with HTTP {status}")
        } else {
            raw_body.trim().to_string()
        };

        Self {
            message,
            detail: None,
            status,
        }
    }
}

/// Unified error type for request execution.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The API rejected the request (including exhausted rate-limit retries).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
    assert_send_sync::<RequestError>();
};

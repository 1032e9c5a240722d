//! Response types for the Fortnox API SDK.
//!
//! This module provides the [`ApiResponse`] type with accessors for the
//! envelope keys and pagination metadata Fortnox embeds in list responses.

use std::collections::HashMap;

/// A response from the Fortnox API.
///
/// Contains the status code, headers, and the parsed JSON body. The body is
/// kept as-is — callers extract the resource key they expect (e.g.
/// `Invoice`, `Customers`) rather than this type guessing an unwrapping.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Creates a new `ApiResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the records nested under `resource_key`.
    ///
    /// List endpoints nest their records under a plural envelope key
    /// (e.g. `"Invoices"`). A missing or non-array key yields an empty
    /// vector, matching how an absent page is treated during pagination.
    #[must_use]
    pub fn records(&self, resource_key: &str) -> Vec<serde_json::Value> {
        self.body
            .get(resource_key)
            .and_then(serde_json::Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the total page count from `MetaInformation.@TotalPages`.
    ///
    /// A response without pagination metadata is treated as single-page.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.body
            .get("MetaInformation")
            .and_then(|meta| meta.get("@TotalPages"))
            .and_then(serde_json::Value::as_u64)
            .map_or(1, |pages| u32::try_from(pages).unwrap_or(u32::MAX))
    }
}

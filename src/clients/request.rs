//! Request descriptor types for the Fortnox API SDK.
//!
//! This module provides the [`ApiRequest`] type and its builder for
//! describing requests to the Fortnox API.

use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods supported by the Fortnox API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources and document actions.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A request to be sent to the Fortnox API.
///
/// Use [`ApiRequest::builder`] to construct requests with the builder
/// pattern.
///
/// # Body Handling
///
/// An empty body is omitted from the wire request entirely, never sent as
/// `{}` — the document action endpoints (bookkeep, cancel, credit) reject
/// a body where none is expected. The builder normalizes empty objects to
/// no body at all, so callers can assemble a body map unconditionally and
/// still satisfy the invariant.
///
/// # Determinism
///
/// Query parameters are held in a [`BTreeMap`] so that repeating the same
/// call with identical parameters produces an identical descriptor, byte
/// for byte.
///
/// # Example
///
/// ```rust
/// use fortnox_api::clients::{ApiRequest, HttpMethod};
/// use serde_json::json;
///
/// // GET request with query parameters
/// let list = ApiRequest::builder(HttpMethod::Get, "/3/invoices")
///     .query_param("limit", "50")
///     .build();
///
/// // POST request with a JSON body
/// let create = ApiRequest::builder(HttpMethod::Post, "/3/invoices")
///     .body(json!({"Invoice": {"CustomerNumber": "1"}}))
///     .build();
/// assert!(create.body.is_some());
///
/// // An empty body object is dropped
/// let action = ApiRequest::builder(HttpMethod::Put, "/3/invoices/5/bookkeep")
///     .body(json!({}))
///     .build();
/// assert!(action.body.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The path (relative to the API base) for this request.
    pub path: String,
    /// The request body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters to append to the URL, in lexical key order.
    pub query: BTreeMap<String, String>,
}

impl ApiRequest {
    /// Creates a new builder for constructing an `ApiRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, path)
    }
}

/// Builder for constructing [`ApiRequest`] instances.
#[derive(Debug)]
pub struct ApiRequestBuilder {
    method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: BTreeMap<String, String>,
}

impl ApiRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: BTreeMap::new(),
        }
    }

    /// Sets the request body.
    ///
    /// A JSON object with zero fields (or a JSON null) is normalized to no
    /// body at all, keeping the empty-body invariant out of caller code.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = match body {
            serde_json::Value::Null => None,
            serde_json::Value::Object(map) if map.is_empty() => None,
            other => Some(other),
        };
        self
    }

    /// Sets an optional request body, applying the same normalization
    /// as [`body`](Self::body).
    #[must_use]
    pub fn maybe_body(self, body: Option<serde_json::Value>) -> Self {
        match body {
            Some(value) => self.body(value),
            None => self,
        }
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Builds the [`ApiRequest`].
    #[must_use]
    pub fn build(self) -> ApiRequest {
        ApiRequest {
            method: self.method,
            path: self.path,
            body: self.body,
            query: self.query,
        }
    }
}

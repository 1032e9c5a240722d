//! HTTP client infrastructure for Fortnox API communication.
//!
//! This module contains the request executor, request/response descriptor
//! types, the pager, and vendor-error translation:
//!
//! - [`FortnoxClient`]: authenticated request execution with rate-limit
//!   backoff, plus paginated fetches via `fetch_all`
//! - [`ApiRequest`] / [`ApiResponse`]: wire descriptor types
//! - [`ApiError`] / [`RequestError`]: translated failure types

mod errors;
mod http_client;
mod pager;
mod request;
mod response;

pub use errors::{
    extract_error_envelope, translate_error_code, ApiError, ErrorInformation, RequestError,
};
pub use http_client::{retry_delay, FortnoxClient, BASE_DELAY_MS, MAX_RETRIES, SDK_VERSION};
pub use pager::PAGE_SIZE;
pub use request::{ApiRequest, ApiRequestBuilder, HttpMethod};
pub use response::ApiResponse;

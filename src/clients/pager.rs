//! Multi-page accumulation over Fortnox list endpoints.
//!
//! Fortnox paginates list responses and reports the page count in
//! `MetaInformation.@TotalPages`. This module drives repeated calls through
//! the request executor and flattens every page into one result set.

use std::collections::BTreeMap;

use crate::clients::errors::RequestError;
use crate::clients::http_client::FortnoxClient;
use crate::clients::request::{ApiRequest, HttpMethod};

/// The vendor's maximum page size, pinned for all paginated fetches.
pub const PAGE_SIZE: u32 = 500;

impl FortnoxClient {
    /// Fetches every page of a list endpoint and returns the flattened
    /// records nested under `resource_key`.
    ///
    /// Pages are requested with `limit=500` starting at `page=1`. The total
    /// page count is re-read from each response rather than fixed after the
    /// first page: list endpoints are eventually consistent, so a result
    /// set that grows between calls extends pagination and one that shrinks
    /// truncates it. A page without the resource key contributes nothing.
    ///
    /// Retry is not handled here — each page request goes through
    /// [`request`](Self::request), which owns the rate-limit backoff.
    ///
    /// # Errors
    ///
    /// Returns the first [`RequestError`] a page request produces; pages
    /// already accumulated are discarded.
    pub async fn fetch_all(
        &self,
        method: HttpMethod,
        path: &str,
        resource_key: &str,
        body: Option<serde_json::Value>,
        query: BTreeMap<String, String>,
    ) -> Result<Vec<serde_json::Value>, RequestError> {
        let mut records = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut page_query = query.clone();
            page_query.insert("limit".to_string(), PAGE_SIZE.to_string());
            page_query.insert("page".to_string(), page.to_string());

            let request = ApiRequest::builder(method, path)
                .maybe_body(body.clone())
                .query(page_query)
                .build();

            let response = self.request(&request).await?;
            records.extend(response.records(resource_key));

            let total_pages = response.total_pages();
            tracing::debug!(
                path,
                page,
                total_pages,
                fetched = records.len(),
                "fetched page"
            );

            page += 1;
            if page > total_pages {
                break;
            }
        }

        Ok(records)
    }
}

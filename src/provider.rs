//! Data provider contract.
//!
//! A [`DataProvider`] is the boundary where real I/O happens: it searches an
//! upstream backend and hands back raw records plus a total count. The core
//! never retries, times out, or caches on its behalf. Providers either
//! supply an [`ItemMapping`] for their raw records or override
//! [`DataProvider::publications`] to produce typed records implementing
//! [`ProviderRecord`].

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::convert::publication_from_mapped;
use crate::error::Result;
use crate::mapping::{ItemMapping, RawItem};
use crate::models::{Link, Metadata, Publication};

/// Parameters of one search invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Page size. Zero means "single page"; pagination math never divides
    /// by it.
    pub limit: u32,
    /// 0-indexed offset into the full result set.
    pub offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        SearchRequest {
            query: query.into(),
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            sort: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the offset from a 1-indexed page number.
    pub fn with_page(mut self, page: u64) -> Self {
        self.offset = page.saturating_sub(1) * u64::from(self.limit);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Query parameters to echo into pagination links, excluding `page`.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.query.is_empty() {
            params.push(("query".to_string(), self.query.clone()));
        }
        if self.limit > 0 {
            params.push(("limit".to_string(), self.limit.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        params
    }
}

/// Raw result of one search invocation.
///
/// Page numbers are derived, never stored: they are a pure function of
/// `total` and the request's `limit`/`offset`.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    /// Raw records from the data source, shape unconstrained.
    pub items: Vec<RawItem>,
    /// Total number of matching items across all pages.
    pub total: u64,
    pub request: SearchRequest,
}

impl SearchResponse {
    /// Current 1-indexed page number.
    pub fn page(&self) -> u64 {
        if self.request.limit == 0 {
            return 1;
        }
        self.request.offset / u64::from(self.request.limit) + 1
    }

    /// Last 1-indexed page number; 1 when there are no results.
    pub fn last_page(&self) -> u64 {
        if self.request.limit == 0 || self.total == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.request.limit))
    }

    /// Whether results exist beyond the current page.
    pub fn has_more(&self) -> bool {
        if self.request.limit == 0 {
            return false;
        }
        self.request.offset + u64::from(self.request.limit) < self.total
    }
}

/// A strongly-typed record a provider can expose instead of an item mapping.
pub trait ProviderRecord {
    /// Descriptive metadata for the publication.
    fn metadata(&self) -> Metadata;

    /// Links associated with this record (acquisition, alternate, ...).
    fn links(&self) -> Vec<Link>;

    /// Cover/thumbnail links, or None when the record has neither.
    fn images(&self) -> Option<Vec<Link>> {
        None
    }

    fn to_publication(&self) -> Publication {
        Publication {
            metadata: self.metadata(),
            links: self.links(),
            images: self.images(),
        }
    }
}

/// External interface a search backend must satisfy.
#[async_trait::async_trait]
pub trait DataProvider: Send + Sync {
    /// Human-readable service title.
    fn title(&self) -> &str {
        "Generic OPDS Service"
    }

    /// Base URL prefixed onto relative search/catalog URLs.
    fn base_url(&self) -> &str {
        "http://localhost"
    }

    /// Search URI template containing a `{?query}`-style placeholder.
    fn search_url(&self) -> &str {
        "/opds/search{?query}"
    }

    /// Path of the root catalog document.
    fn catalog_url(&self) -> &str {
        "/opds/catalog"
    }

    /// Searches the backend. The sole I/O boundary of the crate.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;

    /// Per-field extractors for this provider's raw records.
    fn item_mapping(&self) -> ItemMapping {
        ItemMapping::new()
    }

    /// Converts a response's raw records into publications.
    ///
    /// The default goes through the item mapping, constructed once and
    /// reused for every record. Typed-record providers override this and
    /// use [`ProviderRecord::to_publication`]; deserialization failures
    /// propagate, they are provider-data bugs.
    fn publications(&self, response: &SearchResponse) -> Result<Vec<Publication>> {
        let mapping = self.item_mapping();
        Ok(response
            .items
            .iter()
            .map(|item| publication_from_mapped(&mapping.map_item(item)))
            .collect())
    }
}

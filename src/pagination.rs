//! Pagination link emission.
//!
//! Given a total count, page size, and offset, computes page numbers and
//! appends the correct navigational link subset (self/first/previous/next/
//! last) plus the derived metadata fields onto an existing catalog. This is
//! the one place a catalog is mutated after construction; pre-existing links
//! and unrelated metadata fields are never removed.

use url::form_urlencoded;

use crate::constants::OPDS_JSON_TYPE;
use crate::models::{Catalog, Link};

/// Inputs to one pagination pass.
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Page size. Zero is treated as "single page", never a division.
    pub limit: u32,
    /// 0-indexed offset of the current page.
    pub offset: u64,
    /// Search URL without any query string.
    pub base_url: String,
    /// Caller-supplied query parameters preserved on every link. A `page`
    /// entry here is ignored; the engine owns that parameter.
    pub params: Vec<(String, String)>,
}

impl Pagination {
    /// Current 1-indexed page number.
    pub fn page(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        self.offset / u64::from(self.limit) + 1
    }

    /// Last 1-indexed page number; 1 when there are no results.
    pub fn last_page(&self) -> u64 {
        if self.limit == 0 || self.total == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.limit))
    }

    pub fn has_more(&self) -> bool {
        if self.limit == 0 {
            return false;
        }
        self.offset + u64::from(self.limit) < self.total
    }

    /// Builds a percent-encoded page URL, overriding only `page`.
    fn page_url(&self, page: Option<u64>) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            if key != "page" {
                query.append_pair(key, value);
            }
        }
        if let Some(page) = page {
            query.append_pair("page", &page.to_string());
        }
        let query = query.finish();
        if query.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}?{}", self.base_url, query)
        }
    }
}

fn page_link(rel: &str, href: String) -> Link {
    Link::new(href).with_rel(rel).with_type(OPDS_JSON_TYPE)
}

/// Appends pagination links and metadata to `catalog`.
///
/// Always emits `self` and `first`; `previous` only past page 1; `next` and
/// `last` only while more results exist, so the final page carries neither.
pub fn add_pagination(catalog: &mut Catalog, pagination: &Pagination) {
    let page = pagination.page();

    // The canonical URL for page 1 carries no page parameter.
    let self_href = if page > 1 {
        pagination.page_url(Some(page))
    } else {
        pagination.page_url(None)
    };
    catalog.links.push(page_link("self", self_href));
    catalog.links.push(page_link("first", pagination.page_url(Some(1))));

    if page > 1 {
        catalog
            .links
            .push(page_link("previous", pagination.page_url(Some(page - 1))));
    }

    if pagination.has_more() {
        catalog
            .links
            .push(page_link("next", pagination.page_url(Some(page + 1))));
        catalog.links.push(page_link(
            "last",
            pagination.page_url(Some(pagination.last_page())),
        ));
    }

    catalog.metadata.number_of_items = Some(pagination.total);
    catalog.metadata.items_per_page = Some(pagination.limit);
    catalog.metadata.current_page = Some(page);
}

//! Catalog assembly and serialization.
//!
//! [`CatalogBuilder`] composes metadata, links, navigation, publications,
//! and nested groups into one catalog aggregate. Search responses flow in
//! through [`CatalogBuilder::search`], which applies the provider's item
//! mapping and emits the full pagination link set. Serialization attaches
//! the Web Publication Manifest JSON-LD context as the first key and omits
//! every absent field.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{OPDS_JSON_TYPE, WEBPUB_MANIFEST_CONTEXT};
use crate::error::{OpdsError, Result};
use crate::models::{Catalog, Link, Metadata, Navigation, Publication};
use crate::pagination::{add_pagination, Pagination};
use crate::provider::{DataProvider, SearchResponse};

#[derive(Serialize)]
struct CatalogDocument<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(flatten)]
    catalog: &'a Catalog,
}

impl Catalog {
    pub fn builder<'a>() -> CatalogBuilder<'a> {
        CatalogBuilder::default()
    }

    /// Assembles a paginated catalog from one search response.
    pub fn from_search(provider: &dyn DataProvider, response: &SearchResponse) -> Result<Catalog> {
        Catalog::builder().search(provider, response).build()
    }

    /// Serializes to a JSON value with the `@context` key attached.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(CatalogDocument {
            context: WEBPUB_MANIFEST_CONTEXT,
            catalog: self,
        })?)
    }

    /// Serializes to a compact JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&CatalogDocument {
            context: WEBPUB_MANIFEST_CONTEXT,
            catalog: self,
        })?)
    }

    /// Serializes to an indented JSON document.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&CatalogDocument {
            context: WEBPUB_MANIFEST_CONTEXT,
            catalog: self,
        })?)
    }
}

/// Fluent assembly of a [`Catalog`].
#[derive(Default)]
pub struct CatalogBuilder<'a> {
    metadata: Option<Metadata>,
    title: Option<String>,
    identifier: Option<String>,
    modified: Option<DateTime<Utc>>,
    links: Vec<Link>,
    self_link: Option<String>,
    search_link: Option<String>,
    publications: Option<Vec<Publication>>,
    navigation: Option<Vec<Navigation>>,
    groups: Option<Vec<Catalog>>,
    facets: Option<Vec<Map<String, Value>>>,
    search: Option<(&'a dyn DataProvider, &'a SearchResponse)>,
}

impl<'a> CatalogBuilder<'a> {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Full metadata block; overrides `title`/`identifier`/`modified`
    /// defaulting.
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Appends a `self`-relation link with the catalog MIME type.
    pub fn self_link(mut self, href: impl Into<String>) -> Self {
        self.self_link = Some(href.into());
        self
    }

    /// Appends a `search`-relation link, marked templated when the URL
    /// contains a URI-template variable.
    pub fn search_link(mut self, href: impl Into<String>) -> Self {
        self.search_link = Some(href.into());
        self
    }

    /// Explicit publications list. Incompatible with [`Self::search`].
    pub fn publications(mut self, publications: Vec<Publication>) -> Self {
        self.publications = Some(publications);
        self
    }

    pub fn navigation(mut self, navigation: Vec<Navigation>) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Nested child catalogs.
    pub fn groups(mut self, groups: Vec<Catalog>) -> Self {
        self.groups = Some(groups);
        self
    }

    pub fn facets(mut self, facets: Vec<Map<String, Value>>) -> Self {
        self.facets = Some(facets);
        self
    }

    /// Fills the catalog from a search response: publications via the
    /// provider's mapping, derived title, and pagination links against the
    /// provider's search URL.
    pub fn search(mut self, provider: &'a dyn DataProvider, response: &'a SearchResponse) -> Self {
        self.search = Some((provider, response));
        self
    }

    pub fn build(self) -> Result<Catalog> {
        if self.publications.is_some() && self.search.is_some() {
            return Err(OpdsError::InvalidRequest(
                "explicit publications cannot be combined with a search response".to_string(),
            ));
        }

        let mut metadata = match (self.metadata, self.title, &self.search) {
            (Some(metadata), _, _) => metadata,
            (None, Some(title), _) => Metadata::new(title),
            (None, None, Some((_, response))) => Metadata::new(search_title(response)),
            (None, None, None) => return Err(OpdsError::MissingField("title".to_string())),
        };
        if let Some(identifier) = self.identifier {
            metadata.identifier = Some(identifier);
        }
        if let Some(modified) = self.modified {
            metadata.modified = Some(modified);
        }

        let mut links = self.links;
        if let Some(href) = self.self_link {
            links.push(Link::new(href).with_rel("self").with_type(OPDS_JSON_TYPE));
        }
        if let Some(href) = self.search_link {
            let templated = href.contains('{');
            let mut link = Link::new(href).with_rel("search").with_type(OPDS_JSON_TYPE);
            if templated {
                link = link.with_templated(true);
            }
            links.push(link);
        }

        let mut publications = self.publications;
        let mut catalog = Catalog {
            metadata,
            links,
            publications: None,
            navigation: self.navigation,
            groups: self.groups,
            facets: self.facets,
        };

        if let Some((provider, response)) = self.search {
            debug!(
                total = response.total,
                page = response.page(),
                "assembling search catalog"
            );
            publications = Some(provider.publications(response)?);
            let pagination = Pagination {
                total: response.total,
                limit: response.request.limit,
                offset: response.request.offset,
                base_url: search_base_url(provider),
                params: response.request.params(),
            };
            add_pagination(&mut catalog, &pagination);
        }

        // A catalog always carries a publications list, empty at minimum.
        catalog.publications = Some(publications.unwrap_or_default());
        Ok(catalog)
    }
}

/// Derived search-catalog title.
fn search_title(response: &SearchResponse) -> String {
    let query = response.request.query.as_str();
    if response.total == 0 {
        if query.is_empty() {
            "No results found".to_string()
        } else {
            format!("No results found for \"{query}\"")
        }
    } else if query.is_empty() {
        "All publications".to_string()
    } else {
        format!("Search results for \"{query}\"")
    }
}

/// The provider's search URL with the template suffix stripped, prefixed
/// with the base URL when relative.
fn search_base_url(provider: &dyn DataProvider) -> String {
    let template = provider.search_url();
    let base = template.split('{').next().unwrap_or(template);
    if base.starts_with('/') {
        format!("{}{}", provider.base_url().trim_end_matches('/'), base)
    } else {
        base.to_string()
    }
}

//! OPDS 2.0 data models.
//!
//! Based on the OPDS 2.0 specification and the Web Publication Manifest.
//! Every struct here is a plain value: built once, cloned freely, never
//! mutated after it is handed downstream. The one sanctioned exception is
//! pagination, which appends links and metadata onto an existing [`Catalog`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A link associating a resource with a publication or catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// URI or URI template of the linked resource.
    pub href: String,
    /// MIME type of the linked resource.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Relation between the resource and its parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// True when `href` contains a URI-template variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Link {
            href: href.into(),
            media_type: None,
            rel: None,
            title: None,
            templated: None,
            properties: None,
        }
    }

    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_templated(mut self, templated: bool) -> Self {
        self.templated = Some(templated);
        self
    }
}

/// A contributor (author, illustrator, publisher, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// String to use when sorting by this contributor.
    #[serde(rename = "sortAs", skip_serializing_if = "Option::is_none")]
    pub sort_as: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl Contributor {
    pub fn new(name: impl Into<String>) -> Self {
        Contributor {
            name: name.into(),
            identifier: None,
            sort_as: None,
            role: None,
            links: None,
        }
    }

    pub fn with_role(name: impl Into<String>, role: impl Into<String>) -> Self {
        Contributor {
            role: Some(role.into()),
            ..Contributor::new(name)
        }
    }
}

/// Descriptive metadata for a catalog or publication.
///
/// Open-extensible: fields outside the fixed schema are preserved in `extra`
/// and round-trip through serialization untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Resource type URI, e.g. "http://schema.org/Book".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    /// Ordered language codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<Contributor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub illustrator: Option<Vec<Contributor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator: Option<Vec<Contributor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<Vec<Contributor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Vec<Contributor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<String>>,
    #[serde(rename = "numberOfItems", skip_serializing_if = "Option::is_none")]
    pub number_of_items: Option<u64>,
    #[serde(rename = "itemsPerPage", skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    #[serde(rename = "currentPage", skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,
    /// Caller-supplied fields outside the fixed schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Metadata {
            title: title.into(),
            ..Metadata::default()
        }
    }
}

/// One catalog entry: a digital work with metadata and links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub metadata: Metadata,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Cover images and thumbnails. Omitted entirely when a record resolves
    /// neither, never an empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Link>>,
}

impl Publication {
    pub fn new(metadata: Metadata) -> Self {
        Publication {
            metadata,
            links: Vec::new(),
            images: None,
        }
    }
}

/// A named link used for catalog browsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    pub href: String,
    pub title: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
}

impl Navigation {
    pub fn new(href: impl Into<String>, title: impl Into<String>) -> Self {
        Navigation {
            href: href.into(),
            title: title.into(),
            media_type: None,
            rel: None,
        }
    }
}

/// The top-level OPDS 2.0 feed aggregate.
///
/// `links` is never null; an empty catalog still carries an empty list.
/// Groups nest child catalogs, so ownership forms a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub metadata: Metadata,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publications: Option<Vec<Publication>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Vec<Navigation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Catalog>>,
    /// Facet descriptors, passed through opaquely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<Map<String, Value>>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn link_serializes_without_null_keys() {
        let link = Link::new("https://example.com/book.epub")
            .with_type("application/epub+zip")
            .with_rel("http://opds-spec.org/acquisition");
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(
            value,
            json!({
                "href": "https://example.com/book.epub",
                "type": "application/epub+zip",
                "rel": "http://opds-spec.org/acquisition",
            })
        );
    }

    #[test]
    fn metadata_round_trips_extra_fields() {
        let raw = json!({
            "title": "Example Book",
            "language": ["en"],
            "x-custom": {"shelf": 3},
        });
        let metadata: Metadata = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(metadata.title, "Example Book");
        assert_eq!(metadata.extra["x-custom"], json!({"shelf": 3}));
        assert_eq!(serde_json::to_value(&metadata).unwrap(), raw);
    }

    #[test]
    fn metadata_camel_case_keys() {
        let metadata = Metadata {
            number_of_items: Some(42),
            items_per_page: Some(10),
            current_page: Some(2),
            ..Metadata::new("Feed")
        };
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["numberOfItems"], 42);
        assert_eq!(value["itemsPerPage"], 10);
        assert_eq!(value["currentPage"], 2);
    }

    #[test]
    fn contributor_with_role() {
        let contributor = Contributor::with_role("Jane Doe", "author");
        assert_eq!(contributor.name, "Jane Doe");
        assert_eq!(contributor.role.as_deref(), Some("author"));
    }

    #[test]
    fn publication_links_default_to_empty() {
        let publication: Publication =
            serde_json::from_value(json!({"metadata": {"title": "Solo"}})).unwrap();
        assert!(publication.links.is_empty());
        assert!(publication.images.is_none());
    }
}

//! Open Library search adapter.
//!
//! Mapping-based provider against the Open Library search API
//! (<https://openlibrary.org/developers/api>): `search` fetches raw docs,
//! and the item mapping translates their fields into the catalog
//! vocabulary. Cover URLs are derived from the numeric `cover_i` id.

use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::mapping::ItemMapping;
use crate::provider::{DataProvider, SearchRequest, SearchResponse};

const OPEN_LIBRARY_URL: &str = "https://openlibrary.org";

const SEARCH_FIELDS: &[&str] = &[
    "key",
    "title",
    "description",
    "author_name",
    "cover_i",
    "language",
    "first_publish_year",
    "subject",
];

pub struct OpenLibraryProvider {
    client: reqwest::Client,
}

impl Default for OpenLibraryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenLibraryProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl DataProvider for OpenLibraryProvider {
    fn title(&self) -> &str {
        "Open Library OPDS Service"
    }

    fn base_url(&self) -> &str {
        OPEN_LIBRARY_URL
    }

    fn search_url(&self) -> &str {
        "/search.json{?query}"
    }

    #[instrument(skip(self))]
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let page = request.offset / u64::from(request.limit.max(1)) + 1;
        debug!("Fetching results from Open Library");
        let response = self
            .client
            .get(format!("{OPEN_LIBRARY_URL}/search.json"))
            .query(&[
                ("q", request.query.as_str()),
                ("page", &page.to_string()),
                ("limit", &request.limit.to_string()),
                ("fields", &SEARCH_FIELDS.join(",")),
            ])
            .send()
            .await?
            .error_for_status()?;
        let data: Value = response.json().await?;

        let items = data["docs"].as_array().cloned().unwrap_or_default();
        let total = data["numFound"].as_u64().unwrap_or(0);
        info!(total, returned = items.len(), "Open Library search finished");

        Ok(SearchResponse {
            items,
            total,
            request: request.clone(),
        })
    }

    fn item_mapping(&self) -> ItemMapping {
        // Field names here are vocabulary constants; a typo fails every test.
        build_mapping().expect("static field names are valid")
    }
}

fn build_mapping() -> Result<ItemMapping> {
    ItemMapping::new()
        .field("title", |item| item.get("title").cloned())?
        .field("identifier", |item| {
            item.get("key")
                .and_then(Value::as_str)
                .map(|key| json!(format!("{OPEN_LIBRARY_URL}{key}")))
        })?
        .field("description", |item| match item.get("description") {
            // Open Library descriptions are a string or a {"value": ...} map.
            Some(Value::String(s)) => Some(json!(s)),
            Some(Value::Object(map)) => map.get("value").cloned(),
            _ => None,
        })?
        .field("author", |item| item.get("author_name").cloned())?
        .field("language", |item| item.get("language").cloned())?
        .field("published", |item| item.get("first_publish_year").cloned())?
        .field("subject", |item| item.get("subject").cloned())?
        .field("cover_url", |item| {
            item.get("cover_i")
                .and_then(Value::as_i64)
                .map(|id| json!(format!("https://covers.openlibrary.org/b/id/{id}-L.jpg")))
        })?
        .field("thumbnail_url", |item| {
            item.get("cover_i")
                .and_then(Value::as_i64)
                .map(|id| json!(format!("https://covers.openlibrary.org/b/id/{id}-M.jpg")))
        })?
        .field("acquisition_link", |item| {
            item.get("key")
                .and_then(Value::as_str)
                .map(|key| json!(format!("{OPEN_LIBRARY_URL}{key}")))
        })?
        .field("acquisition_type", |_| Some(json!("text/html")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::publication_from_mapped;

    fn sample_doc() -> Value {
        json!({
            "key": "/works/OL123W",
            "title": "The Left Hand of Darkness",
            "author_name": ["Ursula K. Le Guin"],
            "cover_i": 8587142,
            "language": ["eng"],
            "first_publish_year": 1969,
            "subject": ["Science fiction"],
        })
    }

    #[test]
    fn mapping_translates_docs_into_canonical_fields() {
        let mapped = OpenLibraryProvider::new()
            .item_mapping()
            .map_item(&sample_doc());

        assert_eq!(mapped["name"], json!("The Left Hand of Darkness"));
        assert_eq!(mapped["identifier"], json!("https://openlibrary.org/works/OL123W"));
        assert_eq!(mapped["author"], json!(["Ursula K. Le Guin"]));
        assert_eq!(
            mapped["image"],
            json!("https://covers.openlibrary.org/b/id/8587142-L.jpg")
        );
        assert_eq!(
            mapped["thumbnailUrl"],
            json!("https://covers.openlibrary.org/b/id/8587142-M.jpg")
        );
        assert_eq!(mapped["url"], json!("https://openlibrary.org/works/OL123W"));
        assert_eq!(mapped["encodingFormat"], json!("text/html"));
        assert_eq!(mapped["about"], json!(["Science fiction"]));
    }

    #[test]
    fn doc_without_cover_produces_no_images() {
        let doc = json!({"key": "/works/OL9W", "title": "Plain"});
        let mapped = OpenLibraryProvider::new().item_mapping().map_item(&doc);
        let publication = publication_from_mapped(&mapped);
        assert!(publication.images.is_none());
        assert_eq!(publication.metadata.title, "Plain");
    }

    #[test]
    fn nested_description_is_unwrapped() {
        let doc = json!({
            "key": "/works/OL5W",
            "title": "Nested",
            "description": {"value": "From the editor"},
        });
        let mapped = OpenLibraryProvider::new().item_mapping().map_item(&doc);
        assert_eq!(mapped["description"], json!("From the editor"));
    }
}

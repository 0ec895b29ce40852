//! Internet Archive search adapter.
//!
//! Typed-record provider against the archive.org advancedsearch API:
//! instead of an item mapping, each raw doc deserializes into
//! [`InternetArchiveRecord`], which implements [`ProviderRecord`] directly.
//! Malformed docs propagate as deserialization errors.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::constants::{ACQUISITION_REL, IMAGE_REL, JPEG_TYPE};
use crate::error::{OpdsError, Result};
use crate::models::{Contributor, Link, Metadata, Publication};
use crate::provider::{DataProvider, ProviderRecord, SearchRequest, SearchResponse};

const ARCHIVE_URL: &str = "https://archive.org";

const SEARCH_FIELDS: &[&str] = &[
    "identifier",
    "title",
    "creator",
    "language",
    "mediatype",
    "year",
    "description",
];

/// One archive.org advancedsearch doc.
///
/// The API returns `creator` and `language` as either a single string or a
/// list; both are normalized to lists on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct InternetArchiveRecord {
    pub identifier: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub creator: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub language: Option<Vec<String>>,
    #[serde(default)]
    pub mediatype: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub coverurl: Option<String>,
}

fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    let value = Option::<StringOrList>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrList::One(s) => vec![s],
        StringOrList::Many(list) => list,
    }))
}

impl InternetArchiveRecord {
    fn cover_href(&self) -> String {
        self.coverurl.clone().unwrap_or_else(|| {
            format!(
                "{ARCHIVE_URL}/download/{id}/{id}_thumb.jpg",
                id = self.identifier
            )
        })
    }
}

impl ProviderRecord for InternetArchiveRecord {
    fn metadata(&self) -> Metadata {
        let mut metadata =
            Metadata::new(self.title.clone().unwrap_or_else(|| self.identifier.clone()));
        metadata.type_uri = Some("http://schema.org/Book".to_string());
        metadata.description = self.description.clone();
        metadata.language = self.language.clone();
        metadata.author = self
            .creator
            .as_ref()
            .map(|names| names.iter().map(|name| Contributor::new(name.clone())).collect());
        metadata.published = self
            .year
            .and_then(|year| Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single());
        metadata
    }

    fn links(&self) -> Vec<Link> {
        vec![Link::new(format!("{ARCHIVE_URL}/details/{}", self.identifier))
            .with_rel(ACQUISITION_REL)
            .with_type("text/html")
            .with_title("Internet Archive Item Page")]
    }

    fn images(&self) -> Option<Vec<Link>> {
        Some(vec![Link::new(self.cover_href())
            .with_rel(IMAGE_REL)
            .with_type(JPEG_TYPE)])
    }
}

pub struct InternetArchiveProvider {
    client: reqwest::Client,
}

impl Default for InternetArchiveProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InternetArchiveProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl DataProvider for InternetArchiveProvider {
    fn title(&self) -> &str {
        "Internet Archive OPDS Service"
    }

    fn base_url(&self) -> &str {
        ARCHIVE_URL
    }

    #[instrument(skip(self))]
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        // Empty queries fall back to browsing all texts.
        let q = if request.query.is_empty() {
            "mediatype:texts".to_string()
        } else {
            request.query.clone()
        };
        let page = request.offset / u64::from(request.limit.max(1)) + 1;

        let mut params: Vec<(&str, String)> = vec![
            ("q", q),
            ("rows", request.limit.to_string()),
            ("page", page.to_string()),
            ("output", "json".to_string()),
        ];
        for field in SEARCH_FIELDS {
            params.push(("fl[]", (*field).to_string()));
        }

        debug!("Fetching results from archive.org advancedsearch");
        let response = self
            .client
            .get(format!("{ARCHIVE_URL}/advancedsearch.php"))
            .query(&params)
            .send()
            .await?
            .error_for_status()?;
        let data: Value = response.json().await?;

        // Errors come back as a 200 with an "error" body instead of "response".
        let body = data.get("response").ok_or_else(|| OpdsError::Provider {
            message: data["error"]
                .as_str()
                .unwrap_or("malformed advancedsearch response")
                .to_string(),
        })?;
        let items = body["docs"].as_array().cloned().unwrap_or_default();
        let total = body["numFound"].as_u64().unwrap_or(0);
        info!(total, returned = items.len(), "Internet Archive search finished");

        Ok(SearchResponse {
            items,
            total,
            request: request.clone(),
        })
    }

    fn publications(&self, response: &SearchResponse) -> Result<Vec<Publication>> {
        response
            .items
            .iter()
            .map(|doc| {
                let record: InternetArchiveRecord = serde_json::from_value(doc.clone())?;
                Ok(record.to_publication())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "identifier": "lefthandofdarkne0000legu",
            "title": "The Left Hand of Darkness",
            "creator": "Ursula K. Le Guin",
            "language": ["eng"],
            "mediatype": "texts",
            "year": 1969,
        })
    }

    #[test]
    fn scalar_creator_is_coerced_to_list() {
        let record: InternetArchiveRecord = serde_json::from_value(doc()).unwrap();
        assert_eq!(record.creator, Some(vec!["Ursula K. Le Guin".to_string()]));
        assert_eq!(record.language, Some(vec!["eng".to_string()]));
    }

    #[test]
    fn record_converts_to_publication() {
        let record: InternetArchiveRecord = serde_json::from_value(doc()).unwrap();
        let publication = record.to_publication();

        assert_eq!(publication.metadata.title, "The Left Hand of Darkness");
        assert_eq!(
            publication.metadata.type_uri.as_deref(),
            Some("http://schema.org/Book")
        );
        let link = &publication.links[0];
        assert_eq!(link.rel.as_deref(), Some(ACQUISITION_REL));
        assert_eq!(
            link.href,
            "https://archive.org/details/lefthandofdarkne0000legu"
        );
        let published = publication.metadata.published.unwrap();
        assert_eq!(published.format("%Y").to_string(), "1969");
    }

    #[test]
    fn cover_falls_back_to_derived_thumb() {
        let record: InternetArchiveRecord = serde_json::from_value(doc()).unwrap();
        let images = record.images().unwrap();
        assert_eq!(
            images[0].href,
            "https://archive.org/download/lefthandofdarkne0000legu/lefthandofdarkne0000legu_thumb.jpg"
        );
        assert_eq!(images[0].rel.as_deref(), Some(IMAGE_REL));
    }

    #[test]
    fn untitled_docs_use_the_identifier() {
        let record: InternetArchiveRecord =
            serde_json::from_value(json!({"identifier": "item-1"})).unwrap();
        assert_eq!(record.metadata().title, "item-1");
    }

    #[test]
    fn publications_propagates_malformed_docs() {
        let provider = InternetArchiveProvider::new();
        let response = SearchResponse {
            items: vec![json!({"title": "missing identifier"})],
            total: 1,
            request: SearchRequest::new("q"),
        };
        assert!(provider.publications(&response).is_err());
    }
}

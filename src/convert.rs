//! Mapped record to [`Publication`] conversion.
//!
//! Takes the flat field map produced by [`crate::mapping::ItemMapping`]
//! (or any hand-built map in either vocabulary) and builds one publication:
//! metadata block, acquisition link, cover/thumbnail images. Canonical
//! schema.org names always take priority over their legacy counterparts.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{
    ACQUISITION_REL, DEFAULT_ACQUISITION_TYPE, IMAGE_REL, JPEG_TYPE, THUMBNAIL_REL,
};
use crate::models::{Contributor, Link, Metadata, Publication};

/// Builds a publication from a mapped field dictionary.
///
/// Never fails: a record without a resolvable title becomes "Untitled", and
/// unparseable optional values are dropped rather than propagated.
pub fn publication_from_mapped(fields: &Map<String, Value>) -> Publication {
    let title = first_string(fields, &["name", "title"])
        .unwrap_or_else(|| "Untitled".to_string());

    let mut metadata = Metadata::new(title);
    metadata.identifier = first_string(fields, &["identifier"]);
    metadata.description = first_string(fields, &["description"]);
    metadata.published = first_date(fields, &["datePublished", "published"]);
    metadata.modified = first_date(fields, &["dateModified", "modified"]);
    metadata.language = first_value(fields, &["inLanguage", "language"]).map(string_list);
    metadata.subject = subject_union(fields);
    metadata.author = first_value(fields, &["author"]).map(|v| contributor_list(v, "author"));
    metadata.publisher =
        first_value(fields, &["publisher"]).map(|v| contributor_list(v, "publisher"));

    let mut links = Vec::new();
    if let Some(href) = first_string(fields, &["url", "acquisition_link"]) {
        let media_type = first_string(fields, &["encodingFormat", "acquisition_type"])
            .unwrap_or_else(|| DEFAULT_ACQUISITION_TYPE.to_string());
        links.push(
            Link::new(href)
                .with_type(media_type)
                .with_rel(ACQUISITION_REL),
        );
    } else {
        debug!("record has no acquisition link");
    }

    let mut images = Vec::new();
    if let Some(cover) = first_string(fields, &["image", "cover_url"]) {
        images.push(Link::new(cover).with_type(JPEG_TYPE).with_rel(IMAGE_REL));
    }
    if let Some(thumbnail) = first_string(fields, &["thumbnailUrl", "thumbnail_url"]) {
        images.push(
            Link::new(thumbnail)
                .with_type(JPEG_TYPE)
                .with_rel(THUMBNAIL_REL),
        );
    }

    Publication {
        metadata,
        links,
        images: if images.is_empty() { None } else { Some(images) },
    }
}

fn first_value<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| fields.get(*key))
}

fn first_string(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_value(fields, keys).and_then(scalar_string)
}

fn first_date(fields: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    first_value(fields, keys).and_then(parse_date)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD`, or a bare year (string or integer).
fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|year| year_start(year as i32)),
        Value::String(s) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                return Some(parsed.with_timezone(&Utc));
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Utc.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single();
            }
            if let Ok(year) = s.parse::<i32>() {
                return year_start(year);
            }
            debug!(value = %s, "dropping unparseable date");
            None
        }
        _ => None,
    }
}

fn year_start(year: i32) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, 1, 1)?;
    Utc.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single()
}

/// Normalizes a scalar-or-list value to a list of strings.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_string).collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}

/// Union of `about`, `keywords`, `genre`, and legacy `subject`, in that
/// fixed order, flattening values that are already lists.
fn subject_union(fields: &Map<String, Value>) -> Option<Vec<String>> {
    let keys = ["about", "keywords", "genre", "subject"];
    if !keys.iter().any(|key| fields.contains_key(*key)) {
        return None;
    }
    let mut subjects = Vec::new();
    for key in keys {
        if let Some(value) = fields.get(key) {
            subjects.extend(string_list(value));
        }
    }
    Some(subjects)
}

/// Each entry may be a plain name or a pre-structured contributor map.
fn contributor_list(value: &Value, role: &str) -> Vec<Contributor> {
    let entries: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(Contributor::with_role(name, role)),
            Value::Object(_) => serde_json::from_value(entry.clone()).ok(),
            _ => None,
        })
        .collect()
}

use anyhow::Result;
use serde_json::{json, Value};

use opds2::{publication_from_mapped, ItemMapping, OpdsError};

fn legacy_mapping() -> Result<ItemMapping> {
    let mapping = ItemMapping::new()
        .field("title", |item: &Value| item.get("book_title").cloned())?
        .field("author", |item: &Value| item.get("by").cloned())?
        .field("identifier", |item: &Value| item.get("isbn").cloned())?
        .field("published", |item: &Value| item.get("year").cloned())?
        .field("cover_url", |item: &Value| item.get("cover").cloned())?
        .field("acquisition_link", |item: &Value| item.get("href").cloned())?;
    Ok(mapping)
}

#[test]
fn legacy_names_translate_to_canonical_keys() -> Result<()> {
    let mapping = legacy_mapping()?;
    let item = json!({
        "book_title": "The Great Gatsby",
        "by": "F. Scott Fitzgerald",
        "isbn": "urn:isbn:9780743273565",
        "year": 1925,
        "cover": "https://covers.example.com/gatsby.jpg",
        "href": "https://books.example.com/gatsby.epub",
    });

    let mapped = mapping.map_item(&item);
    assert_eq!(mapped["name"], json!("The Great Gatsby"));
    assert_eq!(mapped["author"], json!("F. Scott Fitzgerald"));
    assert_eq!(mapped["identifier"], json!("urn:isbn:9780743273565"));
    assert_eq!(mapped["datePublished"], json!(1925));
    assert_eq!(mapped["image"], json!("https://covers.example.com/gatsby.jpg"));
    assert_eq!(mapped["url"], json!("https://books.example.com/gatsby.epub"));
    // No legacy aliases survive in the output.
    assert!(!mapped.contains_key("title"));
    assert!(!mapped.contains_key("published"));
    assert!(!mapped.contains_key("cover_url"));
    assert!(!mapped.contains_key("acquisition_link"));
    Ok(())
}

#[test]
fn canonical_extractor_wins_over_legacy_alias() -> Result<()> {
    let mapping = ItemMapping::new()
        .field("name", |item: &Value| item.get("display_name").cloned())?
        .field("title", |item: &Value| item.get("old_title").cloned())?;
    let item = json!({ "display_name": "Canonical", "old_title": "Legacy" });

    let mapped = mapping.map_item(&item);
    assert_eq!(mapped["name"], json!("Canonical"));
    Ok(())
}

#[test]
fn legacy_alias_fills_in_when_canonical_extractor_yields_nothing() -> Result<()> {
    let mapping = ItemMapping::new()
        .field("name", |item: &Value| item.get("display_name").cloned())?
        .field("title", |item: &Value| item.get("old_title").cloned())?;
    let item = json!({ "old_title": "Legacy" });

    let mapped = mapping.map_item(&item);
    assert_eq!(mapped["name"], json!("Legacy"));
    Ok(())
}

#[test]
fn mapping_is_idempotent_over_its_own_output() -> Result<()> {
    let mapping = ItemMapping::new()
        .field("name", |item: &Value| item.get("name").cloned())?
        .field("author", |item: &Value| item.get("author").cloned())?
        .field("identifier", |item: &Value| item.get("identifier").cloned())?;
    let item = json!({
        "name": "1984",
        "author": "George Orwell",
        "identifier": "urn:isbn:9780451524935",
    });

    let first = mapping.map_item(&item);
    let second = mapping.map_item(&Value::Object(first.clone()));
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn null_extraction_means_absent() -> Result<()> {
    let mapping = ItemMapping::new()
        .field("name", |item: &Value| item.get("name").cloned())?
        .field("description", |item: &Value| item.get("description").cloned())?;
    let item = json!({ "name": "Untouched", "description": null });

    let mapped = mapping.map_item(&item);
    assert!(mapped.contains_key("name"));
    assert!(!mapped.contains_key("description"));
    Ok(())
}

#[test]
fn unknown_field_name_is_rejected_up_front() {
    let result = ItemMapping::new().field("page_count", |item: &Value| item.get("pages").cloned());
    match result {
        Err(OpdsError::UnknownField(name)) => assert_eq!(name, "page_count"),
        other => panic!("expected UnknownField, got {other:?}"),
    }
}

#[test]
fn mapped_fields_convert_into_a_publication() -> Result<()> {
    let mapping = legacy_mapping()?;
    let item = json!({
        "book_title": "To Kill a Mockingbird",
        "by": "Harper Lee",
        "year": "1960-07-11",
        "cover": "https://covers.example.com/mockingbird.jpg",
        "href": "https://books.example.com/mockingbird.epub",
    });

    let publication = publication_from_mapped(&mapping.map_item(&item));
    assert_eq!(publication.metadata.title, "To Kill a Mockingbird");
    let authors = publication.metadata.author.as_ref().unwrap();
    assert_eq!(authors[0].name, "Harper Lee");
    let published = publication.metadata.published.unwrap();
    assert_eq!(published.to_rfc3339(), "1960-07-11T00:00:00+00:00");
    assert_eq!(publication.links.len(), 1);
    assert_eq!(
        publication.links[0].href,
        "https://books.example.com/mockingbird.epub"
    );
    // Cover without a thumbnail still yields exactly one image link.
    let images = publication.images.as_ref().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(
        images[0].rel.as_deref(),
        Some("http://opds-spec.org/image")
    );
    Ok(())
}

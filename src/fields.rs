//! Field vocabulary tables.
//!
//! Two fixed vocabularies describe a publication record: the canonical
//! schema.org names used everywhere inside the crate, and the legacy
//! OPDS-convenience names older provider mappings were written against.
//! Every legacy name resolves to exactly one canonical name; a canonical
//! extractor always wins over the legacy one for the same slot.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Canonical field names with their schema.org descriptions, in the order
/// the item mapper evaluates them.
pub static SCHEMA_ORG_FIELDS: &[(&str, &str)] = &[
    ("name", "Title of the publication (schema.org name)"),
    ("identifier", "Unique identifier, URI or URL (schema.org identifier)"),
    ("description", "Description or summary (schema.org description)"),
    ("inLanguage", "Language code(s) as a list (schema.org inLanguage)"),
    ("author", "Author name(s) or contributor maps (schema.org author)"),
    ("publisher", "Publisher name(s) or contributor maps (schema.org publisher)"),
    ("datePublished", "Publication date (schema.org datePublished)"),
    ("dateModified", "Last modification date (schema.org dateModified)"),
    ("image", "URL to the cover image (schema.org image)"),
    ("thumbnailUrl", "URL to the thumbnail image (schema.org thumbnailUrl)"),
    ("about", "Subject tags as a list (schema.org about)"),
    ("keywords", "Keyword tags as a list (schema.org keywords)"),
    ("genre", "Genre tags as a list (schema.org genre)"),
    ("url", "URL to acquire/download the resource (schema.org url)"),
    ("encoding", "Available media encodings (schema.org encoding)"),
    ("encodingFormat", "MIME type of the acquisition resource (schema.org encodingFormat)"),
];

/// Legacy OPDS field names with their descriptions, in the order the item
/// mapper runs the fallback pass.
pub static OPDS_RESERVED_FIELDS: &[(&str, &str)] = &[
    ("title", "Title of the publication"),
    ("identifier", "Unique identifier (URI or URL)"),
    ("description", "Description or summary"),
    ("language", "Language code(s) as a list"),
    ("author", "Author name(s) as a list"),
    ("publisher", "Publisher name(s) as a list"),
    ("published", "Publication date"),
    ("modified", "Last modification date"),
    ("cover_url", "URL to cover image"),
    ("thumbnail_url", "URL to thumbnail image"),
    ("acquisition_link", "URL to acquire/download the resource"),
    ("acquisition_type", "MIME type of the acquisition resource"),
    ("subject", "Subject tags as a list"),
];

/// Legacy name -> canonical name. Names shared by both vocabularies map to
/// themselves, so a legacy-era mapping keeps working unchanged.
static LEGACY_TO_SCHEMA: &[(&str, &str)] = &[
    ("title", "name"),
    ("identifier", "identifier"),
    ("description", "description"),
    ("language", "inLanguage"),
    ("author", "author"),
    ("publisher", "publisher"),
    ("published", "datePublished"),
    ("modified", "dateModified"),
    ("cover_url", "image"),
    ("thumbnail_url", "thumbnailUrl"),
    ("acquisition_link", "url"),
    ("acquisition_type", "encodingFormat"),
    ("subject", "about"),
];

static CANONICAL_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LEGACY_TO_SCHEMA.iter().copied().collect());

static KNOWN_FIELDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    SCHEMA_ORG_FIELDS
        .iter()
        .chain(OPDS_RESERVED_FIELDS.iter())
        .copied()
        .collect()
});

/// Canonical name for a legacy field, if `name` is a legacy field.
pub fn canonical_for(name: &str) -> Option<&'static str> {
    CANONICAL_LOOKUP.get(name).copied()
}

/// Whether `name` belongs to either vocabulary.
pub fn is_known_field(name: &str) -> bool {
    KNOWN_FIELDS.contains_key(name)
}

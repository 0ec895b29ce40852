/// Fixed relation, MIME, and context strings from the OPDS 2.0 and
/// Web Publication Manifest specs, used across the codebase.

/// JSON-LD context emitted as the first key of every serialized catalog.
pub const WEBPUB_MANIFEST_CONTEXT: &str = "https://readium.org/webpub-manifest/context.jsonld";

/// MIME type of an OPDS 2.0 catalog document.
pub const OPDS_JSON_TYPE: &str = "application/opds+json";

/// Relation for acquisition links.
pub const ACQUISITION_REL: &str = "http://opds-spec.org/acquisition";

/// Relation for cover images.
pub const IMAGE_REL: &str = "http://opds-spec.org/image";

/// Relation for thumbnail images.
pub const THUMBNAIL_REL: &str = "http://opds-spec.org/image/thumbnail";

/// Fallback MIME type when a record resolves no acquisition format.
pub const DEFAULT_ACQUISITION_TYPE: &str = "application/octet-stream";

/// MIME type assumed for cover and thumbnail images.
pub const JPEG_TYPE: &str = "image/jpeg";

/// Default page size for search requests.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

//! OPDS 2.0 catalog feed generator.
//!
//! Builds OPDS 2.0 catalog documents (JSON feeds describing digital
//! publications) from arbitrary upstream data sources, based on the OPDS 2.0
//! specification at <https://drafts.opds.io/opds-2.0>. Backends plug in
//! through the [`DataProvider`] trait; their raw records are reconciled
//! through the schema.org/legacy field vocabulary and assembled into
//! pagination-correct catalogs.

pub mod catalog;
pub mod constants;
pub mod convert;
pub mod error;
pub mod fields;
pub mod logging;
pub mod mapping;
pub mod models;
pub mod pagination;
pub mod provider;
pub mod providers;

pub use catalog::CatalogBuilder;
pub use convert::publication_from_mapped;
pub use error::{OpdsError, Result};
pub use fields::{OPDS_RESERVED_FIELDS, SCHEMA_ORG_FIELDS};
pub use mapping::{ItemMapping, RawItem};
pub use models::{Catalog, Contributor, Link, Metadata, Navigation, Publication};
pub use pagination::{add_pagination, Pagination};
pub use provider::{DataProvider, ProviderRecord, SearchRequest, SearchResponse};

//! Per-provider field extraction.
//!
//! An [`ItemMapping`] holds one pure extraction function per vocabulary
//! field and turns an arbitrary raw record into a flat map of canonical
//! schema.org field names to values. It is constructed once per provider
//! and reused for every record in a result set; it holds no state and is
//! never serialized.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{OpdsError, Result};
use crate::fields::{canonical_for, OPDS_RESERVED_FIELDS, SCHEMA_ORG_FIELDS};

/// Raw record from a data source, shape unconstrained.
pub type RawItem = Value;

type Extractor = Box<dyn Fn(&RawItem) -> Option<Value> + Send + Sync>;

#[derive(Default)]
pub struct ItemMapping {
    extractors: HashMap<&'static str, Extractor>,
}

impl ItemMapping {
    pub fn new() -> Self {
        ItemMapping::default()
    }

    /// Registers an extractor for a canonical or legacy field name.
    ///
    /// Chainable: `ItemMapping::new().field("title", ...)?.field(...)?`.
    /// Unknown names are rejected so a typo in a provider mapping fails at
    /// construction instead of silently dropping a field.
    pub fn field<F>(mut self, name: &str, extractor: F) -> Result<Self>
    where
        F: Fn(&RawItem) -> Option<Value> + Send + Sync + 'static,
    {
        let known = SCHEMA_ORG_FIELDS
            .iter()
            .chain(OPDS_RESERVED_FIELDS.iter())
            .map(|(field, _)| *field)
            .find(|field| *field == name);
        match known {
            Some(field) => {
                self.extractors.insert(field, Box::new(extractor));
                Ok(self)
            }
            None => Err(OpdsError::UnknownField(name.to_string())),
        }
    }

    /// Whether any extractor has been registered.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Maps one raw record to canonical field names.
    ///
    /// The canonical pass always completes before the legacy fallback pass,
    /// and a legacy extractor is consulted only while its canonical
    /// counterpart is still unset, so registration order never changes the
    /// output. Null results are treated as absent. Idempotent.
    pub fn map_item(&self, item: &RawItem) -> Map<String, Value> {
        let mut mapped = Map::new();

        for (field, _) in SCHEMA_ORG_FIELDS {
            if let Some(extract) = self.extractors.get(field) {
                if let Some(value) = extract(item) {
                    if !value.is_null() {
                        mapped.insert(field.to_string(), value);
                    }
                }
            }
        }

        for (legacy, _) in OPDS_RESERVED_FIELDS {
            let canonical = match canonical_for(legacy) {
                Some(canonical) => canonical,
                None => continue,
            };
            if mapped.contains_key(canonical) {
                continue;
            }
            // Shared names like "author" resolve to the same extractor slot
            // as the canonical pass; skip those to avoid a double call.
            if canonical == *legacy {
                continue;
            }
            if let Some(extract) = self.extractors.get(legacy) {
                if let Some(value) = extract(item) {
                    if !value.is_null() {
                        mapped.insert(canonical.to_string(), value);
                    }
                }
            }
        }

        mapped
    }
}

impl std::fmt::Debug for ItemMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.extractors.keys().collect();
        names.sort();
        f.debug_struct("ItemMapping").field("fields", &names).finish()
    }
}

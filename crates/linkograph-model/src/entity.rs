//! Raw entity records.
//!
//! Domain files are hand/AI-edited and denormalized, so records arrive here
//! untrusted: the `relationships` substructure is kept as raw JSON and only
//! interpreted by the extractor and the structural validator. Deserializing
//! a `RawEntity` never fails on a malformed `relationships` value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One domain file's contents: entity id → record.
///
/// A `BTreeMap` keeps iteration order deterministic, which in turn keeps
/// finding order and report counts byte-identical across runs.
pub type DomainRecords = BTreeMap<String, RawEntity>;

/// An entity record as found in a domain file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEntity {
    /// Human-readable label. Falls back to the entity id when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// The nested relationship structure, untrusted and arbitrarily shaped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<serde_json::Value>,
    /// Content fields (descriptions, captions, FAQs, ...) this subsystem
    /// does not interpret. Retained so a loaded record can round-trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawEntity {
    /// Display name with id fallback.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(id)
    }

    /// Category with the documented fallback for uncategorized records.
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or("uncategorized")
    }

    pub fn subcategory_or_default(&self) -> &str {
        self.subcategory.as_deref().unwrap_or("general")
    }
}

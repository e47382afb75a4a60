//! Forward↔reverse relationship-type map.
//!
//! Motivation
//! ----------
//! Some relationship fields are declared bidirectional: a forward edge in
//! section `producesCompounds` on a contaminant implies a reverse edge in
//! section `sourceContaminants` on the compound. The backward validator
//! needs that pairing as data, so it is modeled as an explicit immutable
//! object handed to the validator's constructor (never a module-level
//! global), so tests can substitute alternate mappings.
//!
//! Fields absent from the map are intentionally one-directional and exempt
//! from backward validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Forward relationship field → expected reverse field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipMap {
    pairs: BTreeMap<String, String>,
}

impl RelationshipMap {
    /// An empty map: every relationship is treated as one-directional.
    pub fn empty() -> Self {
        Self {
            pairs: BTreeMap::new(),
        }
    }

    /// Build from explicit `(forward, reverse)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(f, r)| (f.into(), r.into()))
                .collect(),
        }
    }

    /// The reverse field expected on the target, if `field` is mapped.
    pub fn reverse_of(&self, field: &str) -> Option<&str> {
        self.pairs.get(field).map(String::as_str)
    }

    /// A self-paired relation (`relatedMaterials` ↔ `relatedMaterials`).
    pub fn is_symmetric(&self, field: &str) -> bool {
        self.reverse_of(field) == Some(field)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for RelationshipMap {
    /// The dataset's curated pairings. Both directions of each asymmetric
    /// pair are listed so either side of a relationship can act as the
    /// forward edge.
    fn default() -> Self {
        Self::from_pairs([
            ("commonContaminants", "foundOnMaterials"),
            ("foundOnMaterials", "commonContaminants"),
            ("producesCompounds", "sourceContaminants"),
            ("sourceContaminants", "producesCompounds"),
            ("recommendedSettings", "suitableMaterials"),
            ("suitableMaterials", "recommendedSettings"),
            ("relatedMaterials", "relatedMaterials"),
            ("relatedContaminants", "relatedContaminants"),
        ])
    }
}

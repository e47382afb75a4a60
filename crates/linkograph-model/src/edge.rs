//! Typed edge records.
//!
//! The extractor flattens the nested `relationships` structure into these;
//! all link validation runs over `ExtractedEdge` values, never over raw
//! JSON.

use serde::{Deserialize, Serialize};

/// One directed reference from a source entity to a target entity.
///
/// `category` is the free-form grouping label, `section` the relationship
/// field (e.g. `producesCompounds`) that the relationship-type map keys on.
/// The cached fields are the denormalized display data whose staleness the
/// validators detect; they are copies, never authorities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEdge {
    pub source_id: String,
    pub category: String,
    pub section: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_name: Option<String>,
}

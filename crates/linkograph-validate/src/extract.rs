//! Edge extraction.
//!
//! Flattens an entity's nested `relationships` structure into typed edges
//! against a small explicit schema (category, then section, then `items`)
//! rather than unconstrained recursion. Deviations from the schema are not
//! the extractor's problem: the structural validator walks the same raw
//! data independently and reports them, so traversal here just skips what
//! it cannot use and never crashes on malformed input.

use std::collections::HashSet;

use linkograph_model::{ExtractedEdge, RawEntity};

use crate::findings::{Category, Finding};

/// The flat edge stream for one source entity.
#[derive(Debug, Default)]
pub struct Extraction {
    /// First occurrence of each (section, target) pair, in document order.
    /// Correctness checks run over these only.
    pub edges: Vec<ExtractedEdge>,
    /// Repeat occurrences. Kept separately: the backward pass needs them to
    /// spot duplicate backlinks, but they must not inflate link checks.
    pub duplicates: Vec<ExtractedEdge>,
    /// Duplicate-edge warnings.
    pub findings: Vec<Finding>,
    /// Entity has no `relationships` key at all.
    pub orphan: bool,
}

/// Pull the target id out of an edge item. The canonical key is `id`; the
/// legacy `target_id` spelling still resolves (the structural validator
/// flags it as a convention violation).
fn item_target_id(item: &serde_json::Map<String, serde_json::Value>) -> Option<&str> {
    item.get("id")
        .or_else(|| item.get("target_id"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

fn item_str(item: &serde_json::Map<String, serde_json::Value>, key: &str) -> Option<String> {
    item.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

/// Extract every well-formed edge of one entity.
pub fn extract_edges(source_id: &str, entity: &RawEntity) -> Extraction {
    let mut out = Extraction::default();

    let Some(relationships) = entity.relationships.as_ref() else {
        out.orphan = true;
        return out;
    };
    let Some(categories) = relationships.as_object() else {
        return out;
    };

    let mut seen: HashSet<(String, String)> = HashSet::new();

    for (category, category_value) in categories {
        let Some(sections) = category_value.as_object() else {
            continue;
        };
        for (section, section_value) in sections {
            let Some(items) = section_value.get("items").and_then(|v| v.as_array()) else {
                continue;
            };
            for item in items {
                let Some(item) = item.as_object() else {
                    continue;
                };
                let Some(target_id) = item_target_id(item) else {
                    continue;
                };

                let edge = ExtractedEdge {
                    source_id: source_id.to_string(),
                    category: category.clone(),
                    section: section.clone(),
                    target_id: target_id.to_string(),
                    cached_url: item_str(item, "url"),
                    cached_name: item_str(item, "name"),
                };

                if seen.insert((section.clone(), target_id.to_string())) {
                    out.edges.push(edge);
                } else {
                    out.findings.push(
                        Finding::new(
                            Category::DuplicateEdge,
                            format!("duplicate edge to `{target_id}` in section `{section}`"),
                        )
                        .with_source(source_id)
                        .with_field(section.clone())
                        .with_target(target_id),
                    );
                    out.duplicates.push(edge);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkograph_model::RawEntity;

    fn entity_with_relationships(relationships: serde_json::Value) -> RawEntity {
        RawEntity {
            relationships: Some(relationships),
            ..RawEntity::default()
        }
    }

    #[test]
    fn extracts_edges_through_the_category_section_items_schema() {
        let entity = entity_with_relationships(serde_json::json!({
            "contamination": {
                "commonContaminants": {
                    "items": [
                        {"id": "rust", "url": "/contaminants/oxide/iron/rust", "name": "Rust", "frequency": "common"},
                        {"id": "oil-film", "url": "/contaminants/organic/film/oil-film"}
                    ]
                }
            },
            "related": {
                "relatedMaterials": {"items": [{"id": "iron", "url": "/materials/metal/ferrous/iron"}]}
            }
        }));

        let out = extract_edges("steel", &entity);
        assert!(!out.orphan);
        assert!(out.findings.is_empty());
        assert_eq!(out.edges.len(), 3);

        let first = &out.edges[0];
        assert_eq!(first.source_id, "steel");
        assert_eq!(first.category, "contamination");
        assert_eq!(first.section, "commonContaminants");
        assert_eq!(first.target_id, "rust");
        assert_eq!(first.cached_url.as_deref(), Some("/contaminants/oxide/iron/rust"));
        assert_eq!(first.cached_name.as_deref(), Some("Rust"));
    }

    #[test]
    fn missing_relationships_is_an_orphan_with_zero_edges() {
        let out = extract_edges("lonely", &RawEntity::default());
        assert!(out.orphan);
        assert!(out.edges.is_empty());
        assert!(out.findings.is_empty());
    }

    #[test]
    fn malformed_containers_yield_zero_edges_without_crashing() {
        // Scenario: `items` is a single dict instead of a list.
        let entity = entity_with_relationships(serde_json::json!({
            "contamination": {
                "commonContaminants": {"items": {"id": "rust"}},
                "producesCompounds": "scalar-section"
            },
            "scalar-category": 7
        }));
        let out = extract_edges("steel", &entity);
        assert!(out.edges.is_empty());
    }

    #[test]
    fn duplicate_section_target_pairs_extract_once_and_warn() {
        let entity = entity_with_relationships(serde_json::json!({
            "contamination": {
                "commonContaminants": {
                    "items": [
                        {"id": "rust", "url": "/a"},
                        {"id": "rust", "url": "/b"}
                    ]
                }
            }
        }));
        let out = extract_edges("steel", &entity);
        assert_eq!(out.edges.len(), 1);
        assert_eq!(out.edges[0].cached_url.as_deref(), Some("/a"));
        assert_eq!(out.duplicates.len(), 1);
        assert_eq!(out.duplicates[0].cached_url.as_deref(), Some("/b"));
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.findings[0].category, Category::DuplicateEdge);
    }

    #[test]
    fn legacy_target_id_key_still_resolves() {
        let entity = entity_with_relationships(serde_json::json!({
            "related": {"relatedMaterials": {"items": [{"target_id": "iron", "url": "/x"}]}}
        }));
        let out = extract_edges("steel", &entity);
        assert_eq!(out.edges.len(), 1);
        assert_eq!(out.edges[0].target_id, "iron");
    }

    #[test]
    fn same_target_in_different_sections_is_not_a_duplicate() {
        let entity = entity_with_relationships(serde_json::json!({
            "related": {
                "relatedMaterials": {"items": [{"id": "iron", "url": "/x"}]},
                "seeAlso": {"items": [{"id": "iron", "url": "/x"}]}
            }
        }));
        let out = extract_edges("steel", &entity);
        assert_eq!(out.edges.len(), 2);
        assert!(out.findings.is_empty());
    }
}

//! Forward link validation.
//!
//! For every extracted edge: the target must exist in the index, and a
//! cached path on the edge must equal the target's canonical path
//! byte-for-byte. Edges that pass are registered in a target-keyed multimap
//! so the backward pass can run without a second full traversal.

use std::collections::BTreeMap;

use linkograph_model::ExtractedEdge;

use crate::findings::{Category, Finding};
use crate::index::EntityIndex;

/// Result of the forward pass.
#[derive(Debug, Default)]
pub struct ForwardOutcome<'a> {
    pub findings: Vec<Finding>,
    /// Verified edges grouped by target id, for the backward pass.
    pub verified_by_target: BTreeMap<&'a str, Vec<&'a ExtractedEdge>>,
    pub verified_count: usize,
}

/// Check every edge against the index.
pub fn check_forward_links<'a>(
    edges: &'a [ExtractedEdge],
    index: &EntityIndex,
) -> ForwardOutcome<'a> {
    let mut out = ForwardOutcome::default();

    for edge in edges {
        let Some(target) = index.get(&edge.target_id) else {
            out.findings.push(
                Finding::new(
                    Category::MissingTarget,
                    format!(
                        "`{}` references `{}` via `{}`, but no such entity exists in any domain",
                        edge.source_id, edge.target_id, edge.section
                    ),
                )
                .with_source(edge.source_id.clone())
                .with_field(edge.section.clone())
                .with_target(edge.target_id.clone()),
            );
            continue;
        };

        if let Some(cached) = edge.cached_url.as_deref() {
            if cached != target.canonical_path {
                out.findings.push(
                    Finding::new(
                        Category::PathMismatch,
                        format!(
                            "`{}` caches a stale path for `{}` in `{}`",
                            edge.source_id, edge.target_id, edge.section
                        ),
                    )
                    .with_source(edge.source_id.clone())
                    .with_field(edge.section.clone())
                    .with_target(edge.target_id.clone())
                    .with_expected_actual(target.canonical_path.clone(), cached),
                );
                continue;
            }
        }

        out.verified_count += 1;
        out.verified_by_target
            .entry(edge.target_id.as_str())
            .or_default()
            .push(edge);
    }

    tracing::debug!(
        edges = edges.len(),
        verified = out.verified_count,
        "forward pass complete"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkograph_model::{Domain, DomainRecords, PathTemplateRegistry, RawEntity};
    use std::collections::BTreeMap;

    fn index_with_steel_and_rust() -> EntityIndex {
        let mut domains = BTreeMap::new();

        let mut materials = DomainRecords::new();
        materials.insert(
            "steel".into(),
            RawEntity {
                category: Some("metal".into()),
                subcategory: Some("ferrous".into()),
                ..RawEntity::default()
            },
        );
        domains.insert(Domain::Materials, materials);

        let mut contaminants = DomainRecords::new();
        contaminants.insert(
            "rust".into(),
            RawEntity {
                category: Some("oxide".into()),
                subcategory: Some("iron".into()),
                ..RawEntity::default()
            },
        );
        domains.insert(Domain::Contaminants, contaminants);

        EntityIndex::build(&domains, &PathTemplateRegistry::default()).0
    }

    fn edge(source: &str, section: &str, target: &str, url: Option<&str>) -> ExtractedEdge {
        ExtractedEdge {
            source_id: source.into(),
            category: "test".into(),
            section: section.into(),
            target_id: target.into(),
            cached_url: url.map(str::to_string),
            cached_name: None,
        }
    }

    #[test]
    fn resolving_edge_with_correct_path_is_verified() {
        let index = index_with_steel_and_rust();
        let edges = vec![edge(
            "steel",
            "commonContaminants",
            "rust",
            Some("/contaminants/oxide/iron/rust"),
        )];
        let out = check_forward_links(&edges, &index);
        assert!(out.findings.is_empty());
        assert_eq!(out.verified_count, 1);
        assert_eq!(out.verified_by_target["rust"].len(), 1);
    }

    #[test]
    fn missing_target_is_an_error_and_not_registered() {
        let index = index_with_steel_and_rust();
        let edges = vec![edge("steel", "commonContaminants", "ghost", None)];
        let out = check_forward_links(&edges, &index);
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.findings[0].category, Category::MissingTarget);
        assert_eq!(out.verified_count, 0);
        assert!(out.verified_by_target.is_empty());
    }

    #[test]
    fn stale_cached_path_is_an_error_with_expected_and_actual() {
        let index = index_with_steel_and_rust();
        let edges = vec![edge(
            "steel",
            "commonContaminants",
            "rust",
            Some("/contaminants/old/rust"),
        )];
        let out = check_forward_links(&edges, &index);
        assert_eq!(out.findings.len(), 1);
        let f = &out.findings[0];
        assert_eq!(f.category, Category::PathMismatch);
        assert_eq!(f.expected.as_deref(), Some("/contaminants/oxide/iron/rust"));
        assert_eq!(f.actual.as_deref(), Some("/contaminants/old/rust"));
        assert_eq!(out.verified_count, 0);
    }

    #[test]
    fn edge_without_cached_path_still_verifies_on_existence() {
        let index = index_with_steel_and_rust();
        let edges = vec![edge("steel", "commonContaminants", "rust", None)];
        let out = check_forward_links(&edges, &index);
        assert!(out.findings.is_empty());
        assert_eq!(out.verified_count, 1);
    }
}

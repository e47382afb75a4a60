//! Backward link validation.
//!
//! Consumes the verified-forward-edge multimap. For each verified edge
//! whose relationship field has a mapped reverse, the target entity must
//! carry a reverse edge pointing back at the source, and that edge's
//! cached path must equal the source's canonical path.
//!
//! A missing backlink is a *warning*: some relations are deliberately
//! curated asymmetrically during data entry. A backlink whose cached path
//! is stale is an *error*; that is never an editorial choice.
//!
//! The relationship-type map is constructor state, not a module global, so
//! tests substitute alternate mappings freely.

use std::collections::BTreeMap;

use linkograph_model::{Domain, DomainRecords, ExtractedEdge, RelationshipMap};

use crate::extract::extract_edges;
use crate::findings::{Category, Finding};
use crate::forward::ForwardOutcome;
use crate::index::EntityIndex;

pub struct BackwardValidator<'a> {
    relmap: &'a RelationshipMap,
}

impl<'a> BackwardValidator<'a> {
    pub fn new(relmap: &'a RelationshipMap) -> Self {
        Self { relmap }
    }

    /// Check every verified forward edge for a matching, non-stale reverse
    /// edge on its target.
    ///
    /// The multimap is keyed by target, so each target's relationship
    /// structure is re-extracted exactly once regardless of how many
    /// sources point at it. Extraction findings are discarded here: they
    /// were already reported when the target was processed as a source.
    pub fn check(
        &self,
        forward: &ForwardOutcome<'_>,
        index: &EntityIndex,
        domains: &BTreeMap<Domain, DomainRecords>,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (target_id, forward_edges) in &forward.verified_by_target {
            // Verified edges resolve, so the entry and its record exist;
            // stay soft anyway, the pipeline never aborts on one record.
            let Some(target_entry) = index.get(target_id) else {
                continue;
            };
            let Some(target_record) = domains
                .get(&target_entry.domain)
                .and_then(|records| records.get(*target_id))
            else {
                continue;
            };

            let extraction = extract_edges(target_id, target_record);

            for edge in forward_edges {
                let Some(reverse_field) = self.relmap.reverse_of(&edge.section) else {
                    continue;
                };

                let candidates: Vec<&ExtractedEdge> = extraction
                    .edges
                    .iter()
                    .chain(extraction.duplicates.iter())
                    .filter(|back| {
                        back.section == reverse_field && back.target_id == edge.source_id
                    })
                    .collect();

                let Some(first) = candidates.first() else {
                    findings.push(
                        Finding::new(
                            Category::MissingBacklink,
                            format!(
                                "`{target_id}` has no `{reverse_field}` edge back to `{}` (forward `{}`)",
                                edge.source_id, edge.section
                            ),
                        )
                        .with_source(edge.source_id.clone())
                        .with_field(edge.section.clone())
                        .with_target((*target_id).to_string()),
                    );
                    continue;
                };

                if let Some(cached) = first.cached_url.as_deref() {
                    let source_path = index
                        .get(&edge.source_id)
                        .map(|entry| entry.canonical_path.as_str());
                    if source_path.is_some_and(|expected| cached != expected) {
                        findings.push(
                            Finding::new(
                                Category::BacklinkPathMismatch,
                                format!(
                                    "`{target_id}` caches a stale path for `{}` in `{reverse_field}`",
                                    edge.source_id
                                ),
                            )
                            .with_source(edge.source_id.clone())
                            .with_field(reverse_field)
                            .with_target((*target_id).to_string())
                            .with_expected_actual(source_path.unwrap_or_default(), cached),
                        );
                    }
                }

                // Tie-break rule: validate against the first, flag the rest.
                for _extra in &candidates[1..] {
                    findings.push(
                        Finding::new(
                            Category::DuplicateBacklink,
                            format!(
                                "`{target_id}` has multiple `{reverse_field}` edges back to `{}`",
                                edge.source_id
                            ),
                        )
                        .with_source(edge.source_id.clone())
                        .with_field(reverse_field)
                        .with_target((*target_id).to_string()),
                    );
                }
            }
        }

        tracing::debug!(findings = findings.len(), "backward pass complete");
        findings
    }
}

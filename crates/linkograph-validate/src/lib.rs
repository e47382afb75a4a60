//! Cross-domain relationship integrity validation
//!
//! The dataset is denormalized: every entity embeds forward references to
//! entities in other domains plus cached display data (path, name) so the
//! render layer never joins. Hand/AI edits make those references rot:
//! targets get renamed or deleted, reverse links go stale, cached paths
//! drift. This crate walks the whole relationship graph once per run and
//! reports every inconsistency it finds:
//!
//! - `index`: global id → (domain, canonical path, display name) lookup
//! - `extract`: nested relationships → flat typed edge stream
//! - `structure`: shape and naming-convention checks over raw edge data
//! - `forward`: target existence + cached-path staleness
//! - `backward`: bidirectional relations must have matching reverse edges
//! - `report`: aggregation, text rendering, JSON export shape
//!
//! The validator repairs nothing and mutates nothing; it loads, checks,
//! reports, and discards. Validating functions return findings instead of
//! raising, so one bad record never costs the comprehensive report.

pub mod backward;
pub mod extract;
pub mod findings;
pub mod forward;
pub mod index;
pub mod report;
pub mod structure;

pub use backward::BackwardValidator;
pub use extract::{extract_edges, Extraction};
pub use findings::{Category, Finding, Severity};
pub use forward::{check_forward_links, ForwardOutcome};
pub use index::{EntityIndex, IndexedEntity};
pub use report::{render_text, summarize, IntegrityReportV1, IntegritySummaryV1, RenderOptions};

use linkograph_ingest::DatasetLoad;
use linkograph_model::{Domain, ExtractedEdge, PathTemplateRegistry, RelationshipMap};

/// Run the full validation pipeline over a loaded dataset.
///
/// Single-threaded, single-pass: build the index, walk every entity once
/// collecting structural findings and edges, then the forward and backward
/// link passes. Findings order is deterministic (domains in enum order,
/// entities in id order), so two runs over an unmodified dataset produce
/// identical reports modulo the timestamp.
pub fn validate_dataset(
    load: &DatasetLoad,
    templates: &PathTemplateRegistry,
    relmap: &RelationshipMap,
    domain_filter: Option<Domain>,
) -> IntegrityReportV1 {
    let mut findings: Vec<Finding> = Vec::new();

    for failure in &load.failures {
        findings.push(
            Finding::new(
                Category::LoadError,
                format!(
                    "{} ({}): {}",
                    failure.domain,
                    failure.path.display(),
                    failure.message
                ),
            ),
        );
    }

    let (index, index_findings) = EntityIndex::build(&load.domains, templates);
    findings.extend(index_findings);

    // One walk per entity: structural pass first (shape problems must not
    // block link validation of the remaining well-formed edges), then
    // extraction.
    let mut edges: Vec<ExtractedEdge> = Vec::new();
    for (_, records) in &load.domains {
        for (id, entity) in records {
            findings.extend(structure::validate_structure(id, entity));

            let extraction = extract_edges(id, entity);
            if extraction.orphan {
                findings.push(
                    Finding::new(
                        Category::Orphan,
                        format!("`{id}` has no relationships section"),
                    )
                    .with_source(id.clone()),
                );
            }
            findings.extend(extraction.findings);
            edges.extend(extraction.edges);
        }
    }

    let forward = check_forward_links(&edges, &index);
    let backward_findings =
        BackwardValidator::new(relmap).check(&forward, &index, &load.domains);
    let verified_forward_edges = forward.verified_count;
    findings.extend(forward.findings);
    findings.extend(backward_findings);

    let summary = summarize(&findings);
    let ok = summary.error_count == 0;

    IntegrityReportV1 {
        version: "integrity_report_v1".to_string(),
        generated_at: chrono::Utc::now(),
        dataset_root: load.root.display().to_string(),
        domain_filter: domain_filter.map(|d| d.slug().to_string()),
        domain_entity_counts: load
            .domain_counts()
            .into_iter()
            .map(|(domain, count)| (domain.slug().to_string(), count))
            .collect(),
        entities_scanned: load.entity_count(),
        edges_scanned: edges.len(),
        verified_forward_edges,
        summary,
        findings,
        ok,
    }
}

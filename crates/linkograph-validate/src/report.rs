//! Report aggregation and rendering.
//!
//! The aggregator is the only place that decides pass/fail: validators just
//! produce findings. Exit policy: errors fail the run, warnings never do;
//! the caller blocks a pipeline on errors while warnings accumulate for
//! manual triage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::findings::{Category, Finding, Severity};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegritySummaryV1 {
    pub error_count: usize,
    pub warning_count: usize,
    /// Finding counts keyed by category code, categories with none omitted.
    pub by_category: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityReportV1 {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub dataset_root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_filter: Option<String>,
    /// Entities loaded per domain, for the report header.
    pub domain_entity_counts: BTreeMap<String, usize>,
    pub entities_scanned: usize,
    pub edges_scanned: usize,
    pub verified_forward_edges: usize,
    pub summary: IntegritySummaryV1,
    pub findings: Vec<Finding>,
    pub ok: bool,
}

impl IntegrityReportV1 {
    pub fn has_errors(&self) -> bool {
        self.summary.error_count > 0
    }

    pub fn findings_in(&self, category: Category) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }
}

/// Fold findings into summary counts and the pass/fail verdict.
pub fn summarize(findings: &[Finding]) -> IntegritySummaryV1 {
    let mut summary = IntegritySummaryV1::default();
    for finding in findings {
        match finding.severity {
            Severity::Error => summary.error_count += 1,
            Severity::Warning => summary.warning_count += 1,
        }
        *summary
            .by_category
            .entry(finding.category.code().to_string())
            .or_default() += 1;
    }
    summary
}

/// Text rendering options.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Print every finding instead of capped examples.
    pub details: bool,
    /// Example findings shown per category when `details` is off.
    pub max_examples: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            details: false,
            max_examples: 5,
        }
    }
}

fn render_finding(finding: &Finding) -> String {
    let mut ctx = String::new();
    if let Some(source) = &finding.source_id {
        ctx.push_str(&format!(" source={source}"));
    }
    if let Some(field) = &finding.field {
        ctx.push_str(&format!(" field={field}"));
    }
    if let Some(target) = &finding.target_id {
        ctx.push_str(&format!(" target={target}"));
    }
    let mut line = format!("    - {}{}\n", finding.message, ctx);
    if let (Some(expected), Some(actual)) = (&finding.expected, &finding.actual) {
        line.push_str(&format!("      expected: {expected}\n"));
        line.push_str(&format!("      actual:   {actual}\n"));
    }
    line
}

/// Render the terminal report: header, per-category breakdown with capped
/// examples, final PASS/FAIL banner.
pub fn render_text(report: &IntegrityReportV1, opts: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str("link integrity\n");
    out.push_str(&format!("  dataset: {}\n", report.dataset_root));
    if let Some(filter) = &report.domain_filter {
        out.push_str(&format!("  domain filter: {filter}\n"));
    }
    for (domain, count) in &report.domain_entity_counts {
        out.push_str(&format!("  {domain}: {count} entities\n"));
    }
    out.push_str(&format!(
        "  scanned: {} entities, {} edges ({} forward-verified)\n",
        report.entities_scanned, report.edges_scanned, report.verified_forward_edges
    ));
    out.push_str(&format!(
        "  summary: errors={} warnings={}\n",
        report.summary.error_count, report.summary.warning_count
    ));

    for category in Category::ALL {
        let findings: Vec<&Finding> = report.findings_in(category).collect();
        if findings.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "\n  {} [{}] ({})\n",
            category.code(),
            category.severity(),
            findings.len()
        ));
        let shown = if opts.details {
            findings.len()
        } else {
            opts.max_examples.min(findings.len())
        };
        for finding in &findings[..shown] {
            out.push_str(&render_finding(finding));
        }
        if shown < findings.len() {
            out.push_str(&format!(
                "    ... and {} more (run with --details)\n",
                findings.len() - shown
            ));
        }
    }

    out.push_str(&format!(
        "\n{}\n",
        if report.has_errors() {
            format!("FAIL: {} error(s)", report.summary.error_count)
        } else {
            "PASS".to_string()
        }
    ));

    out
}

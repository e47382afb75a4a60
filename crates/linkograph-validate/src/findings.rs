//! Finding taxonomy.
//!
//! Every validator returns a (possibly empty) list of findings instead of
//! raising: the report aggregator is the only place that decides pass/fail.
//! `anyhow::Error` stays reserved for genuinely unrecoverable conditions
//! (dataset directory absent, report file unwritable).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Finding categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Domain file unreadable/unparsable; its entities are absent from the
    /// index (their referents then surface as missing targets, which is
    /// itself informative).
    LoadError,
    /// Same id in two domains; the id space is global.
    DuplicateId,
    /// Forward reference to a nonexistent id.
    MissingTarget,
    /// Cached forward path differs from the target's canonical path.
    PathMismatch,
    /// Expected reverse edge absent. A warning: some relations are
    /// deliberately curated asymmetrically during data entry.
    MissingBacklink,
    /// Reverse edge exists but its cached path is stale. Pure staleness,
    /// never editorial, so an error.
    BacklinkPathMismatch,
    /// More than one candidate reverse edge; validation ran against the
    /// first.
    DuplicateBacklink,
    /// Same (section, target) extracted more than once from one source.
    DuplicateEdge,
    /// Malformed edge or container shape.
    Structural,
    /// Legacy field naming variants.
    NamingConvention,
    /// Entity with no relationships section at all.
    Orphan,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::LoadError,
        Category::DuplicateId,
        Category::MissingTarget,
        Category::PathMismatch,
        Category::MissingBacklink,
        Category::BacklinkPathMismatch,
        Category::DuplicateBacklink,
        Category::DuplicateEdge,
        Category::Structural,
        Category::NamingConvention,
        Category::Orphan,
    ];

    /// Stable snake_case code used in reports and JSON export.
    pub fn code(self) -> &'static str {
        match self {
            Category::LoadError => "load_error",
            Category::DuplicateId => "duplicate_id",
            Category::MissingTarget => "missing_target",
            Category::PathMismatch => "path_mismatch",
            Category::MissingBacklink => "missing_backlink",
            Category::BacklinkPathMismatch => "backlink_path_mismatch",
            Category::DuplicateBacklink => "duplicate_backlink",
            Category::DuplicateEdge => "duplicate_edge",
            Category::Structural => "structural",
            Category::NamingConvention => "naming_convention",
            Category::Orphan => "orphan",
        }
    }

    /// Severity is a property of the category, not of individual findings.
    pub fn severity(self) -> Severity {
        match self {
            Category::LoadError
            | Category::DuplicateId
            | Category::MissingTarget
            | Category::PathMismatch
            | Category::BacklinkPathMismatch
            | Category::Structural => Severity::Error,
            Category::MissingBacklink
            | Category::DuplicateBacklink
            | Category::DuplicateEdge
            | Category::NamingConvention
            | Category::Orphan => Severity::Warning,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Relationship field (section name) the finding is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl Finding {
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            severity: category.severity(),
            category,
            message: message.into(),
            source_id: None,
            field: None,
            target_id: None,
            expected: None,
            actual: None,
        }
    }

    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_target(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    pub fn with_expected_actual(
        mut self,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}

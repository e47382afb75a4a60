//! Domains and canonical path templates.
//!
//! The dataset is split into a fixed set of domains, one structured file
//! each. Every entity has exactly one authoritative address, its canonical
//! path, computed from `(domain, category, subcategory, id)` by the
//! domain's template. The path is never read back from cached fields; it is
//! always recomputed here and compared *against* caches.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The fixed set of entity collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Materials,
    Contaminants,
    Compounds,
    Settings,
}

impl Domain {
    /// All domains, in the deterministic order used for loading and
    /// index construction.
    pub const ALL: [Domain; 4] = [
        Domain::Materials,
        Domain::Contaminants,
        Domain::Compounds,
        Domain::Settings,
    ];

    /// Stable slug used for dataset file discovery (`<slug>.json`) and as
    /// the leading segment of canonical paths.
    pub fn slug(self) -> &'static str {
        match self {
            Domain::Materials => "materials",
            Domain::Contaminants => "contaminants",
            Domain::Compounds => "compounds",
            Domain::Settings => "settings",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown domain `{0}` (expected materials|contaminants|compounds|settings)")]
pub struct UnknownDomainError(pub String);

impl FromStr for Domain {
    type Err = UnknownDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "materials" => Ok(Domain::Materials),
            "contaminants" => Ok(Domain::Contaminants),
            "compounds" => Ok(Domain::Compounds),
            "settings" => Ok(Domain::Settings),
            other => Err(UnknownDomainError(other.to_string())),
        }
    }
}

/// One domain's canonical path pattern.
///
/// Rendering is a pure function of `(category, subcategory, id)`; the same
/// inputs always produce the same path, and two distinct ids in the same
/// category/subcategory scope cannot collide because the id is the final
/// path segment before the (fixed) suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTemplate {
    /// Leading path segment, e.g. `materials`.
    pub prefix: String,
    /// Trailing id decoration, e.g. `-settings` (empty for most domains).
    #[serde(default)]
    pub suffix: String,
}

impl PathTemplate {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Render the canonical path for one entity.
    pub fn render(&self, category: &str, subcategory: &str, id: &str) -> String {
        format!(
            "/{}/{}/{}/{}{}",
            self.prefix, category, subcategory, id, self.suffix
        )
    }
}

/// Per-domain path templates.
///
/// Templates are configuration, not hardcoded literals: a dataset may ship
/// an alternate registry (JSON, keyed by domain slug) and the defaults are
/// only a fallback. The registry is immutable once handed to the index
/// builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathTemplateRegistry {
    templates: BTreeMap<Domain, PathTemplate>,
}

// Deserialized registries are partial overrides: domains the file does not
// mention keep their default template, so `template()` stays total.
impl<'de> Deserialize<'de> for PathTemplateRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let overrides = BTreeMap::<Domain, PathTemplate>::deserialize(deserializer)?;
        let mut reg = Self::default();
        for (domain, template) in overrides {
            reg.register(domain, template);
        }
        Ok(reg)
    }
}

impl PathTemplateRegistry {
    pub fn template(&self, domain: Domain) -> &PathTemplate {
        // Every constructor covers all of `Domain::ALL`.
        &self.templates[&domain]
    }

    /// Override one domain's template (used when a dataset ships its own).
    pub fn register(&mut self, domain: Domain, template: PathTemplate) {
        self.templates.insert(domain, template);
    }

    /// Render the canonical path of `(domain, category, subcategory, id)`.
    pub fn canonical_path(
        &self,
        domain: Domain,
        category: &str,
        subcategory: &str,
        id: &str,
    ) -> String {
        self.template(domain).render(category, subcategory, id)
    }
}

impl Default for PathTemplateRegistry {
    fn default() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(Domain::Materials, PathTemplate::new("materials", ""));
        templates.insert(Domain::Contaminants, PathTemplate::new("contaminants", ""));
        templates.insert(Domain::Compounds, PathTemplate::new("compounds", "-compound"));
        templates.insert(Domain::Settings, PathTemplate::new("settings", "-settings"));
        Self { templates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_roundtrip() {
        for d in Domain::ALL {
            assert_eq!(d.slug().parse::<Domain>().unwrap(), d);
        }
        assert!("minerals".parse::<Domain>().is_err());
    }

    #[test]
    fn default_templates_match_documented_patterns() {
        let reg = PathTemplateRegistry::default();
        assert_eq!(
            reg.canonical_path(Domain::Materials, "metal", "ferrous", "steel"),
            "/materials/metal/ferrous/steel"
        );
        assert_eq!(
            reg.canonical_path(Domain::Settings, "laser", "pulsed", "steel"),
            "/settings/laser/pulsed/steel-settings"
        );
        assert_eq!(
            reg.canonical_path(Domain::Compounds, "oxide", "iron", "rust"),
            "/compounds/oxide/iron/rust-compound"
        );
    }

    #[test]
    fn registered_template_overrides_default() {
        let mut reg = PathTemplateRegistry::default();
        reg.register(Domain::Materials, PathTemplate::new("mat", "-v2"));
        assert_eq!(
            reg.canonical_path(Domain::Materials, "metal", "ferrous", "steel"),
            "/mat/metal/ferrous/steel-v2"
        );
    }

    #[test]
    fn registry_deserializes_from_slug_keyed_json() {
        let json = r#"{"materials": {"prefix": "stuff"}}"#;
        let reg: PathTemplateRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(
            reg.template(Domain::Materials),
            &PathTemplate::new("stuff", "")
        );
        // Unmentioned domains keep the default template.
        assert_eq!(
            reg.template(Domain::Settings),
            &PathTemplate::new("settings", "-settings")
        );
    }
}
